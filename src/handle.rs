//! Opaque instance handles.
//!
//! A handle is a `Box<dyn Trait>` boxed once more so the pointer crossing
//! the boundary is thin. It is owned by whoever last received it from
//! `<kind>_create` (or [`into_raw`]) until it is passed to `<kind>_release`.

use crate::plugin::{
    BufferDspPlugin, DspPlugin, OnlineSourcePlugin, Plugin, PositionDspPlugin, VideoFxPlugin,
    VideoTransitionPlugin,
};

/// Generic plugin handle. Also the context pointer every host callback
/// receives, whatever the kind of the calling instance.
#[repr(C)]
pub struct VdjPlugin {
    _priv: [u8; 0],
}

#[repr(C)]
pub struct VdjPluginDsp {
    _priv: [u8; 0],
}

#[repr(C)]
pub struct VdjPluginBufferDsp {
    _priv: [u8; 0],
}

#[repr(C)]
pub struct VdjPluginPositionDsp {
    _priv: [u8; 0],
}

#[repr(C)]
pub struct VdjPluginVideoFx {
    _priv: [u8; 0],
}

#[repr(C)]
pub struct VdjPluginVideoTransition {
    _priv: [u8; 0],
}

#[repr(C)]
pub struct VdjPluginOnlineSource {
    _priv: [u8; 0],
}

/// Ties an opaque handle type to the plugin interface behind it.
///
/// # Safety
/// A `*mut Self` produced by this module always points to a
/// `Box<Self::Target>`; implementors must not reuse a handle type for two
/// targets.
pub unsafe trait PluginHandle {
    type Target: ?Sized + Plugin;
}

unsafe impl PluginHandle for VdjPlugin {
    type Target = dyn Plugin;
}

unsafe impl PluginHandle for VdjPluginDsp {
    type Target = dyn DspPlugin;
}

unsafe impl PluginHandle for VdjPluginBufferDsp {
    type Target = dyn BufferDspPlugin;
}

unsafe impl PluginHandle for VdjPluginPositionDsp {
    type Target = dyn PositionDspPlugin;
}

unsafe impl PluginHandle for VdjPluginVideoFx {
    type Target = dyn VideoFxPlugin;
}

unsafe impl PluginHandle for VdjPluginVideoTransition {
    type Target = dyn VideoTransitionPlugin;
}

unsafe impl PluginHandle for VdjPluginOnlineSource {
    type Target = dyn OnlineSourcePlugin;
}

/// Leaks `plugin` into a handle the host can drive through the flat ABI.
pub fn into_raw<H: PluginHandle>(plugin: Box<H::Target>) -> *mut H {
    Box::into_raw(Box::new(plugin)).cast()
}

/// Borrows the plugin behind `handle`, or `None` for a null handle.
///
/// # Safety
/// `handle` must be null or come from [`into_raw`] with the same `H` and
/// not have been released. The borrow must not overlap another one.
pub unsafe fn as_mut<'a, H: PluginHandle>(handle: *mut H) -> Option<&'a mut H::Target> {
    handle
        .cast::<Box<H::Target>>()
        .as_mut()
        .map(|plugin| &mut **plugin)
}

/// Drops the plugin behind `handle`, including its callback adapters.
/// A null handle is ignored.
///
/// # Safety
/// Same as [`as_mut`]; the handle is invalid afterwards.
pub unsafe fn release<H: PluginHandle>(handle: *mut H) {
    if handle.is_null() {
        return;
    }
    drop(Box::from_raw(handle.cast::<Box<H::Target>>()));
}
