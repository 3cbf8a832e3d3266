//! The flat ABI: one `extern "C"` function per host-invocable operation
//! per plugin kind.
//!
//! Every function checks its handle (and any table or out pointer it needs)
//! for null before touching it and answers `E_FAIL`, zero or null instead.
//! Panics never cross the boundary: they are caught, logged and reported
//! the same way.
//!
//! Handles must come from the matching `<kind>_create` (or an
//! `into_handle` of the same kind) and must not be used after
//! `<kind>_release`. Calls on one handle must not overlap.
//!
//! Calls are not re-entrant either: while an export runs, the plugin holds
//! the only `&mut` to its instance. A host callback invoked from inside it
//! (a getter answered from within `send_command`, say) must not call back
//! into any export on the same handle. Other handles are fine.

#![allow(clippy::missing_safety_doc)]

use crate::handle::{self, PluginHandle, VdjPlugin};
use crate::host::{CallbackAdapter, VdjCallbacks, VdjVideoCallbacks, VideoCallbackAdapter};
use crate::plugin::{Plugin, VideoPlugin};
use crate::types::{VdjPluginInfo, CHANNELS, E_FAIL, HRESULT, S_OK};
use std::any::Any;
use std::ffi::{c_char, CStr};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::{ptr, slice};

/// Generates the exports every kind shares: `release`, `on_load`,
/// `get_info`, `on_parameter` and `on_get_parameter_string`.
macro_rules! common_exports {
    ($handle:ty {
        release: $release:ident,
        on_load: $on_load:ident,
        get_info: $get_info:ident,
        on_parameter: $on_parameter:ident,
        on_get_parameter_string: $on_get_parameter_string:ident $(,)?
    }) => {
        #[no_mangle]
        pub unsafe extern "C" fn $release(plugin: *mut $handle) {
            $crate::ffi::release(plugin, stringify!($release));
        }

        #[no_mangle]
        pub unsafe extern "C" fn $on_load(plugin: *mut $handle) -> $crate::types::HRESULT {
            $crate::ffi::with_plugin(
                plugin,
                stringify!($on_load),
                $crate::types::E_FAIL,
                |p| $crate::plugin::Plugin::on_load(p),
            )
        }

        #[no_mangle]
        pub unsafe extern "C" fn $get_info(
            plugin: *mut $handle,
            info: *mut $crate::types::VdjPluginInfo,
        ) -> $crate::types::HRESULT {
            $crate::ffi::get_info(plugin, info, stringify!($get_info))
        }

        #[no_mangle]
        pub unsafe extern "C" fn $on_parameter(
            plugin: *mut $handle,
            id: i32,
        ) -> $crate::types::HRESULT {
            $crate::ffi::with_plugin(
                plugin,
                stringify!($on_parameter),
                $crate::types::E_FAIL,
                |p| $crate::plugin::Plugin::on_parameter(p, id),
            )
        }

        #[no_mangle]
        pub unsafe extern "C" fn $on_get_parameter_string(
            plugin: *mut $handle,
            id: i32,
            out_param: *mut std::ffi::c_char,
            out_param_size: i32,
        ) -> $crate::types::HRESULT {
            $crate::ffi::get_parameter_string(
                plugin,
                id,
                out_param,
                out_param_size,
                stringify!($on_get_parameter_string),
            )
        }
    };
}

/// Generates numeric getters reading host-fed values off the plugin.
/// A null handle reads as zero.
macro_rules! getters {
    ($handle:ty { $( $name:ident -> $ty:ty = |$p:ident| $body:expr; )+ }) => {
        $(
            #[no_mangle]
            pub unsafe extern "C" fn $name(plugin: *mut $handle) -> $ty {
                $crate::ffi::with_plugin(plugin, stringify!($name), <$ty>::default(), |$p| $body)
            }
        )+
    };
}

mod dsp;
mod generic;
mod online;
mod video;

pub use dsp::*;
pub use generic::*;
pub use online::*;
pub use video::*;

/// Extracts a readable message from a panic payload.
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        return (*msg).to_string();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "non-string panic payload".to_string()
}

/// Runs `f`, turning a panic into `default`.
pub(crate) fn guard<R>(op: &'static str, default: R, f: impl FnOnce() -> R) -> R {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => {
            log::error!("panic in `{op}`: {}", panic_message(payload));
            default
        }
    }
}

/// Runs `f` on the plugin behind `handle`. `default` is returned for a
/// null handle and when `f` panics.
///
/// # Safety
/// No other call on the same handle may be in flight, including one further
/// up this thread's stack.
pub(crate) unsafe fn with_plugin<H, R>(
    plugin: *mut H,
    op: &'static str,
    default: R,
    f: impl FnOnce(&mut H::Target) -> R,
) -> R
where
    H: PluginHandle,
{
    match handle::as_mut(plugin) {
        Some(plugin) => guard(op, default, || f(plugin)),
        None => default,
    }
}

pub(crate) fn create<H>(op: &'static str, make: impl FnOnce() -> *mut H) -> *mut H {
    let handle = guard(op, ptr::null_mut(), make);
    log::trace!("{op} -> {handle:p}");
    handle
}

pub(crate) unsafe fn release<H: PluginHandle>(plugin: *mut H, op: &'static str) {
    if plugin.is_null() {
        return;
    }
    log::trace!("{op}({plugin:p})");
    guard(op, (), || handle::release(plugin));
}

/// Binds `callbacks` to the instance. A second call replaces the adapter
/// bound by the first.
pub(crate) unsafe fn init<H: PluginHandle>(
    handle: *mut H,
    callbacks: *const VdjCallbacks,
    op: &'static str,
) -> HRESULT {
    if handle.is_null() || callbacks.is_null() {
        log::warn!("{op}: null handle or callback table, nothing bound");
        return E_FAIL;
    }
    let context = handle.cast::<VdjPlugin>();
    with_plugin(handle, op, E_FAIL, |plugin| {
        plugin
            .core_mut()
            .bind(CallbackAdapter::new(callbacks, context));
        log::trace!("{op}({handle:p}): callbacks bound");
        S_OK
    })
}

/// Video variant of [`init`]: both tables are required and bound together.
pub(crate) unsafe fn init_video<H>(
    handle: *mut H,
    callbacks: *const VdjCallbacks,
    video_callbacks: *const VdjVideoCallbacks,
    op: &'static str,
) -> HRESULT
where
    H: PluginHandle,
    H::Target: VideoPlugin,
{
    if handle.is_null() || callbacks.is_null() || video_callbacks.is_null() {
        log::warn!("{op}: null handle or callback table, nothing bound");
        return E_FAIL;
    }
    let context = handle.cast::<VdjPlugin>();
    with_plugin(handle, op, E_FAIL, |plugin| {
        plugin
            .core_mut()
            .bind(CallbackAdapter::new(callbacks, context));
        plugin
            .video_mut()
            .bind(VideoCallbackAdapter::new(video_callbacks, context));
        log::trace!("{op}({handle:p}): callbacks and video callbacks bound");
        S_OK
    })
}

pub(crate) unsafe fn get_info<H: PluginHandle>(
    handle: *mut H,
    info: *mut VdjPluginInfo,
    op: &'static str,
) -> HRESULT {
    if handle.is_null() || info.is_null() {
        log::warn!("{op}: null handle or info record");
        return E_FAIL;
    }
    with_plugin(handle, op, E_FAIL, |plugin| {
        Plugin::on_get_plugin_info(&*plugin, &mut *info)
    })
}

/// A null or empty out buffer reaches the plugin as an empty slice.
pub(crate) unsafe fn get_parameter_string<H: PluginHandle>(
    handle: *mut H,
    id: i32,
    out: *mut c_char,
    size: i32,
    op: &'static str,
) -> HRESULT {
    let out: &mut [u8] = if out.is_null() || size <= 0 {
        &mut []
    } else {
        slice::from_raw_parts_mut(out.cast::<u8>(), size as usize)
    };
    with_plugin(handle, op, E_FAIL, |plugin| {
        plugin.on_get_parameter_string(id, out)
    })
}

/// Interleaved stereo view of a host sample buffer holding `nb` samples.
/// `None` when samples are announced but the buffer is null.
pub(crate) unsafe fn samples<'a>(buffer: *mut f32, nb: i32) -> Option<&'a mut [f32]> {
    if nb <= 0 {
        return Some(&mut []);
    }
    if buffer.is_null() {
        return None;
    }
    Some(slice::from_raw_parts_mut(buffer, nb as usize * CHANNELS))
}

pub(crate) unsafe fn opt_cstr<'a>(ptr: *const c_char) -> Option<&'a CStr> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr))
    }
}
