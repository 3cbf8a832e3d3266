//! Host side of the boundary.
//!
//! The host hands every instance a flat callback table in `init`. The
//! adapters in this module re-expose those tables as the callback
//! interfaces a plugin implementation talks to, and the contexts wrap the
//! adapters in a safe, `Result`-returning API.

mod callbacks;
pub mod context;

pub use callbacks::{CallbackAdapter, HostCallbacks, VideoCallbackAdapter, VideoHostCallbacks};
pub use context::{HostContext, VideoHostContext};

use crate::handle::VdjPlugin;
use crate::types::{TVertex, VdjVideoEngine, HRESULT};
use std::ffi::{c_char, c_void};

/// Callbacks the host provides to every plugin kind.
///
/// Each entry receives the instance handle it was bound to as its first
/// argument. A null entry makes the matching adapter call fail with
/// `E_FAIL` instead of jumping through it.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct VdjCallbacks {
    pub send_command:
        Option<unsafe extern "C" fn(plugin: *mut VdjPlugin, command: *const c_char) -> HRESULT>,
    pub get_info: Option<
        unsafe extern "C" fn(
            plugin: *mut VdjPlugin,
            command: *const c_char,
            result: *mut f64,
        ) -> HRESULT,
    >,
    pub get_string_info: Option<
        unsafe extern "C" fn(
            plugin: *mut VdjPlugin,
            command: *const c_char,
            result: *mut c_char,
            size: i32,
        ) -> HRESULT,
    >,
    pub declare_parameter: Option<
        unsafe extern "C" fn(
            plugin: *mut VdjPlugin,
            parameter: *mut c_void,
            type_: i32,
            id: i32,
            name: *const c_char,
            short_name: *const c_char,
            default_value: f32,
        ) -> HRESULT,
    >,
    pub get_song_buffer: Option<
        unsafe extern "C" fn(
            plugin: *mut VdjPlugin,
            pos: i32,
            nb: i32,
            buffer: *mut *mut i16,
        ) -> HRESULT,
    >,
}

/// Callbacks the host provides to video plugin kinds, next to [`VdjCallbacks`].
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct VdjVideoCallbacks {
    pub draw_deck: Option<unsafe extern "C" fn(plugin: *mut VdjPlugin) -> HRESULT>,
    pub get_device: Option<
        unsafe extern "C" fn(
            plugin: *mut VdjPlugin,
            engine: VdjVideoEngine,
            device: *mut *mut c_void,
        ) -> HRESULT,
    >,
    pub get_texture: Option<
        unsafe extern "C" fn(
            plugin: *mut VdjPlugin,
            engine: VdjVideoEngine,
            texture: *mut *mut c_void,
            vertices: *mut *mut TVertex,
        ) -> HRESULT,
    >,
}
