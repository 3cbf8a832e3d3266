use super::{VdjCallbacks, VdjVideoCallbacks};
use crate::handle::VdjPlugin;
use crate::types::{TVertex, VdjVideoEngine, E_FAIL, HRESULT};
use std::ffi::{c_char, c_void};

/// Callback interface a plugin uses to reach the host.
///
/// Arguments are passed through untouched; pointer validity is the
/// caller's and the host's business.
pub trait HostCallbacks {
    fn send_command(&self, command: *const c_char) -> HRESULT;
    fn get_info(&self, command: *const c_char, result: *mut f64) -> HRESULT;
    fn get_string_info(&self, command: *const c_char, result: *mut c_char, size: i32) -> HRESULT;
    fn declare_parameter(
        &self,
        parameter: *mut c_void,
        type_: i32,
        id: i32,
        name: *const c_char,
        short_name: *const c_char,
        default_value: f32,
    ) -> HRESULT;
    fn get_song_buffer(&self, pos: i32, nb: i32, buffer: *mut *mut i16) -> HRESULT;
}

/// Video callback interface, only available to video plugin kinds.
pub trait VideoHostCallbacks {
    fn draw_deck(&self) -> HRESULT;
    fn get_device(&self, engine: VdjVideoEngine, device: *mut *mut c_void) -> HRESULT;
    fn get_texture(
        &self,
        engine: VdjVideoEngine,
        texture: *mut *mut c_void,
        vertices: *mut *mut TVertex,
    ) -> HRESULT;
}

/// Re-exposes a host [`VdjCallbacks`] table as [`HostCallbacks`].
#[derive(Debug)]
pub struct CallbackAdapter {
    table: *const VdjCallbacks,
    plugin: *mut VdjPlugin,
}

// Safety: the adapter only ever runs on the thread currently driving its
// instance; the host guarantees no concurrent calls per handle.
unsafe impl Send for CallbackAdapter {}

impl CallbackAdapter {
    /// # Safety
    /// `table` must be non-null and stay valid for the adapter's lifetime.
    /// `plugin` is passed back to the host verbatim and never dereferenced.
    pub unsafe fn new(table: *const VdjCallbacks, plugin: *mut VdjPlugin) -> Self {
        Self { table, plugin }
    }

    /// Handle injected as the first argument of every callback.
    pub fn plugin(&self) -> *mut VdjPlugin {
        self.plugin
    }

    pub fn table(&self) -> *const VdjCallbacks {
        self.table
    }

    fn callbacks(&self) -> &VdjCallbacks {
        // Safety: guaranteed by the contract of `new`.
        unsafe { &*self.table }
    }
}

impl HostCallbacks for CallbackAdapter {
    fn send_command(&self, command: *const c_char) -> HRESULT {
        match self.callbacks().send_command {
            Some(f) => unsafe { f(self.plugin, command) },
            None => E_FAIL,
        }
    }

    fn get_info(&self, command: *const c_char, result: *mut f64) -> HRESULT {
        match self.callbacks().get_info {
            Some(f) => unsafe { f(self.plugin, command, result) },
            None => E_FAIL,
        }
    }

    fn get_string_info(&self, command: *const c_char, result: *mut c_char, size: i32) -> HRESULT {
        match self.callbacks().get_string_info {
            Some(f) => unsafe { f(self.plugin, command, result, size) },
            None => E_FAIL,
        }
    }

    fn declare_parameter(
        &self,
        parameter: *mut c_void,
        type_: i32,
        id: i32,
        name: *const c_char,
        short_name: *const c_char,
        default_value: f32,
    ) -> HRESULT {
        match self.callbacks().declare_parameter {
            Some(f) => unsafe {
                f(
                    self.plugin,
                    parameter,
                    type_,
                    id,
                    name,
                    short_name,
                    default_value,
                )
            },
            None => E_FAIL,
        }
    }

    fn get_song_buffer(&self, pos: i32, nb: i32, buffer: *mut *mut i16) -> HRESULT {
        match self.callbacks().get_song_buffer {
            Some(f) => unsafe { f(self.plugin, pos, nb, buffer) },
            None => E_FAIL,
        }
    }
}

/// Re-exposes a host [`VdjVideoCallbacks`] table as [`VideoHostCallbacks`].
#[derive(Debug)]
pub struct VideoCallbackAdapter {
    table: *const VdjVideoCallbacks,
    plugin: *mut VdjPlugin,
}

// Safety: see `CallbackAdapter`.
unsafe impl Send for VideoCallbackAdapter {}

impl VideoCallbackAdapter {
    /// # Safety
    /// `table` must be non-null and stay valid for the adapter's lifetime.
    pub unsafe fn new(table: *const VdjVideoCallbacks, plugin: *mut VdjPlugin) -> Self {
        Self { table, plugin }
    }

    pub fn plugin(&self) -> *mut VdjPlugin {
        self.plugin
    }

    pub fn table(&self) -> *const VdjVideoCallbacks {
        self.table
    }

    fn callbacks(&self) -> &VdjVideoCallbacks {
        // Safety: guaranteed by the contract of `new`.
        unsafe { &*self.table }
    }
}

impl VideoHostCallbacks for VideoCallbackAdapter {
    fn draw_deck(&self) -> HRESULT {
        match self.callbacks().draw_deck {
            Some(f) => unsafe { f(self.plugin) },
            None => E_FAIL,
        }
    }

    fn get_device(&self, engine: VdjVideoEngine, device: *mut *mut c_void) -> HRESULT {
        match self.callbacks().get_device {
            Some(f) => unsafe { f(self.plugin, engine, device) },
            None => E_FAIL,
        }
    }

    fn get_texture(
        &self,
        engine: VdjVideoEngine,
        texture: *mut *mut c_void,
        vertices: *mut *mut TVertex,
    ) -> HRESULT {
        match self.callbacks().get_texture {
            Some(f) => unsafe { f(self.plugin, engine, texture, vertices) },
            None => E_FAIL,
        }
    }
}
