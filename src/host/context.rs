//! Safe access to the host from inside a plugin implementation.
//!
//! ```ignore
//! if let Some(host) = self.core().host() {
//!     let title = host.get_info_string("deck 1 get_title")?;
//!     let position = host.get_info_double("deck 1 get_position")?;
//!     host.send_command("deck 1 play")?;
//! }
//! ```

use super::{HostCallbacks, VideoHostCallbacks};
use crate::error::{check, Result, ShimError};
use crate::types::{ParamType, TVertex, VideoEngine};
use std::ffi::{c_void, CStr, CString};
use std::ptr;

/// Capacity of the buffer handed to `get_string_info`.
pub const STRING_INFO_CAPACITY: usize = 1024;

fn c_string(value: &str) -> Result<CString> {
    CString::new(value).map_err(|_| ShimError::InvalidString(value.to_string()))
}

/// Typed, `Result`-returning view over a bound [`HostCallbacks`].
#[derive(Clone, Copy)]
pub struct HostContext<'a> {
    callbacks: &'a dyn HostCallbacks,
}

impl<'a> HostContext<'a> {
    pub fn new(callbacks: &'a dyn HostCallbacks) -> Self {
        Self { callbacks }
    }

    /// Runs a host script command. `Ok(false)` is the host's benign
    /// negative answer.
    pub fn send_command(&self, command: &str) -> Result<bool> {
        let command = c_string(command)?;
        check(self.callbacks.send_command(command.as_ptr()))
    }

    /// Queries a numeric value, e.g. `"deck 1 get_position"`.
    pub fn get_info_double(&self, command: &str) -> Result<f64> {
        let command = c_string(command)?;
        let mut result = 0.0f64;
        check(self.callbacks.get_info(command.as_ptr(), &mut result))?;
        Ok(result)
    }

    /// Queries a text value, e.g. `"deck 1 get_title"`.
    pub fn get_info_string(&self, command: &str) -> Result<String> {
        let command = c_string(command)?;
        let mut output = [0u8; STRING_INFO_CAPACITY];
        check(self.callbacks.get_string_info(
            command.as_ptr(),
            output.as_mut_ptr().cast(),
            STRING_INFO_CAPACITY as i32,
        ))?;
        // Hosts that fill the whole buffer may leave it unterminated.
        output[STRING_INFO_CAPACITY - 1] = 0;
        let text = CStr::from_bytes_until_nul(&output)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(text)
    }

    /// Declares a parameter backed by `parameter`, which the host writes
    /// through for the lifetime of the instance.
    pub fn declare_parameter(
        &self,
        parameter: *mut c_void,
        kind: ParamType,
        id: i32,
        name: &str,
        short_name: &str,
        default_value: f32,
    ) -> Result<()> {
        let name = c_string(name)?;
        let short_name = c_string(short_name)?;
        check(self.callbacks.declare_parameter(
            parameter,
            kind.as_raw(),
            id,
            name.as_ptr(),
            short_name.as_ptr(),
            default_value,
        ))?;
        Ok(())
    }

    /// Fetches `nb` stereo samples of the song at `pos`.
    ///
    /// The returned buffer belongs to the host and is only valid until the
    /// current callback returns.
    pub fn song_buffer(&self, pos: i32, nb: i32) -> Result<*mut i16> {
        let mut buffer: *mut i16 = ptr::null_mut();
        check(self.callbacks.get_song_buffer(pos, nb, &mut buffer))?;
        if buffer.is_null() {
            return Err(ShimError::NullPointer("song buffer"));
        }
        Ok(buffer)
    }
}

/// Typed view over a bound [`VideoHostCallbacks`].
#[derive(Clone, Copy)]
pub struct VideoHostContext<'a> {
    callbacks: &'a dyn VideoHostCallbacks,
}

impl<'a> VideoHostContext<'a> {
    pub fn new(callbacks: &'a dyn VideoHostCallbacks) -> Self {
        Self { callbacks }
    }

    /// Asks the host to draw the underlying deck image.
    pub fn draw_deck(&self) -> Result<()> {
        check(self.callbacks.draw_deck())?;
        Ok(())
    }

    /// Graphics device of the requested engine, as an opaque token.
    pub fn device(&self, engine: VideoEngine) -> Result<*mut c_void> {
        let mut device = ptr::null_mut();
        check(self.callbacks.get_device(engine.as_raw(), &mut device))?;
        Ok(device)
    }

    /// Deck texture and its vertex quad, as opaque tokens.
    pub fn texture(&self, engine: VideoEngine) -> Result<(*mut c_void, *mut TVertex)> {
        let mut texture = ptr::null_mut();
        let mut vertices = ptr::null_mut();
        check(
            self.callbacks
                .get_texture(engine.as_raw(), &mut texture, &mut vertices),
        )?;
        Ok((texture, vertices))
    }
}
