//! Audio plugin kinds: DSP, buffer DSP and position DSP.
//!
//! Sample buffers are interleaved stereo `f32`; a call carrying `nb`
//! samples hands the plugin `nb * CHANNELS` values.

use super::{Plugin, PluginCore};
use crate::handle::{self, VdjPluginBufferDsp, VdjPluginDsp, VdjPluginPositionDsp};
use crate::types::{PluginIdentity, PluginKind, HRESULT, S_OK};
use std::ptr;

/// Audio effect processing the deck's samples in place.
pub trait DspPlugin: Plugin {
    fn on_start(&mut self) -> HRESULT {
        S_OK
    }

    fn on_stop(&mut self) -> HRESULT {
        S_OK
    }

    fn on_process_samples(&mut self, _buffer: &mut [f32]) -> HRESULT {
        S_OK
    }
}

/// Plugin supplying the song samples the deck plays, as 16-bit stereo.
pub trait BufferDspPlugin: Plugin {
    fn on_start(&mut self) -> HRESULT {
        S_OK
    }

    fn on_stop(&mut self) -> HRESULT {
        S_OK
    }

    /// Buffer of `nb` stereo samples starting at `song_pos`, or null.
    ///
    /// The default hands back the host's own buffer, or null when no
    /// callbacks are bound or the host refuses.
    fn on_get_song_buffer(&mut self, song_pos: i32, nb: i32) -> *mut i16 {
        self.core()
            .host()
            .and_then(|host| host.song_buffer(song_pos, nb).ok())
            .unwrap_or(ptr::null_mut())
    }
}

/// Plugin remapping the playback position and volume of a deck.
pub trait PositionDspPlugin: Plugin {
    fn on_start(&mut self) -> HRESULT {
        S_OK
    }

    fn on_stop(&mut self) -> HRESULT {
        S_OK
    }

    fn on_transform_position(
        &mut self,
        _song_pos: &mut f64,
        _video_pos: &mut f64,
        _volume: &mut f32,
        _src_volume: &mut f32,
    ) -> HRESULT {
        S_OK
    }

    fn on_process_samples(&mut self, _buffer: &mut [f32]) -> HRESULT {
        S_OK
    }
}

#[derive(Debug)]
pub struct DspWrapper {
    core: PluginCore,
}

impl DspWrapper {
    pub fn new(identity: PluginIdentity) -> Self {
        Self {
            core: PluginCore::new(identity),
        }
    }
}

impl Default for DspWrapper {
    fn default() -> Self {
        Self {
            core: PluginCore::for_kind(PluginKind::Dsp),
        }
    }
}

impl Plugin for DspWrapper {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }
}

impl DspPlugin for DspWrapper {}

#[derive(Debug)]
pub struct BufferDspWrapper {
    core: PluginCore,
}

impl BufferDspWrapper {
    pub fn new(identity: PluginIdentity) -> Self {
        Self {
            core: PluginCore::new(identity),
        }
    }
}

impl Default for BufferDspWrapper {
    fn default() -> Self {
        Self {
            core: PluginCore::for_kind(PluginKind::BufferDsp),
        }
    }
}

impl Plugin for BufferDspWrapper {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }
}

impl BufferDspPlugin for BufferDspWrapper {}

#[derive(Debug)]
pub struct PositionDspWrapper {
    core: PluginCore,
}

impl PositionDspWrapper {
    pub fn new(identity: PluginIdentity) -> Self {
        Self {
            core: PluginCore::new(identity),
        }
    }
}

impl Default for PositionDspWrapper {
    fn default() -> Self {
        Self {
            core: PluginCore::for_kind(PluginKind::PositionDsp),
        }
    }
}

impl Plugin for PositionDspWrapper {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }
}

impl PositionDspPlugin for PositionDspWrapper {}

pub fn into_handle(plugin: impl DspPlugin + 'static) -> *mut VdjPluginDsp {
    let plugin: Box<dyn DspPlugin> = Box::new(plugin);
    handle::into_raw::<VdjPluginDsp>(plugin)
}

pub fn into_buffer_handle(plugin: impl BufferDspPlugin + 'static) -> *mut VdjPluginBufferDsp {
    let plugin: Box<dyn BufferDspPlugin> = Box::new(plugin);
    handle::into_raw::<VdjPluginBufferDsp>(plugin)
}

pub fn into_position_handle(
    plugin: impl PositionDspPlugin + 'static,
) -> *mut VdjPluginPositionDsp {
    let plugin: Box<dyn PositionDspPlugin> = Box::new(plugin);
    handle::into_raw::<VdjPluginPositionDsp>(plugin)
}
