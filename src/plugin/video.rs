//! Video plugin kinds. Both take a second callback table for the
//! video pipeline next to the regular host callbacks.

use super::{Plugin, PluginCore, VideoCore, VideoPlugin};
use crate::handle::{self, VdjPluginVideoFx, VdjPluginVideoTransition};
use crate::types::{PluginIdentity, PluginKind, E_NOTIMPL, HRESULT, S_OK};

pub trait VideoFxPlugin: VideoPlugin {
    fn on_start(&mut self) -> HRESULT {
        S_OK
    }

    fn on_stop(&mut self) -> HRESULT {
        S_OK
    }

    fn on_draw(&mut self) -> HRESULT {
        S_OK
    }

    fn on_device_init(&mut self) -> HRESULT {
        S_OK
    }

    fn on_device_close(&mut self) -> HRESULT {
        S_OK
    }

    /// Audio feed for audio-reactive effects; interleaved stereo.
    fn on_audio_samples(&mut self, _buffer: &[f32]) -> HRESULT {
        E_NOTIMPL
    }
}

pub trait VideoTransitionPlugin: VideoPlugin {
    /// `crossfader` runs from 0.0 (first deck) to 1.0 (second deck).
    fn on_draw(&mut self, _crossfader: f32) -> HRESULT {
        S_OK
    }

    fn on_device_init(&mut self) -> HRESULT {
        S_OK
    }

    fn on_device_close(&mut self) -> HRESULT {
        S_OK
    }
}

#[derive(Debug)]
pub struct VideoFxWrapper {
    core: PluginCore,
    video: VideoCore,
}

impl VideoFxWrapper {
    pub fn new(identity: PluginIdentity) -> Self {
        Self {
            core: PluginCore::new(identity),
            video: VideoCore::new(),
        }
    }
}

impl Default for VideoFxWrapper {
    fn default() -> Self {
        Self::new(PluginIdentity::for_kind(PluginKind::VideoFx))
    }
}

impl Plugin for VideoFxWrapper {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }
}

impl VideoPlugin for VideoFxWrapper {
    fn video(&self) -> &VideoCore {
        &self.video
    }

    fn video_mut(&mut self) -> &mut VideoCore {
        &mut self.video
    }
}

impl VideoFxPlugin for VideoFxWrapper {}

#[derive(Debug)]
pub struct VideoTransitionWrapper {
    core: PluginCore,
    video: VideoCore,
}

impl VideoTransitionWrapper {
    pub fn new(identity: PluginIdentity) -> Self {
        Self {
            core: PluginCore::new(identity),
            video: VideoCore::new(),
        }
    }
}

impl Default for VideoTransitionWrapper {
    fn default() -> Self {
        Self::new(PluginIdentity::for_kind(PluginKind::VideoTransition))
    }
}

impl Plugin for VideoTransitionWrapper {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }
}

impl VideoPlugin for VideoTransitionWrapper {
    fn video(&self) -> &VideoCore {
        &self.video
    }

    fn video_mut(&mut self) -> &mut VideoCore {
        &mut self.video
    }
}

impl VideoTransitionPlugin for VideoTransitionWrapper {}

pub fn into_fx_handle(plugin: impl VideoFxPlugin + 'static) -> *mut VdjPluginVideoFx {
    let plugin: Box<dyn VideoFxPlugin> = Box::new(plugin);
    handle::into_raw::<VdjPluginVideoFx>(plugin)
}

pub fn into_transition_handle(
    plugin: impl VideoTransitionPlugin + 'static,
) -> *mut VdjPluginVideoTransition {
    let plugin: Box<dyn VideoTransitionPlugin> = Box::new(plugin);
    handle::into_raw::<VdjPluginVideoTransition>(plugin)
}
