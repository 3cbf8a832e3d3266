//! Plugin interfaces, one trait per kind.
//!
//! Every provided method is the default policy the flat ABI falls back to:
//! pass-through operations succeed, optional integration points answer
//! `E_NOTIMPL`. An implementation embeds a [`PluginCore`] (and a
//! [`VideoCore`] for video kinds), hands it out through `core()` /
//! `core_mut()` and overrides only what it needs.
//!
//! ```ignore
//! struct Gain {
//!     core: PluginCore,
//!     gain: f32,
//! }
//!
//! impl Plugin for Gain {
//!     fn core(&self) -> &PluginCore { &self.core }
//!     fn core_mut(&mut self) -> &mut PluginCore { &mut self.core }
//! }
//!
//! impl DspPlugin for Gain {
//!     fn on_process_samples(&mut self, buffer: &mut [f32]) -> HRESULT {
//!         buffer.iter_mut().for_each(|s| *s *= self.gain);
//!         S_OK
//!     }
//! }
//!
//! let handle = dsp::into_handle(Gain {
//!     core: PluginCore::new(PluginIdentity::for_kind(PluginKind::Dsp).name("Gain")),
//!     gain: 0.5,
//! });
//! ```

pub mod dsp;
pub mod online;
pub mod video;

pub use dsp::{
    BufferDspPlugin, BufferDspWrapper, DspPlugin, DspWrapper, PositionDspPlugin,
    PositionDspWrapper,
};
pub use online::{
    OnlineSourcePlugin, OnlineSourceWrapper, VdjContextMenu, VdjString, VdjSubfoldersList,
    VdjTracksList,
};
pub use video::{VideoFxPlugin, VideoFxWrapper, VideoTransitionPlugin, VideoTransitionWrapper};

use crate::handle::{self, VdjPlugin};
use crate::host::{CallbackAdapter, HostContext, VideoCallbackAdapter, VideoHostContext};
use crate::types::{
    HostTransport, PluginIdentity, PluginKind, VdjPluginInfo, VideoSurface, E_FAIL, E_NOTIMPL,
    HRESULT, S_OK,
};

/// State every plugin instance carries: its identity, the host callbacks
/// bound by `init` and the transport values the host keeps current.
#[derive(Debug)]
pub struct PluginCore {
    identity: PluginIdentity,
    callbacks: Option<CallbackAdapter>,
    transport: HostTransport,
}

impl PluginCore {
    pub fn new(identity: PluginIdentity) -> Self {
        Self {
            identity,
            callbacks: None,
            transport: HostTransport::default(),
        }
    }

    pub fn for_kind(kind: PluginKind) -> Self {
        Self::new(PluginIdentity::for_kind(kind))
    }

    pub fn identity(&self) -> &PluginIdentity {
        &self.identity
    }

    /// Replaces the identity. Info records filled earlier dangle afterwards.
    pub fn set_identity(&mut self, identity: PluginIdentity) {
        self.identity = identity;
    }

    pub fn callbacks(&self) -> Option<&CallbackAdapter> {
        self.callbacks.as_ref()
    }

    /// Safe host access, once `init` has bound a callback table.
    pub fn host(&self) -> Option<HostContext<'_>> {
        self.callbacks
            .as_ref()
            .map(|adapter| HostContext::new(adapter))
    }

    pub fn is_initialized(&self) -> bool {
        self.callbacks.is_some()
    }

    /// Binds `adapter`, dropping any adapter bound before.
    pub(crate) fn bind(&mut self, adapter: CallbackAdapter) {
        self.callbacks = Some(adapter);
    }

    pub fn transport(&self) -> &HostTransport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut HostTransport {
        &mut self.transport
    }
}

impl Default for PluginCore {
    fn default() -> Self {
        Self::new(PluginIdentity::default())
    }
}

/// Video-only state: the video callbacks and the output surface size.
#[derive(Debug, Default)]
pub struct VideoCore {
    callbacks: Option<VideoCallbackAdapter>,
    surface: VideoSurface,
}

impl VideoCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callbacks(&self) -> Option<&VideoCallbackAdapter> {
        self.callbacks.as_ref()
    }

    pub fn host(&self) -> Option<VideoHostContext<'_>> {
        self.callbacks
            .as_ref()
            .map(|adapter| VideoHostContext::new(adapter))
    }

    pub fn is_initialized(&self) -> bool {
        self.callbacks.is_some()
    }

    pub(crate) fn bind(&mut self, adapter: VideoCallbackAdapter) {
        self.callbacks = Some(adapter);
    }

    pub fn surface(&self) -> &VideoSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut VideoSurface {
        &mut self.surface
    }
}

/// Operations shared by every plugin kind.
pub trait Plugin: Send {
    fn core(&self) -> &PluginCore;
    fn core_mut(&mut self) -> &mut PluginCore;

    fn on_load(&mut self) -> HRESULT {
        S_OK
    }

    /// Lends the instance identity to `info`.
    fn on_get_plugin_info(&self, info: &mut VdjPluginInfo) -> HRESULT {
        self.core().identity().fill(info);
        S_OK
    }

    fn on_parameter(&mut self, _id: i32) -> HRESULT {
        S_OK
    }

    /// Writes the display string of parameter `id` into `out`, see
    /// [`write_parameter_string`].
    fn on_get_parameter_string(&mut self, _id: i32, _out: &mut [u8]) -> HRESULT {
        E_NOTIMPL
    }
}

/// Plugin kinds drawing into the host's video pipeline.
pub trait VideoPlugin: Plugin {
    fn video(&self) -> &VideoCore;
    fn video_mut(&mut self) -> &mut VideoCore;
}

/// Copies `text` into a host buffer, truncating to fit and always leaving
/// it NUL-terminated. Fails on an empty buffer.
pub fn write_parameter_string(out: &mut [u8], text: &str) -> HRESULT {
    let Some(capacity) = out.len().checked_sub(1) else {
        return E_FAIL;
    };
    let bytes = text.as_bytes();
    let len = bytes
        .iter()
        .take(capacity)
        .position(|&b| b == 0)
        .unwrap_or(bytes.len().min(capacity));
    out[..len].copy_from_slice(&bytes[..len]);
    out[len] = 0;
    S_OK
}

/// The default generic plugin.
#[derive(Debug)]
pub struct PluginWrapper {
    core: PluginCore,
}

impl PluginWrapper {
    pub fn new(identity: PluginIdentity) -> Self {
        Self {
            core: PluginCore::new(identity),
        }
    }
}

impl Default for PluginWrapper {
    fn default() -> Self {
        Self {
            core: PluginCore::for_kind(PluginKind::Generic),
        }
    }
}

impl Plugin for PluginWrapper {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }
}

/// Turns a generic plugin into a handle for the `vdj_plugin_*` functions.
pub fn into_handle(plugin: impl Plugin + 'static) -> *mut VdjPlugin {
    let plugin: Box<dyn Plugin> = Box::new(plugin);
    handle::into_raw::<VdjPlugin>(plugin)
}
