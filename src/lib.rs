//! Flat C ABI for VirtualDJ-style plugins.
//!
//! The host drives seven plugin interfaces (generic, DSP, buffer DSP,
//! position DSP, video FX, video transition and online source) through
//! plain `extern "C"` functions on opaque handles. Each handle owns a
//! Rust plugin object; `init` binds the host's callback tables to it so the
//! plugin can call back into the host.
//!
//! ## Example
//!
//! ```ignore
//! use vdj_plugin_shim::*;
//!
//! // What the host does through the flat ABI
//! let dsp = vdj_plugin_dsp_create();
//! unsafe {
//!     vdj_plugin_dsp_init(dsp, &callbacks);
//!     vdj_plugin_dsp_on_start(dsp);
//!     vdj_plugin_dsp_on_process_samples(dsp, buffer.as_mut_ptr(), 512);
//!     vdj_plugin_dsp_release(dsp);
//! }
//! ```
//!
//! ## Custom plugins
//!
//! Implement the trait of a kind and turn the value into a handle; the same
//! exported functions then drive it.
//!
//! ```ignore
//! use vdj_plugin_shim::plugin::{dsp, DspPlugin, Plugin, PluginCore};
//!
//! impl DspPlugin for MyEffect {
//!     fn on_process_samples(&mut self, buffer: &mut [f32]) -> HRESULT { /* ... */ }
//! }
//!
//! let handle = dsp::into_handle(MyEffect::new());
//! ```

pub mod error;
pub mod ffi;
pub mod handle;
pub mod host;
pub mod loader;
pub mod plugin;
pub mod types;

/// # Safety
/// `ptr` must be null or point to a valid, nul-terminated C string.
pub(crate) unsafe fn cstr_to_string(ptr: *const std::ffi::c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

pub use error::{check, LoadStage, Result, ShimError};
pub use ffi::*;
pub use handle::{
    PluginHandle, VdjPlugin, VdjPluginBufferDsp, VdjPluginDsp, VdjPluginOnlineSource,
    VdjPluginPositionDsp, VdjPluginVideoFx, VdjPluginVideoTransition,
};
pub use host::{
    CallbackAdapter, HostCallbacks, HostContext, VdjCallbacks, VdjVideoCallbacks,
    VideoCallbackAdapter, VideoHostCallbacks, VideoHostContext,
};
pub use loader::{LoadedPlugin, PluginLibrary};
pub use plugin::{
    BufferDspPlugin, BufferDspWrapper, DspPlugin, DspWrapper, OnlineSourcePlugin,
    OnlineSourceWrapper, Plugin, PluginCore, PluginWrapper, PositionDspPlugin,
    PositionDspWrapper, VideoCore, VideoFxPlugin, VideoFxWrapper, VideoPlugin,
    VideoTransitionPlugin, VideoTransitionWrapper,
};
pub use types::{
    Bitmap, HostTransport, ParamType, PluginFlags, PluginIdentity, PluginInfo, PluginKind,
    TVertex, TVertexPosition, VdjPluginInfo, VdjVideoEngine, VideoEngine, VideoSurface,
    CHANNELS, E_FAIL, E_NOTIMPL, HRESULT, S_FALSE, S_OK,
};
