//! Boundary types and constants shared by every plugin kind.

use crate::cstr_to_string;
use std::ffi::{c_char, c_void, CStr, CString};

pub type HRESULT = i32;

pub const S_OK: HRESULT = 0x0000_0000;
pub const S_FALSE: HRESULT = 0x0000_0001;
pub const E_NOTIMPL: HRESULT = 0x8000_4001_u32 as HRESULT;
pub const E_FAIL: HRESULT = 0x8000_4005_u32 as HRESULT;

/// Interleaved channel count of every sample buffer crossing the boundary.
pub const CHANNELS: usize = 2;

pub const VDJPARAM_BUTTON: i32 = 0;
pub const VDJPARAM_SLIDER: i32 = 1;
pub const VDJPARAM_SWITCH: i32 = 2;
pub const VDJPARAM_STRING: i32 = 3;
pub const VDJPARAM_CUSTOM: i32 = 4;
pub const VDJPARAM_RADIO: i32 = 5;
pub const VDJPARAM_COMMAND: i32 = 6;
pub const VDJPARAM_COLORFX: i32 = 7;
pub const VDJPARAM_BEATS: i32 = 8;
pub const VDJPARAM_BEATS_RELATIVE: i32 = 9;
pub const VDJPARAM_POSITION: i32 = 10;
pub const VDJPARAM_RELEASEFX: i32 = 11;
pub const VDJPARAM_TRANSITIONFX: i32 = 12;

/// Parameter type tag passed to `declare_parameter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Button,
    Slider,
    Switch,
    String,
    Custom,
    Radio,
    Command,
    ColorFx,
    Beats,
    BeatsRelative,
    Position,
    ReleaseFx,
    TransitionFx,
}

impl ParamType {
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Button => VDJPARAM_BUTTON,
            Self::Slider => VDJPARAM_SLIDER,
            Self::Switch => VDJPARAM_SWITCH,
            Self::String => VDJPARAM_STRING,
            Self::Custom => VDJPARAM_CUSTOM,
            Self::Radio => VDJPARAM_RADIO,
            Self::Command => VDJPARAM_COMMAND,
            Self::ColorFx => VDJPARAM_COLORFX,
            Self::Beats => VDJPARAM_BEATS,
            Self::BeatsRelative => VDJPARAM_BEATS_RELATIVE,
            Self::Position => VDJPARAM_POSITION,
            Self::ReleaseFx => VDJPARAM_RELEASEFX,
            Self::TransitionFx => VDJPARAM_TRANSITIONFX,
        }
    }

    pub fn from_raw(raw: i32) -> Option<Self> {
        Some(match raw {
            VDJPARAM_BUTTON => Self::Button,
            VDJPARAM_SLIDER => Self::Slider,
            VDJPARAM_SWITCH => Self::Switch,
            VDJPARAM_STRING => Self::String,
            VDJPARAM_CUSTOM => Self::Custom,
            VDJPARAM_RADIO => Self::Radio,
            VDJPARAM_COMMAND => Self::Command,
            VDJPARAM_COLORFX => Self::ColorFx,
            VDJPARAM_BEATS => Self::Beats,
            VDJPARAM_BEATS_RELATIVE => Self::BeatsRelative,
            VDJPARAM_POSITION => Self::Position,
            VDJPARAM_RELEASEFX => Self::ReleaseFx,
            VDJPARAM_TRANSITIONFX => Self::TransitionFx,
            _ => return None,
        })
    }
}

bitflags::bitflags! {
    /// Docking, processing-order, lifecycle and video capability bits
    /// reported in [`VdjPluginInfo::flags`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PluginFlags: u32 {
        const NO_DOCK = 0x1;
        const PROCESS_AFTER_STOP = 0x2;
        const PROCESS_FIRST = 0x4;
        const PROCESS_LAST = 0x8;
        const EXTENSION1 = 0x10;
        const SET_PREVIEW = 0x20;
        const POSITION_NOSLIP = 0x40;
        const ALWAYS_PREFADER = 0x80;
        const ALWAYS_POSTFADER = 0x100;
        const EPHEMERAL = 0x200;
        const VIDEO_MASTER_ONLY = 0x10000;
        const VIDEO_VISUALISATION = 0x20000;
        const VIDEO_OVERLAY = 0x40000;
        const VIDEO_HAS_RESIZE = 0x80000;
        const VIDEO_TRANSITION_CONTINUOUS = 0x100000;
        const VIDEO_NO_AUTO_ACTIVE = 0x200000;
        const VIDEO_OUTPUT_RESOLUTION = 0x400000;
        const VIDEO_OUTPUT_ASPECT_RATIO = 0x800000;
        const VIDEO_FOR_RECORDING = 0x1000000;
    }
}

/// Raw video engine tag as it crosses the boundary (a C enum).
pub type VdjVideoEngine = i32;

/// Graphics engine requested from `get_device` / `get_texture`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoEngine {
    Any,
    DirectX9,
    OpenGl,
    DirectX11,
    OpenGlEs2,
    Metal,
    AnyPtr,
}

impl VideoEngine {
    pub fn as_raw(self) -> VdjVideoEngine {
        match self {
            Self::Any => 0,
            Self::DirectX9 => 1,
            Self::OpenGl => 2,
            Self::DirectX11 => 3,
            Self::OpenGlEs2 => 4,
            Self::Metal => 5,
            Self::AnyPtr => 6,
        }
    }

    pub fn from_raw(raw: VdjVideoEngine) -> Option<Self> {
        Some(match raw {
            0 => Self::Any,
            1 => Self::DirectX9,
            2 => Self::OpenGl,
            3 => Self::DirectX11,
            4 => Self::OpenGlEs2,
            5 => Self::Metal,
            6 => Self::AnyPtr,
            _ => return None,
        })
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TVertexPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Vertex layout of the host's deck texture quad.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TVertex {
    pub position: TVertexPosition,
    pub color: u32,
    pub tu: f32,
    pub tv: f32,
}

/// Plugin info record filled by `<kind>_get_info`.
///
/// All string pointers are borrowed from the plugin instance and stay valid
/// until its identity changes or the handle is released.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VdjPluginInfo {
    pub plugin_name: *const c_char,
    pub author: *const c_char,
    pub description: *const c_char,
    pub version: *const c_char,
    pub bitmap: *mut c_void,
    pub flags: u32,
}

impl Default for VdjPluginInfo {
    fn default() -> Self {
        Self {
            plugin_name: std::ptr::null(),
            author: std::ptr::null(),
            description: std::ptr::null(),
            version: std::ptr::null(),
            bitmap: std::ptr::null_mut(),
            flags: 0,
        }
    }
}

/// The seven plugin interfaces the host knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    Generic,
    Dsp,
    BufferDsp,
    PositionDsp,
    VideoFx,
    VideoTransition,
    OnlineSource,
}

impl PluginKind {
    pub const ALL: [PluginKind; 7] = [
        Self::Generic,
        Self::Dsp,
        Self::BufferDsp,
        Self::PositionDsp,
        Self::VideoFx,
        Self::VideoTransition,
        Self::OnlineSource,
    ];

    /// Prefix shared by every exported function of this kind.
    pub fn symbol_prefix(self) -> &'static str {
        match self {
            Self::Generic => "vdj_plugin",
            Self::Dsp => "vdj_plugin_dsp",
            Self::BufferDsp => "vdj_plugin_buffer_dsp",
            Self::PositionDsp => "vdj_plugin_position_dsp",
            Self::VideoFx => "vdj_plugin_video_fx",
            Self::VideoTransition => "vdj_plugin_video_transition",
            Self::OnlineSource => "vdj_plugin_online_source",
        }
    }

    /// Video kinds take a second callback table in `init`.
    pub fn is_video(self) -> bool {
        matches!(self, Self::VideoFx | Self::VideoTransition)
    }

    fn default_name(self) -> &'static str {
        match self {
            Self::Generic => "RustPlugin",
            Self::Dsp => "RustDspPlugin",
            Self::BufferDsp => "RustBufferDspPlugin",
            Self::PositionDsp => "RustPositionDspPlugin",
            Self::VideoFx => "RustVideoFxPlugin",
            Self::VideoTransition => "RustVideoTransitionPlugin",
            Self::OnlineSource => "RustOnlineSourcePlugin",
        }
    }

    fn default_description(self) -> &'static str {
        match self {
            Self::Generic => "A plugin written in Rust",
            Self::Dsp => "A DSP plugin written in Rust",
            Self::BufferDsp => "A buffer DSP plugin written in Rust",
            Self::PositionDsp => "A position DSP plugin written in Rust",
            Self::VideoFx => "A video FX plugin written in Rust",
            Self::VideoTransition => "A video transition plugin written in Rust",
            Self::OnlineSource => "An online source plugin written in Rust",
        }
    }
}

impl std::fmt::Display for PluginKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol_prefix())
    }
}

/// Opaque platform bitmap resource reported in the info record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap(pub *mut c_void);

// Safety: the bitmap is a foreign resource token the shim never dereferences.
unsafe impl Send for Bitmap {}

impl Default for Bitmap {
    fn default() -> Self {
        Self(std::ptr::null_mut())
    }
}

/// Identity a plugin instance reports through `get_info`.
///
/// The strings are stored NUL-terminated so the info record can lend
/// pointers into them.
#[derive(Debug, Clone)]
pub struct PluginIdentity {
    name: CString,
    author: CString,
    description: CString,
    version: CString,
    bitmap: Bitmap,
    flags: PluginFlags,
}

impl PluginIdentity {
    /// Identity named `name`, with the generic plugin's remaining defaults.
    ///
    /// A kind-specific plugin that only renames itself should start from
    /// [`for_kind`](Self::for_kind) instead, so the description matches:
    /// `PluginIdentity::for_kind(PluginKind::Dsp).name("Gain")`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::for_kind(PluginKind::Generic).name(name)
    }

    /// Placeholder identity of the default wrapper for `kind`.
    pub fn for_kind(kind: PluginKind) -> Self {
        Self {
            name: to_cstring(kind.default_name()),
            author: to_cstring("Rust Developer"),
            description: to_cstring(kind.default_description()),
            version: to_cstring("1.0"),
            bitmap: Bitmap::default(),
            flags: PluginFlags::empty(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = to_cstring(name);
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = to_cstring(author);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = to_cstring(description);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = to_cstring(version);
        self
    }

    pub fn bitmap(mut self, bitmap: Bitmap) -> Self {
        self.bitmap = bitmap;
        self
    }

    pub fn flags(mut self, flags: PluginFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn plugin_name(&self) -> &CStr {
        &self.name
    }

    pub fn plugin_author(&self) -> &CStr {
        &self.author
    }

    pub fn plugin_description(&self) -> &CStr {
        &self.description
    }

    pub fn plugin_version(&self) -> &CStr {
        &self.version
    }

    pub fn plugin_flags(&self) -> PluginFlags {
        self.flags
    }

    /// Lends this identity to a host-side info record.
    pub fn fill(&self, info: &mut VdjPluginInfo) {
        info.plugin_name = self.name.as_ptr();
        info.author = self.author.as_ptr();
        info.description = self.description.as_ptr();
        info.version = self.version.as_ptr();
        info.bitmap = self.bitmap.0;
        info.flags = self.flags.bits();
    }
}

impl Default for PluginIdentity {
    fn default() -> Self {
        Self::for_kind(PluginKind::Generic)
    }
}

/// Strings are cut at the first interior NUL rather than rejected.
fn to_cstring(value: impl Into<String>) -> CString {
    let mut bytes = value.into().into_bytes();
    if let Some(nul) = bytes.iter().position(|&b| b == 0) {
        bytes.truncate(nul);
    }
    CString::new(bytes).unwrap_or_default()
}

/// Owned copy of an info record, as read back by a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: String,
    pub author: String,
    pub description: String,
    pub version: String,
    pub flags: PluginFlags,
}

impl PluginInfo {
    /// # Safety
    /// Every string pointer in `info` must be null or point to a valid,
    /// nul-terminated C string.
    pub unsafe fn from_raw(info: &VdjPluginInfo) -> Self {
        Self {
            name: cstr_to_string(info.plugin_name),
            author: cstr_to_string(info.author),
            description: cstr_to_string(info.description),
            version: cstr_to_string(info.version),
            flags: PluginFlags::from_bits_retain(info.flags),
        }
    }
}

/// Song and engine state the host keeps current on audio-aware plugins.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HostTransport {
    pub sample_rate: i32,
    pub song_bpm: i32,
    /// Song position in samples.
    pub song_pos: i32,
    pub song_pos_beats: f64,
}

impl HostTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample_rate(mut self, sample_rate: i32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_bpm(mut self, bpm: i32) -> Self {
        self.song_bpm = bpm;
        self
    }

    pub fn with_position(mut self, samples: i32, beats: f64) -> Self {
        self.song_pos = samples;
        self.song_pos_beats = beats;
        self
    }
}

/// Output surface size of a video plugin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoSurface {
    pub width: i32,
    pub height: i32,
}

impl VideoSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}
