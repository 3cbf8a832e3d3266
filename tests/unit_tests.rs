use std::cell::RefCell;
use std::ffi::{c_char, c_void, CStr};
use std::ptr;

use vdj_plugin_shim::plugin::{dsp, video, write_parameter_string};
use vdj_plugin_shim::*;

thread_local! {
    static CALLS: RefCell<Vec<Call>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    SendCommand(usize, String),
    GetSongBuffer(usize, i32, i32),
    DrawDeck(usize),
    GetInfo(usize, String),
    GetStringInfo(usize, String, i32),
    DeclareParameter(usize, usize, i32, i32, String, String, f32),
    GetDevice(usize, VdjVideoEngine),
    GetTexture(usize, VdjVideoEngine),
}

fn take_calls() -> Vec<Call> {
    CALLS.with(|c| std::mem::take(&mut *c.borrow_mut()))
}

static SONG: [i16; 4] = [100, -100, 200, -200];

unsafe extern "C" fn record_send_command(
    plugin: *mut VdjPlugin,
    command: *const c_char,
) -> HRESULT {
    let command = CStr::from_ptr(command).to_string_lossy().into_owned();
    CALLS.with(|c| c.borrow_mut().push(Call::SendCommand(plugin as usize, command)));
    S_OK
}

unsafe extern "C" fn record_song_buffer(
    plugin: *mut VdjPlugin,
    pos: i32,
    nb: i32,
    buffer: *mut *mut i16,
) -> HRESULT {
    CALLS.with(|c| c.borrow_mut().push(Call::GetSongBuffer(plugin as usize, pos, nb)));
    if pos != 0 {
        return E_FAIL;
    }
    *buffer = SONG.as_ptr() as *mut i16;
    S_OK
}

unsafe extern "C" fn record_draw_deck(plugin: *mut VdjPlugin) -> HRESULT {
    CALLS.with(|c| c.borrow_mut().push(Call::DrawDeck(plugin as usize)));
    S_OK
}

unsafe extern "C" fn record_get_info(
    plugin: *mut VdjPlugin,
    command: *const c_char,
    result: *mut f64,
) -> HRESULT {
    let command = CStr::from_ptr(command).to_string_lossy().into_owned();
    CALLS.with(|c| c.borrow_mut().push(Call::GetInfo(plugin as usize, command)));
    *result = 126.5;
    S_OK
}

unsafe extern "C" fn record_get_string_info(
    plugin: *mut VdjPlugin,
    command: *const c_char,
    result: *mut c_char,
    size: i32,
) -> HRESULT {
    let command = CStr::from_ptr(command).to_string_lossy().into_owned();
    CALLS.with(|c| c.borrow_mut().push(Call::GetStringInfo(plugin as usize, command, size)));
    let title = c"Around the World";
    ptr::copy_nonoverlapping(title.as_ptr(), result, title.to_bytes_with_nul().len());
    S_OK
}

unsafe extern "C" fn record_declare_parameter(
    plugin: *mut VdjPlugin,
    parameter: *mut c_void,
    type_: i32,
    id: i32,
    name: *const c_char,
    short_name: *const c_char,
    default_value: f32,
) -> HRESULT {
    let name = CStr::from_ptr(name).to_string_lossy().into_owned();
    let short_name = CStr::from_ptr(short_name).to_string_lossy().into_owned();
    CALLS.with(|c| {
        c.borrow_mut().push(Call::DeclareParameter(
            plugin as usize,
            parameter as usize,
            type_,
            id,
            name,
            short_name,
            default_value,
        ))
    });
    S_OK
}

unsafe extern "C" fn record_get_device(
    plugin: *mut VdjPlugin,
    engine: VdjVideoEngine,
    device: *mut *mut c_void,
) -> HRESULT {
    CALLS.with(|c| c.borrow_mut().push(Call::GetDevice(plugin as usize, engine)));
    *device = 0xde as *mut c_void;
    S_OK
}

unsafe extern "C" fn record_get_texture(
    plugin: *mut VdjPlugin,
    engine: VdjVideoEngine,
    texture: *mut *mut c_void,
    vertices: *mut *mut TVertex,
) -> HRESULT {
    CALLS.with(|c| c.borrow_mut().push(Call::GetTexture(plugin as usize, engine)));
    *texture = 0x7e as *mut c_void;
    *vertices = 0x7f as *mut TVertex;
    S_OK
}

fn full_recording_callbacks() -> VdjCallbacks {
    VdjCallbacks {
        get_info: Some(record_get_info),
        get_string_info: Some(record_get_string_info),
        declare_parameter: Some(record_declare_parameter),
        ..recording_callbacks()
    }
}

fn full_recording_video_callbacks() -> VdjVideoCallbacks {
    VdjVideoCallbacks {
        get_device: Some(record_get_device),
        get_texture: Some(record_get_texture),
        ..recording_video_callbacks()
    }
}

fn recording_callbacks() -> VdjCallbacks {
    VdjCallbacks {
        send_command: Some(record_send_command),
        get_song_buffer: Some(record_song_buffer),
        ..Default::default()
    }
}

fn recording_video_callbacks() -> VdjVideoCallbacks {
    VdjVideoCallbacks {
        draw_deck: Some(record_draw_deck),
        ..Default::default()
    }
}

fn info_of(code: HRESULT, info: &VdjPluginInfo) -> PluginInfo {
    assert_eq!(code, S_OK);
    unsafe { PluginInfo::from_raw(info) }
}

// ── Lifecycle ──

#[test]
fn test_create_release_every_kind() {
    unsafe {
        let p = vdj_plugin_create();
        assert!(!p.is_null());
        vdj_plugin_release(p);

        let p = vdj_plugin_dsp_create();
        assert!(!p.is_null());
        vdj_plugin_dsp_release(p);

        let p = vdj_plugin_buffer_dsp_create();
        assert!(!p.is_null());
        vdj_plugin_buffer_dsp_release(p);

        let p = vdj_plugin_position_dsp_create();
        assert!(!p.is_null());
        vdj_plugin_position_dsp_release(p);

        let p = vdj_plugin_video_fx_create();
        assert!(!p.is_null());
        vdj_plugin_video_fx_release(p);

        let p = vdj_plugin_video_transition_create();
        assert!(!p.is_null());
        vdj_plugin_video_transition_release(p);

        let p = vdj_plugin_online_source_create();
        assert!(!p.is_null());
        vdj_plugin_online_source_release(p);
    }
}

#[test]
fn test_full_dsp_lifecycle() {
    let callbacks = recording_callbacks();
    let mut buffer = [0.5f32, -0.5, 0.25, -0.25];
    unsafe {
        let p = vdj_plugin_dsp_create();
        assert_eq!(vdj_plugin_dsp_init(p, &callbacks), S_OK);
        assert_eq!(vdj_plugin_dsp_on_load(p), S_OK);
        assert_eq!(vdj_plugin_dsp_on_start(p), S_OK);
        assert_eq!(vdj_plugin_dsp_on_process_samples(p, buffer.as_mut_ptr(), 2), S_OK);
        assert_eq!(vdj_plugin_dsp_on_parameter(p, 1), S_OK);
        assert_eq!(vdj_plugin_dsp_on_stop(p), S_OK);
        vdj_plugin_dsp_release(p);
    }
    assert_eq!(buffer, [0.5, -0.5, 0.25, -0.25]);
    assert!(take_calls().is_empty());
}

// ── Null handles ──

#[test]
fn test_null_handles_fail_without_crashing() {
    let callbacks = recording_callbacks();
    let video_callbacks = recording_video_callbacks();
    let mut info = VdjPluginInfo::default();
    let mut out = [0 as c_char; 16];
    let mut song_buffer: *mut i16 = ptr::null_mut();
    let (mut a, mut b, mut c, mut d) = (0.0f64, 0.0f64, 0.0f32, 0.0f32);
    let mut samples = [0.0f32; 4];

    unsafe {
        vdj_plugin_release(ptr::null_mut());
        assert_eq!(vdj_plugin_init(ptr::null_mut(), &callbacks), E_FAIL);
        assert_eq!(vdj_plugin_on_load(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_get_info(ptr::null_mut(), &mut info), E_FAIL);
        assert_eq!(vdj_plugin_on_parameter(ptr::null_mut(), 0), E_FAIL);
        assert_eq!(
            vdj_plugin_on_get_parameter_string(ptr::null_mut(), 0, out.as_mut_ptr(), 16),
            E_FAIL
        );

        vdj_plugin_dsp_release(ptr::null_mut());
        assert_eq!(vdj_plugin_dsp_on_start(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_dsp_on_stop(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_dsp_on_process_samples(ptr::null_mut(), ptr::null_mut(), 0), E_FAIL);
        assert_eq!(vdj_plugin_dsp_get_sample_rate(ptr::null_mut()), 0);
        assert_eq!(vdj_plugin_dsp_get_song_bpm(ptr::null_mut()), 0);
        assert_eq!(vdj_plugin_dsp_get_song_pos_beats(ptr::null_mut()), 0.0);

        assert_eq!(vdj_plugin_buffer_dsp_init(ptr::null_mut(), &callbacks), E_FAIL);
        assert_eq!(vdj_plugin_buffer_dsp_on_start(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_buffer_dsp_on_stop(ptr::null_mut()), E_FAIL);
        assert!(vdj_plugin_buffer_dsp_on_get_song_buffer(ptr::null_mut(), 0, 4).is_null());
        assert_eq!(
            vdj_plugin_buffer_dsp_get_song_buffer(ptr::null_mut(), 0, 4, &mut song_buffer),
            E_FAIL
        );
        assert_eq!(vdj_plugin_buffer_dsp_get_song_pos(ptr::null_mut()), 0);

        assert_eq!(
            vdj_plugin_position_dsp_on_transform_position(
                ptr::null_mut(),
                &mut a,
                &mut b,
                &mut c,
                &mut d
            ),
            E_FAIL
        );
        assert_eq!(vdj_plugin_position_dsp_init(ptr::null_mut(), &callbacks), E_FAIL);
        assert_eq!(vdj_plugin_position_dsp_on_start(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_position_dsp_on_stop(ptr::null_mut()), E_FAIL);
        assert_eq!(
            vdj_plugin_position_dsp_on_process_samples(ptr::null_mut(), samples.as_mut_ptr(), 2),
            E_FAIL
        );
        assert_eq!(vdj_plugin_position_dsp_get_song_pos(ptr::null_mut()), 0);

        assert_eq!(
            vdj_plugin_video_fx_init(ptr::null_mut(), &callbacks, &video_callbacks),
            E_FAIL
        );
        assert_eq!(vdj_plugin_video_fx_on_start(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_video_fx_on_stop(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_video_fx_on_draw(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_video_fx_on_device_init(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_video_fx_on_device_close(ptr::null_mut()), E_FAIL);
        assert_eq!(
            vdj_plugin_video_fx_on_audio_samples(ptr::null_mut(), samples.as_mut_ptr(), 2),
            E_FAIL
        );
        assert_eq!(vdj_plugin_video_fx_get_info(ptr::null_mut(), &mut info), E_FAIL);
        assert_eq!(vdj_plugin_video_fx_get_width(ptr::null_mut()), 0);
        assert_eq!(vdj_plugin_video_fx_get_height(ptr::null_mut()), 0);

        vdj_plugin_video_transition_release(ptr::null_mut());
        assert_eq!(
            vdj_plugin_video_transition_init(ptr::null_mut(), &callbacks, &video_callbacks),
            E_FAIL
        );
        assert_eq!(vdj_plugin_video_transition_on_draw(ptr::null_mut(), 0.5), E_FAIL);
        assert_eq!(vdj_plugin_video_transition_on_device_init(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_video_transition_on_device_close(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_video_transition_get_width(ptr::null_mut()), 0);
        assert_eq!(vdj_plugin_video_transition_get_height(ptr::null_mut()), 0);
        assert_eq!(vdj_plugin_video_transition_get_song_pos_beats(ptr::null_mut()), 0.0);

        vdj_plugin_online_source_release(ptr::null_mut());
        assert_eq!(vdj_plugin_online_source_init(ptr::null_mut(), &callbacks), E_FAIL);
        assert_eq!(vdj_plugin_online_source_on_load(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_online_source_is_logged(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_online_source_on_login(ptr::null_mut()), E_FAIL);
        assert_eq!(vdj_plugin_online_source_on_logout(ptr::null_mut()), E_FAIL);
        assert_eq!(
            vdj_plugin_online_source_on_oauth(
                ptr::null_mut(),
                c"token".as_ptr(),
                3600,
                ptr::null(),
                ptr::null(),
                ptr::null()
            ),
            E_FAIL
        );
        assert_eq!(
            vdj_plugin_online_source_on_search(ptr::null_mut(), c"query".as_ptr(), ptr::null_mut()),
            E_FAIL
        );
        assert_eq!(vdj_plugin_online_source_on_search_cancel(ptr::null_mut()), E_FAIL);
        assert_eq!(
            vdj_plugin_online_source_get_stream_url(
                ptr::null_mut(),
                c"id".as_ptr(),
                ptr::null_mut(),
                ptr::null_mut()
            ),
            E_FAIL
        );
        assert_eq!(
            vdj_plugin_online_source_get_folder_list(ptr::null_mut(), ptr::null_mut()),
            E_FAIL
        );
        assert_eq!(
            vdj_plugin_online_source_get_folder(ptr::null_mut(), c"root".as_ptr(), ptr::null_mut()),
            E_FAIL
        );
        assert_eq!(
            vdj_plugin_online_source_get_context_menu(
                ptr::null_mut(),
                c"id".as_ptr(),
                ptr::null_mut()
            ),
            E_FAIL
        );
        assert_eq!(
            vdj_plugin_online_source_on_context_menu(ptr::null_mut(), c"id".as_ptr(), 1),
            E_FAIL
        );
        assert_eq!(
            vdj_plugin_online_source_get_folder_context_menu(
                ptr::null_mut(),
                c"root".as_ptr(),
                ptr::null_mut()
            ),
            E_FAIL
        );
        assert_eq!(
            vdj_plugin_online_source_on_folder_context_menu(ptr::null_mut(), c"root".as_ptr(), 0),
            E_FAIL
        );
    }
    assert!(take_calls().is_empty());
}

#[test]
fn test_null_callback_tables_rejected() {
    let callbacks = recording_callbacks();
    unsafe {
        let p = vdj_plugin_dsp_create();
        assert_eq!(vdj_plugin_dsp_init(p, ptr::null()), E_FAIL);
        vdj_plugin_dsp_release(p);

        // Video kinds need both tables
        let fx = vdj_plugin_video_fx_create();
        assert_eq!(vdj_plugin_video_fx_init(fx, &callbacks, ptr::null()), E_FAIL);
        vdj_plugin_video_fx_release(fx);

        let transition = vdj_plugin_video_transition_create();
        assert_eq!(
            vdj_plugin_video_transition_init(transition, ptr::null(), &recording_video_callbacks()),
            E_FAIL
        );
        vdj_plugin_video_transition_release(transition);
    }
}

// ── Info and parameters ──

#[test]
fn test_get_info_before_init() {
    let mut info = VdjPluginInfo::default();
    unsafe {
        let p = vdj_plugin_position_dsp_create();
        let owned = info_of(vdj_plugin_position_dsp_get_info(p, &mut info), &info);
        assert_eq!(owned.name, "RustPositionDspPlugin");
        assert_eq!(owned.author, "Rust Developer");
        assert_eq!(owned.version, "1.0");
        assert!(!owned.description.is_empty());
        assert!(owned.flags.is_empty());
        assert!(info.bitmap.is_null());

        assert_eq!(vdj_plugin_position_dsp_get_info(p, ptr::null_mut()), E_FAIL);
        vdj_plugin_position_dsp_release(p);
    }
}

#[test]
fn test_default_names_per_kind() {
    let mut info = VdjPluginInfo::default();
    unsafe {
        let p = vdj_plugin_create();
        assert_eq!(info_of(vdj_plugin_get_info(p, &mut info), &info).name, "RustPlugin");
        vdj_plugin_release(p);

        let p = vdj_plugin_video_fx_create();
        assert_eq!(
            info_of(vdj_plugin_video_fx_get_info(p, &mut info), &info).name,
            "RustVideoFxPlugin"
        );
        vdj_plugin_video_fx_release(p);

        let p = vdj_plugin_online_source_create();
        assert_eq!(
            info_of(vdj_plugin_online_source_get_info(p, &mut info), &info).name,
            "RustOnlineSourcePlugin"
        );
        vdj_plugin_online_source_release(p);
    }
}

#[test]
fn test_dsp_parameter_string_not_implemented() {
    let mut out = [0 as c_char; 32];
    unsafe {
        let p = vdj_plugin_dsp_create();
        assert_eq!(
            vdj_plugin_dsp_on_get_parameter_string(p, 0, out.as_mut_ptr(), out.len() as i32),
            E_NOTIMPL
        );
        // Null out buffer still reaches the plugin
        assert_eq!(
            vdj_plugin_dsp_on_get_parameter_string(p, 0, ptr::null_mut(), 0),
            E_NOTIMPL
        );
        vdj_plugin_dsp_release(p);
    }
}

// ── Callback routing ──

#[test]
fn test_buffer_dsp_song_buffer_scenario() {
    let callbacks = recording_callbacks();
    take_calls();
    unsafe {
        let p = vdj_plugin_buffer_dsp_create();
        assert!(vdj_plugin_buffer_dsp_on_get_song_buffer(p, 0, 4).is_null());

        assert_eq!(vdj_plugin_buffer_dsp_init(p, &callbacks), S_OK);
        let buffer = vdj_plugin_buffer_dsp_on_get_song_buffer(p, 0, 4);
        assert_eq!(buffer, SONG.as_ptr() as *mut i16);
        assert_eq!(*buffer.add(2), 200);

        assert_eq!(take_calls(), vec![Call::GetSongBuffer(p as usize, 0, 4)]);

        // Host failure becomes a null buffer
        assert!(vdj_plugin_buffer_dsp_on_get_song_buffer(p, 512, 4).is_null());
        assert_eq!(take_calls(), vec![Call::GetSongBuffer(p as usize, 512, 4)]);

        vdj_plugin_buffer_dsp_release(p);
    }
}

#[test]
fn test_buffer_dsp_get_song_buffer_requires_init() {
    let callbacks = recording_callbacks();
    let mut buffer: *mut i16 = ptr::null_mut();
    take_calls();
    unsafe {
        let p = vdj_plugin_buffer_dsp_create();
        assert_eq!(vdj_plugin_buffer_dsp_get_song_buffer(p, 0, 4, &mut buffer), E_FAIL);
        assert!(take_calls().is_empty());

        vdj_plugin_buffer_dsp_init(p, &callbacks);
        assert_eq!(vdj_plugin_buffer_dsp_get_song_buffer(p, 0, 4, &mut buffer), S_OK);
        assert_eq!(buffer, SONG.as_ptr() as *mut i16);
        assert_eq!(vdj_plugin_buffer_dsp_get_song_buffer(p, 0, 4, ptr::null_mut()), E_FAIL);
        assert_eq!(take_calls(), vec![Call::GetSongBuffer(p as usize, 0, 4)]);

        vdj_plugin_buffer_dsp_release(p);
    }
}

#[test]
fn test_reinit_replaces_callbacks() {
    let silent = VdjCallbacks::default();
    let recording = recording_callbacks();
    take_calls();
    unsafe {
        let p = vdj_plugin_buffer_dsp_create();
        assert_eq!(vdj_plugin_buffer_dsp_init(p, &silent), S_OK);
        assert!(vdj_plugin_buffer_dsp_on_get_song_buffer(p, 0, 4).is_null());

        assert_eq!(vdj_plugin_buffer_dsp_init(p, &recording), S_OK);
        assert!(!vdj_plugin_buffer_dsp_on_get_song_buffer(p, 0, 4).is_null());
        assert_eq!(take_calls().len(), 1);

        vdj_plugin_buffer_dsp_release(p);
    }
}

// ── Position DSP ──

#[test]
fn test_transform_position_defaults_and_null_checks() {
    let (mut song, mut video, mut volume, mut src) = (44100.0f64, 1.25f64, 0.8f32, 1.0f32);
    unsafe {
        let p = vdj_plugin_position_dsp_create();
        assert_eq!(
            vdj_plugin_position_dsp_on_transform_position(
                p,
                &mut song,
                &mut video,
                &mut volume,
                &mut src
            ),
            S_OK
        );
        assert_eq!((song, video, volume, src), (44100.0, 1.25, 0.8, 1.0));

        assert_eq!(
            vdj_plugin_position_dsp_on_transform_position(
                p,
                &mut song,
                ptr::null_mut(),
                &mut volume,
                &mut src
            ),
            E_FAIL
        );
        vdj_plugin_position_dsp_release(p);
    }
}

// ── Video ──

#[test]
fn test_video_transition_draw_without_init() {
    unsafe {
        let p = vdj_plugin_video_transition_create();
        assert_eq!(vdj_plugin_video_transition_on_draw(p, 0.5), S_OK);
        assert_eq!(vdj_plugin_video_transition_on_device_init(p), S_OK);
        assert_eq!(vdj_plugin_video_transition_on_device_close(p), S_OK);
        assert_eq!(vdj_plugin_video_transition_get_width(p), 0);
        vdj_plugin_video_transition_release(p);
    }
}

#[test]
fn test_video_fx_defaults() {
    let callbacks = recording_callbacks();
    let video_callbacks = recording_video_callbacks();
    let mut samples = [0.0f32; 8];
    unsafe {
        let p = vdj_plugin_video_fx_create();
        assert_eq!(vdj_plugin_video_fx_init(p, &callbacks, &video_callbacks), S_OK);
        assert_eq!(vdj_plugin_video_fx_on_device_init(p), S_OK);
        assert_eq!(vdj_plugin_video_fx_on_start(p), S_OK);
        assert_eq!(vdj_plugin_video_fx_on_draw(p), S_OK);
        assert_eq!(vdj_plugin_video_fx_on_audio_samples(p, samples.as_mut_ptr(), 4), E_NOTIMPL);
        assert_eq!(vdj_plugin_video_fx_on_audio_samples(p, ptr::null_mut(), 4), E_FAIL);
        assert_eq!(vdj_plugin_video_fx_on_stop(p), S_OK);
        assert_eq!(vdj_plugin_video_fx_on_device_close(p), S_OK);
        vdj_plugin_video_fx_release(p);
    }
}

struct Crossfade {
    core: PluginCore,
    video: VideoCore,
    last: f32,
}

impl Plugin for Crossfade {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }
}

impl VideoPlugin for Crossfade {
    fn video(&self) -> &VideoCore {
        &self.video
    }

    fn video_mut(&mut self) -> &mut VideoCore {
        &mut self.video
    }
}

impl VideoTransitionPlugin for Crossfade {
    fn on_draw(&mut self, crossfader: f32) -> HRESULT {
        self.last = crossfader;
        match self.video.host() {
            Some(host) => host.draw_deck().map_or(E_FAIL, |_| S_OK),
            None => E_FAIL,
        }
    }
}

#[test]
fn test_video_transition_binds_video_callbacks() {
    let callbacks = recording_callbacks();
    let video_callbacks = recording_video_callbacks();
    let mut video_core = VideoCore::new();
    *video_core.surface_mut() = VideoSurface::new(1280, 720);
    take_calls();
    unsafe {
        let p = video::into_transition_handle(Crossfade {
            core: PluginCore::new(PluginIdentity::new("Crossfade")),
            video: video_core,
            last: 0.0,
        });
        assert_eq!(vdj_plugin_video_transition_on_draw(p, 0.25), E_FAIL);
        assert_eq!(vdj_plugin_video_transition_get_width(p), 1280);
        assert_eq!(vdj_plugin_video_transition_get_height(p), 720);

        assert_eq!(vdj_plugin_video_transition_init(p, &callbacks, &video_callbacks), S_OK);
        assert_eq!(vdj_plugin_video_transition_on_draw(p, 0.75), S_OK);
        assert_eq!(take_calls(), vec![Call::DrawDeck(p as usize)]);

        vdj_plugin_video_transition_release(p);
    }
}

// ── Online source ──

#[test]
fn test_online_source_defaults_not_implemented() {
    unsafe {
        let p = vdj_plugin_online_source_create();
        assert_eq!(vdj_plugin_online_source_is_logged(p), E_NOTIMPL);
        assert_eq!(vdj_plugin_online_source_on_login(p), E_NOTIMPL);
        assert_eq!(vdj_plugin_online_source_on_logout(p), E_NOTIMPL);
        assert_eq!(
            vdj_plugin_online_source_on_oauth(
                p,
                c"token".as_ptr(),
                3600,
                ptr::null(),
                ptr::null(),
                ptr::null()
            ),
            E_NOTIMPL
        );
        assert_eq!(
            vdj_plugin_online_source_on_search(p, c"artist".as_ptr(), ptr::null_mut()),
            E_NOTIMPL
        );
        assert_eq!(vdj_plugin_online_source_on_search_cancel(p), E_NOTIMPL);
        assert_eq!(
            vdj_plugin_online_source_get_stream_url(
                p,
                c"id".as_ptr(),
                ptr::null_mut(),
                ptr::null_mut()
            ),
            E_NOTIMPL
        );
        assert_eq!(vdj_plugin_online_source_get_folder_list(p, ptr::null_mut()), E_NOTIMPL);
        assert_eq!(
            vdj_plugin_online_source_get_folder(p, c"root".as_ptr(), ptr::null_mut()),
            E_NOTIMPL
        );
        assert_eq!(
            vdj_plugin_online_source_get_context_menu(p, c"id".as_ptr(), ptr::null_mut()),
            E_NOTIMPL
        );
        assert_eq!(vdj_plugin_online_source_on_context_menu(p, c"id".as_ptr(), 1), E_NOTIMPL);
        assert_eq!(
            vdj_plugin_online_source_get_folder_context_menu(p, c"root".as_ptr(), ptr::null_mut()),
            E_NOTIMPL
        );
        assert_eq!(
            vdj_plugin_online_source_on_folder_context_menu(p, c"root".as_ptr(), 0),
            E_NOTIMPL
        );
        vdj_plugin_online_source_release(p);
    }
}

// ── Custom plugins ──

struct Gain {
    core: PluginCore,
    gain: f32,
}

impl Gain {
    fn new() -> Self {
        let mut core = PluginCore::new(
            PluginIdentity::new("Gain")
                .author("Tests")
                .flags(PluginFlags::PROCESS_LAST),
        );
        *core.transport_mut() = HostTransport::new()
            .with_sample_rate(44100)
            .with_bpm(128)
            .with_position(0, 16.5);
        Self { core, gain: 0.5 }
    }
}

impl Plugin for Gain {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }

    fn on_parameter(&mut self, id: i32) -> HRESULT {
        self.gain = id as f32 / 10.0;
        match self.core.host() {
            Some(host) => match host.send_command(&format!("effect_slider {id}")) {
                Ok(_) => S_OK,
                Err(e) => e.code(),
            },
            None => E_FAIL,
        }
    }

    fn on_get_parameter_string(&mut self, _id: i32, out: &mut [u8]) -> HRESULT {
        write_parameter_string(out, &format!("{:.0} %", self.gain * 100.0))
    }
}

impl DspPlugin for Gain {
    fn on_process_samples(&mut self, buffer: &mut [f32]) -> HRESULT {
        buffer.iter_mut().for_each(|s| *s *= self.gain);
        S_OK
    }
}

#[test]
fn test_custom_dsp_through_flat_abi() {
    let callbacks = recording_callbacks();
    let mut info = VdjPluginInfo::default();
    let mut buffer = [1.0f32, -1.0, 0.5, -0.5];
    let mut text = [0 as c_char; 8];
    take_calls();
    unsafe {
        let p = dsp::into_handle(Gain::new());

        let owned = info_of(vdj_plugin_dsp_get_info(p, &mut info), &info);
        assert_eq!(owned.name, "Gain");
        assert_eq!(owned.flags, PluginFlags::PROCESS_LAST);

        assert_eq!(vdj_plugin_dsp_get_sample_rate(p), 44100);
        assert_eq!(vdj_plugin_dsp_get_song_bpm(p), 128);
        assert_eq!(vdj_plugin_dsp_get_song_pos_beats(p), 16.5);

        assert_eq!(vdj_plugin_dsp_on_parameter(p, 5), E_FAIL);
        assert_eq!(vdj_plugin_dsp_init(p, &callbacks), S_OK);
        assert_eq!(vdj_plugin_dsp_on_parameter(p, 5), S_OK);
        assert_eq!(
            take_calls(),
            vec![Call::SendCommand(p as usize, "effect_slider 5".to_string())]
        );

        assert_eq!(vdj_plugin_dsp_on_process_samples(p, buffer.as_mut_ptr(), 2), S_OK);
        assert_eq!(buffer, [0.5, -0.5, 0.25, -0.25]);

        assert_eq!(
            vdj_plugin_dsp_on_get_parameter_string(p, 0, text.as_mut_ptr(), text.len() as i32),
            S_OK
        );
        assert_eq!(CStr::from_ptr(text.as_ptr()), c"50 %");

        vdj_plugin_dsp_release(p);
    }
}

struct Exploding {
    core: PluginCore,
}

impl Plugin for Exploding {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }

    fn on_load(&mut self) -> HRESULT {
        panic!("exploded in on_load");
    }
}

impl DspPlugin for Exploding {}

#[test]
fn test_panic_does_not_cross_boundary() {
    unsafe {
        let p = dsp::into_handle(Exploding {
            core: PluginCore::default(),
        });
        assert_eq!(vdj_plugin_dsp_on_load(p), E_FAIL);
        // The instance stays usable afterwards
        assert_eq!(vdj_plugin_dsp_on_start(p), S_OK);
        vdj_plugin_dsp_release(p);
    }
}

#[test]
fn test_generic_handle_from_custom_plugin() {
    let mut info = VdjPluginInfo::default();
    unsafe {
        let p = plugin::into_handle(PluginWrapper::new(PluginIdentity::new("Bare").version("2.0")));
        let owned = info_of(vdj_plugin_get_info(p, &mut info), &info);
        assert_eq!(owned.name, "Bare");
        assert_eq!(owned.version, "2.0");
        assert_eq!(vdj_plugin_on_load(p), S_OK);
        vdj_plugin_release(p);
    }
}

#[test]
fn test_video_adapter_passes_handle_first() {
    let video_callbacks = VdjVideoCallbacks {
        draw_deck: Some(record_draw_deck),
        ..Default::default()
    };
    let adapter = unsafe { VideoCallbackAdapter::new(&video_callbacks, 0x40 as *mut VdjPlugin) };
    take_calls();
    assert_eq!(adapter.draw_deck(), S_OK);
    assert_eq!(take_calls(), vec![Call::DrawDeck(0x40)]);
}

// ── Host callback forwarding ──

#[test]
fn test_host_context_forwards_every_argument() {
    let callbacks = full_recording_callbacks();
    let adapter = unsafe { CallbackAdapter::new(&callbacks, 0xab as *mut VdjPlugin) };
    let host = HostContext::new(&adapter);
    take_calls();

    host.declare_parameter(0xcd as *mut c_void, ParamType::Slider, 7, "Gain", "G", 0.25)
        .unwrap();
    assert_eq!(host.get_info_double("deck 1 get_bpm").unwrap(), 126.5);
    assert_eq!(host.get_info_string("deck 1 get_title").unwrap(), "Around the World");
    assert!(host.send_command("deck 1 play").unwrap());

    assert_eq!(
        take_calls(),
        vec![
            Call::DeclareParameter(0xab, 0xcd, 1, 7, "Gain".to_string(), "G".to_string(), 0.25),
            Call::GetInfo(0xab, "deck 1 get_bpm".to_string()),
            Call::GetStringInfo(0xab, "deck 1 get_title".to_string(), 1024),
            Call::SendCommand(0xab, "deck 1 play".to_string()),
        ]
    );
}

#[test]
fn test_video_host_context_forwards_every_argument() {
    let video_callbacks = full_recording_video_callbacks();
    let adapter = unsafe { VideoCallbackAdapter::new(&video_callbacks, 0xab as *mut VdjPlugin) };
    let host = VideoHostContext::new(&adapter);
    take_calls();

    assert_eq!(host.device(VideoEngine::OpenGl).unwrap() as usize, 0xde);
    let (texture, vertices) = host.texture(VideoEngine::Metal).unwrap();
    assert_eq!((texture as usize, vertices as usize), (0x7e, 0x7f));
    host.draw_deck().unwrap();

    assert_eq!(
        take_calls(),
        vec![Call::GetDevice(0xab, 2), Call::GetTexture(0xab, 5), Call::DrawDeck(0xab)]
    );
}

#[test]
fn test_bound_plugin_reaches_host_with_its_own_handle() {
    let callbacks = full_recording_callbacks();
    let video_callbacks = full_recording_video_callbacks();
    take_calls();
    unsafe {
        let p = vdj_plugin_video_fx_create();
        assert_eq!(vdj_plugin_video_fx_init(p, &callbacks, &video_callbacks), S_OK);

        let plugin = vdj_plugin_shim::handle::as_mut(p).unwrap();
        let host = plugin.core().host().unwrap();
        let video_host = plugin.video().host().unwrap();
        assert_eq!(host.get_info_double("get_time").unwrap(), 126.5);
        assert!(!video_host.device(VideoEngine::Any).unwrap().is_null());

        assert_eq!(
            take_calls(),
            vec![
                Call::GetInfo(p as usize, "get_time".to_string()),
                Call::GetDevice(p as usize, 0),
            ]
        );
        vdj_plugin_video_fx_release(p);
    }
}
