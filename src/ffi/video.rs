use super::{create, init_video, samples, with_plugin};
use crate::handle::{VdjPluginVideoFx, VdjPluginVideoTransition};
use crate::host::{VdjCallbacks, VdjVideoCallbacks};
use crate::plugin::video::{self, VideoFxPlugin, VideoTransitionPlugin};
use crate::plugin::{Plugin, VideoFxWrapper, VideoPlugin, VideoTransitionWrapper};
use crate::types::{E_FAIL, HRESULT};

// Video FX

#[no_mangle]
pub extern "C" fn vdj_plugin_video_fx_create() -> *mut VdjPluginVideoFx {
    create("vdj_plugin_video_fx_create", || {
        video::into_fx_handle(VideoFxWrapper::default())
    })
}

/// Both tables are required.
#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_video_fx_init(
    plugin: *mut VdjPluginVideoFx,
    callbacks: *const VdjCallbacks,
    video_callbacks: *const VdjVideoCallbacks,
) -> HRESULT {
    init_video(
        plugin,
        callbacks,
        video_callbacks,
        "vdj_plugin_video_fx_init",
    )
}

common_exports!(VdjPluginVideoFx {
    release: vdj_plugin_video_fx_release,
    on_load: vdj_plugin_video_fx_on_load,
    get_info: vdj_plugin_video_fx_get_info,
    on_parameter: vdj_plugin_video_fx_on_parameter,
    on_get_parameter_string: vdj_plugin_video_fx_on_get_parameter_string,
});

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_video_fx_on_start(plugin: *mut VdjPluginVideoFx) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_video_fx_on_start", E_FAIL, |p| {
        p.on_start()
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_video_fx_on_stop(plugin: *mut VdjPluginVideoFx) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_video_fx_on_stop", E_FAIL, |p| {
        p.on_stop()
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_video_fx_on_draw(plugin: *mut VdjPluginVideoFx) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_video_fx_on_draw", E_FAIL, |p| {
        VideoFxPlugin::on_draw(p)
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_video_fx_on_device_init(
    plugin: *mut VdjPluginVideoFx,
) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_video_fx_on_device_init", E_FAIL, |p| {
        VideoFxPlugin::on_device_init(p)
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_video_fx_on_device_close(
    plugin: *mut VdjPluginVideoFx,
) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_video_fx_on_device_close", E_FAIL, |p| {
        VideoFxPlugin::on_device_close(p)
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_video_fx_on_audio_samples(
    plugin: *mut VdjPluginVideoFx,
    buffer: *mut f32,
    nb: i32,
) -> HRESULT {
    let Some(buffer) = samples(buffer, nb) else {
        return E_FAIL;
    };
    with_plugin(plugin, "vdj_plugin_video_fx_on_audio_samples", E_FAIL, |p| {
        p.on_audio_samples(buffer)
    })
}

getters!(VdjPluginVideoFx {
    vdj_plugin_video_fx_get_width -> i32 = |p| p.video().surface().width;
    vdj_plugin_video_fx_get_height -> i32 = |p| p.video().surface().height;
    vdj_plugin_video_fx_get_sample_rate -> i32 = |p| p.core().transport().sample_rate;
    vdj_plugin_video_fx_get_song_bpm -> i32 = |p| p.core().transport().song_bpm;
    vdj_plugin_video_fx_get_song_pos_beats -> f64 = |p| p.core().transport().song_pos_beats;
});

// Video transition

#[no_mangle]
pub extern "C" fn vdj_plugin_video_transition_create() -> *mut VdjPluginVideoTransition {
    create("vdj_plugin_video_transition_create", || {
        video::into_transition_handle(VideoTransitionWrapper::default())
    })
}

/// Both tables are required.
#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_video_transition_init(
    plugin: *mut VdjPluginVideoTransition,
    callbacks: *const VdjCallbacks,
    video_callbacks: *const VdjVideoCallbacks,
) -> HRESULT {
    init_video(
        plugin,
        callbacks,
        video_callbacks,
        "vdj_plugin_video_transition_init",
    )
}

common_exports!(VdjPluginVideoTransition {
    release: vdj_plugin_video_transition_release,
    on_load: vdj_plugin_video_transition_on_load,
    get_info: vdj_plugin_video_transition_get_info,
    on_parameter: vdj_plugin_video_transition_on_parameter,
    on_get_parameter_string: vdj_plugin_video_transition_on_get_parameter_string,
});

/// `crossfader` runs from 0.0 to 1.0. Needs no bound callbacks.
#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_video_transition_on_draw(
    plugin: *mut VdjPluginVideoTransition,
    crossfader: f32,
) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_video_transition_on_draw", E_FAIL, |p| {
        VideoTransitionPlugin::on_draw(p, crossfader)
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_video_transition_on_device_init(
    plugin: *mut VdjPluginVideoTransition,
) -> HRESULT {
    with_plugin(
        plugin,
        "vdj_plugin_video_transition_on_device_init",
        E_FAIL,
        |p| VideoTransitionPlugin::on_device_init(p),
    )
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_video_transition_on_device_close(
    plugin: *mut VdjPluginVideoTransition,
) -> HRESULT {
    with_plugin(
        plugin,
        "vdj_plugin_video_transition_on_device_close",
        E_FAIL,
        |p| VideoTransitionPlugin::on_device_close(p),
    )
}

getters!(VdjPluginVideoTransition {
    vdj_plugin_video_transition_get_width -> i32 = |p| p.video().surface().width;
    vdj_plugin_video_transition_get_height -> i32 = |p| p.video().surface().height;
    vdj_plugin_video_transition_get_sample_rate -> i32 = |p| p.core().transport().sample_rate;
    vdj_plugin_video_transition_get_song_bpm -> i32 = |p| p.core().transport().song_bpm;
    vdj_plugin_video_transition_get_song_pos_beats -> f64 = |p| p.core().transport().song_pos_beats;
});
