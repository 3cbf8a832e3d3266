use super::{create, init, samples, with_plugin};
use crate::handle::{VdjPluginBufferDsp, VdjPluginDsp, VdjPluginPositionDsp};
use crate::host::{HostCallbacks, VdjCallbacks};
use crate::plugin::dsp::{self, BufferDspPlugin, DspPlugin, PositionDspPlugin};
use crate::plugin::{BufferDspWrapper, DspWrapper, Plugin, PositionDspWrapper};
use crate::types::{E_FAIL, HRESULT};
use std::ptr;

// DSP

#[no_mangle]
pub extern "C" fn vdj_plugin_dsp_create() -> *mut VdjPluginDsp {
    create("vdj_plugin_dsp_create", || {
        dsp::into_handle(DspWrapper::default())
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_dsp_init(
    plugin: *mut VdjPluginDsp,
    callbacks: *const VdjCallbacks,
) -> HRESULT {
    init(plugin, callbacks, "vdj_plugin_dsp_init")
}

common_exports!(VdjPluginDsp {
    release: vdj_plugin_dsp_release,
    on_load: vdj_plugin_dsp_on_load,
    get_info: vdj_plugin_dsp_get_info,
    on_parameter: vdj_plugin_dsp_on_parameter,
    on_get_parameter_string: vdj_plugin_dsp_on_get_parameter_string,
});

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_dsp_on_start(plugin: *mut VdjPluginDsp) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_dsp_on_start", E_FAIL, |p| {
        DspPlugin::on_start(p)
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_dsp_on_stop(plugin: *mut VdjPluginDsp) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_dsp_on_stop", E_FAIL, |p| {
        DspPlugin::on_stop(p)
    })
}

/// `buffer` holds `nb` interleaved stereo samples and is processed in place.
#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_dsp_on_process_samples(
    plugin: *mut VdjPluginDsp,
    buffer: *mut f32,
    nb: i32,
) -> HRESULT {
    let Some(buffer) = samples(buffer, nb) else {
        return E_FAIL;
    };
    with_plugin(plugin, "vdj_plugin_dsp_on_process_samples", E_FAIL, |p| {
        p.on_process_samples(buffer)
    })
}

getters!(VdjPluginDsp {
    vdj_plugin_dsp_get_sample_rate -> i32 = |p| p.core().transport().sample_rate;
    vdj_plugin_dsp_get_song_bpm -> i32 = |p| p.core().transport().song_bpm;
    vdj_plugin_dsp_get_song_pos_beats -> f64 = |p| p.core().transport().song_pos_beats;
});

// Buffer DSP

#[no_mangle]
pub extern "C" fn vdj_plugin_buffer_dsp_create() -> *mut VdjPluginBufferDsp {
    create("vdj_plugin_buffer_dsp_create", || {
        dsp::into_buffer_handle(BufferDspWrapper::default())
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_buffer_dsp_init(
    plugin: *mut VdjPluginBufferDsp,
    callbacks: *const VdjCallbacks,
) -> HRESULT {
    init(plugin, callbacks, "vdj_plugin_buffer_dsp_init")
}

common_exports!(VdjPluginBufferDsp {
    release: vdj_plugin_buffer_dsp_release,
    on_load: vdj_plugin_buffer_dsp_on_load,
    get_info: vdj_plugin_buffer_dsp_get_info,
    on_parameter: vdj_plugin_buffer_dsp_on_parameter,
    on_get_parameter_string: vdj_plugin_buffer_dsp_on_get_parameter_string,
});

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_buffer_dsp_on_start(
    plugin: *mut VdjPluginBufferDsp,
) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_buffer_dsp_on_start", E_FAIL, |p| {
        BufferDspPlugin::on_start(p)
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_buffer_dsp_on_stop(plugin: *mut VdjPluginBufferDsp) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_buffer_dsp_on_stop", E_FAIL, |p| {
        BufferDspPlugin::on_stop(p)
    })
}

/// Samples the plugin wants the deck to play, or null.
#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_buffer_dsp_on_get_song_buffer(
    plugin: *mut VdjPluginBufferDsp,
    song_pos: i32,
    nb: i32,
) -> *mut i16 {
    with_plugin(
        plugin,
        "vdj_plugin_buffer_dsp_on_get_song_buffer",
        ptr::null_mut(),
        |p| p.on_get_song_buffer(song_pos, nb),
    )
}

/// Plugin-to-host request for the original song samples, routed through
/// the bound callbacks. Fails when `init` has not run.
#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_buffer_dsp_get_song_buffer(
    plugin: *mut VdjPluginBufferDsp,
    pos: i32,
    nb: i32,
    buffer: *mut *mut i16,
) -> HRESULT {
    if buffer.is_null() {
        return E_FAIL;
    }
    with_plugin(plugin, "vdj_plugin_buffer_dsp_get_song_buffer", E_FAIL, |p| {
        match p.core().callbacks() {
            Some(callbacks) => callbacks.get_song_buffer(pos, nb, buffer),
            None => E_FAIL,
        }
    })
}

getters!(VdjPluginBufferDsp {
    vdj_plugin_buffer_dsp_get_sample_rate -> i32 = |p| p.core().transport().sample_rate;
    vdj_plugin_buffer_dsp_get_song_bpm -> i32 = |p| p.core().transport().song_bpm;
    vdj_plugin_buffer_dsp_get_song_pos -> i32 = |p| p.core().transport().song_pos;
    vdj_plugin_buffer_dsp_get_song_pos_beats -> f64 = |p| p.core().transport().song_pos_beats;
});

// Position DSP

#[no_mangle]
pub extern "C" fn vdj_plugin_position_dsp_create() -> *mut VdjPluginPositionDsp {
    create("vdj_plugin_position_dsp_create", || {
        dsp::into_position_handle(PositionDspWrapper::default())
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_position_dsp_init(
    plugin: *mut VdjPluginPositionDsp,
    callbacks: *const VdjCallbacks,
) -> HRESULT {
    init(plugin, callbacks, "vdj_plugin_position_dsp_init")
}

common_exports!(VdjPluginPositionDsp {
    release: vdj_plugin_position_dsp_release,
    on_load: vdj_plugin_position_dsp_on_load,
    get_info: vdj_plugin_position_dsp_get_info,
    on_parameter: vdj_plugin_position_dsp_on_parameter,
    on_get_parameter_string: vdj_plugin_position_dsp_on_get_parameter_string,
});

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_position_dsp_on_start(
    plugin: *mut VdjPluginPositionDsp,
) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_position_dsp_on_start", E_FAIL, |p| {
        PositionDspPlugin::on_start(p)
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_position_dsp_on_stop(
    plugin: *mut VdjPluginPositionDsp,
) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_position_dsp_on_stop", E_FAIL, |p| {
        PositionDspPlugin::on_stop(p)
    })
}

/// All four values are read and written in place.
#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_position_dsp_on_transform_position(
    plugin: *mut VdjPluginPositionDsp,
    song_pos: *mut f64,
    video_pos: *mut f64,
    volume: *mut f32,
    src_volume: *mut f32,
) -> HRESULT {
    if song_pos.is_null() || video_pos.is_null() || volume.is_null() || src_volume.is_null() {
        return E_FAIL;
    }
    with_plugin(
        plugin,
        "vdj_plugin_position_dsp_on_transform_position",
        E_FAIL,
        |p| {
            p.on_transform_position(
                &mut *song_pos,
                &mut *video_pos,
                &mut *volume,
                &mut *src_volume,
            )
        },
    )
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_position_dsp_on_process_samples(
    plugin: *mut VdjPluginPositionDsp,
    buffer: *mut f32,
    nb: i32,
) -> HRESULT {
    let Some(buffer) = samples(buffer, nb) else {
        return E_FAIL;
    };
    with_plugin(
        plugin,
        "vdj_plugin_position_dsp_on_process_samples",
        E_FAIL,
        |p| PositionDspPlugin::on_process_samples(p, buffer),
    )
}

getters!(VdjPluginPositionDsp {
    vdj_plugin_position_dsp_get_sample_rate -> i32 = |p| p.core().transport().sample_rate;
    vdj_plugin_position_dsp_get_song_bpm -> i32 = |p| p.core().transport().song_bpm;
    vdj_plugin_position_dsp_get_song_pos -> i32 = |p| p.core().transport().song_pos;
    vdj_plugin_position_dsp_get_song_pos_beats -> f64 = |p| p.core().transport().song_pos_beats;
});
