use super::{create, init, opt_cstr, with_plugin};
use crate::handle::VdjPluginOnlineSource;
use crate::host::VdjCallbacks;
use crate::plugin::online::{self, OnlineSourcePlugin};
use crate::plugin::{
    OnlineSourceWrapper, VdjContextMenu, VdjString, VdjSubfoldersList, VdjTracksList,
};
use crate::types::{E_FAIL, HRESULT};
use std::ffi::c_char;

#[no_mangle]
pub extern "C" fn vdj_plugin_online_source_create() -> *mut VdjPluginOnlineSource {
    create("vdj_plugin_online_source_create", || {
        online::into_handle(OnlineSourceWrapper::default())
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_init(
    plugin: *mut VdjPluginOnlineSource,
    callbacks: *const VdjCallbacks,
) -> HRESULT {
    init(plugin, callbacks, "vdj_plugin_online_source_init")
}

common_exports!(VdjPluginOnlineSource {
    release: vdj_plugin_online_source_release,
    on_load: vdj_plugin_online_source_on_load,
    get_info: vdj_plugin_online_source_get_info,
    on_parameter: vdj_plugin_online_source_on_parameter,
    on_get_parameter_string: vdj_plugin_online_source_on_get_parameter_string,
});

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_is_logged(
    plugin: *mut VdjPluginOnlineSource,
) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_online_source_is_logged", E_FAIL, |p| {
        p.is_logged()
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_on_login(
    plugin: *mut VdjPluginOnlineSource,
) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_online_source_on_login", E_FAIL, |p| {
        p.on_login()
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_on_logout(
    plugin: *mut VdjPluginOnlineSource,
) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_online_source_on_logout", E_FAIL, |p| {
        p.on_logout()
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_on_oauth(
    plugin: *mut VdjPluginOnlineSource,
    access_token: *const c_char,
    access_token_expire: usize,
    refresh_token: *const c_char,
    code: *const c_char,
    error_message: *const c_char,
) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_online_source_on_oauth", E_FAIL, |p| {
        p.on_oauth(
            opt_cstr(access_token),
            access_token_expire,
            opt_cstr(refresh_token),
            opt_cstr(code),
            opt_cstr(error_message),
        )
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_on_search(
    plugin: *mut VdjPluginOnlineSource,
    search: *const c_char,
    tracks_list: *mut VdjTracksList,
) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_online_source_on_search", E_FAIL, |p| {
        p.on_search(opt_cstr(search), tracks_list)
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_on_search_cancel(
    plugin: *mut VdjPluginOnlineSource,
) -> HRESULT {
    with_plugin(
        plugin,
        "vdj_plugin_online_source_on_search_cancel",
        E_FAIL,
        |p| p.on_search_cancel(),
    )
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_get_stream_url(
    plugin: *mut VdjPluginOnlineSource,
    unique_id: *const c_char,
    url: *mut VdjString,
    error_message: *mut VdjString,
) -> HRESULT {
    with_plugin(
        plugin,
        "vdj_plugin_online_source_get_stream_url",
        E_FAIL,
        |p| p.get_stream_url(opt_cstr(unique_id), url, error_message),
    )
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_get_folder_list(
    plugin: *mut VdjPluginOnlineSource,
    subfolders_list: *mut VdjSubfoldersList,
) -> HRESULT {
    with_plugin(
        plugin,
        "vdj_plugin_online_source_get_folder_list",
        E_FAIL,
        |p| p.get_folder_list(subfolders_list),
    )
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_get_folder(
    plugin: *mut VdjPluginOnlineSource,
    folder_unique_id: *const c_char,
    tracks_list: *mut VdjTracksList,
) -> HRESULT {
    with_plugin(plugin, "vdj_plugin_online_source_get_folder", E_FAIL, |p| {
        p.get_folder(opt_cstr(folder_unique_id), tracks_list)
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_get_context_menu(
    plugin: *mut VdjPluginOnlineSource,
    unique_id: *const c_char,
    context_menu: *mut VdjContextMenu,
) -> HRESULT {
    with_plugin(
        plugin,
        "vdj_plugin_online_source_get_context_menu",
        E_FAIL,
        |p| p.get_context_menu(opt_cstr(unique_id), context_menu),
    )
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_on_context_menu(
    plugin: *mut VdjPluginOnlineSource,
    unique_id: *const c_char,
    menu_index: usize,
) -> HRESULT {
    with_plugin(
        plugin,
        "vdj_plugin_online_source_on_context_menu",
        E_FAIL,
        |p| p.on_context_menu(opt_cstr(unique_id), menu_index),
    )
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_get_folder_context_menu(
    plugin: *mut VdjPluginOnlineSource,
    folder_unique_id: *const c_char,
    context_menu: *mut VdjContextMenu,
) -> HRESULT {
    with_plugin(
        plugin,
        "vdj_plugin_online_source_get_folder_context_menu",
        E_FAIL,
        |p| p.get_folder_context_menu(opt_cstr(folder_unique_id), context_menu),
    )
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_online_source_on_folder_context_menu(
    plugin: *mut VdjPluginOnlineSource,
    folder_unique_id: *const c_char,
    menu_index: usize,
) -> HRESULT {
    with_plugin(
        plugin,
        "vdj_plugin_online_source_on_folder_context_menu",
        E_FAIL,
        |p| p.on_folder_context_menu(opt_cstr(folder_unique_id), menu_index),
    )
}
