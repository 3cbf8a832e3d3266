use super::{create, init};
use crate::handle::VdjPlugin;
use crate::host::VdjCallbacks;
use crate::plugin::{self, PluginWrapper};
use crate::types::HRESULT;

#[no_mangle]
pub extern "C" fn vdj_plugin_create() -> *mut VdjPlugin {
    create("vdj_plugin_create", || {
        plugin::into_handle(PluginWrapper::default())
    })
}

#[no_mangle]
pub unsafe extern "C" fn vdj_plugin_init(
    plugin: *mut VdjPlugin,
    callbacks: *const VdjCallbacks,
) -> HRESULT {
    init(plugin, callbacks, "vdj_plugin_init")
}

common_exports!(VdjPlugin {
    release: vdj_plugin_release,
    on_load: vdj_plugin_on_load,
    get_info: vdj_plugin_get_info,
    on_parameter: vdj_plugin_on_parameter,
    on_get_parameter_string: vdj_plugin_on_get_parameter_string,
});
