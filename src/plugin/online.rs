//! Online media source kind.
//!
//! Track lists, folder lists, context menus and strings belong to the host
//! and are only ever handed back to it; the shim never looks inside them.
//! Text arguments arrive as `None` when the host passes a null pointer.

use super::{Plugin, PluginCore};
use crate::handle::{self, VdjPluginOnlineSource};
use crate::types::{PluginIdentity, PluginKind, E_NOTIMPL, HRESULT};
use std::ffi::CStr;

/// Host-owned track list filled by searches and folder browsing.
#[repr(C)]
pub struct VdjTracksList {
    _priv: [u8; 0],
}

/// Host-owned list of sub-folders.
#[repr(C)]
pub struct VdjSubfoldersList {
    _priv: [u8; 0],
}

/// Host-owned context menu.
#[repr(C)]
pub struct VdjContextMenu {
    _priv: [u8; 0],
}

/// Host-owned string the plugin writes results into.
#[repr(C)]
pub struct VdjString {
    _priv: [u8; 0],
}

pub trait OnlineSourcePlugin: Plugin {
    fn is_logged(&mut self) -> HRESULT {
        E_NOTIMPL
    }

    fn on_login(&mut self) -> HRESULT {
        E_NOTIMPL
    }

    fn on_logout(&mut self) -> HRESULT {
        E_NOTIMPL
    }

    fn on_oauth(
        &mut self,
        _access_token: Option<&CStr>,
        _access_token_expire: usize,
        _refresh_token: Option<&CStr>,
        _code: Option<&CStr>,
        _error_message: Option<&CStr>,
    ) -> HRESULT {
        E_NOTIMPL
    }

    fn on_search(&mut self, _search: Option<&CStr>, _tracks: *mut VdjTracksList) -> HRESULT {
        E_NOTIMPL
    }

    fn on_search_cancel(&mut self) -> HRESULT {
        E_NOTIMPL
    }

    fn get_stream_url(
        &mut self,
        _unique_id: Option<&CStr>,
        _url: *mut VdjString,
        _error_message: *mut VdjString,
    ) -> HRESULT {
        E_NOTIMPL
    }

    fn get_folder_list(&mut self, _subfolders: *mut VdjSubfoldersList) -> HRESULT {
        E_NOTIMPL
    }

    fn get_folder(
        &mut self,
        _folder_unique_id: Option<&CStr>,
        _tracks: *mut VdjTracksList,
    ) -> HRESULT {
        E_NOTIMPL
    }

    fn get_context_menu(
        &mut self,
        _unique_id: Option<&CStr>,
        _menu: *mut VdjContextMenu,
    ) -> HRESULT {
        E_NOTIMPL
    }

    fn on_context_menu(&mut self, _unique_id: Option<&CStr>, _menu_index: usize) -> HRESULT {
        E_NOTIMPL
    }

    fn get_folder_context_menu(
        &mut self,
        _folder_unique_id: Option<&CStr>,
        _menu: *mut VdjContextMenu,
    ) -> HRESULT {
        E_NOTIMPL
    }

    fn on_folder_context_menu(
        &mut self,
        _folder_unique_id: Option<&CStr>,
        _menu_index: usize,
    ) -> HRESULT {
        E_NOTIMPL
    }
}

#[derive(Debug)]
pub struct OnlineSourceWrapper {
    core: PluginCore,
}

impl OnlineSourceWrapper {
    pub fn new(identity: PluginIdentity) -> Self {
        Self {
            core: PluginCore::new(identity),
        }
    }
}

impl Default for OnlineSourceWrapper {
    fn default() -> Self {
        Self::new(PluginIdentity::for_kind(PluginKind::OnlineSource))
    }
}

impl Plugin for OnlineSourceWrapper {
    fn core(&self) -> &PluginCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PluginCore {
        &mut self.core
    }
}

impl OnlineSourcePlugin for OnlineSourceWrapper {}

pub fn into_handle(plugin: impl OnlineSourcePlugin + 'static) -> *mut VdjPluginOnlineSource {
    let plugin: Box<dyn OnlineSourcePlugin> = Box::new(plugin);
    handle::into_raw::<VdjPluginOnlineSource>(plugin)
}
