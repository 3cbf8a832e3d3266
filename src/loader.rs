//! Loading a built shim library from the host side.
//!
//! ```ignore
//! let library = PluginLibrary::open("target/release/libmy_plugin.so")?;
//! for kind in library.exported_kinds() {
//!     let mut plugin = library.instantiate(kind)?;
//!     println!("{kind}: {}", plugin.info()?.name);
//! }
//! ```

use crate::error::{check, LoadStage, Result, ShimError};
use crate::host::{VdjCallbacks, VdjVideoCallbacks};
use crate::types::{PluginInfo, PluginKind, VdjPluginInfo, HRESULT, S_OK};
use smallvec::SmallVec;
use std::ffi::c_void;
use std::path::{Path, PathBuf};

type CreateFn = unsafe extern "C" fn() -> *mut c_void;
type ReleaseFn = unsafe extern "C" fn(*mut c_void);
type InitFn = unsafe extern "C" fn(*mut c_void, *const VdjCallbacks) -> HRESULT;
type InitVideoFn =
    unsafe extern "C" fn(*mut c_void, *const VdjCallbacks, *const VdjVideoCallbacks) -> HRESULT;
type OnLoadFn = unsafe extern "C" fn(*mut c_void) -> HRESULT;
type GetInfoFn = unsafe extern "C" fn(*mut c_void, *mut VdjPluginInfo) -> HRESULT;
type OnParameterFn = unsafe extern "C" fn(*mut c_void, i32) -> HRESULT;

/// An opened shim library.
pub struct PluginLibrary {
    path: PathBuf,
    library: libloading::Library,
}

impl PluginLibrary {
    /// Opens the shared library at `path`. Its initialisers run here.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let library = unsafe {
            libloading::Library::new(path).map_err(|e| ShimError::LoadFailed {
                path: path.to_path_buf(),
                stage: LoadStage::Opening,
                reason: format!("Failed to load library: {}", e),
            })?
        };
        log::debug!("opened plugin library {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            library,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the library exports `<kind>_create`.
    pub fn supports(&self, kind: PluginKind) -> bool {
        self.symbol::<CreateFn>(kind, "create").is_ok()
    }

    pub fn exported_kinds(&self) -> SmallVec<[PluginKind; 7]> {
        PluginKind::ALL
            .into_iter()
            .filter(|&kind| self.supports(kind))
            .collect()
    }

    /// Creates one instance of `kind`, released again when the returned
    /// value is dropped.
    pub fn instantiate(&self, kind: PluginKind) -> Result<LoadedPlugin<'_>> {
        let create = self.symbol::<CreateFn>(kind, "create")?;
        let release = self.symbol::<ReleaseFn>(kind, "release")?;
        let on_load = self.symbol::<OnLoadFn>(kind, "on_load")?;
        let get_info = self.symbol::<GetInfoFn>(kind, "get_info")?;
        let on_parameter = self.symbol::<OnParameterFn>(kind, "on_parameter")?;

        let handle = unsafe { create() };
        if handle.is_null() {
            return Err(self.load_error(
                LoadStage::Instantiation,
                format!("{kind}_create returned null"),
            ));
        }
        log::debug!("instantiated {kind} from {}", self.path.display());

        Ok(LoadedPlugin {
            library: self,
            kind,
            handle,
            release,
            on_load,
            get_info,
            on_parameter,
        })
    }

    fn symbol<T: Copy>(&self, kind: PluginKind, op: &str) -> Result<T> {
        let name = format!("{}_{op}\0", kind.symbol_prefix());
        let symbol = unsafe { self.library.get::<T>(name.as_bytes()) }.map_err(|e| {
            self.load_error(
                LoadStage::Symbols,
                format!("No {} symbol: {}", name.trim_end_matches('\0'), e),
            )
        })?;
        Ok(*symbol)
    }

    fn load_error(&self, stage: LoadStage, reason: String) -> ShimError {
        ShimError::LoadFailed {
            path: self.path.clone(),
            stage,
            reason,
        }
    }
}

impl std::fmt::Debug for PluginLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginLibrary")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// A live instance inside a [`PluginLibrary`].
pub struct LoadedPlugin<'lib> {
    library: &'lib PluginLibrary,
    kind: PluginKind,
    handle: *mut c_void,
    release: ReleaseFn,
    on_load: OnLoadFn,
    get_info: GetInfoFn,
    on_parameter: OnParameterFn,
}

impl LoadedPlugin<'_> {
    pub fn kind(&self) -> PluginKind {
        self.kind
    }

    pub fn as_raw(&self) -> *mut c_void {
        self.handle
    }

    /// Binds the host callbacks of a non-video kind.
    ///
    /// # Safety
    /// `callbacks` must stay valid, and its entries callable, until this
    /// instance is dropped.
    pub unsafe fn init(&mut self, callbacks: &VdjCallbacks) -> Result<()> {
        if self.kind.is_video() {
            return Err(ShimError::Unsupported(
                "video kinds are initialised with init_video",
            ));
        }
        let init = self.library.symbol::<InitFn>(self.kind, "init")?;
        self.finish_init(init(self.handle, callbacks))
    }

    /// Binds both callback tables of a video kind.
    ///
    /// # Safety
    /// Same as [`init`](Self::init), for both tables.
    pub unsafe fn init_video(
        &mut self,
        callbacks: &VdjCallbacks,
        video_callbacks: &VdjVideoCallbacks,
    ) -> Result<()> {
        if !self.kind.is_video() {
            return Err(ShimError::Unsupported(
                "only video kinds take video callbacks",
            ));
        }
        let init = self.library.symbol::<InitVideoFn>(self.kind, "init")?;
        self.finish_init(init(self.handle, callbacks, video_callbacks))
    }

    fn finish_init(&self, code: HRESULT) -> Result<()> {
        if code != S_OK {
            return Err(self.library.load_error(
                LoadStage::Initialization,
                format!("{}_init returned {code:#010x}", self.kind),
            ));
        }
        Ok(())
    }

    pub fn on_load(&mut self) -> Result<bool> {
        check(unsafe { (self.on_load)(self.handle) })
    }

    /// Reads the instance identity into owned strings.
    pub fn info(&self) -> Result<PluginInfo> {
        let mut info = VdjPluginInfo::default();
        check(unsafe { (self.get_info)(self.handle, &mut info) })?;
        Ok(unsafe { PluginInfo::from_raw(&info) })
    }

    pub fn on_parameter(&mut self, id: i32) -> Result<bool> {
        check(unsafe { (self.on_parameter)(self.handle, id) })
    }
}

impl Drop for LoadedPlugin<'_> {
    fn drop(&mut self) {
        log::debug!("releasing {} instance {:p}", self.kind, self.handle);
        unsafe { (self.release)(self.handle) };
    }
}

impl std::fmt::Debug for LoadedPlugin<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedPlugin")
            .field("kind", &self.kind)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}
