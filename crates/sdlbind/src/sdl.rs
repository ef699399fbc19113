//! The loaded library handle
//!
//! [`Sdl`] owns a resolved [`SdlApi`] table together with the symbol source
//! it came from, so the shared library stays mapped for as long as any clone
//! of the handle (or any object created through it) is alive. Every domain
//! wrapper in this crate is a method on `Sdl` or on a handle that holds one.

use crate::error::{Error, Result};
use crate::ffi::marshal::{self, FreeFn, MarshalContext};
use crate::ffi::{LibraryLoader, SymbolSource};
use crate::sys::SdlApi;
use sdlbind_config::{BindingConfig, ConfigLoader};
use std::ffi::{c_char, c_int, c_void};
use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

crate::native_flags! {
    /// Subsystems for [`Sdl::init`]
    pub struct InitFlags: u32 {
        const AUDIO = 0x0000_0010;
        /// Implies `EVENTS`
        const VIDEO = 0x0000_0020;
        /// Implies `EVENTS`
        const JOYSTICK = 0x0000_0200;
        const HAPTIC = 0x0000_1000;
        /// Implies `JOYSTICK`
        const GAMEPAD = 0x0000_2000;
        const EVENTS = 0x0000_4000;
        /// Implies `EVENTS`
        const SENSOR = 0x0000_8000;
        /// Implies `EVENTS`
        const CAMERA = 0x0001_0000;
    }
}

/// Library version, decoded from the packed `major * 1e6 + minor * 1e3 + patch` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn from_number(number: c_int) -> Self {
        let number = if number < 0 { 0 } else { number as u32 };
        Self {
            major: number / 1_000_000,
            minor: (number / 1_000) % 1_000,
            patch: number % 1_000,
        }
    }

    /// Pack back into the native form, saturating at `c_int::MAX` for
    /// components too large to encode
    pub const fn to_number(self) -> c_int {
        let packed = self
            .major
            .saturating_mul(1_000_000)
            .saturating_add(self.minor.saturating_mul(1_000))
            .saturating_add(self.patch);
        if packed > c_int::MAX as u32 {
            c_int::MAX
        } else {
            packed as c_int
        }
    }

    /// Check whether this version is at least `major.minor.patch`
    pub const fn at_least(self, major: u32, minor: u32, patch: u32) -> bool {
        self.major > major
            || (self.major == major && (self.minor > minor || (self.minor == minor && self.patch >= patch)))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Priority for [`Sdl::set_hint_with_priority`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum HintPriority {
    Default = 0,
    Normal = 1,
    Override = 2,
}

/// Handle to a loaded SDL3 library
#[derive(Clone)]
pub struct Sdl {
    inner: Arc<SdlInner>,
}

struct SdlInner {
    api: SdlApi,
    source: Arc<dyn SymbolSource>,
}

impl Sdl {
    /// Load SDL3 using configuration discovered from the working directory
    /// and the process-wide [`LibraryLoader`]
    pub fn load() -> Result<Self> {
        let config = ConfigLoader::new().load_default()?;
        let mut loader = LibraryLoader::shared()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Self::load_with(&config, &mut loader)
    }

    /// Load the library named by `config` through `loader`
    pub fn load_with(config: &BindingConfig, loader: &mut LibraryLoader) -> Result<Self> {
        add_config_search_paths(config, loader);
        let library = loader.load(&config.library.sdl)?;
        Self::from_source(library)
    }

    /// Resolve the full table from any symbol source
    ///
    /// Fails without side effects if a single symbol is missing.
    pub fn from_source(source: Arc<dyn SymbolSource>) -> Result<Self> {
        let api = SdlApi::resolve(source.as_ref())?;
        Ok(Self {
            inner: Arc::new(SdlInner { api, source }),
        })
    }

    /// Raw function table
    ///
    /// Calling through it bypasses every convention this crate enforces.
    pub fn api(&self) -> &SdlApi {
        &self.inner.api
    }

    /// Name of the library the table was resolved from
    pub fn source_name(&self) -> &str {
        self.inner.source.name()
    }

    pub(crate) fn source(&self) -> &Arc<dyn SymbolSource> {
        &self.inner.source
    }

    // ========================================================================
    // Result conventions
    // ========================================================================

    /// Build an error from the thread's current native error string
    pub(crate) fn last_error(&self) -> Error {
        let message = self.get_error();
        tracing::debug!(error = %message, "native call failed");
        Error::Native(message)
    }

    /// Map a native boolean success flag
    pub(crate) fn check(&self, ok: u8) -> Result<()> {
        if marshal::decode_bool(ok) {
            Ok(())
        } else {
            Err(self.last_error())
        }
    }

    /// Map a native pointer result, null meaning failure
    pub(crate) fn check_ptr<T>(&self, ptr: *mut T) -> Result<NonNull<T>> {
        NonNull::new(ptr).ok_or_else(|| self.last_error())
    }

    /// Map a borrowed pointer result, null meaning failure
    pub(crate) fn check_const_ptr<T>(&self, ptr: *const T) -> Result<*const T> {
        if ptr.is_null() {
            Err(self.last_error())
        } else {
            Ok(ptr)
        }
    }

    pub(crate) fn free_fn(&self) -> FreeFn {
        self.api().SDL_free
    }

    /// Copy and release a native-allocated list, null meaning failure
    pub(crate) fn take_list<T: Copy>(&self, ptr: *mut T, count: c_int) -> Result<Vec<T>> {
        if ptr.is_null() {
            return Err(self.last_error());
        }
        Ok(unsafe { marshal::take_native_array(ptr, count, self.free_fn()) })
    }

    /// Deep-copy and release a native-allocated pointer list, null meaning failure
    pub(crate) fn take_pointer_list<T: Copy>(&self, ptr: *mut *mut T, count: c_int) -> Result<Vec<Option<T>>> {
        if ptr.is_null() {
            return Err(self.last_error());
        }
        Ok(unsafe { marshal::take_native_pointer_array(ptr, count, self.free_fn()) })
    }

    /// Like [`Sdl::take_pointer_list`], converting each entry before the
    /// native array (and everything inside it) is released
    pub(crate) fn take_pointer_list_with<T, U>(
        &self,
        ptr: *mut *mut T,
        count: c_int,
        map: impl FnMut(&T) -> U,
    ) -> Result<Vec<Option<U>>> {
        if ptr.is_null() {
            return Err(self.last_error());
        }
        Ok(unsafe { marshal::take_native_pointer_array_with(ptr, count, self.free_fn(), map) })
    }

    /// Copy and release a native-allocated string, null meaning failure
    pub(crate) fn take_string(&self, ptr: *mut c_char) -> Result<String> {
        if ptr.is_null() {
            return Err(self.last_error());
        }
        Ok(unsafe { marshal::take_native_string(ptr, self.free_fn()) })
    }

    /// Collect `count()` driver names via `get(index)`
    pub(crate) fn driver_names(
        &self,
        count: unsafe extern "C" fn() -> c_int,
        get: unsafe extern "C" fn(c_int) -> *const c_char,
    ) -> Vec<String> {
        let total = unsafe { count() };
        (0..total.max(0))
            .map(|index| unsafe { marshal::string_from_ptr(get(index)) })
            .collect()
    }

    // ========================================================================
    // Initialization
    // ========================================================================

    pub fn init(&self, flags: InitFlags) -> Result<()> {
        self.check(unsafe { (self.api().SDL_Init)(flags.bits()) })
    }

    pub fn init_subsystem(&self, flags: InitFlags) -> Result<()> {
        self.check(unsafe { (self.api().SDL_InitSubSystem)(flags.bits()) })
    }

    /// Shut down every subsystem
    ///
    /// Objects created through this handle must be dropped first.
    pub fn quit(&self) {
        unsafe { (self.api().SDL_Quit)() }
    }

    pub fn quit_subsystem(&self, flags: InitFlags) {
        unsafe { (self.api().SDL_QuitSubSystem)(flags.bits()) }
    }

    /// Which of `flags` are initialized; an empty mask asks for all of them
    pub fn was_init(&self, flags: InitFlags) -> InitFlags {
        InitFlags::from_bits(unsafe { (self.api().SDL_WasInit)(flags.bits()) })
    }

    pub fn is_main_thread(&self) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_IsMainThread)() })
    }

    pub fn set_app_metadata(&self, name: Option<&str>, version: Option<&str>, identifier: Option<&str>) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str_or_null(name)?;
        let version = ctx.c_str_or_null(version)?;
        let identifier = ctx.c_str_or_null(identifier)?;
        self.check(unsafe { (self.api().SDL_SetAppMetadata)(name, version, identifier) })
    }

    pub fn set_app_metadata_property(&self, name: &str, value: Option<&str>) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        let value = ctx.c_str_or_null(value)?;
        self.check(unsafe { (self.api().SDL_SetAppMetadataProperty)(name, value) })
    }

    /// Metadata value, `None` when unset
    pub fn app_metadata_property(&self, name: &str) -> Result<Option<String>> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        Ok(unsafe { marshal::opt_string_from_ptr((self.api().SDL_GetAppMetadataProperty)(name)) })
    }

    // ========================================================================
    // Version
    // ========================================================================

    /// Version of the loaded library
    pub fn version(&self) -> Version {
        Version::from_number(unsafe { (self.api().SDL_GetVersion)() })
    }

    /// Source revision the library was built from
    pub fn revision(&self) -> String {
        unsafe { marshal::string_from_ptr((self.api().SDL_GetRevision)()) }
    }

    // ========================================================================
    // Hints
    // ========================================================================

    pub fn set_hint(&self, name: &str, value: &str) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        let value = ctx.c_str(value)?;
        self.check(unsafe { (self.api().SDL_SetHint)(name, value) })
    }

    pub fn set_hint_with_priority(&self, name: &str, value: &str, priority: HintPriority) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        let value = ctx.c_str(value)?;
        self.check(unsafe { (self.api().SDL_SetHintWithPriority)(name, value, priority as c_int) })
    }

    /// Current hint value, `None` when unset
    pub fn hint(&self, name: &str) -> Result<Option<String>> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        Ok(unsafe { marshal::opt_string_from_ptr((self.api().SDL_GetHint)(name)) })
    }

    pub fn reset_hint(&self, name: &str) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        self.check(unsafe { (self.api().SDL_ResetHint)(name) })
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// The calling thread's last native error message
    pub fn get_error(&self) -> String {
        unsafe { marshal::string_from_ptr((self.api().SDL_GetError)()) }
    }

    pub fn clear_error(&self) {
        unsafe {
            (self.api().SDL_ClearError)();
        }
    }

    /// Set the calling thread's native error message
    ///
    /// The message is passed as a `%s` argument, never as a format string.
    pub fn set_error(&self, message: &str) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let message = ctx.c_str(message)?;
        unsafe {
            // Always reports false
            (self.api().SDL_SetError)(c"%s".as_ptr(), message);
        }
        Ok(())
    }

    /// Release memory allocated by the native library
    ///
    /// # Safety
    ///
    /// `ptr` must be null or come from the native allocator, and must not be
    /// used afterwards.
    pub unsafe fn free(&self, ptr: *mut c_void) {
        (self.api().SDL_free)(ptr)
    }
}

impl fmt::Debug for Sdl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sdl").field("source", &self.source_name()).finish()
    }
}

/// Register configured search paths, keeping their order ahead of the defaults
pub(crate) fn add_config_search_paths(config: &BindingConfig, loader: &mut LibraryLoader) {
    for path in config.library.search_paths.iter().rev() {
        if !loader.search_paths().contains(path) {
            loader.add_search_path(path.clone());
        }
    }
}
