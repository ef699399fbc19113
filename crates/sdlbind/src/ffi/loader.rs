//! Dynamic library loading for FFI
//!
//! Provides cross-platform dynamic library loading using `libloading`.
//! Handles the versioned file names the SDL family ships under, configured
//! search paths, and caching so a library is opened once per process.

use crate::ffi::symbols::SymbolSource;
use libloading::Library;
use std::collections::HashMap;
use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::sync::{Arc, Mutex, OnceLock};
use thiserror::Error;

/// Library loading errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    /// Library file not found in search paths or by the system loader
    #[error("Library not found: {0}")]
    LibraryNotFound(String),

    /// Symbol not found in library
    #[error("Symbol '{symbol}' not found in library '{library}'")]
    SymbolNotFound { library: String, symbol: String },

    /// The file exists but the system loader rejected it
    #[error("Failed to load library: {0}")]
    LoadFailed(String),
}

/// An opened shared library
///
/// Closed when the last `Arc` referencing it is dropped.
pub struct NativeLibrary {
    name: String,
    path: PathBuf,
    library: Library,
}

impl NativeLibrary {
    /// Open a library from an exact path or file name
    ///
    /// # Safety
    ///
    /// Loading a dynamic library runs its initialisers. The caller must trust
    /// the file.
    pub unsafe fn open(name: &str, path: &Path) -> Result<Self, LoadError> {
        let library = Library::new(path).map_err(|e| LoadError::LoadFailed(e.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            path: path.to_path_buf(),
            library,
        })
    }

    /// Name the library was requested under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path or file name the library was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SymbolSource for NativeLibrary {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, symbol: &str) -> Option<NonNull<c_void>> {
        // Safety: the symbol is only read as an untyped address here;
        // callers give it a type in `symbols::resolve_fn`.
        let symbol = unsafe { self.library.get::<*mut c_void>(symbol.as_bytes()).ok()? };
        NonNull::new(*symbol)
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("name", &self.name)
            .field("path", &self.path)
            .finish()
    }
}

/// Dynamic library loader with caching and platform-specific path resolution
///
/// # Safety
///
/// Loading dynamic libraries is inherently unsafe. The loaded code runs in the
/// same process and can perform arbitrary operations.
pub struct LibraryLoader {
    /// Cache of loaded libraries by requested name
    loaded: HashMap<String, Arc<NativeLibrary>>,
    /// Directories searched before the system loader
    search_paths: Vec<PathBuf>,
}

impl LibraryLoader {
    /// Create a new library loader with default search paths
    pub fn new() -> Self {
        Self {
            loaded: HashMap::new(),
            search_paths: Self::default_search_paths(),
        }
    }

    /// Create a loader that searches `paths` (in order) before the defaults
    pub fn with_search_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut search_paths: Vec<PathBuf> = paths.into_iter().collect();
        search_paths.extend(Self::default_search_paths());
        Self {
            loaded: HashMap::new(),
            search_paths,
        }
    }

    /// Process-wide loader used by `Sdl::load`
    pub fn shared() -> &'static Mutex<LibraryLoader> {
        static SHARED: OnceLock<Mutex<LibraryLoader>> = OnceLock::new();
        SHARED.get_or_init(|| Mutex::new(LibraryLoader::new()))
    }

    /// Get platform-specific default library search paths
    ///
    /// The executable's directory and the current working directory come
    /// first, followed by install prefixes the system loader does not always
    /// cover (Homebrew on macOS, /usr/local elsewhere).
    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            paths.push(exe_dir);
        }

        if let Ok(cwd) = std::env::current_dir() {
            if !paths.contains(&cwd) {
                paths.push(cwd);
            }
        }

        #[cfg(target_os = "linux")]
        {
            paths.push(PathBuf::from("/usr/local/lib"));
            if cfg!(target_pointer_width = "64") {
                paths.push(PathBuf::from("/usr/local/lib64"));
            }
        }

        #[cfg(target_os = "macos")]
        {
            paths.push(PathBuf::from("/opt/homebrew/lib"));
            paths.push(PathBuf::from("/usr/local/lib"));
        }

        paths
    }

    /// File names a logical library name is shipped under, most specific first
    ///
    /// - Linux: lib{name}.so.0, lib{name}.so
    /// - macOS: lib{name}.0.dylib, lib{name}.dylib
    /// - Windows: {name}.dll
    ///
    /// A name that already looks like a file name is returned unchanged.
    pub fn candidate_file_names(name: &str) -> Vec<String> {
        if is_file_name(name) {
            return vec![name.to_string()];
        }

        if cfg!(target_os = "windows") {
            vec![format!("{}.dll", name), format!("lib{}.dll", name)]
        } else if cfg!(target_os = "macos") {
            vec![
                format!("lib{}.0.dylib", name),
                format!("lib{}.dylib", name),
                format!("{}.framework/{}", name, name),
            ]
        } else {
            vec![format!("lib{}.so.0", name), format!("lib{}.so", name)]
        }
    }

    /// Resolve a library name to an existing file in the search paths
    fn resolve_library_path(&self, name: &str) -> Option<PathBuf> {
        let path = Path::new(name);
        if path.is_absolute() {
            return path.exists().then(|| path.to_path_buf());
        }

        let candidates = Self::candidate_file_names(name);
        for search_path in &self.search_paths {
            for file_name in &candidates {
                let full_path = search_path.join(file_name);
                if full_path.exists() {
                    return Some(full_path);
                }
            }
        }

        None
    }

    /// Load a library by logical name or path
    ///
    /// Returns the cached instance if the same name was loaded before.
    /// Search paths are tried first; after that each candidate file name is
    /// handed to the system loader, which applies its own rules
    /// (`LD_LIBRARY_PATH`, rpath, `PATH` on Windows).
    ///
    /// # Safety
    ///
    /// Loading a dynamic library executes its initialization code and makes its
    /// symbols available. The caller must ensure the library is trusted.
    pub fn load(&mut self, name: &str) -> Result<Arc<NativeLibrary>, LoadError> {
        if let Some(library) = self.loaded.get(name) {
            return Ok(Arc::clone(library));
        }

        let library = match self.resolve_library_path(name) {
            Some(path) => {
                tracing::debug!(library = name, path = %path.display(), "loading library");
                unsafe { NativeLibrary::open(name, &path)? }
            }
            None => self.load_from_system(name)?,
        };

        tracing::debug!(library = name, path = %library.path().display(), "library loaded");
        let library = Arc::new(library);
        self.loaded.insert(name.to_string(), Arc::clone(&library));
        Ok(library)
    }

    fn load_from_system(&self, name: &str) -> Result<NativeLibrary, LoadError> {
        for file_name in Self::candidate_file_names(name) {
            tracing::trace!(library = name, file = %file_name, "trying system loader");
            match unsafe { NativeLibrary::open(name, Path::new(&file_name)) } {
                Ok(library) => return Ok(library),
                Err(e) => tracing::trace!(library = name, error = %e, "candidate rejected"),
            }
        }
        Err(LoadError::LibraryNotFound(name.to_string()))
    }

    /// Drop the cached handle for `name`
    ///
    /// The library is closed once no resolved table references it any more.
    /// Returns whether the name was loaded.
    pub fn unload(&mut self, name: &str) -> bool {
        self.loaded.remove(name).is_some()
    }

    /// Add a custom search path (prepended to search list)
    pub fn add_search_path(&mut self, path: PathBuf) {
        self.search_paths.insert(0, path);
    }

    /// Current search paths, in lookup order
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Check whether `name` is cached
    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(name)
    }

    /// Get the number of loaded libraries
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}

impl Default for LibraryLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_file_name(name: &str) -> bool {
    name.contains('/')
        || name.contains('\\')
        || name.ends_with(".dll")
        || name.ends_with(".dylib")
        || name.ends_with(".so")
        || name.contains(".so.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_search_paths_include_cwd() {
        let paths = LibraryLoader::default_search_paths();
        if let Ok(cwd) = std::env::current_dir() {
            assert!(paths.contains(&cwd));
        }
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_candidate_names_linux() {
        assert_eq!(
            LibraryLoader::candidate_file_names("SDL3"),
            vec!["libSDL3.so.0".to_string(), "libSDL3.so".to_string()]
        );
    }

    #[test]
    #[cfg(target_os = "macos")]
    fn test_candidate_names_macos() {
        let names = LibraryLoader::candidate_file_names("SDL3_ttf");
        assert_eq!(names[0], "libSDL3_ttf.0.dylib");
        assert_eq!(names[1], "libSDL3_ttf.dylib");
    }

    #[test]
    #[cfg(target_os = "windows")]
    fn test_candidate_names_windows() {
        assert_eq!(LibraryLoader::candidate_file_names("SDL3")[0], "SDL3.dll");
    }

    #[test]
    fn test_explicit_file_name_kept() {
        assert_eq!(
            LibraryLoader::candidate_file_names("vendor/libSDL3.so.0"),
            vec!["vendor/libSDL3.so.0".to_string()]
        );
        assert_eq!(
            LibraryLoader::candidate_file_names("SDL3.dll"),
            vec!["SDL3.dll".to_string()]
        );
    }

    #[test]
    fn test_library_not_found() {
        let mut loader = LibraryLoader::new();
        let result = loader.load("nonexistent_library_xyz");
        assert!(matches!(result, Err(LoadError::LibraryNotFound(_))));
        assert_eq!(loader.loaded_count(), 0);
    }

    #[test]
    fn test_search_path_resolution() {
        let dir = TempDir::new().unwrap();
        let file_name = LibraryLoader::candidate_file_names("FakeSdl").remove(0);
        fs::write(dir.path().join(&file_name), b"not a library").unwrap();

        let mut loader = LibraryLoader::with_search_paths([dir.path().to_path_buf()]);
        assert_eq!(
            loader.resolve_library_path("FakeSdl"),
            Some(dir.path().join(&file_name))
        );

        // The file exists but is not a shared object
        let result = loader.load("FakeSdl");
        assert!(matches!(result, Err(LoadError::LoadFailed(_))));
    }

    #[test]
    fn test_add_custom_search_path() {
        let mut loader = LibraryLoader::new();
        let custom_path = PathBuf::from("/custom/path");
        loader.add_search_path(custom_path.clone());

        assert_eq!(loader.search_paths()[0], custom_path);
    }

    #[test]
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    fn test_load_is_cached_until_unloaded() {
        let mut loader = LibraryLoader::new();
        let first = loader.load("libc.so.6").unwrap();
        let second = loader.load("libc.so.6").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.loaded_count(), 1);
        assert!(first.resolve("strlen").is_some());
        assert!(first.resolve("definitely_not_a_libc_symbol").is_none());

        assert!(loader.unload("libc.so.6"));
        assert!(!loader.unload("libc.so.6"));
        assert_eq!(loader.loaded_count(), 0);
    }
}
