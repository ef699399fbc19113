//! Image file loading through SDL3_image

use crate::error::Result;
use crate::ffi::marshal::{self, MarshalContext};
use crate::ffi::{LibraryLoader, SymbolSource};
use crate::render::{Renderer, Texture};
use crate::sdl::{add_config_search_paths, Sdl, Version};
use crate::surface::Surface;
use crate::sys::{SDL_IOStream, SDL_Renderer, SDL_Surface, SDL_Texture};
use sdlbind_config::{BindingConfig, ConfigLoader};
use std::ffi::{c_char, c_int};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

crate::native_api! {
    /// Resolved SDL3_image entry points
    pub struct ImageApi {
        fn IMG_Version() -> c_int;
        fn IMG_Load(*const c_char) -> *mut SDL_Surface;
        fn IMG_Load_IO(*mut SDL_IOStream, u8) -> *mut SDL_Surface;
        fn IMG_LoadTexture(*mut SDL_Renderer, *const c_char) -> *mut SDL_Texture;
        fn IMG_SavePNG(*mut SDL_Surface, *const c_char) -> u8;
        fn IMG_SaveJPG(*mut SDL_Surface, *const c_char, c_int) -> u8;
    }
}

/// Handle to a loaded SDL3_image library
#[derive(Clone)]
pub struct Image {
    inner: Arc<ImageInner>,
}

struct ImageInner {
    sdl: Sdl,
    api: ImageApi,
    source: Arc<dyn SymbolSource>,
}

impl Image {
    /// Load SDL3_image using discovered configuration and the shared loader
    pub fn load(sdl: &Sdl) -> Result<Self> {
        let config = ConfigLoader::new().load_default()?;
        let mut loader = LibraryLoader::shared()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Self::load_with(sdl, &config, &mut loader)
    }

    pub fn load_with(sdl: &Sdl, config: &BindingConfig, loader: &mut LibraryLoader) -> Result<Self> {
        add_config_search_paths(config, loader);
        let library = loader.load(&config.library.image)?;
        Self::from_source(sdl, library)
    }

    pub fn from_source(sdl: &Sdl, source: Arc<dyn SymbolSource>) -> Result<Self> {
        let api = ImageApi::resolve(source.as_ref())?;
        Ok(Self {
            inner: Arc::new(ImageInner {
                sdl: sdl.clone(),
                api,
                source,
            }),
        })
    }

    pub fn api(&self) -> &ImageApi {
        &self.inner.api
    }

    pub fn source_name(&self) -> &str {
        self.inner.source.name()
    }

    fn sdl(&self) -> &Sdl {
        &self.inner.sdl
    }

    pub fn version(&self) -> Version {
        Version::from_number(unsafe { (self.api().IMG_Version)() })
    }

    /// Decode an image file of any supported format
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Surface> {
        let mut ctx = MarshalContext::new();
        let path = ctx.c_str(&path.as_ref().to_string_lossy())?;
        let raw = self.sdl().check_ptr(unsafe { (self.api().IMG_Load)(path) })?;
        Ok(unsafe { Surface::from_raw(self.sdl(), raw) })
    }

    /// Decode an image held in memory; `data` is only read during the call
    pub fn load_from_memory(&self, data: &[u8]) -> Result<Surface> {
        let sdl = self.sdl();
        let io = sdl.check_ptr(unsafe { (sdl.api().SDL_IOFromConstMem)(data.as_ptr().cast(), data.len()) })?;
        // The stream is closed by the decoder whether or not decoding succeeds.
        let raw = unsafe { (self.api().IMG_Load_IO)(io.as_ptr(), marshal::encode_bool(true)) };
        let raw = sdl.check_ptr(raw)?;
        Ok(unsafe { Surface::from_raw(sdl, raw) })
    }

    /// Decode straight into a texture owned by `renderer`
    pub fn load_texture<'r>(&self, renderer: &'r Renderer, path: impl AsRef<Path>) -> Result<Texture<'r>> {
        let mut ctx = MarshalContext::new();
        let path = ctx.c_str(&path.as_ref().to_string_lossy())?;
        let raw = self
            .sdl()
            .check_ptr(unsafe { (self.api().IMG_LoadTexture)(renderer.as_ptr(), path) })?;
        Ok(renderer.texture(raw))
    }

    pub fn save_png(&self, surface: &Surface, path: impl AsRef<Path>) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let path = ctx.c_str(&path.as_ref().to_string_lossy())?;
        self.sdl()
            .check(unsafe { (self.api().IMG_SavePNG)(surface.as_ptr(), path) })
    }

    /// Save as JPEG; `quality` runs from 0 to 100
    pub fn save_jpg(&self, surface: &Surface, path: impl AsRef<Path>, quality: u8) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let path = ctx.c_str(&path.as_ref().to_string_lossy())?;
        let quality = c_int::from(quality.min(100));
        self.sdl()
            .check(unsafe { (self.api().IMG_SaveJPG)(surface.as_ptr(), path, quality) })
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image").field("source", &self.source_name()).finish()
    }
}
