//! TrueType fonts through SDL3_ttf
//!
//! [`Ttf`] is loaded from its own shared library but reports errors and
//! returns surfaces through the [`Sdl`] it was loaded against.

use crate::error::Result;
use crate::ffi::marshal::{self, MarshalContext};
use crate::ffi::{LibraryLoader, SymbolSource};
use crate::pixels::Color;
use crate::sdl::{add_config_search_paths, Sdl, Version};
use crate::surface::Surface;
use crate::sys::SDL_Surface;
use sdlbind_config::{BindingConfig, ConfigLoader};
use std::ffi::{c_char, c_int};
use std::fmt;
use std::path::Path;
use std::ptr::NonNull;
use std::sync::Arc;

#[allow(non_camel_case_types)]
#[repr(C)]
pub struct TTF_Font {
    _private: [u8; 0],
    _marker: std::marker::PhantomData<(*mut u8, std::marker::PhantomPinned)>,
}

crate::native_api! {
    /// Resolved SDL3_ttf entry points
    pub struct TtfApi {
        fn TTF_Version() -> c_int;
        fn TTF_Init() -> u8;
        fn TTF_Quit();
        fn TTF_WasInit() -> c_int;
        fn TTF_OpenFont(*const c_char, f32) -> *mut TTF_Font;
        fn TTF_CloseFont(*mut TTF_Font);
        fn TTF_SetFontSize(*mut TTF_Font, f32) -> u8;
        fn TTF_GetFontSize(*mut TTF_Font) -> f32;
        fn TTF_GetFontHeight(*const TTF_Font) -> c_int;
        fn TTF_GetFontAscent(*const TTF_Font) -> c_int;
        fn TTF_GetFontDescent(*const TTF_Font) -> c_int;
        fn TTF_GetFontLineSkip(*const TTF_Font) -> c_int;
        fn TTF_GetFontFamilyName(*const TTF_Font) -> *const c_char;
        fn TTF_GetFontStyleName(*const TTF_Font) -> *const c_char;
        fn TTF_SetFontStyle(*mut TTF_Font, u32);
        fn TTF_GetFontStyle(*const TTF_Font) -> u32;
        fn TTF_FontHasGlyph(*mut TTF_Font, u32) -> u8;
        fn TTF_GetStringSize(*mut TTF_Font, *const c_char, usize, *mut c_int, *mut c_int) -> u8;
        fn TTF_RenderText_Solid(*mut TTF_Font, *const c_char, usize, Color) -> *mut SDL_Surface;
        fn TTF_RenderText_Shaded(*mut TTF_Font, *const c_char, usize, Color, Color) -> *mut SDL_Surface;
        fn TTF_RenderText_Blended(*mut TTF_Font, *const c_char, usize, Color) -> *mut SDL_Surface;
        fn TTF_RenderText_Blended_Wrapped(*mut TTF_Font, *const c_char, usize, Color, c_int) -> *mut SDL_Surface;
    }
}

crate::native_flags! {
    /// `TTF_FontStyleFlags`
    pub struct FontStyleFlags: u32 {
        const NORMAL = 0x00;
        const BOLD = 0x01;
        const ITALIC = 0x02;
        const UNDERLINE = 0x04;
        const STRIKETHROUGH = 0x08;
    }
}

/// Handle to a loaded SDL3_ttf library
#[derive(Clone)]
pub struct Ttf {
    inner: Arc<TtfInner>,
}

struct TtfInner {
    sdl: Sdl,
    api: TtfApi,
    source: Arc<dyn SymbolSource>,
}

impl Ttf {
    /// Load SDL3_ttf using discovered configuration and the shared loader
    pub fn load(sdl: &Sdl) -> Result<Self> {
        let config = ConfigLoader::new().load_default()?;
        let mut loader = LibraryLoader::shared()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Self::load_with(sdl, &config, &mut loader)
    }

    pub fn load_with(sdl: &Sdl, config: &BindingConfig, loader: &mut LibraryLoader) -> Result<Self> {
        add_config_search_paths(config, loader);
        let library = loader.load(&config.library.ttf)?;
        Self::from_source(sdl, library)
    }

    pub fn from_source(sdl: &Sdl, source: Arc<dyn SymbolSource>) -> Result<Self> {
        let api = TtfApi::resolve(source.as_ref())?;
        Ok(Self {
            inner: Arc::new(TtfInner {
                sdl: sdl.clone(),
                api,
                source,
            }),
        })
    }

    pub fn api(&self) -> &TtfApi {
        &self.inner.api
    }

    pub fn source_name(&self) -> &str {
        self.inner.source.name()
    }

    fn sdl(&self) -> &Sdl {
        &self.inner.sdl
    }

    pub fn version(&self) -> Version {
        Version::from_number(unsafe { (self.api().TTF_Version)() })
    }

    /// Initialise the font engine; calls nest with [`quit`](Self::quit)
    pub fn init(&self) -> Result<()> {
        self.sdl().check(unsafe { (self.api().TTF_Init)() })
    }

    pub fn quit(&self) {
        unsafe { (self.api().TTF_Quit)() }
    }

    /// Outstanding [`init`](Self::init) calls
    pub fn was_init(&self) -> i32 {
        unsafe { (self.api().TTF_WasInit)() }
    }

    pub fn open_font(&self, path: impl AsRef<Path>, ptsize: f32) -> Result<Font> {
        let mut ctx = MarshalContext::new();
        let path = ctx.c_str(&path.as_ref().to_string_lossy())?;
        let raw = self.sdl().check_ptr(unsafe { (self.api().TTF_OpenFont)(path, ptsize) })?;
        Ok(Font { ttf: self.clone(), raw })
    }
}

impl fmt::Debug for Ttf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ttf").field("source", &self.source_name()).finish()
    }
}

/// Owned font
pub struct Font {
    ttf: Ttf,
    raw: NonNull<TTF_Font>,
}

impl Font {
    pub fn as_ptr(&self) -> *mut TTF_Font {
        self.raw.as_ptr()
    }

    fn api(&self) -> &TtfApi {
        self.ttf.api()
    }

    fn sdl(&self) -> &Sdl {
        self.ttf.sdl()
    }

    pub fn set_size(&mut self, ptsize: f32) -> Result<()> {
        self.sdl().check(unsafe { (self.api().TTF_SetFontSize)(self.as_ptr(), ptsize) })
    }

    pub fn size(&self) -> f32 {
        unsafe { (self.api().TTF_GetFontSize)(self.as_ptr()) }
    }

    /// Maximum glyph height in pixels
    pub fn height(&self) -> i32 {
        unsafe { (self.api().TTF_GetFontHeight)(self.as_ptr()) }
    }

    pub fn ascent(&self) -> i32 {
        unsafe { (self.api().TTF_GetFontAscent)(self.as_ptr()) }
    }

    /// Distance from baseline to the bottom, usually negative
    pub fn descent(&self) -> i32 {
        unsafe { (self.api().TTF_GetFontDescent)(self.as_ptr()) }
    }

    pub fn line_skip(&self) -> i32 {
        unsafe { (self.api().TTF_GetFontLineSkip)(self.as_ptr()) }
    }

    pub fn family_name(&self) -> Option<String> {
        unsafe { marshal::opt_string_from_ptr((self.api().TTF_GetFontFamilyName)(self.as_ptr())) }
    }

    pub fn style_name(&self) -> Option<String> {
        unsafe { marshal::opt_string_from_ptr((self.api().TTF_GetFontStyleName)(self.as_ptr())) }
    }

    pub fn set_style(&mut self, style: FontStyleFlags) {
        unsafe { (self.api().TTF_SetFontStyle)(self.as_ptr(), style.bits()) }
    }

    pub fn style(&self) -> FontStyleFlags {
        FontStyleFlags::from_bits(unsafe { (self.api().TTF_GetFontStyle)(self.as_ptr()) })
    }

    pub fn has_glyph(&self, ch: char) -> bool {
        marshal::decode_bool(unsafe { (self.api().TTF_FontHasGlyph)(self.as_ptr(), ch as u32) })
    }

    /// Rendered size of `text` without rendering it
    pub fn string_size(&self, text: &str) -> Result<(i32, i32)> {
        let mut ctx = MarshalContext::new();
        let c_text = ctx.c_str(text)?;
        let (mut w, mut h) = (0, 0);
        self.sdl().check(unsafe {
            (self.api().TTF_GetStringSize)(self.as_ptr(), c_text, text.len(), &mut w, &mut h)
        })?;
        Ok((w, h))
    }

    fn surface(&self, raw: *mut SDL_Surface) -> Result<Surface> {
        let raw = self.sdl().check_ptr(raw)?;
        Ok(unsafe { Surface::from_raw(self.sdl(), raw) })
    }

    /// Fast 8-bit render with a transparent background
    pub fn render_solid(&self, text: &str, fg: Color) -> Result<Surface> {
        let mut ctx = MarshalContext::new();
        let c_text = ctx.c_str(text)?;
        self.surface(unsafe { (self.api().TTF_RenderText_Solid)(self.as_ptr(), c_text, text.len(), fg) })
    }

    /// Antialiased 8-bit render over an opaque `bg`
    pub fn render_shaded(&self, text: &str, fg: Color, bg: Color) -> Result<Surface> {
        let mut ctx = MarshalContext::new();
        let c_text = ctx.c_str(text)?;
        self.surface(unsafe { (self.api().TTF_RenderText_Shaded)(self.as_ptr(), c_text, text.len(), fg, bg) })
    }

    /// Antialiased 32-bit ARGB render with alpha
    pub fn render_blended(&self, text: &str, fg: Color) -> Result<Surface> {
        let mut ctx = MarshalContext::new();
        let c_text = ctx.c_str(text)?;
        self.surface(unsafe { (self.api().TTF_RenderText_Blended)(self.as_ptr(), c_text, text.len(), fg) })
    }

    /// Like [`render_blended`](Self::render_blended), wrapping at
    /// `wrap_width` pixels (`0` wraps only on newlines)
    pub fn render_blended_wrapped(&self, text: &str, fg: Color, wrap_width: i32) -> Result<Surface> {
        let mut ctx = MarshalContext::new();
        let c_text = ctx.c_str(text)?;
        self.surface(unsafe {
            (self.api().TTF_RenderText_Blended_Wrapped)(self.as_ptr(), c_text, text.len(), fg, wrap_width)
        })
    }
}

impl Drop for Font {
    fn drop(&mut self) {
        unsafe { (self.api().TTF_CloseFont)(self.raw.as_ptr()) }
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font").field("raw", &self.raw).finish()
    }
}
