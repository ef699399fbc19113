//! 2D accelerated rendering
//!
//! A [`Texture`] borrows the [`Renderer`] that created it: the native
//! renderer frees its textures when destroyed, so none may outlive it.

use crate::error::Result;
use crate::ffi::marshal::{self, MarshalContext};
use crate::pixels::{BlendMode, Color, FColor, PixelFormat};
use crate::rect::{opt_ptr, FPoint, FRect, Rect};
use crate::sdl::Sdl;
use crate::surface::{FlipMode, Surface};
use crate::sys::{SDL_Renderer, SDL_Texture, SDL_Window};
use crate::video::{Window, WindowFlags};
use std::ffi::c_int;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

/// Vertical sync setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VSync {
    Disabled,
    Adaptive,
    /// Present every n-th vertical refresh
    EveryN(i32),
}

impl VSync {
    const ADAPTIVE: c_int = -1;

    fn to_raw(self) -> c_int {
        match self {
            VSync::Disabled => 0,
            VSync::Adaptive => Self::ADAPTIVE,
            VSync::EveryN(n) => n,
        }
    }

    fn from_raw(value: c_int) -> Self {
        match value {
            0 => VSync::Disabled,
            Self::ADAPTIVE => VSync::Adaptive,
            n => VSync::EveryN(n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TextureAccess {
    /// Rarely changes, not lockable
    Static = 0,
    Streaming = 1,
    /// Usable as a render target
    Target = 2,
}

/// Owned renderer
pub struct Renderer {
    sdl: Sdl,
    raw: NonNull<SDL_Renderer>,
}

impl Renderer {
    pub fn as_ptr(&self) -> *mut SDL_Renderer {
        self.raw.as_ptr()
    }

    fn check(&self, ok: u8) -> Result<()> {
        self.sdl.check(ok)
    }

    pub fn name(&self) -> Result<String> {
        let name = self.sdl.check_const_ptr(unsafe { (self.sdl.api().SDL_GetRendererName)(self.as_ptr()) })?;
        Ok(unsafe { marshal::string_from_ptr(name) })
    }

    pub fn set_draw_color(&self, color: Color) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_SetRenderDrawColor)(self.as_ptr(), color.r, color.g, color.b, color.a) })
    }

    pub fn set_draw_color_float(&self, color: FColor) -> Result<()> {
        self.check(unsafe {
            (self.sdl.api().SDL_SetRenderDrawColorFloat)(self.as_ptr(), color.r, color.g, color.b, color.a)
        })
    }

    pub fn draw_color(&self) -> Result<Color> {
        let mut c = Color::default();
        self.check(unsafe {
            (self.sdl.api().SDL_GetRenderDrawColor)(self.as_ptr(), &mut c.r, &mut c.g, &mut c.b, &mut c.a)
        })?;
        Ok(c)
    }

    /// Fill the target with the draw colour, ignoring the clip rect
    pub fn clear(&self) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_RenderClear)(self.as_ptr()) })
    }

    pub fn present(&self) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_RenderPresent)(self.as_ptr()) })
    }

    pub fn draw_point(&self, p: FPoint) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_RenderPoint)(self.as_ptr(), p.x, p.y) })
    }

    pub fn draw_line(&self, a: FPoint, b: FPoint) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_RenderLine)(self.as_ptr(), a.x, a.y, b.x, b.y) })
    }

    /// Connected line strip through `points`
    pub fn draw_lines(&self, points: &[FPoint]) -> Result<()> {
        let count = marshal::len_to_c_int(points.len())?;
        self.check(unsafe { (self.sdl.api().SDL_RenderLines)(self.as_ptr(), points.as_ptr(), count) })
    }

    /// Outline `rect`, or the whole target when `None`
    pub fn draw_rect(&self, rect: Option<&FRect>) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_RenderRect)(self.as_ptr(), opt_ptr(rect)) })
    }

    pub fn fill_rect(&self, rect: Option<&FRect>) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_RenderFillRect)(self.as_ptr(), opt_ptr(rect)) })
    }

    pub fn draw_rects(&self, rects: &[FRect]) -> Result<()> {
        let count = marshal::len_to_c_int(rects.len())?;
        self.check(unsafe { (self.sdl.api().SDL_RenderRects)(self.as_ptr(), rects.as_ptr(), count) })
    }

    pub fn fill_rects(&self, rects: &[FRect]) -> Result<()> {
        let count = marshal::len_to_c_int(rects.len())?;
        self.check(unsafe { (self.sdl.api().SDL_RenderFillRects)(self.as_ptr(), rects.as_ptr(), count) })
    }

    /// Draw `text` with the built-in 8x8 bitmap font
    pub fn debug_text(&self, x: f32, y: f32, text: &str) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let text = ctx.c_str(text)?;
        self.check(unsafe { (self.sdl.api().SDL_RenderDebugText)(self.as_ptr(), x, y, text) })
    }

    pub fn set_vsync(&self, vsync: VSync) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_SetRenderVSync)(self.as_ptr(), vsync.to_raw()) })
    }

    pub fn vsync(&self) -> Result<VSync> {
        let mut value: c_int = 0;
        self.check(unsafe { (self.sdl.api().SDL_GetRenderVSync)(self.as_ptr(), &mut value) })?;
        Ok(VSync::from_raw(value))
    }

    pub fn set_scale(&self, x: f32, y: f32) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_SetRenderScale)(self.as_ptr(), x, y) })
    }

    /// Output size in pixels
    pub fn output_size(&self) -> Result<(i32, i32)> {
        let (mut w, mut h) = (0, 0);
        self.check(unsafe { (self.sdl.api().SDL_GetRenderOutputSize)(self.as_ptr(), &mut w, &mut h) })?;
        Ok((w, h))
    }

    /// Render into `texture` (created with [`TextureAccess::Target`]), or back
    /// to the window when `None`
    pub fn set_target(&self, texture: Option<&Texture<'_>>) -> Result<()> {
        let texture = texture.map_or(ptr::null_mut(), |t| t.as_ptr());
        self.check(unsafe { (self.sdl.api().SDL_SetRenderTarget)(self.as_ptr(), texture) })
    }

    /// Copy pixels of the current target into a new surface; slow
    pub fn read_pixels(&self, rect: Option<&Rect>) -> Result<Surface> {
        let raw = self
            .sdl
            .check_ptr(unsafe { (self.sdl.api().SDL_RenderReadPixels)(self.as_ptr(), opt_ptr(rect)) })?;
        Ok(unsafe { Surface::from_raw(&self.sdl, raw) })
    }

    pub fn create_texture(&self, format: PixelFormat, access: TextureAccess, w: i32, h: i32) -> Result<Texture<'_>> {
        let raw = self.sdl.check_ptr(unsafe {
            (self.sdl.api().SDL_CreateTexture)(self.as_ptr(), format.0, access as c_int, w, h)
        })?;
        Ok(self.texture(raw))
    }

    pub fn create_texture_from_surface(&self, surface: &Surface) -> Result<Texture<'_>> {
        let raw = self
            .sdl
            .check_ptr(unsafe { (self.sdl.api().SDL_CreateTextureFromSurface)(self.as_ptr(), surface.as_ptr()) })?;
        Ok(self.texture(raw))
    }

    pub(crate) fn texture(&self, raw: NonNull<SDL_Texture>) -> Texture<'_> {
        Texture {
            sdl: self.sdl.clone(),
            raw,
            _renderer: PhantomData,
        }
    }

    /// Copy `src` of `texture` to `dst` of the target; `None` means the whole
    /// texture or target
    pub fn copy(&self, texture: &Texture<'_>, src: Option<&FRect>, dst: Option<&FRect>) -> Result<()> {
        self.check(unsafe {
            (self.sdl.api().SDL_RenderTexture)(self.as_ptr(), texture.as_ptr(), opt_ptr(src), opt_ptr(dst))
        })
    }

    /// Like [`copy`](Self::copy), rotated `angle` degrees clockwise around
    /// `center` (the centre of `dst` when `None`)
    pub fn copy_ex(
        &self,
        texture: &Texture<'_>,
        src: Option<&FRect>,
        dst: Option<&FRect>,
        angle: f64,
        center: Option<&FPoint>,
        flip: FlipMode,
    ) -> Result<()> {
        self.check(unsafe {
            (self.sdl.api().SDL_RenderTextureRotated)(
                self.as_ptr(),
                texture.as_ptr(),
                opt_ptr(src),
                opt_ptr(dst),
                angle,
                opt_ptr(center),
                flip as c_int,
            )
        })
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe { (self.sdl.api().SDL_DestroyRenderer)(self.raw.as_ptr()) }
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer").field("raw", &self.raw).finish()
    }
}

/// Texture owned by a renderer
pub struct Texture<'r> {
    sdl: Sdl,
    raw: NonNull<SDL_Texture>,
    _renderer: PhantomData<&'r Renderer>,
}

impl Texture<'_> {
    pub fn as_ptr(&self) -> *mut SDL_Texture {
        self.raw.as_ptr()
    }

    fn raw(&self) -> &SDL_Texture {
        unsafe { self.raw.as_ref() }
    }

    pub fn format(&self) -> PixelFormat {
        PixelFormat(self.raw().format)
    }

    pub fn width(&self) -> i32 {
        self.raw().w
    }

    pub fn height(&self) -> i32 {
        self.raw().h
    }

    pub fn size(&self) -> Result<(f32, f32)> {
        let (mut w, mut h) = (0.0, 0.0);
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_GetTextureSize)(self.as_ptr(), &mut w, &mut h) })?;
        Ok((w, h))
    }

    /// Replace `rect` (or all) of a static texture with `pixels`
    pub fn update(&mut self, rect: Option<&Rect>, pixels: &[u8], pitch: i32) -> Result<()> {
        let rows = rect.map_or(self.height(), |r| r.h);
        let needed = usize::try_from(rows)
            .ok()
            .zip(usize::try_from(pitch).ok())
            .and_then(|(rows, pitch)| rows.checked_mul(pitch));
        if needed.map_or(true, |needed| needed > pixels.len()) {
            return Err(marshal::MarshalError::LengthOutOfRange { len: pixels.len() }.into());
        }
        self.sdl.check(unsafe {
            (self.sdl.api().SDL_UpdateTexture)(self.as_ptr(), opt_ptr(rect), pixels.as_ptr().cast(), pitch)
        })
    }

    pub fn set_color_mod(&mut self, r: u8, g: u8, b: u8) -> Result<()> {
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_SetTextureColorMod)(self.as_ptr(), r, g, b) })
    }

    pub fn set_alpha_mod(&mut self, alpha: u8) -> Result<()> {
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_SetTextureAlphaMod)(self.as_ptr(), alpha) })
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) -> Result<()> {
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_SetTextureBlendMode)(self.as_ptr(), mode.0) })
    }
}

impl Drop for Texture<'_> {
    fn drop(&mut self) {
        unsafe { (self.sdl.api().SDL_DestroyTexture)(self.raw.as_ptr()) }
    }
}

impl fmt::Debug for Texture<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("format", &self.format())
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Sdl {
    pub fn render_drivers(&self) -> Vec<String> {
        self.driver_names(self.api().SDL_GetNumRenderDrivers, self.api().SDL_GetRenderDriver)
    }

    /// Create a renderer for `window`, letting the library pick a driver
    /// unless `driver` names one
    ///
    /// Drop the renderer before the window.
    pub fn create_renderer(&self, window: &Window, driver: Option<&str>) -> Result<Renderer> {
        let mut ctx = MarshalContext::new();
        let driver = ctx.c_str_or_null(driver)?;
        let raw = self.check_ptr(unsafe { (self.api().SDL_CreateRenderer)(window.as_ptr(), driver) })?;
        Ok(Renderer { sdl: self.clone(), raw })
    }

    /// Create a window and its renderer in one call
    pub fn create_window_and_renderer(
        &self,
        title: &str,
        w: i32,
        h: i32,
        flags: WindowFlags,
    ) -> Result<(Window, Renderer)> {
        let mut ctx = MarshalContext::new();
        let title = ctx.c_str(title)?;
        let mut window: *mut SDL_Window = ptr::null_mut();
        let mut renderer: *mut SDL_Renderer = ptr::null_mut();
        self.check(unsafe {
            (self.api().SDL_CreateWindowAndRenderer)(title, w, h, flags.bits(), &mut window, &mut renderer)
        })?;
        let window = self.check_ptr(window)?;
        let renderer = self.check_ptr(renderer)?;
        Ok((
            unsafe { Window::from_raw(self, window) },
            Renderer {
                sdl: self.clone(),
                raw: renderer,
            },
        ))
    }
}
