//! Software surfaces
//!
//! [`Surface`] owns a native surface and destroys it on drop. Surfaces the
//! library owns (a window's framebuffer, the alternate images of a surface)
//! are handed out as [`SurfaceRef`], which never destroys anything.

use crate::error::Result;
use crate::ffi::marshal::{self, MarshalContext};
use crate::pixels::{BlendMode, Color, FColor, PixelFormat};
use crate::rect::{opt_ptr, Rect};
use crate::sdl::Sdl;
use crate::sys::SDL_Surface;
use std::ffi::c_int;
use std::fmt;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::ptr::NonNull;

crate::native_flags! {
    /// `SDL_SurfaceFlags`
    pub struct SurfaceFlags: u32 {
        /// Pixels were supplied by the caller
        const PREALLOCATED = 0x0000_0001;
        const LOCK_NEEDED = 0x0000_0002;
        const LOCKED = 0x0000_0004;
        const SIMD_ALIGNED = 0x0000_0008;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ScaleMode {
    #[default]
    Nearest = 0,
    Linear = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum FlipMode {
    #[default]
    None = 0,
    Horizontal = 1,
    Vertical = 2,
}

/// Owned surface
pub struct Surface {
    sdl: Sdl,
    raw: NonNull<SDL_Surface>,
}

impl Surface {
    /// Take ownership of a native surface
    ///
    /// # Safety
    ///
    /// `raw` must be a live surface created through `sdl` whose destruction
    /// is now the caller's responsibility to hand over.
    pub unsafe fn from_raw(sdl: &Sdl, raw: NonNull<SDL_Surface>) -> Self {
        Self { sdl: sdl.clone(), raw }
    }

    /// Release ownership without destroying the surface
    pub fn into_raw(self) -> NonNull<SDL_Surface> {
        let this = ManuallyDrop::new(self);
        // Safety: `this` is never dropped, so `sdl` is moved out exactly once.
        drop(unsafe { std::ptr::read(&this.sdl) });
        this.raw
    }

    pub fn as_ptr(&self) -> *mut SDL_Surface {
        self.raw.as_ptr()
    }

    fn raw(&self) -> &SDL_Surface {
        unsafe { self.raw.as_ref() }
    }

    pub fn width(&self) -> i32 {
        self.raw().w
    }

    pub fn height(&self) -> i32 {
        self.raw().h
    }

    /// Bytes per row, padding included
    pub fn pitch(&self) -> i32 {
        self.raw().pitch
    }

    pub fn format(&self) -> PixelFormat {
        PixelFormat(self.raw().format)
    }

    pub fn flags(&self) -> SurfaceFlags {
        SurfaceFlags::from_bits(self.raw().flags)
    }

    /// Pixels may only be touched between lock and unlock
    pub fn must_lock(&self) -> bool {
        self.flags().contains(SurfaceFlags::LOCK_NEEDED)
    }

    /// Lock the surface for direct pixel access
    pub fn lock(&mut self) -> Result<SurfaceLock<'_>> {
        self.sdl.check(unsafe { (self.sdl.api().SDL_LockSurface)(self.as_ptr()) })?;
        Ok(SurfaceLock { surface: self })
    }

    /// Fill `rect` (or the whole clip area) with a mapped pixel value
    pub fn fill_rect(&mut self, rect: Option<&Rect>, pixel: u32) -> Result<()> {
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_FillSurfaceRect)(self.as_ptr(), opt_ptr(rect), pixel) })
    }

    /// Fill with a colour expressed independently of the pixel format
    pub fn clear(&mut self, color: FColor) -> Result<()> {
        self.sdl.check(unsafe {
            (self.sdl.api().SDL_ClearSurface)(self.as_ptr(), color.r, color.g, color.b, color.a)
        })
    }

    /// Copy `src_rect` of `self` onto `dst` at `dst_rect`'s position
    pub fn blit(&self, src_rect: Option<&Rect>, dst: &mut Surface, dst_rect: Option<&Rect>) -> Result<()> {
        self.sdl.check(unsafe {
            (self.sdl.api().SDL_BlitSurface)(self.as_ptr(), opt_ptr(src_rect), dst.as_ptr(), opt_ptr(dst_rect))
        })
    }

    pub fn blit_scaled(
        &self,
        src_rect: Option<&Rect>,
        dst: &mut Surface,
        dst_rect: Option<&Rect>,
        mode: ScaleMode,
    ) -> Result<()> {
        self.sdl.check(unsafe {
            (self.sdl.api().SDL_BlitSurfaceScaled)(
                self.as_ptr(),
                opt_ptr(src_rect),
                dst.as_ptr(),
                opt_ptr(dst_rect),
                mode as c_int,
            )
        })
    }

    /// New surface with the pixels converted to `format`
    pub fn convert(&self, format: PixelFormat) -> Result<Surface> {
        let raw = self.sdl.check_ptr(unsafe { (self.sdl.api().SDL_ConvertSurface)(self.as_ptr(), format.0) })?;
        Ok(unsafe { Surface::from_raw(&self.sdl, raw) })
    }

    pub fn duplicate(&self) -> Result<Surface> {
        let raw = self.sdl.check_ptr(unsafe { (self.sdl.api().SDL_DuplicateSurface)(self.as_ptr()) })?;
        Ok(unsafe { Surface::from_raw(&self.sdl, raw) })
    }

    pub fn scale(&self, w: i32, h: i32, mode: ScaleMode) -> Result<Surface> {
        let raw = self
            .sdl
            .check_ptr(unsafe { (self.sdl.api().SDL_ScaleSurface)(self.as_ptr(), w, h, mode as c_int) })?;
        Ok(unsafe { Surface::from_raw(&self.sdl, raw) })
    }

    /// Flip in place
    pub fn flip(&mut self, mode: FlipMode) -> Result<()> {
        self.sdl.check(unsafe { (self.sdl.api().SDL_FlipSurface)(self.as_ptr(), mode as c_int) })
    }

    pub fn map_rgb(&self, r: u8, g: u8, b: u8) -> u32 {
        unsafe { (self.sdl.api().SDL_MapSurfaceRGB)(self.as_ptr(), r, g, b) }
    }

    pub fn map_rgba(&self, color: Color) -> u32 {
        unsafe { (self.sdl.api().SDL_MapSurfaceRGBA)(self.as_ptr(), color.r, color.g, color.b, color.a) }
    }

    /// Treat `key` as transparent when blitting; `None` disables the key
    pub fn set_color_key(&mut self, key: Option<u32>) -> Result<()> {
        let (enabled, key) = match key {
            Some(key) => (true, key),
            None => (false, 0),
        };
        self.sdl.check(unsafe {
            (self.sdl.api().SDL_SetSurfaceColorKey)(self.as_ptr(), marshal::encode_bool(enabled), key)
        })
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) -> Result<()> {
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_SetSurfaceBlendMode)(self.as_ptr(), mode.0) })
    }

    /// Alternate images (other resolutions of the same picture), the surface
    /// itself first
    pub fn images(&self) -> Result<Vec<SurfaceRef<'_>>> {
        let mut count: c_int = 0;
        let list = unsafe { (self.sdl.api().SDL_GetSurfaceImages)(self.as_ptr(), &mut count) };
        let images = self.sdl.take_list(list, count)?;
        Ok(images
            .into_iter()
            .filter_map(NonNull::new)
            .map(|raw| unsafe { SurfaceRef::borrowed(&self.sdl, raw) })
            .collect())
    }

    /// Write the surface as a BMP file
    pub fn save_bmp(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let path = ctx.c_str(&path.as_ref().to_string_lossy())?;
        self.sdl.check(unsafe { (self.sdl.api().SDL_SaveBMP)(self.as_ptr(), path) })
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        unsafe { (self.sdl.api().SDL_DestroySurface)(self.raw.as_ptr()) }
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("format", &self.format())
            .finish()
    }
}

/// Pixel access while a surface is locked
pub struct SurfaceLock<'a> {
    surface: &'a mut Surface,
}

impl SurfaceLock<'_> {
    fn len(&self) -> usize {
        let raw = self.surface.raw();
        usize::try_from(raw.pitch).unwrap_or(0) * usize::try_from(raw.h).unwrap_or(0)
    }

    pub fn pitch(&self) -> usize {
        usize::try_from(self.surface.pitch()).unwrap_or(0)
    }

    pub fn pixels(&self) -> &[u8] {
        let ptr = self.surface.raw().pixels;
        if ptr.is_null() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(ptr.cast::<u8>(), self.len()) }
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        let ptr = self.surface.raw().pixels;
        if ptr.is_null() {
            return &mut [];
        }
        unsafe { std::slice::from_raw_parts_mut(ptr.cast::<u8>(), self.len()) }
    }
}

impl Drop for SurfaceLock<'_> {
    fn drop(&mut self) {
        unsafe { (self.surface.sdl.api().SDL_UnlockSurface)(self.surface.as_ptr()) }
    }
}

/// A surface owned by something else, valid for `'a`
pub struct SurfaceRef<'a> {
    surface: ManuallyDrop<Surface>,
    _owner: PhantomData<&'a ()>,
}

impl SurfaceRef<'_> {
    /// # Safety
    ///
    /// `raw` must stay alive for the chosen lifetime.
    pub(crate) unsafe fn borrowed(sdl: &Sdl, raw: NonNull<SDL_Surface>) -> Self {
        Self {
            surface: ManuallyDrop::new(Surface::from_raw(sdl, raw)),
            _owner: PhantomData,
        }
    }
}

impl Deref for SurfaceRef<'_> {
    type Target = Surface;

    fn deref(&self) -> &Surface {
        &self.surface
    }
}

impl DerefMut for SurfaceRef<'_> {
    fn deref_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}

impl Drop for SurfaceRef<'_> {
    fn drop(&mut self) {
        let surface = unsafe { ManuallyDrop::take(&mut self.surface) };
        surface.into_raw();
    }
}

impl fmt::Debug for SurfaceRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SurfaceRef").field(&*self.surface).finish()
    }
}

/// A surface over caller-supplied pixels
///
/// The native surface is destroyed on drop; the pixel buffer stays borrowed
/// for as long as the surface exists.
pub struct PixelsSurface<'a> {
    surface: Surface,
    _pixels: PhantomData<&'a mut [u8]>,
}

impl Deref for PixelsSurface<'_> {
    type Target = Surface;

    fn deref(&self) -> &Surface {
        &self.surface
    }
}

impl DerefMut for PixelsSurface<'_> {
    fn deref_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}

impl fmt::Debug for PixelsSurface<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PixelsSurface").field(&self.surface).finish()
    }
}

/// Minimum buffer length for `h` rows of `pitch` bytes
fn required_len(h: i32, pitch: i32) -> Option<usize> {
    let h = usize::try_from(h).ok()?;
    let pitch = usize::try_from(pitch).ok()?;
    h.checked_mul(pitch)
}

impl Sdl {
    pub fn create_surface(&self, w: i32, h: i32, format: PixelFormat) -> Result<Surface> {
        let raw = self.check_ptr(unsafe { (self.api().SDL_CreateSurface)(w, h, format.0) })?;
        Ok(unsafe { Surface::from_raw(self, raw) })
    }

    /// Wrap an existing pixel buffer; `pixels` must hold `h` rows of `pitch`
    /// bytes
    pub fn create_surface_from<'a>(
        &self,
        w: i32,
        h: i32,
        format: PixelFormat,
        pixels: &'a mut [u8],
        pitch: i32,
    ) -> Result<PixelsSurface<'a>> {
        match required_len(h, pitch) {
            Some(needed) if needed <= pixels.len() => {}
            _ => {
                return Err(marshal::MarshalError::LengthOutOfRange { len: pixels.len() }.into());
            }
        }
        let raw = self.check_ptr(unsafe {
            (self.api().SDL_CreateSurfaceFrom)(w, h, format.0, pixels.as_mut_ptr().cast(), pitch)
        })?;
        Ok(PixelsSurface {
            surface: unsafe { Surface::from_raw(self, raw) },
            _pixels: PhantomData,
        })
    }

    pub fn load_bmp(&self, path: impl AsRef<Path>) -> Result<Surface> {
        let mut ctx = MarshalContext::new();
        let path = ctx.c_str(&path.as_ref().to_string_lossy())?;
        let raw = self.check_ptr(unsafe { (self.api().SDL_LoadBMP)(path) })?;
        Ok(unsafe { Surface::from_raw(self, raw) })
    }
}
