//! Displays and windows

use crate::error::Result;
use crate::ffi::callbacks::{self, CallbackHandle};
use crate::ffi::marshal::{self, MarshalContext};
use crate::pixels::PixelFormat;
use crate::properties::PropertiesRef;
use crate::rect::{Point, Rect};
use crate::sdl::Sdl;
use crate::surface::SurfaceRef;
use crate::sys::{SDL_DisplayID, SDL_HitTest, SDL_Window, SDL_WindowID};
use std::ffi::{c_int, c_void};
use std::fmt;
use std::mem::ManuallyDrop;
use std::ptr::NonNull;

crate::native_flags! {
    /// `SDL_WindowFlags`
    pub struct WindowFlags: u64 {
        const FULLSCREEN = 0x0000_0001;
        const OPENGL = 0x0000_0002;
        const OCCLUDED = 0x0000_0004;
        const HIDDEN = 0x0000_0008;
        const BORDERLESS = 0x0000_0010;
        const RESIZABLE = 0x0000_0020;
        const MINIMIZED = 0x0000_0040;
        const MAXIMIZED = 0x0000_0080;
        const MOUSE_GRABBED = 0x0000_0100;
        const INPUT_FOCUS = 0x0000_0200;
        const MOUSE_FOCUS = 0x0000_0400;
        const EXTERNAL = 0x0000_0800;
        const MODAL = 0x0000_1000;
        const HIGH_PIXEL_DENSITY = 0x0000_2000;
        const MOUSE_CAPTURE = 0x0000_4000;
        const MOUSE_RELATIVE_MODE = 0x0000_8000;
        const ALWAYS_ON_TOP = 0x0001_0000;
        const UTILITY = 0x0002_0000;
        const TOOLTIP = 0x0004_0000;
        const POPUP_MENU = 0x0008_0000;
        const KEYBOARD_GRABBED = 0x0010_0000;
        const VULKAN = 0x1000_0000;
        const METAL = 0x2000_0000;
        const TRANSPARENT = 0x4000_0000;
        const NOT_FOCUSABLE = 0x8000_0000;
    }
}

pub const WINDOWPOS_UNDEFINED_MASK: u32 = 0x1FFF_0000;
pub const WINDOWPOS_CENTERED_MASK: u32 = 0x2FFF_0000;
pub const WINDOWPOS_UNDEFINED: i32 = window_pos_undefined_display(0);
pub const WINDOWPOS_CENTERED: i32 = window_pos_centered_display(0);

/// Position value centring a window on `display`
pub const fn window_pos_centered_display(display: SDL_DisplayID) -> i32 {
    (WINDOWPOS_CENTERED_MASK | display) as i32
}

pub const fn window_pos_undefined_display(display: SDL_DisplayID) -> i32 {
    (WINDOWPOS_UNDEFINED_MASK | display) as i32
}

pub const fn window_pos_is_centered(pos: i32) -> bool {
    (pos as u32) & 0xFFFF_0000 == WINDOWPOS_CENTERED_MASK
}

/// `SDL_DisplayMode`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMode {
    pub display_id: SDL_DisplayID,
    pub format: PixelFormat,
    pub w: i32,
    pub h: i32,
    pub pixel_density: f32,
    pub refresh_rate: f32,
    pub refresh_rate_numerator: i32,
    pub refresh_rate_denominator: i32,
    internal: *mut c_void,
}

/// Result of a window hit test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum HitTestResult {
    Normal = 0,
    Draggable = 1,
    ResizeTopLeft = 2,
    ResizeTop = 3,
    ResizeTopRight = 4,
    ResizeRight = 5,
    ResizeBottomRight = 6,
    ResizeBottom = 7,
    ResizeBottomLeft = 8,
    ResizeLeft = 9,
}

type HitFn = Box<dyn Fn(NonNull<SDL_Window>, Point) -> c_int>;

/// Owned window
pub struct Window {
    sdl: Sdl,
    raw: NonNull<SDL_Window>,
    hit_test: Option<CallbackHandle<HitFn>>,
}

impl Window {
    /// Take ownership of a native window
    ///
    /// # Safety
    ///
    /// `raw` must be a live window created through `sdl` and not owned by
    /// another handle.
    pub unsafe fn from_raw(sdl: &Sdl, raw: NonNull<SDL_Window>) -> Self {
        Self {
            sdl: sdl.clone(),
            raw,
            hit_test: None,
        }
    }

    /// Release ownership; the caller must destroy the window
    ///
    /// Fails while a hit-test callback is installed.
    pub fn into_raw(self) -> std::result::Result<NonNull<SDL_Window>, Self> {
        if self.hit_test.is_some() {
            return Err(self);
        }
        let this = ManuallyDrop::new(self);
        // Safety: `this` is never dropped, so `sdl` is moved out exactly once.
        drop(unsafe { std::ptr::read(&this.sdl) });
        Ok(this.raw)
    }

    pub fn as_ptr(&self) -> *mut SDL_Window {
        self.raw.as_ptr()
    }

    pub(crate) fn sdl(&self) -> &Sdl {
        &self.sdl
    }

    fn check(&self, ok: u8) -> Result<()> {
        self.sdl.check(ok)
    }

    pub fn id(&self) -> Result<SDL_WindowID> {
        match unsafe { (self.sdl.api().SDL_GetWindowID)(self.as_ptr()) } {
            0 => Err(self.sdl.last_error()),
            id => Ok(id),
        }
    }

    pub fn flags(&self) -> WindowFlags {
        WindowFlags::from_bits(unsafe { (self.sdl.api().SDL_GetWindowFlags)(self.as_ptr()) })
    }

    pub fn set_title(&self, title: &str) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let title = ctx.c_str(title)?;
        self.check(unsafe { (self.sdl.api().SDL_SetWindowTitle)(self.as_ptr(), title) })
    }

    pub fn title(&self) -> String {
        unsafe { marshal::string_from_ptr((self.sdl.api().SDL_GetWindowTitle)(self.as_ptr())) }
    }

    pub fn set_size(&self, w: i32, h: i32) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_SetWindowSize)(self.as_ptr(), w, h) })
    }

    /// Client area size in window coordinates
    pub fn size(&self) -> Result<(i32, i32)> {
        let (mut w, mut h) = (0, 0);
        self.check(unsafe { (self.sdl.api().SDL_GetWindowSize)(self.as_ptr(), &mut w, &mut h) })?;
        Ok((w, h))
    }

    pub fn size_in_pixels(&self) -> Result<(i32, i32)> {
        let (mut w, mut h) = (0, 0);
        self.check(unsafe { (self.sdl.api().SDL_GetWindowSizeInPixels)(self.as_ptr(), &mut w, &mut h) })?;
        Ok((w, h))
    }

    pub fn set_position(&self, x: i32, y: i32) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_SetWindowPosition)(self.as_ptr(), x, y) })
    }

    pub fn position(&self) -> Result<(i32, i32)> {
        let (mut x, mut y) = (0, 0);
        self.check(unsafe { (self.sdl.api().SDL_GetWindowPosition)(self.as_ptr(), &mut x, &mut y) })?;
        Ok((x, y))
    }

    pub fn show(&self) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_ShowWindow)(self.as_ptr()) })
    }

    pub fn hide(&self) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_HideWindow)(self.as_ptr()) })
    }

    pub fn raise(&self) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_RaiseWindow)(self.as_ptr()) })
    }

    pub fn maximize(&self) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_MaximizeWindow)(self.as_ptr()) })
    }

    pub fn minimize(&self) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_MinimizeWindow)(self.as_ptr()) })
    }

    pub fn restore(&self) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_RestoreWindow)(self.as_ptr()) })
    }

    pub fn set_resizable(&self, resizable: bool) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_SetWindowResizable)(self.as_ptr(), marshal::encode_bool(resizable)) })
    }

    pub fn set_bordered(&self, bordered: bool) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_SetWindowBordered)(self.as_ptr(), marshal::encode_bool(bordered)) })
    }

    pub fn set_fullscreen(&self, fullscreen: bool) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_SetWindowFullscreen)(self.as_ptr(), marshal::encode_bool(fullscreen)) })
    }

    /// Opacity in `0.0..=1.0`; values outside are clamped natively
    pub fn set_opacity(&self, opacity: f32) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_SetWindowOpacity)(self.as_ptr(), opacity) })
    }

    pub fn opacity(&self) -> Result<f32> {
        let opacity = unsafe { (self.sdl.api().SDL_GetWindowOpacity)(self.as_ptr()) };
        if opacity < 0.0 {
            Err(self.sdl.last_error())
        } else {
            Ok(opacity)
        }
    }

    pub fn display_scale(&self) -> Result<f32> {
        positive_or_error(&self.sdl, unsafe { (self.sdl.api().SDL_GetWindowDisplayScale)(self.as_ptr()) })
    }

    pub fn pixel_density(&self) -> Result<f32> {
        positive_or_error(&self.sdl, unsafe { (self.sdl.api().SDL_GetWindowPixelDensity)(self.as_ptr()) })
    }

    /// Display containing the window's centre
    pub fn display(&self) -> Result<SDL_DisplayID> {
        match unsafe { (self.sdl.api().SDL_GetDisplayForWindow)(self.as_ptr()) } {
            0 => Err(self.sdl.last_error()),
            id => Ok(id),
        }
    }

    pub fn properties(&self) -> Result<PropertiesRef> {
        let id = unsafe { (self.sdl.api().SDL_GetWindowProperties)(self.as_ptr()) };
        self.sdl.borrowed_properties(id)
    }

    /// Install a hit test deciding which areas drag or resize a borderless
    /// window; replaces any previous one
    pub fn set_hit_test<F>(&mut self, hit_test: F) -> Result<()>
    where
        F: Fn(Point) -> HitTestResult + 'static,
    {
        let callback: HitFn = Box::new(move |_: NonNull<SDL_Window>, area: Point| hit_test(area) as c_int);
        let handle = CallbackHandle::new(callback);
        let trampoline: SDL_HitTest = callbacks::hit_test::<HitFn>;
        self.check(unsafe { (self.sdl.api().SDL_SetWindowHitTest)(self.as_ptr(), Some(trampoline), handle.userdata()) })?;
        self.hit_test = Some(handle);
        Ok(())
    }

    pub fn clear_hit_test(&mut self) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_SetWindowHitTest)(self.as_ptr(), None, std::ptr::null_mut()) })?;
        self.hit_test = None;
        Ok(())
    }

    /// Software framebuffer for the window; valid until the window resizes
    pub fn surface(&mut self) -> Result<SurfaceRef<'_>> {
        let raw = self.sdl.check_ptr(unsafe { (self.sdl.api().SDL_GetWindowSurface)(self.as_ptr()) })?;
        Ok(unsafe { SurfaceRef::borrowed(&self.sdl, raw) })
    }

    /// Copy the window surface to the screen
    pub fn update_surface(&self) -> Result<()> {
        self.check(unsafe { (self.sdl.api().SDL_UpdateWindowSurface)(self.as_ptr()) })
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        unsafe { (self.sdl.api().SDL_DestroyWindow)(self.raw.as_ptr()) }
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("raw", &self.raw)
            .field("hit_test", &self.hit_test.is_some())
            .finish()
    }
}

fn positive_or_error(sdl: &Sdl, value: f32) -> Result<f32> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(sdl.last_error())
    }
}

impl Sdl {
    pub fn video_drivers(&self) -> Vec<String> {
        self.driver_names(self.api().SDL_GetNumVideoDrivers, self.api().SDL_GetVideoDriver)
    }

    pub fn current_video_driver(&self) -> Option<String> {
        unsafe { marshal::opt_string_from_ptr((self.api().SDL_GetCurrentVideoDriver)()) }
    }

    pub fn displays(&self) -> Result<Vec<SDL_DisplayID>> {
        let mut count: c_int = 0;
        let list = unsafe { (self.api().SDL_GetDisplays)(&mut count) };
        self.take_list(list, count)
    }

    pub fn primary_display(&self) -> Result<SDL_DisplayID> {
        match unsafe { (self.api().SDL_GetPrimaryDisplay)() } {
            0 => Err(self.last_error()),
            id => Ok(id),
        }
    }

    pub fn display_name(&self, display: SDL_DisplayID) -> Result<String> {
        let name = self.check_const_ptr(unsafe { (self.api().SDL_GetDisplayName)(display) })?;
        Ok(unsafe { marshal::string_from_ptr(name) })
    }

    pub fn display_bounds(&self, display: SDL_DisplayID) -> Result<Rect> {
        let mut rect = Rect::default();
        self.check(unsafe { (self.api().SDL_GetDisplayBounds)(display, &mut rect) })?;
        Ok(rect)
    }

    /// Bounds minus taskbars, docks and menu bars
    pub fn display_usable_bounds(&self, display: SDL_DisplayID) -> Result<Rect> {
        let mut rect = Rect::default();
        self.check(unsafe { (self.api().SDL_GetDisplayUsableBounds)(display, &mut rect) })?;
        Ok(rect)
    }

    pub fn display_content_scale(&self, display: SDL_DisplayID) -> Result<f32> {
        positive_or_error(self, unsafe { (self.api().SDL_GetDisplayContentScale)(display) })
    }

    /// Copy of the current mode; the native struct stays owned by the library
    pub fn current_display_mode(&self, display: SDL_DisplayID) -> Result<DisplayMode> {
        let mode = self.check_const_ptr(unsafe { (self.api().SDL_GetCurrentDisplayMode)(display) })?;
        Ok(unsafe { *mode })
    }

    pub fn desktop_display_mode(&self, display: SDL_DisplayID) -> Result<DisplayMode> {
        let mode = self.check_const_ptr(unsafe { (self.api().SDL_GetDesktopDisplayMode)(display) })?;
        Ok(unsafe { *mode })
    }

    /// Every fullscreen mode, best first; copied and the native array released
    pub fn fullscreen_display_modes(&self, display: SDL_DisplayID) -> Result<Vec<DisplayMode>> {
        let mut count: c_int = 0;
        let list = unsafe { (self.api().SDL_GetFullscreenDisplayModes)(display, &mut count) };
        Ok(self.take_pointer_list(list, count)?.into_iter().flatten().collect())
    }

    pub fn create_window(&self, title: &str, w: i32, h: i32, flags: WindowFlags) -> Result<Window> {
        let mut ctx = MarshalContext::new();
        let title = ctx.c_str(title)?;
        let raw = self.check_ptr(unsafe { (self.api().SDL_CreateWindow)(title, w, h, flags.bits()) })?;
        tracing::debug!(w, h, flags = ?flags, "window created");
        Ok(unsafe { Window::from_raw(self, raw) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn test_centered_position() {
        assert_eq!(WINDOWPOS_CENTERED as u32, 0x2FFF_0000);
        assert_eq!(window_pos_centered_display(2) as u32, 0x2FFF_0002);
        assert!(window_pos_is_centered(window_pos_centered_display(5)));
        assert!(!window_pos_is_centered(WINDOWPOS_UNDEFINED));
        assert!(!window_pos_is_centered(100));
    }

    #[test]
    fn test_window_flags_are_u64() {
        let flags = WindowFlags::RESIZABLE | WindowFlags::NOT_FOCUSABLE;
        assert_eq!(flags.bits(), 0x8000_0020u64);
        assert!(flags.contains(WindowFlags::NOT_FOCUSABLE));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_display_mode_layout() {
        assert_eq!(offset_of!(DisplayMode, pixel_density), 16);
        assert_eq!(offset_of!(DisplayMode, refresh_rate_denominator), 28);
        assert_eq!(size_of::<DisplayMode>(), 40);
    }
}
