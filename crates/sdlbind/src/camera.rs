//! Cameras

use crate::error::Result;
use crate::ffi::marshal;
use crate::pixels::{Colorspace, PixelFormat};
use crate::properties::PropertiesRef;
use crate::rect::opt_ptr;
use crate::sdl::Sdl;
use crate::sys::{SDL_Camera, SDL_CameraID, SDL_Surface};
use std::ffi::c_int;
use std::fmt;
use std::ptr::NonNull;

/// `SDL_CameraSpec`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CameraSpec {
    pub format: PixelFormat,
    pub colorspace: Colorspace,
    pub width: i32,
    pub height: i32,
    pub framerate_numerator: i32,
    pub framerate_denominator: i32,
}

impl CameraSpec {
    /// Frames per second, `0.0` when the denominator is zero
    pub fn framerate(&self) -> f64 {
        if self.framerate_denominator == 0 {
            0.0
        } else {
            f64::from(self.framerate_numerator) / f64::from(self.framerate_denominator)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPosition {
    Unknown,
    FrontFacing,
    BackFacing,
}

impl CameraPosition {
    fn from_raw(value: c_int) -> Self {
        match value {
            1 => Self::FrontFacing,
            2 => Self::BackFacing,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPermission {
    Denied,
    Pending,
    Approved,
}

impl CameraPermission {
    fn from_raw(value: c_int) -> Self {
        match value {
            v if v < 0 => Self::Denied,
            0 => Self::Pending,
            _ => Self::Approved,
        }
    }
}

/// Open camera device
pub struct Camera {
    sdl: Sdl,
    raw: NonNull<SDL_Camera>,
}

impl Camera {
    pub fn id(&self) -> Result<SDL_CameraID> {
        match unsafe { (self.sdl.api().SDL_GetCameraID)(self.raw.as_ptr()) } {
            0 => Err(self.sdl.last_error()),
            id => Ok(id),
        }
    }

    /// Whether the user has granted access; frames arrive only once approved
    pub fn permission_state(&self) -> CameraPermission {
        CameraPermission::from_raw(unsafe { (self.sdl.api().SDL_GetCameraPermissionState)(self.raw.as_ptr()) })
    }

    /// Format frames are delivered in
    pub fn format(&self) -> Result<CameraSpec> {
        let mut spec = CameraSpec::default();
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_GetCameraFormat)(self.raw.as_ptr(), &mut spec) })?;
        Ok(spec)
    }

    pub fn properties(&self) -> Result<PropertiesRef> {
        let id = unsafe { (self.sdl.api().SDL_GetCameraProperties)(self.raw.as_ptr()) };
        self.sdl.borrowed_properties(id)
    }

    /// Next frame, `None` if none is ready yet
    ///
    /// The frame is released back to the camera when the guard drops.
    pub fn acquire_frame(&mut self) -> Option<CameraFrame<'_>> {
        let mut timestamp_ns: u64 = 0;
        let surface = unsafe { (self.sdl.api().SDL_AcquireCameraFrame)(self.raw.as_ptr(), &mut timestamp_ns) };
        NonNull::new(surface).map(|surface| CameraFrame {
            camera: self,
            surface,
            timestamp_ns,
        })
    }

    pub fn as_ptr(&self) -> *mut SDL_Camera {
        self.raw.as_ptr()
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        unsafe { (self.sdl.api().SDL_CloseCamera)(self.raw.as_ptr()) }
    }
}

impl fmt::Debug for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Camera").field("raw", &self.raw).finish()
    }
}

/// A frame borrowed from a camera
pub struct CameraFrame<'a> {
    camera: &'a Camera,
    surface: NonNull<SDL_Surface>,
    timestamp_ns: u64,
}

impl CameraFrame<'_> {
    fn raw(&self) -> &SDL_Surface {
        unsafe { self.surface.as_ref() }
    }

    /// Capture time in nanoseconds, `0` if the driver does not report one
    pub fn timestamp_ns(&self) -> u64 {
        self.timestamp_ns
    }

    pub fn width(&self) -> i32 {
        self.raw().w
    }

    pub fn height(&self) -> i32 {
        self.raw().h
    }

    pub fn pitch(&self) -> i32 {
        self.raw().pitch
    }

    pub fn format(&self) -> PixelFormat {
        PixelFormat(self.raw().format)
    }

    /// Pixel rows, `pitch * height` bytes
    pub fn pixels(&self) -> &[u8] {
        let raw = self.raw();
        let len = usize::try_from(raw.pitch).unwrap_or(0) * usize::try_from(raw.h).unwrap_or(0);
        if raw.pixels.is_null() || len == 0 {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(raw.pixels.cast::<u8>(), len) }
    }

    pub fn as_ptr(&self) -> *mut SDL_Surface {
        self.surface.as_ptr()
    }
}

impl Drop for CameraFrame<'_> {
    fn drop(&mut self) {
        let camera = self.camera;
        unsafe { (camera.sdl.api().SDL_ReleaseCameraFrame)(camera.raw.as_ptr(), self.surface.as_ptr()) }
    }
}

impl fmt::Debug for CameraFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraFrame")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("format", &self.format())
            .field("timestamp_ns", &self.timestamp_ns)
            .finish()
    }
}

impl Sdl {
    pub fn camera_drivers(&self) -> Vec<String> {
        self.driver_names(self.api().SDL_GetNumCameraDrivers, self.api().SDL_GetCameraDriver)
    }

    pub fn current_camera_driver(&self) -> Option<String> {
        unsafe { marshal::opt_string_from_ptr((self.api().SDL_GetCurrentCameraDriver)()) }
    }

    pub fn cameras(&self) -> Result<Vec<SDL_CameraID>> {
        let mut count: c_int = 0;
        let list = unsafe { (self.api().SDL_GetCameras)(&mut count) };
        self.take_list(list, count)
    }

    /// Formats the device can deliver; every entry is copied and the native
    /// array released
    pub fn camera_supported_formats(&self, camera: SDL_CameraID) -> Result<Vec<CameraSpec>> {
        let mut count: c_int = 0;
        let list = unsafe { (self.api().SDL_GetCameraSupportedFormats)(camera, &mut count) };
        Ok(self.take_pointer_list(list, count)?.into_iter().flatten().collect())
    }

    pub fn camera_name(&self, camera: SDL_CameraID) -> Result<String> {
        let name = self.check_const_ptr(unsafe { (self.api().SDL_GetCameraName)(camera) })?;
        Ok(unsafe { marshal::string_from_ptr(name) })
    }

    pub fn camera_position(&self, camera: SDL_CameraID) -> CameraPosition {
        CameraPosition::from_raw(unsafe { (self.api().SDL_GetCameraPosition)(camera) })
    }

    /// Open a camera, optionally asking for a specific format
    pub fn open_camera(&self, camera: SDL_CameraID, spec: Option<&CameraSpec>) -> Result<Camera> {
        let raw = self.check_ptr(unsafe { (self.api().SDL_OpenCamera)(camera, opt_ptr(spec)) })?;
        Ok(Camera { sdl: self.clone(), raw })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::mem::size_of;

    #[test]
    fn test_spec_layout() {
        assert_eq!(size_of::<CameraSpec>(), 24);
    }

    #[rstest]
    #[case(30, 1, 30.0)]
    #[case(30000, 1001, 29.97002997002997)]
    #[case(5, 0, 0.0)]
    fn test_framerate(#[case] num: i32, #[case] den: i32, #[case] expected: f64) {
        let spec = CameraSpec {
            framerate_numerator: num,
            framerate_denominator: den,
            ..Default::default()
        };
        assert!((spec.framerate() - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case(-1, CameraPermission::Denied)]
    #[case(0, CameraPermission::Pending)]
    #[case(1, CameraPermission::Approved)]
    fn test_permission_mapping(#[case] raw: c_int, #[case] expected: CameraPermission) {
        assert_eq!(CameraPermission::from_raw(raw), expected);
    }
}
