//! Raw native declarations
//!
//! Opaque handle types, the public-layout structs the native headers expose,
//! callback signatures and the [`SdlApi`] symbol table. Everything here
//! mirrors the C ABI exactly: booleans are `u8`, enums are `c_int` or the
//! fixed-width integer the header declares.

#![allow(non_camel_case_types)]

use crate::audio::AudioSpec;
use crate::camera::CameraSpec;
use crate::dialog::RawDialogFileFilter;
use crate::events::RawEvent;
use crate::gamepad::RawGamepadBinding;
use crate::locale::RawLocale;
use crate::messagebox::RawMessageBoxData;
use crate::pixels::{Color, PixelFormatDetails};
use crate::rect::{FPoint, FRect, Point, Rect};
use crate::video::DisplayMode;
use std::ffi::{c_char, c_int, c_void};

macro_rules! opaque {
    ($($(#[$meta:meta])* $name:ident;)*) => {
        $(
            $(#[$meta])*
            #[repr(C)]
            pub struct $name {
                _private: [u8; 0],
                _marker: ::std::marker::PhantomData<(*mut u8, ::std::marker::PhantomPinned)>,
            }
        )*
    };
}

opaque! {
    SDL_Window;
    SDL_Renderer;
    SDL_AudioStream;
    SDL_Camera;
    SDL_Cursor;
    SDL_IOStream;
    SDL_Joystick;
    SDL_Gamepad;
}

pub type SDL_DisplayID = u32;
pub type SDL_WindowID = u32;
pub type SDL_AudioDeviceID = u32;
pub type SDL_CameraID = u32;
pub type SDL_PropertiesID = u32;
pub type SDL_JoystickID = u32;
pub type SDL_KeyboardID = u32;
pub type SDL_MouseID = u32;
pub type SDL_SensorID = u32;
pub type SDL_PenID = u32;
pub type SDL_TouchID = u64;
pub type SDL_FingerID = u64;
pub type SDL_Keycode = u32;
pub type SDL_Scancode = c_int;
pub type SDL_Keymod = u16;

/// `struct SDL_Surface` (public fields)
#[repr(C)]
#[derive(Debug)]
pub struct SDL_Surface {
    pub flags: u32,
    pub format: u32,
    pub w: c_int,
    pub h: c_int,
    pub pitch: c_int,
    pub pixels: *mut c_void,
    pub refcount: c_int,
    pub reserved: *mut c_void,
}

/// `struct SDL_Texture` (public fields)
#[repr(C)]
#[derive(Debug)]
pub struct SDL_Texture {
    pub format: u32,
    pub w: c_int,
    pub h: c_int,
    pub refcount: c_int,
}

/// `struct SDL_Palette`
#[repr(C)]
#[derive(Debug)]
pub struct SDL_Palette {
    pub ncolors: c_int,
    pub colors: *mut Color,
    pub version: u32,
    pub refcount: c_int,
}

pub type SDL_EventFilter = unsafe extern "C" fn(userdata: *mut c_void, event: *mut RawEvent) -> u8;
pub type SDL_AudioStreamCallback = unsafe extern "C" fn(
    userdata: *mut c_void,
    stream: *mut SDL_AudioStream,
    additional_amount: c_int,
    total_amount: c_int,
);
pub type SDL_CleanupPropertyCallback = unsafe extern "C" fn(userdata: *mut c_void, value: *mut c_void);
pub type SDL_EnumeratePropertiesCallback =
    unsafe extern "C" fn(userdata: *mut c_void, props: SDL_PropertiesID, name: *const c_char);
pub type SDL_DialogFileCallback =
    unsafe extern "C" fn(userdata: *mut c_void, filelist: *const *const c_char, filter: c_int);
pub type SDL_HitTest =
    unsafe extern "C" fn(win: *mut SDL_Window, area: *const Point, data: *mut c_void) -> c_int;
pub type SDL_LogOutputFunction = unsafe extern "C" fn(
    userdata: *mut c_void,
    category: c_int,
    priority: c_int,
    message: *const c_char,
);

crate::native_api! {
    /// Resolved SDL3 entry points
    pub struct SdlApi {
        // init / version / hints / errors
        fn SDL_Init(u32) -> u8;
        fn SDL_InitSubSystem(u32) -> u8;
        fn SDL_Quit();
        fn SDL_QuitSubSystem(u32);
        fn SDL_WasInit(u32) -> u32;
        fn SDL_IsMainThread() -> u8;
        fn SDL_SetAppMetadata(*const c_char, *const c_char, *const c_char) -> u8;
        fn SDL_SetAppMetadataProperty(*const c_char, *const c_char) -> u8;
        fn SDL_GetAppMetadataProperty(*const c_char) -> *const c_char;
        fn SDL_GetVersion() -> c_int;
        fn SDL_GetRevision() -> *const c_char;
        fn SDL_SetHint(*const c_char, *const c_char) -> u8;
        fn SDL_SetHintWithPriority(*const c_char, *const c_char, c_int) -> u8;
        fn SDL_GetHint(*const c_char) -> *const c_char;
        fn SDL_ResetHint(*const c_char) -> u8;
        fn SDL_GetError() -> *const c_char;
        fn SDL_ClearError() -> u8;
        fn SDL_free(*mut c_void);

        // timer / platform / clipboard / filesystem
        fn SDL_GetTicks() -> u64;
        fn SDL_GetTicksNS() -> u64;
        fn SDL_Delay(u32);
        fn SDL_GetPerformanceCounter() -> u64;
        fn SDL_GetPerformanceFrequency() -> u64;
        fn SDL_GetPlatform() -> *const c_char;
        fn SDL_OpenURL(*const c_char) -> u8;
        fn SDL_SetClipboardText(*const c_char) -> u8;
        fn SDL_GetClipboardText() -> *mut c_char;
        fn SDL_HasClipboardText() -> u8;
        fn SDL_GetBasePath() -> *const c_char;
        fn SDL_GetPrefPath(*const c_char, *const c_char) -> *mut c_char;
        fn SDL_IOFromConstMem(*const c_void, usize) -> *mut SDL_IOStream;
        fn SDL_CloseIO(*mut SDL_IOStream) -> u8;

        // video
        fn SDL_GetNumVideoDrivers() -> c_int;
        fn SDL_GetVideoDriver(c_int) -> *const c_char;
        fn SDL_GetCurrentVideoDriver() -> *const c_char;
        fn SDL_GetDisplays(*mut c_int) -> *mut SDL_DisplayID;
        fn SDL_GetPrimaryDisplay() -> SDL_DisplayID;
        fn SDL_GetDisplayName(SDL_DisplayID) -> *const c_char;
        fn SDL_GetDisplayBounds(SDL_DisplayID, *mut Rect) -> u8;
        fn SDL_GetDisplayUsableBounds(SDL_DisplayID, *mut Rect) -> u8;
        fn SDL_GetDisplayContentScale(SDL_DisplayID) -> f32;
        fn SDL_GetCurrentDisplayMode(SDL_DisplayID) -> *const DisplayMode;
        fn SDL_GetDesktopDisplayMode(SDL_DisplayID) -> *const DisplayMode;
        fn SDL_GetFullscreenDisplayModes(SDL_DisplayID, *mut c_int) -> *mut *mut DisplayMode;
        fn SDL_GetDisplayForWindow(*mut SDL_Window) -> SDL_DisplayID;
        fn SDL_CreateWindow(*const c_char, c_int, c_int, u64) -> *mut SDL_Window;
        fn SDL_DestroyWindow(*mut SDL_Window);
        fn SDL_GetWindowID(*mut SDL_Window) -> SDL_WindowID;
        fn SDL_GetWindowFlags(*mut SDL_Window) -> u64;
        fn SDL_SetWindowTitle(*mut SDL_Window, *const c_char) -> u8;
        fn SDL_GetWindowTitle(*mut SDL_Window) -> *const c_char;
        fn SDL_SetWindowSize(*mut SDL_Window, c_int, c_int) -> u8;
        fn SDL_GetWindowSize(*mut SDL_Window, *mut c_int, *mut c_int) -> u8;
        fn SDL_GetWindowSizeInPixels(*mut SDL_Window, *mut c_int, *mut c_int) -> u8;
        fn SDL_SetWindowPosition(*mut SDL_Window, c_int, c_int) -> u8;
        fn SDL_GetWindowPosition(*mut SDL_Window, *mut c_int, *mut c_int) -> u8;
        fn SDL_ShowWindow(*mut SDL_Window) -> u8;
        fn SDL_HideWindow(*mut SDL_Window) -> u8;
        fn SDL_RaiseWindow(*mut SDL_Window) -> u8;
        fn SDL_MaximizeWindow(*mut SDL_Window) -> u8;
        fn SDL_MinimizeWindow(*mut SDL_Window) -> u8;
        fn SDL_RestoreWindow(*mut SDL_Window) -> u8;
        fn SDL_SetWindowResizable(*mut SDL_Window, u8) -> u8;
        fn SDL_SetWindowBordered(*mut SDL_Window, u8) -> u8;
        fn SDL_SetWindowFullscreen(*mut SDL_Window, u8) -> u8;
        fn SDL_SetWindowOpacity(*mut SDL_Window, f32) -> u8;
        fn SDL_GetWindowOpacity(*mut SDL_Window) -> f32;
        fn SDL_GetWindowDisplayScale(*mut SDL_Window) -> f32;
        fn SDL_GetWindowPixelDensity(*mut SDL_Window) -> f32;
        fn SDL_SetWindowHitTest(*mut SDL_Window, Option<SDL_HitTest>, *mut c_void) -> u8;
        fn SDL_GetWindowProperties(*mut SDL_Window) -> SDL_PropertiesID;
        fn SDL_GetWindowSurface(*mut SDL_Window) -> *mut SDL_Surface;
        fn SDL_UpdateWindowSurface(*mut SDL_Window) -> u8;

        // render
        fn SDL_GetNumRenderDrivers() -> c_int;
        fn SDL_GetRenderDriver(c_int) -> *const c_char;
        fn SDL_CreateWindowAndRenderer(
            *const c_char,
            c_int,
            c_int,
            u64,
            *mut *mut SDL_Window,
            *mut *mut SDL_Renderer
        ) -> u8;
        fn SDL_CreateRenderer(*mut SDL_Window, *const c_char) -> *mut SDL_Renderer;
        fn SDL_DestroyRenderer(*mut SDL_Renderer);
        fn SDL_GetRendererName(*mut SDL_Renderer) -> *const c_char;
        fn SDL_SetRenderDrawColor(*mut SDL_Renderer, u8, u8, u8, u8) -> u8;
        fn SDL_GetRenderDrawColor(*mut SDL_Renderer, *mut u8, *mut u8, *mut u8, *mut u8) -> u8;
        fn SDL_SetRenderDrawColorFloat(*mut SDL_Renderer, f32, f32, f32, f32) -> u8;
        fn SDL_RenderClear(*mut SDL_Renderer) -> u8;
        fn SDL_RenderPresent(*mut SDL_Renderer) -> u8;
        fn SDL_RenderPoint(*mut SDL_Renderer, f32, f32) -> u8;
        fn SDL_RenderLine(*mut SDL_Renderer, f32, f32, f32, f32) -> u8;
        fn SDL_RenderLines(*mut SDL_Renderer, *const FPoint, c_int) -> u8;
        fn SDL_RenderRect(*mut SDL_Renderer, *const FRect) -> u8;
        fn SDL_RenderFillRect(*mut SDL_Renderer, *const FRect) -> u8;
        fn SDL_RenderRects(*mut SDL_Renderer, *const FRect, c_int) -> u8;
        fn SDL_RenderFillRects(*mut SDL_Renderer, *const FRect, c_int) -> u8;
        fn SDL_RenderDebugText(*mut SDL_Renderer, f32, f32, *const c_char) -> u8;
        fn SDL_SetRenderVSync(*mut SDL_Renderer, c_int) -> u8;
        fn SDL_GetRenderVSync(*mut SDL_Renderer, *mut c_int) -> u8;
        fn SDL_SetRenderScale(*mut SDL_Renderer, f32, f32) -> u8;
        fn SDL_GetRenderOutputSize(*mut SDL_Renderer, *mut c_int, *mut c_int) -> u8;
        fn SDL_SetRenderTarget(*mut SDL_Renderer, *mut SDL_Texture) -> u8;
        fn SDL_RenderReadPixels(*mut SDL_Renderer, *const Rect) -> *mut SDL_Surface;
        fn SDL_CreateTexture(*mut SDL_Renderer, u32, c_int, c_int, c_int) -> *mut SDL_Texture;
        fn SDL_CreateTextureFromSurface(*mut SDL_Renderer, *mut SDL_Surface) -> *mut SDL_Texture;
        fn SDL_DestroyTexture(*mut SDL_Texture);
        fn SDL_GetTextureSize(*mut SDL_Texture, *mut f32, *mut f32) -> u8;
        fn SDL_UpdateTexture(*mut SDL_Texture, *const Rect, *const c_void, c_int) -> u8;
        fn SDL_SetTextureColorMod(*mut SDL_Texture, u8, u8, u8) -> u8;
        fn SDL_SetTextureAlphaMod(*mut SDL_Texture, u8) -> u8;
        fn SDL_SetTextureBlendMode(*mut SDL_Texture, u32) -> u8;
        fn SDL_RenderTexture(*mut SDL_Renderer, *mut SDL_Texture, *const FRect, *const FRect) -> u8;
        fn SDL_RenderTextureRotated(
            *mut SDL_Renderer,
            *mut SDL_Texture,
            *const FRect,
            *const FRect,
            f64,
            *const FPoint,
            c_int
        ) -> u8;

        // events
        fn SDL_PumpEvents();
        fn SDL_PollEvent(*mut RawEvent) -> u8;
        fn SDL_WaitEvent(*mut RawEvent) -> u8;
        fn SDL_WaitEventTimeout(*mut RawEvent, i32) -> u8;
        fn SDL_PushEvent(*mut RawEvent) -> u8;
        fn SDL_PeepEvents(*mut RawEvent, c_int, c_int, u32, u32) -> c_int;
        fn SDL_HasEvent(u32) -> u8;
        fn SDL_HasEvents(u32, u32) -> u8;
        fn SDL_FlushEvent(u32);
        fn SDL_FlushEvents(u32, u32);
        fn SDL_SetEventEnabled(u32, u8);
        fn SDL_EventEnabled(u32) -> u8;
        fn SDL_RegisterEvents(c_int) -> u32;
        fn SDL_SetEventFilter(Option<SDL_EventFilter>, *mut c_void);
        fn SDL_GetEventFilter(*mut Option<SDL_EventFilter>, *mut *mut c_void) -> u8;
        fn SDL_AddEventWatch(Option<SDL_EventFilter>, *mut c_void) -> u8;
        fn SDL_RemoveEventWatch(Option<SDL_EventFilter>, *mut c_void);
        fn SDL_FilterEvents(Option<SDL_EventFilter>, *mut c_void);

        // audio
        fn SDL_GetNumAudioDrivers() -> c_int;
        fn SDL_GetAudioDriver(c_int) -> *const c_char;
        fn SDL_GetCurrentAudioDriver() -> *const c_char;
        fn SDL_GetAudioPlaybackDevices(*mut c_int) -> *mut SDL_AudioDeviceID;
        fn SDL_GetAudioRecordingDevices(*mut c_int) -> *mut SDL_AudioDeviceID;
        fn SDL_GetAudioDeviceName(SDL_AudioDeviceID) -> *const c_char;
        fn SDL_GetAudioDeviceFormat(SDL_AudioDeviceID, *mut AudioSpec, *mut c_int) -> u8;
        fn SDL_OpenAudioDeviceStream(
            SDL_AudioDeviceID,
            *const AudioSpec,
            Option<SDL_AudioStreamCallback>,
            *mut c_void
        ) -> *mut SDL_AudioStream;
        fn SDL_CreateAudioStream(*const AudioSpec, *const AudioSpec) -> *mut SDL_AudioStream;
        fn SDL_DestroyAudioStream(*mut SDL_AudioStream);
        fn SDL_PutAudioStreamData(*mut SDL_AudioStream, *const c_void, c_int) -> u8;
        fn SDL_GetAudioStreamData(*mut SDL_AudioStream, *mut c_void, c_int) -> c_int;
        fn SDL_GetAudioStreamAvailable(*mut SDL_AudioStream) -> c_int;
        fn SDL_GetAudioStreamQueued(*mut SDL_AudioStream) -> c_int;
        fn SDL_FlushAudioStream(*mut SDL_AudioStream) -> u8;
        fn SDL_ClearAudioStream(*mut SDL_AudioStream) -> u8;
        fn SDL_PauseAudioStreamDevice(*mut SDL_AudioStream) -> u8;
        fn SDL_ResumeAudioStreamDevice(*mut SDL_AudioStream) -> u8;
        fn SDL_AudioStreamDevicePaused(*mut SDL_AudioStream) -> u8;
        fn SDL_GetAudioStreamFormat(*mut SDL_AudioStream, *mut AudioSpec, *mut AudioSpec) -> u8;
        fn SDL_SetAudioStreamGain(*mut SDL_AudioStream, f32) -> u8;
        fn SDL_GetAudioStreamGain(*mut SDL_AudioStream) -> f32;
        fn SDL_LoadWAV(*const c_char, *mut AudioSpec, *mut *mut u8, *mut u32) -> u8;

        // camera
        fn SDL_GetNumCameraDrivers() -> c_int;
        fn SDL_GetCameraDriver(c_int) -> *const c_char;
        fn SDL_GetCurrentCameraDriver() -> *const c_char;
        fn SDL_GetCameras(*mut c_int) -> *mut SDL_CameraID;
        fn SDL_GetCameraSupportedFormats(SDL_CameraID, *mut c_int) -> *mut *mut CameraSpec;
        fn SDL_GetCameraName(SDL_CameraID) -> *const c_char;
        fn SDL_GetCameraPosition(SDL_CameraID) -> c_int;
        fn SDL_OpenCamera(SDL_CameraID, *const CameraSpec) -> *mut SDL_Camera;
        fn SDL_CloseCamera(*mut SDL_Camera);
        fn SDL_GetCameraPermissionState(*mut SDL_Camera) -> c_int;
        fn SDL_GetCameraID(*mut SDL_Camera) -> SDL_CameraID;
        fn SDL_GetCameraFormat(*mut SDL_Camera, *mut CameraSpec) -> u8;
        fn SDL_GetCameraProperties(*mut SDL_Camera) -> SDL_PropertiesID;
        fn SDL_AcquireCameraFrame(*mut SDL_Camera, *mut u64) -> *mut SDL_Surface;
        fn SDL_ReleaseCameraFrame(*mut SDL_Camera, *mut SDL_Surface);

        // properties
        fn SDL_GetGlobalProperties() -> SDL_PropertiesID;
        fn SDL_CreateProperties() -> SDL_PropertiesID;
        fn SDL_DestroyProperties(SDL_PropertiesID);
        fn SDL_CopyProperties(SDL_PropertiesID, SDL_PropertiesID) -> u8;
        fn SDL_LockProperties(SDL_PropertiesID) -> u8;
        fn SDL_UnlockProperties(SDL_PropertiesID);
        fn SDL_SetPointerPropertyWithCleanup(
            SDL_PropertiesID,
            *const c_char,
            *mut c_void,
            Option<SDL_CleanupPropertyCallback>,
            *mut c_void
        ) -> u8;
        fn SDL_SetPointerProperty(SDL_PropertiesID, *const c_char, *mut c_void) -> u8;
        fn SDL_SetStringProperty(SDL_PropertiesID, *const c_char, *const c_char) -> u8;
        fn SDL_SetNumberProperty(SDL_PropertiesID, *const c_char, i64) -> u8;
        fn SDL_SetFloatProperty(SDL_PropertiesID, *const c_char, f32) -> u8;
        fn SDL_SetBooleanProperty(SDL_PropertiesID, *const c_char, u8) -> u8;
        fn SDL_HasProperty(SDL_PropertiesID, *const c_char) -> u8;
        fn SDL_GetPropertyType(SDL_PropertiesID, *const c_char) -> c_int;
        fn SDL_GetPointerProperty(SDL_PropertiesID, *const c_char, *mut c_void) -> *mut c_void;
        fn SDL_GetStringProperty(SDL_PropertiesID, *const c_char, *const c_char) -> *const c_char;
        fn SDL_GetNumberProperty(SDL_PropertiesID, *const c_char, i64) -> i64;
        fn SDL_GetFloatProperty(SDL_PropertiesID, *const c_char, f32) -> f32;
        fn SDL_GetBooleanProperty(SDL_PropertiesID, *const c_char, u8) -> u8;
        fn SDL_ClearProperty(SDL_PropertiesID, *const c_char) -> u8;
        fn SDL_EnumerateProperties(
            SDL_PropertiesID,
            Option<SDL_EnumeratePropertiesCallback>,
            *mut c_void
        ) -> u8;

        // dialog
        fn SDL_ShowOpenFileDialog(
            Option<SDL_DialogFileCallback>,
            *mut c_void,
            *mut SDL_Window,
            *const RawDialogFileFilter,
            c_int,
            *const c_char,
            u8
        );
        fn SDL_ShowSaveFileDialog(
            Option<SDL_DialogFileCallback>,
            *mut c_void,
            *mut SDL_Window,
            *const RawDialogFileFilter,
            c_int,
            *const c_char
        );
        fn SDL_ShowOpenFolderDialog(
            Option<SDL_DialogFileCallback>,
            *mut c_void,
            *mut SDL_Window,
            *const c_char,
            u8
        );

        // mouse
        fn SDL_HasMouse() -> u8;
        fn SDL_GetMice(*mut c_int) -> *mut SDL_MouseID;
        fn SDL_GetMouseNameForID(SDL_MouseID) -> *const c_char;
        fn SDL_GetMouseFocus() -> *mut SDL_Window;
        fn SDL_GetMouseState(*mut f32, *mut f32) -> u32;
        fn SDL_GetGlobalMouseState(*mut f32, *mut f32) -> u32;
        fn SDL_GetRelativeMouseState(*mut f32, *mut f32) -> u32;
        fn SDL_WarpMouseInWindow(*mut SDL_Window, f32, f32);
        fn SDL_WarpMouseGlobal(f32, f32) -> u8;
        fn SDL_SetWindowRelativeMouseMode(*mut SDL_Window, u8) -> u8;
        fn SDL_GetWindowRelativeMouseMode(*mut SDL_Window) -> u8;
        fn SDL_CaptureMouse(u8) -> u8;
        fn SDL_CreateSystemCursor(c_int) -> *mut SDL_Cursor;
        fn SDL_SetCursor(*mut SDL_Cursor) -> u8;
        fn SDL_GetCursor() -> *mut SDL_Cursor;
        fn SDL_DestroyCursor(*mut SDL_Cursor);
        fn SDL_ShowCursor() -> u8;
        fn SDL_HideCursor() -> u8;
        fn SDL_CursorVisible() -> u8;

        // keyboard
        fn SDL_HasKeyboard() -> u8;
        fn SDL_GetKeyboards(*mut c_int) -> *mut SDL_KeyboardID;
        fn SDL_GetKeyboardNameForID(SDL_KeyboardID) -> *const c_char;
        fn SDL_GetKeyboardFocus() -> *mut SDL_Window;
        fn SDL_GetKeyboardState(*mut c_int) -> *const u8;
        fn SDL_GetModState() -> SDL_Keymod;
        fn SDL_SetModState(SDL_Keymod);
        fn SDL_GetKeyFromScancode(SDL_Scancode, SDL_Keymod, u8) -> SDL_Keycode;
        fn SDL_GetScancodeFromKey(SDL_Keycode, *mut SDL_Keymod) -> SDL_Scancode;
        fn SDL_GetScancodeName(SDL_Scancode) -> *const c_char;
        fn SDL_GetScancodeFromName(*const c_char) -> SDL_Scancode;
        fn SDL_GetKeyName(SDL_Keycode) -> *const c_char;
        fn SDL_GetKeyFromName(*const c_char) -> SDL_Keycode;
        fn SDL_StartTextInput(*mut SDL_Window) -> u8;
        fn SDL_StopTextInput(*mut SDL_Window) -> u8;
        fn SDL_TextInputActive(*mut SDL_Window) -> u8;

        // surface
        fn SDL_CreateSurface(c_int, c_int, u32) -> *mut SDL_Surface;
        fn SDL_CreateSurfaceFrom(c_int, c_int, u32, *mut c_void, c_int) -> *mut SDL_Surface;
        fn SDL_DestroySurface(*mut SDL_Surface);
        fn SDL_LoadBMP(*const c_char) -> *mut SDL_Surface;
        fn SDL_SaveBMP(*mut SDL_Surface, *const c_char) -> u8;
        fn SDL_LockSurface(*mut SDL_Surface) -> u8;
        fn SDL_UnlockSurface(*mut SDL_Surface);
        fn SDL_FillSurfaceRect(*mut SDL_Surface, *const Rect, u32) -> u8;
        fn SDL_ClearSurface(*mut SDL_Surface, f32, f32, f32, f32) -> u8;
        fn SDL_BlitSurface(*mut SDL_Surface, *const Rect, *mut SDL_Surface, *const Rect) -> u8;
        fn SDL_BlitSurfaceScaled(
            *mut SDL_Surface,
            *const Rect,
            *mut SDL_Surface,
            *const Rect,
            c_int
        ) -> u8;
        fn SDL_ConvertSurface(*mut SDL_Surface, u32) -> *mut SDL_Surface;
        fn SDL_DuplicateSurface(*mut SDL_Surface) -> *mut SDL_Surface;
        fn SDL_ScaleSurface(*mut SDL_Surface, c_int, c_int, c_int) -> *mut SDL_Surface;
        fn SDL_FlipSurface(*mut SDL_Surface, c_int) -> u8;
        fn SDL_MapSurfaceRGB(*mut SDL_Surface, u8, u8, u8) -> u32;
        fn SDL_MapSurfaceRGBA(*mut SDL_Surface, u8, u8, u8, u8) -> u32;
        fn SDL_SetSurfaceColorKey(*mut SDL_Surface, u8, u32) -> u8;
        fn SDL_SetSurfaceBlendMode(*mut SDL_Surface, u32) -> u8;
        fn SDL_GetSurfaceImages(*mut SDL_Surface, *mut c_int) -> *mut *mut SDL_Surface;

        // pixels
        fn SDL_GetPixelFormatName(u32) -> *const c_char;
        fn SDL_GetPixelFormatDetails(u32) -> *const PixelFormatDetails;
        fn SDL_GetMasksForPixelFormat(u32, *mut c_int, *mut u32, *mut u32, *mut u32, *mut u32) -> u8;
        fn SDL_GetPixelFormatForMasks(c_int, u32, u32, u32, u32) -> u32;
        fn SDL_MapRGB(*const PixelFormatDetails, *const SDL_Palette, u8, u8, u8) -> u32;
        fn SDL_MapRGBA(*const PixelFormatDetails, *const SDL_Palette, u8, u8, u8, u8) -> u32;
        fn SDL_GetRGBA(
            u32,
            *const PixelFormatDetails,
            *const SDL_Palette,
            *mut u8,
            *mut u8,
            *mut u8,
            *mut u8
        );
        fn SDL_CreatePalette(c_int) -> *mut SDL_Palette;
        fn SDL_SetPaletteColors(*mut SDL_Palette, *const Color, c_int, c_int) -> u8;
        fn SDL_DestroyPalette(*mut SDL_Palette);

        // rect
        fn SDL_HasRectIntersection(*const Rect, *const Rect) -> u8;
        fn SDL_GetRectIntersection(*const Rect, *const Rect, *mut Rect) -> u8;
        fn SDL_GetRectUnion(*const Rect, *const Rect, *mut Rect) -> u8;
        fn SDL_GetRectEnclosingPoints(*const Point, c_int, *const Rect, *mut Rect) -> u8;
        fn SDL_GetRectAndLineIntersection(
            *const Rect,
            *mut c_int,
            *mut c_int,
            *mut c_int,
            *mut c_int
        ) -> u8;
        fn SDL_HasRectIntersectionFloat(*const FRect, *const FRect) -> u8;
        fn SDL_GetRectIntersectionFloat(*const FRect, *const FRect, *mut FRect) -> u8;
        fn SDL_GetRectUnionFloat(*const FRect, *const FRect, *mut FRect) -> u8;

        // joystick
        fn SDL_LockJoysticks();
        fn SDL_UnlockJoysticks();
        fn SDL_HasJoystick() -> u8;
        fn SDL_GetJoysticks(*mut c_int) -> *mut SDL_JoystickID;
        fn SDL_GetJoystickNameForID(SDL_JoystickID) -> *const c_char;
        fn SDL_GetJoystickPathForID(SDL_JoystickID) -> *const c_char;
        fn SDL_GetJoystickPlayerIndexForID(SDL_JoystickID) -> c_int;
        fn SDL_GetJoystickVendorForID(SDL_JoystickID) -> u16;
        fn SDL_GetJoystickProductForID(SDL_JoystickID) -> u16;
        fn SDL_GetJoystickTypeForID(SDL_JoystickID) -> c_int;
        fn SDL_OpenJoystick(SDL_JoystickID) -> *mut SDL_Joystick;
        fn SDL_CloseJoystick(*mut SDL_Joystick);
        fn SDL_GetJoystickProperties(*mut SDL_Joystick) -> SDL_PropertiesID;
        fn SDL_GetJoystickName(*mut SDL_Joystick) -> *const c_char;
        fn SDL_GetJoystickPath(*mut SDL_Joystick) -> *const c_char;
        fn SDL_GetJoystickPlayerIndex(*mut SDL_Joystick) -> c_int;
        fn SDL_SetJoystickPlayerIndex(*mut SDL_Joystick, c_int) -> u8;
        fn SDL_GetJoystickVendor(*mut SDL_Joystick) -> u16;
        fn SDL_GetJoystickProduct(*mut SDL_Joystick) -> u16;
        fn SDL_GetJoystickProductVersion(*mut SDL_Joystick) -> u16;
        fn SDL_GetJoystickFirmwareVersion(*mut SDL_Joystick) -> u16;
        fn SDL_GetJoystickSerial(*mut SDL_Joystick) -> *const c_char;
        fn SDL_GetJoystickType(*mut SDL_Joystick) -> c_int;
        fn SDL_JoystickConnected(*mut SDL_Joystick) -> u8;
        fn SDL_GetJoystickID(*mut SDL_Joystick) -> SDL_JoystickID;
        fn SDL_GetNumJoystickAxes(*mut SDL_Joystick) -> c_int;
        fn SDL_GetNumJoystickBalls(*mut SDL_Joystick) -> c_int;
        fn SDL_GetNumJoystickHats(*mut SDL_Joystick) -> c_int;
        fn SDL_GetNumJoystickButtons(*mut SDL_Joystick) -> c_int;
        fn SDL_SetJoystickEventsEnabled(u8);
        fn SDL_JoystickEventsEnabled() -> u8;
        fn SDL_UpdateJoysticks();
        fn SDL_GetJoystickAxis(*mut SDL_Joystick, c_int) -> i16;
        fn SDL_GetJoystickAxisInitialState(*mut SDL_Joystick, c_int, *mut i16) -> u8;
        fn SDL_GetJoystickBall(*mut SDL_Joystick, c_int, *mut c_int, *mut c_int) -> u8;
        fn SDL_GetJoystickHat(*mut SDL_Joystick, c_int) -> u8;
        fn SDL_GetJoystickButton(*mut SDL_Joystick, c_int) -> u8;
        fn SDL_RumbleJoystick(*mut SDL_Joystick, u16, u16, u32) -> u8;
        fn SDL_RumbleJoystickTriggers(*mut SDL_Joystick, u16, u16, u32) -> u8;
        fn SDL_SetJoystickLED(*mut SDL_Joystick, u8, u8, u8) -> u8;
        fn SDL_SendJoystickEffect(*mut SDL_Joystick, *const c_void, c_int) -> u8;
        fn SDL_GetJoystickConnectionState(*mut SDL_Joystick) -> c_int;
        fn SDL_GetJoystickPowerInfo(*mut SDL_Joystick, *mut c_int) -> c_int;

        // gamepad
        fn SDL_AddGamepadMapping(*const c_char) -> c_int;
        fn SDL_HasGamepad() -> u8;
        fn SDL_GetGamepads(*mut c_int) -> *mut SDL_JoystickID;
        fn SDL_IsGamepad(SDL_JoystickID) -> u8;
        fn SDL_GetGamepadNameForID(SDL_JoystickID) -> *const c_char;
        fn SDL_GetGamepadTypeForID(SDL_JoystickID) -> c_int;
        fn SDL_GetGamepadMappingForID(SDL_JoystickID) -> *mut c_char;
        fn SDL_OpenGamepad(SDL_JoystickID) -> *mut SDL_Gamepad;
        fn SDL_CloseGamepad(*mut SDL_Gamepad);
        fn SDL_GetGamepadProperties(*mut SDL_Gamepad) -> SDL_PropertiesID;
        fn SDL_GetGamepadID(*mut SDL_Gamepad) -> SDL_JoystickID;
        fn SDL_GetGamepadName(*mut SDL_Gamepad) -> *const c_char;
        fn SDL_GetGamepadSerial(*mut SDL_Gamepad) -> *const c_char;
        fn SDL_GetGamepadType(*mut SDL_Gamepad) -> c_int;
        fn SDL_GetGamepadPlayerIndex(*mut SDL_Gamepad) -> c_int;
        fn SDL_SetGamepadPlayerIndex(*mut SDL_Gamepad, c_int) -> u8;
        fn SDL_GamepadConnected(*mut SDL_Gamepad) -> u8;
        fn SDL_GetGamepadMapping(*mut SDL_Gamepad) -> *mut c_char;
        fn SDL_GetGamepadBindings(*mut SDL_Gamepad, *mut c_int) -> *mut *mut RawGamepadBinding;
        fn SDL_GamepadHasAxis(*mut SDL_Gamepad, c_int) -> u8;
        fn SDL_GetGamepadAxis(*mut SDL_Gamepad, c_int) -> i16;
        fn SDL_GamepadHasButton(*mut SDL_Gamepad, c_int) -> u8;
        fn SDL_GetGamepadButton(*mut SDL_Gamepad, c_int) -> u8;
        fn SDL_RumbleGamepad(*mut SDL_Gamepad, u16, u16, u32) -> u8;
        fn SDL_SetGamepadLED(*mut SDL_Gamepad, u8, u8, u8) -> u8;
        fn SDL_GetGamepadStringForType(c_int) -> *const c_char;
        fn SDL_GetGamepadTypeFromString(*const c_char) -> c_int;
        fn SDL_GetGamepadStringForAxis(c_int) -> *const c_char;
        fn SDL_GetGamepadAxisFromString(*const c_char) -> c_int;
        fn SDL_GetGamepadStringForButton(c_int) -> *const c_char;
        fn SDL_GetGamepadButtonFromString(*const c_char) -> c_int;

        // messagebox / locale / power
        fn SDL_ShowMessageBox(*const RawMessageBoxData, *mut c_int) -> u8;
        fn SDL_ShowSimpleMessageBox(u32, *const c_char, *const c_char, *mut SDL_Window) -> u8;
        fn SDL_GetPreferredLocales(*mut c_int) -> *mut *mut RawLocale;
        fn SDL_GetPowerInfo(*mut c_int, *mut c_int) -> c_int;

        // log
        fn SDL_SetLogPriorities(c_int);
        fn SDL_SetLogPriority(c_int, c_int);
        fn SDL_GetLogPriority(c_int) -> c_int;
        fn SDL_ResetLogPriorities();
        fn SDL_GetDefaultLogOutputFunction() -> Option<SDL_LogOutputFunction>;
        fn SDL_GetLogOutputFunction(*mut Option<SDL_LogOutputFunction>, *mut *mut c_void);
        fn SDL_SetLogOutputFunction(Option<SDL_LogOutputFunction>, *mut c_void);
    }
    variadic {
        fn SDL_SetError(*const c_char) -> u8;
        fn SDL_LogMessage(c_int, c_int, *const c_char);
    }
}
