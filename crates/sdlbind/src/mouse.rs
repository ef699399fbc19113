//! Mouse state and cursors

use crate::error::Result;
use crate::ffi::marshal;
use crate::sdl::Sdl;
use crate::sys::{SDL_Cursor, SDL_MouseID, SDL_WindowID};
use crate::video::Window;
use std::ffi::c_int;
use std::fmt;
use std::ptr::NonNull;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    Left = 1,
    Middle = 2,
    Right = 3,
    X1 = 4,
    X2 = 5,
}

impl MouseButton {
    pub fn from_raw(button: u8) -> Option<Self> {
        match button {
            1 => Some(Self::Left),
            2 => Some(Self::Middle),
            3 => Some(Self::Right),
            4 => Some(Self::X1),
            5 => Some(Self::X2),
            _ => None,
        }
    }
}

crate::native_flags! {
    /// `SDL_MouseButtonFlags`
    pub struct MouseButtonFlags: u32 {
        const LEFT = 1 << 0;
        const MIDDLE = 1 << 1;
        const RIGHT = 1 << 2;
        const X1 = 1 << 3;
        const X2 = 1 << 4;
    }
}

impl MouseButtonFlags {
    /// Mask bit of a single button
    pub const fn for_button(button: MouseButton) -> Self {
        Self::from_bits(1 << (button as u32 - 1))
    }

    pub const fn is_pressed(self, button: MouseButton) -> bool {
        self.contains(Self::for_button(button))
    }
}

/// Scroll direction reported with wheel events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseWheelDirection {
    #[default]
    Normal,
    /// "Natural" scrolling: values are inverted
    Flipped,
}

impl MouseWheelDirection {
    pub fn from_raw(value: u32) -> Self {
        match value {
            1 => Self::Flipped,
            _ => Self::Normal,
        }
    }

    pub fn to_raw(self) -> u32 {
        match self {
            Self::Normal => 0,
            Self::Flipped => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum SystemCursor {
    Default = 0,
    Text,
    Wait,
    Crosshair,
    Progress,
    NwseResize,
    NeswResize,
    EwResize,
    NsResize,
    Move,
    NotAllowed,
    Pointer,
    NwResize,
    NResize,
    NeResize,
    EResize,
    SeResize,
    SResize,
    SwResize,
    WResize,
}

/// Button mask and pointer position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseState {
    pub buttons: MouseButtonFlags,
    pub x: f32,
    pub y: f32,
}

/// Owned cursor
pub struct Cursor {
    sdl: Sdl,
    raw: NonNull<SDL_Cursor>,
}

impl Cursor {
    pub fn as_ptr(&self) -> *mut SDL_Cursor {
        self.raw.as_ptr()
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        unsafe { (self.sdl.api().SDL_DestroyCursor)(self.raw.as_ptr()) }
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("raw", &self.raw).finish()
    }
}

type StateFn = unsafe extern "C" fn(*mut f32, *mut f32) -> u32;

fn read_state(query: StateFn) -> MouseState {
    let (mut x, mut y) = (0.0, 0.0);
    let buttons = unsafe { query(&mut x, &mut y) };
    MouseState {
        buttons: MouseButtonFlags::from_bits(buttons),
        x,
        y,
    }
}

impl Window {
    pub fn warp_mouse(&self, x: f32, y: f32) {
        unsafe { (self.sdl().api().SDL_WarpMouseInWindow)(self.as_ptr(), x, y) }
    }

    /// Hide the cursor and report only relative motion while focused
    pub fn set_relative_mouse_mode(&self, enabled: bool) -> Result<()> {
        self.sdl().check(unsafe {
            (self.sdl().api().SDL_SetWindowRelativeMouseMode)(self.as_ptr(), marshal::encode_bool(enabled))
        })
    }

    pub fn relative_mouse_mode(&self) -> bool {
        marshal::decode_bool(unsafe { (self.sdl().api().SDL_GetWindowRelativeMouseMode)(self.as_ptr()) })
    }
}

impl Sdl {
    pub fn has_mouse(&self) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_HasMouse)() })
    }

    pub fn mice(&self) -> Result<Vec<SDL_MouseID>> {
        let mut count: c_int = 0;
        let list = unsafe { (self.api().SDL_GetMice)(&mut count) };
        self.take_list(list, count)
    }

    pub fn mouse_name(&self, mouse: SDL_MouseID) -> Result<String> {
        let name = self.check_const_ptr(unsafe { (self.api().SDL_GetMouseNameForID)(mouse) })?;
        Ok(unsafe { marshal::string_from_ptr(name) })
    }

    /// Id of the window with mouse focus
    pub fn mouse_focus(&self) -> Option<SDL_WindowID> {
        let window = unsafe { (self.api().SDL_GetMouseFocus)() };
        if window.is_null() {
            return None;
        }
        match unsafe { (self.api().SDL_GetWindowID)(window) } {
            0 => None,
            id => Some(id),
        }
    }

    /// State relative to the focus window, as of the last event pump
    pub fn mouse_state(&self) -> MouseState {
        read_state(self.api().SDL_GetMouseState)
    }

    /// State in desktop coordinates, queried from the OS
    pub fn global_mouse_state(&self) -> MouseState {
        read_state(self.api().SDL_GetGlobalMouseState)
    }

    /// Motion accumulated since the previous call
    pub fn relative_mouse_state(&self) -> MouseState {
        read_state(self.api().SDL_GetRelativeMouseState)
    }

    pub fn warp_mouse_global(&self, x: f32, y: f32) -> Result<()> {
        self.check(unsafe { (self.api().SDL_WarpMouseGlobal)(x, y) })
    }

    /// Keep receiving mouse events while the pointer is outside the window
    pub fn capture_mouse(&self, enabled: bool) -> Result<()> {
        self.check(unsafe { (self.api().SDL_CaptureMouse)(marshal::encode_bool(enabled)) })
    }

    pub fn create_system_cursor(&self, cursor: SystemCursor) -> Result<Cursor> {
        let raw = self.check_ptr(unsafe { (self.api().SDL_CreateSystemCursor)(cursor as c_int) })?;
        Ok(Cursor { sdl: self.clone(), raw })
    }

    /// Make `cursor` active; it must stay alive while it is shown
    pub fn set_cursor(&self, cursor: &Cursor) -> Result<()> {
        self.check(unsafe { (self.api().SDL_SetCursor)(cursor.as_ptr()) })
    }

    pub fn show_cursor(&self) -> Result<()> {
        self.check(unsafe { (self.api().SDL_ShowCursor)() })
    }

    pub fn hide_cursor(&self) -> Result<()> {
        self.check(unsafe { (self.api().SDL_HideCursor)() })
    }

    pub fn cursor_visible(&self) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_CursorVisible)() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MouseButton::Left, 0x01)]
    #[case(MouseButton::Middle, 0x02)]
    #[case(MouseButton::Right, 0x04)]
    #[case(MouseButton::X1, 0x08)]
    #[case(MouseButton::X2, 0x10)]
    fn test_button_mask(#[case] button: MouseButton, #[case] bits: u32) {
        assert_eq!(MouseButtonFlags::for_button(button).bits(), bits);
        assert_eq!(MouseButton::from_raw(button as u8), Some(button));
    }

    #[test]
    fn test_pressed() {
        let state = MouseButtonFlags::from_bits(0x05);
        assert!(state.is_pressed(MouseButton::Left));
        assert!(state.is_pressed(MouseButton::Right));
        assert!(!state.is_pressed(MouseButton::Middle));
        assert_eq!(MouseButton::from_raw(9), None);
    }

    #[test]
    fn test_wheel_direction() {
        assert_eq!(MouseWheelDirection::from_raw(0), MouseWheelDirection::Normal);
        assert_eq!(MouseWheelDirection::from_raw(1), MouseWheelDirection::Flipped);
        assert_eq!(MouseWheelDirection::Flipped.to_raw(), 1);
    }

    #[test]
    fn test_read_state() {
        unsafe extern "C" fn fake(x: *mut f32, y: *mut f32) -> u32 {
            *x = 12.5;
            *y = 3.0;
            0x02
        }
        let state = read_state(fake);
        assert_eq!(state.x, 12.5);
        assert_eq!(state.y, 3.0);
        assert!(state.buttons.is_pressed(MouseButton::Middle));
    }
}
