//! Keyboard state, key names and text input

use crate::error::Result;
use crate::events::KeyboardEvent;
use crate::ffi::marshal::{self, MarshalContext};
use crate::sdl::Sdl;
use crate::sys::{SDL_KeyboardID, SDL_WindowID};
use crate::video::Window;
use std::ffi::c_int;

crate::native_flags! {
    /// `SDL_Keymod`
    pub struct Keymod: u16 {
        const LSHIFT = 0x0001;
        const RSHIFT = 0x0002;
        const LEVEL5 = 0x0004;
        const LCTRL = 0x0040;
        const RCTRL = 0x0080;
        const LALT = 0x0100;
        const RALT = 0x0200;
        const LGUI = 0x0400;
        const RGUI = 0x0800;
        const NUM = 0x1000;
        const CAPS = 0x2000;
        /// AltGr
        const MODE = 0x4000;
        const SCROLL = 0x8000;
        const CTRL = 0x0040 | 0x0080;
        const SHIFT = 0x0001 | 0x0002;
        const ALT = 0x0100 | 0x0200;
        const GUI = 0x0400 | 0x0800;
    }
}

/// Physical key position, independent of layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Scancode(pub i32);

impl Scancode {
    pub const UNKNOWN: Self = Self(0);
    pub const A: Self = Self(4);
    pub const Z: Self = Self(29);
    pub const NUM_1: Self = Self(30);
    pub const NUM_0: Self = Self(39);
    pub const RETURN: Self = Self(40);
    pub const ESCAPE: Self = Self(41);
    pub const BACKSPACE: Self = Self(42);
    pub const TAB: Self = Self(43);
    pub const SPACE: Self = Self(44);
    pub const F1: Self = Self(58);
    pub const F12: Self = Self(69);
    pub const RIGHT: Self = Self(79);
    pub const LEFT: Self = Self(80);
    pub const DOWN: Self = Self(81);
    pub const UP: Self = Self(82);
    pub const LCTRL: Self = Self(224);
    pub const LSHIFT: Self = Self(225);
    pub const LALT: Self = Self(226);
    pub const RCTRL: Self = Self(228);
    pub const RSHIFT: Self = Self(229);
    pub const RALT: Self = Self(230);
    /// Upper bound of the scancode range, for sizing state arrays
    pub const COUNT: usize = 512;
}

/// Layout-dependent key value
///
/// Printable keys carry their Unicode code point; the rest are scancodes
/// tagged with [`Keycode::SCANCODE_MASK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Keycode(pub u32);

impl Keycode {
    pub const SCANCODE_MASK: u32 = 1 << 30;
    pub const UNKNOWN: Self = Self(0);
    pub const RETURN: Self = Self(0x0D);
    pub const ESCAPE: Self = Self(0x1B);
    pub const BACKSPACE: Self = Self(0x08);
    pub const TAB: Self = Self(0x09);
    pub const SPACE: Self = Self(0x20);
    pub const DELETE: Self = Self(0x7F);
    pub const RIGHT: Self = Self::from_scancode(Scancode::RIGHT);
    pub const LEFT: Self = Self::from_scancode(Scancode::LEFT);
    pub const DOWN: Self = Self::from_scancode(Scancode::DOWN);
    pub const UP: Self = Self::from_scancode(Scancode::UP);
    pub const F1: Self = Self::from_scancode(Scancode::F1);

    /// Keycode of a key with no character, derived from its scancode
    pub const fn from_scancode(scancode: Scancode) -> Self {
        Self(scancode.0 as u32 | Self::SCANCODE_MASK)
    }

    /// Keycode of a printable key
    pub const fn from_char(c: char) -> Self {
        Self(c as u32)
    }

    pub const fn is_scancode(self) -> bool {
        self.0 & Self::SCANCODE_MASK != 0
    }

    /// The character for printable keys
    pub fn to_char(self) -> Option<char> {
        if self.is_scancode() {
            None
        } else {
            char::from_u32(self.0).filter(|c| *c != '\0')
        }
    }
}

impl KeyboardEvent {
    pub fn keycode(&self) -> Keycode {
        Keycode(self.key)
    }

    pub fn scancode(&self) -> Scancode {
        Scancode(self.scancode as i32)
    }
}

/// Snapshot of every key's pressed state, indexed by scancode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardState {
    keys: Vec<bool>,
}

impl KeyboardState {
    pub fn is_pressed(&self, scancode: Scancode) -> bool {
        usize::try_from(scancode.0)
            .ok()
            .and_then(|index| self.keys.get(index))
            .copied()
            .unwrap_or(false)
    }

    pub fn pressed(&self) -> impl Iterator<Item = Scancode> + '_ {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, down)| **down)
            .map(|(index, _)| Scancode(index as i32))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Window {
    /// Begin receiving text input events for this window
    pub fn start_text_input(&self) -> Result<()> {
        self.sdl().check(unsafe { (self.sdl().api().SDL_StartTextInput)(self.as_ptr()) })
    }

    pub fn stop_text_input(&self) -> Result<()> {
        self.sdl().check(unsafe { (self.sdl().api().SDL_StopTextInput)(self.as_ptr()) })
    }

    pub fn text_input_active(&self) -> bool {
        marshal::decode_bool(unsafe { (self.sdl().api().SDL_TextInputActive)(self.as_ptr()) })
    }
}

impl Sdl {
    pub fn has_keyboard(&self) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_HasKeyboard)() })
    }

    pub fn keyboards(&self) -> Result<Vec<SDL_KeyboardID>> {
        let mut count: c_int = 0;
        let list = unsafe { (self.api().SDL_GetKeyboards)(&mut count) };
        self.take_list(list, count)
    }

    pub fn keyboard_name(&self, keyboard: SDL_KeyboardID) -> Result<String> {
        let name = self.check_const_ptr(unsafe { (self.api().SDL_GetKeyboardNameForID)(keyboard) })?;
        Ok(unsafe { marshal::string_from_ptr(name) })
    }

    /// Id of the window with keyboard focus
    pub fn keyboard_focus(&self) -> Option<SDL_WindowID> {
        let window = unsafe { (self.api().SDL_GetKeyboardFocus)() };
        if window.is_null() {
            return None;
        }
        match unsafe { (self.api().SDL_GetWindowID)(window) } {
            0 => None,
            id => Some(id),
        }
    }

    /// Copy of the key state array, current as of the last event pump
    ///
    /// The native array belongs to the library and is not freed.
    pub fn keyboard_state(&self) -> KeyboardState {
        let mut count: c_int = 0;
        let state = unsafe { (self.api().SDL_GetKeyboardState)(&mut count) };
        let keys = unsafe { marshal::copy_array(state, count) }
            .into_iter()
            .map(marshal::decode_bool)
            .collect();
        KeyboardState { keys }
    }

    pub fn mod_state(&self) -> Keymod {
        Keymod::from_bits(unsafe { (self.api().SDL_GetModState)() })
    }

    pub fn set_mod_state(&self, modstate: Keymod) {
        unsafe { (self.api().SDL_SetModState)(modstate.bits()) }
    }

    /// Key produced by `scancode` under the current layout
    pub fn key_from_scancode(&self, scancode: Scancode, modstate: Keymod, key_event: bool) -> Keycode {
        Keycode(unsafe {
            (self.api().SDL_GetKeyFromScancode)(scancode.0, modstate.bits(), marshal::encode_bool(key_event))
        })
    }

    /// Scancode producing `key`, with the modifiers it needs
    pub fn scancode_from_key(&self, key: Keycode) -> (Scancode, Keymod) {
        let mut modstate: u16 = 0;
        let scancode = unsafe { (self.api().SDL_GetScancodeFromKey)(key.0, &mut modstate) };
        (Scancode(scancode), Keymod::from_bits(modstate))
    }

    pub fn scancode_name(&self, scancode: Scancode) -> String {
        unsafe { marshal::string_from_ptr((self.api().SDL_GetScancodeName)(scancode.0)) }
    }

    pub fn scancode_from_name(&self, name: &str) -> Result<Scancode> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        match unsafe { (self.api().SDL_GetScancodeFromName)(name) } {
            0 => Err(self.last_error()),
            code => Ok(Scancode(code)),
        }
    }

    pub fn key_name(&self, key: Keycode) -> String {
        unsafe { marshal::string_from_ptr((self.api().SDL_GetKeyName)(key.0)) }
    }

    pub fn key_from_name(&self, name: &str) -> Result<Keycode> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        match unsafe { (self.api().SDL_GetKeyFromName)(name) } {
            0 => Err(self.last_error()),
            key => Ok(Keycode(key)),
        }
    }
}
