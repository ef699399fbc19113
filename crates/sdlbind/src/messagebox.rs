//! Modal message boxes
//!
//! [`MessageBox`] is an owned description of the dialog; the native
//! structures are built only for the duration of [`Sdl::show_message_box`],
//! with every string kept alive by a [`MarshalContext`].

use crate::error::Result;
use crate::ffi::marshal::{self, MarshalContext};
use crate::sdl::Sdl;
use crate::sys::SDL_Window;
use crate::video::Window;
use std::ffi::{c_char, c_int};
use std::ptr;

crate::native_flags! {
    /// `SDL_MessageBoxFlags`
    pub struct MessageBoxFlags: u32 {
        const ERROR = 0x0000_0010;
        const WARNING = 0x0000_0020;
        const INFORMATION = 0x0000_0040;
        const BUTTONS_LEFT_TO_RIGHT = 0x0000_0080;
        const BUTTONS_RIGHT_TO_LEFT = 0x0000_0100;
    }
}

crate::native_flags! {
    /// `SDL_MessageBoxButtonFlags`
    pub struct MessageBoxButtonFlags: u32 {
        /// Selected when Return is pressed
        const RETURN_KEY_DEFAULT = 0x0000_0001;
        /// Selected when Escape is pressed
        const ESCAPE_KEY_DEFAULT = 0x0000_0002;
    }
}

/// `SDL_MessageBoxColor`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MessageBoxColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl MessageBoxColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Slot in a [`MessageBoxColorScheme`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageBoxColorType {
    Background = 0,
    Text = 1,
    ButtonBorder = 2,
    ButtonBackground = 3,
    ButtonSelected = 4,
}

/// `SDL_MessageBoxColorScheme`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MessageBoxColorScheme {
    pub colors: [MessageBoxColor; 5],
}

impl MessageBoxColorScheme {
    pub fn get(&self, slot: MessageBoxColorType) -> MessageBoxColor {
        self.colors[slot as usize]
    }

    pub fn set(&mut self, slot: MessageBoxColorType, color: MessageBoxColor) -> &mut Self {
        self.colors[slot as usize] = color;
        self
    }
}

/// `SDL_MessageBoxButtonData`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawMessageBoxButton {
    pub flags: u32,
    pub button_id: c_int,
    pub text: *const c_char,
}

/// `SDL_MessageBoxData`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawMessageBoxData {
    pub flags: u32,
    pub window: *mut SDL_Window,
    pub title: *const c_char,
    pub message: *const c_char,
    pub num_buttons: c_int,
    pub buttons: *const RawMessageBoxButton,
    pub color_scheme: *const MessageBoxColorScheme,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBoxButton {
    pub flags: MessageBoxButtonFlags,
    /// Value reported back when this button is chosen
    pub id: i32,
    pub text: String,
}

/// A message box with custom buttons
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageBox {
    pub flags: MessageBoxFlags,
    pub title: String,
    pub message: String,
    pub buttons: Vec<MessageBoxButton>,
    /// Ignored on platforms that draw native dialogs
    pub color_scheme: Option<MessageBoxColorScheme>,
}

impl MessageBox {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_flags(mut self, flags: MessageBoxFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_button(mut self, id: i32, text: impl Into<String>) -> Self {
        self.buttons.push(MessageBoxButton {
            flags: MessageBoxButtonFlags::empty(),
            id,
            text: text.into(),
        });
        self
    }

    pub fn with_flagged_button(mut self, flags: MessageBoxButtonFlags, id: i32, text: impl Into<String>) -> Self {
        self.buttons.push(MessageBoxButton {
            flags,
            id,
            text: text.into(),
        });
        self
    }

    pub fn with_color_scheme(mut self, scheme: MessageBoxColorScheme) -> Self {
        self.color_scheme = Some(scheme);
        self
    }
}

fn window_ptr(window: Option<&Window>) -> *mut SDL_Window {
    window.map_or(ptr::null_mut(), Window::as_ptr)
}

impl Sdl {
    /// Show a single-button message box and block until it is dismissed
    ///
    /// Usable before [`Sdl::init`]; `parent`, if given, makes it modal.
    pub fn show_simple_message_box(
        &self,
        flags: MessageBoxFlags,
        title: &str,
        message: &str,
        parent: Option<&Window>,
    ) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let title = ctx.c_str(title)?;
        let message = ctx.c_str(message)?;
        self.check(unsafe { (self.api().SDL_ShowSimpleMessageBox)(flags.bits(), title, message, window_ptr(parent)) })
    }

    /// Show `message_box` and block until a button is chosen
    ///
    /// Returns the chosen button's id, or `None` if the box was closed
    /// without one.
    pub fn show_message_box(&self, message_box: &MessageBox, parent: Option<&Window>) -> Result<Option<i32>> {
        let mut ctx = MarshalContext::new();
        let buttons = message_box
            .buttons
            .iter()
            .map(|button| -> Result<RawMessageBoxButton> {
                Ok(RawMessageBoxButton {
                    flags: button.flags.bits(),
                    button_id: button.id,
                    text: ctx.c_str(&button.text)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let data = RawMessageBoxData {
            flags: message_box.flags.bits(),
            window: window_ptr(parent),
            title: ctx.c_str(&message_box.title)?,
            message: ctx.c_str(&message_box.message)?,
            num_buttons: marshal::len_to_c_int(buttons.len())?,
            buttons: if buttons.is_empty() { ptr::null() } else { buttons.as_ptr() },
            color_scheme: message_box
                .color_scheme
                .as_ref()
                .map_or(ptr::null(), |scheme| scheme as *const MessageBoxColorScheme),
        };

        let mut chosen: c_int = -1;
        self.check(unsafe { (self.api().SDL_ShowMessageBox)(&data, &mut chosen) })?;
        tracing::debug!(button = chosen, "message box closed");
        Ok((chosen >= 0).then_some(chosen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_color_scheme_layout() {
        assert_eq!(size_of::<MessageBoxColor>(), 3);
        assert_eq!(size_of::<MessageBoxColorScheme>(), 15);
    }

    #[test]
    fn test_color_scheme_slots() {
        let mut scheme = MessageBoxColorScheme::default();
        scheme
            .set(MessageBoxColorType::Background, MessageBoxColor::rgb(30, 30, 30))
            .set(MessageBoxColorType::ButtonSelected, MessageBoxColor::rgb(0, 120, 215));
        assert_eq!(scheme.colors[0], MessageBoxColor::rgb(30, 30, 30));
        assert_eq!(scheme.get(MessageBoxColorType::ButtonSelected), MessageBoxColor::rgb(0, 120, 215));
        assert_eq!(scheme.get(MessageBoxColorType::Text), MessageBoxColor::default());
    }

    #[test]
    fn test_builder_keeps_button_order() {
        let message_box = MessageBox::new("Quit?", "Unsaved changes will be lost")
            .with_flags(MessageBoxFlags::WARNING)
            .with_flagged_button(MessageBoxButtonFlags::RETURN_KEY_DEFAULT, 1, "Quit")
            .with_flagged_button(MessageBoxButtonFlags::ESCAPE_KEY_DEFAULT, 0, "Cancel");
        let ids: Vec<i32> = message_box.buttons.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 0]);
        assert!(message_box.flags.contains(MessageBoxFlags::WARNING));
        assert_eq!(message_box.color_scheme, None);
    }
}
