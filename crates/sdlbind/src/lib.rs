//! sdlbind - Dynamically loaded bindings to SDL3
//!
//! This library exposes the SDL3 C ABI (plus SDL3_ttf and SDL3_image) as
//! safe Rust:
//! - Symbol tables resolved at runtime from a shared library or a static table
//! - Owning handles that destroy their native object exactly once
//! - Events decoded into a Rust enum, callbacks taking Rust closures
//! - Native lists and strings copied into owned values
//!
//! # Example
//!
//! ```no_run
//! use sdlbind::{Event, InitFlags, Sdl, WindowFlags};
//!
//! let sdl = Sdl::load()?;
//! sdl.init(InitFlags::VIDEO)?;
//! let window = sdl.create_window("demo", 640, 480, WindowFlags::RESIZABLE)?;
//! 'main: loop {
//!     for event in sdl.poll_iter() {
//!         if let Event::Quit(_) = event {
//!             break 'main;
//!         }
//!     }
//! }
//! drop(window);
//! sdl.quit();
//! # Ok::<(), sdlbind::Error>(())
//! ```

/// sdlbind version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod ffi;
pub mod flags;
pub mod sys;

pub mod audio;
pub mod camera;
pub mod dialog;
pub mod error;
pub mod events;
pub mod gamepad;
pub mod image;
pub mod joystick;
pub mod keyboard;
pub mod locale;
pub mod log;
pub mod logging;
pub mod messagebox;
pub mod misc;
pub mod mouse;
pub mod pixels;
pub mod power;
pub mod properties;
pub mod rect;
pub mod render;
pub mod sdl;
pub mod surface;
pub mod ttf;
pub mod video;

// Re-export commonly used types
pub use audio::{AudioFormat, AudioSpec, AudioStream};
pub use camera::{Camera, CameraSpec};
pub use dialog::{DialogFileFilter, DialogResult};
pub use error::{Error, Result};
pub use events::{Event, EventType, RawEvent};
pub use gamepad::{Gamepad, GamepadAxis, GamepadButton, GamepadType};
pub use image::Image;
pub use joystick::{Joystick, JoystickType};
pub use keyboard::{Keycode, Keymod, Scancode};
pub use locale::Locale;
pub use log::{LogCategory, LogPriority};
pub use messagebox::{MessageBox, MessageBoxFlags};
pub use mouse::{MouseButton, MouseButtonFlags};
pub use pixels::{BlendMode, Color, FColor, PixelFormat};
pub use power::{PowerInfo, PowerState};
pub use properties::{Properties, PropertiesRef};
pub use rect::{FPoint, FRect, Point, Rect};
pub use render::{Renderer, Texture};
pub use sdl::{HintPriority, InitFlags, Sdl, Version};
pub use surface::Surface;
pub use ttf::{Font, Ttf};
pub use video::{Window, WindowFlags};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoke() {
        assert_eq!(VERSION, "0.1.0");
    }
}
