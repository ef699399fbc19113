//! Gamepads
//!
//! Joysticks with a known mapping onto a standard layout: a face-button
//! diamond, two sticks, two triggers and a d-pad.

use crate::error::Result;
use crate::ffi::marshal::{self, MarshalContext};
use crate::joystick::duration_ms;
use crate::properties::PropertiesRef;
use crate::sdl::Sdl;
use crate::sys::{SDL_Gamepad, SDL_JoystickID};
use std::ffi::c_int;
use std::fmt;
use std::ptr::NonNull;
use std::time::Duration;

/// `SDL_GamepadType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum GamepadType {
    Unknown = 0,
    Standard,
    Xbox360,
    XboxOne,
    Ps3,
    Ps4,
    Ps5,
    NintendoSwitchPro,
    NintendoSwitchJoyConLeft,
    NintendoSwitchJoyConRight,
    NintendoSwitchJoyConPair,
}

impl GamepadType {
    const ALL: [Self; 11] = [
        Self::Unknown,
        Self::Standard,
        Self::Xbox360,
        Self::XboxOne,
        Self::Ps3,
        Self::Ps4,
        Self::Ps5,
        Self::NintendoSwitchPro,
        Self::NintendoSwitchJoyConLeft,
        Self::NintendoSwitchJoyConRight,
        Self::NintendoSwitchJoyConPair,
    ];

    pub(crate) fn from_raw(value: c_int) -> Self {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(Self::Unknown)
    }
}

/// `SDL_GamepadAxis`; triggers range `0..=32767`, sticks the full `i16` range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum GamepadAxis {
    LeftX = 0,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

impl GamepadAxis {
    pub const ALL: [Self; 6] = [
        Self::LeftX,
        Self::LeftY,
        Self::RightX,
        Self::RightY,
        Self::LeftTrigger,
        Self::RightTrigger,
    ];

    /// `None` for `SDL_GAMEPAD_AXIS_INVALID` and out-of-range values
    pub fn from_raw(value: c_int) -> Option<Self> {
        usize::try_from(value).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

/// `SDL_GamepadButton`, named by position rather than label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum GamepadButton {
    /// Bottom face button (Xbox A)
    South = 0,
    /// Right face button (Xbox B)
    East,
    /// Left face button (Xbox X)
    West,
    /// Top face button (Xbox Y)
    North,
    Back,
    Guide,
    Start,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    Misc1,
    RightPaddle1,
    LeftPaddle1,
    RightPaddle2,
    LeftPaddle2,
    Touchpad,
    Misc2,
    Misc3,
    Misc4,
    Misc5,
    Misc6,
}

impl GamepadButton {
    pub const ALL: [Self; 26] = [
        Self::South,
        Self::East,
        Self::West,
        Self::North,
        Self::Back,
        Self::Guide,
        Self::Start,
        Self::LeftStick,
        Self::RightStick,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::DpadUp,
        Self::DpadDown,
        Self::DpadLeft,
        Self::DpadRight,
        Self::Misc1,
        Self::RightPaddle1,
        Self::LeftPaddle1,
        Self::RightPaddle2,
        Self::LeftPaddle2,
        Self::Touchpad,
        Self::Misc2,
        Self::Misc3,
        Self::Misc4,
        Self::Misc5,
        Self::Misc6,
    ];

    /// `None` for `SDL_GAMEPAD_BUTTON_INVALID` and out-of-range values
    pub fn from_raw(value: c_int) -> Option<Self> {
        usize::try_from(value).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

const BIND_BUTTON: c_int = 1;
const BIND_AXIS: c_int = 2;
const BIND_HAT: c_int = 3;

/// `SDL_GamepadBinding`; the unions are kept as three `int`s each
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RawGamepadBinding {
    pub input_type: c_int,
    pub input: [c_int; 3],
    pub output_type: c_int,
    pub output: [c_int; 3],
}

/// Joystick side of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingInput {
    None,
    Button(i32),
    Axis { axis: i32, min: i32, max: i32 },
    Hat { hat: i32, mask: i32 },
}

/// Gamepad side of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingOutput {
    None,
    Button(GamepadButton),
    Axis { axis: GamepadAxis, min: i32, max: i32 },
}

/// One joystick input mapped onto one gamepad control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamepadBinding {
    pub input: BindingInput,
    pub output: BindingOutput,
}

impl From<&RawGamepadBinding> for GamepadBinding {
    fn from(raw: &RawGamepadBinding) -> Self {
        let [a, b, c] = raw.input;
        let input = match raw.input_type {
            BIND_BUTTON => BindingInput::Button(a),
            BIND_AXIS => BindingInput::Axis { axis: a, min: b, max: c },
            BIND_HAT => BindingInput::Hat { hat: a, mask: b },
            _ => BindingInput::None,
        };
        let [a, b, c] = raw.output;
        let output = match raw.output_type {
            BIND_BUTTON => GamepadButton::from_raw(a).map_or(BindingOutput::None, BindingOutput::Button),
            BIND_AXIS => GamepadAxis::from_raw(a).map_or(BindingOutput::None, |axis| BindingOutput::Axis {
                axis,
                min: b,
                max: c,
            }),
            _ => BindingOutput::None,
        };
        Self { input, output }
    }
}

/// Open gamepad device
pub struct Gamepad {
    sdl: Sdl,
    raw: NonNull<SDL_Gamepad>,
}

impl Gamepad {
    fn ptr(&self) -> *mut SDL_Gamepad {
        self.raw.as_ptr()
    }

    pub fn id(&self) -> Result<SDL_JoystickID> {
        match unsafe { (self.sdl.api().SDL_GetGamepadID)(self.ptr()) } {
            0 => Err(self.sdl.last_error()),
            id => Ok(id),
        }
    }

    pub fn name(&self) -> Result<String> {
        let name = self.sdl.check_const_ptr(unsafe { (self.sdl.api().SDL_GetGamepadName)(self.ptr()) })?;
        Ok(unsafe { marshal::string_from_ptr(name) })
    }

    pub fn serial(&self) -> Option<String> {
        unsafe { marshal::opt_string_from_ptr((self.sdl.api().SDL_GetGamepadSerial)(self.ptr())) }
    }

    pub fn gamepad_type(&self) -> GamepadType {
        GamepadType::from_raw(unsafe { (self.sdl.api().SDL_GetGamepadType)(self.ptr()) })
    }

    pub fn player_index(&self) -> Option<u32> {
        u32::try_from(unsafe { (self.sdl.api().SDL_GetGamepadPlayerIndex)(self.ptr()) }).ok()
    }

    pub fn set_player_index(&self, index: Option<u32>) -> Result<()> {
        let index = index.and_then(|i| c_int::try_from(i).ok()).unwrap_or(-1);
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_SetGamepadPlayerIndex)(self.ptr(), index) })
    }

    pub fn connected(&self) -> bool {
        marshal::decode_bool(unsafe { (self.sdl.api().SDL_GamepadConnected)(self.ptr()) })
    }

    pub fn properties(&self) -> Result<PropertiesRef> {
        let id = unsafe { (self.sdl.api().SDL_GetGamepadProperties)(self.ptr()) };
        self.sdl.borrowed_properties(id)
    }

    /// Mapping string in the community controller database format
    pub fn mapping(&self) -> Result<String> {
        self.sdl.take_string(unsafe { (self.sdl.api().SDL_GetGamepadMapping)(self.ptr()) })
    }

    /// Every joystick-to-gamepad binding of the current mapping
    pub fn bindings(&self) -> Result<Vec<GamepadBinding>> {
        let mut count: c_int = 0;
        let list = unsafe { (self.sdl.api().SDL_GetGamepadBindings)(self.ptr(), &mut count) };
        let raw = self.sdl.take_pointer_list(list, count)?;
        Ok(raw.iter().flatten().map(GamepadBinding::from).collect())
    }

    pub fn has_axis(&self, axis: GamepadAxis) -> bool {
        marshal::decode_bool(unsafe { (self.sdl.api().SDL_GamepadHasAxis)(self.ptr(), axis as c_int) })
    }

    pub fn axis(&self, axis: GamepadAxis) -> i16 {
        unsafe { (self.sdl.api().SDL_GetGamepadAxis)(self.ptr(), axis as c_int) }
    }

    pub fn has_button(&self, button: GamepadButton) -> bool {
        marshal::decode_bool(unsafe { (self.sdl.api().SDL_GamepadHasButton)(self.ptr(), button as c_int) })
    }

    pub fn button(&self, button: GamepadButton) -> bool {
        marshal::decode_bool(unsafe { (self.sdl.api().SDL_GetGamepadButton)(self.ptr(), button as c_int) })
    }

    pub fn rumble(&self, low_frequency: u16, high_frequency: u16, duration: Duration) -> Result<()> {
        self.sdl.check(unsafe {
            (self.sdl.api().SDL_RumbleGamepad)(self.ptr(), low_frequency, high_frequency, duration_ms(duration))
        })
    }

    pub fn set_led(&self, red: u8, green: u8, blue: u8) -> Result<()> {
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_SetGamepadLED)(self.ptr(), red, green, blue) })
    }

    pub fn as_ptr(&self) -> *mut SDL_Gamepad {
        self.raw.as_ptr()
    }
}

impl Drop for Gamepad {
    fn drop(&mut self) {
        unsafe { (self.sdl.api().SDL_CloseGamepad)(self.raw.as_ptr()) }
    }
}

impl fmt::Debug for Gamepad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gamepad").field("raw", &self.raw).finish()
    }
}

impl Sdl {
    pub fn has_gamepad(&self) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_HasGamepad)() })
    }

    /// Instance ids of every attached joystick that has a gamepad mapping
    pub fn gamepads(&self) -> Result<Vec<SDL_JoystickID>> {
        let mut count: c_int = 0;
        let list = unsafe { (self.api().SDL_GetGamepads)(&mut count) };
        self.take_list(list, count)
    }

    pub fn is_gamepad(&self, id: SDL_JoystickID) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_IsGamepad)(id) })
    }

    pub fn gamepad_name_for_id(&self, id: SDL_JoystickID) -> Result<String> {
        let name = self.check_const_ptr(unsafe { (self.api().SDL_GetGamepadNameForID)(id) })?;
        Ok(unsafe { marshal::string_from_ptr(name) })
    }

    pub fn gamepad_type_for_id(&self, id: SDL_JoystickID) -> GamepadType {
        GamepadType::from_raw(unsafe { (self.api().SDL_GetGamepadTypeForID)(id) })
    }

    pub fn gamepad_mapping_for_id(&self, id: SDL_JoystickID) -> Result<String> {
        self.take_string(unsafe { (self.api().SDL_GetGamepadMappingForID)(id) })
    }

    pub fn open_gamepad(&self, id: SDL_JoystickID) -> Result<Gamepad> {
        let raw = self.check_ptr(unsafe { (self.api().SDL_OpenGamepad)(id) })?;
        tracing::debug!(id, "gamepad opened");
        Ok(Gamepad { sdl: self.clone(), raw })
    }

    /// Add or replace a mapping; `true` if it was new
    pub fn add_gamepad_mapping(&self, mapping: &str) -> Result<bool> {
        let mut ctx = MarshalContext::new();
        let mapping = ctx.c_str(mapping)?;
        match unsafe { (self.api().SDL_AddGamepadMapping)(mapping) } {
            v if v < 0 => Err(self.last_error()),
            v => Ok(v == 1),
        }
    }

    /// Mapping-string name of a type, e.g. `"xboxone"`
    pub fn gamepad_type_name(&self, kind: GamepadType) -> Option<String> {
        unsafe { marshal::opt_string_from_ptr((self.api().SDL_GetGamepadStringForType)(kind as c_int)) }
    }

    pub fn gamepad_type_from_name(&self, name: &str) -> Result<GamepadType> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        Ok(GamepadType::from_raw(unsafe { (self.api().SDL_GetGamepadTypeFromString)(name) }))
    }

    /// Mapping-string name of an axis, e.g. `"leftx"`
    pub fn gamepad_axis_name(&self, axis: GamepadAxis) -> Option<String> {
        unsafe { marshal::opt_string_from_ptr((self.api().SDL_GetGamepadStringForAxis)(axis as c_int)) }
    }

    pub fn gamepad_axis_from_name(&self, name: &str) -> Result<Option<GamepadAxis>> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        Ok(GamepadAxis::from_raw(unsafe { (self.api().SDL_GetGamepadAxisFromString)(name) }))
    }

    /// Mapping-string name of a button, e.g. `"a"` for [`GamepadButton::South`]
    pub fn gamepad_button_name(&self, button: GamepadButton) -> Option<String> {
        unsafe { marshal::opt_string_from_ptr((self.api().SDL_GetGamepadStringForButton)(button as c_int)) }
    }

    pub fn gamepad_button_from_name(&self, name: &str) -> Result<Option<GamepadButton>> {
        let mut ctx = MarshalContext::new();
        let name = ctx.c_str(name)?;
        Ok(GamepadButton::from_raw(unsafe { (self.api().SDL_GetGamepadButtonFromString)(name) }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::mem::size_of;

    #[test]
    fn test_binding_layout() {
        assert_eq!(size_of::<RawGamepadBinding>(), 32);
    }

    #[test]
    fn test_enum_tables_match_discriminants() {
        for (index, button) in GamepadButton::ALL.iter().enumerate() {
            assert_eq!(*button as usize, index);
        }
        for (index, axis) in GamepadAxis::ALL.iter().enumerate() {
            assert_eq!(*axis as usize, index);
        }
        for (index, kind) in GamepadType::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, index);
        }
    }

    #[rstest]
    #[case(-1, None)]
    #[case(0, Some(GamepadButton::South))]
    #[case(20, Some(GamepadButton::Touchpad))]
    #[case(25, Some(GamepadButton::Misc6))]
    #[case(26, None)]
    fn test_button_from_raw(#[case] raw: c_int, #[case] expected: Option<GamepadButton>) {
        assert_eq!(GamepadButton::from_raw(raw), expected);
    }

    #[test]
    fn test_unknown_type_falls_back() {
        assert_eq!(GamepadType::from_raw(6), GamepadType::Ps5);
        assert_eq!(GamepadType::from_raw(99), GamepadType::Unknown);
        assert_eq!(GamepadType::from_raw(-3), GamepadType::Unknown);
    }

    #[test]
    fn test_axis_binding_decoded() {
        let raw = RawGamepadBinding {
            input_type: BIND_AXIS,
            input: [2, -32768, 32767],
            output_type: BIND_AXIS,
            output: [4, 0, 32767],
        };
        let binding = GamepadBinding::from(&raw);
        assert_eq!(
            binding.input,
            BindingInput::Axis {
                axis: 2,
                min: -32768,
                max: 32767
            }
        );
        assert_eq!(
            binding.output,
            BindingOutput::Axis {
                axis: GamepadAxis::LeftTrigger,
                min: 0,
                max: 32767
            }
        );
    }

    #[test]
    fn test_hat_to_button_binding_decoded() {
        let raw = RawGamepadBinding {
            input_type: BIND_HAT,
            input: [0, 1, 0],
            output_type: BIND_BUTTON,
            output: [11, 0, 0],
        };
        let binding = GamepadBinding::from(&raw);
        assert_eq!(binding.input, BindingInput::Hat { hat: 0, mask: 1 });
        assert_eq!(binding.output, BindingOutput::Button(GamepadButton::DpadUp));
    }

    #[test]
    fn test_unbound_entry_is_none() {
        let binding = GamepadBinding::from(&RawGamepadBinding::default());
        assert_eq!(binding.input, BindingInput::None);
        assert_eq!(binding.output, BindingOutput::None);
    }
}
