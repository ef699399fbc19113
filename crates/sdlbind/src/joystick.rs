//! Joysticks
//!
//! Low-level access to any attached controller by axis, button and hat
//! index. Controllers with a known layout are better served by
//! [`crate::gamepad`].

use crate::error::Result;
use crate::ffi::marshal;
use crate::power::PowerInfo;
use crate::properties::PropertiesRef;
use crate::sdl::Sdl;
use crate::sys::{SDL_Joystick, SDL_JoystickID};
use std::ffi::c_int;
use std::fmt;
use std::ptr::NonNull;
use std::time::Duration;

/// Largest value an axis reports
pub const AXIS_MAX: i16 = 32767;
/// Smallest value an axis reports
pub const AXIS_MIN: i16 = -32768;

crate::native_flags! {
    /// Hat position; the empty set is centered
    pub struct Hat: u8 {
        const UP = 0x01;
        const RIGHT = 0x02;
        const DOWN = 0x04;
        const LEFT = 0x08;
        const RIGHT_UP = 0x03;
        const RIGHT_DOWN = 0x06;
        const LEFT_UP = 0x09;
        const LEFT_DOWN = 0x0C;
    }
}

impl Hat {
    pub const CENTERED: Self = Self::empty();
}

/// `SDL_JoystickType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoystickType {
    Unknown,
    Gamepad,
    Wheel,
    ArcadeStick,
    FlightStick,
    DancePad,
    Guitar,
    DrumKit,
    ArcadePad,
    Throttle,
}

impl JoystickType {
    pub(crate) fn from_raw(value: c_int) -> Self {
        match value {
            1 => Self::Gamepad,
            2 => Self::Wheel,
            3 => Self::ArcadeStick,
            4 => Self::FlightStick,
            5 => Self::DancePad,
            6 => Self::Guitar,
            7 => Self::DrumKit,
            8 => Self::ArcadePad,
            9 => Self::Throttle,
            _ => Self::Unknown,
        }
    }
}

/// `SDL_JoystickConnectionState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Unknown,
    Wired,
    Wireless,
}

impl ConnectionState {
    /// `None` for `SDL_JOYSTICK_CONNECTION_INVALID`
    fn from_raw(value: c_int) -> Option<Self> {
        match value {
            v if v < 0 => None,
            1 => Some(Self::Wired),
            2 => Some(Self::Wireless),
            _ => Some(Self::Unknown),
        }
    }
}

/// Clamp a duration to the native millisecond range
pub(crate) fn duration_ms(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

/// Open joystick device
pub struct Joystick {
    sdl: Sdl,
    raw: NonNull<SDL_Joystick>,
}

impl Joystick {
    fn ptr(&self) -> *mut SDL_Joystick {
        self.raw.as_ptr()
    }

    /// Map a native count, negative meaning failure
    fn count(&self, value: c_int) -> Result<usize> {
        usize::try_from(value).map_err(|_| self.sdl.last_error())
    }

    pub fn id(&self) -> Result<SDL_JoystickID> {
        match unsafe { (self.sdl.api().SDL_GetJoystickID)(self.ptr()) } {
            0 => Err(self.sdl.last_error()),
            id => Ok(id),
        }
    }

    pub fn name(&self) -> Result<String> {
        let name = self.sdl.check_const_ptr(unsafe { (self.sdl.api().SDL_GetJoystickName)(self.ptr()) })?;
        Ok(unsafe { marshal::string_from_ptr(name) })
    }

    /// Implementation-dependent device path
    pub fn path(&self) -> Option<String> {
        unsafe { marshal::opt_string_from_ptr((self.sdl.api().SDL_GetJoystickPath)(self.ptr())) }
    }

    pub fn serial(&self) -> Option<String> {
        unsafe { marshal::opt_string_from_ptr((self.sdl.api().SDL_GetJoystickSerial)(self.ptr())) }
    }

    pub fn player_index(&self) -> Option<u32> {
        u32::try_from(unsafe { (self.sdl.api().SDL_GetJoystickPlayerIndex)(self.ptr()) }).ok()
    }

    /// Assign a player slot, `None` to clear it
    pub fn set_player_index(&self, index: Option<u32>) -> Result<()> {
        let index = index.and_then(|i| c_int::try_from(i).ok()).unwrap_or(-1);
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_SetJoystickPlayerIndex)(self.ptr(), index) })
    }

    /// USB vendor id, `0` if unavailable
    pub fn vendor(&self) -> u16 {
        unsafe { (self.sdl.api().SDL_GetJoystickVendor)(self.ptr()) }
    }

    /// USB product id, `0` if unavailable
    pub fn product(&self) -> u16 {
        unsafe { (self.sdl.api().SDL_GetJoystickProduct)(self.ptr()) }
    }

    pub fn product_version(&self) -> u16 {
        unsafe { (self.sdl.api().SDL_GetJoystickProductVersion)(self.ptr()) }
    }

    pub fn firmware_version(&self) -> u16 {
        unsafe { (self.sdl.api().SDL_GetJoystickFirmwareVersion)(self.ptr()) }
    }

    pub fn joystick_type(&self) -> JoystickType {
        JoystickType::from_raw(unsafe { (self.sdl.api().SDL_GetJoystickType)(self.ptr()) })
    }

    /// Whether the device is still attached
    pub fn connected(&self) -> bool {
        marshal::decode_bool(unsafe { (self.sdl.api().SDL_JoystickConnected)(self.ptr()) })
    }

    pub fn connection_state(&self) -> Result<ConnectionState> {
        let state = unsafe { (self.sdl.api().SDL_GetJoystickConnectionState)(self.ptr()) };
        ConnectionState::from_raw(state).ok_or_else(|| self.sdl.last_error())
    }

    /// Battery of the device itself; `remaining` is never reported
    pub fn power_info(&self) -> Result<PowerInfo> {
        let mut percent: c_int = -1;
        let state = unsafe { (self.sdl.api().SDL_GetJoystickPowerInfo)(self.ptr(), &mut percent) };
        PowerInfo::from_raw(state, -1, percent).ok_or_else(|| self.sdl.last_error())
    }

    pub fn properties(&self) -> Result<PropertiesRef> {
        let id = unsafe { (self.sdl.api().SDL_GetJoystickProperties)(self.ptr()) };
        self.sdl.borrowed_properties(id)
    }

    pub fn num_axes(&self) -> Result<usize> {
        self.count(unsafe { (self.sdl.api().SDL_GetNumJoystickAxes)(self.ptr()) })
    }

    pub fn num_balls(&self) -> Result<usize> {
        self.count(unsafe { (self.sdl.api().SDL_GetNumJoystickBalls)(self.ptr()) })
    }

    pub fn num_hats(&self) -> Result<usize> {
        self.count(unsafe { (self.sdl.api().SDL_GetNumJoystickHats)(self.ptr()) })
    }

    pub fn num_buttons(&self) -> Result<usize> {
        self.count(unsafe { (self.sdl.api().SDL_GetNumJoystickButtons)(self.ptr()) })
    }

    /// Current axis position in `AXIS_MIN..=AXIS_MAX`; `0` for an unknown axis
    pub fn axis(&self, axis: c_int) -> i16 {
        unsafe { (self.sdl.api().SDL_GetJoystickAxis)(self.ptr(), axis) }
    }

    /// Position the axis reported when the device was opened, if any
    pub fn axis_initial_state(&self, axis: c_int) -> Option<i16> {
        let mut state: i16 = 0;
        let known = unsafe { (self.sdl.api().SDL_GetJoystickAxisInitialState)(self.ptr(), axis, &mut state) };
        marshal::decode_bool(known).then_some(state)
    }

    /// Trackball motion `(dx, dy)` since the last call
    pub fn ball(&self, ball: c_int) -> Result<(i32, i32)> {
        let (mut dx, mut dy): (c_int, c_int) = (0, 0);
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_GetJoystickBall)(self.ptr(), ball, &mut dx, &mut dy) })?;
        Ok((dx, dy))
    }

    pub fn hat(&self, hat: c_int) -> Hat {
        Hat::from_bits(unsafe { (self.sdl.api().SDL_GetJoystickHat)(self.ptr(), hat) })
    }

    pub fn button(&self, button: c_int) -> bool {
        marshal::decode_bool(unsafe { (self.sdl.api().SDL_GetJoystickButton)(self.ptr(), button) })
    }

    /// Start a rumble effect; a zero intensity pair stops any running one
    pub fn rumble(&self, low_frequency: u16, high_frequency: u16, duration: Duration) -> Result<()> {
        self.sdl.check(unsafe {
            (self.sdl.api().SDL_RumbleJoystick)(self.ptr(), low_frequency, high_frequency, duration_ms(duration))
        })
    }

    pub fn rumble_triggers(&self, left: u16, right: u16, duration: Duration) -> Result<()> {
        self.sdl.check(unsafe {
            (self.sdl.api().SDL_RumbleJoystickTriggers)(self.ptr(), left, right, duration_ms(duration))
        })
    }

    pub fn set_led(&self, red: u8, green: u8, blue: u8) -> Result<()> {
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_SetJoystickLED)(self.ptr(), red, green, blue) })
    }

    /// Send a device-specific effect packet
    pub fn send_effect(&self, data: &[u8]) -> Result<()> {
        let len = marshal::len_to_c_int(data.len())?;
        self.sdl
            .check(unsafe { (self.sdl.api().SDL_SendJoystickEffect)(self.ptr(), data.as_ptr().cast(), len) })
    }

    pub fn as_ptr(&self) -> *mut SDL_Joystick {
        self.raw.as_ptr()
    }
}

impl Drop for Joystick {
    fn drop(&mut self) {
        unsafe { (self.sdl.api().SDL_CloseJoystick)(self.raw.as_ptr()) }
    }
}

impl fmt::Debug for Joystick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Joystick").field("raw", &self.raw).finish()
    }
}

/// Holds the joystick lock; released on drop
#[must_use = "the lock is released when the guard is dropped"]
pub struct JoystickLock<'a> {
    sdl: &'a Sdl,
}

impl Drop for JoystickLock<'_> {
    fn drop(&mut self) {
        unsafe { (self.sdl.api().SDL_UnlockJoysticks)() }
    }
}

impl fmt::Debug for JoystickLock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoystickLock").finish_non_exhaustive()
    }
}

impl Sdl {
    pub fn has_joystick(&self) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_HasJoystick)() })
    }

    /// Instance ids of every attached joystick
    pub fn joysticks(&self) -> Result<Vec<SDL_JoystickID>> {
        let mut count: c_int = 0;
        let list = unsafe { (self.api().SDL_GetJoysticks)(&mut count) };
        self.take_list(list, count)
    }

    pub fn joystick_name_for_id(&self, id: SDL_JoystickID) -> Result<String> {
        let name = self.check_const_ptr(unsafe { (self.api().SDL_GetJoystickNameForID)(id) })?;
        Ok(unsafe { marshal::string_from_ptr(name) })
    }

    pub fn joystick_path_for_id(&self, id: SDL_JoystickID) -> Option<String> {
        unsafe { marshal::opt_string_from_ptr((self.api().SDL_GetJoystickPathForID)(id)) }
    }

    pub fn joystick_player_index_for_id(&self, id: SDL_JoystickID) -> Option<u32> {
        u32::try_from(unsafe { (self.api().SDL_GetJoystickPlayerIndexForID)(id) }).ok()
    }

    pub fn joystick_vendor_for_id(&self, id: SDL_JoystickID) -> u16 {
        unsafe { (self.api().SDL_GetJoystickVendorForID)(id) }
    }

    pub fn joystick_product_for_id(&self, id: SDL_JoystickID) -> u16 {
        unsafe { (self.api().SDL_GetJoystickProductForID)(id) }
    }

    pub fn joystick_type_for_id(&self, id: SDL_JoystickID) -> JoystickType {
        JoystickType::from_raw(unsafe { (self.api().SDL_GetJoystickTypeForID)(id) })
    }

    pub fn open_joystick(&self, id: SDL_JoystickID) -> Result<Joystick> {
        let raw = self.check_ptr(unsafe { (self.api().SDL_OpenJoystick)(id) })?;
        tracing::debug!(id, "joystick opened");
        Ok(Joystick { sdl: self.clone(), raw })
    }

    /// Poll joystick state; only needed when joystick events are disabled
    pub fn update_joysticks(&self) {
        unsafe { (self.api().SDL_UpdateJoysticks)() }
    }

    pub fn set_joystick_events_enabled(&self, enabled: bool) {
        unsafe { (self.api().SDL_SetJoystickEventsEnabled)(marshal::encode_bool(enabled)) }
    }

    pub fn joystick_events_enabled(&self) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_JoystickEventsEnabled)() })
    }

    /// Block other threads from touching joystick state until the guard drops
    pub fn lock_joysticks(&self) -> JoystickLock<'_> {
        unsafe { (self.api().SDL_LockJoysticks)() };
        JoystickLock { sdl: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, JoystickType::Unknown)]
    #[case(1, JoystickType::Gamepad)]
    #[case(4, JoystickType::FlightStick)]
    #[case(9, JoystickType::Throttle)]
    #[case(42, JoystickType::Unknown)]
    fn test_type_mapping(#[case] raw: c_int, #[case] expected: JoystickType) {
        assert_eq!(JoystickType::from_raw(raw), expected);
    }

    #[rstest]
    #[case(-1, None)]
    #[case(0, Some(ConnectionState::Unknown))]
    #[case(1, Some(ConnectionState::Wired))]
    #[case(2, Some(ConnectionState::Wireless))]
    fn test_connection_mapping(#[case] raw: c_int, #[case] expected: Option<ConnectionState>) {
        assert_eq!(ConnectionState::from_raw(raw), expected);
    }

    #[test]
    fn test_hat_diagonals() {
        assert_eq!(Hat::UP | Hat::RIGHT, Hat::RIGHT_UP);
        assert_eq!(Hat::LEFT | Hat::DOWN, Hat::LEFT_DOWN);
        assert!(Hat::CENTERED.is_empty());
        assert!(Hat::from_bits(0x06).contains(Hat::DOWN));
    }

    #[test]
    fn test_duration_clamped_to_millis() {
        assert_eq!(duration_ms(Duration::from_millis(250)), 250);
        assert_eq!(duration_ms(Duration::from_secs(u64::MAX)), u32::MAX);
    }
}
