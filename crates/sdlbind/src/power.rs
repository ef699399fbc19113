//! Battery status

use crate::error::Result;
use crate::sdl::Sdl;
use std::ffi::c_int;
use std::fmt;
use std::time::Duration;

/// `SDL_PowerState`, without the error value (reported as `Err` instead)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    /// Cannot determine power status
    Unknown,
    /// Not plugged in, running on the battery
    OnBattery,
    /// Plugged in, no battery available
    NoBattery,
    /// Plugged in, charging battery
    Charging,
    /// Plugged in, battery charged
    Charged,
}

impl PowerState {
    /// `None` for `SDL_POWERSTATE_ERROR` (-1)
    pub(crate) fn from_raw(value: c_int) -> Option<Self> {
        match value {
            v if v < 0 => None,
            1 => Some(Self::OnBattery),
            2 => Some(Self::NoBattery),
            3 => Some(Self::Charging),
            4 => Some(Self::Charged),
            _ => Some(Self::Unknown),
        }
    }

    /// Whether external power is connected
    pub fn is_plugged_in(self) -> bool {
        matches!(self, Self::NoBattery | Self::Charging | Self::Charged)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::OnBattery => "on battery",
            Self::NoBattery => "no battery",
            Self::Charging => "charging",
            Self::Charged => "charged",
        };
        f.write_str(name)
    }
}

/// Snapshot of the battery state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerInfo {
    pub state: PowerState,
    /// Estimated time left on battery, if known
    pub remaining: Option<Duration>,
    /// Charge left, `0..=100`, if known
    pub percent: Option<u8>,
}

impl PowerInfo {
    /// Build from the native triple; `-1` means unknown for both measures
    pub(crate) fn from_raw(state: c_int, seconds: c_int, percent: c_int) -> Option<Self> {
        Some(Self {
            state: PowerState::from_raw(state)?,
            remaining: u64::try_from(seconds).ok().map(Duration::from_secs),
            percent: u8::try_from(percent).ok().map(|p| p.min(100)),
        })
    }
}

impl Sdl {
    /// Current battery state of the system
    ///
    /// The reading may be a cached snapshot; calling this in a tight loop
    /// gains nothing.
    pub fn power_info(&self) -> Result<PowerInfo> {
        let mut seconds: c_int = -1;
        let mut percent: c_int = -1;
        let state = unsafe { (self.api().SDL_GetPowerInfo)(&mut seconds, &mut percent) };
        PowerInfo::from_raw(state, seconds, percent).ok_or_else(|| self.last_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Some(PowerState::Unknown))]
    #[case(1, Some(PowerState::OnBattery))]
    #[case(2, Some(PowerState::NoBattery))]
    #[case(3, Some(PowerState::Charging))]
    #[case(4, Some(PowerState::Charged))]
    #[case(-1, None)]
    fn test_state_mapping(#[case] raw: c_int, #[case] expected: Option<PowerState>) {
        assert_eq!(PowerState::from_raw(raw), expected);
    }

    #[test]
    fn test_unknown_measures_are_none() {
        let info = PowerInfo::from_raw(1, -1, -1).unwrap();
        assert_eq!(info.state, PowerState::OnBattery);
        assert_eq!(info.remaining, None);
        assert_eq!(info.percent, None);
        assert!(!info.state.is_plugged_in());
    }

    #[test]
    fn test_known_measures() {
        let info = PowerInfo::from_raw(3, 5400, 72).unwrap();
        assert_eq!(info.remaining, Some(Duration::from_secs(5400)));
        assert_eq!(info.percent, Some(72));
        assert!(info.state.is_plugged_in());
    }

    #[test]
    fn test_error_state_has_no_info() {
        assert_eq!(PowerInfo::from_raw(-1, 100, 50), None);
    }
}
