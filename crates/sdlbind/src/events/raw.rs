//! Native event block and its per-kind overlays
//!
//! `SDL_Event` is a 128-byte union whose first `u32` names the active member.
//! [`RawEvent`] holds the bytes; the overlay structs below mirror each union
//! member and are only ever viewed through a reference into a `RawEvent`.
//! Native booleans are declared as `u8`, so every overlay is valid for any
//! byte content.

use super::EventType;
use std::ffi::{c_char, c_void};
use std::fmt;

/// Size of the native event union
pub const EVENT_SIZE: usize = 128;

/// A native event block
#[repr(C, align(8))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    bytes: [u8; EVENT_SIZE],
}

impl RawEvent {
    pub const fn zeroed() -> Self {
        Self {
            bytes: [0; EVENT_SIZE],
        }
    }

    pub const fn from_bytes(bytes: [u8; EVENT_SIZE]) -> Self {
        Self { bytes }
    }

    /// Block with only the discriminant set
    pub fn with_kind(kind: EventType) -> Self {
        let mut raw = Self::zeroed();
        raw.set_kind(kind);
        raw
    }

    pub fn as_bytes(&self) -> &[u8; EVENT_SIZE] {
        &self.bytes
    }

    /// Discriminant
    pub fn kind(&self) -> EventType {
        EventType(self.overlay::<HeaderOverlay>().kind)
    }

    pub fn set_kind(&mut self, kind: EventType) {
        self.overlay_mut::<HeaderOverlay>().kind = kind.0;
    }

    /// Nanosecond timestamp shared by every event kind
    pub fn timestamp(&self) -> u64 {
        self.overlay::<HeaderOverlay>().timestamp
    }

    pub fn as_mut_ptr(&mut self) -> *mut RawEvent {
        self
    }

    pub(crate) fn overlay<T: Overlay>(&self) -> &T {
        // Safety: `Overlay` guarantees size and alignment fit this block and
        // that any byte content is a valid `T`.
        unsafe { &*(self as *const Self).cast::<T>() }
    }

    pub(crate) fn overlay_mut<T: Overlay>(&mut self) -> &mut T {
        // Safety: see `overlay`; field writes leave the remaining bytes as they were.
        unsafe { &mut *(self as *mut Self).cast::<T>() }
    }
}

impl Default for RawEvent {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl fmt::Debug for RawEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawEvent")
            .field("kind", &self.kind())
            .field("timestamp", &self.timestamp())
            .finish_non_exhaustive()
    }
}

/// A view of one union member
///
/// # Safety
///
/// Implementors are `#[repr(C)]`, at most [`EVENT_SIZE`] bytes, aligned to at
/// most 8, and valid for every bit pattern.
pub(crate) unsafe trait Overlay {}

macro_rules! overlays {
    ($(
        $(#[$meta:meta])*
        struct $name:ident {
            $($field:ident: $ty:ty,)*
        }
    )*) => {
        $(
            $(#[$meta])*
            #[repr(C)]
            #[derive(Clone, Copy)]
            pub(crate) struct $name {
                pub kind: u32,
                pub reserved: u32,
                pub timestamp: u64,
                $(pub $field: $ty,)*
            }

            unsafe impl Overlay for $name {}

            const _: () = assert!(
                std::mem::size_of::<$name>() <= EVENT_SIZE
                    && std::mem::align_of::<$name>() <= std::mem::align_of::<RawEvent>()
            );
        )*
    };
}

overlays! {
    /// `SDL_CommonEvent`, also `SDL_QuitEvent`
    struct HeaderOverlay {}

    struct DisplayOverlay {
        display_id: u32,
        data1: i32,
        data2: i32,
    }

    struct WindowOverlay {
        window_id: u32,
        data1: i32,
        data2: i32,
    }

    /// Keyboard, mouse, joystick, gamepad and camera device events; render
    /// events carry a window id in the same slot
    struct DeviceOverlay {
        which: u32,
    }

    struct KeyboardOverlay {
        window_id: u32,
        which: u32,
        scancode: u32,
        key: u32,
        modifiers: u16,
        raw: u16,
        down: u8,
        repeat: u8,
    }

    struct TextEditingOverlay {
        window_id: u32,
        text: *const c_char,
        start: i32,
        length: i32,
    }

    struct TextEditingCandidatesOverlay {
        window_id: u32,
        candidates: *const *const c_char,
        num_candidates: i32,
        selected_candidate: i32,
        horizontal: u8,
        padding: [u8; 3],
    }

    struct TextInputOverlay {
        window_id: u32,
        text: *const c_char,
    }

    struct MouseMotionOverlay {
        window_id: u32,
        which: u32,
        state: u32,
        x: f32,
        y: f32,
        xrel: f32,
        yrel: f32,
    }

    struct MouseButtonOverlay {
        window_id: u32,
        which: u32,
        button: u8,
        down: u8,
        clicks: u8,
        padding: u8,
        x: f32,
        y: f32,
    }

    struct MouseWheelOverlay {
        window_id: u32,
        which: u32,
        x: f32,
        y: f32,
        direction: u32,
        mouse_x: f32,
        mouse_y: f32,
        integer_x: i32,
        integer_y: i32,
    }

    /// Joystick and gamepad axis motion
    struct AxisOverlay {
        which: u32,
        axis: u8,
        padding: [u8; 3],
        value: i16,
        padding4: u16,
    }

    struct JoyBallOverlay {
        which: u32,
        ball: u8,
        padding: [u8; 3],
        xrel: i16,
        yrel: i16,
    }

    struct JoyHatOverlay {
        which: u32,
        hat: u8,
        value: u8,
        padding: [u8; 2],
    }

    /// Joystick and gamepad buttons
    struct ButtonOverlay {
        which: u32,
        button: u8,
        down: u8,
        padding: [u8; 2],
    }

    struct JoyBatteryOverlay {
        which: u32,
        state: i32,
        percent: i32,
    }

    struct GamepadTouchpadOverlay {
        which: u32,
        touchpad: i32,
        finger: i32,
        x: f32,
        y: f32,
        pressure: f32,
    }

    struct GamepadSensorOverlay {
        which: u32,
        sensor: i32,
        data: [f32; 3],
        sensor_timestamp: u64,
    }

    struct AudioDeviceOverlay {
        which: u32,
        recording: u8,
        padding: [u8; 3],
    }

    struct TouchFingerOverlay {
        touch_id: u64,
        finger_id: u64,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        pressure: f32,
        window_id: u32,
    }

    struct PenProximityOverlay {
        window_id: u32,
        which: u32,
    }

    struct PenMotionOverlay {
        window_id: u32,
        which: u32,
        pen_state: u32,
        x: f32,
        y: f32,
    }

    struct PenTouchOverlay {
        window_id: u32,
        which: u32,
        pen_state: u32,
        x: f32,
        y: f32,
        eraser: u8,
        down: u8,
    }

    struct PenButtonOverlay {
        window_id: u32,
        which: u32,
        pen_state: u32,
        x: f32,
        y: f32,
        button: u8,
        down: u8,
    }

    struct PenAxisOverlay {
        window_id: u32,
        which: u32,
        pen_state: u32,
        x: f32,
        y: f32,
        axis: u32,
        value: f32,
    }

    struct DropOverlay {
        window_id: u32,
        x: f32,
        y: f32,
        source: *const c_char,
        data: *const c_char,
    }

    struct ClipboardOverlay {
        owner: u8,
        num_mime_types: i32,
        mime_types: *const *const c_char,
    }

    struct SensorOverlay {
        which: u32,
        data: [f32; 6],
        sensor_timestamp: u64,
    }

    struct UserOverlay {
        window_id: u32,
        code: i32,
        data1: *mut c_void,
        data2: *mut c_void,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, offset_of, size_of};

    #[test]
    fn test_raw_event_layout() {
        assert_eq!(size_of::<RawEvent>(), 128);
        assert_eq!(align_of::<RawEvent>(), 8);
    }

    #[test]
    fn test_header_layout() {
        assert_eq!(size_of::<HeaderOverlay>(), 16);
        assert_eq!(offset_of!(HeaderOverlay, timestamp), 8);
    }

    #[test]
    fn test_keyboard_layout() {
        assert_eq!(offset_of!(KeyboardOverlay, window_id), 16);
        assert_eq!(offset_of!(KeyboardOverlay, scancode), 24);
        assert_eq!(offset_of!(KeyboardOverlay, modifiers), 32);
        assert_eq!(offset_of!(KeyboardOverlay, down), 36);
        assert_eq!(offset_of!(KeyboardOverlay, repeat), 37);
        assert_eq!(size_of::<KeyboardOverlay>(), 40);
    }

    #[test]
    fn test_mouse_layouts() {
        assert_eq!(offset_of!(MouseButtonOverlay, button), 24);
        assert_eq!(offset_of!(MouseButtonOverlay, x), 28);
        assert_eq!(size_of::<MouseButtonOverlay>(), 40);
        assert_eq!(offset_of!(MouseWheelOverlay, direction), 32);
        assert_eq!(offset_of!(MouseWheelOverlay, integer_y), 48);
    }

    #[test]
    fn test_axis_layout() {
        assert_eq!(offset_of!(AxisOverlay, axis), 20);
        assert_eq!(offset_of!(AxisOverlay, value), 24);
        assert_eq!(size_of::<AxisOverlay>(), 32);
    }

    #[test]
    fn test_sensor_layouts() {
        assert_eq!(offset_of!(GamepadSensorOverlay, sensor_timestamp), 40);
        assert_eq!(offset_of!(SensorOverlay, sensor_timestamp), 48);
        assert_eq!(size_of::<SensorOverlay>(), 56);
    }

    #[test]
    fn test_touch_finger_layout() {
        assert_eq!(offset_of!(TouchFingerOverlay, finger_id), 24);
        assert_eq!(offset_of!(TouchFingerOverlay, window_id), 52);
        assert_eq!(size_of::<TouchFingerOverlay>(), 56);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_pointer_layouts() {
        assert_eq!(offset_of!(TextEditingOverlay, text), 24);
        assert_eq!(offset_of!(TextEditingOverlay, length), 36);
        assert_eq!(offset_of!(TextEditingCandidatesOverlay, horizontal), 40);
        assert_eq!(offset_of!(DropOverlay, source), 32);
        assert_eq!(offset_of!(DropOverlay, data), 40);
        assert_eq!(offset_of!(ClipboardOverlay, num_mime_types), 20);
        assert_eq!(offset_of!(ClipboardOverlay, mime_types), 24);
        assert_eq!(offset_of!(UserOverlay, data1), 24);
        assert_eq!(size_of::<UserOverlay>(), 40);
    }

    #[test]
    fn test_kind_round_trip() {
        let mut raw = RawEvent::zeroed();
        raw.set_kind(EventType::WINDOW_RESIZED);
        assert_eq!(raw.kind(), EventType::WINDOW_RESIZED);
        assert_eq!(&raw.as_bytes()[..4], &0x206u32.to_ne_bytes());
    }
}
