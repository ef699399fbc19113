//! Events
//!
//! Native events arrive as a 128-byte [`RawEvent`]. [`Event::decode`] is the
//! single place that reads one: it inspects the discriminant, views the block
//! through the matching overlay, and copies every field (strings included)
//! into an owned [`Event`] value. Nothing else in the crate reinterprets
//! event memory.

mod queue;
mod raw;

pub use queue::{EventAction, EventFilterGuard, EventWatch};
pub use raw::{RawEvent, EVENT_SIZE};

use crate::ffi::marshal;
use crate::keyboard::Keymod;
use crate::mouse::{MouseButtonFlags, MouseWheelDirection};
use raw::*;
use std::fmt;

/// Event discriminant
///
/// Open set: values in `USER..=LAST` are application-defined and unknown
/// values from newer libraries are preserved.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EventType(pub u32);

macro_rules! event_types {
    ($($name:ident = $value:expr,)*) => {
        impl EventType {
            $(pub const $name: Self = Self($value);)*

            /// Symbolic name of a known kind
            pub fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some(stringify!($name)),)*
                    _ => None,
                }
            }
        }
    };
}

event_types! {
    QUIT = 0x100,
    TERMINATING = 0x101,
    LOW_MEMORY = 0x102,
    WILL_ENTER_BACKGROUND = 0x103,
    DID_ENTER_BACKGROUND = 0x104,
    WILL_ENTER_FOREGROUND = 0x105,
    DID_ENTER_FOREGROUND = 0x106,
    LOCALE_CHANGED = 0x107,
    SYSTEM_THEME_CHANGED = 0x108,
    DISPLAY_ORIENTATION = 0x151,
    DISPLAY_ADDED = 0x152,
    DISPLAY_REMOVED = 0x153,
    DISPLAY_MOVED = 0x154,
    DISPLAY_DESKTOP_MODE_CHANGED = 0x155,
    DISPLAY_CURRENT_MODE_CHANGED = 0x156,
    DISPLAY_CONTENT_SCALE_CHANGED = 0x157,
    WINDOW_SHOWN = 0x202,
    WINDOW_HIDDEN = 0x203,
    WINDOW_EXPOSED = 0x204,
    WINDOW_MOVED = 0x205,
    WINDOW_RESIZED = 0x206,
    WINDOW_PIXEL_SIZE_CHANGED = 0x207,
    WINDOW_METAL_VIEW_RESIZED = 0x208,
    WINDOW_MINIMIZED = 0x209,
    WINDOW_MAXIMIZED = 0x20A,
    WINDOW_RESTORED = 0x20B,
    WINDOW_MOUSE_ENTER = 0x20C,
    WINDOW_MOUSE_LEAVE = 0x20D,
    WINDOW_FOCUS_GAINED = 0x20E,
    WINDOW_FOCUS_LOST = 0x20F,
    WINDOW_CLOSE_REQUESTED = 0x210,
    WINDOW_HIT_TEST = 0x211,
    WINDOW_ICCPROF_CHANGED = 0x212,
    WINDOW_DISPLAY_CHANGED = 0x213,
    WINDOW_DISPLAY_SCALE_CHANGED = 0x214,
    WINDOW_SAFE_AREA_CHANGED = 0x215,
    WINDOW_OCCLUDED = 0x216,
    WINDOW_ENTER_FULLSCREEN = 0x217,
    WINDOW_LEAVE_FULLSCREEN = 0x218,
    WINDOW_DESTROYED = 0x219,
    WINDOW_HDR_STATE_CHANGED = 0x21A,
    KEY_DOWN = 0x300,
    KEY_UP = 0x301,
    TEXT_EDITING = 0x302,
    TEXT_INPUT = 0x303,
    KEYMAP_CHANGED = 0x304,
    KEYBOARD_ADDED = 0x305,
    KEYBOARD_REMOVED = 0x306,
    TEXT_EDITING_CANDIDATES = 0x307,
    MOUSE_MOTION = 0x400,
    MOUSE_BUTTON_DOWN = 0x401,
    MOUSE_BUTTON_UP = 0x402,
    MOUSE_WHEEL = 0x403,
    MOUSE_ADDED = 0x404,
    MOUSE_REMOVED = 0x405,
    JOYSTICK_AXIS_MOTION = 0x600,
    JOYSTICK_BALL_MOTION = 0x601,
    JOYSTICK_HAT_MOTION = 0x602,
    JOYSTICK_BUTTON_DOWN = 0x603,
    JOYSTICK_BUTTON_UP = 0x604,
    JOYSTICK_ADDED = 0x605,
    JOYSTICK_REMOVED = 0x606,
    JOYSTICK_BATTERY_UPDATED = 0x607,
    JOYSTICK_UPDATE_COMPLETE = 0x608,
    GAMEPAD_AXIS_MOTION = 0x650,
    GAMEPAD_BUTTON_DOWN = 0x651,
    GAMEPAD_BUTTON_UP = 0x652,
    GAMEPAD_ADDED = 0x653,
    GAMEPAD_REMOVED = 0x654,
    GAMEPAD_REMAPPED = 0x655,
    GAMEPAD_TOUCHPAD_DOWN = 0x656,
    GAMEPAD_TOUCHPAD_MOTION = 0x657,
    GAMEPAD_TOUCHPAD_UP = 0x658,
    GAMEPAD_SENSOR_UPDATE = 0x659,
    GAMEPAD_UPDATE_COMPLETE = 0x65A,
    GAMEPAD_STEAM_HANDLE_UPDATED = 0x65B,
    FINGER_DOWN = 0x700,
    FINGER_UP = 0x701,
    FINGER_MOTION = 0x702,
    FINGER_CANCELED = 0x703,
    CLIPBOARD_UPDATE = 0x900,
    DROP_FILE = 0x1000,
    DROP_TEXT = 0x1001,
    DROP_BEGIN = 0x1002,
    DROP_COMPLETE = 0x1003,
    DROP_POSITION = 0x1004,
    AUDIO_DEVICE_ADDED = 0x1100,
    AUDIO_DEVICE_REMOVED = 0x1101,
    AUDIO_DEVICE_FORMAT_CHANGED = 0x1102,
    SENSOR_UPDATE = 0x1200,
    PEN_PROXIMITY_IN = 0x1300,
    PEN_PROXIMITY_OUT = 0x1301,
    PEN_DOWN = 0x1302,
    PEN_UP = 0x1303,
    PEN_BUTTON_DOWN = 0x1304,
    PEN_BUTTON_UP = 0x1305,
    PEN_MOTION = 0x1306,
    PEN_AXIS = 0x1307,
    CAMERA_DEVICE_ADDED = 0x1400,
    CAMERA_DEVICE_REMOVED = 0x1401,
    CAMERA_DEVICE_APPROVED = 0x1402,
    CAMERA_DEVICE_DENIED = 0x1403,
    RENDER_TARGETS_RESET = 0x2000,
    RENDER_DEVICE_RESET = 0x2001,
    RENDER_DEVICE_LOST = 0x2002,
    PRIVATE0 = 0x4000,
    PRIVATE1 = 0x4001,
    PRIVATE2 = 0x4002,
    PRIVATE3 = 0x4003,
    POLL_SENTINEL = 0x7F00,
    USER = 0x8000,
    LAST = 0xFFFF,
}

impl EventType {
    pub const FIRST: Self = Self(0);
    pub const DISPLAY_FIRST: Self = Self::DISPLAY_ORIENTATION;
    pub const DISPLAY_LAST: Self = Self::DISPLAY_CONTENT_SCALE_CHANGED;
    pub const WINDOW_FIRST: Self = Self::WINDOW_SHOWN;
    pub const WINDOW_LAST: Self = Self::WINDOW_HDR_STATE_CHANGED;

    /// Application-defined kind (`USER..=LAST`)
    pub fn is_user(self) -> bool {
        (Self::USER.0..=Self::LAST.0).contains(&self.0)
    }

    fn within(self, first: Self, last: Self) -> bool {
        (first.0..=last.0).contains(&self.0)
    }
}

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "EventType::{}", name),
            None if self.is_user() => write!(f, "EventType::USER+{:#x}", self.0 - Self::USER.0),
            None => write!(f, "EventType({:#x})", self.0),
        }
    }
}

impl From<u32> for EventType {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

crate::native_flags! {
    /// Pen state carried by pen events
    pub struct PenInputFlags: u32 {
        const DOWN = 1 << 0;
        const BUTTON_1 = 1 << 1;
        const BUTTON_2 = 1 << 2;
        const BUTTON_3 = 1 << 3;
        const BUTTON_4 = 1 << 4;
        const BUTTON_5 = 1 << 5;
        const ERASER_TIP = 1 << 30;
    }
}

/// Header-only events (quit, application lifecycle, keymap changes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommonEvent {
    pub kind: EventType,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub display_id: u32,
    pub data1: i32,
    pub data2: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub window_id: u32,
    pub data1: i32,
    pub data2: i32,
}

/// Device added/removed style events: only the instance id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub which: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub window_id: u32,
    pub which: u32,
    pub scancode: u32,
    pub key: u32,
    pub modifiers: Keymod,
    pub raw: u16,
    pub down: bool,
    pub repeat: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextEditingEvent {
    pub timestamp: u64,
    pub window_id: u32,
    pub text: String,
    pub start: i32,
    pub length: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextEditingCandidatesEvent {
    pub timestamp: u64,
    pub window_id: u32,
    pub candidates: Vec<String>,
    pub selected_candidate: i32,
    pub horizontal: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextInputEvent {
    pub timestamp: u64,
    pub window_id: u32,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMotionEvent {
    pub timestamp: u64,
    pub window_id: u32,
    pub which: u32,
    pub state: MouseButtonFlags,
    pub x: f32,
    pub y: f32,
    pub xrel: f32,
    pub yrel: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub window_id: u32,
    pub which: u32,
    pub button: u8,
    pub down: bool,
    pub clicks: u8,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseWheelEvent {
    pub timestamp: u64,
    pub window_id: u32,
    pub which: u32,
    pub x: f32,
    pub y: f32,
    pub direction: MouseWheelDirection,
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub integer_x: i32,
    pub integer_y: i32,
}

/// Joystick or gamepad axis motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub which: u32,
    pub axis: u8,
    pub value: i16,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoyBallEvent {
    pub timestamp: u64,
    pub which: u32,
    pub ball: u8,
    pub xrel: i16,
    pub yrel: i16,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoyHatEvent {
    pub timestamp: u64,
    pub which: u32,
    pub hat: u8,
    pub value: u8,
}

/// Joystick or gamepad button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub which: u32,
    pub button: u8,
    pub down: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoyBatteryEvent {
    pub timestamp: u64,
    pub which: u32,
    /// `SDL_PowerState` value
    pub state: i32,
    pub percent: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadTouchpadEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub which: u32,
    pub touchpad: i32,
    pub finger: i32,
    pub x: f32,
    pub y: f32,
    pub pressure: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadSensorEvent {
    pub timestamp: u64,
    pub which: u32,
    pub sensor: i32,
    pub data: [f32; 3],
    pub sensor_timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioDeviceEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub which: u32,
    pub recording: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorEvent {
    pub timestamp: u64,
    pub which: u32,
    pub data: [f32; 6],
    pub sensor_timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchFingerEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub touch_id: u64,
    pub finger_id: u64,
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub pressure: f32,
    pub window_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenProximityEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub window_id: u32,
    pub which: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenMotionEvent {
    pub timestamp: u64,
    pub window_id: u32,
    pub which: u32,
    pub pen_state: PenInputFlags,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenTouchEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub window_id: u32,
    pub which: u32,
    pub pen_state: PenInputFlags,
    pub x: f32,
    pub y: f32,
    pub eraser: bool,
    pub down: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenButtonEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub window_id: u32,
    pub which: u32,
    pub pen_state: PenInputFlags,
    pub x: f32,
    pub y: f32,
    pub button: u8,
    pub down: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenAxisEvent {
    pub timestamp: u64,
    pub window_id: u32,
    pub which: u32,
    pub pen_state: PenInputFlags,
    pub x: f32,
    pub y: f32,
    /// `SDL_PenAxis` value
    pub axis: u32,
    pub value: f32,
}

/// Drag and drop; `source` and `data` are `None` where the native side
/// passes null (drop begin/complete)
#[derive(Debug, Clone, PartialEq)]
pub struct DropEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub window_id: u32,
    pub x: f32,
    pub y: f32,
    pub source: Option<String>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardEvent {
    pub timestamp: u64,
    pub owner: bool,
    pub mime_types: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub window_id: u32,
}

/// Application-defined event
///
/// The two data words are opaque to this crate and carried as addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserEvent {
    pub kind: EventType,
    pub timestamp: u64,
    pub window_id: u32,
    pub code: i32,
    pub data1: usize,
    pub data2: usize,
}

/// A decoded event
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Quit(CommonEvent),
    /// Application lifecycle, locale and theme notifications
    App(CommonEvent),
    KeymapChanged(CommonEvent),
    Display(DisplayEvent),
    Window(WindowEvent),
    KeyboardDevice(DeviceEvent),
    Key(KeyboardEvent),
    TextEditing(TextEditingEvent),
    TextEditingCandidates(TextEditingCandidatesEvent),
    TextInput(TextInputEvent),
    MouseDevice(DeviceEvent),
    MouseMotion(MouseMotionEvent),
    MouseButton(MouseButtonEvent),
    MouseWheel(MouseWheelEvent),
    JoyDevice(DeviceEvent),
    JoyAxis(AxisEvent),
    JoyBall(JoyBallEvent),
    JoyHat(JoyHatEvent),
    JoyButton(ButtonEvent),
    JoyBattery(JoyBatteryEvent),
    GamepadDevice(DeviceEvent),
    GamepadAxis(AxisEvent),
    GamepadButton(ButtonEvent),
    GamepadTouchpad(GamepadTouchpadEvent),
    GamepadSensor(GamepadSensorEvent),
    TouchFinger(TouchFingerEvent),
    Clipboard(ClipboardEvent),
    Drop(DropEvent),
    AudioDevice(AudioDeviceEvent),
    Sensor(SensorEvent),
    PenProximity(PenProximityEvent),
    PenTouch(PenTouchEvent),
    PenButton(PenButtonEvent),
    PenMotion(PenMotionEvent),
    PenAxis(PenAxisEvent),
    CameraDevice(DeviceEvent),
    Render(RenderEvent),
    User(UserEvent),
    /// A kind this crate has no payload for; the block is kept verbatim
    Unknown(RawEvent),
}

impl Event {
    /// Decode a native event block
    ///
    /// # Safety
    ///
    /// String and string-list pointers inside the block must be null or
    /// valid for the duration of the call, which holds for any block the
    /// native event queue produced.
    pub unsafe fn decode(raw: &RawEvent) -> Event {
        type E = EventType;

        let kind = raw.kind();
        let header = raw.overlay::<HeaderOverlay>();
        let timestamp = header.timestamp;
        let common = CommonEvent { kind, timestamp };

        match kind {
            E::QUIT => Event::Quit(common),
            k if k.within(E::TERMINATING, E::SYSTEM_THEME_CHANGED) => Event::App(common),
            E::KEYMAP_CHANGED => Event::KeymapChanged(common),

            k if k.within(E::DISPLAY_FIRST, E::DISPLAY_LAST) => {
                let o = raw.overlay::<DisplayOverlay>();
                Event::Display(DisplayEvent {
                    kind,
                    timestamp,
                    display_id: o.display_id,
                    data1: o.data1,
                    data2: o.data2,
                })
            }

            k if k.within(E::WINDOW_FIRST, E::WINDOW_LAST) => {
                let o = raw.overlay::<WindowOverlay>();
                Event::Window(WindowEvent {
                    kind,
                    timestamp,
                    window_id: o.window_id,
                    data1: o.data1,
                    data2: o.data2,
                })
            }

            E::KEY_DOWN | E::KEY_UP => {
                let o = raw.overlay::<KeyboardOverlay>();
                Event::Key(KeyboardEvent {
                    kind,
                    timestamp,
                    window_id: o.window_id,
                    which: o.which,
                    scancode: o.scancode,
                    key: o.key,
                    modifiers: Keymod::from_bits(o.modifiers),
                    raw: o.raw,
                    down: marshal::decode_bool(o.down),
                    repeat: marshal::decode_bool(o.repeat),
                })
            }

            E::TEXT_EDITING => {
                let o = raw.overlay::<TextEditingOverlay>();
                Event::TextEditing(TextEditingEvent {
                    timestamp,
                    window_id: o.window_id,
                    text: marshal::string_from_ptr(o.text),
                    start: o.start,
                    length: o.length,
                })
            }

            E::TEXT_EDITING_CANDIDATES => {
                let o = raw.overlay::<TextEditingCandidatesOverlay>();
                Event::TextEditingCandidates(TextEditingCandidatesEvent {
                    timestamp,
                    window_id: o.window_id,
                    candidates: marshal::strings_from_counted_ptr_array(o.candidates, o.num_candidates),
                    selected_candidate: o.selected_candidate,
                    horizontal: marshal::decode_bool(o.horizontal),
                })
            }

            E::TEXT_INPUT => {
                let o = raw.overlay::<TextInputOverlay>();
                Event::TextInput(TextInputEvent {
                    timestamp,
                    window_id: o.window_id,
                    text: marshal::string_from_ptr(o.text),
                })
            }

            E::KEYBOARD_ADDED | E::KEYBOARD_REMOVED => Event::KeyboardDevice(device(raw, kind)),
            E::MOUSE_ADDED | E::MOUSE_REMOVED => Event::MouseDevice(device(raw, kind)),

            E::MOUSE_MOTION => {
                let o = raw.overlay::<MouseMotionOverlay>();
                Event::MouseMotion(MouseMotionEvent {
                    timestamp,
                    window_id: o.window_id,
                    which: o.which,
                    state: MouseButtonFlags::from_bits(o.state),
                    x: o.x,
                    y: o.y,
                    xrel: o.xrel,
                    yrel: o.yrel,
                })
            }

            E::MOUSE_BUTTON_DOWN | E::MOUSE_BUTTON_UP => {
                let o = raw.overlay::<MouseButtonOverlay>();
                Event::MouseButton(MouseButtonEvent {
                    kind,
                    timestamp,
                    window_id: o.window_id,
                    which: o.which,
                    button: o.button,
                    down: marshal::decode_bool(o.down),
                    clicks: o.clicks,
                    x: o.x,
                    y: o.y,
                })
            }

            E::MOUSE_WHEEL => {
                let o = raw.overlay::<MouseWheelOverlay>();
                Event::MouseWheel(MouseWheelEvent {
                    timestamp,
                    window_id: o.window_id,
                    which: o.which,
                    x: o.x,
                    y: o.y,
                    direction: MouseWheelDirection::from_raw(o.direction),
                    mouse_x: o.mouse_x,
                    mouse_y: o.mouse_y,
                    integer_x: o.integer_x,
                    integer_y: o.integer_y,
                })
            }

            E::JOYSTICK_AXIS_MOTION => Event::JoyAxis(axis(raw, kind)),
            E::GAMEPAD_AXIS_MOTION => Event::GamepadAxis(axis(raw, kind)),

            E::JOYSTICK_BALL_MOTION => {
                let o = raw.overlay::<JoyBallOverlay>();
                Event::JoyBall(JoyBallEvent {
                    timestamp,
                    which: o.which,
                    ball: o.ball,
                    xrel: o.xrel,
                    yrel: o.yrel,
                })
            }

            E::JOYSTICK_HAT_MOTION => {
                let o = raw.overlay::<JoyHatOverlay>();
                Event::JoyHat(JoyHatEvent {
                    timestamp,
                    which: o.which,
                    hat: o.hat,
                    value: o.value,
                })
            }

            E::JOYSTICK_BUTTON_DOWN | E::JOYSTICK_BUTTON_UP => Event::JoyButton(button(raw, kind)),
            E::GAMEPAD_BUTTON_DOWN | E::GAMEPAD_BUTTON_UP => Event::GamepadButton(button(raw, kind)),

            E::JOYSTICK_ADDED | E::JOYSTICK_REMOVED | E::JOYSTICK_UPDATE_COMPLETE => {
                Event::JoyDevice(device(raw, kind))
            }

            E::JOYSTICK_BATTERY_UPDATED => {
                let o = raw.overlay::<JoyBatteryOverlay>();
                Event::JoyBattery(JoyBatteryEvent {
                    timestamp,
                    which: o.which,
                    state: o.state,
                    percent: o.percent,
                })
            }

            E::GAMEPAD_ADDED
            | E::GAMEPAD_REMOVED
            | E::GAMEPAD_REMAPPED
            | E::GAMEPAD_UPDATE_COMPLETE
            | E::GAMEPAD_STEAM_HANDLE_UPDATED => Event::GamepadDevice(device(raw, kind)),

            E::GAMEPAD_TOUCHPAD_DOWN | E::GAMEPAD_TOUCHPAD_MOTION | E::GAMEPAD_TOUCHPAD_UP => {
                let o = raw.overlay::<GamepadTouchpadOverlay>();
                Event::GamepadTouchpad(GamepadTouchpadEvent {
                    kind,
                    timestamp,
                    which: o.which,
                    touchpad: o.touchpad,
                    finger: o.finger,
                    x: o.x,
                    y: o.y,
                    pressure: o.pressure,
                })
            }

            E::GAMEPAD_SENSOR_UPDATE => {
                let o = raw.overlay::<GamepadSensorOverlay>();
                Event::GamepadSensor(GamepadSensorEvent {
                    timestamp,
                    which: o.which,
                    sensor: o.sensor,
                    data: o.data,
                    sensor_timestamp: o.sensor_timestamp,
                })
            }

            k if k.within(E::FINGER_DOWN, E::FINGER_CANCELED) => {
                let o = raw.overlay::<TouchFingerOverlay>();
                Event::TouchFinger(TouchFingerEvent {
                    kind,
                    timestamp,
                    touch_id: o.touch_id,
                    finger_id: o.finger_id,
                    x: o.x,
                    y: o.y,
                    dx: o.dx,
                    dy: o.dy,
                    pressure: o.pressure,
                    window_id: o.window_id,
                })
            }

            E::CLIPBOARD_UPDATE => {
                let o = raw.overlay::<ClipboardOverlay>();
                Event::Clipboard(ClipboardEvent {
                    timestamp,
                    owner: marshal::decode_bool(o.owner),
                    mime_types: marshal::strings_from_counted_ptr_array(o.mime_types, o.num_mime_types),
                })
            }

            k if k.within(E::DROP_FILE, E::DROP_POSITION) => {
                let o = raw.overlay::<DropOverlay>();
                Event::Drop(DropEvent {
                    kind,
                    timestamp,
                    window_id: o.window_id,
                    x: o.x,
                    y: o.y,
                    source: marshal::opt_string_from_ptr(o.source),
                    data: marshal::opt_string_from_ptr(o.data),
                })
            }

            k if k.within(E::AUDIO_DEVICE_ADDED, E::AUDIO_DEVICE_FORMAT_CHANGED) => {
                let o = raw.overlay::<AudioDeviceOverlay>();
                Event::AudioDevice(AudioDeviceEvent {
                    kind,
                    timestamp,
                    which: o.which,
                    recording: marshal::decode_bool(o.recording),
                })
            }

            E::SENSOR_UPDATE => {
                let o = raw.overlay::<SensorOverlay>();
                Event::Sensor(SensorEvent {
                    timestamp,
                    which: o.which,
                    data: o.data,
                    sensor_timestamp: o.sensor_timestamp,
                })
            }

            E::PEN_PROXIMITY_IN | E::PEN_PROXIMITY_OUT => {
                let o = raw.overlay::<PenProximityOverlay>();
                Event::PenProximity(PenProximityEvent {
                    kind,
                    timestamp,
                    window_id: o.window_id,
                    which: o.which,
                })
            }

            E::PEN_DOWN | E::PEN_UP => {
                let o = raw.overlay::<PenTouchOverlay>();
                Event::PenTouch(PenTouchEvent {
                    kind,
                    timestamp,
                    window_id: o.window_id,
                    which: o.which,
                    pen_state: PenInputFlags::from_bits(o.pen_state),
                    x: o.x,
                    y: o.y,
                    eraser: marshal::decode_bool(o.eraser),
                    down: marshal::decode_bool(o.down),
                })
            }

            E::PEN_BUTTON_DOWN | E::PEN_BUTTON_UP => {
                let o = raw.overlay::<PenButtonOverlay>();
                Event::PenButton(PenButtonEvent {
                    kind,
                    timestamp,
                    window_id: o.window_id,
                    which: o.which,
                    pen_state: PenInputFlags::from_bits(o.pen_state),
                    x: o.x,
                    y: o.y,
                    button: o.button,
                    down: marshal::decode_bool(o.down),
                })
            }

            E::PEN_MOTION => {
                let o = raw.overlay::<PenMotionOverlay>();
                Event::PenMotion(PenMotionEvent {
                    timestamp,
                    window_id: o.window_id,
                    which: o.which,
                    pen_state: PenInputFlags::from_bits(o.pen_state),
                    x: o.x,
                    y: o.y,
                })
            }

            E::PEN_AXIS => {
                let o = raw.overlay::<PenAxisOverlay>();
                Event::PenAxis(PenAxisEvent {
                    timestamp,
                    window_id: o.window_id,
                    which: o.which,
                    pen_state: PenInputFlags::from_bits(o.pen_state),
                    x: o.x,
                    y: o.y,
                    axis: o.axis,
                    value: o.value,
                })
            }

            k if k.within(E::CAMERA_DEVICE_ADDED, E::CAMERA_DEVICE_DENIED) => {
                Event::CameraDevice(device(raw, kind))
            }

            k if k.within(E::RENDER_TARGETS_RESET, E::RENDER_DEVICE_LOST) => {
                let o = raw.overlay::<DeviceOverlay>();
                Event::Render(RenderEvent {
                    kind,
                    timestamp,
                    window_id: o.which,
                })
            }

            k if k.is_user() => {
                let o = raw.overlay::<UserOverlay>();
                Event::User(UserEvent {
                    kind,
                    timestamp,
                    window_id: o.window_id,
                    code: o.code,
                    data1: o.data1 as usize,
                    data2: o.data2 as usize,
                })
            }

            _ => Event::Unknown(*raw),
        }
    }

    /// Encode back into a native block
    ///
    /// Only kinds without borrowed native memory can be encoded: quit,
    /// application, keymap, display, window, user and unknown events.
    pub fn to_raw(&self) -> Option<RawEvent> {
        let mut raw = RawEvent::zeroed();
        match self {
            Event::Quit(e) | Event::App(e) | Event::KeymapChanged(e) => {
                write_header(&mut raw, e.kind, e.timestamp);
            }
            Event::Display(e) => {
                write_header(&mut raw, e.kind, e.timestamp);
                let o = raw.overlay_mut::<DisplayOverlay>();
                o.display_id = e.display_id;
                o.data1 = e.data1;
                o.data2 = e.data2;
            }
            Event::Window(e) => {
                write_header(&mut raw, e.kind, e.timestamp);
                let o = raw.overlay_mut::<WindowOverlay>();
                o.window_id = e.window_id;
                o.data1 = e.data1;
                o.data2 = e.data2;
            }
            Event::User(e) => {
                write_header(&mut raw, e.kind, e.timestamp);
                let o = raw.overlay_mut::<UserOverlay>();
                o.window_id = e.window_id;
                o.code = e.code;
                o.data1 = e.data1 as *mut _;
                o.data2 = e.data2 as *mut _;
            }
            Event::Unknown(block) => raw = *block,
            _ => return None,
        }
        Some(raw)
    }

    /// Discriminant of the decoded event
    pub fn kind(&self) -> EventType {
        match self {
            Event::Quit(e) | Event::App(e) | Event::KeymapChanged(e) => e.kind,
            Event::Display(e) => e.kind,
            Event::Window(e) => e.kind,
            Event::KeyboardDevice(e)
            | Event::MouseDevice(e)
            | Event::JoyDevice(e)
            | Event::GamepadDevice(e)
            | Event::CameraDevice(e) => e.kind,
            Event::Key(e) => e.kind,
            Event::TextEditing(_) => EventType::TEXT_EDITING,
            Event::TextEditingCandidates(_) => EventType::TEXT_EDITING_CANDIDATES,
            Event::TextInput(_) => EventType::TEXT_INPUT,
            Event::MouseMotion(_) => EventType::MOUSE_MOTION,
            Event::MouseButton(e) => e.kind,
            Event::MouseWheel(_) => EventType::MOUSE_WHEEL,
            Event::JoyAxis(e) | Event::GamepadAxis(e) => e.kind,
            Event::JoyBall(_) => EventType::JOYSTICK_BALL_MOTION,
            Event::JoyHat(_) => EventType::JOYSTICK_HAT_MOTION,
            Event::JoyButton(e) | Event::GamepadButton(e) => e.kind,
            Event::JoyBattery(_) => EventType::JOYSTICK_BATTERY_UPDATED,
            Event::GamepadTouchpad(e) => e.kind,
            Event::GamepadSensor(_) => EventType::GAMEPAD_SENSOR_UPDATE,
            Event::TouchFinger(e) => e.kind,
            Event::Clipboard(_) => EventType::CLIPBOARD_UPDATE,
            Event::Drop(e) => e.kind,
            Event::AudioDevice(e) => e.kind,
            Event::Sensor(_) => EventType::SENSOR_UPDATE,
            Event::PenProximity(e) => e.kind,
            Event::PenTouch(e) => e.kind,
            Event::PenButton(e) => e.kind,
            Event::PenMotion(_) => EventType::PEN_MOTION,
            Event::PenAxis(_) => EventType::PEN_AXIS,
            Event::Render(e) => e.kind,
            Event::User(e) => e.kind,
            Event::Unknown(raw) => raw.kind(),
        }
    }

    /// Window the event is addressed to, if any
    pub fn window_id(&self) -> Option<u32> {
        match self {
            Event::Window(e) => Some(e.window_id),
            Event::Key(e) => Some(e.window_id),
            Event::TextEditing(e) => Some(e.window_id),
            Event::TextEditingCandidates(e) => Some(e.window_id),
            Event::TextInput(e) => Some(e.window_id),
            Event::MouseMotion(e) => Some(e.window_id),
            Event::MouseButton(e) => Some(e.window_id),
            Event::MouseWheel(e) => Some(e.window_id),
            Event::TouchFinger(e) => Some(e.window_id),
            Event::Drop(e) => Some(e.window_id),
            Event::PenProximity(e) => Some(e.window_id),
            Event::PenTouch(e) => Some(e.window_id),
            Event::PenButton(e) => Some(e.window_id),
            Event::PenMotion(e) => Some(e.window_id),
            Event::PenAxis(e) => Some(e.window_id),
            Event::Render(e) => Some(e.window_id),
            Event::User(e) => Some(e.window_id),
            _ => None,
        }
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Event::Quit(_))
    }
}

fn write_header(raw: &mut RawEvent, kind: EventType, timestamp: u64) {
    let header = raw.overlay_mut::<HeaderOverlay>();
    header.kind = kind.0;
    header.timestamp = timestamp;
}

fn device(raw: &RawEvent, kind: EventType) -> DeviceEvent {
    let o = raw.overlay::<DeviceOverlay>();
    DeviceEvent {
        kind,
        timestamp: o.timestamp,
        which: o.which,
    }
}

fn axis(raw: &RawEvent, kind: EventType) -> AxisEvent {
    let o = raw.overlay::<AxisOverlay>();
    AxisEvent {
        kind,
        timestamp: o.timestamp,
        which: o.which,
        axis: o.axis,
        value: o.value,
    }
}

fn button(raw: &RawEvent, kind: EventType) -> ButtonEvent {
    let o = raw.overlay::<ButtonOverlay>();
    ButtonEvent {
        kind,
        timestamp: o.timestamp,
        which: o.which,
        button: o.button,
        down: marshal::decode_bool(o.down),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::ffi::CString;
    use std::ptr;

    fn block(kind: EventType, timestamp: u64) -> RawEvent {
        let mut raw = RawEvent::zeroed();
        write_header(&mut raw, kind, timestamp);
        raw
    }

    #[test]
    fn test_decode_keyboard() {
        let mut raw = block(EventType::KEY_DOWN, 77);
        {
            let o = raw.overlay_mut::<KeyboardOverlay>();
            o.window_id = 3;
            o.which = 9;
            o.scancode = 4;
            o.key = 0x61;
            o.modifiers = 0x0041;
            o.down = 1;
            o.repeat = 0;
        }

        let event = unsafe { Event::decode(&raw) };
        assert_eq!(
            event,
            Event::Key(KeyboardEvent {
                kind: EventType::KEY_DOWN,
                timestamp: 77,
                window_id: 3,
                which: 9,
                scancode: 4,
                key: 0x61,
                modifiers: Keymod::LSHIFT | Keymod::LCTRL,
                raw: 0,
                down: true,
                repeat: false,
            })
        );
    }

    #[test]
    fn test_decode_bool_byte_any_nonzero() {
        let mut raw = block(EventType::MOUSE_BUTTON_DOWN, 1);
        {
            let o = raw.overlay_mut::<MouseButtonOverlay>();
            o.button = 1;
            o.down = 0xAB;
            o.clicks = 2;
            o.x = 10.5;
            o.y = -4.0;
        }

        match unsafe { Event::decode(&raw) } {
            Event::MouseButton(e) => {
                assert!(e.down);
                assert_eq!(e.clicks, 2);
                assert_eq!((e.x, e.y), (10.5, -4.0));
            }
            other => panic!("expected mouse button, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_text_input_copies_string() {
        let text = CString::new("héllo").unwrap();
        let mut raw = block(EventType::TEXT_INPUT, 5);
        {
            let o = raw.overlay_mut::<TextInputOverlay>();
            o.window_id = 2;
            o.text = text.as_ptr();
        }

        let event = unsafe { Event::decode(&raw) };
        drop(text);
        assert_eq!(
            event,
            Event::TextInput(TextInputEvent {
                timestamp: 5,
                window_id: 2,
                text: "héllo".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_drop_begin_has_no_strings() {
        let mut raw = block(EventType::DROP_BEGIN, 8);
        {
            let o = raw.overlay_mut::<DropOverlay>();
            o.source = ptr::null();
            o.data = ptr::null();
        }

        match unsafe { Event::decode(&raw) } {
            Event::Drop(e) => {
                assert_eq!(e.kind, EventType::DROP_BEGIN);
                assert_eq!(e.source, None);
                assert_eq!(e.data, None);
            }
            other => panic!("expected drop, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_clipboard_mime_types() {
        let plain = CString::new("text/plain").unwrap();
        let html = CString::new("text/html").unwrap();
        let types = [plain.as_ptr(), html.as_ptr()];

        let mut raw = block(EventType::CLIPBOARD_UPDATE, 0);
        {
            let o = raw.overlay_mut::<ClipboardOverlay>();
            o.owner = 1;
            o.num_mime_types = 2;
            o.mime_types = types.as_ptr();
        }

        assert_eq!(
            unsafe { Event::decode(&raw) },
            Event::Clipboard(ClipboardEvent {
                timestamp: 0,
                owner: true,
                mime_types: vec!["text/plain".to_string(), "text/html".to_string()],
            })
        );
    }

    #[test]
    fn test_decode_gamepad_axis_shares_joystick_layout() {
        let mut raw = block(EventType::GAMEPAD_AXIS_MOTION, 12);
        {
            let o = raw.overlay_mut::<AxisOverlay>();
            o.which = 4;
            o.axis = 2;
            o.value = -32768;
        }

        assert_eq!(
            unsafe { Event::decode(&raw) },
            Event::GamepadAxis(AxisEvent {
                kind: EventType::GAMEPAD_AXIS_MOTION,
                timestamp: 12,
                which: 4,
                axis: 2,
                value: -32768,
            })
        );
    }

    #[test]
    fn test_decode_sensor_data() {
        let mut raw = block(EventType::SENSOR_UPDATE, 3);
        {
            let o = raw.overlay_mut::<SensorOverlay>();
            o.which = 1;
            o.data = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
            o.sensor_timestamp = 999;
        }

        match unsafe { Event::decode(&raw) } {
            Event::Sensor(e) => {
                assert_eq!(e.data[5], 3.0);
                assert_eq!(e.sensor_timestamp, 999);
            }
            other => panic!("expected sensor, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_pen_touch_flags() {
        let mut raw = block(EventType::PEN_DOWN, 0);
        {
            let o = raw.overlay_mut::<PenTouchOverlay>();
            o.pen_state = (PenInputFlags::DOWN | PenInputFlags::ERASER_TIP).bits();
            o.eraser = 1;
            o.down = 1;
        }

        match unsafe { Event::decode(&raw) } {
            Event::PenTouch(e) => {
                assert!(e.pen_state.contains(PenInputFlags::ERASER_TIP));
                assert!(e.eraser && e.down);
            }
            other => panic!("expected pen touch, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_user_range() {
        let kind = EventType(EventType::USER.0 + 3);
        let mut raw = block(kind, 42);
        {
            let o = raw.overlay_mut::<UserOverlay>();
            o.code = 7;
            o.data1 = 0x1000 as *mut _;
        }

        assert_eq!(
            unsafe { Event::decode(&raw) },
            Event::User(UserEvent {
                kind,
                timestamp: 42,
                window_id: 0,
                code: 7,
                data1: 0x1000,
                data2: 0,
            })
        );
    }

    #[test]
    fn test_unknown_kind_kept_verbatim() {
        let raw = block(EventType(0x7777), 1);
        let event = unsafe { Event::decode(&raw) };
        assert_eq!(event, Event::Unknown(raw));
        assert_eq!(event.kind(), EventType(0x7777));
        assert_eq!(event.to_raw(), Some(raw));
    }

    #[test]
    fn test_window_event_round_trip() {
        let event = Event::Window(WindowEvent {
            kind: EventType::WINDOW_RESIZED,
            timestamp: 100,
            window_id: 6,
            data1: 800,
            data2: 600,
        });
        let raw = event.to_raw().unwrap();
        assert_eq!(unsafe { Event::decode(&raw) }, event);
    }

    #[test]
    fn test_text_events_cannot_be_encoded() {
        let event = Event::TextInput(TextInputEvent {
            timestamp: 0,
            window_id: 0,
            text: "x".to_string(),
        });
        assert_eq!(event.to_raw(), None);
    }

    #[test]
    fn test_event_type_debug() {
        assert_eq!(format!("{:?}", EventType::QUIT), "EventType::QUIT");
        assert_eq!(format!("{:?}", EventType(0x8002)), "EventType::USER+0x2");
        assert_eq!(format!("{:?}", EventType(0x9)), "EventType(0x9)");
    }
}
