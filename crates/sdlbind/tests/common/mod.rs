//! Shared test utilities
//!
//! A stub SDL built from a [`StaticSymbols`] table. The handful of entry
//! points the tests exercise are implemented here and record what they were
//! asked to do in process-wide counters; every other symbol resolves to a
//! no-op that is never called. Tests touching the counters are `#[serial]`.

#![allow(dead_code)]

use sdlbind::events::{EventType, RawEvent};
use sdlbind::ffi::StaticSymbols;
use sdlbind::gamepad::RawGamepadBinding;
use sdlbind::locale::RawLocale;
use sdlbind::messagebox::{MessageBoxButtonFlags, RawMessageBoxData};
use sdlbind::sys::{SDL_EventFilter, SDL_Gamepad, SDL_Joystick, SDL_JoystickID, SDL_Window};
use sdlbind::Sdl;
use std::cell::Cell;
use std::ffi::{c_char, c_int, c_void, CStr};
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// Re-export testing utilities
pub use pretty_assertions::{assert_eq, assert_ne};

pub static FREES: AtomicUsize = AtomicUsize::new(0);
pub static WINDOWS_DESTROYED: AtomicUsize = AtomicUsize::new(0);
pub static PROPERTIES_DESTROYED: AtomicUsize = AtomicUsize::new(0);
pub static FILTERS_SET: AtomicUsize = AtomicUsize::new(0);
pub static FILTERS_CLEARED: AtomicUsize = AtomicUsize::new(0);
pub static WATCHES_ADDED: AtomicUsize = AtomicUsize::new(0);
pub static WATCHES_REMOVED: AtomicUsize = AtomicUsize::new(0);
pub static EVENTS_PUSHED: AtomicUsize = AtomicUsize::new(0);
pub static JOYSTICKS_CLOSED: AtomicUsize = AtomicUsize::new(0);
pub static GAMEPADS_CLOSED: AtomicUsize = AtomicUsize::new(0);
pub static MESSAGE_BOXES_SHOWN: AtomicUsize = AtomicUsize::new(0);
/// When set, pushes fail with [`STUB_ERROR`] as a full queue would
pub static QUEUE_FULL: AtomicBool = AtomicBool::new(false);
/// What the installed filter answered for a synthetic quit event
pub static FILTER_VERDICT: AtomicU8 = AtomicU8::new(u8::MAX);

pub const STUB_ERROR: &str = "stub failure";
pub const STUB_VERSION: c_int = 3_002_010;
pub const STUB_DISPLAYS: [u32; 3] = [1, 2, 3];
pub const FAILING_TITLE: &str = "fail";
pub const STUB_JOYSTICKS: [SDL_JoystickID; 2] = [11, 12];
pub const STUB_GAMEPADS: [SDL_JoystickID; 1] = [12];
pub const STUB_BATTERY_SECONDS: c_int = 3600;
pub const STUB_BATTERY_PERCENT: c_int = 80;

static DISPLAYS: [u32; 3] = STUB_DISPLAYS;
static CLIPBOARD: &CStr = c"copied text";
static JOYSTICKS: [SDL_JoystickID; 2] = STUB_JOYSTICKS;
static GAMEPADS: [SDL_JoystickID; 1] = STUB_GAMEPADS;

/// Lets pointer-bearing native tables live in statics
pub struct Shared<T>(pub T);

unsafe impl<T> Sync for Shared<T> {}

/// `a` button on the south face, then the left trigger axis
pub static BINDINGS: [RawGamepadBinding; 2] = [
    RawGamepadBinding {
        input_type: 1,
        input: [0, 0, 0],
        output_type: 1,
        output: [0, 0, 0],
    },
    RawGamepadBinding {
        input_type: 2,
        input: [2, 0, 32767],
        output_type: 2,
        output: [4, 0, 32767],
    },
];
static BINDING_LIST: Shared<[*const RawGamepadBinding; 3]> = Shared([
    &BINDINGS[0] as *const RawGamepadBinding,
    ptr::null(),
    &BINDINGS[1] as *const RawGamepadBinding,
]);

static LOCALES: Shared<[RawLocale; 2]> = Shared([
    RawLocale {
        language: c"en".as_ptr(),
        country: c"US".as_ptr(),
    },
    RawLocale {
        language: c"fr".as_ptr(),
        country: ptr::null(),
    },
]);
static LOCALE_LIST: Shared<[*const RawLocale; 2]> = Shared([
    &LOCALES.0[0] as *const RawLocale,
    &LOCALES.0[1] as *const RawLocale,
]);

/// Filter and userdata most recently installed, as the native side keeps them
static CURRENT_FILTER: Mutex<Option<(SDL_EventFilter, usize)>> = Mutex::new(None);

thread_local! {
    /// Native errors are per thread; cleared until a failing stub raises one
    static ERROR_CLEARED: Cell<bool> = const { Cell::new(false) };
}

fn raise() {
    ERROR_CLEARED.with(|cleared| cleared.set(false));
}

fn current_filter() -> Option<(SDL_EventFilter, usize)> {
    *CURRENT_FILTER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn store_filter(filter: Option<(SDL_EventFilter, usize)>) {
    *CURRENT_FILTER.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = filter;
}

pub fn reset_counters() {
    for counter in [
        &FREES,
        &WINDOWS_DESTROYED,
        &PROPERTIES_DESTROYED,
        &FILTERS_SET,
        &FILTERS_CLEARED,
        &WATCHES_ADDED,
        &WATCHES_REMOVED,
        &EVENTS_PUSHED,
        &JOYSTICKS_CLOSED,
        &GAMEPADS_CLOSED,
        &MESSAGE_BOXES_SHOWN,
    ] {
        counter.store(0, Ordering::SeqCst);
    }
    FILTER_VERDICT.store(u8::MAX, Ordering::SeqCst);
    QUEUE_FULL.store(false, Ordering::SeqCst);
    store_filter(None);
    raise();
}

extern "C" fn unused() {}

unsafe extern "C" fn get_error() -> *const c_char {
    if ERROR_CLEARED.with(Cell::get) {
        c"".as_ptr()
    } else {
        c"stub failure".as_ptr()
    }
}

unsafe extern "C" fn clear_error() -> u8 {
    ERROR_CLEARED.with(|cleared| cleared.set(true));
    1
}

unsafe extern "C" fn free(_ptr: *mut c_void) {
    FREES.fetch_add(1, Ordering::SeqCst);
}

unsafe extern "C" fn get_version() -> c_int {
    STUB_VERSION
}

/// Succeeds unless the camera subsystem is requested
unsafe extern "C" fn init(flags: u32) -> u8 {
    if flags & 0x0001_0000 != 0 {
        raise();
        return 0;
    }
    1
}

unsafe extern "C" fn get_displays(count: *mut c_int) -> *mut u32 {
    if !count.is_null() {
        *count = DISPLAYS.len() as c_int;
    }
    DISPLAYS.as_ptr().cast_mut()
}

/// Reports failure the way list getters do: null and a zero count
unsafe extern "C" fn get_cameras(count: *mut c_int) -> *mut u32 {
    if !count.is_null() {
        *count = 0;
    }
    raise();
    ptr::null_mut()
}

unsafe extern "C" fn get_clipboard_text() -> *mut c_char {
    CLIPBOARD.as_ptr().cast_mut()
}

unsafe extern "C" fn create_window(title: *const c_char, _w: c_int, _h: c_int, _flags: u64) -> *mut SDL_Window {
    if CStr::from_ptr(title).to_bytes() == FAILING_TITLE.as_bytes() {
        raise();
        return ptr::null_mut();
    }
    NonNull::<SDL_Window>::dangling().as_ptr()
}

unsafe extern "C" fn destroy_window(_window: *mut SDL_Window) {
    WINDOWS_DESTROYED.fetch_add(1, Ordering::SeqCst);
}

unsafe extern "C" fn create_properties() -> u32 {
    7
}

unsafe extern "C" fn destroy_properties(_props: u32) {
    PROPERTIES_DESTROYED.fetch_add(1, Ordering::SeqCst);
}

/// Records the registration and runs the filter once over a quit event
unsafe extern "C" fn set_event_filter(filter: Option<SDL_EventFilter>, userdata: *mut c_void) {
    match filter {
        Some(filter) => {
            FILTERS_SET.fetch_add(1, Ordering::SeqCst);
            store_filter(Some((filter, userdata as usize)));
            let mut event = RawEvent::with_kind(EventType::QUIT);
            FILTER_VERDICT.store(filter(userdata, event.as_mut_ptr()), Ordering::SeqCst);
        }
        None => {
            FILTERS_CLEARED.fetch_add(1, Ordering::SeqCst);
            store_filter(None);
        }
    }
}

unsafe extern "C" fn get_event_filter(filter: *mut Option<SDL_EventFilter>, userdata: *mut *mut c_void) -> u8 {
    let current = current_filter();
    if !filter.is_null() {
        *filter = current.map(|(installed, _)| installed);
    }
    if !userdata.is_null() {
        *userdata = current.map_or(ptr::null_mut(), |(_, data)| data as *mut c_void);
    }
    u8::from(current.is_some())
}

/// Runs the installed filter; a rejected event fails without an error message
unsafe extern "C" fn push_event(event: *mut RawEvent) -> u8 {
    if QUEUE_FULL.load(Ordering::SeqCst) {
        raise();
        return 0;
    }
    if let Some((filter, userdata)) = current_filter() {
        if filter(userdata as *mut c_void, event) == 0 {
            return 0;
        }
    }
    EVENTS_PUSHED.fetch_add(1, Ordering::SeqCst);
    1
}

unsafe extern "C" fn get_joysticks(count: *mut c_int) -> *mut SDL_JoystickID {
    if !count.is_null() {
        *count = JOYSTICKS.len() as c_int;
    }
    JOYSTICKS.as_ptr().cast_mut()
}

unsafe extern "C" fn open_joystick(id: SDL_JoystickID) -> *mut SDL_Joystick {
    if !JOYSTICKS.contains(&id) {
        raise();
        return ptr::null_mut();
    }
    NonNull::<SDL_Joystick>::dangling().as_ptr()
}

unsafe extern "C" fn close_joystick(_joystick: *mut SDL_Joystick) {
    JOYSTICKS_CLOSED.fetch_add(1, Ordering::SeqCst);
}

unsafe extern "C" fn get_gamepads(count: *mut c_int) -> *mut SDL_JoystickID {
    if !count.is_null() {
        *count = GAMEPADS.len() as c_int;
    }
    GAMEPADS.as_ptr().cast_mut()
}

unsafe extern "C" fn open_gamepad(id: SDL_JoystickID) -> *mut SDL_Gamepad {
    if !GAMEPADS.contains(&id) {
        raise();
        return ptr::null_mut();
    }
    NonNull::<SDL_Gamepad>::dangling().as_ptr()
}

unsafe extern "C" fn close_gamepad(_gamepad: *mut SDL_Gamepad) {
    GAMEPADS_CLOSED.fetch_add(1, Ordering::SeqCst);
}

/// Three entries, the middle one null
unsafe extern "C" fn get_gamepad_bindings(_gamepad: *mut SDL_Gamepad, count: *mut c_int) -> *mut *mut RawGamepadBinding {
    if !count.is_null() {
        *count = BINDING_LIST.0.len() as c_int;
    }
    BINDING_LIST.0.as_ptr().cast_mut().cast()
}

unsafe extern "C" fn get_preferred_locales(count: *mut c_int) -> *mut *mut RawLocale {
    if !count.is_null() {
        *count = LOCALE_LIST.0.len() as c_int;
    }
    LOCALE_LIST.0.as_ptr().cast_mut().cast()
}

/// On battery with an hour left
unsafe extern "C" fn get_power_info(seconds: *mut c_int, percent: *mut c_int) -> c_int {
    if !seconds.is_null() {
        *seconds = STUB_BATTERY_SECONDS;
    }
    if !percent.is_null() {
        *percent = STUB_BATTERY_PERCENT;
    }
    1
}

unsafe extern "C" fn show_simple_message_box(
    _flags: u32,
    _title: *const c_char,
    _message: *const c_char,
    _window: *mut SDL_Window,
) -> u8 {
    MESSAGE_BOXES_SHOWN.fetch_add(1, Ordering::SeqCst);
    1
}

/// "Presses" the return-key default button; fails for the failing title
unsafe extern "C" fn show_message_box(data: *const RawMessageBoxData, button_id: *mut c_int) -> u8 {
    let data = &*data;
    if CStr::from_ptr(data.title).to_bytes() == FAILING_TITLE.as_bytes() {
        raise();
        return 0;
    }
    MESSAGE_BOXES_SHOWN.fetch_add(1, Ordering::SeqCst);
    let count = usize::try_from(data.num_buttons).unwrap_or(0);
    let buttons = if count == 0 {
        &[][..]
    } else {
        std::slice::from_raw_parts(data.buttons, count)
    };
    let chosen = buttons
        .iter()
        .find(|button| button.flags & MessageBoxButtonFlags::RETURN_KEY_DEFAULT.bits() != 0)
        .map_or(-1, |button| button.button_id);
    *button_id = chosen;
    1
}

unsafe extern "C" fn add_event_watch(_filter: Option<SDL_EventFilter>, _userdata: *mut c_void) -> u8 {
    WATCHES_ADDED.fetch_add(1, Ordering::SeqCst);
    1
}

unsafe extern "C" fn remove_event_watch(_filter: Option<SDL_EventFilter>, _userdata: *mut c_void) {
    WATCHES_REMOVED.fetch_add(1, Ordering::SeqCst);
}

/// Symbol table of the stub library
pub fn stub_symbols() -> StaticSymbols {
    StaticSymbols::new("stub-sdl")
        .with("SDL_GetError", get_error as *const ())
        .with("SDL_ClearError", clear_error as *const ())
        .with("SDL_free", free as *const ())
        .with("SDL_GetVersion", get_version as *const ())
        .with("SDL_Init", init as *const ())
        .with("SDL_GetDisplays", get_displays as *const ())
        .with("SDL_GetCameras", get_cameras as *const ())
        .with("SDL_GetClipboardText", get_clipboard_text as *const ())
        .with("SDL_CreateWindow", create_window as *const ())
        .with("SDL_DestroyWindow", destroy_window as *const ())
        .with("SDL_CreateProperties", create_properties as *const ())
        .with("SDL_DestroyProperties", destroy_properties as *const ())
        .with("SDL_SetEventFilter", set_event_filter as *const ())
        .with("SDL_GetEventFilter", get_event_filter as *const ())
        .with("SDL_PushEvent", push_event as *const ())
        .with("SDL_AddEventWatch", add_event_watch as *const ())
        .with("SDL_RemoveEventWatch", remove_event_watch as *const ())
        .with("SDL_GetJoysticks", get_joysticks as *const ())
        .with("SDL_OpenJoystick", open_joystick as *const ())
        .with("SDL_CloseJoystick", close_joystick as *const ())
        .with("SDL_GetGamepads", get_gamepads as *const ())
        .with("SDL_OpenGamepad", open_gamepad as *const ())
        .with("SDL_CloseGamepad", close_gamepad as *const ())
        .with("SDL_GetGamepadBindings", get_gamepad_bindings as *const ())
        .with("SDL_GetPreferredLocales", get_preferred_locales as *const ())
        .with("SDL_GetPowerInfo", get_power_info as *const ())
        .with("SDL_ShowSimpleMessageBox", show_simple_message_box as *const ())
        .with("SDL_ShowMessageBox", show_message_box as *const ())
        .with_fallback(unused as *const ())
}

/// A fully resolved [`Sdl`] over the stub library
pub fn stub_sdl() -> Sdl {
    match Sdl::from_source(Arc::new(stub_symbols())) {
        Ok(sdl) => sdl,
        Err(e) => panic!("stub table failed to resolve: {}", e),
    }
}
