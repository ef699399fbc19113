//! End-to-end tests against a stub symbol source
//!
//! Covers table resolution, the failure convention, list ownership, and the
//! destroy-once / unregister-on-drop behaviour of handles and guards.

mod common;

use common::*;
use common::assert_eq;
use sdlbind::events::{Event, EventType, RawEvent};
use sdlbind::ffi::{marshal, LoadError, StaticSymbols};
use sdlbind::gamepad::{BindingInput, BindingOutput, GamepadBinding};
use sdlbind::messagebox::{MessageBox, MessageBoxButtonFlags, MessageBoxFlags};
use sdlbind::{Error, GamepadAxis, GamepadButton, InitFlags, Locale, PowerState, Sdl, WindowFlags};
use serial_test::serial;
use std::ffi::c_int;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ===== Minimal library: add / getList / free =====

static LIST: [i32; 3] = [10, 20, 30];
static LIST_FREES: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C" fn add(a: i32, b: i32) -> i32 {
    a + b
}

unsafe extern "C" fn get_list(count: *mut c_int) -> *mut i32 {
    *count = LIST.len() as c_int;
    LIST.as_ptr().cast_mut()
}

unsafe extern "C" fn list_free(_ptr: *mut std::ffi::c_void) {
    LIST_FREES.fetch_add(1, Ordering::SeqCst);
}

sdlbind::native_api! {
    struct MiniApi {
        fn add(i32, i32) -> i32;
        fn getList(*mut c_int) -> *mut i32;
        fn free(*mut std::ffi::c_void);
    }
}

#[test]
fn test_minimal_library_end_to_end() {
    let source = StaticSymbols::new("mini")
        .with("add", add as *const ())
        .with("getList", get_list as *const ())
        .with("free", list_free as *const ());
    let api = MiniApi::resolve(&source).unwrap();

    assert_eq!(unsafe { (api.add)(3, 4) }, 7);

    let mut count: c_int = 0;
    let list = unsafe { (api.getList)(&mut count) };
    let values = unsafe { marshal::take_native_array(list, count, api.free) };
    assert_eq!(values, vec![10, 20, 30]);
    assert_eq!(LIST_FREES.load(Ordering::SeqCst), 1);
}

// ===== Resolution =====

#[test]
fn test_missing_symbol_names_it() {
    let source = StaticSymbols::new("partial").with("add", add as *const ());
    match MiniApi::resolve(&source) {
        Err(LoadError::SymbolNotFound { library, symbol }) => {
            assert_eq!(library, "partial");
            assert_eq!(symbol, "getList");
        }
        other => panic!("expected SymbolNotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_sdl_requires_every_symbol() {
    let source = StaticSymbols::new("empty");
    match Sdl::from_source(Arc::new(source)) {
        Err(Error::Load(LoadError::SymbolNotFound { symbol, .. })) => assert_eq!(symbol, "SDL_Init"),
        other => panic!("expected SymbolNotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_extension_library_requires_its_own_symbols() {
    let sdl = stub_sdl();
    match sdlbind::Image::from_source(&sdl, Arc::new(stub_symbols())) {
        Ok(image) => assert_eq!(image.source_name(), "stub-sdl"),
        Err(e) => panic!("fallback table should resolve: {}", e),
    }
    match sdlbind::Ttf::from_source(&sdl, Arc::new(StaticSymbols::new("no-ttf"))) {
        Err(Error::Load(LoadError::SymbolNotFound { library, symbol })) => {
            assert_eq!(library, "no-ttf");
            assert_eq!(symbol, "TTF_Version");
        }
        other => panic!("expected SymbolNotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_stub_resolves() {
    let sdl = stub_sdl();
    assert_eq!(sdl.source_name(), "stub-sdl");
    assert_eq!(sdl.version().to_string(), "3.2.10");
}

// ===== Failure convention =====

#[test]
fn test_false_return_carries_native_error() {
    let sdl = stub_sdl();
    assert!(sdl.init(InitFlags::VIDEO).is_ok());

    let err = sdl.init(InitFlags::CAMERA).unwrap_err();
    assert_eq!(err.native_message(), Some(STUB_ERROR));
}

#[test]
#[serial]
fn test_null_list_is_native_error() {
    reset_counters();
    let sdl = stub_sdl();
    let err = sdl.cameras().unwrap_err();
    assert!(matches!(err, Error::Native(ref message) if message == STUB_ERROR));
    assert_eq!(FREES.load(Ordering::SeqCst), 0);
}

#[test]
fn test_interior_nul_never_reaches_native() {
    let sdl = stub_sdl();
    let err = sdl.create_window("bad\0title", 10, 10, WindowFlags::empty()).unwrap_err();
    assert!(matches!(err, Error::Marshal(_)));
}

// ===== Ownership of native buffers =====

#[test]
#[serial]
fn test_list_copied_then_freed_once() {
    reset_counters();
    let sdl = stub_sdl();
    assert_eq!(sdl.displays().unwrap(), STUB_DISPLAYS.to_vec());
    assert_eq!(FREES.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_owned_string_freed_once() {
    reset_counters();
    let sdl = stub_sdl();
    assert_eq!(sdl.clipboard_text().unwrap(), "copied text");
    assert_eq!(FREES.load(Ordering::SeqCst), 1);
}

// ===== Handles =====

#[test]
#[serial]
fn test_window_destroyed_once() {
    reset_counters();
    let sdl = stub_sdl();
    let window = sdl.create_window("stub", 320, 200, WindowFlags::HIDDEN).unwrap();
    assert_eq!(WINDOWS_DESTROYED.load(Ordering::SeqCst), 0);
    drop(window);
    assert_eq!(WINDOWS_DESTROYED.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_failed_create_destroys_nothing() {
    reset_counters();
    let sdl = stub_sdl();
    let err = sdl.create_window(FAILING_TITLE, 1, 1, WindowFlags::empty()).unwrap_err();
    assert_eq!(err.native_message(), Some(STUB_ERROR));
    assert_eq!(WINDOWS_DESTROYED.load(Ordering::SeqCst), 0);
}

#[test]
#[serial]
fn test_into_raw_releases_ownership() {
    reset_counters();
    let sdl = stub_sdl();
    let window = sdl.create_window("stub", 1, 1, WindowFlags::empty()).unwrap();
    let raw = window.into_raw().unwrap();
    assert_eq!(WINDOWS_DESTROYED.load(Ordering::SeqCst), 0);

    drop(unsafe { sdlbind::Window::from_raw(&sdl, raw) });
    assert_eq!(WINDOWS_DESTROYED.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_properties_destroyed_once() {
    reset_counters();
    let sdl = stub_sdl();
    let props = sdl.create_properties().unwrap();
    assert_eq!(props.id(), 7);
    drop(props);
    assert_eq!(PROPERTIES_DESTROYED.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_handles_outlive_sdl_clone() {
    reset_counters();
    let window = {
        let sdl = stub_sdl();
        sdl.create_window("stub", 1, 1, WindowFlags::empty()).unwrap()
    };
    drop(window);
    assert_eq!(WINDOWS_DESTROYED.load(Ordering::SeqCst), 1);
}

// ===== Callback guards =====

#[test]
#[serial]
fn test_event_filter_called_and_cleared() {
    reset_counters();
    let sdl = stub_sdl();
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);

    let guard = sdl.set_event_filter(move |event| {
        counter.fetch_add(1, Ordering::SeqCst);
        !matches!(event, Event::Quit(_))
    });
    assert_eq!(FILTERS_SET.load(Ordering::SeqCst), 1);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(FILTER_VERDICT.load(Ordering::SeqCst), 0);

    drop(guard);
    assert_eq!(FILTERS_CLEARED.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_event_filter_accepting_returns_one() {
    reset_counters();
    let sdl = stub_sdl();
    let _guard = sdl.set_event_filter(|_| true);
    assert_eq!(FILTER_VERDICT.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_event_filter_panic_is_contained() {
    reset_counters();
    let sdl = stub_sdl();
    let _guard = sdl.set_event_filter(|_| panic!("filter exploded"));
    assert_eq!(FILTER_VERDICT.load(Ordering::SeqCst), 0);
}

#[test]
#[serial]
fn test_event_watch_removed_on_drop() {
    reset_counters();
    let sdl = stub_sdl();
    let watch = sdl.add_event_watch(|_| true).unwrap();
    assert_eq!(WATCHES_ADDED.load(Ordering::SeqCst), 1);
    assert_eq!(WATCHES_REMOVED.load(Ordering::SeqCst), 0);
    drop(watch);
    assert_eq!(WATCHES_REMOVED.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_stale_filter_guard_keeps_active_filter() {
    reset_counters();
    let sdl = stub_sdl();
    let old = sdl.set_event_filter(|_| true);
    let new = sdl.set_event_filter(|_| false);
    assert_eq!(FILTERS_SET.load(Ordering::SeqCst), 2);

    drop(old);
    assert_eq!(FILTERS_CLEARED.load(Ordering::SeqCst), 0);

    drop(new);
    assert_eq!(FILTERS_CLEARED.load(Ordering::SeqCst), 1);
}

// ===== Pushing events =====

#[test]
#[serial]
fn test_filtered_push_is_not_an_error() {
    reset_counters();
    let sdl = stub_sdl();
    let _guard = sdl.set_event_filter(|event| !event.is_quit());

    assert!(!sdl.push_event(RawEvent::with_kind(EventType::QUIT)).unwrap());
    assert_eq!(EVENTS_PUSHED.load(Ordering::SeqCst), 0);

    assert!(sdl.push_event(RawEvent::with_kind(EventType::KEY_DOWN)).unwrap());
    assert_eq!(EVENTS_PUSHED.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_full_queue_push_is_native_error() {
    reset_counters();
    let sdl = stub_sdl();
    QUEUE_FULL.store(true, Ordering::SeqCst);

    let err = sdl.push_event(RawEvent::with_kind(EventType::QUIT)).unwrap_err();
    assert_eq!(err.native_message(), Some(STUB_ERROR));
    assert_eq!(EVENTS_PUSHED.load(Ordering::SeqCst), 0);
}

// ===== Joysticks and gamepads =====

#[test]
#[serial]
fn test_joystick_list_freed_once() {
    reset_counters();
    let sdl = stub_sdl();
    assert_eq!(sdl.joysticks().unwrap(), STUB_JOYSTICKS.to_vec());
    assert_eq!(FREES.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_joystick_closed_once() {
    reset_counters();
    let sdl = stub_sdl();
    let joystick = sdl.open_joystick(STUB_JOYSTICKS[0]).unwrap();
    assert_eq!(JOYSTICKS_CLOSED.load(Ordering::SeqCst), 0);
    drop(joystick);
    assert_eq!(JOYSTICKS_CLOSED.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_failed_joystick_open_closes_nothing() {
    reset_counters();
    let sdl = stub_sdl();
    let err = sdl.open_joystick(99).unwrap_err();
    assert_eq!(err.native_message(), Some(STUB_ERROR));
    assert_eq!(JOYSTICKS_CLOSED.load(Ordering::SeqCst), 0);
}

#[test]
#[serial]
fn test_gamepad_list_freed_once() {
    reset_counters();
    let sdl = stub_sdl();
    assert_eq!(sdl.gamepads().unwrap(), STUB_GAMEPADS.to_vec());
    assert_eq!(FREES.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_gamepad_bindings_copied_then_freed_once() {
    reset_counters();
    let sdl = stub_sdl();
    let gamepad = sdl.open_gamepad(STUB_GAMEPADS[0]).unwrap();

    let bindings = gamepad.bindings().unwrap();
    assert_eq!(FREES.load(Ordering::SeqCst), 1);
    assert_eq!(
        bindings,
        vec![
            GamepadBinding {
                input: BindingInput::Button(0),
                output: BindingOutput::Button(GamepadButton::South),
            },
            GamepadBinding {
                input: BindingInput::Axis {
                    axis: 2,
                    min: 0,
                    max: 32767
                },
                output: BindingOutput::Axis {
                    axis: GamepadAxis::LeftTrigger,
                    min: 0,
                    max: 32767
                },
            },
        ]
    );

    drop(gamepad);
    assert_eq!(GAMEPADS_CLOSED.load(Ordering::SeqCst), 1);
    assert_eq!(FREES.load(Ordering::SeqCst), 1);
}

// ===== Locale, power, message boxes =====

#[test]
#[serial]
fn test_locales_converted_then_freed_once() {
    reset_counters();
    let sdl = stub_sdl();
    let locales = sdl.preferred_locales().unwrap();
    assert_eq!(FREES.load(Ordering::SeqCst), 1);
    assert_eq!(
        locales,
        vec![
            Locale {
                language: "en".to_string(),
                country: Some("US".to_string()),
            },
            Locale {
                language: "fr".to_string(),
                country: None,
            },
        ]
    );
    assert_eq!(locales[0].to_string(), "en_US");
}

#[test]
fn test_power_info_reads_both_measures() {
    let sdl = stub_sdl();
    let info = sdl.power_info().unwrap();
    assert_eq!(info.state, PowerState::OnBattery);
    assert_eq!(info.remaining.map(|d| d.as_secs()), Some(STUB_BATTERY_SECONDS as u64));
    assert_eq!(info.percent, Some(STUB_BATTERY_PERCENT as u8));
}

#[test]
#[serial]
fn test_message_box_reports_chosen_button() {
    reset_counters();
    let sdl = stub_sdl();
    let message_box = MessageBox::new("Save?", "Keep your changes?")
        .with_flags(MessageBoxFlags::WARNING)
        .with_flagged_button(MessageBoxButtonFlags::ESCAPE_KEY_DEFAULT, 0, "Discard")
        .with_flagged_button(MessageBoxButtonFlags::RETURN_KEY_DEFAULT, 7, "Save");

    assert_eq!(sdl.show_message_box(&message_box, None).unwrap(), Some(7));

    let no_default = MessageBox::new("Note", "Nothing to choose").with_button(3, "OK");
    assert_eq!(sdl.show_message_box(&no_default, None).unwrap(), None);
    assert_eq!(MESSAGE_BOXES_SHOWN.load(Ordering::SeqCst), 2);
}

#[test]
#[serial]
fn test_message_box_failure_and_bad_text() {
    reset_counters();
    let sdl = stub_sdl();
    let err = sdl.show_message_box(&MessageBox::new(FAILING_TITLE, "boom"), None).unwrap_err();
    assert_eq!(err.native_message(), Some(STUB_ERROR));

    let bad = MessageBox::new("ok", "fine").with_button(1, "bad\0label");
    assert!(matches!(sdl.show_message_box(&bad, None), Err(Error::Marshal(_))));

    sdl.show_simple_message_box(MessageBoxFlags::INFORMATION, "Done", "All good", None)
        .unwrap();
    assert_eq!(MESSAGE_BOXES_SHOWN.load(Ordering::SeqCst), 1);
}
