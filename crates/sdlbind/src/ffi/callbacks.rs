//! Callback trampolines
//!
//! Native APIs that call back into the application take a plain C function
//! pointer plus an opaque `userdata` word. Each trampoline here is a generic
//! `extern "C"` function instantiated for one closure type: the closure lives
//! behind `userdata`, the trampoline converts the native arguments into Rust
//! values, invokes the closure and encodes the result.
//!
//! A panic never crosses the boundary. It is caught, logged at `error`, and
//! the trampoline returns the neutral value for its signature.

use crate::events::{Event, RawEvent};
use crate::ffi::marshal;
use crate::rect::Point;
use crate::sys::{SDL_AudioStream, SDL_PropertiesID, SDL_Window};
use std::ffi::{c_char, c_int, c_void};
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::ptr::NonNull;

/// Owns a callback payload whose address is handed to native code
///
/// The payload stays at a fixed heap address until the handle is dropped or
/// converted with [`CallbackHandle::into_raw`].
pub struct CallbackHandle<P> {
    payload: NonNull<P>,
    _owns: PhantomData<P>,
}

// Native code holds an alias of the payload, so the handle cannot be a `Box`.
unsafe impl<P: Send> Send for CallbackHandle<P> {}
unsafe impl<P: Sync> Sync for CallbackHandle<P> {}

impl<P> CallbackHandle<P> {
    pub fn new(payload: P) -> Self {
        let payload = Box::into_raw(Box::new(payload));
        Self {
            // Safety: `Box::into_raw` never returns null.
            payload: unsafe { NonNull::new_unchecked(payload) },
            _owns: PhantomData,
        }
    }

    /// Address to pass as native `userdata`
    pub fn userdata(&self) -> *mut c_void {
        self.payload.as_ptr().cast()
    }

    /// Give up ownership to native code
    ///
    /// Used for one-shot callbacks whose trampoline reclaims the payload.
    pub fn into_raw(self) -> *mut c_void {
        let userdata = self.userdata();
        std::mem::forget(self);
        userdata
    }

    /// Reclaim a payload released with [`CallbackHandle::into_raw`]
    ///
    /// # Safety
    ///
    /// `userdata` must come from `into_raw` on a handle of the same `P`, and
    /// native code must no longer call through it.
    pub unsafe fn from_raw(userdata: *mut c_void) -> Option<Self> {
        NonNull::new(userdata.cast::<P>()).map(|payload| Self {
            payload,
            _owns: PhantomData,
        })
    }

    pub fn get(&self) -> &P {
        // Safety: the payload is live for the life of the handle.
        unsafe { self.payload.as_ref() }
    }
}

impl<P> Drop for CallbackHandle<P> {
    fn drop(&mut self) {
        // Safety: allocated in `new`; ownership was not released.
        drop(unsafe { Box::from_raw(self.payload.as_ptr()) });
    }
}

impl<P> fmt::Debug for CallbackHandle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CallbackHandle").field(&self.payload).finish()
    }
}

/// Run `f`, turning a panic into `neutral`
pub(crate) fn guarded<R>(callback: &'static str, neutral: R, f: impl FnOnce() -> R) -> R {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            tracing::error!(callback, panic = %message, "callback panicked; returning neutral value");
            neutral
        }
    }
}

// ============================================================================
// Trampolines
// ============================================================================

/// `SDL_EventFilter` for a `Fn(&Event) -> bool` closure
///
/// Returns `1` to keep the event and `0` to drop it.
pub unsafe extern "C" fn event_filter<F>(userdata: *mut c_void, event: *mut RawEvent) -> u8
where
    F: Fn(&Event) -> bool + Send + Sync + 'static,
{
    if userdata.is_null() || event.is_null() {
        return 0;
    }
    let callback = &*userdata.cast::<F>();
    let event = Event::decode(&*event);
    guarded("event_filter", 0, || marshal::encode_bool(callback(&event)))
}

/// `SDL_AudioStreamCallback`; the closure receives the stream and the
/// additional and total byte amounts
pub unsafe extern "C" fn audio_stream<F>(
    userdata: *mut c_void,
    stream: *mut SDL_AudioStream,
    additional_amount: c_int,
    total_amount: c_int,
) where
    F: FnMut(NonNull<SDL_AudioStream>, i32, i32) + Send + 'static,
{
    let (Some(mut callback), Some(stream)) = (NonNull::new(userdata.cast::<F>()), NonNull::new(stream)) else {
        return;
    };
    let callback = callback.as_mut();
    guarded("audio_stream", (), || callback(stream, additional_amount, total_amount))
}

/// `SDL_HitTest`; returns the closure's `SDL_HitTestResult` value, `0`
/// (normal) when it panics
pub unsafe extern "C" fn hit_test<F>(window: *mut SDL_Window, area: *const Point, userdata: *mut c_void) -> c_int
where
    F: Fn(NonNull<SDL_Window>, Point) -> c_int + 'static,
{
    let (Some(window), false, false) = (NonNull::new(window), area.is_null(), userdata.is_null()) else {
        return 0;
    };
    let callback = &*userdata.cast::<F>();
    let area = *area;
    guarded("hit_test", 0, || callback(window, area))
}

/// `SDL_LogOutputFunction`; the closure receives category, priority and
/// the copied message
pub unsafe extern "C" fn log_output<F>(userdata: *mut c_void, category: c_int, priority: c_int, message: *const c_char)
where
    F: Fn(i32, i32, &str) + Send + Sync + 'static,
{
    if userdata.is_null() {
        return;
    }
    let callback = &*userdata.cast::<F>();
    let message = marshal::string_from_ptr(message);
    guarded("log_output", (), || callback(category, priority, &message))
}

/// `SDL_CleanupPropertyCallback`; one-shot, reclaims its payload
pub unsafe extern "C" fn property_cleanup<F>(userdata: *mut c_void, value: *mut c_void)
where
    F: FnOnce(*mut c_void) + Send + 'static,
{
    let Some(mut handle) = CallbackHandle::<Option<F>>::from_raw(userdata) else {
        return;
    };
    if let Some(callback) = handle.payload.as_mut().take() {
        guarded("property_cleanup", (), || callback(value));
    }
}

/// `SDL_EnumeratePropertiesCallback`; the closure receives each name
pub unsafe extern "C" fn enumerate_properties<F>(userdata: *mut c_void, _props: SDL_PropertiesID, name: *const c_char)
where
    F: FnMut(&str),
{
    let Some(mut callback) = NonNull::new(userdata.cast::<F>()) else {
        return;
    };
    let callback = callback.as_mut();
    let name = marshal::string_from_ptr(name);
    guarded("enumerate_properties", (), || callback(&name))
}

/// `SDL_DialogFileCallback`; one-shot, reclaims its payload
///
/// A null file list (failure) reaches the closure as `None`; an empty list
/// (cancelled) as `Some` of an empty vector.
pub unsafe extern "C" fn dialog_file<F>(userdata: *mut c_void, filelist: *const *const c_char, filter: c_int)
where
    F: FnOnce(Option<Vec<String>>, i32) + Send + 'static,
{
    let Some(mut handle) = CallbackHandle::<Option<F>>::from_raw(userdata) else {
        return;
    };
    let files = if filelist.is_null() {
        None
    } else {
        Some(marshal::strings_from_ptr_array(filelist))
    };
    if let Some(callback) = handle.payload.as_mut().take() {
        guarded("dialog_file", (), || callback(files, filter));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventType;
    use std::ffi::CString;
    use std::ptr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn call_filter<F>(handle: &CallbackHandle<F>, kind: EventType) -> u8
    where
        F: Fn(&Event) -> bool + Send + Sync + 'static,
    {
        let mut raw = RawEvent::with_kind(kind);
        let trampoline: crate::sys::SDL_EventFilter = event_filter::<F>;
        unsafe { trampoline(handle.userdata(), &mut raw) }
    }

    #[test]
    fn test_event_filter_encodes_bool() {
        let keep_quit = CallbackHandle::new(|event: &Event| event.is_quit());
        assert_eq!(call_filter(&keep_quit, EventType::QUIT), 1);
        assert_eq!(call_filter(&keep_quit, EventType::KEY_DOWN), 0);
    }

    #[test]
    fn test_event_filter_panic_returns_zero() {
        let handle = CallbackHandle::new(|_: &Event| -> bool { panic!("boom") });
        assert_eq!(call_filter(&handle, EventType::QUIT), 0);
    }

    #[test]
    fn test_null_userdata_is_ignored() {
        let mut raw = RawEvent::with_kind(EventType::QUIT);
        let result = unsafe { event_filter::<fn(&Event) -> bool>(ptr::null_mut(), &mut raw) };
        assert_eq!(result, 0);
    }

    #[test]
    fn test_log_output_copies_message() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handle = CallbackHandle::new(move |category: i32, priority: i32, message: &str| {
            sink.lock().unwrap().push((category, priority, message.to_string()));
        });

        fn call<F: Fn(i32, i32, &str) + Send + Sync + 'static>(
            h: &CallbackHandle<F>,
            category: i32,
            priority: i32,
            message: *const c_char,
        ) {
            unsafe { log_output::<F>(h.userdata(), category, priority, message) }
        }

        let message = CString::new("hello from native").unwrap();
        call(&handle, 1, 4, message.as_ptr());
        call(&handle, 0, 3, ptr::null());

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(1, 4, "hello from native".to_string()), (0, 3, String::new())]
        );
    }

    #[test]
    fn test_property_cleanup_runs_once_and_frees_payload() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let cleanup = move |value: *mut c_void| {
            assert_eq!(value as usize, 0x40);
            counter.fetch_add(1, Ordering::SeqCst);
        };
        fn release<F: FnOnce(*mut c_void) + Send + 'static>(f: F) -> (*mut c_void, crate::sys::SDL_CleanupPropertyCallback) {
            (CallbackHandle::new(Some(f)).into_raw(), property_cleanup::<F>)
        }

        let (userdata, trampoline) = release(cleanup);
        unsafe { trampoline(userdata, 0x40 as *mut c_void) };
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(Arc::strong_count(&calls), 1);
    }

    #[test]
    fn test_dialog_distinguishes_failure_and_cancel() {
        let results = Arc::new(Mutex::new(Vec::new()));

        fn arm<F: FnOnce(Option<Vec<String>>, i32) + Send + 'static>(
            f: F,
        ) -> (*mut c_void, crate::sys::SDL_DialogFileCallback) {
            (CallbackHandle::new(Some(f)).into_raw(), dialog_file::<F>)
        }

        let sink = results.clone();
        let (failed, trampoline) = arm(move |files, filter| sink.lock().unwrap().push((files, filter)));
        unsafe { trampoline(failed, ptr::null(), -1) };

        let empty: [*const c_char; 1] = [ptr::null()];
        let sink = results.clone();
        let (cancelled, trampoline) = arm(move |files, filter| sink.lock().unwrap().push((files, filter)));
        unsafe { trampoline(cancelled, empty.as_ptr(), -1) };

        let path = CString::new("/tmp/a.png").unwrap();
        let selected: [*const c_char; 2] = [path.as_ptr(), ptr::null()];
        let sink = results.clone();
        let (chosen, trampoline) = arm(move |files, filter| sink.lock().unwrap().push((files, filter)));
        unsafe { trampoline(chosen, selected.as_ptr(), 0) };

        assert_eq!(
            *results.lock().unwrap(),
            vec![
                (None, -1),
                (Some(vec![]), -1),
                (Some(vec!["/tmp/a.png".to_string()]), 0),
            ]
        );
    }

    #[test]
    fn test_enumerate_collects_names() {
        let mut names = Vec::new();
        {
            let mut collect = |name: &str| names.push(name.to_string());
            fn call<F: FnMut(&str)>(f: &mut F, name: *const c_char) {
                unsafe { enumerate_properties::<F>((f as *mut F).cast(), 1, name) }
            }
            let a = CString::new("alpha").unwrap();
            let b = CString::new("beta").unwrap();
            call(&mut collect, a.as_ptr());
            call(&mut collect, b.as_ptr());
        }
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_hit_test_panic_is_normal() {
        fn call<F: Fn(NonNull<SDL_Window>, Point) -> c_int + 'static>(h: &CallbackHandle<F>) -> c_int {
            let area = Point { x: 1, y: 2 };
            let window = NonNull::<SDL_Window>::dangling().as_ptr();
            unsafe { hit_test::<F>(window, &area, h.userdata()) }
        }

        let draggable = CallbackHandle::new(|_: NonNull<SDL_Window>, p: Point| if p.y < 10 { 1 } else { 0 });
        assert_eq!(call(&draggable), 1);

        let broken = CallbackHandle::new(|_: NonNull<SDL_Window>, _: Point| -> c_int { panic!("hit") });
        assert_eq!(call(&broken), 0);
    }
}
