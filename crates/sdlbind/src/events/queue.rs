//! Event queue operations on [`Sdl`]

use super::{Event, EventType, RawEvent};
use crate::error::{Error, Result};
use crate::ffi::callbacks::{self, CallbackHandle};
use crate::ffi::marshal::{self, MarshalError};
use crate::sdl::Sdl;
use crate::sys::SDL_EventFilter;
use std::ffi::{c_int, c_void};
use std::fmt;
use std::time::Duration;

type FilterFn = Box<dyn Fn(&Event) -> bool + Send + Sync>;

fn filter_trampoline() -> SDL_EventFilter {
    callbacks::event_filter::<FilterFn>
}

/// Action for [`Sdl::peep_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum EventAction {
    /// Append the given events to the queue
    Add = 0,
    /// Copy matching events without removing them
    Peek = 1,
    /// Copy and remove matching events
    Get = 2,
}

/// Installed event filter; clears the filter when dropped
#[must_use = "the filter is removed when the guard is dropped"]
pub struct EventFilterGuard {
    sdl: Sdl,
    _callback: CallbackHandle<FilterFn>,
}

impl Drop for EventFilterGuard {
    fn drop(&mut self) {
        // A later set_event_filter may have replaced this one; leave it alone.
        let mut current: Option<SDL_EventFilter> = None;
        let mut userdata: *mut c_void = std::ptr::null_mut();
        let installed = unsafe { (self.sdl.api().SDL_GetEventFilter)(&mut current, &mut userdata) };
        if !marshal::decode_bool(installed) || userdata != self._callback.userdata() {
            tracing::trace!(?userdata, "event filter replaced, not clearing");
            return;
        }
        unsafe { (self.sdl.api().SDL_SetEventFilter)(None, std::ptr::null_mut()) }
    }
}

impl fmt::Debug for EventFilterGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventFilterGuard").finish_non_exhaustive()
    }
}

/// Registered event watcher; removed when dropped
#[must_use = "the watcher is removed when the guard is dropped"]
pub struct EventWatch {
    sdl: Sdl,
    callback: CallbackHandle<FilterFn>,
}

impl Drop for EventWatch {
    fn drop(&mut self) {
        unsafe { (self.sdl.api().SDL_RemoveEventWatch)(Some(filter_trampoline()), self.callback.userdata()) }
    }
}

impl fmt::Debug for EventWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventWatch").field("userdata", &self.callback.userdata()).finish()
    }
}

impl Sdl {
    /// Next pending event, if any
    pub fn poll_event(&self) -> Option<Event> {
        self.poll_raw_event().map(|raw| unsafe { Event::decode(&raw) })
    }

    /// Next pending event without decoding it
    pub fn poll_raw_event(&self) -> Option<RawEvent> {
        let mut raw = RawEvent::zeroed();
        marshal::decode_bool(unsafe { (self.api().SDL_PollEvent)(raw.as_mut_ptr()) }).then_some(raw)
    }

    /// Iterate until the queue is empty
    pub fn poll_iter(&self) -> impl Iterator<Item = Event> + '_ {
        std::iter::from_fn(move || self.poll_event())
    }

    /// Block until an event arrives
    pub fn wait_event(&self) -> Result<Event> {
        let mut raw = RawEvent::zeroed();
        self.check(unsafe { (self.api().SDL_WaitEvent)(raw.as_mut_ptr()) })?;
        Ok(unsafe { Event::decode(&raw) })
    }

    /// Block for at most `timeout`; `None` on timeout
    pub fn wait_event_timeout(&self, timeout: Duration) -> Option<Event> {
        let millis = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
        let mut raw = RawEvent::zeroed();
        let got = unsafe { (self.api().SDL_WaitEventTimeout)(raw.as_mut_ptr(), millis) };
        marshal::decode_bool(got).then(|| unsafe { Event::decode(&raw) })
    }

    pub fn pump_events(&self) {
        unsafe { (self.api().SDL_PumpEvents)() }
    }

    /// Append an event to the queue
    ///
    /// Returns `Ok(false)` when the installed filter dropped the event. A
    /// full queue or other native failure is an error.
    pub fn push_event(&self, event: RawEvent) -> Result<bool> {
        let mut event = event;
        self.clear_error();
        if marshal::decode_bool(unsafe { (self.api().SDL_PushEvent)(event.as_mut_ptr()) }) {
            return Ok(true);
        }
        let message = self.get_error();
        if message.is_empty() {
            tracing::trace!(kind = ?event.kind(), "event dropped by filter");
            Ok(false)
        } else {
            Err(Error::Native(message))
        }
    }

    /// Encode and push an owned event; `Ok(false)` if it was filtered out
    pub fn push(&self, event: &Event) -> Result<bool> {
        let raw = event
            .to_raw()
            .ok_or_else(|| MarshalError::Unencodable(format!("{:?} event", event.kind())))?;
        self.push_event(raw)
    }

    /// Add, peek or get events whose kind lies in `min..=max`
    ///
    /// For [`EventAction::Add`] the events in `buffer` are queued; otherwise
    /// up to `buffer.len()` events are written into it. Returns the count.
    pub fn peep_events(&self, buffer: &mut [RawEvent], action: EventAction, min: EventType, max: EventType) -> Result<usize> {
        let len = marshal::len_to_c_int(buffer.len())?;
        let count = unsafe { (self.api().SDL_PeepEvents)(buffer.as_mut_ptr(), len, action as c_int, min.0, max.0) };
        usize::try_from(count).map_err(|_| self.last_error())
    }

    /// Remove and decode up to `max_count` events in `min..=max`
    pub fn take_events(&self, max_count: usize, min: EventType, max: EventType) -> Result<Vec<Event>> {
        let mut buffer = vec![RawEvent::zeroed(); max_count];
        let count = self.peep_events(&mut buffer, EventAction::Get, min, max)?;
        Ok(buffer[..count].iter().map(|raw| unsafe { Event::decode(raw) }).collect())
    }

    pub fn has_event(&self, kind: EventType) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_HasEvent)(kind.0) })
    }

    pub fn has_events(&self, min: EventType, max: EventType) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_HasEvents)(min.0, max.0) })
    }

    pub fn flush_event(&self, kind: EventType) {
        unsafe { (self.api().SDL_FlushEvent)(kind.0) }
    }

    pub fn flush_events(&self, min: EventType, max: EventType) {
        unsafe { (self.api().SDL_FlushEvents)(min.0, max.0) }
    }

    pub fn set_event_enabled(&self, kind: EventType, enabled: bool) {
        unsafe { (self.api().SDL_SetEventEnabled)(kind.0, marshal::encode_bool(enabled)) }
    }

    pub fn event_enabled(&self, kind: EventType) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_EventEnabled)(kind.0) })
    }

    /// Reserve `count` consecutive user event kinds; returns the first
    pub fn register_events(&self, count: usize) -> Result<EventType> {
        let count = marshal::len_to_c_int(count)?;
        match unsafe { (self.api().SDL_RegisterEvents)(count) } {
            0 => Err(self.last_error()),
            first => Ok(EventType(first)),
        }
    }

    /// Install the queue filter; events it rejects are dropped before queuing
    ///
    /// The closure may run on any thread that pushes events. Only one filter
    /// is active at a time.
    pub fn set_event_filter<F>(&self, filter: F) -> EventFilterGuard
    where
        F: Fn(&Event) -> bool + Send + Sync + 'static,
    {
        let callback = CallbackHandle::new(Box::new(filter) as FilterFn);
        unsafe { (self.api().SDL_SetEventFilter)(Some(filter_trampoline()), callback.userdata()) };
        EventFilterGuard {
            sdl: self.clone(),
            _callback: callback,
        }
    }

    /// Observe every event as it is queued; the return value is ignored
    pub fn add_event_watch<F>(&self, watch: F) -> Result<EventWatch>
    where
        F: Fn(&Event) -> bool + Send + Sync + 'static,
    {
        let callback = CallbackHandle::new(Box::new(watch) as FilterFn);
        self.check(unsafe { (self.api().SDL_AddEventWatch)(Some(filter_trampoline()), callback.userdata()) })?;
        Ok(EventWatch {
            sdl: self.clone(),
            callback,
        })
    }

    /// Run `filter` over the queue now, removing events it rejects
    pub fn filter_events<F>(&self, filter: F)
    where
        F: Fn(&Event) -> bool + Send + Sync + 'static,
    {
        let callback = CallbackHandle::new(Box::new(filter) as FilterFn);
        unsafe { (self.api().SDL_FilterEvents)(Some(filter_trampoline()), callback.userdata()) }
    }
}
