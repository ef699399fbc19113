//! Native log messages and output redirection

use crate::error::Result;
use crate::ffi::callbacks::{self, CallbackHandle};
use crate::ffi::marshal::MarshalContext;
use crate::sdl::Sdl;
use crate::sys::SDL_LogOutputFunction;
use std::ffi::c_int;
use std::fmt;

/// `SDL_LogPriority`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum LogPriority {
    Invalid = 0,
    Trace = 1,
    Verbose = 2,
    Debug = 3,
    Info = 4,
    Warn = 5,
    Error = 6,
    Critical = 7,
}

impl LogPriority {
    pub fn from_raw(value: c_int) -> Self {
        match value {
            1 => Self::Trace,
            2 => Self::Verbose,
            3 => Self::Debug,
            4 => Self::Info,
            5 => Self::Warn,
            6 => Self::Error,
            7 => Self::Critical,
            _ => Self::Invalid,
        }
    }
}

/// `SDL_LogCategory`; values from [`LogCategory::CUSTOM`] up are free for
/// applications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogCategory(pub i32);

impl LogCategory {
    pub const APPLICATION: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const ASSERT: Self = Self(2);
    pub const SYSTEM: Self = Self(3);
    pub const AUDIO: Self = Self(4);
    pub const VIDEO: Self = Self(5);
    pub const RENDER: Self = Self(6);
    pub const INPUT: Self = Self(7);
    pub const TEST: Self = Self(8);
    pub const GPU: Self = Self(9);
    pub const CUSTOM: Self = Self(19);

    pub fn name(self) -> Option<&'static str> {
        Some(match self.0 {
            0 => "application",
            1 => "error",
            2 => "assert",
            3 => "system",
            4 => "audio",
            5 => "video",
            6 => "render",
            7 => "input",
            8 => "test",
            9 => "gpu",
            _ => return None,
        })
    }
}

type LogFn = Box<dyn Fn(i32, i32, &str) + Send + Sync>;

/// Installed log output function; the default output is restored on drop
#[must_use = "the output function is removed when the guard is dropped"]
pub struct LogOutputGuard {
    sdl: Sdl,
    _callback: CallbackHandle<LogFn>,
}

impl Drop for LogOutputGuard {
    fn drop(&mut self) {
        let api = self.sdl.api();
        unsafe {
            let default = (api.SDL_GetDefaultLogOutputFunction)();
            (api.SDL_SetLogOutputFunction)(default, std::ptr::null_mut());
        }
    }
}

impl fmt::Debug for LogOutputGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogOutputGuard").finish_non_exhaustive()
    }
}

/// Emit one native log line as a `tracing` event
fn forward(category: LogCategory, priority: LogPriority, message: &str) {
    let name = category.name().unwrap_or("custom");
    match priority {
        LogPriority::Trace | LogPriority::Verbose => {
            tracing::trace!(target: "sdl", category = name, "{message}")
        }
        LogPriority::Debug => tracing::debug!(target: "sdl", category = name, "{message}"),
        LogPriority::Info => tracing::info!(target: "sdl", category = name, "{message}"),
        LogPriority::Warn => tracing::warn!(target: "sdl", category = name, "{message}"),
        LogPriority::Error | LogPriority::Critical | LogPriority::Invalid => {
            tracing::error!(target: "sdl", category = name, ?priority, "{message}")
        }
    }
}

impl Sdl {
    /// Log `message` through the native logger
    pub fn log_message(&self, category: LogCategory, priority: LogPriority, message: &str) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let message = ctx.c_str(message)?;
        unsafe { (self.api().SDL_LogMessage)(category.0, priority as c_int, c"%s".as_ptr(), message) }
        Ok(())
    }

    pub fn set_log_priorities(&self, priority: LogPriority) {
        unsafe { (self.api().SDL_SetLogPriorities)(priority as c_int) }
    }

    pub fn set_log_priority(&self, category: LogCategory, priority: LogPriority) {
        unsafe { (self.api().SDL_SetLogPriority)(category.0, priority as c_int) }
    }

    pub fn log_priority(&self, category: LogCategory) -> LogPriority {
        LogPriority::from_raw(unsafe { (self.api().SDL_GetLogPriority)(category.0) })
    }

    pub fn reset_log_priorities(&self) {
        unsafe { (self.api().SDL_ResetLogPriorities)() }
    }

    /// Route native log output to `output` until the guard drops
    ///
    /// `output` may be called from any thread that logs.
    pub fn set_log_output<F>(&self, output: F) -> LogOutputGuard
    where
        F: Fn(LogCategory, LogPriority, &str) + Send + Sync + 'static,
    {
        let callback: LogFn = Box::new(move |category: i32, priority: i32, message: &str| {
            output(LogCategory(category), LogPriority::from_raw(priority), message)
        });
        let handle = CallbackHandle::new(callback);
        let trampoline: SDL_LogOutputFunction = callbacks::log_output::<LogFn>;
        unsafe { (self.api().SDL_SetLogOutputFunction)(Some(trampoline), handle.userdata()) }
        LogOutputGuard {
            sdl: self.clone(),
            _callback: handle,
        }
    }

    /// Send native log output to `tracing` under the `sdl` target
    pub fn forward_to_tracing(&self) -> LogOutputGuard {
        tracing::debug!("forwarding native log output to tracing");
        self.set_log_output(forward)
    }
}
