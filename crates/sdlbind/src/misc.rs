//! Clipboard, filesystem paths, URLs, timers and platform

use crate::error::Result;
use crate::ffi::marshal::{self, MarshalContext};
use crate::sdl::Sdl;
use std::path::PathBuf;
use std::time::Duration;

impl Sdl {
    // ========================================================================
    // Clipboard
    // ========================================================================

    /// Clipboard contents; empty when the clipboard holds no text
    pub fn clipboard_text(&self) -> Result<String> {
        self.take_string(unsafe { (self.api().SDL_GetClipboardText)() })
    }

    pub fn set_clipboard_text(&self, text: &str) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let text = ctx.c_str(text)?;
        self.check(unsafe { (self.api().SDL_SetClipboardText)(text) })
    }

    pub fn has_clipboard_text(&self) -> bool {
        marshal::decode_bool(unsafe { (self.api().SDL_HasClipboardText)() })
    }

    // ========================================================================
    // Filesystem
    // ========================================================================

    /// Directory the application was run from, with a trailing separator
    pub fn base_path(&self) -> Result<PathBuf> {
        let path = self.check_const_ptr(unsafe { (self.api().SDL_GetBasePath)() })?;
        Ok(PathBuf::from(unsafe { marshal::string_from_ptr(path) }))
    }

    /// Per-user writable directory for `org`/`app`, created if missing
    pub fn pref_path(&self, org: &str, app: &str) -> Result<PathBuf> {
        let mut ctx = MarshalContext::new();
        let org = ctx.c_str(org)?;
        let app = ctx.c_str(app)?;
        let path = self.take_string(unsafe { (self.api().SDL_GetPrefPath)(org, app) })?;
        Ok(PathBuf::from(path))
    }

    /// Open `url` in the system's handler
    pub fn open_url(&self, url: &str) -> Result<()> {
        let mut ctx = MarshalContext::new();
        let url = ctx.c_str(url)?;
        self.check(unsafe { (self.api().SDL_OpenURL)(url) })
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Milliseconds since library initialisation
    pub fn ticks(&self) -> u64 {
        unsafe { (self.api().SDL_GetTicks)() }
    }

    pub fn ticks_ns(&self) -> u64 {
        unsafe { (self.api().SDL_GetTicksNS)() }
    }

    /// Time since initialisation
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.ticks_ns())
    }

    /// Sleep at least `duration`, saturating at `u32::MAX` milliseconds
    pub fn delay(&self, duration: Duration) {
        unsafe { (self.api().SDL_Delay)(delay_ms(duration)) }
    }

    pub fn performance_counter(&self) -> u64 {
        unsafe { (self.api().SDL_GetPerformanceCounter)() }
    }

    /// Counts per second of [`performance_counter`](Self::performance_counter)
    pub fn performance_frequency(&self) -> u64 {
        unsafe { (self.api().SDL_GetPerformanceFrequency)() }
    }

    /// "Windows", "macOS", "Linux", "iOS", "Android", ...
    pub fn platform(&self) -> String {
        unsafe { marshal::string_from_ptr((self.api().SDL_GetPlatform)()) }
    }
}

fn delay_ms(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
