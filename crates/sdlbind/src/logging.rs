//! Tracing subscriber setup
//!
//! The crate only emits `tracing` events; applications that already install a
//! subscriber need none of this. [`init`] is a convenience for those that
//! don't.

use crate::log::LogOutputGuard;
use crate::sdl::Sdl;
use sdlbind_config::LoggingConfig;
use tracing_subscriber::filter::EnvFilter;

/// Environment variable overriding the configured filter
pub const LOG_ENV: &str = "SDLBIND_LOG";

/// Filter from `SDLBIND_LOG`, else the configured directive, else `info`
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a fmt subscriber as the global default
///
/// Returns `false` when a global subscriber was already set; calling this
/// more than once is harmless.
pub fn init(config: &LoggingConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true)
        .try_init()
        .is_ok()
}

/// [`init`], then forward native log output when the config asks for it
///
/// Keep the returned guard alive for as long as forwarding should last.
pub fn install(sdl: &Sdl, config: &LoggingConfig) -> Option<LogOutputGuard> {
    init(config);
    config.forward_native_log.then(|| sdl.forward_to_tracing())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config(filter: &str) -> LoggingConfig {
        LoggingConfig {
            filter: filter.to_string(),
            ..Default::default()
        }
    }

    #[test]
    #[serial]
    fn test_env_overrides_config() {
        std::env::set_var(LOG_ENV, "sdlbind=trace");
        let filter = env_filter(&config("warn"));
        std::env::remove_var(LOG_ENV);
        assert_eq!(filter.to_string(), "sdlbind=trace");
    }

    #[test]
    #[serial]
    fn test_config_filter_used() {
        std::env::remove_var(LOG_ENV);
        assert_eq!(env_filter(&config("debug")).to_string(), "debug");
    }

    #[test]
    #[serial]
    fn test_init_is_idempotent() {
        std::env::remove_var(LOG_ENV);
        init(&config("info"));
        assert!(!init(&config("info")));
    }
}
