//!
//! The ambient time zone that date-only bounds are normalized in.
//!
//! Resolution order: a per-thread override installed with [with_time_zone],
//! then the process default installed with [init], then
//! [ScopeConfig::from_env].
//!

use std::cell::Cell;

use chrono_tz::Tz;
use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::{ScopeError, ScopeResult};

/// Environment variable holding the ambient time zone name, e.g. `Europe/Oslo`.
pub const ENV_TIME_ZONE: &str = "DATESCOPE_TIME_ZONE";

static DEFAULT: OnceCell<ScopeConfig> = OnceCell::new();

thread_local! {
    static OVERRIDE: Cell<Option<Tz>> = Cell::new(None);
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScopeConfig {
    pub time_zone: Tz,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            time_zone: chrono_tz::UTC,
        }
    }
}

impl ScopeConfig {
    pub fn from_env() -> Self {
        Self {
            time_zone: parse_timezone(std::env::var(ENV_TIME_ZONE).ok().as_deref()),
        }
    }
}

/// Parse a time zone name, falling back to UTC when absent or unknown.
pub fn parse_timezone(tz: Option<&str>) -> Tz {
    match tz.map(str::trim).filter(|name| !name.is_empty()) {
        None => chrono_tz::UTC,
        Some(name) => try_parse_timezone(name).unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to UTC");
            chrono_tz::UTC
        }),
    }
}

pub fn try_parse_timezone(name: &str) -> ScopeResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| ScopeError::UnknownTimeZone(name.to_string()))
}

/// Install the process-wide default. Only the first call succeeds.
pub fn init(config: ScopeConfig) -> ScopeResult<()> {
    tracing::debug!(time_zone = %config.time_zone, "configuring ambient time zone");
    DEFAULT
        .set(config)
        .map_err(|_| ScopeError::AlreadyConfigured)
}

/// The process-wide default configuration.
pub fn config() -> &'static ScopeConfig {
    DEFAULT.get_or_init(ScopeConfig::from_env)
}

/// The effective ambient time zone of the current thread.
pub fn time_zone() -> Tz {
    OVERRIDE
        .with(Cell::get)
        .unwrap_or_else(|| config().time_zone)
}

/// Run `func` with `tz` as the ambient time zone of the current thread.
pub fn with_time_zone<R>(tz: Tz, func: impl FnOnce() -> R) -> R {
    struct Restore(Option<Tz>);

    impl Drop for Restore {
        fn drop(&mut self) {
            OVERRIDE.with(|cell| cell.set(self.0));
        }
    }

    let _restore = Restore(OVERRIDE.with(|cell| cell.replace(Some(tz))));
    func()
}
