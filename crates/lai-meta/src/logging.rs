// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process logger setup shared by `laictl` and the C surface.
//!
//! The first successful call installs an `env_logger` backend; later calls
//! are no-ops that report success, so adapters can initialize from every
//! entry point without tracking who went first.

use crate::config::{MetaConfig, KEY_LOG_LEVEL};
use log::LevelFilter;
use std::fmt;
use std::sync::OnceLock;

/// Outcome of the first install attempt.
static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Another logger owned the `log` facade before this module ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerTaken;

impl fmt::Display for LoggerTaken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a foreign logger is already installed")
    }
}

impl std::error::Error for LoggerTaken {}

/// Console builder with the crate's format.
pub fn builder(filter: LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(filter).format_timestamp_millis();
    builder
}

fn install(mut builder: env_logger::Builder) -> Result<(), LoggerTaken> {
    if *INSTALLED.get_or_init(move || builder.try_init().is_ok()) {
        Ok(())
    } else {
        Err(LoggerTaken)
    }
}

/// Install the console logger at `filter`. The first level wins.
pub fn init(filter: LevelFilter) -> Result<(), LoggerTaken> {
    install(builder(filter))
}

/// Install the console logger at the configured level.
pub fn init_from_config(config: &MetaConfig) -> Result<(), LoggerTaken> {
    init(config.log_level)
}

/// Install the console logger with filters taken from the
/// `LAI_META_LOG_LEVEL` environment variable, `default` when unset.
///
/// Accepts full `env_logger` directives, e.g. `lai_meta::serialize=trace`.
pub fn init_env(default: LevelFilter) -> Result<(), LoggerTaken> {
    let env = env_logger::Env::new().filter_or(KEY_LOG_LEVEL, default.to_string());
    let mut builder = env_logger::Builder::from_env(env);
    builder.format_timestamp_millis();
    install(builder)
}

/// Whether this module's logger is active.
pub fn is_installed() -> bool {
    INSTALLED.get().copied().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        assert_eq!(init(LevelFilter::Warn), Ok(()));
        assert!(is_installed());
        assert_eq!(init(LevelFilter::Trace), Ok(()));
        assert_eq!(init_from_config(&MetaConfig::default()), Ok(()));
        assert_eq!(init_env(LevelFilter::Info), Ok(()));
        log::warn!("[logging] still routed after repeated init");
    }
}
