// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Logger setup for C adapters.
//!
//! Every entry point goes through `lai_meta::logging`, so the first call
//! installs the logger and later ones return `LaiMetaOk` unchanged.

use libc::c_char;

use lai_meta::config::{MetaConfig, Profile};
use lai_meta::logging;

use super::{c_str, LaiMetaStatus};

/// Log level for metadata logging
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaiMetaLogLevel {
    LaiMetaLogOff = 0,
    LaiMetaLogError = 1,
    LaiMetaLogWarn = 2,
    LaiMetaLogInfo = 3,
    LaiMetaLogDebug = 4,
    LaiMetaLogTrace = 5,
}

impl From<LaiMetaLogLevel> for log::LevelFilter {
    fn from(level: LaiMetaLogLevel) -> Self {
        match level {
            LaiMetaLogLevel::LaiMetaLogOff => log::LevelFilter::Off,
            LaiMetaLogLevel::LaiMetaLogError => log::LevelFilter::Error,
            LaiMetaLogLevel::LaiMetaLogWarn => log::LevelFilter::Warn,
            LaiMetaLogLevel::LaiMetaLogInfo => log::LevelFilter::Info,
            LaiMetaLogLevel::LaiMetaLogDebug => log::LevelFilter::Debug,
            LaiMetaLogLevel::LaiMetaLogTrace => log::LevelFilter::Trace,
        }
    }
}

fn status(result: Result<(), logging::LoggerTaken>) -> LaiMetaStatus {
    match result {
        Ok(()) => LaiMetaStatus::LaiMetaOk,
        Err(_) => LaiMetaStatus::LaiMetaOperationFailed,
    }
}

/// Install the console logger at `level`.
///
/// # Returns
/// `LaiMetaOk`, also when already initialized by this library;
/// `LaiMetaOperationFailed` if the host installed another logger first.
///
/// # Example (C)
/// ```c
/// lai_meta_logging_init(LaiMetaLogWarn);
/// ```
#[no_mangle]
pub extern "C" fn lai_meta_logging_init(level: LaiMetaLogLevel) -> LaiMetaStatus {
    status(logging::init(level.into()))
}

/// Install the console logger from `LAI_META_LOG_LEVEL`, falling back to
/// `default_level` when the variable is unset.
#[no_mangle]
pub extern "C" fn lai_meta_logging_init_env(default_level: LaiMetaLogLevel) -> LaiMetaStatus {
    status(logging::init_env(default_level.into()))
}

/// Install the console logger at the `LAI_META_LOG_LEVEL` of a profile file.
///
/// # Safety
/// - `path` must be a valid null-terminated C string.
///
/// # Returns
/// `LaiMetaInvalidArgument` for a bad path argument or an unparsable level,
/// `LaiMetaCatalogError` when the file cannot be read.
///
/// # Example (C)
/// ```c
/// lai_meta_logging_init_from_profile("/etc/lai/meta.cfg");
/// ```
#[no_mangle]
pub unsafe extern "C" fn lai_meta_logging_init_from_profile(path: *const c_char) -> LaiMetaStatus {
    let Some(path) = c_str(path) else {
        return LaiMetaStatus::LaiMetaInvalidArgument;
    };
    let profile = match Profile::load(0, path) {
        Ok(profile) => profile,
        Err(e) => {
            log::warn!("[ffi] profile {}: {}", path, e);
            return LaiMetaStatus::LaiMetaCatalogError;
        }
    };
    match MetaConfig::from_profile(&profile, 0) {
        Ok(config) => status(logging::init_from_config(&config)),
        Err(e) => {
            log::warn!("[ffi] profile {}: {}", path, e);
            LaiMetaStatus::LaiMetaInvalidArgument
        }
    }
}
