// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host-provided configuration.
//!
//! The host hands the adapter a service table for reading key/value
//! profiles; [`ProfileSource`] is that table. [`MetaConfig`] pulls this
//! crate's own settings out of a profile.
//!
//! # Example profile
//!
//! ```text
//! # lai.profile
//! LAI_META_CATALOG=/etc/lai/linecard.yaml
//! LAI_META_LOG_LEVEL=debug
//! LAI_META_STAT_PRECISION=declared
//! ```

use crate::metadata::StatMetadata;
use crate::serialize::{serialize_stat_value, serialize_stat_value_fixed, SerResult, TextWriter};
use crate::types::StatValue;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Profile key naming the catalog file.
pub const KEY_CATALOG: &str = "LAI_META_CATALOG";
/// Profile key for the log level filter.
pub const KEY_LOG_LEVEL: &str = "LAI_META_LOG_LEVEL";
/// Profile key for the statistic precision policy.
pub const KEY_STAT_PRECISION: &str = "LAI_META_STAT_PRECISION";

pub type ProfileId = u32;

/// Host service table for profile lookups.
pub trait ProfileSource {
    /// Value of `variable` in profile `profile_id`.
    fn profile_get_value(&self, profile_id: ProfileId, variable: &str) -> Option<String>;

    /// Next `(variable, value)` pair after `cursor`, advancing it.
    ///
    /// Start from a zeroed cursor; `None` once the profile is exhausted.
    fn profile_get_next_value(
        &self,
        profile_id: ProfileId,
        cursor: &mut usize,
    ) -> Option<(String, String)>;
}

/// Error raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse { line: usize, reason: String },
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "failed to read profile: {}", msg),
            ConfigError::Parse { line, reason } => {
                write!(f, "profile line {}: {}", line, reason)
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value '{}' for {}", value, key)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// In-memory key/value profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    id: ProfileId,
    /// Insertion order; keys are unique.
    values: Vec<(String, String)>,
}

impl Profile {
    pub fn new(id: ProfileId) -> Self {
        Self {
            id,
            values: Vec::new(),
        }
    }

    pub fn id(&self) -> ProfileId {
        self.id
    }

    /// Set `key`, replacing an earlier value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse `KEY=VALUE` lines; `#` starts a comment line.
    pub fn from_kv_str(id: ProfileId, text: &str) -> Result<Self, ConfigError> {
        let mut profile = Self::new(id);
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::Parse {
                line: idx + 1,
                reason: format!("expected KEY=VALUE, got '{}'", line),
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::Parse {
                    line: idx + 1,
                    reason: "empty key".into(),
                });
            }
            profile.set(key, value.trim());
        }
        Ok(profile)
    }

    /// Parse a flat YAML mapping of scalars.
    #[cfg(feature = "catalog")]
    pub fn from_yaml_str(id: ProfileId, text: &str) -> Result<Self, ConfigError> {
        use crate::catalog::ScalarText;
        use std::collections::BTreeMap;

        let map: BTreeMap<String, ScalarText> =
            serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
                line: e.location().map_or(0, |loc| loc.line()),
                reason: e.to_string(),
            })?;
        let mut profile = Self::new(id);
        for (key, value) in map {
            profile.set(key, value.to_text());
        }
        Ok(profile)
    }

    /// Load from a file; `.yaml`/`.yml` as YAML, anything else as `KEY=VALUE`.
    pub fn load<P: AsRef<Path>>(id: ProfileId, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        log::debug!("[config] reading profile {}", path.display());
        Self::parse(id, ext, &text)
    }

    #[cfg(feature = "catalog")]
    fn parse(id: ProfileId, ext: &str, text: &str) -> Result<Self, ConfigError> {
        if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            return Self::from_yaml_str(id, text);
        }
        Self::from_kv_str(id, text)
    }

    #[cfg(not(feature = "catalog"))]
    fn parse(id: ProfileId, _ext: &str, text: &str) -> Result<Self, ConfigError> {
        Self::from_kv_str(id, text)
    }
}

impl ProfileSource for Profile {
    fn profile_get_value(&self, profile_id: ProfileId, variable: &str) -> Option<String> {
        if profile_id != self.id {
            return None;
        }
        self.get(variable).map(str::to_string)
    }

    fn profile_get_next_value(
        &self,
        profile_id: ProfileId,
        cursor: &mut usize,
    ) -> Option<(String, String)> {
        if profile_id != self.id {
            return None;
        }
        let entry = self.values.get(*cursor)?.clone();
        *cursor += 1;
        Some(entry)
    }
}

// ---------------------------------------------------------------------------
// MetaConfig
// ---------------------------------------------------------------------------

/// Precision used when rendering double statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatPrecisionPolicy {
    /// Each statistic's declared precision.
    #[default]
    Declared,
    /// Two decimals, like double attributes.
    Fixed2,
}

impl StatPrecisionPolicy {
    pub fn serialize(
        self,
        w: &mut TextWriter<'_>,
        meta: &StatMetadata,
        value: &StatValue,
    ) -> SerResult<usize> {
        match self {
            StatPrecisionPolicy::Declared => serialize_stat_value(w, meta, value),
            StatPrecisionPolicy::Fixed2 => serialize_stat_value_fixed(w, meta, value),
        }
    }
}

impl FromStr for StatPrecisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "declared" => Ok(Self::Declared),
            "fixed2" | "fixed" => Ok(Self::Fixed2),
            other => Err(format!("unknown stat precision policy: {}", other)),
        }
    }
}

/// Settings of the metadata layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaConfig {
    /// Catalog to load; the bundled sample when absent.
    pub catalog_path: Option<PathBuf>,
    pub log_level: log::LevelFilter,
    pub stat_precision: StatPrecisionPolicy,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            log_level: log::LevelFilter::Info,
            stat_precision: StatPrecisionPolicy::Declared,
        }
    }
}

impl MetaConfig {
    /// Read settings from `source`; absent keys keep their defaults.
    pub fn from_profile<S>(source: &S, profile_id: ProfileId) -> Result<Self, ConfigError>
    where
        S: ProfileSource + ?Sized,
    {
        let mut config = Self::default();
        if let Some(path) = source.profile_get_value(profile_id, KEY_CATALOG) {
            config.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(level) = source.profile_get_value(profile_id, KEY_LOG_LEVEL) {
            config.log_level = level.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: KEY_LOG_LEVEL.into(),
                value: level.clone(),
            })?;
        }
        if let Some(policy) = source.profile_get_value(profile_id, KEY_STAT_PRECISION) {
            config.stat_precision = policy.parse().map_err(|_| ConfigError::InvalidValue {
                key: KEY_STAT_PRECISION.into(),
                value: policy.clone(),
            })?;
        }
        log::debug!("[config] profile {}: {:?}", profile_id, config);
        Ok(config)
    }

    /// Registry from the configured catalog, or the bundled sample.
    #[cfg(feature = "catalog")]
    pub fn load_registry(&self) -> Result<crate::metadata::Registry, crate::catalog::CatalogError> {
        match &self.catalog_path {
            Some(path) => crate::catalog::load_registry(path),
            None => crate::catalog::Catalog::sample()?.into_registry(),
        }
    }
}
