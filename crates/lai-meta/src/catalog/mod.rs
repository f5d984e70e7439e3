// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declarative metadata catalogs.
//!
//! A catalog describes enums and per-object-type attribute and statistic
//! tables in YAML or JSON, and is turned into a [`Registry`] at load time.
//! Defaults and condition values use the same text format as the
//! serialization engine.
//!
//! # Example YAML
//!
//! ```yaml
//! enums:
//!   - name: lai_admin_state_t
//!     prefix: LAI_ADMIN_STATE_
//!     values: [LAI_ADMIN_STATE_ENABLED, LAI_ADMIN_STATE_DISABLED]
//!
//! objects:
//!   - object_type: PORT
//!     attributes:
//!       - name: LAI_PORT_ATTR_ADMIN_STATE
//!         type: INT32
//!         enum: lai_admin_state_t
//!         flags: [CREATE_AND_SET]
//!         default: LAI_ADMIN_STATE_ENABLED
//! ```

mod build;
mod model;

pub use model::{
    AttrDoc, CatalogDocument, ConditionDoc, ConditionTermDoc, DefaultFromDoc, EnumDoc,
    EnumValueDoc, ObjectDoc, ScalarText, StatDoc,
};

use crate::metadata::{MetadataError, Registry};
use std::fmt;
use std::fs;
use std::path::Path;

/// Catalog of the sample line card shipped with the crate.
pub const SAMPLE_LINECARD_YAML: &str = include_str!("../../catalog/linecard.yaml");

/// Error raised while loading a catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    Io(String),
    Parse(String),
    UnknownObjectType(String),
    /// Unknown value type, flag, unit or provenance keyword.
    UnknownKeyword { context: String, keyword: String },
    UnknownEnum { attr: String, name: String },
    UnknownAttribute { context: String, name: String },
    /// Default or condition text that does not parse for its type.
    BadValue { context: String, text: String },
    Metadata(MetadataError),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(msg) => write!(f, "failed to read catalog: {}", msg),
            CatalogError::Parse(msg) => write!(f, "failed to parse catalog: {}", msg),
            CatalogError::UnknownObjectType(name) => write!(f, "unknown object type {}", name),
            CatalogError::UnknownKeyword { context, keyword } => {
                write!(f, "{}: unknown keyword {}", context, keyword)
            }
            CatalogError::UnknownEnum { attr, name } => {
                write!(f, "{}: unknown enum {}", attr, name)
            }
            CatalogError::UnknownAttribute { context, name } => {
                write!(f, "{}: unknown attribute {}", context, name)
            }
            CatalogError::BadValue { context, text } => {
                write!(f, "{}: cannot parse value '{}'", context, text)
            }
            CatalogError::Metadata(err) => write!(f, "inconsistent metadata: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Metadata(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MetadataError> for CatalogError {
    fn from(err: MetadataError) -> Self {
        CatalogError::Metadata(err)
    }
}

/// A parsed, not yet validated catalog.
#[derive(Debug, Default)]
pub struct Catalog {
    document: CatalogDocument,
}

impl Catalog {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let document =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Ok(Self { document })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let document =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Ok(Self { document })
    }

    /// Load from a file; `.json` is read as JSON, anything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        log::debug!("[catalog] loading {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// The bundled line-card catalog.
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_yaml_str(SAMPLE_LINECARD_YAML)
    }

    pub fn document(&self) -> &CatalogDocument {
        &self.document
    }

    /// Resolve names, parse values and validate into a registry.
    pub fn into_registry(self) -> Result<Registry, CatalogError> {
        build::build_registry(&self.document)
    }
}

/// Load `path` straight into a registry.
pub fn load_registry<P: AsRef<Path>>(path: P) -> Result<Registry, CatalogError> {
    Catalog::load(path)?.into_registry()
}
