// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # lai-meta - Line-card Abstraction Interface metadata layer
//!
//! Reflection over the attributes and statistics of optical line-card
//! objects: what each attribute is, when it is mandatory, and how its value
//! reads and writes as text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lai_meta::catalog::Catalog;
//! use lai_meta::serialize::{serialize_attribute, to_text};
//! use lai_meta::types::{Attribute, ObjectType};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Catalog::sample()?.into_registry()?;
//! let meta = registry
//!     .attr_metadata_by_name("LAI_PORT_ATTR_ADMIN_STATE")
//!     .ok_or("unknown attribute")?;
//! let attr = Attribute::new(meta.attr_id, 1i32);
//! let text = to_text(|w| serialize_attribute(w, meta, &attr))?;
//! assert_eq!(text, r#"{"id":"LAI_PORT_ATTR_ADMIN_STATE","value":"LAI_ADMIN_STATE_DISABLED"}"#);
//! # let _ = ObjectType::Port;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------+
//! |  catalog (YAML/JSON)  ->  RegistryBuilder  ->  Registry       |
//! +---------------------------------------------------------------+
//! |  condition: is_condition_met / is_valid_only_met              |
//! |  serialize: primitives, enums, attributes, statistics         |
//! +---------------------------------------------------------------+
//! |  adapter: LaiStatus, ObjectApi, check_create_attributes       |
//! |  config:  ProfileSource, Profile, MetaConfig                  |
//! +---------------------------------------------------------------+
//! ```
//!
//! The registry is immutable once built. Lookups and serializers never
//! allocate behind the caller's back, except [`serialize::to_text`].
//!
//! ## Features
//!
//! - **`catalog`** (default): YAML/JSON catalog loader and YAML profiles.
//! - **`logging`** (default): shared `env_logger` console setup.

pub mod adapter;
#[cfg(feature = "catalog")]
pub mod catalog;
pub mod condition;
pub mod config;
#[cfg(feature = "logging")]
pub mod logging;
pub mod metadata;
pub mod serialize;
pub mod types;

pub use adapter::{check_create_attributes, LaiStatus, ObjectApi, ObjectMetaKey};
pub use condition::{is_condition_met, is_valid_only_met, ConditionError};
pub use config::{MetaConfig, Profile, ProfileSource, StatPrecisionPolicy};
pub use metadata::{AttrMetadata, MetadataError, ObjectTypeInfo, Registry, StatMetadata};
pub use serialize::{SerError, SerResult, TextWriter};
pub use types::{AttrValueType, Attribute, AttributeValue, ObjectId, ObjectType};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
