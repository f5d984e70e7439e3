// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read-only metadata registry.
//!
//! Built once by [`RegistryBuilder::build`], which plays the role of the table
//! generator: it orders the per-type tables, computes the direct-index fast
//! path, builds the global name indexes and rejects inconsistent metadata.
//! After that nothing is ever mutated, so any number of threads may read it.

use super::{AttrCondition, AttrMetadata, ObjectTypeInfo, ObjectTypeInfoBuilder, StatMetadata};
use crate::types::{AttrId, AttrValueType, Attribute, ObjectType, StatId};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, OnceLock};

// ---------------------------------------------------------------------------
// MetadataError
// ---------------------------------------------------------------------------

/// Inconsistency found while building a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// Tables registered for `NULL` or `MAX`.
    InvalidObjectType(ObjectType),
    DuplicateObjectType(ObjectType),
    /// Attribute or statistic registered under another type's table.
    ObjectTypeMismatch { expected: ObjectType, name: String },
    DuplicateAttrId { object_type: ObjectType, attr_id: AttrId },
    DuplicateStatId { object_type: ObjectType, stat_id: StatId },
    DuplicateName(String),
    /// Mandatory-on-create attribute declares a default.
    MandatoryWithDefault(String),
    /// Condition or valid-only entry references an id absent from the type.
    ConditionTargetMissing { attr: String, target: AttrId },
    ConditionTargetNotComparable {
        attr: String,
        target: String,
        value_type: AttrValueType,
    },
    ConditionValueMismatch { attr: String, target: String },
    /// Enum descriptor missing, unknown, or attached to a non-int32 tag.
    EnumMetadataMissing(String),
    DefaultValueMismatch(String),
    /// Both a constant default and another default provenance declared.
    ConflictingDefault(String),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::InvalidObjectType(ot) => {
                write!(f, "object type {} cannot carry metadata", ot)
            }
            MetadataError::DuplicateObjectType(ot) => {
                write!(f, "object type {} registered twice", ot)
            }
            MetadataError::ObjectTypeMismatch { expected, name } => {
                write!(f, "{} registered under {}", name, expected)
            }
            MetadataError::DuplicateAttrId {
                object_type,
                attr_id,
            } => write!(f, "duplicate attribute id {} on {}", attr_id, object_type),
            MetadataError::DuplicateStatId {
                object_type,
                stat_id,
            } => write!(f, "duplicate statistic id {} on {}", stat_id, object_type),
            MetadataError::DuplicateName(name) => write!(f, "duplicate name {}", name),
            MetadataError::MandatoryWithDefault(name) => {
                write!(f, "{} is mandatory on create but declares a default", name)
            }
            MetadataError::ConditionTargetMissing { attr, target } => {
                write!(f, "{} references unknown attribute id {}", attr, target)
            }
            MetadataError::ConditionTargetNotComparable {
                attr,
                target,
                value_type,
            } => write!(
                f,
                "{} conditions on {} of non-comparable type {}",
                attr, target, value_type
            ),
            MetadataError::ConditionValueMismatch { attr, target } => {
                write!(f, "{} condition value does not match type of {}", attr, target)
            }
            MetadataError::EnumMetadataMissing(name) => {
                write!(f, "{} has no usable enum metadata", name)
            }
            MetadataError::DefaultValueMismatch(name) => {
                write!(f, "{} default value does not match its type", name)
            }
            MetadataError::ConflictingDefault(name) => {
                write!(f, "{} declares a constant default and a default kind", name)
            }
        }
    }
}

impl std::error::Error for MetadataError {}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Immutable per-object-type metadata plus global name indexes.
#[derive(Debug, Default)]
pub struct Registry {
    /// Indexed by `ObjectType::as_raw()`.
    infos: Vec<Option<ObjectTypeInfo>>,
    attrs_by_name: Vec<Arc<AttrMetadata>>,
    stats_by_name: Vec<Arc<StatMetadata>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Info record of a valid object type with registered tables.
    pub fn object_type_info(&self, object_type: ObjectType) -> Option<&ObjectTypeInfo> {
        if !is_object_type_valid(object_type) {
            return None;
        }
        self.infos
            .get(object_type.as_raw() as usize)
            .and_then(Option::as_ref)
    }

    /// Metadata of `attr_id` on `object_type`.
    ///
    /// Direct index when the type's id space is dense, linear scan otherwise.
    pub fn attr_metadata(&self, object_type: ObjectType, attr_id: AttrId) -> Option<&AttrMetadata> {
        let found = self
            .object_type_info(object_type)
            .and_then(|info| info.find_attr(attr_id));
        if found.is_none() {
            log::trace!("[registry] no attribute {} on {}", attr_id, object_type);
        }
        found
    }

    /// Metadata of `stat_id` on `object_type`.
    pub fn stat_metadata(&self, object_type: ObjectType, stat_id: StatId) -> Option<&StatMetadata> {
        let found = self
            .object_type_info(object_type)
            .and_then(|info| info.find_stat(stat_id));
        if found.is_none() {
            log::trace!("[registry] no statistic {} on {}", stat_id, object_type);
        }
        found
    }

    /// Attribute by full name, across every object type.
    pub fn attr_metadata_by_name(&self, name: &str) -> Option<&AttrMetadata> {
        binary_search_by_name(&self.attrs_by_name, name, |m| m.name.as_str()).map(|m| &**m)
    }

    /// Statistic by full name, across every object type.
    pub fn stat_metadata_by_name(&self, name: &str) -> Option<&StatMetadata> {
        binary_search_by_name(&self.stats_by_name, name, |m| m.name.as_str()).map(|m| &**m)
    }

    /// Whether instances of `object_type` are addressed by object id.
    ///
    /// `false` for invalid or unregistered types.
    pub fn is_object_type_backed_by_reference(&self, object_type: ObjectType) -> bool {
        self.object_type_info(object_type)
            .is_some_and(|info| info.is_object_id)
    }

    /// Attributes of `object_type` in id order; empty for unknown types.
    pub fn attr_metadata_list(&self, object_type: ObjectType) -> &[Arc<AttrMetadata>] {
        self.object_type_info(object_type)
            .map_or(&[], |info| info.attrs())
    }

    /// Statistics of `object_type` in id order; empty for unknown types.
    pub fn stat_metadata_list(&self, object_type: ObjectType) -> &[Arc<StatMetadata>] {
        self.object_type_info(object_type)
            .map_or(&[], |info| info.stats())
    }

    /// Registered object types in enum order.
    pub fn object_types(&self) -> impl Iterator<Item = ObjectType> + '_ {
        self.infos
            .iter()
            .flatten()
            .map(|info| info.object_type)
    }

    /// Every attribute, sorted by name.
    pub fn attrs_by_name(&self) -> &[Arc<AttrMetadata>] {
        &self.attrs_by_name
    }

    /// Every statistic, sorted by name.
    pub fn stats_by_name(&self) -> &[Arc<StatMetadata>] {
        &self.stats_by_name
    }

    /// Whether both name indexes are strictly ascending.
    pub fn is_name_index_sorted(&self) -> bool {
        self.attrs_by_name.windows(2).all(|w| w[0].name < w[1].name)
            && self.stats_by_name.windows(2).all(|w| w[0].name < w[1].name)
    }
}

fn binary_search_by_name<'a, T>(
    index: &'a [Arc<T>],
    name: &str,
    key: impl Fn(&T) -> &str,
) -> Option<&'a Arc<T>> {
    let mut low = 0usize;
    let mut high = index.len();
    while low < high {
        let mid = low + (high - low) / 2;
        match key(&*index[mid]).cmp(name) {
            Ordering::Equal => return Some(&index[mid]),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }
    log::trace!("[registry] name {} not found", name);
    None
}

/// Range check against `(NULL, MAX)`, both ends excluded.
pub fn is_object_type_valid(object_type: ObjectType) -> bool {
    let raw = object_type.as_raw();
    raw > ObjectType::Null.as_raw() && raw < ObjectType::Max.as_raw()
}

/// First attribute in `attrs` carrying `id`.
pub fn get_attribute_by_id(id: AttrId, attrs: &[Attribute]) -> Option<&Attribute> {
    attrs.iter().find(|a| a.id == id)
}

// ---------------------------------------------------------------------------
// RegistryBuilder
// ---------------------------------------------------------------------------

/// Collects per-type tables and validates them into a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: Vec<ObjectTypeInfoBuilder>,
}

impl RegistryBuilder {
    pub fn object_type(mut self, info: ObjectTypeInfoBuilder) -> Self {
        self.types.push(info);
        self
    }

    pub fn add_object_type(&mut self, info: ObjectTypeInfoBuilder) {
        self.types.push(info);
    }

    /// Freeze the tables after checking them.
    pub fn build(self) -> Result<Registry, MetadataError> {
        let mut infos: Vec<Option<ObjectTypeInfo>> = Vec::new();
        infos.resize_with(ObjectType::ALL.len(), || None);
        let mut attr_names = HashSet::new();
        let mut stat_names = HashSet::new();

        for builder in self.types {
            let object_type = builder.object_type;
            if !is_object_type_valid(object_type) {
                return Err(MetadataError::InvalidObjectType(object_type));
            }
            let slot = object_type.as_raw() as usize;
            if infos[slot].is_some() {
                return Err(MetadataError::DuplicateObjectType(object_type));
            }

            let mut ids = HashSet::new();
            for meta in &builder.attrs {
                if meta.object_type != object_type {
                    return Err(MetadataError::ObjectTypeMismatch {
                        expected: object_type,
                        name: meta.name.clone(),
                    });
                }
                if !ids.insert(meta.attr_id) {
                    return Err(MetadataError::DuplicateAttrId {
                        object_type,
                        attr_id: meta.attr_id,
                    });
                }
                if !attr_names.insert(meta.name.clone()) {
                    return Err(MetadataError::DuplicateName(meta.name.clone()));
                }
                check_attr_shape(meta)?;
            }

            let mut ids = HashSet::new();
            for meta in &builder.stats {
                if meta.object_type != object_type {
                    return Err(MetadataError::ObjectTypeMismatch {
                        expected: object_type,
                        name: meta.name.clone(),
                    });
                }
                if !ids.insert(meta.stat_id) {
                    return Err(MetadataError::DuplicateStatId {
                        object_type,
                        stat_id: meta.stat_id,
                    });
                }
                if !stat_names.insert(meta.name.clone()) {
                    return Err(MetadataError::DuplicateName(meta.name.clone()));
                }
            }

            let info = builder.finish();
            log::debug!(
                "[registry] {}: {} attrs (dense={}), {} stats (dense={})",
                object_type,
                info.attrs.len(),
                info.attrs_dense,
                info.stats.len(),
                info.stats_dense
            );
            infos[slot] = Some(info);
        }

        for info in infos.iter().flatten() {
            for meta in &info.attrs {
                check_conditions(info, meta, &meta.conditions)?;
                check_conditions(info, meta, &meta.valid_only)?;
            }
        }

        let mut attrs_by_name: Vec<Arc<AttrMetadata>> = infos
            .iter()
            .flatten()
            .flat_map(|info| info.attrs.iter().cloned())
            .collect();
        attrs_by_name.sort_by(|a, b| a.name.cmp(&b.name));
        let mut stats_by_name: Vec<Arc<StatMetadata>> = infos
            .iter()
            .flatten()
            .flat_map(|info| info.stats.iter().cloned())
            .collect();
        stats_by_name.sort_by(|a, b| a.name.cmp(&b.name));

        log::info!(
            "[registry] built: {} attributes, {} statistics",
            attrs_by_name.len(),
            stats_by_name.len()
        );
        Ok(Registry {
            infos,
            attrs_by_name,
            stats_by_name,
        })
    }
}

/// Checks that only need the attribute itself.
fn check_attr_shape(meta: &AttrMetadata) -> Result<(), MetadataError> {
    if meta.is_mandatory_on_create()
        && meta.default_value_type != super::DefaultValueType::None
    {
        return Err(MetadataError::MandatoryWithDefault(meta.name.clone()));
    }
    if meta.enum_metadata.is_some()
        && !matches!(meta.value_type, AttrValueType::I32 | AttrValueType::I32List)
    {
        return Err(MetadataError::EnumMetadataMissing(meta.name.clone()));
    }
    if let Some(default) = &meta.default_value {
        if !default.matches_type(meta.value_type) {
            return Err(MetadataError::DefaultValueMismatch(meta.name.clone()));
        }
    }
    Ok(())
}

fn check_conditions(
    info: &ObjectTypeInfo,
    meta: &AttrMetadata,
    conditions: &[AttrCondition],
) -> Result<(), MetadataError> {
    for cond in conditions {
        let target = info
            .find_attr(cond.attr_id)
            .ok_or_else(|| MetadataError::ConditionTargetMissing {
                attr: meta.name.clone(),
                target: cond.attr_id,
            })?;
        if !target.value_type.is_condition_comparable() {
            return Err(MetadataError::ConditionTargetNotComparable {
                attr: meta.name.clone(),
                target: target.name.clone(),
                value_type: target.value_type,
            });
        }
        if !cond.value.matches_type(target.value_type) {
            return Err(MetadataError::ConditionValueMismatch {
                attr: meta.name.clone(),
                target: target.name.clone(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Process-wide registry
// ---------------------------------------------------------------------------

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Install the process-wide registry. Hands the registry back if one is
/// already installed.
pub fn install(registry: Registry) -> Result<(), Registry> {
    GLOBAL.set(registry)
}

/// The process-wide registry, once installed.
pub fn global() -> Option<&'static Registry> {
    GLOBAL.get()
}
