// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conditional-mandatory attribute evaluation.
//!
//! An attribute with a condition list is mandatory on create exactly when the
//! list, folded with its AND/OR combinator, holds against the candidate
//! attributes (or the referenced attributes' constant defaults).

use crate::metadata::{get_attribute_by_id, AttrCondition, AttrMetadata, ConditionType, Registry};
use crate::types::{AttrId, AttrValueType, Attribute, AttributeValue, ObjectType};
use std::fmt;

/// Metadata or caller bug found while evaluating a condition.
///
/// Never a plain "condition false": these always point at inconsistent tables
/// or a value stored under the wrong variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionError {
    /// Referenced attribute id has no metadata on the owning type.
    MissingConditionMetadata {
        object_type: ObjectType,
        attr_id: AttrId,
    },
    /// Referenced attribute is not a bool or fixed-width integer.
    UnsupportedValueType {
        attr: String,
        value_type: AttrValueType,
    },
    /// Supplied or expected value is not the variant the tag selects.
    ValueTypeMismatch {
        attr: String,
        expected: AttrValueType,
        found: AttrValueType,
    },
}

impl fmt::Display for ConditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionError::MissingConditionMetadata {
                object_type,
                attr_id,
            } => write!(
                f,
                "condition references attribute {} unknown on {}",
                attr_id, object_type
            ),
            ConditionError::UnsupportedValueType { attr, value_type } => {
                write!(f, "condition on {} compares unsupported type {}", attr, value_type)
            }
            ConditionError::ValueTypeMismatch {
                attr,
                expected,
                found,
            } => write!(
                f,
                "condition on {} expected {} value, found {}",
                attr, expected, found
            ),
        }
    }
}

impl std::error::Error for ConditionError {}

fn contract(err: ConditionError) -> ConditionError {
    log::error!("[CONTRACT] [condition] {}", err);
    err
}

/// Whether the conditional attribute `meta` is currently mandatory.
///
/// `Ok(false)` when `meta` is not conditional. Under AND an unresolved
/// reference makes the whole result false; under OR it is skipped.
pub fn is_condition_met(
    registry: &Registry,
    meta: &AttrMetadata,
    attrs: &[Attribute],
) -> Result<bool, ConditionError> {
    if !meta.is_conditional() {
        return Ok(false);
    }
    fold_conditions(registry, meta, meta.condition_type, &meta.conditions, attrs)
}

/// Whether `meta`'s valid-only conditions hold.
///
/// `Ok(true)` when the attribute carries no valid-only list.
pub fn is_valid_only_met(
    registry: &Registry,
    meta: &AttrMetadata,
    attrs: &[Attribute],
) -> Result<bool, ConditionError> {
    if !meta.is_valid_only() {
        return Ok(true);
    }
    fold_conditions(registry, meta, meta.valid_only_type, &meta.valid_only, attrs)
}

fn fold_conditions(
    registry: &Registry,
    meta: &AttrMetadata,
    kind: ConditionType,
    conditions: &[AttrCondition],
    attrs: &[Attribute],
) -> Result<bool, ConditionError> {
    let is_and = match kind {
        ConditionType::And => true,
        ConditionType::Or => false,
        ConditionType::None => return Ok(false),
    };
    let mut met = is_and;

    for cond in conditions {
        let target = registry
            .attr_metadata(meta.object_type, cond.attr_id)
            .ok_or_else(|| {
                contract(ConditionError::MissingConditionMetadata {
                    object_type: meta.object_type,
                    attr_id: cond.attr_id,
                })
            })?;

        let actual = match get_attribute_by_id(cond.attr_id, attrs) {
            Some(attr) => &attr.value,
            None => match target.const_default() {
                Some(default) => default,
                None => {
                    log::trace!(
                        "[condition] {} has no value or default for {}",
                        target.name,
                        meta.name
                    );
                    if is_and {
                        return Ok(false);
                    }
                    continue;
                }
            },
        };

        let equal = compare(target, actual, &cond.value)?;
        met = if is_and { met && equal } else { met || equal };
    }

    Ok(met)
}

/// Equality under the referenced attribute's tag.
fn compare(
    target: &AttrMetadata,
    actual: &AttributeValue,
    expected: &AttributeValue,
) -> Result<bool, ConditionError> {
    let tag = target.value_type;
    if !tag.is_condition_comparable() {
        return Err(contract(ConditionError::UnsupportedValueType {
            attr: target.name.clone(),
            value_type: tag,
        }));
    }
    for value in [actual, expected] {
        if !value.matches_type(tag) {
            return Err(contract(ConditionError::ValueTypeMismatch {
                attr: target.name.clone(),
                expected: tag,
                found: value.value_type(),
            }));
        }
    }
    Ok(actual == expected)
}
