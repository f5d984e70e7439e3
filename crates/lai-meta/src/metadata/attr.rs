// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Attribute metadata.

use super::EnumMetadata;
use crate::types::{AttrId, AttrValueType, AttributeValue, ObjectType};
use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

/// Attribute access flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttrFlags(pub u32);

impl AttrFlags {
    pub const MANDATORY_ON_CREATE: Self = Self(1 << 0);
    pub const CREATE_ONLY: Self = Self(1 << 1);
    pub const CREATE_AND_SET: Self = Self(1 << 2);
    pub const READ_ONLY: Self = Self(1 << 3);
    pub const KEY: Self = Self(1 << 4);
    pub const DYNAMIC: Self = Self(1 << 5);
    pub const SPECIAL: Self = Self(1 << 6);
    pub const SET_ONLY: Self = Self(1 << 7);

    const NAMES: [(Self, &'static str); 8] = [
        (Self::MANDATORY_ON_CREATE, "MANDATORY_ON_CREATE"),
        (Self::CREATE_ONLY, "CREATE_ONLY"),
        (Self::CREATE_AND_SET, "CREATE_AND_SET"),
        (Self::READ_ONLY, "READ_ONLY"),
        (Self::KEY, "KEY"),
        (Self::DYNAMIC, "DYNAMIC"),
        (Self::SPECIAL, "SPECIAL"),
        (Self::SET_ONLY, "SET_ONLY"),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    /// Check if every bit of `flag` is set.
    pub const fn contains(self, flag: Self) -> bool {
        (self.0 & flag.0) == flag.0
    }

    /// Parse one flag name (`CREATE_ONLY`).
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        Self::NAMES
            .iter()
            .find(|(_, n)| *n == upper)
            .map(|(flag, _)| *flag)
    }
}

impl BitOr for AttrFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for AttrFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Where an attribute's default value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DefaultValueType {
    /// No default; required for mandatory-on-create attributes.
    #[default]
    None,
    /// Constant carried in the metadata.
    Const,
    /// Range published by another attribute.
    AttrRange,
    /// Current value of another attribute.
    AttrValue,
    EmptyList,
    VendorSpecific,
    LinecardInternal,
}

/// How a condition list is folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConditionType {
    #[default]
    None,
    Or,
    And,
}

/// Equality test against another attribute of the same object type.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrCondition {
    pub attr_id: AttrId,
    /// Expected value, tagged by the referenced attribute's value type.
    pub value: AttributeValue,
}

impl AttrCondition {
    pub fn new(attr_id: AttrId, value: impl Into<AttributeValue>) -> Self {
        Self {
            attr_id,
            value: value.into(),
        }
    }
}

/// Metadata for one (object type, attribute id) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrMetadata {
    pub object_type: ObjectType,
    pub attr_id: AttrId,
    /// Full id name (`LAI_PORT_ATTR_ADMIN_STATE`).
    pub name: String,
    /// Name without the object prefix (`ADMIN_STATE`).
    pub short_name: String,
    pub kebab_name: String,
    pub brief: String,
    pub value_type: AttrValueType,
    pub flags: AttrFlags,
    /// Object types an object-reference attribute may point at.
    pub allowed_object_types: Vec<ObjectType>,
    pub allow_null_object_id: bool,
    pub default_value_type: DefaultValueType,
    pub default_value: Option<AttributeValue>,
    /// Source attribute for `AttrValue`/`AttrRange` defaults.
    pub default_value_source: Option<(ObjectType, AttrId)>,
    pub enum_metadata: Option<Arc<EnumMetadata>>,
    pub condition_type: ConditionType,
    pub conditions: Vec<AttrCondition>,
    pub valid_only_type: ConditionType,
    pub valid_only: Vec<AttrCondition>,
    pub is_deprecated: bool,
    pub is_recoverable: bool,
}

impl AttrMetadata {
    /// Start building metadata for `name` on `object_type`.
    pub fn builder(
        object_type: ObjectType,
        attr_id: AttrId,
        name: impl Into<String>,
        value_type: AttrValueType,
    ) -> AttrMetadataBuilder {
        AttrMetadataBuilder::new(object_type, attr_id, name, value_type)
    }

    pub fn is_mandatory_on_create(&self) -> bool {
        self.flags.contains(AttrFlags::MANDATORY_ON_CREATE)
    }

    pub fn is_create_only(&self) -> bool {
        self.flags.contains(AttrFlags::CREATE_ONLY)
    }

    pub fn is_create_and_set(&self) -> bool {
        self.flags.contains(AttrFlags::CREATE_AND_SET)
    }

    pub fn is_read_only(&self) -> bool {
        self.flags.contains(AttrFlags::READ_ONLY)
    }

    pub fn is_set_only(&self) -> bool {
        self.flags.contains(AttrFlags::SET_ONLY)
    }

    pub fn is_key(&self) -> bool {
        self.flags.contains(AttrFlags::KEY)
    }

    pub fn is_dynamic(&self) -> bool {
        self.flags.contains(AttrFlags::DYNAMIC)
    }

    /// Int32 attribute backed by an enum descriptor.
    pub fn is_enum(&self) -> bool {
        self.value_type == AttrValueType::I32 && self.enum_metadata.is_some()
    }

    /// Int32 list whose elements are enum members.
    pub fn is_enum_list(&self) -> bool {
        self.value_type == AttrValueType::I32List && self.enum_metadata.is_some()
    }

    /// Mandatory on create only when its condition list holds.
    pub fn is_conditional(&self) -> bool {
        self.condition_type != ConditionType::None && !self.conditions.is_empty()
    }

    pub fn is_valid_only(&self) -> bool {
        self.valid_only_type != ConditionType::None && !self.valid_only.is_empty()
    }

    /// Attribute carries a reference to another object.
    pub fn is_oid_attribute(&self) -> bool {
        self.value_type.is_object_reference()
    }

    /// Default usable without consulting another attribute or the vendor.
    pub fn const_default(&self) -> Option<&AttributeValue> {
        match self.default_value_type {
            DefaultValueType::Const => self.default_value.as_ref(),
            _ => None,
        }
    }
}

/// Whether `value` is a member of the attribute's enum.
///
/// `false` when the attribute has no enum descriptor.
pub fn is_allowed_enum_value(meta: &AttrMetadata, value: i32) -> bool {
    meta.enum_metadata
        .as_ref()
        .is_some_and(|e| e.contains(value))
}

/// Whether an object-reference attribute may point at `object_type`.
pub fn is_allowed_object_type(meta: &AttrMetadata, object_type: ObjectType) -> bool {
    meta.allowed_object_types.contains(&object_type)
}

/// Strip `LAI_<TYPE>_<kind>_` from a full id name.
pub(crate) fn short_id_name(object_type: ObjectType, kind: &str, name: &str) -> String {
    let prefix = format!("LAI_{}_{}_", object_type.short_name(), kind);
    name.strip_prefix(&prefix).unwrap_or(name).to_string()
}

pub(crate) fn kebab_case(short: &str) -> String {
    short.to_ascii_lowercase().replace('_', "-")
}

/// Fluent builder for [`AttrMetadata`].
#[derive(Debug)]
pub struct AttrMetadataBuilder {
    meta: AttrMetadata,
}

impl AttrMetadataBuilder {
    fn new(
        object_type: ObjectType,
        attr_id: AttrId,
        name: impl Into<String>,
        value_type: AttrValueType,
    ) -> Self {
        let name = name.into();
        let short_name = short_id_name(object_type, "ATTR", &name);
        let kebab_name = kebab_case(&short_name);
        Self {
            meta: AttrMetadata {
                object_type,
                attr_id,
                name,
                short_name,
                kebab_name,
                brief: String::new(),
                value_type,
                flags: AttrFlags::empty(),
                allowed_object_types: Vec::new(),
                allow_null_object_id: false,
                default_value_type: DefaultValueType::None,
                default_value: None,
                default_value_source: None,
                enum_metadata: None,
                condition_type: ConditionType::None,
                conditions: Vec::new(),
                valid_only_type: ConditionType::None,
                valid_only: Vec::new(),
                is_deprecated: false,
                is_recoverable: true,
            },
        }
    }

    pub fn flags(mut self, flags: AttrFlags) -> Self {
        self.meta.flags = flags;
        self
    }

    pub fn brief(mut self, brief: impl Into<String>) -> Self {
        self.meta.brief = brief.into();
        self
    }

    /// Mark as enum-typed.
    pub fn enum_metadata(mut self, meta: Arc<EnumMetadata>) -> Self {
        self.meta.enum_metadata = Some(meta);
        self
    }

    pub fn allowed_object_types(mut self, types: Vec<ObjectType>) -> Self {
        self.meta.allowed_object_types = types;
        self
    }

    pub fn allow_null_object_id(mut self) -> Self {
        self.meta.allow_null_object_id = true;
        self
    }

    pub fn default_const(mut self, value: AttributeValue) -> Self {
        self.meta.default_value_type = DefaultValueType::Const;
        self.meta.default_value = Some(value);
        self
    }

    /// Set a provenance that carries no value of its own.
    pub fn default_kind(mut self, kind: DefaultValueType) -> Self {
        self.meta.default_value_type = kind;
        self.meta.default_value = None;
        self
    }

    /// Default taken from another attribute's value or range.
    pub fn default_from(
        mut self,
        kind: DefaultValueType,
        object_type: ObjectType,
        attr_id: AttrId,
    ) -> Self {
        self.meta.default_value_type = kind;
        self.meta.default_value = None;
        self.meta.default_value_source = Some((object_type, attr_id));
        self
    }

    pub fn conditions(mut self, kind: ConditionType, conditions: Vec<AttrCondition>) -> Self {
        self.meta.condition_type = kind;
        self.meta.conditions = conditions;
        self
    }

    pub fn valid_only(mut self, kind: ConditionType, conditions: Vec<AttrCondition>) -> Self {
        self.meta.valid_only_type = kind;
        self.meta.valid_only = conditions;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.meta.is_deprecated = true;
        self
    }

    pub fn recoverable(mut self, recoverable: bool) -> Self {
        self.meta.is_recoverable = recoverable;
        self
    }

    pub fn build(self) -> AttrMetadata {
        self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_contains_and_display() {
        let flags = AttrFlags::MANDATORY_ON_CREATE | AttrFlags::CREATE_ONLY;
        assert!(flags.contains(AttrFlags::CREATE_ONLY));
        assert!(!flags.contains(AttrFlags::READ_ONLY));
        assert_eq!(flags.to_string(), "MANDATORY_ON_CREATE | CREATE_ONLY");
        assert_eq!(AttrFlags::from_name("read_only"), Some(AttrFlags::READ_ONLY));
        assert_eq!(AttrFlags::from_name("WRITE_ONLY"), None);
    }

    #[test]
    fn test_builder_derives_names() {
        let meta = AttrMetadata::builder(
            ObjectType::Port,
            3,
            "LAI_PORT_ATTR_ADMIN_STATE",
            AttrValueType::I32,
        )
        .flags(AttrFlags::CREATE_AND_SET)
        .build();
        assert_eq!(meta.short_name, "ADMIN_STATE");
        assert_eq!(meta.kebab_name, "admin-state");
        assert!(meta.is_create_and_set());
        assert!(!meta.is_enum());
        assert!(!meta.is_conditional());
    }

    #[test]
    fn test_const_default_only_for_const_provenance() {
        let meta = AttrMetadata::builder(ObjectType::Otn, 1, "LAI_OTN_ATTR_X", AttrValueType::Bool)
            .default_const(AttributeValue::Bool(false))
            .build();
        assert_eq!(meta.const_default(), Some(&AttributeValue::Bool(false)));

        let vendor = AttrMetadata::builder(ObjectType::Otn, 2, "LAI_OTN_ATTR_Y", AttrValueType::U32)
            .default_kind(DefaultValueType::VendorSpecific)
            .build();
        assert_eq!(vendor.const_default(), None);
    }

    #[test]
    fn test_allowed_checks() {
        let enum_meta = Arc::new(EnumMetadata::sequential("e", "E_", &["E_A", "E_B"]));
        let meta = AttrMetadata::builder(ObjectType::Port, 0, "LAI_PORT_ATTR_E", AttrValueType::I32)
            .enum_metadata(enum_meta)
            .build();
        assert!(meta.is_enum());
        assert!(is_allowed_enum_value(&meta, 1));
        assert!(!is_allowed_enum_value(&meta, 2));

        let oid = AttrMetadata::builder(
            ObjectType::Och,
            0,
            "LAI_OCH_ATTR_PORT",
            AttrValueType::ObjectId,
        )
        .allowed_object_types(vec![ObjectType::Port])
        .build();
        assert!(oid.is_oid_attribute());
        assert!(is_allowed_object_type(&oid, ObjectType::Port));
        assert!(!is_allowed_object_type(&oid, ObjectType::Oa));
    }
}
