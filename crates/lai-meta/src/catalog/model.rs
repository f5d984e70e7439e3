// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serde model of a metadata catalog document.

use serde::Deserialize;

/// Root catalog document.
#[derive(Debug, Deserialize, Default)]
pub struct CatalogDocument {
    /// Enum descriptors referenced by attributes.
    #[serde(default)]
    pub enums: Vec<EnumDoc>,

    /// Per-object-type attribute and statistic tables.
    #[serde(default)]
    pub objects: Vec<ObjectDoc>,
}

/// One enum descriptor.
#[derive(Debug, Deserialize)]
pub struct EnumDoc {
    /// C type name (`lai_admin_state_t`).
    pub name: String,
    /// Prefix stripped to form short names.
    #[serde(default)]
    pub prefix: String,
    /// Values are bit flags.
    #[serde(default)]
    pub flags: bool,
    pub values: Vec<EnumValueDoc>,
    /// Deprecated members, accepted on input only.
    #[serde(default)]
    pub ignored: Vec<EnumValueDoc>,
}

/// Enum member: a bare name takes the next value in sequence.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EnumValueDoc {
    Name(String),
    Explicit { name: String, value: i32 },
}

/// Tables of one object type.
#[derive(Debug, Deserialize)]
pub struct ObjectDoc {
    /// Full or short object type name (`PORT`).
    pub object_type: String,
    /// Addressed by object id; `false` for key-addressed types.
    #[serde(default = "default_true")]
    pub object_id: bool,
    /// Attribute ids are flags, disabling direct indexing.
    #[serde(default)]
    pub attr_ids_are_flags: bool,
    #[serde(default)]
    pub attributes: Vec<AttrDoc>,
    #[serde(default)]
    pub stats: Vec<StatDoc>,
}

fn default_true() -> bool {
    true
}

/// One attribute.
#[derive(Debug, Deserialize)]
pub struct AttrDoc {
    /// Explicit id; defaults to the previous id plus one.
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    /// Value type tag (`UINT32`, `CHARDATA`, ...).
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default)]
    pub brief: String,
    #[serde(default)]
    pub flags: Vec<String>,
    /// Enum descriptor name for enum and enum-list attributes.
    #[serde(default, rename = "enum")]
    pub enum_name: Option<String>,
    #[serde(default)]
    pub allowed_object_types: Vec<String>,
    #[serde(default)]
    pub allow_null: bool,
    /// Constant default, in wire format for the attribute's type.
    #[serde(default)]
    pub default: Option<ScalarText>,
    /// Non-constant default provenance (`VENDOR_SPECIFIC`, `EMPTY_LIST`, ...).
    #[serde(default)]
    pub default_kind: Option<String>,
    /// Default taken from another attribute.
    #[serde(default)]
    pub default_from: Option<DefaultFromDoc>,
    #[serde(default)]
    pub condition: Option<ConditionDoc>,
    #[serde(default)]
    pub valid_only: Option<ConditionDoc>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default = "default_true")]
    pub recoverable: bool,
}

/// Default copied from another attribute's value or range.
#[derive(Debug, Deserialize)]
pub struct DefaultFromDoc {
    /// `ATTR_VALUE` or `ATTR_RANGE`.
    pub kind: String,
    /// Full attribute name.
    pub attr: String,
}

/// Condition list with its combinator.
#[derive(Debug, Deserialize)]
pub struct ConditionDoc {
    /// `AND` or `OR`.
    #[serde(rename = "type")]
    pub kind: String,
    pub terms: Vec<ConditionTermDoc>,
}

/// Equality test against an attribute of the same object type.
#[derive(Debug, Deserialize)]
pub struct ConditionTermDoc {
    /// Full or short attribute name.
    pub attr: String,
    /// Expected value, in wire format for the referenced attribute.
    pub value: ScalarText,
}

/// One statistic.
#[derive(Debug, Deserialize)]
pub struct StatDoc {
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub precision: Option<String>,
    #[serde(default)]
    pub counter: bool,
}

/// A scalar written either as text or as a bare YAML/JSON literal.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ScalarText {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl ScalarText {
    /// Wire-format text of the scalar.
    pub fn to_text(&self) -> String {
        match self {
            ScalarText::Bool(v) => v.to_string(),
            ScalarText::Int(v) => v.to_string(),
            ScalarText::UInt(v) => v.to_string(),
            ScalarText::Float(v) => v.to_string(),
            ScalarText::Text(v) => v.clone(),
        }
    }
}
