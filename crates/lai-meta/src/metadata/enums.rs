// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enum descriptors.

/// One member of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub value: i32,
    /// Full name (`LAI_ADMIN_STATE_ENABLED`).
    pub name: String,
    /// Name without the enum prefix (`ENABLED`).
    pub short_name: String,
}

impl EnumValue {
    pub fn new(value: i32, name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            value,
            name: name.into(),
            short_name: short_name.into(),
        }
    }
}

/// Describes one enumeration type.
///
/// Shared between every attribute that uses it; never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMetadata {
    /// C type name (`lai_admin_state_t`).
    pub name: String,
    /// Members in declaration order.
    pub values: Vec<EnumValue>,
    /// Values are bit flags rather than a contiguous range.
    pub contains_flags: bool,
    /// Deprecated members still accepted on input but never emitted.
    pub ignored: Vec<EnumValue>,
}

impl EnumMetadata {
    pub fn new(name: impl Into<String>, values: Vec<EnumValue>) -> Self {
        Self {
            name: name.into(),
            values,
            contains_flags: false,
            ignored: Vec::new(),
        }
    }

    /// Build a contiguous enum from full names; values count from zero and
    /// short names drop `prefix`.
    pub fn sequential(name: impl Into<String>, prefix: &str, names: &[&str]) -> Self {
        let values = names
            .iter()
            .enumerate()
            .map(|(idx, full)| {
                let short = full.strip_prefix(prefix).unwrap_or(full);
                EnumValue::new(idx as i32, *full, short)
            })
            .collect();
        Self::new(name, values)
    }

    /// Mark the value space as flag-like.
    pub fn with_flags(mut self) -> Self {
        self.contains_flags = true;
        self
    }

    pub fn with_ignored(mut self, ignored: Vec<EnumValue>) -> Self {
        self.ignored = ignored;
        self
    }

    /// Number of members (ignored values excluded).
    pub fn values_count(&self) -> usize {
        self.values.len()
    }

    pub fn contains(&self, value: i32) -> bool {
        self.values.iter().any(|v| v.value == value)
    }

    /// Member for `value`, if any.
    pub fn value(&self, value: i32) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.value == value)
    }

    /// Member with the given full name; ignored values are searched too.
    pub fn value_by_name(&self, name: &str) -> Option<&EnumValue> {
        self.values
            .iter()
            .chain(self.ignored.iter())
            .find(|v| v.name == name)
    }
}

/// Full name of `value` in `meta`, `None` when it is not a member.
pub fn get_enum_value_name(meta: &EnumMetadata, value: i32) -> Option<&str> {
    meta.value(value).map(|v| v.name.as_str())
}
