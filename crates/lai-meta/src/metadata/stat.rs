// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Statistic metadata.

use super::attr::{kebab_case, short_id_name};
use crate::types::{ObjectType, StatId, StatValuePrecision, StatValueType, StatValueUnit};

/// Metadata for one (object type, statistic id) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatMetadata {
    pub object_type: ObjectType,
    pub stat_id: StatId,
    /// Full id name (`LAI_PORT_STAT_INPUT_POWER`).
    pub name: String,
    pub kebab_name: String,
    pub camel_name: String,
    pub value_type: StatValueType,
    pub unit: StatValueUnit,
    pub precision: StatValuePrecision,
    /// Monotonic counter rather than an instantaneous gauge.
    pub is_counter: bool,
}

impl StatMetadata {
    pub fn new(
        object_type: ObjectType,
        stat_id: StatId,
        name: impl Into<String>,
        value_type: StatValueType,
    ) -> Self {
        let name = name.into();
        let short = short_id_name(object_type, "STAT", &name);
        Self {
            object_type,
            stat_id,
            kebab_name: kebab_case(&short),
            camel_name: camel_case(&short),
            name,
            value_type,
            unit: StatValueUnit::Normal,
            precision: StatValuePrecision::P0,
            is_counter: false,
        }
    }

    pub fn with_unit(mut self, unit: StatValueUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_precision(mut self, precision: StatValuePrecision) -> Self {
        self.precision = precision;
        self
    }

    pub fn counter(mut self) -> Self {
        self.is_counter = true;
        self
    }
}

fn camel_case(short: &str) -> String {
    let mut out = String::with_capacity(short.len());
    for (idx, word) in short.split('_').filter(|w| !w.is_empty()).enumerate() {
        let lower = word.to_ascii_lowercase();
        if idx == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_names() {
        let stat = StatMetadata::new(
            ObjectType::Port,
            0,
            "LAI_PORT_STAT_OSC_INPUT_POWER",
            StatValueType::Double,
        )
        .with_unit(StatValueUnit::Dbm)
        .with_precision(StatValuePrecision::P2);
        assert_eq!(stat.kebab_name, "osc-input-power");
        assert_eq!(stat.camel_name, "oscInputPower");
        assert_eq!(stat.precision.digits(), 2);
        assert!(!stat.is_counter);
    }
}
