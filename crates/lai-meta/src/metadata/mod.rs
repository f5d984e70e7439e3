// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Attribute, statistic and enum metadata, and the registry that owns it.

mod attr;
mod enums;
mod object_info;
pub mod registry;
mod stat;

pub use attr::{
    is_allowed_enum_value, is_allowed_object_type, AttrCondition, AttrFlags, AttrMetadata,
    AttrMetadataBuilder, ConditionType, DefaultValueType,
};
pub use enums::{get_enum_value_name, EnumMetadata, EnumValue};
pub use object_info::{ObjectTypeInfo, ObjectTypeInfoBuilder};
pub use registry::{
    get_attribute_by_id, is_object_type_valid, MetadataError, Registry, RegistryBuilder,
};
pub use stat::StatMetadata;
