// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! ABI value types shared by the registry, the condition evaluator and the
//! serialization engine.
//!
//! [`AttributeValue`] carries no type tag of its own: every operation takes the
//! tag from the paired [`AttrMetadata`](crate::metadata::AttrMetadata).

mod object_type;
mod value;
mod value_type;

pub use object_type::ObjectType;
pub use value::{
    Attribute, AttributeValue, CharData, S32Range, SpectrumPower, StatValue, U32Range,
    CHARDATA_LENGTH,
};
pub use value_type::{AttrValueType, StatValuePrecision, StatValueType, StatValueUnit};

/// Attribute identifier, scoped to one object type.
pub type AttrId = u32;

/// Statistic identifier, scoped to one object type.
pub type StatId = u32;

/// Opaque object reference handed out by the adapter.
pub type ObjectId = u64;

/// Attribute id that never names a real attribute.
pub const INVALID_ATTRIBUTE_ID: AttrId = AttrId::MAX;

/// The null object reference.
pub const NULL_OBJECT_ID: ObjectId = 0;
