// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Attribute and statistic values.

use super::{AttrId, AttrValueType, ObjectId, StatValueType};
use std::fmt;

/// Capacity of a chardata attribute, in bytes.
pub const CHARDATA_LENGTH: usize = 512;

/// Fixed-size character buffer. Content ends at the first NUL byte or at
/// [`CHARDATA_LENGTH`].
#[derive(Clone, PartialEq, Eq)]
pub struct CharData([u8; CHARDATA_LENGTH]);

impl CharData {
    /// Build from text, truncating to capacity.
    pub fn new(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Build from raw bytes, truncating to capacity.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buf = [0u8; CHARDATA_LENGTH];
        let len = bytes.len().min(CHARDATA_LENGTH);
        buf[..len].copy_from_slice(&bytes[..len]);
        Self(buf)
    }

    /// Full backing buffer, NUL padding included.
    pub fn raw(&self) -> &[u8; CHARDATA_LENGTH] {
        &self.0
    }

    /// Content up to the first NUL.
    pub fn as_bytes(&self) -> &[u8] {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(CHARDATA_LENGTH);
        &self.0[..end]
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }
}

impl Default for CharData {
    fn default() -> Self {
        Self([0u8; CHARDATA_LENGTH])
    }
}

impl fmt::Debug for CharData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharData({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}

/// Unsigned 32-bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U32Range {
    pub min: u32,
    pub max: u32,
}

/// Signed 32-bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct S32Range {
    pub min: i32,
    pub max: i32,
}

/// One entry of an optical channel monitor power scan.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpectrumPower {
    pub lower_frequency: u64,
    pub upper_frequency: u64,
    pub power: f64,
}

/// Attribute value.
///
/// The active variant is decided by the paired metadata's
/// [`AttrValueType`]; enum-typed attributes use `I32`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Bool(bool),
    Chardata(Box<CharData>),
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    Double(f64),
    /// Opaque pointer value, never dereferenced by this crate.
    Pointer(usize),
    ObjectId(ObjectId),
    ObjectList(Vec<ObjectId>),
    U8List(Vec<u8>),
    I8List(Vec<i8>),
    U16List(Vec<u16>),
    I16List(Vec<i16>),
    U32List(Vec<u32>),
    I32List(Vec<i32>),
    U32Range(U32Range),
    I32Range(S32Range),
    SpectrumPowerList(Vec<SpectrumPower>),
}

impl AttributeValue {
    /// Chardata value from text.
    pub fn chardata(text: &str) -> Self {
        Self::Chardata(Box::new(CharData::new(text)))
    }

    /// The tag this variant corresponds to.
    ///
    /// Only used to check a value against its metadata and for diagnostics;
    /// callers must never dispatch on it.
    pub fn value_type(&self) -> AttrValueType {
        match self {
            Self::Bool(_) => AttrValueType::Bool,
            Self::Chardata(_) => AttrValueType::Chardata,
            Self::U8(_) => AttrValueType::U8,
            Self::I8(_) => AttrValueType::I8,
            Self::U16(_) => AttrValueType::U16,
            Self::I16(_) => AttrValueType::I16,
            Self::U32(_) => AttrValueType::U32,
            Self::I32(_) => AttrValueType::I32,
            Self::U64(_) => AttrValueType::U64,
            Self::I64(_) => AttrValueType::I64,
            Self::Double(_) => AttrValueType::Double,
            Self::Pointer(_) => AttrValueType::Pointer,
            Self::ObjectId(_) => AttrValueType::ObjectId,
            Self::ObjectList(_) => AttrValueType::ObjectList,
            Self::U8List(_) => AttrValueType::U8List,
            Self::I8List(_) => AttrValueType::I8List,
            Self::U16List(_) => AttrValueType::U16List,
            Self::I16List(_) => AttrValueType::I16List,
            Self::U32List(_) => AttrValueType::U32List,
            Self::I32List(_) => AttrValueType::I32List,
            Self::U32Range(_) => AttrValueType::U32Range,
            Self::I32Range(_) => AttrValueType::I32Range,
            Self::SpectrumPowerList(_) => AttrValueType::SpectrumPowerList,
        }
    }

    /// Whether this variant is the one `tag` selects.
    pub fn matches_type(&self, tag: AttrValueType) -> bool {
        self.value_type() == tag
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            Self::ObjectId(v) => Some(*v),
            _ => None,
        }
    }

    /// Chardata content up to the first NUL.
    pub fn as_chardata(&self) -> Option<&[u8]> {
        match self {
            Self::Chardata(v) => Some(v.as_bytes()),
            _ => None,
        }
    }
}

macro_rules! impl_from_value {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for AttributeValue {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_from_value!(bool, Bool);
impl_from_value!(u8, U8);
impl_from_value!(i8, I8);
impl_from_value!(u16, U16);
impl_from_value!(i16, I16);
impl_from_value!(u32, U32);
impl_from_value!(i32, I32);
impl_from_value!(u64, U64);
impl_from_value!(i64, I64);
impl_from_value!(f64, Double);
impl_from_value!(U32Range, U32Range);
impl_from_value!(S32Range, I32Range);

/// An attribute as exchanged across the ABI boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub id: AttrId,
    pub value: AttributeValue,
}

impl Attribute {
    pub fn new(id: AttrId, value: impl Into<AttributeValue>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

/// Statistic value, tagged externally by [`StatValueType`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    Double(f64),
}

impl StatValue {
    /// Tag matching this variant (diagnostics only).
    pub fn value_type(&self) -> StatValueType {
        match self {
            Self::I32(_) => StatValueType::I32,
            Self::U32(_) => StatValueType::U32,
            Self::I64(_) => StatValueType::I64,
            Self::U64(_) => StatValueType::U64,
            Self::Double(_) => StatValueType::Double,
        }
    }
}
