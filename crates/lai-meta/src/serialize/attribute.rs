// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-directed attribute and statistic values.
//!
//! The tag always comes from metadata. A value stored under another variant
//! is a contract violation, reported separately from malformed text.

use super::enums::{deserialize_attr_id, deserialize_enum, serialize_attr_id, serialize_enum};
use super::primitives::*;
use super::{byte_at, contract, is_terminator, malformed, SerResult, TextWriter};
use crate::metadata::{AttrMetadata, Registry, StatMetadata};
use crate::types::{AttrValueType, Attribute, AttributeValue, SpectrumPower, StatValue, StatValueType};
use std::fmt::Display;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `lit` at `pos`; returns the position after it.
fn expect(input: &[u8], pos: usize, lit: &[u8], kind: &'static str) -> SerResult<usize> {
    match input.get(pos..) {
        Some(rest) if rest.starts_with(lit) => Ok(pos + lit.len()),
        _ => Err(malformed(kind, input)),
    }
}

fn tail(input: &[u8], pos: usize) -> &[u8] {
    input.get(pos..).unwrap_or(&[])
}

/// `"<fragment>"`.
fn deserialize_quoted<T>(
    input: &[u8],
    kind: &'static str,
    inner: impl FnOnce(&[u8]) -> SerResult<(T, usize)>,
) -> SerResult<(T, usize)> {
    let pos = expect(input, 0, b"\"", kind)?;
    let (value, len) = inner(tail(input, pos))?;
    let end = expect(input, pos + len, b"\"", kind)?;
    Ok((value, end))
}

fn serialize_list<T>(
    w: &mut TextWriter<'_>,
    items: &[T],
    mut item: impl FnMut(&mut TextWriter<'_>, &T) -> SerResult<usize>,
) -> SerResult<usize> {
    let start = w.len();
    w.write_byte(b'[')?;
    for (idx, value) in items.iter().enumerate() {
        if idx > 0 {
            w.write_byte(b',')?;
        }
        item(w, value)?;
    }
    w.write_byte(b']')?;
    Ok(w.len() - start)
}

fn serialize_number_list<T: Display>(w: &mut TextWriter<'_>, items: &[T]) -> SerResult<usize> {
    serialize_list(w, items, |w, v| write!(w, "{}", v))
}

/// `[e1,e2,...]` followed by a terminator.
fn deserialize_list<T>(
    input: &[u8],
    kind: &'static str,
    mut item: impl FnMut(&[u8]) -> SerResult<(T, usize)>,
) -> SerResult<(Vec<T>, usize)> {
    let mut pos = expect(input, 0, b"[", kind)?;
    let mut items = Vec::new();
    if byte_at(input, pos) == b']' {
        pos += 1;
    } else {
        loop {
            let (value, len) = item(tail(input, pos))?;
            items.push(value);
            pos += len;
            match byte_at(input, pos) {
                b',' => pos += 1,
                b']' => {
                    pos += 1;
                    break;
                }
                _ => return Err(malformed(kind, input)),
            }
        }
    }
    if !is_terminator(byte_at(input, pos)) {
        return Err(malformed(kind, input));
    }
    Ok((items, pos))
}

fn serialize_spectrum_power(w: &mut TextWriter<'_>, entry: &SpectrumPower) -> SerResult<usize> {
    let start = w.len();
    write!(w, "{{\"lower_frequency\":{}", entry.lower_frequency)?;
    write!(w, ",\"upper_frequency\":{}", entry.upper_frequency)?;
    w.write_str(",\"power\":")?;
    serialize_double(w, entry.power)?;
    w.write_byte(b'}')?;
    Ok(w.len() - start)
}

fn deserialize_spectrum_power(input: &[u8]) -> SerResult<(SpectrumPower, usize)> {
    const KIND: &str = "spectrum power";
    let mut pos = expect(input, 0, b"{\"lower_frequency\":", KIND)?;
    let (lower_frequency, len) = deserialize_u64(tail(input, pos))?;
    pos = expect(input, pos + len, b",\"upper_frequency\":", KIND)?;
    let (upper_frequency, len) = deserialize_u64(tail(input, pos))?;
    pos = expect(input, pos + len, b",\"power\":", KIND)?;
    let (power, len) = deserialize_double(tail(input, pos))?;
    pos = expect(input, pos + len, b"}", KIND)?;
    Ok((
        SpectrumPower {
            lower_frequency,
            upper_frequency,
            power,
        },
        pos,
    ))
}

fn check_tag(meta: &AttrMetadata, value: &AttributeValue) -> SerResult<()> {
    if value.matches_type(meta.value_type) {
        return Ok(());
    }
    Err(contract(format!(
        "{} declared {} but value is {}",
        meta.name,
        meta.value_type,
        value.value_type()
    )))
}

/// Fragments that need quotes inside a composite JSON object.
fn is_quoted_in_object(meta: &AttrMetadata) -> bool {
    meta.value_type.is_string_like()
        || meta.is_enum()
        || matches!(
            meta.value_type,
            AttrValueType::U32Range | AttrValueType::I32Range
        )
}

// ---------------------------------------------------------------------------
// Attribute values
// ---------------------------------------------------------------------------

/// Serialize `value` as the tag declared by `meta`.
///
/// Enum attributes go through the enum serializer; lists are JSON arrays.
pub fn serialize_attribute_value(
    w: &mut TextWriter<'_>,
    meta: &AttrMetadata,
    value: &AttributeValue,
) -> SerResult<usize> {
    check_tag(meta, value)?;
    let enum_meta = meta.enum_metadata.as_deref();
    match value {
        AttributeValue::Bool(v) => serialize_bool(w, *v),
        AttributeValue::Chardata(v) => serialize_chardata(w, v.raw()),
        AttributeValue::U8(v) => serialize_u8(w, *v),
        AttributeValue::I8(v) => serialize_i8(w, *v),
        AttributeValue::U16(v) => serialize_u16(w, *v),
        AttributeValue::I16(v) => serialize_i16(w, *v),
        AttributeValue::U32(v) => serialize_u32(w, *v),
        AttributeValue::I32(v) if meta.is_enum() => serialize_enum(w, enum_meta, *v),
        AttributeValue::I32(v) => serialize_i32(w, *v),
        AttributeValue::U64(v) => serialize_u64(w, *v),
        AttributeValue::I64(v) => serialize_i64(w, *v),
        AttributeValue::Double(v) => serialize_double(w, *v),
        AttributeValue::Pointer(v) => serialize_pointer(w, *v),
        AttributeValue::ObjectId(v) => serialize_object_id(w, *v),
        AttributeValue::ObjectList(list) => serialize_list(w, list, |w, oid| {
            let start = w.len();
            w.write_byte(b'"')?;
            serialize_object_id(w, *oid)?;
            w.write_byte(b'"')?;
            Ok(w.len() - start)
        }),
        AttributeValue::U8List(list) => serialize_number_list(w, list),
        AttributeValue::I8List(list) => serialize_number_list(w, list),
        AttributeValue::U16List(list) => serialize_number_list(w, list),
        AttributeValue::I16List(list) => serialize_number_list(w, list),
        AttributeValue::U32List(list) => serialize_number_list(w, list),
        AttributeValue::I32List(list) if meta.is_enum_list() => serialize_list(w, list, |w, v| {
            let start = w.len();
            w.write_byte(b'"')?;
            serialize_enum(w, enum_meta, *v)?;
            w.write_byte(b'"')?;
            Ok(w.len() - start)
        }),
        AttributeValue::I32List(list) => serialize_number_list(w, list),
        AttributeValue::U32Range(range) => serialize_u32_range(w, range),
        AttributeValue::I32Range(range) => serialize_s32_range(w, range),
        AttributeValue::SpectrumPowerList(list) => {
            serialize_list(w, list, |w, entry| serialize_spectrum_power(w, entry))
        }
    }
}

/// Parse a value of the tag declared by `meta`.
pub fn deserialize_attribute_value(
    input: &[u8],
    meta: &AttrMetadata,
) -> SerResult<(AttributeValue, usize)> {
    use AttributeValue as V;

    fn map<T>(
        parsed: SerResult<(T, usize)>,
        wrap: impl FnOnce(T) -> AttributeValue,
    ) -> SerResult<(AttributeValue, usize)> {
        parsed.map(|(v, len)| (wrap(v), len))
    }

    let enum_meta = meta.enum_metadata.as_deref();
    match meta.value_type {
        AttrValueType::Unspecified => Err(contract(format!(
            "{} has no value type",
            meta.name
        ))),
        AttrValueType::Bool => map(deserialize_bool(input), V::Bool),
        AttrValueType::Chardata => map(deserialize_chardata(input), |c| V::Chardata(Box::new(c))),
        AttrValueType::U8 => map(deserialize_u8(input), V::U8),
        AttrValueType::I8 => map(deserialize_i8(input), V::I8),
        AttrValueType::U16 => map(deserialize_u16(input), V::U16),
        AttrValueType::I16 => map(deserialize_i16(input), V::I16),
        AttrValueType::U32 => map(deserialize_u32(input), V::U32),
        AttrValueType::I32 if meta.is_enum() => map(deserialize_enum(input, enum_meta), V::I32),
        AttrValueType::I32 => map(deserialize_i32(input), V::I32),
        AttrValueType::U64 => map(deserialize_u64(input), V::U64),
        AttrValueType::I64 => map(deserialize_i64(input), V::I64),
        AttrValueType::Double => map(deserialize_double(input), V::Double),
        AttrValueType::Pointer => map(deserialize_pointer(input), V::Pointer),
        AttrValueType::ObjectId => map(deserialize_object_id(input), V::ObjectId),
        AttrValueType::ObjectList => map(
            deserialize_list(input, "object list", |item| {
                deserialize_quoted(item, "object list", deserialize_object_id)
            }),
            V::ObjectList,
        ),
        AttrValueType::U8List => map(deserialize_list(input, "uint8 list", deserialize_u8), V::U8List),
        AttrValueType::I8List => map(deserialize_list(input, "int8 list", deserialize_i8), V::I8List),
        AttrValueType::U16List => {
            map(deserialize_list(input, "uint16 list", deserialize_u16), V::U16List)
        }
        AttrValueType::I16List => {
            map(deserialize_list(input, "int16 list", deserialize_i16), V::I16List)
        }
        AttrValueType::U32List => {
            map(deserialize_list(input, "uint32 list", deserialize_u32), V::U32List)
        }
        AttrValueType::I32List if meta.is_enum_list() => map(
            deserialize_list(input, "enum list", |item| {
                if byte_at(item, 0) == b'"' {
                    deserialize_quoted(item, "enum list", |v| deserialize_enum(v, enum_meta))
                } else {
                    deserialize_enum(item, enum_meta)
                }
            }),
            V::I32List,
        ),
        AttrValueType::I32List => {
            map(deserialize_list(input, "int32 list", deserialize_i32), V::I32List)
        }
        AttrValueType::U32Range => map(deserialize_u32_range(input), V::U32Range),
        AttrValueType::I32Range => map(deserialize_s32_range(input), V::I32Range),
        AttrValueType::SpectrumPowerList => map(
            deserialize_list(input, "spectrum power list", deserialize_spectrum_power),
            V::SpectrumPowerList,
        ),
    }
}

// ---------------------------------------------------------------------------
// Composite attribute
// ---------------------------------------------------------------------------

/// `{"id":"<name>","value":<value>}`.
///
/// String-like values (chardata, pointer, object id, enum, range) are quoted
/// so the object is valid JSON.
pub fn serialize_attribute(
    w: &mut TextWriter<'_>,
    meta: &AttrMetadata,
    attr: &Attribute,
) -> SerResult<usize> {
    let start = w.len();
    let quoted = is_quoted_in_object(meta);
    w.write_str("{\"id\":\"")?;
    serialize_attr_id(w, meta, attr.id)?;
    w.write_str("\",\"value\":")?;
    if quoted {
        w.write_byte(b'"')?;
    }
    serialize_attribute_value(w, meta, &attr.value)?;
    if quoted {
        w.write_byte(b'"')?;
    }
    w.write_byte(b'}')?;
    Ok(w.len() - start)
}

/// Parse the object written by [`serialize_attribute`], resolving the id
/// name through `registry`.
pub fn deserialize_attribute<'r>(
    registry: &'r Registry,
    input: &[u8],
) -> SerResult<(&'r AttrMetadata, Attribute, usize)> {
    const KIND: &str = "attribute";
    let mut pos = expect(input, 0, b"{\"id\":\"", KIND)?;
    let (meta, len) = deserialize_attr_id(registry, tail(input, pos))?;
    pos = expect(input, pos + len, b"\",\"value\":", KIND)?;
    let (value, len) = if is_quoted_in_object(meta) {
        deserialize_quoted(tail(input, pos), KIND, |v| {
            deserialize_attribute_value(v, meta)
        })?
    } else {
        deserialize_attribute_value(tail(input, pos), meta)?
    };
    pos = expect(input, pos + len, b"}", KIND)?;
    if !is_terminator(byte_at(input, pos)) {
        return Err(malformed(KIND, input));
    }
    let attr = Attribute {
        id: meta.attr_id,
        value,
    };
    Ok((meta, attr, pos))
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

fn check_stat_tag(meta: &StatMetadata, value: &StatValue) -> SerResult<()> {
    if value.value_type() == meta.value_type {
        return Ok(());
    }
    Err(contract(format!(
        "{} declared {} but value is {}",
        meta.name,
        meta.value_type,
        value.value_type()
    )))
}

fn write_stat(w: &mut TextWriter<'_>, value: &StatValue, digits: usize) -> SerResult<usize> {
    match value {
        StatValue::I32(v) => serialize_i32(w, *v),
        StatValue::U32(v) => serialize_u32(w, *v),
        StatValue::I64(v) => serialize_i64(w, *v),
        StatValue::U64(v) => serialize_u64(w, *v),
        StatValue::Double(v) => serialize_double_precision(w, *v, digits),
    }
}

/// Serialize a statistic with its declared precision.
pub fn serialize_stat_value(
    w: &mut TextWriter<'_>,
    meta: &StatMetadata,
    value: &StatValue,
) -> SerResult<usize> {
    check_stat_tag(meta, value)?;
    write_stat(w, value, meta.precision.digits())
}

/// Serialize a statistic with the two-decimal attribute format.
pub fn serialize_stat_value_fixed(
    w: &mut TextWriter<'_>,
    meta: &StatMetadata,
    value: &StatValue,
) -> SerResult<usize> {
    check_stat_tag(meta, value)?;
    write_stat(w, value, 2)
}

pub fn deserialize_stat_value(input: &[u8], meta: &StatMetadata) -> SerResult<(StatValue, usize)> {
    match meta.value_type {
        StatValueType::I32 => deserialize_i32(input).map(|(v, len)| (StatValue::I32(v), len)),
        StatValueType::U32 => deserialize_u32(input).map(|(v, len)| (StatValue::U32(v), len)),
        StatValueType::I64 => deserialize_i64(input).map(|(v, len)| (StatValue::I64(v), len)),
        StatValueType::U64 => deserialize_u64(input).map(|(v, len)| (StatValue::U64(v), len)),
        StatValueType::Double => {
            deserialize_double(input).map(|(v, len)| (StatValue::Double(v), len))
        }
    }
}
