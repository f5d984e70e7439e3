// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enum values and attribute id names.

use super::{byte_at, contract, deserialize_i32, is_terminator, malformed, serialize_i32};
use super::{SerResult, TextWriter};
use crate::metadata::{AttrMetadata, EnumMetadata, Registry};
use crate::types::AttrId;

/// Emit the member name of `value`, or the bare integer when `meta` is absent
/// or has no such member.
pub fn serialize_enum(
    w: &mut TextWriter<'_>,
    meta: Option<&EnumMetadata>,
    value: i32,
) -> SerResult<usize> {
    let Some(meta) = meta else {
        return serialize_i32(w, value);
    };
    match meta.value(value) {
        Some(member) => w.write_str(&member.name),
        None => {
            log::warn!("[serialize] enum value {} not found in enum {}", value, meta.name);
            serialize_i32(w, value)
        }
    }
}

/// Match a member name at the start of `input` (first match wins), falling
/// back to a plain int32.
pub fn deserialize_enum(input: &[u8], meta: Option<&EnumMetadata>) -> SerResult<(i32, usize)> {
    let Some(meta) = meta else {
        return deserialize_i32(input);
    };
    for member in meta.values.iter().chain(meta.ignored.iter()) {
        let name = member.name.as_bytes();
        if input.starts_with(name) && is_terminator(byte_at(input, name.len())) {
            return Ok((member.value, name.len()));
        }
    }
    log::debug!(
        "[serialize] '{}' is not a member name of {}, trying int32",
        super::preview(input),
        meta.name
    );
    deserialize_i32(input)
}

/// Emit the id name of `attr_id`; `meta` must describe that attribute.
pub fn serialize_attr_id(
    w: &mut TextWriter<'_>,
    meta: &AttrMetadata,
    attr_id: AttrId,
) -> SerResult<usize> {
    if meta.attr_id != attr_id {
        return Err(contract(format!(
            "attribute id {} serialized with metadata of {} ({})",
            attr_id, meta.name, meta.attr_id
        )));
    }
    w.write_str(&meta.name)
}

/// Resolve an attribute id name through the registry's name index.
pub fn deserialize_attr_id<'r>(
    registry: &'r Registry,
    input: &[u8],
) -> SerResult<(&'r AttrMetadata, usize)> {
    let len = input
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || b == b'_'))
        .unwrap_or(input.len());
    if len == 0 || !is_terminator(byte_at(input, len)) {
        return Err(malformed("attr id", input));
    }
    std::str::from_utf8(&input[..len])
        .ok()
        .and_then(|name| registry.attr_metadata_by_name(name))
        .map(|meta| (meta, len))
        .ok_or_else(|| malformed("attr id", input))
}
