// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Text serialization of attribute values.
//!
//! Values are rendered as fragments of a JSON-compatible stream. Deserializers
//! use relaxed termination: a fragment ends at NUL (or the end of the input),
//! `"`, `,`, `]` or `}`, so a value can be read straight out of an enclosing
//! document such as `"value":123}`. The byte right after every fragment is
//! checked; `12x` is rejected rather than read as `12`.
//!
//! Serializers write through a bounds-checked [`TextWriter`] and return the
//! byte count; deserializers return the value and the bytes consumed.

mod attribute;
mod enums;
mod primitives;
mod writer;

pub use attribute::{
    deserialize_attribute, deserialize_attribute_value, deserialize_stat_value,
    serialize_attribute, serialize_attribute_value, serialize_stat_value,
    serialize_stat_value_fixed,
};
pub use enums::{deserialize_attr_id, deserialize_enum, serialize_attr_id, serialize_enum};
pub use primitives::*;
pub use writer::TextWriter;

use std::fmt;

/// Sentinel returned across the C boundary for any failure.
pub const SERIALIZE_ERROR: i32 = -1;

/// Bytes of offending input echoed in diagnostics.
pub const MAX_CHARS_PRINT: usize = 25;

/// Buffer size that fits any scalar fragment.
pub const PRIMITIVE_BUFFER_SIZE: usize = 128;

/// Upper bound for [`to_text`] buffer growth.
const MAX_TEXT_SIZE: usize = 1 << 20;

/// Serialization error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerError {
    /// Input did not parse as `kind`.
    Malformed { kind: &'static str, preview: String },
    /// Output would not fit the caller's buffer.
    BufferTooSmall { offset: usize, needed: usize },
    /// Value or metadata inconsistent with each other; a caller or table bug.
    Contract(String),
}

impl SerError {
    /// The C sentinel for this error.
    pub fn sentinel(&self) -> i32 {
        SERIALIZE_ERROR
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, SerError::Contract(_))
    }
}

impl fmt::Display for SerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerError::Malformed { kind, preview } => {
                write!(f, "failed to deserialize '{}' as {}", preview, kind)
            }
            SerError::BufferTooSmall { offset, needed } => write!(
                f,
                "buffer too small: {} more bytes needed at offset {}",
                needed, offset
            ),
            SerError::Contract(reason) => write!(f, "contract violation: {}", reason),
        }
    }
}

impl std::error::Error for SerError {}

pub type SerResult<T> = Result<T, SerError>;

/// Relaxed terminator set: NUL, `"`, `,`, `]`, `}`.
pub fn is_terminator(byte: u8) -> bool {
    matches!(byte, 0 | b'"' | b',' | b']' | b'}')
}

/// Byte at `pos`, NUL past the end.
#[inline]
pub(crate) fn byte_at(input: &[u8], pos: usize) -> u8 {
    input.get(pos).copied().unwrap_or(0)
}

/// At most [`MAX_CHARS_PRINT`] bytes of `input`, up to the first NUL.
pub(crate) fn preview(input: &[u8]) -> String {
    let end = input
        .iter()
        .take(MAX_CHARS_PRINT)
        .position(|&b| b == 0)
        .unwrap_or_else(|| input.len().min(MAX_CHARS_PRINT));
    String::from_utf8_lossy(&input[..end]).into_owned()
}

/// Routine bad input: logged at warn level.
pub(crate) fn malformed(kind: &'static str, input: &[u8]) -> SerError {
    let preview = preview(input);
    log::warn!("[serialize] failed to deserialize '{}' as {}", preview, kind);
    SerError::Malformed { kind, preview }
}

/// Table or caller bug: logged at error level.
pub(crate) fn contract(reason: String) -> SerError {
    log::error!("[CONTRACT] [serialize] {}", reason);
    SerError::Contract(reason)
}

/// Run `f` against a scratch buffer and return the text it wrote.
///
/// The buffer starts at [`PRIMITIVE_BUFFER_SIZE`] and doubles while `f`
/// reports [`SerError::BufferTooSmall`].
pub fn to_text<F>(f: F) -> SerResult<String>
where
    F: FnMut(&mut TextWriter<'_>) -> SerResult<usize>,
{
    to_text_with_capacity(PRIMITIVE_BUFFER_SIZE, f)
}

/// [`to_text`] with an explicit starting capacity.
pub fn to_text_with_capacity<F>(capacity: usize, mut f: F) -> SerResult<String>
where
    F: FnMut(&mut TextWriter<'_>) -> SerResult<usize>,
{
    let mut size = capacity.max(1);
    loop {
        let mut buf = vec![0u8; size];
        let mut w = TextWriter::new(&mut buf);
        match f(&mut w) {
            Ok(_) => {
                let len = w.len();
                buf.truncate(len);
                return Ok(String::from_utf8_lossy(&buf).into_owned());
            }
            Err(SerError::BufferTooSmall { .. }) if size < MAX_TEXT_SIZE => size *= 2,
            Err(err) => return Err(err),
        }
    }
}
