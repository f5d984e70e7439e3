// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scalar and range fragments.
//!
//! Every narrower integer parses through the 64-bit parser and is then range
//! checked, so `256` as a `u8` is an error rather than `0`.

use super::{byte_at, is_terminator, malformed, SerResult, TextWriter};
use crate::types::{CharData, ObjectId, S32Range, U32Range, CHARDATA_LENGTH};

// ---------------------------------------------------------------------------
// Bool
// ---------------------------------------------------------------------------

pub fn serialize_bool(w: &mut TextWriter<'_>, value: bool) -> SerResult<usize> {
    w.write_str(if value { "true" } else { "false" })
}

pub fn deserialize_bool(input: &[u8]) -> SerResult<(bool, usize)> {
    for (literal, value) in [(&b"true"[..], true), (&b"false"[..], false)] {
        if input.starts_with(literal) && is_terminator(byte_at(input, literal.len())) {
            return Ok((value, literal.len()));
        }
    }
    Err(malformed("bool", input))
}

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

/// Accumulate ASCII digits into a `u64`; `None` on overflow or no digits.
fn scan_u64(input: &[u8]) -> Option<(u64, usize)> {
    let mut value: u64 = 0;
    let mut idx = 0;
    while let Some(&b) = input.get(idx) {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.checked_mul(10)?.checked_add(u64::from(b - b'0'))?;
        idx += 1;
    }
    (idx > 0 && is_terminator(byte_at(input, idx))).then_some((value, idx))
}

fn scan_i64(input: &[u8]) -> Option<(i64, usize)> {
    match input.first() {
        Some(b'-') => {
            let (magnitude, len) = scan_u64(&input[1..])?;
            if magnitude > i64::MIN.unsigned_abs() {
                return None;
            }
            Some(((magnitude as i64).wrapping_neg(), len + 1))
        }
        _ => {
            let (magnitude, len) = scan_u64(input)?;
            Some((i64::try_from(magnitude).ok()?, len))
        }
    }
}

pub fn serialize_u64(w: &mut TextWriter<'_>, value: u64) -> SerResult<usize> {
    write!(w, "{}", value)
}

/// Decimal digits only; overflow past `u64::MAX` is rejected.
pub fn deserialize_u64(input: &[u8]) -> SerResult<(u64, usize)> {
    scan_u64(input).ok_or_else(|| malformed("uint64", input))
}

pub fn serialize_i64(w: &mut TextWriter<'_>, value: i64) -> SerResult<usize> {
    write!(w, "{}", value)
}

/// Optional leading `-`, magnitude parsed as unsigned.
pub fn deserialize_i64(input: &[u8]) -> SerResult<(i64, usize)> {
    scan_i64(input).ok_or_else(|| malformed("int64", input))
}

macro_rules! impl_integer_text {
    ($ser:ident, $de:ident, $scan:ident, $ty:ty, $kind:literal) => {
        pub fn $ser(w: &mut TextWriter<'_>, value: $ty) -> SerResult<usize> {
            write!(w, "{}", value)
        }

        pub fn $de(input: &[u8]) -> SerResult<($ty, usize)> {
            $scan(input)
                .and_then(|(wide, len)| <$ty>::try_from(wide).ok().map(|v| (v, len)))
                .ok_or_else(|| malformed($kind, input))
        }
    };
}

impl_integer_text!(serialize_u8, deserialize_u8, scan_u64, u8, "uint8");
impl_integer_text!(serialize_u16, deserialize_u16, scan_u64, u16, "uint16");
impl_integer_text!(serialize_u32, deserialize_u32, scan_u64, u32, "uint32");
impl_integer_text!(serialize_size, deserialize_size, scan_u64, usize, "size");
impl_integer_text!(serialize_i8, deserialize_i8, scan_i64, i8, "int8");
impl_integer_text!(serialize_i16, deserialize_i16, scan_i64, i16, "int16");
impl_integer_text!(serialize_i32, deserialize_i32, scan_i64, i32, "int32");

// ---------------------------------------------------------------------------
// Double
// ---------------------------------------------------------------------------

/// Fixed two decimals; `3.14159` is written as `3.14`.
pub fn serialize_double(w: &mut TextWriter<'_>, value: f64) -> SerResult<usize> {
    write!(w, "{:.2}", value)
}

/// Serialize with `digits` fractional digits.
pub fn serialize_double_precision(
    w: &mut TextWriter<'_>,
    value: f64,
    digits: usize,
) -> SerResult<usize> {
    write!(w, "{:.*}", digits, value)
}

/// Length of a decimal floating literal at the start of `input`.
fn float_token_len(input: &[u8]) -> usize {
    let digits_from = |mut idx: usize| {
        while byte_at(input, idx).is_ascii_digit() {
            idx += 1;
        }
        idx
    };
    let mut idx = usize::from(matches!(byte_at(input, 0), b'-' | b'+'));
    let int_end = digits_from(idx);
    let mut saw_digit = int_end > idx;
    idx = int_end;
    if byte_at(input, idx) == b'.' {
        let frac_end = digits_from(idx + 1);
        saw_digit |= frac_end > idx + 1;
        idx = frac_end;
    }
    if !saw_digit {
        return 0;
    }
    if matches!(byte_at(input, idx), b'e' | b'E') {
        let mut exp = idx + 1;
        if matches!(byte_at(input, exp), b'-' | b'+') {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            idx = exp_end;
        }
    }
    idx
}

pub fn deserialize_double(input: &[u8]) -> SerResult<(f64, usize)> {
    let len = float_token_len(input);
    if len == 0 || !is_terminator(byte_at(input, len)) {
        return Err(malformed("double", input));
    }
    std::str::from_utf8(&input[..len])
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .map(|v| (v, len))
        .ok_or_else(|| malformed("double", input))
}

// ---------------------------------------------------------------------------
// Chardata
// ---------------------------------------------------------------------------

/// Printable ASCII except backslash and quote; no escaping exists.
fn is_chardata_byte(b: u8) -> bool {
    (0x20..0x7f).contains(&b) && b != b'\\' && b != b'"'
}

/// Copy `data` up to its first NUL or [`CHARDATA_LENGTH`] bytes.
pub fn serialize_chardata(w: &mut TextWriter<'_>, data: &[u8]) -> SerResult<usize> {
    let end = data
        .iter()
        .take(CHARDATA_LENGTH)
        .position(|&b| b == 0)
        .unwrap_or_else(|| data.len().min(CHARDATA_LENGTH));
    if let Some(&bad) = data[..end].iter().find(|&&b| !is_chardata_byte(b)) {
        log::warn!("[serialize] invalid character 0x{:x} in chardata", bad);
        return Err(malformed("chardata", data));
    }
    w.write_bytes(&data[..end])
}

/// Read chardata up to NUL, a quote or [`CHARDATA_LENGTH`] bytes.
pub fn deserialize_chardata(input: &[u8]) -> SerResult<(CharData, usize)> {
    let mut idx = 0;
    while idx < CHARDATA_LENGTH {
        let b = byte_at(input, idx);
        if is_chardata_byte(b) {
            idx += 1;
            continue;
        }
        if b == 0 || b == b'"' {
            break;
        }
        log::warn!("[serialize] invalid character 0x{:x} in chardata", b);
        return Err(malformed("chardata", input));
    }
    if !is_terminator(byte_at(input, idx)) {
        return Err(malformed("chardata", input));
    }
    Ok((CharData::from_bytes(&input[..idx]), idx))
}

// ---------------------------------------------------------------------------
// Pointer and object id
// ---------------------------------------------------------------------------

/// Up to `max` hex digits starting at `start`; returns value and end index.
fn scan_hex(input: &[u8], start: usize, max: usize) -> Option<(u64, usize)> {
    let mut value: u64 = 0;
    let mut idx = start;
    while idx - start < max {
        let digit = match (byte_at(input, idx) as char).to_digit(16) {
            Some(d) => d,
            None => break,
        };
        value = (value << 4) | u64::from(digit);
        idx += 1;
    }
    (idx > start).then_some((value, idx))
}

/// `ptr:0x<hex>`; the value is opaque and never dereferenced.
pub fn serialize_pointer(w: &mut TextWriter<'_>, value: usize) -> SerResult<usize> {
    write!(w, "ptr:0x{:x}", value)
}

pub fn deserialize_pointer(input: &[u8]) -> SerResult<(usize, usize)> {
    let parsed = input.strip_prefix(b"ptr:").and_then(|_| {
        let start = if input[4..].starts_with(b"0x") { 6 } else { 4 };
        let (value, end) = scan_hex(input, start, usize::BITS as usize / 4)?;
        is_terminator(byte_at(input, end)).then_some((value as usize, end))
    });
    parsed.ok_or_else(|| malformed("pointer", input))
}

/// `oid:0x<hex>`.
pub fn serialize_object_id(w: &mut TextWriter<'_>, oid: ObjectId) -> SerResult<usize> {
    write!(w, "oid:0x{:x}", oid)
}

/// At most 16 hex digits after `oid:0x`.
pub fn deserialize_object_id(input: &[u8]) -> SerResult<(ObjectId, usize)> {
    let parsed = input
        .starts_with(b"oid:0x")
        .then(|| scan_hex(input, 6, 16))
        .flatten()
        .filter(|&(_, end)| is_terminator(byte_at(input, end)));
    parsed.ok_or_else(|| malformed("oid", input))
}

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

pub fn serialize_u32_range(w: &mut TextWriter<'_>, range: &U32Range) -> SerResult<usize> {
    write!(w, "{},{}", range.min, range.max)
}

/// `min,max`; the comma is required.
pub fn deserialize_u32_range(input: &[u8]) -> SerResult<(U32Range, usize)> {
    let (min, len) = deserialize_u32(input)?;
    if byte_at(input, len) != b',' {
        return Err(malformed("u32range", input));
    }
    let (max, len2) = deserialize_u32(&input[len + 1..])?;
    Ok((U32Range { min, max }, len + 1 + len2))
}

pub fn serialize_s32_range(w: &mut TextWriter<'_>, range: &S32Range) -> SerResult<usize> {
    write!(w, "{},{}", range.min, range.max)
}

pub fn deserialize_s32_range(input: &[u8]) -> SerResult<(S32Range, usize)> {
    let (min, len) = deserialize_i32(input)?;
    if byte_at(input, len) != b',' {
        return Err(malformed("s32range", input));
    }
    let (max, len2) = deserialize_i32(&input[len + 1..])?;
    Ok((S32Range { min, max }, len + 1 + len2))
}

#[cfg(test)]
mod tests {
    use super::super::to_text;
    use super::*;

    #[test]
    fn test_bool() {
        assert_eq!(to_text(|w| serialize_bool(w, true)).unwrap(), "true");
        assert_eq!(deserialize_bool(b"false}").unwrap(), (false, 5));
        assert_eq!(deserialize_bool(b"true").unwrap(), (true, 4));
        assert!(deserialize_bool(b"truex").is_err());
        assert!(deserialize_bool(b"True").is_err());
    }

    #[test]
    fn test_terminator_strictness() {
        assert!(deserialize_u32(b"123x").is_err());
        assert!(deserialize_i8(b"12x").is_err());
        for text in [&b"123,"[..], b"123]", b"123}", b"123", b"123\"", b"123\0zz"] {
            assert_eq!(deserialize_u32(text).unwrap(), (123, 3));
            assert_eq!(deserialize_i64(text).unwrap(), (123, 3));
        }
    }

    #[test]
    fn test_integer_limits() {
        assert_eq!(
            deserialize_u64(b"18446744073709551615").unwrap().0,
            u64::MAX
        );
        assert!(deserialize_u64(b"18446744073709551616").is_err());
        assert!(deserialize_u64(b"99999999999999999999999").is_err());
        assert!(deserialize_u8(b"256").is_err());
        assert_eq!(deserialize_u8(b"255").unwrap(), (255, 3));
        assert_eq!(deserialize_i8(b"-128").unwrap(), (-128, 4));
        assert!(deserialize_i8(b"128").is_err());
        assert_eq!(
            deserialize_i64(b"-9223372036854775808").unwrap().0,
            i64::MIN
        );
        assert!(deserialize_i64(b"-9223372036854775809").is_err());
        assert!(deserialize_i64(b"9223372036854775808").is_err());
        assert!(deserialize_u32(b"-1").is_err());
        assert!(deserialize_u32(b"+1").is_err());
        assert!(deserialize_u32(b"").is_err());
        assert!(deserialize_i32(b"-").is_err());
    }

    #[test]
    fn test_double_is_two_decimals() {
        let text = to_text(|w| serialize_double(w, 3.14159)).unwrap();
        assert_eq!(text, "3.14");
        assert_eq!(deserialize_double(text.as_bytes()).unwrap(), (3.14, 4));
        assert_eq!(deserialize_double(b"-1.5e3,").unwrap(), (-1500.0, 6));
        assert_eq!(deserialize_double(b"7}").unwrap(), (7.0, 1));
        assert!(deserialize_double(b"1.5x").is_err());
        assert!(deserialize_double(b".").is_err());
        assert_eq!(
            to_text(|w| serialize_double_precision(w, 1.0e-12, 18)).unwrap(),
            "0.000000000001000000"
        );
    }

    #[test]
    fn test_chardata() {
        let data = CharData::new("port-1 A");
        assert_eq!(
            to_text(|w| serialize_chardata(w, data.raw())).unwrap(),
            "port-1 A"
        );
        assert!(to_text(|w| serialize_chardata(w, b"a\\b")).is_err());
        assert!(to_text(|w| serialize_chardata(w, b"a\"b")).is_err());

        let (parsed, len) = deserialize_chardata(b"hello\",").unwrap();
        assert_eq!(parsed.as_bytes(), b"hello");
        assert_eq!(len, 5);
        assert!(deserialize_chardata(b"bad\\x").is_err());
        assert!(deserialize_chardata(b"tab\there").is_err());

        let long = vec![b'x'; CHARDATA_LENGTH];
        let (parsed, len) = deserialize_chardata(&long).unwrap();
        assert_eq!(len, CHARDATA_LENGTH);
        assert_eq!(parsed.len(), CHARDATA_LENGTH);
        let longer = vec![b'x'; CHARDATA_LENGTH + 1];
        assert!(deserialize_chardata(&longer).is_err());
    }

    #[test]
    fn test_pointer_and_oid() {
        let text = to_text(|w| serialize_pointer(w, 0xdead_beef)).unwrap();
        assert_eq!(text, "ptr:0xdeadbeef");
        assert_eq!(deserialize_pointer(text.as_bytes()).unwrap(), (0xdead_beef, 14));
        assert!(deserialize_pointer(b"0xdeadbeef").is_err());

        let text = to_text(|w| serialize_object_id(w, 0x1000_0000_0000_002a)).unwrap();
        assert_eq!(text, "oid:0x100000000000002a");
        assert_eq!(
            deserialize_object_id(b"oid:0x100000000000002a\"").unwrap(),
            (0x1000_0000_0000_002a, 22)
        );
        assert_eq!(deserialize_object_id(b"oid:0x0").unwrap(), (0, 7));
        assert!(deserialize_object_id(b"oid:0x1234567890abcdef0").is_err());
        assert!(deserialize_object_id(b"oid:0x").is_err());
        assert!(deserialize_object_id(b"oid:12").is_err());
        assert!(deserialize_object_id(b"oid:0x12g").is_err());
    }

    #[test]
    fn test_ranges_require_comma() {
        let range = U32Range { min: 10, max: 20 };
        assert_eq!(to_text(|w| serialize_u32_range(w, &range)).unwrap(), "10,20");
        assert_eq!(deserialize_u32_range(b"10,20}").unwrap(), (range, 5));
        assert!(deserialize_u32_range(b"10").is_err());
        assert!(deserialize_u32_range(b"10]20").is_err());

        let srange = S32Range { min: -5, max: 5 };
        assert_eq!(to_text(|w| serialize_s32_range(w, &srange)).unwrap(), "-5,5");
        assert_eq!(deserialize_s32_range(b"-5,5").unwrap(), (srange, 4));
        assert!(deserialize_s32_range(b"-5;5").is_err());
    }
}
