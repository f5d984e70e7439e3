// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Text serializers for C callers.
//!
//! `lai_serialize_*` write into `buf` (at most `len` bytes, null-terminated)
//! and return the text length. `lai_deserialize_*` read a null-terminated
//! input and return the bytes consumed. Both return `-1` on failure.

use libc::{c_char, c_int, size_t};
use std::ffi::CStr;
use std::slice;

use lai_meta::metadata::registry;
use lai_meta::serialize::{self as ser, SerResult, TextWriter, SERIALIZE_ERROR};
use lai_meta::types::{S32Range, U32Range, CHARDATA_LENGTH};

use super::c_str;

/// Run a serializer against a caller buffer and null-terminate it.
///
/// # Safety
/// `buf` must be NULL or valid for writes of `len` bytes.
unsafe fn write_text<F>(buf: *mut c_char, len: size_t, f: F) -> c_int
where
    F: FnOnce(&mut TextWriter<'_>) -> SerResult<usize>,
{
    if buf.is_null() || len == 0 {
        return SERIALIZE_ERROR;
    }
    let out = slice::from_raw_parts_mut(buf.cast::<u8>(), len);
    let mut w = TextWriter::new(out);
    let result = f(&mut w).and_then(|_| w.terminate().map(|()| w.len()));
    match result {
        Ok(n) => c_int::try_from(n).unwrap_or(SERIALIZE_ERROR),
        Err(e) => {
            log::debug!("[ffi] serialize failed: {}", e);
            e.sentinel()
        }
    }
}

/// Run a deserializer over a C string and store the value.
///
/// # Safety
/// `input` must be NULL or a valid null-terminated string; `out` must be
/// NULL or valid for writes.
unsafe fn read_text<T, F>(input: *const c_char, out: *mut T, f: F) -> c_int
where
    F: FnOnce(&[u8]) -> SerResult<(T, usize)>,
{
    if input.is_null() || out.is_null() {
        return SERIALIZE_ERROR;
    }
    let bytes = CStr::from_ptr(input).to_bytes();
    match f(bytes) {
        Ok((value, consumed)) => {
            *out = value;
            c_int::try_from(consumed).unwrap_or(SERIALIZE_ERROR)
        }
        Err(e) => e.sentinel(),
    }
}

macro_rules! scalar_ffi {
    ($ser_c:ident, $de_c:ident, $ser:path, $de:path, $ty:ty) => {
        /// # Safety
        /// `buf` must be valid for writes of `len` bytes.
        #[no_mangle]
        pub unsafe extern "C" fn $ser_c(buf: *mut c_char, len: size_t, value: $ty) -> c_int {
            write_text(buf, len, |w| $ser(w, value))
        }

        /// # Safety
        /// `input` must be a valid null-terminated string and `out` writable.
        #[no_mangle]
        pub unsafe extern "C" fn $de_c(input: *const c_char, out: *mut $ty) -> c_int {
            read_text(input, out, $de)
        }
    };
}

scalar_ffi!(lai_serialize_bool, lai_deserialize_bool, ser::serialize_bool, ser::deserialize_bool, bool);
scalar_ffi!(lai_serialize_u8, lai_deserialize_u8, ser::serialize_u8, ser::deserialize_u8, u8);
scalar_ffi!(lai_serialize_i8, lai_deserialize_i8, ser::serialize_i8, ser::deserialize_i8, i8);
scalar_ffi!(lai_serialize_u16, lai_deserialize_u16, ser::serialize_u16, ser::deserialize_u16, u16);
scalar_ffi!(lai_serialize_i16, lai_deserialize_i16, ser::serialize_i16, ser::deserialize_i16, i16);
scalar_ffi!(lai_serialize_u32, lai_deserialize_u32, ser::serialize_u32, ser::deserialize_u32, u32);
scalar_ffi!(lai_serialize_i32, lai_deserialize_i32, ser::serialize_i32, ser::deserialize_i32, i32);
scalar_ffi!(lai_serialize_u64, lai_deserialize_u64, ser::serialize_u64, ser::deserialize_u64, u64);
scalar_ffi!(lai_serialize_i64, lai_deserialize_i64, ser::serialize_i64, ser::deserialize_i64, i64);
scalar_ffi!(lai_serialize_double, lai_deserialize_double, ser::serialize_double, ser::deserialize_double, f64);
scalar_ffi!(
    lai_serialize_object_id,
    lai_deserialize_object_id,
    ser::serialize_object_id,
    ser::deserialize_object_id,
    u64
);
scalar_ffi!(lai_serialize_size, lai_deserialize_size, ser::serialize_size, ser::deserialize_size, size_t);
scalar_ffi!(
    lai_serialize_pointer,
    lai_deserialize_pointer,
    ser::serialize_pointer,
    ser::deserialize_pointer,
    size_t
);

macro_rules! range_ffi {
    ($ser_c:ident, $de_c:ident, $ser:path, $de:path, $range:ident, $ty:ty) => {
        /// Serialize `min..max` as `min,max`.
        ///
        /// # Safety
        /// `buf` must be valid for writes of `len` bytes.
        #[no_mangle]
        pub unsafe extern "C" fn $ser_c(buf: *mut c_char, len: size_t, min: $ty, max: $ty) -> c_int {
            write_text(buf, len, |w| $ser(w, &$range { min, max }))
        }

        /// # Safety
        /// `input` must be a valid null-terminated string; `min` and `max`
        /// must be writable.
        #[no_mangle]
        pub unsafe extern "C" fn $de_c(input: *const c_char, min: *mut $ty, max: *mut $ty) -> c_int {
            if min.is_null() || max.is_null() {
                return SERIALIZE_ERROR;
            }
            let mut range = $range::default();
            let consumed = read_text(input, &mut range as *mut $range, $de);
            if consumed >= 0 {
                *min = range.min;
                *max = range.max;
            }
            consumed
        }
    };
}

range_ffi!(
    lai_serialize_u32_range,
    lai_deserialize_u32_range,
    ser::serialize_u32_range,
    ser::deserialize_u32_range,
    U32Range,
    u32
);
range_ffi!(
    lai_serialize_s32_range,
    lai_deserialize_s32_range,
    ser::serialize_s32_range,
    ser::deserialize_s32_range,
    S32Range,
    i32
);

/// Serialize a fixed-size chardata field.
///
/// # Safety
/// - `buf` must be valid for writes of `len` bytes.
/// - `data` must be valid for reads of `CHARDATA_LENGTH` (512) bytes.
#[no_mangle]
pub unsafe extern "C" fn lai_serialize_chardata(
    buf: *mut c_char,
    len: size_t,
    data: *const c_char,
) -> c_int {
    if data.is_null() {
        return SERIALIZE_ERROR;
    }
    let data = slice::from_raw_parts(data.cast::<u8>(), CHARDATA_LENGTH);
    write_text(buf, len, |w| ser::serialize_chardata(w, data))
}

/// Deserialize chardata into a zero-padded `CHARDATA_LENGTH` byte field.
///
/// # Safety
/// - `input` must be a valid null-terminated string.
/// - `out` must be valid for writes of `CHARDATA_LENGTH` (512) bytes.
#[no_mangle]
pub unsafe extern "C" fn lai_deserialize_chardata(input: *const c_char, out: *mut c_char) -> c_int {
    if input.is_null() || out.is_null() {
        return SERIALIZE_ERROR;
    }
    match ser::deserialize_chardata(CStr::from_ptr(input).to_bytes()) {
        Ok((data, consumed)) => {
            std::ptr::copy_nonoverlapping(data.raw().as_ptr(), out.cast::<u8>(), CHARDATA_LENGTH);
            c_int::try_from(consumed).unwrap_or(SERIALIZE_ERROR)
        }
        Err(e) => e.sentinel(),
    }
}

/// Serialize `value` with the enum of the named attribute.
///
/// Falls back to the bare integer when the attribute is not an enum or the
/// value has no member.
///
/// # Safety
/// - `buf` must be valid for writes of `len` bytes.
/// - `attr_name` must be a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn lai_serialize_enum_by_attr(
    buf: *mut c_char,
    len: size_t,
    attr_name: *const c_char,
    value: i32,
) -> c_int {
    let Some(meta) = c_str(attr_name)
        .zip(registry::global())
        .and_then(|(name, r)| r.attr_metadata_by_name(name))
    else {
        return SERIALIZE_ERROR;
    };
    write_text(buf, len, |w| {
        ser::serialize_enum(w, meta.enum_metadata.as_deref(), value)
    })
}

/// Deserialize an enum member name (or integer) for the named attribute.
///
/// # Safety
/// - `attr_name` and `input` must be valid null-terminated strings.
/// - `out` must be writable.
#[no_mangle]
pub unsafe extern "C" fn lai_deserialize_enum_by_attr(
    attr_name: *const c_char,
    input: *const c_char,
    out: *mut i32,
) -> c_int {
    let Some(meta) = c_str(attr_name)
        .zip(registry::global())
        .and_then(|(name, r)| r.attr_metadata_by_name(name))
    else {
        return SERIALIZE_ERROR;
    };
    read_text(input, out, |bytes| {
        ser::deserialize_enum(bytes, meta.enum_metadata.as_deref())
    })
}
