// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # LAI metadata C FFI bindings
//!
//! Exposes the process-wide metadata registry and the text serializers to C
//! adapters. Serializers follow the ABI convention: they return the number
//! of bytes written or consumed, and `-1` on any failure.
//!
//! # Safety
//!
//! All public functions are `unsafe` and require the caller to uphold the
//! invariants documented in each function's safety comment.

mod logging;
mod serialize_ffi;

pub use logging::*;
pub use serialize_ffi::*;

use libc::{c_char, size_t};
use std::ffi::CStr;

use lai_meta::metadata::{registry, Registry};
use lai_meta::types::ObjectType;

/// Status codes returned by the registry functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaiMetaStatus {
    /// Operation completed successfully
    LaiMetaOk = 0,
    /// Null pointer, bad UTF-8 or out-of-range value
    LaiMetaInvalidArgument = 1,
    /// No metadata under that name or id
    LaiMetaNotFound = 2,
    /// Output buffer too small
    LaiMetaBufferTooSmall = 3,
    /// No registry installed yet
    LaiMetaNotInstalled = 4,
    /// Generic operation failure
    LaiMetaOperationFailed = 5,

    // === Catalog errors (10-19) ===
    /// Catalog failed to load or validate
    LaiMetaCatalogError = 10,
    /// A registry is already installed for this process
    LaiMetaAlreadyInstalled = 11,
}

/// Borrow a C string as UTF-8.
///
/// # Safety
/// `ptr` must be NULL or a valid null-terminated string.
pub(crate) unsafe fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

fn installed() -> Result<&'static Registry, LaiMetaStatus> {
    registry::global().ok_or(LaiMetaStatus::LaiMetaNotInstalled)
}

fn install(registry: Registry) -> LaiMetaStatus {
    match registry::install(registry) {
        Ok(()) => LaiMetaStatus::LaiMetaOk,
        Err(_) => {
            log::warn!("[ffi] registry already installed, keeping the first one");
            LaiMetaStatus::LaiMetaAlreadyInstalled
        }
    }
}

/// Load a YAML or JSON catalog and install it as the process registry.
///
/// # Safety
/// `path` must be a valid null-terminated C string.
///
/// # Example (C)
/// ```c
/// if (lai_meta_install_catalog("/etc/lai/linecard.yaml") != LaiMetaOk) { ... }
/// ```
#[cfg(feature = "catalog")]
#[no_mangle]
pub unsafe extern "C" fn lai_meta_install_catalog(path: *const c_char) -> LaiMetaStatus {
    let Some(path) = c_str(path) else {
        return LaiMetaStatus::LaiMetaInvalidArgument;
    };
    match lai_meta::catalog::load_registry(path) {
        Ok(registry) => install(registry),
        Err(e) => {
            log::error!("[ffi] catalog {}: {}", path, e);
            LaiMetaStatus::LaiMetaCatalogError
        }
    }
}

/// Install the bundled line-card catalog.
#[cfg(feature = "catalog")]
#[no_mangle]
pub extern "C" fn lai_meta_install_sample_catalog() -> LaiMetaStatus {
    match lai_meta::catalog::Catalog::sample().and_then(|c| c.into_registry()) {
        Ok(registry) => install(registry),
        Err(e) => {
            log::error!("[ffi] bundled catalog: {}", e);
            LaiMetaStatus::LaiMetaCatalogError
        }
    }
}

/// Whether a process registry is installed.
#[no_mangle]
pub extern "C" fn lai_meta_is_installed() -> bool {
    registry::global().is_some()
}

/// Whether `object_type` is a real object type (not NULL or MAX).
#[no_mangle]
pub extern "C" fn lai_meta_is_object_type_valid(object_type: i32) -> bool {
    ObjectType::from_raw(object_type).is_some_and(lai_meta::metadata::is_object_type_valid)
}

/// Resolve an attribute name to its object type and id.
///
/// # Safety
/// - `name` must be a valid null-terminated C string.
/// - `out_object_type` and `out_attr_id` must be valid writable pointers.
#[no_mangle]
pub unsafe extern "C" fn lai_meta_attr_id_by_name(
    name: *const c_char,
    out_object_type: *mut i32,
    out_attr_id: *mut u32,
) -> LaiMetaStatus {
    if out_object_type.is_null() || out_attr_id.is_null() {
        return LaiMetaStatus::LaiMetaInvalidArgument;
    }
    let Some(name) = c_str(name) else {
        return LaiMetaStatus::LaiMetaInvalidArgument;
    };
    let registry = match installed() {
        Ok(r) => r,
        Err(status) => return status,
    };
    match registry.attr_metadata_by_name(name) {
        Some(meta) => {
            *out_object_type = meta.object_type.as_raw();
            *out_attr_id = meta.attr_id;
            LaiMetaStatus::LaiMetaOk
        }
        None => LaiMetaStatus::LaiMetaNotFound,
    }
}

/// Copy the full name of an attribute into `buf`, null-terminated.
///
/// # Safety
/// `buf` must be valid for writes of `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn lai_meta_attr_name(
    object_type: i32,
    attr_id: u32,
    buf: *mut c_char,
    len: size_t,
) -> LaiMetaStatus {
    if buf.is_null() || len == 0 {
        return LaiMetaStatus::LaiMetaInvalidArgument;
    }
    let Some(object_type) = ObjectType::from_raw(object_type) else {
        return LaiMetaStatus::LaiMetaInvalidArgument;
    };
    let registry = match installed() {
        Ok(r) => r,
        Err(status) => return status,
    };
    let Some(meta) = registry.attr_metadata(object_type, attr_id) else {
        return LaiMetaStatus::LaiMetaNotFound;
    };
    let name = meta.name.as_bytes();
    if name.len() >= len {
        return LaiMetaStatus::LaiMetaBufferTooSmall;
    }
    std::ptr::copy_nonoverlapping(name.as_ptr(), buf.cast::<u8>(), name.len());
    *buf.add(name.len()) = 0;
    LaiMetaStatus::LaiMetaOk
}

/// Number of attributes declared for `object_type`, 0 when unknown.
#[no_mangle]
pub extern "C" fn lai_meta_attr_count(object_type: i32) -> size_t {
    let Some(object_type) = ObjectType::from_raw(object_type) else {
        return 0;
    };
    registry::global().map_or(0, |r| r.attr_metadata_list(object_type).len())
}

/// Whether objects of `object_type` are addressed by object id.
#[no_mangle]
pub extern "C" fn lai_meta_is_object_type_backed_by_reference(object_type: i32) -> bool {
    match (ObjectType::from_raw(object_type), registry::global()) {
        (Some(ot), Some(r)) => r.is_object_type_backed_by_reference(ot),
        _ => false,
    }
}
