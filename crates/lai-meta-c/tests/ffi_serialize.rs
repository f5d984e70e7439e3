// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

// C-facing serializers and registry lookups, called the way an adapter would.

use lai_meta_c::*;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

fn ensure_installed() {
    let status = lai_meta_install_sample_catalog();
    assert!(
        status == LaiMetaStatus::LaiMetaOk || status == LaiMetaStatus::LaiMetaAlreadyInstalled,
        "unexpected status {:?}",
        status
    );
    assert!(lai_meta_is_installed());
}

fn text(buf: &[c_char]) -> String {
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

#[test]
fn scalar_round_trip_through_c_buffers() {
    let mut buf = [0 as c_char; 64];
    unsafe {
        let n = lai_serialize_u32(buf.as_mut_ptr(), buf.len(), 4_000_000_000);
        assert_eq!(n, 10);
        assert_eq!(text(&buf), "4000000000");

        let mut back = 0u32;
        assert_eq!(lai_deserialize_u32(buf.as_ptr(), &mut back), 10);
        assert_eq!(back, 4_000_000_000);

        let n = lai_serialize_double(buf.as_mut_ptr(), buf.len(), 3.14159);
        assert_eq!(n, 4);
        assert_eq!(text(&buf), "3.14");

        let input = CString::new("oid:0x1a2b,").unwrap();
        let mut oid = 0u64;
        assert_eq!(lai_deserialize_object_id(input.as_ptr(), &mut oid), 10);
        assert_eq!(oid, 0x1a2b);

        let input = CString::new("256").unwrap();
        let mut small = 0u8;
        assert_eq!(lai_deserialize_u8(input.as_ptr(), &mut small), -1);
    }
}

#[test]
fn short_buffer_and_null_pointers_fail() {
    let mut buf = [0 as c_char; 4];
    unsafe {
        // Four digits leave no room for the terminator.
        assert_eq!(lai_serialize_u16(buf.as_mut_ptr(), buf.len(), 1234), -1);
        assert_eq!(lai_serialize_u16(buf.as_mut_ptr(), buf.len(), 123), 3);
        assert_eq!(lai_serialize_bool(std::ptr::null_mut(), 8, true), -1);
        let mut out = false;
        assert_eq!(lai_deserialize_bool(std::ptr::null(), &mut out), -1);
    }
}

#[test]
fn size_pointer_and_ranges() {
    let mut buf = [0 as c_char; 64];
    unsafe {
        assert_eq!(lai_serialize_size(buf.as_mut_ptr(), buf.len(), 4096), 4);
        assert_eq!(text(&buf), "4096");
        let mut size = 0usize;
        assert_eq!(lai_deserialize_size(buf.as_ptr(), &mut size), 4);
        assert_eq!(size, 4096);

        assert_eq!(lai_serialize_pointer(buf.as_mut_ptr(), buf.len(), 0xbeef), 10);
        assert_eq!(text(&buf), "ptr:0xbeef");
        let mut ptr = 0usize;
        assert_eq!(lai_deserialize_pointer(buf.as_ptr(), &mut ptr), 10);
        assert_eq!(ptr, 0xbeef);

        assert_eq!(lai_serialize_s32_range(buf.as_mut_ptr(), buf.len(), -40, 85), 6);
        assert_eq!(text(&buf), "-40,85");
        let (mut min, mut max) = (0i32, 0i32);
        let input = CString::new("-40,85\"").unwrap();
        assert_eq!(lai_deserialize_s32_range(input.as_ptr(), &mut min, &mut max), 6);
        assert_eq!((min, max), (-40, 85));

        assert_eq!(lai_serialize_u32_range(buf.as_mut_ptr(), buf.len(), 1, 4_000_000_000), 12);
        let (mut min, mut max) = (0u32, 0u32);
        assert_eq!(lai_deserialize_u32_range(buf.as_ptr(), &mut min, &mut max), 12);
        assert_eq!((min, max), (1, 4_000_000_000));

        let input = CString::new("12").unwrap();
        assert_eq!(lai_deserialize_u32_range(input.as_ptr(), &mut min, &mut max), -1);
        assert_eq!((min, max), (1, 4_000_000_000));
    }
}

#[test]
fn chardata_fixed_field() {
    let mut field = [0 as c_char; 512];
    let input = CString::new("linecard-1\"").unwrap();
    let mut buf = [0 as c_char; 64];
    unsafe {
        assert_eq!(lai_deserialize_chardata(input.as_ptr(), field.as_mut_ptr()), 10);
        assert_eq!(lai_serialize_chardata(buf.as_mut_ptr(), buf.len(), field.as_ptr()), 10);
    }
    assert_eq!(text(&buf), "linecard-1");
}

#[test]
fn registry_lookups_and_enums() {
    ensure_installed();
    let name = CString::new("LAI_PORT_ATTR_ADMIN_STATE").unwrap();
    let mut object_type = 0i32;
    let mut attr_id = 0u32;
    let mut buf = [0 as c_char; 64];
    unsafe {
        assert_eq!(
            lai_meta_attr_id_by_name(name.as_ptr(), &mut object_type, &mut attr_id),
            LaiMetaStatus::LaiMetaOk
        );
        assert_eq!(
            lai_meta_attr_name(object_type, attr_id, buf.as_mut_ptr(), buf.len()),
            LaiMetaStatus::LaiMetaOk
        );
        assert_eq!(text(&buf), "LAI_PORT_ATTR_ADMIN_STATE");
        assert_eq!(
            lai_meta_attr_name(object_type, attr_id, buf.as_mut_ptr(), 8),
            LaiMetaStatus::LaiMetaBufferTooSmall
        );

        assert!(lai_serialize_enum_by_attr(buf.as_mut_ptr(), buf.len(), name.as_ptr(), 0) > 0);
        assert_eq!(text(&buf), "LAI_ADMIN_STATE_ENABLED");

        let mut value = -1i32;
        let input = CString::new("LAI_ADMIN_STATE_MAINT]").unwrap();
        assert_eq!(
            lai_deserialize_enum_by_attr(name.as_ptr(), input.as_ptr(), &mut value),
            21
        );
        assert_eq!(value, 2);

        let missing = CString::new("LAI_PORT_ATTR_NOPE").unwrap();
        assert_eq!(
            lai_meta_attr_id_by_name(missing.as_ptr(), &mut object_type, &mut attr_id),
            LaiMetaStatus::LaiMetaNotFound
        );
    }
    assert!(lai_meta_attr_count(2) > 0);
    assert!(lai_meta_is_object_type_valid(2));
    assert!(!lai_meta_is_object_type_valid(0));
    assert!(!lai_meta_is_object_type_backed_by_reference(9));
}
