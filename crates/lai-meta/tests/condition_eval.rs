// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test readability over pedantic

//! Conditional-mandatory evaluation against the bundled catalog, end to end
//! through create validation.

use lai_meta::adapter::{check_create_attributes, LaiStatus};
use lai_meta::catalog::Catalog;
use lai_meta::condition::{is_condition_met, is_valid_only_met};
use lai_meta::metadata::{AttrMetadata, Registry};
use lai_meta::types::{Attribute, ObjectType};

fn registry() -> Registry {
    Catalog::sample().and_then(Catalog::into_registry).unwrap()
}

fn attr<'r>(registry: &'r Registry, name: &str) -> &'r AttrMetadata {
    registry
        .attr_metadata_by_name(name)
        .unwrap_or_else(|| panic!("{} not in catalog", name))
}

fn enum_value(meta: &AttrMetadata, name: &str) -> i32 {
    meta.enum_metadata
        .as_ref()
        .and_then(|e| e.value_by_name(name).map(|v| v.value))
        .unwrap_or_else(|| panic!("{} not in enum of {}", name, meta.name))
}

#[test]
fn or_condition_uses_target_default() {
    let registry = registry();
    let gain = attr(&registry, "LAI_OA_ATTR_TARGET_GAIN");
    let power = attr(&registry, "LAI_OA_ATTR_TARGET_OUTPUT_POWER");
    let mode = attr(&registry, "LAI_OA_ATTR_AMP_MODE");

    // AMP_MODE absent: its default CONSTANT_GAIN decides.
    assert_eq!(is_condition_met(&registry, gain, &[]), Ok(true));
    assert_eq!(is_condition_met(&registry, power, &[]), Ok(false));

    let constant_power = [Attribute::new(
        mode.attr_id,
        enum_value(mode, "LAI_OA_AMP_MODE_CONSTANT_POWER"),
    )];
    assert_eq!(is_condition_met(&registry, gain, &constant_power), Ok(false));
    assert_eq!(is_condition_met(&registry, power, &constant_power), Ok(true));

    let dynamic = [Attribute::new(
        mode.attr_id,
        enum_value(mode, "LAI_OA_AMP_MODE_DYNAMIC_GAIN"),
    )];
    assert_eq!(is_condition_met(&registry, gain, &dynamic), Ok(true));
}

#[test]
fn and_condition_falls_back_to_default() {
    let registry = registry();
    let flash = attr(&registry, "LAI_PORT_ATTR_LED_FLASH_INTERVAL");
    let led = attr(&registry, "LAI_PORT_ATTR_LED_MODE");

    assert_eq!(is_condition_met(&registry, flash, &[]), Ok(false));
    let forced = [Attribute::new(
        led.attr_id,
        enum_value(led, "LAI_LED_MODE_FORCE_FLASH"),
    )];
    assert_eq!(is_condition_met(&registry, flash, &forced), Ok(true));
    assert_eq!(is_valid_only_met(&registry, flash, &forced), Ok(true));
    assert_eq!(is_valid_only_met(&registry, flash, &[]), Ok(false));

    let dm = attr(&registry, "LAI_OTN_ATTR_DELAY_MEASUREMENT_MODE");
    let enabled = attr(&registry, "LAI_OTN_ATTR_DELAY_MEASUREMENT_ENABLED");
    assert_eq!(is_condition_met(&registry, dm, &[]), Ok(false));
    assert_eq!(
        is_condition_met(&registry, dm, &[Attribute::new(enabled.attr_id, true)]),
        Ok(true)
    );
}

#[test]
fn unconditional_attribute_is_never_met() {
    let registry = registry();
    let hostname = attr(&registry, "LAI_LINECARD_ATTR_HOSTNAME");
    assert_eq!(is_condition_met(&registry, hostname, &[]), Ok(false));
    assert_eq!(is_valid_only_met(&registry, hostname, &[]), Ok(true));
}

#[test]
fn create_validation_follows_conditions() {
    let registry = registry();
    let id = attr(&registry, "LAI_OA_ATTR_ID");
    let gain = attr(&registry, "LAI_OA_ATTR_TARGET_GAIN");
    let mode = attr(&registry, "LAI_OA_ATTR_AMP_MODE");
    let power = attr(&registry, "LAI_OA_ATTR_TARGET_OUTPUT_POWER");

    let mut attrs = vec![Attribute::new(id.attr_id, 1u32)];
    assert_eq!(
        check_create_attributes(&registry, ObjectType::Oa, &attrs),
        Err(LaiStatus::MandatoryAttributeMissing)
    );
    attrs.push(Attribute::new(gain.attr_id, 18.0));
    assert_eq!(check_create_attributes(&registry, ObjectType::Oa, &attrs), Ok(()));

    attrs.push(Attribute::new(
        mode.attr_id,
        enum_value(mode, "LAI_OA_AMP_MODE_CONSTANT_POWER"),
    ));
    assert_eq!(
        check_create_attributes(&registry, ObjectType::Oa, &attrs),
        Err(LaiStatus::MandatoryAttributeMissing)
    );
    attrs.push(Attribute::new(power.attr_id, 3.5));
    assert_eq!(check_create_attributes(&registry, ObjectType::Oa, &attrs), Ok(()));
}
