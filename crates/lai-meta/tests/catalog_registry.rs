// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test readability over pedantic
#![allow(clippy::too_many_lines)] // Test code

//! Registry built from the bundled line-card catalog.
//!
//! Covers name and id lookups, reference backing, the sorted name index and
//! loading catalogs from files.

use lai_meta::catalog::{load_registry, Catalog, CatalogError};
use lai_meta::metadata::{is_object_type_valid, MetadataError, Registry};
use lai_meta::types::{AttrValueType, ObjectType, StatValuePrecision, StatValueUnit};
use std::fs;

fn sample_registry() -> Registry {
    Catalog::sample()
        .and_then(Catalog::into_registry)
        .expect("bundled catalog must build")
}

#[test]
fn sample_catalog_covers_line_card_types() {
    let registry = sample_registry();
    let types: Vec<_> = registry.object_types().collect();
    for ot in [
        ObjectType::Linecard,
        ObjectType::Port,
        ObjectType::Oa,
        ObjectType::Otn,
        ObjectType::Lldp,
    ] {
        assert!(types.contains(&ot), "{} missing from sample catalog", ot);
        assert!(is_object_type_valid(ot));
    }
    assert!(!is_object_type_valid(ObjectType::Null));
    assert!(registry.is_object_type_backed_by_reference(ObjectType::Port));
    assert!(!registry.is_object_type_backed_by_reference(ObjectType::Lldp));
}

#[test]
fn lookup_by_id_and_name_agree() {
    let registry = sample_registry();
    for ot in registry.object_types().collect::<Vec<_>>() {
        for meta in registry.attr_metadata_list(ot) {
            let by_id = registry.attr_metadata(ot, meta.attr_id).unwrap();
            assert_eq!(by_id.name, meta.name);
            let by_name = registry.attr_metadata_by_name(&meta.name).unwrap();
            assert_eq!((by_name.object_type, by_name.attr_id), (ot, meta.attr_id));
        }
        for meta in registry.stat_metadata_list(ot) {
            let by_id = registry.stat_metadata(ot, meta.stat_id).unwrap();
            assert_eq!(by_id.name, meta.name);
            assert!(registry.stat_metadata_by_name(&meta.name).is_some());
        }
    }
}

#[test]
fn sample_attribute_shapes() {
    let registry = sample_registry();

    let port_list = registry
        .attr_metadata_by_name("LAI_LINECARD_ATTR_PORT_LIST")
        .unwrap();
    assert_eq!(port_list.value_type, AttrValueType::ObjectList);
    assert!(port_list.is_read_only());
    assert_eq!(port_list.allowed_object_types, vec![ObjectType::Port]);

    let flash = registry
        .attr_metadata_by_name("LAI_PORT_ATTR_LED_FLASH_INTERVAL")
        .unwrap();
    assert!(flash.is_conditional());
    assert!(flash.is_valid_only());

    let ber = registry
        .stat_metadata_by_name("LAI_OTN_STAT_PRE_FEC_BER")
        .unwrap();
    assert_eq!(ber.precision, StatValuePrecision::P18);

    let power = registry
        .stat_metadata_by_name("LAI_PORT_STAT_INPUT_POWER")
        .unwrap();
    assert_eq!(power.unit, StatValueUnit::Dbm);
}

#[test]
fn name_index_stays_sorted_and_complete() {
    let registry = sample_registry();
    assert!(registry.is_name_index_sorted());

    let names: Vec<&str> = registry
        .attrs_by_name()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    let mut rng = fastrand::Rng::with_seed(0x1a1);
    for _ in 0..200 {
        let name = names[rng.usize(..names.len())];
        assert!(registry.attr_metadata_by_name(name).is_some());

        // Perturbed names must miss rather than land on a neighbour.
        let mut bad = name.to_string();
        bad.push(rng.alphabetic().to_ascii_uppercase());
        assert!(registry.attr_metadata_by_name(&bad).is_none(), "{}", bad);
    }
    assert!(registry.attr_metadata_by_name("").is_none());
    assert!(registry.attr_metadata_by_name("LAI_ZZZ").is_none());
}

#[test]
fn load_yaml_and_json_files() {
    let dir = tempfile::tempdir().unwrap();

    let yaml_path = dir.path().join("card.yaml");
    fs::write(&yaml_path, lai_meta::catalog::SAMPLE_LINECARD_YAML).unwrap();
    let from_yaml = load_registry(&yaml_path).unwrap();
    assert!(from_yaml
        .attr_metadata_by_name("LAI_OA_ATTR_TARGET_GAIN")
        .is_some());

    let json = r#"{
        "enums": [],
        "objects": [{
            "object_type": "LLDP",
            "object_id": false,
            "attributes": [
                {"name": "LAI_LLDP_ATTR_ENABLED", "type": "BOOL", "flags": ["CREATE_AND_SET"], "default": true}
            ]
        }]
    }"#;
    let json_path = dir.path().join("lldp.json");
    fs::write(&json_path, json).unwrap();
    let from_json = load_registry(&json_path).unwrap();
    let enabled = from_json
        .attr_metadata_by_name("LAI_LLDP_ATTR_ENABLED")
        .unwrap();
    assert_eq!(enabled.const_default().and_then(|v| v.as_bool()), Some(true));

    assert!(matches!(
        load_registry(dir.path().join("missing.yaml")),
        Err(CatalogError::Io(_))
    ));
}

#[test]
fn catalog_rejects_inconsistent_tables() {
    let duplicate = r"
objects:
  - object_type: PORT
    attributes:
      - { name: LAI_PORT_ATTR_A, type: BOOL, flags: [CREATE_AND_SET] }
  - object_type: OA
    attributes:
      - { name: LAI_PORT_ATTR_A, type: BOOL, flags: [CREATE_AND_SET] }
";
    let err = Catalog::from_yaml_str(duplicate)
        .and_then(Catalog::into_registry)
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Metadata(MetadataError::DuplicateName(_))
    ));

    let mandatory_default = r"
objects:
  - object_type: OA
    attributes:
      - { name: LAI_OA_ATTR_ID, type: UINT32, flags: [MANDATORY_ON_CREATE], default: 3 }
";
    let err = Catalog::from_yaml_str(mandatory_default)
        .and_then(Catalog::into_registry)
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Metadata(MetadataError::MandatoryWithDefault(_))
    ));

    let bad_type = "objects:\n  - object_type: TOASTER\n";
    assert!(Catalog::from_yaml_str(bad_type)
        .and_then(Catalog::into_registry)
        .is_err());
}
