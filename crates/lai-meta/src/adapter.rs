// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Boundary between the host and a vendor adapter.
//!
//! [`ObjectApi`] is the per-object method table a vendor adapter exposes.
//! [`check_create_attributes`] is the host-side validation run before a
//! create call reaches it.

use crate::condition::is_condition_met;
use crate::metadata::{get_attribute_by_id, is_allowed_enum_value, Registry};
use crate::types::{Attribute, AttrId, ObjectId, ObjectType, StatId, StatValue};
use std::fmt;

/// Status codes shared with the adapter ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaiStatus {
    Failure,
    NotSupported,
    InvalidParameter,
    ItemNotFound,
    BufferOverflow,
    MandatoryAttributeMissing,
    NotImplemented,
    InvalidObjectType,
    /// Attribute at this list index is unknown or not allowed here.
    InvalidAttribute(u16),
    /// Attribute value at this list index is wrong.
    InvalidAttrValue(u16),
}

const STATUS_INVALID_ATTRIBUTE_0: i32 = -0x0001_0000;
const STATUS_INVALID_ATTR_VALUE_0: i32 = -0x0002_0000;

impl LaiStatus {
    /// Numeric code on the ABI (`SUCCESS` is 0 and never an error).
    pub fn code(self) -> i32 {
        match self {
            LaiStatus::Failure => -1,
            LaiStatus::NotSupported => -2,
            LaiStatus::InvalidParameter => -5,
            LaiStatus::ItemNotFound => -7,
            LaiStatus::BufferOverflow => -8,
            LaiStatus::MandatoryAttributeMissing => -0xE,
            LaiStatus::NotImplemented => -0xF,
            LaiStatus::InvalidObjectType => -0x12,
            LaiStatus::InvalidAttribute(i) => STATUS_INVALID_ATTRIBUTE_0 + i32::from(i),
            LaiStatus::InvalidAttrValue(i) => STATUS_INVALID_ATTR_VALUE_0 + i32::from(i),
        }
    }

    fn index(i: usize) -> u16 {
        u16::try_from(i).unwrap_or(u16::MAX)
    }
}

impl fmt::Display for LaiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaiStatus::Failure => write!(f, "failure"),
            LaiStatus::NotSupported => write!(f, "not supported"),
            LaiStatus::InvalidParameter => write!(f, "invalid parameter"),
            LaiStatus::ItemNotFound => write!(f, "item not found"),
            LaiStatus::BufferOverflow => write!(f, "buffer overflow"),
            LaiStatus::MandatoryAttributeMissing => write!(f, "mandatory attribute missing"),
            LaiStatus::NotImplemented => write!(f, "not implemented"),
            LaiStatus::InvalidObjectType => write!(f, "invalid object type"),
            LaiStatus::InvalidAttribute(i) => write!(f, "invalid attribute at index {}", i),
            LaiStatus::InvalidAttrValue(i) => write!(f, "invalid attribute value at index {}", i),
        }
    }
}

impl std::error::Error for LaiStatus {}

/// Identity of one object instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectMetaKey {
    pub object_type: ObjectType,
    pub object_id: ObjectId,
}

impl ObjectMetaKey {
    pub fn new(object_type: ObjectType, object_id: ObjectId) -> Self {
        Self {
            object_type,
            object_id,
        }
    }
}

/// Per-object method table implemented by a vendor adapter.
pub trait ObjectApi {
    fn create(&mut self, object_type: ObjectType, attrs: &[Attribute]) -> Result<ObjectId, LaiStatus>;

    fn remove(&mut self, key: ObjectMetaKey) -> Result<(), LaiStatus>;

    fn set(&mut self, key: ObjectMetaKey, attr: &Attribute) -> Result<(), LaiStatus>;

    /// Fill the values of the requested ids.
    fn get(&self, key: ObjectMetaKey, ids: &[AttrId]) -> Result<Vec<Attribute>, LaiStatus>;

    fn get_stats(&self, key: ObjectMetaKey, ids: &[StatId]) -> Result<Vec<StatValue>, LaiStatus>;

    fn clear_stats(&mut self, key: ObjectMetaKey, ids: &[StatId]) -> Result<(), LaiStatus>;
}

/// Validate a create request against the registry.
///
/// Checks, in order: each supplied attribute is known, neither read-only nor
/// set-only, and tagged right; every mandatory attribute is present; every
/// conditional attribute whose condition holds is present.
pub fn check_create_attributes(
    registry: &Registry,
    object_type: ObjectType,
    attrs: &[Attribute],
) -> Result<(), LaiStatus> {
    let info = registry.object_type_info(object_type).ok_or_else(|| {
        log::debug!("[adapter] create on unknown object type {}", object_type);
        LaiStatus::InvalidObjectType
    })?;

    for (idx, attr) in attrs.iter().enumerate() {
        let Some(meta) = registry.attr_metadata(object_type, attr.id) else {
            log::warn!("[adapter] {}: unknown attribute id {}", object_type, attr.id);
            return Err(LaiStatus::InvalidAttribute(LaiStatus::index(idx)));
        };
        if meta.is_read_only() || meta.is_set_only() {
            log::warn!("[adapter] {} is not valid on create", meta.name);
            return Err(LaiStatus::InvalidAttribute(LaiStatus::index(idx)));
        }
        if !attr.value.matches_type(meta.value_type) {
            log::warn!(
                "[adapter] {} expects {}, got {}",
                meta.name,
                meta.value_type,
                attr.value.value_type()
            );
            return Err(LaiStatus::InvalidAttrValue(LaiStatus::index(idx)));
        }
        if meta.is_enum() {
            if let Some(v) = attr.value.as_i32() {
                if !is_allowed_enum_value(meta, v) {
                    log::warn!("[adapter] {}: {} is not an allowed value", meta.name, v);
                    return Err(LaiStatus::InvalidAttrValue(LaiStatus::index(idx)));
                }
            }
        }
    }

    for meta in info.attrs() {
        let present = get_attribute_by_id(meta.attr_id, attrs).is_some();
        if present {
            continue;
        }
        if meta.is_mandatory_on_create() {
            log::warn!("[adapter] missing mandatory attribute {}", meta.name);
            return Err(LaiStatus::MandatoryAttributeMissing);
        }
        let required = is_condition_met(registry, meta, attrs).map_err(|e| {
            log::error!("[adapter] {}: {}", meta.name, e);
            LaiStatus::Failure
        })?;
        if required {
            log::warn!("[adapter] missing conditional attribute {}", meta.name);
            return Err(LaiStatus::MandatoryAttributeMissing);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        AttrCondition, AttrFlags, AttrMetadata, ConditionType, EnumMetadata, ObjectTypeInfo,
    };
    use crate::types::{AttrValueType, AttributeValue};
    use std::collections::HashMap;
    use std::sync::Arc;

    const MODE: AttrId = 0;
    const GAIN: AttrId = 1;
    const NAME: AttrId = 2;
    const TEMP: AttrId = 3;
    const INDEX: AttrId = 4;
    const RESET: AttrId = 5;

    fn registry() -> Registry {
        let modes = Arc::new(EnumMetadata::sequential(
            "lai_oa_amp_mode_t",
            "LAI_OA_AMP_MODE_",
            &["CONSTANT_GAIN", "CONSTANT_POWER"],
        ));
        let info = ObjectTypeInfo::builder(ObjectType::Oa)
            .attr(
                AttrMetadata::builder(ObjectType::Oa, MODE, "LAI_OA_ATTR_AMP_MODE", AttrValueType::I32)
                    .flags(AttrFlags::CREATE_AND_SET)
                    .enum_metadata(modes)
                    .default_const(AttributeValue::I32(1))
                    .build(),
            )
            .attr(
                AttrMetadata::builder(ObjectType::Oa, GAIN, "LAI_OA_ATTR_TARGET_GAIN", AttrValueType::Double)
                    .flags(AttrFlags::CREATE_AND_SET)
                    .conditions(ConditionType::And, vec![AttrCondition::new(MODE, 0i32)])
                    .build(),
            )
            .attr(
                AttrMetadata::builder(ObjectType::Oa, NAME, "LAI_OA_ATTR_NAME", AttrValueType::Chardata)
                    .flags(AttrFlags::CREATE_AND_SET)
                    .build(),
            )
            .attr(
                AttrMetadata::builder(ObjectType::Oa, TEMP, "LAI_OA_ATTR_TEMPERATURE", AttrValueType::Double)
                    .flags(AttrFlags::READ_ONLY)
                    .build(),
            )
            .attr(
                AttrMetadata::builder(ObjectType::Oa, INDEX, "LAI_OA_ATTR_INDEX", AttrValueType::U32)
                    .flags(AttrFlags::MANDATORY_ON_CREATE | AttrFlags::CREATE_ONLY)
                    .build(),
            )
            .attr(
                AttrMetadata::builder(ObjectType::Oa, RESET, "LAI_OA_ATTR_RESET", AttrValueType::Bool)
                    .flags(AttrFlags::SET_ONLY)
                    .build(),
            );
        Registry::builder().object_type(info).build().unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(LaiStatus::Failure.code(), -1);
        assert_eq!(LaiStatus::MandatoryAttributeMissing.code(), -14);
        assert_eq!(LaiStatus::InvalidObjectType.code(), -18);
        assert_eq!(LaiStatus::InvalidAttribute(0).code(), -0x10000);
        assert_eq!(LaiStatus::InvalidAttribute(3).code(), -0x10000 + 3);
        assert_eq!(LaiStatus::InvalidAttrValue(2).code(), -0x20000 + 2);
    }

    #[test]
    fn test_create_accepts_minimal_set() {
        let registry = registry();
        // AMP_MODE defaults to CONSTANT_POWER, so TARGET_GAIN is not required.
        let attrs = [Attribute::new(INDEX, 1u32)];
        assert_eq!(check_create_attributes(&registry, ObjectType::Oa, &attrs), Ok(()));
    }

    #[test]
    fn test_create_requires_mandatory_and_conditional() {
        let registry = registry();
        assert_eq!(
            check_create_attributes(&registry, ObjectType::Oa, &[]),
            Err(LaiStatus::MandatoryAttributeMissing)
        );

        let mut attrs = vec![Attribute::new(INDEX, 1u32), Attribute::new(MODE, 0i32)];
        assert_eq!(
            check_create_attributes(&registry, ObjectType::Oa, &attrs),
            Err(LaiStatus::MandatoryAttributeMissing)
        );
        attrs.push(Attribute::new(GAIN, 12.5));
        assert_eq!(check_create_attributes(&registry, ObjectType::Oa, &attrs), Ok(()));
    }

    #[test]
    fn test_create_rejects_bad_attributes() {
        let registry = registry();
        let unknown = [Attribute::new(INDEX, 1u32), Attribute::new(42, 1u32)];
        assert_eq!(
            check_create_attributes(&registry, ObjectType::Oa, &unknown),
            Err(LaiStatus::InvalidAttribute(1))
        );

        let read_only = [Attribute::new(TEMP, 40.0)];
        assert_eq!(
            check_create_attributes(&registry, ObjectType::Oa, &read_only),
            Err(LaiStatus::InvalidAttribute(0))
        );

        let set_only = [Attribute::new(INDEX, 1u32), Attribute::new(RESET, true)];
        assert_eq!(
            check_create_attributes(&registry, ObjectType::Oa, &set_only),
            Err(LaiStatus::InvalidAttribute(1))
        );

        let wrong_tag = [Attribute::new(INDEX, 1i32)];
        assert_eq!(
            check_create_attributes(&registry, ObjectType::Oa, &wrong_tag),
            Err(LaiStatus::InvalidAttrValue(0))
        );

        let bad_enum = [Attribute::new(INDEX, 1u32), Attribute::new(MODE, 9i32)];
        assert_eq!(
            check_create_attributes(&registry, ObjectType::Oa, &bad_enum),
            Err(LaiStatus::InvalidAttrValue(1))
        );

        assert_eq!(
            check_create_attributes(&registry, ObjectType::Port, &[]),
            Err(LaiStatus::InvalidObjectType)
        );
    }

    /// In-memory adapter used to exercise the method table.
    #[derive(Default)]
    struct MockAdapter {
        next_id: ObjectId,
        objects: HashMap<ObjectMetaKey, Vec<Attribute>>,
        registry: Option<Registry>,
    }

    impl ObjectApi for MockAdapter {
        fn create(&mut self, object_type: ObjectType, attrs: &[Attribute]) -> Result<ObjectId, LaiStatus> {
            let registry = self.registry.as_ref().ok_or(LaiStatus::Failure)?;
            check_create_attributes(registry, object_type, attrs)?;
            self.next_id += 1;
            let id = (object_type as u64) << 48 | self.next_id;
            self.objects.insert(ObjectMetaKey::new(object_type, id), attrs.to_vec());
            Ok(id)
        }

        fn remove(&mut self, key: ObjectMetaKey) -> Result<(), LaiStatus> {
            self.objects.remove(&key).map(|_| ()).ok_or(LaiStatus::ItemNotFound)
        }

        fn set(&mut self, key: ObjectMetaKey, attr: &Attribute) -> Result<(), LaiStatus> {
            let attrs = self.objects.get_mut(&key).ok_or(LaiStatus::ItemNotFound)?;
            attrs.retain(|a| a.id != attr.id);
            attrs.push(attr.clone());
            Ok(())
        }

        fn get(&self, key: ObjectMetaKey, ids: &[AttrId]) -> Result<Vec<Attribute>, LaiStatus> {
            let attrs = self.objects.get(&key).ok_or(LaiStatus::ItemNotFound)?;
            ids.iter()
                .enumerate()
                .map(|(i, id)| {
                    get_attribute_by_id(*id, attrs)
                        .cloned()
                        .ok_or(LaiStatus::InvalidAttribute(LaiStatus::index(i)))
                })
                .collect()
        }

        fn get_stats(&self, _key: ObjectMetaKey, _ids: &[StatId]) -> Result<Vec<StatValue>, LaiStatus> {
            Err(LaiStatus::NotImplemented)
        }

        fn clear_stats(&mut self, _key: ObjectMetaKey, _ids: &[StatId]) -> Result<(), LaiStatus> {
            Err(LaiStatus::NotSupported)
        }
    }

    #[test]
    fn test_mock_adapter_lifecycle() {
        let mut adapter = MockAdapter {
            registry: Some(registry()),
            ..Default::default()
        };
        let id = adapter
            .create(ObjectType::Oa, &[Attribute::new(INDEX, 7u32)])
            .unwrap();
        let key = ObjectMetaKey::new(ObjectType::Oa, id);

        adapter
            .set(key, &Attribute::new(NAME, AttributeValue::chardata("amp-1")))
            .unwrap();
        let got = adapter.get(key, &[INDEX, NAME]).unwrap();
        assert_eq!(got[0].value, AttributeValue::U32(7));
        assert_eq!(got[1].value.as_chardata(), Some(&b"amp-1"[..]));
        assert_eq!(adapter.get(key, &[GAIN]), Err(LaiStatus::InvalidAttribute(0)));
        assert_eq!(adapter.get_stats(key, &[0]), Err(LaiStatus::NotImplemented));

        adapter.remove(key).unwrap();
        assert_eq!(adapter.remove(key), Err(LaiStatus::ItemNotFound));
    }
}
