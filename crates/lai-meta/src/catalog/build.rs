// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Catalog document to registry conversion.

use super::model::{AttrDoc, CatalogDocument, ConditionDoc, EnumDoc, EnumValueDoc, ObjectDoc};
use super::CatalogError;
use crate::metadata::{
    AttrCondition, AttrFlags, AttrMetadata, ConditionType, DefaultValueType, EnumMetadata,
    EnumValue, MetadataError, ObjectTypeInfo, Registry, StatMetadata,
};
use crate::serialize::deserialize_attribute_value;
use crate::types::{AttrId, AttrValueType, ObjectType, StatValueType};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

type EnumTable = HashMap<String, Arc<EnumMetadata>>;

pub(super) fn build_registry(doc: &CatalogDocument) -> Result<Registry, CatalogError> {
    let enums = build_enums(&doc.enums);

    // Ids first, so cross-object default sources resolve by name.
    let mut objects = Vec::with_capacity(doc.objects.len());
    let mut global_ids: HashMap<&str, (ObjectType, AttrId)> = HashMap::new();
    for object in &doc.objects {
        let object_type = ObjectType::from_str(&object.object_type)
            .map_err(|_| CatalogError::UnknownObjectType(object.object_type.clone()))?;
        let ids = assign_ids(object.attributes.iter().map(|a| a.id));
        for (attr, id) in object.attributes.iter().zip(&ids) {
            global_ids.insert(attr.name.as_str(), (object_type, *id));
        }
        objects.push((object_type, object, ids));
    }

    let mut builder = Registry::builder();
    for (object_type, object, ids) in objects {
        let mut attrs = Vec::with_capacity(object.attributes.len());
        for (attr, id) in object.attributes.iter().zip(&ids) {
            attrs.push(build_attr(object_type, *id, attr, &enums, &global_ids)?);
        }

        // Condition values parse against the referenced attribute's tag.
        let mut resolved = Vec::with_capacity(attrs.len());
        for (doc, meta) in object.attributes.iter().zip(&attrs) {
            let conditions = resolve_conditions(&meta.name, doc.condition.as_ref(), &attrs)?;
            let valid_only = resolve_conditions(&meta.name, doc.valid_only.as_ref(), &attrs)?;
            resolved.push((conditions, valid_only));
        }

        let mut info = ObjectTypeInfo::builder(object_type);
        if !object.object_id {
            info = info.non_object_id();
        }
        if object.attr_ids_are_flags {
            info = info.attr_ids_are_flags();
        }
        for (mut meta, (conditions, valid_only)) in attrs.into_iter().zip(resolved) {
            if let Some((kind, list)) = conditions {
                meta.condition_type = kind;
                meta.conditions = list;
            }
            if let Some((kind, list)) = valid_only {
                meta.valid_only_type = kind;
                meta.valid_only = list;
            }
            info = info.attr(meta);
        }
        for stat in build_stats(object_type, object)? {
            info = info.stat(stat);
        }
        builder.add_object_type(info);
    }

    let registry = builder.build()?;
    log::info!(
        "[catalog] loaded {} object types, {} enums",
        registry.object_types().count(),
        enums.len()
    );
    Ok(registry)
}

/// Explicit ids win; missing ids continue from the previous one.
fn assign_ids(explicit: impl Iterator<Item = Option<u32>>) -> Vec<u32> {
    let mut next = 0u32;
    explicit
        .map(|id| {
            let id = id.unwrap_or(next);
            next = id.wrapping_add(1);
            id
        })
        .collect()
}

fn build_enums(docs: &[EnumDoc]) -> EnumTable {
    let members = |prefix: &str, values: &[EnumValueDoc]| -> Vec<EnumValue> {
        let mut next = 0i32;
        values
            .iter()
            .map(|v| {
                let (name, value) = match v {
                    EnumValueDoc::Name(name) => (name.as_str(), next),
                    EnumValueDoc::Explicit { name, value } => (name.as_str(), *value),
                };
                next = value.wrapping_add(1);
                let short = name.strip_prefix(prefix).unwrap_or(name);
                EnumValue::new(value, name, short)
            })
            .collect()
    };

    docs.iter()
        .map(|doc| {
            let mut meta = EnumMetadata::new(doc.name.clone(), members(&doc.prefix, &doc.values))
                .with_ignored(members(&doc.prefix, &doc.ignored));
            if doc.flags {
                meta = meta.with_flags();
            }
            (doc.name.clone(), Arc::new(meta))
        })
        .collect()
}

fn keyword<T: FromStr>(context: &str, text: &str) -> Result<T, CatalogError> {
    text.parse().map_err(|_| CatalogError::UnknownKeyword {
        context: context.to_string(),
        keyword: text.to_string(),
    })
}

fn default_kind(context: &str, text: &str) -> Result<DefaultValueType, CatalogError> {
    let kind = match text.trim().to_ascii_uppercase().as_str() {
        "NONE" => DefaultValueType::None,
        "CONST" => DefaultValueType::Const,
        "ATTR_RANGE" => DefaultValueType::AttrRange,
        "ATTR_VALUE" => DefaultValueType::AttrValue,
        "EMPTY_LIST" => DefaultValueType::EmptyList,
        "VENDOR_SPECIFIC" => DefaultValueType::VendorSpecific,
        "LINECARD_INTERNAL" => DefaultValueType::LinecardInternal,
        _ => {
            return Err(CatalogError::UnknownKeyword {
                context: context.to_string(),
                keyword: text.to_string(),
            })
        }
    };
    Ok(kind)
}

fn condition_kind(context: &str, text: &str) -> Result<ConditionType, CatalogError> {
    match text.trim().to_ascii_uppercase().as_str() {
        "AND" => Ok(ConditionType::And),
        "OR" => Ok(ConditionType::Or),
        _ => Err(CatalogError::UnknownKeyword {
            context: context.to_string(),
            keyword: text.to_string(),
        }),
    }
}

fn build_attr(
    object_type: ObjectType,
    attr_id: AttrId,
    doc: &AttrDoc,
    enums: &EnumTable,
    global_ids: &HashMap<&str, (ObjectType, AttrId)>,
) -> Result<AttrMetadata, CatalogError> {
    let context = doc.name.as_str();
    let value_type: AttrValueType = keyword(context, &doc.value_type)?;

    let mut flags = AttrFlags::empty();
    for name in &doc.flags {
        flags = flags
            | AttrFlags::from_name(name).ok_or_else(|| CatalogError::UnknownKeyword {
                context: context.to_string(),
                keyword: name.clone(),
            })?;
    }

    let mut allowed = Vec::with_capacity(doc.allowed_object_types.len());
    for name in &doc.allowed_object_types {
        allowed.push(
            ObjectType::from_str(name)
                .map_err(|_| CatalogError::UnknownObjectType(name.clone()))?,
        );
    }

    let mut builder = AttrMetadata::builder(object_type, attr_id, doc.name.clone(), value_type)
        .flags(flags)
        .brief(doc.brief.clone())
        .allowed_object_types(allowed)
        .recoverable(doc.recoverable);
    if let Some(name) = &doc.enum_name {
        let meta = enums.get(name).ok_or_else(|| CatalogError::UnknownEnum {
            attr: doc.name.clone(),
            name: name.clone(),
        })?;
        builder = builder.enum_metadata(Arc::clone(meta));
    }
    if doc.allow_null {
        builder = builder.allow_null_object_id();
    }
    if doc.deprecated {
        builder = builder.deprecated();
    }
    if doc.default.is_some() && (doc.default_kind.is_some() || doc.default_from.is_some()) {
        return Err(CatalogError::Metadata(MetadataError::ConflictingDefault(
            doc.name.clone(),
        )));
    }
    if let Some(kind) = &doc.default_kind {
        builder = builder.default_kind(default_kind(context, kind)?);
    }
    if let Some(from) = &doc.default_from {
        let (source_type, source_id) =
            global_ids
                .get(from.attr.as_str())
                .ok_or_else(|| CatalogError::UnknownAttribute {
                    context: doc.name.clone(),
                    name: from.attr.clone(),
                })?;
        builder = builder.default_from(default_kind(context, &from.kind)?, *source_type, *source_id);
    }

    let mut meta = builder.build();
    if let Some(default) = &doc.default {
        let text = default.to_text();
        let value = parse_value(context, &text, &meta)?;
        meta.default_value_type = DefaultValueType::Const;
        meta.default_value = Some(value);
    }
    Ok(meta)
}

/// Parse `text` in full as a value of `meta`'s type.
fn parse_value(
    context: &str,
    text: &str,
    meta: &AttrMetadata,
) -> Result<crate::types::AttributeValue, CatalogError> {
    match deserialize_attribute_value(text.as_bytes(), meta) {
        Ok((value, len)) if len == text.len() => Ok(value),
        _ => Err(CatalogError::BadValue {
            context: context.to_string(),
            text: text.to_string(),
        }),
    }
}

fn resolve_conditions(
    context: &str,
    doc: Option<&ConditionDoc>,
    attrs: &[AttrMetadata],
) -> Result<Option<(ConditionType, Vec<AttrCondition>)>, CatalogError> {
    let Some(doc) = doc else {
        return Ok(None);
    };
    let kind = condition_kind(context, &doc.kind)?;
    let mut list = Vec::with_capacity(doc.terms.len());
    for term in &doc.terms {
        let target = attrs
            .iter()
            .find(|m| m.name == term.attr || m.short_name == term.attr)
            .ok_or_else(|| CatalogError::UnknownAttribute {
                context: context.to_string(),
                name: term.attr.clone(),
            })?;
        let value = parse_value(context, &term.value.to_text(), target)?;
        list.push(AttrCondition {
            attr_id: target.attr_id,
            value,
        });
    }
    Ok(Some((kind, list)))
}

fn build_stats(object_type: ObjectType, object: &ObjectDoc) -> Result<Vec<StatMetadata>, CatalogError> {
    let ids = assign_ids(object.stats.iter().map(|s| s.id));
    let mut stats = Vec::with_capacity(ids.len());
    for (doc, id) in object.stats.iter().zip(ids) {
        let context = doc.name.as_str();
        let value_type: StatValueType = keyword(context, &doc.value_type)?;
        let mut stat = StatMetadata::new(object_type, id, doc.name.clone(), value_type);
        if let Some(unit) = &doc.unit {
            stat = stat.with_unit(keyword(context, unit)?);
        }
        if let Some(precision) = &doc.precision {
            stat = stat.with_precision(keyword(context, precision)?);
        }
        if doc.counter {
            stat = stat.counter();
        }
        stats.push(stat);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::super::Catalog;
    use super::*;
    use crate::types::AttributeValue;

    const DOC: &str = r#"
enums:
  - name: lai_mode_t
    prefix: LAI_MODE_
    values:
      - LAI_MODE_A
      - { name: LAI_MODE_C, value: 4 }
      - LAI_MODE_D
objects:
  - object_type: OTN
    attributes:
      - name: LAI_OTN_ATTR_MODE
        type: INT32
        enum: lai_mode_t
        default: LAI_MODE_C
      - name: LAI_OTN_ATTR_ENABLED
        type: BOOL
        default: false
      - id: 5
        name: LAI_OTN_ATTR_TTI
        type: CHARDATA
        flags: [CREATE_ONLY]
        condition:
          type: AND
          terms:
            - { attr: MODE, value: LAI_MODE_D }
            - { attr: LAI_OTN_ATTR_ENABLED, value: true }
      - name: LAI_OTN_ATTR_NEXT
        type: UINT32
        default_kind: VENDOR_SPECIFIC
    stats:
      - name: LAI_OTN_STAT_BER
        type: DOUBLE
        precision: PRECISION18
"#;

    #[test]
    fn test_ids_enums_and_values() {
        let registry = Catalog::from_yaml_str(DOC).unwrap().into_registry().unwrap();
        let mode = registry.attr_metadata_by_name("LAI_OTN_ATTR_MODE").unwrap();
        assert_eq!(mode.attr_id, 0);
        assert_eq!(mode.default_value, Some(AttributeValue::I32(4)));
        let enum_meta = mode.enum_metadata.as_ref().unwrap();
        assert_eq!(enum_meta.value_by_name("LAI_MODE_D").unwrap().value, 5);
        assert_eq!(enum_meta.values[1].short_name, "C");

        let tti = registry.attr_metadata(ObjectType::Otn, 5).unwrap();
        assert_eq!(tti.condition_type, ConditionType::And);
        assert_eq!(tti.conditions[0], AttrCondition::new(0, 5i32));
        assert_eq!(tti.conditions[1], AttrCondition::new(1, true));

        let next = registry.attr_metadata(ObjectType::Otn, 6).unwrap();
        assert_eq!(next.default_value_type, DefaultValueType::VendorSpecific);
        assert!(!registry.object_type_info(ObjectType::Otn).unwrap().attrs_dense);
    }

    #[test]
    fn test_unknown_names_are_reported() {
        let bad_enum = DOC.replace("enum: lai_mode_t", "enum: lai_nope_t");
        assert!(matches!(
            Catalog::from_yaml_str(&bad_enum).unwrap().into_registry(),
            Err(CatalogError::UnknownEnum { .. })
        ));
        let bad_target = DOC.replace("attr: MODE", "attr: MISSING");
        assert!(matches!(
            Catalog::from_yaml_str(&bad_target).unwrap().into_registry(),
            Err(CatalogError::UnknownAttribute { .. })
        ));
        let bad_default = DOC.replace("default: false", "default: maybe");
        assert!(matches!(
            Catalog::from_yaml_str(&bad_default).unwrap().into_registry(),
            Err(CatalogError::BadValue { .. })
        ));
        let conflicting = DOC.replace(
            "default: false",
            "default: false\n        default_kind: VENDOR_SPECIFIC",
        );
        assert!(matches!(
            Catalog::from_yaml_str(&conflicting).unwrap().into_registry(),
            Err(CatalogError::Metadata(MetadataError::ConflictingDefault(name)))
                if name == "LAI_OTN_ATTR_ENABLED"
        ));
        let bad_type = DOC.replace("type: BOOL", "type: BOOLEAN");
        assert!(matches!(
            Catalog::from_yaml_str(&bad_type).unwrap().into_registry(),
            Err(CatalogError::UnknownKeyword { .. })
        ));
    }
}
