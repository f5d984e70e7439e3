// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-object-type metadata tables.

use super::{AttrMetadata, EnumMetadata, EnumValue, StatMetadata};
use crate::types::{AttrId, ObjectType, StatId};
use std::sync::Arc;

/// Everything the registry knows about one object type.
#[derive(Debug, Clone)]
pub struct ObjectTypeInfo {
    pub object_type: ObjectType,
    /// Attribute id enum (`lai_port_attr_t`).
    pub attr_enum: Arc<EnumMetadata>,
    /// Statistic id enum (`lai_port_stat_t`).
    pub stat_enum: Arc<EnumMetadata>,
    /// Instances are addressed by opaque object id rather than an embedded key.
    pub is_object_id: bool,
    pub(crate) attrs: Vec<Arc<AttrMetadata>>,
    pub(crate) stats: Vec<Arc<StatMetadata>>,
    /// `attrs[i].attr_id == i` for every `i`.
    pub(crate) attrs_dense: bool,
    /// `stats[i].stat_id == i` for every `i`.
    pub(crate) stats_dense: bool,
}

impl ObjectTypeInfo {
    pub fn builder(object_type: ObjectType) -> ObjectTypeInfoBuilder {
        ObjectTypeInfoBuilder::new(object_type)
    }

    /// Attribute table ordered by id.
    pub fn attrs(&self) -> &[Arc<AttrMetadata>] {
        &self.attrs
    }

    /// Statistic table ordered by id.
    pub fn stats(&self) -> &[Arc<StatMetadata>] {
        &self.stats
    }

    pub fn attr_id_start(&self) -> AttrId {
        self.attrs.first().map_or(0, |m| m.attr_id)
    }

    pub fn attr_id_end(&self) -> AttrId {
        self.attrs.last().map_or(0, |m| m.attr_id.saturating_add(1))
    }

    pub(crate) fn find_attr(&self, attr_id: AttrId) -> Option<&AttrMetadata> {
        let idx = attr_id as usize;
        if self.attrs_dense && !self.attr_enum.contains_flags {
            return self.attrs.get(idx).map(|m| &**m);
        }
        self.attrs
            .iter()
            .find(|m| m.attr_id == attr_id)
            .map(|m| &**m)
    }

    pub(crate) fn find_stat(&self, stat_id: StatId) -> Option<&StatMetadata> {
        if self.stats_dense {
            return self.stats.get(stat_id as usize).map(|m| &**m);
        }
        if self.stats.last().map_or(true, |m| stat_id > m.stat_id) {
            return None;
        }
        self.stats
            .iter()
            .find(|m| m.stat_id == stat_id)
            .map(|m| &**m)
    }
}

/// Collects the tables of one object type before the registry is built.
#[derive(Debug)]
pub struct ObjectTypeInfoBuilder {
    pub(crate) object_type: ObjectType,
    pub(crate) is_object_id: bool,
    pub(crate) attr_ids_are_flags: bool,
    pub(crate) attrs: Vec<AttrMetadata>,
    pub(crate) stats: Vec<StatMetadata>,
}

impl ObjectTypeInfoBuilder {
    fn new(object_type: ObjectType) -> Self {
        Self {
            object_type,
            is_object_id: true,
            attr_ids_are_flags: false,
            attrs: Vec::new(),
            stats: Vec::new(),
        }
    }

    /// Instances are addressed by an embedded key rather than an object id.
    pub fn non_object_id(mut self) -> Self {
        self.is_object_id = false;
        self
    }

    /// Attribute ids are bit flags; disables direct indexing.
    pub fn attr_ids_are_flags(mut self) -> Self {
        self.attr_ids_are_flags = true;
        self
    }

    pub fn attr(mut self, meta: AttrMetadata) -> Self {
        self.attrs.push(meta);
        self
    }

    pub fn stat(mut self, meta: StatMetadata) -> Self {
        self.stats.push(meta);
        self
    }

    /// Freeze the tables. Ids are assumed unique; the registry checks that.
    pub(crate) fn finish(mut self) -> ObjectTypeInfo {
        self.attrs.sort_by_key(|m| m.attr_id);
        self.stats.sort_by_key(|m| m.stat_id);

        let lower = self.object_type.short_name().to_ascii_lowercase();
        let mut attr_enum = EnumMetadata::new(
            format!("lai_{}_attr_t", lower),
            self.attrs
                .iter()
                .map(|m| EnumValue::new(m.attr_id as i32, m.name.clone(), m.short_name.clone()))
                .collect(),
        );
        if self.attr_ids_are_flags {
            attr_enum = attr_enum.with_flags();
        }
        let stat_enum = EnumMetadata::new(
            format!("lai_{}_stat_t", lower),
            self.stats
                .iter()
                .map(|m| EnumValue::new(m.stat_id as i32, m.name.clone(), m.kebab_name.clone()))
                .collect(),
        );

        let attrs_dense = self
            .attrs
            .iter()
            .enumerate()
            .all(|(idx, m)| m.attr_id as usize == idx);
        let stats_dense = self
            .stats
            .iter()
            .enumerate()
            .all(|(idx, m)| m.stat_id as usize == idx);

        ObjectTypeInfo {
            object_type: self.object_type,
            attr_enum: Arc::new(attr_enum),
            stat_enum: Arc::new(stat_enum),
            is_object_id: self.is_object_id,
            attrs: self.attrs.into_iter().map(Arc::new).collect(),
            stats: self.stats.into_iter().map(Arc::new).collect(),
            attrs_dense,
            stats_dense,
        }
    }
}
