// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value-type tags for attributes and statistics.

use std::fmt;
use std::str::FromStr;

/// Declares a tag enum with its canonical catalog spelling.
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            /// Canonical catalog spelling.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let upper = s.trim().to_ascii_uppercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == upper)
                    .ok_or_else(|| format!("unknown {}: {}", stringify!($name), s))
            }
        }
    };
}

tag_enum! {
    /// Attribute value-type tag, the only source of truth for which
    /// [`AttributeValue`](super::AttributeValue) variant is active.
    AttrValueType {
        Unspecified => "UNSPECIFIED",
        Bool => "BOOL",
        Chardata => "CHARDATA",
        U8 => "UINT8",
        I8 => "INT8",
        U16 => "UINT16",
        I16 => "INT16",
        U32 => "UINT32",
        I32 => "INT32",
        U64 => "UINT64",
        I64 => "INT64",
        Double => "DOUBLE",
        Pointer => "POINTER",
        ObjectId => "OBJECT_ID",
        ObjectList => "OBJECT_LIST",
        U8List => "UINT8_LIST",
        I8List => "INT8_LIST",
        U16List => "UINT16_LIST",
        I16List => "INT16_LIST",
        U32List => "UINT32_LIST",
        I32List => "INT32_LIST",
        U32Range => "UINT32_RANGE",
        I32Range => "INT32_RANGE",
        SpectrumPowerList => "SPECTRUM_POWER_LIST",
    }
}

impl AttrValueType {
    /// Bool or fixed-width integer: the only tags a condition may compare.
    pub fn is_condition_comparable(self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::U8
                | Self::I8
                | Self::U16
                | Self::I16
                | Self::U32
                | Self::I32
                | Self::U64
                | Self::I64
        )
    }

    pub fn is_list(self) -> bool {
        matches!(
            self,
            Self::ObjectList
                | Self::U8List
                | Self::I8List
                | Self::U16List
                | Self::I16List
                | Self::U32List
                | Self::I32List
                | Self::SpectrumPowerList
        )
    }

    /// Tags whose text form is not a bare JSON token.
    pub fn is_string_like(self) -> bool {
        matches!(self, Self::Chardata | Self::Pointer | Self::ObjectId)
    }

    /// Whether attributes of this tag reference other objects.
    pub fn is_object_reference(self) -> bool {
        matches!(self, Self::ObjectId | Self::ObjectList)
    }
}

tag_enum! {
    /// Statistic value-type tag.
    StatValueType {
        I32 => "INT32",
        U32 => "UINT32",
        I64 => "INT64",
        U64 => "UINT64",
        Double => "DOUBLE",
    }
}

tag_enum! {
    /// Unit a statistic is reported in.
    StatValueUnit {
        Normal => "NORMAL",
        Dbm => "DBM",
        Db => "DB",
    }
}

tag_enum! {
    /// Declared decimal precision of a statistic.
    StatValuePrecision {
        P0 => "PRECISION0",
        P1 => "PRECISION1",
        P2 => "PRECISION2",
        P18 => "PRECISION18",
    }
}

impl StatValuePrecision {
    /// Number of fractional digits.
    pub fn digits(self) -> usize {
        match self {
            Self::P0 => 0,
            Self::P1 => 1,
            Self::P2 => 2,
            Self::P18 => 18,
        }
    }
}
