// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Object type enumerants.

use std::fmt;
use std::str::FromStr;

const PREFIX: &str = "LAI_OBJECT_TYPE_";

/// Category of hardware or logical entity an attribute belongs to.
///
/// `Null` and `Max` bound the valid range and never name a real type.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectType {
    Null = 0,
    Linecard = 1,
    Port = 2,
    Transceiver = 3,
    LogicalChannel = 4,
    Otn = 5,
    Ethernet = 6,
    PhysicalChannel = 7,
    Och = 8,
    Lldp = 9,
    Assignment = 10,
    Interface = 11,
    Oa = 12,
    Osc = 13,
    Aps = 14,
    ApsPort = 15,
    Attenuator = 16,
    Wss = 17,
    MediaChannel = 18,
    Ocm = 19,
    Otdr = 20,
    Max = 21,
}

impl ObjectType {
    /// Every enumerant in numeric order, `Null` and `Max` included.
    pub const ALL: [ObjectType; 22] = [
        Self::Null,
        Self::Linecard,
        Self::Port,
        Self::Transceiver,
        Self::LogicalChannel,
        Self::Otn,
        Self::Ethernet,
        Self::PhysicalChannel,
        Self::Och,
        Self::Lldp,
        Self::Assignment,
        Self::Interface,
        Self::Oa,
        Self::Osc,
        Self::Aps,
        Self::ApsPort,
        Self::Attenuator,
        Self::Wss,
        Self::MediaChannel,
        Self::Ocm,
        Self::Otdr,
        Self::Max,
    ];

    /// Convert a raw ABI value.
    pub fn from_raw(raw: i32) -> Option<Self> {
        usize::try_from(raw)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Raw ABI value.
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Short upper-case name (`PORT`).
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Linecard => "LINECARD",
            Self::Port => "PORT",
            Self::Transceiver => "TRANSCEIVER",
            Self::LogicalChannel => "LOGICALCHANNEL",
            Self::Otn => "OTN",
            Self::Ethernet => "ETHERNET",
            Self::PhysicalChannel => "PHYSICALCHANNEL",
            Self::Och => "OCH",
            Self::Lldp => "LLDP",
            Self::Assignment => "ASSIGNMENT",
            Self::Interface => "INTERFACE",
            Self::Oa => "OA",
            Self::Osc => "OSC",
            Self::Aps => "APS",
            Self::ApsPort => "APSPORT",
            Self::Attenuator => "ATTENUATOR",
            Self::Wss => "WSS",
            Self::MediaChannel => "MEDIACHANNEL",
            Self::Ocm => "OCM",
            Self::Otdr => "OTDR",
            Self::Max => "MAX",
        }
    }

    /// Full ABI name (`LAI_OBJECT_TYPE_PORT`).
    pub fn name(self) -> String {
        format!("{}{}", PREFIX, self.short_name())
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PREFIX, self.short_name())
    }
}

/// Error returned when a string names no object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownObjectType(pub String);

impl fmt::Display for UnknownObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown object type: {}", self.0)
    }
}

impl std::error::Error for UnknownObjectType {}

impl FromStr for ObjectType {
    type Err = UnknownObjectType;

    /// Accepts `LAI_OBJECT_TYPE_PORT`, `PORT` or `port`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let short = upper.strip_prefix(PREFIX).unwrap_or(&upper);
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.short_name() == short)
            .ok_or_else(|| UnknownObjectType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_roundtrip() {
        for t in ObjectType::ALL {
            assert_eq!(ObjectType::from_raw(t.as_raw()), Some(t));
        }
        assert_eq!(ObjectType::from_raw(-1), None);
        assert_eq!(ObjectType::from_raw(22), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("LAI_OBJECT_TYPE_OA".parse::<ObjectType>(), Ok(ObjectType::Oa));
        assert_eq!("apsport".parse::<ObjectType>(), Ok(ObjectType::ApsPort));
        assert!("LAI_OBJECT_TYPE_SWITCH".parse::<ObjectType>().is_err());
        assert_eq!(ObjectType::Port.to_string(), "LAI_OBJECT_TYPE_PORT");
        assert_eq!(ObjectType::Port.name(), "LAI_OBJECT_TYPE_PORT");
    }
}
