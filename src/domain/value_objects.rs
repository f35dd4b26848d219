//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Network type of a segment as reported by the host.
///
/// Tunnel types (vxlan, gre, geneve) are terminated by the appliance itself.
/// Flat and vlan segments are bound through a physical network name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NetworkType {
    Flat,
    Vlan,
    Vxlan,
    Gre,
    Geneve,
    Local,
    /// Any type the host knows about that this driver has no name for.
    Other(String),
}

impl NetworkType {
    /// Parse a network type from the host's string form.
    ///
    /// # Examples
    /// ```
    /// use f5_ml2_driver::NetworkType;
    ///
    /// assert_eq!(NetworkType::parse("vlan"), NetworkType::Vlan);
    /// assert_eq!(NetworkType::parse("opflex"), NetworkType::Other("opflex".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "flat" => Self::Flat,
            "vlan" => Self::Vlan,
            "vxlan" => Self::Vxlan,
            "gre" => Self::Gre,
            "geneve" => Self::Geneve,
            "local" => Self::Local,
            other => Self::Other(other.to_string()),
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Flat => "flat",
            Self::Vlan => "vlan",
            Self::Vxlan => "vxlan",
            Self::Gre => "gre",
            Self::Geneve => "geneve",
            Self::Local => "local",
            Self::Other(s) => s.as_str(),
        }
    }

    /// True for the types carried over a named physical network (flat, vlan).
    pub fn is_physical(&self) -> bool {
        matches!(self, Self::Flat | Self::Vlan)
    }
}

impl From<String> for NetworkType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<NetworkType> for String {
    fn from(t: NetworkType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// VIF type recorded with a binding.
///
/// The appliance is not a hypervisor VIF, so only `other` is ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VifType {
    Other,
}

impl VifType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Other => "other",
        }
    }
}

impl fmt::Display for VifType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
