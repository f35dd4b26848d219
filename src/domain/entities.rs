//! Domain Entities - Core binding objects
//!
//! These entities mirror the dictionaries a network-plugin host hands to a
//! mechanism driver: segments, agent records and ports. They are plain data
//! and deserialize directly from the host's JSON shapes.

use crate::domain::value_objects::{NetworkType, VifType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// VNIC type served by BIG-IP appliances.
pub const VNIC_F5_APPLIANCE: &str = "f5appliance";

/// Agent type reported by the F5 LBaaSv2 agent.
pub const AGENT_TYPE_LOADBALANCERV2: &str = "Loadbalancerv2 agent";

/// Device owner stamped on ports created by the F5 LBaaSv2 service.
pub const DEVICE_OWNER_F5LBAASV2: &str = "network:f5lbaasv2";

/// A slice of a virtual network that a port may be bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Opaque segment identifier
    pub id: String,
    /// Network type (vxlan, gre, flat, vlan, ...)
    pub network_type: NetworkType,
    /// Underlying physical network; required for flat and vlan segments
    #[serde(default)]
    pub physical_network: Option<String>,
    /// VLAN id or tunnel key, if any
    #[serde(default)]
    pub segmentation_id: Option<u32>,
}

impl Segment {
    /// Create a tunnel-style segment with no physical network.
    pub fn new(id: impl Into<String>, network_type: NetworkType) -> Self {
        Self {
            id: id.into(),
            network_type,
            physical_network: None,
            segmentation_id: None,
        }
    }

    /// Set the physical network.
    pub fn physical_network(mut self, name: impl Into<String>) -> Self {
        self.physical_network = Some(name.into());
        self
    }

    /// Set the segmentation id.
    pub fn segmentation_id(mut self, id: u32) -> Self {
        self.segmentation_id = Some(id);
        self
    }
}

/// Capabilities an agent advertises in its `configurations` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfigurations {
    /// Network types the appliance can terminate
    #[serde(default)]
    pub tunnel_types: Vec<NetworkType>,
    /// Physical network name -> local interface
    #[serde(default)]
    pub bridge_mappings: BTreeMap<String, String>,
    /// Physical network used for hierarchical port binding
    #[serde(default)]
    pub hpb_physical_network: Option<String>,
}

impl AgentConfigurations {
    pub fn is_empty(&self) -> bool {
        self.tunnel_types.is_empty()
            && self.bridge_mappings.is_empty()
            && self.hpb_physical_network.is_none()
    }
}

fn default_alive() -> bool {
    true
}

/// One running appliance-control agent as reported by the host.
///
/// The host owns these records; the driver only reads them for the
/// duration of a single binding attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    #[serde(default)]
    pub agent_type: String,
    #[serde(default)]
    pub host: String,
    /// Liveness as judged by the host; the driver never tracks it
    #[serde(default = "default_alive")]
    pub alive: bool,
    #[serde(default)]
    pub configurations: AgentConfigurations,
}

impl Default for AgentRecord {
    fn default() -> Self {
        Self {
            agent_type: String::new(),
            host: String::new(),
            alive: true,
            configurations: AgentConfigurations::default(),
        }
    }
}

impl AgentRecord {
    /// Create a live agent of the given type on a host.
    pub fn new(agent_type: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            agent_type: agent_type.into(),
            host: host.into(),
            ..Default::default()
        }
    }

    /// Create an anonymous agent carrying only configurations.
    pub fn with_configurations(configurations: AgentConfigurations) -> Self {
        Self {
            configurations,
            ..Default::default()
        }
    }

    /// An empty record carries nothing to bind with and counts as no agent.
    pub fn is_empty(&self) -> bool {
        self.agent_type.is_empty() && self.host.is_empty() && self.configurations.is_empty()
    }
}

fn default_vnic_type() -> String {
    "normal".to_string()
}

/// The port currently being bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    #[serde(default)]
    pub device_owner: String,
    #[serde(default = "default_vnic_type", alias = "binding:vnic_type")]
    pub vnic_type: String,
    #[serde(default, alias = "binding:host_id")]
    pub host: String,
}

impl Port {
    pub fn new(id: impl Into<String>, device_owner: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            device_owner: device_owner.into(),
            vnic_type: default_vnic_type(),
            host: String::new(),
        }
    }

    pub fn vnic_type(mut self, vnic_type: impl Into<String>) -> Self {
        self.vnic_type = vnic_type.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }
}

/// A binding as handed to the host's `set_binding`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingRecord {
    pub segment_id: String,
    pub vif_type: VifType,
    pub vif_details: serde_json::Map<String, serde_json::Value>,
}

impl BindingRecord {
    /// The only binding this driver ever produces: vif type `other`, no details.
    pub fn other(segment_id: impl Into<String>) -> Self {
        Self {
            segment_id: segment_id.into(),
            vif_type: VifType::Other,
            vif_details: serde_json::Map::new(),
        }
    }
}

/// Identifiers handed to the host at construction so it only dispatches
/// matching (agent, port) pairs to this driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRegistration {
    pub agent_type: String,
    pub vnic_types: Vec<String>,
}

impl Default for DriverRegistration {
    fn default() -> Self {
        Self {
            agent_type: AGENT_TYPE_LOADBALANCERV2.to_string(),
            vnic_types: vec![VNIC_F5_APPLIANCE.to_string()],
        }
    }
}
