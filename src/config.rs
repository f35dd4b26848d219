//! Driver Configuration
//!
//! Identifiers and gating choices the host supplies at construction time.
//! The host hands configuration over as JSON; there are no environment
//! variables or files owned by the driver.

use crate::domain::entities::{
    DriverRegistration, AGENT_TYPE_LOADBALANCERV2, DEVICE_OWNER_F5LBAASV2, VNIC_F5_APPLIANCE,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// How ports are gated before any segment is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortGating {
    /// Trust the host's agent-type / VNIC-type dispatch only.
    #[default]
    AgentType,
    /// Additionally require the port to be owned by the managed device owner.
    DeviceOwner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub agent_type: String,
    pub vnic_types: Vec<String>,
    pub managed_device_owner: String,
    pub port_gating: PortGating,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            agent_type: AGENT_TYPE_LOADBALANCERV2.to_string(),
            vnic_types: vec![VNIC_F5_APPLIANCE.to_string()],
            managed_device_owner: DEVICE_OWNER_F5LBAASV2.to_string(),
            port_gating: PortGating::AgentType,
        }
    }
}

impl DriverConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        Ok(config)
    }

    /// Set the agent type.
    pub fn agent_type(mut self, agent_type: impl Into<String>) -> Self {
        self.agent_type = agent_type.into();
        self
    }

    /// Set the supported VNIC types.
    pub fn vnic_types(mut self, vnic_types: Vec<String>) -> Self {
        self.vnic_types = vnic_types;
        self
    }

    /// Set the device owner used by device-owner gating.
    pub fn managed_device_owner(mut self, owner: impl Into<String>) -> Self {
        self.managed_device_owner = owner.into();
        self
    }

    /// Set the port gating mode.
    pub fn port_gating(mut self, gating: PortGating) -> Self {
        self.port_gating = gating;
        self
    }

    /// The registration pair handed to the host.
    pub fn registration(&self) -> DriverRegistration {
        DriverRegistration {
            agent_type: self.agent_type.clone(),
            vnic_types: self.vnic_types.clone(),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent_type.trim().is_empty() {
            return Err(ConfigError::MissingAgentType);
        }
        if self.vnic_types.is_empty() {
            return Err(ConfigError::MissingVnicTypes);
        }
        if self.vnic_types.iter().any(|v| v.trim().is_empty()) {
            return Err(ConfigError::EmptyVnicType);
        }
        if self.port_gating == PortGating::DeviceOwner && self.managed_device_owner.is_empty() {
            return Err(ConfigError::MissingDeviceOwner);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("agent_type is required")]
    MissingAgentType,
    #[error("at least one vnic type is required")]
    MissingVnicTypes,
    #[error("vnic types must not be empty strings")]
    EmptyVnicType,
    #[error("managed_device_owner is required for device_owner gating")]
    MissingDeviceOwner,
    #[error("invalid driver config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load and validate the driver configuration handed over by the host.
///
/// `None` yields the defaults.
pub fn load_config(raw: Option<&str>) -> anyhow::Result<DriverConfig> {
    let config = match raw {
        Some(raw) => DriverConfig::from_json(raw).context("parsing driver config")?,
        None => DriverConfig::default(),
    };
    config.validate().context("validating driver config")?;
    Ok(config)
}
