//! F5 Mechanism Driver - host-facing use case
//!
//! Ties the registration identifiers, port gating and the segment binder
//! together into the two entry points a network-plugin host calls:
//! per-segment binding for one agent, and whole-port binding.

use crate::config::{DriverConfig, PortGating};
use crate::domain::entities::{AgentRecord, DriverRegistration, Segment};
use crate::domain::errors::BindError;
use crate::domain::ports::BindingContext;
use crate::domain::services::{is_managed_port_for, SegmentBinder};

/// Mechanism driver giving BIG-IP appliances port binding capability.
///
/// Holds only configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct F5MechanismDriver {
    config: DriverConfig,
}

impl F5MechanismDriver {
    /// Create a driver from validated configuration.
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Identifiers the host uses to route binding attempts here.
    pub fn registration(&self) -> DriverRegistration {
        self.config.registration()
    }

    pub fn initialize(&self) {
        tracing::debug!(
            "F5Networks mechanism driver initialized (agent_type={}, vnic_types={:?})",
            self.config.agent_type,
            self.config.vnic_types
        );
    }

    /// Decide whether `agent` can serve `segment`, registering the binding if so.
    pub fn try_to_bind_segment_for_agent<C>(
        &self,
        context: &mut C,
        segment: &Segment,
        agent: Option<&AgentRecord>,
    ) -> Result<bool, BindError>
    where
        C: BindingContext + ?Sized,
    {
        SegmentBinder::evaluate_binding(context, segment, agent)
    }

    /// Bind the context's port to the first segment any host agent can serve.
    ///
    /// Registers at most one binding. Ports with an unsupported VNIC type,
    /// or unmanaged ports under device-owner gating, are left untouched.
    pub fn bind_port<C>(&self, context: &mut C) -> Result<bool, BindError>
    where
        C: BindingContext + ?Sized,
    {
        let port = context.current_port();

        if !self.config.vnic_types.iter().any(|v| *v == port.vnic_type) {
            tracing::debug!(
                "port {} has vnic_type {}, not handled by this driver",
                port.id,
                port.vnic_type
            );
            return Ok(false);
        }

        if self.config.port_gating == PortGating::DeviceOwner
            && !is_managed_port_for(port, &self.config.managed_device_owner)
        {
            tracing::debug!(
                "port {} owned by {:?} is not managed, skipping",
                port.id,
                port.device_owner
            );
            return Ok(false);
        }

        let port_id = port.id.clone();
        let segments = context.segments_to_bind().to_vec();
        let agents = context.host_agents(&self.config.agent_type);

        if agents.is_empty() {
            tracing::debug!(
                "no {} agents for port {}",
                self.config.agent_type,
                port_id
            );
        }

        for agent in &agents {
            if !agent.alive {
                tracing::warn!(
                    "refusing to bind port {} to dead agent on host {}",
                    port_id,
                    agent.host
                );
                continue;
            }
            for segment in &segments {
                if SegmentBinder::evaluate_binding(context, segment, Some(agent))? {
                    tracing::debug!(
                        "bound port {} to segment {} via agent on {}",
                        port_id,
                        segment.id,
                        agent.host
                    );
                    return Ok(true);
                }
            }
        }

        tracing::debug!("no bindable segment for port {}", port_id);
        Ok(false)
    }
}
