//! In-Memory Binding Context
//!
//! Implements BindingContext over owned data and records every binding the
//! driver reports, in call order.

use crate::domain::entities::{AgentRecord, BindingRecord, Port, Segment};
use crate::domain::ports::BindingContext;
use crate::domain::value_objects::VifType;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A port-binding request as a host would serialize it.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingRequest {
    pub port: Port,
    #[serde(default)]
    pub segments_to_bind: Vec<Segment>,
    #[serde(default)]
    pub agents: Vec<AgentRecord>,
}

/// Binding context backed by plain vectors.
///
/// Bindings are appended, never deduplicated, so callers can observe
/// exactly how many times `set_binding` was invoked.
#[derive(Debug, Clone)]
pub struct InMemoryBindingContext {
    port: Port,
    segments: Vec<Segment>,
    agents: Vec<AgentRecord>,
    bindings: Vec<BindingRecord>,
}

impl InMemoryBindingContext {
    /// Create a context for `port` with no segments or agents.
    pub fn new(port: Port) -> Self {
        Self {
            port,
            segments: Vec::new(),
            agents: Vec::new(),
            bindings: Vec::new(),
        }
    }

    /// Build a context from a JSON binding request.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let request: BindingRequest = serde_json::from_str(raw)?;
        Ok(Self::from(request))
    }

    /// Add a segment to bind.
    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Add an agent on the port's host.
    pub fn with_agent(mut self, agent: AgentRecord) -> Self {
        self.agents.push(agent);
        self
    }

    /// Bindings recorded so far, oldest first.
    pub fn bindings(&self) -> &[BindingRecord] {
        &self.bindings
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}

impl From<BindingRequest> for InMemoryBindingContext {
    fn from(request: BindingRequest) -> Self {
        Self {
            port: request.port,
            segments: request.segments_to_bind,
            agents: request.agents,
            bindings: Vec::new(),
        }
    }
}

impl BindingContext for InMemoryBindingContext {
    fn current_port(&self) -> &Port {
        &self.port
    }

    fn segments_to_bind(&self) -> &[Segment] {
        &self.segments
    }

    fn host_agents(&self, agent_type: &str) -> Vec<AgentRecord> {
        self.agents
            .iter()
            .filter(|a| a.agent_type == agent_type)
            .filter(|a| self.port.host.is_empty() || a.host == self.port.host)
            .cloned()
            .collect()
    }

    fn set_binding(&mut self, segment_id: &str, vif_type: VifType, vif_details: Map<String, Value>) {
        self.bindings.push(BindingRecord {
            segment_id: segment_id.to_string(),
            vif_type,
            vif_details,
        });
    }
}
