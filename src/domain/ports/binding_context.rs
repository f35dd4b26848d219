//! Binding Context Port
//!
//! Defines the interface the host exposes for one port-binding attempt.

use crate::domain::entities::{AgentRecord, Port, Segment};
use crate::domain::value_objects::VifType;
use serde_json::{Map, Value};

/// Host-side context for binding a single port.
///
/// The host owns persistence of bindings. The driver only reads the port,
/// segments and agents, and reports accepted segments through
/// [`BindingContext::set_binding`].
pub trait BindingContext {
    /// The port currently being bound.
    fn current_port(&self) -> &Port;

    /// Segments the host wants bound, in the host's preference order.
    fn segments_to_bind(&self) -> &[Segment];

    /// Agents of `agent_type` running on the port's host.
    ///
    /// Returns an empty list when the host knows of none.
    fn host_agents(&self, agent_type: &str) -> Vec<AgentRecord>;

    /// Record a binding of `segment_id`.
    ///
    /// Called at most once per accepted segment per evaluation.
    fn set_binding(&mut self, segment_id: &str, vif_type: VifType, vif_details: Map<String, Value>);
}
