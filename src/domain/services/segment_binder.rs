//! Segment Binder Service
//!
//! Pure domain logic deciding whether a BIG-IP agent can serve a segment.
//! The only side effect is the host's `set_binding` callback on acceptance.

use crate::domain::entities::{AgentConfigurations, AgentRecord, BindingRecord, Segment};
use crate::domain::errors::BindError;
use crate::domain::ports::BindingContext;
use std::fmt;

/// A rule in the binding policy.
///
/// Rules are evaluated in [`POLICY`] order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindRule {
    /// The segment's network type is one of the agent's tunnel types.
    TunnelType,
    /// Flat/vlan segment whose physical network is in the agent's bridge mappings.
    BridgeMapping,
    /// Flat/vlan segment whose physical network is the agent's HPB physical network.
    HierarchicalPortBinding,
}

/// Binding policy, highest precedence first.
pub const POLICY: [BindRule; 3] = [
    BindRule::TunnelType,
    BindRule::BridgeMapping,
    BindRule::HierarchicalPortBinding,
];

impl BindRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TunnelType => "tunnel_type",
            Self::BridgeMapping => "bridge_mapping",
            Self::HierarchicalPortBinding => "hpb_physical_network",
        }
    }

    fn matches(&self, segment: &Segment, config: &AgentConfigurations) -> Result<bool, BindError> {
        match self {
            Self::TunnelType => Ok(config.tunnel_types.contains(&segment.network_type)),
            Self::BridgeMapping => match physical_network(segment)? {
                Some(physnet) => Ok(config.bridge_mappings.contains_key(physnet)),
                None => Ok(false),
            },
            Self::HierarchicalPortBinding => match physical_network(segment)? {
                Some(physnet) => Ok(config.hpb_physical_network.as_deref() == Some(physnet)),
                None => Ok(false),
            },
        }
    }
}

impl fmt::Display for BindRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Physical network of a flat/vlan segment, `None` for other types.
fn physical_network(segment: &Segment) -> Result<Option<&str>, BindError> {
    if !segment.network_type.is_physical() {
        return Ok(None);
    }
    segment
        .physical_network
        .as_deref()
        .map(Some)
        .ok_or_else(|| BindError::MissingPhysicalNetwork {
            segment_id: segment.id.clone(),
            network_type: segment.network_type.clone(),
        })
}

/// Segment binder service.
///
/// Stateless: every call is decided from its arguments alone, so two
/// identical calls register two bindings.
pub struct SegmentBinder;

impl SegmentBinder {
    /// Find the first policy rule that lets `agent` serve `segment`.
    ///
    /// Has no side effects. Returns `Ok(None)` when no rule matches.
    pub fn matching_rule(
        segment: &Segment,
        agent: &AgentRecord,
    ) -> Result<Option<BindRule>, BindError> {
        for rule in POLICY {
            if rule.matches(segment, &agent.configurations)? {
                return Ok(Some(rule));
            }
        }
        Ok(None)
    }

    /// Decide whether `agent` can serve `segment` and register the binding if so.
    ///
    /// An absent or empty agent is answered with `Ok(false)` after a warning.
    /// A flat/vlan segment without a physical network that reaches the
    /// bridge-mapping rule is a caller error and is returned as `Err`.
    ///
    /// # Example
    /// ```ignore
    /// let bound = SegmentBinder::evaluate_binding(&mut context, &segment, Some(&agent))?;
    /// ```
    pub fn evaluate_binding<C>(
        context: &mut C,
        segment: &Segment,
        agent: Option<&AgentRecord>,
    ) -> Result<bool, BindError>
    where
        C: BindingContext + ?Sized,
    {
        let agent = match agent {
            Some(agent) if !agent.is_empty() => agent,
            _ => {
                tracing::warn!(
                    "refusing to bind segment {} ({}) without an agent",
                    segment.id,
                    segment.network_type
                );
                return Ok(false);
            }
        };

        match Self::matching_rule(segment, agent)? {
            Some(rule) => {
                tracing::debug!(
                    "segment {} ({}) bindable by agent on {} via {}",
                    segment.id,
                    segment.network_type,
                    agent.host,
                    rule
                );
                let record = BindingRecord::other(&segment.id);
                context.set_binding(&record.segment_id, record.vif_type, record.vif_details);
                tracing::info!("bound segment {} with vif_type {}", segment.id, record.vif_type);
                Ok(true)
            }
            None => {
                tracing::debug!(
                    "segment {} ({}) not bindable by agent on {}",
                    segment.id,
                    segment.network_type,
                    agent.host
                );
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::adapters::outbound::InMemoryBindingContext;
    use crate::domain::entities::Port;
    use crate::domain::value_objects::{NetworkType, VifType};
    use std::collections::BTreeMap;
    use tracing_test::traced_test;

    // ===== Test Helpers =====

    fn context() -> InMemoryBindingContext {
        InMemoryBindingContext::new(Port::new("port-1", "network:f5lbaasv2"))
    }

    fn agent(
        tunnel_types: &[NetworkType],
        bridge_mappings: &[(&str, &str)],
        hpb: Option<&str>,
    ) -> AgentRecord {
        AgentRecord::with_configurations(AgentConfigurations {
            tunnel_types: tunnel_types.to_vec(),
            bridge_mappings: bridge_mappings
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            hpb_physical_network: hpb.map(str::to_string),
        })
    }

    fn vlan(id: &str, physnet: &str) -> Segment {
        Segment::new(id, NetworkType::Vlan).physical_network(physnet)
    }

    // ===== Tunnel Rule Tests =====

    #[test]
    fn test_tunnel_type_binds() {
        let mut ctx = context();
        let seg = Segment::new("seg1", NetworkType::Vxlan);
        let agent = agent(&[NetworkType::Vxlan, NetworkType::Gre], &[], None);

        let bound = SegmentBinder::evaluate_binding(&mut ctx, &seg, Some(&agent)).unwrap();

        assert!(bound);
        assert_eq!(ctx.bindings().len(), 1);
        assert_eq!(ctx.bindings()[0].segment_id, "seg1");
        assert_eq!(ctx.bindings()[0].vif_type, VifType::Other);
        assert!(ctx.bindings()[0].vif_details.is_empty());
    }

    #[test]
    fn test_tunnel_type_not_advertised() {
        let mut ctx = context();
        let seg = Segment::new("seg1", NetworkType::Geneve);
        let agent = agent(&[NetworkType::Vxlan], &[], None);

        let bound = SegmentBinder::evaluate_binding(&mut ctx, &seg, Some(&agent)).unwrap();

        assert!(!bound);
        assert_eq!(ctx.binding_count(), 0);
    }

    #[test]
    fn test_vlan_is_not_implicitly_a_tunnel_type() {
        let mut ctx = context();
        let seg = vlan("seg1", "physnet1");
        let agent = agent(&[NetworkType::Vxlan], &[], None);

        let bound = SegmentBinder::evaluate_binding(&mut ctx, &seg, Some(&agent)).unwrap();

        assert!(!bound);
        assert_eq!(ctx.binding_count(), 0);
    }

    #[test]
    fn test_tunnel_rule_takes_precedence() {
        let seg = vlan("seg1", "physnet1");
        let agent = agent(&[NetworkType::Vlan], &[("physnet1", "eth1")], Some("physnet1"));

        let rule = SegmentBinder::matching_rule(&seg, &agent).unwrap();
        assert_eq!(rule, Some(BindRule::TunnelType));
    }

    #[test]
    fn test_tunnel_rule_short_circuits_missing_physnet() {
        let mut ctx = context();
        let seg = Segment::new("seg1", NetworkType::Flat);
        let agent = agent(&[NetworkType::Flat], &[], None);

        let bound = SegmentBinder::evaluate_binding(&mut ctx, &seg, Some(&agent)).unwrap();
        assert!(bound);
    }

    // ===== Bridge Mapping Rule Tests =====

    #[test]
    fn test_bridge_mapping_binds_vlan() {
        let mut ctx = context();
        let seg = vlan("seg1", "physnet1");
        let agent = agent(&[], &[("physnet1", "eth1")], None);

        assert_eq!(
            SegmentBinder::matching_rule(&seg, &agent).unwrap(),
            Some(BindRule::BridgeMapping)
        );
        assert!(SegmentBinder::evaluate_binding(&mut ctx, &seg, Some(&agent)).unwrap());
        assert_eq!(ctx.binding_count(), 1);
    }

    #[test]
    fn test_bridge_mapping_binds_flat() {
        let mut ctx = context();
        let seg = Segment::new("seg1", NetworkType::Flat).physical_network("external");
        let agent = agent(&[], &[("external", "eth2")], None);

        assert!(SegmentBinder::evaluate_binding(&mut ctx, &seg, Some(&agent)).unwrap());
    }

    #[test]
    fn test_bridge_mapping_ignored_for_tunnel_segments() {
        let mut ctx = context();
        let seg = Segment::new("seg1", NetworkType::Vxlan).physical_network("physnet1");
        let agent = agent(&[], &[("physnet1", "eth1")], Some("physnet1"));

        assert!(!SegmentBinder::evaluate_binding(&mut ctx, &seg, Some(&agent)).unwrap());
        assert_eq!(ctx.binding_count(), 0);
    }

    // ===== HPB Rule Tests =====

    #[test]
    fn test_hpb_fallback_binds() {
        let mut ctx = context();
        let seg = vlan("seg2", "physnet1");
        let agent = agent(&[], &[("physnet2", "eth1")], Some("physnet1"));

        assert_eq!(
            SegmentBinder::matching_rule(&seg, &agent).unwrap(),
            Some(BindRule::HierarchicalPortBinding)
        );
        assert!(SegmentBinder::evaluate_binding(&mut ctx, &seg, Some(&agent)).unwrap());
        assert_eq!(ctx.bindings()[0].segment_id, "seg2");
    }

    #[test]
    fn test_hpb_mismatch_does_not_bind() {
        let mut ctx = context();
        let seg = vlan("seg3", "physnet9");
        let agent = agent(&[], &[], Some("physnet1"));

        assert!(!SegmentBinder::evaluate_binding(&mut ctx, &seg, Some(&agent)).unwrap());
        assert_eq!(ctx.binding_count(), 0);
    }

    #[test]
    fn test_bridge_mapping_wins_over_hpb() {
        let seg = vlan("seg1", "physnet1");
        let agent = agent(&[], &[("physnet1", "eth1")], Some("physnet1"));

        assert_eq!(
            SegmentBinder::matching_rule(&seg, &agent).unwrap(),
            Some(BindRule::BridgeMapping)
        );
    }

    // ===== Missing Agent Tests =====

    #[traced_test]
    #[test]
    fn test_missing_agent_warns_and_refuses() {
        let mut ctx = context();
        let seg = Segment::new("seg1", NetworkType::Vxlan);

        let bound = SegmentBinder::evaluate_binding(&mut ctx, &seg, None).unwrap();

        assert!(!bound);
        assert_eq!(ctx.binding_count(), 0);
        assert!(logs_contain("without an agent"));
    }

    #[traced_test]
    #[test]
    fn test_empty_agent_treated_as_missing() {
        let mut ctx = context();
        let seg = vlan("seg1", "physnet1");
        let empty = AgentRecord::default();

        let bound = SegmentBinder::evaluate_binding(&mut ctx, &seg, Some(&empty)).unwrap();

        assert!(!bound);
        assert_eq!(ctx.binding_count(), 0);
        assert!(logs_contain("without an agent"));
    }

    #[test]
    fn test_missing_agent_skips_physnet_lookup() {
        let mut ctx = context();
        let seg = Segment::new("seg1", NetworkType::Vlan);

        assert_eq!(SegmentBinder::evaluate_binding(&mut ctx, &seg, None), Ok(false));
    }

    // ===== Malformed Segment Tests =====

    #[test]
    fn test_vlan_without_physnet_is_an_error() {
        let mut ctx = context();
        let seg = Segment::new("seg1", NetworkType::Vlan);
        let agent = agent(&[NetworkType::Vxlan], &[("physnet1", "eth1")], None);

        let result = SegmentBinder::evaluate_binding(&mut ctx, &seg, Some(&agent));

        assert!(matches!(
            result,
            Err(BindError::MissingPhysicalNetwork { ref segment_id, .. }) if segment_id == "seg1"
        ));
        assert_eq!(ctx.binding_count(), 0);
    }

    #[test]
    fn test_missing_physnet_error_message() {
        let err = BindError::MissingPhysicalNetwork {
            segment_id: "seg1".to_string(),
            network_type: NetworkType::Flat,
        };
        assert_eq!(err.to_string(), "segment seg1 of type flat has no physical_network");
    }

    // ===== Statelessness Tests =====

    #[test]
    fn test_repeated_calls_register_each_time() {
        let mut ctx = context();
        let seg = Segment::new("seg1", NetworkType::Gre);
        let agent = agent(&[NetworkType::Gre], &[], None);

        assert!(SegmentBinder::evaluate_binding(&mut ctx, &seg, Some(&agent)).unwrap());
        assert!(SegmentBinder::evaluate_binding(&mut ctx, &seg, Some(&agent)).unwrap());

        assert_eq!(ctx.binding_count(), 2);
        assert_eq!(ctx.bindings()[0], ctx.bindings()[1]);
    }

    #[test]
    fn test_policy_order() {
        assert_eq!(
            POLICY,
            [
                BindRule::TunnelType,
                BindRule::BridgeMapping,
                BindRule::HierarchicalPortBinding
            ]
        );
        assert_eq!(BindRule::HierarchicalPortBinding.to_string(), "hpb_physical_network");
    }
}
