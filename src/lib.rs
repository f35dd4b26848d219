//! F5 Networks ML2 Driver Library
//!
//! Decides, per network segment, whether a BIG-IP appliance agent can bind
//! a port, and reports accepted segments to the network-plugin host through
//! its binding context.
//!
//! The crate is laid out hexagonally: `domain` holds the entities, the
//! host-facing [`BindingContext`] port and the pure binding policy;
//! `application` wraps it into the mechanism driver the host calls; and
//! `adapters` provides an in-memory binding context.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use adapters::outbound::{BindingRequest, InMemoryBindingContext};
pub use application::F5MechanismDriver;
pub use config::{load_config, ConfigError, DriverConfig, PortGating};
pub use domain::entities::{
    AgentConfigurations, AgentRecord, BindingRecord, DriverRegistration, Port, Segment,
    AGENT_TYPE_LOADBALANCERV2, DEVICE_OWNER_F5LBAASV2, VNIC_F5_APPLIANCE,
};
pub use domain::errors::BindError;
pub use domain::ports::BindingContext;
pub use domain::services::{
    is_f5_appliance_vnic, is_managed_port, is_managed_port_for, BindRule, SegmentBinder, POLICY,
};
pub use domain::value_objects::{NetworkType, VifType};
