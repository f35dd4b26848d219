//! Port gating predicates.
//!
//! Independent checks a host (or the mechanism driver) can compose to decide
//! whether a port is one the appliance is responsible for.

use crate::domain::entities::{Port, DEVICE_OWNER_F5LBAASV2, VNIC_F5_APPLIANCE};

/// True when the port is owned by the F5 LBaaSv2 service.
pub fn is_managed_port(port: &Port) -> bool {
    is_managed_port_for(port, DEVICE_OWNER_F5LBAASV2)
}

/// True when the port's device owner is exactly `device_owner`.
pub fn is_managed_port_for(port: &Port, device_owner: &str) -> bool {
    port.device_owner == device_owner
}

/// True when `vnic_type` is the BIG-IP appliance VNIC type.
pub fn is_f5_appliance_vnic(vnic_type: &str) -> bool {
    vnic_type == VNIC_F5_APPLIANCE
}
