mod port_filter;
mod segment_binder;

pub use port_filter::{is_f5_appliance_vnic, is_managed_port, is_managed_port_for};
pub use segment_binder::{BindRule, SegmentBinder, POLICY};
