//! Error types for segment binding

use crate::domain::value_objects::NetworkType;
use thiserror::Error;

/// Errors surfaced to the host while evaluating a binding.
///
/// A missing agent is not an error; it is logged and answered with `false`.
/// These variants are contract violations by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("segment {segment_id} of type {network_type} has no physical_network")]
    MissingPhysicalNetwork {
        segment_id: String,
        network_type: NetworkType,
    },
}
