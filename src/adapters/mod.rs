//! Adapters Layer
//!
//! Host-side implementations of the domain ports.

pub mod outbound;
