//! Domain Layer
//!
//! Binding entities, the host port, and the pure binding policy.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;
