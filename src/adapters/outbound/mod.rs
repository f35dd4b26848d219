mod in_memory_context;

pub use in_memory_context::{BindingRequest, InMemoryBindingContext};
