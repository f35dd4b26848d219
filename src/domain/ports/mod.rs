mod binding_context;

pub use binding_context::BindingContext;
