//! Tool providers and the merged registry

pub mod builtin;
pub mod registry;
pub mod remote;
pub mod schema;

pub use builtin::BuiltinProvider;
pub use registry::ToolRegistry;
pub use remote::TrikToolProvider;
