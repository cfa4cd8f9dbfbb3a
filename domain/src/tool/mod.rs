//! Tool domain module
//!
//! Contains tool entities (descriptors, calls, the merged tool set), the
//! provider abstraction, validation traits, and execution result value
//! objects.

pub mod entities;
pub mod provider;
pub mod traits;
pub mod value_objects;

pub use entities::{Provenance, ToolCall, ToolDescriptor, ToolParameter, ToolSet};
pub use provider::{ProviderError, ToolProvider};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::ExecutionResult;
