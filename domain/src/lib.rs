//! Domain layer for trik-agent
//!
//! This crate contains the core entities and value objects of the tool-use
//! orchestrator. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! An append-only sequence of turns shared between the user, the assistant,
//! and tool executions. Every tool call emitted by an assistant turn must be
//! matched by exactly one tool-result turn before a cycle is considered
//! stable.
//!
//! ## Tools
//!
//! Tools come from two provenances: local (in-process functions) and remote
//! (actions hosted on a trik gateway, addressed as `trikId:actionName`).
//! Both are described uniformly by [`ToolDescriptor`] and merged into one
//! [`ToolSet`].
//!
//! ## Passthrough
//!
//! Remote executions may deliver content out-of-band: the model sees only a
//! short acknowledgment while the full payload travels through the
//! [`PassthroughSlot`] to the presentation layer.

pub mod conversation;
pub mod passthrough;
pub mod prompt;
pub mod tool;
pub mod validation;

// Re-export commonly used types
pub use conversation::entities::{Conversation, Turn};
pub use passthrough::{PassthroughContent, PassthroughSlot};
pub use prompt::GatePromptTemplate;
pub use tool::{
    entities::{Provenance, ToolCall, ToolDescriptor, ToolParameter, ToolSet},
    provider::{ProviderError, ToolProvider},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::ExecutionResult,
};
pub use validation::{GatePolicy, Verdict};
