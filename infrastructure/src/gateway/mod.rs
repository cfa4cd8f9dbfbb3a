//! Trik gateway client
//!
//! Talks to the remote tool-execution gateway over its REST API:
//! health probe, tool manifest, execution, and passthrough content
//! retrieval.

pub mod client;
pub mod error;
pub mod protocol;

pub use client::TrikClient;
pub use error::TrikError;
