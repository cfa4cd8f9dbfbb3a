//! Conversation aggregate — the append-only turn log

pub mod entities;

pub use entities::{Conversation, Turn};
