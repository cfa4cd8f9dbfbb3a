//! Decision gateway port
//!
//! The decision model drives the turn loop: given the conversation so far
//! and the tools on offer, it either answers in plain text (ending the
//! turn) or requests tool calls. A second, narrower port — the structured
//! judge — returns a typed verdict for gated arguments.

use async_trait::async_trait;
use thiserror::Error;

use trik_agent_domain::{Conversation, ToolCall, ToolDescriptor, Verdict};

#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("invalid response from model: {0}")]
    InvalidResponse(String),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("{0}")]
    Other(String),
}

/// One answer from the decision model.
#[derive(Debug, Clone, Default)]
pub struct Decision {
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
}

impl Decision {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_calls: Vec::new(),
        }
    }

    pub fn with_calls(text: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            text: text.into(),
            tool_calls,
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Asks the decision model for the next step of a turn.
#[async_trait]
pub trait DecisionGateway: Send + Sync {
    async fn decide(
        &self,
        conversation: &Conversation,
        tools: &[ToolDescriptor],
    ) -> Result<Decision, DecisionError>;
}

/// Returns a typed verdict for a gated tool argument.
#[async_trait]
pub trait StructuredJudge: Send + Sync {
    async fn judge(&self, argument_value: &str) -> Result<Verdict, DecisionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_from_text_has_no_calls() {
        let decision = Decision::from_text("All done.");
        assert!(!decision.has_tool_calls());
        assert_eq!(decision.text, "All done.");
    }

    #[test]
    fn test_decision_with_calls() {
        let decision =
            Decision::with_calls("", vec![ToolCall::new("call-1", "find_order")]);
        assert!(decision.has_tool_calls());
    }

    #[test]
    fn test_error_display() {
        let err = DecisionError::RequestFailed {
            status: 401,
            message: "invalid api key".to_string(),
        };
        assert!(err.to_string().contains("401"));
    }
}
