//! Tool domain value objects — immutable execution results
//!
//! Every tool invocation produces an [`ExecutionResult`]. Failures are
//! data, not errors: a remote-reported failure folds into the conversation
//! as `"Error: <message>"` so the decision loop can recover, and passthrough
//! results carry only a content reference — the payload itself travels
//! through the passthrough slot, never through the model's context.

use serde::{Deserialize, Serialize};

/// Result of a single tool execution.
///
/// Produced by providers (and, for remote tools, by the gateway client per
/// invocation); never persisted beyond the turn it is folded into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionResult {
    /// Rendered text the decision model may see in full
    Success(String),
    /// Out-of-band content reference; resolved by the gateway client
    Passthrough {
        content_ref: String,
        content_type: String,
    },
    /// Execution failed; the message is folded into the conversation
    Failure(String),
}

impl ExecutionResult {
    pub fn success(text: impl Into<String>) -> Self {
        ExecutionResult::Success(text.into())
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ExecutionResult::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, ExecutionResult::Failure(_))
    }

    /// Fold this result into tool-result turn text.
    ///
    /// An unresolved passthrough yields only the acknowledgment string; the
    /// actual content is never placed in the conversation.
    pub fn into_turn_text(self) -> String {
        match self {
            ExecutionResult::Success(text) => text,
            ExecutionResult::Passthrough { content_type, .. } => {
                format!("[{} delivered to user]", content_type)
            }
            ExecutionResult::Failure(message) => format!("Error: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_turn_text() {
        let result = ExecutionResult::success("Found order ORD123456.");
        assert!(result.is_success());
        assert_eq!(result.into_turn_text(), "Found order ORD123456.");
    }

    #[test]
    fn test_failure_turn_text() {
        let result = ExecutionResult::failure("session expired");
        assert!(!result.is_success());
        assert_eq!(result.into_turn_text(), "Error: session expired");
    }

    #[test]
    fn test_passthrough_turn_text_hides_content() {
        let result = ExecutionResult::Passthrough {
            content_ref: "ref-42".to_string(),
            content_type: "markdown".to_string(),
        };
        assert!(result.is_success());
        assert_eq!(result.into_turn_text(), "[markdown delivered to user]");
    }
}
