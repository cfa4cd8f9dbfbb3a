//! Tool domain traits

use super::entities::{ToolCall, ToolDescriptor};

/// Validates a tool call against its descriptor before dispatch.
pub trait ToolValidator: Send + Sync {
    /// Returns `Err` with a human-readable message when the call is
    /// malformed. The message is folded into the conversation as a
    /// failure result so the model can self-correct.
    fn validate(&self, descriptor: &ToolDescriptor, call: &ToolCall) -> Result<(), String>;
}

/// Default validation: every required parameter must be present and
/// non-null. Type checking is left to the tool itself.
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, descriptor: &ToolDescriptor, call: &ToolCall) -> Result<(), String> {
        for name in descriptor.required_parameters() {
            match call.arguments.get(name) {
                Some(value) if !value.is_null() => {}
                _ => {
                    return Err(format!(
                        "missing required parameter '{}' for tool '{}'",
                        name, descriptor.name
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolParameter;
    use serde_json::json;

    fn refund_descriptor() -> ToolDescriptor {
        ToolDescriptor::local("request_refund", "Process a refund")
            .with_parameter(ToolParameter::new("reason", "Why the refund is requested", true))
            .with_parameter(ToolParameter::new("order_id", "Order identifier", false))
    }

    #[test]
    fn test_accepts_call_with_required_params() {
        let call = ToolCall::new("c1", "request_refund").with_arg("reason", json!("arrived broken"));
        assert!(DefaultToolValidator.validate(&refund_descriptor(), &call).is_ok());
    }

    #[test]
    fn test_rejects_missing_required_param() {
        let call = ToolCall::new("c1", "request_refund");
        let err = DefaultToolValidator
            .validate(&refund_descriptor(), &call)
            .unwrap_err();
        assert!(err.contains("reason"));
        assert!(err.contains("request_refund"));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let call = ToolCall::new("c1", "request_refund").with_arg("reason", json!(null));
        assert!(DefaultToolValidator.validate(&refund_descriptor(), &call).is_err());
    }

    #[test]
    fn test_optional_param_may_be_absent() {
        let call = ToolCall::new("c1", "request_refund").with_arg("reason", json!("late delivery"));
        assert!(DefaultToolValidator.validate(&refund_descriptor(), &call).is_ok());
    }
}
