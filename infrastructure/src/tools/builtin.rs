//! Built-in tools
//!
//! Compiled into the binary and always available. They outrank remote
//! tools: a gateway tool with a colliding name is shadowed.

use async_trait::async_trait;
use tracing::info;

use trik_agent_domain::{
    ExecutionResult, ProviderError, ToolCall, ToolDescriptor, ToolParameter, ToolProvider,
};

pub struct BuiltinProvider;

impl BuiltinProvider {
    pub fn new() -> Self {
        Self
    }

    fn request_refund(call: &ToolCall) -> ExecutionResult {
        let order_id = match call.require_string("order_id") {
            Ok(v) => v,
            Err(e) => return ExecutionResult::failure(e),
        };
        let reason = match call.require_string("reason") {
            Ok(v) => v,
            Err(e) => return ExecutionResult::failure(e),
        };

        info!(order_id, reason, "processing refund");
        ExecutionResult::success(format!(
            "Refund request submitted for order {}. Our team will process this within 3-5 business days.",
            order_id
        ))
    }

    fn find_order(call: &ToolCall) -> ExecutionResult {
        let description = match call.require_string("description") {
            Ok(v) => v,
            Err(e) => return ExecutionResult::failure(e),
        };

        info!(description, "finding order");
        ExecutionResult::success(format!(
            "Found order with description: {}. Order ID is ORD123456.",
            description
        ))
    }
}

impl Default for BuiltinProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolProvider for BuiltinProvider {
    fn id(&self) -> &str {
        "builtin"
    }

    fn priority(&self) -> i32 {
        100
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn discover(&self) -> Result<Vec<ToolDescriptor>, ProviderError> {
        Ok(vec![
            ToolDescriptor::local(
                "request_refund",
                "Process a refund request. Use when a user wants their money back.",
            )
            .with_parameter(ToolParameter::new(
                "order_id",
                "The order ID to refund. It must start with 'ORD'",
                true,
            ))
            .with_parameter(ToolParameter::new(
                "reason",
                "A specific reason for the refund. Something that answers the question: 'Why?'",
                true,
            )),
            ToolDescriptor::local("find_order", "Finds an order based on its description.")
                .with_parameter(ToolParameter::new(
                    "description",
                    "The description of the order",
                    true,
                )),
        ])
    }

    async fn execute(&self, call: &ToolCall) -> ExecutionResult {
        match call.name.as_str() {
            "request_refund" => Self::request_refund(call),
            "find_order" => Self::find_order(call),
            other => ExecutionResult::failure(format!("unknown built-in tool '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_discover_lists_both_tools() {
        let tools = BuiltinProvider::new().discover().await.unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["request_refund", "find_order"]);
        assert!(tools.iter().all(|t| t.provenance.is_local()));
    }

    #[tokio::test]
    async fn test_find_order_returns_fixed_id() {
        let call = ToolCall::new("c1", "find_order").with_arg("description", json!("blue shoes"));
        let result = BuiltinProvider::new().execute(&call).await;
        assert_eq!(
            result.into_turn_text(),
            "Found order with description: blue shoes. Order ID is ORD123456."
        );
    }

    #[tokio::test]
    async fn test_refund_mentions_processing_window() {
        let call = ToolCall::new("c1", "request_refund")
            .with_arg("order_id", json!("ORD123456"))
            .with_arg("reason", json!("arrived damaged"));
        let result = BuiltinProvider::new().execute(&call).await;
        let text = result.into_turn_text();
        assert!(text.contains("ORD123456"));
        assert!(text.contains("3-5 business days"));
    }

    #[tokio::test]
    async fn test_missing_argument_folds_to_failure() {
        let call = ToolCall::new("c1", "request_refund").with_arg("reason", json!("broken"));
        let result = BuiltinProvider::new().execute(&call).await;
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_failure_not_panic() {
        let call = ToolCall::new("c1", "frobnicate");
        let result = BuiltinProvider::new().execute(&call).await;
        assert!(!result.is_success());
    }
}
