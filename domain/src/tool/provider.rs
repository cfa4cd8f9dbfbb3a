//! Tool provider abstraction
//!
//! A provider is a source of tools: the built-in set compiled into the
//! binary, or a remote gateway discovered at startup. Providers carry a
//! priority; when two providers offer tools with the same name, the
//! higher-priority provider wins.

use async_trait::async_trait;
use thiserror::Error;

use super::entities::{ToolCall, ToolDescriptor};
use super::value_objects::ExecutionResult;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider '{0}' is not available")]
    NotAvailable(String),

    #[error("tool discovery failed: {0}")]
    DiscoveryFailed(String),

    #[error("tool '{0}' is not served by this provider")]
    UnknownTool(String),
}

/// A source of executable tools.
///
/// Implementations must be cheap to query for availability: the registry
/// probes every provider at refresh time and degrades gracefully when one
/// is unreachable.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Stable identifier, used in logs and error messages.
    fn id(&self) -> &str;

    /// Merge precedence. Higher wins on name collision.
    fn priority(&self) -> i32 {
        0
    }

    /// Whether this provider can currently serve tools.
    async fn is_available(&self) -> bool;

    /// Enumerate the tools this provider serves.
    async fn discover(&self) -> Result<Vec<ToolDescriptor>, ProviderError>;

    /// Execute one call. Failures surface as [`ExecutionResult::Failure`],
    /// not as `Err` — a broken tool must not abort the turn.
    async fn execute(&self, call: &ToolCall) -> ExecutionResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticProvider {
        id: String,
        priority: i32,
        tools: Vec<ToolDescriptor>,
    }

    #[async_trait]
    impl ToolProvider for StaticProvider {
        fn id(&self) -> &str {
            &self.id
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn discover(&self) -> Result<Vec<ToolDescriptor>, ProviderError> {
            Ok(self.tools.clone())
        }

        async fn execute(&self, call: &ToolCall) -> ExecutionResult {
            ExecutionResult::success(format!("{} ran {}", self.id, call.name))
        }
    }

    #[tokio::test]
    async fn test_provider_discover_and_execute() {
        let provider = StaticProvider {
            id: "static".to_string(),
            priority: 10,
            tools: vec![ToolDescriptor::local("echo", "Echo input")],
        };

        assert!(provider.is_available().await);
        assert_eq!(provider.priority(), 10);

        let tools = provider.discover().await.unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "echo");

        let call = ToolCall::new("call-1", "echo");
        let result = provider.execute(&call).await;
        assert_eq!(result.into_turn_text(), "static ran echo");
    }

    #[test]
    fn test_provider_error_messages() {
        let err = ProviderError::NotAvailable("gateway".to_string());
        assert_eq!(err.to_string(), "provider 'gateway' is not available");

        let err = ProviderError::UnknownTool("frobnicate".to_string());
        assert!(err.to_string().contains("frobnicate"));
    }
}
