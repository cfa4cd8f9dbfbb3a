//! Tool executor port

use async_trait::async_trait;

use trik_agent_domain::{ExecutionResult, ToolCall, ToolDescriptor, ToolSet};

/// Gives the turn loop a merged view of available tools and a way to run
/// them. Execution never returns `Err`: broken tools fold into
/// [`ExecutionResult::Failure`] so the model can react.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    fn tool_set(&self) -> &ToolSet;

    async fn execute(&self, call: &ToolCall) -> ExecutionResult;

    fn has_tool(&self, name: &str) -> bool {
        self.tool_set().contains(name)
    }

    /// Descriptors in deterministic name order, for the decision model.
    fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tool_set().sorted().into_iter().cloned().collect()
    }
}
