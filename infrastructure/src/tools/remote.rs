//! Remote tool provider backed by the trik gateway
//!
//! Discovery renames wire-form tool names (`trikId:actionName`) to the
//! model-safe underscore form and caches the mapping so execution can
//! translate back.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, warn};

use trik_agent_domain::{
    ExecutionResult, ProviderError, ToolCall, ToolDescriptor, ToolProvider,
};

use crate::gateway::TrikClient;
use crate::tools::schema::{model_name, parse_input_schema};

pub struct TrikToolProvider {
    client: Arc<TrikClient>,
    // model name -> wire name, filled in at discovery
    wire_names: Mutex<HashMap<String, String>>,
    trik_ids: Mutex<Vec<String>>,
}

impl TrikToolProvider {
    pub fn new(client: Arc<TrikClient>) -> Self {
        Self {
            client,
            wire_names: Mutex::new(HashMap::new()),
            trik_ids: Mutex::new(Vec::new()),
        }
    }

    fn wire_name(&self, model: &str) -> Option<String> {
        self.wire_names
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(model)
            .cloned()
    }

    /// Ids of the triks the gateway reported at the last discovery.
    pub fn loaded_triks(&self) -> Vec<String> {
        self.trik_ids
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl ToolProvider for TrikToolProvider {
    fn id(&self) -> &str {
        "trik"
    }

    fn priority(&self) -> i32 {
        0
    }

    async fn is_available(&self) -> bool {
        self.client.health().await.is_ok()
    }

    async fn discover(&self) -> Result<Vec<ToolDescriptor>, ProviderError> {
        let manifest = self
            .client
            .list_tools()
            .await
            .map_err(|e| ProviderError::DiscoveryFailed(e.to_string()))?;

        {
            let mut ids = self.trik_ids.lock().unwrap_or_else(|e| e.into_inner());
            *ids = manifest.triks.iter().map(|t| t.id.clone()).collect();
        }

        let mut names = self.wire_names.lock().unwrap_or_else(|e| e.into_inner());
        names.clear();

        let descriptors = manifest
            .tools
            .into_iter()
            .map(|tool| {
                let renamed = model_name(&tool.name);
                names.insert(renamed.clone(), tool.name.clone());

                let mut descriptor =
                    ToolDescriptor::remote(renamed, &tool.description, &tool.name);
                for param in parse_input_schema(&tool.input_schema) {
                    descriptor = descriptor.with_parameter(param);
                }
                descriptor
            })
            .collect();

        debug!(count = names.len(), "discovered gateway tools");
        Ok(descriptors)
    }

    async fn execute(&self, call: &ToolCall) -> ExecutionResult {
        let Some(wire_name) = self.wire_name(&call.name) else {
            return ExecutionResult::failure(format!(
                "tool '{}' is not served by the gateway",
                call.name
            ));
        };

        match self.client.run_tool(&wire_name, &call.arguments).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = %call.name, error = %e, "gateway execution failed");
                ExecutionResult::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trik_agent_domain::PassthroughSlot;

    fn provider() -> TrikToolProvider {
        let client = TrikClient::new(
            "http://localhost:3002",
            None,
            Arc::new(PassthroughSlot::new()),
        )
        .unwrap();
        TrikToolProvider::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_undiscovered_tool_fails_without_network() {
        let provider = provider();
        let call = ToolCall::new("c1", "article_search_3_search");
        let result = provider.execute(&call).await;
        assert!(!result.is_success());
    }

    #[test]
    fn test_wire_name_lookup() {
        let provider = provider();
        provider.wire_names.lock().unwrap().insert(
            "article-search-3_search".to_string(),
            "article-search-3:search".to_string(),
        );
        assert_eq!(
            provider.wire_name("article-search-3_search").as_deref(),
            Some("article-search-3:search")
        );
        assert!(provider.wire_name("unknown").is_none());
    }
}
