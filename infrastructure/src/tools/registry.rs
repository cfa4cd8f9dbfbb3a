//! Tool registry
//!
//! Merges tools from every provider into one [`ToolSet`]. Providers are
//! visited in descending priority and the first provider to claim a name
//! keeps it, so built-ins shadow gateway tools. An unreachable provider
//! degrades the registry instead of failing it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use trik_agent_domain::{
    DefaultToolValidator, ExecutionResult, ToolCall, ToolProvider, ToolSet, ToolValidator,
};

use trik_agent_application::ToolExecutorPort;

pub struct ToolRegistry {
    providers: Vec<Arc<dyn ToolProvider>>,
    tools: ToolSet,
    routing: HashMap<String, Arc<dyn ToolProvider>>,
    validator: DefaultToolValidator,
}

impl ToolRegistry {
    pub fn new(mut providers: Vec<Arc<dyn ToolProvider>>) -> Self {
        providers.sort_by_key(|p| std::cmp::Reverse(p.priority()));
        Self {
            providers,
            tools: ToolSet::new(),
            routing: HashMap::new(),
            validator: DefaultToolValidator,
        }
    }

    /// Probe every provider and rebuild the merged tool set.
    pub async fn refresh(&mut self) {
        let mut tools = ToolSet::new();
        let mut routing: HashMap<String, Arc<dyn ToolProvider>> = HashMap::new();

        for provider in &self.providers {
            if !provider.is_available().await {
                warn!(provider = provider.id(), "provider unavailable, skipping");
                continue;
            }

            let discovered = match provider.discover().await {
                Ok(discovered) => discovered,
                Err(e) => {
                    warn!(provider = provider.id(), error = %e, "tool discovery failed");
                    continue;
                }
            };

            for descriptor in discovered {
                if routing.contains_key(&descriptor.name) {
                    debug!(
                        tool = %descriptor.name,
                        provider = provider.id(),
                        "name already claimed by a higher-priority provider"
                    );
                    continue;
                }
                routing.insert(descriptor.name.clone(), provider.clone());
                tools = tools.register(descriptor);
            }
        }

        info!(tools = tools.len(), "tool registry refreshed");
        self.tools = tools;
        self.routing = routing;
    }

    /// Ids of providers that contributed at least one tool.
    pub fn active_providers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.routing.values().map(|p| p.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_set(&self) -> &ToolSet {
        &self.tools
    }

    async fn execute(&self, call: &ToolCall) -> ExecutionResult {
        let Some(descriptor) = self.tools.get(&call.name) else {
            return ExecutionResult::failure(format!("unknown tool '{}'", call.name));
        };

        // Reject malformed calls before they cross a network boundary.
        if let Err(message) = self.validator.validate(descriptor, call) {
            return ExecutionResult::failure(message);
        }

        match self.routing.get(&call.name) {
            Some(provider) => provider.execute(call).await,
            None => ExecutionResult::failure(format!("no provider for tool '{}'", call.name)),
        }
    }
}
