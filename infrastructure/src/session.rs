//! Agent session bootstrap
//!
//! Wires the gateway client, tool registry, model adapter, and run-turn
//! use case into one object the presentation layer can drive. A dead
//! gateway is fatal at startup; a gateway with no tools is not.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use trik_agent_application::{
    DecisionError, NoTurnProgress, RunTurnError, RunTurnUseCase, StructuredJudge,
    ToolExecutorPort, TurnProgress, ValidationGate,
};
use trik_agent_domain::{
    Conversation, GatePolicy, PassthroughContent, PassthroughSlot, ToolDescriptor,
};

use crate::config::FileConfig;
use crate::gateway::protocol::HealthResponse;
use crate::gateway::{TrikClient, TrikError};
use crate::llm::OpenAiAdapter;
use crate::tools::{BuiltinProvider, ToolRegistry, TrikToolProvider};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("gateway startup check failed: {0}")]
    Gateway(#[from] TrikError),

    #[error("model adapter setup failed: {0}")]
    Model(#[from] DecisionError),
}

/// What startup learned about the gateway.
#[derive(Debug, Clone)]
pub struct GatewayStatus {
    pub version: Option<String>,
    pub triks_loaded: u32,
    pub loaded_triks: Vec<String>,
}

impl GatewayStatus {
    fn from_health(health: HealthResponse, loaded_triks: Vec<String>) -> Self {
        let triks_loaded = health.triks_loaded();
        Self {
            version: health.version,
            triks_loaded,
            loaded_triks,
        }
    }
}

pub struct AgentSession {
    use_case: RunTurnUseCase<OpenAiAdapter, ToolRegistry>,
    registry: Arc<ToolRegistry>,
    slot: Arc<PassthroughSlot>,
    conversation: Conversation,
    gateway_status: GatewayStatus,
}

impl AgentSession {
    /// Connect to the gateway, discover tools, and assemble the turn loop.
    pub async fn initialize(config: &FileConfig) -> Result<Self, SessionError> {
        let slot = Arc::new(PassthroughSlot::new());

        let client = Arc::new(TrikClient::new(
            &config.gateway.url,
            config.gateway.auth_token.as_deref(),
            slot.clone(),
        )?);

        let health = client.health().await?;
        info!(version = ?health.version, "gateway is up");

        let remote = Arc::new(TrikToolProvider::new(client));
        let mut registry =
            ToolRegistry::new(vec![Arc::new(BuiltinProvider::new()), remote.clone()]);
        registry.refresh().await;

        let gateway_status = GatewayStatus::from_health(health, remote.loaded_triks());
        if registry.tool_set().is_empty() {
            warn!("no tools available, agent will be text-only");
        }
        let registry = Arc::new(registry);

        let adapter = Arc::new(OpenAiAdapter::new(
            &config.model.api_base,
            config.resolved_api_key(),
            &config.model.name,
        )?);

        let gate = ValidationGate::new(
            adapter.clone() as Arc<dyn StructuredJudge>,
            GatePolicy::default(),
        );

        let use_case = RunTurnUseCase::new(adapter, registry.clone(), gate)
            .with_max_cycles(config.agent.max_cycles);

        Ok(Self {
            use_case,
            registry,
            slot,
            conversation: Conversation::new(),
            gateway_status,
        })
    }

    /// Run one user turn and return the assistant's final answer.
    pub async fn invoke(&mut self, user_text: &str) -> Result<String, RunTurnError> {
        self.invoke_with_progress(user_text, &NoTurnProgress).await
    }

    pub async fn invoke_with_progress(
        &mut self,
        user_text: &str,
        progress: &dyn TurnProgress,
    ) -> Result<String, RunTurnError> {
        self.use_case
            .execute(&mut self.conversation, user_text, progress)
            .await
    }

    /// Merged tool descriptors in deterministic order.
    pub fn tools(&self) -> Vec<ToolDescriptor> {
        self.registry.descriptors()
    }

    /// Drain any passthrough content produced by the last turn.
    pub fn take_passthrough(&self) -> Option<PassthroughContent> {
        self.slot.take()
    }

    pub fn gateway_status(&self) -> &GatewayStatus {
        &self.gateway_status
    }
}
