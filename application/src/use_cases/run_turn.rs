//! Run-turn use case
//!
//! Drives one user turn to completion: decide, route, validate, execute,
//! fold results, repeat until the decision model answers in plain text.
//! Every tool call the model announces receives exactly one result turn
//! before the conversation goes back to the model — rejections included.

use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use trik_agent_domain::Conversation;

use crate::ports::decision_gateway::{DecisionError, DecisionGateway};
use crate::ports::progress::{TurnPhase, TurnProgress};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::gate::ValidationGate;

#[derive(Debug, Error)]
pub enum RunTurnError {
    #[error(transparent)]
    Decision(#[from] DecisionError),

    #[error("turn did not settle within {0} decision cycles")]
    MaxCyclesExceeded(usize),

    #[error("turn was cancelled")]
    Cancelled,
}

pub struct RunTurnUseCase<G: DecisionGateway, T: ToolExecutorPort> {
    gateway: Arc<G>,
    executor: Arc<T>,
    gate: ValidationGate,
    max_cycles: usize,
    cancellation_token: Option<CancellationToken>,
}

impl<G: DecisionGateway, T: ToolExecutorPort> RunTurnUseCase<G, T> {
    pub fn new(gateway: Arc<G>, executor: Arc<T>, gate: ValidationGate) -> Self {
        Self {
            gateway,
            executor,
            gate,
            max_cycles: 8,
            cancellation_token: None,
        }
    }

    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Run one user turn, appending to `conversation` as it goes.
    ///
    /// Returns the assistant's final plain-text answer. On error the
    /// conversation keeps everything appended so far; it is left stable
    /// except when the decision gateway itself failed mid-cycle.
    pub async fn execute(
        &self,
        conversation: &mut Conversation,
        user_text: &str,
        progress: &dyn TurnProgress,
    ) -> Result<String, RunTurnError> {
        conversation.push_user(user_text);

        for cycle in 0..self.max_cycles {
            if let Some(token) = &self.cancellation_token {
                if token.is_cancelled() {
                    warn!(cycle, "turn cancelled");
                    return Err(RunTurnError::Cancelled);
                }
            }

            progress.on_phase_change(TurnPhase::Deciding);
            let tools = self.executor.descriptors();
            let decision = self.gateway.decide(conversation, &tools).await?;
            debug!(
                cycle,
                tool_calls = decision.tool_calls.len(),
                "decision received"
            );

            conversation.push_assistant(decision.text.clone(), decision.tool_calls.clone());

            if !decision.has_tool_calls() {
                progress.on_phase_change(TurnPhase::Terminal);
                info!(cycle, "turn settled");
                return Ok(decision.text);
            }

            progress.on_phase_change(TurnPhase::Routing);
            for call in &decision.tool_calls {
                if self.gate.applies_to(call) {
                    progress.on_phase_change(TurnPhase::Validating);
                    let verdict = match self.gate.check(call).await {
                        Ok(verdict) => verdict,
                        Err(e) => {
                            settle_unanswered_calls(conversation, &e);
                            return Err(e.into());
                        }
                    };
                    progress.on_validation(call, &verdict);

                    if !verdict.valid {
                        info!(tool = %call.name, call_id = %call.id, "call rejected by gate");
                        conversation.push_tool_result(
                            &call.id,
                            ValidationGate::rejection_text(&verdict.feedback),
                        );
                        continue;
                    }
                }

                progress.on_phase_change(TurnPhase::Executing);
                progress.on_tool_call(call);
                let result = self.executor.execute(call).await;
                progress.on_tool_result(&call.id, &result);
                conversation.push_tool_result(&call.id, result.into_turn_text());
            }
        }

        Err(RunTurnError::MaxCyclesExceeded(self.max_cycles))
    }
}

/// Fold a mid-processing failure into result turns for every announced
/// call still waiting on one. Keeps the conversation stable so the next
/// decision request serializes cleanly and the user can retry the turn.
fn settle_unanswered_calls(conversation: &mut Conversation, error: &DecisionError) {
    let unanswered: Vec<String> = conversation
        .dangling_calls()
        .iter()
        .map(|call| call.id.clone())
        .collect();
    for call_id in unanswered {
        conversation.push_tool_result(call_id, format!("Error: {}", error));
    }
}
