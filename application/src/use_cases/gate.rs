//! Validation gate
//!
//! Sits between the decision model and the tool executor for gated tools.
//! The gate never blocks silently: a rejected call gets a tool-result turn
//! telling the model what was wrong, keyed back to the original call id.

use std::sync::Arc;

use tracing::info;

use trik_agent_domain::{GatePolicy, ToolCall, Verdict};

use crate::ports::decision_gateway::{DecisionError, StructuredJudge};

pub struct ValidationGate {
    judge: Arc<dyn StructuredJudge>,
    policy: GatePolicy,
}

impl ValidationGate {
    pub fn new(judge: Arc<dyn StructuredJudge>, policy: GatePolicy) -> Self {
        Self { judge, policy }
    }

    /// Whether `call` must be judged before it may execute.
    pub fn applies_to(&self, call: &ToolCall) -> bool {
        self.policy.judged_argument(&call.name).is_some()
    }

    /// Judge the gated argument of `call`.
    ///
    /// A missing or empty argument is rejected locally; the judge is only
    /// consulted when there is something to evaluate.
    pub async fn check(&self, call: &ToolCall) -> Result<Verdict, DecisionError> {
        let Some(argument) = self.policy.judged_argument(&call.name) else {
            return Ok(Verdict::approve("not gated"));
        };

        let value = call.get_string(argument).unwrap_or("").trim().to_string();
        if value.is_empty() {
            return Ok(Verdict::reject(format!(
                "The '{}' argument is required and was not provided.",
                argument
            )));
        }

        let verdict = self.judge.judge(&value).await?;
        info!(
            tool = %call.name,
            valid = verdict.valid,
            "gate verdict"
        );
        Ok(verdict)
    }

    /// Tool-result text folded into the conversation on rejection.
    pub fn rejection_text(feedback: &str) -> String {
        format!(
            "VALIDATION FAILED: {} Please ask the customer for a more specific reason before trying again!",
            feedback
        )
    }
}
