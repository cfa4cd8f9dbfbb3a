//! Turn progress notifications
//!
//! The turn loop reports phase transitions and tool activity through this
//! port so the presentation layer can render spinners, phase labels, or
//! nothing at all. All methods default to no-ops.

use trik_agent_domain::{ExecutionResult, ToolCall, Verdict};

/// Phases of one assistant turn, in order of first entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting on the decision model
    Deciding,
    /// Partitioning requested calls into gated and ungated
    Routing,
    /// A gated call is with the structured judge
    Validating,
    /// Dispatching approved calls
    Executing,
    /// Plain-text answer produced, turn complete
    Terminal,
}

pub trait TurnProgress: Send + Sync {
    fn on_phase_change(&self, _phase: TurnPhase) {}

    fn on_tool_call(&self, _call: &ToolCall) {}

    fn on_tool_result(&self, _call_id: &str, _result: &ExecutionResult) {}

    fn on_validation(&self, _call: &ToolCall, _verdict: &Verdict) {}
}

/// Silent progress sink.
pub struct NoTurnProgress;

impl TurnProgress for NoTurnProgress {}
