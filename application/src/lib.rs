//! Application layer - use cases and ports
//!
//! Orchestrates one assistant turn at a time: ask the decision model what
//! to do, gate sensitive tool calls through a structured judge, dispatch
//! approved calls to the tool executor, and fold every result back into
//! the conversation before the next cycle.

pub mod ports;
pub mod use_cases;

pub use ports::decision_gateway::{Decision, DecisionError, DecisionGateway, StructuredJudge};
pub use ports::progress::{NoTurnProgress, TurnPhase, TurnProgress};
pub use ports::tool_executor::ToolExecutorPort;
pub use use_cases::gate::ValidationGate;
pub use use_cases::run_turn::{RunTurnError, RunTurnUseCase};
