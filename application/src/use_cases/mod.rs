//! Use cases - application orchestration logic

pub mod gate;
pub mod run_turn;
