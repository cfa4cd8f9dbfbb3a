//! Ports - interfaces the application layer depends on

pub mod decision_gateway;
pub mod progress;
pub mod tool_executor;
