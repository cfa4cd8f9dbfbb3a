//! Infrastructure layer - gateway client, tool providers, model adapter,
//! configuration, and session wiring

pub mod config;
pub mod gateway;
pub mod llm;
pub mod session;
pub mod tools;

pub use config::{ConfigLoader, FileConfig};
pub use gateway::{TrikClient, TrikError};
pub use llm::OpenAiAdapter;
pub use session::{AgentSession, GatewayStatus, SessionError};
pub use tools::{BuiltinProvider, ToolRegistry, TrikToolProvider};
