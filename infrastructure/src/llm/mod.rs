//! Decision model adapter

pub mod openai;

pub use openai::OpenAiAdapter;
