//! External services used by the engine

pub mod llm;

pub use llm::{ClassificationBackend, LlmConfig, LlmService};
