//! hf-chat: command-line client for hosted text-generation endpoints
//!
//! This library provides:
//! - A request dispatcher that folds every outcome into an `InferenceResult`
//! - Bounded conversation history rendered into a turn-delimited prompt
//! - One-off and contextual interactive session loops
//! - A batch harness that runs a fixed question set and saves a report

pub mod config;
pub mod conversation;
pub mod harness;
pub mod llm;
pub mod transport;

pub use config::Config;
pub use conversation::{History, Session, SessionMode, Turn};
pub use harness::{run_batch, BatchReport};
pub use llm::{HfInferenceProvider, InferenceBackend, InferenceRequest, InferenceResult};
