//! Application layer for Portico.
//!
//! Hosts the [`SessionOrchestrator`], the state machine that coordinates the
//! portal auth client, the model invocation registry, and the conversation
//! store in response to user intents.

pub mod orchestrator;

pub use orchestrator::{ConnectRequest, HistoryExport, SessionOrchestrator};
