//! Session domain module.
//!
//! This module contains the session model, conversation message types,
//! orchestrator events, and invocation settings.
//!
//! # Module Structure
//!
//! - `model`: Session state (`Session`, `AuthenticatedState`, credentials)
//! - `message`: Conversation message types (`MessageRole`, `Message`)
//! - `event`: Events emitted by the orchestrator (`SessionEvent`)
//! - `settings`: Invocation settings and partial updates

mod event;
mod message;
mod model;
mod settings;

// Re-export public API
pub use event::{ConnectionState, SessionEvent, Severity};
pub use message::{Message, MessageRole};
pub use model::{AccessCredentials, AuthenticatedState, Identity, IssuedToken, Session};
pub use settings::{InvocationSettings, SettingsUpdate};
