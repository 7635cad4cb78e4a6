use serde::{Deserialize, Serialize};

use super::Message;

/// Connection state of the orchestrator's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        };
        f.write_str(text)
    }
}

/// Severity of a notification, consumed by the toast/notification collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// Events published by the orchestrator for presentation collaborators.
///
/// The core never reaches into presentation; everything a UI needs to render
/// arrives through this stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A message was appended to the conversation.
    MessageAppended { message: Message },
    /// The connection state changed, with human-readable detail text.
    ConnectionStateChanged {
        state: ConnectionState,
        detail: String,
    },
    /// A user-facing notification.
    Notification { message: String, severity: Severity },
    /// The connect sequence started or finished.
    ConnectBusy { busy: bool },
    /// A send operation started or finished.
    SendBusy { busy: bool },
    /// The conversation history was wiped.
    HistoryCleared,
}
