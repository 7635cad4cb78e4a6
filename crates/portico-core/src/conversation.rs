//! Append-only conversation store.
//!
//! Messages are only ever appended or wiped in full. Timestamps are stamped
//! at append time and clamped so they never decrease in store order, even if
//! the underlying clock jumps backwards.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::session::Message;

/// Ordered, append-only message log plus serialization.
pub struct ConversationStore {
    messages: Vec<Message>,
    clock: Arc<dyn Clock>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    /// Creates an empty store using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store with an injected clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            messages: Vec::new(),
            clock,
        }
    }

    /// Appends a message, stamping its timestamp.
    ///
    /// The timestamp is clamped to the previous message's timestamp so the
    /// sequence is non-decreasing.
    pub fn append(&mut self, mut message: Message) -> &Message {
        let now = self.clock.now();
        message.timestamp = match self.messages.last() {
            Some(prev) if prev.timestamp > now => prev.timestamp,
            _ => now,
        };
        self.messages.push(message);
        // Safe to unwrap because we just pushed an element
        self.messages.last().unwrap()
    }

    /// Irreversibly wipes the log. Confirmation is the caller's concern.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// The messages, in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Serializes the history as pretty-printed JSON with stable field order.
    ///
    /// Parsing the output with [`ConversationStore::parse`] reproduces an
    /// equal message sequence.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.messages)?)
    }

    /// Parses a history document produced by [`ConversationStore::serialize`].
    pub fn parse(json: &str) -> Result<Vec<Message>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Suggested export filename: `<prefix>-<YYYY-MM-DD>.json`.
pub fn export_filename(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}.json", prefix, now.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MessageRole;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn starting_at(now: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(now),
            }
        }

        fn set(&self, now: DateTime<Utc>) {
            *self.now.lock().unwrap() = now;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn t(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, secs).unwrap()
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut store = ConversationStore::new();
        store.append(Message::user("first", "model-a"));
        store.append(Message::user("second", "model-a"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.messages()[0].content, "first");
        assert_eq!(store.messages()[1].content, "second");
    }

    #[test]
    fn test_timestamps_never_decrease() {
        let clock = Arc::new(ManualClock::starting_at(t(30)));
        let mut store = ConversationStore::with_clock(clock.clone());
        store.append(Message::user("first", "m"));

        // Clock jumps backwards; the second timestamp is clamped.
        clock.set(t(10));
        store.append(Message::user("second", "m"));

        let messages = store.messages();
        assert_eq!(messages[0].timestamp, t(30));
        assert_eq!(messages[1].timestamp, t(30));
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut store = ConversationStore::new();
        store.append(Message::user("What is the capital of the UK?", "model-a"));
        store.append(Message::assistant("London.", "Model A", "model-a", 7, 1));
        store.append(Message::error("Error: backend unavailable"));

        let json = store.serialize().unwrap();
        let parsed = ConversationStore::parse(&json).unwrap();
        assert_eq!(parsed, store.messages());
        assert_eq!(parsed[2].role, MessageRole::Error);
    }

    #[test]
    fn test_clear_wipes_everything() {
        let mut store = ConversationStore::new();
        store.append(Message::user("hello", "m"));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.serialize().unwrap(), "[]");
    }

    #[test]
    fn test_export_filename_pattern() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 23, 59, 0).unwrap();
        assert_eq!(
            export_filename("aws-bedrock-chat", now),
            "aws-bedrock-chat-2025-06-01.json"
        );
    }
}
