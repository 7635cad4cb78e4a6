//! Opaque token generation.
//!
//! Tokens and secrets only need to look random and be unique per call; no
//! cryptographic property is claimed. The source is a trait so tests can
//! substitute a deterministic implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Produces opaque, random-looking strings.
pub trait TokenSource: Send + Sync {
    /// Returns an opaque string of exactly `len` characters.
    ///
    /// Two calls never return the same string.
    fn opaque(&self, len: usize) -> String;
}

/// The default source: alphanumeric noise with a per-call counter suffix.
///
/// The counter guarantees uniqueness even under an improbable random
/// collision.
#[derive(Debug, Default)]
pub struct RandomTokenSource {
    counter: AtomicU64,
}

impl RandomTokenSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenSource for RandomTokenSource {
    fn opaque(&self, len: usize) -> String {
        let serial = self.counter.fetch_add(1, Ordering::Relaxed);
        let tag = format!("{serial:06x}");
        let random_len = len.saturating_sub(tag.len());
        let mut out: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(random_len)
            .map(char::from)
            .collect();
        out.push_str(&tag);
        out.truncate(len);
        out
    }
}

/// Deterministic source for tests: `aaaaaa-0`, `aaaaaa-1`, ...
#[derive(Debug, Default)]
pub struct SequencedTokenSource {
    counter: AtomicU64,
}

impl SequencedTokenSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenSource for SequencedTokenSource {
    fn opaque(&self, len: usize) -> String {
        let serial = self.counter.fetch_add(1, Ordering::Relaxed);
        let tag = format!("-{serial}");
        let mut out = "a".repeat(len.saturating_sub(tag.len()));
        out.push_str(&tag);
        out.truncate(len);
        out
    }
}
