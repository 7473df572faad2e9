//! Search input debouncing.

use std::time::{Duration, Instant};

/// Pause required before a typed query is committed.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(800);

/// Minimum committed query length (empty is also allowed, to clear).
pub const MIN_QUERY_LEN: usize = 2;

/// Two-value search text state: `raw` follows every keystroke, `committed`
/// follows after a typing pause.
///
/// Each keystroke re-arms the deadline; the committed value only changes
/// when the raw text is empty or at least `MIN_QUERY_LEN` characters long,
/// so single-character queries never reach the network.
#[derive(Debug, Default)]
pub struct SearchDebouncer {
    /// Text as currently typed.
    raw: String,
    /// Text last committed.
    committed: String,
    /// Pending commit deadline, re-armed on every keystroke.
    deadline: Option<Instant>,
}

impl SearchDebouncer {
    /// Creates an empty debouncer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw (per-keystroke) text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The committed (debounced) text.
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Whether a commit deadline is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Appends a character to the raw text.
    pub fn push(&mut self, ch: char, now: Instant) {
        self.raw.push(ch);
        self.arm(now);
    }

    /// Removes the last character from the raw text.
    pub fn pop(&mut self, now: Instant) {
        if self.raw.pop().is_some() {
            self.arm(now);
        }
    }

    /// Replaces the raw text wholesale.
    pub fn set_raw(&mut self, raw: impl Into<String>, now: Instant) {
        let raw = raw.into();
        if raw != self.raw {
            self.raw = raw;
            self.arm(now);
        }
    }

    /// Re-arms the commit deadline.
    fn arm(&mut self, now: Instant) {
        self.deadline = now.checked_add(DEBOUNCE_DELAY);
    }

    /// Commits the raw text once the deadline passed and the length gate
    /// allows it. Returns the newly committed text, if it changed.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;

        let len = self.raw.chars().count();
        if (len == 0 || len >= MIN_QUERY_LEN) && self.raw != self.committed {
            self.committed.clone_from(&self.raw);
            return Some(&self.committed);
        }
        None
    }
}
