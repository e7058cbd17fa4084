//! Bounded log of tick-stamped messages.
//!
//! Provides a fixed-size buffer that keeps the most recent messages shown to
//! the player. The log belongs to the cache service because a full cache
//! reset must also forget every message from the previous game state.

use std::collections::VecDeque;
use std::fmt;

// =============================================================================
// Message
// =============================================================================

/// How urgent a message is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational.
    Info,
    /// Something needs attention.
    Warning,
    /// Something is failing.
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// A single logged message.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    /// Monotonic message id.
    pub id: u64,
    /// Tick the message was posted in.
    pub tick: u64,
    /// Urgency.
    pub severity: Severity,
    /// Message text.
    pub text: String,
}

// =============================================================================
// Message Log
// =============================================================================

/// A ring buffer of messages, oldest first.
#[derive(Clone, Debug)]
pub struct MessageLog {
    messages: VecDeque<Message>,
    /// Maximum number of messages to keep.
    max_size: usize,
    /// Next message id to assign.
    next_id: u64,
}

impl MessageLog {
    /// Creates a log holding at most `max_size` messages.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            next_id: 0,
        }
    }

    /// Posts a message, evicting the oldest if the log is full.
    ///
    /// Returns the assigned message id.
    pub fn post(&mut self, tick: u64, severity: Severity, text: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.messages.push_back(Message {
            id,
            tick,
            severity,
            text: text.into(),
        });
        while self.messages.len() > self.max_size {
            self.messages.pop_front();
        }

        id
    }

    /// Returns the number of messages in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the maximum number of messages kept.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Removes all messages.
    pub fn clear(&mut self) {
        self.messages.clear();
        // Don't reset next_id - keep it monotonically increasing
    }

    /// Iterates over all messages, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Returns the most recent `count` messages, oldest first.
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<&Message> {
        let start = self.messages.len().saturating_sub(count);
        self.messages.iter().skip(start).collect()
    }

    /// Returns messages posted during `tick`.
    #[must_use]
    pub fn for_tick(&self, tick: u64) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.tick == tick).collect()
    }

    /// Returns messages at or above `severity`.
    #[must_use]
    pub fn at_least(&self, severity: Severity) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| m.severity >= severity)
            .collect()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MESSAGE_LOG_SIZE)
    }
}

// =============================================================================
// Tests
// =============================================================================
