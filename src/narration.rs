//! Narration events emitted by the step runner
//!
//! The core never draws anything. It reports what happened through a
//! `Narrator`, and the driver decides how to present it.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of narration entries kept by a `NarrationLog`
pub const DEFAULT_NARRATION_CAPACITY: usize = 50;

/// Sink for human-readable narration
pub trait Narrator {
    /// General progress narration
    fn info(&mut self, text: &str);
    /// A step produced a live outcome
    fn success(&mut self, text: &str);
    /// A step terminated the computation
    fn failure(&mut self, text: &str);
}

impl<N: Narrator + ?Sized> Narrator for &mut N {
    fn info(&mut self, text: &str) {
        (**self).info(text);
    }

    fn success(&mut self, text: &str) {
        (**self).success(text);
    }

    fn failure(&mut self, text: &str) {
        (**self).failure(text);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationKind {
    Info,
    Success,
    Failure,
}

/// An entry in the narration log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationEntry {
    /// Monotonic sequence number, never reused after eviction
    pub sequence: u64,
    pub kind: NarrationKind,
    pub text: String,
}

/// Bounded narration history, oldest entries evicted first
#[derive(Debug, Clone)]
pub struct NarrationLog {
    entries: VecDeque<NarrationEntry>,
    capacity: usize,
    next_sequence: u64,
}

impl Default for NarrationLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_NARRATION_CAPACITY)
    }
}

impl NarrationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log keeping at most `capacity` entries (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_sequence: 0,
        }
    }

    /// Add an entry to the log
    pub fn push(&mut self, kind: NarrationKind, text: impl Into<String>) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(NarrationEntry {
            sequence: self.next_sequence,
            kind,
            text: text.into(),
        });
        self.next_sequence += 1;
    }

    pub fn entries(&self) -> impl Iterator<Item = &NarrationEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&NarrationEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Count entries of one kind currently retained
    pub fn count(&self, kind: NarrationKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Sequence number the next pushed entry will get
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Entries at or after `mark`, for incremental redraws
    ///
    /// Take `mark` from `next_sequence()` before running a command.
    pub fn since(&self, mark: u64) -> impl Iterator<Item = &NarrationEntry> {
        self.entries.iter().filter(move |e| e.sequence >= mark)
    }
}

impl Narrator for NarrationLog {
    fn info(&mut self, text: &str) {
        self.push(NarrationKind::Info, text);
    }

    fn success(&mut self, text: &str) {
        self.push(NarrationKind::Success, text);
    }

    fn failure(&mut self, text: &str) {
        self.push(NarrationKind::Failure, text);
    }
}

/// Forwards narration to `tracing`: info and success at INFO, failure at WARN
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNarrator;

impl Narrator for TracingNarrator {
    fn info(&mut self, text: &str) {
        tracing::info!(kind = "info", "{}", text);
    }

    fn success(&mut self, text: &str) {
        tracing::info!(kind = "success", "{}", text);
    }

    fn failure(&mut self, text: &str) {
        tracing::warn!(kind = "failure", "{}", text);
    }
}

/// Sends every event to two narrators in order
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: Narrator, B: Narrator> Narrator for Tee<A, B> {
    fn info(&mut self, text: &str) {
        self.0.info(text);
        self.1.info(text);
    }

    fn success(&mut self, text: &str) {
        self.0.success(text);
        self.1.success(text);
    }

    fn failure(&mut self, text: &str) {
        self.0.failure(text);
        self.1.failure(text);
    }
}
