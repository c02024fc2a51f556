//! Search debounce, modelled as an explicit arm/cancel value type instead of
//! ad hoc timer-handle tracking.
//!
//! At most one deferred search is armed at a time: every keystroke with a
//! non-empty query replaces the pending deadline, so one search fires per
//! idle period, for the final query value. The caller supplies `Instant`s,
//! which keeps tests free of real timers.

use std::time::{Duration, Instant};

/// Pause after the last keystroke before a search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No query: the full list is (or should be) showing.
    Idle,
    /// A query is armed and waiting out the debounce window.
    Pending,
    /// A search has fired and its query is the active view filter.
    Active,
}

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    query: String,
    deadline: Option<Instant>,
    fired: bool,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            query: String::new(),
            deadline: None,
            fired: false,
        }
    }

    pub fn state(&self) -> DebounceState {
        if self.deadline.is_some() {
            DebounceState::Pending
        } else if self.fired {
            DebounceState::Active
        } else {
            DebounceState::Idle
        }
    }

    /// Record a change to the search text.
    ///
    /// Non-empty input (re)arms the deadline, cancelling any pending one.
    /// Empty input drops straight to `Idle`; the return value is `true` when
    /// that transition means the caller must reload the full list now.
    pub fn input(&mut self, text: &str, now: Instant) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            let was_idle = self.state() == DebounceState::Idle;
            self.query.clear();
            self.deadline = None;
            self.fired = false;
            return !was_idle;
        }
        self.query = trimmed.to_string();
        self.deadline = Some(now + self.delay);
        false
    }

    /// Returns the query to search once the deadline has elapsed; fires at
    /// most once per arm.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => Some(self.fire()),
            _ => None,
        }
    }

    /// Enter pressed: fire the current query immediately, bypassing the
    /// deadline. Returns `None` when there is no query.
    pub fn flush(&mut self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.fire())
        }
    }

    fn fire(&mut self) -> String {
        self.deadline = None;
        self.fired = true;
        self.query.clone()
    }
}
