//! Request statistics tracking.
//!
//! Counts the outcome of every request attempt made by the executor so the
//! end-of-run summary can show how much retrying and rate limiting happened.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::RequestEvent;

/// Per-event attempt counters.
///
/// Counters are atomics so the executor can record through `&self`. All event
/// types are initialized to zero on creation.
#[derive(Debug)]
pub struct RequestStats {
    events: HashMap<RequestEvent, AtomicUsize>,
}

impl RequestStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut events = HashMap::new();
        for event in RequestEvent::iter() {
            events.insert(event, AtomicUsize::new(0));
        }
        RequestStats { events }
    }

    /// Records one occurrence of `event`.
    pub fn record(&self, event: RequestEvent) {
        if let Some(counter) = self.events.get(&event) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to record {:?} which is not in the map. \
                 This indicates a bug in RequestStats initialization.",
                event
            );
        }
    }

    /// Current count for `event`.
    pub fn count(&self, event: RequestEvent) -> usize {
        self.events
            .get(&event)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Total attempts recorded across all events.
    pub fn total(&self) -> usize {
        RequestEvent::iter().map(|e| self.count(e)).sum()
    }

    /// Non-zero counters in a stable order, for printing.
    pub fn non_zero(&self) -> Vec<(RequestEvent, usize)> {
        RequestEvent::iter()
            .map(|e| (e, self.count(e)))
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}
