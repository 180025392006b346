//! Transition records and change notification.
//!
//! Every machine appends a timestamped [`TransitionRecord`] to its
//! [`TransitionTrace`] as part of each completed transition, and invokes an
//! optional [`TransitionObserver`] callback afterwards. Same-state no-ops
//! are not recorded.

use crate::core::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Callback invoked after every completed transition with `(from, to)`.
pub type TransitionObserver = Box<dyn FnMut(StateId, StateId)>;

/// Record of a single completed transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state that was current before the transition.
    pub from: StateId,
    /// The state that became current.
    pub to: StateId,
    /// When the transition completed.
    pub timestamp: DateTime<Utc>,
}

/// Ordered record of the transitions a machine has performed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionTrace {
    records: Vec<TransitionRecord>,
}

impl TransitionTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, from: StateId, to: StateId) {
        self.records.push(TransitionRecord {
            from,
            to,
            timestamp: Utc::now(),
        });
    }

    /// All records in completion order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// The sequence of states visited: the first record's source followed
    /// by every record's target. Empty while nothing has been recorded.
    pub fn visited(&self) -> Vec<StateId> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from);
        }
        for record in &self.records {
            path.push(record.to);
        }
        path
    }

    /// Elapsed time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => last
                .timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok(),
            _ => None,
        }
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
