//! Audit trail of completed hops.
//!
//! Trigger calls may carry free-form notes. The machine does not interpret
//! them; it hands them to an [`AuditSink`] together with the hop that was
//! taken, once per successful hop.

use super::state::{EventCode, StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Record of a single successful hop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Event that caused the hop
    pub event: EventCode,
    /// Status before the hop
    pub from: StatusCode,
    /// Status after the hop
    pub to: StatusCode,
    /// Notes passed to the trigger call, verbatim
    pub notes: Vec<String>,
    /// When the hop completed
    pub at: DateTime<Utc>,
}

/// Collaborator receiving one entry per successful hop.
///
/// Sinks are called synchronously from inside the trigger call and must not
/// fail; anything that can go wrong is the sink's own business.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: AuditEntry);
}

/// In-memory, append-only audit sink.
///
/// # Example
///
/// ```rust
/// use hookfsm::core::{AuditEntry, AuditLog, AuditSink, EventCode, StatusCode};
/// use chrono::Utc;
///
/// let log = AuditLog::new();
/// log.record(AuditEntry {
///     event: EventCode::from("submit"),
///     from: StatusCode::new(1),
///     to: StatusCode::new(2),
///     notes: vec!["by alice".to_string()],
///     at: Utc::now(),
/// });
///
/// assert_eq!(log.len(), 1);
/// assert_eq!(log.path(), vec![StatusCode::new(1), StatusCode::new(2)]);
/// ```
#[derive(Debug, Default)]
pub struct AuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    // Entries are pushed whole, so a poisoned lock still holds a consistent Vec.
    fn lock(&self) -> MutexGuard<'_, Vec<AuditEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of all entries in recording order.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Statuses traversed: the origin of the first entry, then each destination.
    ///
    /// Entries for different entities are interleaved in one log, so this is
    /// only meaningful for a log dedicated to a single entity.
    pub fn path(&self) -> Vec<StatusCode> {
        let entries = self.lock();
        let mut path = Vec::with_capacity(entries.len() + 1);
        if let Some(first) = entries.first() {
            path.push(first.from);
        }
        path.extend(entries.iter().map(|entry| entry.to));
        path
    }

    /// Time between the first and the last recorded hop.
    pub fn duration(&self) -> Option<Duration> {
        let entries = self.lock();
        match (entries.first(), entries.last()) {
            (Some(first), Some(last)) => last.at.signed_duration_since(first.at).to_std().ok(),
            _ => None,
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl AuditSink for AuditLog {
    fn record(&self, entry: AuditEntry) {
        self.lock().push(entry);
    }
}
