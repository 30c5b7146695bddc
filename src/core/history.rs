//! Recording of forced transitions.
//!
//! [`TransitionLog`] is a ready-made sink for the table logger: it keeps
//! every message with the time it was produced.

use crate::core::handler::Logger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// One logged transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Message as formatted by the table, e.g. `event go state a -> b`.
    pub message: String,
    /// When the transition was logged.
    pub timestamp: DateTime<Utc>,
}

/// Shared, append-only log of transitions.
///
/// Cloning the log yields another handle to the same records.
///
/// # Example
///
/// ```rust
/// use fc_fsm::builder::build;
/// use fc_fsm::core::descriptor::{event, next, state};
/// use fc_fsm::core::{EventId, StateId, TransitionLog};
///
/// const A: StateId = StateId::new(1);
/// const B: StateId = StateId::new(2);
/// const GO: EventId = EventId::new(1);
///
/// let descriptors = vec![event(GO, "go"), state(A, "a"), next(GO, B), state(B, "b")];
/// let mut table = build("log", &descriptors).unwrap();
/// let log = TransitionLog::new();
/// table.set_logger(log.logger());
///
/// let mut current = A;
/// table.step(&mut current, GO, &mut ());
///
/// assert_eq!(log.messages(), ["event go state a -> b"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionLog {
    records: Arc<Mutex<Vec<TransitionRecord>>>,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A logger that appends to this log, for [`crate::dispatch::TransitionTable::set_logger`].
    pub fn logger<C: 'static>(&self) -> Logger<C> {
        let log = self.clone();
        Logger::new(move |_context: &C, message: &str| log.record(message))
    }

    /// Append a message stamped with the current time.
    pub fn record(&self, message: &str) {
        self.lock().push(TransitionRecord {
            message: message.to_string(),
            timestamp: Utc::now(),
        });
    }

    /// Snapshot of all records, oldest first.
    pub fn records(&self) -> Vec<TransitionRecord> {
        self.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|record| record.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Time between the first and last record, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        let records = self.lock();
        match (records.first(), records.last()) {
            (Some(first), Some(last)) => last
                .timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok(),
            _ => None,
        }
    }

    // Records are plain data, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<TransitionRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_log_is_empty() {
        let log = TransitionLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.duration().is_none());
    }

    #[test]
    fn records_preserve_order() {
        let log = TransitionLog::new();
        log.record("event a state x -> y");
        log.record("event b state y -> z");

        assert_eq!(
            log.messages(),
            ["event a state x -> y", "event b state y -> z"]
        );
        let records = log.records();
        assert!(records[0].timestamp <= records[1].timestamp);
        assert!(log.duration().is_some());
    }

    #[test]
    fn clones_share_records() {
        let log = TransitionLog::new();
        let handle = log.clone();
        handle.record("event a state x -> y");

        assert_eq!(log.len(), 1);
        log.clear();
        assert!(handle.is_empty());
    }

    #[test]
    fn logger_appends_to_log() {
        let log = TransitionLog::new();
        let logger: Logger<u8> = log.logger();

        logger.log(&0, "event go state a -> b");

        assert_eq!(log.messages(), ["event go state a -> b"]);
    }

    #[test]
    fn record_serializes() {
        let record = TransitionRecord {
            message: "event go state a -> b".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: TransitionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
