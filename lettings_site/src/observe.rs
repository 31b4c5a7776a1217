//! Observer callbacks fired by the record sinks.
//!
//! The sinks invoke every registered [`RecordObserver`] synchronously
//! after a successful create or delete. Observers are registered once at
//! process start and carry no business logic; nothing in the sinks
//! depends on their behavior.

/// Callback interface for record lifecycle events.
pub trait RecordObserver: Send + Sync {
    /// Called after a row was created in `table` with the given id.
    fn created(&self, table: &str, id: i32) {
        let _ = (table, id);
    }

    /// Called after the row with the given id was deleted from `table`.
    fn deleted(&self, table: &str, id: i32) {
        let _ = (table, id);
    }
}

/// Registry of observers shared by the sinks.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Box<dyn RecordObserver>>,
}

impl ObserverSet {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer; it stays registered for the life of the set.
    pub fn register(&mut self, observer: Box<dyn RecordObserver>) {
        self.observers.push(observer);
    }

    pub(crate) fn notify_created(&self, table: &str, id: i32) {
        for o in &self.observers {
            o.created(table, id);
        }
    }

    pub(crate) fn notify_deleted(&self, table: &str, id: i32) {
        for o in &self.observers {
            o.deleted(table, id);
        }
    }
}

/// Default observer: logs lifecycle events at debug level.
pub struct TracingObserver;

impl RecordObserver for TracingObserver {
    fn created(&self, table: &str, id: i32) {
        tracing::debug!(table, id, "record created");
    }

    fn deleted(&self, table: &str, id: i32) {
        tracing::debug!(table, id, "record deleted");
    }
}
