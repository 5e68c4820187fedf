//! Lifecycle events for document mapping operations.
//!
//! The repository emits a [`StoreEvent`] around each mapping operation and
//! hands it to every registered [`StoreEventListener`]. Dispatch is
//! best-effort: listeners observe operations, they never fail them.
//!
//! [`LoggingListener`] is the built-in diagnostic observer; it logs every
//! lifecycle event at debug level with structured fields.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A document mapping lifecycle event.
///
/// Load events fire once per materialized document, including per item of a
/// streamed read, matching the per-entity granularity of mapping callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// Emitted before a document is written.
    BeforeSave {
        collection: String,
        /// Absent when the store has not assigned an identifier yet.
        id: Option<String>,
    },
    /// Emitted after a document was written.
    AfterSave {
        collection: String,
        id: Option<String>,
    },
    /// Emitted after a document was read and mapped.
    AfterLoad {
        collection: String,
        id: Option<String>,
    },
    /// Emitted before a document is deleted.
    BeforeDelete { collection: String, id: String },
    /// Emitted after a document was deleted.
    AfterDelete { collection: String, id: String },
}

impl StoreEvent {
    /// Collection the event refers to.
    pub fn collection(&self) -> &str {
        match self {
            StoreEvent::BeforeSave { collection, .. }
            | StoreEvent::AfterSave { collection, .. }
            | StoreEvent::AfterLoad { collection, .. }
            | StoreEvent::BeforeDelete { collection, .. }
            | StoreEvent::AfterDelete { collection, .. } => collection,
        }
    }

    /// Stable name for the event kind, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreEvent::BeforeSave { .. } => "before_save",
            StoreEvent::AfterSave { .. } => "after_save",
            StoreEvent::AfterLoad { .. } => "after_load",
            StoreEvent::BeforeDelete { .. } => "before_delete",
            StoreEvent::AfterDelete { .. } => "after_delete",
        }
    }

    /// Identifier of the affected document, when known.
    pub fn id(&self) -> Option<&str> {
        match self {
            StoreEvent::BeforeSave { id, .. }
            | StoreEvent::AfterSave { id, .. }
            | StoreEvent::AfterLoad { id, .. } => id.as_deref(),
            StoreEvent::BeforeDelete { id, .. } | StoreEvent::AfterDelete { id, .. } => Some(id),
        }
    }
}

/// Observer of document mapping lifecycle events.
///
/// Implementations must be Send + Sync; the repository invokes them from
/// whatever task is driving the operation.
#[async_trait]
pub trait StoreEventListener: Send + Sync {
    /// Handle a lifecycle event.
    async fn on_event(&self, event: &StoreEvent);
}

/// Diagnostic listener that logs every lifecycle event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingListener;

#[async_trait]
impl StoreEventListener for LoggingListener {
    async fn on_event(&self, event: &StoreEvent) {
        debug!(
            kind = event.kind(),
            collection = %event.collection(),
            id = event.id().unwrap_or("<unassigned>"),
            "store lifecycle event"
        );
    }
}

/// Listener that records every event it sees, for assertions in tests.
#[cfg(any(test, feature = "test-utils"))]
pub struct RecordingListener {
    events: std::sync::Mutex<Vec<StoreEvent>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl RecordingListener {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of all events observed so far, in dispatch order.
    pub fn events(&self) -> Vec<StoreEvent> {
        self.events
            .lock()
            .expect("Listener lock poisoned - recorded events are in inconsistent state")
            .clone()
    }

    /// Names of the observed event kinds, in dispatch order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events().iter().map(|e| e.kind()).collect()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for RecordingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl StoreEventListener for RecordingListener {
    async fn on_event(&self, event: &StoreEvent) {
        self.events
            .lock()
            .expect("Listener lock poisoned - recorded events are in inconsistent state")
            .push(event.clone());
    }
}
