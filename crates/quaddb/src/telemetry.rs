//! Access telemetry for operational visibility.
//!
//! Collections report what they touch to an injected [`TelemetrySink`]. The
//! in-memory [`ActivityTracker`] keeps the most recent activity so it can be
//! shown to an operator. Nothing here is persisted or meant as an audit log.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Events emitted by collections after a successful document operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessEvent {
    /// A document was created.
    DocumentCreated {
        /// Name of the collection.
        collection: String,
        /// Id of the new document.
        id:         String,
    },
    /// A document was read.
    DocumentRead {
        /// Name of the collection.
        collection: String,
        /// Id of the document read.
        id:         String,
    },
    /// A document payload was replaced.
    DocumentUpdated {
        /// Name of the collection.
        collection: String,
        /// Id of the document updated.
        id:         String,
    },
    /// A document was removed.
    DocumentDeleted {
        /// Name of the collection.
        collection: String,
        /// Id of the document removed.
        id:         String,
    },
}

impl AccessEvent {
    /// Name of the collection the event happened in.
    pub fn collection(&self) -> &str {
        match *self {
            Self::DocumentCreated {
                ref collection, ..
            } |
            Self::DocumentRead {
                ref collection, ..
            } |
            Self::DocumentUpdated {
                ref collection, ..
            } |
            Self::DocumentDeleted {
                ref collection, ..
            } => collection,
        }
    }
}

/// Receiver of access events.
pub trait TelemetrySink {
    /// Records one event. Must not fail the operation that produced it.
    fn record(&self, event: &AccessEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn record(&self, _event: &AccessEvent) {}
}

/// Most recent activity seen by an [`ActivityTracker`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    /// Collection of the last document read.
    pub last_used_collection: Option<String>,
    /// Time of the last read or update.
    pub last_update_time:     Option<DateTime<Utc>>,
    /// Id of the last document created.
    pub last_added_record:    Option<String>,
    /// Id of the last document read.
    pub last_read_record:     Option<String>,
}

/// In-memory sink that keeps an [`ActivitySnapshot`].
#[derive(Debug, Default)]
pub struct ActivityTracker {
    state: RwLock<ActivitySnapshot>,
}

impl ActivityTracker {
    pub fn new() -> Self { Self::default() }

    /// Copy of the current activity.
    pub fn snapshot(&self) -> ActivitySnapshot {
        match self.state.read() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TelemetrySink for ActivityTracker {
    fn record(&self, event: &AccessEvent) {
        let mut state = match self.state.write() {
            Ok(state) => state,
            Err(poisoned) => {
                warn!("Activity tracker lock was poisoned, recovering");
                poisoned.into_inner()
            },
        };

        trace!("Recording access to collection '{}'", event.collection());
        match *event {
            AccessEvent::DocumentCreated {
                ref id, ..
            } => state.last_added_record = Some(id.clone()),
            AccessEvent::DocumentRead {
                ref collection,
                ref id,
            } => {
                state.last_used_collection = Some(collection.clone());
                state.last_update_time = Some(Utc::now());
                state.last_read_record = Some(id.clone());
            },
            AccessEvent::DocumentUpdated {
                ..
            } => state.last_update_time = Some(Utc::now()),
            AccessEvent::DocumentDeleted {
                ..
            } => {},
        }
    }
}
