//! Activation lifecycle events.
//!
//! Every state change during an activation produces an event. The
//! presentation layer subscribes to choreograph its responder stages;
//! the core never depends on who is listening.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::channel::{Channel, DispatchOutcome};
use crate::journal::SosMethod;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActivationEvent {
    Triggered {
        event_id: String,
        method: SosMethod,
        at: DateTime<Utc>,
    },
    AuthRequested {
        at: DateTime<Utc>,
    },
    AuthDenied {
        at: DateTime<Utc>,
    },
    LocationAcquired {
        latitude: f64,
        longitude: f64,
        at: DateTime<Utc>,
    },
    /// Soft failure: dispatch continues without coordinates.
    LocationUnavailable {
        at: DateTime<Utc>,
    },
    ChannelDispatched {
        contact_name: String,
        channel: Channel,
        outcome: DispatchOutcome,
        at: DateTime<Utc>,
    },
    /// The final journal write failed after fan-out; the summary is
    /// still produced but the stored status may lag.
    JournalLagging {
        event_id: String,
        at: DateTime<Utc>,
    },
    Completed {
        event_id: String,
        success_count: usize,
        attempts: usize,
        at: DateTime<Utc>,
    },
}

/// Observer for activation events.
pub trait EventSink {
    fn publish(&self, event: &ActivationEvent);
}

/// Discards everything. The default when nobody is listening.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: &ActivationEvent) {}
}

/// Collects events in order; used by tests and the CLI.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: std::cell::RefCell<Vec<ActivationEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ActivationEvent> {
        self.events.borrow().clone()
    }
}

impl EventSink for CollectingSink {
    fn publish(&self, event: &ActivationEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
