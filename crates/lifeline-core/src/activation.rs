//! SOS activation orchestrator.
//!
//! One logical sequence per trigger, no parallel workers:
//!
//! ```text
//! Idle -> AuthPending? -> Dispatching -> Finalizing -> Idle
//! ```
//!
//! `AuthPending` is skipped entirely when settings do not require
//! authentication. Only a missing profile or a denied gate abort the
//! run -- and both do so before any journal entry exists. Past the
//! gate, every failure is downgraded where it happens and the caller
//! always gets a terminal summary. Partial success is the norm: the
//! orchestrator attempts every contact and reports counts rather than
//! failing the whole activation over one bad phone number.
//!
//! Collaborators and the settings snapshot are explicit parameters;
//! there is no process-wide state. `activate` takes `&mut self`, so
//! one orchestrator never runs two interleaved activations.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::Authenticator;
use crate::channel::ChannelHost;
use crate::error::ActivationError;
use crate::events::{ActivationEvent, EventSink};
use crate::fanout::{fan_out, FanOutReport};
use crate::journal::{Journal, SosEvent, SosMethod};
use crate::location::{maps_link_or_placeholder, LocationAcquirer, DEFAULT_FIX_TIMEOUT};
use crate::notify::Notifier;
use crate::profile::User;
use crate::settings::Settings;
use crate::storage::Store;

/// Orchestrator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationPhase {
    Idle,
    AuthPending,
    Dispatching,
    Finalizing,
}

/// Terminal summary of one activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationReport {
    pub event_id: String,
    pub success_count: usize,
    pub attempts: usize,
    pub no_contacts: bool,
    pub location_attached: bool,
    pub summary: String,
    /// Per-contact detail for observability.
    pub fan_out: FanOutReport,
}

impl ActivationReport {
    /// Overall result: at least one delivered or simulated outcome.
    pub fn succeeded(&self) -> bool {
        self.success_count > 0
    }
}

/// Composes gate, location, fan-out, and journal into the single
/// entry point the surrounding UI calls.
pub struct Activation<'a> {
    host: &'a dyn ChannelHost,
    acquirer: LocationAcquirer<'a>,
    authenticator: &'a dyn Authenticator,
    notifier: &'a dyn Notifier,
    store: &'a dyn Store,
    sink: &'a dyn EventSink,
    phase: ActivationPhase,
}

impl<'a> Activation<'a> {
    pub fn new(
        host: &'a dyn ChannelHost,
        acquirer: LocationAcquirer<'a>,
        authenticator: &'a dyn Authenticator,
        notifier: &'a dyn Notifier,
        store: &'a dyn Store,
        sink: &'a dyn EventSink,
    ) -> Self {
        Self {
            host,
            acquirer,
            authenticator,
            notifier,
            store,
            sink,
            phase: ActivationPhase::Idle,
        }
    }

    pub fn phase(&self) -> ActivationPhase {
        self.phase
    }

    /// Trigger an SOS for `user` with a settings snapshot taken at
    /// trigger time (never re-read mid-dispatch).
    pub fn activate(
        &mut self,
        user: Option<&User>,
        settings: &Settings,
        method: SosMethod,
    ) -> Result<ActivationReport, ActivationError> {
        let user = user.ok_or(ActivationError::NoProfile)?;

        if method == SosMethod::Ai && !settings.permits_auto_trigger() {
            return Err(ActivationError::AutoTriggerDenied);
        }

        if settings.requires_authentication() && !settings.permits_override() {
            self.phase = ActivationPhase::AuthPending;
            self.sink
                .publish(&ActivationEvent::AuthRequested { at: Utc::now() });
            if !self.authenticator.authenticate() {
                self.sink
                    .publish(&ActivationEvent::AuthDenied { at: Utc::now() });
                self.phase = ActivationPhase::Idle;
                return Err(ActivationError::AuthDenied);
            }
        }

        self.phase = ActivationPhase::Dispatching;
        let journal = Journal::new(self.store);

        // The "triggered" record must exist before any dispatch so a
        // crash mid-dispatch still leaves an audit trail.
        let mut event = SosEvent::open(method);
        journal.record(&event)?;
        self.sink.publish(&ActivationEvent::Triggered {
            event_id: event.id.clone(),
            method,
            at: Utc::now(),
        });

        if let Err(e) = self.notifier.notify(
            "SOS Activated",
            "Emergency contacts are being notified of your situation.",
        ) {
            eprintln!("notification failed: {e}");
        }

        let position = self.acquirer.acquire(DEFAULT_FIX_TIMEOUT);
        match position {
            Some(coords) => {
                event.attach_location(coords);
                self.sink.publish(&ActivationEvent::LocationAcquired {
                    latitude: coords.latitude,
                    longitude: coords.longitude,
                    at: Utc::now(),
                });
            }
            None => {
                self.sink
                    .publish(&ActivationEvent::LocationUnavailable { at: Utc::now() });
            }
        }

        let message = format!(
            "EMERGENCY: {} needs help! Location: {}",
            user.name,
            maps_link_or_placeholder(position.as_ref())
        );

        let report = fan_out(self.host, &user.contacts, &message);
        for record in &report.outcomes {
            self.sink.publish(&ActivationEvent::ChannelDispatched {
                contact_name: record.contact_name.clone(),
                channel: record.channel,
                outcome: record.outcome,
                at: Utc::now(),
            });
        }

        self.phase = ActivationPhase::Finalizing;
        event.close();
        if let Err(e) = journal.record(&event) {
            // The summary still goes back to the caller; only the
            // stored status lags.
            eprintln!("final journal write failed: {e}");
            self.sink.publish(&ActivationEvent::JournalLagging {
                event_id: event.id.clone(),
                at: Utc::now(),
            });
        }

        let summary = summarize(&report);
        self.sink.publish(&ActivationEvent::Completed {
            event_id: event.id.clone(),
            success_count: report.success_count,
            attempts: report.attempts(),
            at: Utc::now(),
        });
        self.phase = ActivationPhase::Idle;

        Ok(ActivationReport {
            event_id: event.id,
            success_count: report.success_count,
            attempts: report.attempts(),
            no_contacts: report.no_contacts,
            location_attached: position.is_some(),
            summary,
            fan_out: report,
        })
    }

    /// Cancel an SOS in flight or after the fact.
    ///
    /// Deliberately unsupported: the cancellation semantics (abort
    /// mid-dispatch vs. post-hoc status correction) are undefined, and
    /// pretending success would falsify the journal.
    pub fn cancel(&mut self, _event_id: &str) -> Result<(), ActivationError> {
        Err(ActivationError::CancelUnsupported)
    }
}

fn summarize(report: &FanOutReport) -> String {
    if report.no_contacts {
        "No emergency contacts configured; nothing was dispatched.".to_string()
    } else if report.success_count > 0 {
        format!(
            "SOS activated: {} of {} emergency actions completed.",
            report.success_count,
            report.attempts()
        )
    } else {
        format!(
            "SOS completed without reaching anyone: all {} attempts failed.",
            report.attempts()
        )
    }
}
