//! Two-phase contact fan-out.
//!
//! Phase 1 places one priority call to the first contact. Phase 2
//! broadcasts the emergency SMS to every contact in list order, the
//! priority contact included again. The phases run strictly in that
//! order and never in parallel -- the priority call going out first is
//! a correctness property, not an optimization choice. Each attempt is
//! isolated: a failed contact lowers the success count and nothing
//! else.

use serde::{Deserialize, Serialize};

use crate::channel::{dispatch, Channel, ChannelHost, DispatchRecord};
use crate::profile::Contact;

/// Result of a full fan-out pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FanOutReport {
    /// Count of delivered or simulated attempts across both phases.
    pub success_count: usize,
    /// Per-contact detail in attempt order (call first, then SMS).
    pub outcomes: Vec<DispatchRecord>,
    /// Distinct condition: the contact list was empty and both phases
    /// were skipped.
    pub no_contacts: bool,
}

impl FanOutReport {
    /// Total dispatch attempts made (N contacts yield N+1 attempts).
    pub fn attempts(&self) -> usize {
        self.outcomes.len()
    }
}

/// Run the priority call and the SMS broadcast over `contacts`.
pub fn fan_out(host: &dyn ChannelHost, contacts: &[Contact], message: &str) -> FanOutReport {
    if contacts.is_empty() {
        return FanOutReport {
            success_count: 0,
            outcomes: Vec::new(),
            no_contacts: true,
        };
    }

    let mut outcomes = Vec::with_capacity(contacts.len() + 1);

    // Phase 1: one call to the priority contact.
    outcomes.push(dispatch(host, Channel::Call, &contacts[0], message));

    // Phase 2: SMS to every contact in original order.
    for contact in contacts {
        outcomes.push(dispatch(host, Channel::Sms, contact, message));
    }

    let success_count = outcomes.iter().filter(|r| r.outcome.is_success()).count();
    FanOutReport {
        success_count,
        outcomes,
        no_contacts: false,
    }
}
