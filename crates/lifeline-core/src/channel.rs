//! Single-contact channel dispatch.
//!
//! A dispatch hands one (contact, payload) pair to the host platform.
//! On a native host the corresponding tel:/sms: action is launched and
//! the handoff itself counts as delivery -- actual receipt can never
//! be confirmed from here. On a non-native host the action is
//! simulated and described instead. Host failures are caught locally
//! and reported as `Failed` so one bad contact can never abort its
//! siblings.

use serde::{Deserialize, Serialize};

use crate::profile::Contact;

/// Outbound channel kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Call,
    Sms,
}

impl Channel {
    pub fn label(self) -> &'static str {
        match self {
            Channel::Call => "call",
            Channel::Sms => "SMS",
        }
    }
}

/// Tri-state result of one dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchOutcome {
    /// Handoff to the OS channel succeeded (not a delivery receipt).
    Delivered,
    /// Non-native host; the action was described, not performed.
    Simulated,
    /// Unusable number or host failure; siblings are unaffected.
    Failed,
}

impl DispatchOutcome {
    /// Delivered and simulated attempts both count toward the
    /// activation success total.
    pub fn is_success(self) -> bool {
        matches!(self, DispatchOutcome::Delivered | DispatchOutcome::Simulated)
    }
}

/// Per-contact, per-channel dispatch detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRecord {
    pub contact_name: String,
    pub phone: String,
    pub channel: Channel,
    pub outcome: DispatchOutcome,
    /// Human-readable description (simulation text or failure reason).
    pub detail: Option<String>,
}

/// The telephony/messaging capability of the host platform.
///
/// `place_call` and `send_message` are fire-and-forget: they launch
/// the OS handler and return once the handoff is made.
pub trait ChannelHost {
    /// Whether real tel:/sms: actions are available here.
    fn is_native(&self) -> bool;

    /// Launch a call to an already-normalized number.
    fn place_call(&self, phone: &str) -> Result<(), Box<dyn std::error::Error>>;

    /// Launch an SMS draft to an already-normalized number.
    fn send_message(&self, phone: &str, body: &str) -> Result<(), Box<dyn std::error::Error>>;
}

/// Strip everything but digits from a raw phone number.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Dispatch one message to one contact over one channel.
///
/// Never returns an error; every failure mode is folded into the
/// record's outcome.
pub fn dispatch(
    host: &dyn ChannelHost,
    channel: Channel,
    contact: &Contact,
    payload: &str,
) -> DispatchRecord {
    let phone = normalize_phone(&contact.phone);
    if phone.is_empty() {
        return DispatchRecord {
            contact_name: contact.name.clone(),
            phone,
            channel,
            outcome: DispatchOutcome::Failed,
            detail: Some(format!("Unusable phone number '{}'", contact.phone)),
        };
    }

    if !host.is_native() {
        let detail = match channel {
            Channel::Call => format!(
                "Would call {} at {} on a real device",
                contact.name, contact.phone
            ),
            Channel::Sms => format!("To {}: {}", contact.name, truncate(payload, 50)),
        };
        return DispatchRecord {
            contact_name: contact.name.clone(),
            phone,
            channel,
            outcome: DispatchOutcome::Simulated,
            detail: Some(detail),
        };
    }

    let result = match channel {
        Channel::Call => host.place_call(&phone),
        Channel::Sms => host.send_message(&phone, payload),
    };
    match result {
        Ok(()) => DispatchRecord {
            contact_name: contact.name.clone(),
            phone,
            channel,
            outcome: DispatchOutcome::Delivered,
            detail: None,
        },
        Err(e) => DispatchRecord {
            contact_name: contact.name.clone(),
            phone,
            channel,
            outcome: DispatchOutcome::Failed,
            detail: Some(e.to_string()),
        },
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    }
}

/// Native host: launches tel:/sms: URIs through the OS handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriHost;

impl ChannelHost for UriHost {
    fn is_native(&self) -> bool {
        true
    }

    fn place_call(&self, phone: &str) -> Result<(), Box<dyn std::error::Error>> {
        open::that(format!("tel:{phone}"))?;
        Ok(())
    }

    fn send_message(&self, phone: &str, body: &str) -> Result<(), Box<dyn std::error::Error>> {
        open::that(format!("sms:{phone}?body={}", urlencoding::encode(body)))?;
        Ok(())
    }
}

/// Non-native host: every dispatch is simulated. The default for
/// environments without a telephony capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedHost;

impl ChannelHost for SimulatedHost {
    fn is_native(&self) -> bool {
        false
    }

    fn place_call(&self, _phone: &str) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    fn send_message(&self, _phone: &str, _body: &str) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}
