//! Feature-flag settings and the activation gate.
//!
//! Storage accepts any combination of flags -- the UI is responsible
//! for disabling dependent toggles. Dependencies between flags are
//! therefore re-derived here at use time instead of trusting the
//! stored booleans (e.g. a stored `emergency_override_enabled = true`
//! means nothing unless biometric and AI are both on).

use serde::{Deserialize, Serialize};

/// Application feature flags.
///
/// Serialized as JSON under the `sos_settings` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub watch_enabled: bool,
    #[serde(default)]
    pub watch_gesture_enabled: bool,
    #[serde(default)]
    pub ai_enabled: bool,
    #[serde(default)]
    pub auto_sos_enabled: bool,
    #[serde(default)]
    pub voice_enabled: bool,
    #[serde(default)]
    pub offline_voice_enabled: bool,
    #[serde(default = "default_true")]
    pub biometric_enabled: bool,
    #[serde(default)]
    pub emergency_override_enabled: bool,
    #[serde(default)]
    pub wear_os_enabled: bool,
    #[serde(default = "default_true")]
    pub google_maps_enabled: bool,
    #[serde(default)]
    pub gemini_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            watch_enabled: false,
            watch_gesture_enabled: false,
            ai_enabled: false,
            auto_sos_enabled: false,
            voice_enabled: false,
            offline_voice_enabled: false,
            biometric_enabled: true,
            emergency_override_enabled: false,
            wear_os_enabled: false,
            google_maps_enabled: true,
            gemini_enabled: false,
        }
    }
}

impl Settings {
    /// Whether a trigger must pass the authentication gate first.
    pub fn requires_authentication(&self) -> bool {
        self.biometric_enabled
    }

    /// Whether the emergency override may bypass authentication.
    /// Only meaningful when biometric and AI are both enabled.
    pub fn permits_override(&self) -> bool {
        self.biometric_enabled && self.ai_enabled && self.emergency_override_enabled
    }

    /// Whether automated (AI-detected) triggers are permitted.
    pub fn permits_auto_trigger(&self) -> bool {
        self.ai_enabled && self.auto_sos_enabled
    }

    /// Whether any watch-side trigger path is active.
    /// Gesture and Wear OS flags only count while the watch itself is on.
    pub fn watch_triggers_active(&self) -> bool {
        self.watch_enabled && (self.watch_gesture_enabled || self.wear_os_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_onboarding() {
        let s = Settings::default();
        assert!(s.biometric_enabled);
        assert!(s.google_maps_enabled);
        assert!(!s.watch_enabled);
        assert!(!s.ai_enabled);
        assert!(!s.auto_sos_enabled);
        assert!(!s.emergency_override_enabled);
    }

    #[test]
    fn deserialize_empty_object_uses_defaults() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn auth_gate_follows_biometric_flag() {
        let mut s = Settings::default();
        assert!(s.requires_authentication());
        s.biometric_enabled = false;
        assert!(!s.requires_authentication());
    }

    #[test]
    fn override_requires_full_dependency_chain() {
        // Stored flags can be inconsistent; the predicate must not
        // trust emergency_override_enabled on its own.
        let s = Settings {
            emergency_override_enabled: true,
            ai_enabled: false,
            biometric_enabled: true,
            ..Settings::default()
        };
        assert!(!s.permits_override());

        let s = Settings {
            emergency_override_enabled: true,
            ai_enabled: true,
            biometric_enabled: false,
            ..Settings::default()
        };
        assert!(!s.permits_override());

        let s = Settings {
            emergency_override_enabled: true,
            ai_enabled: true,
            biometric_enabled: true,
            ..Settings::default()
        };
        assert!(s.permits_override());
    }

    #[test]
    fn auto_trigger_requires_ai() {
        let s = Settings {
            auto_sos_enabled: true,
            ai_enabled: false,
            ..Settings::default()
        };
        assert!(!s.permits_auto_trigger());

        let s = Settings {
            auto_sos_enabled: true,
            ai_enabled: true,
            ..Settings::default()
        };
        assert!(s.permits_auto_trigger());
    }

    #[test]
    fn watch_triggers_require_watch_enabled() {
        let s = Settings {
            watch_gesture_enabled: true,
            wear_os_enabled: true,
            watch_enabled: false,
            ..Settings::default()
        };
        assert!(!s.watch_triggers_active());

        let s = Settings {
            watch_gesture_enabled: true,
            watch_enabled: true,
            ..Settings::default()
        };
        assert!(s.watch_triggers_active());
    }

    #[test]
    fn camel_case_wire_format() {
        let s = Settings::default();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"biometricEnabled\":true"));
        assert!(json.contains("\"autoSosEnabled\":false"));
    }
}
