use clap::Subcommand;
use lifeline_core::error::{CoreError, Result};
use lifeline_core::storage::{load_settings, save_settings, Database};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print current settings as JSON
    Show,
    /// Set a boolean flag by name (e.g. `set biometric false`)
    Set {
        /// Flag name: watch, watch-gesture, ai, auto-sos, voice,
        /// offline-voice, biometric, emergency-override, wear-os,
        /// google-maps, gemini
        key: String,
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Print the derived gate predicates
    Gate,
}

pub fn run(action: SettingsAction) -> Result<()> {
    let db = Database::open()?;
    let mut settings = load_settings(&db)?;

    match action {
        SettingsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Set { key, value } => {
            match key.as_str() {
                "watch" => settings.watch_enabled = value,
                "watch-gesture" => settings.watch_gesture_enabled = value,
                "ai" => settings.ai_enabled = value,
                "auto-sos" => settings.auto_sos_enabled = value,
                "voice" => settings.voice_enabled = value,
                "offline-voice" => settings.offline_voice_enabled = value,
                "biometric" => settings.biometric_enabled = value,
                "emergency-override" => settings.emergency_override_enabled = value,
                "wear-os" => settings.wear_os_enabled = value,
                "google-maps" => settings.google_maps_enabled = value,
                "gemini" => settings.gemini_enabled = value,
                other => return Err(CoreError::custom(format!("unknown settings flag '{other}'"))),
            }
            save_settings(&db, &settings)?;
            println!("{key} = {value}");
        }
        SettingsAction::Gate => {
            println!(
                "requires_authentication: {}",
                settings.requires_authentication()
            );
            println!("permits_override:        {}", settings.permits_override());
            println!(
                "permits_auto_trigger:    {}",
                settings.permits_auto_trigger()
            );
            println!(
                "watch_triggers_active:   {}",
                settings.watch_triggers_active()
            );
        }
    }
    Ok(())
}
