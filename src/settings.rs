//! Player preferences
//!
//! Persisted separately from tuning in LocalStorage on the web build.

use serde::{Deserialize, Serialize};

use crate::input::KeyBindings;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keyboard layout
    pub bindings: KeyBindings,
    /// Opacity of the pause overlay (0 - 255)
    pub pause_overlay_alpha: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            pause_overlay_alpha: 150,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "arena_shooter_settings";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;

    #[test]
    fn test_partial_settings_json() {
        let settings = Settings::from_json(r#"{ "pause_overlay_alpha": 200 }"#).unwrap();
        assert_eq!(settings.pause_overlay_alpha, 200);
        assert_eq!(settings.bindings.action_for("Escape"), Some(Action::Pause));
    }

    #[test]
    fn test_settings_roundtrip_keeps_custom_binding() {
        let mut settings = Settings::default();
        settings.bindings.bind("p", Action::Pause);
        let json = serde_json::to_string(&settings).unwrap();
        let restored = Settings::from_json(&json).unwrap();
        assert_eq!(restored.bindings.action_for("P"), Some(Action::Pause));
    }
}
