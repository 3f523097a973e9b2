//! Player preferences
//!
//! Persisted as JSON in LocalStorage on the web. Native builds read an
//! optional JSON file named by `FIREWORK_INVADERS_SETTINGS`.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PROJECTILES;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cap on fireworks in flight at once (clicks beyond it are ignored)
    pub max_projectiles: usize,
    /// Ease the drawn launcher toward the pointer instead of snapping
    pub launcher_glide: bool,
    /// Reduced motion (disables launcher glide)
    pub reduced_motion: bool,
    /// Log at debug level (wave ticks, firework lifecycle)
    pub debug_log: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_projectiles: MAX_PROJECTILES,
            launcher_glide: false,
            reduced_motion: false,
            debug_log: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "firework_invaders_settings";

    /// Environment variable naming a settings file (native only)
    pub const ENV_VAR: &'static str = "FIREWORK_INVADERS_SETTINGS";

    /// Parse settings JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective launcher glide (respects reduced_motion)
    pub fn effective_launcher_glide(&self) -> bool {
        self.launcher_glide && !self.reduced_motion
    }

    /// Log level the platform logger should start at
    pub fn log_level(&self) -> log::Level {
        if self.debug_log {
            log::Level::Debug
        } else {
            log::Level::Info
        }
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
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `FIREWORK_INVADERS_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings in {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_projectiles, MAX_PROJECTILES);
        assert!(!settings.effective_launcher_glide());
        assert_eq!(settings.log_level(), log::Level::Info);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "launcher_glide": true }"#).unwrap();
        assert!(settings.launcher_glide);
        assert_eq!(settings.max_projectiles, MAX_PROJECTILES);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            max_projectiles: 8,
            launcher_glide: true,
            reduced_motion: true,
            debug_log: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_reduced_motion_overrides_glide() {
        let settings = Settings {
            launcher_glide: true,
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_launcher_glide());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }
}
