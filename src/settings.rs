//! Session settings and preferences
//!
//! Persisted separately from game saves (LocalStorage on web, a JSON file on
//! native).

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;
use crate::sim::Venue;

/// Driver-side preferences for a play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Venue picked when a new session starts
    pub venue: Venue,
    /// Fixed crowd seed (None = random each session)
    pub seed: Option<u64>,

    // === Frame loop ===
    /// Largest delta fed to a single tick (seconds)
    pub max_frame_dt: f64,

    // === Stadium events ===
    /// Fire mascot/scoreboard events on a timer
    pub auto_events: bool,
    /// Seconds between automatic stadium events
    pub event_interval: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            venue: Venue::Baseball,
            seed: None,
            max_frame_dt: MAX_FRAME_DT,
            auto_events: true,
            event_interval: 8.0,
        }
    }
}

impl Settings {
    /// Settings for a given venue, everything else default
    pub fn for_venue(venue: Venue) -> Self {
        Self {
            venue,
            ..Self::default()
        }
    }

    /// Clamp a raw frame delta the way the driver should before ticking
    pub fn clamp_dt(&self, dt: f64) -> f64 {
        if dt.is_finite() {
            dt.clamp(0.0, self.effective_max_dt())
        } else {
            0.0
        }
    }

    /// Frame cap, falling back to the default when configured nonsensically
    pub fn effective_max_dt(&self) -> f64 {
        if self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0 {
            self.max_frame_dt
        } else {
            MAX_FRAME_DT
        }
    }

    /// Parse settings JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "stadium_wave_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
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

    /// Load settings from a JSON file; a missing file means defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

/// Timer for automatic stadium events
#[derive(Debug, Clone, Default)]
pub struct EventClock {
    elapsed: f64,
}

impl EventClock {
    /// Advance by `dt`; true when the next stadium event is due
    pub fn advance(&mut self, settings: &Settings, dt: f64) -> bool {
        if !settings.auto_events {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed < settings.event_interval {
            return false;
        }
        self.elapsed = 0.0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.venue, Venue::Baseball);
        assert_eq!(settings.max_frame_dt, 0.1);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_clamp_dt() {
        let settings = Settings::default();
        assert_eq!(settings.clamp_dt(0.016), 0.016);
        assert_eq!(settings.clamp_dt(2.5), 0.1);
        assert_eq!(settings.clamp_dt(-1.0), 0.0);
        assert_eq!(settings.clamp_dt(f64::NAN), 0.0);

        let broken = Settings {
            max_frame_dt: -3.0,
            ..Settings::default()
        };
        assert_eq!(broken.clamp_dt(1.0), MAX_FRAME_DT);
    }

    #[test]
    fn test_event_clock() {
        let settings = Settings {
            event_interval: 1.0,
            ..Settings::default()
        };
        let mut clock = EventClock::default();
        let fired: Vec<bool> = (0..25).map(|_| clock.advance(&settings, 0.1)).collect();
        assert_eq!(fired.iter().filter(|&&f| f).count(), 2);
        assert!(!fired[0]);

        let quiet = Settings {
            auto_events: false,
            ..settings
        };
        let mut clock = EventClock::default();
        assert!((0..100).all(|_| !clock.advance(&quiet, 0.1)));
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{"venue": "cricket", "seed": 7}"#);
        assert_eq!(settings.venue, Venue::Cricket);
        assert_eq!(settings.seed, Some(7));
        assert!(settings.auto_events);
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert_eq!(Settings::from_json("{oops"), Settings::default());
        assert_eq!(Settings::from_json(r#"{"venue": "moon"}"#), Settings::default());
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("stadium_wave_settings_{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(42),
            auto_events: false,
            ..Settings::for_venue(Venue::Soccer)
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
        let _ = std::fs::remove_file(&path);

        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
