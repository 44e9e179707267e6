//! JavaScript bridge
//!
//! Wraps a [`WaveEngine`] in a handle the page constructs once and calls
//! every animation frame. All results cross the boundary as JSON strings.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;

use crate::engine::{InitTarget, WaveEngine};
use crate::highscores::{HighScoreEntry, HighScores};
use crate::settings::{EventClock, Settings};

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Failed to serialize response: {}", e);
        String::from("null")
    })
}

/// JS sector index; negatives are never a real sector
fn sector_index(id: i32) -> Option<usize> {
    usize::try_from(id).ok()
}

#[wasm_bindgen]
pub struct WaveEngineHandle {
    engine: WaveEngine,
    settings: Settings,
    /// Stadium event picks, kept apart from the crowd draw
    rng: Pcg32,
    event_clock: EventClock,
}

#[wasm_bindgen]
impl WaveEngineHandle {
    /// Create an engine from stored settings, seeded from the page clock
    /// unless the settings fix a seed
    #[wasm_bindgen(constructor)]
    pub fn new() -> WaveEngineHandle {
        console_error_panic_hook::set_once();
        // Ignore the error if a previous handle already installed the logger
        let _ = console_log::init_with_level(log::Level::Info);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Stadium Wave engine created (seed {})", seed);
        WaveEngineHandle {
            engine: WaveEngine::new(seed),
            rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
            event_clock: EventClock::default(),
            settings,
        }
    }

    /// Venue id ("baseball", "soccer", "cricket") or a sector count
    pub fn init_game(&mut self, venue: &str) -> String {
        to_json(&self.engine.init(InitTarget::parse(venue)))
    }

    /// Start the venue picked in settings
    pub fn init_default_game(&mut self) -> String {
        to_json(&self.engine.init(InitTarget::Venue(self.settings.venue)))
    }

    pub fn init_game_with_sectors(&mut self, sectors: u32) -> String {
        to_json(&self.engine.init(InitTarget::Sectors(sectors as usize)))
    }

    /// Raw frame delta from the page; capped per settings before ticking
    pub fn update_game(&mut self, dt: f64) -> String {
        let dt = self.settings.clamp_dt(dt);
        if self.event_clock.advance(&self.settings, dt) {
            self.engine.trigger_random_event(&mut self.rng);
        }
        to_json(&self.engine.tick(dt))
    }

    pub fn get_game_state(&self) -> String {
        to_json(&self.engine.state())
    }

    pub fn get_events(&mut self) -> String {
        to_json(&self.engine.get_events())
    }

    pub fn start_wave_at(&mut self, sector: i32) -> String {
        match sector_index(sector) {
            Some(id) => to_json(&self.engine.start_wave_at(id)),
            None => to_json(&serde_json::json!({ "success": false, "sector": sector })),
        }
    }

    pub fn boost_sector_energy(&mut self, sector: i32) -> String {
        match sector_index(sector) {
            Some(id) => to_json(&self.engine.boost_sector_energy(id)),
            None => to_json(&serde_json::json!({ "boosted": sector })),
        }
    }

    /// `sector` < 0 means "no target"
    pub fn trigger_event(&mut self, event: &str, sector: i32) -> String {
        to_json(&self.engine.trigger_named_event(event, sector_index(sector)))
    }

    pub fn save_game(&self) -> String {
        self.engine.save()
    }

    pub fn load_game(&mut self, save_data: &str) -> String {
        to_json(&self.engine.load(save_data))
    }

    pub fn get_settings(&self) -> String {
        to_json(&self.settings)
    }

    /// Replace and store settings; a new fixed seed applies from the next init
    pub fn set_settings(&mut self, json: &str) -> String {
        let settings = Settings::from_json(json);
        if let Some(seed) = settings.seed.filter(|&s| Some(s) != self.settings.seed) {
            self.engine.reseed(seed);
            self.rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
        }
        settings.save();
        self.settings = settings;
        to_json(&self.settings)
    }

    /// Record the current session on the stored leaderboard
    pub fn record_high_score(&self) -> String {
        let mut scores = HighScores::load();
        let rank = scores.add(HighScoreEntry::from_game(self.engine.game(), super::now_ms()));
        if rank.is_some() {
            scores.save();
        }
        to_json(&serde_json::json!({ "rank": rank }))
    }

    pub fn get_high_scores(&self) -> String {
        to_json(&HighScores::load())
    }
}

impl Default for WaveEngineHandle {
    fn default() -> Self {
        Self::new()
    }
}
