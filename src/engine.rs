//! Engine facade
//!
//! `WaveEngine` is the single object a frontend talks to. The caller owns it,
//! feeds it frame deltas, issues commands, and drains events. Every result
//! is plain serializable data.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::sim::{self, Difficulty, GameEvent, GameSnapshot, StadiumEvent, Venue, VenueConfig, WaveGame};

/// What to build on `init`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitTarget {
    /// Preset venue
    Venue(Venue),
    /// Baseball tuning with a custom ring size
    Sectors(usize),
    /// Fully custom tuning
    Config(VenueConfig),
}

impl InitTarget {
    /// Parse a venue id or a sector count; anything else means baseball
    pub fn parse(s: &str) -> Self {
        if let Ok(n) = s.trim().parse::<usize>() {
            return InitTarget::Sectors(n);
        }
        match Venue::from_id(s) {
            Some(venue) => InitTarget::Venue(venue),
            None => {
                log::warn!("Unknown venue '{}', using baseball", s);
                InitTarget::Venue(Venue::Baseball)
            }
        }
    }

    fn config(&self) -> VenueConfig {
        match *self {
            InitTarget::Venue(venue) => venue.config(),
            InitTarget::Sectors(n) => VenueConfig::with_sectors(n),
            InitTarget::Config(config) => config.clamped(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitResult {
    pub status: String,
    pub sectors: usize,
    pub venue: Venue,
    pub venue_name: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartWaveResult {
    pub success: bool,
    pub sector: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostAck {
    pub boosted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAck {
    pub triggered: String,
    pub applied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadOutcome {
    Loaded,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStatus {
    pub status: LoadOutcome,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        self.status == LoadOutcome::Loaded
    }
}

/// Owned simulation instance
pub struct WaveEngine {
    rng: Pcg32,
    game: WaveGame,
}

impl WaveEngine {
    /// New engine on the default venue, with a seeded crowd
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let game = WaveGame::new(VenueConfig::default(), &mut rng);
        Self { rng, game }
    }

    /// Reseed the crowd draw; takes effect on the next `init`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// (Re)create the simulation, discarding everything from before
    pub fn init(&mut self, target: InitTarget) -> InitResult {
        self.game = WaveGame::new(target.config(), &mut self.rng);
        let venue = self.game.venue();
        log::info!(
            "Initialized {} with {} sectors",
            venue.name(),
            self.game.num_sectors()
        );
        InitResult {
            status: "initialized".to_string(),
            sectors: self.game.num_sectors(),
            venue,
            venue_name: venue.name().to_string(),
            difficulty: venue.difficulty(),
        }
    }

    /// Advance by `dt` seconds and report the resulting state
    pub fn tick(&mut self, dt: f64) -> GameSnapshot {
        sim::tick(&mut self.game, dt);
        self.game.snapshot()
    }

    pub fn state(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    /// Drain queued events, oldest first
    pub fn get_events(&mut self) -> Vec<GameEvent> {
        self.game.drain_events()
    }

    pub fn start_wave_at(&mut self, sector: usize) -> StartWaveResult {
        StartWaveResult {
            success: sim::start_wave_at(&mut self.game, sector),
            sector,
        }
    }

    pub fn boost_sector_energy(&mut self, sector: usize) -> BoostAck {
        sim::boost_sector(&mut self.game, sector);
        BoostAck { boosted: sector }
    }

    pub fn trigger_event(&mut self, event: StadiumEvent, sector: Option<usize>) -> EventAck {
        let applied = sim::trigger(&mut self.game, event, sector);
        EventAck {
            triggered: event.as_str().to_string(),
            applied,
        }
    }

    /// Fire a stadium event picked by `rng`; targeted ones land on a random sector
    pub fn trigger_random_event<R: Rng>(&mut self, rng: &mut R) -> EventAck {
        let event = StadiumEvent::ALL[rng.random_range(0..StadiumEvent::ALL.len())];
        let target = event
            .is_targeted()
            .then(|| rng.random_range(0..self.game.num_sectors()));
        self.trigger_event(event, target)
    }

    /// String-typed variant for hosts that pass event names; unknown names are ignored
    pub fn trigger_named_event(&mut self, name: &str, sector: Option<usize>) -> EventAck {
        match StadiumEvent::from_str(name) {
            Some(event) => self.trigger_event(event, sector),
            None => {
                log::debug!("Ignoring unknown stadium event '{}'", name);
                EventAck {
                    triggered: name.to_string(),
                    applied: false,
                }
            }
        }
    }

    /// Save as JSON; an empty string if encoding failed, which `load` rejects
    pub fn save(&self) -> String {
        match persistence::save(&self.game) {
            Ok(json) => {
                log::info!("Game saved (score {})", self.game.score);
                json
            }
            Err(e) => {
                log::error!("Failed to encode save: {}", e);
                String::new()
            }
        }
    }

    pub fn load(&mut self, snapshot: &str) -> LoadStatus {
        match persistence::load(&mut self.game, snapshot) {
            Ok(()) => LoadStatus {
                status: LoadOutcome::Loaded,
                message: None,
            },
            Err(e) => {
                log::warn!("Rejected save: {}", e);
                LoadStatus {
                    status: LoadOutcome::Error,
                    message: Some(e.to_string()),
                }
            }
        }
    }

    pub fn game(&self) -> &WaveGame {
        &self.game
    }

    /// Direct access for tools and tests; values stay clamped by the sector setters
    pub fn game_mut(&mut self) -> &mut WaveGame {
        &mut self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EventKind, SectorState};

    fn prime(engine: &mut WaveEngine, id: usize) {
        let sector = engine.game_mut().sector_mut(id).unwrap();
        sector.set_energy(1.0);
        sector.set_enthusiasm(0.9);
        sector.set_fatigue(0.0);
        sector.set_distractions(0.0);
    }

    #[test]
    fn test_init_variants() {
        let mut engine = WaveEngine::new(1);

        let result = engine.init(InitTarget::parse("cricket"));
        assert_eq!(result.status, "initialized");
        assert_eq!(result.sectors, 24);
        assert_eq!(result.venue, Venue::Cricket);
        assert_eq!(result.difficulty, Difficulty::Hard);

        let result = engine.init(InitTarget::parse("12"));
        assert_eq!(result.sectors, 12);
        assert_eq!(result.venue, Venue::Baseball);

        let result = engine.init(InitTarget::parse("curling"));
        assert_eq!(result.venue, Venue::Baseball);
        assert_eq!(result.sectors, 16);

        let result = engine.init(InitTarget::parse(&usize::MAX.to_string()));
        assert_eq!(result.sectors, crate::consts::MAX_SECTORS);
        assert_eq!(engine.state().sectors.len(), crate::consts::MAX_SECTORS);

        let json = serde_json::to_value(engine.init(InitTarget::Venue(Venue::Soccer))).unwrap();
        assert_eq!(json["venue"], "soccer");
        assert_eq!(json["sectors"], 20);
        assert_eq!(json["difficulty"], "Medium");
    }

    #[test]
    fn test_init_replaces_state() {
        let mut engine = WaveEngine::new(1);
        engine.init(InitTarget::Sectors(8));
        engine.game_mut().score = 500;
        prime(&mut engine, 0);
        engine.start_wave_at(0);

        engine.init(InitTarget::Sectors(8));
        let state = engine.state();
        assert_eq!(state.score, 0);
        assert!(!state.wave_active);
        assert!(engine.get_events().is_empty());
    }

    #[test]
    fn test_start_and_first_stand() {
        let mut engine = WaveEngine::new(2024);
        engine.init(InitTarget::Sectors(16));
        prime(&mut engine, 0);

        let result = engine.start_wave_at(0);
        assert_eq!(result, StartWaveResult { success: true, sector: 0 });
        let state = engine.state();
        assert!(state.wave_active);
        assert_eq!(state.wave_start_sector, 0);
        assert_eq!(state.sectors[0].state(), SectorState::Anticipating);

        let state = engine.tick(0.25);
        assert_eq!(state.sectors[0].state(), SectorState::Standing);
        assert_eq!(state.combo, 1);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_three_sector_lap() {
        let mut engine = WaveEngine::new(5);
        engine.init(InitTarget::Config(VenueConfig {
            num_sectors: 3,
            ..Venue::Soccer.config()
        }));
        for id in 0..3 {
            prime(&mut engine, id);
        }
        assert!(engine.start_wave_at(0).success);
        for _ in 0..3 {
            engine.tick(0.3);
        }

        let completed: Vec<_> = engine
            .get_events()
            .into_iter()
            .filter_map(|e| match e.kind {
                EventKind::WaveCompleted { combo, bonus } => Some((combo, bonus)),
                _ => None,
            })
            .collect();
        assert_eq!(completed.len(), 1);
        let (combo, bonus) = completed[0];
        assert_eq!(bonus, (100.0 * (1.0 + combo as f64 * 0.5)) as u64);
        assert_eq!(engine.state().successful_waves, 1);
    }

    #[test]
    fn test_unready_destination_fails_wave() {
        let mut engine = WaveEngine::new(5);
        engine.init(InitTarget::Sectors(16));
        for id in 0..16 {
            prime(&mut engine, id);
        }
        engine.start_wave_at(4);
        engine.tick(0.25);
        engine.get_events();

        engine.game_mut().sector_mut(5).unwrap().set_energy(0.0);
        let state = engine.tick(0.1);
        assert_eq!(state.combo, 0);
        assert!(!state.wave_active);
        assert_eq!(state.current_wave_sector, -1);

        let events = engine.get_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::WaveFailed(5));
    }

    #[test]
    fn test_boost_out_of_range() {
        let mut engine = WaveEngine::new(3);
        engine.init(InitTarget::Sectors(16));
        let before = serde_json::to_string(&engine.state()).unwrap();

        assert_eq!(engine.boost_sector_energy(16), BoostAck { boosted: 16 });
        assert_eq!(serde_json::to_string(&engine.state()).unwrap(), before);
        assert!(engine.get_events().is_empty());
    }

    #[test]
    fn test_get_events_drains() {
        let mut engine = WaveEngine::new(3);
        engine.init(InitTarget::Sectors(8));
        engine.trigger_event(StadiumEvent::Scoreboard, None);
        engine.tick(0.016);
        assert_eq!(engine.get_events().len(), 1);
        assert!(engine.get_events().is_empty());
    }

    #[test]
    fn test_named_events() {
        let mut engine = WaveEngine::new(3);
        engine.init(InitTarget::Sectors(8));

        let ack = engine.trigger_named_event("mascot", Some(3));
        assert!(ack.applied);
        assert!(engine.state().sectors[3].distractions() > 0.0);

        let ack = engine.trigger_named_event("fireworks", Some(3));
        assert!(!ack.applied);
        assert_eq!(engine.get_events().len(), 1);
    }

    #[test]
    fn test_random_event_lands_in_ring() {
        let mut engine = WaveEngine::new(3);
        engine.init(InitTarget::Sectors(6));
        let mut picks = Pcg32::seed_from_u64(11);
        for _ in 0..20 {
            assert!(engine.trigger_random_event(&mut picks).applied);
        }
        let events = engine.get_events();
        assert_eq!(events.len(), 20);
        for event in events {
            if let EventKind::Mascot(id) = event.kind {
                assert!(id < 6);
            }
        }
    }

    #[test]
    fn test_reseed_applies_on_init() {
        let mut a = WaveEngine::new(1);
        let mut b = WaveEngine::new(2);
        b.reseed(1);
        a.init(InitTarget::Venue(Venue::Soccer));
        b.init(InitTarget::Venue(Venue::Soccer));
        assert_eq!(
            serde_json::to_string(&a.state()).unwrap(),
            serde_json::to_string(&b.state()).unwrap()
        );
    }

    #[test]
    fn test_save_load_status() {
        let mut engine = WaveEngine::new(8);
        engine.init(InitTarget::Venue(Venue::Soccer));
        engine.game_mut().score = 1234;
        engine.game_mut().max_combo = 7;
        let saved = engine.save();

        engine.init(InitTarget::Venue(Venue::Soccer));
        let status = engine.load(&saved);
        assert!(status.is_loaded());
        assert_eq!(serde_json::to_value(&status).unwrap(), serde_json::json!({"status": "loaded"}));
        let state = engine.state();
        assert_eq!(state.score, 1234);
        assert_eq!(state.max_combo, 7);
        assert_eq!(state.venue, Venue::Soccer);

        let status = engine.load("{{{");
        assert_eq!(status.status, LoadOutcome::Error);
        assert!(status.message.is_some());
        assert_eq!(engine.state().score, 1234);

        // What a failed save hands back must never reset progress
        assert_eq!(engine.load("").status, LoadOutcome::Error);
        assert_eq!(engine.state().score, 1234);
        assert_eq!(engine.state().max_combo, 7);
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = WaveEngine::new(99);
        let mut b = WaveEngine::new(99);
        a.init(InitTarget::Venue(Venue::Cricket));
        b.init(InitTarget::Venue(Venue::Cricket));
        let ea = serde_json::to_string(&a.state()).unwrap();
        let eb = serde_json::to_string(&b.state()).unwrap();
        assert_eq!(ea, eb);
    }
}
