//! Game state and core simulation types
//!
//! `WaveGame` owns every sector, the active wave cursor, the score counters,
//! and the pending event queue.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::sector::CrowdSector;
use super::venue::{Difficulty, Venue, VenueConfig};

/// Discrete things that happened during a tick or command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EventKind {
    /// Wave started at this sector
    WaveStarted(usize),
    /// Wave made it all the way round
    WaveCompleted { combo: u32, bonus: u64 },
    /// Wave stalled at this sector
    WaveFailed(usize),
    /// Mascot distracted the crowd around this sector
    Mascot(usize),
    /// Scoreboard hyped the whole stadium (`data` is null)
    Scoreboard(()),
}

/// An event stamped with the simulation clock
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameEvent {
    #[serde(flatten)]
    pub kind: EventKind,
    pub time: f64,
}

/// Position of the wave currently travelling round the ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveWave {
    /// Where the wave began (completion target)
    pub start_sector: usize,
    /// Sector currently carrying the wave
    pub current_sector: usize,
    /// Seconds since `current_sector` took the wave
    pub timer: f64,
}

impl ActiveWave {
    pub fn new(sector: usize) -> Self {
        Self {
            start_sector: sector,
            current_sector: sector,
            timer: 0.0,
        }
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct WaveGame {
    /// Venue tuning for this session
    pub config: VenueConfig,
    /// Ring of sectors, index == sector id
    pub(crate) sectors: Vec<CrowdSector>,
    pub score: u64,
    /// Consecutive stand-ups; only a failed wave resets it
    pub combo: u32,
    pub max_combo: u32,
    /// In-flight wave, if any
    pub(crate) wave: Option<ActiveWave>,
    /// Simulation clock (seconds)
    pub time_elapsed: f64,
    pub successful_waves: u32,
    pub failed_waves: u32,
    /// Cosmetic progression, carried through saves untouched
    pub stadium_level: u32,
    pub unlocks: Vec<String>,
    events: Vec<GameEvent>,
}

impl WaveGame {
    /// Build a fresh session, drawing each sector's enthusiasm from `rng`
    pub fn new<R: Rng + ?Sized>(config: VenueConfig, rng: &mut R) -> Self {
        let sectors = (0..config.num_sectors)
            .map(|id| CrowdSector::random(id, config.base_enthusiasm, config.energy_drain, rng))
            .collect();

        Self {
            config,
            sectors,
            score: 0,
            combo: 0,
            max_combo: 0,
            wave: None,
            time_elapsed: 0.0,
            successful_waves: 0,
            failed_waves: 0,
            stadium_level: 1,
            unlocks: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn venue(&self) -> Venue {
        self.config.venue
    }

    pub fn num_sectors(&self) -> usize {
        self.sectors.len()
    }

    pub fn sectors(&self) -> &[CrowdSector] {
        &self.sectors
    }

    pub fn sector(&self, id: usize) -> Option<&CrowdSector> {
        self.sectors.get(id)
    }

    /// Mutable sector access; setters keep the value ranges intact
    pub fn sector_mut(&mut self, id: usize) -> Option<&mut CrowdSector> {
        self.sectors.get_mut(id)
    }

    pub fn wave(&self) -> Option<&ActiveWave> {
        self.wave.as_ref()
    }

    pub fn is_wave_active(&self) -> bool {
        self.wave.is_some()
    }

    /// Queue an event stamped with the current clock
    pub(crate) fn emit(&mut self, kind: EventKind) {
        self.events.push(GameEvent {
            kind,
            time: self.time_elapsed,
        });
    }

    /// Events queued so far, without draining
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every queued event in FIFO order, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Full read-only view for the rendering layer
    pub fn snapshot(&self) -> GameSnapshot {
        let venue = self.venue();
        GameSnapshot {
            sectors: self.sectors.clone(),
            score: self.score,
            combo: self.combo,
            max_combo: self.max_combo,
            wave_active: self.is_wave_active(),
            wave_start_sector: self.wave.map_or(-1, |w| w.start_sector as i64),
            current_wave_sector: self.wave.map_or(-1, |w| w.current_sector as i64),
            successful_waves: self.successful_waves,
            failed_waves: self.failed_waves,
            stadium_level: self.stadium_level,
            time_elapsed: self.time_elapsed,
            venue,
            venue_name: venue.name().to_string(),
            venue_difficulty: venue.difficulty(),
        }
    }
}

/// Serializable copy of the whole game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub sectors: Vec<CrowdSector>,
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub wave_active: bool,
    /// -1 when no wave is active
    pub wave_start_sector: i64,
    /// -1 when no wave is active
    pub current_wave_sector: i64,
    pub successful_waves: u32,
    pub failed_waves: u32,
    pub stadium_level: u32,
    pub time_elapsed: f64,
    pub venue: Venue,
    pub venue_name: String,
    pub venue_difficulty: Difficulty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_game() {
        let game = WaveGame::new(VenueConfig::with_sectors(16), &mut Pcg32::seed_from_u64(1));
        assert_eq!(game.num_sectors(), 16);
        assert_eq!(game.score, 0);
        assert_eq!(game.combo, 0);
        assert_eq!(game.stadium_level, 1);
        assert!(!game.is_wave_active());
        for (i, sector) in game.sectors().iter().enumerate() {
            assert_eq!(sector.id(), i);
            assert_eq!(sector.energy_drain(), 0.15);
        }
    }

    #[test]
    fn test_same_seed_same_crowd() {
        let config = Venue::Cricket.config();
        let a = WaveGame::new(config, &mut Pcg32::seed_from_u64(9));
        let b = WaveGame::new(config, &mut Pcg32::seed_from_u64(9));
        let ea: Vec<f64> = a.sectors().iter().map(|s| s.enthusiasm()).collect();
        let eb: Vec<f64> = b.sectors().iter().map(|s| s.enthusiasm()).collect();
        assert_eq!(ea, eb);
    }

    #[test]
    fn test_drain_events_clears_queue() {
        let mut game = WaveGame::new(VenueConfig::with_sectors(4), &mut Pcg32::seed_from_u64(1));
        game.time_elapsed = 1.5;
        game.emit(EventKind::Scoreboard(()));
        game.emit(EventKind::WaveStarted(2));

        let events = game.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::Scoreboard(()));
        assert_eq!(events[1].time, 1.5);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_event_wire_shape() {
        let started = GameEvent {
            kind: EventKind::WaveStarted(3),
            time: 0.5,
        };
        let json = serde_json::to_value(&started).unwrap();
        assert_eq!(json["type"], "wave_started");
        assert_eq!(json["data"], 3);
        assert_eq!(json["time"], 0.5);

        let done = GameEvent {
            kind: EventKind::WaveCompleted { combo: 4, bonus: 300 },
            time: 2.0,
        };
        let json = serde_json::to_value(&done).unwrap();
        assert_eq!(json["type"], "wave_completed");
        assert_eq!(json["data"]["combo"], 4);
        assert_eq!(json["data"]["bonus"], 300);

        let hype = GameEvent {
            kind: EventKind::Scoreboard(()),
            time: 3.0,
        };
        let json = serde_json::to_value(&hype).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "scoreboard", "data": null, "time": 3.0})
        );
    }

    #[test]
    fn test_snapshot_cursor() {
        let mut game = WaveGame::new(VenueConfig::with_sectors(8), &mut Pcg32::seed_from_u64(1));
        let snap = game.snapshot();
        assert_eq!(snap.current_wave_sector, -1);
        assert_eq!(snap.wave_start_sector, -1);
        assert_eq!(snap.venue_name, "Baseball Stadium");
        assert_eq!(snap.sectors.len(), 8);

        game.wave = Some(ActiveWave::new(5));
        let snap = game.snapshot();
        assert!(snap.wave_active);
        assert_eq!(snap.wave_start_sector, 5);
        assert_eq!(snap.current_wave_sector, 5);
    }
}
