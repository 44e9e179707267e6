//! Stadium Wave - crowd wave simulation
//!
//! Core modules:
//! - `sim`: Wave propagation engine (sectors, hand-offs, scoring, events)
//! - `engine`: Owned facade exposing the frame-by-frame command API
//! - `persistence`: Versioned save/load of session progress
//! - `platform`: Browser bridge for a JavaScript host
//! - `settings`: Caller-side preferences

pub mod engine;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use engine::{InitResult, InitTarget, LoadStatus, StartWaveResult, WaveEngine};
pub use highscores::HighScores;
pub use settings::Settings;

/// Simulation tuning constants
pub mod consts {
    /// Largest frame delta a driver should feed to `tick` (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Largest ring `init` will build
    pub const MAX_SECTORS: usize = 24;

    /// Energy every sector starts with
    pub const INITIAL_ENERGY: f64 = 0.5;
    /// Enthusiasm is drawn uniformly within this distance of the venue base
    pub const ENTHUSIASM_SPREAD: f64 = 0.15;
    /// Energy regained per second
    pub const ENERGY_REGEN_RATE: f64 = 0.1;
    /// Fatigue shed per second
    pub const FATIGUE_RECOVERY_RATE: f64 = 0.05;
    /// Fatigue gained each time a sector stands
    pub const FATIGUE_PER_STAND: f64 = 0.1;
    /// Readiness must exceed this to start a wave
    pub const READINESS_THRESHOLD: f64 = 0.3;
    /// Distractions are never pushed past this by external events
    pub const MAX_DISTRACTION: f64 = 1.0;

    /// Seconds in Anticipating before the wave stands a sector up
    pub const ANTICIPATION_DELAY: f64 = 0.2;
    /// Seconds in Anticipating before an abandoned sector gives up
    pub const ANTICIPATION_TIMEOUT: f64 = 0.5;
    /// Seconds a sector stays on its feet
    pub const STAND_DURATION: f64 = 1.5;

    /// Player boost
    pub const BOOST_AMOUNT: f64 = 0.3;
    /// Distraction removed by any boost
    pub const BOOST_DISTRACTION_RELIEF: f64 = 0.1;

    /// Points per stand-up, multiplied by the running combo
    pub const COMBO_POINTS: u64 = 10;
    /// Base completion bonus
    pub const COMPLETION_BONUS: f64 = 100.0;
    /// Completion bonus growth per combo step
    pub const COMPLETION_COMBO_FACTOR: f64 = 0.5;

    /// Mascot distraction per affected sector
    pub const MASCOT_DISTRACTION: f64 = 0.3;
    /// Sectors on each side of the mascot target that are also distracted
    pub const MASCOT_REACH: i64 = 1;
    /// Scoreboard energy boost per sector
    pub const SCOREBOARD_BOOST: f64 = 0.2;
}
