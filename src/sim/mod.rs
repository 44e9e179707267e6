//! Deterministic wave simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through `tick`
//! - Seeded RNG only (enthusiasm draw at creation)
//! - Stable iteration order (by sector index)
//! - No rendering, input, or platform dependencies

pub mod sector;
pub mod stadium;
pub mod state;
pub mod tick;
pub mod venue;

pub use sector::{CrowdSector, SectorState};
pub use stadium::{StadiumEvent, trigger};
pub use state::{ActiveWave, EventKind, GameEvent, GameSnapshot, WaveGame};
pub use tick::{boost_sector, start_wave_at, tick};
pub use venue::{Difficulty, Venue, VenueConfig};
