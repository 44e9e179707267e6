//! Venue presets
//!
//! A venue fixes the ring size and the difficulty knobs every sector shares.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SECTORS;

/// Difficulty label shown alongside a venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Available stadium venues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    #[default]
    Baseball,
    Soccer,
    Cricket,
}

impl Venue {
    pub const ALL: [Venue; 3] = [Venue::Baseball, Venue::Soccer, Venue::Cricket];

    /// Lower-case id used on the wire and in saves
    pub fn id(&self) -> &'static str {
        match self {
            Venue::Baseball => "baseball",
            Venue::Soccer => "soccer",
            Venue::Cricket => "cricket",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "baseball" => Some(Venue::Baseball),
            "soccer" => Some(Venue::Soccer),
            "cricket" => Some(Venue::Cricket),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Venue::Baseball => "Baseball Stadium",
            Venue::Soccer => "Soccer Stadium",
            Venue::Cricket => "Cricket Ground",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Venue::Baseball => "Classic American ballpark - Easy difficulty",
            Venue::Soccer => "International football arena - Medium difficulty",
            Venue::Cricket => "Traditional cricket oval - Hard difficulty",
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            Venue::Baseball => Difficulty::Easy,
            Venue::Soccer => Difficulty::Medium,
            Venue::Cricket => Difficulty::Hard,
        }
    }

    /// Tuning preset for this venue
    pub fn config(&self) -> VenueConfig {
        match self {
            // Slower wave, gentler drain, keener crowd
            Venue::Baseball => VenueConfig {
                venue: *self,
                num_sectors: 16,
                wave_speed: 0.35,
                energy_drain: 0.15,
                base_enthusiasm: 0.75,
            },
            Venue::Soccer => VenueConfig {
                venue: *self,
                num_sectors: 20,
                wave_speed: 0.3,
                energy_drain: 0.2,
                base_enthusiasm: 0.70,
            },
            Venue::Cricket => VenueConfig {
                venue: *self,
                num_sectors: 24,
                wave_speed: 0.25,
                energy_drain: 0.25,
                base_enthusiasm: 0.65,
            },
        }
    }
}

/// Concrete simulation parameters for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Venue identity (name/difficulty are looked up from here)
    pub venue: Venue,
    /// Ring size
    pub num_sectors: usize,
    /// Seconds between hand-offs
    pub wave_speed: f64,
    /// Energy spent by a sector each time it stands
    pub energy_drain: f64,
    /// Center of the per-sector enthusiasm draw
    pub base_enthusiasm: f64,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Venue::default().config()
    }
}

impl VenueConfig {
    /// Baseball tuning with a custom ring size, clamped to `1..=MAX_SECTORS`
    pub fn with_sectors(num_sectors: usize) -> Self {
        Self {
            num_sectors: clamp_sectors(num_sectors),
            ..Venue::Baseball.config()
        }
    }

    /// Same tuning with the ring size brought into `1..=MAX_SECTORS`
    pub fn clamped(self) -> Self {
        Self {
            num_sectors: clamp_sectors(self.num_sectors),
            ..self
        }
    }
}

fn clamp_sectors(requested: usize) -> usize {
    let n = requested.clamp(1, MAX_SECTORS);
    if n != requested {
        log::warn!("Sector count {} out of range, using {}", requested, n);
    }
    n
}
