//! Stadium-wide events (mascot, scoreboard)
//!
//! These poke sector values directly and never change sector states.

use serde::{Deserialize, Serialize};

use super::state::{EventKind, WaveGame};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StadiumEvent {
    /// Distracts the target sector and its neighbours
    Mascot,
    /// Boosts every sector
    Scoreboard,
}

impl StadiumEvent {
    pub const ALL: [StadiumEvent; 2] = [StadiumEvent::Mascot, StadiumEvent::Scoreboard];

    pub fn as_str(&self) -> &'static str {
        match self {
            StadiumEvent::Mascot => "mascot",
            StadiumEvent::Scoreboard => "scoreboard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mascot" => Some(StadiumEvent::Mascot),
            "scoreboard" => Some(StadiumEvent::Scoreboard),
            _ => None,
        }
    }

    /// Whether this event needs a target sector
    pub fn is_targeted(&self) -> bool {
        matches!(self, StadiumEvent::Mascot)
    }
}

/// Apply a stadium event; returns false if it was ignored
///
/// A mascot with no target, or a target outside the ring, is a no-op.
pub fn trigger(game: &mut WaveGame, event: StadiumEvent, sector_id: Option<usize>) -> bool {
    match event {
        StadiumEvent::Mascot => {
            let Some(target) = sector_id.filter(|&id| id < game.num_sectors()) else {
                return false;
            };
            let n = game.num_sectors() as i64;
            for offset in -MASCOT_REACH..=MASCOT_REACH {
                let idx = (target as i64 + offset).rem_euclid(n) as usize;
                game.sectors[idx].add_distraction(MASCOT_DISTRACTION);
            }
            game.emit(EventKind::Mascot(target));
            log::debug!("Mascot distracted sectors around {}", target);
        }
        StadiumEvent::Scoreboard => {
            for sector in &mut game.sectors {
                sector.boost_energy(SCOREBOARD_BOOST);
            }
            game.emit(EventKind::Scoreboard(()));
            log::debug!("Scoreboard hyped the stadium");
        }
    }
    true
}
