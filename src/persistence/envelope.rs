//! Versioned JSON save envelope

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{GameSnapshot, WaveGame};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed save data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported save version {found} (expected <= {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// What `save` writes: the full snapshot plus progression extras
#[derive(Debug, Serialize)]
struct SaveOut<'a> {
    version: u32,
    #[serde(flatten)]
    state: &'a GameSnapshot,
    unlocks: &'a [String],
}

/// The part of a save that `load` reads back
///
/// Anything missing takes its fresh-session default; sector details in the
/// file are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub version: u32,
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub successful_waves: u32,
    pub failed_waves: u32,
    pub stadium_level: u32,
    pub unlocks: Vec<String>,
    pub venue: Option<String>,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            score: 0,
            combo: 0,
            max_combo: 0,
            successful_waves: 0,
            failed_waves: 0,
            stadium_level: 1,
            unlocks: Vec::new(),
            venue: None,
        }
    }
}

impl SaveData {
    /// Parse and validate without touching any game
    pub fn parse(json: &str) -> Result<Self, LoadError> {
        let data: SaveData = serde_json::from_str(json)?;
        if data.version > SAVE_VERSION {
            return Err(LoadError::UnsupportedVersion {
                found: data.version,
                supported: SAVE_VERSION,
            });
        }
        Ok(data)
    }
}

/// Serialize the game for later resumption
pub fn encode(game: &WaveGame) -> Result<String, serde_json::Error> {
    let state = game.snapshot();
    serde_json::to_string(&SaveOut {
        version: SAVE_VERSION,
        state: &state,
        unlocks: &game.unlocks,
    })
}
