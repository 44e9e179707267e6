//! Save/load of session progress
//!
//! Features:
//! - Versioned JSON envelope
//! - Parse-then-apply loading (a bad save never half-applies)
//! - Aggregate counters only; live sectors and the wave cursor stay as they are

pub mod envelope;

pub use envelope::{LoadError, SAVE_VERSION, SaveData};

use crate::sim::{Venue, WaveGame};

/// Snapshot the game as a JSON string
pub fn save(game: &WaveGame) -> Result<String, serde_json::Error> {
    envelope::encode(game)
}

/// Restore progress counters from a save produced by [`save`]
pub fn load(game: &mut WaveGame, json: &str) -> Result<(), LoadError> {
    let data = SaveData::parse(json)?;
    apply(game, data);
    Ok(())
}

fn apply(game: &mut WaveGame, data: SaveData) {
    if let Some(saved) = data.venue.as_deref() {
        if Venue::from_id(saved) != Some(game.venue()) {
            log::warn!(
                "Save is from venue '{}', keeping current venue '{}'",
                saved,
                game.venue().id()
            );
        }
    }

    game.score = data.score;
    game.combo = data.combo;
    game.max_combo = data.max_combo;
    game.successful_waves = data.successful_waves;
    game.failed_waves = data.failed_waves;
    game.stadium_level = data.stadium_level;
    game.unlocks = data.unlocks;
    log::info!(
        "Loaded save (score {}, {} waves completed)",
        game.score,
        game.successful_waves
    );
}
