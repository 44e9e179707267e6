//! High score leaderboard
//!
//! Tracks the top 10 finished sessions across all venues.

use serde::{Deserialize, Serialize};

use crate::sim::{Venue, WaveGame};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub venue: Venue,
    pub max_combo: u32,
    pub successful_waves: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl HighScoreEntry {
    pub fn from_game(game: &WaveGame, timestamp: f64) -> Self {
        Self {
            score: game.score,
            venue: game.venue(),
            max_combo: game.max_combo,
            successful_waves: game.successful_waves,
            timestamp,
        }
    }
}

/// Leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "stadium_wave_highscores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Insert an entry if it qualifies; returns the 1-indexed rank
    pub fn add(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Best entry for one venue
    pub fn best_for(&self, venue: Venue) -> Option<&HighScoreEntry> {
        self.entries.iter().find(|e| e.venue == venue)
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        match storage.and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten()) {
            Some(json) => Self::from_json(&json),
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Parse a stored board; a corrupt one is replaced by an empty board
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<HighScores>(json) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Corrupt high scores ({}), starting fresh", e);
                Self::new()
            }
        }
    }

    /// Load from a JSON file; a missing file means an empty board
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(_) => {
                log::info!("No high scores at {}, starting fresh", path.display());
                Self::new()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = serde_json::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
