//! Per-frame simulation tick and wave propagation
//!
//! Each tick advances every sector, stands up the sector carrying the wave
//! once its anticipation delay is over, and hands the wave to the next
//! sector every `wave_speed` seconds.

use super::state::{ActiveWave, EventKind, WaveGame};
use crate::consts::*;

/// Advance the game by `dt` seconds
///
/// The caller is expected to cap `dt` (see [`MAX_FRAME_DT`]); a large delta
/// can time out an anticipating sector before it ever stands. Negative or
/// non-finite deltas advance nothing.
pub fn tick(game: &mut WaveGame, dt: f64) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    game.time_elapsed += dt;

    for sector in &mut game.sectors {
        sector.update(dt);
    }

    let Some(mut wave) = game.wave else {
        return;
    };
    wave.timer += dt;

    // Stand up after brief anticipation
    if wave.timer > ANTICIPATION_DELAY && game.sectors[wave.current_sector].stand_up() {
        game.combo += 1;
        game.score += COMBO_POINTS * game.combo as u64;
    }

    if wave.timer >= game.config.wave_speed {
        let next = (wave.current_sector + 1) % game.sectors.len();

        if next == wave.start_sector {
            complete_wave(game);
            return;
        }

        if game.sectors[next].start_wave() {
            log::debug!("Wave handed off {} -> {}", wave.current_sector, next);
            wave.current_sector = next;
            wave.timer = 0.0;
        } else {
            fail_wave(game, next);
            return;
        }
    }

    game.wave = Some(wave);
}

/// Start a wave at `sector_id`
///
/// Returns false without touching anything if a wave is already running,
/// the id is outside the ring, or the sector isn't ready.
pub fn start_wave_at(game: &mut WaveGame, sector_id: usize) -> bool {
    if game.is_wave_active() {
        return false;
    }
    let Some(sector) = game.sectors.get_mut(sector_id) else {
        return false;
    };
    if !sector.start_wave() {
        return false;
    }

    game.wave = Some(ActiveWave::new(sector_id));
    game.emit(EventKind::WaveStarted(sector_id));
    log::debug!("Wave started at sector {}", sector_id);
    true
}

/// Player boost on one sector; out-of-range ids are ignored
pub fn boost_sector(game: &mut WaveGame, sector_id: usize) {
    if let Some(sector) = game.sectors.get_mut(sector_id) {
        sector.boost_energy(BOOST_AMOUNT);
    }
}

/// Wave made it back to where it started
fn complete_wave(game: &mut WaveGame) {
    game.wave = None;
    game.successful_waves += 1;
    let bonus = (COMPLETION_BONUS * (1.0 + game.combo as f64 * COMPLETION_COMBO_FACTOR)) as u64;
    game.score += bonus;
    game.max_combo = game.max_combo.max(game.combo);
    game.emit(EventKind::WaveCompleted {
        combo: game.combo,
        bonus,
    });
    log::info!(
        "Wave completed (combo {}, bonus {}, score {})",
        game.combo,
        bonus,
        game.score
    );
}

/// `blocked` refused the hand-off
fn fail_wave(game: &mut WaveGame, blocked: usize) {
    game.wave = None;
    game.failed_waves += 1;
    game.combo = 0;
    game.emit(EventKind::WaveFailed(blocked));
    log::info!("Wave failed at sector {}", blocked);
}
