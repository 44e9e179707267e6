//! Crowd sector entity and its state machine
//!
//! Idle/Seated -> Anticipating (wave arrives) -> Standing (explicit stand-up)
//! -> Seated (after [`STAND_DURATION`]). An Anticipating sector that is never
//! stood up drops back to Idle after [`ANTICIPATION_TIMEOUT`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Per-sector crowd state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectorState {
    /// Resting, ready for a wave
    #[default]
    Idle,
    /// Wave has arrived, crowd is about to rise
    Anticipating,
    /// On their feet
    Standing,
    /// Sat back down after standing
    Seated,
}

impl SectorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectorState::Idle => "idle",
            SectorState::Anticipating => "anticipating",
            SectorState::Standing => "standing",
            SectorState::Seated => "seated",
        }
    }

    /// States a wave may start from
    pub fn is_resting(&self) -> bool {
        matches!(self, SectorState::Idle | SectorState::Seated)
    }
}

/// One ring segment of the crowd
///
/// Energy and fatigue stay in `[0, 1]` and distractions never go negative;
/// every mutation goes through the clamped setters below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrowdSector {
    id: usize,
    state: SectorState,
    energy: f64,
    fatigue: f64,
    enthusiasm: f64,
    distractions: f64,
    /// Seconds spent in the current state
    #[serde(skip)]
    timer: f64,
    /// Energy spent per stand-up
    #[serde(skip)]
    energy_drain: f64,
}

impl CrowdSector {
    /// Create a sector with a fixed enthusiasm
    pub fn new(id: usize, enthusiasm: f64, energy_drain: f64) -> Self {
        Self {
            id,
            state: SectorState::Idle,
            energy: INITIAL_ENERGY,
            fatigue: 0.0,
            enthusiasm,
            distractions: 0.0,
            timer: 0.0,
            energy_drain,
        }
    }

    /// Create a sector whose enthusiasm is drawn around `base_enthusiasm`
    pub fn random<R: Rng + ?Sized>(
        id: usize,
        base_enthusiasm: f64,
        energy_drain: f64,
        rng: &mut R,
    ) -> Self {
        let enthusiasm = rng.random_range(
            (base_enthusiasm - ENTHUSIASM_SPREAD)..=(base_enthusiasm + ENTHUSIASM_SPREAD),
        );
        Self::new(id, enthusiasm, energy_drain)
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn state(&self) -> SectorState {
        self.state
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn fatigue(&self) -> f64 {
        self.fatigue
    }

    pub fn enthusiasm(&self) -> f64 {
        self.enthusiasm
    }

    pub fn distractions(&self) -> f64 {
        self.distractions
    }

    pub fn timer(&self) -> f64 {
        self.timer
    }

    pub fn energy_drain(&self) -> f64 {
        self.energy_drain
    }

    pub fn set_energy(&mut self, energy: f64) {
        self.energy = energy.clamp(0.0, 1.0);
    }

    pub fn set_fatigue(&mut self, fatigue: f64) {
        self.fatigue = fatigue.clamp(0.0, 1.0);
    }

    pub fn set_distractions(&mut self, distractions: f64) {
        self.distractions = distractions.max(0.0);
    }

    #[cfg(test)]
    pub(crate) fn set_enthusiasm(&mut self, enthusiasm: f64) {
        self.enthusiasm = enthusiasm;
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: SectorState) {
        self.state = state;
        self.timer = 0.0;
    }

    /// Passive recovery plus timer-driven transitions
    pub fn update(&mut self, dt: f64) {
        if self.fatigue > 0.0 {
            self.set_fatigue(self.fatigue - dt * FATIGUE_RECOVERY_RATE);
        }
        if self.energy < 1.0 {
            self.set_energy(self.energy + dt * ENERGY_REGEN_RATE);
        }

        match self.state {
            SectorState::Standing => {
                self.timer += dt;
                if self.timer > STAND_DURATION {
                    self.sit_down();
                }
            }
            SectorState::Anticipating => {
                self.timer += dt;
                if self.timer > ANTICIPATION_TIMEOUT {
                    self.enter(SectorState::Idle);
                }
            }
            SectorState::Idle | SectorState::Seated => {}
        }
    }

    /// Readiness score; a wave needs this above [`READINESS_THRESHOLD`]
    pub fn readiness(&self) -> f64 {
        self.energy * self.enthusiasm - (self.fatigue + self.distractions)
    }

    pub fn can_start_wave(&self) -> bool {
        self.readiness() > READINESS_THRESHOLD && self.state.is_resting()
    }

    /// Begin anticipating; false if the crowd isn't ready
    pub fn start_wave(&mut self) -> bool {
        if !self.can_start_wave() {
            return false;
        }
        self.enter(SectorState::Anticipating);
        true
    }

    /// Rise for the wave, paying the energy/fatigue cost
    pub fn stand_up(&mut self) -> bool {
        if self.state != SectorState::Anticipating {
            return false;
        }
        self.enter(SectorState::Standing);
        self.set_energy(self.energy - self.energy_drain);
        self.set_fatigue(self.fatigue + FATIGUE_PER_STAND);
        true
    }

    pub fn sit_down(&mut self) {
        self.enter(SectorState::Seated);
    }

    pub fn boost_energy(&mut self, amount: f64) {
        self.set_energy(self.energy + amount);
        self.set_distractions(self.distractions - BOOST_DISTRACTION_RELIEF);
    }

    pub fn add_distraction(&mut self, amount: f64) {
        self.set_distractions((self.distractions + amount).min(MAX_DISTRACTION));
    }

    fn enter(&mut self, state: SectorState) {
        self.state = state;
        self.timer = 0.0;
    }
}
