//! Stadium Wave entry point
//!
//! On the web the page drives `platform::web::WaveEngineHandle` directly.
//! Natively this runs a headless autoplay session: it plays the role of the
//! frontend, feeding clamped frame deltas, starting and nursing waves, and
//! firing stadium events.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use stadium_wave::consts::READINESS_THRESHOLD;
    use stadium_wave::engine::{InitTarget, WaveEngine};
    use stadium_wave::highscores::{HighScoreEntry, HighScores};
    use stadium_wave::platform::now_ms;
    use stadium_wave::settings::{EventClock, Settings};
    use stadium_wave::sim::{EventKind, GameEvent};

    const HIGHSCORES_FILE: &str = "stadium_wave_highscores.json";
    /// Nominal frame delta (60 Hz)
    const FRAME_DT: f64 = 1.0 / 60.0;
    /// Every this many frames the loop "hitches" to exercise dt clamping
    const HITCH_EVERY: u64 = 300;

    /// Autoplaying frontend
    struct Session {
        engine: WaveEngine,
        settings: Settings,
        /// Driver-side randomness (stadium event picks), separate from the crowd
        rng: Pcg32,
        event_clock: EventClock,
    }

    impl Session {
        fn new(settings: Settings) -> Self {
            let seed = settings.seed.unwrap_or_else(rand::random);
            log::info!("Session seed: {}", seed);

            let mut engine = WaveEngine::new(seed);
            engine.init(InitTarget::Venue(settings.venue));
            Self {
                engine,
                rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
                event_clock: EventClock::default(),
                settings,
            }
        }

        /// One animation frame
        fn frame(&mut self, raw_dt: f64) {
            let dt = self.settings.clamp_dt(raw_dt);

            self.play();
            if self.event_clock.advance(&self.settings, dt) {
                self.engine.trigger_random_event(&mut self.rng);
            }
            self.engine.tick(dt);

            for event in self.engine.get_events() {
                log_event(&event);
            }
        }

        /// Start a wave at the keenest sector, or boost the next hand-off target
        fn play(&mut self) {
            let game = self.engine.game();
            match game.wave().copied() {
                None => {
                    let best = game
                        .sectors()
                        .iter()
                        .filter(|s| s.can_start_wave())
                        .max_by(|a, b| a.readiness().total_cmp(&b.readiness()))
                        .map(|s| s.id());
                    if let Some(id) = best {
                        self.engine.start_wave_at(id);
                    }
                }
                Some(wave) => {
                    let next = (wave.current_sector + 1) % game.num_sectors();
                    let lagging = game
                        .sector(next)
                        .is_some_and(|s| s.readiness() <= READINESS_THRESHOLD + 0.05);
                    if lagging {
                        self.engine.boost_sector_energy(next);
                    }
                }
            }
        }
    }

    fn log_event(event: &GameEvent) {
        match &event.kind {
            EventKind::WaveStarted(id) => log::info!("[{:7.2}s] Wave started at sector {}", event.time, id),
            EventKind::WaveCompleted { combo, bonus } => {
                log::info!("[{:7.2}s] Wave completed! combo {} bonus {}", event.time, combo, bonus)
            }
            EventKind::WaveFailed(id) => log::info!("[{:7.2}s] Wave died at sector {}", event.time, id),
            EventKind::Mascot(id) => log::info!("[{:7.2}s] Mascot near sector {}", event.time, id),
            EventKind::Scoreboard(()) => log::info!("[{:7.2}s] Scoreboard hype!", event.time),
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Stadium Wave (native) starting...");

        let mut args = std::env::args().skip(1);
        let settings = args
            .next()
            .map(|path| Settings::load_from(&PathBuf::from(path)))
            .unwrap_or_default();
        let seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);

        let mut session = Session::new(settings);
        let frames = (seconds / FRAME_DT).ceil() as u64;
        for frame in 0..frames {
            let raw_dt = if frame > 0 && frame % HITCH_EVERY == 0 { 0.5 } else { FRAME_DT };
            session.frame(raw_dt);
        }

        let game = session.engine.game();
        println!("\n{} ({})", game.venue().name(), game.venue().difficulty().as_str());
        println!("  score:      {}", game.score);
        println!("  max combo:  {}", game.max_combo);
        println!("  waves:      {} completed, {} failed", game.successful_waves, game.failed_waves);

        let path = PathBuf::from(HIGHSCORES_FILE);
        let mut scores = HighScores::load_from(&path);
        if let Some(rank) = scores.add(HighScoreEntry::from_game(game, now_ms())) {
            println!("  new high score, rank #{}", rank);
            if let Err(e) = scores.save_to(&path) {
                log::warn!("Could not save high scores: {}", e);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The page talks to `WaveEngineHandle` from the library; nothing to run here
}
