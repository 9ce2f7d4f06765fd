//! Simulation context driven by a periodic timer
//!
//! [`Simulation`] owns the game state, RNG and input flags. Any periodic
//! caller (browser interval, native sleep loop, test) invokes
//! [`Simulation::tick`] and stops once it reports [`SimStatus::Halted`].

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::input::{InputMapper, KeyEvent};
use crate::renderer::{Surface, draw_frame, draw_ship};
use crate::settings::SimConfig;
use crate::sim::{GameState, HaltReason, RandomSource, SimStatus, TickInput, tick};

pub struct Simulation<R = Pcg32> {
    state: GameState,
    rng: R,
    input: InputMapper,
}

impl Simulation<Pcg32> {
    /// Seeded from `config.seed`, or the default seed if unset
    pub fn new(config: &SimConfig) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(config.effective_seed()))
    }
}

impl<R: RandomSource> Simulation<R> {
    pub fn with_rng(config: &SimConfig, rng: R) -> Self {
        Self {
            state: GameState::new(config),
            rng,
            input: InputMapper::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> SimStatus {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Current held-key flags
    pub fn input(&self) -> &InputMapper {
        &self.input
    }

    /// Record a key press or release. Takes effect on the next tick.
    pub fn handle_key(&mut self, event: KeyEvent) {
        self.input.apply(event);
    }

    /// Draw the ship once at its centered start position
    pub fn start(&mut self, surface: &mut impl Surface) {
        log::info!(
            "Simulation starting: {}x{} canvas, {} rocks, {} ms ticks",
            self.state.canvas.width,
            self.state.canvas.height,
            self.state.rock_config.rocks_amount,
            self.state.ship.speed_ms
        );
        draw_ship(&self.state, surface);
    }

    /// One tick using the current key flags
    pub fn tick(&mut self, surface: &mut impl Surface) -> SimStatus {
        let input = self.input.snapshot();
        self.tick_with(&input, surface)
    }

    /// One tick with an explicit input snapshot.
    ///
    /// The frame is drawn after motion and before the halt takes effect, so
    /// the colliding frame is the last one shown. Once halted nothing is drawn.
    pub fn tick_with(&mut self, input: &TickInput, surface: &mut impl Surface) -> SimStatus {
        if !self.state.is_running() {
            return SimStatus::Halted;
        }
        let status = tick(&mut self.state, input, &mut self.rng);
        draw_frame(&self.state, surface);
        status
    }

    /// External teardown. No further ticks run.
    pub fn stop(&mut self) {
        self.state.halt(HaltReason::Stopped);
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl<R: RandomSource> Simulation<R> {
    /// Tick at the configured period until halted or `max_ticks` have run.
    ///
    /// Flags are snapshotted from `input` once per tick, so another thread
    /// may press and release keys while this loop runs.
    pub fn run_blocking(
        &mut self,
        input: &crate::input::SharedInput,
        surface: &mut impl Surface,
        max_ticks: u64,
    ) -> SimStatus {
        let period = self.state.ship.tick_period();
        self.start(surface);
        for _ in 0..max_ticks {
            let started = std::time::Instant::now();
            let snapshot = input.snapshot();
            if self.tick_with(&snapshot, surface) == SimStatus::Halted {
                return SimStatus::Halted;
            }
            if let Some(remaining) = period.checked_sub(started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        log::info!("Tick budget of {} reached, stopping", max_ticks);
        self.stop();
        SimStatus::Halted
    }
}
