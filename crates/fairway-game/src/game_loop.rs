//! Fixed-timestep loop implementing the "Fix Your Timestep" pattern.
//!
//! Decouples the simulation clock (fixed rate) from the frame clock (variable
//! rate) with an accumulator. The headless binary feeds it explicit frame
//! times, so runs are reproducible.

use fairway_config::DEFAULT_FIXED_HZ;
use tracing::warn;

/// Maximum frame time clamp to prevent spiral of death.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Something advanced on both clocks.
pub trait Simulation {
    /// Called zero or more times per frame at the fixed rate.
    fn fixed_update(&mut self, dt: f64);
    /// Called exactly once per frame, after the fixed updates, with the
    /// (clamped) frame time and the interpolation alpha in `[0, 1)`.
    fn frame_update(&mut self, frame_time: f64, alpha: f64);
}

/// Fixed-timestep loop state.
#[derive(Debug, Clone)]
pub struct GameLoop {
    fixed_dt: f64,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    /// A loop stepping at `hz` (0 falls back to [`DEFAULT_FIXED_HZ`]).
    pub fn new(hz: u32) -> Self {
        let hz = if hz == 0 { DEFAULT_FIXED_HZ } else { hz };
        Self {
            fixed_dt: 1.0 / f64::from(hz),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Runs one frame of `frame_time` seconds.
    pub fn tick(&mut self, frame_time: f64, sim: &mut impl Simulation) {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;

        while self.accumulator >= self.fixed_dt {
            sim.fixed_update(self.fixed_dt);
            self.total_sim_time += self.fixed_dt;
            self.accumulator -= self.fixed_dt;
            self.update_count += 1;
        }

        sim.frame_update(frame_time, self.alpha());
        self.frame_count += 1;
    }

    /// Interpolation alpha without running a tick.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / self.fixed_dt
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_HZ)
    }
}
