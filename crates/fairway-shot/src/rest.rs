//! Two-stage hysteresis deciding when a struck ball has come to rest.
//!
//! Stage one is a cooldown after every strike so the ball is not declared
//! asleep on the very tick it was hit. Stage two requires low linear and
//! angular speed, in bounds, continuously for a grace period.

use glam::Vec3;
use tracing::debug;

/// Thresholds for [`RestDetector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestTuning {
    /// Linear speed (m/s) below which the ball may be asleep.
    pub sleep_velocity: f32,
    /// Angular speed (rad/s) below which the ball may be asleep.
    pub sleep_angular_velocity: f32,
    /// Seconds after a strike before rest is considered at all.
    pub min_sleep_seconds: f32,
    /// Seconds the rest conditions must hold without interruption.
    pub grace_seconds: f32,
}

impl Default for RestTuning {
    fn default() -> Self {
        Self {
            sleep_velocity: 0.5,
            sleep_angular_velocity: 3.5,
            min_sleep_seconds: 0.5,
            grace_seconds: 0.25,
        }
    }
}

/// Grace countdown. `NotArmed` until the first qualifying tick after a strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RestTimer {
    NotArmed,
    Armed { remaining: f32 },
}

/// Tracks whether the ball is asleep and ready to be swung at.
#[derive(Debug, Clone)]
pub struct RestDetector {
    tuning: RestTuning,
    asleep: bool,
    since_strike: f32,
    timer: RestTimer,
}

impl RestDetector {
    pub fn new(tuning: RestTuning) -> Self {
        Self {
            tuning,
            asleep: false,
            since_strike: 0.0,
            timer: RestTimer::NotArmed,
        }
    }

    /// Advances the detector by `dt`. Returns `true` on the tick the ball
    /// is committed to asleep.
    pub fn update(
        &mut self,
        dt: f32,
        linear_velocity: Vec3,
        angular_velocity: Vec3,
        in_bounds: bool,
    ) -> bool {
        if self.asleep {
            return false;
        }
        self.since_strike += dt;
        if self.since_strike <= self.tuning.min_sleep_seconds {
            return false;
        }

        let calm = linear_velocity.length() < self.tuning.sleep_velocity
            && angular_velocity.length() < self.tuning.sleep_angular_velocity
            && in_bounds;

        self.timer = match (self.timer, calm) {
            (RestTimer::NotArmed, false) => RestTimer::NotArmed,
            (RestTimer::NotArmed, true) => RestTimer::Armed {
                remaining: self.tuning.grace_seconds,
            },
            (RestTimer::Armed { .. }, false) => RestTimer::Armed {
                remaining: self.tuning.grace_seconds,
            },
            (RestTimer::Armed { remaining }, true) => RestTimer::Armed {
                remaining: remaining - dt,
            },
        };

        if let RestTimer::Armed { remaining } = self.timer
            && calm
            && remaining <= 0.0
        {
            debug!(after = self.since_strike, "ball at rest");
            self.mark_asleep();
            return true;
        }
        false
    }

    /// Forces the asleep state, e.g. after a penalty reset.
    pub fn mark_asleep(&mut self) {
        self.asleep = true;
        self.timer = RestTimer::NotArmed;
    }

    /// The ball is moving again (struck, or a new hole was set up): restart
    /// the cooldown and disarm the grace timer.
    pub fn wake(&mut self) {
        self.asleep = false;
        self.since_strike = 0.0;
        self.timer = RestTimer::NotArmed;
    }

    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    pub fn timer(&self) -> RestTimer {
        self.timer
    }

    pub fn tuning(&self) -> &RestTuning {
        &self.tuning
    }
}
