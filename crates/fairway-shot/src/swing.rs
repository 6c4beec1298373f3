//! Swing timing state machine: backswing charge, hold-at-max, downswing, impact.
//!
//! Holding the swing input winds the club back and charges force at a fixed
//! rate. Releasing it starts a downswing of fixed duration that returns the
//! club to address; when the downswing completes with enough force the ball
//! is struck along the golfer's horizontal facing.

use glam::Vec3;
use tracing::{debug, info};

use crate::collaborators::{BallBody, ShotEnv};
use crate::golfer::Golfer;
use crate::rest::{RestDetector, RestTuning};
use crate::surface::SoundClip;

/// Slack for timers driven by repeated float subtraction.
const TIMER_EPSILON: f32 = 1e-4;

/// Swing feel parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingTuning {
    /// Force at full backswing.
    pub max_force: f32,
    /// Force gained per second of backswing.
    pub force_rate: f32,
    /// Club wind-up in degrees per second of backswing.
    pub backswing_degrees_per_second: f32,
    /// Fixed downswing length in seconds.
    pub downswing_seconds: f32,
    /// Swings at or below this force are discarded without a stroke.
    pub min_effective_force: f32,
    /// Longest the swing may be held at max force before it is abandoned.
    pub max_hold_seconds: f32,
    /// Converts accumulated force into an impulse on the ball.
    pub impulse_scale: f32,
    /// Heading change per rotate-left/right press, in degrees.
    pub rotate_step_degrees: f32,
}

impl Default for SwingTuning {
    fn default() -> Self {
        Self {
            max_force: 300.0,
            force_rate: 200.0,
            backswing_degrees_per_second: 40.0,
            downswing_seconds: 0.35,
            min_effective_force: 35.0,
            max_hold_seconds: 1.0,
            impulse_scale: 0.02,
            rotate_step_degrees: 2.0,
        }
    }
}

/// Current phase of the swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwingPhase {
    /// Ready, or ball in flight. Nothing charging.
    Idle,
    /// Input held, force and club angle climbing.
    BackSwing,
    /// Input released, club returning to the ball.
    DownSwing,
    /// Full force reached while input is still held.
    WaitReleaseAfterMax,
}

/// What a completed swing did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwingOutcome {
    /// The ball was hit with this force.
    Struck { force: f32, impulse: Vec3 },
    /// The downswing finished below the minimum effective force.
    Discarded { force: f32 },
    /// Held at max too long; a release is required before the next swing.
    Abandoned,
}

/// Converts held swing input into a timed strike on the ball.
#[derive(Debug, Clone)]
pub struct SwingController {
    tuning: SwingTuning,
    phase: SwingPhase,
    accumulated_force: f32,
    swing_elapsed: f32,
    down_swing_rate: f32,
    awaiting_release: bool,
    rest: RestDetector,
}

impl SwingController {
    pub fn new(tuning: SwingTuning, rest: RestTuning) -> Self {
        Self {
            tuning,
            phase: SwingPhase::Idle,
            accumulated_force: 0.0,
            swing_elapsed: 0.0,
            down_swing_rate: 0.0,
            awaiting_release: false,
            rest: RestDetector::new(rest),
        }
    }

    /// Runs rest detection for this fixed step. Returns `true` on the tick
    /// the ball is committed to asleep.
    pub fn update_rest(&mut self, dt: f32, ball: &dyn BallBody, in_bounds: bool) -> bool {
        self.rest
            .update(dt, ball.linear_velocity(), ball.angular_velocity(), in_bounds)
    }

    /// Forces the ball asleep without waiting for the hysteresis.
    pub fn mark_asleep(&mut self) {
        self.rest.mark_asleep();
    }

    /// The ball is moving for reasons other than a strike (new hole).
    pub fn wake(&mut self) {
        self.rest.wake();
    }

    /// Advances the swing by one fixed step.
    pub fn step(
        &mut self,
        dt: f32,
        swing_held: bool,
        golfer: &mut Golfer,
        env: &mut ShotEnv<'_>,
    ) -> Option<SwingOutcome> {
        if !swing_held {
            self.awaiting_release = false;
        }

        match self.phase {
            SwingPhase::Idle => {
                if self.can_start_swing() && swing_held {
                    debug!("backswing started");
                    self.phase = SwingPhase::BackSwing;
                    self.swing_elapsed = 0.0;
                    self.back_swing(dt, golfer);
                }
                None
            }
            SwingPhase::BackSwing => {
                if swing_held {
                    self.back_swing(dt, golfer);
                    None
                } else {
                    self.enter_down_swing(golfer);
                    self.down_swing(dt, golfer, env)
                }
            }
            SwingPhase::WaitReleaseAfterMax => {
                if swing_held {
                    self.swing_elapsed += dt;
                    if self.swing_elapsed > self.tuning.max_hold_seconds {
                        debug!(
                            held = self.swing_elapsed,
                            "swing held at max force too long, abandoning"
                        );
                        self.reset_ready(golfer);
                        self.awaiting_release = true;
                        return Some(SwingOutcome::Abandoned);
                    }
                    None
                } else {
                    self.enter_down_swing(golfer);
                    self.down_swing(dt, golfer, env)
                }
            }
            SwingPhase::DownSwing => self.down_swing(dt, golfer, env),
        }
    }

    /// Clears any swing in progress and returns the club to address.
    pub fn reset_ready(&mut self, golfer: &mut Golfer) {
        self.phase = SwingPhase::Idle;
        self.accumulated_force = 0.0;
        self.swing_elapsed = 0.0;
        self.down_swing_rate = 0.0;
        golfer.club_angle = 0.0;
    }

    fn can_start_swing(&self) -> bool {
        self.rest.is_asleep() && !self.awaiting_release
    }

    /// `true` while the ball is asleep and no swing is in progress.
    pub fn is_ready(&self) -> bool {
        self.phase == SwingPhase::Idle && self.rest.is_asleep()
    }

    fn back_swing(&mut self, dt: f32, golfer: &mut Golfer) {
        if self.accumulated_force >= self.tuning.max_force {
            return;
        }
        self.swing_elapsed += dt;
        golfer.club_angle += self.tuning.backswing_degrees_per_second * dt;
        self.accumulated_force =
            (self.accumulated_force + self.tuning.force_rate * dt).min(self.tuning.max_force);

        if self.accumulated_force >= self.tuning.max_force {
            debug!(after = self.swing_elapsed, "max force reached");
            self.phase = SwingPhase::WaitReleaseAfterMax;
            self.swing_elapsed = 0.0;
        }
    }

    fn enter_down_swing(&mut self, golfer: &Golfer) {
        self.phase = SwingPhase::DownSwing;
        self.swing_elapsed = self.tuning.downswing_seconds;
        self.down_swing_rate = if self.tuning.downswing_seconds > 0.0 {
            golfer.club_angle / self.tuning.downswing_seconds
        } else {
            0.0
        };
        debug!(
            force = self.accumulated_force,
            rate = self.down_swing_rate,
            "downswing started"
        );
    }

    fn down_swing(
        &mut self,
        dt: f32,
        golfer: &mut Golfer,
        env: &mut ShotEnv<'_>,
    ) -> Option<SwingOutcome> {
        self.swing_elapsed -= dt;
        golfer.club_angle = (golfer.club_angle - self.down_swing_rate * dt).max(0.0);

        if self.swing_elapsed > TIMER_EPSILON {
            return None;
        }
        self.swing_elapsed = 0.0;
        golfer.club_angle = 0.0;

        let force = self.accumulated_force;
        if force > self.tuning.min_effective_force {
            Some(self.impact(golfer, env))
        } else {
            debug!(force, "swing too weak, no stroke");
            self.reset_ready(golfer);
            Some(SwingOutcome::Discarded { force })
        }
    }

    fn impact(&mut self, golfer: &mut Golfer, env: &mut ShotEnv<'_>) -> SwingOutcome {
        let force = self.accumulated_force;
        let impulse = golfer.strike_direction() * force * self.tuning.impulse_scale;
        env.ball.apply_impulse(impulse);
        self.rest.wake();
        env.strokes.increment();

        let volume = if self.tuning.max_force > 0.0 {
            (force / self.tuning.max_force).clamp(0.0, 1.0)
        } else {
            0.0
        };
        env.sound.play(SoundClip::ClubStrike, volume);

        info!(
            force,
            stroke = env.strokes.current_count(),
            "ball struck"
        );
        self.reset_ready(golfer);
        SwingOutcome::Struck { force, impulse }
    }

    pub fn phase(&self) -> SwingPhase {
        self.phase
    }

    pub fn accumulated_force(&self) -> f32 {
        self.accumulated_force
    }

    pub fn swing_elapsed(&self) -> f32 {
        self.swing_elapsed
    }

    pub fn down_swing_rate(&self) -> f32 {
        self.down_swing_rate
    }

    pub fn is_awaiting_release(&self) -> bool {
        self.awaiting_release
    }

    pub fn is_ball_asleep(&self) -> bool {
        self.rest.is_asleep()
    }

    pub fn rest(&self) -> &RestDetector {
        &self.rest
    }

    pub fn tuning(&self) -> &SwingTuning {
        &self.tuning
    }
}

#[cfg(test)]
#[path = "swing_tests.rs"]
mod tests;
