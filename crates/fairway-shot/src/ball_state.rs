//! In-bounds tracking, out-of-bounds timing, and shot reset latching for the ball.
//!
//! [`BallState`] counts how many legal-ground surfaces the ball currently
//! touches. Landing on anything while that count is zero starts the
//! out-of-bounds countdown; running it out, or dropping into water, latches a
//! reset that [`BallState::consume_reset`] hands out exactly once.

use glam::Vec3;
use tracing::{debug, trace, warn};

use crate::collaborators::{BallBody, SoundSink};
use crate::surface::{SurfaceTag, surface_hit_volume};

/// Seconds the ball may sit out of bounds before the shot is reset.
pub const DEFAULT_OUT_OF_BOUNDS_SECONDS: f32 = 3.0;

/// Per-ball in-bounds and reset state.
#[derive(Debug, Clone)]
pub struct BallState {
    resting_surface_count: u32,
    out_of_bounds: bool,
    out_of_bounds_timer: f32,
    out_of_bounds_seconds: f32,
    pending_reset: bool,
    shot_start_position: Vec3,
    pending_warp: Option<Vec3>,
}

impl Default for BallState {
    fn default() -> Self {
        Self::new(DEFAULT_OUT_OF_BOUNDS_SECONDS)
    }
}

impl BallState {
    /// Creates a ball state with the given out-of-bounds grace in seconds.
    pub fn new(out_of_bounds_seconds: f32) -> Self {
        Self {
            resting_surface_count: 0,
            out_of_bounds: false,
            out_of_bounds_timer: 0.0,
            out_of_bounds_seconds: out_of_bounds_seconds.max(0.0),
            pending_reset: false,
            shot_start_position: Vec3::ZERO,
            pending_warp: None,
        }
    }

    /// Collision with a solid surface started.
    pub fn on_enter_surface(&mut self, tag: SurfaceTag, impact_speed: f32, sound: &mut dyn SoundSink) {
        play_hit_clip(tag, impact_speed, sound);

        if tag.is_legal_ground() {
            self.resting_surface_count += 1;
        }

        if self.resting_surface_count == 0 {
            if !self.out_of_bounds {
                debug!(surface = tag.name(), "ball out of bounds");
            }
            self.out_of_bounds = true;
            self.out_of_bounds_timer = self.out_of_bounds_seconds;
        } else {
            self.out_of_bounds = false;
        }
        trace!(
            surface = tag.name(),
            resting = self.resting_surface_count,
            "surface enter"
        );
    }

    /// Collision with a solid surface ended.
    pub fn on_exit_surface(&mut self, tag: SurfaceTag) {
        if !tag.is_legal_ground() {
            return;
        }
        match self.resting_surface_count.checked_sub(1) {
            Some(count) => self.resting_surface_count = count,
            None => warn!(surface = tag.name(), "surface exit without matching enter"),
        }
        trace!(
            surface = tag.name(),
            resting = self.resting_surface_count,
            "surface exit"
        );
    }

    /// The ball entered a trigger volume.
    pub fn on_enter_hazard_volume(
        &mut self,
        tag: SurfaceTag,
        impact_speed: f32,
        sound: &mut dyn SoundSink,
    ) {
        play_hit_clip(tag, impact_speed, sound);

        if tag.is_hazard() {
            debug!(surface = tag.name(), "hazard entered, shot will reset");
            self.pending_reset = true;
        }
    }

    /// Advances the out-of-bounds countdown.
    pub fn tick(&mut self, dt: f32) {
        if !self.out_of_bounds {
            return;
        }
        self.out_of_bounds_timer = (self.out_of_bounds_timer - dt).max(0.0);
        if self.out_of_bounds_timer <= 0.0 && !self.pending_reset {
            debug!("out-of-bounds timer expired, shot will reset");
            self.pending_reset = true;
        }
    }

    /// Returns `true` exactly once per latched reset, after moving the ball
    /// back to where the shot started. The caller owes a penalty stroke.
    pub fn consume_reset(&mut self, body: &mut dyn BallBody) -> bool {
        if !self.pending_reset {
            return false;
        }
        body.set_position(self.shot_start_position);
        self.pending_reset = false;
        true
    }

    /// Starts a new shot from `position`.
    pub fn begin_shot(&mut self, position: Vec3) {
        self.pending_reset = false;
        self.out_of_bounds = false;
        self.out_of_bounds_timer = 0.0;
        self.shot_start_position = position;
        self.pending_warp = None;
    }

    /// Queues a teleport for the start of the next fixed step.
    pub fn request_warp(&mut self, position: Vec3) {
        self.pending_warp = Some(position);
    }

    /// Applies a queued teleport. Call first thing in every fixed step.
    pub fn apply_pending_warp(&mut self, body: &mut dyn BallBody) -> Option<Vec3> {
        let target = self.pending_warp.take()?;
        body.set_position(target);
        Some(target)
    }

    /// `true` unless the last contact left the ball off legal ground.
    pub fn still_in_bounds(&self) -> bool {
        !self.out_of_bounds
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.out_of_bounds
    }

    pub fn resting_surface_count(&self) -> u32 {
        self.resting_surface_count
    }

    pub fn out_of_bounds_timer(&self) -> f32 {
        self.out_of_bounds_timer
    }

    pub fn out_of_bounds_seconds(&self) -> f32 {
        self.out_of_bounds_seconds
    }

    pub fn pending_reset(&self) -> bool {
        self.pending_reset
    }

    pub fn shot_start_position(&self) -> Vec3 {
        self.shot_start_position
    }

    pub fn pending_warp(&self) -> Option<Vec3> {
        self.pending_warp
    }
}

fn play_hit_clip(tag: SurfaceTag, impact_speed: f32, sound: &mut dyn SoundSink) {
    if let Some(clip) = tag.hit_clip() {
        sound.play(clip, surface_hit_volume(tag, impact_speed));
    }
}
