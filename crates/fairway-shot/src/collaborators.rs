//! Narrow interfaces to everything the shot core does not own.
//!
//! The physics body, the hole's stroke counter, audio playback, the camera
//! rig, and course progression all live outside this crate. Each step borrows
//! them through a [`ShotEnv`] so the core never looks siblings up implicitly.

use glam::Vec3;

use crate::surface::SoundClip;

/// The ball's rigid body as seen by the shot core.
pub trait BallBody {
    /// World-space position of the ball centre.
    fn position(&self) -> Vec3;
    /// Teleports the ball without waking it. Only called outside collision
    /// resolution.
    fn set_position(&mut self, position: Vec3);
    /// Linear velocity in m/s.
    fn linear_velocity(&self) -> Vec3;
    /// Angular velocity in rad/s.
    fn angular_velocity(&self) -> Vec3;
    /// Applies an instantaneous impulse through the centre of mass.
    fn apply_impulse(&mut self, impulse: Vec3);
    /// Zeroes both velocities so the body can come to rest.
    fn put_to_sleep(&mut self);
}

/// Per-hole stroke tally.
pub trait StrokeCounter {
    fn increment(&mut self);
    fn current_count(&self) -> u32;
}

/// Fire-and-forget audio playback.
pub trait SoundSink {
    /// Plays `clip` once at `volume` in `[0, 1]`.
    fn play(&mut self, clip: SoundClip, volume: f32);
}

/// Camera rig that can snap back to its default pose behind the golfer.
pub trait ViewControl {
    fn reset_pose(&mut self);
}

/// Course-level progression, told when the ball drops.
pub trait CourseProgression {
    fn on_hole_complete(&mut self);
}

/// Sink that drops every cue. Useful for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl SoundSink for SilentSink {
    fn play(&mut self, _clip: SoundClip, _volume: f32) {}
}

/// Collaborators borrowed for the duration of one step.
///
/// `view` is optional: with no camera bound, view resets are no-ops.
pub struct ShotEnv<'a> {
    pub ball: &'a mut dyn BallBody,
    pub strokes: &'a mut dyn StrokeCounter,
    pub sound: &'a mut dyn SoundSink,
    pub view: Option<&'a mut dyn ViewControl>,
    pub course: &'a mut dyn CourseProgression,
}

impl ShotEnv<'_> {
    /// Resets the camera if one is bound.
    pub fn reset_view(&mut self) {
        if let Some(view) = self.view.as_deref_mut() {
            view.reset_pose();
        }
    }
}
