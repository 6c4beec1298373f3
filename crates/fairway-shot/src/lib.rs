//! Shot and swing control: ball rest and out-of-bounds tracking, the swing
//! state machine, and the supervisor that sets up each stroke.
//!
//! Everything the core does not own (physics body, audio, camera, stroke
//! tally, course progression) is reached through the traits in
//! [`collaborators`], borrowed per step via [`ShotEnv`].

pub mod ball_state;
pub mod collaborators;
pub mod cues;
pub mod golfer;
pub mod layout;
pub mod rest;
pub mod session;
pub mod supervisor;
pub mod surface;
pub mod swing;

#[cfg(test)]
mod test_utils;

pub use ball_state::{BallState, DEFAULT_OUT_OF_BOUNDS_SECONDS};
pub use collaborators::{
    BallBody, CourseProgression, ShotEnv, SilentSink, SoundSink, StrokeCounter, ViewControl,
};
pub use cues::DelayedCues;
pub use golfer::{Golfer, heading_towards};
pub use layout::{Aabb, Axis, HoleLayout, IllegalZone};
pub use rest::{RestDetector, RestTimer, RestTuning};
pub use session::{FixedStepReport, ShotInput, ShotSession, ShotTuning};
pub use supervisor::{DEFAULT_PENALTY_CUE_DELAY, SettleOutcome, ShotSupervisor};
pub use surface::{ContactEvent, SoundClip, SurfaceTag, surface_hit_volume};
pub use swing::{SwingController, SwingOutcome, SwingPhase, SwingTuning};
