//! Recording doubles for the collaborator traits.

use glam::Vec3;

use crate::collaborators::{
    BallBody, CourseProgression, ShotEnv, SoundSink, StrokeCounter, ViewControl,
};
use crate::surface::SoundClip;

#[derive(Debug, Default, Clone)]
pub struct MockBall {
    pub position: Vec3,
    pub linvel: Vec3,
    pub angvel: Vec3,
    pub impulses: Vec<Vec3>,
    pub sleeps: u32,
}

impl MockBall {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

impl BallBody for MockBall {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn linear_velocity(&self) -> Vec3 {
        self.linvel
    }

    fn angular_velocity(&self) -> Vec3 {
        self.angvel
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.impulses.push(impulse);
        self.linvel += impulse;
    }

    fn put_to_sleep(&mut self) {
        self.linvel = Vec3::ZERO;
        self.angvel = Vec3::ZERO;
        self.sleeps += 1;
    }
}

#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub cues: Vec<(SoundClip, f32)>,
}

impl SoundSink for RecordingSink {
    fn play(&mut self, clip: SoundClip, volume: f32) {
        self.cues.push((clip, volume));
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Tally(pub u32);

impl StrokeCounter for Tally {
    fn increment(&mut self) {
        self.0 += 1;
    }

    fn current_count(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MockView {
    pub resets: u32,
}

impl ViewControl for MockView {
    fn reset_pose(&mut self) {
        self.resets += 1;
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MockCourse {
    pub completed: u32,
}

impl CourseProgression for MockCourse {
    fn on_hole_complete(&mut self) {
        self.completed += 1;
    }
}

/// Owns one of every double and lends them out as a [`ShotEnv`].
#[derive(Debug, Default)]
pub struct Harness {
    pub ball: MockBall,
    pub strokes: Tally,
    pub sound: RecordingSink,
    pub view: MockView,
    pub course: MockCourse,
    pub without_view: bool,
}

impl Harness {
    pub fn with_ball_at(position: Vec3) -> Self {
        Self {
            ball: MockBall::at(position),
            ..Default::default()
        }
    }

    pub fn env(&mut self) -> ShotEnv<'_> {
        let view: Option<&mut dyn ViewControl> = if self.without_view {
            None
        } else {
            Some(&mut self.view)
        };
        ShotEnv {
            ball: &mut self.ball,
            strokes: &mut self.strokes,
            sound: &mut self.sound,
            view,
            course: &mut self.course,
        }
    }

    pub fn clips(&self) -> Vec<SoundClip> {
        self.sound.cues.iter().map(|(clip, _)| *clip).collect()
    }
}
