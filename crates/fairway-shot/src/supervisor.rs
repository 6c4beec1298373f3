//! Side effects when the ball settles or a shot is reset.
//!
//! The supervisor owns no shot state of its own. It reads the hole layout,
//! and on each settle event decides between "hole complete", "slide out of an
//! illegal zone then set up", and plain "set up for the next swing".

use glam::Vec3;
use tracing::{debug, info};

use crate::ball_state::BallState;
use crate::collaborators::ShotEnv;
use crate::cues::DelayedCues;
use crate::golfer::Golfer;
use crate::layout::HoleLayout;
use crate::surface::SoundClip;
use crate::swing::SwingController;

/// Delay before the "bad shot" cue after a penalty reset.
pub const DEFAULT_PENALTY_CUE_DELAY: f32 = 0.2;

/// What happened when the ball settled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettleOutcome {
    /// The ball is in the cup. Nothing was set up.
    HoleComplete,
    /// Golfer, club, and camera are set for the next swing. `relocated` is
    /// the landing spot if the ball was moved out of an illegal zone.
    ReadyForSwing { relocated: Option<Vec3> },
}

/// Orchestrates rest, relocation, hole completion, and swing setup.
#[derive(Debug, Clone)]
pub struct ShotSupervisor {
    layout: HoleLayout,
    penalty_cue_delay: f32,
}

impl ShotSupervisor {
    pub fn new(layout: HoleLayout, penalty_cue_delay: f32) -> Self {
        Self {
            layout,
            penalty_cue_delay,
        }
    }

    /// Puts the ball to rest and prepares whatever comes next.
    pub fn on_ball_settled(
        &self,
        ball_state: &mut BallState,
        swing: &mut SwingController,
        golfer: &mut Golfer,
        env: &mut ShotEnv<'_>,
    ) -> SettleOutcome {
        env.ball.put_to_sleep();
        swing.mark_asleep();

        let position = env.ball.position();
        if self.layout.hole_sensor.contains(position) {
            info!(
                hole = self.layout.number,
                strokes = env.strokes.current_count(),
                "ball in the hole"
            );
            golfer.club_visible = false;
            env.course.on_hole_complete();
            return SettleOutcome::HoleComplete;
        }

        let relocated = self
            .layout
            .illegal_zone_at(position)
            .map(|zone| zone.relocate(position));
        let rest_position = relocated.unwrap_or(position);

        self.setup_next_swing(rest_position, ball_state, swing, golfer, env);

        // Requested after the snapshot so begin_shot does not discard it.
        if let Some(target) = relocated {
            debug!(from = ?position, to = ?target, "ball moved out of illegal zone");
            ball_state.request_warp(target);
        }

        SettleOutcome::ReadyForSwing { relocated }
    }

    /// Places golfer and club at the ball and starts a fresh shot.
    pub fn setup_next_swing(
        &self,
        ball_position: Vec3,
        ball_state: &mut BallState,
        swing: &mut SwingController,
        golfer: &mut Golfer,
        env: &mut ShotEnv<'_>,
    ) {
        golfer.position = ball_position;
        if env.strokes.current_count() == 0 {
            golfer.heading = self.layout.starting_heading;
        }
        env.reset_view();
        golfer.club_visible = true;

        ball_state.begin_shot(ball_position);
        swing.reset_ready(golfer);
        debug!(position = ?ball_position, "ready for swing");
    }

    /// Penalty path after [`BallState::consume_reset`] returned `true`.
    pub fn on_penalty_reset(
        &self,
        ball_state: &mut BallState,
        swing: &mut SwingController,
        golfer: &mut Golfer,
        cues: &mut DelayedCues,
        env: &mut ShotEnv<'_>,
    ) -> SettleOutcome {
        env.strokes.increment();
        info!(
            hole = self.layout.number,
            strokes = env.strokes.current_count(),
            "penalty stroke"
        );
        cues.schedule(SoundClip::BadShot, 1.0, self.penalty_cue_delay);
        self.on_ball_settled(ball_state, swing, golfer, env)
    }

    pub fn layout(&self) -> &HoleLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: HoleLayout) {
        self.layout = layout;
    }
}
