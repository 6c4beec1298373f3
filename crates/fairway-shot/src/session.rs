//! One hole's worth of shot state, advanced on two clocks.
//!
//! [`ShotSession::fixed_step`] runs at the physics rate: deferred warps, the
//! out-of-bounds timer, penalty resets, rest detection, and the swing state
//! machine, in that order. [`ShotSession::input_step`] runs once per frame for
//! delayed cues, aiming, camera shortcuts, and club visibility.

use glam::Vec3;
use tracing::{debug, info};

use crate::ball_state::{BallState, DEFAULT_OUT_OF_BOUNDS_SECONDS};
use crate::collaborators::{ShotEnv, SoundSink};
use crate::cues::DelayedCues;
use crate::golfer::Golfer;
use crate::layout::HoleLayout;
use crate::rest::RestTuning;
use crate::supervisor::{DEFAULT_PENALTY_CUE_DELAY, SettleOutcome, ShotSupervisor};
use crate::surface::ContactEvent;
use crate::swing::{SwingController, SwingOutcome, SwingPhase, SwingTuning};

/// Every tunable of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotTuning {
    pub swing: SwingTuning,
    pub rest: RestTuning,
    pub out_of_bounds_seconds: f32,
    pub penalty_cue_delay: f32,
}

impl Default for ShotTuning {
    fn default() -> Self {
        Self {
            swing: SwingTuning::default(),
            rest: RestTuning::default(),
            out_of_bounds_seconds: DEFAULT_OUT_OF_BOUNDS_SECONDS,
            penalty_cue_delay: DEFAULT_PENALTY_CUE_DELAY,
        }
    }
}

/// Snapshot of the player's shot controls for one step.
///
/// `swing_held` is a level; everything else is a rising edge. The swing
/// phases track press and release themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShotInput {
    pub swing_held: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub reset_view: bool,
}

/// What happened during one fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedStepReport {
    /// The ball was teleported here at the start of the step.
    pub warped: Option<Vec3>,
    /// A latched reset was consumed and a penalty stroke added.
    pub penalty: bool,
    pub settled: Option<SettleOutcome>,
    pub swing: Option<SwingOutcome>,
}

/// Ball state, swing, supervisor, and golfer pose for the hole in play.
#[derive(Debug, Clone)]
pub struct ShotSession {
    ball_state: BallState,
    swing: SwingController,
    supervisor: ShotSupervisor,
    golfer: Golfer,
    cues: DelayedCues,
    hole_complete: bool,
}

impl ShotSession {
    /// Creates a session teed up on `layout`. The ball must come to rest
    /// before the first swing.
    pub fn new(tuning: ShotTuning, layout: HoleLayout) -> Self {
        let mut golfer = Golfer {
            position: layout.tee,
            heading: layout.starting_heading,
            ..Default::default()
        };
        let mut swing = SwingController::new(tuning.swing, tuning.rest);
        swing.reset_ready(&mut golfer);

        let mut ball_state = BallState::new(tuning.out_of_bounds_seconds);
        ball_state.begin_shot(layout.tee);

        Self {
            ball_state,
            swing,
            supervisor: ShotSupervisor::new(layout, tuning.penalty_cue_delay),
            golfer,
            cues: DelayedCues::new(),
            hole_complete: false,
        }
    }

    /// Moves play to the next hole. The ball is warped to the tee on the next
    /// fixed step and has to settle before the first swing.
    pub fn start_hole(&mut self, layout: HoleLayout) {
        info!(hole = layout.number, "teeing up");
        let tee = layout.tee;

        self.golfer.position = tee;
        self.golfer.heading = layout.starting_heading;
        self.golfer.club_visible = false;
        self.swing.reset_ready(&mut self.golfer);
        self.swing.wake();

        self.ball_state.begin_shot(tee);
        self.ball_state.request_warp(tee);
        self.supervisor.set_layout(layout);
        self.hole_complete = false;
    }

    /// Routes a physics contact into the ball state. Applied immediately.
    pub fn on_contact(&mut self, event: ContactEvent, sound: &mut dyn SoundSink) {
        match event {
            ContactEvent::SurfaceEnter { tag, speed } => {
                self.ball_state.on_enter_surface(tag, speed, sound)
            }
            ContactEvent::SurfaceExit { tag } => self.ball_state.on_exit_surface(tag),
            ContactEvent::VolumeEnter { tag, speed } => {
                self.ball_state.on_enter_hazard_volume(tag, speed, sound)
            }
            ContactEvent::VolumeExit { .. } => {}
        }
    }

    /// Advances the simulation-rate half of the session.
    pub fn fixed_step(
        &mut self,
        dt: f32,
        input: &ShotInput,
        env: &mut ShotEnv<'_>,
    ) -> FixedStepReport {
        let mut report = FixedStepReport::default();
        if self.hole_complete {
            return report;
        }

        report.warped = self.ball_state.apply_pending_warp(env.ball);
        self.ball_state.tick(dt);

        if self.ball_state.consume_reset(env.ball) {
            report.penalty = true;
            report.settled = Some(self.supervisor.on_penalty_reset(
                &mut self.ball_state,
                &mut self.swing,
                &mut self.golfer,
                &mut self.cues,
                env,
            ));
        } else if self
            .swing
            .update_rest(dt, &*env.ball, self.ball_state.still_in_bounds())
        {
            report.settled = Some(self.supervisor.on_ball_settled(
                &mut self.ball_state,
                &mut self.swing,
                &mut self.golfer,
                env,
            ));
        }

        if report.settled == Some(SettleOutcome::HoleComplete) {
            self.hole_complete = true;
            return report;
        }

        report.swing = self
            .swing
            .step(dt, input.swing_held, &mut self.golfer, env);
        report
    }

    /// Advances the frame-rate half of the session.
    pub fn input_step(&mut self, dt: f32, input: &ShotInput, env: &mut ShotEnv<'_>) {
        self.cues.tick(dt, env.sound);

        if self.swing.is_ready() && !self.hole_complete {
            let step = self.swing.tuning().rotate_step_degrees;
            if input.rotate_left {
                self.golfer.rotate(step);
            }
            if input.rotate_right {
                self.golfer.rotate(-step);
            }
            if input.rotate_left || input.rotate_right {
                debug!(heading = self.golfer.heading, "golfer turned");
            }
        }

        if input.reset_view {
            env.reset_view();
        }

        self.golfer.club_visible = !self.hole_complete
            && (self.swing.is_ball_asleep() || self.swing.phase() != SwingPhase::Idle);
    }

    pub fn ball_state(&self) -> &BallState {
        &self.ball_state
    }

    pub fn swing(&self) -> &SwingController {
        &self.swing
    }

    pub fn golfer(&self) -> &Golfer {
        &self.golfer
    }

    pub fn layout(&self) -> &HoleLayout {
        self.supervisor.layout()
    }

    pub fn pending_cues(&self) -> usize {
        self.cues.len()
    }

    pub fn is_hole_complete(&self) -> bool {
        self.hole_complete
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
