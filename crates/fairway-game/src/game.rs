//! A headless round: course physics, the shot session, the scripted player,
//! and the bookkeeping around them, advanced by the [`GameLoop`].
//!
//! [`GameLoop`]: crate::game_loop::GameLoop

use fairway_config::Config;
use fairway_input::{ActionResolver, ActionState, InputMap, KeyboardState, MouseButtons};
use fairway_physics::{BallSpec, RapierBall};
use fairway_shot::{
    BallBody, RestTuning, ShotEnv, ShotInput, ShotSession, ShotTuning, StrokeCounter,
    SwingOutcome, SwingPhase, SwingTuning,
};
use tracing::{info, warn};

use crate::course::Course;
use crate::game_loop::Simulation;
use crate::hole::{CourseManager, HoleCard, StrokeTally};
use crate::presentation::{LogSink, LogView};
use crate::script::{self, ScriptedGolfer, Situation};

/// Strokes after which the script concedes a hole.
pub const MAX_STROKES_PER_HOLE: u32 = 10;

/// Session tunables from the loaded config.
pub fn shot_tuning(config: &Config) -> ShotTuning {
    let swing = &config.swing;
    let rest = &config.rest;
    ShotTuning {
        swing: SwingTuning {
            max_force: swing.max_force,
            force_rate: swing.force_rate,
            backswing_degrees_per_second: swing.backswing_degrees_per_second,
            downswing_seconds: swing.downswing_seconds,
            min_effective_force: swing.min_effective_force,
            max_hold_seconds: swing.max_hold_seconds,
            impulse_scale: swing.impulse_scale,
            rotate_step_degrees: swing.rotate_step_degrees,
        },
        rest: RestTuning {
            sleep_velocity: rest.sleep_velocity,
            sleep_angular_velocity: rest.sleep_angular_velocity,
            min_sleep_seconds: rest.min_sleep_seconds,
            grace_seconds: rest.grace_seconds,
        },
        out_of_bounds_seconds: config.ball.out_of_bounds_seconds,
        penalty_cue_delay: config.ball.penalty_cue_delay,
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    RoundComplete,
    OutOfTime,
}

/// End-of-run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub end: RunEnd,
    pub cards: Vec<HoleCard>,
    pub sim_seconds: f32,
    pub penalties: u32,
    pub swings: u32,
    pub cues_played: u32,
    pub camera_resets: u32,
}

/// Everything one headless round owns.
pub struct Game {
    course: Course,
    session: ShotSession,
    input_map: InputMap,
    keyboard: KeyboardState,
    mouse: MouseButtons,
    actions: ActionState,
    input: ShotInput,
    script: ScriptedGolfer,
    strokes: StrokeTally,
    progress: CourseManager,
    sound: LogSink,
    view: LogView,
    sim_seconds: f32,
    max_sim_seconds: f32,
    penalties: u32,
    end: Option<RunEnd>,
}

impl Game {
    pub fn new(config: &Config) -> Self {
        let course = Course::build(config.sim.holes, &BallSpec::default(), config.sim.fixed_dt());
        let first = course.opening_hole().clone();

        let mut input_map = InputMap::default_golf();
        let applied = input_map.apply_overrides(&config.input.keybindings);
        if applied > 0 {
            info!(applied, "keybinding overrides applied");
        }
        for (binding, actions) in input_map.conflicts() {
            warn!(?binding, ?actions, "input bound to more than one action");
        }

        info!(hole = first.number, "round started");
        Self {
            session: ShotSession::new(shot_tuning(config), first),
            progress: CourseManager::new(course.hole_count()),
            course,
            input_map,
            keyboard: KeyboardState::new(),
            mouse: MouseButtons::new(),
            actions: ActionState::new(),
            input: ShotInput::default(),
            script: ScriptedGolfer::new(config.sim.swing_hold_seconds),
            strokes: StrokeTally::default(),
            sound: LogSink::new(config.audio.master_volume, config.audio.sfx_volume),
            view: LogView::default(),
            sim_seconds: 0.0,
            max_sim_seconds: config.sim.max_sim_seconds.max(0.0),
            penalties: 0,
            end: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.end.is_some()
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            end: self.end.unwrap_or(RunEnd::OutOfTime),
            cards: self.progress.cards().to_vec(),
            sim_seconds: self.sim_seconds,
            penalties: self.penalties,
            swings: self.script.swings(),
            cues_played: self.sound.played(),
            camera_resets: self.view.resets(),
        }
    }

    fn ball_speed(&mut self) -> f32 {
        RapierBall::new(&mut self.course.world, self.course.ball.body)
            .linear_velocity()
            .length()
    }

    /// Closes the hole if the ball dropped or the script gave up, and tees up
    /// the next one.
    fn advance_hole(&mut self) {
        let holed = self.progress.take_holed_out();
        let conceded = !holed
            && self.session.swing().is_ready()
            && self.strokes.current_count() >= MAX_STROKES_PER_HOLE;
        if !holed && !conceded {
            return;
        }
        if conceded {
            warn!(
                hole = self.progress.current_hole(),
                strokes = self.strokes.current_count(),
                "hole conceded"
            );
        }

        let next = self
            .progress
            .finish_hole(self.strokes.current_count(), holed);
        self.strokes.reset();
        for command in self.script.reset() {
            script::apply(command, &self.input_map, &mut self.keyboard, &mut self.mouse);
        }

        match next.and_then(|n| self.course.layout(n).cloned()) {
            Some(layout) => self.session.start_hole(layout),
            None => {
                info!(
                    total = self.progress.total_strokes(),
                    "round complete"
                );
                self.end = Some(RunEnd::RoundComplete);
            }
        }
    }

    /// Lets the script press buttons and resolves them into next frame's input.
    fn poll_input(&mut self, dt: f32) {
        self.keyboard.clear_transients();
        self.mouse.clear_transients();

        let golfer = self.session.golfer();
        let target = self
            .course
            .cup(self.progress.current_hole())
            .unwrap_or(golfer.position);
        let situation = Situation {
            ready: self.session.swing().is_ready() && !self.session.is_hole_complete(),
            swinging: self.session.swing().phase() != SwingPhase::Idle,
            golfer_position: golfer.position,
            golfer_heading: golfer.heading,
            target,
            rotate_step: self
                .session
                .swing()
                .tuning()
                .rotate_step_degrees
                .to_radians(),
        };
        for command in self.script.plan(dt, &situation) {
            script::apply(command, &self.input_map, &mut self.keyboard, &mut self.mouse);
        }

        ActionResolver::resolve(&self.input_map, &self.keyboard, &self.mouse, &mut self.actions);
        self.input = self.actions.shot_input();
    }
}

impl Simulation for Game {
    fn fixed_update(&mut self, dt: f64) {
        if self.end.is_some() {
            return;
        }
        let dt = dt as f32;
        let speed_before = self.ball_speed();

        let report = {
            let mut ball = RapierBall::new(&mut self.course.world, self.course.ball.body);
            let mut env = ShotEnv {
                ball: &mut ball,
                strokes: &mut self.strokes,
                sound: &mut self.sound,
                view: Some(&mut self.view),
                course: &mut self.progress,
            };
            self.session.fixed_step(dt, &self.input, &mut env)
        };
        if report.penalty {
            self.penalties += 1;
        }
        if let Some(SwingOutcome::Discarded { force }) = report.swing {
            info!(force, "swing too soft to count");
        }

        self.course.world.step();
        let events = self
            .course
            .tracker
            .collect(&self.course.world, &self.course.surfaces, speed_before);
        for event in events {
            self.session.on_contact(event, &mut self.sound);
        }

        self.sim_seconds += dt;
    }

    fn frame_update(&mut self, frame_time: f64, _alpha: f64) {
        if self.end.is_some() {
            return;
        }
        let dt = frame_time as f32;
        {
            let mut ball = RapierBall::new(&mut self.course.world, self.course.ball.body);
            let mut env = ShotEnv {
                ball: &mut ball,
                strokes: &mut self.strokes,
                sound: &mut self.sound,
                view: Some(&mut self.view),
                course: &mut self.progress,
            };
            self.session.input_step(dt, &self.input, &mut env);
        }

        self.advance_hole();
        if self.end.is_some() {
            return;
        }
        if self.sim_seconds >= self.max_sim_seconds {
            warn!(
                seconds = self.sim_seconds,
                hole = self.progress.current_hole(),
                "simulation time limit reached"
            );
            self.end = Some(RunEnd::OutOfTime);
            return;
        }

        self.poll_input(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_loop::GameLoop;
    use fairway_shot::CourseProgression;

    const FRAME: f64 = 1.0 / 50.0;

    fn config(max_seconds: f32) -> Config {
        let mut config = Config::default();
        config.sim.max_sim_seconds = max_seconds;
        config.sim.holes = 2;
        config
    }

    fn run(game: &mut Game, game_loop: &mut GameLoop, frames: usize) {
        for _ in 0..frames {
            if game.is_finished() {
                break;
            }
            game_loop.tick(FRAME, game);
        }
    }

    #[test]
    fn test_tuning_follows_config() {
        let mut config = Config::default();
        config.swing.max_force = 123.0;
        config.rest.grace_seconds = 0.4;
        config.ball.out_of_bounds_seconds = 5.0;
        let tuning = shot_tuning(&config);
        assert_eq!(tuning.swing.max_force, 123.0);
        assert_eq!(tuning.rest.grace_seconds, 0.4);
        assert_eq!(tuning.out_of_bounds_seconds, 5.0);
        assert_eq!(shot_tuning(&Config::default()), ShotTuning::default());
    }

    /// Ticks until the swing is ready, returning the frames it took.
    fn run_until_ready(game: &mut Game, game_loop: &mut GameLoop) -> usize {
        for frame in 1..=100 {
            game_loop.tick(FRAME, game);
            if game.session.swing().is_ready() {
                return frame;
            }
        }
        panic!("swing never became ready");
    }

    #[test]
    fn test_ball_settles_on_tee_before_first_swing() {
        let mut game = Game::new(&config(60.0));
        let mut game_loop = GameLoop::new(60);
        assert!(!game.session.swing().is_ready());

        // Cooldown plus grace is 0.75 s.
        let frames = run_until_ready(&mut game, &mut game_loop);
        assert!(frames >= 37, "ready after {frames} frames");
        assert!(game.session.swing().is_ball_asleep());
        assert_eq!(game.strokes.current_count(), 0);
    }

    fn ball_position(game: &mut Game) -> glam::Vec3 {
        RapierBall::new(&mut game.course.world, game.course.ball.body).position()
    }

    #[test]
    fn test_real_ball_rests_again_after_a_stroke() {
        let mut game = Game::new(&config(60.0));
        let mut game_loop = GameLoop::new(60);
        run_until_ready(&mut game, &mut game_loop);
        let tee = ball_position(&mut game);

        let mut frames = 0;
        while game.strokes.current_count() + game.progress.total_strokes() == 0 {
            assert!(frames < 50 * 5, "no stroke after 5 s");
            game_loop.tick(FRAME, &mut game);
            frames += 1;
        }

        // Settling again goes through put_to_sleep and keeps the world stepping.
        let mut farthest: f32 = 0.0;
        let mut frames = 0;
        while !game.session.swing().is_ready() {
            assert!(frames < 50 * 20, "ball never came back to rest");
            game_loop.tick(FRAME, &mut game);
            farthest = farthest.max((ball_position(&mut game) - tee).length());
            frames += 1;
        }
        assert!(farthest > 0.1, "ball never left the tee");
        assert!(game.session.swing().is_ball_asleep());

        let sim_before = game.sim_seconds;
        run(&mut game, &mut game_loop, 30);
        assert!(game.sim_seconds > sim_before);
    }

    #[test]
    fn test_zero_rate_steps_physics_at_default_rate() {
        let mut config = config(60.0);
        config.sim.fixed_hz = 0;
        let game = Game::new(&config);
        assert!((game.course.world.timestep() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_scripted_golfer_takes_a_stroke() {
        let mut game = Game::new(&config(60.0));
        let mut game_loop = GameLoop::new(60);
        // Settle (under 1 s), aim (already facing the cup), hold and swing.
        run(&mut game, &mut game_loop, 50 * 5);
        let played = game.strokes.current_count() + game.progress.total_strokes();
        assert!(played >= 1, "no stroke after 5 s");
    }

    #[test]
    fn test_time_limit_ends_run() {
        let mut game = Game::new(&config(2.0));
        let mut game_loop = GameLoop::new(60);
        run(&mut game, &mut game_loop, 50 * 10);
        assert!(game.is_finished());
        let summary = game.summary();
        assert_eq!(summary.end, RunEnd::OutOfTime);
        assert!(summary.sim_seconds >= 2.0);
        assert!(summary.sim_seconds < 2.1);
    }

    #[test]
    fn test_conceded_hole_moves_to_next_tee() {
        let mut game = Game::new(&config(60.0));
        let mut game_loop = GameLoop::new(60);
        run_until_ready(&mut game, &mut game_loop);

        for _ in 0..MAX_STROKES_PER_HOLE {
            game.strokes.increment();
        }
        game_loop.tick(FRAME, &mut game);

        assert_eq!(game.progress.cards().len(), 1);
        assert!(!game.progress.cards()[0].holed);
        assert_eq!(game.progress.current_hole(), 2);
        assert_eq!(game.strokes.current_count(), 0);
        assert_eq!(game.session.layout().number, 2);
    }

    #[test]
    fn test_holing_the_last_hole_completes_round() {
        let mut config = config(60.0);
        config.sim.holes = 1;
        let mut game = Game::new(&config);
        let mut game_loop = GameLoop::new(60);
        run(&mut game, &mut game_loop, 5);

        game.progress.on_hole_complete();
        game_loop.tick(FRAME, &mut game);

        assert!(game.is_finished());
        let summary = game.summary();
        assert_eq!(summary.end, RunEnd::RoundComplete);
        assert_eq!(summary.cards.len(), 1);
        assert!(summary.cards[0].holed);
    }
}
