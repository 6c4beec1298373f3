//! End-to-end shot scenarios against recording doubles.

use super::*;
use crate::layout::{Aabb, Axis, IllegalZone};
use crate::surface::{SoundClip, SurfaceTag};
use crate::test_utils::Harness;

const DT: f32 = 1.0 / 16.0;

const HOLD: ShotInput = ShotInput {
    swing_held: true,
    rotate_left: false,
    rotate_right: false,
    reset_view: false,
};

const IDLE: ShotInput = ShotInput {
    swing_held: false,
    rotate_left: false,
    rotate_right: false,
    reset_view: false,
};

fn hole_sensor_center() -> Vec3 {
    Vec3::new(0.0, 0.0, -30.0)
}

fn layout(number: u32, tee: Vec3) -> HoleLayout {
    HoleLayout {
        number,
        tee,
        starting_heading: 0.5,
        hole_sensor: Aabb::from_center_half_extents(hole_sensor_center(), Vec3::splat(0.2)),
        illegal_zones: vec![IllegalZone {
            bounds: Aabb::new(Vec3::new(4.0, -1.0, -20.0), Vec3::new(8.0, 1.0, -10.0)),
            axis: Axis::X,
            landing_spot: Vec3::new(3.0, 0.0, 0.0),
        }],
    }
}

fn session() -> (ShotSession, Harness) {
    let tee = Vec3::new(0.0, 0.1, 0.0);
    let session = ShotSession::new(ShotTuning::default(), layout(1, tee));
    (session, Harness::with_ball_at(tee))
}

/// Fixed-steps with no input until the ball settles.
fn run_until_settled(session: &mut ShotSession, harness: &mut Harness) -> (SettleOutcome, usize) {
    for tick in 1..=200 {
        if let Some(outcome) = session.fixed_step(DT, &IDLE, &mut harness.env()).settled {
            return (outcome, tick);
        }
    }
    panic!("ball never settled");
}

/// Holds the swing for ten ticks, then releases until the ball is struck.
fn strike(session: &mut ShotSession, harness: &mut Harness) {
    for _ in 0..10 {
        session.fixed_step(DT, &HOLD, &mut harness.env());
    }
    for _ in 0..20 {
        let report = session.fixed_step(DT, &IDLE, &mut harness.env());
        if let Some(SwingOutcome::Struck { .. }) = report.swing {
            return;
        }
    }
    panic!("swing never struck the ball");
}

#[test]
fn test_tee_shot_waits_for_rest() {
    let (mut session, mut harness) = session();
    assert!(!session.swing().is_ready());

    // Swing input is ignored before the ball has settled.
    session.fixed_step(DT, &HOLD, &mut harness.env());
    assert_eq!(session.swing().phase(), SwingPhase::Idle);

    let (outcome, ticks) = run_until_settled(&mut session, &mut harness);
    assert_eq!(outcome, SettleOutcome::ReadyForSwing { relocated: None });
    // 0.5 s cooldown plus 0.25 s grace
    assert!(ticks >= 12, "settled after {ticks} ticks");
    assert!(session.swing().is_ready());
    assert_eq!(session.golfer().heading, 0.5);
}

#[test]
fn test_strike_counts_one_stroke_and_hides_club_in_flight() {
    let (mut session, mut harness) = session();
    run_until_settled(&mut session, &mut harness);
    session.input_step(DT, &IDLE, &mut harness.env());
    assert!(session.golfer().club_visible);

    strike(&mut session, &mut harness);
    session.input_step(DT, &IDLE, &mut harness.env());

    assert_eq!(harness.strokes.0, 1);
    assert_eq!(harness.ball.impulses.len(), 1);
    assert!(!session.golfer().club_visible);
    assert!(harness.clips().contains(&SoundClip::ClubStrike));
}

#[test]
fn test_water_resets_to_shot_start_with_penalty() {
    let (mut session, mut harness) = session();
    run_until_settled(&mut session, &mut harness);
    let start = harness.ball.position;
    strike(&mut session, &mut harness);

    harness.ball.position = Vec3::new(2.0, -0.5, -14.0);
    session.on_contact(
        ContactEvent::VolumeEnter {
            tag: SurfaceTag::Water,
            speed: 4.0,
        },
        &mut harness.sound,
    );
    let report = session.fixed_step(DT, &IDLE, &mut harness.env());

    assert!(report.penalty);
    assert_eq!(report.settled, Some(SettleOutcome::ReadyForSwing { relocated: None }));
    assert_eq!(harness.strokes.0, 2);
    assert_eq!(harness.ball.position, start);
    assert_eq!(harness.ball.linvel, Vec3::ZERO);
    assert_eq!(session.golfer().position, start);
    assert!(session.swing().is_ready());

    // Splash now, bad-shot cue after the delay.
    assert_eq!(harness.clips().last(), Some(&SoundClip::Water));
    session.input_step(0.15, &IDLE, &mut harness.env());
    assert_ne!(harness.clips().last(), Some(&SoundClip::BadShot));
    session.input_step(0.1, &IDLE, &mut harness.env());
    assert_eq!(harness.clips().last(), Some(&SoundClip::BadShot));
    assert_eq!(session.pending_cues(), 0);
}

#[test]
fn test_out_of_bounds_resets_after_threshold() {
    let (mut session, mut harness) = session();
    run_until_settled(&mut session, &mut harness);
    let start = harness.ball.position;
    strike(&mut session, &mut harness);

    harness.ball.position = Vec3::new(40.0, 0.0, -5.0);
    session.on_contact(
        ContactEvent::SurfaceEnter {
            tag: SurfaceTag::OutOfBounds,
            speed: 1.0,
        },
        &mut harness.sound,
    );
    assert!(session.ball_state().is_out_of_bounds());

    let mut ticks = 0;
    loop {
        ticks += 1;
        assert!(ticks <= 60, "reset never happened");
        if session.fixed_step(DT, &IDLE, &mut harness.env()).penalty {
            break;
        }
    }
    // 3 s at 1/16 s per tick
    assert!(ticks >= 47, "reset after {ticks} ticks");
    assert_eq!(harness.ball.position, start);
    assert_eq!(harness.strokes.0, 2);
    assert!(session.ball_state().still_in_bounds());
}

#[test]
fn test_ball_in_hole_completes_and_freezes_session() {
    let (mut session, mut harness) = session();
    run_until_settled(&mut session, &mut harness);
    strike(&mut session, &mut harness);

    harness.ball.position = hole_sensor_center();
    harness.ball.linvel = Vec3::ZERO;
    let (outcome, _) = run_until_settled(&mut session, &mut harness);

    assert_eq!(outcome, SettleOutcome::HoleComplete);
    assert_eq!(harness.course.completed, 1);
    assert!(session.is_hole_complete());

    // Nothing happens until the next hole is started.
    let report = session.fixed_step(DT, &HOLD, &mut harness.env());
    assert_eq!(report, FixedStepReport::default());
    session.input_step(DT, &IDLE, &mut harness.env());
    assert!(!session.golfer().club_visible);
}

#[test]
fn test_start_hole_warps_to_new_tee_and_rearms_rest() {
    let (mut session, mut harness) = session();
    run_until_settled(&mut session, &mut harness);
    strike(&mut session, &mut harness);
    harness.ball.position = hole_sensor_center();
    harness.ball.linvel = Vec3::ZERO;
    run_until_settled(&mut session, &mut harness);

    let tee = Vec3::new(50.0, 0.1, 0.0);
    harness.strokes.0 = 0;
    session.start_hole(layout(2, tee));
    assert!(!session.is_hole_complete());
    assert!(!session.swing().is_ready());

    let report = session.fixed_step(DT, &IDLE, &mut harness.env());
    assert_eq!(report.warped, Some(tee));
    assert_eq!(harness.ball.position, tee);

    let (outcome, _) = run_until_settled(&mut session, &mut harness);
    assert_eq!(outcome, SettleOutcome::ReadyForSwing { relocated: None });
    assert_eq!(session.golfer().position, tee);
    assert_eq!(session.layout().number, 2);
}

#[test]
fn test_illegal_zone_relocation_warps_next_step() {
    let (mut session, mut harness) = session();
    run_until_settled(&mut session, &mut harness);
    strike(&mut session, &mut harness);

    harness.ball.position = Vec3::new(6.0, 0.0, -12.0);
    harness.ball.linvel = Vec3::ZERO;
    let (outcome, _) = run_until_settled(&mut session, &mut harness);

    let target = Vec3::new(3.0, 0.0, -12.0);
    assert_eq!(
        outcome,
        SettleOutcome::ReadyForSwing {
            relocated: Some(target)
        }
    );
    assert_eq!(harness.ball.position, Vec3::new(6.0, 0.0, -12.0));

    let report = session.fixed_step(DT, &IDLE, &mut harness.env());
    assert_eq!(report.warped, Some(target));
    assert_eq!(harness.ball.position, target);
    assert_eq!(session.ball_state().shot_start_position(), target);
    // Relocation is free.
    assert_eq!(harness.strokes.0, 1);
}

#[test]
fn test_later_strokes_keep_heading() {
    let (mut session, mut harness) = session();
    run_until_settled(&mut session, &mut harness);
    let turn = ShotInput {
        rotate_left: true,
        ..IDLE
    };
    session.input_step(DT, &turn, &mut harness.env());
    let aimed = session.golfer().heading;
    strike(&mut session, &mut harness);

    harness.ball.position = Vec3::new(0.0, 0.0, -10.0);
    harness.ball.linvel = Vec3::ZERO;
    run_until_settled(&mut session, &mut harness);
    assert_eq!(session.golfer().heading, aimed);
}

#[test]
fn test_rotation_only_while_ready() {
    let (mut session, mut harness) = session();
    let turn = ShotInput {
        rotate_left: true,
        ..IDLE
    };
    session.input_step(DT, &turn, &mut harness.env());
    assert_eq!(session.golfer().heading, 0.5);

    run_until_settled(&mut session, &mut harness);
    session.input_step(DT, &turn, &mut harness.env());
    let expected = 0.5 + 2.0_f32.to_radians();
    assert!((session.golfer().heading - expected).abs() < 1e-5);

    let turn_back = ShotInput {
        rotate_right: true,
        ..IDLE
    };
    session.input_step(DT, &turn_back, &mut harness.env());
    assert!((session.golfer().heading - 0.5).abs() < 1e-5);
}

#[test]
fn test_reset_view_shortcut_and_missing_view() {
    let (mut session, mut harness) = session();
    let press = ShotInput {
        reset_view: true,
        ..IDLE
    };
    session.input_step(DT, &press, &mut harness.env());
    assert_eq!(harness.view.resets, 1);

    harness.without_view = true;
    session.input_step(DT, &press, &mut harness.env());
    let (outcome, _) = run_until_settled(&mut session, &mut harness);
    assert!(matches!(outcome, SettleOutcome::ReadyForSwing { .. }));
    assert_eq!(harness.view.resets, 1);
}

#[test]
fn test_surface_exit_volume_events_are_ignored() {
    let (mut session, mut harness) = session();
    session.on_contact(
        ContactEvent::VolumeExit {
            tag: SurfaceTag::Water,
        },
        &mut harness.sound,
    );
    session.on_contact(
        ContactEvent::SurfaceEnter {
            tag: SurfaceTag::Grass,
            speed: 0.1,
        },
        &mut harness.sound,
    );
    session.on_contact(
        ContactEvent::SurfaceExit {
            tag: SurfaceTag::Grass,
        },
        &mut harness.sound,
    );
    assert_eq!(session.ball_state().resting_surface_count(), 0);
    assert!(!session.ball_state().pending_reset());
    assert!(harness.sound.cues.is_empty());
}
