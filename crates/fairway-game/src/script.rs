//! A scripted player for headless runs.
//!
//! The script never touches the shot session directly. It presses and
//! releases whatever keys or mouse buttons the [`InputMap`] binds to each
//! action, so a run goes through the same action resolution a human would.

use std::f32::consts::{PI, TAU};

use fairway_input::{Action, InputBinding, InputMap, KeyboardState, MouseButtons, RawKeyEvent};
use glam::Vec3;
use tracing::{debug, warn};
use winit::event::ElementState;
use winit::keyboard::PhysicalKey;

use fairway_shot::heading_towards;

/// Shortest and longest swing the script will hold.
const MIN_HOLD_SECONDS: f32 = 0.3;
const MAX_HOLD_SECONDS: f32 = 1.4;
/// Distance a swing of `swing_hold_seconds` is meant to cover.
const REFERENCE_DISTANCE: f32 = 6.0;

/// What the script can see of the game this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Situation {
    /// Ball asleep and no swing in progress.
    pub ready: bool,
    /// A swing is winding up or coming down.
    pub swinging: bool,
    pub golfer_position: Vec3,
    pub golfer_heading: f32,
    pub target: Vec3,
    /// Heading change of one rotate press, in radians.
    pub rotate_step: f32,
}

/// A button change the script wants this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Press(Action),
    Release(Action),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Waiting,
    Aiming,
    Holding { remaining: f32 },
    FollowThrough,
}

/// Aims at the cup with rotate taps, then holds the swing for a time scaled
/// by the distance.
#[derive(Debug, Clone)]
pub struct ScriptedGolfer {
    swing_hold_seconds: f32,
    phase: Phase,
    tapped: Option<Action>,
    swings: u32,
}

impl ScriptedGolfer {
    pub fn new(swing_hold_seconds: f32) -> Self {
        Self {
            swing_hold_seconds: swing_hold_seconds.max(0.0),
            phase: Phase::Waiting,
            tapped: None,
            swings: 0,
        }
    }

    /// Seconds to hold the swing for a shot of `distance` metres.
    pub fn hold_for(&self, distance: f32) -> f32 {
        (self.swing_hold_seconds * distance / REFERENCE_DISTANCE)
            .clamp(MIN_HOLD_SECONDS, MAX_HOLD_SECONDS)
    }

    /// Decides this frame's button changes.
    pub fn plan(&mut self, dt: f32, situation: &Situation) -> Vec<Command> {
        let mut commands = Vec::new();

        // A rotate tap is one frame down, one frame up.
        let just_tapped = self.tapped.take();
        if let Some(action) = just_tapped {
            commands.push(Command::Release(action));
        }

        match self.phase {
            Phase::Waiting => {
                if situation.ready {
                    self.phase = Phase::Aiming;
                }
            }
            Phase::Aiming => {
                if !situation.ready {
                    self.phase = Phase::Waiting;
                } else if just_tapped.is_none() {
                    let desired =
                        heading_towards(situation.golfer_position, situation.target);
                    let error = wrap_angle(desired - situation.golfer_heading);
                    if error.abs() <= situation.rotate_step * 0.5 {
                        let distance = (situation.target - situation.golfer_position)
                            .with_y(0.0)
                            .length();
                        let hold = self.hold_for(distance);
                        debug!(distance, hold, "scripted swing");
                        self.phase = Phase::Holding { remaining: hold };
                        commands.push(Command::Press(Action::Swing));
                    } else {
                        let action = if error > 0.0 {
                            Action::RotateLeft
                        } else {
                            Action::RotateRight
                        };
                        self.tapped = Some(action);
                        commands.push(Command::Press(action));
                    }
                }
            }
            Phase::Holding { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.phase = Phase::FollowThrough;
                    self.swings += 1;
                    commands.push(Command::Release(Action::Swing));
                } else {
                    self.phase = Phase::Holding { remaining };
                }
            }
            Phase::FollowThrough => {
                if !situation.swinging {
                    self.phase = Phase::Waiting;
                }
            }
        }

        commands
    }

    /// Drops any held input, e.g. when the next hole starts.
    pub fn reset(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if let Some(action) = self.tapped.take() {
            commands.push(Command::Release(action));
        }
        if matches!(self.phase, Phase::Holding { .. }) {
            commands.push(Command::Release(Action::Swing));
        }
        self.phase = Phase::Waiting;
        commands
    }

    /// Swings released so far.
    pub fn swings(&self) -> u32 {
        self.swings
    }
}

/// Applies `command` to the first input bound to its action.
pub fn apply(
    command: Command,
    map: &InputMap,
    keyboard: &mut KeyboardState,
    mouse: &mut MouseButtons,
) {
    let (action, state) = match command {
        Command::Press(action) => (action, ElementState::Pressed),
        Command::Release(action) => (action, ElementState::Released),
    };
    let Some(binding) = map.get_bindings(action).first() else {
        warn!(action = action.name(), "no input bound, scripted press dropped");
        return;
    };
    match *binding {
        InputBinding::Key(code) => keyboard.process_raw(RawKeyEvent {
            key: PhysicalKey::Code(code),
            state,
            repeat: false,
        }),
        InputBinding::MouseButton(button) => mouse.apply(button.to_winit(), state),
    }
}

/// Wraps an angle into `(-PI, PI]`.
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}
