//! Input abstraction: keyboard and mouse buttons mapped through configurable
//! action bindings into a per-frame [`fairway_shot::ShotInput`].

pub mod action_map;
pub mod buttons;

pub use action_map::{
    Action, ActionResolver, ActionState, InputBinding, InputMap, MouseButtonBinding,
};
pub use buttons::{ButtonState, KeyboardState, MouseButtons, RawKeyEvent};
