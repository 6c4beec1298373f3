//! Action mapping: golf actions bound to keys and mouse buttons.
//!
//! [`InputMap`] defines which physical inputs trigger which [`Action`]s.
//! [`ActionState`] is recomputed each frame by [`ActionResolver`] and turned
//! into a [`ShotInput`] snapshot for the shot session.

use std::collections::{HashMap, HashSet};

use fairway_shot::ShotInput;
use tracing::{debug, warn};
use winit::event::MouseButton;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::buttons::{KeyboardState, MouseButtons};

/// Keys a golf binding can name. Matches the `Debug` output of [`KeyCode`].
fn key_from_name(s: &str) -> Option<KeyCode> {
    Some(match s {
        "KeyA" => KeyCode::KeyA,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyW" => KeyCode::KeyW,
        "KeyC" => KeyCode::KeyC,
        "KeyV" => KeyCode::KeyV,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Tab" => KeyCode::Tab,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ControlLeft" => KeyCode::ControlLeft,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "Home" => KeyCode::Home,
        _ => return None,
    })
}

/// Player actions the shot session understands.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Action {
    /// Held to wind up, released to swing.
    Swing,
    /// Turn the golfer counter-clockwise by one step.
    RotateLeft,
    /// Turn the golfer clockwise by one step.
    RotateRight,
    /// Snap the camera back behind the golfer.
    ResetView,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Swing,
        Action::RotateLeft,
        Action::RotateRight,
        Action::ResetView,
    ];

    /// Parses the config-file spelling of an action.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Swing => "Swing",
            Self::RotateLeft => "RotateLeft",
            Self::RotateRight => "RotateRight",
            Self::ResetView => "ResetView",
        }
    }
}

/// Mouse buttons a binding can name.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum MouseButtonBinding {
    Left,
    Right,
    Middle,
}

impl MouseButtonBinding {
    #[must_use]
    pub fn to_winit(self) -> MouseButton {
        match self {
            Self::Left => MouseButton::Left,
            Self::Right => MouseButton::Right,
            Self::Middle => MouseButton::Middle,
        }
    }
}

/// A physical input that can be bound to an action.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum InputBinding {
    Key(KeyCode),
    MouseButton(MouseButtonBinding),
}

impl InputBinding {
    /// Parses a binding name as written in the config: a key name such as
    /// `"Space"` or a mouse button as `"MouseLeft"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "MouseLeft" => Some(Self::MouseButton(MouseButtonBinding::Left)),
            "MouseRight" => Some(Self::MouseButton(MouseButtonBinding::Right)),
            "MouseMiddle" => Some(Self::MouseButton(MouseButtonBinding::Middle)),
            _ => key_from_name(name).map(Self::Key),
        }
    }
}

/// Maps [`Action`]s to lists of [`InputBinding`]s (OR logic).
#[derive(Debug, Clone, PartialEq)]
pub struct InputMap {
    pub bindings: HashMap<Action, Vec<InputBinding>>,
}

impl Default for InputMap {
    fn default() -> Self {
        Self::default_golf()
    }
}

impl InputMap {
    /// An input map with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Space or left mouse to swing, arrows or A/D to aim, R to reset the view.
    #[must_use]
    pub fn default_golf() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(
            Action::Swing,
            vec![
                InputBinding::Key(KeyCode::Space),
                InputBinding::MouseButton(MouseButtonBinding::Left),
            ],
        );
        bindings.insert(
            Action::RotateLeft,
            vec![
                InputBinding::Key(KeyCode::ArrowLeft),
                InputBinding::Key(KeyCode::KeyA),
            ],
        );
        bindings.insert(
            Action::RotateRight,
            vec![
                InputBinding::Key(KeyCode::ArrowRight),
                InputBinding::Key(KeyCode::KeyD),
            ],
        );
        bindings.insert(Action::ResetView, vec![InputBinding::Key(KeyCode::KeyR)]);
        Self { bindings }
    }

    /// Replaces the bindings for an action.
    pub fn set_bindings(&mut self, action: Action, bindings: Vec<InputBinding>) {
        self.bindings.insert(action, bindings);
    }

    #[must_use]
    pub fn get_bindings(&self, action: Action) -> &[InputBinding] {
        self.bindings.get(&action).map_or(&[], |v| v.as_slice())
    }

    /// Applies `action name -> binding name` overrides from the config file.
    /// Each override replaces that action's bindings with the single named
    /// input. Unknown names are logged and skipped. Returns how many applied.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> usize {
        let mut applied = 0;
        for (action_name, binding_name) in overrides {
            let Some(action) = Action::from_name(action_name) else {
                warn!(action = %action_name, "keybinding override for unknown action");
                continue;
            };
            let Some(binding) = InputBinding::from_name(binding_name) else {
                warn!(binding = %binding_name, "keybinding override names an unknown input");
                continue;
            };
            debug!(action = action.name(), binding = %binding_name, "keybinding override");
            self.set_bindings(action, vec![binding]);
            applied += 1;
        }
        applied
    }

    /// Bindings shared by more than one action, with the actions sharing them.
    #[must_use]
    pub fn conflicts(&self) -> Vec<(InputBinding, Vec<Action>)> {
        let mut seen: HashMap<InputBinding, Vec<Action>> = HashMap::new();
        for action in Action::ALL {
            for binding in self.get_bindings(action) {
                let users = seen.entry(*binding).or_default();
                if !users.contains(&action) {
                    users.push(action);
                }
            }
        }
        seen.into_iter()
            .filter(|(_, actions)| actions.len() > 1)
            .collect()
    }
}

/// Per-frame digital action state computed by [`ActionResolver`].
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    active: HashSet<Action>,
    prev_active: HashSet<Action>,
}

impl ActionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_action_active(&self, action: Action) -> bool {
        self.active.contains(&action)
    }

    /// True only on the frame the action went from inactive to active.
    #[must_use]
    pub fn action_just_activated(&self, action: Action) -> bool {
        self.active.contains(&action) && !self.prev_active.contains(&action)
    }

    /// True only on the frame the action went from active to inactive.
    #[must_use]
    pub fn action_just_deactivated(&self, action: Action) -> bool {
        !self.active.contains(&action) && self.prev_active.contains(&action)
    }

    /// Snapshot for the shot session.
    #[must_use]
    pub fn shot_input(&self) -> ShotInput {
        ShotInput {
            swing_held: self.is_action_active(Action::Swing),
            rotate_left: self.action_just_activated(Action::RotateLeft),
            rotate_right: self.action_just_activated(Action::RotateRight),
            reset_view: self.action_just_activated(Action::ResetView),
        }
    }
}

/// Populates [`ActionState`] from the current button state.
pub struct ActionResolver;

impl ActionResolver {
    /// Resolve all actions. Call once per frame after input events are in.
    pub fn resolve(
        input_map: &InputMap,
        keyboard: &KeyboardState,
        mouse: &MouseButtons,
        state: &mut ActionState,
    ) {
        state.prev_active = std::mem::take(&mut state.active);

        for (action, bindings) in &input_map.bindings {
            if bindings
                .iter()
                .any(|b| Self::read_binding(b, keyboard, mouse))
            {
                state.active.insert(*action);
            }
        }
    }

    fn read_binding(binding: &InputBinding, keyboard: &KeyboardState, mouse: &MouseButtons) -> bool {
        match binding {
            InputBinding::Key(code) => keyboard.is_pressed(PhysicalKey::Code(*code)),
            InputBinding::MouseButton(btn) => mouse.is_pressed(btn.to_winit()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::RawKeyEvent;
    use winit::event::ElementState;

    fn press_key(kb: &mut KeyboardState, code: KeyCode) {
        kb.process_raw(RawKeyEvent {
            key: PhysicalKey::Code(code),
            state: ElementState::Pressed,
            repeat: false,
        });
    }

    fn release_key(kb: &mut KeyboardState, code: KeyCode) {
        kb.process_raw(RawKeyEvent {
            key: PhysicalKey::Code(code),
            state: ElementState::Released,
            repeat: false,
        });
    }

    #[test]
    fn test_space_swings_with_default_map() {
        let map = InputMap::default_golf();
        let mut kb = KeyboardState::new();
        let mouse = MouseButtons::new();
        let mut state = ActionState::new();

        press_key(&mut kb, KeyCode::Space);
        ActionResolver::resolve(&map, &kb, &mouse, &mut state);
        let input = state.shot_input();
        assert!(input.swing_held);
        assert!(state.action_just_activated(Action::Swing));

        ActionResolver::resolve(&map, &kb, &mouse, &mut state);
        assert!(state.shot_input().swing_held);
        assert!(!state.action_just_activated(Action::Swing));

        release_key(&mut kb, KeyCode::Space);
        ActionResolver::resolve(&map, &kb, &mouse, &mut state);
        assert!(!state.shot_input().swing_held);
        assert!(state.action_just_deactivated(Action::Swing));
    }

    #[test]
    fn test_mouse_binding_or_key() {
        let map = InputMap::default_golf();
        let kb = KeyboardState::new();
        let mut mouse = MouseButtons::new();
        mouse.press(MouseButton::Left);
        let mut state = ActionState::new();
        ActionResolver::resolve(&map, &kb, &mouse, &mut state);
        assert!(state.is_action_active(Action::Swing));
    }

    #[test]
    fn test_rotate_is_an_edge() {
        let map = InputMap::default_golf();
        let mut kb = KeyboardState::new();
        let mouse = MouseButtons::new();
        let mut state = ActionState::new();

        press_key(&mut kb, KeyCode::ArrowLeft);
        ActionResolver::resolve(&map, &kb, &mouse, &mut state);
        assert!(state.shot_input().rotate_left);
        ActionResolver::resolve(&map, &kb, &mouse, &mut state);
        assert!(!state.shot_input().rotate_left);
    }

    #[test]
    fn test_overrides_replace_bindings() {
        let mut map = InputMap::default_golf();
        let overrides = HashMap::from([
            ("Swing".to_string(), "Enter".to_string()),
            ("ResetView".to_string(), "MouseRight".to_string()),
            ("Jump".to_string(), "Space".to_string()),
            ("RotateLeft".to_string(), "NotAKey".to_string()),
        ]);

        assert_eq!(map.apply_overrides(&overrides), 2);
        assert_eq!(
            map.get_bindings(Action::Swing),
            &[InputBinding::Key(KeyCode::Enter)]
        );
        assert_eq!(
            map.get_bindings(Action::ResetView),
            &[InputBinding::MouseButton(MouseButtonBinding::Right)]
        );
        // Untouched by the bad override.
        assert_eq!(map.get_bindings(Action::RotateLeft).len(), 2);
    }

    #[test]
    fn test_conflicts_detected() {
        let mut map = InputMap::default_golf();
        assert!(map.conflicts().is_empty());
        map.set_bindings(Action::ResetView, vec![InputBinding::Key(KeyCode::Space)]);
        let conflicts = map.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].0, InputBinding::Key(KeyCode::Space));
    }

    #[test]
    fn test_action_names_roundtrip() {
        for action in Action::ALL {
            assert_eq!(Action::from_name(action.name()), Some(action));
        }
        assert_eq!(Action::from_name("swing"), None);
    }
}
