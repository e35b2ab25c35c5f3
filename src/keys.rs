/// Keyboard shortcuts for the sidebar
use crate::selection::Direction;
use crate::workspace::Action;

/// The parts of a keydown event the bindings look at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>) -> Self {
        KeyInput {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    /// Close the sidebar and ask the parent page to pin this app
    Pin,
    Dispatch(Action),
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    pub action: KeyAction,
    pub prevent_default: bool,
}

impl KeyBinding {
    fn new(action: KeyAction, prevent_default: bool) -> Self {
        KeyBinding {
            action,
            prevent_default,
        }
    }
}

/// Resolve a key press. Only Escape works while the sidebar is closed.
pub fn bind(input: &KeyInput, sidebar_open: bool, has_selection: bool) -> Option<KeyBinding> {
    if input.key == "Escape" {
        return Some(KeyBinding::new(KeyAction::Pin, false));
    }
    if !sidebar_open {
        return None;
    }

    match input.key.as_str() {
        "Delete" if has_selection => Some(KeyBinding::new(
            KeyAction::Dispatch(Action::RemoveSelected),
            false,
        )),
        "ArrowUp" => Some(navigate(Direction::Up, input.shift)),
        "ArrowDown" => Some(navigate(Direction::Down, input.shift)),
        "a" | "A" if input.ctrl || input.meta => Some(KeyBinding::new(
            KeyAction::Dispatch(Action::SelectAll),
            true,
        )),
        _ => None,
    }
}

fn navigate(direction: Direction, extend: bool) -> KeyBinding {
    KeyBinding::new(
        KeyAction::Dispatch(Action::Navigate { direction, extend }),
        true,
    )
}
