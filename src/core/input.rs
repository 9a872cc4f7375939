use std::collections::BTreeMap;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum KeyCode {
    Left,
    Right,
    /// Jump.
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputState {
    Pressed,
    Held,
    Released,
}

/// Per-frame key state. The driver reports raw key changes with [`InputHandler::set_down`]
/// and calls [`InputHandler::update_step`] once at the end of every frame.
#[derive(Clone, Debug, Default)]
pub struct InputHandler {
    data: BTreeMap<KeyCode, InputState>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed(&self, key: KeyCode) -> bool {
        self.data.get(&key) == Some(&InputState::Pressed)
    }
    pub fn held(&self, key: KeyCode) -> bool {
        self.data.get(&key) == Some(&InputState::Held)
    }
    pub fn down(&self, key: KeyCode) -> bool {
        self.pressed(key) || self.held(key)
    }

    pub fn set_down(&mut self, key: KeyCode, is_down: bool) {
        match (self.data.get(&key).copied(), is_down) {
            (None | Some(InputState::Released), true) => {
                self.data.insert(key, InputState::Pressed);
            }
            (Some(InputState::Pressed | InputState::Held), false) => {
                self.data.insert(key, InputState::Released);
            }
            _ => {}
        }
    }

    /// Ages key states by one frame: pressed keys become held, released keys are forgotten.
    pub fn update_step(&mut self) {
        self.data = self
            .data
            .iter()
            .filter_map(|(&key, &state)| match state {
                InputState::Pressed | InputState::Held => Some((key, InputState::Held)),
                InputState::Released => None,
            })
            .collect();
    }
}
