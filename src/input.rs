use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Fire,
    Restart,
}

/// Keys currently held down. The front-end keeps it current from key events;
/// the simulation only reads it.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        InputState::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn with(keys: &[Key]) -> Self {
        let mut state = InputState::new();
        for &key in keys {
            state.press(key);
        }
        state
    }
}
