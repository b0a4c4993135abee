use std::collections::{HashMap, VecDeque};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::Key;

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, VecDeque<Event>>,
    current_frame: u64,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        let events = events
            .into_iter()
            .map(|(frame, list)| (frame, list.into_iter().collect()))
            .collect();
        SimulatedInput { events, current_frame: 0 }
    }

    /// Demo script: thrust, turn, shoot a few times, then quit.
    pub fn demo_script(quit_frame: u64) -> Self {
        let mut events: HashMap<u64, Vec<Event>> = HashMap::new();
        let mut at = |frame: u64, event: Event| events.entry(frame).or_default().push(event);
        at(1, key_event(KeyCode::Up, KeyEventKind::Press));
        at(20, key_event(KeyCode::Up, KeyEventKind::Release));
        at(21, key_event(KeyCode::Right, KeyEventKind::Press));
        at(40, key_event(KeyCode::Right, KeyEventKind::Release));
        for shot in 0..5 {
            let frame = 41 + shot * 10;
            at(frame, key_event(KeyCode::Char(' '), KeyEventKind::Press));
            at(frame + 2, key_event(KeyCode::Char(' '), KeyEventKind::Release));
        }
        at(100, key_event(KeyCode::Left, KeyEventKind::Press));
        at(130, key_event(KeyCode::Left, KeyEventKind::Release));
        at(quit_frame, key_event(KeyCode::Char('q'), KeyEventKind::Press));
        SimulatedInput::new(events)
    }

    pub fn poll(&mut self, frame_count: u64) -> bool {
        self.current_frame = frame_count;
        self.events
            .get(&frame_count)
            .is_some_and(|queue| !queue.is_empty())
    }

    pub fn read(&mut self) -> Option<Event> {
        self.events
            .get_mut(&self.current_frame)
            .and_then(|queue| queue.pop_front())
    }
}

pub fn key_event(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

/// What a key does in the game, if anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Game(Key),
    Quit,
}

pub fn map_key(code: KeyCode) -> Option<KeyAction> {
    match code {
        KeyCode::Left => Some(KeyAction::Game(Key::Left)),
        KeyCode::Right => Some(KeyAction::Game(Key::Right)),
        KeyCode::Up => Some(KeyAction::Game(Key::Up)),
        KeyCode::Char(' ') => Some(KeyAction::Game(Key::Fire)),
        KeyCode::Char('r') | KeyCode::Enter => Some(KeyAction::Game(Key::Restart)),
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
        _ => None,
    }
}
