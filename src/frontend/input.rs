//! Keyboard sampling
//!
//! Terminals report key presses, but key releases only under the kitty
//! keyboard protocol. With release events the held state is exact; without
//! them a key stays held for a short window after each press or auto-repeat.

use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::TickInput;

/// What a key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Confirm,
    Quit,
}

/// Default bindings: arrows or A/D to move, Enter/Space to confirm, Esc or
/// Ctrl+C to quit
pub fn action_for(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Confirm),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Right),
        _ => None,
    }
}

/// Held state of one movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hold {
    /// Held until a release event
    Down,
    /// Held until this instant unless refreshed
    Until(Instant),
}

impl Hold {
    fn is_held(&self, now: Instant) -> bool {
        match *self {
            Hold::Down => true,
            Hold::Until(deadline) => now < deadline,
        }
    }
}

/// Shifted letters report a different code on press and release
fn physical(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Continuous movement state plus the discrete events of the current frame
///
/// Held state is tracked per physical key, so releasing one binding of a
/// direction leaves it held while another binding still is.
#[derive(Debug, Clone)]
pub struct KeyState {
    /// Release events are reported by the terminal
    release_events: bool,
    hold_window: Duration,
    held: HashMap<KeyCode, (Action, Hold)>,
    confirm: bool,
    quit: bool,
}

impl KeyState {
    pub fn new(release_events: bool, hold_window: Duration) -> Self {
        Self {
            release_events,
            hold_window,
            held: HashMap::new(),
            confirm: false,
            quit: false,
        }
    }

    /// Feed one key event
    pub fn handle(&mut self, key: &KeyEvent, now: Instant) {
        let Some(action) = action_for(key) else {
            return;
        };
        let code = physical(key.code);
        match (action, key.kind) {
            (Action::Quit, KeyEventKind::Press) => self.quit = true,
            (Action::Confirm, KeyEventKind::Press) => self.confirm = true,
            (Action::Left | Action::Right, KeyEventKind::Release) => {
                self.held.remove(&code);
            }
            (Action::Left | Action::Right, KeyEventKind::Press | KeyEventKind::Repeat) => {
                let hold = if self.release_events {
                    Hold::Down
                } else {
                    // Switching direction drops the other keys at once
                    self.held.retain(|_, (held, _)| *held == action);
                    Hold::Until(now + self.hold_window)
                };
                self.held.insert(code, (action, hold));
            }
            _ => {}
        }
    }

    /// Input for this frame; clears the one-shot events
    pub fn take(&mut self, now: Instant) -> TickInput {
        self.held.retain(|_, (_, hold)| hold.is_held(now));
        let input = TickInput {
            left: self.is_held(Action::Left),
            right: self.is_held(Action::Right),
            confirm: self.confirm,
            quit: self.quit,
        };
        self.confirm = false;
        self.quit = false;
        input
    }

    fn is_held(&self, action: Action) -> bool {
        self.held.values().any(|(held, _)| *held == action)
    }
}

/// Result of draining the terminal event queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub input: TickInput,
    /// New terminal size, if it changed
    pub resized: Option<(u16, u16)>,
}

/// Polls crossterm without blocking
#[derive(Debug)]
pub struct KeySampler {
    keys: KeyState,
}

impl KeySampler {
    pub fn new(release_events: bool, hold_window: Duration) -> Self {
        Self {
            keys: KeyState::new(release_events, hold_window),
        }
    }

    /// Drain every pending event and produce this frame's input
    pub fn sample(&mut self, now: Instant) -> io::Result<Sample> {
        let mut resized = None;
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.keys.handle(&key, now),
                Event::Resize(cols, rows) => resized = Some((cols, rows)),
                // Terminal focus loss is not a quit; ignore the rest
                _ => {}
            }
        }
        Ok(Sample {
            input: self.keys.take(now),
            resized,
        })
    }
}
