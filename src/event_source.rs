use anyhow::Result;
pub use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::collections::VecDeque;
use std::time::Duration;

/// Where the application loop gets its input from, so tests can script it.
pub trait EventSource {
    /// Whether an event is ready within `timeout`
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    fn read(&mut self) -> Result<Event>;
}

/// Terminal input via crossterm
pub struct KeyboardEventSource;

impl EventSource for KeyboardEventSource {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(crossterm::event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(crossterm::event::read()?)
    }
}

/// Replays scripted input. Once the script runs out every read yields `q`,
/// so a scripted run always ends.
#[derive(Debug, Default)]
pub struct SimulatedEventSource {
    script: VecDeque<Event>,
}

impl SimulatedEventSource {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            script: events.into(),
        }
    }

    pub fn key_event(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    pub fn char_key(c: char) -> Event {
        Self::key_event(KeyCode::Char(c), KeyModifiers::NONE)
    }

    pub fn code_key(code: KeyCode) -> Event {
        Self::key_event(code, KeyModifiers::NONE)
    }

    pub fn left_click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl EventSource for SimulatedEventSource {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.script.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        Ok(self
            .script
            .pop_front()
            .unwrap_or_else(|| Self::char_key('q')))
    }
}
