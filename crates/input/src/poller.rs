//! Non-blocking keyboard poller.
//!
//! The game consumes at most one key per tick. Everything the terminal
//! buffered since the last tick is drained; the most recent bound key wins.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::{GameAction, InputEvent};
use tetris_cle_engine::InputSource;

/// Folds a burst of terminal events into the one event a tick sees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatestEvent {
    action: Option<GameAction>,
    resize: Option<(u16, u16)>,
}

impl LatestEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        match event {
            // Release events only arrive with keyboard enhancement; they are not presses.
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if let Some(action) = handle_key_event(key) {
                    self.action = Some(action);
                }
            }
            Event::Resize(width, height) => self.resize = Some((width, height)),
            _ => {}
        }
    }

    /// A key beats a resize; the resize is still noticed by the renderer's
    /// own size check on the next frame.
    pub fn finish(self) -> Option<InputEvent> {
        match (self.action, self.resize) {
            (Some(action), _) => Some(InputEvent::Action(action)),
            (None, Some((width, height))) => Some(InputEvent::Resize { width, height }),
            (None, None) => None,
        }
    }
}

/// [`InputSource`] backed by the crossterm event queue.
#[derive(Debug, Default)]
pub struct KeyPoller {
    _private: (),
}

impl KeyPoller {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for KeyPoller {
    fn poll(&mut self) -> Result<Option<InputEvent>> {
        let mut latest = LatestEvent::new();
        while event::poll(Duration::ZERO)? {
            latest.push(event::read()?);
        }
        Ok(latest.finish())
    }
}
