//! Game loop (engine-facing).
//!
//! The engine drives a [`GameState`] at a fixed tick rate and talks to the
//! outside world only through three capabilities:
//!
//! - [`InputSource`]: non-blocking poll for at most one event per tick
//! - [`Display`]: presents a [`GameSnapshot`] once per tick
//! - [`Clock`]: monotonic time and sleeping
//!
//! A terminal front-end implements the first two on top of crossterm; tests
//! plug in scripted fakes.

pub mod session;

pub use tetris_cle_core as core;
pub use tetris_cle_types as types;

pub use session::{GameSummary, Session, SessionTiming};

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::core::GameSnapshot;
use crate::types::InputEvent;

/// Source of player input.
pub trait InputSource {
    /// Return the event for this tick without blocking.
    ///
    /// `Ok(None)` means no key is buffered. Implementations report only the
    /// most recent key; earlier presses in the same tick are dropped.
    fn poll(&mut self) -> Result<Option<InputEvent>>;
}

/// Something that can show a frame.
pub trait Display {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()>;

    /// Forget what is on screen; the next frame is drawn in full.
    fn invalidate(&mut self) {}
}

/// Monotonic time source used to pace ticks.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// The real clock: `Instant::now` and `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn poll(&mut self) -> Result<Option<InputEvent>> {
        (**self).poll()
    }
}

impl<T: Display + ?Sized> Display for &mut T {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        (**self).present(snapshot)
    }

    fn invalidate(&mut self) {
        (**self).invalidate()
    }
}
