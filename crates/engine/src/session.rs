//! Fixed-rate session loop.
//!
//! Each tick: wait for the next deadline, poll input, advance the game, present
//! the frame. When a lock marked full lines, the marked frame stays on screen
//! for the line-clear wait before the rows are removed.

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info, trace};

use crate::core::{GameSnapshot, GameState, TickOutcome};
use crate::types::{GameAction, InputEvent, LINE_CLEAR_WAIT_MS, TICK_MS};
use crate::{Clock, Display, InputSource};

/// Tick period and line-clear hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    pub tick: Duration,
    pub line_clear_wait: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(TICK_MS as u64),
            line_clear_wait: Duration::from_millis(LINE_CLEAR_WAIT_MS as u64),
        }
    }
}

/// Final numbers of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub pieces_locked: u32,
    pub ticks: u64,
}

/// A game bound to its input, display and clock.
pub struct Session<I, D, C> {
    state: GameState,
    input: I,
    display: D,
    clock: C,
    timing: SessionTiming,
    snapshot: GameSnapshot,
}

impl<I, D, C> Session<I, D, C>
where
    I: InputSource,
    D: Display,
    C: Clock,
{
    pub fn new(state: GameState, input: I, display: D, clock: C) -> Self {
        Self {
            state,
            input,
            display,
            clock,
            timing: SessionTiming::default(),
            snapshot: GameSnapshot::default(),
        }
    }

    pub fn with_timing(mut self, timing: SessionTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Run until the game is over.
    ///
    /// Ticks are paced against a monotonic deadline, so time spent polling and
    /// drawing is absorbed instead of added. A session that falls behind (for
    /// example after the line-clear hold) resynchronizes rather than bursting.
    pub fn run(&mut self) -> Result<GameSummary> {
        if !self.state.game_over() {
            self.present()?;
        }

        let mut deadline = self.clock.now();
        while !self.state.game_over() {
            deadline = self.wait_until(deadline + self.timing.tick);
            self.step()?;
        }

        let summary = self.summary();
        info!(
            score = summary.score,
            pieces = summary.pieces_locked,
            ticks = summary.ticks,
            "session finished"
        );
        Ok(summary)
    }

    /// Run a single tick without waiting for its deadline.
    pub fn step(&mut self) -> Result<TickOutcome> {
        let action = self.poll_action()?;
        let outcome = self.state.tick(action);
        trace!(?action, ?outcome, "tick");

        if let Some(ev) = self.state.take_last_event() {
            debug!(
                kind = ev.kind.as_str(),
                lines = ev.lines_cleared,
                gained = ev.score_gained,
                special_gained = ev.special_gained,
                speed = ev.speed,
                "lock"
            );
        }

        if self.state.game_over() {
            return Ok(outcome);
        }

        self.present()?;

        if outcome.lines_marked > 0 {
            self.clock.sleep(self.timing.line_clear_wait);
            let removed = self.state.finish_line_clear();
            debug!(removed, "lines removed");
        }

        Ok(outcome)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.state.score(),
            pieces_locked: self.state.pieces_locked(),
            ticks: self.state.ticks(),
        }
    }

    fn poll_action(&mut self) -> Result<Option<GameAction>> {
        match self.input.poll()? {
            Some(InputEvent::Action(action)) => Ok(Some(action)),
            Some(InputEvent::Resize { width, height }) => {
                debug!(width, height, "terminal resized");
                self.display.invalidate();
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn present(&mut self) -> Result<()> {
        self.state.snapshot_into(&mut self.snapshot);
        self.display.present(&self.snapshot)
    }

    /// Sleep until `deadline` and return it, or return now if already late.
    fn wait_until(&mut self, deadline: Instant) -> Instant {
        let now = self.clock.now();
        match deadline.checked_duration_since(now) {
            Some(remaining) if !remaining.is_zero() => {
                self.clock.sleep(remaining);
                deadline
            }
            _ => now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Field;
    use crate::types::{GameStatus, PieceKind, INITIAL_SPEED};
    use std::collections::VecDeque;

    struct ScriptedInput {
        events: VecDeque<Option<InputEvent>>,
        /// Returned once the script runs out.
        then: Option<InputEvent>,
    }

    impl ScriptedInput {
        fn new(events: Vec<Option<InputEvent>>) -> Self {
            Self {
                events: events.into(),
                then: None,
            }
        }

        fn then_quit(mut self) -> Self {
            self.then = Some(InputEvent::Action(GameAction::Quit));
            self
        }
    }

    impl InputSource for ScriptedInput {
        fn poll(&mut self) -> Result<Option<InputEvent>> {
            Ok(self.events.pop_front().unwrap_or(self.then))
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        frames: Vec<GameSnapshot>,
        invalidations: usize,
    }

    impl Display for RecordingDisplay {
        fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
            self.frames.push(*snapshot);
            Ok(())
        }

        fn invalidate(&mut self) {
            self.invalidations += 1;
        }
    }

    struct FakeClock {
        now: Instant,
        sleeps: Vec<Duration>,
    }

    impl FakeClock {
        fn new() -> Self {
            Self {
                now: Instant::now(),
                sleeps: Vec::new(),
            }
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            self.now
        }

        fn sleep(&mut self, duration: Duration) {
            self.sleeps.push(duration);
            self.now += duration;
        }
    }

    fn key(action: GameAction) -> Option<InputEvent> {
        Some(InputEvent::Action(action))
    }

    #[test]
    fn quit_ends_run_without_rendering_the_final_tick() {
        let input = ScriptedInput::new(vec![None, None, key(GameAction::Quit)]);
        let mut session = Session::new(
            GameState::new(7),
            input,
            RecordingDisplay::default(),
            FakeClock::new(),
        );

        let summary = session.run().unwrap();
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.score, 0);
        // Initial frame plus two playing ticks.
        assert_eq!(session.display().frames.len(), 3);
        assert_eq!(session.state().status(), GameStatus::GameOver);
    }

    #[test]
    fn ticks_are_paced_by_the_clock() {
        let input = ScriptedInput::new(vec![None, None]).then_quit();
        let mut session = Session::new(
            GameState::new(7),
            input,
            RecordingDisplay::default(),
            FakeClock::new(),
        );
        session.run().unwrap();

        let tick = Duration::from_millis(TICK_MS as u64);
        assert_eq!(session.clock.sleeps, vec![tick, tick, tick]);
    }

    #[test]
    fn paused_frames_are_still_presented() {
        let input = ScriptedInput::new(vec![key(GameAction::Pause), None, None]).then_quit();
        let mut session = Session::new(
            GameState::new(7),
            input,
            RecordingDisplay::default(),
            FakeClock::new(),
        );
        session.run().unwrap();

        let frames = &session.display().frames;
        assert!(frames[1..].iter().all(|f| f.paused()));
    }

    #[test]
    fn marked_lines_are_shown_then_removed_after_the_wait() {
        let mut rows = vec![""; 16];
        rows.push("AAAA..AAAA");
        let field = Field::from_rows(&rows);
        let state = GameState::with_field(field, PieceKind::O, PieceKind::T, 1);

        // Soft drop the O piece to the floor, then let forced descent lock it.
        let mut script: Vec<_> = (0..14).map(|_| key(GameAction::SoftDrop)).collect();
        script.resize(INITIAL_SPEED as usize, None);
        let input = ScriptedInput::new(script);

        let mut session = Session::new(state, input, RecordingDisplay::default(), FakeClock::new());
        let mut outcome = TickOutcome::default();
        for _ in 0..INITIAL_SPEED {
            outcome = session.step().unwrap();
        }

        assert!(outcome.locked);
        assert_eq!(outcome.lines_marked, 1);
        let last = session.display().frames.last().unwrap();
        assert_eq!(last.pending_lines, 1);
        assert_eq!(last.field[16][1], 8);

        assert_eq!(
            session.clock.sleeps,
            vec![Duration::from_millis(LINE_CLEAR_WAIT_MS as u64)]
        );
        assert!(session.state().pending_lines().is_empty());
        assert_eq!(session.state().score(), 25 + 200);
    }

    #[test]
    fn resize_invalidates_display() {
        let input = ScriptedInput::new(vec![Some(InputEvent::Resize {
            width: 80,
            height: 24,
        })])
        .then_quit();
        let mut session = Session::new(
            GameState::new(7),
            input,
            RecordingDisplay::default(),
            FakeClock::new(),
        );
        session.run().unwrap();
        assert_eq!(session.display().invalidations, 1);
    }

    #[test]
    fn game_over_at_start_never_presents() {
        let field = Field::from_rows(&["", "....AA...."]);
        let state = GameState::with_field(field, PieceKind::O, PieceKind::O, 1);
        let mut session = Session::new(
            state,
            ScriptedInput::new(vec![]),
            RecordingDisplay::default(),
            FakeClock::new(),
        );

        let summary = session.run().unwrap();
        assert_eq!(summary.ticks, 0);
        assert!(session.display().frames.is_empty());
    }
}
