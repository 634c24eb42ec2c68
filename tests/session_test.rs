//! End-to-end session: scripted keys in, terminal bytes out, no real terminal.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use anyhow::Result;

use tetris_cle::core::{Field, GameState};
use tetris_cle::engine::{Clock, InputSource, Session};
use tetris_cle::term::{TerminalRenderer, Viewport, WINDOW_HEIGHT, WINDOW_WIDTH};
use tetris_cle::types::{GameAction, InputEvent, PieceKind};

struct Script(VecDeque<Option<GameAction>>);

impl InputSource for Script {
    fn poll(&mut self) -> Result<Option<InputEvent>> {
        let next = self.0.pop_front().unwrap_or(Some(GameAction::Quit));
        Ok(next.map(InputEvent::Action))
    }
}

struct StepClock(Instant);

impl Clock for StepClock {
    fn now(&self) -> Instant {
        self.0
    }

    fn sleep(&mut self, duration: Duration) {
        self.0 += duration;
    }
}

#[test]
fn session_plays_to_quit_and_reports_the_score() {
    let mut rows = vec![""; 16];
    rows.push("AAAA..AAAA");
    let state = GameState::with_field(Field::from_rows(&rows), PieceKind::O, PieceKind::T, 9);

    let mut keys: VecDeque<_> = std::iter::repeat(Some(GameAction::SoftDrop)).take(20).collect();
    keys.extend(std::iter::repeat(None).take(60));
    let mut renderer = TerminalRenderer::with_writer(
        Vec::new(),
        Some(Viewport::new(WINDOW_WIDTH, WINDOW_HEIGHT)),
    );

    let summary = {
        let clock = StepClock(Instant::now());
        let mut session = Session::new(state, Script(keys), &mut renderer, clock);
        session.run().unwrap()
    };

    assert_eq!(summary.pieces_locked, 1);
    assert_eq!(summary.score, 225);
    assert_eq!(summary.ticks, 81);

    let out = String::from_utf8_lossy(renderer.writer());
    assert!(out.contains("TETRIS Command Line Edition"));
}
