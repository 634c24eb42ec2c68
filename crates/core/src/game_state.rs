//! Game state module - manages the complete game state
//!
//! This module ties together the field, the piece catalog, the piece generator
//! and the scoring rules. One call to [`GameState::tick`] is one fixed-period
//! game step: advance the descent counter, apply the polled action, then run
//! forced descent (move down, or lock + detect lines + score + spawn).
//!
//! Full lines are only *marked* during a tick. The caller shows them for a
//! moment and then calls [`GameState::finish_line_clear`] to remove them.

use tracing::{debug, info};

use crate::field::{Field, FullLines};
use crate::pieces::rotated_mask;
use crate::rng::PieceGenerator;
use crate::scoring::{lock_score, next_speed, SpecialMeter};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Top-left of the 4x4 bounding box, in field coordinates
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// The rotated 4x4 cell mask, `mask[py][px]`
    pub fn mask(&self) -> [[bool; 4]; 4] {
        rotated_mask(self.kind, self.rotation)
    }

    /// Check if the piece fits the field at its current placement
    pub fn fits(&self, field: &Field) -> bool {
        field.fits(self.kind, self.rotation, self.x, self.y)
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Forced descent moved the piece down a row.
    pub descended: bool,
    /// The active piece was locked into the field.
    pub locked: bool,
    /// Rows marked for clearing by this tick's lock.
    pub lines_marked: usize,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    field: Field,
    active: Tetromino,
    next: PieceKind,
    pieces: PieceGenerator,
    status: GameStatus,
    score: u32,
    /// Ticks per forced descent
    speed: u32,
    /// Ticks since the last forced descent
    speed_counter: u32,
    pieces_locked: u32,
    special: u8,
    special_meter: SpecialMeter,
    /// Rows marked by the last lock, waiting for removal
    pending_lines: FullLines,
    pause_held: bool,
    rotate_held: bool,
    /// Last lock event (consumed by observers).
    last_event: Option<CoreLastEvent>,
    ticks: u64,
}

impl GameState {
    /// Create a new game on an empty field with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut pieces = PieceGenerator::new(seed);
        let active = pieces.draw();
        let next = pieces.draw();
        Self::from_parts(Field::new(), active, next, pieces)
    }

    /// Start from a prepared field with chosen active and next pieces.
    ///
    /// The active piece is placed at the spawn position; if it does not fit
    /// there the game is over before the first tick.
    pub fn with_field(field: Field, active: PieceKind, next: PieceKind, seed: u32) -> Self {
        Self::from_parts(field, active, next, PieceGenerator::new(seed))
    }

    fn from_parts(
        field: Field,
        active: PieceKind,
        next: PieceKind,
        pieces: PieceGenerator,
    ) -> Self {
        let active = Tetromino::new(active);
        let status = if active.fits(&field) {
            GameStatus::Playing
        } else {
            GameStatus::GameOver
        };

        info!(
            active = active.kind.as_str(),
            next = next.as_str(),
            seed = pieces.seed(),
            "game started"
        );

        Self {
            field,
            active,
            next,
            pieces,
            status,
            score: 0,
            speed: INITIAL_SPEED,
            speed_counter: 0,
            pieces_locked: 0,
            special: 0,
            special_meter: SpecialMeter::new(),
            pending_lines: FullLines::new(),
            pause_held: false,
            rotate_held: false,
            last_event: None,
            ticks: 0,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn special(&self) -> u8 {
        self.special
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn active(&self) -> Tetromino {
        self.active
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Rows marked for clearing and not yet removed, in ascending order
    pub fn pending_lines(&self) -> &[usize] {
        &self.pending_lines
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<CoreLastEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.field.write_codes(&mut out.field);
        out.active = ActiveSnapshot::from(self.active);
        out.next = self.next;
        out.next_mask = rotated_mask(self.next, Rotation::North);
        out.status = self.status;
        out.score = self.score;
        out.speed = self.speed;
        out.special = self.special;
        out.pieces_locked = self.pieces_locked;
        out.pending_lines = self.pending_lines.len() as u8;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the game by one tick with the action polled for it (if any).
    pub fn tick(&mut self, action: Option<GameAction>) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.game_over() {
            return outcome;
        }

        // Lines marked last tick that nobody removed yet.
        if !self.pending_lines.is_empty() {
            self.finish_line_clear();
        }

        self.ticks = self.ticks.wrapping_add(1);

        // Timing: the descent counter only runs while playing.
        let force_down = if self.paused() {
            false
        } else {
            self.speed_counter += 1;
            self.speed_counter >= self.speed
        };

        self.apply_action(action);
        if self.status != GameStatus::Playing {
            return outcome;
        }

        if force_down {
            self.speed_counter = 0;
            if self.try_move(0, 1) {
                outcome.descended = true;
            } else {
                self.lock_active();
                outcome.locked = true;
                outcome.lines_marked = self.pending_lines.len();
            }
        }

        outcome
    }

    /// Apply the input of one tick.
    ///
    /// Pause and rotate are edge-triggered: they act only on the first tick
    /// their key is seen, and re-arm once a tick passes with another key or none.
    fn apply_action(&mut self, action: Option<GameAction>) {
        let paused = self.paused();

        match action {
            Some(GameAction::Quit) => {
                info!(score = self.score, "quit requested");
                self.status = GameStatus::GameOver;
            }
            Some(GameAction::Pause) => {
                if !self.pause_held {
                    self.status = if paused {
                        GameStatus::Playing
                    } else {
                        GameStatus::Paused
                    };
                    info!(paused = !paused, "pause toggled");
                }
            }
            Some(GameAction::MoveLeft) if !paused => {
                self.try_move(-1, 0);
            }
            Some(GameAction::MoveRight) if !paused => {
                self.try_move(1, 0);
            }
            Some(GameAction::SoftDrop) if !paused => {
                self.try_move(0, 1);
            }
            Some(GameAction::Rotate) if !paused => {
                if !self.rotate_held {
                    self.try_rotate();
                }
            }
            Some(GameAction::Special) if !paused => {
                self.use_special();
            }
            _ => {}
        }

        self.pause_held = action == Some(GameAction::Pause);
        self.rotate_held = action == Some(GameAction::Rotate);
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let moved = Tetromino {
            x: self.active.x + dx,
            y: self.active.y + dy,
            ..self.active
        };
        if moved.fits(&self.field) {
            self.active = moved;
            return true;
        }
        false
    }

    /// Try to turn the active piece a quarter turn in place
    pub(crate) fn try_rotate(&mut self) -> bool {
        let rotated = Tetromino {
            rotation: self.active.rotation.rotate_cw(),
            ..self.active
        };
        if rotated.fits(&self.field) {
            self.active = rotated;
            return true;
        }
        false
    }

    /// Spend a special charge to swap the active and next piece kinds.
    ///
    /// Position and rotation of the active piece are kept.
    pub(crate) fn use_special(&mut self) -> bool {
        if self.special == 0 {
            return false;
        }
        self.special -= 1;
        let current = self.active.kind;
        self.active.kind = self.next;
        self.next = current;
        debug!(
            active = self.active.kind.as_str(),
            next = self.next.as_str(),
            remaining = self.special,
            "special used"
        );
        true
    }

    /// Lock the active piece, score it and spawn the next one
    fn lock_active(&mut self) {
        let piece = self.active;
        self.field.lock(piece.kind, piece.rotation, piece.x, piece.y);

        self.pieces_locked += 1;
        self.speed = next_speed(self.speed, self.pieces_locked);

        // Only the rows the piece spans can have become full.
        self.pending_lines = self.field.detect_full_lines(piece.y, piece.y + 4);
        let lines = self.pending_lines.len();

        let gained = lock_score(lines);
        self.score = self.score.saturating_add(gained);

        let special_before = self.special;
        self.special = self.special_meter.update(self.score, self.special);

        self.last_event = Some(CoreLastEvent {
            kind: piece.kind,
            lines_cleared: lines as u32,
            score_gained: gained,
            special_gained: self.special.saturating_sub(special_before),
            speed: self.speed,
        });
        debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            lines,
            score = self.score,
            speed = self.speed,
            "piece locked"
        );

        self.spawn();
    }

    /// Promote the next piece and draw a new one; game over if it cannot spawn
    fn spawn(&mut self) {
        self.active = Tetromino::new(self.next);
        self.next = self.pieces.draw();

        if !self.active.fits(&self.field) {
            self.status = GameStatus::GameOver;
            info!(
                score = self.score,
                pieces = self.pieces_locked,
                "game over: spawn blocked"
            );
        }
    }

    /// Remove the rows marked by the last lock.
    ///
    /// Returns how many rows were removed.
    pub fn finish_line_clear(&mut self) -> usize {
        let lines = std::mem::take(&mut self.pending_lines);
        self.field.clear_marked_lines(&lines);
        lines.len()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
