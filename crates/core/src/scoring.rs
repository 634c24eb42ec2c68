//! Scoring module - points, speed progression and special charges
//!
//! The rules are fixed game-balance constants:
//! - Every locked piece is worth 25 points.
//! - Clearing `n` lines at once adds `100 * 2^n` on top.
//! - Every 10th locked piece makes forced descent one tick faster, down to 10.
//! - Every 1000 points crossed earns a special charge, with at most 3 banked.

use crate::types::{
    LINE_CLEAR_BASE, LOCK_SCORE, MAX_SPECIAL, MIN_SPEED, PIECES_PER_SPEEDUP, SPECIAL_SCORE_STEP,
};

/// Bonus for clearing `lines` rows with one piece (0 when nothing cleared).
///
/// # Examples
///
/// ```
/// use tetris_cle_core::scoring::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 0);
/// assert_eq!(line_clear_score(1), 200);
/// assert_eq!(line_clear_score(4), 1600);
/// ```
pub fn line_clear_score(lines: usize) -> u32 {
    if lines == 0 {
        return 0;
    }
    LINE_CLEAR_BASE << lines.min(4)
}

/// Total points for one lock that completed `lines` rows.
pub fn lock_score(lines: usize) -> u32 {
    LOCK_SCORE + line_clear_score(lines)
}

/// Speed after the `pieces_locked`-th piece locked.
pub fn next_speed(speed: u32, pieces_locked: u32) -> u32 {
    if pieces_locked > 0 && pieces_locked % PIECES_PER_SPEEDUP == 0 {
        speed.saturating_sub(1).max(MIN_SPEED)
    } else {
        speed
    }
}

/// Tracks how many 1000-point milestones have been converted into charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecialMeter {
    milestones: u32,
}

impl SpecialMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milestones already accounted for.
    pub fn milestones(&self) -> u32 {
        self.milestones
    }

    /// Credit charges for milestones crossed since the last update.
    ///
    /// Returns the new charge count. Growth beyond [`MAX_SPECIAL`] is dropped,
    /// not banked for later.
    pub fn update(&mut self, score: u32, charge: u8) -> u8 {
        let reached = score / SPECIAL_SCORE_STEP;
        if reached <= self.milestones {
            return charge;
        }
        let growth = reached - self.milestones;
        self.milestones = reached;

        let total = u32::from(charge).saturating_add(growth);
        total.min(u32::from(MAX_SPECIAL)) as u8
    }
}
