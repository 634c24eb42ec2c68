//! Tetris Command Line Edition (workspace facade crate).
//!
//! Re-exports the workspace crates under one name and holds the binary's
//! ambient plumbing: environment [`config`], file logging ([`telemetry`]) and
//! the exit [`banner`].

pub mod config;
pub mod telemetry;

pub use tetris_cle_core as core;
pub use tetris_cle_engine as engine;
pub use tetris_cle_input as input;
pub use tetris_cle_term as term;
pub use tetris_cle_types as types;

const BANNER_RULE: &str = "###################################";

/// Text printed after the terminal is restored.
pub fn banner(score: u32) -> String {
    format!("{BANNER_RULE}\n# Game over... Score: {score}\n{BANNER_RULE}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_shows_score() {
        let text = banner(425);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "# Game over... Score: 425");
        assert_eq!(lines[0], lines[2]);
    }
}
