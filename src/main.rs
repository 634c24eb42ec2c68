//! Terminal Tetris runner.
//!
//! Reads the environment, sets up optional file logging, takes over the
//! terminal for the game and restores it before printing the final score.

use anyhow::Result;
use tracing::{error, info};

use tetris_cle::config::Config;
use tetris_cle::core::GameState;
use tetris_cle::engine::{GameSummary, Session, SystemClock};
use tetris_cle::input::KeyPoller;
use tetris_cle::term::TerminalRenderer;
use tetris_cle::{banner, telemetry};

fn main() -> Result<()> {
    let config = Config::from_env();
    telemetry::init(&config)?;
    info!(seed = config.seed, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        error!(%err, "terminal restore failed");
    }

    let summary = result?;
    print!("{}", banner(summary.score));
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<GameSummary> {
    let state = GameState::new(config.seed);
    let mut session = Session::new(state, KeyPoller::new(), term, SystemClock);
    session.run()
}
