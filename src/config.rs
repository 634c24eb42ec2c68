//! Startup configuration read from the environment.
//!
//! | Variable               | Default       |
//! |------------------------|---------------|
//! | `TETRIS_CLE_LOG_PATH`  | unset (no log)|
//! | `TETRIS_CLE_LOG_LEVEL` | `info`        |
//! | `TETRIS_CLE_SEED`      | clock-derived |
//!
//! Unparseable values fall back to the default.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::Level;

pub const LOG_PATH_VAR: &str = "TETRIS_CLE_LOG_PATH";
pub const LOG_LEVEL_VAR: &str = "TETRIS_CLE_LOG_LEVEL";
pub const SEED_VAR: &str = "TETRIS_CLE_SEED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Append tracing output here; `None` disables logging.
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
    pub seed: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: Level::INFO,
            seed: clock_seed(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_path = lookup(LOG_PATH_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let log_level = lookup(LOG_LEVEL_VAR)
            .and_then(|s| Level::from_str(s.trim()).ok())
            .unwrap_or(Level::INFO);

        let seed = lookup(SEED_VAR)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        Self {
            log_path,
            log_level,
            seed,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let c = config(&[]);
        assert_eq!(c.log_path, None);
        assert_eq!(c.log_level, Level::INFO);
    }

    #[test]
    fn reads_all_variables() {
        let c = config(&[
            (LOG_PATH_VAR, "/tmp/tetris.log"),
            (LOG_LEVEL_VAR, "debug"),
            (SEED_VAR, "42"),
        ]);
        assert_eq!(c.log_path, Some(PathBuf::from("/tmp/tetris.log")));
        assert_eq!(c.log_level, Level::DEBUG);
        assert_eq!(c.seed, 42);
    }

    #[test]
    fn bad_values_fall_back() {
        let c = config(&[(LOG_PATH_VAR, "  "), (LOG_LEVEL_VAR, "loud"), (SEED_VAR, "-3")]);
        assert_eq!(c.log_path, None);
        assert_eq!(c.log_level, Level::INFO);
        assert_ne!(c.seed, (-3i32) as u32);
    }

    #[test]
    fn valid_seed_survives_bad_level() {
        let c = config(&[(LOG_LEVEL_VAR, "loud"), (SEED_VAR, " 42 ")]);
        assert_eq!(c.seed, 42);
        assert_eq!(c.log_level, Level::INFO);
    }
}
