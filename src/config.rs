//! Driver configuration read from the environment.

use anyhow::{bail, Context, Result};

use crate::types::TICK_MS;

pub const ENV_PLAYERS: &str = "BLOCKTRIS_PLAYERS";
pub const ENV_SEED: &str = "BLOCKTRIS_SEED";
pub const ENV_TICK_MS: &str = "BLOCKTRIS_TICK_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// 1 or 2 games side by side
    pub players: u8,
    /// Base seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
    /// Frame/poll interval of the driver loop
    pub tick_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: 1,
            seed: None,
            tick_ms: TICK_MS,
        }
    }
}

impl Config {
    /// Read `BLOCKTRIS_*` variables; unset or blank values keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let mut config = Self::default();

        if let Some(raw) = get(ENV_PLAYERS) {
            let players: u8 = raw
                .parse()
                .with_context(|| format!("{ENV_PLAYERS}={raw:?} is not a number"))?;
            if !(1..=2).contains(&players) {
                bail!("{ENV_PLAYERS} must be 1 or 2, got {players}");
            }
            config.players = players;
        }

        if let Some(raw) = get(ENV_SEED) {
            let seed = raw
                .parse()
                .with_context(|| format!("{ENV_SEED}={raw:?} is not a u64"))?;
            config.seed = Some(seed);
        }

        if let Some(raw) = get(ENV_TICK_MS) {
            let tick_ms: u32 = raw
                .parse()
                .with_context(|| format!("{ENV_TICK_MS}={raw:?} is not a number"))?;
            if tick_ms == 0 {
                bail!("{ENV_TICK_MS} must be positive");
            }
            config.tick_ms = tick_ms;
        }

        Ok(config)
    }
}
