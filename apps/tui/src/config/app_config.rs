use dotenv::dotenv;
use spinny_core::entries::{
    default_roulette_numbers, Entry, EntryPolicy, DEFAULT_MAX_ENTRIES, DEFAULT_NUMBER_MAX,
    DEFAULT_NUMBER_MIN,
};
use spinny_core::spin::DEFAULT_MIN_TURNS;
use spinny_core::wheel::{Celebration, WheelOptions, DEFAULT_SPIN_DURATION};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const MAX_ENTRIES_VAR: &str = "WHEEL_MAX_ENTRIES";
pub const NUMBER_MIN_VAR: &str = "WHEEL_NUMBER_MIN";
pub const NUMBER_MAX_VAR: &str = "WHEEL_NUMBER_MAX";
pub const SPIN_MS_VAR: &str = "WHEEL_SPIN_MS";
pub const MIN_TURNS_VAR: &str = "WHEEL_MIN_TURNS";
pub const ENTRIES_VAR: &str = "WHEEL_ENTRIES";
pub const LOG_VAR: &str = "WHEEL_LOG";
pub const DEBUG_VAR: &str = "DEBUG";

/// Separator used by `WHEEL_ENTRIES` and the bulk-add prompt.
pub const ENTRY_SEPARATOR: char = ';';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("{key} must be at least 1")]
    Zero { key: &'static str },
    #[error("{key} must be at least {min}")]
    TooSmall { key: &'static str, min: u32 },
    #[error("number range {min}-{max} is empty")]
    EmptyRange { min: i64, max: i64 },
}

/// Everything the app reads from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub policy: EntryPolicy,
    pub spin_duration: Duration,
    pub min_turns: u32,
    pub initial_entries: Vec<Entry>,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            policy: EntryPolicy::default(),
            spin_duration: DEFAULT_SPIN_DURATION,
            min_turns: DEFAULT_MIN_TURNS,
            initial_entries: default_roulette_numbers(),
            log_file: None,
            debug: false,
        }
    }
}

impl AppConfig {
    /// Builds the config from any key lookup, so tests don't touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_entries = parse_or(&lookup, MAX_ENTRIES_VAR, DEFAULT_MAX_ENTRIES)?;
        if max_entries == 0 {
            return Err(ConfigError::Zero {
                key: MAX_ENTRIES_VAR,
            });
        }
        let number_min = parse_or(&lookup, NUMBER_MIN_VAR, DEFAULT_NUMBER_MIN)?;
        let number_max = parse_or(&lookup, NUMBER_MAX_VAR, DEFAULT_NUMBER_MAX)?;
        if number_min > number_max {
            return Err(ConfigError::EmptyRange {
                min: number_min,
                max: number_max,
            });
        }
        let spin_ms = parse_or(&lookup, SPIN_MS_VAR, DEFAULT_SPIN_DURATION.as_millis() as u64)?;
        let min_turns = parse_or(&lookup, MIN_TURNS_VAR, DEFAULT_MIN_TURNS)?;
        if min_turns < DEFAULT_MIN_TURNS {
            return Err(ConfigError::TooSmall {
                key: MIN_TURNS_VAR,
                min: DEFAULT_MIN_TURNS,
            });
        }

        let initial_entries =
            lookup(ENTRIES_VAR).map_or_else(default_roulette_numbers, |raw| split_entries(&raw));

        Ok(Self {
            policy: EntryPolicy {
                max_entries,
                number_min,
                number_max,
            },
            spin_duration: Duration::from_millis(spin_ms),
            min_turns,
            initial_entries,
            log_file: lookup(LOG_VAR)
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            debug: lookup(DEBUG_VAR).is_some_and(|value| !value.is_empty() && value != "0"),
        })
    }

    pub fn wheel_options(&self) -> WheelOptions {
        WheelOptions {
            spin_duration: self.spin_duration,
            min_turns: self.min_turns,
            celebration: Some(Celebration::default()),
        }
    }
}

/// Initializes the application configuration from `.env` and the process
/// environment.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = AppConfig::from_lookup(|key| env::var(key).ok())?;
    tracing::debug!(
        policy = ?config.policy,
        spin_ms = config.spin_duration.as_millis() as u64,
        "config loaded"
    );
    Ok(config)
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key, value: raw })
        }
        _ => Ok(default),
    }
}

/// Splits `a;b;c` into trimmed, non-blank entries.
pub fn split_entries(raw: &str) -> Vec<Entry> {
    raw.split(ENTRY_SEPARATOR)
        .filter_map(|part| Entry::parse(part).ok())
        .collect()
}
