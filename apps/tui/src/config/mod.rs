// Config module for spinny_wheel
// Loads .env, environment variables and CLI overrides into AppConfig

mod app_config;

pub use app_config::{init_app_config, split_entries, AppConfig, ConfigError, ENTRY_SEPARATOR};
