use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "spinny_wheel", version, about = "Spin a wheel of entries in your terminal")]
pub struct CliArgs {
    /// Spin once, print the winner and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Wheel entries separated by ';' (defaults to roulette numbers 0-36)
    #[arg(long, value_name = "LIST")]
    pub entries: Option<String>,

    /// Maximum number of entries on the wheel
    #[arg(long = "max-entries", value_name = "N")]
    pub max_entries: Option<usize>,

    /// Lowest number the range generator accepts
    #[arg(long = "number-min", value_name = "N", allow_negative_numbers = true)]
    pub number_min: Option<i64>,

    /// Highest number the range generator accepts
    #[arg(long = "number-max", value_name = "N", allow_negative_numbers = true)]
    pub number_max: Option<i64>,

    /// Spin animation length in milliseconds
    #[arg(long = "spin-ms", value_name = "MS")]
    pub spin_ms: Option<u64>,

    /// Full turns every spin makes before settling (at least 5)
    #[arg(long = "min-turns", value_name = "N")]
    pub min_turns: Option<u32>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(entries) = &self.entries {
            std::env::set_var("WHEEL_ENTRIES", entries);
        }
        if let Some(max) = self.max_entries {
            std::env::set_var("WHEEL_MAX_ENTRIES", max.to_string());
        }
        if let Some(min) = self.number_min {
            std::env::set_var("WHEEL_NUMBER_MIN", min.to_string());
        }
        if let Some(max) = self.number_max {
            std::env::set_var("WHEEL_NUMBER_MAX", max.to_string());
        }
        if let Some(ms) = self.spin_ms {
            std::env::set_var("WHEEL_SPIN_MS", ms.to_string());
        }
        if let Some(turns) = self.min_turns {
            std::env::set_var("WHEEL_MIN_TURNS", turns.to_string());
        }
        if let Some(path) = &self.log {
            std::env::set_var("WHEEL_LOG", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wheel_overrides() {
        let args = CliArgs::parse_from([
            "spinny_wheel",
            "--headless",
            "--json",
            "--entries",
            "a;b",
            "--spin-ms",
            "100",
            "--number-min",
            "-5",
        ]);
        assert!(args.headless);
        assert!(args.json);
        assert_eq!(args.entries.as_deref(), Some("a;b"));
        assert_eq!(args.spin_ms, Some(100));
        assert_eq!(args.number_min, Some(-5));
        assert_eq!(args.max_entries, None);
    }

    #[test]
    fn help_mentions_headless() {
        assert!(CliArgs::help_text().contains("--headless"));
    }
}
