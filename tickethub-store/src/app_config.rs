use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub booking_rules: BookingRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Directory for file-backed keys; absent means an in-memory store
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    pub max_seats: usize,
    pub hold_seconds: u32,
    pub payment_delay_ms: u64,
    pub convenience_fee_percent: u64,
    #[serde(default)]
    pub promo_codes: HashMap<String, u64>,
    #[serde(default = "default_booked_probability")]
    pub booked_probability: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Browsing sessions untouched for this long are closed
    #[serde(default = "default_session_idle_seconds")]
    pub session_idle_seconds: u64,
}

fn default_booked_probability() -> f64 { 0.15 }

fn default_currency() -> String { "INR".into() }

fn default_session_idle_seconds() -> u64 { 1800 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &run_mode)
    }

    /// Layer `{dir}/default`, `{dir}/{run_mode}` and `{dir}/local`, then
    /// `TICKETHUB__`-prefixed environment variables
    /// (`TICKETHUB__BOOKING_RULES__HOLD_SECONDS=60`).
    pub fn load_from(dir: &str, run_mode: &str) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::with_name(&format!("{}/default", dir)))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            .add_source(
                config::Environment::with_prefix("TICKETHUB")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DEFAULTS: &str = r#"
[server]
port = 3000

[storage]

[booking_rules]
max_seats = 10
hold_seconds = 300
payment_delay_ms = 2000
convenience_fee_percent = 5

[booking_rules.promo_codes]
FIRST = 10
"#;

    #[test]
    fn test_defaults_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), DEFAULTS).unwrap();

        let config = Config::load_from(dir.path().to_str().unwrap(), "test").unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.booking_rules.max_seats, 10);
        assert_eq!(config.booking_rules.promo_codes.get("FIRST"), Some(&10));
        assert_eq!(config.booking_rules.booked_probability, 0.15);
        assert_eq!(config.booking_rules.currency, "INR");
        assert_eq!(config.booking_rules.session_idle_seconds, 1800);
    }

    #[test]
    fn test_run_mode_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), DEFAULTS).unwrap();
        fs::write(
            dir.path().join("staging.toml"),
            "[booking_rules]\nhold_seconds = 60\n\n[storage]\ndata_dir = \"/var/lib/tickethub\"\n",
        )
        .unwrap();

        let config = Config::load_from(dir.path().to_str().unwrap(), "staging").unwrap();
        assert_eq!(config.booking_rules.hold_seconds, 60);
        assert_eq!(config.booking_rules.max_seats, 10);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/var/lib/tickethub")));
    }

    #[test]
    fn test_missing_defaults_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(dir.path().to_str().unwrap(), "test").is_err());
    }
}
