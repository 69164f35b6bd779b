use chrono_tz::Tz;
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Civil timezone used to label forecast rows.
    #[serde(default = "default_forecast_timezone")]
    pub forecast_timezone: Tz,
}

fn default_forecast_timezone() -> Tz {
    chrono_tz::America::Sao_Paulo
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    envy::prefixed("MARESIA_")
        .from_env::<Config>()
        .expect("Invalid config. Optional env var: MARESIA_FORECAST_TIMEZONE (IANA timezone name)")
});

pub fn config() -> &'static Config {
    &CONFIG
}
