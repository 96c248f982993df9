use rail_catalog::{SeatStrategy, SeatingPlan, Tariff};
use serde::Deserialize;
use std::env;

/// Upper bound for a section's seat count; each seat is indexed in memory
pub const MAX_SECTION_CAPACITY: u32 = 10_000;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub seating: SeatingConfig,
    pub tariff: TariffConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeatingConfig {
    pub section_a: u32,
    pub section_b: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TariffConfig {
    pub section_a: f64,
    pub section_b: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    #[serde(default = "default_commit_attempts")]
    pub commit_attempts: u32,
    /// Fixed seed for section/seat selection; entropy when absent
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// `random` (default) or `lowest_free`
    #[serde(default)]
    pub seat_strategy: SeatStrategy,
}

fn default_commit_attempts() -> u32 { 8 }

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            commit_attempts: default_commit_attempts(),
            rng_seed: None,
            seat_strategy: SeatStrategy::default(),
        }
    }
}

impl SeatingConfig {
    pub fn plan(&self) -> SeatingPlan {
        SeatingPlan::new(self.section_a, self.section_b)
    }
}

impl TariffConfig {
    pub fn tariff(&self) -> Tariff {
        Tariff::new(self.section_a, self.section_b)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `RAIL__SEATING__SECTION_A=2` sets `seating.section_a`
            .add_source(config::Environment::with_prefix("RAIL").separator("__"))
            .build()?;

        let config: Config = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.seating.section_a == 0 || self.seating.section_b == 0 {
            return Err(config::ConfigError::Message(
                "seating capacity must be at least 1 per section".to_string(),
            ));
        }
        if self.seating.section_a > MAX_SECTION_CAPACITY || self.seating.section_b > MAX_SECTION_CAPACITY {
            return Err(config::ConfigError::Message(format!(
                "seating capacity must not exceed {} per section",
                MAX_SECTION_CAPACITY
            )));
        }
        if self.booking.commit_attempts == 0 {
            return Err(config::ConfigError::Message(
                "booking.commit_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
