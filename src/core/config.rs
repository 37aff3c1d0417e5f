use std::env;
use std::path::PathBuf;

use crate::shared::constants::DEFAULT_LOG_FILTER;

#[derive(Debug, Clone)]
pub struct Config {
    pub logging: LoggingConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string, e.g. "info" or "category_catalog=debug"
    pub filter: String,
}

/// Settings for the seed validator binary
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Seed document path; stdin when unset
    pub file: Option<PathBuf>,
    pub pretty: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            logging: LoggingConfig::from_env()?,
            seed: SeedConfig::from_env()?,
        })
    }
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, String> {
        let filter = env::var("RUST_LOG")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self { filter })
    }
}

impl SeedConfig {
    pub fn from_env() -> Result<Self, String> {
        let file = env::var("CATEGORY_SEED_FILE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let pretty = env::var("CATEGORY_OUTPUT_PRETTY")
            .unwrap_or_else(|_| "false".to_string())
            .trim()
            .parse::<bool>()
            .map_err(|_| "CATEGORY_OUTPUT_PRETTY must be true or false".to_string())?;

        Ok(Self { file, pretty })
    }
}
