use std::env;
use std::fmt;
use std::num::ParseIntError;

pub const DEFAULT_MIN_AGE: u8 = 1;
pub const DEFAULT_MAX_AGE: u8 = 120;
pub const DEFAULT_MAX_MEDICATIONS: usize = 100;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub limits: InputLimits,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let limits = InputLimits {
            min_age: read_number("DRUGSHIELD_MIN_AGE", DEFAULT_MIN_AGE)?,
            max_age: read_number("DRUGSHIELD_MAX_AGE", DEFAULT_MAX_AGE)?,
            max_medications: read_number("DRUGSHIELD_MAX_MEDICATIONS", DEFAULT_MAX_MEDICATIONS)?,
        };
        if limits.min_age > limits.max_age {
            return Err(ConfigError::InvertedAgeRange {
                min: limits.min_age,
                max: limits.max_age,
            });
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            limits,
        })
    }
}

fn read_number<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|source| ConfigError::InvalidNumber { key, source }),
        Err(_) => Ok(default),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Bounds applied to incoming score requests before they reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    pub min_age: u8,
    pub max_age: u8,
    pub max_medications: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            max_medications: DEFAULT_MAX_MEDICATIONS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber {
        key: &'static str,
        source: ParseIntError,
    },
    InvertedAgeRange {
        min: u8,
        max: u8,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, .. } => {
                write!(f, "{key} must be a non-negative integer in range")
            }
            ConfigError::InvertedAgeRange { min, max } => write!(
                f,
                "DRUGSHIELD_MIN_AGE ({min}) must not exceed DRUGSHIELD_MAX_AGE ({max})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidNumber { source, .. } => Some(source),
            ConfigError::InvertedAgeRange { .. } => None,
        }
    }
}
