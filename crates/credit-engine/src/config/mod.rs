use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::workflows::lending::{LowScorePolicy, PolicyConfig};

/// Distinguishes runtime behavior for different stages of the service.
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
    pub policy: PolicyConfig,
    pub data: DataConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            policy: load_policy()?,
            data: DataConfig {
                customer_data_path: env::var_os("CUSTOMER_DATA_PATH").map(PathBuf::from),
                loan_data_path: env::var_os("LOAN_DATA_PATH").map(PathBuf::from),
            },
        })
    }
}

fn load_policy() -> Result<PolicyConfig, ConfigError> {
    let mut policy = PolicyConfig::default();

    let floor_rate = match env::var("CREDIT_LOW_SCORE_FLOOR_RATE") {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|rate| rate.is_finite() && *rate >= 0.0)
            .ok_or_else(|| ConfigError::InvalidFloorRate(raw.clone()))?,
        Err(_) => LowScorePolicy::DEFAULT_FLOOR_RATE,
    };

    policy.low_score = match env::var("CREDIT_LOW_SCORE_POLICY") {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "reject" => LowScorePolicy::Reject,
            "floor" | "floor_rate" => LowScorePolicy::FloorRate {
                minimum_rate: floor_rate,
            },
            _ => return Err(ConfigError::InvalidLowScorePolicy(raw)),
        },
        Err(_) => LowScorePolicy::Reject,
    };

    if let Ok(raw) = env::var("CREDIT_MAX_EMI_TO_SALARY") {
        policy.max_emi_to_salary = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|ratio| *ratio > 0.0 && *ratio <= 1.0)
            .ok_or_else(|| ConfigError::InvalidEmiRatio(raw.clone()))?;
    }

    Ok(policy)
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Optional dataset locations for bulk ingestion.
#[derive(Debug, Clone, Default)]
pub struct DataConfig {
    pub customer_data_path: Option<PathBuf>,
    pub loan_data_path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLowScorePolicy(String),
    InvalidFloorRate(String),
    InvalidEmiRatio(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLowScorePolicy(value) => write!(
                f,
                "CREDIT_LOW_SCORE_POLICY must be 'reject' or 'floor' (got '{value}')"
            ),
            ConfigError::InvalidFloorRate(value) => write!(
                f,
                "CREDIT_LOW_SCORE_FLOOR_RATE must be a non-negative number (got '{value}')"
            ),
            ConfigError::InvalidEmiRatio(value) => write!(
                f,
                "CREDIT_MAX_EMI_TO_SALARY must be in (0, 1] (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
