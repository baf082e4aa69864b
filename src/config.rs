//! Planner configuration
//!
//! Read from environment variables at startup.

use thiserror::Error;

use crate::dosing::constants::DEFAULT_BETA;

pub const ENV_BETA: &str = "BACPLAN_BETA";
pub const ENV_ENFORCE_BOUNDS: &str = "BACPLAN_ENFORCE_BOUNDS";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a positive number, got {value:?}")]
    InvalidBeta { var: &'static str, value: String },

    #[error("{var} must be true or false, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Elimination rate used when a request does not supply one
    pub default_beta: f64,
    /// Reject inputs outside the physiological bounds
    pub enforce_bounds: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_beta: DEFAULT_BETA,
            enforce_bounds: true,
        }
    }
}

impl PlannerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_BETA) {
            config.default_beta = match raw.trim().parse::<f64>() {
                Ok(beta) if beta.is_finite() && beta > 0.0 => beta,
                _ => {
                    return Err(ConfigError::InvalidBeta {
                        var: ENV_BETA,
                        value: raw,
                    })
                }
            };
        }

        if let Some(raw) = lookup(ENV_ENFORCE_BOUNDS) {
            config.enforce_bounds = match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        var: ENV_ENFORCE_BOUNDS,
                        value: raw,
                    })
                }
            };
        }

        Ok(config)
    }
}
