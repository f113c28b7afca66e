use std::time::Duration;

use thiserror::Error;

/// Default model for question generation and follow-up remarks.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

/// Fatal startup error. The only error class allowed to abort the process.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Required environment variable '{key}' is not set")]
    Missing { key: &'static str },

    #[error("Invalid value '{value}' for '{key}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the outbound model gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Upper bound for a single gateway call, including transport retries.
    pub timeout: Duration,
}

/// Settings for the interview script.
#[derive(Debug, Clone)]
pub struct InterviewConfig {
    pub company_name: String,
    pub max_validation_retries: u32,
    pub questions_per_technology: usize,
    pub max_technologies: usize,
    pub session_timeout: Duration,
    pub retention_days: u32,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            company_name: "TalentScout".to_string(),
            max_validation_retries: 3,
            questions_per_technology: 3,
            max_technologies: 10,
            session_timeout: Duration::from_secs(3600),
            retention_days: 30,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub interview: InterviewConfig,
    pub sweep_interval: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let api_key = env.require("ANTHROPIC_API_KEY")?;
        let temperature: f32 = env.parse_or("LLM_TEMPERATURE", 0.7)?;
        if !(0.0..=1.0).contains(&temperature) {
            return Err(invalid("LLM_TEMPERATURE", temperature, "must be between 0.0 and 1.0"));
        }

        let gateway = GatewayConfig {
            api_key,
            model: env.get("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature,
            max_output_tokens: env.positive_or("LLM_MAX_OUTPUT_TOKENS", 1024)?,
            timeout: Duration::from_secs(env.positive_or("LLM_TIMEOUT_SECS", 20)?),
        };

        let questions_per_technology: usize = env.parse_or("QUESTIONS_PER_TECHNOLOGY", 3)?;
        if !(1..=10).contains(&questions_per_technology) {
            return Err(invalid(
                "QUESTIONS_PER_TECHNOLOGY",
                questions_per_technology,
                "must be between 1 and 10",
            ));
        }

        let interview = InterviewConfig {
            company_name: env
                .get("COMPANY_NAME")
                .unwrap_or_else(|| "TalentScout".to_string()),
            max_validation_retries: env.parse_or("MAX_VALIDATION_RETRIES", 3)?,
            questions_per_technology,
            max_technologies: env.positive_or("MAX_TECHNOLOGIES", 10)?,
            session_timeout: Duration::from_secs(env.positive_or("SESSION_TIMEOUT_SECS", 3600)?),
            retention_days: env.positive_or("DATA_RETENTION_DAYS", 30)?,
        };

        Ok(Config {
            gateway,
            interview,
            sweep_interval: Duration::from_secs(env.positive_or("SWEEP_INTERVAL_SECS", 60)?),
            port: env.parse_or("PORT", 8080)?,
            rust_log: env.get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn require(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing { key })
    }

    fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            }),
        }
    }

    fn positive_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr + PartialOrd + Default + std::fmt::Display + Copy,
        T::Err: std::fmt::Display,
    {
        let value = self.parse_or(key, default)?;
        if value <= T::default() {
            return Err(invalid(key, value, "must be greater than zero"));
        }
        Ok(value)
    }
}

fn invalid(key: &'static str, value: impl std::fmt::Display, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
