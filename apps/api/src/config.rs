use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};

use crate::bookmarks::DEFAULT_SESSION_TTL;
use crate::matching::{ScoringPolicy, DEFAULT_RESULT_LIMIT};
use crate::sources::cache::DEFAULT_CACHE_TTL;
use crate::sources::remotive::DEFAULT_JOB_SOURCE_URL;

/// Application configuration loaded from environment variables.
/// Every variable has a default; a present but invalid value aborts startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub job_source_url: String,
    pub fetch_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    /// Idle time after which a bookmark session is dropped.
    pub session_ttl_secs: u64,
    pub result_limit: usize,
    pub default_min_score: f64,
    pub scoring_policy: ScoringPolicy,
    /// JSON file replacing the built-in skill, salary and location tables.
    pub reference_data_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            job_source_url: DEFAULT_JOB_SOURCE_URL.to_string(),
            fetch_timeout_secs: 10,
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            session_ttl_secs: DEFAULT_SESSION_TTL.as_secs(),
            result_limit: DEFAULT_RESULT_LIMIT,
            default_min_score: 0.1,
            scoring_policy: ScoringPolicy::Tfidf,
            reference_data_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let config = Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            job_source_url: std::env::var("JOB_SOURCE_URL").unwrap_or(defaults.job_source_url),
            fetch_timeout_secs: env_or("FETCH_TIMEOUT_SECS", defaults.fetch_timeout_secs)?,
            cache_ttl_secs: env_or("CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
            session_ttl_secs: env_or("SESSION_TTL_SECS", defaults.session_ttl_secs)?,
            result_limit: env_or("RESULT_LIMIT", defaults.result_limit)?,
            default_min_score: env_or("DEFAULT_MIN_SCORE", defaults.default_min_score)?,
            scoring_policy: env_or("SCORING_POLICY", defaults.scoring_policy)?,
            reference_data_path: std::env::var("REFERENCE_DATA_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fetch_timeout_secs == 0 {
            bail!("FETCH_TIMEOUT_SECS must be greater than zero");
        }
        if self.session_ttl_secs == 0 {
            bail!("SESSION_TTL_SECS must be greater than zero");
        }
        if self.result_limit == 0 {
            bail!("RESULT_LIMIT must be greater than zero");
        }
        if !self.default_min_score.is_finite() || self.default_min_score < 0.0 {
            bail!("DEFAULT_MIN_SCORE must be a non-negative number");
        }
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow!("Environment variable '{key}' has invalid value '{raw}': {e}"))
}
