use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::extraction::MatchScoring;
use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Nothing is required: without `XAI_API_KEY` the service runs keyword-only.
#[derive(Debug, Clone)]
pub struct Config {
    pub xai_api_key: Option<String>,
    pub xai_api_url: String,
    pub xai_model: String,
    pub ai_timeout: Duration,
    pub lexicon_path: Option<PathBuf>,
    pub keyword_scoring: MatchScoring,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let defaults = MatchScoring::default();
        let keyword_scoring = MatchScoring {
            base: unit_interval(&get, "KEYWORD_BASE_CONFIDENCE", defaults.base)?,
            per_extra_variant: unit_interval(&get, "KEYWORD_VARIANT_BONUS", defaults.per_extra_variant)?,
        };

        Ok(Config {
            xai_api_key: get("XAI_API_KEY").map(|k| k.trim().to_string()),
            xai_api_url: get("XAI_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            xai_model: get("XAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            ai_timeout: Duration::from_secs(parse_or(&get, "AI_TIMEOUT_SECS", 60)?),
            lexicon_path: get("LEXICON_PATH").map(PathBuf::from),
            keyword_scoring,
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            port: parse_or(&get, "PORT", 8080)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

fn unit_interval(get: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> Result<f64> {
    let value: f64 = parse_or(get, key, default)?;
    if !(0.0..=1.0).contains(&value) {
        bail!("{key} must be within [0, 1], got {value}");
    }
    Ok(value)
}
