use anyhow::{Context, Result};

use crate::screening::policy::{
    ScreeningPolicy, DEFAULT_BLOCKLIST, DEFAULT_HIGH_SENTIMENT_THRESHOLD,
    DEFAULT_LOW_SENTIMENT_THRESHOLD,
};
use crate::storage::DEFAULT_STORE_PATH;

/// Application configuration loaded from environment variables.
/// Fails at startup if the Groq credential is missing or a number does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub store_path: String,
    pub policy: ScreeningPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let blocklist = match std::env::var("SCREENING_BLOCKLIST") {
            Ok(raw) => parse_blocklist(&raw),
            Err(_) => DEFAULT_BLOCKLIST.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            store_path: std::env::var("CANDIDATE_STORE_PATH")
                .unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string()),
            policy: ScreeningPolicy {
                blocklist,
                low_sentiment_threshold: optional_f64(
                    "SENTIMENT_LOW_THRESHOLD",
                    DEFAULT_LOW_SENTIMENT_THRESHOLD,
                )?,
                high_sentiment_threshold: optional_f64(
                    "SENTIMENT_HIGH_THRESHOLD",
                    DEFAULT_HIGH_SENTIMENT_THRESHOLD,
                )?,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_f64(key: &str, default: f64) -> Result<f64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .with_context(|| format!("{key} must be a number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Splits a comma-separated blocklist, lower-casing terms and dropping blanks.
fn parse_blocklist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}
