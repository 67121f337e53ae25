use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const APP_NAME: &str = "TextSummarize";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
pub struct Config {
    pub env: String,
    pub server_addr: SocketAddr,
    pub log_level: String,
    pub model_name: String,
    pub model_api_url: String,
    pub model_api_token: Option<String>,
    pub max_input_tokens: usize,
    pub device: String,
    pub default_num_sentences: usize,
    pub min_num_sentences: usize,
    pub max_num_sentences: usize,
    pub abstractive_min_length: usize,
    pub abstractive_max_length: usize,
    pub min_text_length: usize,
    pub max_text_length: usize,
    pub enable_cache: bool,
    pub cache_expiry: Duration,
    pub cache_max_entries: usize,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: "dev".to_string(),
            server_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            log_level: "INFO".to_string(),
            model_name: "facebook/bart-large-cnn".to_string(),
            model_api_url: "https://api-inference.huggingface.co/models".to_string(),
            model_api_token: None,
            max_input_tokens: 2048,
            device: "cpu".to_string(),
            default_num_sentences: 3,
            min_num_sentences: 1,
            max_num_sentences: 10,
            abstractive_min_length: 20,
            abstractive_max_length: 100,
            min_text_length: 50,
            max_text_length: 50_000,
            enable_cache: true,
            cache_expiry: Duration::from_secs(3600),
            cache_max_entries: 1000,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get("HOST").unwrap_or_else(|| defaults.server_addr.ip().to_string());
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;
        let port = parse_or(&get, "PORT", defaults.server_addr.port())?;

        let device = get("DEVICE").unwrap_or(defaults.device).to_lowercase();
        if device != "cpu" && device != "cuda" {
            return Err(AppError::Config(format!(
                "Invalid DEVICE '{}': expected 'cpu' or 'cuda'",
                device
            )));
        }

        let config = Config {
            env: get("ENV").unwrap_or(defaults.env),
            server_addr: SocketAddr::new(ip, port),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            model_name: get("MODEL_NAME").unwrap_or(defaults.model_name),
            model_api_url: get("MODEL_API_URL")
                .unwrap_or(defaults.model_api_url)
                .trim_end_matches('/')
                .to_string(),
            model_api_token: get("MODEL_API_TOKEN"),
            max_input_tokens: parse_or(&get, "MAX_INPUT_TOKENS", defaults.max_input_tokens)?,
            device,
            default_num_sentences: parse_or(&get, "DEFAULT_NUM_SENTENCES", defaults.default_num_sentences)?,
            min_num_sentences: parse_or(&get, "MIN_NUM_SENTENCES", defaults.min_num_sentences)?,
            max_num_sentences: parse_or(&get, "MAX_NUM_SENTENCES", defaults.max_num_sentences)?,
            abstractive_min_length: parse_or(&get, "ABSTRACTIVE_MIN_LENGTH", defaults.abstractive_min_length)?,
            abstractive_max_length: parse_or(&get, "ABSTRACTIVE_MAX_LENGTH", defaults.abstractive_max_length)?,
            min_text_length: parse_or(&get, "MIN_TEXT_LENGTH", defaults.min_text_length)?,
            max_text_length: parse_or(&get, "MAX_TEXT_LENGTH", defaults.max_text_length)?,
            enable_cache: parse_bool_or(&get, "ENABLE_CACHE", defaults.enable_cache)?,
            cache_expiry: Duration::from_secs(parse_or(&get, "CACHE_EXPIRY", defaults.cache_expiry.as_secs())?),
            cache_max_entries: parse_or(&get, "CACHE_MAX_ENTRIES", defaults.cache_max_entries)?,
            request_timeout: Duration::from_secs(parse_or(&get, "REQUEST_TIMEOUT", defaults.request_timeout.as_secs())?),
        };

        config.check_bounds()?;
        Ok(config)
    }

    fn check_bounds(&self) -> Result<()> {
        if self.min_num_sentences == 0 || self.min_num_sentences > self.max_num_sentences {
            return Err(AppError::Config(format!(
                "Sentence bounds must satisfy 1 <= MIN_NUM_SENTENCES ({}) <= MAX_NUM_SENTENCES ({})",
                self.min_num_sentences, self.max_num_sentences
            )));
        }
        if !(self.min_num_sentences..=self.max_num_sentences).contains(&self.default_num_sentences) {
            return Err(AppError::Config(format!(
                "DEFAULT_NUM_SENTENCES ({}) must lie within {}..={}",
                self.default_num_sentences, self.min_num_sentences, self.max_num_sentences
            )));
        }
        if self.min_text_length > self.max_text_length {
            return Err(AppError::Config(format!(
                "MIN_TEXT_LENGTH ({}) exceeds MAX_TEXT_LENGTH ({})",
                self.min_text_length, self.max_text_length
            )));
        }
        if self.abstractive_min_length == 0
            || !(self.abstractive_min_length..=self.max_input_tokens).contains(&self.abstractive_max_length)
        {
            return Err(AppError::Config(format!(
                "Abstractive lengths must satisfy 1 <= ABSTRACTIVE_MIN_LENGTH ({}) <= ABSTRACTIVE_MAX_LENGTH ({}) <= MAX_INPUT_TOKENS ({})",
                self.abstractive_min_length, self.abstractive_max_length, self.max_input_tokens
            )));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        matches!(self.env.to_lowercase().as_str(), "prod" | "production")
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

fn parse_bool_or<G>(get: &G, key: &str, default: bool) -> Result<bool>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => match raw.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::Config(format!("Invalid {} '{}': expected a boolean", key, raw))),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.env, "dev");
        assert_eq!(config.server_addr.port(), 8000);
        assert_eq!(config.model_name, "facebook/bart-large-cnn");
        assert_eq!(config.max_input_tokens, 2048);
        assert_eq!(config.default_num_sentences, 3);
        assert_eq!(config.min_text_length, 50);
        assert!(config.enable_cache);
        assert_eq!(config.cache_expiry, Duration::from_secs(3600));
        assert_eq!(config.cache_max_entries, 1000);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("ENV", "production"),
            ("PORT", "9090"),
            ("HOST", "127.0.0.1"),
            ("MODEL_NAME", "sshleifer/distilbart-cnn-12-6"),
            ("MODEL_API_URL", "http://localhost:8080/models/"),
            ("DEVICE", "CUDA"),
            ("ENABLE_CACHE", "false"),
            ("CACHE_EXPIRY", "60"),
            ("CACHE_MAX_ENTRIES", "25"),
        ]))
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.server_addr.to_string(), "127.0.0.1:9090");
        assert_eq!(config.model_name, "sshleifer/distilbart-cnn-12-6");
        assert_eq!(config.model_api_url, "http://localhost:8080/models");
        assert_eq!(config.device, "cuda");
        assert!(!config.enable_cache);
        assert_eq!(config.cache_expiry, Duration::from_secs(60));
        assert_eq!(config.cache_max_entries, 25);
    }

    #[test]
    fn test_invalid_number_names_variable() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_device() {
        let err = Config::from_lookup(lookup(&[("DEVICE", "tpu")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_inconsistent_bounds() {
        assert!(Config::from_lookup(lookup(&[("MIN_TEXT_LENGTH", "100"), ("MAX_TEXT_LENGTH", "10")])).is_err());
        assert!(Config::from_lookup(lookup(&[("DEFAULT_NUM_SENTENCES", "20")])).is_err());
        assert!(Config::from_lookup(lookup(&[("ABSTRACTIVE_MAX_LENGTH", "5000")])).is_err());
    }
}
