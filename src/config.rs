use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "SUEPR Legal AI";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upload size ceiling enforced at the boundary (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10_485_760;
pub const DEFAULT_UPLOAD_TEMP_DIR: &str = "uploads/temp";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
/// Staged files untouched for this long are treated as crash leftovers.
pub const DEFAULT_ORPHAN_MAX_AGE_SECS: u64 = 3600;

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,suepr_lib=debug,suepr=debug"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings, read from the process environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub groq_model: String,
    pub max_file_size: u64,
    pub upload_temp_dir: PathBuf,
    pub llm_timeout_secs: u64,
    pub orphan_max_age_secs: u64,
    pub tessdata_dir: Option<PathBuf>,
    pub log_filter: String,
}

impl Settings {
    /// Load settings from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup (env, map in tests, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let groq_api_key = lookup("GROQ_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::Missing("GROQ_API_KEY"))?;

        let max_file_size = match lookup("MAX_FILE_SIZE") {
            Some(raw) => parse_size(&raw).ok_or(ConfigError::Invalid {
                key: "MAX_FILE_SIZE",
                value: raw,
            })?,
            None => DEFAULT_MAX_FILE_SIZE,
        };

        let llm_timeout_secs = match lookup("LLM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "LLM_TIMEOUT_SECS",
                value: raw,
            })?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };

        let orphan_max_age_secs = match lookup("ORPHAN_MAX_AGE_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "ORPHAN_MAX_AGE_SECS",
                value: raw,
            })?,
            None => DEFAULT_ORPHAN_MAX_AGE_SECS,
        };

        Ok(Self {
            app_name: lookup("APP_NAME").unwrap_or_else(|| APP_NAME.to_string()),
            groq_api_key,
            groq_base_url: lookup("GROQ_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            groq_model: lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            max_file_size,
            upload_temp_dir: lookup("UPLOAD_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_TEMP_DIR)),
            llm_timeout_secs,
            orphan_max_age_secs,
            tessdata_dir: lookup("TESSDATA_DIR").map(PathBuf::from),
            log_filter: lookup("LOG_FILTER").unwrap_or_else(|| default_log_filter().to_string()),
        })
    }
}

/// Parse an integer size, tolerating a trailing `# comment` as written in `.env` files.
fn parse_size(raw: &str) -> Option<u64> {
    raw.split('#').next()?.trim().parse().ok()
}
