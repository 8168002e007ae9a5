//! Application configuration loaded from environment variables.
//!
//! Every setting has a default, so a bare invocation next to `extract.xlsx`
//! behaves like the original one-off export.

use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default roster location, relative to the working directory.
pub const DEFAULT_ROSTER_PATH: &str = "extract.xlsx";
/// Production hub API.
pub const DEFAULT_HUB_BASE_URL: &str = "https://prod-hub-api.boat-lifestyle.com";
/// Shared secret the hub expects on identity tokens.
pub const DEFAULT_SIGNING_SECRET: &str = "wearable-hub";
/// Number of users flushed to each output file.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Extraction configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Spreadsheet or CSV file with `id`, `name`, `email` columns
    pub roster_path: PathBuf,
    /// Directory that receives the batch files
    pub output_dir: PathBuf,
    /// Hub API base URL (no trailing slash needed)
    pub hub_base_url: String,
    /// HS256 key for identity tokens (raw bytes)
    pub signing_secret: Vec<u8>,
    /// End of the one-day query window
    pub reference_date: NaiveDate,
    /// Users per output file
    pub batch_size: usize,
    /// Maximum in-flight hub requests (1 = sequential)
    pub concurrency: usize,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Adds an `exp` claim to identity tokens when set
    pub token_ttl: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from(DEFAULT_ROSTER_PATH),
            output_dir: PathBuf::from("."),
            hub_base_url: DEFAULT_HUB_BASE_URL.to_string(),
            signing_secret: DEFAULT_SIGNING_SECRET.as_bytes().to_vec(),
            reference_date: default_reference_date(),
            batch_size: DEFAULT_BATCH_SIZE,
            concurrency: 1,
            request_timeout: None,
            token_ttl: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured. Unset variables
    /// fall back to [`Config::default`]; set but unparsable ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let batch_size = parse_var("BATCH_SIZE", env::var("BATCH_SIZE").ok())?
            .unwrap_or(defaults.batch_size);
        if batch_size == 0 {
            return Err(ConfigError::Invalid {
                var: "BATCH_SIZE",
                reason: "must be at least 1".to_string(),
            });
        }

        let concurrency = parse_var("CONCURRENCY", env::var("CONCURRENCY").ok())?
            .unwrap_or(defaults.concurrency)
            .max(1);

        Ok(Self {
            roster_path: env::var("ROSTER_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.roster_path),
            output_dir: env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            hub_base_url: env::var("HUB_BASE_URL")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.hub_base_url),
            signing_secret: env::var("HUB_SIGNING_SECRET")
                .map(|v| v.trim().as_bytes().to_vec())
                .unwrap_or(defaults.signing_secret),
            reference_date: parse_var("REFERENCE_DATE", env::var("REFERENCE_DATE").ok())?
                .unwrap_or(defaults.reference_date),
            batch_size,
            concurrency,
            request_timeout: parse_var::<u64>(
                "REQUEST_TIMEOUT_SECS",
                env::var("REQUEST_TIMEOUT_SECS").ok(),
            )?
            .map(Duration::from_secs),
            token_ttl: parse_var::<u64>("TOKEN_TTL_SECS", env::var("TOKEN_TTL_SECS").ok())?
                .map(Duration::from_secs),
        })
    }
}

/// The date the original export was pinned to.
fn default_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 10, 8).unwrap_or_default()
}

/// Parse an optional raw value; blank counts as unset.
fn parse_var<T>(var: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: format!("{value:?}: {e}"),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}
