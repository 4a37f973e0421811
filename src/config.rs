use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_OPENFDA_BASE_URL: &str = "https://api.fda.gov";
pub const DEFAULT_TRENDS_BASE_URL: &str = "https://trends.google.com";
pub const DEFAULT_TRENDS_GEO: &str = "US";
pub const DEFAULT_TRENDS_HL: &str = "en-US";
pub const DEFAULT_TRENDS_TZ: i32 = 360;
pub const DEFAULT_DRUG: &str = "minoxidil";
pub const DEFAULT_KEYWORD: &str = "telehealth";
pub const DEFAULT_EVENT_LIMIT: usize = 5;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Runtime settings for the dashboard, resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseConfig {
    pub openfda_base_url: String,
    pub trends_base_url: String,
    pub trends_geo: String,
    pub trends_hl: String,
    pub trends_tz: i32,
    pub drug: String,
    pub keyword: String,
    pub event_limit: usize,
    pub http_timeout_secs: u64,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            openfda_base_url: DEFAULT_OPENFDA_BASE_URL.to_string(),
            trends_base_url: DEFAULT_TRENDS_BASE_URL.to_string(),
            trends_geo: DEFAULT_TRENDS_GEO.to_string(),
            trends_hl: DEFAULT_TRENDS_HL.to_string(),
            trends_tz: DEFAULT_TRENDS_TZ,
            drug: DEFAULT_DRUG.to_string(),
            keyword: DEFAULT_KEYWORD.to_string(),
            event_limit: DEFAULT_EVENT_LIMIT,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl PulseConfig {
    /// Read every setting from the process environment, falling back to the
    /// defaults above for anything unset, blank or unparsable. Counts and
    /// timeouts must also be non-zero.
    pub fn from_env() -> Self {
        Self {
            openfda_base_url: get_openfda_base_url(),
            trends_base_url: get_trends_base_url(),
            trends_geo: env_string("TRENDS_GEO", DEFAULT_TRENDS_GEO),
            trends_hl: env_string("TRENDS_HL", DEFAULT_TRENDS_HL),
            trends_tz: env_parsed("TRENDS_TZ", DEFAULT_TRENDS_TZ),
            drug: env_string("PULSE_DRUG", DEFAULT_DRUG),
            keyword: env_string("PULSE_KEYWORD", DEFAULT_KEYWORD),
            event_limit: env_positive("PULSE_EVENT_LIMIT", DEFAULT_EVENT_LIMIT),
            http_timeout_secs: env_positive("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_openfda_base_url() -> String {
    sanitize_base_url(
        &env::var("OPENFDA_BASE_URL").unwrap_or_default(),
        DEFAULT_OPENFDA_BASE_URL,
    )
}

pub fn get_trends_base_url() -> String {
    sanitize_base_url(
        &env::var("TRENDS_BASE_URL").unwrap_or_default(),
        DEFAULT_TRENDS_BASE_URL,
    )
}

/// Trim whitespace and trailing slashes; an empty result means `default`.
pub fn sanitize_base_url(raw: &str, default: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn env_string(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

fn env_parsed<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("Ignoring unparsable {}={:?}, using default", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_positive<T>(key: &str, default: T) -> T
where
    T: FromStr + PartialOrd + Default + Copy,
{
    let value = env_parsed(key, default);
    if value > T::default() {
        value
    } else {
        tracing::warn!("{} must be greater than zero, using default", key);
        default
    }
}
