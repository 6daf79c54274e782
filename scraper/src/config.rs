use std::env;
use std::time::Duration;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USAJOBS_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_USAJOBS_USER_EMAIL: &str = "demo@example.com";
pub const DEFAULT_JOOBLE_API_KEY: &str = "YOUR_JOOBLE_API_KEY";
pub const DEFAULT_CAREERJET_AFFILIATE_ID: &str = "YOUR_CAREERJET_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// API credentials. The defaults are placeholders that upstreams will reject.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub usajobs_api_key: String,
    pub usajobs_user_email: String,
    pub jooble_api_key: String,
    pub careerjet_affiliate_id: String,
}

/// Process-wide settings, read once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub bind_address: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "REQUEST_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            credentials: Credentials {
                usajobs_api_key: var("USAJOBS_API_KEY", DEFAULT_USAJOBS_API_KEY),
                usajobs_user_email: var("USAJOBS_USER_EMAIL", DEFAULT_USAJOBS_USER_EMAIL),
                jooble_api_key: var("JOOBLE_API_KEY", DEFAULT_JOOBLE_API_KEY),
                careerjet_affiliate_id: var(
                    "CAREERJET_AFFILIATE_ID",
                    DEFAULT_CAREERJET_AFFILIATE_ID,
                ),
            },
            bind_address: var("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: Credentials {
                usajobs_api_key: DEFAULT_USAJOBS_API_KEY.to_string(),
                usajobs_user_email: DEFAULT_USAJOBS_USER_EMAIL.to_string(),
                jooble_api_key: DEFAULT_JOOBLE_API_KEY.to_string(),
                careerjet_affiliate_id: DEFAULT_CAREERJET_AFFILIATE_ID.to_string(),
            },
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}
