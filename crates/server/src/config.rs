//! Server configuration

use std::time::Duration;

/// Server configuration loaded from environment variables
pub struct Config {
    pub bind_address: String,
    /// API key required on `/api` routes; `None` disables auth.
    pub api_key: Option<String>,
    pub cors_origins: Vec<String>,
    pub rate_limit_rps: u32,
    /// Timeout applied to every outbound call (search index, interpreter).
    pub outbound_timeout: Duration,

    pub search_url: String,
    pub search_api_key: Option<String>,
    pub search_index: String,

    pub interpreter_api_key: Option<String>,
    pub interpreter_model: String,
    pub interpreter_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            api_key: std::env::var("API_KEY").ok(),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            outbound_timeout: Duration::from_secs(
                std::env::var("OUTBOUND_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            search_url: std::env::var("ELASTIC_URL")
                .unwrap_or_else(|_| "http://localhost:9200".into()),
            search_api_key: std::env::var("ELASTIC_API_KEY").ok(),
            search_index: std::env::var("ELASTIC_INDEX").unwrap_or_else(|_| "patientdata".into()),
            interpreter_api_key: std::env::var("INTERPRETER_API_KEY").ok(),
            interpreter_model: std::env::var("INTERPRETER_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-5".into()),
            interpreter_url: std::env::var("INTERPRETER_URL").ok(),
        }
    }
}
