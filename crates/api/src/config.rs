use std::path::PathBuf;
use std::str::FromStr;

use axum::http::HeaderValue;

/// 15 MiB, enough for a base64 encoded photo plus its thumbnail.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 15 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long open connections may drain after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Directory served under `/api/assets`.
    pub assets_path: PathBuf,
    /// Root directory for partner uploads (default: `<assets>/uploads`).
    pub uploads_path: PathBuf,
    /// JSON body limit for the photo upload routes.
    pub max_upload_bytes: usize,
    /// Load the demo tickets at startup.
    pub seed_demo_data: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

fn parse_env<T: FromStr>(
    name: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = env_or(name, default);
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value,
    })
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3001`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `ASSETS_PATH`          | `./recolour-case`          |
    /// | `UPLOADS_PATH`         | `<ASSETS_PATH>/uploads`    |
    /// | `MAX_UPLOAD_BYTES`     | `15728640`                 |
    /// | `SEED_DEMO_DATA`       | `true`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "0.0.0.0");
        let port: u16 = parse_env("PORT", "3001", "u16")?;

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError::Invalid {
                name: "CORS_ORIGINS",
                expected: "origin header value",
                value: bad.clone(),
            });
        }

        let request_timeout_secs: u64 = parse_env("REQUEST_TIMEOUT_SECS", "30", "u64")?;
        let shutdown_timeout_secs: u64 = parse_env("SHUTDOWN_TIMEOUT_SECS", "30", "u64")?;

        let assets_path = PathBuf::from(env_or("ASSETS_PATH", "./recolour-case"));
        let uploads_path = std::env::var("UPLOADS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| assets_path.join("uploads"));

        let max_upload_bytes: usize = parse_env(
            "MAX_UPLOAD_BYTES",
            &DEFAULT_MAX_UPLOAD_BYTES.to_string(),
            "byte count",
        )?;
        let seed_demo_data: bool = parse_env("SEED_DEMO_DATA", "true", "bool")?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            assets_path,
            uploads_path,
            max_upload_bytes,
            seed_demo_data,
        })
    }
}
