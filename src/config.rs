//! Runtime configuration loaded from the environment.
//!
//! `main` loads `.env` with dotenvy first, so values there act as defaults
//! for anything not already exported.

use axum::http::HeaderValue;
use std::net::SocketAddr;

const DEFAULT_APP_NAME: &str = "MeuCFO.ai";
const DEFAULT_BIND: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a port number, got {0:?}")]
    InvalidPort(String),

    #[error("APP_BIND must be an IP address, got {0:?}")]
    InvalidBind(String),

    #[error("CORS_ORIGINS contains an invalid origin: {0:?}")]
    InvalidOrigin(String),
}

/// Origins allowed to call the API from a browser
#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub bind_addr: SocketAddr,
    pub cors_origins: CorsOrigins,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_name = lookup("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let bind = lookup("APP_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let ip = bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;

        let cors_origins = parse_origins(lookup("CORS_ORIGINS").as_deref().unwrap_or("*"))?;

        Ok(Self {
            app_name,
            bind_addr: SocketAddr::new(ip, port),
            cors_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Result<CorsOrigins, ConfigError> {
    let origins: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .collect();

    if origins.is_empty() || origins.contains(&"*") {
        return Ok(CorsOrigins::Any);
    }

    origins
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}
