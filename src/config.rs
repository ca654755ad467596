use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_BACKEND_ENDPOINT: &str = "http://127.0.0.1:3001";
pub const DEFAULT_CALORIENINJAS_BASE_URL: &str = "https://api.calorieninjas.com/v1";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_RETRY_ATTEMPTS: u32 = 2;

/// Settings for outbound nutrition lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Backend the proxy route forwards to.
    pub backend_endpoint: String,
    /// Deploy-time endpoint the search page talks to instead of the proxy.
    pub public_endpoint: Option<String>,
    pub timeout_ms: u64,
    /// Parsed for compatibility with existing deployments; nothing retries.
    pub retry_attempts: u32,
    /// Whether the `api_endpoint` cookie may redirect page lookups. Only
    /// loopback endpoints are ever honoured.
    pub allow_endpoint_override: bool,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api: ApiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend_endpoint = env_non_empty("API_GATEWAY_ENDPOINT")
            .or_else(|| env_non_empty("LOCAL_API_ENDPOINT"))
            .unwrap_or_else(|| DEFAULT_BACKEND_ENDPOINT.into());

        let public_endpoint = env_non_empty("PUBLIC_API_ENDPOINT").or_else(|| {
            option_env!("BOBAFIT_PUBLIC_API_ENDPOINT")
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        });

        let api = ApiConfig {
            backend_endpoint,
            public_endpoint,
            timeout_ms: env_parse("API_TIMEOUT_MS").unwrap_or(DEFAULT_TIMEOUT_MS),
            retry_attempts: env_parse("API_RETRY_ATTEMPTS").unwrap_or(DEFAULT_RETRY_ATTEMPTS),
            allow_endpoint_override: flag_from_env("ALLOW_ENDPOINT_OVERRIDE", false)?,
        };

        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: port_from_env("APP_PORT", 8080)?,
            api,
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        socket_addr(&self.host, self.port)
    }
}

/// Settings for the `nutrition-api` backend binary.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub host: String,
    pub port: u16,
    /// Empty means mock mode.
    pub api_key: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl BackendConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: std::env::var("NUTRITION_API_HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: port_from_env("NUTRITION_API_PORT", 3001)?,
            api_key: std::env::var("CALORIENINJAS_API_KEY").unwrap_or_default(),
            base_url: env_non_empty("CALORIENINJAS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_CALORIENINJAS_BASE_URL.into()),
            timeout_ms: env_parse("API_TIMEOUT_MS").unwrap_or(DEFAULT_TIMEOUT_MS),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        socket_addr(&self.host, self.port)
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

fn port_from_env(key: &str, default: u16) -> anyhow::Result<u16> {
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse::<u16>()
            .with_context(|| format!("{key} must be a port number, got {v:?}")),
        Err(_) => Ok(default),
    }
}

fn flag_from_env(key: &str, default: bool) -> anyhow::Result<bool> {
    match std::env::var(key) {
        Ok(v) => parse_flag(&v).with_context(|| format!("{key} must be a boolean, got {v:?}")),
        Err(_) => Ok(default),
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised flag value {other:?}"),
    }
}

fn socket_addr(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))
}
