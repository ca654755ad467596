use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::{ApiConfig, AppConfig};
use crate::nutrition::proxy::ProxyForwarder;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Client for direct lookups against a resolved endpoint.
    pub http: reqwest::Client,
    pub forwarder: ProxyForwarder,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        info!(
            backend = %config.api.backend_endpoint,
            public_endpoint = ?config.api.public_endpoint,
            retry_attempts = config.api.retry_attempts,
            "nutrition api configured"
        );
        Self::from_config(config)
    }

    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.api.timeout())
            .build()
            .context("build http client")?;
        let forwarder = ProxyForwarder::new(&config.api.backend_endpoint, config.api.timeout())?;
        Ok(Self {
            config: Arc::new(config),
            http,
            forwarder,
        })
    }

    /// State for tests. The backend points at a closed port, so every proxied
    /// lookup falls back to mock data.
    pub fn fake() -> Self {
        Self::fake_with_backend("http://127.0.0.1:9")
    }

    pub fn fake_with_backend(backend: &str) -> Self {
        let config = AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            api: ApiConfig {
                backend_endpoint: backend.into(),
                public_endpoint: None,
                timeout_ms: 2_000,
                retry_attempts: 2,
                allow_endpoint_override: true,
            },
        };
        Self::from_config(config).expect("fake state")
    }
}
