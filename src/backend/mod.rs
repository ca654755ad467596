//! The nutrition backend the proxy route forwards to (`nutrition-api` binary).

pub mod calorie_ninjas;
pub mod handlers;

use std::sync::Arc;

use axum::Router;

use crate::app::with_http_layers;
use crate::config::BackendConfig;
use calorie_ninjas::CalorieNinjasClient;

#[derive(Clone)]
pub struct BackendState {
    pub config: Arc<BackendConfig>,
    pub ninjas: CalorieNinjasClient,
}

impl BackendState {
    pub fn new(config: BackendConfig) -> anyhow::Result<Self> {
        let ninjas = CalorieNinjasClient::new(&config.base_url, &config.api_key, config.timeout())?;
        Ok(Self {
            config: Arc::new(config),
            ninjas,
        })
    }

    pub fn mock_mode(&self) -> bool {
        self.config.api_key.is_empty()
    }
}

pub fn build_backend_app(state: BackendState) -> Router {
    with_http_layers(handlers::nutrition_routes().with_state(state))
}
