use std::time::Duration;

use anyhow::Context;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument, warn};

use super::dto::{Nutrition, NutritionResult};
use super::endpoint::backend_nutrition_url;

/// Forwards lookups to the nutrition backend and hides its outages behind
/// fixed mock data.
#[derive(Clone)]
pub struct ProxyForwarder {
    client: reqwest::Client,
    backend_base: String,
}

impl ProxyForwarder {
    pub fn new(backend_base: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build proxy http client")?;
        Ok(Self {
            client,
            backend_base: backend_base.into(),
        })
    }

    /// Never fails: any backend problem yields [`mock_result`].
    ///
    /// `food` must already be trimmed and non-empty.
    #[instrument(skip(self), fields(backend = %self.backend_base))]
    pub async fn fetch_nutrition(&self, food: &str) -> NutritionResult {
        let url = backend_nutrition_url(&self.backend_base, food);

        let response = match self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, %url, "could not reach nutrition backend");
                return mock_result(food, self.unreachable_message());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %body, "nutrition backend call failed");
            return mock_result(food, self.backend_error_message());
        }

        match response.json::<NutritionResult>().await {
            Ok(result) => {
                debug!(food = %result.food, "nutrition backend answered");
                result
            }
            Err(e) => {
                warn!(error = %e, "nutrition backend sent an unreadable body");
                mock_result(food, self.unexpected_response_message())
            }
        }
    }

    fn backend_error_message(&self) -> String {
        format!(
            "Using mock data. Make sure the nutrition API is running at {}.",
            self.backend_base
        )
    }

    fn unexpected_response_message(&self) -> String {
        format!(
            "Using mock data. The nutrition API at {} sent an unexpected response.",
            self.backend_base
        )
    }

    fn unreachable_message(&self) -> String {
        format!(
            "Using mock data. Start the nutrition API with \"cargo run --bin nutrition-api\" on {} for real data.",
            self.backend_base
        )
    }
}

/// Placeholder served whenever the backend cannot answer.
pub fn mock_result(food: &str, message: impl Into<String>) -> NutritionResult {
    NutritionResult {
        food: food.to_string(),
        serving_size: None,
        items_count: None,
        nutrition: Nutrition {
            calories: 250.0,
            protein: 10.0,
            carbs: 30.0,
            fat: 8.0,
            fiber: 5.0,
            sugar: Some(15.0),
            sodium: Some(0.2),
            ..Default::default()
        },
        message: Some(message.into()),
    }
}
