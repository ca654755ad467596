use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{error, instrument};

use crate::error::{ErrorBody, NutritionError};
use crate::nutrition::dto::NutritionResult;
use crate::nutrition::endpoint::EndpointResolver;
use crate::nutrition::proxy::ProxyForwarder;

/// Where a search gets its nutrition data from.
#[async_trait]
pub trait NutritionSource: Send + Sync {
    async fn lookup(&self, food: &str) -> Result<NutritionResult, NutritionError>;
}

/// In-process proxy route. Inherits its mock fallback, so it never fails.
#[async_trait]
impl NutritionSource for ProxyForwarder {
    async fn lookup(&self, food: &str) -> Result<NutritionResult, NutritionError> {
        Ok(self.fetch_nutrition(food).await)
    }
}

/// Direct call to the resolved endpoint. Failures surface as errors and the
/// search shows no result.
pub struct HttpNutritionSource {
    client: reqwest::Client,
    resolver: EndpointResolver,
}

impl HttpNutritionSource {
    pub fn new(client: reqwest::Client, resolver: EndpointResolver) -> Self {
        Self { client, resolver }
    }
}

#[async_trait]
impl NutritionSource for HttpNutritionSource {
    #[instrument(skip(self), fields(endpoint = %self.resolver.resolve_endpoint()))]
    async fn lookup(&self, food: &str) -> Result<NutritionResult, NutritionError> {
        let url = self.resolver.nutrition_url(food);
        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, %url, "network error");
                NutritionError::from(e)
            })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| "Failed to fetch nutrition data".to_string());
            error!(%status, %message, "nutrition lookup failed");
            return Err(NutritionError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
