//! CalorieNinjas lookup and the conversion of its items into our nutrition
//! shape.

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::nutrition::dto::{Nutrition, NutritionResult};

pub const DEFAULT_SERVING_SIZE_G: f64 = 100.0;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("upstream returned {status}")]
    Upstream { status: u16, body: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

/// One entry of the `items` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NinjaItem {
    pub name: Option<String>,
    pub serving_size_g: Option<f64>,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbohydrates_total_g: Option<f64>,
    pub fat_total_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub sugar_g: Option<f64>,
    pub sodium_mg: Option<f64>,
    pub fat_saturated_g: Option<f64>,
    pub cholesterol_mg: Option<f64>,
    pub potassium_mg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct NinjaResponse {
    #[serde(default)]
    items: Vec<NinjaItem>,
}

#[derive(Clone)]
pub struct CalorieNinjasClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CalorieNinjasClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build calorieninjas client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<NinjaItem>, LookupError> {
        let response = self
            .client
            .get(format!("{}/nutrition", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .query(&[("query", query)])
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: NinjaResponse = serde_json::from_slice(&bytes)?;
        debug!(items = parsed.items.len(), "calorieninjas answered");
        Ok(parsed.items)
    }
}

/// Sodium is converted from milligrams to grams; cholesterol and potassium
/// stay in milligrams.
pub fn parse_item(item: &NinjaItem) -> Nutrition {
    Nutrition {
        calories: item.calories.unwrap_or(0.0),
        protein: item.protein_g.unwrap_or(0.0),
        carbs: item.carbohydrates_total_g.unwrap_or(0.0),
        fat: item.fat_total_g.unwrap_or(0.0),
        fiber: item.fiber_g.unwrap_or(0.0),
        sugar: Some(item.sugar_g.unwrap_or(0.0)),
        sodium: Some(item.sodium_mg.unwrap_or(0.0) / 1000.0),
        saturated_fat: Some(item.fat_saturated_g.unwrap_or(0.0)),
        cholesterol: Some(item.cholesterol_mg.unwrap_or(0.0)),
        potassium: Some(item.potassium_mg.unwrap_or(0.0)),
    }
}

/// Field-wise sum over all items.
pub fn aggregate(items: &[NinjaItem]) -> Nutrition {
    let add = |a: Option<f64>, b: Option<f64>| Some(a.unwrap_or(0.0) + b.unwrap_or(0.0));
    items.iter().map(parse_item).fold(
        Nutrition {
            sugar: Some(0.0),
            sodium: Some(0.0),
            saturated_fat: Some(0.0),
            cholesterol: Some(0.0),
            potassium: Some(0.0),
            ..Default::default()
        },
        |acc, n| Nutrition {
            calories: acc.calories + n.calories,
            protein: acc.protein + n.protein,
            carbs: acc.carbs + n.carbs,
            fat: acc.fat + n.fat,
            fiber: acc.fiber + n.fiber,
            sugar: add(acc.sugar, n.sugar),
            sodium: add(acc.sodium, n.sodium),
            saturated_fat: add(acc.saturated_fat, n.saturated_fat),
            cholesterol: add(acc.cholesterol, n.cholesterol),
            potassium: add(acc.potassium, n.potassium),
        },
    )
}

/// Result for a non-empty item list.
pub fn summarize(query: &str, items: &[NinjaItem]) -> NutritionResult {
    if let [item] = items {
        return NutritionResult {
            food: item.name.clone().unwrap_or_else(|| query.to_string()),
            serving_size: Some(item.serving_size_g.unwrap_or(DEFAULT_SERVING_SIZE_G)),
            items_count: None,
            nutrition: parse_item(item),
            message: None,
        };
    }

    let names: Vec<&str> = items
        .iter()
        .filter_map(|i| i.name.as_deref())
        .filter(|n| !n.is_empty())
        .collect();
    NutritionResult {
        food: if names.is_empty() {
            query.to_string()
        } else {
            names.join(", ")
        },
        serving_size: None,
        items_count: Some(items.len() as u32),
        nutrition: aggregate(items),
        message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn item(name: &str, calories: f64, sodium_mg: f64) -> NinjaItem {
        NinjaItem {
            name: Some(name.into()),
            calories: Some(calories),
            protein_g: Some(1.0),
            sodium_mg: Some(sodium_mg),
            ..Default::default()
        }
    }

    #[test]
    fn parse_item_converts_sodium_and_defaults_missing() {
        let n = parse_item(&item("apple", 52.0, 1.0));
        assert_eq!(n.calories, 52.0);
        assert_eq!(n.sodium, Some(0.001));
        assert_eq!(n.fiber, 0.0);
        assert_eq!(n.potassium, Some(0.0));
    }

    #[test]
    fn single_item_uses_its_name_and_serving() {
        let mut apple = item("apple", 52.0, 1.0);
        let r = summarize("an apple", std::slice::from_ref(&apple));
        assert_eq!(r.food, "apple");
        assert_eq!(r.serving_size, Some(DEFAULT_SERVING_SIZE_G));
        assert_eq!(r.items_count, None);

        apple.serving_size_g = Some(182.0);
        apple.name = None;
        let r = summarize("an apple", &[apple]);
        assert_eq!(r.food, "an apple");
        assert_eq!(r.serving_size, Some(182.0));
    }

    #[test]
    fn multiple_items_are_summed() {
        let r = summarize(
            "apple and banana",
            &[item("apple", 52.0, 1.0), item("banana", 89.0, 1.0)],
        );
        assert_eq!(r.food, "apple, banana");
        assert_eq!(r.items_count, Some(2));
        assert_eq!(r.nutrition.calories, 141.0);
        assert_eq!(r.nutrition.protein, 2.0);
        assert_eq!(r.nutrition.sodium, Some(0.002));
        assert_eq!(r.serving_size, None);
    }

    #[tokio::test]
    async fn search_sends_key_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nutrition"))
            .and(query_param("query", "boba"))
            .and(header("X-Api-Key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"name": "boba", "calories": 160.0, "sugar_g": 20.0}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CalorieNinjasClient::new(&server.uri(), "secret", Duration::from_secs(2)).unwrap();
        let items = client.search("boba").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sugar_g, Some(20.0));
    }

    #[tokio::test]
    async fn search_reports_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let client = CalorieNinjasClient::new(&server.uri(), "bad", Duration::from_secs(2)).unwrap();
        match client.search("boba").await.unwrap_err() {
            LookupError::Upstream { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
