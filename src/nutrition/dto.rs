use serde::{Deserialize, Serialize};

/// Nutrient amounts for one lookup. Grams unless noted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>,
    /// Milligrams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
    /// Milligrams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionResult {
    pub food: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_count: Option<u32>,
    pub nutrition: Nutrition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FoodParams {
    pub food: Option<String>,
}

impl FoodParams {
    /// Trimmed food name, `None` when missing or blank.
    pub fn food(&self) -> Option<&str> {
        self.food.as_deref().map(str::trim).filter(|f| !f.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}
