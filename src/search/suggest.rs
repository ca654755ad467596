/// Foods known to return good results from the backend, in display order.
pub const COMMON_FOODS: &[&str] = &[
    "apple", "banana", "orange", "strawberry", "blueberry", "grape", "watermelon",
    "chicken breast", "chicken thigh", "beef", "pork", "salmon", "tuna", "shrimp",
    "rice", "pasta", "bread", "potato", "sweet potato", "broccoli", "carrot", "spinach",
    "milk", "yogurt", "cheese", "egg", "butter", "olive oil",
    "boba", "coffee", "tea", "orange juice", "apple juice",
    "chocolate", "cookie", "cake", "ice cream", "pizza", "burger", "sandwich",
];

pub const MAX_SUGGESTIONS: usize = 8;

/// Case-insensitive substring matches from [`COMMON_FOODS`], in list order.
pub fn suggest(query: &str) -> Vec<&'static str> {
    suggest_from(COMMON_FOODS, query)
}

fn suggest_from(foods: &[&'static str], query: &str) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    foods
        .iter()
        .copied()
        .filter(|food| food.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}
