use super::format::{display_value, round1, should_show, sodium_to_mg};
use crate::nutrition::dto::{Nutrition, NutritionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
    Pink,
    Indigo,
    Red,
    Amber,
    Teal,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Blue => "tone-blue",
            Tone::Green => "tone-green",
            Tone::Yellow => "tone-yellow",
            Tone::Orange => "tone-orange",
            Tone::Purple => "tone-purple",
            Tone::Pink => "tone-pink",
            Tone::Indigo => "tone-indigo",
            Tone::Red => "tone-red",
            Tone::Amber => "tone-amber",
            Tone::Teal => "tone-teal",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NutritionCard {
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
    pub tone: Tone,
}

impl NutritionCard {
    fn new(label: &'static str, value: f64, unit: &'static str, tone: Tone) -> Self {
        Self {
            label,
            value: display_value(value).to_string(),
            unit,
            tone,
        }
    }

    pub fn text(&self) -> String {
        format!("{}{}", self.value, self.unit)
    }
}

/// Cards in grid order. Optional nutrients appear only when [`should_show`].
pub fn cards(n: &Nutrition) -> Vec<NutritionCard> {
    let mut out = vec![
        NutritionCard::new("Calories", n.calories, " kcal", Tone::Blue),
        NutritionCard::new("Protein", round1(n.protein), "g", Tone::Green),
        NutritionCard::new("Carbs", round1(n.carbs), "g", Tone::Yellow),
        NutritionCard::new("Fat", round1(n.fat), "g", Tone::Orange),
        NutritionCard::new("Fiber", round1(n.fiber), "g", Tone::Purple),
    ];

    if let Some(sugar) = n.sugar.filter(|v| should_show(Some(*v))) {
        out.push(NutritionCard::new("Sugar", round1(sugar), "g", Tone::Pink));
    }
    if let Some(sodium) = n.sodium.filter(|v| should_show(Some(*v))) {
        // Sodium arrives in grams but reads better in whole milligrams.
        out.push(NutritionCard {
            label: "Sodium",
            value: sodium_to_mg(sodium).to_string(),
            unit: "mg",
            tone: Tone::Indigo,
        });
    }
    if let Some(fat) = n.saturated_fat.filter(|v| should_show(Some(*v))) {
        out.push(NutritionCard::new("Saturated Fat", round1(fat), "g", Tone::Red));
    }
    if let Some(mg) = n.cholesterol.filter(|v| should_show(Some(*v))) {
        out.push(NutritionCard::new("Cholesterol", round1(mg), "mg", Tone::Amber));
    }
    if let Some(mg) = n.potassium.filter(|v| should_show(Some(*v))) {
        out.push(NutritionCard::new("Potassium", round1(mg), "mg", Tone::Teal));
    }
    out
}

/// `Serving Size` line, hidden when absent or zero.
pub fn serving_size_label(result: &NutritionResult) -> Option<String> {
    result
        .serving_size
        .filter(|s| *s != 0.0)
        .map(|s| format!("{}g", s.round()))
}
