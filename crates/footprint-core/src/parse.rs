//! Quick-log parser
//!
//! Turns a free-text message like "took a taxi 5km then had a beef lunch"
//! into structured actions. Keyword matching against a fixed English table;
//! amounts come from the nearest number in a small window around the
//! keyword, defaulting to one unit.

use regex::Regex;

use crate::models::{Category, ParsedAction};

/// Keyword table: phrase -> (category, item_key).
///
/// Multi-word phrases come first so "oat milk" wins over "milk" at the same
/// position.
const KEYWORDS: &[(&str, Category, &str)] = &[
    ("oat milk", Category::Purchase, "oat_milk_liter"),
    ("plastic bag", Category::Purchase, "plastic_bag"),
    ("reusable bag", Category::Purchase, "reusable_bag"),
    ("bottled water", Category::Purchase, "bottled_water_500ml"),
    ("tap water", Category::Purchase, "tap_water_500ml"),
    ("walk", Category::Mobility, "walking"),
    ("walked", Category::Mobility, "walking"),
    ("walking", Category::Mobility, "walking"),
    ("bike", Category::Mobility, "bicycle"),
    ("bicycle", Category::Mobility, "bicycle"),
    ("cycled", Category::Mobility, "bicycle"),
    ("scooter", Category::Mobility, "escooter"),
    ("ktx", Category::Mobility, "train_ktx"),
    ("train", Category::Mobility, "train_ktx"),
    ("subway", Category::Mobility, "subway"),
    ("metro", Category::Mobility, "subway"),
    ("taxi", Category::Mobility, "taxi_ice"),
    ("uber", Category::Mobility, "taxi_ice"),
    ("bus", Category::Mobility, "bus"),
    ("motorcycle", Category::Mobility, "motorcycle"),
    ("car", Category::Mobility, "car_gasoline"),
    ("drove", Category::Mobility, "car_gasoline"),
    ("flight", Category::Mobility, "domestic_flight"),
    ("flew", Category::Mobility, "domestic_flight"),
    ("beef", Category::Purchase, "beef_meal"),
    ("steak", Category::Purchase, "beef_meal"),
    ("pork", Category::Purchase, "pork_meal"),
    ("fish", Category::Purchase, "fish_meal"),
    ("chicken", Category::Purchase, "chicken_meal"),
    ("vegetarian", Category::Purchase, "vegetarian_meal"),
    ("vegan", Category::Purchase, "vegetarian_meal"),
    ("salad", Category::Purchase, "vegetarian_meal"),
    ("coffee", Category::Purchase, "coffee"),
    ("latte", Category::Purchase, "coffee"),
    ("milk", Category::Purchase, "milk_liter"),
    ("t-shirt", Category::Purchase, "tshirt_fastfashion"),
    ("tshirt", Category::Purchase, "tshirt_fastfashion"),
    ("shirt", Category::Purchase, "tshirt_fastfashion"),
    ("jeans", Category::Purchase, "jeans_fastfashion"),
    ("sneakers", Category::Purchase, "sneakers_new"),
    ("smartphone", Category::Purchase, "smartphone_new"),
    ("laptop", Category::Purchase, "laptop_new"),
    ("electricity", Category::HomeEnergy, "electricity_kwh"),
    ("heating", Category::HomeEnergy, "natural_gas_m3"),
    ("shower", Category::HomeEnergy, "hot_water_shower"),
];

/// How far around a keyword (in bytes) to look for an amount
const AMOUNT_WINDOW: usize = 20;

/// Confidence when an explicit amount sits next to the keyword
const CONFIDENCE_WITH_AMOUNT: f64 = 0.8;

/// Confidence when the amount defaulted to one unit
const CONFIDENCE_DEFAULT: f64 = 0.6;

/// Recognize actions in a free-text message.
///
/// Results are ordered by keyword position in the message; a repeated item
/// keeps only its first occurrence. Unknown phrasing yields an empty list,
/// never an error.
pub fn parse_quick_log(message: &str) -> Vec<ParsedAction> {
    let lowered = message.to_lowercase();
    let number_re = Regex::new(r"\d+(?:\.\d+)?").expect("valid regex");

    // (position, parsed action), earliest occurrence per item key
    let mut hits: Vec<(usize, ParsedAction)> = Vec::new();
    // Byte spans already claimed by a matched phrase; a later (shorter)
    // phrase landing inside one is part of that phrase, not a new action
    let mut claimed: Vec<(usize, usize)> = Vec::new();

    for (phrase, category, item_key) in KEYWORDS {
        let word_re = Regex::new(&format!(r"\b{}\b", regex::escape(phrase)))
            .expect("valid regex");
        let Some(m) = word_re
            .find_iter(&lowered)
            .find(|m| !claimed.iter().any(|&(lo, hi)| m.start() >= lo && m.end() <= hi))
        else {
            continue;
        };
        if hits.iter().any(|(_, a)| a.item_key == *item_key) {
            continue;
        }
        claimed.push((m.start(), m.end()));

        let amount = amount_near(&lowered, &number_re, m.start(), m.end());
        hits.push((
            m.start(),
            ParsedAction {
                category: *category,
                item_key: (*item_key).to_string(),
                amount: amount.unwrap_or(1.0),
                confidence: if amount.is_some() {
                    CONFIDENCE_WITH_AMOUNT
                } else {
                    CONFIDENCE_DEFAULT
                },
            },
        ));
    }

    hits.sort_by_key(|(pos, _)| *pos);
    hits.into_iter().map(|(_, action)| action).collect()
}

/// First positive number within the window around `[start, end)`
fn amount_near(text: &str, number_re: &Regex, start: usize, end: usize) -> Option<f64> {
    let lo = clamp_to_char_boundary(text, start.saturating_sub(AMOUNT_WINDOW));
    let hi = clamp_to_char_boundary(text, (end + AMOUNT_WINDOW).min(text.len()));
    let window = &text[lo..hi];

    number_re
        .find_iter(window)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .find(|&n| n > 0.0)
}

fn clamp_to_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx.min(text.len())
}
