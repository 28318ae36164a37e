//! Packing suggestions scaled by trip length and conditioned on tags.
//!
//! Generation is pure: nothing here touches a stored packing list. Callers
//! merge the suggestions they want through `addItem`.

use serde::Serialize;

use super::{PackingCategory, Priority, WeatherCondition};
use crate::domain::foundation::ValidationError;

/// Longest trip suggestions are generated for.
pub const MAX_SUGGESTION_DAYS: u32 = 365;

/// A suggested item with its scaled quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedItem {
    pub name: &'static str,
    pub quantity: u32,
    pub priority: Priority,
}

/// Suggestions for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySuggestions {
    pub category: PackingCategory,
    pub items: Vec<SuggestedItem>,
}

/// Input to suggestion generation.
#[derive(Debug, Clone, Default)]
pub struct SuggestionRequest {
    pub duration_days: u32,
    pub weather: Vec<WeatherCondition>,
    /// Free-form activity tags such as `hiking` or `photography`.
    pub activities: Vec<String>,
}

impl SuggestionRequest {
    fn has_weather(&self, condition: WeatherCondition) -> bool {
        self.weather.contains(&condition)
    }

    fn has_activity(&self, tag: &str) -> bool {
        self.activities
            .iter()
            .any(|a| a.trim().eq_ignore_ascii_case(tag))
    }
}

/// Produces suggestions for all six categories, in canonical order.
///
/// # Errors
///
/// - `OutOfRange` if `duration_days` is 0 or above `MAX_SUGGESTION_DAYS`
pub fn generate_suggestions(
    request: &SuggestionRequest,
) -> Result<Vec<CategorySuggestions>, ValidationError> {
    let days = request.duration_days;
    if days == 0 || days > MAX_SUGGESTION_DAYS {
        return Err(ValidationError::out_of_range(
            "duration_days",
            1,
            i64::from(MAX_SUGGESTION_DAYS),
            i64::from(days),
        ));
    }

    Ok(PackingCategory::ALL
        .into_iter()
        .map(|category| CategorySuggestions {
            category,
            items: match category {
                PackingCategory::Clothing => clothing(request),
                PackingCategory::Toiletries => toiletries(request),
                PackingCategory::Electronics => electronics(request),
                PackingCategory::Documents => documents(),
                PackingCategory::Medications => medications(),
                PackingCategory::Miscellaneous => miscellaneous(request),
            },
        })
        .collect())
}

fn one(name: &'static str) -> SuggestedItem {
    SuggestedItem {
        name,
        quantity: 1,
        priority: Priority::Important,
    }
}

fn scaled(name: &'static str, quantity: u32) -> SuggestedItem {
    SuggestedItem {
        name,
        quantity: quantity.max(1),
        priority: Priority::Important,
    }
}

fn essential(name: &'static str) -> SuggestedItem {
    SuggestedItem {
        name,
        quantity: 1,
        priority: Priority::Essential,
    }
}

/// `ceil(days * num / den)` in integer arithmetic.
fn ceil_ratio(days: u32, num: u32, den: u32) -> u32 {
    (days * num).div_ceil(den)
}

fn clothing(request: &SuggestionRequest) -> Vec<SuggestedItem> {
    let d = request.duration_days;
    let mut items = vec![
        scaled("Underwear", ceil_ratio(d, 3, 2)),
        scaled("Socks", ceil_ratio(d, 3, 2)),
        scaled("T-shirts", ceil_ratio(d, 6, 5)),
        scaled("Pants/Shorts", ceil_ratio(d, 1, 2)),
    ];
    if request.has_weather(WeatherCondition::Cold) {
        items.push(one("Warm jacket"));
        items.push(scaled("Sweaters", ceil_ratio(d, 1, 3)));
        items.push(scaled("Thermal underwear", ceil_ratio(d, 1, 2)));
    }
    if request.has_weather(WeatherCondition::Rainy) {
        items.push(one("Rain jacket"));
        items.push(one("Umbrella"));
    }
    if request.has_weather(WeatherCondition::Hot) || request.has_weather(WeatherCondition::Sunny) {
        items.push(one("Sun hat"));
        items.push(one("Sunglasses"));
    }
    if request.has_weather(WeatherCondition::Windy) {
        items.push(one("Windbreaker"));
    }
    items
}

fn toiletries(request: &SuggestionRequest) -> Vec<SuggestedItem> {
    let mut items = vec![
        one("Toothbrush"),
        one("Toothpaste"),
        one("Shampoo"),
        one("Soap"),
        one("Deodorant"),
        one("Razor"),
        one("Sunscreen"),
        one("First aid kit"),
    ];
    if request.duration_days > 14 {
        items.push(one("Nail clippers"));
    }
    items
}

fn electronics(request: &SuggestionRequest) -> Vec<SuggestedItem> {
    let mut items = vec![one("Phone charger"), one("Power bank"), one("Universal adapter")];
    if request.has_activity("photography") {
        items.push(one("Camera"));
        items.push(one("Camera charger"));
        items.push(scaled("Extra memory cards", 2));
    }
    items
}

fn documents() -> Vec<SuggestedItem> {
    vec![
        essential("Passport"),
        essential("Travel insurance"),
        essential("Flight tickets"),
        one("Hotel reservations"),
        one("Emergency contacts"),
    ]
}

fn medications() -> Vec<SuggestedItem> {
    vec![
        essential("Prescription medications"),
        one("Pain relievers"),
        one("Motion sickness pills"),
        one("Antihistamines"),
    ]
}

fn miscellaneous(request: &SuggestionRequest) -> Vec<SuggestedItem> {
    let mut items = vec![
        one("Water bottle"),
        one("Snacks"),
        one("Travel pillow"),
        one("Earplugs"),
        one("Eye mask"),
    ];
    if request.has_activity("hiking") {
        items.push(one("Hiking boots"));
        items.push(one("Backpack"));
        items.push(one("Water purification tablets"));
    }
    if request.has_activity("swimming") {
        items.push(one("Swimsuit"));
        items.push(one("Towel"));
        items.push(one("Flip flops"));
    }
    items
}
