use lazy_static::lazy_static;
use time::OffsetDateTime;

use super::dto::{FoodEntry, FoodNutrients, FoodParseRequest};

pub const FALLBACK_DESCRIPTION: &str = "food item";

lazy_static! {
    /// Keyword table, scanned in declaration order.
    static ref KNOWN_FOODS: Vec<(&'static str, FoodNutrients)> = vec![
        (
            "banana",
            FoodNutrients {
                calories: 105.0,
                carbs_g: 27.0,
                protein_g: 1.3,
                fat_g: 0.3,
                fiber_g: 3.1,
                ..Default::default()
            },
        ),
        (
            "egg",
            FoodNutrients {
                calories: 78.0,
                protein_g: 6.0,
                fat_g: 5.0,
                carbs_g: 0.6,
                ..Default::default()
            },
        ),
        (
            "rice",
            FoodNutrients {
                calories: 206.0,
                carbs_g: 45.0,
                protein_g: 4.3,
                fat_g: 0.4,
                ..Default::default()
            },
        ),
        (
            "chicken",
            FoodNutrients {
                calories: 165.0,
                protein_g: 31.0,
                fat_g: 3.6,
                ..Default::default()
            },
        ),
        (
            "milk",
            FoodNutrients {
                calories: 103.0,
                protein_g: 8.0,
                carbs_g: 12.0,
                fat_g: 2.4,
                calcium_mg: Some(300.0),
                ..Default::default()
            },
        ),
        (
            "apple",
            FoodNutrients {
                calories: 95.0,
                carbs_g: 25.0,
                fiber_g: 4.4,
                protein_g: 0.5,
                fat_g: 0.3,
                ..Default::default()
            },
        ),
    ];
    static ref FALLBACK_NUTRIENTS: FoodNutrients = FoodNutrients {
        calories: 150.0,
        carbs_g: 20.0,
        protein_g: 5.0,
        fat_g: 5.0,
        fiber_g: 2.0,
        ..Default::default()
    };
}

/// Resolve free text to a description and nutrient record.
///
/// The first table key contained in the lowercased input wins, regardless of
/// where it appears in the text.
pub fn resolve(input: &str) -> (&'static str, FoodNutrients) {
    let text = input.to_lowercase();
    KNOWN_FOODS
        .iter()
        .find(|(key, _)| text.contains(*key))
        .map(|(key, nutrients)| (*key, nutrients.clone()))
        .unwrap_or_else(|| (FALLBACK_DESCRIPTION, FALLBACK_NUTRIENTS.clone()))
}

pub fn build_entry(request: &FoodParseRequest, eaten_at: OffsetDateTime) -> FoodEntry {
    let (description, nutrients) = resolve(&request.input);
    FoodEntry {
        user_id: request.user_id.clone(),
        source: request.source,
        query: request.input.clone(),
        description: description.to_string(),
        nutrients,
        eaten_at: Some(eaten_at),
        meal: request.meal,
    }
}
