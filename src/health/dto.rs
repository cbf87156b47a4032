use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{ApiError, Violations};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

/// Body profile, one per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub age: u32,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub goal: Option<Goal>,
}

impl Profile {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::default();
        v.require_text(&self.user_id, "user_id");
        v.check(
            (5..=120).contains(&self.age),
            "age",
            "must be between 5 and 120",
        );
        v.check(
            self.height_cm.is_finite() && self.height_cm > 0.0,
            "height_cm",
            "must be greater than 0",
        );
        v.check(
            self.weight_kg.is_finite() && self.weight_kg > 0.0,
            "weight_kg",
            "must be greater than 0",
        );
        v.finish()
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ProfileMetrics {
    pub bmi: f64,
    pub bmr: f64,
    pub tdee: f64,
    pub calorie_target: f64,
}

/// Profile as read back from the store, with its bookkeeping timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProfile {
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
pub struct ProfileDetails {
    pub profile: StoredProfile,
    pub metrics: ProfileMetrics,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FoodNutrients {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    #[serde(default)]
    pub fiber_g: f64,
    #[serde(default)]
    pub sodium_mg: Option<f64>,
    #[serde(default)]
    pub sugar_g: Option<f64>,
    #[serde(default)]
    pub calcium_mg: Option<f64>,
    #[serde(default)]
    pub iron_mg: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FoodSource {
    #[default]
    Text,
    Search,
    Barcode,
    Photo,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// One logged food item. Never modified after it is written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodEntry {
    pub user_id: String,
    #[serde(default)]
    pub source: FoodSource,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub description: String,
    pub nutrients: FoodNutrients,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub eaten_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub meal: Option<MealSlot>,
}

#[derive(Debug, Deserialize)]
pub struct FoodParseRequest {
    pub user_id: String,
    pub input: String,
    #[serde(default)]
    pub source: FoodSource,
    #[serde(default)]
    pub meal: Option<MealSlot>,
}

impl FoodParseRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut v = Violations::default();
        v.require_text(&self.user_id, "user_id");
        v.finish()
    }
}
