//! Body metrics derived from a [`Profile`].
//!
//! BMR uses the Mifflin–St Jeor equation; TDEE scales it by a fixed activity
//! factor and the calorie target shifts TDEE by the user's goal.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::dto::{Goal, Profile, ProfileMetrics, Sex};
use crate::math::round_to;

const DEFAULT_ACTIVITY_FACTOR: f64 = 1.2;
const LOSE_DELTA_KCAL: f64 = -500.0;
const GAIN_DELTA_KCAL: f64 = 300.0;

lazy_static! {
    static ref ACTIVITY_FACTORS: HashMap<&'static str, f64> = HashMap::from([
        ("sedentary", 1.2),
        ("light", 1.375),
        ("moderate", 1.55),
        ("active", 1.725),
        ("very_active", 1.9),
    ]);
}

pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let h_m = height_cm / 100.0;
    round_to(weight_kg / (h_m * h_m), 2)
}

pub fn bmr(sex: Sex, height_cm: f64, weight_kg: f64, age: u32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    let offset = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    round_to(base + offset, 1)
}

/// Unknown activity levels fall back to the sedentary factor.
pub fn tdee(bmr: f64, activity_level: &str) -> f64 {
    let factor = ACTIVITY_FACTORS
        .get(activity_level)
        .copied()
        .unwrap_or(DEFAULT_ACTIVITY_FACTOR);
    round_to(bmr * factor, 1)
}

pub fn calorie_target(tdee: f64, goal: Option<Goal>) -> f64 {
    let target = match goal {
        Some(Goal::Lose) => tdee + LOSE_DELTA_KCAL,
        Some(Goal::Gain) => tdee + GAIN_DELTA_KCAL,
        Some(Goal::Maintain) | None => tdee,
    };
    round_to(target, 0)
}

pub fn profile_metrics(profile: &Profile) -> ProfileMetrics {
    let bmr = bmr(profile.sex, profile.height_cm, profile.weight_kg, profile.age);
    let tdee = tdee(bmr, profile.activity_level.as_str());
    ProfileMetrics {
        bmi: bmi(profile.height_cm, profile.weight_kg),
        bmr,
        tdee,
        calorie_target: calorie_target(tdee, profile.goal),
    }
}

#[cfg(test)]
mod metrics_tests {
    use super::*;
    use crate::health::dto::ActivityLevel;

    #[test]
    fn bmi_matches_reference_values() {
        assert_eq!(bmi(180.0, 81.0), 25.0);
        assert_eq!(bmi(165.0, 60.0), 22.04);
    }

    #[test]
    fn bmi_is_invariant_when_ratio_is_preserved() {
        // weight scales with height squared
        assert_eq!(bmi(100.0, 25.0), bmi(200.0, 100.0));
        assert_eq!(bmi(150.0, 45.0), bmi(300.0, 180.0));
    }

    #[test]
    fn bmr_male_female_gap_is_166() {
        let male = bmr(Sex::Male, 180.0, 70.0, 30);
        let female = bmr(Sex::Female, 180.0, 70.0, 30);
        assert_eq!(male, 1680.0);
        assert_eq!(female, 1514.0);
        assert_eq!(male - female, 166.0);

        let gap = bmr(Sex::Male, 175.0, 70.0, 30) - bmr(Sex::Female, 175.0, 70.0, 30);
        assert!((gap - 166.0).abs() < 1e-9);
    }

    #[test]
    fn tdee_uses_activity_table() {
        assert_eq!(tdee(1000.0, "sedentary"), 1200.0);
        assert_eq!(tdee(1000.0, "light"), 1375.0);
        assert_eq!(tdee(1000.0, "moderate"), 1550.0);
        assert_eq!(tdee(1000.0, "active"), 1725.0);
        assert_eq!(tdee(1000.0, "very_active"), 1900.0);
    }

    #[test]
    fn tdee_unknown_level_falls_back_to_sedentary() {
        assert_eq!(tdee(1680.0, "unknown_level"), tdee(1680.0, "sedentary"));
    }

    #[test]
    fn calorie_target_orders_gain_maintain_lose() {
        let gain = calorie_target(2148.0, Some(Goal::Gain));
        let maintain = calorie_target(2148.0, Some(Goal::Maintain));
        let lose = calorie_target(2148.0, Some(Goal::Lose));
        assert_eq!((gain, maintain, lose), (2448.0, 2148.0, 1648.0));
        assert!(gain > maintain && maintain > lose);
        assert_eq!(calorie_target(2148.0, None), maintain);
    }

    #[test]
    fn half_way_values_round_to_even() {
        // 700 + 1131.25 - 150 + 5
        assert_eq!(bmr(Sex::Male, 181.0, 70.0, 30), 1686.2);
        assert_eq!(calorie_target(2136.5, None), 2136.0);
        assert_eq!(calorie_target(1837.5, Some(Goal::Gain)), 2138.0);
    }

    #[test]
    fn profile_metrics_compose_all_formulas() {
        let profile = Profile {
            user_id: "u1".into(),
            name: None,
            age: 30,
            sex: Sex::Male,
            height_cm: 180.0,
            weight_kg: 81.0,
            activity_level: ActivityLevel::Sedentary,
            goal: Some(Goal::Lose),
        };
        let m = profile_metrics(&profile);
        assert_eq!(m.bmi, 25.0);
        assert_eq!(m.bmr, 1790.0);
        assert_eq!(m.tdee, 2148.0);
        assert_eq!(m.calorie_target, 1648.0);
        assert_eq!(profile_metrics(&profile), m);
    }
}
