//! Daily calorie goal: Mifflin-St Jeor BMR, activity multiplier, fixed
//! weight-loss deficit.

use fitpath_db::models::{ActivityLevel, Gender, UserProfile};

/// Daily deficit subtracted from maintenance calories.
pub const DAILY_DEFICIT_KCAL: f64 = 500.0;

/// Goals below this are stored as computed but reported as unusually low.
pub const MIN_RECOMMENDED_CALORIES: i64 = 1200;

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor).
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

/// TDEE multiplier for an activity level.
pub fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
    }
}

/// Compute the daily calorie goal for a profile.
///
/// `round(bmr * factor - 500)`, halves rounding up. An unset activity level
/// counts as sedentary. The result is not clamped and may be negative for
/// extreme inputs.
pub fn calculate_calorie_goal(profile: &UserProfile) -> i64 {
    let bmr = basal_metabolic_rate(
        profile.current_weight,
        profile.height,
        profile.age,
        profile.gender,
    );
    let factor = activity_factor(profile.activity_level.unwrap_or_default());
    let goal = bmr * factor - DAILY_DEFICIT_KCAL;
    (goal + 0.5).floor() as i64
}

/// Whether a computed goal falls below [`MIN_RECOMMENDED_CALORIES`].
pub fn is_below_recommended(goal: i64) -> bool {
    goal < MIN_RECOMMENDED_CALORIES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(weight: f64, height: f64, age: u32, gender: Gender) -> UserProfile {
        UserProfile {
            name: "Test".into(),
            age,
            gender,
            height,
            current_weight: weight,
            target_weight: weight - 5.0,
            profession: "Engineer".into(),
            wake_up_time: "07:00".into(),
            sleep_time: "23:00".into(),
            dietary_preferences: None,
            activity_level: None,
        }
    }

    #[test]
    fn reference_male_sedentary() {
        // BMR = 800 + 1093.75 - 150 + 5 = 1748.75; * 1.2 = 2098.5; - 500 = 1598.5
        let p = profile(80.0, 175.0, 30, Gender::Male);
        assert!((basal_metabolic_rate(80.0, 175.0, 30, Gender::Male) - 1748.75).abs() < 1e-9);
        assert_eq!(calculate_calorie_goal(&p), 1599);
    }

    #[test]
    fn female_and_other_use_the_same_constant() {
        let female = profile(65.0, 165.0, 40, Gender::Female);
        let other = profile(65.0, 165.0, 40, Gender::Other);
        assert_eq!(calculate_calorie_goal(&female), calculate_calorie_goal(&other));

        // BMR = 650 + 1031.25 - 200 - 161 = 1320.25; * 1.2 = 1584.3; - 500 = 1084.3
        assert_eq!(calculate_calorie_goal(&female), 1084);
    }

    #[test]
    fn unset_activity_level_means_sedentary() {
        let mut p = profile(90.0, 180.0, 35, Gender::Male);
        let unset = calculate_calorie_goal(&p);
        p.activity_level = Some(ActivityLevel::Sedentary);
        assert_eq!(calculate_calorie_goal(&p), unset);
    }

    #[test]
    fn activity_factors_scale_the_goal() {
        let mut p = profile(70.0, 170.0, 28, Gender::Female);
        let mut previous = i64::MIN;
        for level in [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
        ] {
            p.activity_level = Some(level);
            let goal = calculate_calorie_goal(&p);
            assert!(goal > previous, "{level} should raise the goal");
            previous = goal;
        }
    }

    #[test]
    fn moderate_factor_is_applied_exactly() {
        let mut p = profile(70.0, 170.0, 28, Gender::Female);
        p.activity_level = Some(ActivityLevel::Moderate);
        // BMR = 700 + 1062.5 - 140 - 161 = 1461.5; * 1.55 = 2265.325; - 500 = 1765.325
        assert_eq!(calculate_calorie_goal(&p), 1765);
    }

    #[test]
    fn extreme_inputs_are_not_clamped() {
        let p = profile(3.0, 50.0, 90, Gender::Female);
        let goal = calculate_calorie_goal(&p);
        assert!(goal < 0, "expected negative goal, got {goal}");
        assert!(is_below_recommended(goal));
    }
}
