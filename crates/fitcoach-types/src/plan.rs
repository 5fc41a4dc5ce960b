//! Nutrition and training plan types.
//!
//! All plan data is generated server-side; the client only deserializes and
//! renders it. Field names follow the backend DTOs (camelCase) and almost
//! every field is optional because the DTOs evolve independently of the
//! client.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use std::fmt;
use std::str::FromStr;

/// Day of the week as the backend spells it (`MONDAY` .. `SUNDAY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Localized display label.
    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Понеделник",
            DayOfWeek::Tuesday => "Вторник",
            DayOfWeek::Wednesday => "Сряда",
            DayOfWeek::Thursday => "Четвъртък",
            DayOfWeek::Friday => "Петък",
            DayOfWeek::Saturday => "Събота",
            DayOfWeek::Sunday => "Неделя",
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MONDAY" => Ok(DayOfWeek::Monday),
            "TUESDAY" => Ok(DayOfWeek::Tuesday),
            "WEDNESDAY" => Ok(DayOfWeek::Wednesday),
            "THURSDAY" => Ok(DayOfWeek::Thursday),
            "FRIDAY" => Ok(DayOfWeek::Friday),
            "SATURDAY" => Ok(DayOfWeek::Saturday),
            "SUNDAY" => Ok(DayOfWeek::Sunday),
            other => Err(format!("invalid day of week: '{other}'")),
        }
    }
}

/// Display label for a raw day key, falling back to the key itself.
pub fn day_label(raw: &str) -> String {
    raw.parse::<DayOfWeek>()
        .map(|d| d.label().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Presentation metadata for a meal type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealMeta {
    pub label: &'static str,
    pub emoji: &'static str,
    pub time: &'static str,
}

/// Label, emoji and usual time window for a backend meal type.
pub fn meal_meta(meal_type: &str) -> Option<MealMeta> {
    let meta = match meal_type {
        "BREAKFAST" => MealMeta { label: "Закуска", emoji: "🥞", time: "06:00 - 09:00" },
        "LUNCH" => MealMeta { label: "Обяд", emoji: "🍲", time: "12:00 - 14:00" },
        "DINNER" => MealMeta { label: "Вечеря", emoji: "🍛", time: "18:00 - 20:00" },
        "SNACK" => MealMeta { label: "Снак", emoji: "🥜", time: "10:00 - 17:00" },
        _ => return None,
    };
    Some(meta)
}

/// Coarse calorie band used to color meal cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalorieBand {
    Low,
    Moderate,
    High,
}

impl CalorieBand {
    pub fn for_kcal(kcal: f64) -> Self {
        if kcal < 500.0 {
            CalorieBand::Low
        } else if kcal <= 700.0 {
            CalorieBand::Moderate
        } else {
            CalorieBand::High
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default)]
    pub food_item: FoodItem,
    #[serde(default)]
    pub quantity_grams: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

/// A meal within a nutrition plan (daily or weekly).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMeal {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub recipe: Recipe,
    #[serde(default)]
    pub portion_size: f64,
    #[serde(default)]
    pub calculated_calories: f64,
    #[serde(default)]
    pub calculated_protein: f64,
    #[serde(default)]
    pub calculated_carbs: f64,
    #[serde(default)]
    pub calculated_fat: f64,
    #[serde(default)]
    pub has_alternatives: bool,
}

/// Exercise difficulty: either a bare enum name or an object with a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DifficultyLevel {
    Name(String),
    Detailed {
        #[serde(rename = "displayName")]
        display_name: String,
    },
}

impl DifficultyLevel {
    pub fn display(&self) -> &str {
        match self {
            DifficultyLevel::Name(name) => name,
            DifficultyLevel::Detailed { display_name } => display_name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub difficulty_level: Option<DifficultyLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSession {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl TrainingSession {
    pub fn day(&self) -> Option<DayOfWeek> {
        self.day_of_week.parse().ok()
    }
}

/// Combined nutrition + training plan (`FullPlanDTO`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullPlan {
    #[serde(default)]
    pub nutrition_plan_id: Option<i64>,
    #[serde(default)]
    pub goal_name: Option<String>,
    #[serde(default)]
    pub target_calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub carbohydrates: Option<f64>,
    #[serde(default)]
    pub date_generated: Option<String>,
    #[serde(default)]
    pub meals: Vec<PlanMeal>,
    #[serde(default)]
    pub training_plan_id: Option<i64>,
    #[serde(default)]
    pub training_days_per_week: Option<u32>,
    #[serde(default)]
    pub training_duration_minutes: Option<u32>,
    #[serde(default)]
    pub training_sessions: Vec<TrainingSession>,
}

impl FullPlan {
    /// A plan is complete when both halves have been generated.
    pub fn is_complete(&self) -> bool {
        self.nutrition_plan_id.is_some()
            && !self.meals.is_empty()
            && self.training_plan_id.is_some()
            && !self.training_sessions.is_empty()
    }
}

/// One day of a weekly nutrition plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    #[serde(default)]
    pub target_calories: f64,
    #[serde(default)]
    pub meals: Vec<PlanMeal>,
}

/// Weekly nutrition plan. Days keep the order the backend sent them in.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyNutritionPlan {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_ordered_days")]
    pub daily_plans: Vec<(String, DailyPlan)>,
}

fn deserialize_ordered_days<'de, D>(deserializer: D) -> Result<Vec<(String, DailyPlan)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedDays;

    impl<'de> Visitor<'de> for OrderedDays {
        type Value = Vec<(String, DailyPlan)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of day name to daily plan")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut days = Vec::with_capacity(map.size_hint().unwrap_or(7));
            while let Some((day, plan)) = map.next_entry::<String, DailyPlan>()? {
                days.push((day, plan));
            }
            Ok(days)
        }
    }

    deserializer.deserialize_map(OrderedDays)
}

/// `PUT /nutrition-plans/{id}/replace-meal` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceMealRequest {
    pub original_meal_id: i64,
    pub substitute_recipe_id: String,
}

/// Historical nutrition plan with the profile snapshot it was generated from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionPlanRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub date_generated: Option<String>,
    #[serde(default)]
    pub goal_name: Option<String>,
    #[serde(default)]
    pub target_calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub carbohydrates: Option<f64>,
    #[serde(default)]
    pub user_gender_snapshot: Option<String>,
    #[serde(default)]
    pub user_age_snapshot: Option<u32>,
    #[serde(default)]
    pub user_weight_snapshot: Option<f64>,
    #[serde(default)]
    pub user_height_snapshot: Option<f64>,
    #[serde(default)]
    pub user_activity_level_snapshot_name: Option<String>,
    #[serde(default)]
    pub user_diet_type_snapshot_name: Option<String>,
    #[serde(default)]
    pub user_meat_preference_snapshot: Option<String>,
    #[serde(default)]
    pub user_consumes_dairy_snapshot: Option<bool>,
    #[serde(default)]
    pub user_meal_frequency_preference_snapshot: Option<String>,
}

/// Historical training plan with its profile snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingPlanRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub date_generated: Option<String>,
    #[serde(default)]
    pub training_days_per_week: Option<u32>,
    #[serde(default)]
    pub training_duration_minutes: Option<u32>,
    #[serde(default)]
    pub user_gender_snapshot: Option<String>,
    #[serde(default)]
    pub user_age_snapshot: Option<u32>,
    #[serde(default)]
    pub user_weight_snapshot: Option<f64>,
    #[serde(default)]
    pub user_height_snapshot: Option<f64>,
    #[serde(default)]
    pub user_activity_level_snapshot_name: Option<String>,
}

/// `GET /plans/history` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanHistory {
    #[serde(default)]
    pub nutrition_plans: Vec<NutritionPlanRecord>,
    #[serde(default)]
    pub training_plans: Vec<TrainingPlanRecord>,
}

impl PlanHistory {
    pub fn is_empty(&self) -> bool {
        self.nutrition_plans.is_empty() && self.training_plans.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoMeal {
    pub meal: String,
    pub description: String,
}

/// One-day demo menu shown to guests after the wizard completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoPlan {
    pub day: String,
    pub meals: Vec<DemoMeal>,
}

impl DemoPlan {
    /// Built-in menu shown when no generated demo plan is cached.
    pub fn sample() -> Self {
        let meal = |meal: &str, description: &str| DemoMeal {
            meal: meal.to_string(),
            description: description.to_string(),
        };
        Self {
            day: "Понеделник".to_string(),
            meals: vec![
                meal("Закуска", "Овесени ядки с банан и мед"),
                meal("Обяд", "Пилешко филе с кафяв ориз и броколи"),
                meal("Вечеря", "Сьомга на фурна с аспержи"),
            ],
        }
    }
}

/// Plan view tab, persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTab {
    #[default]
    Nutrition,
    Training,
    Weekly,
}

impl fmt::Display for PlanTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanTab::Nutrition => write!(f, "nutrition"),
            PlanTab::Training => write!(f, "training"),
            PlanTab::Weekly => write!(f, "weekly"),
        }
    }
}

impl FromStr for PlanTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nutrition" => Ok(PlanTab::Nutrition),
            "training" => Ok(PlanTab::Training),
            "weekly" => Ok(PlanTab::Weekly),
            other => Err(format!("invalid plan tab: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_plan_json() -> serde_json::Value {
        json!({
            "nutritionPlanId": 1,
            "goalName": "Отслабване",
            "targetCalories": 1800.0,
            "meals": [{"id": 1, "mealType": "BREAKFAST", "recipe": {"name": "Овесена каша"},
                       "portionSize": 1.0, "calculatedCalories": 420.0}],
            "trainingPlanId": 2,
            "trainingSessions": [{"id": 5, "dayOfWeek": "MONDAY", "exercises": []}]
        })
    }

    #[test]
    fn test_full_plan_complete() {
        let plan: FullPlan = serde_json::from_value(complete_plan_json()).unwrap();
        assert!(plan.is_complete());
        assert_eq!(plan.meals[0].recipe.name, "Овесена каша");
    }

    #[test]
    fn test_full_plan_missing_training_is_incomplete() {
        let mut value = complete_plan_json();
        value["trainingSessions"] = json!([]);
        let plan: FullPlan = serde_json::from_value(value).unwrap();
        assert!(!plan.is_complete());
    }

    #[test]
    fn test_weekly_plan_preserves_day_order() {
        let plan: WeeklyNutritionPlan = serde_json::from_str(
            r#"{"id": 9, "dailyPlans": {
                "WEDNESDAY": {"targetCalories": 2000, "meals": []},
                "MONDAY": {"targetCalories": 1900, "meals": []},
                "SUNDAY": {"targetCalories": 2100, "meals": []}
            }}"#,
        )
        .unwrap();
        let days: Vec<&str> = plan.daily_plans.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(days, vec!["WEDNESDAY", "MONDAY", "SUNDAY"]);
    }

    #[test]
    fn test_difficulty_level_forms() {
        let plain: DifficultyLevel = serde_json::from_value(json!("BEGINNER")).unwrap();
        assert_eq!(plain.display(), "BEGINNER");
        let detailed: DifficultyLevel =
            serde_json::from_value(json!({"displayName": "Начинаещ"})).unwrap();
        assert_eq!(detailed.display(), "Начинаещ");
    }

    #[test]
    fn test_day_labels() {
        assert_eq!(day_label("FRIDAY"), "Петък");
        assert_eq!(day_label("HOLIDAY"), "HOLIDAY");
        assert!(DayOfWeek::Monday < DayOfWeek::Sunday);
    }

    #[test]
    fn test_calorie_band_boundaries() {
        assert_eq!(CalorieBand::for_kcal(499.0), CalorieBand::Low);
        assert_eq!(CalorieBand::for_kcal(500.0), CalorieBand::Moderate);
        assert_eq!(CalorieBand::for_kcal(700.0), CalorieBand::Moderate);
        assert_eq!(CalorieBand::for_kcal(700.5), CalorieBand::High);
    }

    #[test]
    fn test_meal_meta() {
        assert_eq!(meal_meta("LUNCH").map(|m| m.label), Some("Обяд"));
        assert!(meal_meta("BRUNCH").is_none());
    }

    #[test]
    fn test_plan_tab_roundtrip() {
        for tab in [PlanTab::Nutrition, PlanTab::Training, PlanTab::Weekly] {
            let parsed: PlanTab = tab.to_string().parse().unwrap();
            assert_eq!(parsed, tab);
        }
        assert_eq!(PlanTab::default(), PlanTab::Nutrition);
    }

    #[test]
    fn test_history_empty() {
        let history: PlanHistory = serde_json::from_value(json!({})).unwrap();
        assert!(history.is_empty());
    }
}
