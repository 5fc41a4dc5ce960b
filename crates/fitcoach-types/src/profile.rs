//! User profile and progress-tracking types.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Мъж",
            Gender::Female => "Жена",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MALE" | "М" | "МЪЖ" => Ok(Gender::Male),
            "FEMALE" | "Ж" | "ЖЕНА" => Ok(Gender::Female),
            other => Err(format!("invalid gender: '{other}'")),
        }
    }
}

/// Body metrics kept on the backend profile (`/users/me/profile`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

/// Partial profile edit. Only fields that are `Some` replace current values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
}

impl UserProfile {
    pub fn apply(&mut self, update: ProfileUpdate) {
        if update.weight.is_some() {
            self.weight = update.weight;
        }
        if update.height.is_some() {
            self.height = update.height;
        }
        if update.age.is_some() {
            self.age = update.age;
        }
        if update.gender.is_some() {
            self.gender = update.gender;
        }
    }
}

/// One manually recorded progress point. `date` is a short `dd.mm` label.
///
/// Entries added by the user carry only the metric that was entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
}

impl ProgressEntry {
    /// An entry recording a single metric.
    pub fn single(date: impl Into<String>, metric: Metric, value: f64) -> Self {
        let mut entry = Self {
            date: date.into(),
            weight: None,
            calories: None,
            body_fat: None,
        };
        match metric {
            Metric::Weight => entry.weight = Some(value),
            Metric::Calories => entry.calories = Some(value),
            Metric::BodyFat => entry.body_fat = Some(value),
        }
        entry
    }

    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Weight => self.weight,
            Metric::Calories => self.calories,
            Metric::BodyFat => self.body_fat,
        }
    }
}

/// The metric plotted on the progress chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Weight,
    #[default]
    Calories,
    BodyFat,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Weight => "Тегло (kg)",
            Metric::Calories => "Калории",
            Metric::BodyFat => "% Мазнини",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Weight => write!(f, "weight"),
            Metric::Calories => write!(f, "calories"),
            Metric::BodyFat => write!(f, "bodyFat"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weight" => Ok(Metric::Weight),
            "calories" => Ok(Metric::Calories),
            "bodyfat" | "body-fat" | "body_fat" => Ok(Metric::BodyFat),
            other => Err(format!("invalid metric: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_gender_uppercase() {
        let profile: UserProfile = serde_json::from_value(json!({
            "weight": 72.5, "height": 180, "age": 31, "gender": "MALE"
        }))
        .unwrap();
        assert_eq!(profile.gender, Some(Gender::Male));
        assert_eq!(profile.height, Some(180.0));
    }

    #[test]
    fn test_profile_apply_keeps_untouched_fields() {
        let mut profile = UserProfile {
            weight: Some(80.0),
            height: Some(175.0),
            age: Some(40),
            gender: Some(Gender::Female),
        };
        profile.apply(ProfileUpdate {
            weight: Some(78.0),
            ..Default::default()
        });
        assert_eq!(profile.weight, Some(78.0));
        assert_eq!(profile.height, Some(175.0));
        assert_eq!(profile.gender, Some(Gender::Female));
    }

    #[test]
    fn test_metric_parse_and_label() {
        assert_eq!("bodyFat".parse::<Metric>().unwrap(), Metric::BodyFat);
        assert_eq!(Metric::Calories.label(), "Калории");
        assert_eq!(serde_json::to_string(&Metric::BodyFat).unwrap(), "\"bodyFat\"");
    }

    #[test]
    fn test_single_metric_entry() {
        let entry = ProgressEntry::single("01.03", Metric::BodyFat, 18.0);
        assert_eq!(entry.value(Metric::BodyFat), Some(18.0));
        assert_eq!(entry.value(Metric::Weight), None);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["bodyFat"], 18.0);
        assert!(value.get("weight").is_none());
    }
}
