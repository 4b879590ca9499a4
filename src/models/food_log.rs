use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLog {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub meal_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_photo: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_count")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_by: Option<LoggedBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphanage_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_logged: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedBy {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub email: String,
}

impl FoodLog {
    /// Zero or missing servings display as one.
    pub fn servings_or_default(&self) -> u32 {
        match self.servings {
            Some(n) if n > 0 => n,
            _ => 1,
        }
    }

    pub fn logged_by_name(&self) -> &str {
        self.logged_by
            .as_ref()
            .map(|by| by.name.as_str())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snacks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snacks => "Snacks",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealType::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown meal type '{}' (expected one of: Breakfast, Lunch, Dinner, Snacks)",
                    s
                )
            })
    }
}

/// Meal-log form contents. Meal, servings and photo are all required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewFoodLog {
    pub meal_type: Option<MealType>,
    pub servings: String,
    pub image: Option<PathBuf>,
}

impl NewFoodLog {
    pub const REQUIRED_MESSAGE: &'static str = "Please fill in all fields and capture an image.";

    pub fn validate(&self) -> ClientResult<()> {
        if self.meal_type.is_none() {
            return Err(ClientError::validation("mealType", Self::REQUIRED_MESSAGE));
        }
        if self.servings.is_empty() {
            return Err(ClientError::validation("servings", Self::REQUIRED_MESSAGE));
        }
        if self.image.is_none() {
            return Err(ClientError::validation("foodImage", Self::REQUIRED_MESSAGE));
        }
        Ok(())
    }

    /// Text fields; the location comes from the signed-in user.
    pub fn form_fields(&self, orphanage_location: &str) -> Vec<(&'static str, String)> {
        vec![
            (
                "mealType",
                self.meal_type.map(|m| m.as_str().to_string()).unwrap_or_default(),
            ),
            ("orphanageLocation", orphanage_location.to_string()),
            ("servings", self.servings.clone()),
        ]
    }
}
