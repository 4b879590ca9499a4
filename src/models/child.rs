use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub dob: String,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub gender: String,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub education_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphanage_location: Option<String>,
}

impl Child {
    pub fn birth_date(&self) -> Option<NaiveDate> {
        super::parse_date(&self.dob)
    }

    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.birth_date()
            .and_then(|birth| super::age_between(birth, today))
    }
}

/// Add-child form contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewChild {
    pub name: String,
    /// Entered as `DD/MM/YYYY`; sent as typed.
    pub dob: String,
    pub gender: String,
    pub orphanage_location: String,
    pub education_level: String,
    pub disability: String,
    pub image: Option<PathBuf>,
}

impl NewChild {
    pub const REQUIRED_MESSAGE: &'static str = "Please fill in all required fields.";

    pub fn validate(&self) -> ClientResult<()> {
        let required = [
            ("name", &self.name),
            ("dob", &self.dob),
            ("gender", &self.gender),
            ("orphanageLocation", &self.orphanage_location),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(ClientError::validation(field, Self::REQUIRED_MESSAGE));
            }
        }
        Ok(())
    }

    /// Text fields in submission order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("dob", self.dob.clone()),
            ("gender", self.gender.clone()),
            ("orphanageLocation", self.orphanage_location.clone()),
            ("educationLevel", self.education_level.clone()),
            ("disability", self.disability.clone()),
        ]
    }
}
