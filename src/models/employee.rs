use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id_number: Option<String>,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub email: String,
    #[serde(
        rename = "phone_no",
        default,
        deserialize_with = "super::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphanage_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Add-employee form contents. Every text field is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub orphanage_location: String,
    pub image: Option<PathBuf>,
}

impl NewEmployee {
    pub const REQUIRED_MESSAGE: &'static str = "Please fill in all fields.";

    pub fn validate(&self) -> ClientResult<()> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone_no", &self.phone),
            ("orphanageLocation", &self.orphanage_location),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(ClientError::validation(field, Self::REQUIRED_MESSAGE));
            }
        }
        Ok(())
    }

    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("phone_no", self.phone.clone()),
            ("orphanageLocation", self.orphanage_location.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_phone_fails_validation() {
        let draft = NewEmployee {
            name: "Kiran".into(),
            email: "kiran@example.org".into(),
            orphanage_location: "2".into(),
            ..Default::default()
        };
        match draft.validate() {
            Err(ClientError::Validation { field, .. }) => assert_eq!(field, "phone_no"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn phone_is_sent_as_phone_no() {
        let draft = NewEmployee {
            phone: "555".into(),
            ..Default::default()
        };
        assert!(draft
            .form_fields()
            .iter()
            .any(|(k, v)| *k == "phone_no" && v == "555"));
    }
}
