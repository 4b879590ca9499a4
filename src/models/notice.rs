use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::nullable_string")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Notice {
    pub fn created_display(&self) -> String {
        self.created_at
            .as_deref()
            .map(super::display_date)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewNotice {
    pub message: String,
}

impl NewNotice {
    pub const REQUIRED_MESSAGE: &'static str = "Please enter a notice.";

    pub fn validate(&self) -> ClientResult<()> {
        if self.message.trim().is_empty() {
            return Err(ClientError::validation("message", Self::REQUIRED_MESSAGE));
        }
        Ok(())
    }
}
