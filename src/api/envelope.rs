//! The `{ success, message, data }` wrapper every CareNest response uses.
//!
//! Payload placement is not uniform: most lists sit under `data`, children
//! under `data.children`, employees at top-level `employees`, and resolved
//! file URLs at top-level `signedUrl`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A payload that may be a single object or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl ApiEnvelope {
    /// Turn `success: false` into an API error carrying the server's message,
    /// or `fallback` when it sent none.
    pub fn ensure_success(self, status: u16, fallback: &str) -> ClientResult<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(ClientError::api(
                status,
                self.message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }

    /// Decode `data`.
    pub fn data<T: DeserializeOwned>(&self) -> ClientResult<T> {
        let value = self
            .data
            .clone()
            .ok_or_else(|| ClientError::Decode("response has no 'data' field".to_string()))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Decode `data.<key>`.
    pub fn data_field<T: DeserializeOwned>(&self, key: &str) -> ClientResult<T> {
        let value = self
            .data
            .as_ref()
            .and_then(|d| d.get(key))
            .cloned()
            .ok_or_else(|| ClientError::Decode(format!("response has no 'data.{}' field", key)))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Decode a top-level field other than `success`/`message`/`data`.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> ClientResult<T> {
        let value = self
            .extra
            .get(key)
            .cloned()
            .ok_or_else(|| ClientError::Decode(format!("response has no '{}' field", key)))?;
        Ok(serde_json::from_value(value)?)
    }

    /// `data` as a list, accepting a single object or `null` (empty).
    pub fn data_list<T: DeserializeOwned>(&self) -> ClientResult<Vec<T>> {
        match &self.data {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => {
                let items: OneOrMany<T> = serde_json::from_value(value.clone())?;
                Ok(items.into_vec())
            }
        }
    }
}

/// Best-effort message for a failed response body that is not an envelope.
///
/// The sign-in endpoint answers a wrong password with an HTML page.
pub fn message_from_body(body: &str) -> Option<String> {
    if let Ok(envelope) = serde_json::from_str::<ApiEnvelope>(body) {
        return envelope.message.filter(|m| !m.is_empty());
    }
    if body.contains("Password is incorrect") {
        return Some("Password is incorrect!".to_string());
    }
    None
}
