use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use url::Url;

use super::endpoints::Endpoint;
use super::envelope::{self, ApiEnvelope};
use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AttendanceRecord, Child, Employee, FoodLog, NewChild, NewEmployee, NewFoodLog, NewNotice,
    Notice,
};

/// Successful sign-in payload. `user` is kept verbatim so the stored record
/// matches what the server sent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInPayload {
    pub access_token: String,
    pub refresh_token: String,
    pub user: Value,
}

enum Body {
    Empty,
    Json(Value),
    Multipart(Form),
}

/// HTTP client for the CareNest REST API.
///
/// Holds no session state: every authenticated call takes the bearer token
/// read from the session store by the caller.
#[derive(Debug, Clone)]
pub struct CareNestClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CareNestClient {
    pub fn new(config: &AppConfig) -> ClientResult<Self> {
        let mut raw = config.api.base_url.trim().to_string();
        // Url::join replaces the last segment unless the base ends in '/'.
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.api.user_agent.clone())
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint) -> ClientResult<Url> {
        Ok(self.base_url.join(endpoint.path())?)
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        token: Option<&str>,
        body: Body,
        fallback: &str,
    ) -> ClientResult<ApiEnvelope> {
        let url = self.url(endpoint)?;
        let mut request = self.http.request(endpoint.method(), url);

        if endpoint.requires_auth() {
            let token = token.ok_or_else(ClientError::missing_token)?;
            request = request.bearer_auth(token);
        }

        request = match body {
            Body::Empty => request,
            Body::Json(value) => request.json(&value),
            Body::Multipart(form) => request.multipart(form),
        };

        tracing::debug!(endpoint = endpoint.path(), method = %endpoint.method(), "sending request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(endpoint = endpoint.path(), status = status.as_u16(), "request failed");
            return Err(match envelope::message_from_body(&text) {
                Some(message) => ClientError::api(status.as_u16(), message),
                None => ClientError::Transport(format!(
                    "Request failed with status code {}",
                    status.as_u16()
                )),
            });
        }

        let envelope: ApiEnvelope = serde_json::from_str(&text)?;
        envelope.ensure_success(status.as_u16(), fallback)
    }

    pub async fn sign_in(&self, unique_id_number: &str, password: &str) -> ClientResult<SignInPayload> {
        let body = json!({
            "uniqueIdNumber": unique_id_number,
            "password": password,
        });
        self.send(Endpoint::SignIn, None, Body::Json(body), "Unknown error")
            .await?
            .data()
    }

    /// Every child at every location; both screen sets read this listing.
    pub async fn list_children(&self, token: &str) -> ClientResult<Vec<Child>> {
        self.send(Endpoint::AdminChildren, Some(token), Body::Empty, "Failed to fetch children.")
            .await?
            .data_field("children")
    }

    pub async fn add_child(&self, token: &str, draft: &NewChild) -> ClientResult<()> {
        let form = build_form(draft.form_fields(), "profileImage", draft.image.as_deref()).await?;
        self.send(Endpoint::AddChild, Some(token), Body::Multipart(form), "Failed to add child.")
            .await?;
        Ok(())
    }

    /// Submit today's absentee list.
    pub async fn submit_child_log(&self, token: &str, absentees: &[String]) -> ClientResult<()> {
        let body = json!({ "absentees": absentees });
        self.send(Endpoint::ChildLog, Some(token), Body::Json(body), "Failed to submit child log.")
            .await?;
        Ok(())
    }

    pub async fn list_employees(&self, token: &str) -> ClientResult<Vec<Employee>> {
        self.send(Endpoint::Employees, Some(token), Body::Empty, "Failed to fetch employees.")
            .await?
            .field("employees")
    }

    pub async fn add_employee(&self, token: &str, draft: &NewEmployee) -> ClientResult<()> {
        let form = build_form(draft.form_fields(), "profileImage", draft.image.as_deref()).await?;
        self.send(Endpoint::AddEmployee, Some(token), Body::Multipart(form), "Failed to add employee.")
            .await?;
        Ok(())
    }

    /// Exchange a stored object reference for a time-limited display URL.
    pub async fn resolve_file_url(&self, token: &str, object_ref: &str, fallback: &str) -> ClientResult<String> {
        let body = json!({ "objectUrl": object_ref });
        let envelope = self
            .send(Endpoint::GetFile, Some(token), Body::Json(body), fallback)
            .await?;
        match envelope.field::<String>("signedUrl") {
            Ok(url) if !url.is_empty() => Ok(url),
            _ => Err(ClientError::api(200, envelope.message.unwrap_or_else(|| fallback.to_string()))),
        }
    }

    pub async fn add_notice(&self, token: &str, draft: &NewNotice) -> ClientResult<()> {
        let body = json!({ "message": draft.message });
        self.send(Endpoint::AddNotice, Some(token), Body::Json(body), "Failed to add notice.")
            .await?;
        Ok(())
    }

    pub async fn list_notices(&self, token: &str) -> ClientResult<Vec<Notice>> {
        self.send(Endpoint::Notices, Some(token), Body::Empty, "Failed to fetch notices.")
            .await?
            .data_list()
    }

    pub async fn latest_notices(&self, token: &str) -> ClientResult<Vec<Notice>> {
        self.send(Endpoint::LatestNotice, Some(token), Body::Empty, "Failed to fetch notices.")
            .await?
            .data_list()
    }

    pub async fn add_food_log(&self, token: &str, draft: &NewFoodLog, orphanage_location: &str) -> ClientResult<()> {
        let form = build_form(
            draft.form_fields(orphanage_location),
            "foodImage",
            draft.image.as_deref(),
        )
        .await?;
        self.send(Endpoint::AddFoodLog, Some(token), Body::Multipart(form), "Failed to save meal log.")
            .await?;
        Ok(())
    }

    pub async fn list_food_logs(&self, token: &str) -> ClientResult<Vec<FoodLog>> {
        self.send(Endpoint::FoodLogs, Some(token), Body::Empty, "Failed to fetch food logs.")
            .await?
            .data_list()
    }

    pub async fn list_attendance(&self, token: &str) -> ClientResult<Vec<AttendanceRecord>> {
        self.send(
            Endpoint::EmployeeAttendance,
            Some(token),
            Body::Empty,
            "Failed to fetch attendance records.",
        )
        .await?
        .data_list()
    }

    pub async fn check_in(&self, token: &str) -> ClientResult<()> {
        self.send(Endpoint::CheckIn, Some(token), Body::Json(json!({})), "Failed to check in/out.")
            .await?;
        Ok(())
    }

    pub async fn check_out(&self, token: &str) -> ClientResult<()> {
        self.send(Endpoint::CheckOut, Some(token), Body::Json(json!({})), "Failed to check in/out.")
            .await?;
        Ok(())
    }
}

/// Multipart body with text fields and an optional JPEG attachment.
///
/// An image path that does not exist is skipped and the form is sent without it.
async fn build_form(
    fields: Vec<(&'static str, String)>,
    image_field: &'static str,
    image: Option<&Path>,
) -> ClientResult<Form> {
    let mut form = Form::new();
    for (name, value) in fields {
        form = form.text(name, value);
    }

    if let Some(path) = image {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image.jpg".to_string());
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str("image/jpeg")
                    .map_err(|e| ClientError::Decode(e.to_string()))?;
                form = form.part(image_field, part);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "skipping unreadable image: {}", e);
            }
        }
    }

    Ok(form)
}
