// Client error taxonomy
use thiserror::Error;

/// Message shown when a failure carries nothing more specific.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Everything a screen or command can fail with.
///
/// None of these are fatal: a screen that receives one moves to a stable
/// state (usually `LoadState::Failed`) and re-enables its controls.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    /// No stored token (or user record) when the operation requires one.
    #[error("{0}")]
    MissingCredentials(String),

    /// A required form field was empty; no request was issued.
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    /// The server answered but reported failure (`success: false` or a non-2xx
    /// status with a JSON envelope). `message` is the server's text verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Connection, timeout or TLS failure.
    #[error("Network error: {0}")]
    Transport(String),

    /// Response did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Local session storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn missing_token() -> Self {
        ClientError::MissingCredentials("Authentication token missing.".to_string())
    }

    pub fn missing_token_or_user() -> Self {
        ClientError::MissingCredentials("Authentication token or user data missing.".to_string())
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ClientError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
        }
    }

    /// Text suitable for an alert or an inline error line.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::MissingCredentials(msg) => msg.clone(),
            ClientError::Validation { message, .. } => message.clone(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Transport(msg) => msg.clone(),
            ClientError::Decode(_) | ClientError::Storage(_) | ClientError::Config(_) => {
                self.to_string()
            }
        }
    }

    /// Stable code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::MissingCredentials(_) => "MISSING_CREDENTIALS",
            ClientError::Validation { .. } => "VALIDATION_ERROR",
            ClientError::Api { .. } => "API_ERROR",
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::Storage(_) => "STORAGE_ERROR",
            ClientError::Config(_) => "CONFIG_ERROR",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Transport("Request timed out".to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Config(format!("invalid base URL: {}", err))
    }
}
