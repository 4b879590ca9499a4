use serde::{Serialize, Serializer};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{ClientError, ClientResult};

/// What a screen is showing. Data and an error can never be present together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(#[serde(serialize_with = "as_user_message")] ClientError),
}

fn as_user_message<S: Serializer>(err: &ClientError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&err.user_message())
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn from_result(result: ClientResult<T>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(e) => LoadState::Failed(e),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Alert raised by an action, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
}

impl Alert {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            is_error: false,
            error_code: None,
        }
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            is_error: true,
            error_code: None,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.error_code = Some(code);
        self
    }

    pub fn from_error(err: &ClientError) -> Self {
        Self::failure("Error", err.user_message()).with_code(err.error_code())
    }
}

/// Result of invoking an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Submission<T> {
    /// Another invocation of the same action was still outstanding; nothing happened.
    Busy,
    Done(T),
}

impl<T> Submission<T> {
    pub fn done(self) -> Option<T> {
        match self {
            Submission::Done(value) => Some(value),
            Submission::Busy => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Submission::Busy)
    }
}

/// Disables an action while one invocation is in flight.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    busy: Arc<AtomicBool>,
}

/// Held for the duration of one invocation; dropping it re-enables the action
/// on every exit path.
#[derive(Debug)]
pub struct SubmitTicket {
    busy: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn try_begin(&self) -> Option<SubmitTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitTicket {
                busy: Arc::clone(&self.busy),
            })
    }
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Form contents that can check their own required fields.
pub trait Draft: Clone + Default + Send {
    fn validate(&self) -> ClientResult<()>;
}

/// A create form: the draft being edited plus its submit guard.
#[derive(Debug, Default)]
pub struct DraftForm<D> {
    draft: Mutex<D>,
    guard: SubmitGuard,
}

impl<D: Draft> DraftForm<D> {
    pub fn new(draft: D) -> Self {
        Self {
            draft: Mutex::new(draft),
            guard: SubmitGuard::default(),
        }
    }

    pub async fn draft(&self) -> D {
        self.draft.lock().await.clone()
    }

    pub async fn update<F: FnOnce(&mut D)>(&self, edit: F) {
        edit(&mut *self.draft.lock().await);
    }

    pub fn is_submitting(&self) -> bool {
        self.guard.is_busy()
    }

    /// Validate, then send. Fields reset to empty only on success.
    ///
    /// A validation failure returns its alert without calling `send`.
    pub(crate) async fn submit_with<F, Fut>(&self, success: Alert, send: F) -> Submission<Alert>
    where
        F: FnOnce(D) -> Fut,
        Fut: Future<Output = ClientResult<()>>,
    {
        let Some(_ticket) = self.guard.try_begin() else {
            return Submission::Busy;
        };

        let draft = self.draft().await;
        if let Err(e) = draft.validate() {
            return Submission::Done(Alert::from_error(&e));
        }

        match send(draft).await {
            Ok(()) => {
                *self.draft.lock().await = D::default();
                Submission::Done(success)
            }
            Err(e) => {
                tracing::debug!("submission failed: {}", e);
                Submission::Done(Alert::from_error(&e))
            }
        }
    }
}
