use std::sync::Arc;

use crate::api::CareNestClient;
use crate::config::AppConfig;
use crate::error::ClientResult;
use crate::session::{self, FileStore, Gate, KeyValueStore, Screen, ScreenSet, Session, SessionManager};

/// Everything a screen needs: configuration, the HTTP client and the session.
///
/// Passed by reference into every screen; the session manager is the only
/// path to the persisted session.
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub client: CareNestClient,
    pub session: SessionManager,
}

impl AppContext {
    pub fn new(config: AppConfig, store: Arc<dyn KeyValueStore>) -> ClientResult<Self> {
        let client = CareNestClient::new(&config)?;
        Ok(Self {
            config,
            client,
            session: SessionManager::new(store),
        })
    }

    /// Context backed by `session.json` in the configured directory.
    pub fn with_file_store(config: AppConfig) -> ClientResult<Self> {
        let dir = session::config_dir(&config)?;
        tracing::debug!(dir = %dir.display(), "using file session store");
        Self::new(config, Arc::new(FileStore::in_dir(dir)))
    }

    pub async fn token(&self) -> ClientResult<String> {
        self.session.access_token().await
    }

    pub async fn current_session(&self) -> Option<Session> {
        self.session.current_session().await
    }

    /// Screen set for the stored session; run before showing anything.
    pub async fn screen_set(&self) -> ScreenSet {
        session::authorize(self.current_session().await.as_ref())
    }

    /// Role check for entering `screen` directly.
    pub async fn enter(&self, screen: Screen) -> Gate {
        let gate = session::enter(self.current_session().await.as_ref(), screen);
        if gate == Gate::RedirectToEntry {
            tracing::debug!(?screen, "role check failed; redirecting to entry");
        }
        gate
    }
}
