use serde::Serialize;
use std::sync::Arc;

use super::store::KeyValueStore;
use crate::api::CareNestClient;
use crate::error::{ClientError, ClientResult, GENERIC_FAILURE};
use crate::models::{Role, User};

pub const ACCESS_TOKEN_KEY: &str = "authToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// The local record of an authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: User,
}

/// Owns the three persisted session entries.
///
/// Sign-in and sign-out are the only writers; everything else reads.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Authenticate and persist the session.
    ///
    /// On failure any previous session survives intact.
    pub async fn sign_in(
        &self,
        client: &CareNestClient,
        identifier: &str,
        secret: &str,
    ) -> ClientResult<Session> {
        if identifier.is_empty() {
            return Err(ClientError::validation("uniqueIdNumber", "Please fill in all fields"));
        }
        if secret.is_empty() {
            return Err(ClientError::validation("password", "Please fill in all fields"));
        }

        let payload = client
            .sign_in(identifier, secret)
            .await
            .map_err(|e| match e {
                ClientError::Api { .. } => e,
                other => {
                    tracing::warn!("sign-in failed: {}", other);
                    ClientError::Transport(GENERIC_FAILURE.to_string())
                }
            })?;

        let user: User = serde_json::from_value(payload.user.clone())
            .map_err(|e| ClientError::Decode(format!("user record: {}", e)))?;
        if payload.access_token.is_empty() {
            return Err(ClientError::Decode("sign-in returned an empty access token".to_string()));
        }

        if let Role::Other(raw) = &user.role {
            if raw.eq_ignore_ascii_case("admin") || raw.eq_ignore_ascii_case("employee") {
                tracing::warn!(role = %raw, "role differs from a known role only by case; routing to entry");
            }
        }

        let user_record = serde_json::to_string(&payload.user)?;
        self.replace_all(&[
            (ACCESS_TOKEN_KEY, payload.access_token.as_str()),
            (REFRESH_TOKEN_KEY, payload.refresh_token.as_str()),
            (USER_KEY, user_record.as_str()),
        ])
        .await?;

        tracing::info!(role = %user.role, "signed in");

        Ok(Session {
            access_token: payload.access_token,
            refresh_token: Some(payload.refresh_token).filter(|t| !t.is_empty()),
            user,
        })
    }

    /// Write every entry or, on failure, put back the ones already written.
    ///
    /// If the rollback itself fails all three entries are cleared so a new
    /// token is never left paired with an older user record.
    async fn replace_all(&self, entries: &[(&str, &str)]) -> ClientResult<()> {
        let mut prior = Vec::with_capacity(entries.len());
        for (key, _) in entries {
            prior.push((*key, self.store.get(key).await?));
        }

        for (written, (key, value)) in entries.iter().enumerate() {
            if let Err(e) = self.store.set(key, value).await {
                tracing::warn!(key, "failed to persist session entry: {}", e);
                if !self.restore(&prior[..written]).await {
                    self.clear_all().await;
                }
                return Err(e);
            }
        }
        Ok(())
    }

    async fn restore(&self, prior: &[(&str, Option<String>)]) -> bool {
        let mut intact = true;
        for (key, value) in prior {
            let result = match value {
                Some(value) => self.store.set(key, value).await,
                None => self.store.remove(key).await,
            };
            if let Err(e) = result {
                tracing::warn!(key, "failed to restore session entry: {}", e);
                intact = false;
            }
        }
        intact
    }

    async fn clear_all(&self) {
        for key in [USER_KEY, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.store.remove(key).await {
                tracing::warn!(key, "failed to clear session entry: {}", e);
            }
        }
    }

    /// The persisted session, or `None` when there is none or it cannot be read.
    ///
    /// A token without a well-formed user record counts as no session.
    pub async fn current_session(&self) -> Option<Session> {
        match self.load().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("treating unreadable session as signed out: {}", e);
                None
            }
        }
    }

    async fn load(&self) -> ClientResult<Option<Session>> {
        let access_token = match self.store.get(ACCESS_TOKEN_KEY).await? {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(None),
        };
        let raw_user = match self.store.get(USER_KEY).await? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let user: User = serde_json::from_str(&raw_user)?;
        let refresh_token = self
            .store
            .get(REFRESH_TOKEN_KEY)
            .await?
            .filter(|t| !t.is_empty());

        Ok(Some(Session {
            access_token,
            refresh_token,
            user,
        }))
    }

    /// Bearer token for an authenticated request.
    pub async fn access_token(&self) -> ClientResult<String> {
        match self.store.get(ACCESS_TOKEN_KEY).await {
            Ok(Some(token)) if !token.is_empty() => Ok(token),
            Ok(_) => Err(ClientError::missing_token()),
            Err(e) => {
                tracing::warn!("could not read access token: {}", e);
                Err(ClientError::missing_token())
            }
        }
    }

    /// Remove all three entries. Every removal is attempted; absent entries
    /// are not an error.
    pub async fn sign_out(&self) -> ClientResult<()> {
        let mut first_error = None;
        for key in [USER_KEY, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.store.remove(key).await {
                tracing::warn!(key, "failed to clear session entry: {}", e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => {
                tracing::info!("signed out");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;

    async fn manager_with(entries: &[(&str, &str)]) -> SessionManager {
        let store = Arc::new(MemoryStore::new());
        for (k, v) in entries {
            store.set(k, v).await.unwrap();
        }
        SessionManager::new(store)
    }

    #[tokio::test]
    async fn reads_a_complete_session() {
        let manager = manager_with(&[
            (ACCESS_TOKEN_KEY, "a"),
            (REFRESH_TOKEN_KEY, "r"),
            (USER_KEY, r#"{"role":"Admin","name":"Priya"}"#),
        ])
        .await;

        let session = manager.current_session().await.unwrap();
        assert_eq!(session.user.role, Role::Admin);
        assert_eq!(session.refresh_token.as_deref(), Some("r"));
        assert_eq!(manager.access_token().await.unwrap(), "a");
    }

    #[tokio::test]
    async fn token_with_malformed_user_is_absent() {
        for user in ["not json", r#"{"name":"no role"}"#, "[]"] {
            let manager = manager_with(&[(ACCESS_TOKEN_KEY, "a"), (USER_KEY, user)]).await;
            assert!(manager.current_session().await.is_none(), "user {:?}", user);
        }
        let manager = manager_with(&[(ACCESS_TOKEN_KEY, "a")]).await;
        assert!(manager.current_session().await.is_none());
    }

    #[tokio::test]
    async fn user_without_token_is_absent() {
        let manager = manager_with(&[(USER_KEY, r#"{"role":"Employee"}"#)]).await;
        assert!(manager.current_session().await.is_none());
        assert_eq!(
            manager.access_token().await.unwrap_err(),
            ClientError::missing_token()
        );
    }

    /// Fails every `set` on one key while `armed`.
    struct FailingSet {
        inner: MemoryStore,
        key: &'static str,
        armed: std::sync::atomic::AtomicBool,
    }

    #[async_trait::async_trait]
    impl KeyValueStore for FailingSet {
        async fn get(&self, key: &str) -> ClientResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> ClientResult<()> {
            if key == self.key && self.armed.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(ClientError::Storage("disk full".to_string()));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> ClientResult<()> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn failed_write_rolls_back_earlier_entries() {
        let store = Arc::new(FailingSet {
            inner: MemoryStore::new(),
            key: USER_KEY,
            armed: false.into(),
        });
        let manager = SessionManager::new(store.clone());
        manager
            .replace_all(&[
                (ACCESS_TOKEN_KEY, "old"),
                (USER_KEY, r#"{"role":"Admin"}"#),
            ])
            .await
            .unwrap();

        store.armed.store(true, std::sync::atomic::Ordering::SeqCst);
        let err = manager
            .replace_all(&[
                (ACCESS_TOKEN_KEY, "new"),
                (REFRESH_TOKEN_KEY, "new-refresh"),
                (USER_KEY, r#"{"role":"Employee"}"#),
            ])
            .await
            .unwrap_err();

        assert_eq!(err, ClientError::Storage("disk full".to_string()));
        let session = manager.current_session().await.unwrap();
        assert_eq!(session.access_token, "old");
        assert_eq!(session.refresh_token, None);
        assert_eq!(session.user.role, Role::Admin);
    }

    #[tokio::test]
    async fn sign_out_clears_everything_even_when_partly_absent() {
        let manager = manager_with(&[(USER_KEY, r#"{"role":"Employee"}"#)]).await;
        manager.sign_out().await.unwrap();
        manager.sign_out().await.unwrap();

        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            assert_eq!(manager.store().get(key).await.unwrap(), None);
        }
    }
}
