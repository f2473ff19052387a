//! Session gate: decides from persisted entries whether protected views are
//! reachable, and mediates login/logout.
//!
//! The session is authenticated iff both the token entry and a parseable user
//! entry exist. The token value itself is never checked.
use crate::auth::{AuthError, Authenticator, Credentials};
use crate::config::Session as SessionKeys;
use crate::db::{LocalStorage, StorageError};
use crate::model::UserProfile;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to serialize user profile: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Snapshot of the gate's observable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    pub user: Option<UserProfile>,
}

pub struct SessionGate {
    storage: Arc<dyn LocalStorage>,
    authenticator: Arc<dyn Authenticator>,
    keys: SessionKeys,
    session: Session,
    loading: bool,
}

impl SessionGate {
    /// A gate in its initial state: anonymous and still loading until
    /// [`SessionGate::restore`] runs.
    pub fn new(
        storage: Arc<dyn LocalStorage>,
        authenticator: Arc<dyn Authenticator>,
        keys: SessionKeys,
    ) -> Self {
        Self {
            storage,
            authenticator,
            keys,
            session: Session::default(),
            loading: true,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Rebuild the session from local storage. Runs once at startup.
    ///
    /// A user entry that does not parse fails closed: the session stays
    /// anonymous and both entries are dropped.
    #[instrument(skip_all)]
    pub async fn restore(&mut self) -> Result<&Session, SessionError> {
        let result = self.read_persisted().await;
        self.loading = false;
        let restored = result?;
        self.session = match restored {
            Some(user) => {
                info!(email = %user.email, "restored session");
                Session {
                    is_authenticated: true,
                    user: Some(user),
                }
            }
            None => Session::default(),
        };
        Ok(&self.session)
    }

    async fn read_persisted(&self) -> Result<Option<UserProfile>, SessionError> {
        let token = self.storage.get_item(&self.keys.token_key).await?;
        let user = self.storage.get_item(&self.keys.user_key).await?;
        let (Some(token), Some(user)) = (token, user) else {
            return Ok(None);
        };
        if token.is_empty() || user.is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<UserProfile>(&user) {
            Ok(profile) => Ok(Some(profile)),
            Err(err) => {
                warn!(?err, "stored user entry is malformed; clearing session");
                self.clear_persisted().await?;
                Ok(None)
            }
        }
    }

    /// Authenticate, persist token and profile, then flip to authenticated.
    ///
    /// Nothing changes in memory until the authenticator resolves and both
    /// entries are written; dropping the returned future earlier leaves the
    /// gate anonymous.
    #[instrument(skip_all)]
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<&UserProfile, SessionError> {
        let credentials = Credentials::new(email, password);
        let profile = match self.authenticator.authenticate(&credentials).await {
            Ok(profile) => profile,
            Err(err) => {
                warn!(%err, "login rejected");
                return Err(err.into());
            }
        };

        let encoded = serde_json::to_string(&profile)?;
        self.storage
            .set_items(&[
                (self.keys.token_key.as_str(), self.keys.token_value.as_str()),
                (self.keys.user_key.as_str(), encoded.as_str()),
            ])
            .await?;

        info!(email = %profile.email, "logged in");
        self.session.is_authenticated = true;
        Ok(self.session.user.insert(profile))
    }

    /// Drop both entries and return to anonymous. In-memory state is reset
    /// even when storage fails.
    #[instrument(skip_all)]
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.session = Session::default();
        self.clear_persisted().await?;
        info!("logged out");
        Ok(())
    }

    async fn clear_persisted(&self) -> Result<(), StorageError> {
        self.storage
            .remove_items(&[self.keys.token_key.as_str(), self.keys.user_key.as_str()])
            .await
    }
}
