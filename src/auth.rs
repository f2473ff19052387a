//! Authentication seam. The shell ships a mock backend that accepts any
//! credentials after a fixed delay.
use crate::config::{Config, DemoProfile};
use crate::model::UserProfile;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("authentication backend unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserProfile, AuthError>;
}

/// Accepts every credential pair. Waits `latency`, then returns the demo
/// profile carrying the submitted email. The password is never looked at.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    latency: Duration,
    profile: DemoProfile,
}

impl MockAuthenticator {
    pub fn new(latency: Duration, profile: DemoProfile) -> Self {
        Self { latency, profile }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.login_latency(), cfg.auth.demo_profile.clone())
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    #[instrument(skip_all)]
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserProfile, AuthError> {
        tokio::time::sleep(self.latency).await;
        debug!(email = %credentials.email, "mock authentication accepted");
        Ok(UserProfile {
            id: self.profile.id.clone(),
            name: self.profile.name.clone(),
            email: credentials.email.clone(),
            company: self.profile.company.clone(),
            role: self.profile.role.clone(),
        })
    }
}
