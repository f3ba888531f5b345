//! Session identity shared by every page.
//!
//! The identity is written once, by a successful onboarding submission, and
//! read by every page handler. Its absence is the only gate for "complete
//! onboarding first".

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::api::UserId;
use crate::error::SessionError;
use crate::wizard::OnboardingPayload;

/// The onboarded user: server id plus the profile they submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    #[serde(flatten)]
    pub profile: OnboardingPayload,
}

/// Cheaply cloneable handle to the session identity.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Arc<RwLock<Option<SessionUser>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that already knows its user.
    pub fn with_user(user: SessionUser) -> Self {
        Self {
            user: Arc::new(RwLock::new(Some(user))),
        }
    }

    /// The current user, or [`SessionError::OnboardingRequired`].
    pub async fn require(&self) -> Result<SessionUser, SessionError> {
        self.user
            .read()
            .await
            .clone()
            .ok_or(SessionError::OnboardingRequired)
    }

    pub async fn current(&self) -> Option<SessionUser> {
        self.user.read().await.clone()
    }

    pub async fn is_established(&self) -> bool {
        self.user.read().await.is_some()
    }

    /// Replace the identity.
    pub async fn establish(&self, user: SessionUser) {
        tracing::info!(user_id = %user.id, "Session established");
        *self.user.write().await = Some(user);
    }

    pub async fn clear(&self) {
        *self.user.write().await = None;
    }
}
