//! Signed-in admin session.
//!
//! The token comes from the login flow and is handed to the HTTP client
//! wrapper explicitly. `init` and `clear` are the only ways it changes.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::http::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    user: Option<SessionUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Token cannot be empty")]
    EmptyToken,
}

impl Session {
    pub fn init(&mut self, token: &str, user: Option<SessionUser>) -> Result<(), SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        self.token = Some(token.to_string());
        self.user = user;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Token for the `Authorization` header of an admin call.
    pub fn bearer(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::Unauthenticated)
    }
}

/// Session handle shared between the UI and every API client it builds.
#[derive(Debug, Clone, Default)]
pub struct SharedSession(Arc<RwLock<Session>>);

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self(Arc::new(RwLock::new(session)))
    }

    pub fn snapshot(&self) -> Session {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn init(&self, token: &str, user: Option<SessionUser>) -> Result<(), SessionError> {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .init(token, user)
    }

    pub fn clear(&self) {
        self.0.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
