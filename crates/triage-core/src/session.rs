//! Operator session passed explicitly into every workflow operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session has no token")]
    MissingToken,

    #[error("Session expired at {0}")]
    Expired(DateTime<Utc>),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// The signed-in operator. Issuing sessions is the host's concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Operator name recorded on encounters
    pub operator: String,
    pub token: String,
    pub issued_at: DateTime<Utc>,
    /// `None` never expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(operator: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            token: token.into(),
            issued_at: Utc::now(),
            expires_at: None,
        }
    }

    pub fn expiring_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.validate_at(now).is_ok()
    }

    /// Check the session can act at `now`.
    pub fn validate_at(&self, now: DateTime<Utc>) -> SessionResult<()> {
        if self.token.trim().is_empty() {
            return Err(SessionError::MissingToken);
        }
        match self.expires_at {
            Some(expires_at) if now >= expires_at => Err(SessionError::Expired(expires_at)),
            _ => Ok(()),
        }
    }
}
