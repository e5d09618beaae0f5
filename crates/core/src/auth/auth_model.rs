//! Session and credential models for the identity collaborator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An authenticated session, passed explicitly into owner-scoped calls.
///
/// There is no implicit global session state: services receive the owner id
/// from a `Session` value supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Stable user identifier issued by the identity provider.
    pub user_id: String,
    pub email: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
        }
    }
}

/// Credentials submitted to `sign_in` / `sign_up`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Errors reported by the identity provider.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account already exists for '{0}'")]
    EmailTaken(String),

    #[error("No active session")]
    NotSignedIn,

    #[error("Identity provider error: {0}")]
    Provider(String),
}
