//! Identity provider trait.
//!
//! This trait defines the contract for the external identity service
//! without committing to any backend. Session-change notifications are
//! surfaced through the domain event sink (`DomainEvent::SessionChanged`)
//! by the runtime adapter that owns the provider.

use async_trait::async_trait;

use super::auth_model::{Credentials, Session};
use crate::errors::Result;

/// Trait defining the contract for the identity collaborator.
#[async_trait]
pub trait IdentityProviderTrait: Send + Sync {
    /// Returns the currently signed-in session, if any.
    fn current_user(&self) -> Option<Session>;

    /// Authenticates an existing user.
    async fn sign_in(&self, credentials: Credentials) -> Result<Session>;

    /// Registers a new user and signs them in.
    async fn sign_up(&self, credentials: Credentials) -> Result<Session>;

    /// Ends the current session. Signing out when no session is active
    /// is a no-op.
    async fn sign_out(&self);
}
