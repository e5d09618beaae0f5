//! Identity collaborator - session model and provider trait.
//!
//! The identity service is external to this crate: the core only consumes
//! it through [`IdentityProviderTrait`] and carries the resulting
//! [`Session`] value into every owner-scoped call.

mod auth_model;
mod auth_traits;

pub use auth_model::{AuthError, Credentials, Session};
pub use auth_traits::IdentityProviderTrait;
