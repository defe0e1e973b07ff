//! Driven port for account creation and sign-in.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, LoginCredentials, SignupRequest};

/// Backend authentication calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Create an account and return the issued session.
    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession, Error>;

    /// Exchange credentials for a session.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error>;
}
