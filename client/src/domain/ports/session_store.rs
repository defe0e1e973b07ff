//! Port for persisting the signed-in session between runs.
//!
//! The token and the cached user record are stored and cleared together; a
//! store holding only one of them reports no session at all.

use crate::domain::AuthSession;

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError as Server {
        /// Reading or writing the backing storage failed.
        Io { message: String } => "session storage failed: {message}",
        /// The stored user record could not be encoded or decoded.
        Serialization { message: String } => "stored session is unreadable: {message}",
    }
}

/// Port for the client-held session record.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Read the stored session, if both parts are present.
    fn load(&self) -> Result<Option<AuthSession>, SessionStoreError>;

    /// Replace the stored session.
    fn save(&self, session: &AuthSession) -> Result<(), SessionStoreError>;

    /// Remove every stored part. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), SessionStoreError>;
}
