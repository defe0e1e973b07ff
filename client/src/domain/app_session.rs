//! Application-session context shared by every page.
//!
//! Pages never reach for storage directly. They receive a [`SessionHandle`]
//! at construction and use it as the single accessor/mutator of the
//! signed-in session.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use super::ports::SessionStore;
use super::{AuthSession, BearerToken, Error, User};

/// Accessor and mutator for the signed-in session.
#[derive(Clone)]
pub struct SessionHandle {
    store: Arc<dyn SessionStore>,
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle").finish_non_exhaustive()
    }
}

impl SessionHandle {
    /// Wrap a session store adapter.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The stored session, if any.
    pub fn current(&self) -> Result<Option<AuthSession>, Error> {
        Ok(self.store.load()?)
    }

    /// The stored token, if any.
    pub fn token(&self) -> Result<Option<BearerToken>, Error> {
        Ok(self.current()?.map(|session| session.token))
    }

    /// Store the session issued by a successful login or signup.
    pub fn establish(&self, session: &AuthSession) -> Result<(), Error> {
        self.store.save(session)?;
        info!(user = %session.email(), "session established");
        Ok(())
    }

    /// Replace the cached user record, keeping the token.
    ///
    /// Returns an unauthorised error when no session is stored.
    pub fn replace_user(&self, user: User) -> Result<AuthSession, Error> {
        let Some(current) = self.current()? else {
            return Err(Error::unauthorized("Please log in again"));
        };
        let updated = AuthSession::new(user, current.token);
        self.store.save(&updated)?;
        debug!(user = %updated.email(), "cached user refreshed");
        Ok(updated)
    }

    /// Forget the session.
    pub fn clear(&self) -> Result<(), Error> {
        self.store.clear()?;
        info!("session cleared");
        Ok(())
    }
}
