//! In-process session store for tests and one-shot runs.

use std::sync::{Mutex, MutexGuard};

use crate::domain::AuthSession;
use crate::domain::ports::{SessionStore, SessionStoreError};

/// [`SessionStore`] holding the session in memory.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    slot: Mutex<Option<AuthSession>>,
}

impl InMemorySessionStore {
    /// Start with `session` already stored.
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<AuthSession>>, SessionStoreError> {
        self.slot
            .lock()
            .map_err(|_| SessionStoreError::io("session lock poisoned"))
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<AuthSession>, SessionStoreError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, session: &AuthSession) -> Result<(), SessionStoreError> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.lock()? = None;
        Ok(())
    }
}
