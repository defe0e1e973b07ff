//! Shared page state.
//!
//! Pages accept a [`PageContext`] at construction so they only depend on
//! domain ports and the session handle and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use super::{Feedback, Route, Transition};
use crate::domain::ports::{
    AuthGateway, AvailabilityGateway, DirectoryGateway, NotificationGateway, ProfileGateway,
    SessionRequestGateway,
};
use crate::domain::{AuthSession, Error, SessionHandle};

/// Parameter object bundling all backend ports used by pages.
#[derive(Clone)]
pub struct PagePorts {
    pub auth: Arc<dyn AuthGateway>,
    pub profiles: Arc<dyn ProfileGateway>,
    pub directory: Arc<dyn DirectoryGateway>,
    pub sessions: Arc<dyn SessionRequestGateway>,
    pub availability: Arc<dyn AvailabilityGateway>,
    pub notifications: Arc<dyn NotificationGateway>,
}

impl PagePorts {
    /// Use one adapter for every port.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: AuthGateway
            + ProfileGateway
            + DirectoryGateway
            + SessionRequestGateway
            + AvailabilityGateway
            + NotificationGateway
            + 'static,
    {
        Self {
            auth: backend.clone(),
            profiles: backend.clone(),
            directory: backend.clone(),
            sessions: backend.clone(),
            availability: backend.clone(),
            notifications: backend,
        }
    }
}

/// Dependency bundle handed to every page.
#[derive(Clone)]
pub struct PageContext {
    pub ports: PagePorts,
    pub session: SessionHandle,
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl PageContext {
    /// Bundle ports, session, and clock.
    pub fn new(ports: PagePorts, session: SessionHandle, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            ports,
            session,
            clock,
        }
    }

    /// The signed-in session, or `None` when a protected page must redirect.
    ///
    /// An unreadable store counts as signed out.
    pub fn signed_in(&self) -> Option<AuthSession> {
        match self.session.current() {
            Ok(session) => session,
            Err(error) => {
                warn!(%error, "session store unreadable; treating as signed out");
                None
            }
        }
    }

    /// Clear the session and send the user to Login.
    pub fn logout(&self) -> Transition {
        if let Err(error) = self.session.clear() {
            warn!(%error, "failed to clear session during logout");
        }
        info!("logged out");
        Transition::Navigate(Route::Login)
    }

    /// Route a failed call: unauthorised errors force a logout, anything
    /// else becomes inline feedback.
    pub fn absorb(&self, error: Error, feedback: &mut Option<Feedback>) -> Transition {
        if error.is_unauthorized() {
            warn!("backend rejected the session; logging out");
            return self.logout();
        }
        *feedback = Some(Feedback::Error(error.message().to_owned()));
        Transition::Stay
    }
}
