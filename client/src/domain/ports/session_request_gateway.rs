//! Driven port for tutoring session requests.

use async_trait::async_trait;

use crate::domain::{
    Email, Error, NewSessionRequest, ScheduledSessionRequest, SessionRequest, SessionRequestId,
    SessionStatus,
};

/// Backend session request calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRequestGateway: Send + Sync {
    /// Create a request with no agreed time.
    async fn create_request(&self, request: &NewSessionRequest) -> Result<(), Error>;

    /// Create a request for a specific slot.
    async fn create_scheduled_request(
        &self,
        request: &ScheduledSessionRequest,
    ) -> Result<(), Error>;

    /// Every request involving `email`, on either side.
    async fn list_sessions(&self, email: &Email) -> Result<Vec<SessionRequest>, Error>;

    /// Accepted requests scheduled from today onwards.
    async fn upcoming_sessions(&self, email: &Email) -> Result<Vec<SessionRequest>, Error>;

    /// Move a request to `status`.
    async fn update_status(&self, id: &SessionRequestId, status: SessionStatus)
    -> Result<(), Error>;
}
