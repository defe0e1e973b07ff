//! Driven port for the mentor and mentee directories.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Backend directory listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryGateway: Send + Sync {
    /// Every user offering tutoring.
    async fn list_mentors(&self) -> Result<Vec<User>, Error>;

    /// Every user seeking tutoring.
    async fn list_mentees(&self) -> Result<Vec<User>, Error>;
}
