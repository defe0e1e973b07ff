//! Driven port for reading and editing the signed-in user's profile.

use async_trait::async_trait;

use crate::domain::{Email, Error, ProfilePicture, ProfileUpdate, User};

/// Backend profile calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Fetch the server's copy of a user record.
    async fn fetch_profile(&self, email: &Email) -> Result<User, Error>;

    /// Replace the user's subject list.
    async fn update_subjects(&self, email: &Email, subjects: &[String]) -> Result<(), Error>;

    /// Apply a profile edit and return the updated record.
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, Error>;

    /// Upload a picture and return the updated record.
    ///
    /// The returned user carries the hosted picture URL even when the
    /// backend reports it only alongside the record.
    async fn upload_profile_picture(
        &self,
        email: &Email,
        picture: ProfilePicture,
    ) -> Result<User, Error>;
}
