//! Driven port for mentor availability.

use async_trait::async_trait;

use crate::domain::{AvailabilitySlot, Email, Error};

/// Backend availability calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityGateway: Send + Sync {
    /// The mentor's stored slots.
    async fn get_availability(&self, email: &Email) -> Result<Vec<AvailabilitySlot>, Error>;

    /// Replace the mentor's stored slots wholesale.
    async fn set_availability(&self, email: &Email, slots: &[AvailabilitySlot])
    -> Result<(), Error>;
}
