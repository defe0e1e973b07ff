//! Driven port for notifications.

use async_trait::async_trait;

use crate::domain::{Email, Error, NotificationFeed, NotificationId};

/// Backend notification calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Notifications for `email` with the unread counter.
    async fn fetch_notifications(&self, email: &Email) -> Result<NotificationFeed, Error>;

    /// Flag one notification as read.
    async fn mark_read(&self, id: &NotificationId) -> Result<(), Error>;

    /// Flag every notification of `email` as read.
    async fn mark_all_read(&self, email: &Email) -> Result<(), Error>;
}
