//! Notification inbox.

use tracing::debug;

use super::{Feedback, Mount, PageContext, PageLifetime, Route, Transition};
use crate::domain::{AuthSession, Notification, NotificationFeed, NotificationId};

/// Notifications page controller.
pub struct NotificationsPage {
    ctx: PageContext,
    lifetime: PageLifetime,
    session: AuthSession,
    feed: NotificationFeed,
    feedback: Option<Feedback>,
}

impl NotificationsPage {
    /// Mount the inbox, redirecting to Login when signed out.
    pub fn mount(ctx: PageContext) -> Mount<Self> {
        let Some(session) = ctx.signed_in() else {
            return Mount::Redirect(Route::Login);
        };
        Mount::Ready(Self {
            ctx,
            lifetime: PageLifetime::new(),
            session,
            feed: NotificationFeed::default(),
            feedback: None,
        })
    }

    /// Fetch the feed.
    pub async fn load(&mut self) -> Transition {
        let gateway = self.ctx.ports.notifications.clone();
        let email = self.session.user.email.clone();
        let Some(result) = self.lifetime.settle(gateway.fetch_notifications(&email)).await else {
            return Transition::Stay;
        };
        match result {
            Ok(feed) => {
                self.feed = feed;
                Transition::Stay
            }
            Err(error) => self.ctx.absorb(error, &mut self.feedback),
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.feed.notifications
    }

    /// Unread counter as reported by the backend.
    pub fn unread_count(&self) -> u32 {
        self.feed.unread_count
    }

    /// `N Unread` or `All Caught Up!`.
    pub fn headline(&self) -> String {
        self.feed.headline()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Open a notification: unread items are marked read and the feed is
    /// re-fetched. Read items are left alone.
    pub async fn open(&mut self, id: &NotificationId) -> Transition {
        match self.feed.find(id) {
            Some(notification) if !notification.read => {}
            Some(_) => return Transition::Stay,
            None => {
                debug!(notification = %id, "ignoring unknown notification");
                return Transition::Stay;
            }
        }
        let gateway = self.ctx.ports.notifications.clone();
        let Some(result) = self.lifetime.settle(gateway.mark_read(id)).await else {
            return Transition::Stay;
        };
        match result {
            Ok(()) => self.load().await,
            Err(error) => self.ctx.absorb(error, &mut self.feedback),
        }
    }

    /// Mark everything read, then re-fetch.
    pub async fn mark_all_read(&mut self) -> Transition {
        let gateway = self.ctx.ports.notifications.clone();
        let email = self.session.user.email.clone();
        let Some(result) = self.lifetime.settle(gateway.mark_all_read(&email)).await else {
            return Transition::Stay;
        };
        match result {
            Ok(()) => self.load().await,
            Err(error) => self.ctx.absorb(error, &mut self.feedback),
        }
    }

    pub fn unmount(&self) {
        self.lifetime.unmount();
    }
}
