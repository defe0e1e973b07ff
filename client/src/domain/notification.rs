//! Notifications raised by the backend when session requests change.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Email, Timestamp};

/// Backend identifier of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    /// Wrap a backend identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl AsRef<str> for NotificationId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What triggered a notification. Unrecognised kinds decode as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A mentee asked for a session.
    SessionRequest,
    /// A mentor accepted.
    SessionAccepted,
    /// A mentor declined.
    SessionDeclined,
    /// Anything else.
    #[serde(other)]
    Other,
}

impl NotificationKind {
    /// Short tag shown beside the message.
    pub const fn label(self) -> &'static str {
        match self {
            Self::SessionRequest => "request",
            Self::SessionAccepted => "accepted",
            Self::SessionDeclined => "declined",
            Self::Other => "notice",
        }
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Backend identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: NotificationId,
    /// Recipient, when reported.
    #[serde(rename = "user_email", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Email>,
    /// Trigger.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Text shown to the user.
    pub message: String,
    /// Whether the user has opened it.
    #[serde(default)]
    pub read: bool,
    /// Creation instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// The notification list plus the backend's unread counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFeed {
    /// All notifications, newest first as the backend orders them.
    #[serde(default)]
    pub notifications: Vec<Notification>,
    /// Unread count as reported by the backend.
    #[serde(default)]
    pub unread_count: u32,
}

impl NotificationFeed {
    /// Notifications not yet read.
    pub fn unread(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().filter(|n| !n.read)
    }

    /// Look up a notification by id.
    pub fn find(&self, id: &NotificationId) -> Option<&Notification> {
        self.notifications.iter().find(|n| &n.id == id)
    }

    /// Header text: `N Unread`, or `All Caught Up!` when nothing is unread.
    pub fn headline(&self) -> String {
        match self.unread().count() {
            0 => "All Caught Up!".to_owned(),
            n => format!("{n} Unread"),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn feed() -> NotificationFeed {
        serde_json::from_value(json!({
            "notifications": [
                { "_id": "n1", "type": "session_request", "message": "Sam wants Algebra", "read": false },
                { "_id": "n2", "type": "session_accepted", "message": "Accepted", "read": true },
                { "_id": "n3", "type": "profile_tip", "message": "Add a photo" },
            ],
            "unread_count": 2,
        }))
        .expect("fixture feed decodes")
    }

    #[rstest]
    fn unknown_kinds_decode_as_other(feed: NotificationFeed) {
        let kinds: Vec<NotificationKind> = feed.notifications.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            [
                NotificationKind::SessionRequest,
                NotificationKind::SessionAccepted,
                NotificationKind::Other
            ]
        );
    }

    #[rstest]
    fn missing_read_flag_means_unread(feed: NotificationFeed) {
        assert_eq!(feed.unread().count(), 2);
        assert_eq!(feed.headline(), "2 Unread");
    }

    #[rstest]
    fn fully_read_feed_is_caught_up() {
        assert_eq!(NotificationFeed::default().headline(), "All Caught Up!");
    }

    #[rstest]
    fn find_locates_by_id(feed: NotificationFeed) {
        let found = feed.find(&NotificationId::new("n2")).expect("present");
        assert!(found.read);
        assert!(feed.find(&NotificationId::new("zz")).is_none());
    }
}
