//! Tutoring session requests and their status lifecycle.
//!
//! A mentee creates a request; only the mentor party may move it from
//! `pending` to `accepted` or `declined`, and nothing moves afterwards.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time::long_date_label;
use super::{Email, Error, TimeRange, Timestamp};

/// Note appended when a request is sent to a mentor with no published
/// availability, so the mentor knows a time still has to be agreed.
pub const DEFERRED_SCHEDULING_NOTE: &str =
    "(No time selected - mentor has not set availability; coordinate a time with the mentee.)";

/// Backend identifier of a session request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRequestId(String);

impl SessionRequestId {
    /// Wrap a backend identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl AsRef<str> for SessionRequestId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SessionRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Awaiting the mentor's decision.
    Pending,
    /// Mentor agreed.
    Accepted,
    /// Mentor refused.
    Declined,
}

impl SessionStatus {
    /// Capitalised label for status badges.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Declined => "Declined",
        }
    }

    /// Only `pending` may move, and only to a terminal state.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted | Self::Declined)
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        })
    }
}

/// The mentor's answer to a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusDecision {
    /// Accept the request.
    Accept,
    /// Decline the request.
    Decline,
}

impl StatusDecision {
    /// Status the request moves to.
    pub const fn target(self) -> SessionStatus {
        match self {
            Self::Accept => SessionStatus::Accepted,
            Self::Decline => SessionStatus::Declined,
        }
    }

    /// Confirmation shown after the backend applies the decision.
    pub const fn confirmation(self) -> &'static str {
        match self {
            Self::Accept => "Session accepted!",
            Self::Decline => "Session declined.",
        }
    }
}

/// Which side of a request the viewer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    /// Viewer is the requested mentor.
    Mentor,
    /// Viewer is the requesting mentee.
    Mentee,
}

/// A session request as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    /// Backend identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: SessionRequestId,
    /// Requesting mentee.
    pub mentee_email: Email,
    /// Requested mentor.
    pub mentor_email: Email,
    /// Subject to study.
    pub subject: String,
    /// Optional note from the mentee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Lifecycle state.
    pub status: SessionStatus,
    /// Agreed date, for scheduled requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    /// Agreed window, for scheduled requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<TimeRange>,
    /// Creation instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl SessionRequest {
    /// The viewer's side, derived from the stored emails alone.
    pub fn perspective(&self, viewer: &Email) -> Perspective {
        if &self.mentor_email == viewer {
            Perspective::Mentor
        } else {
            Perspective::Mentee
        }
    }

    /// The other party's email.
    pub fn counterpart(&self, viewer: &Email) -> &Email {
        match self.perspective(viewer) {
            Perspective::Mentor => &self.mentee_email,
            Perspective::Mentee => &self.mentor_email,
        }
    }

    /// Accept/decline is offered only to the mentor of a pending request.
    pub fn can_respond(&self, viewer: &Email) -> bool {
        self.perspective(viewer) == Perspective::Mentor && self.status == SessionStatus::Pending
    }

    /// Check that `viewer` may apply `decision`.
    pub fn authorise_decision(&self, viewer: &Email, decision: StatusDecision) -> Result<(), Error> {
        if self.perspective(viewer) != Perspective::Mentor {
            return Err(Error::validation("Only the mentor can respond to this request"));
        }
        if !self.status.can_transition_to(decision.target()) {
            return Err(Error::validation(format!(
                "This session is already {}",
                self.status
            )));
        }
        Ok(())
    }

    /// `Sunday, June 1, 2025 at 09:00-10:00`, when both parts are set.
    pub fn schedule_label(&self) -> Option<String> {
        let date = self.scheduled_date?;
        let time = self.scheduled_time?;
        Some(format!("{} at {time}", long_date_label(date)))
    }
}

/// Unscheduled request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSessionRequest {
    /// Requested mentor.
    pub mentor_email: Email,
    /// Requesting mentee.
    pub mentee_email: Email,
    /// Subject to study.
    pub subject: String,
    /// Note to the mentor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Scheduled request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSessionRequest {
    /// Requested mentor.
    pub mentor_email: Email,
    /// Requesting mentee.
    pub mentee_email: Email,
    /// Subject to study.
    pub subject: String,
    /// Note to the mentor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Chosen date.
    pub scheduled_date: NaiveDate,
    /// Chosen window.
    pub scheduled_time: TimeRange,
}

/// What a request form submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRequestSubmission {
    /// The mentor published availability and a slot was chosen.
    Scheduled(ScheduledSessionRequest),
    /// The mentor has no availability; a time is agreed later.
    Unscheduled(NewSessionRequest),
}
