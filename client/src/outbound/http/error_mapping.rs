//! Translation of transport and HTTP failures into domain errors.

use reqwest::StatusCode;

use super::dto::ErrorBodyDto;
use crate::domain::{Error, ErrorCode};

/// Backend operation, used for logging and fallback messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Operation {
    Signup,
    Login,
    ListMentors,
    ListMentees,
    FetchProfile,
    UpdateSubjects,
    CreateSessionRequest,
    ListSessions,
    UpcomingSessions,
    UpdateSessionStatus,
    UpdateProfile,
    UploadProfilePicture,
    GetAvailability,
    SetAvailability,
    FetchNotifications,
    MarkNotificationRead,
    MarkAllNotificationsRead,
}

impl Operation {
    pub(super) const fn name(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Login => "login",
            Self::ListMentors => "list_mentors",
            Self::ListMentees => "list_mentees",
            Self::FetchProfile => "fetch_profile",
            Self::UpdateSubjects => "update_subjects",
            Self::CreateSessionRequest => "create_session_request",
            Self::ListSessions => "list_sessions",
            Self::UpcomingSessions => "upcoming_sessions",
            Self::UpdateSessionStatus => "update_session_status",
            Self::UpdateProfile => "update_profile",
            Self::UploadProfilePicture => "upload_profile_picture",
            Self::GetAvailability => "get_availability",
            Self::SetAvailability => "set_availability",
            Self::FetchNotifications => "fetch_notifications",
            Self::MarkNotificationRead => "mark_notification_read",
            Self::MarkAllNotificationsRead => "mark_all_notifications_read",
        }
    }

    /// Message shown when the backend gives no detail.
    pub(super) const fn fallback_message(self) -> &'static str {
        match self {
            Self::Signup => "Signup failed",
            Self::Login => "Login failed",
            Self::ListMentors => "Failed to fetch mentors",
            Self::ListMentees => "Failed to fetch mentees",
            Self::FetchProfile => "Failed to fetch profile",
            Self::UpdateSubjects => "Failed to update subjects",
            Self::CreateSessionRequest => "Failed to create session request",
            Self::ListSessions => "Failed to fetch sessions",
            Self::UpcomingSessions => "Failed to fetch upcoming sessions",
            Self::UpdateSessionStatus => "Failed to update session status",
            Self::UpdateProfile => "Failed to update profile",
            Self::UploadProfilePicture => "Failed to upload profile picture",
            Self::GetAvailability => "Failed to get availability",
            Self::SetAvailability => "Failed to set availability",
            Self::FetchNotifications => "Failed to fetch notifications",
            Self::MarkNotificationRead => "Failed to mark notification as read",
            Self::MarkAllNotificationsRead => "Failed to mark all notifications as read",
        }
    }
}

/// No response arrived: connection, TLS, or timeout failure.
pub(super) fn map_transport_error(operation: Operation, error: &reqwest::Error) -> Error {
    Error::network(operation.fallback_message()).with_details(serde_json::json!({
        "operation": operation.name(),
        "timeout": error.is_timeout(),
    }))
}

/// The backend answered with a non-success status.
///
/// `details.has_detail` records whether the message came from the server.
pub(super) fn map_status_error(operation: Operation, status: StatusCode, body: &[u8]) -> Error {
    let detail = serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .and_then(|dto| dto.message());
    let has_detail = detail.is_some();
    let message = detail.unwrap_or_else(|| operation.fallback_message().to_owned());
    let code = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorCode::Unauthorized,
        _ => ErrorCode::Server,
    };
    Error::new(code, message).with_details(serde_json::json!({
        "operation": operation.name(),
        "status": status.as_u16(),
        "has_detail": has_detail,
    }))
}

/// A success status carried a body that does not match the contract.
pub(super) fn map_decode_error(operation: Operation, error: &serde_json::Error) -> Error {
    Error::server(operation.fallback_message()).with_details(serde_json::json!({
        "operation": operation.name(),
        "decode": error.to_string(),
    }))
}
