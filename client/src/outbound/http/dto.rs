//! Wire DTOs for the tutoring backend.
//!
//! Response envelopes are decoded here and unwrapped into domain records in
//! one pass. Request bodies that do not already exist as domain payloads are
//! built from borrowed domain values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    AuthSession, AvailabilitySlot, BearerToken, Email, SessionRequest, SessionRequestId,
    SessionStatus, User,
};

#[derive(Debug, Deserialize)]
pub(super) struct AuthResponseDto {
    token: String,
    user: User,
}

impl AuthResponseDto {
    /// `None` when the backend issued a blank token.
    pub(super) fn into_session(self) -> Option<AuthSession> {
        BearerToken::new(self.token).map(|token| AuthSession::new(self.user, token))
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct MentorsDto {
    #[serde(default)]
    pub(super) mentors: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MenteesDto {
    #[serde(default)]
    pub(super) mentees: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserEnvelopeDto {
    pub(super) user: User,
}

#[derive(Debug, Deserialize)]
pub(super) struct PictureResponseDto {
    pub(super) user: User,
    #[serde(default)]
    pub(super) profile_picture_url: Option<String>,
}

impl PictureResponseDto {
    pub(super) fn into_user(self) -> User {
        let mut user = self.user;
        if user.profile_picture_url.is_none() {
            user.profile_picture_url = self.profile_picture_url;
        }
        user
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SessionsDto {
    #[serde(default)]
    pub(super) sessions: Vec<SessionRequest>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TimeSlotsDto {
    #[serde(default)]
    pub(super) time_slots: Vec<AvailabilitySlot>,
}

#[derive(Serialize)]
pub(super) struct LoginBodyDto<'a> {
    pub(super) email: &'a Email,
    pub(super) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct SubjectsBodyDto<'a> {
    pub(super) email: &'a Email,
    pub(super) subjects: &'a [String],
}

#[derive(Debug, Serialize)]
pub(super) struct StatusBodyDto<'a> {
    pub(super) session_id: &'a SessionRequestId,
    pub(super) status: SessionStatus,
}

#[derive(Debug, Serialize)]
pub(super) struct AvailabilityBodyDto<'a> {
    pub(super) email: &'a Email,
    pub(super) time_slots: &'a [AvailabilitySlot],
}

/// Failure body; `detail` is either a message or a list of field errors.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    detail: Option<Value>,
}

impl ErrorBodyDto {
    /// The human message carried by `detail`, if any.
    pub(super) fn message(&self) -> Option<String> {
        let message = match self.detail.as_ref()? {
            Value::String(text) => text.trim().to_owned(),
            Value::Array(entries) => entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .map(str::trim)
                .filter(|msg| !msg.is_empty())
                .collect::<Vec<_>>()
                .join("; "),
            _ => String::new(),
        };
        (!message.is_empty()).then_some(message)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"detail":"Email already registered"}"#, Some("Email already registered"))]
    #[case(
        r#"{"detail":[{"loc":["body","email"],"msg":"field required"},{"msg":"too short"}]}"#,
        Some("field required; too short")
    )]
    #[case(r#"{"detail":"   "}"#, None)]
    #[case(r#"{"detail":{"code":7}}"#, None)]
    #[case(r#"{}"#, None)]
    fn extracts_detail_messages(#[case] body: &str, #[case] expected: Option<&str>) {
        let dto: ErrorBodyDto = serde_json::from_str(body).expect("valid JSON");
        assert_eq!(dto.message().as_deref(), expected);
    }

    #[rstest]
    fn upload_response_fills_missing_picture_url() {
        let dto: PictureResponseDto = serde_json::from_str(
            r#"{"user":{"email":"a@b.org","name":"A","role":"mentor"},"profile_picture_url":"https://cdn/x.png"}"#,
        )
        .expect("valid JSON");
        assert_eq!(
            dto.into_user().profile_picture_url.as_deref(),
            Some("https://cdn/x.png")
        );
    }

    #[rstest]
    fn blank_token_yields_no_session() {
        let dto: AuthResponseDto = serde_json::from_str(
            r#"{"token":"","user":{"email":"a@b.org","name":"A","role":"mentee"}}"#,
        )
        .expect("valid JSON");
        assert!(dto.into_session().is_none());
    }
}
