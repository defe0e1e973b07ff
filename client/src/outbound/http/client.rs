//! Reqwest-backed adapter for every backend gateway port.
//!
//! This adapter owns transport details only: URL construction, bearer
//! authentication, JSON and multipart encoding, and mapping failures into
//! domain errors. Each call is sent once; there are no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{
    AuthResponseDto, AvailabilityBodyDto, LoginBodyDto, MenteesDto, MentorsDto,
    PictureResponseDto, SessionsDto, StatusBodyDto, SubjectsBodyDto, TimeSlotsDto,
    UserEnvelopeDto,
};
use super::error_mapping::{Operation, map_decode_error, map_status_error, map_transport_error};
use crate::domain::ports::{
    AuthGateway, AvailabilityGateway, DirectoryGateway, NotificationGateway, ProfileGateway,
    SessionRequestGateway,
};
use crate::domain::{
    AuthSession, AvailabilitySlot, Email, Error, LoginCredentials, NewSessionRequest,
    NotificationFeed, NotificationId, ProfilePicture, ProfileUpdate, ScheduledSessionRequest,
    SessionHandle, SessionRequest, SessionRequestId, SessionStatus, SignupRequest, User,
};

/// Errors raised while constructing [`HttpApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum HttpApiClientError {
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
    /// The base URL cannot have path segments appended.
    #[error("API base URL `{0}` cannot be used as a base")]
    InvalidBaseUrl(String),
}

/// Backend adapter sending one HTTP request per port call.
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
    session: Option<SessionHandle>,
}

impl HttpApiClient {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot carry a path or the reqwest
    /// client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, HttpApiClientError> {
        if base_url.cannot_be_a_base() {
            return Err(HttpApiClientError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            session: None,
        })
    }

    /// Attach the session whose token authenticates every request.
    pub fn with_session(mut self, session: SessionHandle) -> Self {
        self.session = Some(session);
        self
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        let Some(session) = &self.session else {
            return request;
        };
        match session.token() {
            Ok(Some(token)) => request.bearer_auth(token.expose()),
            Ok(None) => request,
            Err(error) => {
                warn!(%error, "could not read session token; sending unauthenticated request");
                request
            }
        }
    }

    async fn send(&self, operation: Operation, request: RequestBuilder) -> Result<Vec<u8>, Error> {
        let response = self
            .authorise(request)
            .send()
            .await
            .map_err(|error| {
                warn!(operation = operation.name(), %error, "backend unreachable");
                map_transport_error(operation, &error)
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;
        debug!(operation = operation.name(), status = status.as_u16(), "backend call completed");
        if !status.is_success() {
            let error = map_status_error(operation, status, body.as_ref());
            warn!(
                operation = operation.name(),
                status = status.as_u16(),
                message = error.message(),
                "backend call failed"
            );
            return Err(error);
        }
        Ok(body.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, Error> {
        let body = self.send(operation, request).await?;
        serde_json::from_slice(&body).map_err(|error| {
            warn!(operation = operation.name(), %error, "backend payload did not decode");
            map_decode_error(operation, &error)
        })
    }

    async fn authenticate(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<AuthSession, Error> {
        let dto: AuthResponseDto = self.fetch(operation, request).await?;
        dto.into_session()
            .ok_or_else(|| Error::server(operation.fallback_message()))
    }
}

#[async_trait]
impl AuthGateway for HttpApiClient {
    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession, Error> {
        let url = self.endpoint(&["signup"]);
        self.authenticate(Operation::Signup, self.client.post(url).json(request))
            .await
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error> {
        let url = self.endpoint(&["login"]);
        let body = LoginBodyDto {
            email: credentials.email(),
            password: credentials.password(),
        };
        self.authenticate(Operation::Login, self.client.post(url).json(&body))
            .await
    }
}

#[async_trait]
impl DirectoryGateway for HttpApiClient {
    async fn list_mentors(&self) -> Result<Vec<User>, Error> {
        let url = self.endpoint(&["mentors"]);
        let dto: MentorsDto = self
            .fetch(Operation::ListMentors, self.client.get(url))
            .await?;
        Ok(dto.mentors)
    }

    async fn list_mentees(&self) -> Result<Vec<User>, Error> {
        let url = self.endpoint(&["mentees"]);
        let dto: MenteesDto = self
            .fetch(Operation::ListMentees, self.client.get(url))
            .await?;
        Ok(dto.mentees)
    }
}

#[async_trait]
impl ProfileGateway for HttpApiClient {
    async fn fetch_profile(&self, email: &Email) -> Result<User, Error> {
        let url = self.endpoint(&["profile", email.as_ref()]);
        let dto: UserEnvelopeDto = self
            .fetch(Operation::FetchProfile, self.client.get(url))
            .await?;
        Ok(dto.user)
    }

    async fn update_subjects(&self, email: &Email, subjects: &[String]) -> Result<(), Error> {
        let url = self.endpoint(&["subjects"]);
        let body = SubjectsBodyDto { email, subjects };
        self.send(Operation::UpdateSubjects, self.client.put(url).json(&body))
            .await
            .map(drop)
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, Error> {
        let url = self.endpoint(&["profile"]);
        let dto: UserEnvelopeDto = self
            .fetch(Operation::UpdateProfile, self.client.put(url).json(update))
            .await?;
        Ok(dto.user)
    }

    async fn upload_profile_picture(
        &self,
        email: &Email,
        picture: ProfilePicture,
    ) -> Result<User, Error> {
        let url = self.endpoint(&["profile-picture"]);
        let operation = Operation::UploadProfilePicture;
        let part = Part::bytes(picture.bytes)
            .file_name(picture.file_name)
            .mime_str(&picture.content_type)
            .map_err(|_| Error::validation("Unsupported image type"))?;
        let form = Form::new()
            .text("email", email.as_ref().to_owned())
            .part("file", part);
        let dto: PictureResponseDto = self
            .fetch(operation, self.client.post(url).multipart(form))
            .await?;
        Ok(dto.into_user())
    }
}

#[async_trait]
impl SessionRequestGateway for HttpApiClient {
    async fn create_request(&self, request: &NewSessionRequest) -> Result<(), Error> {
        let url = self.endpoint(&["session-request"]);
        self.send(
            Operation::CreateSessionRequest,
            self.client.post(url).json(request),
        )
        .await
        .map(drop)
    }

    async fn create_scheduled_request(
        &self,
        request: &ScheduledSessionRequest,
    ) -> Result<(), Error> {
        let url = self.endpoint(&["session-request-scheduled"]);
        self.send(
            Operation::CreateSessionRequest,
            self.client.post(url).json(request),
        )
        .await
        .map(drop)
    }

    async fn list_sessions(&self, email: &Email) -> Result<Vec<SessionRequest>, Error> {
        let url = self.endpoint(&["sessions", email.as_ref()]);
        let dto: SessionsDto = self
            .fetch(Operation::ListSessions, self.client.get(url))
            .await?;
        Ok(dto.sessions)
    }

    async fn upcoming_sessions(&self, email: &Email) -> Result<Vec<SessionRequest>, Error> {
        let url = self.endpoint(&["upcoming-sessions", email.as_ref()]);
        let dto: SessionsDto = self
            .fetch(Operation::UpcomingSessions, self.client.get(url))
            .await?;
        Ok(dto.sessions)
    }

    async fn update_status(
        &self,
        id: &SessionRequestId,
        status: SessionStatus,
    ) -> Result<(), Error> {
        let url = self.endpoint(&["session-status"]);
        let body = StatusBodyDto {
            session_id: id,
            status,
        };
        self.send(Operation::UpdateSessionStatus, self.client.put(url).json(&body))
            .await
            .map(drop)
    }
}

#[async_trait]
impl AvailabilityGateway for HttpApiClient {
    async fn get_availability(&self, email: &Email) -> Result<Vec<AvailabilitySlot>, Error> {
        let url = self.endpoint(&["availability", email.as_ref()]);
        let dto: TimeSlotsDto = self
            .fetch(Operation::GetAvailability, self.client.get(url))
            .await?;
        Ok(dto.time_slots)
    }

    async fn set_availability(
        &self,
        email: &Email,
        slots: &[AvailabilitySlot],
    ) -> Result<(), Error> {
        let url = self.endpoint(&["availability"]);
        let body = AvailabilityBodyDto {
            email,
            time_slots: slots,
        };
        self.send(Operation::SetAvailability, self.client.post(url).json(&body))
            .await
            .map(drop)
    }
}

#[async_trait]
impl NotificationGateway for HttpApiClient {
    async fn fetch_notifications(&self, email: &Email) -> Result<NotificationFeed, Error> {
        let url = self.endpoint(&["notifications", email.as_ref()]);
        self.fetch(Operation::FetchNotifications, self.client.get(url))
            .await
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<(), Error> {
        let url = self.endpoint(&["notifications", "read", id.as_ref()]);
        self.send(Operation::MarkNotificationRead, self.client.put(url))
            .await
            .map(drop)
    }

    async fn mark_all_read(&self, email: &Email) -> Result<(), Error> {
        let url = self.endpoint(&["notifications", "read-all", email.as_ref()]);
        self.send(Operation::MarkAllNotificationsRead, self.client.put(url))
            .await
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for URL construction.
    use super::*;
    use rstest::rstest;

    fn client(base: &str) -> HttpApiClient {
        HttpApiClient::new(
            Url::parse(base).expect("valid URL"),
            Duration::from_secs(5),
        )
        .expect("client builds")
    }

    #[rstest]
    #[case("https://api.example.org/api", &["profile", "ada@example.org"], "https://api.example.org/api/profile/ada@example.org")]
    #[case("https://api.example.org/api/", &["mentors"], "https://api.example.org/api/mentors")]
    #[case("https://api.example.org/api", &["sessions", "a b/c"], "https://api.example.org/api/sessions/a%20b%2Fc")]
    fn endpoints_append_encoded_segments(
        #[case] base: &str,
        #[case] segments: &[&str],
        #[case] expected: &str,
    ) {
        assert_eq!(client(base).endpoint(segments).as_str(), expected);
    }

    #[rstest]
    fn rejects_opaque_base_urls() {
        let result = HttpApiClient::new(
            Url::parse("mailto:ops@example.org").expect("valid URL"),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(HttpApiClientError::InvalidBaseUrl(_))));
    }
}
