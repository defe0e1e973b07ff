//! Shared fixtures for page controller tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::json;

use super::{PageContext, PagePorts};
use crate::domain::ports::{
    MockAuthGateway, MockAvailabilityGateway, MockDirectoryGateway, MockNotificationGateway,
    MockProfileGateway, MockSessionRequestGateway,
};
use crate::domain::{AuthSession, BearerToken, Email, SessionHandle, User};
use crate::outbound::session_store::InMemorySessionStore;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Mocked backend ports; set expectations, then build a context.
#[derive(Default)]
pub(super) struct MockPorts {
    pub auth: MockAuthGateway,
    pub profiles: MockProfileGateway,
    pub directory: MockDirectoryGateway,
    pub sessions: MockSessionRequestGateway,
    pub availability: MockAvailabilityGateway,
    pub notifications: MockNotificationGateway,
}

impl MockPorts {
    /// Build a context whose store starts with `session`.
    pub(super) fn into_context(self, session: Option<AuthSession>) -> PageContext {
        let store = session.map_or_else(InMemorySessionStore::default, InMemorySessionStore::with_session);
        let ports = PagePorts {
            auth: Arc::new(self.auth),
            profiles: Arc::new(self.profiles),
            directory: Arc::new(self.directory),
            sessions: Arc::new(self.sessions),
            availability: Arc::new(self.availability),
            notifications: Arc::new(self.notifications),
        };
        let clock = FixtureClock {
            utc_now: Utc
                .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
                .single()
                .expect("valid fixture timestamp"),
        };
        PageContext::new(ports, SessionHandle::new(Arc::new(store)), Arc::new(clock))
    }
}

pub(super) fn email(raw: &str) -> Email {
    Email::new(raw).expect("fixture email")
}

pub(super) fn user(email: &str, role: &str, subjects: &[&str]) -> User {
    serde_json::from_value(json!({
        "_id": format!("id-{email}"),
        "email": email,
        "name": "Fixture User",
        "role": role,
        "grade": "11th",
        "subjects": subjects,
    }))
    .expect("fixture user decodes")
}

pub(super) fn mentee() -> User {
    user("mentee@example.org", "mentee", &["Mathematics"])
}

pub(super) fn mentor() -> User {
    user("mentor@example.org", "mentor", &["Algebra", "Geometry"])
}

pub(super) fn signed_in(user: User) -> AuthSession {
    AuthSession::new(user, BearerToken::new("fixture-token").expect("token"))
}
