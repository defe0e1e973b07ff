//! HTTP adapter behaviour against a local mock backend.

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use rstest::rstest;
use serde_json::json;
use url::Url;

use studierbridge_client::domain::ports::{
    AuthGateway, AvailabilityGateway, DirectoryGateway, NotificationGateway, ProfileGateway,
    SessionRequestGateway,
};
use studierbridge_client::domain::{
    AuthSession, BearerToken, Email, ErrorCode, LoginCredentials, NotificationId, ProfilePicture,
    Role, ScheduledSessionRequest, SessionHandle, SignupForm, SignupRequest, User,
};
use studierbridge_client::outbound::http::HttpApiClient;
use studierbridge_client::outbound::session_store::InMemorySessionStore;

fn user_json(email: &str, role: &str) -> serde_json::Value {
    json!({
        "_id": "u1",
        "email": email,
        "name": "Maya Chen",
        "role": role,
        "grade": "12th",
        "zipCode": "94110",
        "subjects": ["Algebra"],
    })
}

fn fixture_user() -> User {
    serde_json::from_value(user_json("mentee@example.org", "mentee")).expect("fixture user")
}

fn email(raw: &str) -> Email {
    Email::new(raw).expect("fixture email")
}

fn anonymous(server: &MockServer) -> HttpApiClient {
    let base = Url::parse(&server.url("/api")).expect("mock server URL");
    HttpApiClient::new(base, Duration::from_secs(5)).expect("client builds")
}

fn signed_in(server: &MockServer) -> HttpApiClient {
    let session = AuthSession::new(
        fixture_user(),
        BearerToken::new("fixture-token").expect("token"),
    );
    let store = Arc::new(InMemorySessionStore::with_session(session));
    anonymous(server).with_session(SessionHandle::new(store))
}

#[rstest]
#[tokio::test]
async fn login_posts_credentials_and_decodes_the_session() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/login")
                .json_body(json!({ "email": "mentee@example.org", "password": "secret1" }));
            then.status(200).json_body(json!({
                "token": "issued-token",
                "user": user_json("mentee@example.org", "mentee"),
            }));
        })
        .await;

    let credentials =
        LoginCredentials::try_from_parts("mentee@example.org", "secret1").expect("valid");
    let session = anonymous(&server).login(&credentials).await.expect("login succeeds");

    mock.assert_async().await;
    assert_eq!(session.token.expose(), "issued-token");
    assert_eq!(session.user.zip_code, "94110");
}

#[rstest]
#[tokio::test]
async fn bearer_token_accompanies_every_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/mentors")
                .header("Authorization", "Bearer fixture-token");
            then.status(200)
                .json_body(json!({ "mentors": [user_json("mentor@example.org", "mentor")] }));
        })
        .await;

    let mentors = signed_in(&server).list_mentors().await.expect("listing succeeds");

    mock.assert_async().await;
    assert_eq!(mentors.len(), 1);
    assert_eq!(mentors.first().map(|m| m.role), Some(Role::Mentor));
}

#[rstest]
#[tokio::test]
async fn server_detail_is_surfaced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/signup");
            then.status(400).json_body(json!({ "detail": "Email already registered" }));
        })
        .await;
    let form = SignupForm {
        first_name: "Maya".to_owned(),
        last_name: "Chen".to_owned(),
        email: "mentor@example.org".to_owned(),
        password: "secret1".to_owned(),
        grade: "12th".to_owned(),
        school: "Lincoln High".to_owned(),
        zip_code: "94110".to_owned(),
    };
    let request = SignupRequest::from_form(Role::Mentor, &form).expect("valid form");

    let error = anonymous(&server).signup(&request).await.expect_err("rejected");

    assert_eq!(error.code(), ErrorCode::Server);
    assert_eq!(error.message(), "Email already registered");
}

#[rstest]
#[case(500, ErrorCode::Server)]
#[case(401, ErrorCode::Unauthorized)]
#[case(403, ErrorCode::Unauthorized)]
#[tokio::test]
async fn missing_detail_falls_back_per_operation(#[case] status: u16, #[case] code: ErrorCode) {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/mentees");
            then.status(status).body("upstream exploded");
        })
        .await;

    let error = signed_in(&server).list_mentees().await.expect_err("rejected");

    assert_eq!(error.code(), code);
    assert_eq!(error.message(), "Failed to fetch mentees");
}

#[rstest]
#[tokio::test]
async fn validation_detail_lists_are_joined() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/subjects");
            then.status(422).json_body(json!({
                "detail": [
                    { "loc": ["body", "subjects"], "msg": "field required" },
                    { "loc": ["body", "email"], "msg": "invalid email" },
                ]
            }));
        })
        .await;

    let error = signed_in(&server)
        .update_subjects(&email("mentee@example.org"), &["Physics".to_owned()])
        .await
        .expect_err("rejected");

    assert_eq!(error.message(), "field required; invalid email");
}

#[rstest]
#[tokio::test]
async fn undecodable_success_body_is_a_server_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/availability/mentor@example.org");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let error = signed_in(&server)
        .get_availability(&email("mentor@example.org"))
        .await
        .expect_err("undecodable");

    assert_eq!(error.code(), ErrorCode::Server);
    assert_eq!(error.message(), "Failed to get availability");
}

#[rstest]
#[tokio::test]
async fn scheduled_request_body_matches_the_backend_contract() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/session-request-scheduled")
                .json_body(json!({
                    "mentor_email": "mentor@example.org",
                    "mentee_email": "mentee@example.org",
                    "subject": "Algebra",
                    "scheduled_date": "2025-06-01",
                    "scheduled_time": "09:00-10:00",
                }));
            then.status(200).json_body(json!({ "message": "created" }));
        })
        .await;
    let request = ScheduledSessionRequest {
        mentor_email: email("mentor@example.org"),
        mentee_email: email("mentee@example.org"),
        subject: "Algebra".to_owned(),
        message: None,
        scheduled_date: "2025-06-01".parse().expect("date"),
        scheduled_time: "09:00-10:00".parse().expect("time"),
    };

    signed_in(&server)
        .create_scheduled_request(&request)
        .await
        .expect("request accepted");

    mock.assert_async().await;
}

#[rstest]
#[tokio::test]
async fn availability_slots_decode() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/availability/mentor@example.org");
            then.status(200).json_body(json!({
                "time_slots": [
                    { "date": "2025-06-03", "start_time": "14:00", "end_time": "15:00" },
                    { "date": "2025-06-01", "start_time": "09:00", "end_time": "10:00" },
                ]
            }));
        })
        .await;

    let slots = signed_in(&server)
        .get_availability(&email("mentor@example.org"))
        .await
        .expect("decodes");

    let dates: Vec<String> = slots.iter().map(|s| s.date.to_string()).collect();
    assert_eq!(dates, ["2025-06-03", "2025-06-01"]);
}

#[rstest]
#[tokio::test]
async fn profile_is_unwrapped_from_its_envelope() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/profile/mentee@example.org");
            then.status(200)
                .json_body(json!({ "user": user_json("mentee@example.org", "mentee") }));
        })
        .await;

    let user = signed_in(&server)
        .fetch_profile(&email("mentee@example.org"))
        .await
        .expect("profile decodes");

    mock.assert_async().await;
    assert_eq!(user, fixture_user());
}

#[rstest]
#[tokio::test]
async fn mark_read_targets_the_notification_path() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/notifications/read/n42");
            then.status(200).json_body(json!({ "ok": true }));
        })
        .await;

    signed_in(&server)
        .mark_read(&NotificationId::new("n42"))
        .await
        .expect("marked");

    mock.assert_async().await;
}

#[rstest]
#[tokio::test]
async fn picture_upload_fills_the_returned_url() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/profile-picture");
            then.status(200).json_body(json!({
                "user": user_json("mentee@example.org", "mentee"),
                "profile_picture_url": "https://cdn.example.org/maya.png",
            }));
        })
        .await;

    let user = signed_in(&server)
        .upload_profile_picture(
            &email("mentee@example.org"),
            ProfilePicture::from_file("maya.png", vec![0x89, 0x50, 0x4e, 0x47]),
        )
        .await
        .expect("uploaded");

    mock.assert_async().await;
    assert_eq!(
        user.profile_picture_url.as_deref(),
        Some("https://cdn.example.org/maya.png")
    );
}

#[rstest]
#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let address = listener.local_addr().expect("local address");
    drop(listener);
    let base = Url::parse(&format!("http://{address}/api")).expect("closed port URL");
    let client = HttpApiClient::new(base, Duration::from_secs(2)).expect("client builds");

    let error = client
        .fetch_notifications(&email("mentee@example.org"))
        .await
        .expect_err("nobody listening");

    assert_eq!(error.code(), ErrorCode::Network);
    assert_eq!(error.message(), "Failed to fetch notifications");
}
