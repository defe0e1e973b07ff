//! Mentor directory and the session request form.

use tracing::{info, warn};

use super::{Feedback, Mount, PageContext, PageLifetime, Route, Transition};
use crate::domain::{AuthSession, Email, SessionRequestForm, SessionRequestSubmission, User};

/// FindMentor page controller.
pub struct FindMentorPage {
    ctx: PageContext,
    lifetime: PageLifetime,
    session: AuthSession,
    hint: Option<String>,
    mentors: Vec<User>,
    request: Option<SessionRequestForm>,
    feedback: Option<Feedback>,
    submitting: bool,
}

impl FindMentorPage {
    /// Mount the directory. `hint` is a subject chosen on the landing page.
    pub fn mount(ctx: PageContext, hint: Option<String>) -> Mount<Self> {
        let Some(session) = ctx.signed_in() else {
            return Mount::Redirect(Route::Login);
        };
        Mount::Ready(Self {
            ctx,
            lifetime: PageLifetime::new(),
            session,
            hint,
            mentors: Vec::new(),
            request: None,
            feedback: None,
            submitting: false,
        })
    }

    /// Fetch the mentor directory.
    pub async fn load(&mut self) -> Transition {
        let directory = self.ctx.ports.directory.clone();
        let Some(result) = self.lifetime.settle(directory.list_mentors()).await else {
            return Transition::Stay;
        };
        match result {
            Ok(mentors) => {
                self.mentors = mentors;
                Transition::Stay
            }
            Err(error) => self.ctx.absorb(error, &mut self.feedback),
        }
    }

    pub fn mentors(&self) -> &[User] {
        &self.mentors
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Open the request form for `mentor`, loading their availability.
    ///
    /// A failed availability fetch opens the form without slots.
    pub async fn open_request(&mut self, mentor: &Email) -> Transition {
        let Some(chosen) = self.mentors.iter().find(|m| &m.email == mentor).cloned() else {
            self.feedback = Some(Feedback::Error("Mentor not found".to_owned()));
            return Transition::Stay;
        };
        let availability = self.ctx.ports.availability.clone();
        let Some(result) = self
            .lifetime
            .settle(availability.get_availability(&chosen.email))
            .await
        else {
            return Transition::Stay;
        };
        let slots = match result {
            Ok(slots) => slots,
            Err(error) if error.is_unauthorized() => {
                return self.ctx.absorb(error, &mut self.feedback);
            }
            Err(error) => {
                warn!(mentor = %chosen.email, %error, "availability unavailable; opening without slots");
                Vec::new()
            }
        };
        self.feedback = None;
        self.request = Some(SessionRequestForm::open(chosen, slots, self.hint.as_deref()));
        Transition::Stay
    }

    pub fn request(&self) -> Option<&SessionRequestForm> {
        self.request.as_ref()
    }

    /// Edit the open request form.
    pub fn request_mut(&mut self) -> Option<&mut SessionRequestForm> {
        self.feedback = None;
        self.request.as_mut()
    }

    /// Discard the open form and its selection.
    pub fn close_request(&mut self) {
        self.request = None;
    }

    /// Send the open request.
    ///
    /// Incomplete forms never reach the backend. On failure the form stays
    /// open with its selection intact.
    pub async fn submit_request(&mut self) -> Transition {
        let Some(form) = self.request.as_ref() else {
            return Transition::Stay;
        };
        let mentor_email = form.mentor().email.clone();
        let submission = match form.submission(&self.session.user.email) {
            Ok(submission) => submission,
            Err(error) => {
                self.feedback = Some(Feedback::Error(error.message().to_owned()));
                return Transition::Stay;
            }
        };

        self.submitting = true;
        let sessions = self.ctx.ports.sessions.clone();
        let send = async move {
            match submission {
                SessionRequestSubmission::Scheduled(request) => {
                    sessions.create_scheduled_request(&request).await
                }
                SessionRequestSubmission::Unscheduled(request) => {
                    sessions.create_request(&request).await
                }
            }
        };
        let Some(result) = self.lifetime.settle(send).await else {
            return Transition::Stay;
        };
        self.submitting = false;

        match result {
            Ok(()) => {
                info!(mentor = %mentor_email, "session request sent");
                self.request = None;
                self.feedback = Some(Feedback::Success(
                    "Session request sent successfully!".to_owned(),
                ));
                Transition::Stay
            }
            Err(error) => self.ctx.absorb(error, &mut self.feedback),
        }
    }

    pub fn unmount(&self) {
        self.lifetime.unmount();
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::super::test_support::{MockPorts, email, mentee, mentor, signed_in, user};
    use super::*;
    use crate::domain::{
        AvailabilitySlot, DEFERRED_SCHEDULING_NOTE, Error, NewSessionRequest,
        ScheduledSessionRequest,
    };
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn slot(date: &str, start: &str, end: &str) -> AvailabilitySlot {
        AvailabilitySlot::new(
            date.parse().expect("date"),
            start.parse().expect("start"),
            end.parse().expect("end"),
        )
    }

    #[fixture]
    fn ports() -> MockPorts {
        let mut ports = MockPorts::default();
        ports
            .directory
            .expect_list_mentors()
            .returning(|| Ok(vec![mentor(), user("blank@example.org", "mentor", &[])]));
        ports
    }

    async fn mounted(ports: MockPorts, hint: Option<&str>) -> FindMentorPage {
        let ctx = ports.into_context(Some(signed_in(mentee())));
        let mut page = FindMentorPage::mount(ctx, hint.map(str::to_owned))
            .ready()
            .expect("signed in");
        assert_eq!(page.load().await, Transition::Stay);
        page
    }

    #[rstest]
    #[tokio::test]
    async fn scheduled_request_matches_the_wire_example(mut ports: MockPorts) {
        ports.availability.expect_get_availability().returning(|_| {
            Ok(vec![
                slot("2025-06-01", "09:00", "10:00"),
                slot("2025-06-03", "14:00", "15:00"),
            ])
        });
        ports
            .sessions
            .expect_create_scheduled_request()
            .withf(|request: &ScheduledSessionRequest| {
                serde_json::to_value(request).ok()
                    == Some(json!({
                        "mentor_email": "mentor@example.org",
                        "mentee_email": "mentee@example.org",
                        "subject": "Algebra",
                        "scheduled_date": "2025-06-01",
                        "scheduled_time": "09:00-10:00",
                    }))
            })
            .times(1)
            .returning(|_| Ok(()));
        ports.sessions.expect_create_request().times(0);
        let mut page = mounted(ports, None).await;

        page.open_request(&email("mentor@example.org")).await;
        let form = page.request_mut().expect("form open");
        form.select_date("2025-06-01".parse().expect("date")).expect("offered date");
        let times = form.time_options();
        assert_eq!(times.len(), 1);
        let only = *times.first().expect("one choice");
        assert_eq!(only.to_string(), "09:00-10:00");
        form.select_time(only).expect("offered time");

        assert_eq!(page.submit_request().await, Transition::Stay);
        assert!(page.request().is_none(), "form closed after success");
        assert_eq!(
            page.feedback().map(Feedback::text),
            Some("Session request sent successfully!")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn missing_date_and_time_never_calls_backend(mut ports: MockPorts) {
        ports
            .availability
            .expect_get_availability()
            .returning(|_| Ok(vec![slot("2025-06-01", "09:00", "10:00")]));
        ports.sessions.expect_create_scheduled_request().times(0);
        ports.sessions.expect_create_request().times(0);
        let mut page = mounted(ports, None).await;

        page.open_request(&email("mentor@example.org")).await;
        assert!(!page.request().expect("form open").can_submit());
        assert_eq!(page.submit_request().await, Transition::Stay);
        assert_eq!(
            page.feedback().map(Feedback::text),
            Some("Please select a date and time")
        );
        assert!(page.request().is_some(), "form stays open");
    }

    #[rstest]
    #[tokio::test]
    async fn empty_subject_never_calls_backend(mut ports: MockPorts) {
        ports.availability.expect_get_availability().returning(|_| Ok(Vec::new()));
        ports.sessions.expect_create_request().times(0);
        let mut page = mounted(ports, None).await;

        page.open_request(&email("blank@example.org")).await;
        assert_eq!(page.submit_request().await, Transition::Stay);
        assert_eq!(page.feedback().map(Feedback::text), Some("Please select a subject"));
    }

    #[rstest]
    #[tokio::test]
    async fn mentor_without_slots_gets_a_deferred_request(mut ports: MockPorts) {
        ports
            .availability
            .expect_get_availability()
            .returning(|_| Err(Error::network("Failed to get availability")));
        ports
            .sessions
            .expect_create_request()
            .withf(|request: &NewSessionRequest| {
                request.subject == "Geometry"
                    && request
                        .message
                        .as_deref()
                        .is_some_and(|m| m.starts_with("Exam on Friday") && m.ends_with(DEFERRED_SCHEDULING_NOTE))
            })
            .times(1)
            .returning(|_| Ok(()));
        let mut page = mounted(ports, Some("Geometry")).await;

        page.open_request(&email("mentor@example.org")).await;
        let form = page.request_mut().expect("form open");
        assert!(!form.has_availability());
        assert_eq!(form.subject(), Some("Geometry"));
        form.set_message("Exam on Friday");

        assert_eq!(page.submit_request().await, Transition::Stay);
        assert!(page.request().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn failure_keeps_selection(mut ports: MockPorts) {
        ports
            .availability
            .expect_get_availability()
            .returning(|_| Ok(vec![slot("2025-06-03", "14:00", "15:00")]));
        ports
            .sessions
            .expect_create_scheduled_request()
            .returning(|_| Err(Error::server("Mentor is fully booked")));
        let mut page = mounted(ports, None).await;

        page.open_request(&email("mentor@example.org")).await;
        let form = page.request_mut().expect("form open");
        let date = "2025-06-03".parse().expect("date");
        form.select_date(date).expect("offered date");
        let time = *form.time_options().first().expect("one choice");
        form.select_time(time).expect("offered time");

        assert_eq!(page.submit_request().await, Transition::Stay);
        assert_eq!(page.feedback().map(Feedback::text), Some("Mentor is fully booked"));
        let form = page.request().expect("form still open");
        assert_eq!(form.date(), Some(date));
        assert_eq!(form.time(), Some(time));
    }

    #[rstest]
    #[tokio::test]
    async fn rejected_token_logs_out() {
        let mut ports = MockPorts::default();
        ports
            .directory
            .expect_list_mentors()
            .returning(|| Err(Error::unauthorized("Token expired")));
        let ctx = ports.into_context(Some(signed_in(mentee())));
        let mut page = FindMentorPage::mount(ctx.clone(), None).ready().expect("signed in");

        assert_eq!(page.load().await, Transition::Navigate(Route::Login));
        assert!(ctx.session.current().expect("readable").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn unmounted_page_discards_late_results(ports: MockPorts) {
        let ctx = ports.into_context(Some(signed_in(mentee())));
        let mut page = FindMentorPage::mount(ctx, None).ready().expect("signed in");
        page.unmount();

        assert_eq!(page.load().await, Transition::Stay);
        assert!(page.mentors().is_empty());
    }
}
