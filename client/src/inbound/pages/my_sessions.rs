//! Session requests involving the signed-in user, with accept/decline for
//! mentors.
//!
//! Every change re-fetches the full list; nothing is updated optimistically.

use tracing::{info, warn};

use super::{Feedback, Mount, PageContext, PageLifetime, Route, Transition};
use crate::domain::{
    AuthSession, Email, Error, Perspective, SessionRequest, SessionRequestId, StatusDecision,
};

/// One row of the session list as the viewer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub id: SessionRequestId,
    pub perspective: Perspective,
    /// The other party.
    pub counterpart: Email,
    pub subject: String,
    pub message: Option<String>,
    pub status: &'static str,
    /// Long-form schedule, when the request was scheduled.
    pub schedule: Option<String>,
    /// Whether accept/decline controls are offered.
    pub can_respond: bool,
}

impl SessionView {
    fn new(request: &SessionRequest, viewer: &Email) -> Self {
        Self {
            id: request.id.clone(),
            perspective: request.perspective(viewer),
            counterpart: request.counterpart(viewer).clone(),
            subject: request.subject.clone(),
            message: request.message.clone(),
            status: request.status.label(),
            schedule: request.schedule_label(),
            can_respond: request.can_respond(viewer),
        }
    }
}

/// MySessions page controller.
pub struct MySessionsPage {
    ctx: PageContext,
    lifetime: PageLifetime,
    session: AuthSession,
    sessions: Vec<SessionRequest>,
    upcoming: Vec<SessionRequest>,
    feedback: Option<Feedback>,
}

impl MySessionsPage {
    /// Mount the list, redirecting to Login when signed out.
    pub fn mount(ctx: PageContext) -> Mount<Self> {
        let Some(session) = ctx.signed_in() else {
            return Mount::Redirect(Route::Login);
        };
        Mount::Ready(Self {
            ctx,
            lifetime: PageLifetime::new(),
            session,
            sessions: Vec::new(),
            upcoming: Vec::new(),
            feedback: None,
        })
    }

    /// Fetch all sessions, then the upcoming ones.
    ///
    /// An upcoming-list failure leaves that list empty.
    pub async fn load(&mut self) -> Transition {
        let gateway = self.ctx.ports.sessions.clone();
        let email = self.session.user.email.clone();
        let Some(result) = self.lifetime.settle(gateway.list_sessions(&email)).await else {
            return Transition::Stay;
        };
        match result {
            Ok(sessions) => self.sessions = sessions,
            Err(error) => return self.ctx.absorb(error, &mut self.feedback),
        }

        let Some(result) = self.lifetime.settle(gateway.upcoming_sessions(&email)).await else {
            return Transition::Stay;
        };
        match result {
            Ok(upcoming) => self.upcoming = upcoming,
            Err(error) if error.is_unauthorized() => {
                return self.ctx.absorb(error, &mut self.feedback);
            }
            Err(error) => {
                warn!(%error, "upcoming sessions unavailable");
                self.upcoming.clear();
            }
        }
        Transition::Stay
    }

    /// All sessions from the viewer's side.
    pub fn sessions(&self) -> Vec<SessionView> {
        self.view(&self.sessions)
    }

    /// Upcoming sessions from the viewer's side.
    pub fn upcoming(&self) -> Vec<SessionView> {
        self.view(&self.upcoming)
    }

    fn view(&self, requests: &[SessionRequest]) -> Vec<SessionView> {
        let viewer = &self.session.user.email;
        requests.iter().map(|r| SessionView::new(r, viewer)).collect()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Accept or decline a pending request, then re-fetch the list.
    pub async fn respond(&mut self, id: &SessionRequestId, decision: StatusDecision) -> Transition {
        let viewer = &self.session.user.email;
        let checked = self
            .sessions
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| Error::validation("Session not found"))
            .and_then(|request| request.authorise_decision(viewer, decision));
        if let Err(error) = checked {
            self.feedback = Some(Feedback::Error(error.message().to_owned()));
            return Transition::Stay;
        }

        let gateway = self.ctx.ports.sessions.clone();
        let Some(result) = self
            .lifetime
            .settle(gateway.update_status(id, decision.target()))
            .await
        else {
            return Transition::Stay;
        };
        if let Err(error) = result {
            return self.ctx.absorb(error, &mut self.feedback);
        }
        info!(session = %id, status = %decision.target(), "session status updated");
        let transition = self.load().await;
        if transition == Transition::Stay && self.lifetime.is_active() {
            self.feedback = Some(Feedback::Success(decision.confirmation().to_owned()));
        }
        transition
    }

    pub fn unmount(&self) {
        self.lifetime.unmount();
    }
}
