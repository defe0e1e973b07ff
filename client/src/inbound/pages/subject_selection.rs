//! Subject picker for the signed-in user's profile.

use tracing::info;

use super::{Feedback, Mount, PageContext, PageLifetime, Route, Transition};
use crate::domain::{AuthSession, PROFILE_SUBJECTS, SubjectSelection, User};

/// SubjectSelection page controller.
pub struct SubjectSelectionPage {
    ctx: PageContext,
    lifetime: PageLifetime,
    session: AuthSession,
    selection: SubjectSelection,
    feedback: Option<Feedback>,
    saving: bool,
}

impl SubjectSelectionPage {
    /// Mount the picker pre-filled with the cached user's subjects.
    pub fn mount(ctx: PageContext) -> Mount<Self> {
        let Some(session) = ctx.signed_in() else {
            return Mount::Redirect(Route::Login);
        };
        let selection = SubjectSelection::new(session.user.subjects.clone());
        Mount::Ready(Self {
            ctx,
            lifetime: PageLifetime::new(),
            session,
            selection,
            feedback: None,
            saving: false,
        })
    }

    /// Subjects offered for selection.
    pub fn options(&self) -> &'static [&'static str] {
        &PROFILE_SUBJECTS
    }

    /// Prompt for the user's role.
    pub fn prompt(&self) -> &'static str {
        SubjectSelection::prompt(self.session.user.role)
    }

    pub fn selection(&self) -> &SubjectSelection {
        &self.selection
    }

    pub fn toggle(&mut self, subject: &str) {
        self.selection.toggle(subject);
        self.feedback = None;
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Save the selection and refresh the cached user.
    pub async fn save(&mut self) -> Transition {
        let subjects = match self.selection.validated() {
            Ok(subjects) => subjects,
            Err(error) => {
                self.feedback = Some(Feedback::Error(error.message().to_owned()));
                return Transition::Stay;
            }
        };

        self.saving = true;
        let profiles = self.ctx.ports.profiles.clone();
        let email = self.session.user.email.clone();
        let Some(result) = self
            .lifetime
            .settle(profiles.update_subjects(&email, &subjects))
            .await
        else {
            return Transition::Stay;
        };
        self.saving = false;

        let refreshed = result.and_then(|()| {
            self.ctx.session.replace_user(User {
                subjects,
                ..self.session.user.clone()
            })
        });
        match refreshed {
            Ok(session) => {
                info!(user = %session.email(), count = session.user.subjects.len(), "subjects updated");
                self.session = session;
                self.feedback = Some(Feedback::Success("Subjects updated successfully!".to_owned()));
                Transition::Navigate(Route::Dashboard)
            }
            Err(error) => self.ctx.absorb(error, &mut self.feedback),
        }
    }

    pub fn unmount(&self) {
        self.lifetime.unmount();
    }
}
