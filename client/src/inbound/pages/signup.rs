//! Two-step account creation: pick a role, then fill in details.

use tracing::info;

use super::{Feedback, PageContext, PageLifetime, Route, Transition};
use crate::domain::{Role, SignupForm, SignupRequest};

/// Where the user is in the signup flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStep {
    /// Choosing between mentee, mentor, and both.
    ChooseRole,
    /// Entering details for the chosen role.
    Details(Role),
}

/// Signup page controller.
pub struct SignupPage {
    ctx: PageContext,
    lifetime: PageLifetime,
    step: SignupStep,
    form: SignupForm,
    feedback: Option<Feedback>,
    submitting: bool,
}

impl SignupPage {
    /// Mount the signup page; it needs no session.
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            lifetime: PageLifetime::new(),
            step: SignupStep::ChooseRole,
            form: SignupForm::default(),
            feedback: None,
            submitting: false,
        }
    }

    pub fn step(&self) -> SignupStep {
        self.step
    }

    /// Pick a role and move on to the details step.
    ///
    /// A grade that the new role does not offer is cleared.
    pub fn choose_role(&mut self, role: Role) {
        if !role.grade_options().iter().any(|grade| *grade == self.form.grade) {
            self.form.grade.clear();
        }
        self.step = SignupStep::Details(role);
        self.feedback = None;
    }

    /// Return to the role choice, keeping typed details.
    pub fn back(&mut self) {
        self.step = SignupStep::ChooseRole;
    }

    /// Grades selectable for the chosen role.
    pub fn grade_options(&self) -> &'static [&'static str] {
        match self.step {
            SignupStep::ChooseRole => &[],
            SignupStep::Details(role) => role.grade_options(),
        }
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SignupForm {
        self.feedback = None;
        &mut self.form
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Create the account, store the session, and go to the dashboard.
    pub async fn submit(&mut self) -> Transition {
        let SignupStep::Details(role) = self.step else {
            self.feedback = Some(Feedback::Error("Please choose a role".to_owned()));
            return Transition::Stay;
        };
        let request = match SignupRequest::from_form(role, &self.form) {
            Ok(request) => request,
            Err(error) => {
                self.feedback = Some(Feedback::Error(error.message().to_owned()));
                return Transition::Stay;
            }
        };

        self.submitting = true;
        let auth = self.ctx.ports.auth.clone();
        let Some(result) = self.lifetime.settle(auth.signup(&request)).await else {
            return Transition::Stay;
        };
        self.submitting = false;

        let stored = result.and_then(|session| {
            self.ctx.session.establish(&session)?;
            Ok(session)
        });
        match stored {
            Ok(session) => {
                info!(user = %session.email(), role = %role, "account created");
                self.feedback = Some(Feedback::Success("Signup successful!".to_owned()));
                Transition::Navigate(Route::Dashboard)
            }
            Err(error) => {
                self.feedback = Some(Feedback::Error(error.message().to_owned()));
                Transition::Stay
            }
        }
    }

    /// Leave for the login page.
    pub fn to_login(&self) -> Transition {
        Transition::Navigate(Route::Login)
    }

    pub fn unmount(&self) {
        self.lifetime.unmount();
    }
}
