//! Sign-in page.

use serde_json::Value;
use tracing::info;
use zeroize::Zeroizing;

use super::{Feedback, PageContext, PageLifetime, Route, Transition};
use crate::domain::{Error, ErrorCode, LoginCredentials};

/// Shown when the backend rejects a login without explaining why.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login page controller.
pub struct LoginPage {
    ctx: PageContext,
    lifetime: PageLifetime,
    email: String,
    password: Zeroizing<String>,
    feedback: Option<Feedback>,
    submitting: bool,
}

impl LoginPage {
    /// Mount the login page; it needs no session.
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            lifetime: PageLifetime::new(),
            email: String::new(),
            password: Zeroizing::new(String::new()),
            feedback: None,
            submitting: false,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.feedback = None;
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Zeroizing::new(password.into());
        self.feedback = None;
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Sign in, store the session, and go to the dashboard.
    pub async fn submit(&mut self) -> Transition {
        let credentials = match LoginCredentials::try_from_parts(&self.email, &self.password) {
            Ok(credentials) => credentials,
            Err(error) => {
                self.feedback = Some(Feedback::Error(error.message().to_owned()));
                return Transition::Stay;
            }
        };

        self.submitting = true;
        let auth = self.ctx.ports.auth.clone();
        let Some(result) = self.lifetime.settle(auth.login(&credentials)).await else {
            return Transition::Stay;
        };
        self.submitting = false;

        let stored = result.and_then(|session| {
            self.ctx.session.establish(&session)?;
            Ok(session)
        });
        match stored {
            Ok(session) => {
                info!(user = %session.email(), "logged in");
                Transition::Navigate(Route::Dashboard)
            }
            Err(error) => {
                self.feedback = Some(Feedback::Error(failure_message(&error)));
                Transition::Stay
            }
        }
    }

    /// Leave for account creation.
    pub fn to_signup(&self) -> Transition {
        Transition::Navigate(Route::Signup)
    }

    /// Leave for the landing page.
    pub fn to_landing(&self) -> Transition {
        Transition::Navigate(Route::Landing)
    }

    pub fn unmount(&self) {
        self.lifetime.unmount();
    }
}

fn failure_message(error: &Error) -> String {
    let server_explained = error
        .details()
        .and_then(|details| details.get("has_detail"))
        .and_then(Value::as_bool)
        .unwrap_or(true);
    let rejected = matches!(error.code(), ErrorCode::Unauthorized | ErrorCode::Server);
    if rejected && !server_explained {
        INVALID_CREDENTIALS.to_owned()
    } else {
        error.message().to_owned()
    }
}
