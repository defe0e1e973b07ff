//! Mentee directory for mentors.

use super::{Feedback, Mount, PageContext, PageLifetime, Route, Transition};
use crate::domain::{Email, User};

/// Shown when a mentor tries to contact a mentee.
pub const CONTACT_PLACEHOLDER: &str = "Messaging feature coming soon!";

/// FindMentee page controller.
pub struct FindMenteePage {
    ctx: PageContext,
    lifetime: PageLifetime,
    mentees: Vec<User>,
    feedback: Option<Feedback>,
}

impl FindMenteePage {
    /// Mount the directory, redirecting to Login when signed out.
    pub fn mount(ctx: PageContext) -> Mount<Self> {
        if ctx.signed_in().is_none() {
            return Mount::Redirect(Route::Login);
        }
        Mount::Ready(Self {
            ctx,
            lifetime: PageLifetime::new(),
            mentees: Vec::new(),
            feedback: None,
        })
    }

    /// Fetch the mentee directory.
    pub async fn load(&mut self) -> Transition {
        let directory = self.ctx.ports.directory.clone();
        let Some(result) = self.lifetime.settle(directory.list_mentees()).await else {
            return Transition::Stay;
        };
        match result {
            Ok(mentees) => {
                self.mentees = mentees;
                Transition::Stay
            }
            Err(error) => self.ctx.absorb(error, &mut self.feedback),
        }
    }

    pub fn mentees(&self) -> &[User] {
        &self.mentees
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Contact a mentee. Messaging is not available yet.
    pub fn contact(&mut self, mentee: &Email) {
        if self.mentees.iter().any(|m| &m.email == mentee) {
            self.feedback = Some(Feedback::Success(CONTACT_PLACEHOLDER.to_owned()));
        }
    }

    pub fn unmount(&self) {
        self.lifetime.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{MockPorts, email, mentee, mentor, signed_in};
    use super::*;
    use crate::domain::Error;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn lists_mentees_and_offers_placeholder_contact() {
        let mut ports = MockPorts::default();
        ports
            .directory
            .expect_list_mentees()
            .times(1)
            .returning(|| Ok(vec![mentee()]));
        let ctx = ports.into_context(Some(signed_in(mentor())));
        let mut page = FindMenteePage::mount(ctx).ready().expect("signed in");

        assert_eq!(page.load().await, Transition::Stay);
        assert_eq!(page.mentees(), [mentee()]);
        page.contact(&email("mentee@example.org"));
        assert_eq!(page.feedback().map(Feedback::text), Some(CONTACT_PLACEHOLDER));
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_failure_is_shown_inline() {
        let mut ports = MockPorts::default();
        ports
            .directory
            .expect_list_mentees()
            .returning(|| Err(Error::network("Failed to fetch mentees")));
        let ctx = ports.into_context(Some(signed_in(mentor())));
        let mut page = FindMenteePage::mount(ctx).ready().expect("signed in");

        assert_eq!(page.load().await, Transition::Stay);
        assert_eq!(page.feedback().map(Feedback::text), Some("Failed to fetch mentees"));
    }
}
