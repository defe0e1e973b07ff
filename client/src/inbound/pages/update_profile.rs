//! Profile editor with optional picture upload.
//!
//! The cached user is replaced with whatever the server returns after each
//! successful step, so a failed upload still leaves the cache matching the
//! server.

use tracing::{info, warn};

use super::{Feedback, Mount, PageContext, PageLifetime, Route, Transition};
use crate::domain::{AuthSession, Error, ProfileForm, ProfilePicture, Role, User};

/// UpdateProfile page controller.
pub struct UpdateProfilePage {
    ctx: PageContext,
    lifetime: PageLifetime,
    session: AuthSession,
    form: ProfileForm,
    picture: Option<ProfilePicture>,
    feedback: Option<Feedback>,
    saving: bool,
}

impl UpdateProfilePage {
    /// Mount the editor pre-filled from the cached user.
    pub fn mount(ctx: PageContext) -> Mount<Self> {
        let Some(session) = ctx.signed_in() else {
            return Mount::Redirect(Route::Login);
        };
        let form = ProfileForm::from_user(&session.user);
        Mount::Ready(Self {
            ctx,
            lifetime: PageLifetime::new(),
            session,
            form,
            picture: None,
            feedback: None,
            saving: false,
        })
    }

    /// Refresh the cached user from the server and re-fill the form.
    ///
    /// A failed fetch keeps the cached copy.
    pub async fn load(&mut self) -> Transition {
        let profiles = self.ctx.ports.profiles.clone();
        let email = self.session.user.email.clone();
        let Some(result) = self.lifetime.settle(profiles.fetch_profile(&email)).await else {
            return Transition::Stay;
        };
        match result.and_then(|user| self.remember(user)) {
            Ok(()) => self.form = ProfileForm::from_user(&self.session.user),
            Err(error) if error.is_unauthorized() => {
                return self.ctx.absorb(error, &mut self.feedback);
            }
            Err(error) => warn!(%error, "profile refresh failed; using cached copy"),
        }
        Transition::Stay
    }

    pub fn user(&self) -> &User {
        &self.session.user
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileForm {
        self.feedback = None;
        &mut self.form
    }

    /// Grades offered for the role being edited.
    pub fn grade_options(&self) -> &'static [&'static str] {
        self.form.role.unwrap_or(self.session.user.role).grade_options()
    }

    /// Role choices.
    pub fn role_options(&self) -> [Role; 3] {
        Role::ALL
    }

    /// Choose a picture to upload on save, or `None` to drop the choice.
    pub fn set_picture(&mut self, picture: Option<ProfilePicture>) {
        self.picture = picture;
    }

    pub fn picture(&self) -> Option<&ProfilePicture> {
        self.picture.as_ref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Save the profile, then upload the picture when one was chosen.
    pub async fn save(&mut self) -> Transition {
        let update = match self.form.to_update(&self.session.user) {
            Ok(update) => update,
            Err(error) => {
                self.feedback = Some(Feedback::Error(error.message().to_owned()));
                return Transition::Stay;
            }
        };

        self.saving = true;
        let profiles = self.ctx.ports.profiles.clone();
        let Some(result) = self.lifetime.settle(profiles.update_profile(&update)).await else {
            return Transition::Stay;
        };
        if let Err(error) = result.and_then(|user| self.remember(user)) {
            self.saving = false;
            return self.ctx.absorb(error, &mut self.feedback);
        }

        if let Some(picture) = self.picture.clone() {
            let email = self.session.user.email.clone();
            let Some(result) = self
                .lifetime
                .settle(profiles.upload_profile_picture(&email, picture))
                .await
            else {
                return Transition::Stay;
            };
            if let Err(error) = result.and_then(|user| self.remember(user)) {
                self.saving = false;
                return self.ctx.absorb(error, &mut self.feedback);
            }
            self.picture = None;
        }

        self.saving = false;
        self.form.new_password.clear();
        self.form.confirm_password.clear();
        info!(user = %self.session.email(), "profile updated");
        self.feedback = Some(Feedback::Success("Profile updated successfully!".to_owned()));
        Transition::Navigate(Route::Dashboard)
    }

    fn remember(&mut self, user: User) -> Result<(), Error> {
        self.session = self.ctx.session.replace_user(user)?;
        Ok(())
    }

    pub fn unmount(&self) {
        self.lifetime.unmount();
    }
}
