//! Routes, navigation outcomes, and inline page feedback.

use std::fmt;

/// Every page the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Signup,
    Login,
    Dashboard,
    FindMentor,
    FindMentee,
    SubjectSelection,
    MySessions,
    UpdateProfile,
    Notifications,
    SetAvailability,
}

impl Route {
    /// All routes in navigation-menu order.
    pub const ALL: [Self; 11] = [
        Self::Landing,
        Self::Signup,
        Self::Login,
        Self::Dashboard,
        Self::FindMentor,
        Self::FindMentee,
        Self::SubjectSelection,
        Self::MySessions,
        Self::UpdateProfile,
        Self::Notifications,
        Self::SetAvailability,
    ];

    /// URL path of the route.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Signup => "/signup",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::FindMentor => "/find-mentor",
            Self::FindMentee => "/find-mentee",
            Self::SubjectSelection => "/subjects",
            Self::MySessions => "/my-sessions",
            Self::UpdateProfile => "/update-profile",
            Self::Notifications => "/notifications",
            Self::SetAvailability => "/set-availability",
        }
    }

    /// Parse a URL path; a trailing slash is ignored.
    ///
    /// # Examples
    /// ```
    /// use studierbridge_client::inbound::pages::Route;
    ///
    /// assert_eq!(Route::from_path("/my-sessions/"), Some(Route::MySessions));
    /// assert_eq!(Route::from_path("/nowhere"), None);
    /// ```
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalised = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Self::ALL.into_iter().find(|route| route.path() == normalised)
    }

    /// Whether the route requires a signed-in session.
    pub const fn is_protected(self) -> bool {
        !matches!(self, Self::Landing | Self::Signup | Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What a page asks the shell to do after handling an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Remain on the current page.
    Stay,
    /// Show another page.
    Navigate(Route),
    /// Show FindMentor with a subject hint chosen on the landing page.
    FindMentorFor(String),
}

impl Transition {
    /// Target route, if the transition leaves the page.
    pub fn route(&self) -> Option<Route> {
        match self {
            Self::Stay => None,
            Self::Navigate(route) => Some(*route),
            Self::FindMentorFor(_) => Some(Route::FindMentor),
        }
    }
}

/// Result of mounting a page.
#[derive(Debug)]
pub enum Mount<P> {
    /// The page is ready to load and render.
    Ready(P),
    /// The page refused to render; show this route instead.
    Redirect(Route),
}

impl<P> Mount<P> {
    /// The mounted page, if no redirect happened.
    pub fn ready(self) -> Option<P> {
        match self {
            Self::Ready(page) => Some(page),
            Self::Redirect(_) => None,
        }
    }
}

/// Inline message shown on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// A failure, shown verbatim.
    Error(String),
    /// A confirmation.
    Success(String),
}

impl Feedback {
    /// The text to display.
    pub fn text(&self) -> &str {
        match self {
            Self::Error(text) | Self::Success(text) => text,
        }
    }

    /// Whether this reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
