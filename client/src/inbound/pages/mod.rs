//! Page controllers, one per route.
//!
//! Each controller owns its local UI state and is built from a
//! [`PageContext`]. Protected pages check the session when mounted and
//! answer [`Mount::Redirect`] to Login when nobody is signed in. User intents
//! are plain method calls that report where to go next as a [`Transition`].

pub mod dashboard;
pub mod find_mentee;
pub mod find_mentor;
pub mod landing;
pub mod lifetime;
pub mod login;
pub mod my_sessions;
pub mod notifications;
pub mod route;
pub mod set_availability;
pub mod signup;
pub mod state;
pub mod subject_selection;
#[cfg(test)]
mod test_support;
pub mod update_profile;

pub use dashboard::{DEFAULT_POLL_INTERVAL, DashboardPage, QuickAction};
pub use find_mentee::FindMenteePage;
pub use find_mentor::FindMentorPage;
pub use landing::LandingPage;
pub use lifetime::PageLifetime;
pub use login::LoginPage;
pub use my_sessions::{MySessionsPage, SessionView};
pub use notifications::NotificationsPage;
pub use route::{Feedback, Mount, Route, Transition};
pub use set_availability::SetAvailabilityPage;
pub use signup::{SignupPage, SignupStep};
pub use state::{PageContext, PagePorts};
pub use subject_selection::SubjectSelectionPage;
pub use update_profile::UpdateProfilePage;
