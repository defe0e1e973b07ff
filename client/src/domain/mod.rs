//! Domain primitives, derived page state, and ports.
//!
//! Purpose: Define strongly typed entities mirrored from the tutoring
//! backend, the local form logic that decides what may be sent, and the
//! traits outbound adapters implement. The backend owns every entity; the
//! client only holds transient copies plus the signed-in session.
//!
//! Public surface:
//! - Error (alias to `error::Error`): closed error taxonomy with a message.
//! - User, Role, Email: marketplace participants.
//! - SessionRequest, AvailabilitySlot, Notification: backend records.
//! - SessionRequestForm, AvailabilityEditor: derived selection state.
//! - SessionHandle: the application-session context handed to pages.

pub mod app_session;
pub mod auth;
pub mod availability;
pub mod error;
pub mod notification;
pub mod ports;
pub mod profile;
pub mod scheduling;
pub mod session_request;
pub mod subjects;
pub mod time;
pub mod user;

pub use self::app_session::SessionHandle;
pub use self::auth::{AuthSession, BearerToken, LoginCredentials, SignupForm, SignupRequest};
pub use self::availability::{
    AvailabilityEditor, AvailabilitySlot, DateOption, DateWindow, SlotField, available_dates,
    slots_on, time_options,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::notification::{Notification, NotificationFeed, NotificationId, NotificationKind};
pub use self::profile::{MIN_PASSWORD_LEN, ProfileForm, ProfilePicture, ProfileUpdate};
pub use self::scheduling::SessionRequestForm;
pub use self::session_request::{
    DEFERRED_SCHEDULING_NOTE, NewSessionRequest, Perspective, ScheduledSessionRequest,
    SessionRequest, SessionRequestId, SessionRequestSubmission, SessionStatus, StatusDecision,
};
pub use self::subjects::{
    PROFILE_SUBJECTS, SUBJECT_CATEGORIES, SubjectMatch, SubjectSelection, category_subjects,
    search_catalogue,
};
pub use self::time::{
    ClockTime, TimeRange, TimeValidationError, Timestamp, long_date_label, short_date_label,
};
pub use self::user::{Email, Role, User, UserValidationError};

/// Convenient client result alias.
///
/// # Examples
/// ```
/// use studierbridge_client::domain::{ClientResult, Error};
///
/// fn guard(signed_in: bool) -> ClientResult<()> {
///     if signed_in { Ok(()) } else { Err(Error::unauthorized("Please log in")) }
/// }
/// assert!(guard(false).is_err());
/// ```
pub type ClientResult<T> = Result<T, Error>;
