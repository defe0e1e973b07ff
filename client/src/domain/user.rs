//! User identity, role, and profile records.
//!
//! The backend owns these records; the client keeps a denormalised copy of
//! the signed-in user in the session store and fetches everyone else on
//! demand.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email did not look like `local@domain`.
    #[error("email must contain a local part and a domain separated by '@'")]
    MalformedEmail,
    /// Role string was not one of `mentor`, `mentee`, `both`.
    #[error("role must be one of mentor, mentee, both")]
    UnknownRole,
}

/// Email address; the identity key for every user.
///
/// ## Invariants
/// - Stored trimmed.
/// - Contains exactly one `@` with non-empty text on both sides.
///
/// # Examples
/// ```
/// use studierbridge_client::domain::Email;
///
/// let email = Email::new("  ada@example.org ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.org");
/// assert!(Email::new("no-at-sign").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(UserValidationError::MalformedEmail),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Marketplace role chosen at signup and editable from the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Offers tutoring.
    Mentor,
    /// Seeks tutoring.
    Mentee,
    /// Both offers and seeks tutoring.
    Both,
}

impl Role {
    /// Every role, in the order the signup page offers them.
    pub const ALL: [Self; 3] = [Self::Mentee, Self::Mentor, Self::Both];

    /// Wire and storage spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mentor => "mentor",
            Self::Mentee => "mentee",
            Self::Both => "both",
        }
    }

    /// Capitalised label for display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mentor => "Mentor",
            Self::Mentee => "Mentee",
            Self::Both => "Both",
        }
    }

    /// Mentees look for mentors.
    pub const fn can_browse_mentors(self) -> bool {
        matches!(self, Self::Mentee | Self::Both)
    }

    /// Mentors look for mentees.
    pub const fn can_browse_mentees(self) -> bool {
        matches!(self, Self::Mentor | Self::Both)
    }

    /// Only mentors publish availability.
    pub const fn can_set_availability(self) -> bool {
        matches!(self, Self::Mentor | Self::Both)
    }

    /// Grade choices offered at signup. Mentors must be in high school.
    pub fn grade_options(self) -> &'static [&'static str] {
        const HIGH_SCHOOL: [&str; 4] = ["9th", "10th", "11th", "12th"];
        const ALL_GRADES: [&str; 13] = [
            "K", "1st", "2nd", "3rd", "4th", "5th", "6th", "7th", "8th", "9th", "10th", "11th",
            "12th",
        ];
        match self {
            Self::Mentor => &HIGH_SCHOOL,
            Self::Mentee | Self::Both => &ALL_GRADES,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mentor" => Ok(Self::Mentor),
            "mentee" => Ok(Self::Mentee),
            "both" => Ok(Self::Both),
            _ => Err(UserValidationError::UnknownRole),
        }
    }
}

/// A marketplace participant as the backend reports it.
///
/// Optional profile fields decode to empty values when the backend omits
/// them, so directory listings with sparse records still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend record identifier, when reported.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Identity key.
    pub email: Email,
    /// Display name (`"<first> <last>"` at signup).
    pub name: String,
    /// Marketplace role.
    pub role: Role,
    /// School grade, free text such as `10th`.
    #[serde(default)]
    pub grade: String,
    /// School name.
    #[serde(default)]
    pub school: String,
    /// Postal code.
    #[serde(rename = "zipCode", alias = "zip_code", default)]
    pub zip_code: String,
    /// Subjects taught (mentors) or wanted (mentees).
    #[serde(default)]
    pub subjects: Vec<String>,
    /// Hosted profile picture, if uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
}

impl User {
    /// First character of the name, upper-cased, for avatar placeholders.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }

    /// Whether this user lists `subject` among their subjects.
    pub fn teaches(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }
}
