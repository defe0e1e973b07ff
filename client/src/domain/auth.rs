//! Authentication primitives: credentials, signup payloads, and the
//! authenticated session held by the client.
//!
//! Forms build these through validating constructors so a page never sends
//! a request the backend would reject for a missing field.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{Email, Error, Role, User};

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is a well-formed [`Email`].
/// - `password` is non-empty; whitespace is preserved.
///
/// # Examples
/// ```
/// use studierbridge_client::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada@example.org", "hunter22").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.org");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, Error> {
        let email = Email::new(email).map_err(|err| Error::validation(err.to_string()))?;
        if password.is_empty() {
            return Err(Error::validation("password must not be empty"));
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Account email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password as entered.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer token issued at login or signup.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Wrap a token string; blank tokens are rejected.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return None;
        }
        Some(Self(Zeroizing::new(raw)))
    }

    /// Raw token for the `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// The signed-in user's profile together with their token.
///
/// Both halves are persisted together and cleared together; a page treats
/// the absence of either as "not signed in".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Cached copy of the signed-in user's record.
    pub user: User,
    /// Token presented on every request.
    pub token: BearerToken,
}

impl AuthSession {
    /// Pair a user with their token.
    pub fn new(user: User, token: BearerToken) -> Self {
        Self { user, token }
    }

    /// Email of the signed-in user.
    pub fn email(&self) -> &Email {
        &self.user.email
    }
}

/// Raw signup form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Grade, one of [`Role::grade_options`].
    pub grade: String,
    /// School name.
    pub school: String,
    /// Postal code.
    pub zip_code: String,
}

/// Signup payload sent to the backend.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    /// `"<first> <last>"`.
    pub name: String,
    /// Account email.
    pub email: Email,
    /// Chosen password.
    pub password: String,
    /// School grade.
    pub grade: String,
    /// Marketplace role.
    pub role: Role,
    /// School name.
    pub school: String,
    /// Postal code.
    #[serde(rename = "zipCode")]
    pub zip_code: String,
}

impl SignupRequest {
    /// Validate a completed form for the chosen role.
    ///
    /// # Examples
    /// ```
    /// use studierbridge_client::domain::{Role, SignupForm, SignupRequest};
    ///
    /// let form = SignupForm {
    ///     first_name: "Ada".into(),
    ///     last_name: "Lovelace".into(),
    ///     email: "ada@example.org".into(),
    ///     password: "secret1".into(),
    ///     grade: "11th".into(),
    ///     ..SignupForm::default()
    /// };
    /// let request = SignupRequest::from_form(Role::Mentor, &form).unwrap();
    /// assert_eq!(request.name, "Ada Lovelace");
    /// ```
    pub fn from_form(role: Role, form: &SignupForm) -> Result<Self, Error> {
        let first = form.first_name.trim();
        let last = form.last_name.trim();
        if first.is_empty() || last.is_empty() {
            return Err(Error::validation("Please enter your first and last name"));
        }
        let email = Email::new(&form.email).map_err(|err| Error::validation(err.to_string()))?;
        if form.password.is_empty() {
            return Err(Error::validation("Please choose a password"));
        }
        if !role.grade_options().iter().any(|grade| *grade == form.grade) {
            return Err(Error::validation("Please select your grade"));
        }
        Ok(Self {
            name: format!("{first} {last}"),
            email,
            password: form.password.clone(),
            grade: form.grade.clone(),
            role,
            school: form.school.trim().to_owned(),
            zip_code: form.zip_code.trim().to_owned(),
        })
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("grade", &self.grade)
            .field("role", &self.role)
            .field("school", &self.school)
            .field("zip_code", &self.zip_code)
            .finish()
    }
}
