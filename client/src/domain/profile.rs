//! Profile editing: the update payload and the picture upload.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Email, Error, Role, User};

/// Minimum length accepted for a new password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Profile update payload.
///
/// `new_password` is omitted from the JSON body when unchanged.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// Account being edited.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// School grade.
    pub grade: String,
    /// Marketplace role.
    pub role: Role,
    /// Replacement password, when the user chose one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

impl fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileUpdate")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("grade", &self.grade)
            .field("role", &self.role)
            .field(
                "new_password",
                &self.new_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Editable profile fields as typed by the user.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    /// Display name.
    pub name: String,
    /// School grade.
    pub grade: String,
    /// Marketplace role; `None` keeps the current one.
    pub role: Option<Role>,
    /// New password; blank means unchanged.
    pub new_password: String,
    /// Repeat of the new password.
    pub confirm_password: String,
}

impl fmt::Debug for ProfileForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileForm")
            .field("name", &self.name)
            .field("grade", &self.grade)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl ProfileForm {
    /// Pre-fill the form from the cached user.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            grade: user.grade.clone(),
            role: Some(user.role),
            ..Self::default()
        }
    }

    /// Validate the form into a payload for `user`.
    ///
    /// A new password must match its confirmation and be at least
    /// [`MIN_PASSWORD_LEN`] characters.
    pub fn to_update(&self, user: &User) -> Result<ProfileUpdate, Error> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::validation("Please enter your name"));
        }
        let new_password = if self.new_password.is_empty() && self.confirm_password.is_empty() {
            None
        } else {
            if self.new_password != self.confirm_password {
                return Err(Error::validation("Passwords do not match"));
            }
            if self.new_password.chars().count() < MIN_PASSWORD_LEN {
                return Err(Error::validation(format!(
                    "Password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            Some(self.new_password.clone())
        };
        Ok(ProfileUpdate {
            email: user.email.clone(),
            name: name.to_owned(),
            grade: self.grade.clone(),
            role: self.role.unwrap_or(user.role),
            new_password,
        })
    }
}

/// Image chosen for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ProfilePicture {
    /// File name reported to the backend.
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ProfilePicture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfilePicture")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ProfilePicture {
    /// Guess the MIME type from the file extension.
    pub fn from_file(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let content_type = match extension.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => "application/octet-stream",
        }
        .to_owned();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }
}
