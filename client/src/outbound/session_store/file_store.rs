//! Session store persisted as two files in a client-owned directory.
//!
//! `token` holds the raw bearer token and `user.json` the cached user
//! record. Both are written on save and removed on clear; a directory holding
//! only one of them reads back as signed out. On unix the directory is created
//! owner-only and both files are written with mode `0600`.

use std::fs::DirBuilder;
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use cap_std::fs::OpenOptionsExt;
use cap_std::{
    ambient_authority,
    fs::{Dir, OpenOptions},
};
use tracing::debug;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{AuthSession, BearerToken, User};

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// File-backed [`SessionStore`].
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    root: PathBuf,
}

impl FileSessionStore {
    /// Store files under `root`; the directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the session files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn open_existing(&self) -> Result<Option<Dir>, SessionStoreError> {
        match Dir::open_ambient_dir(&self.root, ambient_authority()) {
            Ok(dir) => Ok(Some(dir)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(self.io_error(&error)),
        }
    }

    fn io_error(&self, error: &io::Error) -> SessionStoreError {
        SessionStoreError::io(format!("{}: {error}", self.root.display()))
    }

    fn read_optional(&self, dir: &Dir, name: &str) -> Result<Option<String>, SessionStoreError> {
        match dir.read_to_string(name) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(self.io_error(&error)),
        }
    }

    fn create_root(&self) -> Result<(), SessionStoreError> {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(DIR_MODE);
        builder
            .create(&self.root)
            .map_err(|error| self.io_error(&error))
    }

    /// Replace `name` with a freshly created private file.
    fn write_private(&self, dir: &Dir, name: &str, contents: &[u8]) -> Result<(), SessionStoreError> {
        self.remove_optional(dir, name)?;
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(FILE_MODE);
        let mut file = dir
            .open_with(name, &options)
            .map_err(|error| self.io_error(&error))?;
        file.write_all(contents)
            .map_err(|error| self.io_error(&error))
    }

    fn remove_optional(&self, dir: &Dir, name: &str) -> Result<(), SessionStoreError> {
        match dir.remove_file(name) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(self.io_error(&error)),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<AuthSession>, SessionStoreError> {
        let Some(dir) = self.open_existing()? else {
            return Ok(None);
        };
        let token = self
            .read_optional(&dir, TOKEN_FILE)?
            .and_then(|raw| BearerToken::new(raw.trim()));
        let Some(token) = token else {
            return Ok(None);
        };
        let Some(raw_user) = self.read_optional(&dir, USER_FILE)? else {
            return Ok(None);
        };
        let user: User = serde_json::from_str(&raw_user)
            .map_err(|error| SessionStoreError::serialization(error.to_string()))?;
        Ok(Some(AuthSession::new(user, token)))
    }

    fn save(&self, session: &AuthSession) -> Result<(), SessionStoreError> {
        let user = serde_json::to_string_pretty(&session.user)
            .map_err(|error| SessionStoreError::serialization(error.to_string()))?;
        self.create_root()?;
        let dir = Dir::open_ambient_dir(&self.root, ambient_authority())
            .map_err(|error| self.io_error(&error))?;
        self.write_private(&dir, USER_FILE, user.as_bytes())?;
        self.write_private(&dir, TOKEN_FILE, session.token.expose().as_bytes())?;
        debug!(root = %self.root.display(), "session persisted");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let Some(dir) = self.open_existing()? else {
            return Ok(());
        };
        self.remove_optional(&dir, TOKEN_FILE)?;
        self.remove_optional(&dir, USER_FILE)?;
        Ok(())
    }
}
