//! Durable storage for the agent session identifier.
//!
//! The identifier is an opaque token issued by the agent service.  It is
//! stored verbatim and never validated.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{Error, Result};

/// File name used under the per-user data directory.
pub const SESSION_FILE_NAME: &str = "session_id";

/// Directory created under the per-user data directory.
pub const APP_DIR_NAME: &str = "propchat";

/// A single persisted key holding the session identifier.
pub trait SessionStore: Send + Sync {
    /// Returns the stored identifier, if any.
    fn get(&self) -> Result<Option<String>>;

    /// Stores `id`, replacing any previous identifier.
    fn set(&self, id: &str) -> Result<()>;

    /// Removes the stored identifier.
    fn clear(&self) -> Result<()>;
}

/// Stores the identifier as the raw contents of one file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store backed by `path`.  The file need not exist.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location,
    /// `<data_dir>/propchat/session_id`.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(default_session_path()?))
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::io(
                format!("failed to read session file {}", self.path.display()),
                err,
            )),
        }
    }

    fn set(&self, id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| {
                Error::io(
                    format!("failed to create directory {}", parent.display()),
                    err,
                )
            })?;
        }
        fs::write(&self.path, id).map_err(|err| {
            Error::io(
                format!("failed to write session file {}", self.path.display()),
                err,
            )
        })
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::io(
                format!("failed to remove session file {}", self.path.display()),
                err,
            )),
        }
    }
}

/// Keeps the identifier in memory only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    id: Mutex<Option<String>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `id`.
    pub fn with_id<S: Into<String>>(id: S) -> Self {
        Self {
            id: Mutex::new(Some(id.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.id.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn set(&self, id: &str) -> Result<()> {
        *self.id.lock().unwrap_or_else(PoisonError::into_inner) = Some(id.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.id.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn get(&self) -> Result<Option<String>> {
        (**self).get()
    }

    fn set(&self, id: &str) -> Result<()> {
        (**self).set(id)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

/// The default session file, `<data_dir>/propchat/session_id`.
pub fn default_session_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| Error::config("no per-user data directory on this platform"))?;
    Ok(data_dir.join(APP_DIR_NAME).join(SESSION_FILE_NAME))
}
