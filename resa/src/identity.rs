//! User accounts and authenticated sessions.
//!
//! The directory persists registered member accounts and authenticates
//! callers. The administrator account comes from configuration, is checked
//! before the member list, and is never written to the user file. Admin
//! rights travel as a capability on the [`Session`] value handed back by a
//! successful login; nothing in the library consults global state to
//! decide whether a caller is the administrator.

use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::config::AdminConfig;
use crate::error::{Error, Result};
use crate::reservation::validated_field;
use crate::store::{lock_read, lock_write, Storage};

/// A registered member account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub(crate) user_id: String,
    pub(crate) password: String,
}

impl User {
    pub(crate) const fn from_parts(user_id: String, password: String) -> Self {
        Self { user_id, password }
    }

    /// Returns the account identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user {}", self.user_id)
    }
}

/// An authenticated caller.
///
/// A session is a plain value: it carries the caller's identity and
/// whether the login matched the configured administrator. Operations
/// that need admin rights take a `&Session` and check the capability.
///
/// # Examples
///
/// ```
/// use resa::{AdminConfig, MemoryStorage, UserDirectory};
///
/// let directory =
///     UserDirectory::open(Box::new(MemoryStorage::new()), AdminConfig::default()).unwrap();
/// let session = directory.authenticate("admin", "admin123").unwrap();
/// assert!(session.is_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
    admin: bool,
}

impl Session {
    /// Returns the identity this session was authenticated as.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns true if this session holds the admin capability.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.admin
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.admin {
            write!(f, "session for {} (admin)", self.user_id)
        } else {
            write!(f, "session for {}", self.user_id)
        }
    }
}

/// The directory of registered accounts.
pub struct UserDirectory {
    users: RwLock<Vec<User>>,
    storage: Box<dyn Storage<User>>,
    admin: AdminConfig,
}

impl UserDirectory {
    /// Opens a directory over the given storage, loading existing accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage fails to load.
    pub fn open(storage: Box<dyn Storage<User>>, admin: AdminConfig) -> Result<Self> {
        let users = storage.load()?;
        log::debug!("user directory loaded: {} account(s)", users.len());
        Ok(Self {
            users: RwLock::new(users),
            storage,
            admin,
        })
    }

    /// Registers a new member account and persists it.
    ///
    /// The configured admin username is reserved and cannot be registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty or comma-bearing id or
    /// password, [`Error::AlreadyExists`] if the id is taken, and any
    /// storage error from the save.
    pub fn register(&self, user_id: &str, password: &str) -> Result<User> {
        let user = User::from_parts(
            validated_field("user id", user_id)?,
            validated_field("password", password)?,
        );
        let mut users = lock_write(&self.users);
        if user.user_id == self.admin.username || users.iter().any(|u| u.user_id == user.user_id) {
            return Err(Error::AlreadyExists {
                resource: format!("user {}", user.user_id),
            });
        }
        users.push(user.clone());
        if let Err(e) = self.storage.save(&users) {
            users.pop();
            return Err(e);
        }
        log::info!("registered user {}", user.user_id);
        Ok(user)
    }

    /// Authenticates a caller and returns a session on success.
    ///
    /// The configured administrator credentials are checked before the
    /// member list, so an admin login works even with an empty directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] when no account matches. The
    /// error does not say whether the id or the password was wrong.
    pub fn authenticate(&self, user_id: &str, password: &str) -> Result<Session> {
        if user_id == self.admin.username && password == self.admin.password {
            return Ok(Session {
                user_id: user_id.to_string(),
                admin: true,
            });
        }
        let users = lock_read(&self.users);
        let matched = users
            .iter()
            .any(|u| u.user_id == user_id && u.password == password);
        if matched {
            Ok(Session {
                user_id: user_id.to_string(),
                admin: false,
            })
        } else {
            Err(Error::InvalidCredentials)
        }
    }

    /// Returns true if a member account with the given id exists.
    #[must_use]
    pub fn user_exists(&self, user_id: &str) -> bool {
        lock_read(&self.users).iter().any(|u| u.user_id == user_id)
    }
}
