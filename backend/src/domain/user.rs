//! User data model.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::password::PasswordHash;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Identifiers are generated by the store and always positive.
    InvalidId,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email does not look like `local@domain.tld`.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a positive integer"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like name@example.org"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Identifier of the administrator account. This identity may edit any
/// record but, like everyone else, only delete its own.
pub const ADMIN_USER_ID: UserId = UserId(1);

/// Stable user identifier assigned by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UserId(i32);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: i32) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw integer identifier.
    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }

    /// Whether this identity is the administrator.
    #[must_use]
    pub fn is_admin(self) -> bool {
        self == ADMIN_USER_ID
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i32 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i32>()
            .map_err(|_| UserValidationError::InvalidId)?;
        Self::new(raw)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised email address: trimmed and lowercased.
///
/// # Examples
/// ```
/// use worklog::domain::Email;
///
/// let email = Email::new("  Scott@Mars.org ").expect("valid email");
/// assert_eq!(email.as_ref(), "scott@mars.org");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
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

/// Descriptive fields captured at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Age in years, always positive.
    pub age: i32,
    /// Job position.
    pub position: String,
    /// Speciality or trade.
    pub speciality: String,
    /// Postal address or module number.
    pub address: String,
}

impl UserProfile {
    /// Name shown in listings: surname first, then given name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.surname, self.name)
    }
}

/// Registered application user.
///
/// ## Invariants
/// - `id` is positive and never changes.
/// - `email` is unique across users.
/// - `password_hash` is a salted Argon2id PHC string; plain passwords are
///   never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    password_hash: PasswordHash,
    profile: UserProfile,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl User {
    /// Assemble a persisted user from its stored parts.
    #[must_use]
    pub fn new(
        id: UserId,
        new_user: NewUser,
        created_at: DateTime<Utc>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        let NewUser {
            email,
            password_hash,
            profile,
        } = new_user;
        Self {
            id,
            email,
            password_hash,
            profile,
            created_at,
            modified_at,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login email.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Descriptive profile fields.
    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Listing name, `"surname name"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.profile.display_name()
    }

    /// Registration timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    #[must_use]
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}

/// User awaiting insertion; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login email.
    pub email: Email,
    /// Salted password hash.
    pub password_hash: PasswordHash,
    /// Descriptive fields.
    pub profile: UserProfile,
}
