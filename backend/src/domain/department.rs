//! Department records: a chief, free-text members and a contact email.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::authorization::Owned;
use super::fields::{FieldError, FieldErrorCode, require_parsed, require_text};
use super::user::{Email, UserId};

/// Identifier assigned to a department by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(i32);

impl DepartmentId {
    /// Wrap a stored identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer identifier.
    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DepartmentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Raw department form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentFields {
    /// Department title.
    pub title: Option<String>,
    /// Chief user id.
    pub chief: Option<String>,
    /// Free-text member list.
    pub members: Option<String>,
    /// Contact email, unique across departments.
    pub email: Option<String>,
}

impl DepartmentFields {
    /// Fields a department submission must carry.
    pub const REQUIRED: &'static [&'static str] = &["title", "chief", "members", "email"];

    /// Validate into a [`DepartmentDraft`].
    pub fn validate(self) -> Result<DepartmentDraft, FieldError> {
        let title = require_text("title", self.title)?;
        let chief: UserId = require_parsed("chief", self.chief, "a user id")?;
        let members = require_text("members", self.members)?;
        let raw_email = require_text("email", self.email)?;
        let email = Email::new(&raw_email).map_err(|err| {
            FieldError::new("email", FieldErrorCode::InvalidValue, err.to_string())
        })?;
        Ok(DepartmentDraft {
            title,
            chief,
            members,
            email,
        })
    }
}

/// Validated mutable fields of a department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentDraft {
    /// Title.
    pub title: String,
    /// Chief.
    pub chief: UserId,
    /// Free-text members.
    pub members: String,
    /// Contact email.
    pub email: Email,
}

/// Persisted department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    id: DepartmentId,
    owner: UserId,
    draft: DepartmentDraft,
}

impl Department {
    /// Assemble a stored department.
    #[must_use]
    pub fn new(id: DepartmentId, owner: UserId, draft: DepartmentDraft) -> Self {
        Self { id, owner, draft }
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> DepartmentId {
        self.id
    }

    /// User who created the department.
    #[must_use]
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Current field values.
    #[must_use]
    pub fn fields(&self) -> &DepartmentDraft {
        &self.draft
    }

    /// Replace every mutable field, keeping id and owner.
    #[must_use]
    pub fn with_fields(self, draft: DepartmentDraft) -> Self {
        Self { draft, ..self }
    }
}

impl Owned for Department {
    fn owner(&self) -> UserId {
        self.owner
    }
}
