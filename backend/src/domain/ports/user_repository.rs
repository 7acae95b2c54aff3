//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError("user repository") {
        /// The unique email constraint rejected the insert.
        DuplicateEmail {
            /// Address that is already registered.
            email: String,
        } => "email {email} is already registered",
    }
}

/// Storage for registered users.
///
/// Users are created at registration and never deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, assigning its id and timestamps.
    ///
    /// Email uniqueness is enforced by the store and reported as
    /// [`UserPersistenceError::DuplicateEmail`].
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by normalised email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Every user, ordered by id.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;
}
