//! Driving port for resolving session principals.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for user lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Resolve a session's user id. Absence is `Ok(None)`, never an error.
    async fn resolve(&self, user_id: UserId) -> Result<Option<User>, Error>;
}
