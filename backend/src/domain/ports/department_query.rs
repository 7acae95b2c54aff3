//! Driving port for reading a single department.

use async_trait::async_trait;

use crate::domain::{Department, DepartmentId, Error, UserId};

/// Load departments for the edit form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentQuery: Send + Sync {
    /// Fetch department `id` if `identity` may edit it.
    async fn fetch_for_edit(&self, identity: UserId, id: DepartmentId)
    -> Result<Department, Error>;
}
