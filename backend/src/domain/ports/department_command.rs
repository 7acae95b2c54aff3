//! Driving port for department mutations.

use async_trait::async_trait;

use crate::domain::{Department, DepartmentFields, DepartmentId, Error, UserId};

/// Create, update and delete departments. Authorization mirrors
/// [`super::JobCommand`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentCommand: Send + Sync {
    /// Validate `fields` and store a new department.
    async fn create(&self, identity: UserId, fields: DepartmentFields)
    -> Result<Department, Error>;

    /// Validate `fields` and overwrite department `id`.
    async fn update(
        &self,
        identity: UserId,
        id: DepartmentId,
        fields: DepartmentFields,
    ) -> Result<Department, Error>;

    /// Delete department `id` (owner only).
    async fn delete(&self, identity: UserId, id: DepartmentId) -> Result<(), Error>;
}
