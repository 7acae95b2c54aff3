//! Port abstraction for department persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Department, DepartmentDraft, DepartmentId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by department repository adapters.
    pub enum DepartmentPersistenceError("department repository") {
        /// Another department already uses this email.
        DuplicateEmail {
            /// Contact address already taken.
            email: String,
        } => "department email {email} is already in use",
    }
}

/// Storage for department records. Mirrors [`super::JobRepository`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Persist a new department owned by `owner`.
    async fn insert(
        &self,
        owner: UserId,
        draft: &DepartmentDraft,
    ) -> Result<Department, DepartmentPersistenceError>;

    /// Fetch a department by identifier.
    async fn find_by_id(
        &self,
        id: DepartmentId,
    ) -> Result<Option<Department>, DepartmentPersistenceError>;

    /// Every department, ordered by id.
    async fn list_all(&self) -> Result<Vec<Department>, DepartmentPersistenceError>;

    /// Overwrite department `id` when `identity` owns it or is the
    /// administrator. `None` when no row matched.
    async fn update_guarded(
        &self,
        id: DepartmentId,
        identity: UserId,
        draft: &DepartmentDraft,
    ) -> Result<Option<Department>, DepartmentPersistenceError>;

    /// Delete department `id` only when `owner` created it.
    async fn delete_owned(
        &self,
        id: DepartmentId,
        owner: UserId,
    ) -> Result<bool, DepartmentPersistenceError>;
}
