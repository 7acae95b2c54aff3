//! Port abstraction for job persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Job, JobDraft, JobId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by job repository adapters.
    pub enum JobPersistenceError("job repository") {}
}

/// Storage for job records. Each mutation runs in a single transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Persist a new job owned by `owner`.
    async fn insert(&self, owner: UserId, draft: &JobDraft) -> Result<Job, JobPersistenceError>;

    /// Fetch a job by identifier.
    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, JobPersistenceError>;

    /// Every job, ordered by id.
    async fn list_all(&self) -> Result<Vec<Job>, JobPersistenceError>;

    /// Overwrite every mutable field of job `id` when `identity` owns it or
    /// is the administrator.
    ///
    /// Returns `None` when no row matched the id and ownership predicate.
    async fn update_guarded(
        &self,
        id: JobId,
        identity: UserId,
        draft: &JobDraft,
    ) -> Result<Option<Job>, JobPersistenceError>;

    /// Delete job `id` only when `owner` created it.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete_owned(&self, id: JobId, owner: UserId) -> Result<bool, JobPersistenceError>;
}
