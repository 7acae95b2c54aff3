//! Driving port for job mutations.

use async_trait::async_trait;

use crate::domain::{Error, Job, JobFields, JobId, UserId};

/// Create, update and delete jobs on behalf of an authenticated identity.
///
/// # Authorization
///
/// - Any authenticated identity may create; the job is owned by it.
/// - Update requires the owner or the administrator. A rejected guard is
///   `Unauthorized`; an absent job is `NotFound`.
/// - Delete is restricted to the owner. Anyone else sees `NotFound`, exactly
///   as if the job did not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobCommand: Send + Sync {
    /// Validate `fields` and store a new job.
    async fn create(&self, identity: UserId, fields: JobFields) -> Result<Job, Error>;

    /// Validate `fields` and overwrite job `id`.
    async fn update(&self, identity: UserId, id: JobId, fields: JobFields) -> Result<Job, Error>;

    /// Delete job `id`.
    async fn delete(&self, identity: UserId, id: JobId) -> Result<(), Error>;
}
