//! Driving port for reading a single job.

use async_trait::async_trait;

use crate::domain::{Error, Job, JobId, UserId};

/// Load jobs for the edit form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobQuery: Send + Sync {
    /// Fetch job `id` if `identity` may edit it.
    async fn fetch_for_edit(&self, identity: UserId, id: JobId) -> Result<Job, Error>;
}
