//! Job domain service.
//!
//! Implements the job driving ports: validates submitted field sets, checks
//! the team lead reference, and applies the ownership guard before any write.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::identity_service::require_registered_user;
use crate::domain::ports::{JobCommand, JobPersistenceError, JobQuery, JobRepository, UserRepository};
use crate::domain::{Error, Job, JobFields, JobId, UserId, can_mutate, can_view};

/// Job service implementing [`JobCommand`] and [`JobQuery`].
#[derive(Clone)]
pub struct JobService<J, U> {
    jobs: Arc<J>,
    users: Arc<U>,
}

impl<J, U> JobService<J, U> {
    /// Create a new service with the given repositories.
    pub fn new(jobs: Arc<J>, users: Arc<U>) -> Self {
        Self { jobs, users }
    }
}

pub(crate) fn map_job_error(error: JobPersistenceError) -> Error {
    match error {
        JobPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("job repository unavailable: {message}"))
        }
        JobPersistenceError::Query { message } => {
            Error::internal(format!("job repository error: {message}"))
        }
    }
}

fn job_not_found(id: JobId) -> Error {
    Error::not_found(format!("job {id} not found"))
}

fn job_forbidden(id: JobId) -> Error {
    Error::unauthorized(format!("not allowed to edit job {id}"))
}

impl<J, U> JobService<J, U>
where
    J: JobRepository,
    U: UserRepository,
{
    async fn load(&self, id: JobId) -> Result<Job, Error> {
        self.jobs
            .find_by_id(id)
            .await
            .map_err(map_job_error)?
            .ok_or_else(|| job_not_found(id))
    }
}

#[async_trait]
impl<J, U> JobCommand for JobService<J, U>
where
    J: JobRepository,
    U: UserRepository,
{
    async fn create(&self, identity: UserId, fields: JobFields) -> Result<Job, Error> {
        let draft = fields.validate()?;
        require_registered_user(self.users.as_ref(), "team_leader", draft.team_lead).await?;
        let job = self
            .jobs
            .insert(identity, &draft)
            .await
            .map_err(map_job_error)?;
        info!(job_id = %job.id(), owner = %identity, "created job");
        Ok(job)
    }

    async fn update(&self, identity: UserId, id: JobId, fields: JobFields) -> Result<Job, Error> {
        let draft = fields.validate()?;
        let existing = self.load(id).await?;
        if !can_mutate(identity, &existing) {
            debug!(job_id = %id, identity = %identity, "job update rejected by guard");
            return Err(job_forbidden(id));
        }
        require_registered_user(self.users.as_ref(), "team_leader", draft.team_lead).await?;
        // The write repeats the ownership predicate; a row deleted since the
        // load surfaces as not found.
        self.jobs
            .update_guarded(id, identity, &draft)
            .await
            .map_err(map_job_error)?
            .ok_or_else(|| job_not_found(id))
    }

    async fn delete(&self, identity: UserId, id: JobId) -> Result<(), Error> {
        let deleted = self
            .jobs
            .delete_owned(id, identity)
            .await
            .map_err(map_job_error)?;
        if deleted {
            info!(job_id = %id, owner = %identity, "deleted job");
            Ok(())
        } else {
            Err(job_not_found(id))
        }
    }
}

#[async_trait]
impl<J, U> JobQuery for JobService<J, U>
where
    J: JobRepository,
    U: UserRepository,
{
    async fn fetch_for_edit(&self, identity: UserId, id: JobId) -> Result<Job, Error> {
        let job = self.load(id).await?;
        if can_view(identity, &job) {
            Ok(job)
        } else {
            Err(job_forbidden(id))
        }
    }
}

#[cfg(test)]
#[path = "job_service_tests.rs"]
mod tests;
