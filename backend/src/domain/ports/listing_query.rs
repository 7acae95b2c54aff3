//! Driving port for the public listings.

use async_trait::async_trait;

use crate::domain::{Department, DepartmentId, Error, Job, JobId, UserId};

/// A job's team lead matches no registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("team lead {team_lead} matches no registered user")]
pub struct MissingTeamLead {
    /// The dangling reference.
    pub team_lead: UserId,
}

/// One row of the work listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedJob {
    /// Job identifier.
    pub id: JobId,
    /// Job title.
    pub title: String,
    /// Team lead's `"surname name"`, or the dangling reference.
    pub leader: Result<String, MissingTeamLead>,
    /// Whole days between start and end.
    pub duration_days: i64,
    /// Hours of work.
    pub work_size: i32,
    /// Free-text collaborators.
    pub collaborators: String,
    /// Completion flag.
    pub is_finished: bool,
    /// The underlying record.
    pub job: Job,
}

/// One row of the department listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedDepartment {
    /// Department identifier.
    pub id: DepartmentId,
    /// Chief's `"surname name"`; `None` when the chief is not registered.
    pub chief_name: Option<String>,
    /// The underlying record.
    pub department: Department,
}

/// Read-only listings shown to every visitor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingQuery: Send + Sync {
    /// All jobs joined with their team leads, ordered by job id.
    ///
    /// A dangling team lead never fails the listing.
    async fn build_listing(&self) -> Result<Vec<ListedJob>, Error>;

    /// All departments with their chief's name, ordered by id.
    async fn list_departments(&self) -> Result<Vec<ListedDepartment>, Error>;
}
