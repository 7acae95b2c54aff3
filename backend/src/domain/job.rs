//! Job records: a unit of tracked work with a team lead and date range.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::authorization::Owned;
use super::fields::{
    FieldError, FieldErrorCode, checkbox, require_date, require_parsed, require_positive,
    require_text,
};
use super::user::UserId;

/// Identifier assigned to a job by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(i32);

impl JobId {
    /// Wrap a stored identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer identifier.
    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Raw job form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFields {
    /// Job title.
    pub job: Option<String>,
    /// Team lead user id.
    pub team_leader: Option<String>,
    /// Size of the work in hours.
    pub work_size: Option<String>,
    /// Free-text list of collaborators.
    pub collaborators: Option<String>,
    /// First day of work.
    pub start_date: Option<String>,
    /// Last day of work.
    pub end_date: Option<String>,
    /// Completion checkbox.
    pub is_finished: Option<String>,
}

impl JobFields {
    /// Fields a job submission must carry.
    pub const REQUIRED: &'static [&'static str] = &[
        "job",
        "team_leader",
        "work_size",
        "collaborators",
        "start_date",
        "end_date",
    ];

    /// Validate into a [`JobDraft`].
    ///
    /// Whether the team lead exists is checked by the job service.
    pub fn validate(self) -> Result<JobDraft, FieldError> {
        let title = require_text("job", self.job)?;
        let team_lead: UserId = require_parsed("team_leader", self.team_leader, "a user id")?;
        let work_size = require_positive("work_size", self.work_size)?;
        let collaborators = require_text("collaborators", self.collaborators)?;
        let start_date = require_date("start_date", self.start_date)?;
        let end_date = require_date("end_date", self.end_date)?;
        if end_date < start_date {
            return Err(FieldError::new(
                "end_date",
                FieldErrorCode::InvalidRange,
                "end_date must not be before start_date",
            ));
        }
        Ok(JobDraft {
            title,
            team_lead,
            work_size,
            collaborators,
            start_date,
            end_date,
            is_finished: checkbox(self.is_finished.as_deref()),
        })
    }
}

/// Validated mutable fields of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    /// Job title.
    pub title: String,
    /// Team lead.
    pub team_lead: UserId,
    /// Hours of work, positive.
    pub work_size: i32,
    /// Free-text collaborators.
    pub collaborators: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day, never before `start_date`.
    pub end_date: NaiveDate,
    /// Completion flag.
    pub is_finished: bool,
}

/// Persisted job.
///
/// ## Invariants
/// - `id` and `owner` never change after creation.
/// - Duration is derived from the dates and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    id: JobId,
    owner: UserId,
    draft: JobDraft,
}

impl Job {
    /// Assemble a stored job.
    #[must_use]
    pub fn new(id: JobId, owner: UserId, draft: JobDraft) -> Self {
        Self { id, owner, draft }
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> JobId {
        self.id
    }

    /// User who created the job.
    #[must_use]
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Current field values.
    #[must_use]
    pub fn fields(&self) -> &JobDraft {
        &self.draft
    }

    /// Whole days between start and end.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use worklog::domain::{Job, JobDraft, JobId, UserId};
    ///
    /// let draft = JobDraft {
    ///     title: "deploy modules".into(),
    ///     team_lead: UserId::new(1).unwrap(),
    ///     work_size: 15,
    ///     collaborators: "2, 3".into(),
    ///     start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2024, 5, 11).unwrap(),
    ///     is_finished: false,
    /// };
    /// let job = Job::new(JobId::new(1), UserId::new(2).unwrap(), draft);
    /// assert_eq!(job.duration_days(), 10);
    /// ```
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.draft.end_date - self.draft.start_date).num_days()
    }

    /// Replace every mutable field, keeping id and owner.
    #[must_use]
    pub fn with_fields(self, draft: JobDraft) -> Self {
        Self { draft, ..self }
    }
}

impl Owned for Job {
    fn owner(&self) -> UserId {
        self.owner
    }
}
