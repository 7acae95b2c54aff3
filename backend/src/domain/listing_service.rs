//! Listing aggregator: joins jobs and departments to their users.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::department_service::map_department_error;
use crate::domain::identity_service::map_user_error;
use crate::domain::job_service::map_job_error;
use crate::domain::ports::{
    DepartmentRepository, JobRepository, ListedDepartment, ListedJob, ListingQuery,
    MissingTeamLead, UserRepository,
};
use crate::domain::{Error, User, UserId};

/// Builds the public job and department listings.
#[derive(Clone)]
pub struct ListingService<J, D, U> {
    jobs: Arc<J>,
    departments: Arc<D>,
    users: Arc<U>,
}

impl<J, D, U> ListingService<J, D, U> {
    /// Create a new service with the given repositories.
    pub fn new(jobs: Arc<J>, departments: Arc<D>, users: Arc<U>) -> Self {
        Self {
            jobs,
            departments,
            users,
        }
    }
}

impl<J, D, U> ListingService<J, D, U>
where
    U: UserRepository,
{
    async fn user_index(&self) -> Result<HashMap<UserId, User>, Error> {
        let users = self.users.list_all().await.map_err(map_user_error)?;
        Ok(users.into_iter().map(|user| (user.id(), user)).collect())
    }
}

#[async_trait]
impl<J, D, U> ListingQuery for ListingService<J, D, U>
where
    J: JobRepository,
    D: DepartmentRepository,
    U: UserRepository,
{
    async fn build_listing(&self) -> Result<Vec<ListedJob>, Error> {
        let jobs = self.jobs.list_all().await.map_err(map_job_error)?;
        let index = self.user_index().await?;

        Ok(jobs
            .into_iter()
            .map(|job| {
                let fields = job.fields();
                let team_lead = fields.team_lead;
                let leader = index
                    .get(&team_lead)
                    .map(User::display_name)
                    .ok_or(MissingTeamLead { team_lead });
                if leader.is_err() {
                    warn!(job_id = %job.id(), %team_lead, "job references a missing team lead");
                }
                ListedJob {
                    id: job.id(),
                    title: fields.title.clone(),
                    leader,
                    duration_days: job.duration_days(),
                    work_size: fields.work_size,
                    collaborators: fields.collaborators.clone(),
                    is_finished: fields.is_finished,
                    job,
                }
            })
            .collect())
    }

    async fn list_departments(&self) -> Result<Vec<ListedDepartment>, Error> {
        let departments = self
            .departments
            .list_all()
            .await
            .map_err(map_department_error)?;
        let index = self.user_index().await?;

        Ok(departments
            .into_iter()
            .map(|department| ListedDepartment {
                id: department.id(),
                chief_name: index
                    .get(&department.fields().chief)
                    .map(User::display_name),
                department,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        JobPersistenceError, MockDepartmentRepository, MockJobRepository, MockUserRepository,
    };
    use crate::domain::{Department, DepartmentId, ErrorCode, Job, JobId};
    use crate::test_support::{department_fields, job_fields, user, user_id};

    type Service = ListingService<MockJobRepository, MockDepartmentRepository, MockUserRepository>;

    fn make_service(
        jobs: MockJobRepository,
        departments: MockDepartmentRepository,
        users: MockUserRepository,
    ) -> Service {
        ListingService::new(Arc::new(jobs), Arc::new(departments), Arc::new(users))
    }

    fn job(id: i32, team_leader: i32) -> Job {
        let draft = job_fields("deploy modules", team_leader)
            .validate()
            .expect("valid job");
        Job::new(JobId::new(id), user_id(2), draft)
    }

    fn scott_only() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_list_all()
            .times(1)
            .return_once(|| Ok(vec![user(1, "Ridley", "Scott")]));
        users
    }

    #[tokio::test]
    async fn listing_joins_team_leads_and_flags_missing_ones() {
        let mut jobs = MockJobRepository::new();
        jobs.expect_list_all()
            .times(1)
            .return_once(|| Ok(vec![job(1, 1), job(2, 9)]));

        let rows = make_service(jobs, MockDepartmentRepository::new(), scott_only())
            .build_listing()
            .await
            .expect("listing succeeds");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].leader.as_deref(), Ok("Scott Ridley"));
        assert_eq!(rows[0].duration_days, 3);
        assert_eq!(
            rows[1].leader,
            Err(MissingTeamLead {
                team_lead: user_id(9)
            })
        );
    }

    #[tokio::test]
    async fn empty_listing_is_not_an_error() {
        let mut jobs = MockJobRepository::new();
        jobs.expect_list_all().times(1).return_once(|| Ok(Vec::new()));
        let mut users = MockUserRepository::new();
        users.expect_list_all().times(1).return_once(|| Ok(Vec::new()));

        let rows = make_service(jobs, MockDepartmentRepository::new(), users)
            .build_listing()
            .await
            .expect("listing succeeds");
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn listing_propagates_store_failures() {
        let mut jobs = MockJobRepository::new();
        jobs.expect_list_all()
            .times(1)
            .return_once(|| Err(JobPersistenceError::query("relation missing")));

        let err = make_service(jobs, MockDepartmentRepository::new(), MockUserRepository::new())
            .build_listing()
            .await
            .expect_err("store failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn departments_resolve_chief_names() {
        let mut departments = MockDepartmentRepository::new();
        departments.expect_list_all().times(1).return_once(|| {
            let known = department_fields("geology", 1, "geo@mars.org")
                .validate()
                .expect("valid");
            let orphaned = department_fields("biology", 5, "bio@mars.org")
                .validate()
                .expect("valid");
            Ok(vec![
                Department::new(DepartmentId::new(1), user_id(1), known),
                Department::new(DepartmentId::new(2), user_id(1), orphaned),
            ])
        });

        let rows = make_service(MockJobRepository::new(), departments, scott_only())
            .list_departments()
            .await
            .expect("department listing");
        assert_eq!(rows[0].chief_name.as_deref(), Some("Scott Ridley"));
        assert_eq!(rows[1].chief_name, None);
    }
}
