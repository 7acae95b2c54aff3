//! Tests for the job service's validation and ownership rules.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockJobRepository, MockUserRepository};
use crate::domain::{ErrorCode, JobDraft};
use crate::test_support::{job_fields, user, user_id};
use rstest::rstest;

type Service = JobService<MockJobRepository, MockUserRepository>;

fn make_service(jobs: MockJobRepository, users: MockUserRepository) -> Service {
    JobService::new(Arc::new(jobs), Arc::new(users))
}

fn users_with(ids: &'static [i32]) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(move |id| {
        Ok(ids
            .contains(&id.get())
            .then(|| user(id.get(), "Ridley", "Scott")))
    });
    users
}

fn draft(team_leader: i32) -> JobDraft {
    job_fields("deploy modules", team_leader)
        .validate()
        .expect("valid job fields")
}

fn stored_job(id: i32, owner: i32) -> Job {
    Job::new(JobId::new(id), user_id(owner), draft(1))
}

#[tokio::test]
async fn create_assigns_identity_as_owner() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_insert()
        .withf(|owner, draft| owner.get() == 2 && draft.team_lead.get() == 1)
        .times(1)
        .return_once(|owner, draft| Ok(Job::new(JobId::new(1), owner, draft.clone())));

    let job = make_service(jobs, users_with(&[1, 2]))
        .create(user_id(2), job_fields("deploy modules", 1))
        .await
        .expect("create succeeds");
    assert_eq!(job.owner(), user_id(2));
}

#[tokio::test]
async fn create_rejects_unknown_team_lead() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_insert().never();

    let err = make_service(jobs, users_with(&[2]))
        .create(user_id(2), job_fields("deploy modules", 7))
        .await
        .expect_err("unknown lead must fail");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("details");
    assert_eq!(details["field"], "team_leader");
    assert_eq!(details["code"], "unknown_user");
}

#[tokio::test]
async fn create_rejects_reversed_dates() {
    let mut fields = job_fields("deploy modules", 1);
    fields.end_date = Some("2024-04-01".to_owned());
    let err = make_service(MockJobRepository::new(), MockUserRepository::new())
        .create(user_id(2), fields)
        .await
        .expect_err("reversed dates must fail");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(2)]
#[case(1)]
#[tokio::test]
async fn owner_and_admin_may_update(#[case] identity: i32) {
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_job(5, 2))));
    jobs.expect_update_guarded()
        .withf(move |id, who, _| id.get() == 5 && who.get() == identity)
        .times(1)
        .return_once(|id, _, draft| Ok(Some(Job::new(id, user_id(2), draft.clone()))));

    let mut fields = job_fields("deploy modules", 1);
    fields.is_finished = Some("y".to_owned());
    let job = make_service(jobs, users_with(&[1, 2]))
        .update(user_id(identity), JobId::new(5), fields)
        .await
        .expect("update succeeds");
    assert!(job.fields().is_finished);
    assert_eq!(job.owner(), user_id(2));
}

#[tokio::test]
async fn stranger_update_is_unauthorized_and_writes_nothing() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_job(5, 2))));
    jobs.expect_update_guarded().never();

    let err = make_service(jobs, users_with(&[1, 2, 3]))
        .update(user_id(3), JobId::new(5), job_fields("hijack", 1))
        .await
        .expect_err("stranger must be rejected");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "not allowed to edit job 5");
}

#[tokio::test]
async fn update_of_missing_job_is_not_found() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let err = make_service(jobs, users_with(&[1]))
        .update(user_id(1), JobId::new(99), job_fields("ghost", 1))
        .await
        .expect_err("missing job");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn update_racing_a_delete_is_not_found() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_job(5, 2))));
    jobs.expect_update_guarded()
        .times(1)
        .return_once(|_, _, _| Ok(None));

    let err = make_service(jobs, users_with(&[1, 2]))
        .update(user_id(2), JobId::new(5), job_fields("deploy modules", 1))
        .await
        .expect_err("vanished job");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_reports_unmatched_rows_as_not_found(
    #[case] deleted: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let mut jobs = MockJobRepository::new();
    jobs.expect_delete_owned()
        .times(1)
        .return_once(move |_, _| Ok(deleted));

    let result = make_service(jobs, MockUserRepository::new())
        .delete(user_id(1), JobId::new(5))
        .await;
    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[case(2, None)]
#[case(1, None)]
#[case(3, Some(ErrorCode::Unauthorized))]
#[tokio::test]
async fn fetch_for_edit_applies_guard(#[case] identity: i32, #[case] expected: Option<ErrorCode>) {
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_job(5, 2))));

    let result = make_service(jobs, MockUserRepository::new())
        .fetch_for_edit(user_id(identity), JobId::new(5))
        .await;
    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[tokio::test]
async fn connection_failures_are_service_unavailable() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .times(1)
        .return_once(|_| Err(JobPersistenceError::connection("pool exhausted")));

    let err = make_service(jobs, MockUserRepository::new())
        .fetch_for_edit(user_id(1), JobId::new(5))
        .await
        .expect_err("connection failure");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
