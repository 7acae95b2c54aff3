//! PostgreSQL-backed `JobRepository` implementation using Diesel ORM.
//!
//! Ownership rules live in the `WHERE` clauses: updates match the owner or
//! the administrator, deletes match the owner only.

use async_trait::async_trait;
use diesel::dsl;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{JobPersistenceError, JobRepository};
use crate::domain::{Job, JobDraft, JobId, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{JobChanges, JobRow, RowConversionError, row_to_job};
use super::pool::{DbPool, PoolError};
use super::schema::jobs;

/// Diesel-backed implementation of the [`JobRepository`] port.
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> JobPersistenceError {
    JobPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> JobPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => JobPersistenceError::connection(message),
        DieselFailure::UniqueViolation => JobPersistenceError::query("unique constraint violated"),
        DieselFailure::Query(message) => JobPersistenceError::query(message),
    }
}

fn map_row_error(error: RowConversionError) -> JobPersistenceError {
    JobPersistenceError::query(error.to_string())
}

type ById = dsl::Filter<jobs::table, dsl::Eq<jobs::id, i32>>;
type EditableBy = dsl::Filter<
    ById,
    dsl::Or<dsl::Eq<jobs::owner_id, i32>, dsl::AsExprOf<bool, Bool>>,
>;
type OwnedBy = dsl::Filter<ById, dsl::Eq<jobs::owner_id, i32>>;

/// Rows `identity` may overwrite: its own, or any for the administrator.
fn editable_by(id: JobId, identity: UserId) -> EditableBy {
    jobs::table.filter(jobs::id.eq(id.get())).filter(
        jobs::owner_id
            .eq(identity.get())
            .or(identity.is_admin().into_sql::<Bool>()),
    )
}

/// Rows `owner` may delete. The administrator gets no override here.
fn owned_by(id: JobId, owner: UserId) -> OwnedBy {
    jobs::table
        .filter(jobs::id.eq(id.get()))
        .filter(jobs::owner_id.eq(owner.get()))
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn insert(&self, owner: UserId, draft: &JobDraft) -> Result<Job, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: JobRow = diesel::insert_into(jobs::table)
            .values((JobChanges::from(draft), jobs::owner_id.eq(owner.get())))
            .returning(JobRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_job(row).map_err(map_row_error)
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<JobRow> = jobs::table
            .filter(jobs::id.eq(id.get()))
            .select(JobRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_job).transpose().map_err(map_row_error)
    }

    async fn list_all(&self) -> Result<Vec<Job>, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<JobRow> = jobs::table
            .order(jobs::id.asc())
            .select(JobRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(row_to_job)
            .collect::<Result<_, _>>()
            .map_err(map_row_error)
    }

    async fn update_guarded(
        &self,
        id: JobId,
        identity: UserId,
        draft: &JobDraft,
    ) -> Result<Option<Job>, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<JobRow> = diesel::update(editable_by(id, identity))
            .set(JobChanges::from(draft))
            .returning(JobRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_job).transpose().map_err(map_row_error)
    }

    async fn delete_owned(&self, id: JobId, owner: UserId) -> Result<bool, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(owned_by(id, owner))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
