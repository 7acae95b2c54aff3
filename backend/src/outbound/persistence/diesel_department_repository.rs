//! PostgreSQL-backed `DepartmentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DepartmentPersistenceError, DepartmentRepository};
use crate::domain::{Department, DepartmentDraft, DepartmentId, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{DepartmentChanges, DepartmentRow, RowConversionError, row_to_department};
use super::pool::{DbPool, PoolError};
use super::schema::departments;

/// Diesel-backed implementation of the [`DepartmentRepository`] port.
#[derive(Clone)]
pub struct DieselDepartmentRepository {
    pool: DbPool,
}

impl DieselDepartmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DepartmentPersistenceError {
    DepartmentPersistenceError::connection(pool_error_message(error))
}

/// Writes pass the submitted email so a unique violation can name it.
fn map_write_error(error: diesel::result::Error, email: &str) -> DepartmentPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => DepartmentPersistenceError::connection(message),
        DieselFailure::UniqueViolation => DepartmentPersistenceError::duplicate_email(email),
        DieselFailure::Query(message) => DepartmentPersistenceError::query(message),
    }
}

fn map_read_error(error: diesel::result::Error) -> DepartmentPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => DepartmentPersistenceError::connection(message),
        DieselFailure::UniqueViolation => {
            DepartmentPersistenceError::query("unique constraint violated")
        }
        DieselFailure::Query(message) => DepartmentPersistenceError::query(message),
    }
}

fn map_row_error(error: RowConversionError) -> DepartmentPersistenceError {
    DepartmentPersistenceError::query(error.to_string())
}

type ById = dsl::Filter<departments::table, dsl::Eq<departments::id, i32>>;
type EditableBy = dsl::Filter<
    ById,
    dsl::Or<dsl::Eq<departments::owner_id, i32>, dsl::AsExprOf<bool, Bool>>,
>;
type OwnedBy = dsl::Filter<ById, dsl::Eq<departments::owner_id, i32>>;

/// Rows `identity` may overwrite: its own, or any for the administrator.
fn editable_by(id: DepartmentId, identity: UserId) -> EditableBy {
    departments::table.filter(departments::id.eq(id.get())).filter(
        departments::owner_id
            .eq(identity.get())
            .or(identity.is_admin().into_sql::<Bool>()),
    )
}

/// Rows `owner` may delete. The administrator gets no override here.
fn owned_by(id: DepartmentId, owner: UserId) -> OwnedBy {
    departments::table
        .filter(departments::id.eq(id.get()))
        .filter(departments::owner_id.eq(owner.get()))
}

#[async_trait]
impl DepartmentRepository for DieselDepartmentRepository {
    async fn insert(
        &self,
        owner: UserId,
        draft: &DepartmentDraft,
    ) -> Result<Department, DepartmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: DepartmentRow = diesel::insert_into(departments::table)
            .values((
                DepartmentChanges::from(draft),
                departments::owner_id.eq(owner.get()),
            ))
            .returning(DepartmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, draft.email.as_ref()))?;

        row_to_department(row).map_err(map_row_error)
    }

    async fn find_by_id(
        &self,
        id: DepartmentId,
    ) -> Result<Option<Department>, DepartmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DepartmentRow> = departments::table
            .filter(departments::id.eq(id.get()))
            .select(DepartmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_department).transpose().map_err(map_row_error)
    }

    async fn list_all(&self) -> Result<Vec<Department>, DepartmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DepartmentRow> = departments::table
            .order(departments::id.asc())
            .select(DepartmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter()
            .map(row_to_department)
            .collect::<Result<_, _>>()
            .map_err(map_row_error)
    }

    async fn update_guarded(
        &self,
        id: DepartmentId,
        identity: UserId,
        draft: &DepartmentDraft,
    ) -> Result<Option<Department>, DepartmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DepartmentRow> = diesel::update(editable_by(id, identity))
            .set(DepartmentChanges::from(draft))
            .returning(DepartmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, draft.email.as_ref()))?;

        row.map(row_to_department).transpose().map_err(map_row_error)
    }

    async fn delete_owned(
        &self,
        id: DepartmentId,
        owner: UserId,
    ) -> Result<bool, DepartmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(owned_by(id, owner))
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;

        Ok(deleted > 0)
    }
}
