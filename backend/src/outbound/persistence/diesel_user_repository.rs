//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, RowConversionError, UserRow, row_to_user};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

fn map_failure(failure: DieselFailure) -> UserPersistenceError {
    match failure {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation => UserPersistenceError::query("unique constraint violated"),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_failure(classify_diesel_error(error))
}

fn map_row_error(error: RowConversionError) -> UserPersistenceError {
    UserPersistenceError::query(error.to_string())
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match classify_diesel_error(err) {
                // The unique email index is the only one on this table.
                DieselFailure::UniqueViolation => {
                    UserPersistenceError::duplicate_email(user.email.as_ref())
                }
                failure => map_failure(failure),
            })?;

        row_to_user(row).map_err(map_row_error)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.get()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose().map_err(map_row_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose().map_err(map_row_error)
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(row_to_user)
            .collect::<Result<_, _>>()
            .map_err(map_row_error)
    }
}
