//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversion into domain records happens in
//! the `row_to_*` helpers below, which reject rows violating domain
//! invariants instead of panicking.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::domain::{
    Department, DepartmentDraft, DepartmentId, Email, Job, JobDraft, JobId, NewUser,
    PasswordHash, User, UserId, UserProfile,
};

use super::schema::{departments, jobs, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub position: String,
    pub speciality: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Insertable struct for registering users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
    pub age: i32,
    pub position: &'a str,
    pub speciality: &'a str,
    pub address: &'a str,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(value: &'a NewUser) -> Self {
        Self {
            email: value.email.as_ref(),
            password_hash: value.password_hash.as_str(),
            name: &value.profile.name,
            surname: &value.profile.surname,
            age: value.profile.age,
            position: &value.profile.position,
            speciality: &value.profile.speciality,
            address: &value.profile.address,
        }
    }
}

/// Row struct for reading from the jobs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub id: i32,
    pub title: String,
    pub team_lead: i32,
    pub work_size: i32,
    pub collaborators: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_finished: bool,
    pub owner_id: i32,
}

/// Changeset covering every mutable job column. Inserts add `owner_id`.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = jobs)]
pub(crate) struct JobChanges<'a> {
    pub title: &'a str,
    pub team_lead: i32,
    pub work_size: i32,
    pub collaborators: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_finished: bool,
}

impl<'a> From<&'a JobDraft> for JobChanges<'a> {
    fn from(value: &'a JobDraft) -> Self {
        Self {
            title: &value.title,
            team_lead: value.team_lead.get(),
            work_size: value.work_size,
            collaborators: &value.collaborators,
            start_date: value.start_date,
            end_date: value.end_date,
            is_finished: value.is_finished,
        }
    }
}

/// Row struct for reading from the departments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DepartmentRow {
    pub id: i32,
    pub title: String,
    pub chief: i32,
    pub members: String,
    pub email: String,
    pub owner_id: i32,
}

/// Changeset covering every mutable department column.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = departments)]
pub(crate) struct DepartmentChanges<'a> {
    pub title: &'a str,
    pub chief: i32,
    pub members: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a DepartmentDraft> for DepartmentChanges<'a> {
    fn from(value: &'a DepartmentDraft) -> Self {
        Self {
            title: &value.title,
            chief: value.chief.get(),
            members: &value.members,
            email: value.email.as_ref(),
        }
    }
}

/// Reason a stored row could not be turned into a domain record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("corrupted {table} row {id}: {reason}")]
pub(crate) struct RowConversionError {
    table: &'static str,
    id: i32,
    reason: String,
}

impl RowConversionError {
    fn new(table: &'static str, id: i32, reason: impl ToString) -> Self {
        Self {
            table,
            id,
            reason: reason.to_string(),
        }
    }
}

fn stored_user_id(table: &'static str, row_id: i32, raw: i32) -> Result<UserId, RowConversionError> {
    UserId::new(raw).map_err(|err| RowConversionError::new(table, row_id, err))
}

pub(crate) fn row_to_user(row: UserRow) -> Result<User, RowConversionError> {
    let id = stored_user_id("users", row.id, row.id)?;
    let email = Email::new(&row.email).map_err(|err| RowConversionError::new("users", row.id, err))?;
    let password_hash = PasswordHash::from_phc(row.password_hash)
        .map_err(|err| RowConversionError::new("users", row.id, err))?;
    let new_user = NewUser {
        email,
        password_hash,
        profile: UserProfile {
            name: row.name,
            surname: row.surname,
            age: row.age,
            position: row.position,
            speciality: row.speciality,
            address: row.address,
        },
    };
    Ok(User::new(id, new_user, row.created_at, row.modified_at))
}

pub(crate) fn row_to_job(row: JobRow) -> Result<Job, RowConversionError> {
    let draft = JobDraft {
        title: row.title,
        team_lead: stored_user_id("jobs", row.id, row.team_lead)?,
        work_size: row.work_size,
        collaborators: row.collaborators,
        start_date: row.start_date,
        end_date: row.end_date,
        is_finished: row.is_finished,
    };
    let owner = stored_user_id("jobs", row.id, row.owner_id)?;
    Ok(Job::new(JobId::new(row.id), owner, draft))
}

pub(crate) fn row_to_department(row: DepartmentRow) -> Result<Department, RowConversionError> {
    let email = Email::new(&row.email)
        .map_err(|err| RowConversionError::new("departments", row.id, err))?;
    let draft = DepartmentDraft {
        title: row.title,
        chief: stored_user_id("departments", row.id, row.chief)?,
        members: row.members,
        email,
    };
    let owner = stored_user_id("departments", row.id, row.owner_id)?;
    Ok(Department::new(DepartmentId::new(row.id), owner, draft))
}
