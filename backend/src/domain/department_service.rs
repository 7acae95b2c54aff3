//! Department domain service.
//!
//! Same authorization pattern as jobs: owner or administrator may view and
//! update, only the owner may delete.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::identity_service::require_registered_user;
use crate::domain::ports::{
    DepartmentCommand, DepartmentPersistenceError, DepartmentQuery, DepartmentRepository,
    UserRepository,
};
use crate::domain::{
    Department, DepartmentFields, DepartmentId, Error, UserId, can_mutate, can_view,
};

/// Department service implementing [`DepartmentCommand`] and
/// [`DepartmentQuery`].
#[derive(Clone)]
pub struct DepartmentService<D, U> {
    departments: Arc<D>,
    users: Arc<U>,
}

impl<D, U> DepartmentService<D, U> {
    /// Create a new service with the given repositories.
    pub fn new(departments: Arc<D>, users: Arc<U>) -> Self {
        Self { departments, users }
    }
}

pub(crate) fn map_department_error(error: DepartmentPersistenceError) -> Error {
    match error {
        DepartmentPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("department repository unavailable: {message}"))
        }
        DepartmentPersistenceError::Query { message } => {
            Error::internal(format!("department repository error: {message}"))
        }
        DepartmentPersistenceError::DuplicateEmail { email } => {
            Error::duplicate_email(format!("department email {email} is already in use"))
        }
    }
}

fn department_not_found(id: DepartmentId) -> Error {
    Error::not_found(format!("department {id} not found"))
}

fn department_forbidden(id: DepartmentId) -> Error {
    Error::unauthorized(format!("not allowed to edit department {id}"))
}

impl<D, U> DepartmentService<D, U>
where
    D: DepartmentRepository,
    U: UserRepository,
{
    async fn load(&self, id: DepartmentId) -> Result<Department, Error> {
        self.departments
            .find_by_id(id)
            .await
            .map_err(map_department_error)?
            .ok_or_else(|| department_not_found(id))
    }
}

#[async_trait]
impl<D, U> DepartmentCommand for DepartmentService<D, U>
where
    D: DepartmentRepository,
    U: UserRepository,
{
    async fn create(
        &self,
        identity: UserId,
        fields: DepartmentFields,
    ) -> Result<Department, Error> {
        let draft = fields.validate()?;
        require_registered_user(self.users.as_ref(), "chief", draft.chief).await?;
        let department = self
            .departments
            .insert(identity, &draft)
            .await
            .map_err(map_department_error)?;
        info!(department_id = %department.id(), owner = %identity, "created department");
        Ok(department)
    }

    async fn update(
        &self,
        identity: UserId,
        id: DepartmentId,
        fields: DepartmentFields,
    ) -> Result<Department, Error> {
        let draft = fields.validate()?;
        let existing = self.load(id).await?;
        if !can_mutate(identity, &existing) {
            debug!(department_id = %id, identity = %identity, "department update rejected by guard");
            return Err(department_forbidden(id));
        }
        require_registered_user(self.users.as_ref(), "chief", draft.chief).await?;
        self.departments
            .update_guarded(id, identity, &draft)
            .await
            .map_err(map_department_error)?
            .ok_or_else(|| department_not_found(id))
    }

    async fn delete(&self, identity: UserId, id: DepartmentId) -> Result<(), Error> {
        if self
            .departments
            .delete_owned(id, identity)
            .await
            .map_err(map_department_error)?
        {
            info!(department_id = %id, owner = %identity, "deleted department");
            Ok(())
        } else {
            Err(department_not_found(id))
        }
    }
}

#[async_trait]
impl<D, U> DepartmentQuery for DepartmentService<D, U>
where
    D: DepartmentRepository,
    U: UserRepository,
{
    async fn fetch_for_edit(
        &self,
        identity: UserId,
        id: DepartmentId,
    ) -> Result<Department, Error> {
        let department = self.load(id).await?;
        if can_view(identity, &department) {
            Ok(department)
        } else {
            Err(department_forbidden(id))
        }
    }
}
