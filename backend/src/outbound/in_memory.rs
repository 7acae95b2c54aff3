//! In-process store backing every repository port.
//!
//! Used when no database URL is configured (local development and the
//! integration tests). Tables live behind one `std::sync::Mutex`; the guard
//! is never held across an `.await`, so every operation is atomic.
//!
//! Unlike PostgreSQL, the store does not enforce user foreign keys. Jobs that
//! point at unknown team leads can therefore exist here and are surfaced by
//! the listing as missing team leads.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    DepartmentPersistenceError, DepartmentRepository, JobPersistenceError, JobRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Department, DepartmentDraft, DepartmentId, Job, JobDraft, JobId, NewUser, User, UserId,
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    jobs: BTreeMap<JobId, Job>,
    departments: BTreeMap<DepartmentId, Department>,
    last_user_id: i32,
    last_job_id: i32,
    last_department_id: i32,
}

/// Shared in-memory tables implementing [`UserRepository`],
/// [`JobRepository`] and [`DepartmentRepository`].
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryStore {
    /// Create an empty store stamping users with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

fn next_id(counter: &mut i32) -> Result<i32, String> {
    *counter = counter
        .checked_add(1)
        .ok_or_else(|| "in-memory identifier space exhausted".to_owned())?;
    Ok(*counter)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut tables = self.lock().map_err(UserPersistenceError::query)?;
        if tables.users.values().any(|existing| existing.email() == &user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        let raw = next_id(&mut tables.last_user_id).map_err(UserPersistenceError::query)?;
        let id = UserId::new(raw).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let now = self.clock.utc();
        let stored = User::new(id, user.clone(), now, now);
        tables.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables
            .users
            .values()
            .find(|user| user.email().as_ref() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables.users.values().cloned().collect())
    }
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn insert(&self, owner: UserId, draft: &JobDraft) -> Result<Job, JobPersistenceError> {
        let mut tables = self.lock().map_err(JobPersistenceError::query)?;
        let id = JobId::new(next_id(&mut tables.last_job_id).map_err(JobPersistenceError::query)?);
        let job = Job::new(id, owner, draft.clone());
        tables.jobs.insert(id, job.clone());
        Ok(job)
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, JobPersistenceError> {
        let tables = self.lock().map_err(JobPersistenceError::query)?;
        Ok(tables.jobs.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Job>, JobPersistenceError> {
        let tables = self.lock().map_err(JobPersistenceError::query)?;
        Ok(tables.jobs.values().cloned().collect())
    }

    async fn update_guarded(
        &self,
        id: JobId,
        identity: UserId,
        draft: &JobDraft,
    ) -> Result<Option<Job>, JobPersistenceError> {
        let mut tables = self.lock().map_err(JobPersistenceError::query)?;
        let Some(slot) = tables
            .jobs
            .get_mut(&id)
            .filter(|job| job.owner() == identity || identity.is_admin())
        else {
            return Ok(None);
        };
        *slot = slot.clone().with_fields(draft.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete_owned(&self, id: JobId, owner: UserId) -> Result<bool, JobPersistenceError> {
        let mut tables = self.lock().map_err(JobPersistenceError::query)?;
        let owned = tables.jobs.get(&id).is_some_and(|job| job.owner() == owner);
        if owned {
            tables.jobs.remove(&id);
        }
        Ok(owned)
    }
}

fn department_email_taken(
    tables: &Tables,
    draft: &DepartmentDraft,
    except: Option<DepartmentId>,
) -> bool {
    tables
        .departments
        .values()
        .any(|existing| Some(existing.id()) != except && existing.fields().email == draft.email)
}

#[async_trait]
impl DepartmentRepository for InMemoryStore {
    async fn insert(
        &self,
        owner: UserId,
        draft: &DepartmentDraft,
    ) -> Result<Department, DepartmentPersistenceError> {
        let mut tables = self.lock().map_err(DepartmentPersistenceError::query)?;
        if department_email_taken(&tables, draft, None) {
            return Err(DepartmentPersistenceError::duplicate_email(draft.email.as_ref()));
        }
        let id = DepartmentId::new(
            next_id(&mut tables.last_department_id).map_err(DepartmentPersistenceError::query)?,
        );
        let department = Department::new(id, owner, draft.clone());
        tables.departments.insert(id, department.clone());
        Ok(department)
    }

    async fn find_by_id(
        &self,
        id: DepartmentId,
    ) -> Result<Option<Department>, DepartmentPersistenceError> {
        let tables = self.lock().map_err(DepartmentPersistenceError::query)?;
        Ok(tables.departments.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Department>, DepartmentPersistenceError> {
        let tables = self.lock().map_err(DepartmentPersistenceError::query)?;
        Ok(tables.departments.values().cloned().collect())
    }

    async fn update_guarded(
        &self,
        id: DepartmentId,
        identity: UserId,
        draft: &DepartmentDraft,
    ) -> Result<Option<Department>, DepartmentPersistenceError> {
        let mut tables = self.lock().map_err(DepartmentPersistenceError::query)?;
        let permitted = tables
            .departments
            .get(&id)
            .is_some_and(|department| department.owner() == identity || identity.is_admin());
        if !permitted {
            return Ok(None);
        }
        if department_email_taken(&tables, draft, Some(id)) {
            return Err(DepartmentPersistenceError::duplicate_email(draft.email.as_ref()));
        }
        let Some(slot) = tables.departments.get_mut(&id) else {
            return Ok(None);
        };
        *slot = slot.clone().with_fields(draft.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete_owned(
        &self,
        id: DepartmentId,
        owner: UserId,
    ) -> Result<bool, DepartmentPersistenceError> {
        let mut tables = self.lock().map_err(DepartmentPersistenceError::query)?;
        let owned = tables
            .departments
            .get(&id)
            .is_some_and(|department| department.owner() == owner);
        if owned {
            tables.departments.remove(&id);
        }
        Ok(owned)
    }
}
