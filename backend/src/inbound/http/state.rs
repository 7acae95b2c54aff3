//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DepartmentCommand, DepartmentQuery, DepartmentRepository, JobCommand, JobQuery,
    JobRepository, ListingQuery, LoginService, UserRegistration, UserRepository, UsersQuery,
};
use crate::domain::{
    DepartmentService, IdentityService, JobService, ListingService, PasswordHasher,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential checks for `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Self-service registration.
    pub registration: Arc<dyn UserRegistration>,
    /// Session principal lookup.
    pub users: Arc<dyn UsersQuery>,
    /// Job mutations.
    pub jobs: Arc<dyn JobCommand>,
    /// Job reads for the edit form.
    pub jobs_query: Arc<dyn JobQuery>,
    /// Department mutations.
    pub departments: Arc<dyn DepartmentCommand>,
    /// Department reads for the edit form.
    pub departments_query: Arc<dyn DepartmentQuery>,
    /// Public listings.
    pub listing: Arc<dyn ListingQuery>,
}

impl HttpState {
    /// Wire the domain services over one set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use worklog::domain::PasswordHasher;
    /// use worklog::inbound::http::state::HttpState;
    /// use worklog::outbound::in_memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let state = HttpState::from_repositories(
    ///     store.clone(),
    ///     store.clone(),
    ///     store,
    ///     PasswordHasher::default(),
    /// );
    /// let _listing = state.listing.clone();
    /// ```
    pub fn from_repositories<U, J, D>(
        users: Arc<U>,
        jobs: Arc<J>,
        departments: Arc<D>,
        hasher: PasswordHasher,
    ) -> Self
    where
        U: UserRepository + 'static,
        J: JobRepository + 'static,
        D: DepartmentRepository + 'static,
    {
        let identity = Arc::new(IdentityService::with_hasher(users.clone(), hasher));
        let job_service = Arc::new(JobService::new(jobs.clone(), users.clone()));
        let department_service =
            Arc::new(DepartmentService::new(departments.clone(), users.clone()));
        let listing = Arc::new(ListingService::new(jobs, departments, users));

        Self {
            login: identity.clone(),
            registration: identity.clone(),
            users: identity,
            jobs: job_service.clone(),
            jobs_query: job_service,
            departments: department_service.clone(),
            departments_query: department_service,
            listing,
        }
    }
}
