//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod department_command;
mod department_query;
mod department_repository;
mod job_command;
mod job_query;
mod job_repository;
mod listing_query;
mod login_service;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use department_command::MockDepartmentCommand;
pub use department_command::DepartmentCommand;
#[cfg(test)]
pub use department_query::MockDepartmentQuery;
pub use department_query::DepartmentQuery;
#[cfg(test)]
pub use department_repository::MockDepartmentRepository;
pub use department_repository::{DepartmentPersistenceError, DepartmentRepository};
#[cfg(test)]
pub use job_command::MockJobCommand;
pub use job_command::JobCommand;
#[cfg(test)]
pub use job_query::MockJobQuery;
pub use job_query::JobQuery;
#[cfg(test)]
pub use job_repository::MockJobRepository;
pub use job_repository::{JobPersistenceError, JobRepository};
#[cfg(test)]
pub use listing_query::MockListingQuery;
pub use listing_query::{ListedDepartment, ListedJob, ListingQuery, MissingTeamLead};
#[cfg(test)]
pub use login_service::{MockLoginService, MockUserRegistration};
pub use login_service::{LoginService, UserRegistration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
