//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence adapters, plus the services implementing the driving ports.
//! Keep types immutable and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - User, Job, Department — stored records and their identifiers.
//! - `*Fields` — raw submitted forms with explicit required-field lists.
//! - `can_mutate` / `can_view` — the ownership guard.
//! - IdentityService, JobService, DepartmentService, ListingService.

pub mod auth;
pub mod authorization;
pub mod department;
pub mod department_service;
pub mod error;
pub mod fields;
pub mod identity_service;
pub mod job;
pub mod job_service;
pub mod listing_service;
pub mod password;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginFields, Registration, RegistrationFields};
pub use self::authorization::{Owned, can_mutate, can_view};
pub use self::department::{Department, DepartmentDraft, DepartmentFields, DepartmentId};
pub use self::department_service::DepartmentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::fields::{FieldError, FieldErrorCode};
pub use self::identity_service::IdentityService;
pub use self::job::{Job, JobDraft, JobFields, JobId};
pub use self::job_service::JobService;
pub use self::listing_service::ListingService;
pub use self::password::{Password, PasswordHash, PasswordHashError, PasswordHasher};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{ADMIN_USER_ID, Email, NewUser, User, UserId, UserProfile, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use worklog::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
