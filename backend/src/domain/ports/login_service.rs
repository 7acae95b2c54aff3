//! Driving port for login and registration use-cases.
//!
//! Inbound adapters call these ports to authenticate or enrol users without
//! importing the backing infrastructure. Establishing the session is the
//! adapter's job.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, RegistrationFields, User, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown emails and wrong passwords both fail with
    /// [`crate::domain::ErrorCode::InvalidCredentials`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Domain use-case port for self-service registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Validate the registration form, hash the password and persist the
    /// user. A taken email fails with
    /// [`crate::domain::ErrorCode::DuplicateEmail`].
    async fn register(&self, fields: RegistrationFields) -> Result<User, Error>;
}
