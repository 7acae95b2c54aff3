//! Identity domain service: login, registration and principal lookup.
//!
//! This module implements the identity driving ports on top of a
//! [`UserRepository`]. Passwords are verified and hashed here so that
//! repositories only ever see PHC strings.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    LoginService, UserPersistenceError, UserRegistration, UserRepository, UsersQuery,
};
use crate::domain::{
    Error, FieldError, LoginCredentials, NewUser, Password, PasswordHash, PasswordHasher,
    RegistrationFields, User, UserId,
};

/// Identity service implementing [`LoginService`], [`UserRegistration`] and
/// [`UsersQuery`].
#[derive(Clone)]
pub struct IdentityService<U> {
    users: Arc<U>,
    hasher: PasswordHasher,
    /// Verified against on unknown emails so both login failures pay for Argon2.
    decoy: Option<PasswordHash>,
}

impl<U> IdentityService<U> {
    /// Create a service using the default Argon2id parameters.
    pub fn new(users: Arc<U>) -> Self {
        Self::with_hasher(users, PasswordHasher::default())
    }

    /// Create a service with an explicit hasher.
    pub fn with_hasher(users: Arc<U>, hasher: PasswordHasher) -> Self {
        let decoy = hasher
            .hash(&Password::new("worklog-decoy"))
            .inspect_err(|error| warn!(%error, "failed to prepare decoy password hash"))
            .ok();
        Self {
            users,
            hasher,
            decoy,
        }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::duplicate_email(format!("email {email} is already registered"))
        }
    }
}

/// Fail with a field-level validation error when `id` names no user.
pub(crate) async fn require_registered_user<U>(
    users: &U,
    field: &'static str,
    id: UserId,
) -> Result<(), Error>
where
    U: UserRepository + ?Sized,
{
    match users.find_by_id(id).await.map_err(map_user_error)? {
        Some(_) => Ok(()),
        None => Err(FieldError::unknown_user(field, id).into()),
    }
}

#[async_trait]
impl<U> LoginService for IdentityService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            if let Some(decoy) = &self.decoy {
                let _ = self.hasher.verify(credentials.password(), decoy);
            }
            return Err(Error::invalid_credentials());
        };
        if self
            .hasher
            .verify(credentials.password(), user.password_hash())
        {
            Ok(user.id())
        } else {
            Err(Error::invalid_credentials())
        }
    }
}

#[async_trait]
impl<U> UserRegistration for IdentityService<U>
where
    U: UserRepository,
{
    async fn register(&self, fields: RegistrationFields) -> Result<User, Error> {
        let registration = fields.validate()?;
        let (email, password, profile) = registration.into_parts();
        let password_hash = self
            .hasher
            .hash(&password)
            .map_err(|err| Error::internal(format!("failed to hash password: {err}")))?;
        let user = self
            .users
            .insert(&NewUser {
                email,
                password_hash,
                profile,
            })
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id(), "registered user");
        Ok(user)
    }
}

#[async_trait]
impl<U> UsersQuery for IdentityService<U>
where
    U: UserRepository,
{
    async fn resolve(&self, user_id: UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
