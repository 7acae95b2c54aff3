//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting or retrieving a user id.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::UsersQuery;
use crate::domain::{Error, User, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const REMEMBER_ME_KEY: &str = "remember_me";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    ///
    /// Any previous session state is discarded and the session key renewed
    /// so a pre-login cookie cannot be replayed after authentication.
    /// `remember_me` is recorded only; every session shares the cookie
    /// lifecycle configured on the middleware.
    pub fn persist_user(&self, user_id: UserId, remember_me: bool) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .and_then(|()| self.0.insert(REMEMBER_ME_KEY, remember_me))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<i32>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!("invalid user id in session cookie: {error}");
                None
            }
        }))
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Resolve the session's user through `users` or return `401 Unauthorized`.
    ///
    /// A cookie naming a user the store does not know is purged.
    pub async fn require_user(&self, users: &dyn UsersQuery) -> Result<User, Error> {
        let user_id = self.require_user_id()?;
        if let Some(user) = users.resolve(user_id).await? {
            return Ok(user);
        }
        warn!(%user_id, "session names an unknown user");
        self.purge();
        Err(Error::unauthorized("login required"))
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
