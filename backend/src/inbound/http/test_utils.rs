//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};

use crate::domain::ports::UserRepository;
use crate::domain::{Password, User};
use crate::inbound::http::state::HttpState;
use crate::outbound::in_memory::InMemoryStore;
use crate::test_support::{fast_hasher, new_user};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Handler state over a fresh in-memory store, plus the store for seeding.
pub fn in_memory_state() -> (web::Data<HttpState>, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::default());
    let state = HttpState::from_repositories(
        store.clone(),
        store.clone(),
        store.clone(),
        fast_hasher(),
    );
    (web::Data::new(state), store)
}

/// Store a user `{name}@mars.org` whose password is `"password"`.
pub async fn seed_user(store: &InMemoryStore, name: &str, surname: &str) -> User {
    let hash = fast_hasher()
        .hash(&Password::new("password"))
        .expect("hash test password");
    UserRepository::insert(store, &new_user(name, surname, hash))
        .await
        .expect("seed user")
}

/// Log in as `{name}@mars.org` and return the session cookie.
pub async fn login_cookie<S, B>(app: &S, name: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/login")
        .set_json(serde_json::json!({
            "email": format!("{}@mars.org", name.to_lowercase()),
            "password": "password",
        }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER, "login succeeds");
    session_cookie(&response).expect("session cookie set")
}
