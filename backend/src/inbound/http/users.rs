//! Account handlers: login, logout, registration and the current profile.
//!
//! ```text
//! POST /login {"email":"scott_chief@mars.org","password":"cap","remember_me":true}
//! POST /register {"email":"...","password":"...","password_again":"...",...}
//! GET /logout
//! GET /me
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Error, LoginFields, RegistrationFields, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{
    FormBody, FormDescriptor, LoginRequest, RegisterRequest, into_inner, see_other,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Public profile of a registered user.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// User identifier.
    #[schema(value_type = i32, example = 1)]
    pub id: i32,
    /// Login email.
    pub email: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Age in years.
    pub age: i32,
    /// Job position.
    pub position: String,
    /// Speciality.
    pub speciality: String,
    /// Postal address.
    pub address: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
    /// Last profile change.
    pub modified_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            id: user.id().get(),
            email: user.email().as_ref().to_owned(),
            name: profile.name.clone(),
            surname: profile.surname.clone(),
            age: profile.age,
            position: profile.position.clone(),
            speciality: profile.speciality.clone(),
            address: profile.address.clone(),
            created_at: user.created_at(),
            modified_at: user.modified_at(),
        }
    }
}

/// Describe the login form.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login form fields", body = FormDescriptor)),
    tags = ["users"],
    operation_id = "loginForm",
    security([])
)]
#[get("/login")]
pub async fn login_form() -> web::Json<FormDescriptor> {
    web::Json(FormDescriptor::login())
}

/// Authenticate and establish a session.
///
/// Unknown emails and wrong passwords are indistinguishable: both answer
/// `401` with code `invalid_credentials`.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 303, description = "Logged in; redirect to the listing", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing field", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: FormBody<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginFields::from(into_inner(payload)).validate()?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(user_id, credentials.remember_me())?;
    Ok(see_other("/"))
}

/// End the session.
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Logged out; redirect to the listing"),
        (status = 401, description = "No session", body = Error)
    ),
    tags = ["users"],
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_user(state.users.as_ref()).await?;
    session.purge();
    Ok(see_other("/"))
}

/// Describe the registration form.
#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Registration form fields", body = FormDescriptor)),
    tags = ["users"],
    operation_id = "registerForm",
    security([])
)]
#[get("/register")]
pub async fn register_form() -> web::Json<FormDescriptor> {
    web::Json(FormDescriptor::register())
}

/// Register a user and log them in.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 303, description = "Registered and logged in", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid form", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: FormBody<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let fields = RegistrationFields::from(into_inner(payload));
    let user = state.registration.register(fields).await?;
    session.persist_user(user.id(), true)?;
    Ok(see_other("/"))
}

/// Profile of the logged-in user.
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Current user", body = UserView),
        (status = 401, description = "No session", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserView>> {
    let user = session.require_user(state.users.as_ref()).await?;
    Ok(web::Json(UserView::from(&user)))
}
