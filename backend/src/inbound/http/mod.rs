//! HTTP inbound adapter exposing the work-tracking endpoints.

pub mod departments;
pub mod error;
pub mod forms;
pub mod health;
pub mod jobs;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::web;

/// Register the account, job and department routes.
///
/// Every route expects [`state::HttpState`] in app data and a session
/// middleware around it. Health checks are registered separately.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login_form)
        .service(users::login)
        .service(users::logout)
        .service(users::register_form)
        .service(users::register)
        .service(users::current_user)
        .service(jobs::list_jobs)
        .service(jobs::job_form)
        .service(jobs::create_job)
        .service(jobs::edit_job)
        .service(jobs::update_job)
        .service(jobs::delete_job)
        .service(departments::list_departments)
        .service(departments::department_form)
        .service(departments::create_department)
        .service(departments::edit_department)
        .service(departments::update_department)
        .service(departments::delete_department);
}
