//! Job handlers: the public listing plus the session-only job forms.
//!
//! ```text
//! GET /
//! POST /add_work {"job":"...","team_leader":1,"work_size":15,...}
//! GET /work/3
//! POST /work/3 {...}
//! GET /work_delete/3
//! ```

use actix_web::{HttpResponse, get, post, route, web};
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::ports::ListedJob;
use crate::domain::{Error, Job, JobFields, JobId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{FormBody, FormDescriptor, JobRequest, into_inner, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// A job as shown in the edit form.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    /// Job identifier.
    pub id: i32,
    /// Job title.
    pub title: String,
    /// Team lead user id.
    pub team_lead: i32,
    /// Hours of work.
    pub work_size: i32,
    /// Free-text collaborators.
    pub collaborators: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Completion flag.
    pub is_finished: bool,
    /// Creator of the job.
    pub owner: i32,
}

impl From<&Job> for JobView {
    fn from(job: &Job) -> Self {
        let fields = job.fields();
        Self {
            id: job.id().get(),
            title: fields.title.clone(),
            team_lead: fields.team_lead.get(),
            work_size: fields.work_size,
            collaborators: fields.collaborators.clone(),
            start_date: fields.start_date,
            end_date: fields.end_date,
            is_finished: fields.is_finished,
            owner: job.owner().get(),
        }
    }
}

/// One row of the work listing.
///
/// Exactly one of `leader` and `missingTeamLead` is present.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListedJobView {
    /// Job identifier.
    pub id: i32,
    /// Job title.
    pub title: String,
    /// Team lead as `"surname name"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
    /// Team lead id that matches no registered user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_team_lead: Option<i32>,
    /// Whole days between start and end.
    pub duration_days: i64,
    /// Hours of work.
    pub work_size: i32,
    /// Free-text collaborators.
    pub collaborators: String,
    /// Completion flag.
    pub is_finished: bool,
    /// Creator of the job.
    pub owner: i32,
}

impl From<ListedJob> for ListedJobView {
    fn from(row: ListedJob) -> Self {
        let (leader, missing_team_lead) = match row.leader {
            Ok(name) => (Some(name), None),
            Err(missing) => (None, Some(missing.team_lead.get())),
        };
        Self {
            id: row.id.get(),
            title: row.title,
            leader,
            missing_team_lead,
            duration_days: row.duration_days,
            work_size: row.work_size,
            collaborators: row.collaborators,
            is_finished: row.is_finished,
            owner: row.job.owner().get(),
        }
    }
}

/// Every job joined with its team lead.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Work listing", body = [ListedJobView]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["jobs"],
    operation_id = "listJobs",
    security([])
)]
#[get("/")]
pub async fn list_jobs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ListedJobView>>> {
    let rows = state.listing.build_listing().await?;
    Ok(web::Json(rows.into_iter().map(ListedJobView::from).collect()))
}

/// Describe the job form.
#[utoipa::path(
    get,
    path = "/add_work",
    responses(
        (status = 200, description = "Job form fields", body = FormDescriptor),
        (status = 401, description = "No session", body = Error)
    ),
    tags = ["jobs"],
    operation_id = "jobForm"
)]
#[get("/add_work")]
pub async fn job_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<FormDescriptor>> {
    session.require_user(state.users.as_ref()).await?;
    Ok(web::Json(FormDescriptor::job()))
}

/// Create a job owned by the logged-in user.
#[utoipa::path(
    post,
    path = "/add_work",
    request_body = JobRequest,
    responses(
        (status = 303, description = "Created; redirect to the listing"),
        (status = 400, description = "Invalid form", body = Error),
        (status = 401, description = "No session", body = Error)
    ),
    tags = ["jobs"],
    operation_id = "createJob"
)]
#[post("/add_work")]
pub async fn create_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: FormBody<JobRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_user(state.users.as_ref()).await?.id();
    state
        .jobs
        .create(identity, JobFields::from(into_inner(payload)))
        .await?;
    Ok(see_other("/"))
}

/// Load a job for editing; owner or administrator only.
#[utoipa::path(
    get,
    path = "/work/{id}",
    params(("id" = i32, Path, description = "Job identifier")),
    responses(
        (status = 200, description = "Job to edit", body = JobView),
        (status = 401, description = "No session, or not the owner", body = Error),
        (status = 404, description = "No such job", body = Error)
    ),
    tags = ["jobs"],
    operation_id = "getJob"
)]
#[get("/work/{id}")]
pub async fn edit_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<JobView>> {
    let identity = session.require_user(state.users.as_ref()).await?.id();
    let job = state
        .jobs_query
        .fetch_for_edit(identity, JobId::new(path.into_inner()))
        .await?;
    Ok(web::Json(JobView::from(&job)))
}

/// Overwrite a job; owner or administrator only.
#[utoipa::path(
    post,
    path = "/work/{id}",
    params(("id" = i32, Path, description = "Job identifier")),
    request_body = JobRequest,
    responses(
        (status = 303, description = "Updated; redirect to the listing"),
        (status = 400, description = "Invalid form", body = Error),
        (status = 401, description = "No session, or not the owner", body = Error),
        (status = 404, description = "No such job", body = Error)
    ),
    tags = ["jobs"],
    operation_id = "updateJob"
)]
#[post("/work/{id}")]
pub async fn update_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: FormBody<JobRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_user(state.users.as_ref()).await?.id();
    state
        .jobs
        .update(
            identity,
            JobId::new(path.into_inner()),
            JobFields::from(into_inner(payload)),
        )
        .await?;
    Ok(see_other("/"))
}

/// Delete a job; its owner only. Anyone else gets `404`.
#[utoipa::path(
    method(get, post),
    path = "/work_delete/{id}",
    params(("id" = i32, Path, description = "Job identifier")),
    responses(
        (status = 303, description = "Deleted; redirect to the listing"),
        (status = 401, description = "No session", body = Error),
        (status = 404, description = "No such job owned by the caller", body = Error)
    ),
    tags = ["jobs"],
    operation_id = "deleteJob"
)]
#[route("/work_delete/{id}", method = "GET", method = "POST")]
pub async fn delete_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_user(state.users.as_ref()).await?.id();
    state
        .jobs
        .delete(identity, JobId::new(path.into_inner()))
        .await?;
    Ok(see_other("/"))
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
