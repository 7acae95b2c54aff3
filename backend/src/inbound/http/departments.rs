//! Department handlers. Same shape as the job routes, redirecting to
//! `/departments` after every successful write.

use actix_web::{HttpResponse, get, post, route, web};
use serde::Serialize;

use crate::domain::ports::ListedDepartment;
use crate::domain::{Department, DepartmentFields, DepartmentId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{
    DepartmentRequest, FormBody, FormDescriptor, into_inner, see_other,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const LISTING: &str = "/departments";

/// A department as shown in the edit form and the listing.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentView {
    /// Department identifier.
    pub id: i32,
    /// Title.
    pub title: String,
    /// Chief user id.
    pub chief: i32,
    /// Chief as `"surname name"`; listing only, absent when unregistered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chief_name: Option<String>,
    /// Free-text members.
    pub members: String,
    /// Contact email.
    pub email: String,
    /// Creator of the department.
    pub owner: i32,
}

impl From<&Department> for DepartmentView {
    fn from(department: &Department) -> Self {
        let fields = department.fields();
        Self {
            id: department.id().get(),
            title: fields.title.clone(),
            chief: fields.chief.get(),
            chief_name: None,
            members: fields.members.clone(),
            email: fields.email.as_ref().to_owned(),
            owner: department.owner().get(),
        }
    }
}

impl From<ListedDepartment> for DepartmentView {
    fn from(row: ListedDepartment) -> Self {
        Self {
            chief_name: row.chief_name,
            ..Self::from(&row.department)
        }
    }
}

/// Every department with its chief's name.
#[utoipa::path(
    get,
    path = "/departments",
    responses(
        (status = 200, description = "Department listing", body = [DepartmentView]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["departments"],
    operation_id = "listDepartments",
    security([])
)]
#[get("/departments")]
pub async fn list_departments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<DepartmentView>>> {
    let rows = state.listing.list_departments().await?;
    Ok(web::Json(rows.into_iter().map(DepartmentView::from).collect()))
}

/// Describe the department form.
#[utoipa::path(
    get,
    path = "/add_department",
    responses(
        (status = 200, description = "Department form fields", body = FormDescriptor),
        (status = 401, description = "No session", body = Error)
    ),
    tags = ["departments"],
    operation_id = "departmentForm"
)]
#[get("/add_department")]
pub async fn department_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<FormDescriptor>> {
    session.require_user(state.users.as_ref()).await?;
    Ok(web::Json(FormDescriptor::department()))
}

/// Create a department owned by the logged-in user.
#[utoipa::path(
    post,
    path = "/add_department",
    request_body = DepartmentRequest,
    responses(
        (status = 303, description = "Created; redirect to the department listing"),
        (status = 400, description = "Invalid form", body = Error),
        (status = 401, description = "No session", body = Error),
        (status = 409, description = "Email already used by a department", body = Error)
    ),
    tags = ["departments"],
    operation_id = "createDepartment"
)]
#[post("/add_department")]
pub async fn create_department(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: FormBody<DepartmentRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_user(state.users.as_ref()).await?.id();
    state
        .departments
        .create(identity, DepartmentFields::from(into_inner(payload)))
        .await?;
    Ok(see_other(LISTING))
}

/// Load a department for editing; owner or administrator only.
#[utoipa::path(
    get,
    path = "/department/{id}",
    params(("id" = i32, Path, description = "Department identifier")),
    responses(
        (status = 200, description = "Department to edit", body = DepartmentView),
        (status = 401, description = "No session, or not the owner", body = Error),
        (status = 404, description = "No such department", body = Error)
    ),
    tags = ["departments"],
    operation_id = "getDepartment"
)]
#[get("/department/{id}")]
pub async fn edit_department(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DepartmentView>> {
    let identity = session.require_user(state.users.as_ref()).await?.id();
    let department = state
        .departments_query
        .fetch_for_edit(identity, DepartmentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(DepartmentView::from(&department)))
}

/// Overwrite a department; owner or administrator only.
#[utoipa::path(
    post,
    path = "/department/{id}",
    params(("id" = i32, Path, description = "Department identifier")),
    request_body = DepartmentRequest,
    responses(
        (status = 303, description = "Updated; redirect to the department listing"),
        (status = 400, description = "Invalid form", body = Error),
        (status = 401, description = "No session, or not the owner", body = Error),
        (status = 404, description = "No such department", body = Error),
        (status = 409, description = "Email already used by a department", body = Error)
    ),
    tags = ["departments"],
    operation_id = "updateDepartment"
)]
#[post("/department/{id}")]
pub async fn update_department(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: FormBody<DepartmentRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_user(state.users.as_ref()).await?.id();
    state
        .departments
        .update(
            identity,
            DepartmentId::new(path.into_inner()),
            DepartmentFields::from(into_inner(payload)),
        )
        .await?;
    Ok(see_other(LISTING))
}

/// Delete a department; its owner only. Anyone else gets `404`.
#[utoipa::path(
    method(get, post),
    path = "/department_delete/{id}",
    params(("id" = i32, Path, description = "Department identifier")),
    responses(
        (status = 303, description = "Deleted; redirect to the department listing"),
        (status = 401, description = "No session", body = Error),
        (status = 404, description = "No such department owned by the caller", body = Error)
    ),
    tags = ["departments"],
    operation_id = "deleteDepartment"
)]
#[route("/department_delete/{id}", method = "GET", method = "POST")]
pub async fn delete_department(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_user(state.users.as_ref()).await?.id();
    state
        .departments
        .delete(identity, DepartmentId::new(path.into_inner()))
        .await?;
    Ok(see_other(LISTING))
}
