//! Request bodies for the HTML-style forms.
//!
//! Every form is accepted either as `application/json` or as
//! `application/x-www-form-urlencoded`. Values arrive as loosely typed
//! scalars (`"15"`, `15` and `true` are all fine) and are handed to the
//! domain as raw text, where the per-form `validate` does the parsing.
//!
//! ```text
//! POST /add_work {"job":"deploy","team_leader":1,"work_size":15,...}
//! POST /add_work job=deploy&team_leader=1&work_size=15&...
//! ```

use actix_web::{Either, HttpResponse, http::header, web};
use serde::{Deserialize, Serialize};

use crate::domain::{DepartmentFields, JobFields, LoginFields, RegistrationFields};

/// JSON or URL-encoded form body.
pub type FormBody<T> = Either<web::Json<T>, web::Form<T>>;

/// Unwrap whichever encoding the client used.
pub fn into_inner<T>(body: FormBody<T>) -> T {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

/// `303 See Other` answer to a successful form submission.
pub fn see_other(location: &'static str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// A scalar form value as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    /// Text, including everything a URL-encoded form carries.
    Text(String),
    /// JSON number.
    Integer(i64),
    /// JSON boolean, typically a checkbox.
    Boolean(bool),
}

impl FormValue {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(number) => number.to_string(),
            Self::Boolean(flag) => flag.to_string(),
        }
    }
}

fn text(value: Option<FormValue>) -> Option<String> {
    value.map(FormValue::into_text)
}

/// Required and optional field names of one form, returned by the `GET`
/// side of each form route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FormDescriptor {
    /// Form name.
    #[schema(example = "add_work")]
    pub form: String,
    /// Fields that must be present and non-empty.
    pub required: Vec<String>,
    /// Checkbox fields that default to `false`.
    pub optional: Vec<String>,
}

impl FormDescriptor {
    fn new(
        form: &'static str,
        required: &'static [&'static str],
        optional: &'static [&'static str],
    ) -> Self {
        Self {
            form: form.to_owned(),
            required: owned_names(required),
            optional: owned_names(optional),
        }
    }

    /// Descriptor of the login form.
    #[must_use]
    pub fn login() -> Self {
        Self::new("login", LoginFields::REQUIRED, &["remember_me"])
    }

    /// Descriptor of the registration form.
    #[must_use]
    pub fn register() -> Self {
        Self::new("register", RegistrationFields::REQUIRED, &[])
    }

    /// Descriptor of the job form.
    #[must_use]
    pub fn job() -> Self {
        Self::new("add_work", JobFields::REQUIRED, &["is_finished"])
    }

    /// Descriptor of the department form.
    #[must_use]
    pub fn department() -> Self {
        Self::new("add_department", DepartmentFields::REQUIRED, &[])
    }
}

fn owned_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

/// Login form body.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Registered email.
    #[schema(value_type = Option<String>, example = "scott_chief@mars.org")]
    pub email: Option<FormValue>,
    /// Plain password.
    #[schema(value_type = Option<String>)]
    pub password: Option<FormValue>,
    /// "Remember me" checkbox.
    #[schema(value_type = Option<bool>)]
    pub remember_me: Option<FormValue>,
}

impl From<LoginRequest> for LoginFields {
    fn from(value: LoginRequest) -> Self {
        Self {
            email: text(value.email),
            password: text(value.password),
            remember_me: text(value.remember_me),
        }
    }
}

/// Registration form body.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Login email.
    #[schema(value_type = Option<String>)]
    pub email: Option<FormValue>,
    /// Plain password.
    #[schema(value_type = Option<String>)]
    pub password: Option<FormValue>,
    /// Repeated password.
    #[schema(value_type = Option<String>)]
    pub password_again: Option<FormValue>,
    /// Family name.
    #[schema(value_type = Option<String>)]
    pub surname: Option<FormValue>,
    /// Given name.
    #[schema(value_type = Option<String>)]
    pub name: Option<FormValue>,
    /// Age in years.
    #[schema(value_type = Option<i32>)]
    pub age: Option<FormValue>,
    /// Job position.
    #[schema(value_type = Option<String>)]
    pub position: Option<FormValue>,
    /// Speciality.
    #[schema(value_type = Option<String>)]
    pub speciality: Option<FormValue>,
    /// Postal address.
    #[schema(value_type = Option<String>)]
    pub address: Option<FormValue>,
}

impl From<RegisterRequest> for RegistrationFields {
    fn from(value: RegisterRequest) -> Self {
        Self {
            email: text(value.email),
            password: text(value.password),
            password_again: text(value.password_again),
            surname: text(value.surname),
            name: text(value.name),
            age: text(value.age),
            position: text(value.position),
            speciality: text(value.speciality),
            address: text(value.address),
        }
    }
}

/// Job form body.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct JobRequest {
    /// Job title.
    #[schema(value_type = Option<String>, example = "deployment of residential modules")]
    pub job: Option<FormValue>,
    /// Team lead user id.
    #[schema(value_type = Option<i32>, example = 1)]
    pub team_leader: Option<FormValue>,
    /// Hours of work.
    #[schema(value_type = Option<i32>, example = 15)]
    pub work_size: Option<FormValue>,
    /// Free-text collaborators.
    #[schema(value_type = Option<String>, example = "2, 3")]
    pub collaborators: Option<FormValue>,
    /// First day, `YYYY-MM-DD`.
    #[schema(value_type = Option<String>, example = "2024-05-01")]
    pub start_date: Option<FormValue>,
    /// Last day, `YYYY-MM-DD`.
    #[schema(value_type = Option<String>, example = "2024-05-04")]
    pub end_date: Option<FormValue>,
    /// Completion checkbox.
    #[schema(value_type = Option<bool>)]
    pub is_finished: Option<FormValue>,
}

impl From<JobRequest> for JobFields {
    fn from(value: JobRequest) -> Self {
        Self {
            job: text(value.job),
            team_leader: text(value.team_leader),
            work_size: text(value.work_size),
            collaborators: text(value.collaborators),
            start_date: text(value.start_date),
            end_date: text(value.end_date),
            is_finished: text(value.is_finished),
        }
    }
}

/// Department form body.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct DepartmentRequest {
    /// Department title.
    #[schema(value_type = Option<String>, example = "geological exploration")]
    pub title: Option<FormValue>,
    /// Chief user id.
    #[schema(value_type = Option<i32>, example = 1)]
    pub chief: Option<FormValue>,
    /// Free-text members.
    #[schema(value_type = Option<String>, example = "2, 3")]
    pub members: Option<FormValue>,
    /// Department email.
    #[schema(value_type = Option<String>, example = "geo@mars.org")]
    pub email: Option<FormValue>,
}

impl From<DepartmentRequest> for DepartmentFields {
    fn from(value: DepartmentRequest) -> Self {
        Self {
            title: text(value.title),
            chief: text(value.chief),
            members: text(value.members),
            email: text(value.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn json_scalars_become_text() {
        let request: JobRequest = serde_json::from_value(json!({
            "job": "deploy",
            "team_leader": 1,
            "work_size": "15",
            "is_finished": true,
        }))
        .expect("valid body");
        let fields = JobFields::from(request);
        assert_eq!(fields.team_leader.as_deref(), Some("1"));
        assert_eq!(fields.work_size.as_deref(), Some("15"));
        assert_eq!(fields.is_finished.as_deref(), Some("true"));
        assert_eq!(fields.end_date, None);
    }

    #[rstest]
    fn url_encoded_forms_deserialise() {
        let request: DepartmentRequest =
            serde_urlencoded::from_str("title=geology&chief=1&members=2%2C+3&email=geo%40mars.org")
                .expect("valid form");
        let fields = DepartmentFields::from(request);
        assert_eq!(fields.members.as_deref(), Some("2, 3"));
        assert_eq!(fields.email.as_deref(), Some("geo@mars.org"));
    }

    #[rstest]
    fn null_counts_as_absent() {
        let request: LoginRequest =
            serde_json::from_value(json!({"email": "a@mars.org", "password": null}))
                .expect("valid body");
        assert_eq!(LoginFields::from(request).password, None);
    }

    #[rstest]
    fn job_descriptor_lists_required_and_checkbox_fields() {
        let descriptor = FormDescriptor::job();
        assert_eq!(descriptor.form, "add_work");
        assert_eq!(descriptor.required, JobFields::REQUIRED);
        assert_eq!(descriptor.optional, ["is_finished"]);
    }
}
