//! Submitted field sets and their validation failures.
//!
//! Every form the service accepts is a plain struct of optional text values
//! with an explicit required-field list. Validation turns one into a typed
//! draft or reports the first offending field as a [`FieldError`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde_json::json;

use super::Error;

/// Machine-readable reason attached to a [`FieldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorCode {
    /// The field was absent or blank.
    MissingField,
    /// The value could not be parsed.
    InvalidValue,
    /// A number that must be positive was zero or negative.
    NotPositive,
    /// Two fields that must agree did not.
    Mismatch,
    /// A date range ends before it starts.
    InvalidRange,
    /// A user reference matched no registered user.
    UnknownUser,
}

impl FieldErrorCode {
    /// Stable snake_case identifier used in error details.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidValue => "invalid_value",
            Self::NotPositive => "not_positive",
            Self::Mismatch => "mismatch",
            Self::InvalidRange => "invalid_range",
            Self::UnknownUser => "unknown_user",
        }
    }
}

/// Validation failure pinned to a single submitted field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: &'static str,
    code: FieldErrorCode,
    message: String,
}

impl FieldError {
    /// Build an error for `field` with an explicit message.
    pub fn new(field: &'static str, code: FieldErrorCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    /// The field is absent or blank.
    #[must_use]
    pub fn missing(field: &'static str) -> Self {
        Self::new(
            field,
            FieldErrorCode::MissingField,
            format!("missing required field: {field}"),
        )
    }

    /// The field references a user id that does not exist.
    #[must_use]
    pub fn unknown_user(field: &'static str, id: impl fmt::Display) -> Self {
        Self::new(
            field,
            FieldErrorCode::UnknownUser,
            format!("{field} refers to unknown user {id}"),
        )
    }

    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Failure reason.
    #[must_use]
    pub fn code(&self) -> FieldErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FieldError {}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        Error::invalid_request(value.message).with_details(json!({
            "field": value.field,
            "code": value.code.as_str(),
        }))
    }
}

/// Return the trimmed value of a required text field.
pub(crate) fn require_text(field: &'static str, value: Option<String>) -> Result<String, FieldError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Ok(raw.trim().to_owned()),
        _ => Err(FieldError::missing(field)),
    }
}

/// Parse a required field with [`FromStr`].
pub(crate) fn require_parsed<T: FromStr>(
    field: &'static str,
    value: Option<String>,
    expectation: &str,
) -> Result<T, FieldError> {
    let text = require_text(field, value)?;
    text.parse::<T>().map_err(|_| {
        FieldError::new(
            field,
            FieldErrorCode::InvalidValue,
            format!("{field} must be {expectation}"),
        )
    })
}

/// Parse a required positive integer.
pub(crate) fn require_positive(field: &'static str, value: Option<String>) -> Result<i32, FieldError> {
    let number: i32 = require_parsed(field, value, "a whole number")?;
    if number <= 0 {
        return Err(FieldError::new(
            field,
            FieldErrorCode::NotPositive,
            format!("{field} must be greater than zero"),
        ));
    }
    Ok(number)
}

/// Parse a required `YYYY-MM-DD` date.
pub(crate) fn require_date(field: &'static str, value: Option<String>) -> Result<NaiveDate, FieldError> {
    require_parsed(field, value, "a date formatted as YYYY-MM-DD")
}

/// Interpret an optional checkbox value.
///
/// HTML forms omit unchecked boxes and send `y`/`on`/`true` for checked ones.
#[must_use]
pub(crate) fn checkbox(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => false,
        Some(raw) => !matches!(
            raw.to_ascii_lowercase().as_str(),
            "" | "0" | "n" | "no" | "off" | "false"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    fn require_text_flags_missing_values(#[case] value: Option<String>) {
        let err = require_text("title", value).expect_err("blank must fail");
        assert_eq!(err.field(), "title");
        assert_eq!(err.code(), FieldErrorCode::MissingField);
    }

    #[rstest]
    #[case("0", FieldErrorCode::NotPositive)]
    #[case("-3", FieldErrorCode::NotPositive)]
    #[case("ten", FieldErrorCode::InvalidValue)]
    fn require_positive_rejects(#[case] raw: &str, #[case] expected: FieldErrorCode) {
        let err = require_positive("work_size", Some(raw.to_owned())).expect_err("must fail");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    fn require_date_parses_iso_dates() {
        let date = require_date("start_date", Some("2024-03-01".to_owned())).expect("valid date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid"));
        let err = require_date("start_date", Some("01.03.2024".to_owned())).expect_err("bad date");
        assert_eq!(err.code(), FieldErrorCode::InvalidValue);
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some("y"), true)]
    #[case(Some("on"), true)]
    #[case(Some("true"), true)]
    #[case(Some("false"), false)]
    #[case(Some("0"), false)]
    fn checkbox_values(#[case] raw: Option<&str>, #[case] expected: bool) {
        assert_eq!(checkbox(raw), expected);
    }

    #[rstest]
    fn field_error_converts_to_invalid_request() {
        let error: Error = FieldError::missing("email").into();
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "email");
        assert_eq!(details["code"], "missing_field");
    }
}
