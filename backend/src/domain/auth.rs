//! Authentication primitives: login credentials and registration forms.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use super::fields::{FieldError, FieldErrorCode, checkbox, require_positive, require_text};
use super::password::Password;
use super::user::{Email, UserProfile, UserValidationError};

/// Raw login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFields {
    /// Login email.
    pub email: Option<String>,
    /// Plain password.
    pub password: Option<String>,
    /// "Remember me" checkbox.
    pub remember_me: Option<String>,
}

impl LoginFields {
    /// Fields a login submission must carry.
    pub const REQUIRED: &'static [&'static str] = &["email", "password"];

    /// Validate into [`LoginCredentials`].
    pub fn validate(self) -> Result<LoginCredentials, FieldError> {
        let email = require_text("email", self.email)?;
        let password = match self.password {
            Some(raw) if !raw.is_empty() => Password::new(raw),
            _ => return Err(FieldError::missing("password")),
        };
        Ok(LoginCredentials {
            email: email.to_lowercase(),
            password,
            remember_me: checkbox(self.remember_me.as_deref()),
        })
    }
}

/// Validated login credentials used by the identity service.
///
/// ## Invariants
/// - `email` is trimmed, lowercased and non-empty. Its shape is not checked:
///   a malformed address simply matches nobody.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use worklog::domain::LoginFields;
///
/// let creds = LoginFields {
///     email: Some(" Admin@Mars.org ".into()),
///     password: Some("secret".into()),
///     remember_me: Some("y".into()),
/// }
/// .validate()
/// .expect("valid credentials");
/// assert_eq!(creds.email(), "admin@mars.org");
/// assert!(creds.remember_me());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Password,
    remember_me: bool,
}

impl LoginCredentials {
    /// Normalised email used for the lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Whether the caller asked to be remembered.
    #[must_use]
    pub fn remember_me(&self) -> bool {
        self.remember_me
    }
}

/// Raw registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationFields {
    /// Login email.
    pub email: Option<String>,
    /// Chosen password.
    pub password: Option<String>,
    /// Password confirmation.
    pub password_again: Option<String>,
    /// Family name.
    pub surname: Option<String>,
    /// Given name.
    pub name: Option<String>,
    /// Age in years.
    pub age: Option<String>,
    /// Job position.
    pub position: Option<String>,
    /// Speciality.
    pub speciality: Option<String>,
    /// Address.
    pub address: Option<String>,
}

impl RegistrationFields {
    /// Fields a registration submission must carry.
    pub const REQUIRED: &'static [&'static str] = &[
        "email",
        "password",
        "password_again",
        "surname",
        "name",
        "age",
        "position",
        "speciality",
        "address",
    ];

    /// Validate into a [`Registration`].
    pub fn validate(self) -> Result<Registration, FieldError> {
        let raw_email = require_text("email", self.email)?;
        let email = Email::new(&raw_email).map_err(|err| email_error(&err))?;
        let password = match self.password {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(FieldError::missing("password")),
        };
        let password_again = match self.password_again {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(FieldError::missing("password_again")),
        };
        if password != password_again {
            return Err(FieldError::new(
                "password_again",
                FieldErrorCode::Mismatch,
                "passwords do not match",
            ));
        }
        let profile = UserProfile {
            surname: require_text("surname", self.surname)?,
            name: require_text("name", self.name)?,
            age: require_positive("age", self.age)?,
            position: require_text("position", self.position)?,
            speciality: require_text("speciality", self.speciality)?,
            address: require_text("address", self.address)?,
        };
        Ok(Registration {
            email,
            password: Password::new(password),
            profile,
        })
    }
}

fn email_error(err: &UserValidationError) -> FieldError {
    FieldError::new("email", FieldErrorCode::InvalidValue, err.to_string())
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: Email,
    password: Password,
    profile: UserProfile,
}

impl Registration {
    /// Requested login email.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Chosen password.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Descriptive profile.
    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Split into its parts for hashing and persistence.
    #[must_use]
    pub fn into_parts(self) -> (Email, Password, UserProfile) {
        (self.email, self.password, self.profile)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registration() -> RegistrationFields {
        RegistrationFields {
            email: Some("scott_chief@mars.org".into()),
            password: Some("1234".into()),
            password_again: Some("1234".into()),
            surname: Some("Scott".into()),
            name: Some("Ridley".into()),
            age: Some("21".into()),
            position: Some("captain".into()),
            speciality: Some("research engineer".into()),
            address: Some("module_1".into()),
        }
    }

    #[rstest]
    #[case(None, None, "email")]
    #[case(Some("a@b.org"), None, "password")]
    #[case(Some("   "), Some("pw"), "email")]
    fn login_requires_fields(
        #[case] email: Option<&str>,
        #[case] password: Option<&str>,
        #[case] field: &str,
    ) {
        let err = LoginFields {
            email: email.map(str::to_owned),
            password: password.map(str::to_owned),
            remember_me: None,
        }
        .validate()
        .expect_err("incomplete login must fail");
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), FieldErrorCode::MissingField);
    }

    #[rstest]
    fn login_keeps_password_whitespace() {
        let creds = LoginFields {
            email: Some("a@b.org".into()),
            password: Some(" pw ".into()),
            remember_me: None,
        }
        .validate()
        .expect("valid login");
        assert_eq!(creds.password().expose(), " pw ");
        assert!(!creds.remember_me());
    }

    #[rstest]
    fn registration_accepts_complete_form(registration: RegistrationFields) {
        let valid = registration.validate().expect("complete form is valid");
        assert_eq!(valid.email().as_ref(), "scott_chief@mars.org");
        assert_eq!(valid.profile().age, 21);
        assert_eq!(valid.profile().display_name(), "Scott Ridley");
    }

    #[rstest]
    fn registration_rejects_password_mismatch(mut registration: RegistrationFields) {
        registration.password_again = Some("4321".into());
        let err = registration.validate().expect_err("mismatch must fail");
        assert_eq!(err.field(), "password_again");
        assert_eq!(err.code(), FieldErrorCode::Mismatch);
    }

    #[rstest]
    #[case("0", FieldErrorCode::NotPositive)]
    #[case("old", FieldErrorCode::InvalidValue)]
    fn registration_rejects_bad_age(
        mut registration: RegistrationFields,
        #[case] age: &str,
        #[case] expected: FieldErrorCode,
    ) {
        registration.age = Some(age.into());
        let err = registration.validate().expect_err("bad age must fail");
        assert_eq!(err.field(), "age");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    fn registration_rejects_malformed_email(mut registration: RegistrationFields) {
        registration.email = Some("not-an-email".into());
        let err = registration.validate().expect_err("bad email must fail");
        assert_eq!(err.field(), "email");
        assert_eq!(err.code(), FieldErrorCode::InvalidValue);
    }

    #[rstest]
    fn registration_requires_address(mut registration: RegistrationFields) {
        registration.address = None;
        let err = registration.validate().expect_err("missing address must fail");
        assert_eq!(err.field(), "address");
    }
}
