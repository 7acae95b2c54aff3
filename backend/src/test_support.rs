//! Test utilities shared by the unit tests in `src/`.

use chrono::{TimeZone, Utc};

use crate::domain::{
    DepartmentFields, Email, JobFields, NewUser, Password, PasswordHash, PasswordHasher, User,
    UserId, UserProfile,
};

/// Argon2id hasher with minimal costs so tests stay fast.
pub(crate) fn fast_hasher() -> PasswordHasher {
    PasswordHasher::with_costs(8, 1, 1).expect("cheap Argon2 params are valid")
}

/// Build a user id, panicking on non-positive input.
pub(crate) fn user_id(raw: i32) -> UserId {
    UserId::new(raw).expect("test ids are positive")
}

/// Profile with the given names and filler values elsewhere.
pub(crate) fn profile(name: &str, surname: &str) -> UserProfile {
    UserProfile {
        name: name.to_owned(),
        surname: surname.to_owned(),
        age: 30,
        position: "engineer".to_owned(),
        speciality: "life support".to_owned(),
        address: "module_1".to_owned(),
    }
}

/// Stored user whose password is `password`.
pub(crate) fn user_with_password(id: i32, name: &str, surname: &str, password: &str) -> User {
    let hash = fast_hasher()
        .hash(&Password::new(password))
        .expect("hash test password");
    stored_user(id, name, surname, hash)
}

/// Stored user whose password is `"password"`.
pub(crate) fn user(id: i32, name: &str, surname: &str) -> User {
    user_with_password(id, name, surname, "password")
}

fn stored_user(id: i32, name: &str, surname: &str, password_hash: PasswordHash) -> User {
    let at = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    User::new(user_id(id), new_user(name, surname, password_hash), at, at)
}

/// Unsaved user `{name}@mars.org` with the given hash.
pub(crate) fn new_user(name: &str, surname: &str, password_hash: PasswordHash) -> NewUser {
    NewUser {
        email: Email::new(format!("{}@mars.org", name.to_lowercase())).expect("valid email"),
        password_hash,
        profile: profile(name, surname),
    }
}

/// Complete job form led by `team_leader`.
pub(crate) fn job_fields(title: &str, team_leader: i32) -> JobFields {
    JobFields {
        job: Some(title.to_owned()),
        team_leader: Some(team_leader.to_string()),
        work_size: Some("15".to_owned()),
        collaborators: Some("2, 3".to_owned()),
        start_date: Some("2024-05-01".to_owned()),
        end_date: Some("2024-05-04".to_owned()),
        is_finished: None,
    }
}

/// Complete department form headed by `chief`.
pub(crate) fn department_fields(title: &str, chief: i32, email: &str) -> DepartmentFields {
    DepartmentFields {
        title: Some(title.to_owned()),
        chief: Some(chief.to_string()),
        members: Some("2, 3".to_owned()),
        email: Some(email.to_owned()),
    }
}
