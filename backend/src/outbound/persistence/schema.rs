//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. `email` carries a unique index.
    users (id) {
        id -> Int4,
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Varchar,
        name -> Varchar,
        surname -> Varchar,
        age -> Int4,
        position -> Varchar,
        speciality -> Varchar,
        address -> Varchar,
        created_at -> Timestamptz,
        modified_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tracked work items.
    jobs (id) {
        id -> Int4,
        title -> Varchar,
        team_lead -> Int4,
        work_size -> Int4,
        collaborators -> Varchar,
        start_date -> Date,
        end_date -> Date,
        is_finished -> Bool,
        owner_id -> Int4,
    }
}

diesel::table! {
    /// Departments. `email` carries a unique index.
    departments (id) {
        id -> Int4,
        title -> Varchar,
        chief -> Int4,
        members -> Varchar,
        email -> Varchar,
        owner_id -> Int4,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, jobs, departments);
