//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    ///
    /// `username` carries a unique constraint; `slug` is indexed.
    users (id) {
        /// Serial primary key.
        id -> Int4,
        /// Unique login name.
        username -> Varchar,
        firstname -> Varchar,
        lastname -> Varchar,
        age -> Int4,
        /// Permalink derived from the username at creation.
        slug -> Varchar,
    }
}
