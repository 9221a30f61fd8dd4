//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::users;
use crate::domain::{FieldUpdate, NewUser, Slug, User, UserChanges, UserDraft, UserId};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub age: i32,
    pub slug: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self::new(UserDraft {
            id: UserId::new(row.id),
            username: row.username,
            firstname: row.firstname,
            lastname: row.lastname,
            age: row.age,
            slug: Slug::from_stored(row.slug),
        })
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub firstname: &'a str,
    pub lastname: &'a str,
    pub age: i32,
    pub slug: &'a str,
}

impl<'a> NewUserRow<'a> {
    pub(crate) fn new(user: &'a NewUser, slug: &'a Slug) -> Self {
        Self {
            username: &user.username,
            firstname: &user.firstname,
            lastname: &user.lastname,
            age: user.age,
            slug: slug.as_str(),
        }
    }
}

/// Changeset writing only the columns present in a partial update.
///
/// Diesel skips `None` fields, so unchanged attributes never appear in the
/// generated `SET` clause.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub username: Option<&'a str>,
    pub firstname: Option<&'a str>,
    pub lastname: Option<&'a str>,
    pub age: Option<i32>,
}

impl<'a> From<&'a UserChanges> for UserChangeset<'a> {
    fn from(changes: &'a UserChanges) -> Self {
        Self {
            username: changes.username.as_set().map(String::as_str),
            firstname: changes.firstname.as_set().map(String::as_str),
            lastname: changes.lastname.as_set().map(String::as_str),
            age: match changes.age {
                FieldUpdate::Set(age) => Some(age),
                FieldUpdate::Unchanged => None,
            },
        }
    }
}
