//! User aggregate and the write models used to create and change it.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::slugify;

/// Storage-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// URL-safe permalink derived from the username at creation time.
///
/// A slug is never recomputed, so it can drift from the username after an
/// update. That keeps permalinks stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derive the slug for a new user.
    #[must_use]
    pub fn from_username(username: &str) -> Self {
        Self(slugify(username))
    }

    /// Rehydrate a slug read back from storage.
    #[must_use]
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    /// Borrow the slug text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted user.
///
/// ## Invariants
/// - `id` is assigned by storage and never changes.
/// - `slug` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    firstname: String,
    lastname: String,
    age: i32,
    slug: Slug,
}

/// Field bundle used to build a [`User`] without a long positional argument
/// list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    /// Storage-assigned identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Age in years.
    pub age: i32,
    /// Permalink fixed at creation.
    pub slug: Slug,
}

impl User {
    /// Assemble a user from its parts.
    #[must_use]
    pub fn new(draft: UserDraft) -> Self {
        let UserDraft {
            id,
            username,
            firstname,
            lastname,
            age,
            slug,
        } = draft;
        Self {
            id,
            username,
            firstname,
            lastname,
            age,
            slug,
        }
    }

    /// Storage-assigned identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Unique login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Given name.
    #[must_use]
    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    /// Family name.
    #[must_use]
    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    /// Age in years.
    #[must_use]
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Permalink fixed at creation.
    #[must_use]
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Return a copy with `changes` applied. `id` and `slug` are untouched.
    #[must_use]
    pub fn with_changes(mut self, changes: &UserChanges) -> Self {
        if let FieldUpdate::Set(username) = &changes.username {
            self.username.clone_from(username);
        }
        if let FieldUpdate::Set(firstname) = &changes.firstname {
            self.firstname.clone_from(firstname);
        }
        if let FieldUpdate::Set(lastname) = &changes.lastname {
            self.lastname.clone_from(lastname);
        }
        if let FieldUpdate::Set(age) = changes.age {
            self.age = age;
        }
        self
    }
}

/// Input for creating a user; every field is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login name.
    pub username: String,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Age in years.
    pub age: i32,
}

/// Update state of a single attribute in a partial update.
///
/// `Unchanged` means the caller omitted the field. `Set` carries a value to
/// write, including zero or empty values. When deserialised, an absent field
/// becomes `Unchanged` (with `#[serde(default)]`) while an explicit `null` is
/// rejected because no updatable column is nullable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the stored value as is.
    #[default]
    Unchanged,
    /// Overwrite the stored value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Return `true` when a value is to be written.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Borrow the value to write, if any.
    #[must_use]
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unchanged => None,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unchanged, Self::Set)
    }
}

impl<'de, T> Deserialize<'de> for FieldUpdate<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::Set)
    }
}

/// Partial set of user attributes to overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// New login name.
    pub username: FieldUpdate<String>,
    /// New given name.
    pub firstname: FieldUpdate<String>,
    /// New family name.
    pub lastname: FieldUpdate<String>,
    /// New age.
    pub age: FieldUpdate<i32>,
}

impl UserChanges {
    /// Return `true` when no attribute is to be written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.username.is_set()
            || self.firstname.is_set()
            || self.lastname.is_set()
            || self.age.is_set())
    }
}
