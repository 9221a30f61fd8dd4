//! Driven port for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUser, Slug, User, UserChanges, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Storage could not be reached or a connection could not be checked out.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "user repository conflict: {message}",
    }
}

/// Storage operations for user records.
///
/// Every method runs a single statement on its own pooled connection.
/// Implementations must enforce username uniqueness on `insert` and `update`
/// and report violations as [`UserPersistenceError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every user ordered by ascending identifier.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new row and return it with its assigned identifier.
    async fn insert(&self, user: &NewUser, slug: &Slug) -> Result<User, UserPersistenceError>;

    /// Apply `changes` to the row and return it, or `None` when no row matched.
    ///
    /// An empty change set writes nothing and returns the current row.
    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Delete the row, returning `false` when no row matched.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
