//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserChanges, UserId};

/// Write-side use cases for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user, failing with `Conflict` when the username is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Apply a partial update, failing with `NotFound` for unknown ids.
    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User, Error>;

    /// Hard-delete a user, failing with `NotFound` for unknown ids.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
