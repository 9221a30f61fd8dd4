//! Driving port for user reads.
//!
//! Inbound adapters call this port without knowing which repository backs it.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read-side use cases for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return all users in insertion order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return a single user or a `NotFound` error.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}
