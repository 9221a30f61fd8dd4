//! User resource service implementing the user driving ports.
//!
//! Every operation is stateless: it validates business rules against the
//! repository and issues at most one write statement.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, Slug, User, UserChanges, UserId};

/// Message returned when an identifier matches no user.
pub const USER_NOT_FOUND_MESSAGE: &str = "User was not found";
/// Message returned when a username is already registered.
pub const USERNAME_TAKEN_MESSAGE: &str = "User with this username already exists";

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Conflict { message } => {
            debug!(%message, "username uniqueness enforced by storage");
            Error::conflict(USERNAME_TAKEN_MESSAGE)
        }
    }
}

fn user_not_found() -> Error {
    Error::not_found(USER_NOT_FOUND_MESSAGE)
}

/// User service backed by a [`UserRepository`].
#[derive(Clone)]
pub struct UserService<R: ?Sized> {
    users: Arc<R>,
}

impl<R: ?Sized> UserService<R> {
    /// Create a service over the given repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R> UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn require_user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(user_not_found)
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_repository_error)
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.require_user(id).await
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn create_user(&self, user: NewUser) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_username(&user.username)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict(USERNAME_TAKEN_MESSAGE));
        }

        let slug = Slug::from_username(&user.username);
        let created = self
            .users
            .insert(&user, &slug)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %created.id(), slug = %created.slug(), "user created");
        Ok(created)
    }

    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User, Error> {
        let current = self.require_user(id).await?;
        if changes.is_empty() {
            debug!(user_id = %id, "empty change set; nothing to update");
            return Ok(current);
        }

        // The row can vanish between the lookup and the write.
        let updated = self
            .users
            .update(id, &changes)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(user_not_found)?;
        info!(user_id = %id, "user updated");
        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        self.require_user(id).await?;
        let deleted = self
            .users
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(user_not_found());
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
