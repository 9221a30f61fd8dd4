//! Process-local `UserRepository` used when no database is configured.
//!
//! Rows live in an ordered map keyed by id, so listing returns insertion
//! order just like the serial key in PostgreSQL. Usernames are unique, as
//! with the database constraint. Nothing survives a restart.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, Slug, User, UserChanges, UserDraft, UserId};

#[derive(Debug, Default)]
struct Store {
    last_id: i32,
    rows: BTreeMap<i32, User>,
}

impl Store {
    fn username_taken(&self, username: &str, except: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|user| user.username() == username && Some(user.id()) != except)
    }
}

/// In-memory user storage guarded by a mutex.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use user_service::domain::UserService;
/// use user_service::outbound::memory::InMemoryUserRepository;
///
/// let _service = UserService::new(Arc::new(InMemoryUserRepository::default()));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store poisoned"))
    }
}

fn username_conflict() -> UserPersistenceError {
    UserPersistenceError::conflict("users_username_key")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.rows.get(&id.get()).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .rows
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn insert(&self, user: &NewUser, slug: &Slug) -> Result<User, UserPersistenceError> {
        let mut store = self.lock()?;
        if store.username_taken(&user.username, None) {
            return Err(username_conflict());
        }
        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        let created = User::new(UserDraft {
            id: UserId::new(id),
            username: user.username.clone(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            age: user.age,
            slug: slug.clone(),
        });
        store.last_id = id;
        store.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut store = self.lock()?;
        let renamed_onto_taken = changes
            .username
            .as_set()
            .is_some_and(|username| store.username_taken(username, Some(id)));
        if renamed_onto_taken {
            return Err(username_conflict());
        }
        let Some(current) = store.rows.remove(&id.get()) else {
            return Ok(None);
        };
        let updated = current.with_changes(changes);
        store.rows.insert(id.get(), updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.rows.remove(&id.get()).is_some())
    }
}
