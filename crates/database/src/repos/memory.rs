//! In-memory user store used by tests and local tooling.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UserStore;
use crate::entities::{NewUser, User, UserChanges};
use crate::types::{StoreError, StoreResult};

#[derive(Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

/// A [`UserStore`] that keeps everything in a map behind a lock.
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Flip the active flag on a stored user.
    pub async fn set_active(&self, id: i64, active: bool) -> StoreResult<()> {
        let mut guard = self.inner.write().await;
        let user = guard.users.get_mut(&id).ok_or(StoreError::UserNotFound)?;
        user.is_active = active;
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut guard = self.inner.write().await;

        if guard.users.values().any(|existing| existing.username == user.username) {
            return Err(StoreError::UsernameTaken);
        }

        guard.next_id += 1;
        let id = guard.next_id;
        let stored = user.into_user(id);
        guard.users.insert(id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> StoreResult<User> {
        let mut guard = self.inner.write().await;
        let user = guard.users.get_mut(&id).ok_or(StoreError::UserNotFound)?;

        if !changes.is_empty() {
            changes.apply(user);
        }

        Ok(user.clone())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }
}
