//! User store abstraction and its implementations

pub mod memory;
pub mod user_repository;

pub use memory::InMemoryUserStore;
pub use user_repository::UserRepository;

use async_trait::async_trait;

use crate::entities::{NewUser, User, UserChanges};
use crate::types::StoreResult;

/// Persistent storage for user accounts.
///
/// Handlers only ever reach users through this trait so tests can swap the
/// SQLite repository for [`InMemoryUserStore`].
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with `UsernameTaken` when the username is in use.
    async fn create(&self, user: NewUser) -> StoreResult<User>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn username_exists(&self, username: &str) -> StoreResult<bool> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    /// Overwrite the provided profile fields and return the stored record.
    async fn update(&self, id: i64, changes: &UserChanges) -> StoreResult<User>;

    /// All users ordered by id.
    async fn list(&self) -> StoreResult<Vec<User>>;
}
