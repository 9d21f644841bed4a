//! Persistence for users and tasks.
//!
//! `UserStore` and `TaskStore` are the seams between the services and the
//! database. `PgStore` is the production implementation; `MemoryStore` keeps
//! the same semantics in process for tests and database-less local runs.
//!
//! Every task operation that touches a single row is scoped by owner in the
//! statement itself. Uniqueness of `users.email` is enforced by the store and
//! reported as `StoreError::UniqueViolation`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewTask, NewUser, Task, TaskChanges, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write; carries the constraint name.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    /// A foreign key rejected the write; carries the constraint name.
    #[error("foreign key violated: {0}")]
    ForeignKeyViolation(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. Fails with `UniqueViolation` if the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Exact, case-sensitive lookup.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Sets `profile_image_url` and bumps `updated_at`. `None` if no such user.
    async fn set_profile_image(&self, id: Uuid, url: &str) -> Result<Option<User>, StoreError>;

    /// Deletes the user and, by cascade, their tasks. Returns whether a row was removed.
    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_task(&self, task: NewTask) -> Result<Task, StoreError>;

    /// All of `owner`'s tasks, newest first.
    async fn list_tasks(&self, owner: Uuid) -> Result<Vec<Task>, StoreError>;

    /// The task with `id` if it belongs to `owner`.
    async fn find_task(&self, id: Uuid, owner: Uuid) -> Result<Option<Task>, StoreError>;

    /// Applies `changes` to the row matching both `id` and `owner` in one
    /// statement. `None` when no row matched.
    async fn update_task(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, StoreError>;

    /// Deletes the row matching both `id` and `owner`. `false` when no row matched.
    async fn delete_task(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError>;

    /// Whether any task with `id` exists, regardless of owner.
    async fn task_exists(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Reachability check used by `GET /health`.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Round-trips to the backing store. `Ok` means queries can be served.
    async fn ping(&self) -> Result<(), StoreError>;
}
