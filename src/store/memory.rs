use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{StoreError, StoreHealth, TaskStore, UserStore};
use crate::models::{NewTask, NewUser, Task, TaskChanges, User};

/// In-process store with the same observable behaviour as `PgStore`:
/// unique emails, owner-scoped task writes, cascade on user delete,
/// `updated_at` refresh on update and newest-first listing.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    // Insertion order doubles as creation order.
    tasks: Vec<Task>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // No write spans an await or a fallible step, so the tables stay consistent
        // even if the lock is poisoned.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation("users_email_key".into()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            profile_image_url: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn set_profile_image(&self, id: Uuid, url: &str) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables();
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            user.profile_image_url = Some(url.to_string());
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        let removed = tables.users.len() != before;
        if removed {
            tables.tasks.retain(|t| t.owner_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert_task(&self, task: NewTask) -> Result<Task, StoreError> {
        let mut tables = self.tables();
        if !tables.users.iter().any(|u| u.id == task.owner_id) {
            return Err(StoreError::ForeignKeyViolation("tasks_owner_id_fkey".into()));
        }

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            owner_id: task.owner_id,
            title: task.title,
            description: task.description,
            completed: task.completed,
            due_date: task.due_date,
            created_at: now,
            updated_at: now,
        };
        tables.tasks.push(task.clone());
        Ok(task)
    }

    async fn list_tasks(&self, owner: Uuid) -> Result<Vec<Task>, StoreError> {
        Ok(self
            .tables()
            .tasks
            .iter()
            .rev()
            .filter(|t| t.owner_id == owner)
            .cloned()
            .collect())
    }

    async fn find_task(&self, id: Uuid, owner: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self
            .tables()
            .tasks
            .iter()
            .find(|t| t.id == id && t.owner_id == owner)
            .cloned())
    }

    async fn update_task(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, StoreError> {
        let mut tables = self.tables();
        Ok(tables
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.owner_id == owner)
            .map(|task| {
                changes.apply_to(task);
                task.updated_at = Utc::now();
                task.clone()
            }))
    }

    async fn delete_task(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        let before = tables.tasks.len();
        tables.tasks.retain(|t| !(t.id == id && t.owner_id == owner));
        Ok(tables.tasks.len() != before)
    }

    async fn task_exists(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.tables().tasks.iter().any(|t| t.id == id))
    }
}
