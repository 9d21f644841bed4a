use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{CreateTaskRequest, NewTask, Task, TaskChanges};
use crate::store::TaskStore;

/// Owner-scoped task operations.
///
/// Reads answer 404 for both "no such task" and "not yours". Writes (update
/// and delete) tell the two apart and answer 403 for the latter.
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    /// Inserts a task owned by `owner`.
    ///
    /// When no due date is given it defaults to the current date.
    pub async fn create(&self, owner: Uuid, input: CreateTaskRequest) -> Result<Task, AppError> {
        let new_task = NewTask::from_request(owner, input, Utc::now().date_naive());
        let task = self.tasks.insert_task(new_task).await?;
        log::info!("task {} created by user {}", task.id, owner);
        Ok(task)
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.list_tasks(owner).await?;
        log::debug!("fetched {} tasks for user {}", tasks.len(), owner);
        Ok(tasks)
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Task, AppError> {
        self.tasks.find_task(id, owner).await?.ok_or_else(|| {
            log::warn!("task {} not found or not owned by user {}", id, owner);
            AppError::NotFound("Task not found".into())
        })
    }

    pub async fn update(&self, owner: Uuid, id: Uuid, changes: TaskChanges) -> Result<Task, AppError> {
        match self.tasks.update_task(id, owner, &changes).await? {
            Some(task) => {
                log::info!("task {} updated by user {}", id, owner);
                Ok(task)
            }
            None => Err(self.missing_or_forbidden(owner, id, "update").await),
        }
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), AppError> {
        if self.tasks.delete_task(id, owner).await? {
            log::info!("task {} deleted by user {}", id, owner);
            Ok(())
        } else {
            Err(self.missing_or_forbidden(owner, id, "delete").await)
        }
    }

    /// Explains why an owner-scoped write matched no row.
    async fn missing_or_forbidden(&self, owner: Uuid, id: Uuid, action: &str) -> AppError {
        match self.tasks.task_exists(id).await {
            Ok(false) => {
                log::warn!("{} failed: task {} does not exist", action, id);
                AppError::NotFound("Task does not exist".into())
            }
            Ok(true) => {
                log::warn!("{} failed: task {} is not owned by user {}", action, id, owner);
                AppError::Forbidden(format!("You do not have permission to {} this task", action))
            }
            Err(e) => e.into(),
        }
    }
}
