use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task.
    pub id: Uuid,
    /// The user who owns the task. Fixed at creation.
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /tasks`.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Must be between 1 and 255 characters.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Free text, no length limit.
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<NaiveDate>,
}

/// Payload for `PUT /tasks/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<NaiveDate>,
}

/// A task ready to be inserted. Defaults have already been applied.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// Builds the row for `owner_id`, filling in the creation defaults:
    /// `completed` is false and `due_date` is `today` when not given.
    pub fn from_request(owner_id: Uuid, input: CreateTaskRequest, today: NaiveDate) -> Self {
        Self {
            owner_id,
            title: input.title,
            description: input.description,
            completed: input.completed.unwrap_or(false),
            due_date: Some(input.due_date.unwrap_or(today)),
        }
    }
}

/// Column changes for an update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<NaiveDate>,
}

impl From<UpdateTaskRequest> for TaskChanges {
    fn from(input: UpdateTaskRequest) -> Self {
        Self {
            title: input.title,
            description: input.description,
            completed: input.completed,
            due_date: input.due_date,
        }
    }
}

impl TaskChanges {
    /// Applies the changes to an in-memory task. `updated_at` is left to the caller.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = Some(due_date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            description: Some("Test Description".to_string()),
            completed: None,
            due_date: None,
        }
    }

    #[test]
    fn test_new_task_defaults() {
        let owner = Uuid::new_v4();
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let task = NewTask::from_request(owner, create_request("Test Task"), today);
        assert_eq!(task.title, "Test Task");
        assert_eq!(task.owner_id, owner);
        assert!(!task.completed);
        assert_eq!(task.due_date, Some(today));

        let mut explicit = create_request("Test Task");
        explicit.completed = Some(true);
        explicit.due_date = NaiveDate::from_ymd_opt(2030, 1, 1);
        let task = NewTask::from_request(owner, explicit, today);
        assert!(task.completed);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2030, 1, 1));
    }

    #[test]
    fn test_task_validation() {
        assert!(create_request("Valid Task").validate().is_ok());
        assert!(create_request("").validate().is_err());
        assert!(create_request(&"a".repeat(256)).validate().is_err());

        let update = UpdateTaskRequest {
            title: Some("".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
        assert!(UpdateTaskRequest::default().validate().is_ok());

        let mut long_description = create_request("Write the long report");
        long_description.description = Some("d".repeat(20_000));
        assert!(long_description.validate().is_ok());
        let update = UpdateTaskRequest {
            description: Some("d".repeat(20_000)),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_changes_apply_only_given_fields() {
        let now = Utc::now();
        let mut task = Task {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Original".to_string(),
            description: Some("Keep me".to_string()),
            completed: false,
            due_date: None,
            created_at: now,
            updated_at: now,
        };

        TaskChanges {
            completed: Some(true),
            ..Default::default()
        }
        .apply_to(&mut task);

        assert_eq!(task.title, "Original");
        assert_eq!(task.description.as_deref(), Some("Keep me"));
        assert!(task.completed);
    }

    #[test]
    fn test_create_request_accepts_camel_case_due_date() {
        let json = serde_json::json!({ "title": "Buy milk and eggs", "dueDate": "2024-06-30" });
        let request: CreateTaskRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.due_date, NaiveDate::from_ymd_opt(2024, 6, 30));
    }
}
