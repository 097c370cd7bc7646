use chrono::{DateTime, Days, NaiveDate, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Days ahead (inclusive) within which an incomplete task counts as due soon
const DUE_SOON_WINDOW_DAYS: u64 = 3;

/// Task status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task not started
    #[default]
    #[sea_orm(string_value = "TODO")]
    Todo,
    /// Task in progress
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    /// Task completed
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

impl TaskStatus {
    /// Human-readable label for display surfaces
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

/// Task priority levels
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_priority")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    #[sea_orm(string_value = "LOW")]
    Low,
    /// Default priority
    #[default]
    #[sea_orm(string_value = "MEDIUM")]
    Medium,
    #[sea_orm(string_value = "HIGH")]
    High,
}

impl TaskPriority {
    /// Human-readable label for display surfaces
    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }
}

/// Task entity - represents a persisted task
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Task title
    pub title: String,
    /// Optional task description
    pub description: Option<String>,
    /// Task status
    pub status: TaskStatus,
    /// Task priority
    pub priority: TaskPriority,
    /// Optional due date (calendar date, no time component)
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp, set once at insert
    pub created_at: DateTime<Utc>,
    /// Last update timestamp, refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// A task is overdue when its due date has passed and it is not completed.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due < today && self.status != TaskStatus::Completed,
            None => false,
        }
    }

    /// A task is due soon when its due date falls on or before
    /// `today + DUE_SOON_WINDOW_DAYS` and it is not completed.
    ///
    /// There is intentionally no lower bound: an overdue incomplete task
    /// is also reported as due soon.
    pub fn is_due_soon_on(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => {
                self.status != TaskStatus::Completed
                    && due <= today + Days::new(DUE_SOON_WINDOW_DAYS)
            }
            None => false,
        }
    }

    /// Apply a merge-patch: only fields present in the patch overwrite
    /// existing values; absent fields are left untouched.
    pub fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
    }
}

/// Wire DTO used for both create and update requests (upsert shape).
///
/// On create, absent `status`/`priority` default to `TODO`/`MEDIUM`.
/// On update, absent fields leave the stored values unchanged.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpsert {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    /// Due date in `yyyy-MM-dd` form
    pub due_date: Option<NaiveDate>,
}

/// Fully-resolved input for inserting a task (defaults already applied)
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
}

/// Field-level patch applied to an existing task (merge-patch semantics)
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
}

impl From<TaskUpsert> for TaskPatch {
    fn from(input: TaskUpsert) -> Self {
        Self {
            title: Some(input.title),
            description: input.description,
            status: input.status,
            priority: input.priority,
            due_date: input.due_date,
        }
    }
}

/// Query filters for listing tasks
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    /// Match tasks with this status
    pub status: Option<TaskStatus>,
    /// Match tasks with this priority
    pub priority: Option<TaskPriority>,
    /// Case-insensitive title substring match
    pub title: Option<String>,
    /// Match tasks due strictly before this date
    pub due_before: Option<NaiveDate>,
    /// When true, match only overdue tasks (due date passed, not completed)
    pub overdue: Option<bool>,
    /// Match tasks created at or after this timestamp
    pub created_after: Option<DateTime<Utc>>,
}

/// DTO for task responses, including derived display fields.
///
/// The derived fields are computed against the current date when the
/// response is built, never persisted; two requests for the same task on
/// different days may yield different values.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_overdue: bool,
    pub is_due_soon: bool,
    pub status_label: String,
    pub priority_label: String,
}

impl TaskResponse {
    /// Build a response evaluating the derived fields against `today`.
    pub fn on_date(task: Task, today: NaiveDate) -> Self {
        Self {
            is_overdue: task.is_overdue_on(today),
            is_due_soon: task.is_due_soon_on(today),
            status_label: task.status.label().to_string(),
            priority_label: task.priority.label().to_string(),
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self::on_date(task, Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_task() -> Task {
        Task {
            id: 1,
            title: "Write report".to_string(),
            description: Some("Quarterly numbers".to_string()),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_defaults_to_todo() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
    }

    #[test]
    fn test_priority_defaults_to_medium() {
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn test_enum_wire_format_is_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"COMPLETED\"").unwrap(),
            TaskStatus::Completed
        );
        assert_eq!(
            serde_json::to_string(&TaskPriority::High).unwrap(),
            "\"HIGH\""
        );
        assert_eq!(
            serde_json::from_str::<TaskPriority>("\"LOW\"").unwrap(),
            TaskPriority::Low
        );
    }

    #[test]
    fn test_enum_from_str_accepts_wire_strings() {
        assert_eq!(
            "IN_PROGRESS".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!("MEDIUM".parse::<TaskPriority>().unwrap(), TaskPriority::Medium);
        assert!("DONE".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(TaskStatus::Todo.label(), "To Do");
        assert_eq!(TaskStatus::InProgress.label(), "In Progress");
        assert_eq!(TaskStatus::Completed.label(), "Completed");
        assert_eq!(TaskPriority::Low.label(), "Low");
        assert_eq!(TaskPriority::Medium.label(), "Medium");
        assert_eq!(TaskPriority::High.label(), "High");
    }

    #[test]
    fn test_is_overdue_for_past_due_incomplete_task() {
        let mut task = sample_task();
        task.due_date = Some(date("2025-01-10"));

        assert!(task.is_overdue_on(date("2025-01-11")));
        assert!(!task.is_overdue_on(date("2025-01-10")));
        assert!(!task.is_overdue_on(date("2025-01-09")));
    }

    #[test]
    fn test_completed_task_is_never_overdue() {
        let mut task = sample_task();
        task.due_date = Some(date("2025-01-10"));
        task.status = TaskStatus::Completed;

        assert!(!task.is_overdue_on(date("2025-06-01")));
    }

    #[test]
    fn test_task_without_due_date_is_never_overdue_or_due_soon() {
        let task = sample_task();

        assert!(!task.is_overdue_on(date("2025-01-10")));
        assert!(!task.is_due_soon_on(date("2025-01-10")));
    }

    #[test]
    fn test_is_due_soon_window_is_inclusive() {
        let mut task = sample_task();
        let today = date("2025-01-10");

        task.due_date = Some(date("2025-01-13")); // today + 3
        assert!(task.is_due_soon_on(today));

        task.due_date = Some(date("2025-01-14")); // today + 4
        assert!(!task.is_due_soon_on(today));

        task.due_date = Some(today);
        assert!(task.is_due_soon_on(today));
    }

    #[test]
    fn test_overdue_incomplete_task_is_also_due_soon() {
        let mut task = sample_task();
        task.due_date = Some(date("2025-01-05"));
        let today = date("2025-01-10");

        assert!(task.is_overdue_on(today));
        assert!(task.is_due_soon_on(today));
    }

    #[test]
    fn test_completed_task_is_not_due_soon() {
        let mut task = sample_task();
        task.due_date = Some(date("2025-01-11"));
        task.status = TaskStatus::Completed;

        assert!(!task.is_due_soon_on(date("2025-01-10")));
    }

    #[test]
    fn test_apply_patch_overwrites_only_present_fields() {
        let mut task = sample_task();
        task.due_date = Some(date("2025-03-01"));

        task.apply_patch(TaskPatch {
            title: Some("New title".to_string()),
            ..Default::default()
        });

        assert_eq!(task.title, "New title");
        assert_eq!(task.description.as_deref(), Some("Quarterly numbers"));
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.due_date, Some(date("2025-03-01")));
    }

    #[test]
    fn test_apply_patch_full_overwrite() {
        let mut task = sample_task();

        task.apply_patch(TaskPatch {
            title: Some("Ship it".to_string()),
            description: Some("Release checklist".to_string()),
            status: Some(TaskStatus::InProgress),
            priority: Some(TaskPriority::High),
            due_date: Some(date("2025-05-01")),
        });

        assert_eq!(task.title, "Ship it");
        assert_eq!(task.description.as_deref(), Some("Release checklist"));
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.due_date, Some(date("2025-05-01")));
    }

    #[test]
    fn test_upsert_to_patch_always_carries_title() {
        let upsert = TaskUpsert {
            title: "Title".to_string(),
            description: None,
            status: None,
            priority: None,
            due_date: None,
        };

        let patch = TaskPatch::from(upsert);
        assert_eq!(patch.title.as_deref(), Some("Title"));
        assert!(patch.description.is_none());
        assert!(patch.status.is_none());
        assert!(patch.priority.is_none());
        assert!(patch.due_date.is_none());
    }

    #[test]
    fn test_upsert_validation_rejects_empty_and_oversized_titles() {
        let mut upsert = TaskUpsert {
            title: String::new(),
            description: None,
            status: None,
            priority: None,
            due_date: None,
        };
        assert!(upsert.validate().is_err());

        upsert.title = "x".repeat(256);
        assert!(upsert.validate().is_err());

        upsert.title = "x".repeat(255);
        assert!(upsert.validate().is_ok());
    }

    #[test]
    fn test_upsert_validation_rejects_oversized_description() {
        let upsert = TaskUpsert {
            title: "Title".to_string(),
            description: Some("d".repeat(1001)),
            status: None,
            priority: None,
            due_date: None,
        };
        assert!(upsert.validate().is_err());
    }

    #[test]
    fn test_upsert_deserializes_camel_case_wire_format() {
        let upsert: TaskUpsert = serde_json::from_str(
            r#"{"title":"Write report","dueDate":"2099-01-01","priority":"HIGH"}"#,
        )
        .unwrap();

        assert_eq!(upsert.title, "Write report");
        assert_eq!(upsert.due_date, Some(date("2099-01-01")));
        assert_eq!(upsert.priority, Some(TaskPriority::High));
        assert!(upsert.status.is_none());
    }

    #[test]
    fn test_response_serializes_derived_fields_in_camel_case() {
        let mut task = sample_task();
        task.due_date = Some(date("2025-01-05"));

        let response = TaskResponse::on_date(task, date("2025-01-10"));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["isOverdue"], serde_json::json!(true));
        assert_eq!(json["isDueSoon"], serde_json::json!(true));
        assert_eq!(json["statusLabel"], serde_json::json!("To Do"));
        assert_eq!(json["priorityLabel"], serde_json::json!("Medium"));
        assert_eq!(json["dueDate"], serde_json::json!("2025-01-05"));
        assert_eq!(json["status"], serde_json::json!("TODO"));
        assert_eq!(json["priority"], serde_json::json!("MEDIUM"));
    }
}
