//! Records mirroring the TickTick API's JSON shapes.
//!
//! Field omission is spelled out per field: optional values are skipped when
//! absent (or zero/false/empty for plain values) rather than sent as `null`,
//! while required fields are always written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a TickTick resource.
pub type Id = String;

/// A TickTick project (a named list of tasks).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// The unique identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: Id,

    /// The project name.
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,

    /// Display color, e.g. `#F18181`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Whether the project is shown in the "All" smart list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_all: Option<bool>,

    /// Position among the user's projects; lower sorts first.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub sort_order: i64,

    /// How tasks are ordered in the project, e.g. `dueDate` or `priority`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_type: Option<String>,

    /// Number of users sharing the project.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub user_count: i64,

    /// Version tag, changed on every modification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// When the project was last modified.
    #[serde(
        default,
        with = "crate::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_time: Option<DateTime<Utc>>,

    /// Whether the project is archived.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_false")]
    pub closed: bool,

    /// Whether notifications for the project are muted.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_false")]
    pub muted: bool,

    /// `TASK` or `NOTE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// `list`, `kanban` or `timeline`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_mode: Option<String>,

    /// Folder the project belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Id>,

    /// Access level of a shared project: `read`, `write` or `comment`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
}

/// A task belonging to a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// The unique identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: Id,

    /// The owning project.
    #[serde(default, deserialize_with = "nullable")]
    pub project_id: Id,

    /// The task title.
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,

    /// Free-text body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Description used by checklist tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Whether the task spans whole days rather than a time of day. The
    /// service also reports this as `isAllDay`.
    #[serde(
        default,
        alias = "isAllDay",
        deserialize_with = "nullable",
        skip_serializing_if = "is_false"
    )]
    pub all_day: bool,

    #[serde(
        default,
        with = "crate::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(
        default,
        with = "crate::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,

    /// IANA time zone name, e.g. `America/Los_Angeles`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    /// Floating tasks keep their wall-clock time across time zones.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_false")]
    pub is_floating: bool,

    /// Single reminder trigger, as returned alongside `reminders` by some
    /// endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub reminders: Vec<Reminder>,

    /// See the `PRIORITY_*` constants.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub priority: i32,

    /// See the `STATUS_*` constants.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub status: i32,

    #[serde(
        default,
        with = "crate::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_time: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub sort_order: i64,

    /// Checklist entries.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TaskItem>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub progress: i32,

    #[serde(
        default,
        with = "crate::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub deleted: i32,

    #[serde(
        default,
        with = "crate::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub creator: i64,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// `TEXT`, `NOTE` or `CHECKLIST`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Task {
    /// Status of an open task.
    pub const STATUS_NORMAL: i32 = 0;
    /// Status of a completed task.
    pub const STATUS_COMPLETED: i32 = 2;

    /// No priority set.
    pub const PRIORITY_NONE: i32 = 0;
    pub const PRIORITY_LOW: i32 = 1;
    pub const PRIORITY_MEDIUM: i32 = 3;
    pub const PRIORITY_HIGH: i32 = 5;

    /// Returns true if the service reports the task as completed.
    pub fn is_completed(&self) -> bool {
        self.status == Self::STATUS_COMPLETED
    }
}

/// A checklist entry within a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: Id,

    #[serde(default, deserialize_with = "nullable")]
    pub title: String,

    /// `0` normal, `1` completed.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub status: i32,

    #[serde(
        default,
        with = "crate::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_time: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub sort_order: i64,

    #[serde(
        default,
        with = "crate::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_false")]
    pub is_all_day: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// A notification rule attached to a task.
///
/// The service may return reminders either as objects or as bare trigger
/// strings; both forms are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReminderRepr")]
pub struct Reminder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    /// Trigger expression, e.g. `TRIGGER:P0DT9H0M0S`.
    pub trigger: String,
}

impl Reminder {
    /// Create a reminder with the given trigger expression.
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            id: None,
            trigger: trigger.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReminderRepr {
    Trigger(String),
    Full {
        #[serde(default)]
        id: Option<Id>,
        trigger: String,
    },
}

impl From<ReminderRepr> for Reminder {
    fn from(repr: ReminderRepr) -> Self {
        match repr {
            ReminderRepr::Trigger(trigger) => Reminder { id: None, trigger },
            ReminderRepr::Full { id, trigger } => Reminder { id, trigger },
        }
    }
}

/// A kanban column of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(default)]
    pub id: Id,

    #[serde(default, deserialize_with = "nullable")]
    pub project_id: Id,

    #[serde(default, deserialize_with = "nullable")]
    pub name: String,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub sort_order: i64,
}

/// A project together with its undone tasks and columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,

    #[serde(default, deserialize_with = "nullable")]
    pub tasks: Vec<Task>,

    #[serde(default, deserialize_with = "nullable")]
    pub columns: Vec<Column>,
}

/// Request body for creating a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CreateProjectRequest {
    /// Create a request for a project with the given name and no color.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Request body for updating a project. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    /// The project to update.
    pub id: Id,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl UpdateProjectRequest {
    /// Create a request that changes nothing on project `id`; set the fields
    /// to update.
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Request body for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,

    /// The project to create the task in.
    pub project_id: Id,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,

    #[serde(
        with = "crate::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(
        with = "crate::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reminders: Vec<Reminder>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl CreateTaskRequest {
    /// Create a request for a task titled `title` in `project_id`.
    pub fn new(project_id: impl Into<Id>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

/// Request body for updating a task. Only set fields are sent.
///
/// `Some(vec![])` for `reminders` or `tags` clears them; `None` leaves them
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// The task to update.
    pub id: Id,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,

    #[serde(
        with = "crate::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(
        with = "crate::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Vec<Reminder>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UpdateTaskRequest {
    /// Create a request that changes nothing on task `id`; set the fields to
    /// update.
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Read `null` as the type's default value.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}
