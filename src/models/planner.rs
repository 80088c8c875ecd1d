use serde::{Deserialize, Serialize};

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A study task from the local `todos` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    /// Subject/course this task belongs to; `None` lands in the "Genel"
    /// bucket when aggregating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_related: Option<String>,
    pub priority: Priority,
    /// Unix millis.
    pub created_at: i64,
}

/// Typed mutation for a `Todo`. One variant per editable field instead of an
/// update-field-by-name helper, so an unknown field is a compile error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum TodoPatch {
    SetTitle { title: String },
    SetDescription { description: String },
    SetCompleted { completed: bool },
    SetPriority { priority: Priority },
    SetCourse { course: Option<String> },
}

impl Todo {
    pub fn apply(&mut self, patch: TodoPatch) {
        match patch {
            TodoPatch::SetTitle { title } => self.title = title,
            TodoPatch::SetDescription { description } => self.description = description,
            TodoPatch::SetCompleted { completed } => self.completed = completed,
            TodoPatch::SetPriority { priority } => self.priority = priority,
            TodoPatch::SetCourse { course } => self.course_related = course,
        }
    }
}

/// One pomodoro-style focus run, as recorded under the `focusSessions`
/// storage key. Only completed sessions count toward statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSessionRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Planned session length in minutes.
    pub duration: u32,
    /// Unix millis.
    pub start_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    pub completed: bool,
}
