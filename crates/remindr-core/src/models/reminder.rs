//! Reminder model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum title length accepted by the inline title editor.
pub const TITLE_MAX_CHARS: usize = 25;

/// Identifier assigned by the remote store on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderId(Uuid);

impl ReminderId {
    /// Generate a fresh random ID (used by the in-process store)
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReminderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReminderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

/// A reminder row as stored in the `reminders` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Unique identifier
    pub id: ReminderId,
    /// Owner (auth user id)
    pub user_id: String,
    /// Short title, empty right after creation
    #[serde(default)]
    pub title: Option<String>,
    /// Optional longer description
    #[serde(default)]
    pub description: Option<String>,
    /// Optional deadline
    #[serde(default)]
    pub due_date_time: Option<DateTime<Utc>>,
    /// Completion flag
    #[serde(default)]
    pub is_completed: bool,
    /// Soft delete flag
    #[serde(default)]
    pub is_deleted: bool,
}

impl Reminder {
    /// Title for display, empty string when unset
    #[must_use]
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// Insert payload. The store assigns `id` and the flag defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReminder {
    pub user_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date_time: Option<DateTime<Utc>>,
}

impl NewReminder {
    /// Empty reminder owned by `user_id`, as created by the add button
    #[must_use]
    pub fn blank(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            title: None,
            description: None,
            due_date_time: None,
        }
    }
}

/// Partial update. Only `Some` fields are sent; `Some(None)` clears a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReminderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date_time: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
}

impl ReminderPatch {
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(Some(title.into())),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn completed(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn deleted() -> Self {
        Self {
            is_deleted: Some(true),
            ..Self::default()
        }
    }

    /// Apply this patch to an in-memory row
    pub fn apply_to(&self, reminder: &mut Reminder) {
        if let Some(title) = &self.title {
            reminder.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            reminder.description.clone_from(description);
        }
        if let Some(due) = self.due_date_time {
            reminder.due_date_time = due;
        }
        if let Some(is_completed) = self.is_completed {
            reminder.is_completed = is_completed;
        }
        if let Some(is_deleted) = self.is_deleted {
            reminder.is_deleted = is_deleted;
        }
    }
}
