//! Due-date classification.
//!
//! Every reminder row is classified against an explicit `now` into one of
//! four states. The state drives row colors and the notification badge, and
//! is never stored.

mod badge;
mod palette;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::models::Reminder;

pub use badge::{near_due_count, BadgeCount, BADGE_DISPLAY_CAP};
pub use palette::{hex_to_rgb, Palette, RowStyle};

/// Display state of a reminder relative to the current date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    /// Marked done, whatever the date
    Completed,
    /// Due on a calendar day before today
    Overdue,
    /// Due today or tomorrow
    DueSoon,
    /// No deadline, or due later than tomorrow
    Normal,
}

impl DueStatus {
    /// Whether this status counts towards the notification badge
    #[must_use]
    pub const fn is_near_due(self) -> bool {
        matches!(self, Self::Overdue | Self::DueSoon)
    }
}

/// Classify a due date against `now`.
///
/// Days are compared as calendar dates in `now`'s time zone, so 01:00 and
/// 23:00 on the same day are both "today".
#[must_use]
pub fn classify<Tz: TimeZone>(
    due_date_time: Option<DateTime<Utc>>,
    is_completed: bool,
    now: &DateTime<Tz>,
) -> DueStatus {
    if is_completed {
        return DueStatus::Completed;
    }
    let Some(due) = due_date_time else {
        return DueStatus::Normal;
    };

    let due_day = due.with_timezone(&now.timezone()).date_naive();
    let today = now.date_naive();
    if due_day < today {
        return DueStatus::Overdue;
    }

    let days_diff = due_day.signed_duration_since(today).num_days();
    if days_diff <= 1 {
        DueStatus::DueSoon
    } else {
        DueStatus::Normal
    }
}

/// Classify a reminder row
#[must_use]
pub fn classify_reminder<Tz: TimeZone>(reminder: &Reminder, now: &DateTime<Tz>) -> DueStatus {
    classify(reminder.due_date_time, reminder.is_completed, now)
}
