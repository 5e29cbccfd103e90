use chrono::{DateTime, TimeZone};
use serde::Serialize;

use super::classify_reminder;
use crate::models::Reminder;

/// Largest count rendered as a number; anything above shows as `99+`.
pub const BADGE_DISPLAY_CAP: usize = 99;

/// Count of active reminders that are overdue or due soon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct BadgeCount(usize);

impl BadgeCount {
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self(count)
    }

    #[must_use]
    pub const fn value(self) -> usize {
        self.0
    }

    /// Badge text, `None` when the bell shows no badge
    #[must_use]
    pub fn label(self) -> Option<String> {
        match self.0 {
            0 => None,
            n if n > BADGE_DISPLAY_CAP => Some(format!("{BADGE_DISPLAY_CAP}+")),
            n => Some(n.to_string()),
        }
    }
}

/// Count reminders that are overdue or due soon.
///
/// Completed and soft-deleted rows never count, even if the caller passes them in.
#[must_use]
pub fn near_due_count<Tz: TimeZone>(reminders: &[Reminder], now: &DateTime<Tz>) -> BadgeCount {
    let count = reminders
        .iter()
        .filter(|reminder| !reminder.is_deleted)
        .filter(|reminder| classify_reminder(reminder, now).is_near_due())
        .count();
    BadgeCount(count)
}
