//! Display rows for reminder lists

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;

use crate::models::{Locale, Reminder, ReminderId};
use crate::status::{classify_reminder, DueStatus};

const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// One reminder as rendered in a list, classified against a fixed `now`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderRow {
    pub id: ReminderId,
    pub title: String,
    pub description: Option<String>,
    pub due_date_time: Option<DateTime<Utc>>,
    pub due_label: Option<String>,
    pub status: DueStatus,
}

impl ReminderRow {
    pub fn build<Tz>(reminder: &Reminder, now: &DateTime<Tz>, locale: Locale) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            id: reminder.id,
            title: reminder.title_or_empty().to_string(),
            description: reminder.description.clone(),
            due_date_time: reminder.due_date_time,
            due_label: reminder
                .due_date_time
                .map(|due| format_due(&due.with_timezone(&now.timezone()), locale)),
            status: classify_reminder(reminder, now),
        }
    }
}

/// Rows for a list, in list order
pub fn rows<Tz>(reminders: &[Reminder], now: &DateTime<Tz>, locale: Locale) -> Vec<ReminderRow>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    reminders
        .iter()
        .map(|reminder| ReminderRow::build(reminder, now, locale))
        .collect()
}

/// `05 March 2025 14:30` / `05 มีนาคม 2025 14:30 น.`
pub fn format_due<Tz>(due: &DateTime<Tz>, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match locale {
        Locale::En => due.format("%d %B %Y %H:%M").to_string(),
        Locale::Th => {
            let month = THAI_MONTHS[due.month0() as usize];
            format!(
                "{:02} {month} {} {} น.",
                due.day(),
                due.year(),
                due.format("%H:%M")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    fn bangkok() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    #[test]
    fn formats_in_both_locales() {
        let due = bangkok().with_ymd_and_hms(2025, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(format_due(&due, Locale::En), "05 March 2025 14:30");
        assert_eq!(format_due(&due, Locale::Th), "05 มีนาคม 2025 14:30 น.");
    }

    #[test]
    fn row_uses_local_time_of_now() {
        let now = bangkok().with_ymd_and_hms(2025, 3, 5, 8, 0, 0).unwrap();
        let reminder = Reminder {
            id: ReminderId::new(),
            user_id: "user-1".to_string(),
            title: None,
            description: None,
            // 2025-03-05 23:30 in Bangkok
            due_date_time: Some(Utc.with_ymd_and_hms(2025, 3, 5, 16, 30, 0).unwrap()),
            is_completed: false,
            is_deleted: false,
        };

        let row = ReminderRow::build(&reminder, &now, Locale::En);
        assert_eq!(row.title, "");
        assert_eq!(row.status, DueStatus::DueSoon);
        assert_eq!(row.due_label.as_deref(), Some("05 March 2025 23:30"));
    }
}
