//! Data models for Remindr

mod profile;
mod reminder;
mod settings;

pub use profile::Profile;
pub use reminder::{NewReminder, Reminder, ReminderId, ReminderPatch, TITLE_MAX_CHARS};
pub use settings::{Locale, ThemeMode};
