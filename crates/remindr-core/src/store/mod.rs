//! Remote table access.
//!
//! The application never owns reminder data: every list view is a filtered
//! query against the `reminders` table, and every edit is a patch sent back to
//! it. [`ReminderStore`] and [`ProfileStore`] are the seams; the PostgREST
//! implementation talks to Supabase and the in-process one backs tests.

mod memory;
mod postgrest;

use serde::Serialize;
use thiserror::Error;

use crate::models::{NewReminder, Profile, Reminder, ReminderId, ReminderPatch};

pub use memory::MemoryStore;
pub use postgrest::{PostgrestClient, PostgrestReminderStore};

/// Errors returned by remote table operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Store API error: {0}")]
    Api(String),
    #[error("Invalid store configuration: {0}")]
    InvalidConfiguration(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Row filter for [`ReminderStore::list`]. Results are always ordered by
/// `due_date_time` ascending with undated rows last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReminderFilter {
    pub is_completed: Option<bool>,
    pub is_deleted: bool,
    pub id: Option<ReminderId>,
}

impl ReminderFilter {
    /// Open reminders (home and notification screens)
    #[must_use]
    pub const fn active() -> Self {
        Self {
            is_completed: Some(false),
            is_deleted: false,
            id: None,
        }
    }

    /// Completed reminders
    #[must_use]
    pub const fn completed() -> Self {
        Self {
            is_completed: Some(true),
            is_deleted: false,
            id: None,
        }
    }

    /// Every reminder that has not been deleted (delete picker)
    #[must_use]
    pub const fn not_deleted() -> Self {
        Self {
            is_completed: None,
            is_deleted: false,
            id: None,
        }
    }

    /// A single non-deleted reminder (edit form)
    #[must_use]
    pub const fn by_id(id: ReminderId) -> Self {
        Self {
            is_completed: None,
            is_deleted: false,
            id: Some(id),
        }
    }

    /// Whether a row passes this filter
    #[must_use]
    pub fn matches(&self, reminder: &Reminder) -> bool {
        reminder.is_deleted == self.is_deleted
            && self
                .is_completed
                .is_none_or(|is_completed| reminder.is_completed == is_completed)
            && self.id.is_none_or(|id| reminder.id == id)
    }
}

/// Operations on the `reminders` table
#[allow(async_fn_in_trait)]
pub trait ReminderStore {
    /// Rows matching `filter`, ascending by due date
    async fn list(&self, filter: &ReminderFilter) -> StoreResult<Vec<Reminder>>;

    /// Insert a row and return it with its assigned id
    async fn insert(&self, reminder: &NewReminder) -> StoreResult<Reminder>;

    /// Patch one row
    async fn update(&self, id: &ReminderId, patch: &ReminderPatch) -> StoreResult<()>;

    /// Patch every row whose id is in `ids`
    async fn update_many(&self, ids: &[ReminderId], patch: &ReminderPatch) -> StoreResult<()>;
}

/// Operations on the `profile` table.
///
/// `access_token` is the signed-in user's token; `None` falls back to the
/// anon key (profile creation right after a sign-up that needs confirmation).
#[allow(async_fn_in_trait)]
pub trait ProfileStore {
    async fn fetch_profile(
        &self,
        access_token: Option<&str>,
        user_id: &str,
    ) -> StoreResult<Option<Profile>>;

    async fn insert_profile(&self, access_token: Option<&str>, profile: &Profile)
        -> StoreResult<()>;

    async fn update_username(
        &self,
        access_token: Option<&str>,
        user_id: &str,
        username: &str,
    ) -> StoreResult<()>;
}

/// Sort rows the way the remote store does: ascending due date, undated last.
pub(crate) fn sort_by_due_date(reminders: &mut [Reminder]) {
    reminders.sort_by(|a, b| match (a.due_date_time, b.due_date_time) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
