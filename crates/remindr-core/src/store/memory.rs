//! In-process store with the same filter and ordering rules as PostgREST.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{sort_by_due_date, ProfileStore, ReminderFilter, ReminderStore, StoreError, StoreResult};
use crate::models::{NewReminder, Profile, Reminder, ReminderId, ReminderPatch};

#[derive(Default)]
struct Tables {
    reminders: Vec<Reminder>,
    profiles: HashMap<String, Profile>,
    fail_next: Option<String>,
    calls: usize,
}

impl Tables {
    fn take_failure(&mut self) -> StoreResult<()> {
        self.calls += 1;
        match self.fail_next.take() {
            Some(message) => Err(StoreError::Api(message)),
            None => Ok(()),
        }
    }
}

/// Shared in-memory `reminders` + `profile` tables. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `reminders`
    #[must_use]
    pub fn with_reminders(reminders: Vec<Reminder>) -> Self {
        let store = Self::default();
        if let Ok(mut tables) = store.tables.try_lock() {
            tables.reminders = reminders;
        }
        store
    }

    /// Make the next store call fail with an API error
    pub async fn fail_next(&self, message: impl Into<String>) {
        self.tables.lock().await.fail_next = Some(message.into());
    }

    /// Every row, deleted ones included
    pub async fn all_reminders(&self) -> Vec<Reminder> {
        self.tables.lock().await.reminders.clone()
    }

    /// Number of store calls made so far
    pub async fn call_count(&self) -> usize {
        self.tables.lock().await.calls
    }
}

impl ReminderStore for MemoryStore {
    async fn list(&self, filter: &ReminderFilter) -> StoreResult<Vec<Reminder>> {
        let mut tables = self.tables.lock().await;
        tables.take_failure()?;
        let mut rows = tables
            .reminders
            .iter()
            .filter(|reminder| filter.matches(reminder))
            .cloned()
            .collect::<Vec<_>>();
        sort_by_due_date(&mut rows);
        Ok(rows)
    }

    async fn insert(&self, reminder: &NewReminder) -> StoreResult<Reminder> {
        let mut tables = self.tables.lock().await;
        tables.take_failure()?;
        let row = Reminder {
            id: ReminderId::new(),
            user_id: reminder.user_id.clone(),
            title: reminder.title.clone(),
            description: reminder.description.clone(),
            due_date_time: reminder.due_date_time,
            is_completed: false,
            is_deleted: false,
        };
        tables.reminders.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: &ReminderId, patch: &ReminderPatch) -> StoreResult<()> {
        self.update_many(std::slice::from_ref(id), patch).await
    }

    async fn update_many(&self, ids: &[ReminderId], patch: &ReminderPatch) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        tables.take_failure()?;
        // PostgREST reports success even when the filter matches nothing.
        for row in tables
            .reminders
            .iter_mut()
            .filter(|row| ids.contains(&row.id))
        {
            patch.apply_to(row);
        }
        Ok(())
    }
}

impl ProfileStore for MemoryStore {
    async fn fetch_profile(
        &self,
        _access_token: Option<&str>,
        user_id: &str,
    ) -> StoreResult<Option<Profile>> {
        let mut tables = self.tables.lock().await;
        tables.take_failure()?;
        Ok(tables.profiles.get(user_id).cloned())
    }

    async fn insert_profile(
        &self,
        _access_token: Option<&str>,
        profile: &Profile,
    ) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        tables.take_failure()?;
        if tables.profiles.contains_key(&profile.id) {
            return Err(StoreError::Api(format!(
                "duplicate key value violates unique constraint \"profile_pkey\" ({})",
                profile.id
            )));
        }
        tables.profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn update_username(
        &self,
        _access_token: Option<&str>,
        user_id: &str,
        username: &str,
    ) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        tables.take_failure()?;
        if let Some(profile) = tables.profiles.get_mut(user_id) {
            profile.username = Some(username.to_string());
        }
        Ok(())
    }
}
