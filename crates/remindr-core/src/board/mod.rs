//! Screen handlers for reminder lists.
//!
//! A [`ReminderBoard`] holds the list currently on screen. Loads replace it
//! with a fresh query; mutations are sent to the store and then the current
//! view is queried again. A failed call leaves the list as it was.

mod row;

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::error::{Error, Result};
use crate::models::{NewReminder, Reminder, ReminderId, ReminderPatch, TITLE_MAX_CHARS};
use crate::notice::Notice;
use crate::status::{classify_reminder, near_due_count, BadgeCount};
use crate::store::{ReminderFilter, ReminderStore};
use crate::util::truncate_chars;
use crate::validation::ReminderForm;

pub use row::{format_due, rows, ReminderRow};

/// Which query the board is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Completed,
    DeletePicker,
    /// Near-due reminders as of `now`
    Notifications { now: DateTime<FixedOffset> },
}

/// Alert raised the first time the home screen sees near-due reminders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearDueAlert {
    pub count: usize,
}

impl NearDueAlert {
    #[must_use]
    pub const fn notice(self) -> Notice {
        Notice::NearDue { count: self.count }
    }
}

/// Result of loading the home screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeSummary {
    pub badge: BadgeCount,
    pub alert: Option<NearDueAlert>,
}

pub struct ReminderBoard<S> {
    store: S,
    view: View,
    reminders: Vec<Reminder>,
    newly_added: Option<ReminderId>,
    alerted: bool,
}

impl<S: ReminderStore> ReminderBoard<S> {
    pub const fn new(store: S) -> Self {
        Self {
            store,
            view: View::Home,
            reminders: Vec::new(),
            newly_added: None,
            alerted: false,
        }
    }

    /// Reminders currently on screen
    #[must_use]
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    /// Row created by the last [`Self::create_blank`], focused for editing
    #[must_use]
    pub const fn newly_added(&self) -> Option<ReminderId> {
        self.newly_added
    }

    /// Active reminders plus the badge count.
    ///
    /// The near-due alert is returned at most once per board.
    pub async fn load_home<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<HomeSummary> {
        self.load(View::Home).await?;
        let badge = near_due_count(&self.reminders, now);

        let alert = if badge.value() > 0 && !self.alerted {
            self.alerted = true;
            Some(NearDueAlert {
                count: badge.value(),
            })
        } else {
            None
        };
        Ok(HomeSummary { badge, alert })
    }

    pub async fn load_completed(&mut self) -> Result<&[Reminder]> {
        self.load(View::Completed).await?;
        Ok(&self.reminders)
    }

    /// Every non-deleted reminder, completed ones included
    pub async fn load_delete_picker(&mut self) -> Result<&[Reminder]> {
        self.load(View::DeletePicker).await?;
        Ok(&self.reminders)
    }

    /// Active reminders that are overdue or due soon
    pub async fn load_notifications<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
    ) -> Result<&[Reminder]> {
        self.load(View::Notifications {
            now: now.fixed_offset(),
        })
        .await?;
        Ok(&self.reminders)
    }

    /// Insert an empty reminder at the top of the list
    pub async fn create_blank(&mut self, owner: &str) -> Result<ReminderId> {
        if owner.trim().is_empty() {
            return Err(Error::NotSignedIn);
        }
        let created = self
            .store
            .insert(&NewReminder::blank(owner))
            .await
            .inspect_err(|error| tracing::error!("Failed to create reminder: {error}"))?;

        let id = created.id;
        self.reminders.insert(0, created);
        self.newly_added = Some(id);
        tracing::debug!(%id, "Created blank reminder");
        Ok(id)
    }

    /// Set the title inline, cut to the title length limit
    pub async fn rename(&mut self, id: &ReminderId, title: &str) -> Result<()> {
        let title = truncate_chars(title, TITLE_MAX_CHARS);
        self.mutate(id, &ReminderPatch::title(title), "update reminder")
            .await?;
        if self.newly_added == Some(*id) {
            self.newly_added = None;
        }
        Ok(())
    }

    pub async fn complete(&mut self, id: &ReminderId) -> Result<()> {
        self.mutate(id, &ReminderPatch::completed(true), "complete reminder")
            .await
    }

    pub async fn reopen(&mut self, id: &ReminderId) -> Result<()> {
        self.mutate(id, &ReminderPatch::completed(false), "reopen reminder")
            .await
    }

    pub async fn soft_delete(&mut self, id: &ReminderId) -> Result<()> {
        self.mutate(id, &ReminderPatch::deleted(), "delete reminder")
            .await
    }

    /// Soft-delete every selected reminder in one request
    pub async fn soft_delete_many(&mut self, ids: &[ReminderId]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        self.store
            .update_many(ids, &ReminderPatch::deleted())
            .await
            .inspect_err(|error| tracing::error!("Failed to delete reminders: {error}"))?;
        tracing::info!(count = ids.len(), "Deleted reminders");
        self.refresh().await
    }

    /// Current values of one reminder for the edit form
    pub async fn load_form(&self, id: &ReminderId) -> Result<ReminderForm> {
        let reminder = self
            .store
            .list(&ReminderFilter::by_id(*id))
            .await
            .inspect_err(|error| tracing::error!("Failed to load reminder: {error}"))?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        Ok(ReminderForm {
            title: reminder.title_or_empty().to_string(),
            description: reminder.description,
            due_date_time: reminder.due_date_time,
        })
    }

    /// Validate the edit form and write it back.
    ///
    /// The list is not refreshed; the screen the form returns to reloads.
    pub async fn save_form(
        &self,
        id: &ReminderId,
        owner: &str,
        form: &ReminderForm,
    ) -> Result<()> {
        if owner.trim().is_empty() {
            return Err(Error::NotSignedIn);
        }
        let patch = form.validate()?;
        self.store
            .update(id, &patch)
            .await
            .inspect_err(|error| tracing::error!("Failed to save reminder: {error}"))?;
        Ok(())
    }

    /// Query the current view again
    pub async fn refresh(&mut self) -> Result<()> {
        self.load(self.view).await
    }

    async fn mutate(&mut self, id: &ReminderId, patch: &ReminderPatch, action: &str) -> Result<()> {
        self.store
            .update(id, patch)
            .await
            .inspect_err(|error| tracing::error!("Failed to {action}: {error}"))?;
        self.refresh().await
    }

    async fn load(&mut self, view: View) -> Result<()> {
        let filter = match view {
            View::Home | View::Notifications { .. } => ReminderFilter::active(),
            View::Completed => ReminderFilter::completed(),
            View::DeletePicker => ReminderFilter::not_deleted(),
        };
        let mut reminders = self
            .store
            .list(&filter)
            .await
            .inspect_err(|error| tracing::error!("Failed to fetch reminders: {error}"))?;

        if let View::Notifications { now } = view {
            reminders.retain(|reminder| classify_reminder(reminder, &now).is_near_due());
        }
        self.view = view;
        self.reminders = reminders;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::DueStatus;
    use crate::store::MemoryStore;
    use crate::validation::{Field, ValidationError};
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    fn reminder(title: &str, due: Option<DateTime<chrono::Utc>>) -> Reminder {
        Reminder {
            id: ReminderId::new(),
            user_id: "user-1".to_string(),
            title: Some(title.to_string()),
            description: None,
            due_date_time: due,
            is_completed: false,
            is_deleted: false,
        }
    }

    fn titles(reminders: &[Reminder]) -> Vec<&str> {
        reminders.iter().map(Reminder::title_or_empty).collect()
    }

    #[tokio::test]
    async fn home_counts_near_due_and_orders_by_due_date() {
        let now = Utc::now();
        let store = MemoryStore::with_reminders(vec![
            reminder("later", Some(now + Duration::days(5))),
            reminder("undated", None),
            reminder("yesterday", Some(now - Duration::days(1))),
            reminder("today", Some(now)),
        ]);
        let mut board = ReminderBoard::new(store);

        let summary = board.load_home(&now).await.unwrap();
        assert_eq!(summary.badge.value(), 2);
        assert_eq!(summary.badge.label().as_deref(), Some("2"));
        assert_eq!(
            titles(board.reminders()),
            vec!["yesterday", "today", "later", "undated"]
        );
        assert_eq!(
            board
                .reminders()
                .iter()
                .map(|row| classify_reminder(row, &now))
                .collect::<Vec<_>>(),
            vec![
                DueStatus::Overdue,
                DueStatus::DueSoon,
                DueStatus::Normal,
                DueStatus::Normal
            ]
        );
    }

    #[tokio::test]
    async fn near_due_alert_fires_once() {
        let now = Utc::now();
        let store = MemoryStore::with_reminders(vec![reminder("today", Some(now))]);
        let mut board = ReminderBoard::new(store);

        let first = board.load_home(&now).await.unwrap();
        assert_eq!(first.alert, Some(NearDueAlert { count: 1 }));
        let second = board.load_home(&now).await.unwrap();
        assert_eq!(second.alert, None);
        assert_eq!(second.badge.value(), 1);
    }

    #[tokio::test]
    async fn no_alert_without_near_due_reminders() {
        let now = Utc::now();
        let store = MemoryStore::with_reminders(vec![reminder(
            "later",
            Some(now + Duration::days(10)),
        )]);
        let mut board = ReminderBoard::new(store);
        let summary = board.load_home(&now).await.unwrap();
        assert_eq!(summary.alert, None);
        assert_eq!(summary.badge.label(), None);
    }

    #[tokio::test]
    async fn completed_view_lists_only_completed() {
        let mut done = reminder("done", None);
        done.is_completed = true;
        let store = MemoryStore::with_reminders(vec![done, reminder("open", None)]);
        let mut board = ReminderBoard::new(store);
        let completed = board.load_completed().await.unwrap();
        assert_eq!(titles(completed), vec!["done"]);
    }

    #[tokio::test]
    async fn delete_picker_includes_completed_but_not_deleted() {
        let mut done = reminder("done", None);
        done.is_completed = true;
        let mut gone = reminder("gone", None);
        gone.is_deleted = true;
        let store = MemoryStore::with_reminders(vec![done, gone, reminder("open", None)]);
        let mut board = ReminderBoard::new(store);
        let mut listed = titles(board.load_delete_picker().await.unwrap());
        listed.sort_unstable();
        assert_eq!(listed, vec!["done", "open"]);
    }

    #[tokio::test]
    async fn notifications_keep_overdue_and_due_soon() {
        let now = Utc::now();
        let store = MemoryStore::with_reminders(vec![
            reminder("later", Some(now + Duration::days(5))),
            reminder("yesterday", Some(now - Duration::days(1))),
            reminder("undated", None),
            reminder("today", Some(now)),
        ]);
        let mut board = ReminderBoard::new(store);
        let listed = board.load_notifications(&now).await.unwrap();
        assert_eq!(titles(listed), vec!["yesterday", "today"]);
    }

    #[tokio::test]
    async fn create_blank_prepends_and_marks_new() {
        let store = MemoryStore::with_reminders(vec![reminder("existing", None)]);
        let mut board = ReminderBoard::new(store);
        board.load_home(&Utc::now()).await.unwrap();

        let id = board.create_blank("user-1").await.unwrap();
        assert_eq!(board.reminders()[0].id, id);
        assert_eq!(board.reminders().len(), 2);
        assert_eq!(board.newly_added(), Some(id));

        board.rename(&id, "Buy milk").await.unwrap();
        assert_eq!(board.newly_added(), None);
    }

    #[tokio::test]
    async fn create_blank_requires_owner() {
        let mut board = ReminderBoard::new(MemoryStore::new());
        let error = board.create_blank(" ").await.unwrap_err();
        assert!(matches!(error, Error::NotSignedIn));
    }

    #[tokio::test]
    async fn rename_truncates_title() {
        let target = reminder("old", None);
        let id = target.id;
        let store = MemoryStore::with_reminders(vec![target]);
        let mut board = ReminderBoard::new(store.clone());
        board.load_home(&Utc::now()).await.unwrap();

        board
            .rename(&id, "a title that is far longer than the limit")
            .await
            .unwrap();
        let title = board.reminders()[0].title_or_empty();
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
        assert_eq!(title, "a title that is far longe");
    }

    #[tokio::test]
    async fn complete_and_reopen_move_between_views() {
        let target = reminder("task", None);
        let id = target.id;
        let store = MemoryStore::with_reminders(vec![target]);
        let mut board = ReminderBoard::new(store);
        board.load_home(&Utc::now()).await.unwrap();

        board.complete(&id).await.unwrap();
        assert!(board.reminders().is_empty());

        board.load_completed().await.unwrap();
        assert_eq!(board.reminders().len(), 1);
        board.reopen(&id).await.unwrap();
        assert!(board.reminders().is_empty());
    }

    #[tokio::test]
    async fn failed_mutation_leaves_list_untouched() {
        let target = reminder("task", None);
        let id = target.id;
        let store = MemoryStore::with_reminders(vec![target]);
        let mut board = ReminderBoard::new(store.clone());
        board.load_home(&Utc::now()).await.unwrap();
        let before = board.reminders().to_vec();

        store.fail_next("connection reset").await;
        assert!(board.soft_delete(&id).await.is_err());
        assert_eq!(board.reminders(), before.as_slice());
        assert!(!store.all_reminders().await[0].is_deleted);
    }

    #[tokio::test]
    async fn soft_delete_many_with_empty_selection_is_noop() {
        let store = MemoryStore::with_reminders(vec![reminder("task", None)]);
        let mut board = ReminderBoard::new(store.clone());
        board.soft_delete_many(&[]).await.unwrap();
        assert_eq!(store.call_count().await, 0);
    }

    #[tokio::test]
    async fn soft_delete_many_hides_selected_rows() {
        let a = reminder("a", None);
        let b = reminder("b", None);
        let ids = [a.id];
        let store = MemoryStore::with_reminders(vec![a, b]);
        let mut board = ReminderBoard::new(store.clone());
        board.load_delete_picker().await.unwrap();

        board.soft_delete_many(&ids).await.unwrap();
        assert_eq!(titles(board.reminders()), vec!["b"]);
        assert_eq!(store.all_reminders().await.len(), 2);
    }

    #[tokio::test]
    async fn form_round_trip_updates_fields() {
        let target = reminder("draft", None);
        let id = target.id;
        let store = MemoryStore::with_reminders(vec![target]);
        let board = ReminderBoard::new(store.clone());

        let mut form = board.load_form(&id).await.unwrap();
        assert_eq!(form.title, "draft");
        form.title = "Dentist".to_string();
        form.description = Some("Bring x-rays".to_string());
        board.save_form(&id, "user-1", &form).await.unwrap();

        let saved = &store.all_reminders().await[0];
        assert_eq!(saved.title.as_deref(), Some("Dentist"));
        assert_eq!(saved.description.as_deref(), Some("Bring x-rays"));
    }

    #[tokio::test]
    async fn save_form_rejects_blank_title() {
        let target = reminder("draft", None);
        let id = target.id;
        let store = MemoryStore::with_reminders(vec![target]);
        let board = ReminderBoard::new(store.clone());

        let form = ReminderForm::default();
        let error = board.save_form(&id, "user-1", &form).await.unwrap_err();
        assert!(matches!(
            error,
            Error::Validation(ValidationError {
                field: Field::Title,
                ..
            })
        ));
        assert_eq!(store.call_count().await, 0);
    }

    #[tokio::test]
    async fn load_form_reports_missing_reminder() {
        let board = ReminderBoard::new(MemoryStore::new());
        let error = board.load_form(&ReminderId::new()).await.unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
    }
}
