use std::fmt;
use std::io::{self, IsTerminal};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use crossterm::style::{Color, Stylize};
use remindr_core::board::{rows, ReminderBoard, ReminderRow};
use remindr_core::config::ClientConfig;
use remindr_core::models::{Locale, Reminder, ReminderId, ThemeMode};
use remindr_core::notice::{Notice, Operation};
use remindr_core::session::{SessionContext, SessionSnapshot};
use remindr_core::status::{hex_to_rgb, BadgeCount, DueStatus, Palette};
use remindr_core::store::{PostgrestClient, PostgrestReminderStore};

use crate::auth::SupabaseAuthService;
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

const SHORT_ID_CHARS: usize = 13;

pub type CliSession = SessionContext<SupabaseAuthService, PostgrestClient>;
pub type CliBoard = ReminderBoard<PostgrestReminderStore>;

/// Resolved profile for one command invocation
pub struct ProfileContext {
    pub name: String,
    pub profile: CliProfile,
}

impl ProfileContext {
    pub fn load(explicit: Option<&str>) -> Result<Self, CliError> {
        let config = CliProfilesConfig::load().map_err(CliError::Config)?;
        let name = config.resolve_profile_name(explicit);
        let profile = config.profile(&name).cloned().unwrap_or_default();
        Ok(Self { name, profile })
    }

    pub fn locale(&self) -> Locale {
        self.profile.locale()
    }

    pub fn theme(&self) -> ThemeMode {
        self.profile.theme()
    }

    pub fn client_config(&self) -> Result<ClientConfig, CliError> {
        self.profile
            .client_config()
            .map_err(CliError::Config)?
            .ok_or_else(|| CliError::NotConfigured(self.name.clone()))
    }

    pub fn session_context(&self) -> Result<CliSession, CliError> {
        let config = self.client_config()?;
        let auth = SupabaseAuthService::new(&self.name, &config)
            .map_err(|error| CliError::Auth(error.to_string()))?;
        let profiles =
            PostgrestClient::new(&config).map_err(|error| CliError::Config(error.to_string()))?;
        Ok(SessionContext::new(auth, profiles))
    }

    /// Restore the stored session and open a board on the user's reminders
    pub async fn open_board(&self) -> Result<(CliBoard, SessionSnapshot), CliError> {
        let session = self.session_context()?;
        let snapshot = session
            .restore()
            .await
            .map_err(|error| self.notice(Operation::Load, &error))?;
        let auth_session = session.session().await.ok_or(CliError::NotSignedIn)?;

        let client = PostgrestClient::new(&self.client_config()?)
            .map_err(|error| CliError::Config(error.to_string()))?;
        let store = PostgrestReminderStore::new(client, auth_session.access_token);
        Ok((ReminderBoard::new(store), snapshot))
    }

    /// Turn a failed core call into the localized message for the user
    pub fn notice(&self, operation: Operation, error: &remindr_core::Error) -> CliError {
        notice_error(operation, error, self.locale())
    }
}

pub fn notice_error(operation: Operation, error: &remindr_core::Error, locale: Locale) -> CliError {
    tracing::debug!("{operation:?} failed: {error}");
    CliError::Notice(Notice::for_failure(operation, error).text(locale))
}

pub fn normalize_reminder_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyReminderId)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Find a reminder by full id or unique id prefix
pub fn resolve_reminder_id(query: &str, reminders: &[Reminder]) -> Result<ReminderId, CliError> {
    let query = normalize_reminder_identifier(query)?;
    if let Ok(id) = query.parse::<ReminderId>() {
        if reminders.iter().any(|reminder| reminder.id == id) {
            return Ok(id);
        }
    }

    let prefix = query.to_ascii_lowercase();
    let matching = reminders
        .iter()
        .filter(|reminder| reminder.id.to_string().starts_with(&prefix))
        .map(|reminder| reminder.id)
        .collect::<Vec<_>>();

    match matching.as_slice() {
        [] => Err(CliError::ReminderNotFound(query)),
        [id] => Ok(*id),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|id| short_id(*id))
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::AmbiguousReminderId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn short_id(id: ReminderId) -> String {
    id.to_string().chars().take(SHORT_ID_CHARS).collect()
}

/// Parse a due date typed on the command line, in local time
pub fn parse_due_date(value: &str) -> Result<DateTime<Utc>, CliError> {
    parse_due_date_in(value, &Local)
}

pub fn parse_due_date_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Result<DateTime<Utc>, CliError> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map_err(|_| CliError::InvalidDueDate(value.to_string()))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| CliError::InvalidDueDate(value.to_string()))
}

/// Rows classified against the same `now` the view was loaded with
pub fn reminder_rows<Tz>(
    reminders: &[Reminder],
    now: &DateTime<Tz>,
    locale: Locale,
) -> Vec<ReminderRow>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    rows(reminders, now, locale)
}

/// Whether stdout gets ANSI colors
pub fn use_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// One line per row: short id, checkbox, title, due date
pub fn format_reminder_lines(rows: &[ReminderRow], theme: ThemeMode, color: bool) -> Vec<String> {
    let palette = Palette::for_theme(theme);
    rows.iter()
        .map(|row| {
            let checkbox = if row.status == DueStatus::Completed {
                "[x]"
            } else {
                "[ ]"
            };
            let title = if row.title.is_empty() {
                "(untitled)"
            } else {
                row.title.as_str()
            };
            let line = format!("{:<13}  {checkbox} {title:<25}", short_id(row.id));
            let line = match &row.due_label {
                Some(label) => format!("{line}  {}", paint(label, &palette, row.status, color)),
                None => line.trim_end().to_string(),
            };
            match &row.description {
                Some(description) if !description.is_empty() => {
                    format!("{line}\n{:<15}  {description}", "")
                }
                _ => line,
            }
        })
        .collect()
}

fn paint(text: &str, palette: &Palette, status: DueStatus, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    let style = palette.row_style(status);
    let Some((r, g, b)) = hex_to_rgb(style.text) else {
        return text.to_string();
    };
    let painted = text.with(Color::Rgb { r, g, b });
    match style.background_over(palette.background) {
        Some((r, g, b)) => painted.on(Color::Rgb { r, g, b }).to_string(),
        None => painted.to_string(),
    }
}

/// Bell line shown above the home list
pub fn format_badge(badge: BadgeCount, theme: ThemeMode, color: bool) -> String {
    let Some(label) = badge.label() else {
        return "🔔".to_string();
    };
    let label = format!("({label})");
    if !color {
        return format!("🔔 {label}");
    }
    let palette = Palette::for_theme(theme);
    match hex_to_rgb(palette.badge) {
        Some((r, g, b)) => format!("🔔 {}", label.with(Color::Rgb { r, g, b }).bold()),
        None => format!("🔔 {label}"),
    }
}

pub fn print_rows(rows: &[ReminderRow], as_json: bool, theme: ThemeMode) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(rows)?);
    } else {
        for line in format_reminder_lines(rows, theme, use_color()) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn print_notice(notice: &Notice, locale: Locale) {
    if notice.is_error() {
        eprintln!("{}: {}", notice.title(locale), notice.text(locale));
    } else {
        println!("{}: {}", notice.title(locale), notice.text(locale));
    }
}
