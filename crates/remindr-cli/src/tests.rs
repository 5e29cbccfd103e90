use chrono::{Duration, FixedOffset, TimeZone, Utc};
use clap::Parser;
use pretty_assertions::assert_eq;
use remindr_core::models::{Locale, Reminder, ReminderId, ThemeMode};
use remindr_core::notice::Operation;
use remindr_core::status::{BadgeCount, DueStatus};
use remindr_core::store::StoreError;

use crate::cli::{Cli, Commands, CompletionShell, ConfigCommands, LocaleArg, ThemeArg};
use crate::commands::common::{
    format_badge, format_reminder_lines, normalize_reminder_identifier, notice_error,
    parse_due_date_in, reminder_rows, resolve_reminder_id, short_id,
};
use crate::commands::completions::{completion_script, run_completions};
use crate::commands::config::{apply_init_args, missing_fields, validate_profile, ConfigInitArgs};
use crate::commands::edit::EditArgs;
use crate::config_profiles::CliProfile;
use crate::error::CliError;

fn reminder(id: &str, title: &str) -> Reminder {
    Reminder {
        id: id.parse().unwrap(),
        user_id: "user-1".to_string(),
        title: Some(title.to_string()),
        description: None,
        due_date_time: None,
        is_completed: false,
        is_deleted: false,
    }
}

fn sample_reminders() -> Vec<Reminder> {
    vec![
        reminder("0b7f4c1e-8d52-4b6a-9a43-3f0c2f1f6f10", "Pay rent"),
        reminder("0b7f4c1e-1111-4b6a-9a43-3f0c2f1f6f11", "Call mom"),
        reminder("7c2e9a00-8d52-4b6a-9a43-3f0c2f1f6f12", "Dentist"),
    ]
}

#[test]
fn normalize_reminder_identifier_rejects_empty() {
    assert!(matches!(
        normalize_reminder_identifier("   "),
        Err(CliError::EmptyReminderId)
    ));
    assert_eq!(normalize_reminder_identifier(" 7c2e ").unwrap(), "7c2e");
}

#[test]
fn resolve_reminder_id_supports_exact_and_prefix_id() {
    let reminders = sample_reminders();
    let exact = resolve_reminder_id("7c2e9a00-8d52-4b6a-9a43-3f0c2f1f6f12", &reminders).unwrap();
    assert_eq!(exact, reminders[2].id);

    let prefix = resolve_reminder_id("7C2E", &reminders).unwrap();
    assert_eq!(prefix, reminders[2].id);
}

#[test]
fn resolve_reminder_id_rejects_ambiguous_prefix() {
    let error = resolve_reminder_id("0b7f4c1e", &sample_reminders()).unwrap_err();
    let CliError::AmbiguousReminderId(message) = error else {
        panic!("expected ambiguity error, got {error:?}");
    };
    assert!(message.contains("0b7f4c1e-8d52"));
    assert!(message.contains("0b7f4c1e-1111"));
}

#[test]
fn resolve_reminder_id_rejects_missing_reminder() {
    let error = resolve_reminder_id("ffff", &sample_reminders()).unwrap_err();
    assert!(matches!(error, CliError::ReminderNotFound(query) if query == "ffff"));
}

#[test]
fn short_id_keeps_first_segments() {
    let id: ReminderId = "0b7f4c1e-8d52-4b6a-9a43-3f0c2f1f6f10".parse().unwrap();
    assert_eq!(short_id(id), "0b7f4c1e-8d52");
}

#[test]
fn parse_due_date_accepts_local_and_rfc3339() {
    let bangkok = FixedOffset::east_opt(7 * 3600).unwrap();
    let expected = Utc.with_ymd_and_hms(2025, 3, 5, 7, 30, 0).unwrap();

    assert_eq!(parse_due_date_in("2025-03-05 14:30", &bangkok).unwrap(), expected);
    assert_eq!(parse_due_date_in("2025-03-05T14:30", &bangkok).unwrap(), expected);
    assert_eq!(
        parse_due_date_in("2025-03-05T07:30:00Z", &bangkok).unwrap(),
        expected
    );
    assert_eq!(
        parse_due_date_in("2025-03-05", &bangkok).unwrap(),
        Utc.with_ymd_and_hms(2025, 3, 4, 17, 0, 0).unwrap()
    );
}

#[test]
fn parse_due_date_rejects_garbage() {
    let error = parse_due_date_in("next tuesday", &Utc).unwrap_err();
    assert!(matches!(error, CliError::InvalidDueDate(value) if value == "next tuesday"));
}

#[test]
fn reminder_lines_show_title_and_due_label() {
    let now = Utc.with_ymd_and_hms(2025, 3, 5, 8, 0, 0).unwrap();
    let mut due_today = reminder("0b7f4c1e-8d52-4b6a-9a43-3f0c2f1f6f10", "Pay rent");
    due_today.due_date_time = Some(now + Duration::hours(2));
    due_today.description = Some("Transfer before noon".to_string());
    let untitled = Reminder {
        title: None,
        ..reminder("7c2e9a00-8d52-4b6a-9a43-3f0c2f1f6f12", "")
    };

    let rendered = format_reminder_lines(
        &reminder_rows(&[due_today, untitled], &now, Locale::En),
        ThemeMode::Light,
        false,
    );
    assert_eq!(rendered.len(), 2);
    assert!(rendered[0].starts_with("0b7f4c1e-8d52  [ ] Pay rent"));
    assert!(rendered[0].contains("05 March 2025 10:00"));
    assert!(rendered[0].contains('\n'));
    assert!(rendered[0].ends_with("Transfer before noon"));
    assert_eq!(rendered[1], "7c2e9a00-8d52  [ ] (untitled)");
}

#[test]
fn reminder_rows_classify_against_the_given_clock() {
    let bangkok = FixedOffset::east_opt(7 * 3600).unwrap();
    let mut due = reminder("0b7f4c1e-8d52-4b6a-9a43-3f0c2f1f6f10", "Pay rent");
    due.due_date_time = Some(
        bangkok
            .with_ymd_and_hms(2025, 3, 6, 0, 30, 0)
            .unwrap()
            .with_timezone(&Utc),
    );
    let reminders = [due];

    let before_midnight = bangkok.with_ymd_and_hms(2025, 3, 4, 23, 59, 0).unwrap();
    let after_midnight = bangkok.with_ymd_and_hms(2025, 3, 5, 0, 1, 0).unwrap();
    assert_eq!(
        reminder_rows(&reminders, &before_midnight, Locale::En)[0].status,
        DueStatus::Normal
    );
    assert_eq!(
        reminder_rows(&reminders, &after_midnight, Locale::En)[0].status,
        DueStatus::DueSoon
    );
}

#[test]
fn colored_lines_keep_due_label() {
    let now = Utc.with_ymd_and_hms(2025, 3, 5, 8, 0, 0).unwrap();
    let mut overdue = reminder("0b7f4c1e-8d52-4b6a-9a43-3f0c2f1f6f10", "Pay rent");
    overdue.due_date_time = Some(now - Duration::days(2));
    let rendered = format_reminder_lines(
        &reminder_rows(&[overdue], &now, Locale::En),
        ThemeMode::Light,
        true,
    );
    assert!(rendered[0].starts_with("0b7f4c1e-8d52  [ ] Pay rent"));
    assert!(rendered[0].contains("03 March 2025 08:00"));
}

#[test]
fn completed_rows_are_checked() {
    let now = Utc::now();
    let mut done = reminder("0b7f4c1e-8d52-4b6a-9a43-3f0c2f1f6f10", "Pay rent");
    done.is_completed = true;
    let rendered = format_reminder_lines(&reminder_rows(&[done], &now, Locale::En), ThemeMode::Dark, false);
    assert!(rendered[0].contains("[x] Pay rent"));
}

#[test]
fn badge_line_hides_zero_and_caps_large_counts() {
    assert_eq!(format_badge(BadgeCount::new(0), ThemeMode::Light, false), "🔔");
    assert_eq!(
        format_badge(BadgeCount::new(2), ThemeMode::Light, false),
        "🔔 (2)"
    );
    assert_eq!(
        format_badge(BadgeCount::new(150), ThemeMode::Light, false),
        "🔔 (99+)"
    );
}

#[test]
fn colored_badge_keeps_label() {
    let rendered = format_badge(BadgeCount::new(3), ThemeMode::Dark, true);
    assert!(rendered.starts_with("🔔 "));
    assert!(rendered.contains("(3)"));
}

#[test]
fn notice_error_is_localized() {
    let error = remindr_core::Error::Store(StoreError::Api("timeout".to_string()));
    let rendered = notice_error(Operation::Delete, &error, Locale::Th).to_string();
    assert_eq!(rendered, "ไม่สามารถลบรายการที่เลือกได้");
}

#[test]
fn apply_init_args_sets_display_preferences() {
    let mut profile = CliProfile::default();
    apply_init_args(
        &mut profile,
        ConfigInitArgs {
            supabase_url: Some(" https://project.supabase.co/ ".to_string()),
            supabase_anon_key: Some("anon-key".to_string()),
            theme: Some(ThemeArg::Dark),
            locale: Some(LocaleArg::Th),
            no_activate: false,
        },
    );
    assert_eq!(
        profile.supabase_url.as_deref(),
        Some("https://project.supabase.co")
    );
    assert_eq!(profile.theme(), ThemeMode::Dark);
    assert_eq!(profile.locale(), Locale::Th);
    assert!(missing_fields(&profile).is_empty());
    assert!(validate_profile(&profile).is_ok());
}

#[test]
fn validate_profile_requires_http_scheme() {
    let profile = CliProfile {
        supabase_url: Some("project.supabase.co".to_string()),
        ..CliProfile::default()
    };
    assert!(validate_profile(&profile).is_err());
    assert_eq!(missing_fields(&profile), vec!["supabase_anon_key"]);
}

#[test]
fn edit_args_without_changes_are_empty() {
    assert!(EditArgs::default().is_empty());
    assert!(!EditArgs {
        clear_due: true,
        ..EditArgs::default()
    }
    .is_empty());
}

#[test]
fn cli_parses_delete_with_multiple_ids_and_global_profile() {
    let cli = Cli::try_parse_from(["remindr", "delete", "0b7f", "7c2e", "--profile", "work"]).unwrap();
    assert_eq!(cli.profile.as_deref(), Some("work"));
    let Some(Commands::Delete { ids }) = cli.command else {
        panic!("expected delete command");
    };
    assert_eq!(ids, vec!["0b7f".to_string(), "7c2e".to_string()]);
}

#[test]
fn cli_rejects_conflicting_due_flags() {
    let result = Cli::try_parse_from([
        "remindr",
        "edit",
        "0b7f",
        "--due",
        "2025-03-05 14:30",
        "--clear-due",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_parses_config_init_preferences() {
    let cli = Cli::try_parse_from([
        "remindr", "config", "init", "--theme", "dark", "--locale", "th",
    ])
    .unwrap();
    let Some(Commands::Config {
        command: ConfigCommands::Init { theme, locale, .. },
    }) = cli.command
    else {
        panic!("expected config init command");
    };
    assert_eq!(theme, Some(ThemeArg::Dark));
    assert_eq!(locale, Some(LocaleArg::Th));
}

#[test]
fn completion_script_mentions_binary_name() {
    let script = String::from_utf8(completion_script(CompletionShell::Bash)).unwrap();
    assert!(script.contains("remindr"));
}

#[test]
fn run_completions_writes_bash_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("remindr.bash");
    run_completions(CompletionShell::Bash, Some(&path)).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("notifications"));
}
