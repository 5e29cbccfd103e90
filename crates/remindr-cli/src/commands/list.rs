use chrono::Local;
use remindr_core::notice::Operation;

use crate::commands::common::{
    format_badge, print_notice, print_rows, reminder_rows, use_color, ProfileContext,
};
use crate::error::CliError;

/// Home view: open reminders, the bell badge and the near-due alert
pub async fn run_list(as_json: bool, context: &ProfileContext) -> Result<(), CliError> {
    let (mut board, snapshot) = context.open_board().await?;
    let now = Local::now();
    let summary = board
        .load_home(&now)
        .await
        .map_err(|error| context.notice(Operation::Load, &error))?;
    let rows = reminder_rows(board.reminders(), &now, context.locale());

    if as_json {
        return print_rows(&rows, true, context.theme());
    }

    let greeting = snapshot
        .profile
        .as_ref()
        .map(|profile| profile.display_name().to_string())
        .filter(|name| !name.is_empty());
    let badge = format_badge(summary.badge, context.theme(), use_color());
    match greeting {
        Some(name) => println!("{name}  {badge}"),
        None => println!("{badge}"),
    }
    if let Some(alert) = summary.alert {
        print_notice(&alert.notice(), context.locale());
    }
    print_rows(&rows, false, context.theme())
}

pub async fn run_completed(as_json: bool, context: &ProfileContext) -> Result<(), CliError> {
    let (mut board, _) = context.open_board().await?;
    let reminders = board
        .load_completed()
        .await
        .map_err(|error| context.notice(Operation::Load, &error))?;
    print_rows(
        &reminder_rows(reminders, &Local::now(), context.locale()),
        as_json,
        context.theme(),
    )
}

pub async fn run_notifications(as_json: bool, context: &ProfileContext) -> Result<(), CliError> {
    let (mut board, _) = context.open_board().await?;
    let now = Local::now();
    let reminders = board
        .load_notifications(&now)
        .await
        .map_err(|error| context.notice(Operation::Load, &error))?;
    print_rows(
        &reminder_rows(reminders, &now, context.locale()),
        as_json,
        context.theme(),
    )
}
