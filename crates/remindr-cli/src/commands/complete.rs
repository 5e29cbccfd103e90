use chrono::Local;
use remindr_core::notice::Operation;

use crate::commands::common::{resolve_reminder_id, ProfileContext};
use crate::error::CliError;

pub async fn run_done(id: &str, context: &ProfileContext) -> Result<(), CliError> {
    let (mut board, _) = context.open_board().await?;
    board
        .load_home(&Local::now())
        .await
        .map_err(|error| context.notice(Operation::Load, &error))?;
    let id = resolve_reminder_id(id, board.reminders())?;

    board
        .complete(&id)
        .await
        .map_err(|error| context.notice(Operation::Save, &error))?;
    println!("{id}");
    Ok(())
}

pub async fn run_undo(id: &str, context: &ProfileContext) -> Result<(), CliError> {
    let (mut board, _) = context.open_board().await?;
    let reminders = board
        .load_completed()
        .await
        .map_err(|error| context.notice(Operation::Load, &error))?;
    let id = resolve_reminder_id(id, reminders)?;

    board
        .reopen(&id)
        .await
        .map_err(|error| context.notice(Operation::Save, &error))?;
    println!("{id}");
    Ok(())
}
