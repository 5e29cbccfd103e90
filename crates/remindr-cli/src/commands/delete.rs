use remindr_core::notice::Operation;

use crate::commands::common::{resolve_reminder_id, ProfileContext};
use crate::error::CliError;

/// Soft-delete every given reminder in one request
pub async fn run_delete(ids: &[String], context: &ProfileContext) -> Result<(), CliError> {
    let (mut board, _) = context.open_board().await?;
    let reminders = board
        .load_delete_picker()
        .await
        .map_err(|error| context.notice(Operation::Load, &error))?;
    let mut resolved = Vec::with_capacity(ids.len());
    for query in ids {
        let id = resolve_reminder_id(query, reminders)?;
        if !resolved.contains(&id) {
            resolved.push(id);
        }
    }

    board
        .soft_delete_many(&resolved)
        .await
        .map_err(|error| context.notice(Operation::Delete, &error))?;
    for id in resolved {
        println!("{id}");
    }
    Ok(())
}
