use remindr_core::notice::Operation;

use crate::commands::common::ProfileContext;
use crate::error::CliError;

/// Create a blank reminder and, when given, set its title
pub async fn run_add(title_parts: &[String], context: &ProfileContext) -> Result<(), CliError> {
    let (mut board, snapshot) = context.open_board().await?;
    let owner = snapshot.user_id().ok_or(CliError::NotSignedIn)?.to_string();

    let id = board
        .create_blank(&owner)
        .await
        .map_err(|error| context.notice(Operation::Save, &error))?;

    let title = title_parts.join(" ");
    if !title.trim().is_empty() {
        board
            .rename(&id, title.trim())
            .await
            .map_err(|error| context.notice(Operation::Save, &error))?;
    }

    println!("{id}");
    Ok(())
}
