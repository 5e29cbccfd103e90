use remindr_core::notice::Operation;

use crate::commands::common::{parse_due_date, resolve_reminder_id, ProfileContext};
use crate::error::CliError;

/// Field changes requested on the command line
#[derive(Debug, Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<String>,
    pub clear_description: bool,
    pub clear_due: bool,
}

impl EditArgs {
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due.is_none()
            && !self.clear_description
            && !self.clear_due
    }
}

pub async fn run_rename(
    id: &str,
    title_parts: &[String],
    context: &ProfileContext,
) -> Result<(), CliError> {
    let (mut board, _) = context.open_board().await?;
    let reminders = board
        .load_delete_picker()
        .await
        .map_err(|error| context.notice(Operation::Load, &error))?;
    let id = resolve_reminder_id(id, reminders)?;

    board
        .rename(&id, title_parts.join(" ").trim())
        .await
        .map_err(|error| context.notice(Operation::Save, &error))?;
    println!("{id}");
    Ok(())
}

/// Load the edit form, apply the changes and save it back
pub async fn run_edit(id: &str, args: EditArgs, context: &ProfileContext) -> Result<(), CliError> {
    if args.is_empty() {
        return Err(CliError::EmptyEdit);
    }
    let due = args.due.as_deref().map(parse_due_date).transpose()?;

    let (mut board, snapshot) = context.open_board().await?;
    let owner = snapshot.user_id().ok_or(CliError::NotSignedIn)?.to_string();
    let reminders = board
        .load_delete_picker()
        .await
        .map_err(|error| context.notice(Operation::Load, &error))?;
    let id = resolve_reminder_id(id, reminders)?;

    let mut form = board
        .load_form(&id)
        .await
        .map_err(|error| context.notice(Operation::Load, &error))?;
    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(description) = args.description {
        form.description = Some(description);
    }
    if args.clear_description {
        form.description = None;
    }
    if due.is_some() {
        form.due_date_time = due;
    }
    if args.clear_due {
        form.due_date_time = None;
    }

    board
        .save_form(&id, &owner, &form)
        .await
        .map_err(|error| context.notice(Operation::Save, &error))?;
    println!("{id}");
    Ok(())
}
