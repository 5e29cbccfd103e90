use remindr_core::notice::{Notice, Operation};
use remindr_core::validation::AccountUpdateForm;

use crate::cli::ProfileCommands;
use crate::commands::common::{print_notice, ProfileContext};
use crate::error::CliError;

pub async fn run_profile(command: ProfileCommands, context: &ProfileContext) -> Result<(), CliError> {
    let session = context.session_context()?;
    let snapshot = session
        .restore()
        .await
        .map_err(|error| context.notice(Operation::Load, &error))?;
    let user = snapshot.user.clone().ok_or(CliError::NotSignedIn)?;

    match command {
        ProfileCommands::Show => {
            let username = snapshot
                .profile
                .as_ref()
                .map_or("(no profile)", |profile| profile.display_name());
            println!("username: {username}");
            println!("email:    {}", user.email.as_deref().unwrap_or("(no email)"));
            println!("user id:  {}", user.id);
            Ok(())
        }
        ProfileCommands::Update {
            username,
            password,
            confirm_password,
        } => {
            let form = AccountUpdateForm {
                username,
                password,
                confirm_password,
            };
            let updated = session
                .update_account(&form)
                .await
                .map_err(|error| context.notice(Operation::UpdateAccount, &error))?;
            print_notice(&Notice::AccountUpdated, context.locale());
            if let Some(profile) = updated.profile {
                println!("username: {}", profile.display_name());
            }
            Ok(())
        }
    }
}
