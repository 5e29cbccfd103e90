use remindr_core::auth::SignUpOutcome;
use remindr_core::notice::{Notice, Operation};
use remindr_core::validation::{LoginForm, RegisterForm};

use crate::auth::clear_stored_session;
use crate::cli::AuthCommands;
use crate::commands::common::{print_notice, ProfileContext};
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, context: &ProfileContext) -> Result<(), CliError> {
    match command {
        AuthCommands::Login { email, password } => run_login(email, password, context).await,
        AuthCommands::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                username,
                email,
                password,
                confirm_password,
            };
            run_register(&form, context).await
        }
        AuthCommands::Status => run_status(context).await,
        AuthCommands::Logout => run_logout(context).await,
    }
}

async fn run_login(email: String, password: String, context: &ProfileContext) -> Result<(), CliError> {
    let session = context.session_context()?;
    let snapshot = session
        .sign_in(&LoginForm { email, password })
        .await
        .map_err(|error| context.notice(Operation::SignIn, &error))?;

    let email_label = snapshot
        .user
        .as_ref()
        .and_then(|user| user.email.as_deref())
        .unwrap_or("(no email)");
    let username = snapshot
        .profile
        .as_ref()
        .map_or("", |profile| profile.display_name());
    println!(
        "Signed in profile '{}' as {email_label} ({username})",
        context.name
    );
    Ok(())
}

async fn run_register(form: &RegisterForm, context: &ProfileContext) -> Result<(), CliError> {
    let session = context.session_context()?;
    let outcome = session
        .sign_up(form)
        .await
        .map_err(|error| context.notice(Operation::SignUp, &error))?;

    match outcome {
        SignUpOutcome::SignedIn(session) => {
            let email_label = session.user.email.as_deref().unwrap_or("(no email)");
            println!(
                "Registered and signed in profile '{}' as {email_label}",
                context.name
            );
        }
        SignUpOutcome::ConfirmationRequired(_) => {
            print_notice(&Notice::SignUpConfirmationSent, context.locale());
        }
    }
    Ok(())
}

async fn run_status(context: &ProfileContext) -> Result<(), CliError> {
    let session = context.session_context()?;
    let snapshot = session
        .restore()
        .await
        .map_err(|error| CliError::Auth(error.to_string()))?;

    match (&snapshot.user, session.session().await) {
        (Some(user), Some(auth_session)) => {
            let email_label = user.email.as_deref().unwrap_or("(no email)");
            let username = snapshot
                .profile
                .as_ref()
                .map_or("(no profile)", |profile| profile.display_name());
            println!(
                "Profile '{}' is signed in as {email_label} [{username}] (expires_at={})",
                context.name, auth_session.expires_at
            );
        }
        _ => println!("Profile '{}' is not signed in.", context.name),
    }
    Ok(())
}

async fn run_logout(context: &ProfileContext) -> Result<(), CliError> {
    match context.session_context() {
        Ok(session) => {
            if session.restore().await.is_ok() {
                if let Err(error) = session.logout().await {
                    tracing::warn!("Remote sign out failed for '{}': {error}", context.name);
                }
            }
        }
        // No client config: nothing to revoke remotely, only the keychain entry
        Err(_) => clear_stored_session(&context.name)
            .map_err(|error| CliError::Auth(error.to_string()))?,
    }

    println!("Signed out profile '{}'", context.name);
    Ok(())
}
