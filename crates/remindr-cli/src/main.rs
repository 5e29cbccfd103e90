//! Remindr CLI - Reminders with due-date highlighting from the command line
//!
//! Lists, creates and edits reminders stored in a Supabase project.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;

#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::auth_cmd::run_auth;
use crate::commands::common::ProfileContext;
use crate::commands::complete::{run_done, run_undo};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::{run_edit, run_rename, EditArgs};
use crate::commands::list::{run_completed, run_list, run_notifications};
use crate::commands::profile::run_profile;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("remindr=info,remindr_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let global_profile = cli.profile.as_deref();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Config { command } => run_config(command, global_profile),
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
        command => {
            let context = ProfileContext::load(global_profile)?;
            run_with_profile(command, &context).await
        }
    }
}

async fn run_with_profile(command: Commands, context: &ProfileContext) -> Result<(), CliError> {
    match command {
        Commands::List { json } => run_list(json, context).await,
        Commands::Completed { json } => run_completed(json, context).await,
        Commands::Notifications { json } => run_notifications(json, context).await,
        Commands::Add { title } => run_add(&title, context).await,
        Commands::Rename { id, title } => run_rename(&id, &title, context).await,
        Commands::Edit {
            id,
            title,
            description,
            due,
            clear_description,
            clear_due,
        } => {
            let args = EditArgs {
                title,
                description,
                due,
                clear_description,
                clear_due,
            };
            run_edit(&id, args, context).await
        }
        Commands::Done { id } => run_done(&id, context).await,
        Commands::Undo { id } => run_undo(&id, context).await,
        Commands::Delete { ids } => run_delete(&ids, context).await,
        Commands::Auth { command } => run_auth(command, context).await,
        Commands::Profile { command } => run_profile(command, context).await,
        Commands::Config { command } => run_config(command, Some(&context.name)),
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
    }
}
