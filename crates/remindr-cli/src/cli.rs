use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use remindr_core::models::{Locale, ThemeMode};

#[derive(Parser)]
#[command(name = "remindr")]
#[command(about = "Keep track of reminders and what is due next")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// CLI profile name for Supabase configuration and session
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List open reminders with the notification badge
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List completed reminders
    Completed {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List open reminders that are overdue or due soon
    #[command(alias = "bell")]
    Notifications {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new reminder
    #[command(alias = "new")]
    Add {
        /// Optional title; a blank reminder is created when omitted
        title: Vec<String>,
    },
    /// Set the title of a reminder
    Rename {
        /// Reminder ID or unique ID prefix
        id: String,
        /// New title
        #[arg(required = true)]
        title: Vec<String>,
    },
    /// Edit title, description or due date of a reminder
    Edit {
        /// Reminder ID or unique ID prefix
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Due date in local time (YYYY-MM-DD HH:MM)
        #[arg(long, value_name = "WHEN")]
        due: Option<String>,
        /// Remove the description
        #[arg(long, conflicts_with = "description")]
        clear_description: bool,
        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
    },
    /// Mark a reminder as completed
    Done {
        /// Reminder ID or unique ID prefix
        id: String,
    },
    /// Move a completed reminder back to the open list
    Undo {
        /// Reminder ID or unique ID prefix
        id: String,
    },
    /// Delete one or more reminders
    #[command(alias = "rm")]
    Delete {
        /// Reminder IDs or unique ID prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Sign in, register or sign out
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Show or update the signed-in account
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for ThemeMode {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LocaleArg {
    En,
    Th,
}

impl From<LocaleArg> for Locale {
    fn from(value: LocaleArg) -> Self {
        match value {
            LocaleArg::En => Self::En,
            LocaleArg::Th => Self::Th,
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Supabase project URL
        #[arg(long, value_name = "URL")]
        supabase_url: Option<String>,
        /// Supabase anon/public key
        #[arg(long, value_name = "KEY")]
        supabase_anon_key: Option<String>,
        /// Row color theme
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
        /// Language for messages and dates
        #[arg(long, value_enum)]
        locale: Option<LocaleArg>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Print the resolved profile config
    Show,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in with email/password and store the session in the keychain
    Login {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Create an account and its profile
    Register {
        #[arg(long, value_name = "NAME")]
        username: String,
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
        #[arg(long, value_name = "PASSWORD")]
        confirm_password: String,
    },
    /// Show auth status for profile
    Status,
    /// Sign out and clear the stored session
    Logout,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the signed-in user's profile
    Show,
    /// Change username and/or password
    Update {
        #[arg(long, value_name = "NAME")]
        username: Option<String>,
        #[arg(long, value_name = "PASSWORD", requires = "confirm_password")]
        password: Option<String>,
        #[arg(long, value_name = "PASSWORD")]
        confirm_password: Option<String>,
    },
}
