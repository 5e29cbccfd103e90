use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    /// Localized message already shown to the user
    #[error("{0}")]
    Notice(String),
    #[error("Reminder ID cannot be empty")]
    EmptyReminderId,
    #[error("Reminder not found for id/prefix: {0}")]
    ReminderNotFound(String),
    #[error("{0}")]
    AmbiguousReminderId(String),
    #[error("Nothing to update: pass --title, --description, --due or a --clear-* flag")]
    EmptyEdit,
    #[error("Invalid due date '{0}': expected YYYY-MM-DD HH:MM, YYYY-MM-DD or RFC 3339")]
    InvalidDueDate(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error(
        "Profile '{0}' has no Supabase configuration. Run `remindr config init` or set SUPABASE_URL and SUPABASE_ANON_KEY."
    )]
    NotConfigured(String),
    #[error("Not signed in. Run `remindr auth login --email <email> --password <password>`.")]
    NotSignedIn,
}
