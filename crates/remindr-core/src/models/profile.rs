//! Profile model

use serde::{Deserialize, Serialize};

/// Row of the `profile` table. `id` equals the auth user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl Profile {
    #[must_use]
    pub fn new(id: impl Into<String>, username: Option<String>) -> Self {
        Self {
            id: id.into(),
            username,
        }
    }

    /// Username for greetings, empty when unset
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }
}
