//! Client configuration.
//!
//! A client needs the Supabase project URL and its public anon key. Both are
//! safe to ship; secret credentials never belong here.

use serde::{Deserialize, Serialize};

use crate::util::{is_http_url, normalize_text_option};

pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Validated Supabase endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl ClientConfig {
    /// Build a config from raw values, trimming and validating both.
    pub fn new(
        supabase_url: impl Into<String>,
        supabase_anon_key: impl Into<String>,
    ) -> Result<Self, String> {
        let supabase_url = normalize_text_option(Some(supabase_url.into()))
            .ok_or_else(|| "supabase_url is required".to_string())?;
        if !is_http_url(&supabase_url) {
            return Err("supabase_url must include http:// or https://".to_string());
        }
        let supabase_anon_key = normalize_text_option(Some(supabase_anon_key.into()))
            .ok_or_else(|| "supabase_anon_key is required".to_string())?;

        Ok(Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key,
        })
    }

    /// Resolve from the first source that provides both values.
    ///
    /// Returns `Ok(None)` when no source is configured; a source with only
    /// one of the two values is an error.
    pub fn resolve(
        sources: impl IntoIterator<Item = (Option<String>, Option<String>)>,
    ) -> Result<Option<Self>, String> {
        for (url, anon_key) in sources {
            match (normalize_text_option(url), normalize_text_option(anon_key)) {
                (None, None) => {}
                (Some(url), Some(anon_key)) => return Self::new(url, anon_key).map(Some),
                (Some(_), None) => {
                    return Err("supabase_anon_key is missing for the configured URL".to_string())
                }
                (None, Some(_)) => {
                    return Err("supabase_url is missing for the configured anon key".to_string())
                }
            }
        }
        Ok(None)
    }

    /// Values from `SUPABASE_URL` / `SUPABASE_ANON_KEY`
    pub fn env_source() -> (Option<String>, Option<String>) {
        (
            std::env::var(SUPABASE_URL_ENV).ok(),
            std::env::var(SUPABASE_ANON_KEY_ENV).ok(),
        )
    }

    /// PostgREST base URL (`<project>/rest/v1`)
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slash() {
        let config = ClientConfig::new(" https://demo.supabase.co/ ", " anon ").unwrap();
        assert_eq!(config.supabase_url, "https://demo.supabase.co");
        assert_eq!(config.supabase_anon_key, "anon");
        assert_eq!(config.rest_url(), "https://demo.supabase.co/rest/v1");
    }

    #[test]
    fn new_rejects_missing_scheme() {
        let error = ClientConfig::new("demo.supabase.co", "anon").unwrap_err();
        assert!(error.contains("http://"));
    }

    #[test]
    fn resolve_uses_first_complete_source() {
        let resolved = ClientConfig::resolve([
            (None, None),
            (
                Some("https://first.supabase.co".to_string()),
                Some("key-1".to_string()),
            ),
            (
                Some("https://second.supabase.co".to_string()),
                Some("key-2".to_string()),
            ),
        ])
        .unwrap()
        .unwrap();
        assert_eq!(resolved.supabase_url, "https://first.supabase.co");
    }

    #[test]
    fn resolve_rejects_half_configured_source() {
        let error = ClientConfig::resolve([(Some("https://x.supabase.co".to_string()), None)])
            .unwrap_err();
        assert!(error.contains("anon_key"));
    }

    #[test]
    fn resolve_returns_none_without_sources() {
        assert!(ClientConfig::resolve([(None, Some("  ".to_string()))])
            .unwrap()
            .is_none());
    }

    #[test]
    fn config_rejects_unknown_fields() {
        let payload = r#"{"supabase_url": "https://x.supabase.co", "supabase_anon_key": "k", "extra": 1}"#;
        let error = serde_json::from_str::<ClientConfig>(payload).unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }
}
