//! CLI Supabase auth with secure keychain session persistence.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(not(test))]
use keyring::Entry;

use remindr_core::auth::{
    AuthProvider, AuthResult, SessionPersistence, SignUpOutcome, SupabaseAuthClient,
};
pub use remindr_core::auth::{AuthError, AuthSession};
use remindr_core::config::ClientConfig;

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "remindr-cli";

/// Keychain entry holding one profile's serialized session
#[derive(Clone)]
pub struct SessionStore {
    username: String,
}

impl SessionStore {
    pub fn new(profile_name: &str) -> Self {
        Self {
            username: format!("supabase_session:{profile_name}"),
        }
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self) -> AuthResult<Entry> {
        Entry::new(KEYRING_SERVICE_NAME, &self.username)
            .map_err(|error| AuthError::SecureStorage(error.to_string()))
    }
}

impl SessionPersistence for SessionStore {
    #[cfg(not(test))]
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let entry = self.entry()?;
        match entry.get_password() {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(AuthError::SecureStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let guard = Self::test_store()
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        guard
            .get(&self.username)
            .map(|raw| serde_json::from_str(raw))
            .transpose()
            .map_err(AuthError::from)
    }

    #[cfg(not(test))]
    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let raw = serde_json::to_string(session)?;
        self.entry()?
            .set_password(&raw)
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        tracing::debug!(entry = %self.username, "Stored session in keychain");
        Ok(())
    }

    #[cfg(test)]
    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let raw = serde_json::to_string(session)?;
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        guard.insert(self.username.clone(), raw);
        Ok(())
    }

    #[cfg(not(test))]
    fn clear_session(&self) -> AuthResult<()> {
        let entry = self.entry()?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(AuthError::SecureStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn clear_session(&self) -> AuthResult<()> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        guard.remove(&self.username);
        Ok(())
    }
}

/// Supabase auth bound to one CLI profile's keychain entry
#[derive(Clone)]
pub struct SupabaseAuthService {
    inner: SupabaseAuthClient<SessionStore>,
}

impl SupabaseAuthService {
    pub fn new(profile_name: &str, config: &ClientConfig) -> AuthResult<Self> {
        Ok(Self {
            inner: SupabaseAuthClient::new(
                &config.supabase_url,
                config.supabase_anon_key.clone(),
                SessionStore::new(profile_name),
            )?,
        })
    }
}

impl AuthProvider for SupabaseAuthService {
    async fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        self.inner.restore_session().await
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        self.inner.sign_in(email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUpOutcome> {
        self.inner.sign_up(email, password).await
    }

    async fn update_password(&self, session: &AuthSession, password: &str) -> AuthResult<()> {
        self.inner.update_password(session, password).await
    }

    async fn sign_out(&self, session: &AuthSession) -> AuthResult<()> {
        self.inner.sign_out(session).await
    }
}

pub fn clear_stored_session(profile_name: &str) -> AuthResult<()> {
    SessionStore::new(profile_name).clear_session()
}

#[cfg(test)]
mod tests {
    use remindr_core::auth::AuthUser;

    use super::*;

    fn session(user_id: &str) -> AuthSession {
        AuthSession {
            access_token: "secret-access-token".to_string(),
            refresh_token: "secret-refresh-token".to_string(),
            expires_at: i64::MAX,
            user: AuthUser {
                id: user_id.to_string(),
                email: Some("a@b.co".to_string()),
            },
        }
    }

    #[test]
    fn stored_session_roundtrip_and_clear() {
        let store = SessionStore::new("auth-roundtrip");
        store.save_session(&session("user-1")).unwrap();

        let loaded = store.load_session().unwrap().unwrap();
        assert_eq!(loaded.user.id, "user-1");

        clear_stored_session("auth-roundtrip").unwrap();
        assert!(store.load_session().unwrap().is_none());
    }

    #[test]
    fn profiles_use_separate_entries() {
        SessionStore::new("auth-work")
            .save_session(&session("worker"))
            .unwrap();
        assert!(SessionStore::new("auth-home").load_session().unwrap().is_none());
        clear_stored_session("auth-work").unwrap();
    }

    #[tokio::test]
    async fn restore_without_stored_session_is_signed_out() {
        let config = ClientConfig::new("http://127.0.0.1:9", "anon").unwrap();
        let service = SupabaseAuthService::new("auth-empty", &config).unwrap();
        assert!(service.restore_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_clears_keychain_when_server_is_unreachable() {
        let store = SessionStore::new("auth-offline");
        store.save_session(&session("user-offline")).unwrap();
        let config = ClientConfig::new("http://127.0.0.1:9", "anon").unwrap();
        let service = SupabaseAuthService::new("auth-offline", &config).unwrap();

        let restored = service.restore_session().await.unwrap().unwrap();
        assert!(service.sign_out(&restored).await.is_err());
        assert!(store.load_session().unwrap().is_none());
        assert!(service.restore_session().await.unwrap().is_none());
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let rendered = format!("{:?}", session("user"));
        assert!(!rendered.contains("secret-access-token"));
        assert!(!rendered.contains("secret-refresh-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
