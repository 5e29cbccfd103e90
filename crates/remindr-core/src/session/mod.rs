//! Signed-in user state shared with every screen.
//!
//! [`SessionContext`] owns the auth session and publishes a
//! [`SessionSnapshot`] through a watch channel whenever the identity
//! changes. The profile row is looked up again on every change, keyed on the
//! user id. Consumers hold a [`SessionSubscription`]; dropping it
//! unsubscribes.

use tokio::sync::{watch, Mutex};

use crate::auth::{AuthProvider, AuthSession, AuthUser, SignUpOutcome};
use crate::error::{Error, Result};
use crate::models::Profile;
use crate::store::ProfileStore;
use crate::validation::{AccountUpdateForm, LoginForm, RegisterForm};

/// What consumers see of the current session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: Option<AuthUser>,
    pub profile: Option<Profile>,
    /// True until the first restore attempt finishes
    pub loading: bool,
}

impl SessionSnapshot {
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Id of the signed-in user
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }
}

/// Receiver side of the session change notifications
pub struct SessionSubscription {
    receiver: watch::Receiver<SessionSnapshot>,
}

impl SessionSubscription {
    /// Latest published snapshot
    #[must_use]
    pub fn current(&self) -> SessionSnapshot {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change. `None` once the context is gone.
    pub async fn changed(&mut self) -> Option<SessionSnapshot> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

pub struct SessionContext<A, P> {
    auth: A,
    profiles: P,
    session: Mutex<Option<AuthSession>>,
    state: watch::Sender<SessionSnapshot>,
}

impl<A: AuthProvider, P: ProfileStore> SessionContext<A, P> {
    pub fn new(auth: A, profiles: P) -> Self {
        let (state, _) = watch::channel(SessionSnapshot {
            loading: true,
            ..SessionSnapshot::default()
        });
        Self {
            auth,
            profiles,
            session: Mutex::new(None),
            state,
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            receiver: self.state.subscribe(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Number of live subscriptions
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.receiver_count()
    }

    /// Current auth session, tokens included
    pub async fn session(&self) -> Option<AuthSession> {
        self.session.lock().await.clone()
    }

    /// Load the persisted session and resolve its profile.
    pub async fn restore(&self) -> Result<SessionSnapshot> {
        let restored = match self.auth.restore_session().await {
            Ok(session) => session,
            Err(error) => {
                tracing::error!("Failed to restore session: {error}");
                self.publish(None, None);
                return Err(error.into());
            }
        };

        let profile = match &restored {
            Some(session) => self.lookup_profile_lenient(session).await,
            None => None,
        };
        let user = restored.as_ref().map(|session| session.user.clone());
        *self.session.lock().await = restored;
        Ok(self.publish(user, profile))
    }

    /// Sign in with email and password.
    ///
    /// Fails with [`Error::ProfileNotFound`] when the account has no profile
    /// row; the auth session is kept in that case.
    pub async fn sign_in(&self, form: &LoginForm) -> Result<SessionSnapshot> {
        form.validate()?;
        let session = self
            .auth
            .sign_in(form.email.trim(), &form.password)
            .await
            .inspect_err(|error| tracing::error!("Sign in failed: {error}"))?;

        let profile = self
            .profiles
            .fetch_profile(Some(&session.access_token), &session.user.id)
            .await?;
        let user = session.user.clone();
        *self.session.lock().await = Some(session);

        let Some(profile) = profile else {
            tracing::warn!(user_id = %user.id, "Signed-in user has no profile row");
            let user_id = user.id.clone();
            self.publish(Some(user), None);
            return Err(Error::ProfileNotFound(user_id));
        };
        Ok(self.publish(Some(user), Some(profile)))
    }

    /// Register an account and create its profile row.
    pub async fn sign_up(&self, form: &RegisterForm) -> Result<SignUpOutcome> {
        form.validate()?;
        let outcome = self
            .auth
            .sign_up(form.email.trim(), &form.password)
            .await
            .inspect_err(|error| tracing::error!("Sign up failed: {error}"))?;

        let (user, access_token) = match &outcome {
            SignUpOutcome::SignedIn(session) => {
                (session.user.clone(), Some(session.access_token.as_str()))
            }
            SignUpOutcome::ConfirmationRequired(user) => (user.clone(), None),
        };
        let profile = Profile::new(user.id.clone(), Some(form.username.trim().to_string()));
        self.profiles
            .insert_profile(access_token, &profile)
            .await
            .inspect_err(|error| tracing::error!("Failed to create profile: {error}"))?;

        if let SignUpOutcome::SignedIn(session) = &outcome {
            *self.session.lock().await = Some(session.clone());
            self.publish(Some(user), Some(profile));
        }
        Ok(outcome)
    }

    /// Change password and/or username, then reload the profile.
    pub async fn update_account(&self, form: &AccountUpdateForm) -> Result<SessionSnapshot> {
        form.validate()?;
        let session = self.session().await.ok_or(Error::NotSignedIn)?;

        if let Some(password) = form.password() {
            self.auth
                .update_password(&session, &password)
                .await
                .inspect_err(|error| tracing::error!("Password update failed: {error}"))?;
        }
        if let Some(username) = form.username() {
            self.profiles
                .update_username(Some(&session.access_token), &session.user.id, &username)
                .await
                .inspect_err(|error| tracing::error!("Username update failed: {error}"))?;
        }
        self.reload_profile().await
    }

    /// Look the profile up again for the current user
    pub async fn reload_profile(&self) -> Result<SessionSnapshot> {
        let Some(session) = self.session().await else {
            return Ok(self.publish(None, None));
        };
        let profile = self
            .profiles
            .fetch_profile(Some(&session.access_token), &session.user.id)
            .await?;
        Ok(self.publish(Some(session.user), profile))
    }

    /// Sign out remotely and clear local state.
    ///
    /// Local state is cleared even when the remote call fails.
    pub async fn logout(&self) -> Result<()> {
        let session = self.session.lock().await.take();
        let result = match &session {
            Some(session) => self.auth.sign_out(session).await,
            None => Ok(()),
        };
        self.publish(None, None);
        result.map_err(|error| {
            tracing::warn!("Remote sign out failed: {error}");
            error.into()
        })
    }

    async fn lookup_profile_lenient(&self, session: &AuthSession) -> Option<Profile> {
        match self
            .profiles
            .fetch_profile(Some(&session.access_token), &session.user.id)
            .await
        {
            Ok(profile) => profile,
            Err(error) => {
                tracing::error!("Failed to load profile: {error}");
                None
            }
        }
    }

    fn publish(&self, user: Option<AuthUser>, profile: Option<Profile>) -> SessionSnapshot {
        let snapshot = SessionSnapshot {
            user,
            profile,
            loading: false,
        };
        self.state.send_replace(snapshot.clone());
        snapshot
    }
}
