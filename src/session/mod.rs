//! Session state for the signed-in client: the token and the cached user record, kept
//! in a [`KeyValueStore`] and always written or cleared as a pair. Role helpers drive
//! post-login navigation; guards live in [`guards`].
//!
//! The token is a credential. It is read into a `SecretString` and must never be
//! logged or rendered.

mod guards;
mod types;

pub use types::{Role, User, UserProfile};

use crate::{
    api::{ApiClient, ErrorEnvelope, CURRENT_USER_ENDPOINT, LOGOUT_ENDPOINT},
    storage::{SharedStore, AUTH_TOKEN_KEY, USER_KEY},
    ui::Feedback,
    LOGIN_PATH,
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, info, warn};

/// Session context shared by handlers and guards.
#[derive(Clone)]
pub struct Session {
    store: SharedStore,
    api: ApiClient,
    feedback: Feedback,
}

impl Session {
    /// `api` must read its token from the same `store`.
    pub fn new(store: SharedStore, api: ApiClient, feedback: Feedback) -> Self {
        Self {
            store,
            api,
            feedback,
        }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.store
            .get(AUTH_TOKEN_KEY)
            .filter(|token| !token.is_empty())
            .map(SecretString::from)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// The cached user, or `None` when nothing is stored or the stored text does not
    /// decode.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                debug!("ignoring malformed stored user: {err}");
                None
            }
        }
    }

    /// Replaces the cached user.
    /// # Errors
    /// Returns an error if the user cannot be encoded or stored.
    pub fn set_current_user(&self, user: &User) -> Result<()> {
        let encoded = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &encoded)
    }

    /// Stores a fresh token and user together. If the user cannot be stored the token
    /// is removed again so neither entry is left alone.
    /// # Errors
    /// Returns an error if either entry cannot be stored.
    pub fn establish(&self, token: &SecretString, user: &User) -> Result<()> {
        self.store.set(AUTH_TOKEN_KEY, token.expose_secret())?;

        if let Err(err) = self.set_current_user(user) {
            if let Err(rollback) = self.store.remove(AUTH_TOKEN_KEY) {
                warn!("failed to roll back session token: {rollback}");
            }
            return Err(err);
        }

        info!(
            "session established for {}",
            user.username.as_deref().unwrap_or("unknown user")
        );
        Ok(())
    }

    /// Removes token and user. Both removals are attempted even if the first fails.
    /// # Errors
    /// Returns the first removal error.
    pub fn clear(&self) -> Result<()> {
        let token = self.store.remove(AUTH_TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        token.and(user)
    }

    #[must_use]
    pub fn user_role(&self) -> Option<Role> {
        self.current_user().and_then(|user| user.role().cloned())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user_role() == Some(Role::Admin)
    }

    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.user_role() == Some(Role::Owner)
    }

    /// The role dashboard of the cached user, or the login page.
    #[must_use]
    pub fn dashboard_url(&self) -> String {
        self.current_user()
            .and_then(|user| user.dashboard_url().map(str::to_string))
            .unwrap_or_else(|| LOGIN_PATH.to_string())
    }

    pub fn redirect_to_dashboard(&self) {
        self.feedback.navigator().navigate(&self.dashboard_url());
    }

    /// Signs out. The remote call is best-effort: whatever it returns, local state is
    /// cleared and the client is sent to the login page.
    /// # Errors
    /// Returns an error only if local state could not be cleared.
    pub async fn logout(&self) -> Result<()> {
        if let Err(err) = self.api.post(LOGOUT_ENDPOINT, &json!({}), true).await {
            warn!("remote logout failed, clearing local session anyway: {err}");
        }

        let cleared = self.clear();
        self.feedback.navigator().navigate(LOGIN_PATH);
        cleared
    }

    /// Fetches the signed-in user and replaces the cached record.
    /// # Errors
    /// Returns the request failure, or a parse envelope if the body is not a user.
    pub async fn refresh_current_user(&self) -> Result<User, ErrorEnvelope> {
        let data = self.api.get(CURRENT_USER_ENDPOINT, true).await?;
        let user: User = serde_json::from_value(data).map_err(|err| {
            warn!("current user response did not decode: {err}");
            ErrorEnvelope::parse(200)
        })?;

        if let Err(err) = self.set_current_user(&user) {
            warn!("failed to cache current user: {err}");
        }

        Ok(user)
    }
}
