//! Auth state controller — the single owner of session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Host code (the CLI, or any UI shell) constructs one `AuthController`,
//! calls [`AuthController::initialize`] once at startup, and then drives
//! `login`/`logout`/`register`. Everything else reads state through
//! [`AuthController::state`] or a [`watch`] subscription.
//!
//! DESIGN
//! ======
//! Durable token and in-memory user only change together, through
//! `set_session`/`clear_session`. Within `login` the token is written before
//! resolution starts and resolution finishes before navigation, so any
//! subscriber that observes `LoggedIn` can rely on the token being stored.
//!
//! ERROR HANDLING
//! ==============
//! `resolve` propagates `AuthError::Resolution` after resetting to logged
//! out. `login`/`register` flatten every failure into a user-facing string.
//! Startup resolution failures are logged and otherwise swallowed.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::AuthBackend;
use crate::error::AuthError;
use crate::navigation::{Navigator, Route};
use crate::storage::{Storage, TOKEN_KEY};
use crate::types::{Credentials, User};

// =============================================================================
// SESSION STATE
// =============================================================================

/// Logged-in status of the current process.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    /// A stored token is being exchanged for a user record.
    Resolving,
    LoggedIn { token: String, user: User },
}

impl SessionState {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::LoggedIn { user, .. } => Some(user),
            Self::LoggedOut | Self::Resolving => None,
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::LoggedIn { token, .. } => Some(token),
            Self::LoggedOut | Self::Resolving => None,
        }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    #[must_use]
    pub fn is_resolving(&self) -> bool {
        matches!(self, Self::Resolving)
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct AuthController {
    backend: Arc<dyn AuthBackend>,
    storage: Arc<dyn Storage>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<SessionState>,
    initialized: AtomicBool,
}

impl AuthController {
    #[must_use]
    pub fn new(backend: Arc<dyn AuthBackend>, storage: Arc<dyn Storage>, navigator: Arc<dyn Navigator>) -> Self {
        let (state, _) = watch::channel(SessionState::LoggedOut);
        Self { backend, storage, navigator, state, initialized: AtomicBool::new(false) }
    }

    /// Snapshot of the current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    /// Receive every subsequent state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Rehydrate session state from durable storage.
    ///
    /// Runs once; later calls return the current state untouched. Never
    /// fails: an unreadable slot or a token the backend refuses leaves the
    /// controller logged out.
    pub async fn initialize(&self) -> SessionState {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return self.state();
        }

        let token = match self.storage.get_item(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                // An unreadable slot can never be resolved; drop it.
                warn!(error = %e, "token storage unreadable at startup");
                self.clear_session();
                return self.state();
            }
        };

        let Some(token) = token else {
            self.state.send_replace(SessionState::LoggedOut);
            return self.state();
        };

        if let Err(e) = self.resolve(&token).await {
            warn!(error = %e, code = e.error_code(), "stored session could not be restored");
        }
        self.state()
    }

    /// Exchange `token` for the user it belongs to.
    ///
    /// On success the session becomes `LoggedIn` with `token` stored durably.
    /// On failure both the user and the stored token are cleared.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Resolution` wrapping the underlying cause.
    pub async fn resolve(&self, token: &str) -> Result<User, AuthError> {
        self.state.send_replace(SessionState::Resolving);

        let result = match self.backend.fetch_current_user(token).await {
            Ok(user) => self.set_session(token, user.clone()).map(|()| user),
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            self.clear_session();
            AuthError::resolution(e)
        })
    }

    /// Log in with backend-validated credentials.
    ///
    /// Returns the navigation target on success, or the message to show the
    /// user on any failure. State is untouched when the backend refuses the
    /// credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<Route, String> {
        let credentials = Credentials { username: username.to_owned(), password: password.to_owned() };
        match self.try_login(&credentials).await {
            Ok(user) => {
                info!(user_id = %user.id, "logged in");
                self.navigator.navigate(Route::Profile);
                Ok(Route::Profile)
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "login failed");
                Err(e.user_message())
            }
        }
    }

    async fn try_login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let token = self.backend.login(credentials).await?;
        self.storage.set_item(TOKEN_KEY, &token)?;
        self.resolve(&token).await
    }

    /// Forget the session locally. Never contacts the backend.
    pub fn logout(&self) -> Route {
        self.clear_session();
        info!("logged out");
        self.navigator.navigate(Route::Root);
        Route::Root
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, user_data: &Value) -> Result<Route, String> {
        match self.backend.register(user_data).await {
            Ok(()) => {
                info!("registered");
                self.navigator.navigate(Route::Success);
                Ok(Route::Success)
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "registration failed");
                Err(e.user_message())
            }
        }
    }

    fn set_session(&self, token: &str, user: User) -> Result<(), AuthError> {
        self.storage.set_item(TOKEN_KEY, token)?;
        self.state.send_replace(SessionState::LoggedIn { token: token.to_owned(), user });
        Ok(())
    }

    fn clear_session(&self) {
        if let Err(e) = self.storage.remove_item(TOKEN_KEY) {
            warn!(error = %e, "failed to remove stored token");
        }
        self.state.send_replace(SessionState::LoggedOut);
    }
}
