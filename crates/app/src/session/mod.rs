//! Session Gate
//!
//! Decides which view is reachable, performs login and signup, and clears
//! the client-held session marker on logout. Holding the marker is all it
//! takes to reach the protected views; the server is not consulted.

use std::{fmt, sync::Arc};

use thiserror::Error;
use tracing::{info, warn};

use stockroom::{users::Credentials, validation::ValidationError};

use crate::{controller::ErrorSlot, remote::RemoteError};

mod auth;
mod store;

pub use auth::{AuthApi, HttpAuthApi, LoginResponse, MockAuthApi};
pub use store::{MemorySessionStore, SessionStore};

/// Storage key of the session marker.
pub const SESSION_TOKEN_KEY: &str = "userToken";

/// Screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Login form
    Login,

    /// Signup form
    Signup,

    /// Stock summary
    Dashboard,

    /// Product management
    Products,

    /// User management
    Users,
}

impl View {
    /// Whether the view is only reachable with a session marker.
    #[must_use]
    pub const fn requires_session(self) -> bool {
        matches!(self, Self::Dashboard | Self::Products | Self::Users)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Dashboard => "dashboard",
            Self::Products => "products",
            Self::Users => "users",
        })
    }
}

/// Failures of login and signup.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A form field is blank.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request failed or was rejected.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl AuthError {
    /// Text shown to the user: the server's own message when it sent one.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Remote(RemoteError::Server { message, .. }) => message.clone(),
            Self::Remote(error) => error.to_string(),
            Self::Validation(error) => error.to_string(),
        }
    }
}

/// Navigation state plus the login/signup form's error slot.
pub struct SessionGate {
    auth: Arc<dyn AuthApi>,
    store: Box<dyn SessionStore>,
    view: View,
    error: ErrorSlot,
}

impl SessionGate {
    /// Start on the dashboard when a session marker is already held,
    /// otherwise on the login form.
    #[must_use]
    pub fn new(auth: Arc<dyn AuthApi>, store: Box<dyn SessionStore>) -> Self {
        let view = if store.contains(SESSION_TOKEN_KEY) {
            View::Dashboard
        } else {
            View::Login
        };

        Self {
            auth,
            store,
            view,
            error: ErrorSlot::default(),
        }
    }

    /// Current view.
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// Current error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.message()
    }

    /// Whether a session marker is held.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.store.contains(SESSION_TOKEN_KEY)
    }

    /// Session token held by the client, if any. May be empty when the
    /// server did not issue one.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.store.get(SESSION_TOKEN_KEY)
    }

    /// Go to `view`; protected views redirect to the login form when no
    /// session marker is held. Returns the view actually reached.
    pub fn navigate(&mut self, view: View) -> View {
        self.view = if view.requires_session() && !self.is_signed_in() {
            View::Login
        } else {
            view
        };

        self.view
    }

    /// Switch between the login and signup forms.
    pub fn toggle_mode(&mut self) -> View {
        self.error.clear();

        self.view = match self.view {
            View::Signup => View::Login,
            _ => View::Signup,
        };

        self.view
    }

    /// Log in and go to the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when a field is blank or the server rejects
    /// the credentials; the view does not change.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<View, AuthError> {
        self.error.clear();

        let credentials =
            Credentials::new(username, password).map_err(|error| self.fail(error.into()))?;

        let session = self
            .auth
            .login(credentials)
            .await
            .map_err(|error| self.fail(error.into()))?;

        self.store
            .set(SESSION_TOKEN_KEY, session.token.as_deref().unwrap_or_default());

        info!(username, "logged in");

        Ok(self.navigate(View::Dashboard))
    }

    /// Create an account and go to the login form.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when a field is blank or the server rejects
    /// the signup; the view does not change.
    pub async fn signup(&mut self, username: &str, password: &str) -> Result<View, AuthError> {
        self.error.clear();

        let credentials =
            Credentials::new(username, password).map_err(|error| self.fail(error.into()))?;

        let user = self
            .auth
            .signup(credentials)
            .await
            .map_err(|error| self.fail(error.into()))?;

        info!(id = %user.id, username = %user.username, "signed up");

        Ok(self.navigate(View::Login))
    }

    /// Forget the session marker and return to the login form.
    pub fn logout(&mut self) -> View {
        self.store.remove(SESSION_TOKEN_KEY);
        self.error.clear();

        info!("logged out");

        self.navigate(View::Login)
    }

    fn fail(&mut self, error: AuthError) -> AuthError {
        warn!("{error}");

        self.error.set(format!("Error: {}", error.reason()));

        error
    }
}

impl fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionGate")
            .field("view", &self.view)
            .field("signed_in", &self.is_signed_in())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
