//! Authentication service.
//!
//! The [`AuthGateway`] is the only writer of the [`SessionStore`]. It
//! resolves the session at start-up and turns login, logout and sign-up
//! calls into session transitions plus a user-facing outcome.

mod error;

pub use error::AuthError;

use mymovielist_core::Identity;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

use crate::api::{ApiError, AuthApi};
use crate::session::{AuthState, SessionStore};

/// Shown when a login fails without a backend reason.
pub const LOGIN_FAILED: &str = "Login failed";

/// Shown when a sign-up fails without a backend reason.
pub const SIGNUP_FAILED: &str = "Signup failed";

/// Authentication gateway.
#[derive(Clone)]
pub struct AuthGateway<A> {
    api: A,
    session: SessionStore,
}

impl<A: AuthApi> AuthGateway<A> {
    /// Create a gateway writing to `session`.
    #[must_use]
    pub const fn new(api: A, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// The store this gateway writes.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Ask the backend who is logged in and record the answer.
    ///
    /// Any failure leaves the session anonymous.
    #[instrument(skip(self))]
    pub async fn check_session(&self) -> AuthState {
        let identity = match self.api.me().await {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "Identity check failed, treating session as anonymous");
                None
            }
        };
        self.session.set_identity(identity);
        self.session.state()
    }

    /// Log in with a username or email address.
    ///
    /// The session is only written on success.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredentials`] if either field is blank
    /// - [`AuthError::Rejected`] carrying the backend's reason, or
    ///   [`LOGIN_FAILED`] when it gave none
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username_or_email: &str,
        password: &SecretString,
    ) -> Result<Identity, AuthError> {
        let username_or_email = username_or_email.trim();
        if username_or_email.is_empty() || password.expose_secret().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        match self.api.login(username_or_email, password).await {
            Ok(identity) => {
                info!(user = %identity.username, role = %identity.role, "Logged in");
                self.session.set_identity(Some(identity.clone()));
                Ok(identity)
            }
            Err(e) => Err(rejected(&e, LOGIN_FAILED)),
        }
    }

    /// Log out. The session ends anonymous whatever the backend says.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            warn!(error = %e, "Logout request failed");
        }
        self.session.set_identity(None);
        info!("Logged out");
    }

    /// Register a new account. Does not log in.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredentials`] if any field is blank
    /// - [`AuthError::Rejected`] carrying the backend's reason, or
    ///   [`SIGNUP_FAILED`] when it gave none
    #[instrument(skip(self, password))]
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<(), AuthError> {
        let (username, email) = (username.trim(), email.trim());
        if username.is_empty() || email.is_empty() || password.expose_secret().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        self.api
            .signup(username, email, password)
            .await
            .map(|()| info!(user = %username, "Account created"))
            .map_err(|e| rejected(&e, SIGNUP_FAILED))
    }
}

fn rejected(error: &ApiError, fallback: &str) -> AuthError {
    warn!(error = %error, "Authentication request failed");
    AuthError::Rejected {
        reason: error.reason().unwrap_or(fallback).to_string(),
    }
}
