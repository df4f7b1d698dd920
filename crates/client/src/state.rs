//! Application state shared by every page of a front end.

use std::sync::Arc;

use mymovielist_core::MovieId;
use tracing::{info, warn};

use crate::api::HttpApi;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::routes::HomeTab;
use crate::services::auth::AuthGateway;
use crate::session::{AuthState, SessionStore};
use crate::views::{AdminMoviesView, HomeView, MovieView, SearchView};

/// Application state shared across all pages.
///
/// This struct is cheaply cloneable via `Arc`; clones share the HTTP
/// client, its cookie jar and the session store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ClientConfig,
    api: HttpApi,
    session: SessionStore,
    auth: AuthGateway<HttpApi>,
}

impl AppState {
    /// Create a new application state. The session starts unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let api = HttpApi::new(&config)?;
        let session = SessionStore::new();
        let auth = AuthGateway::new(api.clone(), session.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                session,
                auth,
            }),
        })
    }

    /// Resolve the session, logging in with configured credentials when
    /// the backend reports nobody.
    pub async fn start(&self) -> AuthState {
        let state = self.inner.auth.check_session().await;
        if state.is_logged_in() {
            return state;
        }
        let Some(credentials) = &self.inner.config.credentials else {
            return state;
        };

        match self
            .inner
            .auth
            .login(&credentials.username, &credentials.password)
            .await
        {
            Ok(identity) => info!(user = %identity.username, "Logged in with configured credentials"),
            Err(e) => warn!(error = %e, "Configured credentials were rejected"),
        }
        self.inner.session.state()
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn api(&self) -> &HttpApi {
        &self.inner.api
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    #[must_use]
    pub fn auth(&self) -> &AuthGateway<HttpApi> {
        &self.inner.auth
    }

    #[must_use]
    pub fn home_view(&self, tab: HomeTab) -> HomeView<HttpApi> {
        HomeView::new(self.inner.api.clone(), tab)
    }

    #[must_use]
    pub fn search_view(&self) -> SearchView<HttpApi> {
        SearchView::new(self.inner.api.clone())
    }

    #[must_use]
    pub fn movie_view(&self, id: MovieId) -> MovieView<HttpApi> {
        MovieView::new(self.inner.api.clone(), self.inner.session.clone(), id)
    }

    #[must_use]
    pub fn admin_view(&self) -> AdminMoviesView<HttpApi> {
        AdminMoviesView::new(self.inner.api.clone())
    }
}
