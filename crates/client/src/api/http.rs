//! `reqwest` implementation of the request-client traits.

use std::sync::Arc;

use moka::future::Cache;
use mymovielist_core::{
    CommentId, HomeFeed, Identity, MovieDetail, MovieDraft, MovieId, MovieSummary, Rating,
};
use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::types::{
    Acknowledgement, CommentRequest, DeleteCommentRequest, ErrorBody, LoginRequest, LoginResponse,
    MeResponse, MoviePage, RateRequest, SignupRequest,
};
use super::{AdminApi, ApiError, AuthApi, CatalogApi};
use crate::config::ClientConfig;
use crate::error::ClientError;

const HOME_KEY: &str = "home";

/// Backend client over HTTP.
///
/// Cheap to clone; clones share the connection pool, the session cookie
/// and the home feed cache.
#[derive(Clone)]
pub struct HttpApi {
    inner: Arc<HttpApiInner>,
}

struct HttpApiInner {
    client: reqwest::Client,
    base: Url,
    home_cache: Option<Cache<&'static str, HomeFeed>>,
}

impl HttpApi {
    /// Create a client for the configured API root.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let home_cache = (!config.home_cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(config.home_cache_ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(HttpApiInner {
                client,
                base: with_trailing_slash(config.api_url.clone()),
                home_cache,
            }),
        })
    }

    /// The API root endpoint paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    /// Drop the cached home feed so the next `home()` re-fetches it.
    pub fn invalidate_home(&self) {
        if let Some(cache) = &self.inner.home_cache {
            cache.invalidate_all();
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base.join(path)?)
    }

    fn get(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.inner.client.get(self.endpoint(path)?))
    }

    fn post(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.inner.client.post(self.endpoint(path)?))
    }
}

/// `Url::join` drops the last segment of a base without a trailing slash.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Send a request and decode a JSON success body.
async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(rejection(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        warn!(
            error = %e,
            body = %body.chars().take(200).collect::<String>(),
            "Failed to decode backend response"
        );
        ApiError::Decode(e.to_string())
    })
}

/// Send a mutation and check its `{success}` acknowledgement.
async fn send_ack(request: RequestBuilder) -> Result<(), ApiError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(rejection(status, &body));
    }

    // An empty or non-JSON 2xx body still counts as success
    let ack: Acknowledgement = serde_json::from_str(&body).unwrap_or_default();
    if ack.success {
        Ok(())
    } else {
        Err(ApiError::Rejected {
            status: status.as_u16(),
            reason: ack.error,
        })
    }
}

fn rejection(status: StatusCode, body: &str) -> ApiError {
    let reason = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_reason);
    debug!(status = %status, reason = ?reason, "Backend rejected request");

    if status == StatusCode::NOT_FOUND {
        ApiError::NotFound { reason }
    } else {
        ApiError::Rejected {
            status: status.as_u16(),
            reason,
        }
    }
}

impl AuthApi for HttpApi {
    #[instrument(skip(self))]
    async fn me(&self) -> Result<Option<Identity>, ApiError> {
        let me: MeResponse = send_json(self.get("me")?).await?;
        Ok(me.user.filter(|_| me.authenticated))
    }

    #[instrument(skip(self, password))]
    async fn login(
        &self,
        username_or_email: &str,
        password: &SecretString,
    ) -> Result<Identity, ApiError> {
        let body = LoginRequest {
            username_or_email,
            password: password.expose_secret(),
        };
        let response = self.post("login")?.json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(rejection(status, &text));
        }

        let login: LoginResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;
        match login.user {
            Some(user) if login.success => Ok(user),
            _ => Err(ApiError::Rejected {
                status: status.as_u16(),
                reason: login.error,
            }),
        }
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), ApiError> {
        send_ack(self.post("logout")?).await
    }

    #[instrument(skip(self, password))]
    async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<(), ApiError> {
        let body = SignupRequest {
            username,
            email,
            password: password.expose_secret(),
        };
        send_ack(self.post("signup")?.json(&body)).await
    }
}

impl CatalogApi for HttpApi {
    #[instrument(skip(self))]
    async fn home(&self) -> Result<HomeFeed, ApiError> {
        if let Some(cache) = &self.inner.home_cache
            && let Some(feed) = cache.get(HOME_KEY).await
        {
            debug!("Cache hit for home feed");
            return Ok(feed);
        }

        let feed: HomeFeed = send_json(self.get("home")?).await?;

        if let Some(cache) = &self.inner.home_cache {
            cache.insert(HOME_KEY, feed.clone()).await;
        }
        Ok(feed)
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, ApiError> {
        let mut url = self.endpoint("search")?;
        url.query_pairs_mut().append_pair("query", query);
        send_json(self.inner.client.get(url)).await
    }

    #[instrument(skip(self), fields(movie_id = %id))]
    async fn movie(&self, id: MovieId) -> Result<MovieDetail, ApiError> {
        send_json(self.get(&format!("movie/{id}"))?).await
    }

    #[instrument(skip(self), fields(movie_id = %id, rating = rating.stars()))]
    async fn rate(&self, id: MovieId, rating: Rating) -> Result<(), ApiError> {
        let body = RateRequest {
            rating: rating.stars(),
        };
        send_ack(self.post(&format!("movie/{id}/rate"))?.json(&body)).await?;
        self.invalidate_home();
        Ok(())
    }

    #[instrument(skip(self, text), fields(movie_id = %id))]
    async fn comment(&self, id: MovieId, text: &str) -> Result<(), ApiError> {
        let body = CommentRequest { comment: text };
        send_ack(self.post(&format!("movie/{id}/comment"))?.json(&body)).await?;
        self.invalidate_home();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_comment(&self, movie_id: MovieId, comment_id: CommentId) -> Result<(), ApiError> {
        let body = DeleteCommentRequest { movie_id };
        send_ack(self.post(&format!("delete_comment/{comment_id}"))?.json(&body)).await?;
        self.invalidate_home();
        Ok(())
    }
}

impl AdminApi for HttpApi {
    #[instrument(skip(self))]
    async fn list_movies(&self, page: u32, query: &str) -> Result<MoviePage, ApiError> {
        let mut url = self.endpoint("admin/movies")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("query", query);
        send_json(self.inner.client.get(url)).await
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create_movie(&self, draft: &MovieDraft) -> Result<(), ApiError> {
        send_ack(self.post("admin/movie")?.json(draft)).await?;
        self.invalidate_home();
        Ok(())
    }

    #[instrument(skip(self, draft), fields(movie_id = %id))]
    async fn update_movie(&self, id: MovieId, draft: &MovieDraft) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("admin/movie/{id}"))?;
        send_ack(self.inner.client.put(url).json(draft)).await?;
        self.invalidate_home();
        Ok(())
    }

    #[instrument(skip(self), fields(movie_id = %id))]
    async fn delete_movie(&self, id: MovieId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("admin/movie/{id}"))?;
        send_ack(self.inner.client.delete(url)).await?;
        self.invalidate_home();
        Ok(())
    }
}
