//! Integration tests for the MyMovieList client.
//!
//! Every test stands up a `wiremock` server playing the backend and drives
//! the real `reqwest` client through the view-models.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mymovielist-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - session resolution, login, logout, sign-up
//! - `admin_collection` - paging, filtering, fencing and mutations
//! - `movie_detail` - load outcomes, rating and comments
//! - `home_feed` - feed caching and invalidation

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use mymovielist_client::api::HttpApi;
use mymovielist_client::{AppState, ClientConfig};
use serde_json::{Value, json};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock backend rooted at `/api`.
pub struct TestBackend {
    pub server: MockServer,
}

impl TestBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// API root of the mock backend.
    pub fn api_url(&self) -> Url {
        Url::parse(&format!("{}/api", self.server.uri())).expect("mock url")
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url())
    }

    pub fn app(&self) -> AppState {
        AppState::new(self.config()).expect("app state")
    }

    pub fn http(&self) -> HttpApi {
        HttpApi::new(&self.config()).expect("http client")
    }

    /// `HttpApi` with the home feed cache disabled.
    pub fn uncached_http(&self) -> HttpApi {
        let mut config = self.config();
        config.home_cache_ttl = Duration::ZERO;
        HttpApi::new(&config).expect("http client")
    }

    /// Answer `GET /api/me` with `user`, or as anonymous.
    pub async fn me(&self, user: Option<Value>) {
        let body = user.map_or_else(
            || json!({"authenticated": false}),
            |user| json!({"authenticated": true, "user": user}),
        );
        Mock::given(method("GET"))
            .and(path("/api/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far whose path is `path`.
    pub async fn hits(&self, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .expect("request recording")
            .iter()
            .filter(|r| r.url.path() == request_path)
            .count()
    }
}

pub fn admin_user() -> Value {
    json!({"id": 1, "username": "root", "role": "admin"})
}

pub fn regular_user(name: &str) -> Value {
    json!({"id": 2, "username": name, "role": "normal"})
}

/// A backend movie row.
pub fn movie_json(id: i32, title: &str) -> Value {
    json!({
        "movieId": id,
        "title": title,
        "releaseDate": "Fri, 22 Oct 2021 00:00:00 GMT",
        "voteAverage": 7.8,
        "voteCount": 1200
    })
}

/// `{success: true}`.
pub fn ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true}))
}

/// A non-2xx response with an `{error}` body.
pub fn error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({"error": message}))
}
