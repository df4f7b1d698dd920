//! View router: navigable paths and access gating.
//!
//! # Routes
//!
//! - `/`, `/rating`, `/random`, `/trending`, `/popular` - home feed tabs
//! - `/login[?next=:id]` - login form, returning to a movie afterwards
//! - `/signup` - account creation
//! - `/search?query=` - title search
//! - `/movie/:id` - movie detail
//! - `/admin` - admin collection console

use std::fmt;

use mymovielist_core::MovieId;
use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::session::AuthState;

/// Base the router resolves relative paths against.
const ROUTER_BASE: &str = "http://mymovielist.local/";

/// Home page tabs, one per list of the home feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HomeTab {
    #[default]
    TopRated,
    Random,
    Trending,
    Popular,
}

impl HomeTab {
    pub const ALL: [Self; 4] = [Self::TopRated, Self::Random, Self::Trending, Self::Popular];

    /// Canonical path of the tab.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::TopRated => "/rating",
            Self::Random => "/random",
            Self::Trending => "/trending",
            Self::Popular => "/popular",
        }
    }

    /// Page heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::TopRated => "Top Rated Movies",
            Self::Random => "Random Selection",
            Self::Trending => "Trending Now",
            Self::Popular => "Most Popular",
        }
    }
}

/// A page of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home(HomeTab),
    Login { next: Option<MovieId> },
    Signup,
    Search { query: String },
    Movie(MovieId),
    Admin,
    /// Anything unrecognised; holds the requested path.
    NotFound(String),
}

impl Default for Route {
    fn default() -> Self {
        Self::Home(HomeTab::TopRated)
    }
}

impl Route {
    /// Parse a navigable path such as `/movie/42` or `/search?query=dune`.
    ///
    /// Trailing slashes are ignored and query values are percent-decoded.
    /// Never fails: unknown paths become [`Route::NotFound`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let Ok(url) = Url::parse(ROUTER_BASE).and_then(|base| base.join(input)) else {
            return Self::NotFound(input.to_string());
        };

        let path = url.path().trim_end_matches('/');
        let query = |key: &str| {
            url.query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["rating"] => Self::Home(HomeTab::TopRated),
            ["random"] => Self::Home(HomeTab::Random),
            ["trending"] => Self::Home(HomeTab::Trending),
            ["popular"] => Self::Home(HomeTab::Popular),
            ["login"] => Self::Login {
                next: query("next").and_then(|n| n.parse().ok()),
            },
            ["signup"] => Self::Signup,
            ["search"] => Self::Search {
                query: query("query").unwrap_or_default(),
            },
            ["movie", id] => id
                .parse()
                .map_or_else(|_| Self::NotFound(input.to_string()), Self::Movie),
            ["admin"] => Self::Admin,
            _ => Self::NotFound(input.to_string()),
        }
    }

    /// Canonical path of the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home(HomeTab::TopRated) => "/".to_string(),
            Self::Home(tab) => tab.path().to_string(),
            Self::Login { next: None } => "/login".to_string(),
            Self::Login { next: Some(id) } => format!("/login?next={id}"),
            Self::Signup => "/signup".to_string(),
            Self::Search { query } => {
                format!("/search?query={}", byte_serialize(query.as_bytes()).collect::<String>())
            }
            Self::Movie(id) => format!("/movie/{id}"),
            Self::Admin => "/admin".to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// Whether rendering depends on who is logged in.
    #[must_use]
    pub const fn requires_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl std::str::FromStr for Route {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// What the front end should do with a requested route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The session is still unknown; show a loading indicator.
    Pending,
    /// Render the route.
    Render(Route),
    /// Navigate elsewhere instead.
    Redirect(Route),
}

/// Decide how to handle `route` in the given session.
#[must_use]
pub fn resolve(route: Route, session: &AuthState) -> Resolution {
    if !session.is_resolved() {
        return Resolution::Pending;
    }
    if route.requires_admin() && !session.is_admin() {
        return Resolution::Redirect(Route::default());
    }
    Resolution::Render(route)
}

/// Where an anonymous user is sent when trying to rate or comment.
#[must_use]
pub const fn login_required(movie: MovieId) -> Route {
    Route::Login { next: Some(movie) }
}

/// Where the user lands after a successful login.
#[must_use]
pub fn after_login(next: Option<MovieId>) -> Route {
    next.map_or_else(Route::default, Route::Movie)
}

/// Session-dependent header links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderLinks {
    /// Show the admin console link.
    pub admin: bool,
    /// Username shown next to the logout link; `None` shows login/sign-up.
    pub username: Option<String>,
}

impl HeaderLinks {
    #[must_use]
    pub fn for_session(session: &AuthState) -> Self {
        Self {
            admin: session.is_admin(),
            username: session.identity().map(|i| i.username.clone()),
        }
    }
}
