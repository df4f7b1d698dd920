//! Home feed: four tabs over a single `GET /home` response.

use mymovielist_core::{HomeFeed, MovieId, MovieSummary};
use tracing::warn;

use crate::api::CatalogApi;
use crate::routes::HomeTab;

/// Overview length on the random grid.
pub const GRID_EXCERPT: usize = 80;

/// Overview length on the ranked lists.
pub const LIST_EXCERPT: usize = 120;

/// Load state of the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum HomeState {
    #[default]
    Loading,
    Loaded(HomeFeed),
    /// Shown as "Failed to load data".
    Failed,
}

/// How a tab lays out its movies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Grid,
    List,
}

/// Right-hand statistic of a list row.
#[derive(Debug, Clone, PartialEq)]
pub enum Stat {
    /// Critic vote average out of ten.
    Score(Option<f64>),
    ReleaseYear(Option<i64>),
    Comments(u32),
}

impl Stat {
    /// Text form: `8.4/10`, `N/A/10`, `2021`, `12 Comments`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Score(Some(avg)) => format!("{avg:.1}/10"),
            Self::Score(None) => "N/A/10".to_string(),
            Self::ReleaseYear(Some(year)) => year.to_string(),
            Self::ReleaseYear(None) => "N/A".to_string(),
            Self::Comments(n) => format!("{n} Comments"),
        }
    }

    /// Filled stars out of five for a score.
    #[must_use]
    pub fn stars(&self) -> Option<u8> {
        match self {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Self::Score(avg) => Some((avg.unwrap_or(0.0) / 2.0).round().clamp(0.0, 5.0) as u8),
            Self::ReleaseYear(_) | Self::Comments(_) => None,
        }
    }
}

/// One movie as displayed on a tab.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeRow {
    pub movie_id: MovieId,
    pub title: String,
    /// 1-based position; ranked lists only.
    pub rank: Option<usize>,
    /// Year shown beside the title; ranked lists only.
    pub year: Option<i64>,
    pub excerpt: String,
    pub cover_url: Option<String>,
    /// Two-letter stand-in when there is no cover.
    pub placeholder: String,
    pub stat: Option<Stat>,
}

impl HomeTab {
    #[must_use]
    pub const fn layout(self) -> Layout {
        match self {
            Self::Random => Layout::Grid,
            Self::TopRated | Self::Trending | Self::Popular => Layout::List,
        }
    }

    fn movies(self, feed: &HomeFeed) -> &[MovieSummary] {
        match self {
            Self::TopRated => &feed.top_rated,
            Self::Random => &feed.random,
            Self::Trending => &feed.trending,
            Self::Popular => &feed.popular,
        }
    }

    fn row(self, index: usize, movie: &MovieSummary) -> HomeRow {
        let ranked = matches!(self, Self::TopRated | Self::Popular);
        let excerpt_limit = match self.layout() {
            Layout::Grid => GRID_EXCERPT,
            Layout::List => LIST_EXCERPT,
        };
        let stat = match self {
            Self::Random => None,
            Self::TopRated => Some(Stat::Score(movie.vote_average)),
            Self::Trending => Some(Stat::ReleaseYear(movie.release_year)),
            Self::Popular => Some(Stat::Comments(movie.total_comments.unwrap_or(0))),
        };

        HomeRow {
            movie_id: movie.movie_id,
            title: movie.title.clone(),
            rank: ranked.then_some(index + 1),
            year: if ranked { movie.year() } else { None },
            excerpt: movie.overview_excerpt(excerpt_limit),
            cover_url: movie.cover_url.clone(),
            placeholder: movie.poster_placeholder(),
            stat,
        }
    }
}

/// Home page view-model.
pub struct HomeView<C> {
    api: C,
    tab: HomeTab,
    state: HomeState,
}

impl<C: CatalogApi> HomeView<C> {
    #[must_use]
    pub fn new(api: C, tab: HomeTab) -> Self {
        Self {
            api,
            tab,
            state: HomeState::Loading,
        }
    }

    /// Fetch the feed. Failures leave the view in [`HomeState::Failed`].
    pub async fn load(&mut self) {
        self.state = HomeState::Loading;
        self.state = match self.api.home().await {
            Ok(feed) => HomeState::Loaded(feed),
            Err(e) => {
                warn!(error = %e, "Failed to load home feed");
                HomeState::Failed
            }
        };
    }

    /// Switch tabs without re-fetching.
    pub const fn set_tab(&mut self, tab: HomeTab) {
        self.tab = tab;
    }

    #[must_use]
    pub const fn tab(&self) -> HomeTab {
        self.tab
    }

    #[must_use]
    pub const fn state(&self) -> &HomeState {
        &self.state
    }

    /// Rows of the active tab; empty unless loaded.
    #[must_use]
    pub fn rows(&self) -> Vec<HomeRow> {
        match &self.state {
            HomeState::Loaded(feed) => self
                .tab
                .movies(feed)
                .iter()
                .enumerate()
                .map(|(i, m)| self.tab.row(i, m))
                .collect(),
            HomeState::Loading | HomeState::Failed => Vec::new(),
        }
    }
}
