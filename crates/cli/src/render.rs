//! Page rendering through askama text templates.
//!
//! Each page function takes view state and returns the text to print.
//! Formatting of individual values happens here; templates only lay out.

use askama::Template;
use mymovielist_client::api::AdminApi;
use mymovielist_client::routes::{HeaderLinks, HomeTab};
use mymovielist_client::views::AdminMoviesView;
use mymovielist_client::views::home::{HomeRow, HomeState, LIST_EXCERPT};
use mymovielist_client::views::movie::DetailState;
use mymovielist_core::{Identity, Movie, MovieField, MovieForm, MovieId, MovieSummary, Rating};

const NOT_AVAILABLE: &str = "N/A";

struct Fact {
    label: &'static str,
    value: String,
}

#[derive(Template)]
#[template(path = "header.txt")]
struct HeaderTemplate<'a> {
    admin: bool,
    username: Option<&'a str>,
}

struct TabLink {
    path: &'static str,
    title: &'static str,
    active: bool,
}

struct Line {
    heading: String,
    excerpt: String,
    stat: String,
}

#[derive(Template)]
#[template(path = "home.txt")]
struct HomeTemplate {
    title: &'static str,
    tabs: Vec<TabLink>,
    status: Option<&'static str>,
    rows: Vec<Line>,
}

#[derive(Template)]
#[template(path = "search.txt")]
struct SearchTemplate<'a> {
    query: &'a str,
    loading: bool,
    rows: Vec<Line>,
}

struct CommentLine {
    id: String,
    initial: String,
    author: String,
    time: String,
    text: String,
    deletable: bool,
}

#[derive(Template)]
#[template(path = "movie.txt")]
struct MovieTemplate {
    status: Option<&'static str>,
    title: String,
    tagline: Option<String>,
    overview: String,
    facts: Vec<Fact>,
    logged_in: bool,
    your_rating: Option<u8>,
    comments: Vec<CommentLine>,
    submitting: bool,
}

struct AdminLine {
    editing: bool,
    cells: String,
}

struct EditForm {
    id: String,
    fields: Vec<Fact>,
}

#[derive(Template)]
#[template(path = "admin.txt")]
struct AdminTemplate<'a> {
    status: Option<&'static str>,
    rows: Vec<AdminLine>,
    can_prev: bool,
    can_next: bool,
    page_input: &'a str,
    total_pages: u32,
    summary: String,
    edit: Option<EditForm>,
    creation: Vec<Fact>,
}

#[derive(Template)]
#[template(path = "login.txt")]
struct LoginTemplate {
    next: Option<String>,
}

#[derive(Template)]
#[template(path = "signup.txt")]
struct SignupTemplate;

#[derive(Template)]
#[template(path = "not_found.txt")]
struct NotFoundTemplate<'a> {
    path: &'a str,
}

#[derive(Template)]
#[template(path = "help.txt")]
struct HelpTemplate {
    fields: String,
}

pub fn header(links: &HeaderLinks) -> askama::Result<String> {
    HeaderTemplate {
        admin: links.admin,
        username: links.username.as_deref(),
    }
    .render()
}

pub fn home(tab: HomeTab, state: &HomeState, rows: &[HomeRow]) -> askama::Result<String> {
    let status = match state {
        HomeState::Loading => Some("Loading..."),
        HomeState::Failed => Some("Failed to load data"),
        HomeState::Loaded(_) => None,
    };
    HomeTemplate {
        title: tab.title(),
        tabs: HomeTab::ALL
            .iter()
            .map(|&t| TabLink {
                path: if t == HomeTab::TopRated { "/" } else { t.path() },
                title: t.title(),
                active: t == tab,
            })
            .collect(),
        status,
        rows: rows.iter().map(home_line).collect(),
    }
    .render()
}

fn home_line(row: &HomeRow) -> Line {
    let mut heading = String::new();
    if let Some(rank) = row.rank {
        heading.push_str(&format!("#{rank} "));
    }
    if row.cover_url.is_none() {
        heading.push_str(&format!("[{}] ", row.placeholder));
    }
    heading.push_str(&row.title);
    if let Some(year) = row.year {
        heading.push_str(&format!(" ({year})"));
    }
    heading.push_str(&format!("  /movie/{}", row.movie_id));

    let stat = row.stat.as_ref().map_or_else(String::new, |stat| {
        stat.stars().map_or_else(
            || stat.label(),
            |filled| format!("{} {}", star_bar(filled), stat.label()),
        )
    });

    Line {
        heading,
        excerpt: row.excerpt.clone(),
        stat,
    }
}

pub fn search(query: &str, results: &[MovieSummary], loading: bool) -> askama::Result<String> {
    SearchTemplate {
        query,
        loading,
        rows: results
            .iter()
            .map(|movie| Line {
                heading: movie.year().map_or_else(
                    || format!("{}  /movie/{}", movie.title, movie.movie_id),
                    |year| format!("{} ({year})  /movie/{}", movie.title, movie.movie_id),
                ),
                excerpt: movie.overview_excerpt(LIST_EXCERPT),
                stat: String::new(),
            })
            .collect(),
    }
    .render()
}

/// The movie page as seen by `viewer`.
pub fn movie(
    state: &DetailState,
    viewer: Option<&Identity>,
    submitting: bool,
) -> askama::Result<String> {
    let status = match state {
        DetailState::Loading => Some("Loading..."),
        DetailState::NotFound => Some("Movie not found"),
        DetailState::Unavailable => Some("Failed to load movie"),
        DetailState::Loaded(_) => None,
    };
    let DetailState::Loaded(detail) = state else {
        return MovieTemplate {
            status,
            title: String::new(),
            tagline: None,
            overview: String::new(),
            facts: Vec::new(),
            logged_in: viewer.is_some(),
            your_rating: None,
            comments: Vec::new(),
            submitting,
        }
        .render();
    };

    let movie = &detail.movie;
    let facts = vec![
        Fact {
            label: "Released",
            value: movie
                .release_date
                .map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.to_string()),
        },
        Fact {
            label: "Language",
            value: non_blank(movie.language.as_deref()),
        },
        Fact {
            label: "Runtime",
            value: movie
                .runtime
                .filter(|&m| m > 0)
                .map_or_else(|| NOT_AVAILABLE.to_string(), |m| format!("{m} mins")),
        },
        Fact {
            label: "Budget",
            value: movie
                .budget
                .filter(|&b| b != 0)
                .map_or_else(|| NOT_AVAILABLE.to_string(), |b| format!("${}", thousands(b))),
        },
        Fact {
            label: "Critic Rating",
            value: score(movie.vote_average),
        },
        Fact {
            label: "User Rating",
            value: score(Some(detail.user_rating_average)),
        },
    ];

    let comments = detail
        .comments
        .iter()
        .map(|c| CommentLine {
            id: c.comment_id.to_string(),
            initial: c.author_initial(),
            author: c.user_name.clone(),
            time: c.time_stamp.clone(),
            text: c.comment_text.clone(),
            deletable: viewer.is_some_and(|v| c.deletable_by(v)),
        })
        .collect();

    MovieTemplate {
        status: None,
        title: movie.title.clone(),
        tagline: movie.tagline.clone().filter(|t| !t.trim().is_empty()),
        overview: movie.overview_or_default().to_string(),
        facts,
        logged_in: viewer.is_some(),
        your_rating: detail.user_rating.map(Rating::stars),
        comments,
        submitting,
    }
    .render()
}

pub fn admin<A: AdminApi>(view: &AdminMoviesView<A>) -> askama::Result<String> {
    let status = if view.is_loading() {
        Some("Loading...")
    } else if view.load_failed() {
        Some("Failed to load movies")
    } else {
        None
    };
    let editing_id = view.editing().map(|e| e.id);

    let summary = match (view.total_movies(), view.filter_query()) {
        (Some(total), "") => format!("({total} movies)"),
        (Some(total), filter) => format!("({total} movies matching \"{filter}\")"),
        (None, "") => String::new(),
        (None, filter) => format!("(matching \"{filter}\")"),
    };

    AdminTemplate {
        status,
        rows: view
            .items()
            .iter()
            .map(|m| AdminLine {
                editing: editing_id == Some(m.movie_id),
                cells: admin_cells(m),
            })
            .collect(),
        can_prev: view.can_prev(),
        can_next: view.can_next(),
        page_input: view.page_input(),
        total_pages: view.total_pages(),
        summary,
        edit: view.editing().map(|e| EditForm {
            id: e.id.to_string(),
            fields: form_fields(&e.form),
        }),
        creation: form_fields(view.creation()),
    }
    .render()
}

fn admin_cells(movie: &Movie) -> String {
    let date = movie
        .release_date
        .map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.to_string());
    format!(
        "{:>7}  {:<40}  {:<10}  {:>5}  {:>6}",
        movie.movie_id.as_i32(),
        movie.title,
        date,
        score(movie.vote_average),
        movie.vote_count.unwrap_or(0)
    )
}

fn form_fields(form: &MovieForm) -> Vec<Fact> {
    MovieField::ALL
        .iter()
        .map(|&field| Fact {
            label: field.name(),
            value: form.get(field),
        })
        .collect()
}

pub fn login(next: Option<MovieId>) -> askama::Result<String> {
    LoginTemplate {
        next: next.map(|id| id.to_string()),
    }
    .render()
}

pub fn signup() -> askama::Result<String> {
    SignupTemplate.render()
}

pub fn not_found(path: &str) -> askama::Result<String> {
    NotFoundTemplate { path }.render()
}

pub fn help() -> askama::Result<String> {
    HelpTemplate {
        fields: MovieField::ALL
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(", "),
    }
    .render()
}

fn star_bar(filled: u8) -> String {
    (1..=5u8)
        .map(|i| if i <= filled { '★' } else { '☆' })
        .collect()
}

fn score(value: Option<f64>) -> String {
    value
        .filter(|v| v.abs() > f64::EPSILON)
        .map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

fn non_blank(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// `160000000` -> `160,000,000`
fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
