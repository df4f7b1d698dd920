//! Interactive page shell.
//!
//! Holds the current page's view-model, turns typed commands into view
//! operations and prints the page after each change.

use std::io::{BufRead, Write};

use mymovielist_client::AppState;
use mymovielist_client::api::HttpApi;
use mymovielist_client::routes::{HeaderLinks, Resolution, Route, after_login, resolve};
use mymovielist_client::views::{
    AdminMoviesView, Confirm, HomeView, MovieView, Notice, Outcome, SearchView,
};
use mymovielist_core::MovieId;
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::command::Command;
use crate::error::CliError;
use crate::render;

enum Page {
    Home(HomeView<HttpApi>),
    Search(SearchView<HttpApi>),
    Movie(MovieView<HttpApi>),
    Admin(AdminMoviesView<HttpApi>),
    Login { next: Option<MovieId> },
    Signup,
    NotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Line-oriented prompt over the shell's terminal.
struct Prompt<'a, R, W> {
    input: &'a mut R,
    out: &'a mut W,
}

impl<R: BufRead, W: Write> Prompt<'_, R, W> {
    /// Ask for one line; `None` at end of input.
    fn ask(&mut self, label: &str) -> std::io::Result<Option<String>> {
        write!(self.out, "{label}: ")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> Confirm for Prompt<'_, R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        match self.ask(&format!("{prompt} [y/N]")) {
            Ok(answer) => answer.is_some_and(|a| {
                matches!(a.trim().to_ascii_lowercase().as_str(), "y" | "yes")
            }),
            Err(e) => {
                warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

/// The interactive shell.
pub struct Shell<R, W> {
    app: AppState,
    route: Route,
    page: Page,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(app: AppState, input: R, out: W) -> Self {
        Self {
            app,
            route: Route::default(),
            page: Page::NotFound(String::new()),
            input,
            out,
        }
    }

    /// Resolve the session, show `start` and serve commands until `quit`
    /// or end of input.
    pub async fn run(&mut self, start: Route) -> Result<(), CliError> {
        self.open(start).await?;
        loop {
            write!(self.out, "{}> ", self.route)?;
            self.out.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                return Ok(());
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if self.dispatch(command).await? == Flow::Quit {
                        return Ok(());
                    }
                }
                Err(e) => writeln!(self.out, "{e}")?,
            }
        }
    }

    /// Resolve the session and show one page.
    pub async fn open(&mut self, route: Route) -> Result<(), CliError> {
        self.app.start().await;
        self.navigate(route).await
    }

    fn prompt(&mut self) -> Prompt<'_, R, W> {
        Prompt {
            input: &mut self.input,
            out: &mut self.out,
        }
    }

    async fn navigate(&mut self, mut route: Route) -> Result<(), CliError> {
        let route = loop {
            match resolve(route.clone(), &self.app.session().state()) {
                Resolution::Pending => {
                    self.app.auth().check_session().await;
                }
                Resolution::Redirect(target) => {
                    debug!(from = %route, to = %target, "Redirecting");
                    route = target;
                }
                Resolution::Render(Route::Admin) => {
                    let mut view = self.app.admin_view();
                    match view.mount(self.app.auth()).await {
                        Outcome::Redirect(target) => route = target,
                        _ => {
                            self.page = Page::Admin(view);
                            break Route::Admin;
                        }
                    }
                }
                Resolution::Render(route) => break route,
            }
        };

        match &route {
            Route::Home(tab) => {
                if let Page::Home(view) = &mut self.page {
                    view.set_tab(*tab);
                } else {
                    let mut view = self.app.home_view(*tab);
                    view.load().await;
                    self.page = Page::Home(view);
                }
            }
            Route::Search { query } => {
                let mut view = self.app.search_view();
                view.search(query).await;
                self.page = Page::Search(view);
            }
            Route::Movie(id) => {
                let mut view = self.app.movie_view(*id);
                view.load().await;
                self.page = Page::Movie(view);
            }
            Route::Login { next } => self.page = Page::Login { next: *next },
            Route::Signup => self.page = Page::Signup,
            Route::NotFound(path) => self.page = Page::NotFound(path.clone()),
            Route::Admin => {}
        }
        self.route = route;
        self.render()
    }

    fn render(&mut self) -> Result<(), CliError> {
        let links = HeaderLinks::for_session(&self.app.session().state());
        let body = match &self.page {
            Page::Home(view) => render::home(view.tab(), view.state(), &view.rows())?,
            Page::Search(view) => render::search(view.query(), view.results(), view.is_loading())?,
            Page::Movie(view) => render::movie(
                view.state(),
                self.app.session().identity().as_ref(),
                view.is_submitting(),
            )?,
            Page::Admin(view) => render::admin(view)?,
            Page::Login { next } => render::login(*next)?,
            Page::Signup => render::signup()?,
            Page::NotFound(path) => render::not_found(path)?,
        };
        writeln!(self.out, "{}\n", render::header(&links)?)?;
        writeln!(self.out, "{body}")?;
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), CliError> {
        match &mut self.page {
            Page::Home(view) => view.load().await,
            Page::Search(view) => {
                let query = view.query().to_owned();
                view.search(&query).await;
            }
            Page::Movie(view) => view.load().await,
            Page::Admin(view) => view.refresh().await,
            Page::Login { .. } | Page::Signup | Page::NotFound(_) => {}
        }
        self.render()
    }

    async fn dispatch(&mut self, command: Command) -> Result<Flow, CliError> {
        let outcome = match command {
            Command::Nothing => return Ok(Flow::Continue),
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                writeln!(self.out, "{}", render::help()?)?;
                return Ok(Flow::Continue);
            }
            Command::Go(route) => {
                self.navigate(route).await?;
                return Ok(Flow::Continue);
            }
            Command::Refresh => {
                self.refresh().await?;
                return Ok(Flow::Continue);
            }
            Command::Login => return self.login().await,
            Command::Signup => return self.signup().await,
            Command::Logout => {
                self.app.auth().logout().await;
                writeln!(self.out, "Logged out.")?;
                Outcome::Redirect(Route::default())
            }
            command @ (Command::Rate(_) | Command::Comment(_) | Command::Uncomment(_)) => {
                self.movie_command(command).await
            }
            command => self.admin_command(command).await,
        };
        self.settle(outcome).await?;
        Ok(Flow::Continue)
    }

    async fn movie_command(&mut self, command: Command) -> Outcome {
        let Self {
            page, input, out, ..
        } = self;
        let Page::Movie(view) = page else {
            return Outcome::Failed("That command only works on a movie page.".to_string());
        };
        match command {
            Command::Rate(rating) => view.rate(rating).await,
            Command::Comment(text) => view.comment(&text).await,
            Command::Uncomment(id) => view.delete_comment(id, &mut Prompt { input, out }).await,
            _ => Outcome::Skipped,
        }
    }

    async fn admin_command(&mut self, command: Command) -> Outcome {
        let Self {
            page, input, out, ..
        } = self;
        let Page::Admin(view) = page else {
            return Outcome::Failed("That command only works on the admin dashboard.".to_string());
        };
        match command {
            Command::Next => view.next_page().await,
            Command::Prev => view.prev_page().await,
            Command::Page(entry) => {
                view.set_page_input(&entry);
                view.submit_page_input().await
            }
            Command::Filter(query) => {
                view.set_filter(&query).await;
                Outcome::Done
            }
            Command::Clear => {
                view.clear_filter().await;
                Outcome::Done
            }
            Command::Edit(id) => view.start_edit(id),
            Command::Set(field, value) => view.edit_field(field, &value),
            Command::Save => view.save_edit().await,
            Command::Cancel => view.cancel_edit(),
            Command::New(field, value) => view.new_field(field, &value),
            Command::Create => view.create().await,
            Command::Delete(id) => view.delete(id, &mut Prompt { input, out }).await,
            _ => Outcome::Skipped,
        }
    }

    async fn settle(&mut self, outcome: Outcome) -> Result<(), CliError> {
        match outcome {
            Outcome::Done => self.render()?,
            Outcome::Skipped => writeln!(self.out, "Nothing to do.")?,
            Outcome::Declined => writeln!(self.out, "Cancelled.")?,
            Outcome::Redirect(route) => self.navigate(route).await?,
            Outcome::Invalid(e) => writeln!(self.out, "{e}")?,
            Outcome::Failed(message) => writeln!(self.out, "Error: {message}")?,
        }
        self.acknowledge_notice()
    }

    /// Show an admin notice; error notices wait for Enter.
    fn acknowledge_notice(&mut self) -> Result<(), CliError> {
        let Page::Admin(view) = &mut self.page else {
            return Ok(());
        };
        match view.take_notice() {
            Some(Notice::Success(message)) => writeln!(self.out, "{message}")?,
            Some(Notice::Error(_)) => {
                self.prompt().ask("Press Enter to continue")?;
            }
            None => {}
        }
        Ok(())
    }

    async fn login(&mut self) -> Result<Flow, CliError> {
        let next = match &self.page {
            Page::Login { next } => *next,
            Page::Movie(view) => Some(view.movie_id()),
            _ => None,
        };
        let mut prompt = self.prompt();
        let Some(username) = prompt.ask("Username or email")? else {
            return Ok(Flow::Quit);
        };
        let Some(password) = prompt.ask("Password")? else {
            return Ok(Flow::Quit);
        };

        match self
            .app
            .auth()
            .login(&username, &SecretString::from(password))
            .await
        {
            Ok(identity) => {
                writeln!(self.out, "Welcome, {}!", identity.username)?;
                self.navigate(after_login(next)).await?;
            }
            Err(e) => writeln!(self.out, "{e}")?,
        }
        Ok(Flow::Continue)
    }

    async fn signup(&mut self) -> Result<Flow, CliError> {
        let mut prompt = self.prompt();
        let Some(username) = prompt.ask("Username")? else {
            return Ok(Flow::Quit);
        };
        let Some(email) = prompt.ask("Email")? else {
            return Ok(Flow::Quit);
        };
        let Some(password) = prompt.ask("Password")? else {
            return Ok(Flow::Quit);
        };

        match self
            .app
            .auth()
            .signup(&username, &email, &SecretString::from(password))
            .await
        {
            Ok(()) => {
                writeln!(self.out, "Account created. Please log in.")?;
                self.navigate(Route::Login { next: None }).await?;
            }
            Err(e) => writeln!(self.out, "{e}")?,
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use mymovielist_client::ClientConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn backend() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"authenticated": false})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/home"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "top_rated": [{"movieId": 1, "title": "Inception", "voteAverage": 8.4, "releaseYear": 2010}],
                "random": [],
                "trending": [],
                "popular": []
            })))
            .mount(&server)
            .await;
        server
    }

    fn app(server: &MockServer) -> AppState {
        let url = format!("{}/api", server.uri()).parse().expect("url");
        AppState::new(ClientConfig::new(url)).expect("app")
    }

    async fn session(server: &MockServer, start: &str, input: &str) -> String {
        let mut out = Vec::new();
        {
            let mut shell = Shell::new(app(server), input.as_bytes(), &mut out);
            shell.run(Route::parse(start)).await.expect("shell");
        }
        String::from_utf8(out).expect("utf8")
    }

    #[tokio::test]
    async fn test_anonymous_admin_lands_home() {
        let server = backend().await;
        let output = session(&server, "/admin", "quit\n").await;
        assert!(output.contains("Top Rated Movies"));
        assert!(output.contains("#1 [IN] Inception (2010)"));
        assert!(!output.contains("Admin Dashboard"));
    }

    #[tokio::test]
    async fn test_tab_switch_reuses_feed() {
        let server = backend().await;
        let output = session(&server, "/", "/random\n/trending\nquit\n").await;
        assert!(output.contains("Random Selection"));
        assert!(output.contains("Trending Now"));
        let home_calls = server
            .received_requests()
            .await
            .expect("recording")
            .iter()
            .filter(|r| r.url.path() == "/api/home")
            .count();
        assert_eq!(home_calls, 1);
    }

    #[tokio::test]
    async fn test_anonymous_rate_prompts_login() {
        let server = backend().await;
        Mock::given(method("GET"))
            .and(path("/api/movie/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "movie": {"movieId": 1, "title": "Inception"},
                "user_rating_average": 0,
                "user_rating": null,
                "comments": []
            })))
            .mount(&server)
            .await;

        let output = session(&server, "/movie/1", "rate 5\nquit\n").await;
        assert!(output.contains("No comments yet. Be the first to comment!"));
        assert!(output.contains("You will return to /movie/1 afterwards."));
        assert!(output.contains("/login?next=1> "));
    }

    #[tokio::test]
    async fn test_unknown_commands_and_wrong_page() {
        let server = backend().await;
        let output = session(&server, "/", "frobnicate\nnext\n/nope\nquit\n").await;
        assert!(output.contains("Unknown command `frobnicate`"));
        assert!(output.contains("Error: That command only works on the admin dashboard."));
        assert!(output.contains("Page not found: /nope"));
    }

    #[tokio::test]
    async fn test_failed_login_stays_put() {
        let server = backend().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("query", "dune"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let output = session(&server, "/login", "login\nana\nwrong\nsearch dune\n").await;
        assert!(output.contains("Invalid credentials"));
        assert!(output.contains("Search results for \"dune\""));
        assert!(output.contains("Not logged in"));
    }
}
