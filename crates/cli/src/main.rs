//! MyMovieList CLI - Terminal front end for the movie catalog.
//!
//! # Usage
//!
//! ```bash
//! # Interactive shell on the home page
//! mml
//!
//! # Interactive shell against another backend, starting on a movie
//! mml --api-url https://movies.example.com/api shell /movie/27205
//!
//! # Print one page and exit
//! mml open "/search?query=dune"
//! ```
//!
//! # Commands
//!
//! - `shell [PATH]` - Interactive shell (default)
//! - `open PATH` - Render one page and exit
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use mymovielist_client::config::parse_api_url;
use mymovielist_client::routes::Route;
use mymovielist_client::{AppState, ClientConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod command;
mod error;
mod render;
mod shell;

use shell::Shell;

#[derive(Parser)]
#[command(name = "mml")]
#[command(author, version, about = "MyMovieList terminal client")]
struct Cli {
    /// Backend API root, e.g. `http://127.0.0.1:5000/api`
    #[arg(long, env = "MML_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse interactively
    Shell {
        /// Page to start on
        #[arg(default_value = "/")]
        path: String,
    },
    /// Render one page and exit
    Open {
        /// Page path, e.g. `/movie/42`
        path: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mymovielist_cli=warn,mymovielist_client=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = parse_api_url(&url)?;
    }
    let app = AppState::new(config)?;
    let stdout = std::io::stdout();

    match cli.command.unwrap_or(Commands::Shell {
        path: "/".to_string(),
    }) {
        Commands::Shell { path } => {
            let mut shell = Shell::new(app, std::io::stdin().lock(), stdout.lock());
            shell.run(Route::parse(&path)).await?;
        }
        Commands::Open { path } => {
            let mut shell = Shell::new(app, std::io::empty(), stdout.lock());
            shell.open(Route::parse(&path)).await?;
        }
    }
    Ok(())
}
