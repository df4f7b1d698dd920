//! Shell input parsing.
//!
//! A line is either a navigable path (anything starting with `/`) or a
//! command word followed by its argument.

use std::str::FromStr;

use mymovielist_client::routes::Route;
use mymovielist_core::{CommentId, MovieField, MovieId, Rating};
use thiserror::Error;

/// Errors for lines the shell cannot act on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command `{0}`. Type `help` for a list.")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("{0}")]
    InvalidArgument(String),
}

/// One line of shell input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Blank line.
    Nothing,
    Go(Route),
    Refresh,
    Help,
    Quit,
    Login,
    Signup,
    Logout,
    Rate(Rating),
    Comment(String),
    Uncomment(CommentId),
    Next,
    Prev,
    /// Raw page entry; the admin view validates it.
    Page(String),
    Filter(String),
    Clear,
    Edit(MovieId),
    Set(MovieField, String),
    Save,
    Cancel,
    New(MovieField, String),
    Create,
    Delete(MovieId),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.starts_with('/') {
            return Ok(Self::Go(Route::parse(line)));
        }
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        Ok(match word.to_ascii_lowercase().as_str() {
            "" => Self::Nothing,
            "refresh" => Self::Refresh,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "login" => Self::Login,
            "signup" => Self::Signup,
            "logout" => Self::Logout,
            "search" => Self::Go(Route::Search {
                query: rest.to_string(),
            }),
            "rate" => Self::Rate(
                required("rate", "a rating from 1 to 5", rest)?
                    .parse()
                    .map_err(|e| CommandError::InvalidArgument(format!("{e}")))?,
            ),
            "comment" => Self::Comment(required("comment", "some text", rest)?.to_string()),
            "uncomment" => Self::Uncomment(id("uncomment", "a comment id", rest)?),
            "next" => Self::Next,
            "prev" | "previous" => Self::Prev,
            "page" => Self::Page(required("page", "a page number", rest)?.to_string()),
            "filter" => Self::Filter(rest.to_string()),
            "clear" => Self::Clear,
            "edit" => Self::Edit(id("edit", "a movie id", rest)?),
            "set" => {
                let (field, value) = assignment("set", rest)?;
                Self::Set(field, value)
            }
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "new" => {
                let (field, value) = assignment("new", rest)?;
                Self::New(field, value)
            }
            "create" => Self::Create,
            "delete" => Self::Delete(id("delete", "a movie id", rest)?),
            _ => return Err(CommandError::Unknown(word.to_string())),
        })
    }
}

fn required<'a>(
    command: &'static str,
    expected: &'static str,
    rest: &'a str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, expected })
    } else {
        Ok(rest)
    }
}

fn id<T: FromStr>(command: &'static str, expected: &'static str, rest: &str) -> Result<T, CommandError> {
    required(command, expected, rest)?
        .parse()
        .map_err(|_| CommandError::InvalidArgument(format!("Not an id: {rest}")))
}

/// `FIELD=VALUE`; the value may be empty to clear the field.
fn assignment(command: &'static str, rest: &str) -> Result<(MovieField, String), CommandError> {
    let (field, value) = required(command, "FIELD=VALUE", rest)?
        .split_once('=')
        .ok_or(CommandError::MissingArgument {
            command,
            expected: "FIELD=VALUE",
        })?;
    let field = field
        .trim()
        .parse()
        .map_err(|e| CommandError::InvalidArgument(format!("{e}")))?;
    Ok((field, value.trim().to_string()))
}
