//! Command-line parser using nom
//!
//! One command per line:
//! ```text
//! PUT <key> <value...>
//! GET <key> | PEEK <key> | CONTAINS <key> | REMOVE <key>
//! SIZE | CLEAR | KEYS | OLDEST | STATS
//! ```
//!
//! Command names are case-insensitive. The value of `PUT` is the rest of the
//! line, so it may contain spaces. Blank lines and `#` comments are skipped.

use std::fmt;

use nom::{
    bytes::complete::take_till1,
    character::complete::space1,
    combinator::{eof, rest, value},
    sequence::{pair, preceded, terminated},
    IResult,
};

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Put { key: String, value: String },
    Get(String),
    Peek(String),
    Contains(String),
    Remove(String),
    Size,
    Clear,
    Keys,
    Oldest,
    Stats,
}

/// A line that could not be turned into a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl ParseError {
    fn arity(name: &str) -> Self {
        Self(format!(
            "wrong number of arguments for '{}' command",
            name.to_ascii_lowercase()
        ))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseError {}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

fn argument(input: &str) -> IResult<&str, &str> {
    preceded(space1, token)(input)
}

fn no_arguments(input: &str) -> IResult<&str, ()> {
    value((), eof)(input)
}

fn single_key(input: &str) -> IResult<&str, &str> {
    terminated(argument, eof)(input)
}

fn key_and_value(input: &str) -> IResult<&str, (&str, &str)> {
    pair(argument, preceded(space1, rest))(input)
}

/// Parse one line of input
///
/// # Returns
/// * `Ok(None)` - blank line or comment
/// * `Ok(Some(cmd))` - a well-formed command
/// * `Err(ParseError)` - unknown command or wrong number of arguments
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (args, name) = token(line).map_err(|_| ParseError("empty command".to_string()))?;
    let upper = name.to_ascii_uppercase();

    let command = match upper.as_str() {
        "PUT" => key_and_value(args).map(|(_, (key, value))| Command::Put {
            key: key.to_string(),
            value: value.to_string(),
        }),
        "GET" => single_key(args).map(|(_, key)| Command::Get(key.to_string())),
        "PEEK" => single_key(args).map(|(_, key)| Command::Peek(key.to_string())),
        "CONTAINS" => single_key(args).map(|(_, key)| Command::Contains(key.to_string())),
        "REMOVE" => single_key(args).map(|(_, key)| Command::Remove(key.to_string())),
        "SIZE" => no_arguments(args).map(|_| Command::Size),
        "CLEAR" => no_arguments(args).map(|_| Command::Clear),
        "KEYS" => no_arguments(args).map(|_| Command::Keys),
        "OLDEST" => no_arguments(args).map(|_| Command::Oldest),
        "STATS" => no_arguments(args).map(|_| Command::Stats),
        _ => return Err(ParseError(format!("unknown command '{}'", name))),
    };

    command.map(Some).map_err(|_| ParseError::arity(name))
}
