//! The line-oriented command protocol.
//!
//! One command per input line, whitespace-tokenized. Arity against the tree
//! dimension is checked at execution time, since the dimension is only known
//! once a dataset is loaded.

use crate::coord::IndexCoord;

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<C: IndexCoord> {
    /// `LOAD <path>` — load a dataset, once per session.
    Load(String),
    /// `NN <k ints>` — nearest-neighbor query.
    Nearest(Vec<C>),
    /// `RS <2k ints>` — range query, bounds flattened as
    /// `min0 max0 min1 max1 ...`.
    Range(Vec<C>),
    /// `DEBUG` — dump every stored point to the diagnostic stream.
    Debug,
    /// `EXIT` — release everything and terminate cleanly.
    Exit,
}

/// The outcome of tokenizing one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine<C: IndexCoord> {
    /// A well-formed command.
    Command(Command<C>),
    /// Nothing but whitespace; skipped without comment.
    Empty,
    /// An unrecognized keyword or malformed arguments; the loop warns and
    /// continues.
    Invalid(String),
}

/// Tokenize one line of the protocol.
pub fn parse_line<C: IndexCoord>(line: &str) -> ParsedLine<C> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (keyword, args) = match tokens.split_first() {
        Some((keyword, args)) => (*keyword, args),
        None => return ParsedLine::Empty,
    };

    match keyword {
        "LOAD" if args.len() == 1 => ParsedLine::Command(Command::Load(args[0].to_string())),
        "NN" if !args.is_empty() => match parse_ints(args) {
            Some(coords) => ParsedLine::Command(Command::Nearest(coords)),
            None => ParsedLine::Invalid(keyword.to_string()),
        },
        "RS" if !args.is_empty() && args.len() % 2 == 0 => match parse_ints(args) {
            Some(bounds) => ParsedLine::Command(Command::Range(bounds)),
            None => ParsedLine::Invalid(keyword.to_string()),
        },
        "DEBUG" if args.is_empty() => ParsedLine::Command(Command::Debug),
        "EXIT" if args.is_empty() => ParsedLine::Command(Command::Exit),
        other => ParsedLine::Invalid(other.to_string()),
    }
}

fn parse_ints<C: IndexCoord>(tokens: &[&str]) -> Option<Vec<C>> {
    tokens.iter().map(|t| t.parse().ok()).collect()
}
