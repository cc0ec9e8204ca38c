//! Parse-time errors shared by every front end.

use thiserror::Error;

/// Errors produced while parsing tokens, config text or documents into a
/// record.
///
/// Except for [`Io`](ParseError::Io), every variant is detected before the
/// record is written, so a failed parse leaves the record untouched.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A `--flag` that matches no optional argument.
    #[error("unknown argument {argument}{}", suggestion_hint(.suggestion))]
    UnknownArgument {
        /// The token as supplied.
        argument: String,
        /// Closest known flag, if any is close enough.
        suggestion: Option<String>,
    },

    /// Required arguments that received no value, in schema order.
    #[error("missing required arguments: {}", .0.join(", "))]
    MissingArgument(Vec<String>),

    /// A value-taking flag was the last token.
    #[error("argument {0} expects a value")]
    MissingValue(String),

    /// Positional tokens left over after every positional was filled.
    #[error("too many arguments: {}", .0.join(" "))]
    TooManyArguments(Vec<String>),

    /// A value outside the argument's choice set.
    #[error("invalid choice {value:?} for {argument}, {}", choice_hint(.choices, .suggestion))]
    InvalidChoice {
        /// Argument display name.
        argument: String,
        /// The rejected value.
        value: String,
        /// Permitted values.
        choices: Vec<String>,
        /// Closest permitted value, if any is close enough.
        suggestion: Option<String>,
    },

    /// A value that cannot be coerced into the field kind.
    #[error("invalid value {value} for {argument}: expected {expected}")]
    TypeMismatch {
        /// Argument display name.
        argument: String,
        /// The offending value, as text.
        value: String,
        /// Description of the expected value.
        expected: &'static str,
    },

    /// A config line that is neither blank, a comment, nor `key = value`.
    #[error("config line {line} is not a key = value pair: {content:?}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The trimmed line.
        content: String,
    },

    /// Reading the config stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `--help` was given; the caller should print help and stop.
    #[error("help requested")]
    HelpRequested,
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(", did you mean {s}?"),
        None => String::new(),
    }
}

fn choice_hint(choices: &[String], suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!("did you mean {s:?}?"),
        None => format!("accepts {}", choices.join("|")),
    }
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
