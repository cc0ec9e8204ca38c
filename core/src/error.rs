//! Schema construction errors.
//!
//! Every [`SchemaError`] is fatal: a record type that produces one cannot be
//! turned into a parser at all.

use thiserror::Error;

/// Invalid schema detected while building from a record.
///
/// Each variant names the offending field by its dotted declaration path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A positional field was annotated `required(false)`.
    #[error("positional argument {0} cannot be optional")]
    OptionalPositional(String),
    /// A positional field carries a default value.
    #[error("positional argument {0} cannot have a default value")]
    PositionalDefault(String),
    /// A non-positional field is both required and defaulted.
    #[error("required argument {0} cannot have a default value")]
    RequiredWithDefault(String),
    /// Two fields derive the same token.
    #[error("duplicate token --{token}: {first} and {second}")]
    DuplicateToken {
        /// The colliding token.
        token: String,
        /// Field that registered the token first.
        first: String,
        /// Field that tried to register it again.
        second: String,
    },
    /// Two fields derive the same metavar.
    #[error("duplicate metavar {metavar}: {first} and {second}")]
    DuplicateMetavar {
        /// The colliding metavar.
        metavar: String,
        /// Field that registered the metavar first.
        first: String,
        /// Field that tried to register it again.
        second: String,
    },
    /// A default literal does not parse as the field kind.
    #[error("invalid default {value:?} for {field}: expected {expected}")]
    InvalidDefault {
        /// Field path.
        field: String,
        /// The literal as annotated.
        value: String,
        /// Description of the expected value.
        expected: &'static str,
    },
    /// The default value is not one of the permitted choices.
    #[error("default {value:?} for {field} is not one of its choices")]
    DefaultNotInChoices {
        /// Field path.
        field: String,
        /// The offending default.
        value: String,
    },
    /// Choices were annotated on a field that does not hold strings.
    #[error("choices are only supported on string fields, not on {0}")]
    ChoicesOnNonString(String),
    /// A list positional is followed by another positional.
    #[error("list positional {list} must be the last positional, found {next} after it")]
    ListPositionalNotLast {
        /// The list positional.
        list: String,
        /// The positional declared after it.
        next: String,
    },
}

/// Convenience alias for results with [`SchemaError`].
pub type Result<T> = std::result::Result<T, SchemaError>;
