// SPDX-License-Identifier: MIT

//! Typed error handling for timecheck-rs
//!
//! Each stage of the pipeline (parse, check, evaluate) has its own error
//! enum. `TimeCheckError` wraps them for callers that drive the whole
//! pipeline, such as `Env::compile` or the binary.

use thiserror::Error;

/// Top-level error type for timecheck-rs
#[derive(Debug, Error)]
pub enum TimeCheckError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Check(#[from] CheckError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    /// Configuration errors (unreadable declaration file, bad `--now`)
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure to turn source text into an expression tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at position {pos}: {message}")]
pub struct ParseError {
    pub message: String,
    pub pos: usize,
}

/// Failure to validate an expression against the declared environment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// Identifier or select path with no declaration
    #[error("undeclared reference to '{0}'")]
    UndeclaredReference(String),

    /// Call to a function the environment does not know
    #[error("undeclared function '{0}'")]
    UndeclaredFunction(String),

    /// Known function applied to arguments of the wrong types or count
    #[error("found no matching overload for '{function}' applied to ({args})")]
    NoMatchingOverload { function: String, args: String },

    /// Field selection on something other than a qualified name
    #[error("unsupported field selection '{0}'")]
    UnsupportedSelect(String),
}

/// Failure while deciding a time comparison
#[derive(Debug, Error)]
pub enum EvalError {
    /// Call function is not one of `<`, `>`, `<=`, `>=`
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// Subtree is neither `request.time` nor `timestamp(<string>)`
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// Comparison applied to the wrong number of arguments
    #[error("operator '{function}' expects {expected} arguments, got {actual}")]
    InvalidArity {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// String inside `timestamp(...)` does not match the timestamp layout
    #[error("invalid timestamp '{input}': {source}")]
    TimestampParse {
        input: String,
        #[source]
        source: TimestampError,
    },
}

/// Failure to read a `YYYY-MM-DDTHH:mm:ss[.fff](Z|+hh:mm)` timestamp
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// Date and time part is not `YYYY-MM-DDTHH:mm:ss`
    #[error("expected YYYY-MM-DDTHH:mm:ss")]
    Shape,

    /// Second 60 has no representation in the layout
    #[error("leap seconds are not supported")]
    LeapSecond,

    #[error(transparent)]
    Layout(#[from] chrono::ParseError),
}

impl ParseError {
    pub fn new(message: impl Into<String>, pos: usize) -> Self {
        Self {
            message: message.into(),
            pos,
        }
    }
}

impl TimeCheckError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
