// SPDX-License-Identifier: MIT

//! Time comparison expressions
//!
//! Parses expressions such as
//! `request.time < timestamp("2020-07-01T00:00:00.000Z")`, checks them
//! against declared variables, and decides them for a given "now".

pub mod env;
pub mod error;
pub mod eval;
pub mod expr;

pub use env::{CheckedExpr, Env};
pub use error::{CheckError, EvalError, ParseError, TimeCheckError, TimestampError};
pub use eval::evaluate;
