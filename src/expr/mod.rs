// SPDX-License-Identifier: MIT

//! Expression trees for time comparisons
//!
//! This module provides the AST consumed by the evaluator and a parser for
//! the single-comparison form, e.g.
//! - `request.time < timestamp("2020-07-01T00:00:00.000Z")`

mod ast;
mod parser;

pub use ast::{CompareOp, Expr, Literal, TIMESTAMP_FUNCTION};
pub use parser::{parse, MAX_NESTING_DEPTH};
