// SPDX-License-Identifier: MIT

//! Time comparison evaluator
//!
//! Decides `request.time <op> timestamp("...")` style comparisons against a
//! supplied "now". `<=` and `>=` are the negations of `<` with swapped
//! operands, so equal instants satisfy both non-strict operators.

use super::time::parse_timestamp;
use crate::error::EvalError;
use crate::expr::{CompareOp, Expr, Literal, TIMESTAMP_FUNCTION};
use chrono::{DateTime, Utc};

/// Evaluate a comparison expression with `request.time` bound to `now`
pub fn evaluate(expr: &Expr, now: DateTime<Utc>) -> Result<bool, EvalError> {
    let Expr::Call { function, args } = expr else {
        return Err(EvalError::UnsupportedExpression(expr.to_string()));
    };

    let op = CompareOp::from_function(function)
        .ok_or_else(|| EvalError::UnknownOperator(function.clone()))?;

    let [lhs, rhs] = args.as_slice() else {
        return Err(EvalError::InvalidArity {
            function: function.clone(),
            expected: 2,
            actual: args.len(),
        });
    };

    log::debug!("Evaluating {} with now = {}", expr, now);

    match op {
        CompareOp::Lt => less_than(lhs, rhs, now),
        CompareOp::Gt => less_than(rhs, lhs, now),
        CompareOp::Lte => less_than_or_equal(lhs, rhs, now),
        CompareOp::Gte => less_than_or_equal(rhs, lhs, now),
    }
}

fn less_than(lhs: &Expr, rhs: &Expr, now: DateTime<Utc>) -> Result<bool, EvalError> {
    let lhs_time = resolve(lhs, now)?;
    let rhs_time = resolve(rhs, now)?;
    Ok(lhs_time < rhs_time)
}

fn less_than_or_equal(lhs: &Expr, rhs: &Expr, now: DateTime<Utc>) -> Result<bool, EvalError> {
    less_than(rhs, lhs, now).map(|lt| !lt)
}

/// Resolve one side of a comparison to an instant
fn resolve(expr: &Expr, now: DateTime<Utc>) -> Result<DateTime<Utc>, EvalError> {
    if is_request_time(expr) {
        return Ok(now);
    }

    let input = timestamp_argument(expr)
        .ok_or_else(|| EvalError::UnsupportedExpression(expr.to_string()))?;
    log::trace!("Parsing timestamp literal {:?}", input);

    parse_timestamp(input).map_err(|source| EvalError::TimestampParse {
        input: input.to_string(),
        source,
    })
}

/// Matches exactly `request.time`
fn is_request_time(expr: &Expr) -> bool {
    match expr {
        Expr::Select { operand, field } => {
            matches!(operand.as_ref(), Expr::Ident(name) if name == "request") && field == "time"
        }
        _ => false,
    }
}

/// The string literal inside a well-formed `timestamp("...")` call
fn timestamp_argument(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Call { function, args } if function == TIMESTAMP_FUNCTION => match args.as_slice() {
            [Expr::Literal(Literal::String(s))] => Some(s.as_str()),
            _ => None,
        },
        _ => None,
    }
}
