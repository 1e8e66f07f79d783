// SPDX-License-Identifier: MIT

//! Evaluation of time comparisons
//!
//! - `evaluate` - decides a comparison with `request.time` bound to "now"
//! - `parse_timestamp` / `format_timestamp` - the RFC 3339 millisecond layout

mod evaluator;
mod time;

pub use evaluator::evaluate;
pub use time::{format_timestamp, parse_timestamp};
