// SPDX-License-Identifier: MIT

//! Timestamp parsing and formatting
//!
//! Accepts strings in the layout `YYYY-MM-DDTHH:mm:ss[.fff](Z|+hh:mm)`:
//! - "2020-07-01T00:00:00.000Z"
//! - "2020-07-01T00:00:00Z"
//! - "2020-07-01T02:00:00.000+02:00"
//!
//! The separator must be an uppercase `T`, the zone an uppercase `Z` or a
//! numeric offset, and second 60 is rejected. Offsets are normalised to UTC.
//! Formatting always uses millisecond precision with a `Z` designator.

use crate::error::TimestampError;
use chrono::{DateTime, SecondsFormat, Utc};

const LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Length of `YYYY-MM-DDTHH:mm:ss`
const DATE_TIME_LEN: usize = 19;

/// Parse a timestamp into a UTC instant
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, TimestampError> {
    let date_time = s
        .as_bytes()
        .get(..DATE_TIME_LEN)
        .ok_or(TimestampError::Shape)?;
    if !has_date_time_shape(date_time) {
        return Err(TimestampError::Shape);
    }
    if &date_time[17..] == b"60" {
        return Err(TimestampError::LeapSecond);
    }

    let parsed = match s.strip_suffix('Z') {
        Some(local) => DateTime::parse_from_str(&format!("{}+00:00", local), LAYOUT)?,
        None => DateTime::parse_from_str(s, LAYOUT)?,
    };
    Ok(parsed.with_timezone(&Utc))
}

/// Format an instant as `YYYY-MM-DDTHH:mm:ss.sssZ`
pub fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn has_date_time_shape(bytes: &[u8]) -> bool {
    bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b'T',
        13 | 16 => *b == b':',
        _ => b.is_ascii_digit(),
    })
}
