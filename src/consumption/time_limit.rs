//! # Time Limits
//!
//! Parses the `--time-limit` argument into an absolute deadline.
//!
//! Accepted forms:
//! - an RFC 3339 timestamp: `2026-10-17T12:00:00Z`
//! - `now`
//! - a relative duration, optionally prefixed with `+` or `now +`:
//!   `30s`, `+5min`, `now + 1h 30m`
//! - a clock-style duration `H:M:S` or `M:S`: `0:0:30` is thirty seconds

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeLimitError {
    #[error("time limit is empty")]
    Empty,

    #[error("\"{input}\" is not a valid time limit: {reason}")]
    Unrecognized { input: String, reason: String },

    #[error("\"{input}\" is too far in the future")]
    OutOfRange { input: String },
}

impl TimeLimitError {
    fn unrecognized(input: &str, reason: impl Into<String>) -> Self {
        Self::Unrecognized {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Resolve `input` against `now`
pub fn parse_time_limit(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, TimeLimitError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeLimitError::Empty);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let relative = match strip_now(trimmed) {
        Some("") => return Ok(now),
        Some(rest) => rest
            .strip_prefix('+')
            .ok_or_else(|| TimeLimitError::unrecognized(input, "expected '+' after 'now'"))?,
        None => trimmed.strip_prefix('+').unwrap_or(trimmed),
    }
    .trim();

    let duration = if relative.contains(':') {
        parse_clock(relative).ok_or_else(|| {
            TimeLimitError::unrecognized(input, "expected H:M:S or M:S")
        })?
    } else {
        humantime::parse_duration(relative)
            .map_err(|e| TimeLimitError::unrecognized(input, e.to_string()))?
    };

    Duration::from_std(duration)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| TimeLimitError::OutOfRange {
            input: input.to_string(),
        })
}

/// Remainder after a case-insensitive leading `now`
fn strip_now(input: &str) -> Option<&str> {
    let head = input.get(..3)?;
    head.eq_ignore_ascii_case("now")
        .then(|| input[3..].trim_start())
}

fn parse_clock(input: &str) -> Option<std::time::Duration> {
    let parts = input
        .split(':')
        .map(|part| part.trim().parse::<u64>().ok())
        .collect::<Option<Vec<u64>>>()?;

    let seconds = match parts.as_slice() {
        [minutes, seconds] => minutes.checked_mul(60)?.checked_add(*seconds)?,
        [hours, minutes, seconds] => hours
            .checked_mul(3600)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(*seconds)?,
        _ => return None,
    };
    Some(std::time::Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_durations() {
        assert_eq!(parse_time_limit("30s", now()).unwrap(), now() + Duration::seconds(30));
        assert_eq!(parse_time_limit("+5min", now()).unwrap(), now() + Duration::minutes(5));
        assert_eq!(parse_time_limit("now + 1h", now()).unwrap(), now() + Duration::hours(1));
        assert_eq!(parse_time_limit("  NOW+2m  ", now()).unwrap(), now() + Duration::minutes(2));
    }

    #[test]
    fn test_now_and_absolute() {
        assert_eq!(parse_time_limit("now", now()).unwrap(), now());
        assert_eq!(
            parse_time_limit("2026-10-17T13:00:00Z", now()).unwrap(),
            now() + Duration::hours(1)
        );
        assert_eq!(
            parse_time_limit("2026-10-17T14:00:00+02:00", now()).unwrap(),
            now()
        );
    }

    #[test]
    fn test_clock_style_is_a_duration() {
        assert_eq!(parse_time_limit("0:0:30", now()).unwrap(), now() + Duration::seconds(30));
        assert_eq!(parse_time_limit("2:30", now()).unwrap(), now() + Duration::seconds(150));
        assert_eq!(parse_time_limit("+1:00:00", now()).unwrap(), now() + Duration::hours(1));
    }

    #[test]
    fn test_rejects_garbage() {
        let err = parse_time_limit("invalid", now()).unwrap_err();
        assert!(matches!(err, TimeLimitError::Unrecognized { ref input, .. } if input == "invalid"));
        assert!(err.to_string().contains("\"invalid\""));

        assert_eq!(parse_time_limit("   ", now()).unwrap_err(), TimeLimitError::Empty);
        assert!(parse_time_limit("nowhere", now()).is_err());
        assert!(parse_time_limit("1:2:3:4", now()).is_err());
        assert!(parse_time_limit("a:30", now()).is_err());
        assert!(parse_time_limit("-5m", now()).is_err());
    }

    #[test]
    fn test_out_of_range() {
        let err = parse_time_limit("10000000000000000s", now()).unwrap_err();
        assert!(matches!(err, TimeLimitError::OutOfRange { .. }));
    }
}
