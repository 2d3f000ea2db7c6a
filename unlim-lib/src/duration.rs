use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::num::ParseIntError;

#[derive(Debug, PartialEq)]
pub enum DurationParserError {
    InvalidFormat,
    OutOfRange,
    ParseError(ParseIntError),
}

impl fmt::Display for DurationParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationParserError::InvalidFormat => {
                write!(f, "expected a number followed by one of m, h, d, w")
            }
            DurationParserError::OutOfRange => write!(f, "duration is out of range"),
            DurationParserError::ParseError(e) => write!(f, "invalid number: {}", e),
        }
    }
}

impl std::error::Error for DurationParserError {}

impl From<ParseIntError> for DurationParserError {
    fn from(e: ParseIntError) -> Self {
        DurationParserError::ParseError(e)
    }
}

/// Parse snooze lengths such as "90m", "12h" or "3d".
pub fn parse_duration(time_str: &str) -> Result<Duration, DurationParserError> {
    let time_str = time_str.trim();
    let Some(unit) = time_str.chars().last() else {
        return Err(DurationParserError::InvalidFormat);
    };
    let num = time_str[..time_str.len() - unit.len_utf8()].parse::<i64>()?;

    let duration = match unit {
        'm' => Duration::try_minutes(num),
        'h' => Duration::try_hours(num),
        'd' => Duration::try_days(num),
        'w' => Duration::try_weeks(num),
        _ => return Err(DurationParserError::InvalidFormat),
    };
    duration.ok_or(DurationParserError::OutOfRange)
}

/// `now + duration`, or `OutOfRange` past the representable dates.
pub fn deadline_after(
    now: DateTime<Utc>,
    duration: Duration,
) -> Result<DateTime<Utc>, DurationParserError> {
    now.checked_add_signed(duration)
        .ok_or(DurationParserError::OutOfRange)
}
