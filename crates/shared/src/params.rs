//! Query parameter parsing and clamping helpers.
//!
//! Date bounds are strict: both must be present and parse as `YYYY-MM-DD`
//! or the request is rejected before any query runs. Numeric range
//! parameters (`limit`, `days`) are clamped into their allowed window
//! instead of being rejected.

use chrono::NaiveDate;
use thiserror::Error;

/// Allowed window and default for the campaign-performance `limit` param.
pub const LIMIT_MIN: i64 = 5;
pub const LIMIT_MAX: i64 = 50;
pub const LIMIT_DEFAULT: i64 = 20;

/// Allowed window and default for the trend `days` param.
pub const DAYS_MIN: i64 = 7;
pub const DAYS_MAX: i64 = 90;
pub const DAYS_DEFAULT: i64 = 30;

/// Error type for query parameter validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("date_from and date_to are required (format: YYYY-MM-DD)")]
    MissingDateRange,

    #[error("Invalid {field} value '{value}' (format: YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
}

/// Parses a required `date_from`/`date_to` pair.
pub fn parse_date_range(
    date_from: Option<&str>,
    date_to: Option<&str>,
) -> Result<(NaiveDate, NaiveDate), ParamError> {
    let (from_str, to_str) = match (date_from, date_to) {
        (Some(f), Some(t)) => (f, t),
        _ => return Err(ParamError::MissingDateRange),
    };

    let from = parse_date("date_from", from_str)?;
    let to = parse_date("date_to", to_str)?;
    Ok((from, to))
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ParamError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ParamError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Clamps the campaign-performance result limit into `[5, 50]`, default 20.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(LIMIT_DEFAULT).clamp(LIMIT_MIN, LIMIT_MAX)
}

/// Clamps the trailing trend window into `[7, 90]` days, default 30.
pub fn clamp_days(days: Option<i64>) -> i64 {
    days.unwrap_or(DAYS_DEFAULT).clamp(DAYS_MIN, DAYS_MAX)
}
