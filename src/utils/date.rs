//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct for page dates, plus the
//! date inference used for slugs and permalinks.
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTimeUtc::parse("2024-06-15").unwrap();
//! let dt = DateTimeUtc::parse("2024-06-15T14:30:45Z").unwrap();
//!
//! assert_eq!(split_date_prefix("2024-06-15-hello"), Some(("2024-06-15", "hello")));
//! ```

use std::fmt;
use std::sync::LazyLock;

use anyhow::{Result, bail};
use regex::Regex;

use crate::page::Frontmatter;

/// `yyyy-MM-dd-rest` or `yyyy-MM-rest` file names.
static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4}-[0-9]{2}(?:-[0-9]{2})?)-(.*)$").unwrap());

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse a front matter or file name date.
    ///
    /// Accepts `YYYY-MM`, `YYYY-MM-DD`, and a date followed by `T` or a space
    /// and `HH:MM[:SS[.fff]]` with an optional `Z` / `±HH:MM` suffix (the
    /// offset is dropped). Month and day may be written with one digit.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (date, time) = match s.find(['T', ' ']) {
            Some(idx) => (&s[..idx], Some(s[idx + 1..].trim())),
            None => (s, None),
        };

        let mut parts = date.split('-');
        let year = parse_u16(parts.next()?.as_bytes())?;
        let month = parse_u8(parts.next()?.as_bytes())?;
        let day = match parts.next() {
            Some(day) => parse_u8(day.as_bytes())?,
            None => 1,
        };
        if parts.next().is_some() {
            return None;
        }

        let (hour, minute, second) = match time {
            Some(time) => parse_time(time)?,
            None => (0, 0, 0),
        };

        let dt = Self::new(year, month, day, hour, minute, second);
        dt.validate().ok()?;
        Some(dt)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    /// Whether a time of day was set.
    #[inline]
    pub const fn has_time(&self) -> bool {
        self.hour != 0 || self.minute != 0 || self.second != 0
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as RFC 3339 (ISO 8601).
    ///
    /// Returns: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// `YYYY-MM-DD` for midnight, RFC 3339 otherwise.
impl fmt::Display for DateTimeUtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_time() {
            f.write_str(&self.to_rfc3339())
        } else {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

/// Split `2023-05-01-my-post` into `("2023-05-01", "my-post")`.
pub fn split_date_prefix(filename: &str) -> Option<(&str, &str)> {
    let caps = DATE_PREFIX.captures(filename)?;
    let date = caps.get(1)?.as_str();
    let rest = caps.get(2)?.as_str();
    Some((date, rest))
}

/// File name without its date prefix, or unchanged when it has none.
pub fn strip_date_prefix(filename: &str) -> &str {
    split_date_prefix(filename).map_or(filename, |(_, rest)| rest)
}

/// Infer a page date from front matter `date`, else from the file name prefix.
///
/// An unparseable front matter date falls through to the file name. The
/// result is normalized through [`DateTimeUtc`]'s `Display`.
pub fn infer_date(frontmatter: &Frontmatter, filename: &str) -> Option<String> {
    let from_frontmatter = frontmatter
        .get("date")
        .and_then(|value| value.as_str())
        .and_then(DateTimeUtc::parse);

    from_frontmatter
        .or_else(|| split_date_prefix(filename).and_then(|(date, _)| DateTimeUtc::parse(date)))
        .map(|dt| dt.to_string())
}

/// Parse `HH:MM[:SS[.fff]][Z|±HH:MM]`.
fn parse_time(time: &str) -> Option<(u8, u8, u8)> {
    let time = time.trim_end_matches('Z');
    let time = match time.find(['+', '-']) {
        Some(idx) => &time[..idx],
        None => time,
    };
    let time = time.split('.').next()?;

    let mut parts = time.split(':');
    let hour = parse_u8(parts.next()?.as_bytes())?;
    let minute = parse_u8(parts.next()?.as_bytes())?;
    let second = match parts.next() {
        Some(second) => parse_u8(second.as_bytes())?,
        None => 0,
    };
    Some((hour, minute, second))
}

/// Parse 1- or 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.is_empty() || bytes.len() > 2 {
        return None;
    }
    let mut result = 0u8;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + d;
    }
    Some(result)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}
