//! Configurable timestamp parsing.
//!
//! Accepts either a chrono strftime pattern (`%Y-%m-%d %H:%M:%S`) or the
//! moment-style token pattern common in editor log tooling
//! (`YYYY-MM-DD HH:mm:ss,SSS`). Parsing is best effort: text that does not
//! fit yields `None` instead of an error.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

// Longer tokens must precede their own prefixes.
const MOMENT_TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%m"),
    ("DD", "%d"),
    ("D", "%d"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("HH", "%H"),
    ("H", "%H"),
    ("hh", "%I"),
    ("h", "%I"),
    ("mm", "%M"),
    ("m", "%M"),
    ("ss", "%S"),
    ("s", "%S"),
    ("SSSSSSSSS", "%9f"),
    ("SSSSSS", "%6f"),
    ("SSS", "%3f"),
    ("A", "%p"),
    ("a", "%p"),
    // `Z`, `+hh:mm`, `+hhmm` and `+hh` all parse
    ("ZZ", "%#z"),
    ("Z", "%#z"),
    ("X", "%s"),
];

// Trailing fractional-second items that may be absent from the input.
const OPTIONAL_FRACTIONS: &[&str] = &[
    ",%3f", ".%3f", ",%6f", ".%6f", ",%9f", ".%9f", "%.3f", "%.6f", "%.9f", "%.f",
];

// Offset items that may follow an optional fraction.
const TRAILING_OFFSETS: &[&str] = &["%#z", "%:z", "%z"];

// Items that pin down the year on their own.
const YEAR_ITEMS: &[&str] = &["%Y", "%y", "%G", "%g", "%C", "%s", "%F", "%D", "%x", "%c", "%+"];

/// A compiled time pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat {
    source: String,
    /// Candidate strftime patterns, tried in order.
    patterns: Vec<String>,
    has_year: bool,
    reference_year: i32,
}

impl TimeFormat {
    pub fn new(pattern: &str) -> Self {
        let strftime = if pattern.contains('%') {
            pattern.to_string()
        } else {
            translate_moment(pattern)
        };

        let (body, offset) = TRAILING_OFFSETS
            .iter()
            .find_map(|offset| strftime.strip_suffix(offset).map(|body| (body, *offset)))
            .unwrap_or((strftime.as_str(), ""));

        let mut patterns = vec![strftime.clone()];
        if let Some(stripped) = OPTIONAL_FRACTIONS
            .iter()
            .find_map(|suffix| body.strip_suffix(suffix))
            .filter(|s| !s.is_empty())
        {
            patterns.push(format!("{stripped}{offset}"));
        }

        let has_year = YEAR_ITEMS.iter().any(|item| strftime.contains(item));

        Self {
            source: pattern.to_string(),
            patterns,
            has_year,
            reference_year: Utc::now().year(),
        }
    }

    /// Year assumed for patterns that carry none (syslog style `%b %d`).
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    /// The pattern as configured.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The primary strftime pattern.
    pub fn strftime(&self) -> &str {
        &self.patterns[0]
    }

    /// Parse `text` to milliseconds since the Unix epoch.
    ///
    /// Naive values are taken as UTC; date-only values as midnight; time-only
    /// values as that time on 1970-01-01.
    pub fn parse_millis(&self, text: &str) -> Option<i64> {
        let text = text.trim();
        self.patterns.iter().find_map(|pattern| {
            let mut candidates = vec![(text.to_string(), pattern.clone())];
            if !self.has_year {
                candidates.push((
                    format!("{} {text}", self.reference_year),
                    format!("%Y {pattern}"),
                ));
            }
            candidates
                .iter()
                .find_map(|(t, p)| parse_date_time(t, p))
                .or_else(|| candidates.iter().find_map(|(t, p)| parse_date(t, p)))
                .or_else(|| parse_time(text, pattern))
        })
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TIME_FORMAT)
    }
}

fn parse_date_time(text: &str, pattern: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_str(text, pattern) {
        return Some(dt.timestamp_millis());
    }
    NaiveDateTime::parse_from_str(text, pattern)
        .ok()
        .map(|ndt| ndt.and_utc().timestamp_millis())
}

fn parse_date(text: &str, pattern: &str) -> Option<i64> {
    NaiveDate::parse_from_str(text, pattern)
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|ndt| ndt.and_utc().timestamp_millis())
}

fn parse_time(text: &str, pattern: &str) -> Option<i64> {
    let time = NaiveTime::parse_from_str(text, pattern).ok()?;
    let millis = i64::from(time.nanosecond() / 1_000_000);
    Some(i64::from(time.num_seconds_from_midnight()) * 1000 + millis)
}

/// Translate a moment-style pattern into strftime.
pub fn translate_moment(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        // [literal text]
        if c == '[' {
            if let Some(end) = rest.find(']') {
                push_literal(&mut out, &rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }
        if let Some((token, item)) = MOMENT_TOKENS.iter().find(|(t, _)| rest.starts_with(t)) {
            out.push_str(item);
            rest = &rest[token.len()..];
            continue;
        }
        push_literal(&mut out, &rest[..c.len_utf8()]);
        rest = &rest[c.len_utf8()..];
    }
    out
}

fn push_literal(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}
