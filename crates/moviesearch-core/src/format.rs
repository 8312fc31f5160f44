//! Display formatting shared by every renderer.

use chrono::{Datelike, NaiveDate};

/// Label shown when a release date is missing.
pub const UNKNOWN_YEAR: &str = "Unknown year";

/// Formats a rating with one decimal place (`8.433` -> `"8.4"`).
///
/// Halves round away from zero (`8.25` -> `"8.3"`).
#[must_use]
pub fn format_rating(rating: f64) -> String {
    let rounded = (rating * 10.0).round() / 10.0;
    format!("{rounded:.1}")
}

/// Formats a vote count as `"{n} votes"`, without separators.
#[must_use]
pub fn format_vote_count(count: u64) -> String {
    format!("{count} votes")
}

/// Extracts the calendar year from an ISO date (`"1999-10-15"` -> `"1999"`).
///
/// Empty input yields [`UNKNOWN_YEAR`]. Input that is not a full date
/// falls back to a leading four-digit year when one is present.
#[must_use]
pub fn format_year(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        return String::from(UNKNOWN_YEAR);
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return parsed.year().to_string();
    }
    match date.get(..4) {
        Some(prefix) if prefix.bytes().all(|b| b.is_ascii_digit()) => String::from(prefix),
        _ => String::from(UNKNOWN_YEAR),
    }
}

/// Formats a dollar amount with thousands separators, only when > 0.
#[must_use]
pub fn format_currency(amount: u64) -> Option<String> {
    (amount > 0).then(|| format!("${}", group_thousands(amount)))
}

/// Formats a runtime as `"{n} minutes"`, only when known and > 0.
#[must_use]
pub fn format_runtime(minutes: Option<u32>) -> Option<String> {
    minutes
        .filter(|m| *m > 0)
        .map(|m| format!("{m} minutes"))
}

/// Inserts `,` every three digits from the right.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len.saturating_add(len / 3));
    for (i, ch) in digits.chars().enumerate() {
        let remaining = len.saturating_sub(i);
        if i > 0 && remaining % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rating_rounds_to_one_decimal() {
        assert_eq!(format_rating(8.433), "8.4");
        assert_eq!(format_rating(0.0), "0.0");
        assert_eq!(format_rating(7.89), "7.9");
        assert_eq!(format_rating(10.0), "10.0");
    }

    #[test]
    fn test_format_rating_rounds_halves_up() {
        assert_eq!(format_rating(8.25), "8.3");
        assert_eq!(format_rating(6.75), "6.8");
        assert_eq!(format_rating(2.25), "2.3");
        assert_eq!(format_rating(0.05), "0.1");
    }

    #[test]
    fn test_format_vote_count_has_no_separator() {
        assert_eq!(format_vote_count(26_280), "26280 votes");
        assert_eq!(format_vote_count(0), "0 votes");
    }

    #[test]
    fn test_format_year() {
        assert_eq!(format_year("1999-10-15"), "1999");
        assert_eq!(format_year(""), "Unknown year");
        assert_eq!(format_year("   "), "Unknown year");
    }

    #[test]
    fn test_format_year_partial_dates() {
        assert_eq!(format_year("2024"), "2024");
        assert_eq!(format_year("2024-13-40"), "2024");
        assert_eq!(format_year("soon"), "Unknown year");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(63_000_000).as_deref(), Some("$63,000,000"));
        assert_eq!(format_currency(100_853_753).as_deref(), Some("$100,853,753"));
        assert_eq!(format_currency(999).as_deref(), Some("$999"));
        assert_eq!(format_currency(1_000).as_deref(), Some("$1,000"));
        assert_eq!(format_currency(0), None);
    }

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(Some(139)).as_deref(), Some("139 minutes"));
        assert_eq!(format_runtime(Some(0)), None);
        assert_eq!(format_runtime(None), None);
    }
}
