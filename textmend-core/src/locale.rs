//! German formatting primitives
//!
//! Date rendering, month/weekday name tables, and de-DE numeric grouping.
//! Month names are recognized in English and German (the feed may already
//! contain half-localized text); output is always German.

use crate::classify::DateGranularity;
use chrono::{Datelike, NaiveDate};

/// German month names, January first
pub const GERMAN_MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// German weekday names, Monday first (chrono's `num_days_from_monday` order)
pub const GERMAN_WEEKDAYS: [&str; 7] = [
    "Montag",
    "Dienstag",
    "Mittwoch",
    "Donnerstag",
    "Freitag",
    "Samstag",
    "Sonntag",
];

/// Resolve a month-name token to its 1-based month number
///
/// Accepts full English and German names plus the three-letter English
/// abbreviations, case-insensitively. Returns `None` for anything else;
/// callers treat that as a soft classification failure.
pub fn month_number(token: &str) -> Option<u32> {
    let lowered = token.to_lowercase();
    for (index, name) in ENGLISH_MONTHS.iter().enumerate() {
        let name = name.to_lowercase();
        if lowered == name || lowered == name[..3] {
            return Some(index as u32 + 1);
        }
    }
    for (index, name) in GERMAN_MONTHS.iter().enumerate() {
        if lowered == name.to_lowercase() {
            return Some(index as u32 + 1);
        }
    }
    None
}

/// Render a validated date at the requested granularity
///
/// Small omits the year; Large derives the full weekday name from the date
/// itself rather than trusting whatever abbreviation the input carried.
pub fn format_date(date: NaiveDate, granularity: DateGranularity) -> String {
    let month = GERMAN_MONTHS[date.month0() as usize];
    match granularity {
        DateGranularity::Small => format!("{:02}. {}", date.day(), month),
        DateGranularity::Medium => format!("{:02}. {} {}", date.day(), month, date.year()),
        DateGranularity::Large => {
            let weekday = GERMAN_WEEKDAYS[date.weekday().num_days_from_monday() as usize];
            format!("{}, {:02}. {} {}", weekday, date.day(), month, date.year())
        }
    }
}

/// A decimal literal split into its parts, kept as digit strings so that
/// reformatting never round-trips through floating point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalNumber {
    /// Whether the literal carried a leading minus sign
    pub negative: bool,
    /// Integer digits with grouping separators removed and leading zeros trimmed
    pub integer: String,
    /// Fraction digits, if a decimal comma was present
    pub fraction: Option<String>,
}

/// Parse a de-DE numeric literal: `.` groups the integer part in threes,
/// `,` separates the fraction
///
/// The whole input must be the literal; trailing or leading junk fails the
/// parse. Grouped forms are validated strictly (`1.234,56` parses, `12.34`
/// does not), so an already-grouped number survives a re-parse unchanged.
pub fn parse_decimal_de(text: &str) -> Option<DecimalNumber> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    if unsigned.is_empty() {
        return None;
    }

    let (integer_part, fraction) = match unsigned.split_once(',') {
        Some((integer, fraction)) => {
            if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            (integer, Some(fraction.to_string()))
        }
        None => (unsigned, None),
    };

    let integer = parse_grouped_integer(integer_part)?;
    Some(DecimalNumber {
        negative,
        integer,
        fraction,
    })
}

fn parse_grouped_integer(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let mut digits = String::new();
    if text.contains('.') {
        for (index, group) in text.split('.').enumerate() {
            let valid = if index == 0 {
                !group.is_empty() && group.len() <= 3
            } else {
                group.len() == 3
            };
            if !valid || !group.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            digits.push_str(group);
        }
    } else {
        if !text.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.push_str(text);
    }
    let trimmed = digits.trim_start_matches('0');
    Some(if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    })
}

/// Render a decimal with de-DE grouping
pub fn format_decimal_de(number: &DecimalNumber) -> String {
    let mut grouped = String::new();
    let digits: Vec<char> = number.integer.chars().collect();
    for (index, digit) in digits.iter().enumerate() {
        let remaining = digits.len() - index;
        if index > 0 && remaining % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit);
    }
    let mut out = String::new();
    if number.negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(fraction) = &number.fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_resolve_in_both_languages() {
        assert_eq!(month_number("June"), Some(6));
        assert_eq!(month_number("juni"), Some(6));
        assert_eq!(month_number("März"), Some(3));
        assert_eq!(month_number("Jun"), Some(6));
        assert_eq!(month_number("Wochen"), None);
        assert_eq!(month_number("Subscriptions"), None);
    }

    #[test]
    fn date_rendering_per_granularity() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(format_date(date, DateGranularity::Small), "03. Juni");
        assert_eq!(format_date(date, DateGranularity::Medium), "03. Juni 2024");
        // 2024-06-03 is a Monday
        assert_eq!(
            format_date(date, DateGranularity::Large),
            "Montag, 03. Juni 2024"
        );
    }

    #[test]
    fn parses_plain_and_grouped_literals() {
        assert_eq!(
            parse_decimal_de("19,99"),
            Some(DecimalNumber {
                negative: false,
                integer: "19".into(),
                fraction: Some("99".into()),
            })
        );
        assert_eq!(
            parse_decimal_de("1.234,56"),
            Some(DecimalNumber {
                negative: false,
                integer: "1234".into(),
                fraction: Some("56".into()),
            })
        );
        assert_eq!(
            parse_decimal_de("-1200"),
            Some(DecimalNumber {
                negative: true,
                integer: "1200".into(),
                fraction: None,
            })
        );
    }

    #[test]
    fn rejects_malformed_literals() {
        assert!(parse_decimal_de("").is_none());
        assert!(parse_decimal_de("abc").is_none());
        assert!(parse_decimal_de("12.34").is_none());
        assert!(parse_decimal_de("1,2,3").is_none());
        assert!(parse_decimal_de("19,").is_none());
        assert!(parse_decimal_de("19,99 extra").is_none());
    }

    #[test]
    fn grouping_inserts_separators_every_three_digits() {
        let number = parse_decimal_de("1234567,5").unwrap();
        assert_eq!(format_decimal_de(&number), "1.234.567,5");

        let small = parse_decimal_de("999").unwrap();
        assert_eq!(format_decimal_de(&small), "999");
    }

    #[test]
    fn reparse_of_grouped_output_is_stable() {
        let number = parse_decimal_de("1234,56").unwrap();
        let rendered = format_decimal_de(&number);
        assert_eq!(parse_decimal_de(&rendered), Some(number));
    }
}
