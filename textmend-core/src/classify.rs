//! Text classifiers
//!
//! Pure predicate+factory pairs: three date-granularity recognizers and the
//! dictionary recognizer, tried in fixed priority order. A classifier that
//! accepts a leaf captures a fully resolved rewrite at classification time;
//! nothing is recomputed when the rewrite is applied later, so intervening
//! state (the current calendar year, mutated siblings) cannot change the
//! outcome between the two phases.

use crate::dictionary::{Dictionary, DictionaryEntry};
use crate::error::{CoreError, Result};
use crate::locale;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use smallvec::SmallVec;

/// The three date-recognition levels and their rendered field sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateGranularity {
    /// Day and month only; input carries no year
    Small,
    /// Day, month, and year
    Medium,
    /// Full weekday plus day, month, and year
    Large,
}

/// The outcome of classifying one leaf
///
/// At most one classification is produced per leaf per scan; the first
/// recognizer that accepts wins.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification<'d> {
    /// A date phrase, already resolved and rendered in German
    Date {
        /// Which recognizer matched
        granularity: DateGranularity,
        /// The replacement text, computed at classification time
        rendered: String,
    },
    /// Dictionary phrases found in the leaf, longest first
    Dictionary {
        /// The matched entries, in substitution order
        phrases: SmallVec<[&'d DictionaryEntry; 4]>,
    },
}

/// One pluggable date recognizer: a token-shape pattern plus the
/// granularity it renders at
///
/// Patterns use named groups: `day` and `month` are required, `year` is
/// optional (the reference year fills in when absent). An optional ordinal
/// suffix after the day ("3rd") belongs in a non-capturing group so that
/// only the digit group is read back.
#[derive(Debug)]
pub struct DateRule {
    granularity: DateGranularity,
    pattern: Regex,
    exclude_substring: Option<String>,
}

impl DateRule {
    /// Compile a date rule
    pub fn new(
        granularity: DateGranularity,
        pattern: &str,
        exclude_substring: Option<&str>,
    ) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| CoreError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            granularity,
            pattern,
            exclude_substring: exclude_substring.map(str::to_string),
        })
    }

    /// The granularity this rule renders at
    pub fn granularity(&self) -> DateGranularity {
        self.granularity
    }

    /// Try to recognize and resolve a date in the trimmed leaf text
    ///
    /// A shape match whose fields do not form a real calendar date (unknown
    /// month name, day out of range) is a soft failure: the rule yields
    /// nothing and the caller falls through to the next recognizer.
    fn recognize(&self, trimmed: &str, reference_year: i32) -> Option<String> {
        if let Some(marker) = &self.exclude_substring {
            if trimmed.contains(marker.as_str()) {
                return None;
            }
        }
        let captures = self.pattern.captures(trimmed)?;
        let day: u32 = captures.name("day")?.as_str().parse().ok()?;
        let month = locale::month_number(captures.name("month")?.as_str())?;
        let year: i32 = match captures.name("year") {
            Some(group) => group.as_str().parse().ok()?,
            None => reference_year,
        };
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(locale::format_date(date, self.granularity))
    }
}

/// The ordered classifier set
pub struct Classifiers {
    date_rules: Vec<DateRule>,
    reference_year: i32,
}

impl Classifiers {
    /// Default rule set with the current calendar year as reference
    pub fn new() -> Result<Self> {
        Self::with_reference_year(chrono::Local::now().year())
    }

    /// Default rule set with an explicit reference year
    ///
    /// The reference year fills in for Small dates, which carry none; it is
    /// captured here, once, rather than read from the clock at apply time.
    pub fn with_reference_year(reference_year: i32) -> Result<Self> {
        Ok(Self {
            date_rules: default_date_rules()?,
            reference_year,
        })
    }

    /// Custom recognizer set, tried in the order given, before the
    /// dictionary recognizer
    pub fn with_rules(date_rules: Vec<DateRule>, reference_year: i32) -> Self {
        Self {
            date_rules,
            reference_year,
        }
    }

    /// Classify one leaf's text; the first recognizer that accepts wins
    pub fn classify<'d>(
        &self,
        text: &str,
        dictionary: &'d Dictionary,
    ) -> Option<Classification<'d>> {
        let trimmed = text.trim();
        for rule in &self.date_rules {
            if let Some(rendered) = rule.recognize(trimmed, self.reference_year) {
                return Some(Classification::Date {
                    granularity: rule.granularity,
                    rendered,
                });
            }
        }
        let phrases = dictionary.matches_in(text);
        if phrases.is_empty() {
            None
        } else {
            Some(Classification::Dictionary { phrases })
        }
    }
}

/// Localized plural-duration marker that disqualifies the Small shape
/// ("3 Wochen" is a span, not a date)
const DURATION_MARKER: &str = "Wochen";

fn default_date_rules() -> Result<Vec<DateRule>> {
    Ok(vec![
        // bare "day month-name", no year, no trailing content
        DateRule::new(
            DateGranularity::Small,
            r"^(?P<day>\d{1,2}) (?P<month>\S+)$",
            Some(DURATION_MARKER),
        )?,
        // "month-name day[ordinal], year"
        DateRule::new(
            DateGranularity::Medium,
            r"^(?P<month>\S+) (?P<day>\d{1,2})(?:[a-z]{1,2})?, (?P<year>\d{4})$",
            None,
        )?,
        // "month-name weekday-abbrev day[ordinal], year"
        DateRule::new(
            DateGranularity::Large,
            r"^(?P<month>\S+) \S{3} (?P<day>\d{1,2})(?:[a-z]{1,2})?, (?P<year>\d{4})$",
            None,
        )?,
    ])
}
