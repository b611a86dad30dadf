//! Year extraction from free-form date labels.
//!
//! Grammar, tried in order (case-insensitive for `BC`):
//!
//! ```text
//! bc_year := [word " "] digit{1,4} space* "BC"      -> -(digits)
//! ad_year := [word " "] digit{3,4} END              -> +(digits)
//! ```
//!
//! The `BC` form may appear anywhere in the label; the plain form must end
//! the label. Anything else (centuries, decades, two-digit years, blank
//! input) has no year.

use std::sync::LazyLock;

use regex::Regex;

/// Start of the range when only an end year is given.
pub const DEFAULT_START_YEAR: i32 = 1900;

static BC_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:[a-z]+\s)?([0-9]{1,4})\s*BC").unwrap());

static AD_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[A-Za-z]+\s)?([0-9]{3,4})$").unwrap());

/// Parse a date label into a signed year (BC negative).
pub fn extract_year(label: &str) -> Option<i32> {
    if let Some(caps) = BC_YEAR.captures(label) {
        return caps[1].parse::<i32>().ok().map(|year| -year);
    }

    AD_YEAR
        .captures(label)
        .and_then(|caps| caps[1].parse::<i32>().ok())
}

/// An inclusive year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Resolve optional range inputs into a range, applying defaults.
    ///
    /// - start only: end defaults to `current_year`
    /// - end only: start defaults to [`DEFAULT_START_YEAR`]
    /// - neither: no range (no filtering)
    ///
    /// Inputs go through [`extract_year`], so `"500 BC"` is a valid bound and
    /// an unparseable bound counts as absent.
    pub fn resolve(start: Option<&str>, end: Option<&str>, current_year: i32) -> Option<Self> {
        let start = start.and_then(extract_year);
        let end = end.and_then(extract_year);

        match (start, end) {
            (Some(start), Some(end)) => Some(Self::new(start, end)),
            (Some(start), None) => Some(Self::new(start, current_year)),
            (None, Some(end)) => Some(Self::new(DEFAULT_START_YEAR, end)),
            (None, None) => None,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }
}
