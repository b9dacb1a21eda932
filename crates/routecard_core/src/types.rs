//! Cluster number value types.
//!
//! A cluster number reads `К{YY}/{MM}-{NNN}`: a fixed Cyrillic `К`, the
//! two-digit year, the zero-padded month and a zero-padded sequence within
//! that month. Every component is fixed width, so string order and numeric
//! order coincide within a month. The allocator relies on that.

use crate::error::FormatError;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Literal first character of every cluster number (U+041A).
pub const CLUSTER_PREFIX: char = 'К';

/// Highest sequence number available within a month.
pub const MAX_SEQUENCE: u16 = 999;

/// Checks a manually typed cluster number.
///
/// Succeeds only for the exact shape `К{YY}/{MM}-{NNN}` with a month in
/// 01..=12 and a sequence in 001..=999. Uniqueness is not checked here; the
/// store enforces it on save.
///
/// # Errors
///
/// Returns a [`FormatError`] describing the first violation found.
pub fn validate(candidate: &str) -> Result<(), FormatError> {
    candidate.parse::<ClusterNumber>().map(|_| ())
}

/// The year and month a cluster number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterMonth {
    year: u8,
    month: u8,
}

impl ClusterMonth {
    /// Creates a month from a two-digit year (0..=99) and a month (1..=12).
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MonthOutOfRange`] for a month outside 1..=12 and
    /// [`FormatError::Shape`] for a year above 99.
    pub fn new(year: u8, month: u8) -> Result<Self, FormatError> {
        if year > 99 {
            return Err(FormatError::Shape {
                candidate: format!("{year}/{month:02}"),
            });
        }
        if !(1..=12).contains(&month) {
            return Err(FormatError::MonthOutOfRange { month });
        }
        Ok(Self { year, month })
    }

    /// The month a gluing date falls in.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year().rem_euclid(100) as u8,
            month: date.month() as u8,
        }
    }

    /// Two-digit year.
    #[must_use]
    pub const fn year(self) -> u8 {
        self.year
    }

    /// Month, 1..=12.
    #[must_use]
    pub const fn month(self) -> u8 {
        self.month
    }

    /// Text shared by every cluster number of this month, e.g. `К25/03-`.
    #[must_use]
    pub fn prefix(self) -> String {
        format!("{CLUSTER_PREFIX}{:02}/{:02}-", self.year, self.month)
    }

    /// First cluster number of the month.
    #[must_use]
    pub const fn first(self) -> ClusterNumber {
        ClusterNumber {
            month: self,
            sequence: 1,
        }
    }
}

impl fmt::Display for ClusterMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.year, self.month)
    }
}

impl FromStr for ClusterMonth {
    type Err = FormatError;

    /// Parses `YY/MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let shape_error = || FormatError::Shape {
            candidate: s.to_string(),
        };
        let (year, month) = s.split_once('/').ok_or_else(shape_error)?;
        let year = fixed_digits(year, 2).ok_or_else(shape_error)?;
        let month = fixed_digits(month, 2).ok_or_else(shape_error)?;
        Self::new(year as u8, month as u8)
    }
}

/// A validated cluster number.
///
/// Ordering follows (year, month, sequence), which matches the ordering of
/// the textual form within one century.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterNumber {
    month: ClusterMonth,
    sequence: u16,
}

impl ClusterNumber {
    /// Creates a cluster number.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::SequenceOutOfRange`] for a sequence outside
    /// 1..=999.
    pub fn new(month: ClusterMonth, sequence: u16) -> Result<Self, FormatError> {
        if !(1..=MAX_SEQUENCE).contains(&sequence) {
            return Err(FormatError::SequenceOutOfRange { sequence });
        }
        Ok(Self { month, sequence })
    }

    /// The month this number belongs to.
    #[must_use]
    pub const fn month(self) -> ClusterMonth {
        self.month
    }

    /// Sequence within the month, 1..=999.
    #[must_use]
    pub const fn sequence(self) -> u16 {
        self.sequence
    }

    /// The following number in the same month, `None` after 999.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::new(self.month, self.sequence + 1).ok()
    }
}

impl fmt::Display for ClusterNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.month.prefix(), self.sequence)
    }
}

impl FromStr for ClusterNumber {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let shape_error = || FormatError::Shape {
            candidate: s.to_string(),
        };

        let rest = s.strip_prefix(CLUSTER_PREFIX).ok_or_else(shape_error)?;
        let (year, rest) = rest.split_once('/').ok_or_else(shape_error)?;
        let (month, sequence) = rest.split_once('-').ok_or_else(shape_error)?;

        let year = fixed_digits(year, 2).ok_or_else(shape_error)?;
        let month = fixed_digits(month, 2).ok_or_else(shape_error)?;
        let sequence = fixed_digits(sequence, 3).ok_or_else(shape_error)?;

        let month = ClusterMonth::new(year as u8, month as u8)?;
        Self::new(month, sequence)
    }
}

impl From<ClusterNumber> for String {
    fn from(number: ClusterNumber) -> Self {
        number.to_string()
    }
}

/// Parses exactly `width` ASCII digits.
fn fixed_digits(text: &str, width: usize) -> Option<u16> {
    if text.len() != width || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
