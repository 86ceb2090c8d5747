//! Year-indexed taxonomy registry
//!
//! The registry is an ordered list of `(year span, taxonomy)` entries. Adding a
//! new year is a data change: either widen an existing span or push a new entry.

use std::fmt;
use std::str::FromStr;

use crate::error::{ActivityLogError, Result};
use crate::taxonomy::Taxonomy;

/// Inclusive range of years a taxonomy applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearSpan {
    /// First year (inclusive)
    pub start: i32,
    /// Last year (inclusive)
    pub end: i32,
}

impl YearSpan {
    /// A span covering a single year
    #[must_use]
    pub const fn year(year: i32) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    /// A span covering `start..=end`
    #[must_use]
    pub const fn range(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Check if this span contains the given year
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Distance in years from `year` to the closest year of the span
    #[must_use]
    pub const fn distance(&self, year: i32) -> i32 {
        if year < self.start {
            self.start - year
        } else if year > self.end {
            year - self.end
        } else {
            0
        }
    }
}

impl fmt::Display for YearSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// How to pick a taxonomy for a year that has no table of its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearPolicy {
    /// Only an exact span match is accepted
    Exact,
    /// Use the latest table starting at or before the year, else the earliest table
    #[default]
    CarryForward,
    /// Use the table closest in years; ties go to the earlier table
    Nearest,
}

impl FromStr for YearPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "carry-forward" | "carry_forward" | "carryforward" => Ok(Self::CarryForward),
            "nearest" => Ok(Self::Nearest),
            other => Err(format!(
                "Unknown year policy '{other}' (expected exact, carry-forward or nearest)"
            )),
        }
    }
}

impl fmt::Display for YearPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exact => "exact",
            Self::CarryForward => "carry-forward",
            Self::Nearest => "nearest",
        };
        f.write_str(name)
    }
}

/// Ordered collection of taxonomies keyed by year span
#[derive(Debug, Clone, Default)]
pub struct TaxonomyRegistry {
    entries: Vec<(YearSpan, Taxonomy)>,
}

impl TaxonomyRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a taxonomy for a span of years
    ///
    /// Entries are kept sorted by span start.
    ///
    /// # Errors
    /// Returns `InvalidTaxonomy` if the span is inverted or overlaps an existing entry.
    pub fn insert(&mut self, span: YearSpan, taxonomy: Taxonomy) -> Result<()> {
        if span.start > span.end {
            return Err(ActivityLogError::InvalidTaxonomy(format!(
                "year span {}..{} is inverted",
                span.start, span.end
            )));
        }

        if let Some((existing, _)) = self
            .entries
            .iter()
            .find(|(existing, _)| existing.start <= span.end && span.start <= existing.end)
        {
            return Err(ActivityLogError::InvalidTaxonomy(format!(
                "year span {span} overlaps existing span {existing}"
            )));
        }

        let position = self
            .entries
            .partition_point(|(existing, _)| existing.start < span.start);
        self.entries.insert(position, (span, taxonomy));
        Ok(())
    }

    /// Builder-style variant of [`TaxonomyRegistry::insert`]
    pub fn with(mut self, span: YearSpan, taxonomy: Taxonomy) -> Result<Self> {
        self.insert(span, taxonomy)?;
        Ok(self)
    }

    /// Taxonomy whose span contains `year`, if any
    #[must_use]
    pub fn lookup(&self, year: i32) -> Option<&Taxonomy> {
        self.entries
            .iter()
            .find(|(span, _)| span.contains(year))
            .map(|(_, taxonomy)| taxonomy)
    }

    /// Select the taxonomy for a run
    ///
    /// # Arguments
    /// * `year` - The configured year, `None` if the caller configured none
    /// * `policy` - How to handle a year without its own table
    ///
    /// # Errors
    /// Returns `UnknownYear(None)` when no year was configured,
    /// and `UnknownYear(Some(year))` when the policy finds no table.
    pub fn select(&self, year: Option<i32>, policy: YearPolicy) -> Result<&Taxonomy> {
        let year = year.ok_or(ActivityLogError::UnknownYear(None))?;

        if let Some(taxonomy) = self.lookup(year) {
            return Ok(taxonomy);
        }

        let selected = match policy {
            YearPolicy::Exact => None,
            YearPolicy::CarryForward => self
                .entries
                .iter()
                .rev()
                .find(|(span, _)| span.start <= year)
                .or_else(|| self.entries.first()),
            YearPolicy::Nearest => self
                .entries
                .iter()
                .min_by_key(|(span, _)| (span.distance(year), span.start)),
        };

        match selected {
            Some((span, taxonomy)) => {
                log::info!("No taxonomy for {year}, using {span} table ({policy} policy)");
                Ok(taxonomy)
            }
            None => Err(ActivityLogError::UnknownYear(Some(year))),
        }
    }

    /// Iterate over `(span, taxonomy)` entries in year order
    pub fn iter(&self) -> impl Iterator<Item = (&YearSpan, &Taxonomy)> {
        self.entries.iter().map(|(span, taxonomy)| (span, taxonomy))
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
