//! Row resolution
//!
//! Turns one raw `(date, label)` row into a `(timestamp, code)` pair, or a skip.

use chrono::{Local, TimeZone};

use crate::error::Result;
use crate::normalize::date::{Timestamp, normalize_date_in};
use crate::taxonomy::{ActivityCode, Taxonomy};

/// A row as read from the source table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Date field in `Y/M/D` form
    pub date: String,
    /// Activity label; `None` when the row has no label field at all
    pub label: Option<String>,
    /// 1-based line in the source table, when the row came from one
    pub line: Option<usize>,
}

impl RawRow {
    /// Create a row with a label field
    pub fn new(date: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            label: Some(label.into()),
            line: None,
        }
    }

    /// Create a row without a label field
    pub fn unlabeled(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            label: None,
            line: None,
        }
    }

    /// Record the source line this row was read from
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// The label, if it contains anything besides whitespace
    #[must_use]
    pub fn activity(&self) -> Option<&str> {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }
}

/// A row that resolved to a dataset entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRow {
    /// Local midnight of the row's date
    pub timestamp: Timestamp,
    /// Activity code from the active taxonomy
    pub code: ActivityCode,
    /// Whether the label was unknown and the fallback code was used
    pub used_fallback: bool,
}

/// Resolve a row against a taxonomy using local midnight
///
/// Returns `Ok(None)` for rows without an activity label.
///
/// # Errors
/// Returns `MalformedDate` if the date field cannot be normalized.
pub fn resolve_row(row: &RawRow, taxonomy: &Taxonomy) -> Result<Option<ResolvedRow>> {
    resolve_row_in(row, taxonomy, &Local)
}

/// Resolve a row against a taxonomy using midnight in `tz`
pub fn resolve_row_in<Tz: TimeZone>(
    row: &RawRow,
    taxonomy: &Taxonomy,
    tz: &Tz,
) -> Result<Option<ResolvedRow>> {
    let Some(label) = row.activity() else {
        return Ok(None);
    };

    let timestamp = normalize_date_in(&row.date, tz)?;
    let (code, used_fallback) = taxonomy.resolve(label);

    Ok(Some(ResolvedRow {
        timestamp,
        code,
        used_fallback,
    }))
}
