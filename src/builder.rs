//! Dataset builder
//!
//! Folds raw rows, in input order, into a [`Dataset`]. When two rows land on the
//! same day the later row wins.

use std::fmt;

use chrono::{Local, TimeZone};

use crate::config::MalformedRowPolicy;
use crate::dataset::Dataset;
use crate::error::{ActivityLogError, Result};
use crate::normalize::{RawRow, resolve_row_in};
use crate::taxonomy::Taxonomy;

/// Counters collected while building a dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Rows consumed from the input, including skipped ones
    pub rows_read: usize,
    /// Rows that produced a dataset entry
    pub resolved: usize,
    /// Rows skipped because they carry no activity label
    pub skipped_unlabeled: usize,
    /// Rows skipped because their date or layout was malformed
    pub skipped_malformed: usize,
    /// Resolved rows whose label was unknown to the taxonomy
    pub fallback_resolved: usize,
    /// Resolved rows that replaced an earlier entry for the same day
    pub overwritten: usize,
    /// Source line of the first malformed row that carried one
    pub first_malformed_line: Option<usize>,
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows read, {} resolved ({} via fallback, {} overwrote an earlier day), \
             {} unlabeled, {} malformed",
            self.rows_read,
            self.resolved,
            self.fallback_resolved,
            self.overwritten,
            self.skipped_unlabeled,
            self.skipped_malformed
        )?;
        if let Some(line) = self.first_malformed_line {
            write!(f, " (first at line {line})")?;
        }
        Ok(())
    }
}

/// Accumulates resolved rows into a dataset
#[derive(Debug)]
pub struct DatasetBuilder<'a, Tz: TimeZone = Local> {
    taxonomy: &'a Taxonomy,
    tz: Tz,
    malformed_policy: MalformedRowPolicy,
    dataset: Dataset,
    report: BuildReport,
}

impl<'a> DatasetBuilder<'a, Local> {
    /// Create a builder resolving against `taxonomy` at local midnight
    #[must_use]
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self {
            taxonomy,
            tz: Local,
            malformed_policy: MalformedRowPolicy::default(),
            dataset: Dataset::new(),
            report: BuildReport::default(),
        }
    }
}

impl<'a, Tz: TimeZone> DatasetBuilder<'a, Tz> {
    /// Compute midnight in a different time zone
    #[must_use]
    pub fn with_time_zone<T: TimeZone>(self, tz: T) -> DatasetBuilder<'a, T> {
        DatasetBuilder {
            taxonomy: self.taxonomy,
            tz,
            malformed_policy: self.malformed_policy,
            dataset: self.dataset,
            report: self.report,
        }
    }

    /// Set how malformed rows are handled
    #[must_use]
    pub fn with_malformed_policy(mut self, policy: MalformedRowPolicy) -> Self {
        self.malformed_policy = policy;
        self
    }

    /// Resolve one row and fold it into the dataset
    ///
    /// # Errors
    /// Under [`MalformedRowPolicy::Abort`], returns the row's `MalformedDate` error.
    /// Under [`MalformedRowPolicy::Skip`] this never fails.
    pub fn push(&mut self, row: &RawRow) -> Result<()> {
        self.report.rows_read += 1;
        let index = describe_position(row.line, self.report.rows_read);

        match resolve_row_in(row, self.taxonomy, &self.tz) {
            Ok(Some(resolved)) => {
                self.report.resolved += 1;
                if resolved.used_fallback {
                    self.report.fallback_resolved += 1;
                    log::debug!(
                        "{index}: unknown label {:?}, using fallback '{}'",
                        row.activity(),
                        self.taxonomy.fallback()
                    );
                }
                if let Some(previous) = self.dataset.insert(resolved.timestamp, resolved.code) {
                    self.report.overwritten += 1;
                    log::debug!(
                        "{index}: {} replaces code {previous} with {}",
                        row.date,
                        resolved.code
                    );
                }
                Ok(())
            }
            Ok(None) => {
                self.report.skipped_unlabeled += 1;
                Ok(())
            }
            Err(e) => self.reject(&index, row.line, e),
        }
    }

    /// Fold a row coming from a reader that may itself have failed on that row
    ///
    /// Row-level reader errors follow the malformed policy; any other error is
    /// returned as is.
    pub fn push_result(&mut self, row: Result<RawRow>) -> Result<()> {
        match row {
            Ok(row) => self.push(&row),
            Err(e) if e.is_row_level() => {
                self.report.rows_read += 1;
                let index = describe_position(None, self.report.rows_read);
                self.reject(&index, None, e)
            }
            Err(e) => Err(e),
        }
    }

    /// Consume an input sequence completely
    pub fn extend<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<RawRow>>,
    {
        for row in rows {
            self.push_result(row)?;
        }
        Ok(())
    }

    /// Counters so far
    #[must_use]
    pub const fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Finish building
    #[must_use]
    pub fn finish(self) -> (Dataset, BuildReport) {
        (self.dataset, self.report)
    }

    fn reject(&mut self, index: &str, line: Option<usize>, error: ActivityLogError) -> Result<()> {
        match self.malformed_policy {
            MalformedRowPolicy::Skip => {
                self.report.skipped_malformed += 1;
                if self.report.first_malformed_line.is_none() {
                    self.report.first_malformed_line = line;
                }
                log::warn!("Skipping {index}: {error}");
                Ok(())
            }
            MalformedRowPolicy::Abort => Err(error),
        }
    }
}

/// Source line when the row has one, otherwise its position in the input
fn describe_position(line: Option<usize>, index: usize) -> String {
    line.map_or_else(|| format!("row {index}"), |line| format!("line {line}"))
}

/// Build a dataset from already-split rows, skipping malformed ones
pub fn build_dataset<I>(rows: I, taxonomy: &Taxonomy) -> Result<Dataset>
where
    I: IntoIterator<Item = RawRow>,
{
    let mut builder =
        DatasetBuilder::new(taxonomy).with_malformed_policy(MalformedRowPolicy::Skip);
    builder.extend(rows.into_iter().map(Ok))?;
    Ok(builder.finish().0)
}
