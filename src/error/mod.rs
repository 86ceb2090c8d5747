//! Error handling for the activity log converter.

use std::io;
use std::path::PathBuf;

/// Specialized error type for activity log conversion
#[derive(Debug, thiserror::Error)]
pub enum ActivityLogError {
    /// A date field did not parse into three integers or is not a real calendar date
    #[error("Malformed date '{input}': {reason}")]
    MalformedDate {
        /// The raw date field as read from the table
        input: String,
        /// Why the date was rejected
        reason: String,
    },

    /// No taxonomy could be selected for the run
    #[error("{}", unknown_year_message(.0))]
    UnknownYear(Option<i32>),

    /// A taxonomy or registry table violates its invariants
    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),

    /// Error opening, reading or writing a file
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// File the operation was performed on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Error encoding or decoding the JSON artifact
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The artifact parsed as JSON but does not describe a dataset
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),
}

fn unknown_year_message(year: &Option<i32>) -> String {
    match year {
        Some(year) => format!("No taxonomy defined for year {year}"),
        None => "No taxonomy year configured for this run".to_string(),
    }
}

impl ActivityLogError {
    /// Build a `MalformedDate` error for the given input
    pub fn malformed_date(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedDate {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error only concerns a single input row
    ///
    /// Row-level errors are candidates for skipping; everything else ends the run.
    #[must_use]
    pub const fn is_row_level(&self) -> bool {
        matches!(self, Self::MalformedDate { .. })
    }
}

/// Result type for activity log operations
pub type Result<T> = std::result::Result<T, ActivityLogError>;
