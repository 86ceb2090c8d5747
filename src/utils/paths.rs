//! Path utilities
//!
//! Activity tables are conventionally named after the year they cover
//! (`2024.csv`, `log_2024.csv`). These helpers recover that year.

use std::path::Path;

/// Extract a year from a file name
///
/// The file stem is split on `_`, `-`, `.` and spaces; the first token made of
/// exactly four digits is taken as the year.
///
/// # Arguments
/// * `path` - Path of the table file
///
/// # Returns
/// The year, or `None` if the name carries none
pub fn year_from_path(path: &Path) -> Option<i32> {
    let stem = path.file_stem()?.to_str()?;

    stem.split(['_', '-', '.', ' '])
        .find(|token| token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()))
        .and_then(|token| token.parse::<i32>().ok())
}
