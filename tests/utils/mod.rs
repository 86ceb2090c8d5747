#![allow(dead_code)]

use std::path::{Path, PathBuf};

use activity_log::{Taxonomy, Timestamp, normalize_date};

/// Taxonomy used across the scenario tests
#[must_use]
pub fn scenario_taxonomy() -> Taxonomy {
    Taxonomy::new(
        [("hiit", 1), ("swim", 2), ("soccer", 3), ("surfskate", 4), ("other", 5)],
        "other",
    )
    .expect("scenario taxonomy is valid")
}

/// Local-midnight timestamp for a `Y/M/D` string
#[must_use]
pub fn day(date: &str) -> Timestamp {
    normalize_date(date).expect("test date is valid")
}

/// Write `content` to `name` inside `dir` and return the path
pub fn write_table(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write test table");
    path
}
