//! Built-in activity taxonomies
//!
//! Codes 1-3 have been stable since the log started. Code 4 was `walk` in 2021 and
//! was reassigned to `surfskate` from 2022 on.

use crate::error::Result;
use crate::taxonomy::{ActivityCode, Taxonomy, TaxonomyRegistry, YearSpan};

/// Fallback label shared by all built-in taxonomies
pub const FALLBACK_LABEL: &str = "other";

const TAXONOMY_2021: [(&str, ActivityCode); 5] = [
    ("hiit", 1),
    ("swim", 2),
    ("soccer", 3),
    ("walk", 4),
    (FALLBACK_LABEL, 5),
];

const TAXONOMY_2022_2024: [(&str, ActivityCode); 5] = [
    ("hiit", 1),
    ("swim", 2),
    ("soccer", 3),
    ("surfskate", 4),
    (FALLBACK_LABEL, 5),
];

/// Registry holding every built-in taxonomy
pub fn builtin_registry() -> Result<TaxonomyRegistry> {
    TaxonomyRegistry::new()
        .with(
            YearSpan::year(2021),
            Taxonomy::new(TAXONOMY_2021, FALLBACK_LABEL)?,
        )?
        .with(
            YearSpan::range(2022, 2024),
            Taxonomy::new(TAXONOMY_2022_2024, FALLBACK_LABEL)?,
        )
}
