//! Activity taxonomies
//!
//! A taxonomy collapses free-text activity labels into a small integer code space.
//! Each taxonomy carries a fallback label whose code is used for any label it does
//! not know.

pub mod builtin;
pub mod registry;

use std::fmt;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::error::{ActivityLogError, Result};

pub use registry::{TaxonomyRegistry, YearPolicy, YearSpan};

/// Integer category code stored in the dataset
pub type ActivityCode = u32;

/// An immutable label-to-code mapping plus its fallback label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    codes: FxHashMap<String, ActivityCode>,
    fallback: String,
    fallback_code: ActivityCode,
}

impl Taxonomy {
    /// Create a taxonomy from `(label, code)` entries and a fallback label
    ///
    /// # Errors
    /// Returns `InvalidTaxonomy` if the table is empty, a code is zero, a label
    /// appears twice, or the fallback label is not one of the entries.
    pub fn new<I, L>(entries: I, fallback: &str) -> Result<Self>
    where
        I: IntoIterator<Item = (L, ActivityCode)>,
        L: Into<String>,
    {
        let mut codes = FxHashMap::default();
        for (label, code) in entries {
            let label = label.into();
            if code == 0 {
                return Err(ActivityLogError::InvalidTaxonomy(format!(
                    "label '{label}' has code 0, codes must be positive"
                )));
            }
            if codes.insert(label.clone(), code).is_some() {
                return Err(ActivityLogError::InvalidTaxonomy(format!(
                    "label '{label}' is defined more than once"
                )));
            }
        }

        if codes.is_empty() {
            return Err(ActivityLogError::InvalidTaxonomy(
                "taxonomy has no labels".to_string(),
            ));
        }

        let fallback_code = *codes.get(fallback).ok_or_else(|| {
            ActivityLogError::InvalidTaxonomy(format!(
                "fallback label '{fallback}' is not part of the taxonomy"
            ))
        })?;

        Ok(Self {
            codes,
            fallback: fallback.to_string(),
            fallback_code,
        })
    }

    /// Exact, case-sensitive lookup of a label
    #[must_use]
    pub fn code_of(&self, label: &str) -> Option<ActivityCode> {
        self.codes.get(label).copied()
    }

    /// Resolve a label to a code, substituting the fallback code for unknown labels
    ///
    /// The second element is `true` when the fallback was used.
    #[must_use]
    pub fn resolve(&self, label: &str) -> (ActivityCode, bool) {
        match self.code_of(label) {
            Some(code) => (code, false),
            None => (self.fallback_code, true),
        }
    }

    /// The fallback label
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Code of the fallback label
    #[must_use]
    pub const fn fallback_code(&self) -> ActivityCode {
        self.fallback_code
    }

    /// Labels that map to `code`, sorted
    #[must_use]
    pub fn labels_for(&self, code: ActivityCode) -> Vec<&str> {
        self.codes
            .iter()
            .filter(|(_, c)| **c == code)
            .map(|(label, _)| label.as_str())
            .sorted()
            .collect()
    }

    /// All `(label, code)` entries ordered by code, then label
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, ActivityCode)> {
        self.codes
            .iter()
            .map(|(label, code)| (label.as_str(), *code))
            .sorted_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
            .collect()
    }

    /// Number of labels
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always `false` for a constructed taxonomy
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .entries()
            .into_iter()
            .map(|(label, code)| format!("{label}:{code}"))
            .join(", ");
        write!(f, "{{{body}}} (fallback: {})", self.fallback)
    }
}
