//! A Rust library for normalizing personal activity logs into a compact
//! dataset mapping each day (local-midnight Unix timestamp) to an activity code,
//! using a taxonomy versioned per year.

pub mod builder;
pub mod config;
pub mod converter;
pub mod dataset;
pub mod error;
pub mod io;
pub mod normalize;
pub mod taxonomy;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{ConverterConfig, MalformedRowPolicy};
pub use converter::Converter;
pub use dataset::Dataset;
pub use error::{ActivityLogError, Result};

// Pipeline stages
pub use builder::{BuildReport, DatasetBuilder, build_dataset};
pub use normalize::{RawRow, ResolvedRow, Timestamp, normalize_date, resolve_row};
pub use taxonomy::builtin::builtin_registry;
pub use taxonomy::{ActivityCode, Taxonomy, TaxonomyRegistry, YearPolicy, YearSpan};

// Boundary I/O
pub use io::{TableReader, read_dataset, write_dataset};
