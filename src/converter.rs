//! End-to-end conversion: table in, dataset artifact out.

use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

use crate::builder::{BuildReport, DatasetBuilder};
use crate::config::ConverterConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::io::{TableReader, write_dataset};
use crate::normalize::RawRow;
use crate::taxonomy::{Taxonomy, TaxonomyRegistry};
use crate::utils::{log_conversion_complete, log_conversion_start};

/// Converts activity tables using one taxonomy for the whole run
#[derive(Debug, Clone)]
pub struct Converter {
    taxonomy: Taxonomy,
    config: ConverterConfig,
}

impl Converter {
    /// Select the run's taxonomy from `registry` and create a converter
    ///
    /// # Errors
    /// Returns `UnknownYear` before any row is read if no taxonomy can be
    /// selected for the configured year.
    pub fn new(registry: &TaxonomyRegistry, config: ConverterConfig) -> Result<Self> {
        let taxonomy = registry.select(config.year, config.year_policy)?.clone();
        log::debug!("Active taxonomy: {taxonomy}");
        Ok(Self { taxonomy, config })
    }

    /// Create a converter around an explicit taxonomy
    #[must_use]
    pub fn with_taxonomy(taxonomy: Taxonomy, config: ConverterConfig) -> Self {
        Self { taxonomy, config }
    }

    /// The taxonomy active for this run
    #[must_use]
    pub const fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// The run configuration
    #[must_use]
    pub const fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Fold a row sequence into a dataset
    pub fn convert_rows<I>(&self, rows: I) -> Result<(Dataset, BuildReport)>
    where
        I: IntoIterator<Item = Result<RawRow>>,
    {
        let mut builder = DatasetBuilder::new(&self.taxonomy)
            .with_malformed_policy(self.config.malformed_policy);
        builder.extend(rows)?;
        Ok(builder.finish())
    }

    /// Convert a table from any buffered reader
    pub fn convert_reader<R: BufRead>(&self, reader: R) -> Result<(Dataset, BuildReport)> {
        self.convert_rows(TableReader::new(reader))
    }

    /// Convert the table at `input` and write the artifact to `output`
    ///
    /// The artifact is written only after the whole table has been consumed.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<(Dataset, BuildReport)> {
        let start = Instant::now();
        log_conversion_start(input, output, &self.config);

        let (dataset, report) = self.convert_rows(TableReader::open(input)?)?;
        write_dataset(output, &dataset)?;

        log_conversion_complete(output, dataset.len(), &report, Some(start.elapsed()));
        Ok((dataset, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActivityLogError;
    use crate::normalize::normalize_date;
    use crate::taxonomy::builtin::builtin_registry;
    use std::io::Cursor;

    #[test]
    fn test_unconfigured_year_fails_fast() {
        let registry = builtin_registry().unwrap();
        let err = Converter::new(&registry, ConverterConfig::default()).unwrap_err();
        assert!(matches!(err, ActivityLogError::UnknownYear(None)));
    }

    #[test]
    fn test_convert_reader_with_2021_taxonomy() {
        let registry = builtin_registry().unwrap();
        let converter = Converter::new(&registry, ConverterConfig::new().with_year(2021)).unwrap();
        let (dataset, report) = converter
            .convert_reader(Cursor::new("2021/5/1,walk\n2021/5/2,surfskate\n2021/5/3,\n"))
            .unwrap();

        assert_eq!(dataset.get(normalize_date("2021/5/1").unwrap()), Some(4));
        assert_eq!(dataset.get(normalize_date("2021/5/2").unwrap()), Some(5));
        assert_eq!(report.skipped_unlabeled, 1);
    }

    #[test]
    fn test_abort_policy_is_honoured() {
        let registry = builtin_registry().unwrap();
        let config = ConverterConfig::new().with_year(2024).abort_on_malformed();
        let converter = Converter::new(&registry, config).unwrap();
        let err = converter
            .convert_reader(Cursor::new("2024/3/10,swim\n2024/2/30,swim\n"))
            .unwrap_err();
        assert!(matches!(err, ActivityLogError::MalformedDate { .. }));
    }
}
