mod utils;

use std::collections::HashMap;

use activity_log::{
    Converter, ConverterConfig, Dataset, builtin_registry, read_dataset, write_dataset,
};
use activity_log::io::{from_json_str, to_json_string};

use utils::{day, write_table};

#[test]
fn test_convert_file_writes_flat_json_object() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_table(
        dir.path(),
        "2024.csv",
        "2024/3/10,swim\n2024/3/11,\n2024/3/12, yoga \n2024/13/1,hiit\n2024/3/10,soccer\n",
    );
    let output = dir.path().join("data.json");

    let registry = builtin_registry().unwrap();
    let converter = Converter::new(&registry, ConverterConfig::new().with_year(2024)).unwrap();
    let (dataset, report) = converter.convert_file(&input, &output).unwrap();

    assert_eq!(report.rows_read, 5);
    assert_eq!(report.skipped_unlabeled, 1);
    assert_eq!(report.skipped_malformed, 1);
    assert_eq!(report.first_malformed_line, Some(4));
    assert_eq!(report.overwritten, 1);

    let text = std::fs::read_to_string(&output).unwrap();
    let parsed: HashMap<String, u32> = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed.get(&day("2024/3/10").to_string()), Some(&3));
    assert_eq!(parsed.get(&day("2024/3/12").to_string()), Some(&5));

    assert_eq!(read_dataset(&output).unwrap(), dataset);
}

#[test]
fn test_round_trip_law() {
    let dataset: Dataset = (0..50)
        .map(|i| (day("2022/1/1") + i * 86_400, u32::try_from(i % 5).unwrap() + 1))
        .collect();

    let reparsed = from_json_str(&to_json_string(&dataset).unwrap()).unwrap();
    assert_eq!(reparsed, dataset);
    assert_eq!(to_json_string(&reparsed).unwrap(), to_json_string(&dataset).unwrap());
}

#[test]
fn test_file_round_trip_leaves_no_staging_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("data.json");
    let dataset: Dataset = [(day("2021/6/1"), 4)].into_iter().collect();

    write_dataset(&output, &dataset).unwrap();
    assert_eq!(read_dataset(&output).unwrap(), dataset);

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["data.json".to_string()]);
}

#[test]
fn test_aborted_run_writes_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_table(dir.path(), "2024.csv", "2024/3/10,swim\n2024/3/32,swim\n");
    let output = dir.path().join("data.json");

    let registry = builtin_registry().unwrap();
    let config = ConverterConfig::new().with_year(2024).abort_on_malformed();
    let converter = Converter::new(&registry, config).unwrap();

    assert!(converter.convert_file(&input, &output).is_err());
    assert!(!output.exists());
}

#[test]
fn test_date_only_line_does_not_abort() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_table(dir.path(), "2024.csv", "2024/3/10,swim\n2024/3/11\n");
    let output = dir.path().join("data.json");

    let registry = builtin_registry().unwrap();
    let config = ConverterConfig::new().with_year(2024).abort_on_malformed();
    let converter = Converter::new(&registry, config).unwrap();
    let (dataset, report) = converter.convert_file(&input, &output).unwrap();

    assert_eq!(dataset.len(), 1);
    assert_eq!(report.skipped_unlabeled, 1);
    assert_eq!(report.skipped_malformed, 0);
    assert!(output.exists());
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let registry = builtin_registry().unwrap();
    let converter = Converter::new(&registry, ConverterConfig::new().with_year(2024)).unwrap();

    let err = converter
        .convert_file(&dir.path().join("missing.csv"), &dir.path().join("data.json"))
        .unwrap_err();
    assert!(matches!(err, activity_log::ActivityLogError::Io { .. }));
}
