// Storage and end-to-end file tests
// Author: Gabriel Demetrios Lafis

use std::fs;

use life_expectancy::{
    cleaning::clean_file,
    data::{CsvSink, CsvSource, DataSet, DataSink, DataSource, Row, SchemaBuilder, Value},
    storage::{DataStorage, FileFormat, FileStorage, StorageError},
    utils::{AppError, Config},
};
use tempfile::TempDir;

const RAW_TSV: &str = "unit,sex,age,geo\\time\t2021 \t2020 \t2019 \n\
YR,F,Y10,PT\t: \t72.5 b\t72.1 \n\
YR,M,Y10,PT\t70.0 e\t69.8 \t: \n\
YR,F,Y10,FR\t75.2 \t75.0 p\t74.9 \n";

fn config_for(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.data.dir = dir.path().to_path_buf();
    config
}

fn write_raw(dir: &TempDir, contents: &str) {
    fs::write(dir.path().join("eu_life_expectancy_raw.tsv"), contents).unwrap();
}

#[test]
fn test_reads_tsv_with_missing_marker() {
    let dir = TempDir::new().unwrap();
    write_raw(&dir, RAW_TSV);

    let dataset = CsvSource::tsv(dir.path().join("eu_life_expectancy_raw.tsv"))
        .with_na_value(": ")
        .read()
        .unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(
        dataset.schema.names(),
        vec!["unit,sex,age,geo\\time", "2021 ", "2020 ", "2019 "]
    );
    assert_eq!(dataset.data[0].values[1], Value::Null);
    assert_eq!(dataset.data[0].values[2], Value::from("72.5 b"));
    assert_eq!(dataset.data[1].values[3], Value::Null);
}

#[test]
fn test_clean_file_writes_expected_csv() {
    let dir = TempDir::new().unwrap();
    write_raw(&dir, RAW_TSV);
    let config = config_for(&dir);

    let cleaned = clean_file(&config, None).unwrap();
    assert_eq!(cleaned.len(), 4);
    assert_eq!(cleaned.metadata.get("region"), Some(&"PT".to_string()));

    let written = fs::read_to_string(dir.path().join("pt_life_expectancy.csv")).unwrap();
    assert_eq!(
        written,
        "unit,sex,age,region,year,value\n\
         YR,M,Y10,PT,2021,70.0\n\
         YR,F,Y10,PT,2020,72.5\n\
         YR,M,Y10,PT,2020,69.8\n\
         YR,F,Y10,PT,2019,72.1\n"
    );
    assert!(!dir.path().join("pt_life_expectancy.tmp").exists());
}

#[test]
fn test_clean_file_for_absent_region_writes_header_only() {
    let dir = TempDir::new().unwrap();
    write_raw(&dir, RAW_TSV);
    let config = config_for(&dir);

    let cleaned = clean_file(&config, Some("ES")).unwrap();
    assert!(cleaned.is_empty());

    let written = fs::read_to_string(dir.path().join("pt_life_expectancy.csv")).unwrap();
    assert_eq!(written, "unit,sex,age,region,year,value\n");
}

#[test]
fn test_clean_file_uses_configured_default_region() {
    let dir = TempDir::new().unwrap();
    write_raw(&dir, RAW_TSV);
    let mut config = config_for(&dir);
    config.data.default_region = "FR".to_string();

    let cleaned = clean_file(&config, None).unwrap();

    assert_eq!(cleaned.len(), 3);
    assert_eq!(cleaned.value(0, "region"), Some(&Value::from("FR")));
}

#[test]
fn test_missing_input_is_fatal_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);

    let err = clean_file(&config, None).unwrap_err();

    assert!(matches!(err, AppError::Storage(StorageError::NotFound(_))));
    assert!(!dir.path().join("pt_life_expectancy.csv").exists());
}

#[test]
fn test_pipeline_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_raw(&dir, "unit,sex,age,geo\\time\t2020 \nYR,F,PT\t72.5 \n");
    let config = config_for(&dir);

    let err = clean_file(&config, None).unwrap_err();

    assert!(matches!(err, AppError::Processing(_)));
    assert!(!dir.path().join("pt_life_expectancy.csv").exists());
}

#[test]
fn test_ragged_input_is_a_data_error() {
    let dir = TempDir::new().unwrap();
    write_raw(&dir, "unit,sex,age,geo\\time\t2020 \nYR,F,Y10,PT\t72.5\t71.0\n");

    let err = FileStorage::new(dir.path())
        .load("eu_life_expectancy_raw.tsv")
        .unwrap_err();

    assert!(matches!(err, StorageError::Data(_)));
}

#[test]
fn test_store_creates_data_directory() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path().join("out"));

    let schema = SchemaBuilder::new()
        .add_string("region", false)
        .add_integer("year", false)
        .add_float("value", true)
        .build();
    let mut dataset = DataSet::new(schema);
    dataset
        .add_row(Row::new(vec![
            Value::from("PT"),
            Value::Integer(2020),
            Value::Float(80.0),
        ]))
        .unwrap();
    dataset
        .add_row(Row::new(vec![Value::from("PT"), Value::Integer(2021), Value::Null]))
        .unwrap();

    storage.store("result.csv", &dataset).unwrap();

    assert!(storage.exists("result.csv"));
    let written = fs::read_to_string(storage.path_of("result.csv")).unwrap();
    assert_eq!(written, "region,year,value\nPT,2020,80.0\nPT,2021,\n");
}

#[test]
fn test_failed_rename_leaves_no_temporary_file() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path());

    // A directory in the way makes the final rename fail
    fs::create_dir(storage.path_of("result.csv")).unwrap();
    fs::write(storage.path_of("result.csv").join("keep"), "x").unwrap();

    let schema = SchemaBuilder::new().add_string("region", false).build();
    let mut dataset = DataSet::new(schema);
    dataset.add_row(Row::new(vec![Value::from("PT")])).unwrap();

    let err = storage.store("result.csv", &dataset).unwrap_err();

    assert!(matches!(err, StorageError::Io(_)));
    assert!(!storage.path_of("result.tmp").exists());
    assert!(storage.path_of("result.csv").is_dir());
}

#[test]
fn test_csv_sink_respects_delimiter() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.tsv");

    let schema = SchemaBuilder::new().add_string("a", false).add_float("b", false).build();
    let mut dataset = DataSet::new(schema);
    dataset
        .add_row(Row::new(vec![Value::from("x"), Value::Float(1.25)]))
        .unwrap();

    CsvSink::new(&path, b'\t').write(&dataset).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "a\tb\nx\t1.25\n");
}

#[test]
fn test_file_format_from_extension() {
    assert_eq!(FileFormat::from_extension("TSV").unwrap(), FileFormat::Tsv);
    assert_eq!(FileFormat::from_extension("csv").unwrap(), FileFormat::Csv);
    assert!(FileFormat::from_extension("parquet").is_err());
}

#[test]
fn test_config_from_yaml_and_json() {
    let dir = TempDir::new().unwrap();

    let yaml = dir.path().join("config.yaml");
    fs::write(&yaml, "data:\n  dir: /srv/data\n  default_region: DE\nlogging:\n  level: debug\n")
        .unwrap();
    let config = Config::from_file(&yaml).unwrap();
    assert_eq!(config.data.dir, std::path::PathBuf::from("/srv/data"));
    assert_eq!(config.data.default_region, "DE");
    assert_eq!(config.data.input_file, "eu_life_expectancy_raw.tsv");
    assert_eq!(config.log_level_filter(), log::LevelFilter::Debug);

    let json = dir.path().join("config.json");
    fs::write(&json, r#"{"data": {"output_file": "out.csv"}}"#).unwrap();
    let config = Config::from_file(&json).unwrap();
    assert_eq!(config.data.output_file, "out.csv");
    assert_eq!(config.data.default_region, "PT");
    assert_eq!(config.log_level_filter(), log::LevelFilter::Info);

    let toml = dir.path().join("config.toml");
    fs::write(&toml, "").unwrap();
    assert!(matches!(Config::from_file(&toml), Err(AppError::Config(_))));
}
