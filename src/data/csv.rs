// Delimited text data source and sink implementation
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use super::{DataError, DataSet, DataSink, DataSource, DataType, Field, Row, Schema, Value};

/// Missing-value marker used by the Eurostat raw tables
pub const EUROSTAT_MISSING: &str = ": ";

/// Delimited text data source.
///
/// Every column is read as a nullable string. Empty cells and cells equal to
/// one of the configured missing tokens become [`Value::Null`].
pub struct CsvSource {
    path: PathBuf,
    delimiter: u8,
    na_values: Vec<String>,
}

impl CsvSource {
    /// Create a new CSV data source
    pub fn new<P: AsRef<Path>>(path: P, delimiter: u8) -> Self {
        CsvSource {
            path: path.as_ref().to_path_buf(),
            delimiter,
            na_values: Vec::new(),
        }
    }

    /// Create a tab-delimited source
    pub fn tsv<P: AsRef<Path>>(path: P) -> Self {
        Self::new(path, b'\t')
    }

    /// Treat cells equal to `token` as missing
    pub fn with_na_value(mut self, token: &str) -> Self {
        self.na_values.push(token.to_string());
        self
    }

    /// Parse a dataset from any reader
    pub fn read_from<R: Read>(&self, reader: R) -> Result<DataSet, DataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(reader);

        let fields: Vec<Field> = csv_reader
            .headers()?
            .iter()
            .map(|name| Field::new(name.to_string(), DataType::String, true))
            .collect();

        if fields.is_empty() {
            return Err(DataError::Parse(format!(
                "'{}' has no header row",
                self.path.display()
            )));
        }

        let mut dataset = DataSet::new(Schema::new(fields));

        for result in csv_reader.records() {
            let record = result?;

            let values: Vec<Value> = record
                .iter()
                .map(|cell| {
                    if cell.is_empty() || self.na_values.iter().any(|na| na == cell) {
                        Value::Null
                    } else {
                        Value::String(cell.to_string())
                    }
                })
                .collect();

            dataset.add_row(Row::new(values))?;
        }

        dataset.metadata.add("source".to_string(), "csv".to_string());
        dataset
            .metadata
            .add("path".to_string(), self.path.display().to_string());

        Ok(dataset)
    }
}

impl DataSource for CsvSource {
    fn read(&self) -> Result<DataSet, DataError> {
        let file = File::open(&self.path)?;
        self.read_from(BufReader::new(file))
    }

    fn name(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }
}

/// Delimited text data sink
pub struct CsvSink {
    path: PathBuf,
    delimiter: u8,
}

impl CsvSink {
    /// Create a new CSV data sink
    pub fn new<P: AsRef<Path>>(path: P, delimiter: u8) -> Self {
        CsvSink {
            path: path.as_ref().to_path_buf(),
            delimiter,
        }
    }

    /// Write a dataset to any writer, header first, without an index column
    pub fn write_to<W: Write>(&self, data: &DataSet, writer: W) -> Result<(), DataError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        csv_writer.write_record(data.schema.names())?;

        for row in &data.data {
            let record: Vec<String> = row.values.iter().map(format_value).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl DataSink for CsvSink {
    fn write(&self, data: &DataSet) -> Result<(), DataError> {
        let file = File::create(&self.path)?;
        self.write_to(data, BufWriter::new(file))
    }

    fn name(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }
}

/// Render a value as a delimited-text cell
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => format_float(*f),
        Value::String(s) => s.clone(),
    }
}

/// Floats always keep a fractional part, so `80.0` is written as `80.0`
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}
