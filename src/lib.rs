// Life Expectancy Cleaner
// Author: Gabriel Demetrios Lafis

//! # Life Expectancy Cleaner
//!
//! Cleans the Eurostat life expectancy table (`eu_life_expectancy_raw.tsv`)
//! into a long, typed table for a single region.
//!
//! ## Features
//!
//! - Delimited text loading with missing-value markers, and CSV output
//! - Composable, non-mutating table processors chained in a [`Pipeline`]
//! - Unpivoting, compound column splitting, numeric extraction and casting
//! - Region filtering and column projection
//!
//! ## Example
//!
//! ```rust
//! use life_expectancy::{
//!     cleaning::clean_data,
//!     data::{DataSet, Row, SchemaBuilder, Value},
//! };
//!
//! let schema = SchemaBuilder::new()
//!     .add_string("unit,sex,age,geo\\time", false)
//!     .add_string("2021 ", true)
//!     .add_string("2020 ", true)
//!     .build();
//!
//! let mut raw = DataSet::new(schema);
//! raw.add_row(Row::new(vec![
//!     Value::from("YR,F,Y10,PT"),
//!     Value::Null,
//!     Value::from("72.5 b"),
//! ])).unwrap();
//!
//! let cleaned = clean_data(&raw, None).unwrap();
//!
//! assert_eq!(cleaned.len(), 1);
//! assert_eq!(cleaned.value(0, "year"), Some(&Value::Integer(2020)));
//! assert_eq!(cleaned.value(0, "value"), Some(&Value::Float(72.5)));
//! ```

pub mod cleaning;
pub mod data;
pub mod processing;
pub mod storage;
pub mod utils;

// Re-export main types
pub use data::{DataSet, DataType, Field, Row, Schema, Value};
pub use processing::Pipeline;
pub use storage::FileStorage;
pub use utils::Config;
