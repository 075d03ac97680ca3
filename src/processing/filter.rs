// Filter operations for data processing
// Author: Gabriel Demetrios Lafis

use crate::data::{DataSet, Row, Value};
use super::{column_index, DataProcessor, ProcessingError, ProcessorType};

enum Predicate {
    Row(Box<dyn Fn(&Row) -> bool + Send + Sync>),
    Column(String, Box<dyn Fn(&Value) -> bool + Send + Sync>),
}

/// Filter rows based on a predicate.
///
/// Kept rows are renumbered from 0 in their original order.
pub struct FilterProcessor {
    name: String,
    predicate: Predicate,
}

impl FilterProcessor {
    /// Create a new filter processor with a whole-row predicate
    pub fn new<F>(name: &str, predicate: F) -> Self
    where
        F: Fn(&Row) -> bool + Send + Sync + 'static,
    {
        FilterProcessor {
            name: name.to_string(),
            predicate: Predicate::Row(Box::new(predicate)),
        }
    }

    /// Create a filter that tests the value of a single column
    pub fn on_column<F>(name: &str, column: &str, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        FilterProcessor {
            name: name.to_string(),
            predicate: Predicate::Column(column.to_string(), Box::new(predicate)),
        }
    }

    /// Create a filter that keeps rows where a column equals a value exactly
    pub fn equals(column: &str, value: Value) -> Self {
        Self::on_column(&format!("equals_{}", column), column, move |v| *v == value)
    }

    /// Create a filter that keeps rows where a column is not null
    pub fn not_null(column: &str) -> Self {
        Self::on_column(&format!("not_null_{}", column), column, |v| !v.is_null())
    }
}

impl DataProcessor for FilterProcessor {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        let mut result = DataSet::derived_from(input.schema.clone(), input);

        match &self.predicate {
            Predicate::Row(keep) => {
                for row in input.data.iter().filter(|row| keep(*row)) {
                    result.add_row(row.clone())?;
                }
            }
            Predicate::Column(column, keep) => {
                let col_idx = column_index(input, column)?;
                for row in input.data.iter().filter(|row| keep(&row.values[col_idx])) {
                    result.add_row(row.clone())?;
                }
            }
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Filter
    }
}
