// Numeric extraction from annotated cells
// Author: Gabriel Demetrios Lafis

use regex::Regex;

use crate::data::{DataSet, Row, Schema, Value};
use super::{column_index, DataProcessor, ProcessingError, ProcessorType};

/// A number with a literal decimal point and at least one digit
pub const DECIMAL_PATTERN: &str = r"\d+\.\d*|\.\d+";

/// Replace each cell of a string column with the first number found in it.
///
/// Trailing flags such as the `b` in `"72.5 b"` are dropped. Cells without a
/// match, and null cells, become null. The column stays a string column; pair
/// it with a cast to get numbers.
pub struct ExtractNumberTransform {
    column: String,
    pattern: Regex,
}

impl ExtractNumberTransform {
    /// Extract decimal numbers (see [`DECIMAL_PATTERN`]) from `column`
    pub fn new(column: &str) -> Result<Self, ProcessingError> {
        Self::with_pattern(column, DECIMAL_PATTERN)
    }

    /// Extract the first match of a custom pattern from `column`
    pub fn with_pattern(column: &str, pattern: &str) -> Result<Self, ProcessingError> {
        let pattern = Regex::new(pattern).map_err(|e| {
            ProcessingError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
        })?;

        Ok(ExtractNumberTransform {
            column: column.to_string(),
            pattern,
        })
    }

    /// Extract from a single cell
    pub fn extract(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => self
                .pattern
                .find(s)
                .map(|m| Value::from(m.as_str()))
                .unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}

impl DataProcessor for ExtractNumberTransform {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        let col_idx = column_index(input, &self.column)?;

        let mut fields = input.schema.fields.clone();
        fields[col_idx].nullable = true;

        let mut result = DataSet::derived_from(Schema::new(fields), input);

        for row in &input.data {
            let mut values = row.values.clone();
            values[col_idx] = self.extract(&values[col_idx]);
            result.add_row(Row::new(values))?;
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "extract_number"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Transform
    }
}
