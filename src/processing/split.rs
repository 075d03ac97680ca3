// Splitting a compound column into its parts
// Author: Gabriel Demetrios Lafis

use crate::data::{DataSet, DataType, Field, Row, Schema, Value};
use super::{column_index, DataProcessor, ProcessingError, ProcessorType};

/// What to do with a row whose compound value has the wrong number of parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArityPolicy {
    /// Fail the transform with [`ProcessingError::MalformedIdentifier`]
    #[default]
    Reject,
    /// Set every target column of that row to null
    NullFill,
}

/// Split a compound string column into one new column per part.
///
/// The new columns are appended after the existing ones; the compound column
/// itself is kept.
pub struct SplitColumnTransform {
    column: String,
    targets: Vec<String>,
    separator: String,
    policy: ArityPolicy,
}

impl SplitColumnTransform {
    /// Create a transform that splits `column` on `separator` into `targets`
    pub fn new<S: Into<String>>(column: &str, targets: Vec<S>, separator: &str) -> Self {
        SplitColumnTransform {
            column: column.to_string(),
            targets: targets.into_iter().map(Into::into).collect(),
            separator: separator.to_string(),
            policy: ArityPolicy::default(),
        }
    }

    /// Derive the target names by splitting the column name itself,
    /// so `"unit,sex,age,geo"` yields `unit`, `sex`, `age` and `geo`
    pub fn from_compound_name(column: &str, separator: &str) -> Self {
        let targets: Vec<String> = column
            .split(separator)
            .map(|part| part.trim().to_string())
            .collect();
        Self::new(column, targets, separator)
    }

    /// Set the arity mismatch policy
    pub fn with_policy(mut self, policy: ArityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Target column names, in order
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    fn split_value(&self, row_idx: usize, value: &Value) -> Result<Vec<Value>, ProcessingError> {
        let parts: Vec<&str> = match value {
            Value::String(s) => s.split(self.separator.as_str()).collect(),
            _ => Vec::new(),
        };

        if parts.len() == self.targets.len() {
            return Ok(parts.into_iter().map(Value::from).collect());
        }

        match self.policy {
            ArityPolicy::Reject => Err(ProcessingError::MalformedIdentifier {
                row: row_idx,
                column: self.column.clone(),
                expected: self.targets.len(),
                found: parts.len(),
            }),
            ArityPolicy::NullFill => Ok(vec![Value::Null; self.targets.len()]),
        }
    }
}

impl DataProcessor for SplitColumnTransform {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        if self.separator.is_empty() {
            return Err(ProcessingError::InvalidArgument(
                "Split separator must not be empty".to_string(),
            ));
        }
        if self.targets.is_empty() {
            return Err(ProcessingError::InvalidArgument(format!(
                "No target columns given for splitting '{}'",
                self.column
            )));
        }

        let col_idx = column_index(input, &self.column)?;

        let mut fields = input.schema.fields.clone();
        for target in &self.targets {
            if fields.iter().any(|f| &f.name == target) {
                return Err(ProcessingError::DuplicateColumn(target.clone()));
            }
            let nullable = self.policy == ArityPolicy::NullFill;
            fields.push(Field::new(target.clone(), DataType::String, nullable));
        }

        let mut result = DataSet::derived_from(Schema::new(fields), input);

        for (row_idx, row) in input.data.iter().enumerate() {
            let mut values = row.values.clone();
            values.extend(self.split_value(row_idx, &row.values[col_idx])?);
            result.add_row(Row::new(values))?;
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "split_column"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Transform
    }
}
