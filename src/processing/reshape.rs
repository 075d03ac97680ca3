// Wide-to-long reshaping
// Author: Gabriel Demetrios Lafis

use crate::data::{DataSet, DataType, Field, Row, Schema, Value};
use super::{column_index, DataProcessor, ProcessingError, ProcessorType};

/// Unpivot a wide table into `[id, variable, value]` rows.
///
/// Every column other than the id column is treated as a variable. The output
/// holds one row per (input row, variable column) pair, grouped by variable
/// column in the input's column order.
pub struct UnpivotTransform {
    id_column: String,
    var_name: String,
    value_name: String,
}

impl UnpivotTransform {
    /// Create a new unpivot transform
    pub fn new(id_column: &str, var_name: &str, value_name: &str) -> Self {
        UnpivotTransform {
            id_column: id_column.to_string(),
            var_name: var_name.to_string(),
            value_name: value_name.to_string(),
        }
    }
}

impl DataProcessor for UnpivotTransform {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        let id_idx = column_index(input, &self.id_column)?;
        let id_field = input.schema.fields[id_idx].clone();

        if self.var_name == id_field.name || self.value_name == id_field.name {
            return Err(ProcessingError::DuplicateColumn(id_field.name));
        }
        if self.var_name == self.value_name {
            return Err(ProcessingError::DuplicateColumn(self.var_name.clone()));
        }

        let value_type = input
            .schema
            .fields
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != id_idx)
            .map(|(_, f)| f.data_type)
            .reduce(|a, b| if a == b { a } else { DataType::String })
            .unwrap_or(DataType::String);

        let schema = Schema::new(vec![
            id_field,
            Field::new(self.var_name.clone(), DataType::String, false),
            Field::new(self.value_name.clone(), value_type, true),
        ]);
        let mut result = DataSet::derived_from(schema, input);

        for (col_idx, field) in input.schema.fields.iter().enumerate() {
            if col_idx == id_idx {
                continue;
            }

            for row in &input.data {
                result.add_row(Row::new(vec![
                    row.values[id_idx].clone(),
                    Value::String(field.name.clone()),
                    row.values[col_idx].clone(),
                ]))?;
            }
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "unpivot"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Reshape
    }
}
