// Column-level transform operations
// Author: Gabriel Demetrios Lafis

use std::collections::HashSet;

use crate::data::{format_value, DataSet, DataType, Field, Row, Schema, Value};
use super::{column_index, DataProcessor, ProcessingError, ProcessorType};

/// Default marker separating a column name from its inline annotation
pub const ANNOTATION_SEPARATOR: char = '\\';

fn check_unique(fields: &[Field]) -> Result<(), ProcessingError> {
    let mut names = HashSet::new();
    for field in fields {
        if !names.insert(field.name.as_str()) {
            return Err(ProcessingError::DuplicateColumn(field.name.clone()));
        }
    }
    Ok(())
}

/// Strip inline annotations and surrounding whitespace from column names.
///
/// `"unit,sex,age,geo\time"` becomes `"unit,sex,age,geo"` and `"2019 "`
/// becomes `"2019"`. Rows are carried over untouched.
pub struct CleanColumnNamesTransform {
    separator: char,
}

impl CleanColumnNamesTransform {
    /// Create a transform that cuts names at the default annotation separator
    pub fn new() -> Self {
        Self::with_separator(ANNOTATION_SEPARATOR)
    }

    /// Create a transform that cuts names at `separator`
    pub fn with_separator(separator: char) -> Self {
        CleanColumnNamesTransform { separator }
    }

    /// Clean a single column name
    pub fn clean_name(&self, name: &str) -> String {
        let name = name.trim();
        name.split(self.separator).next().unwrap_or(name).trim().to_string()
    }
}

impl Default for CleanColumnNamesTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProcessor for CleanColumnNamesTransform {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        let fields: Vec<Field> = input
            .schema
            .fields
            .iter()
            .map(|field| Field {
                name: self.clean_name(&field.name),
                ..field.clone()
            })
            .collect();

        check_unique(&fields)?;

        let mut result = DataSet::derived_from(Schema::new(fields), input);
        result.data = input.data.clone();

        Ok(result)
    }

    fn name(&self) -> &str {
        "clean_column_names"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Transform
    }
}

/// Select specific columns from a dataset, in the given order
pub struct SelectTransform {
    columns: Vec<String>,
}

impl SelectTransform {
    /// Create a new select transform with the given column names
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        SelectTransform {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl DataProcessor for SelectTransform {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        let indices = self
            .columns
            .iter()
            .map(|col| column_index(input, col))
            .collect::<Result<Vec<_>, _>>()?;

        let selected_fields: Vec<Field> = indices
            .iter()
            .map(|&i| input.schema.fields[i].clone())
            .collect();

        check_unique(&selected_fields)?;

        let mut result = DataSet::derived_from(Schema::new(selected_fields), input);

        for row in &input.data {
            let values: Vec<Value> = indices.iter().map(|&i| row.values[i].clone()).collect();
            result.add_row(Row::new(values))?;
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "select"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Transform
    }
}

/// Rename columns in a dataset
pub struct RenameTransform {
    renames: Vec<(String, String)>, // (old_name, new_name)
}

impl RenameTransform {
    /// Create a new rename transform with the given column renames
    pub fn new(renames: Vec<(String, String)>) -> Self {
        RenameTransform { renames }
    }

    /// Rename a single column
    pub fn single(old_name: &str, new_name: &str) -> Self {
        Self::new(vec![(old_name.to_string(), new_name.to_string())])
    }
}

impl DataProcessor for RenameTransform {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        let mut fields = input.schema.fields.clone();

        for (old_name, new_name) in &self.renames {
            let field = fields
                .iter_mut()
                .find(|f| &f.name == old_name)
                .ok_or_else(|| ProcessingError::ColumnNotFound(old_name.clone()))?;
            field.name = new_name.clone();
        }

        check_unique(&fields)?;

        let mut result = DataSet::derived_from(Schema::new(fields), input);
        result.data = input.data.clone();

        Ok(result)
    }

    fn name(&self) -> &str {
        "rename"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Transform
    }
}

/// Cast a column to a different data type.
///
/// Nulls stay null. Any other value that cannot be represented in the target
/// type fails the whole transform.
pub struct CastTransform {
    column: String,
    target_type: DataType,
}

impl CastTransform {
    /// Create a new cast transform
    pub fn new(column: &str, target_type: DataType) -> Self {
        CastTransform {
            column: column.to_string(),
            target_type,
        }
    }

    fn invalid(&self, value: &Value) -> ProcessingError {
        ProcessingError::InvalidCast {
            column: self.column.clone(),
            value: format_value(value),
            target: format!("{:?}", self.target_type).to_lowercase(),
        }
    }

    /// Cast a value to the target type
    fn cast_value(&self, value: &Value) -> Result<Value, ProcessingError> {
        match (value, self.target_type) {
            (Value::Null, _) => Ok(Value::Null),

            (Value::Integer(i), DataType::Integer) => Ok(Value::Integer(*i)),
            (Value::Integer(i), DataType::Float) => Ok(Value::Float(*i as f64)),
            (Value::Float(f), DataType::Float) => Ok(Value::Float(*f)),
            (Value::Float(_), DataType::Integer) => Err(self.invalid(value)),
            (Value::Integer(_) | Value::Float(_), DataType::String) => {
                Ok(Value::String(format_value(value)))
            }

            (Value::String(s), DataType::Integer) => s
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| self.invalid(value)),
            (Value::String(s), DataType::Float) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| self.invalid(value)),
            (Value::String(s), DataType::String) => Ok(Value::String(s.clone())),
        }
    }
}

impl DataProcessor for CastTransform {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        let col_idx = column_index(input, &self.column)?;

        let mut fields = input.schema.fields.clone();
        fields[col_idx].data_type = self.target_type;

        let mut result = DataSet::derived_from(Schema::new(fields), input);

        for row in &input.data {
            let mut values = row.values.clone();
            values[col_idx] = self.cast_value(&values[col_idx])?;
            result.add_row(Row::new(values))?;
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "cast"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Transform
    }
}
