// Validation utilities
// Author: Gabriel Demetrios Lafis

use crate::data::{DataError, DataSet, DataType, SchemaValidator};

/// Validate that a dataset has exactly the expected columns, in order and
/// with the expected types, and that every row conforms to its schema
pub fn validate_schema(
    dataset: &DataSet,
    expected_columns: &[(&str, DataType)],
) -> Result<(), DataError> {
    let actual: Vec<(&str, DataType)> = dataset
        .schema
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.data_type))
        .collect();

    if actual != expected_columns {
        return Err(DataError::Validation(format!(
            "Columns {:?} do not match expected {:?}",
            actual, expected_columns
        )));
    }

    for row in &dataset.data {
        SchemaValidator::validate_row(row, &dataset.schema)?;
    }

    Ok(())
}
