// Schema definition and validation
// Author: Gabriel Demetrios Lafis

use super::{DataError, DataType, Field, Row, Schema, Value};

/// Schema validator for ensuring data conforms to a schema
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate a value against a data type
    pub fn validate_value(value: &Value, data_type: DataType) -> Result<(), DataError> {
        match (value, data_type) {
            (Value::Null, _) => Ok(()), // Null is valid for any type
            (Value::Integer(_), DataType::Integer) => Ok(()),
            (Value::Float(_), DataType::Float) => Ok(()),
            (Value::String(_), DataType::String) => Ok(()),
            _ => Err(DataError::Validation(format!(
                "Value type mismatch: expected {:?}, found {:?}",
                data_type, value
            ))),
        }
    }

    /// Validate a row against a schema
    pub fn validate_row(row: &Row, schema: &Schema) -> Result<(), DataError> {
        if row.values.len() != schema.fields.len() {
            return Err(DataError::SchemaMismatch {
                expected: schema.fields.len(),
                found: row.values.len(),
            });
        }

        for (field, value) in schema.fields.iter().zip(&row.values) {
            if !field.nullable && value.is_null() {
                return Err(DataError::Validation(format!(
                    "Field '{}' cannot be null",
                    field.name
                )));
            }

            Self::validate_value(value, field.data_type)?;
        }

        Ok(())
    }
}

/// Schema builder for creating schemas
pub struct SchemaBuilder {
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        SchemaBuilder { fields: Vec::new() }
    }

    /// Add a field to the schema
    pub fn add_field(mut self, name: &str, data_type: DataType, nullable: bool) -> Self {
        self.fields.push(Field::new(name.to_string(), data_type, nullable));
        self
    }

    /// Add an integer field
    pub fn add_integer(self, name: &str, nullable: bool) -> Self {
        self.add_field(name, DataType::Integer, nullable)
    }

    /// Add a float field
    pub fn add_float(self, name: &str, nullable: bool) -> Self {
        self.add_field(name, DataType::Float, nullable)
    }

    /// Add a string field
    pub fn add_string(self, name: &str, nullable: bool) -> Self {
        self.add_field(name, DataType::String, nullable)
    }

    /// Build the schema
    pub fn build(self) -> Schema {
        Schema::new(self.fields)
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
