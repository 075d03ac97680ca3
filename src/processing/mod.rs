// Processing module for table transformation stages
// Author: Gabriel Demetrios Lafis

mod extract;
mod filter;
mod reshape;
mod split;
mod transform;

pub use extract::*;
pub use filter::*;
pub use reshape::*;
pub use split::*;
pub use transform::*;

use log::debug;
use thiserror::Error;

use crate::data::{DataError, DataSet};

/// Represents a data processor that transforms data.
///
/// Processors never modify their input; each call returns a new dataset.
pub trait DataProcessor: Send + Sync {
    /// Process a dataset and return a new dataset
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError>;

    /// Get the processor name
    fn name(&self) -> &str;

    /// Get the processor type
    fn processor_type(&self) -> ProcessorType;
}

/// Represents a processor type
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessorType {
    Transform,
    Filter,
    Reshape,
    Custom(String),
}

/// Represents an error in the processing module
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error(
        "Malformed identifier in row {row}: column '{column}' has {found} parts, expected {expected}"
    )]
    MalformedIdentifier {
        row: usize,
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Cannot cast '{value}' in column '{column}' to {target}")]
    InvalidCast {
        column: String,
        value: String,
        target: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Find the position of a column or fail with [`ProcessingError::ColumnNotFound`]
pub(crate) fn column_index(input: &DataSet, column: &str) -> Result<usize, ProcessingError> {
    input
        .schema
        .index_of(column)
        .ok_or_else(|| ProcessingError::ColumnNotFound(column.to_string()))
}

/// Pipeline for chaining multiple processors.
///
/// Stages run strictly in the order they were added. The first failing stage
/// aborts the run and its error is returned unchanged.
pub struct Pipeline {
    name: String,
    processors: Vec<Box<dyn DataProcessor>>,
}

impl Pipeline {
    /// Create a new pipeline with the given name
    pub fn new(name: &str) -> Self {
        Pipeline {
            name: name.to_string(),
            processors: Vec::new(),
        }
    }

    /// Add a processor to the pipeline
    pub fn add<P: DataProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Names of the stages, in execution order
    pub fn stages(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    /// Execute the pipeline on a dataset
    pub fn execute(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        let mut processors = self.processors.iter();

        let mut current = match processors.next() {
            Some(first) => self.run_stage(first.as_ref(), input)?,
            None => return Ok(input.clone()),
        };

        for processor in processors {
            current = self.run_stage(processor.as_ref(), &current)?;
        }

        Ok(current)
    }

    fn run_stage(
        &self,
        processor: &dyn DataProcessor,
        input: &DataSet,
    ) -> Result<DataSet, ProcessingError> {
        let output = processor.process(input)?;
        debug!(
            "[{}] {}: {} -> {} rows",
            self.name,
            processor.name(),
            input.len(),
            output.len()
        );
        Ok(output)
    }
}

impl DataProcessor for Pipeline {
    fn process(&self, input: &DataSet) -> Result<DataSet, ProcessingError> {
        self.execute(input)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Custom("Pipeline".to_string())
    }
}
