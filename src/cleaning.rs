// Life expectancy cleaning pipeline
// Author: Gabriel Demetrios Lafis

//! Turns the wide Eurostat life expectancy table into a long table for one
//! region.
//!
//! Stages, in order: clean column names, unpivot the year columns, split the
//! `unit,sex,age,geo` identifier, rename `geo` to `region`, extract the numeric
//! part of each value, cast `year` and `value`, drop missing values, keep the
//! requested region and project the output columns.

use log::{info, warn};

use crate::data::{DataSet, DataType};
use crate::processing::{
    CastTransform, CleanColumnNamesTransform, ExtractNumberTransform, FilterProcessor, Pipeline,
    ProcessingError, RenameTransform, SelectTransform, SplitColumnTransform, UnpivotTransform,
};
use crate::storage::{DataStorage, FileStorage};
use crate::utils::{validate_schema, AppResult, Config};

/// Region used when none is requested
pub const DEFAULT_REGION: &str = "PT";

/// Compound identifier column of the raw table, once its annotation is removed
pub const ID_COLUMN: &str = "unit,sex,age,geo";

/// Separator joining the identifier parts
pub const ID_SEPARATOR: &str = ",";

/// Output columns and their types, in order
pub const OUTPUT_COLUMNS: [(&str, DataType); 6] = [
    ("unit", DataType::String),
    ("sex", DataType::String),
    ("age", DataType::String),
    ("region", DataType::String),
    ("year", DataType::Integer),
    ("value", DataType::Float),
];

/// Resolve the requested region, defaulting to [`DEFAULT_REGION`] when it is
/// absent or empty
pub fn resolve_region(region: Option<&str>) -> &str {
    match region {
        Some(code) if !code.is_empty() => code,
        _ => DEFAULT_REGION,
    }
}

/// Build the cleaning pipeline for a region
pub fn build_pipeline(region: Option<&str>) -> Result<Pipeline, ProcessingError> {
    let region = resolve_region(region);

    Ok(Pipeline::new("life_expectancy")
        .add(CleanColumnNamesTransform::new())
        .add(UnpivotTransform::new(ID_COLUMN, "year", "value"))
        .add(SplitColumnTransform::from_compound_name(ID_COLUMN, ID_SEPARATOR))
        .add(RenameTransform::single("geo", "region"))
        .add(ExtractNumberTransform::new("value")?)
        .add(CastTransform::new("year", DataType::Integer))
        .add(CastTransform::new("value", DataType::Float))
        .add(FilterProcessor::not_null("value"))
        .add(FilterProcessor::equals("region", region.into()))
        .add(SelectTransform::new(
            OUTPUT_COLUMNS.iter().map(|(name, _)| *name).collect(),
        )))
}

/// Clean a raw table, keeping only `region` (or [`DEFAULT_REGION`])
pub fn clean_data(raw: &DataSet, region: Option<&str>) -> Result<DataSet, ProcessingError> {
    let region = resolve_region(region);
    let pipeline = build_pipeline(Some(region))?;

    let mut cleaned = pipeline.execute(raw)?;
    validate_schema(&cleaned, &OUTPUT_COLUMNS)?;
    cleaned
        .metadata
        .add("region".to_string(), region.to_string());

    if cleaned.is_empty() {
        warn!("No rows left for region '{}'", region);
    }

    Ok(cleaned)
}

/// Read the raw table from the configured data directory, clean it and write
/// the result next to it. Nothing is written if any step fails.
pub fn clean_file(config: &Config, region: Option<&str>) -> AppResult<DataSet> {
    let region = match region {
        Some(code) if !code.is_empty() => code,
        _ => resolve_region(Some(config.data.default_region.as_str())),
    };

    let storage = FileStorage::new(&config.data.dir);
    let raw = storage.load(&config.data.input_file)?;
    info!(
        "Loaded {} rows x {} columns from {}",
        raw.len(),
        raw.schema.fields.len(),
        storage.path_of(&config.data.input_file).display()
    );

    let cleaned = clean_data(&raw, Some(region))?;

    storage.store(&config.data.output_file, &cleaned)?;
    info!(
        "Wrote {} rows for region '{}' to {}",
        cleaned.len(),
        region,
        storage.path_of(&config.data.output_file).display()
    );

    Ok(cleaned)
}
