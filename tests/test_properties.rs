// Property tests for the cleaning pipeline
// Author: Gabriel Demetrios Lafis

use life_expectancy::{
    cleaning::clean_data,
    data::{DataSet, DataType, Field, Row, Schema, Value},
    processing::{DataProcessor, UnpivotTransform},
};
use proptest::prelude::*;

const REGIONS: [&str; 4] = ["PT", "FR", "DE", "ES"];

/// A generated raw cell and the number it should clean to
#[derive(Debug, Clone)]
struct Cell {
    text: Option<String>,
    number: Option<f64>,
}

fn decimal(int: u32, frac: u32) -> (String, f64) {
    let text = format!("{}.{:02}", int, frac);
    let number = text.parse::<f64>().unwrap();
    (text, number)
}

/// A raw cell: missing, a plain decimal, a decimal with a flag, or a flag alone
fn cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(Cell {
            text: None,
            number: None,
        }),
        (0u32..1000, 0u32..100).prop_map(|(i, f)| {
            let (text, number) = decimal(i, f);
            Cell {
                text: Some(text),
                number: Some(number),
            }
        }),
        (0u32..1000, 0u32..100, "[a-z]{1,2}").prop_map(|(i, f, flag)| {
            let (text, number) = decimal(i, f);
            Cell {
                text: Some(format!("{} {}", text, flag)),
                number: Some(number),
            }
        }),
        Just(Cell {
            text: Some(": c".to_string()),
            number: None,
        }),
    ]
}

type RawRows = Vec<(usize, Vec<Cell>)>;

fn raw_strategy() -> impl Strategy<Value = (Vec<u16>, RawRows)> {
    prop::collection::btree_set(1960u16..2030, 1..6).prop_flat_map(|years| {
        let years: Vec<u16> = years.into_iter().collect();
        let width = years.len();
        let rows = prop::collection::vec(
            (0..REGIONS.len(), prop::collection::vec(cell(), width)),
            0..8,
        );
        (Just(years), rows)
    })
}

fn identifier(index: usize, region: usize) -> String {
    format!("YR,T,Y{},{}", index, REGIONS[region])
}

fn build_raw(years: &[u16], rows: &[(usize, Vec<Cell>)]) -> DataSet {
    let mut fields = vec![Field::new(
        "unit,sex,age,geo\\time".to_string(),
        DataType::String,
        true,
    )];
    fields.extend(
        years
            .iter()
            .map(|y| Field::new(format!("{} ", y), DataType::String, true)),
    );

    let mut dataset = DataSet::new(Schema::new(fields));
    for (i, (region, cells)) in rows.iter().enumerate() {
        let mut values = vec![Value::String(identifier(i, *region))];
        values.extend(cells.iter().map(|c| match &c.text {
            Some(s) => Value::String(s.clone()),
            None => Value::Null,
        }));
        dataset.add_row(Row::new(values)).unwrap();
    }
    dataset
}

/// Expected `(age, year, value)` rows for a region, year column by year column
fn expected_rows(
    years: &[u16],
    rows: &[(usize, Vec<Cell>)],
    region: &str,
) -> Vec<(String, i64, f64)> {
    let mut expected = Vec::new();
    for (col, year) in years.iter().enumerate() {
        for (i, (r, cells)) in rows.iter().enumerate() {
            if REGIONS[*r] != region {
                continue;
            }
            if let Some(number) = cells[col].number {
                expected.push((format!("Y{}", i), i64::from(*year), number));
            }
        }
    }
    expected
}

proptest! {
    #[test]
    fn unpivot_fans_out_over_year_columns((years, rows) in raw_strategy()) {
        let raw = build_raw(&years, &rows);

        let long = UnpivotTransform::new("unit,sex,age,geo\\time", "year", "value")
            .process(&raw)
            .unwrap();

        prop_assert_eq!(long.len(), raw.len() * (raw.schema.fields.len() - 1));
    }

    #[test]
    fn every_row_matches_requested_region(
        (years, rows) in raw_strategy(),
        region in prop::sample::select(REGIONS.to_vec()),
    ) {
        let raw = build_raw(&years, &rows);

        let result = clean_data(&raw, Some(region)).unwrap();

        prop_assert_eq!(result.schema.fields.len(), 6);
        for value in result.column("region").unwrap() {
            prop_assert_eq!(value, &Value::from(region));
        }
    }

    #[test]
    fn surviving_values_round_trip((years, rows) in raw_strategy()) {
        let raw = build_raw(&years, &rows);

        let result = clean_data(&raw, None).unwrap();

        let actual: Vec<(Value, Value, Value)> = result
            .data
            .iter()
            .map(|row| (row.values[2].clone(), row.values[4].clone(), row.values[5].clone()))
            .collect();
        let expected: Vec<(Value, Value, Value)> = expected_rows(&years, &rows, "PT")
            .into_iter()
            .map(|(age, year, value)| {
                (Value::String(age), Value::Integer(year), Value::Float(value))
            })
            .collect();

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn cleaning_is_deterministic((years, rows) in raw_strategy()) {
        let raw = build_raw(&years, &rows);

        prop_assert_eq!(clean_data(&raw, None).unwrap(), clean_data(&raw, None).unwrap());
    }
}
