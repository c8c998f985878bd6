use crate::dataset::{CountryKey, DemType, DEM_AGE_GROUPS};
use crate::db::{Identity, QueryArgs, Row, Shaper, Store, StoreError, Value};

use super::payload::{column_info, PopulationPyramid, PyramidItem, Series};

async fn dem_row(
    store: &Store,
    country: &CountryKey,
    year: i64,
    dem_type: DemType,
) -> Result<Row, StoreError> {
    let args = QueryArgs::new()
        .with("code", country)
        .with("year", year)
        .with("type", &dem_type);
    store
        .query_one_or("dem_by_code_and_year", args, &Identity, Row::default())
        .await
}

fn count(row: &Row, col: &str) -> Value {
    match row.get(col) {
        None | Some(Value::Null) => Value::Int(0),
        Some(v) => v.clone(),
    }
}

/// Male (start) and female (end) counts per age group for one country and
/// year, oldest group first. Missing rows or values count as zero.
pub async fn population_pyramid(
    store: &Store,
    country: &CountryKey,
    year: i64,
) -> Result<PopulationPyramid, StoreError> {
    let male = dem_row(store, country, year, DemType::Male).await?;
    let female = dem_row(store, country, year, DemType::Female).await?;

    let items = DEM_AGE_GROUPS
        .iter()
        .rev()
        .map(|(col, label)| PyramidItem {
            label: label.to_string(),
            start: count(&male, col),
            end: count(&female, col),
        })
        .collect();
    Ok(PopulationPyramid { items })
}

/// Total population per age group over the years, for one country.
pub async fn demography_over_time(
    store: &Store,
    country: &CountryKey,
) -> Result<Series, StoreError> {
    let shaper = DEM_AGE_GROUPS
        .iter()
        .fold(Shaper::new([("year", 0)]), |shaper, (col, _)| shaper.col(*col, 0));
    let args = QueryArgs::new()
        .with("code", country)
        .with("type", &DemType::Total);
    let rows = store.query_to_tuple("dem_by_code", args, &shaper).await?;

    let mut cols = column_info(&[("year", "Year")]);
    cols.extend(column_info(&DEM_AGE_GROUPS));
    Ok(Series {
        title: "Demography by Country and Year".to_string(),
        y_col_title: "Inhabitants".to_string(),
        x_col: "year".to_string(),
        x_axis_type: "time".to_string(),
        val_cols: DEM_AGE_GROUPS.iter().map(|(col, _)| col.to_string()).collect(),
        smooth: false,
        cols,
        rows,
    })
}
