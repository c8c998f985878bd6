use crate::dataset::{fert_col_selector, CountryKey};
use crate::db::{QueryArgs, Shaper, Store, StoreError, Value};

use super::payload::{column_info, AreaItem, AreaMap, ClickAction, Series};

/// Fertility rate per country for one year, as a world map.
pub async fn world_fertility(store: &Store, year: i64) -> Result<AreaMap, StoreError> {
    let shaper = Shaper::new([("country", Value::from("?")), ("fertility", Value::Int(0))]);
    let rows = store
        .query_to_tuple("fert_by_year", QueryArgs::new().with("year", year), &shaper)
        .await?;

    let items = rows
        .into_iter()
        .map(|row| {
            let mut values = row.into_iter();
            AreaItem {
                name: values.next().unwrap_or(Value::Null),
                value: values.next().unwrap_or(Value::Null),
            }
        })
        .collect();
    Ok(AreaMap {
        map_id: "world".to_string(),
        color_map: "jet".to_string(),
        items,
        on_click: vec![ClickAction::select_country()],
    })
}

/// Fertility rate of one country over the years.
pub async fn fertility_over_time(
    store: &Store,
    country: &CountryKey,
) -> Result<Series, StoreError> {
    let selector = fert_col_selector(&["year", "fertility"])?;
    let rows = store
        .query_with(
            "fert_by_country",
            QueryArgs::new().with("country", country),
            &selector,
        )
        .await?;
    Ok(Series {
        title: "Fertility Rate by Country and Year".to_string(),
        y_col_title: "Children per Woman".to_string(),
        x_col: "year".to_string(),
        x_axis_type: "time".to_string(),
        val_cols: vec!["fertility".to_string()],
        smooth: true,
        cols: column_info(&[("year", "Year"), ("fertility", "Fertility Rate")]),
        rows,
    })
}
