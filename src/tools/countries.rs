use crate::dataset::{country_col_selector, CountryKey, COUNTRY_COLS, COUNTRY_COL_LABELS};
use crate::db::{QueryArgs, Shaper, Store, StoreError, Value};

use super::payload::{column_info, InfoBox, Table};

/// Every country as (alpha-3 key, display name), ordered by name.
pub async fn country_keys(store: &Store) -> Result<Vec<(String, String)>, StoreError> {
    let shaper = Shaper::new([("key", "?"), ("label", "?")]);
    let rows = store
        .query_to_tuple("country_key_and_label_pairs", QueryArgs::new(), &shaper)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let mut values = row.into_iter().map(|v| v.to_string());
            let key = values.next().unwrap_or_default();
            let label = values.next().unwrap_or_default();
            (key, label)
        })
        .collect())
}

/// Table of every country with all its columns.
pub async fn country_table(store: &Store) -> Result<Table, StoreError> {
    let col_names: Vec<&str> = COUNTRY_COL_LABELS.iter().map(|(col, _)| *col).collect();
    let rows = store
        .query_to_tuple_from_col_names("countries_all", QueryArgs::new(), &col_names)
        .await?;
    Ok(Table {
        columns: column_info(&COUNTRY_COL_LABELS),
        rows,
    })
}

/// Details of one country, matched by name or ISO code regardless of case.
///
/// An unmatched country yields a row of nulls.
pub async fn country_info(store: &Store, country: &CountryKey) -> Result<InfoBox, StoreError> {
    let selector = country_col_selector(&COUNTRY_COLS)?;
    let row = store
        .query_one_or(
            "get_country_by_fuzzy_name",
            QueryArgs::new().with("name", country),
            &selector,
            vec![Value::Null; COUNTRY_COLS.len()],
        )
        .await?;
    Ok(InfoBox {
        columns: column_info(&COUNTRY_COL_LABELS),
        row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{empty_store, seeded_store};
    use rstest::rstest;

    #[tokio::test]
    async fn test_country_keys_ordered_by_label() {
        let store = seeded_store().await;
        let keys = country_keys(&store).await.unwrap();
        assert_eq!(
            keys,
            vec![
                ("FRA".to_string(), "France".to_string()),
                ("ITA".to_string(), "Italy".to_string()),
                ("JPN".to_string(), "Japan".to_string()),
                ("ESP".to_string(), "Spain".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_country_table_rows_follow_columns() {
        let store = seeded_store().await;
        let table = country_table(&store).await.unwrap();
        assert_eq!(table.columns.len(), 8);
        assert_eq!(table.columns[1], ("alpha_2".to_string(), "ISO Code 2".to_string()));
        assert_eq!(table.rows.len(), 4);
        assert_eq!(
            table.rows[0],
            vec![
                Value::from("France"),
                Value::from("FR"),
                Value::from("FRA"),
                Value::from("250"),
                Value::from("Europe"),
                Value::from("Western Europe"),
                Value::from("150"),
                Value::from("155"),
            ]
        );
    }

    #[rstest]
    #[case("ESP")]
    #[case("es")]
    #[case("spain")]
    #[case("spa%")]
    #[case("SP_IN")]
    #[case("e_")]
    #[tokio::test]
    async fn test_country_info_fuzzy_match(#[case] input: &str) {
        let store = seeded_store().await;
        let info = country_info(&store, &CountryKey::new(input)).await.unwrap();
        assert_eq!(info.row[0], Value::from("Spain"));
        assert_eq!(info.row[2], Value::from("ESP"));
    }

    #[tokio::test]
    async fn test_country_info_pattern_takes_first_name() {
        let store = seeded_store().await;
        let info = country_info(&store, &CountryKey::new("%a%")).await.unwrap();
        assert_eq!(info.row[0], Value::from("France"));
    }

    #[tokio::test]
    async fn test_country_info_regex_characters_are_literal() {
        let store = seeded_store().await;
        let info = country_info(&store, &CountryKey::new("sp.in")).await.unwrap();
        assert!(info.row.iter().all(Value::is_null));
    }

    #[tokio::test]
    async fn test_country_info_unknown_is_all_null() {
        let store = seeded_store().await;
        let info = country_info(&store, &CountryKey::new("Atlantis")).await.unwrap();
        assert_eq!(info.columns.len(), info.row.len());
        assert!(info.row.iter().all(Value::is_null));
    }

    #[tokio::test]
    async fn test_country_keys_without_tables_fail() {
        let store = empty_store().await;
        assert!(matches!(
            country_keys(&store).await,
            Err(StoreError::QueryFailed { .. })
        ));
    }
}
