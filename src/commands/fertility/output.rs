//! Output formatting for area maps.

use crate::db::Value;
use crate::output::{render_grid, Outputable};
use crate::tools::AreaMap;

impl Outputable for AreaMap {
    fn to_table(&self) -> String {
        if self.items.is_empty() {
            return format!("Map {}: no data", self.map_id);
        }
        let rows: Vec<Vec<Value>> = self
            .items
            .iter()
            .map(|i| vec![i.name.clone(), i.value.clone()])
            .collect();
        format!(
            "Map {} ({} areas)\n\n{}",
            self.map_id,
            rows.len(),
            render_grid(&["Area", "Value"], &rows)
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Value;
    use crate::tools::{AreaItem, AreaMap, ClickAction};
    use rstest::{fixture, rstest};

    #[fixture]
    fn europe() -> AreaMap {
        AreaMap {
            map_id: "world".to_string(),
            color_map: "jet".to_string(),
            items: vec![
                AreaItem { name: Value::from("ESP"), value: Value::Float(1.19) },
                AreaItem { name: Value::from("FRA"), value: Value::Float(1.8) },
            ],
            on_click: vec![ClickAction::select_country()],
        }
    }

    crate::output_table_test! {
        test_name: test_to_table,
        fixture: europe,
        fixture_type: AreaMap,
        expected: "\
Map world (2 areas)

Area  Value
----  -----
ESP   1.19
FRA   1.8",
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: europe,
        fixture_type: AreaMap,
        assertions: {
            "type": "AreaMap",
            "mapId": "world",
            "colorMap": "jet",
        },
    }
}
