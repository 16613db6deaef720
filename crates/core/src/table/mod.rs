use serde_json::Value;

use crate::{
    payload::Record,
    surface::{Table, TableRow},
};

/// Renders homogeneous records into `target`.
///
/// Columns come from the first record's keys in insertion order and are not
/// recomputed per row. An empty slice leaves `target` exactly as it was.
pub fn fill_table(target: &mut Table, rows: &[Record]) {
    let Some(first) = rows.first() else {
        return;
    };
    let columns: Vec<String> = first.keys().cloned().collect();

    target.header = columns.clone();
    target.body = rows
        .iter()
        .map(|record| {
            TableRow::new(
                columns
                    .iter()
                    .map(|column| record.get(column).map(cell_text).unwrap_or_default())
                    .collect(),
            )
        })
        .collect();
}

/// Text for a single cell: strings unquoted, null empty, the rest as JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records(value: Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn derives_columns_from_first_record() {
        let mut table = Table::default();
        fill_table(&mut table, &records(json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}])));

        assert_eq!(table.header, vec!["a", "b"]);
        assert_eq!(table.body[0].cells, vec!["1", "2"]);
        assert_eq!(table.body[1].cells, vec!["3", "4"]);
    }

    #[test]
    fn keeps_insertion_order_of_keys() {
        let mut table = Table::default();
        fill_table(&mut table, &records(json!([{"zeta": 1, "alpha": 2, "mid": 3}])));
        assert_eq!(table.header, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn empty_rows_leave_prior_content() {
        let mut table = Table::default();
        fill_table(&mut table, &records(json!([{"a": 1}])));
        let before = table.clone();

        fill_table(&mut table, &[]);
        assert_eq!(table, before);
    }

    #[test]
    fn replaces_previous_content_entirely() {
        let mut table = Table::default();
        fill_table(&mut table, &records(json!([{"a": 1}, {"a": 2}, {"a": 3}])));
        fill_table(&mut table, &records(json!([{"b": "x"}])));

        assert_eq!(table.header, vec!["b"]);
        assert_eq!(table.body.len(), 1);
        assert_eq!(table.body[0].cells, vec!["x"]);
    }

    #[test]
    fn missing_keys_render_empty_and_extra_keys_are_dropped() {
        let mut table = Table::default();
        fill_table(
            &mut table,
            &records(json!([{"a": 1, "b": 2}, {"b": 5, "c": 9}])),
        );

        assert_eq!(table.header, vec!["a", "b"]);
        assert_eq!(table.body[1].cells, vec!["", "5"]);
    }

    #[test]
    fn stringifies_json_values() {
        assert_eq!(cell_text(&json!("Aprobado")), "Aprobado");
        assert_eq!(cell_text(&json!(3.25)), "3.25");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&Value::Null), "");
    }
}
