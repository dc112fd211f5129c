//! Markdown rendering for tool results
//!
//! Tables are pipe-delimited with a `---` separator row. Rendering is
//! deterministic: the same input always yields byte-identical text.

use datagroom_domain::{AggregationResultRow, DatasetSchema, Filter};
use serde_json::Value;

/// Sentinel for an empty row set
pub const NO_DATA: &str = "No data";

/// Sentinel line for an empty aggregation result
pub const NO_RESULTS: &str = "No results found.";

/// Renders query, aggregation and schema output as markdown
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Render rows as a table.
    ///
    /// Columns are the keys of the first row, in its order. Later rows are
    /// rendered against that column set: missing cells are empty and extra
    /// keys are dropped.
    pub fn table(rows: &[Value]) -> String {
        let Some(first) = rows.first() else {
            return NO_DATA.to_string();
        };
        let columns: Vec<&str> = match first {
            Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        };

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(table_row(columns.iter().map(|c| c.to_string())));
        lines.push(separator_row(columns.len()));
        for row in rows {
            lines.push(table_row(
                columns
                    .iter()
                    .map(|column| format_cell(row.get(*column).unwrap_or(&Value::Null))),
            ));
        }
        lines.join("\n")
    }

    /// Multi-line query report with counts and the applied filters
    pub fn query_summary(
        dataset_name: &str,
        total_matching: u64,
        rows_returned: u64,
        filters: &[Filter],
        offset: u64,
        has_more: bool,
    ) -> String {
        let mut lines = vec![
            format!("# Query Results: {}", dataset_name),
            String::new(),
            format!("**Total Matching Rows**: {}", group_thousands(total_matching)),
            format!("**Rows Returned**: {}", group_thousands(rows_returned)),
            format!("**Offset**: {}", group_thousands(offset)),
            format!("**Has More**: {}", yes_no(has_more)),
        ];

        if !filters.is_empty() {
            lines.push(String::new());
            lines.push("**Applied Filters**:".to_string());
            for filter in filters {
                lines.push(format!(
                    "- `{}` {} `{}`",
                    filter.field(),
                    filter.kind().as_str(),
                    plain_value(filter.value())
                ));
            }
        }

        lines.join("\n")
    }

    /// Aggregation rows as a summary table.
    ///
    /// Columns are chosen from the first row: the group value (only when
    /// `group_by` was given), then whichever of count/sum/avg/min/max it has.
    pub fn aggregation_summary(
        dataset_name: &str,
        rows: &[AggregationResultRow],
        group_by: Option<&str>,
    ) -> String {
        let mut lines = vec![format!("# Aggregation Results: {}", dataset_name), String::new()];
        if let Some(group_by) = group_by {
            lines.push(format!("**Grouped by**: `{}`", group_by));
            lines.push(String::new());
        }

        let Some(first) = rows.first() else {
            lines.push(NO_RESULTS.to_string());
            return lines.join("\n");
        };

        let columns = AggregationColumns {
            group: group_by.filter(|_| first.group_value.is_some()),
            count: first.count.is_some(),
            sum: first.sum.is_some(),
            avg: first.avg.is_some(),
            min: first.min.is_some(),
            max: first.max.is_some(),
        };

        lines.push(table_row(columns.headers()));
        lines.push(separator_row(columns.len()));
        for row in rows {
            lines.push(table_row(columns.cells(row)));
        }
        lines.join("\n")
    }

    /// Schema document: totals, key fields and one table row per column
    pub fn schema(schema: &DatasetSchema) -> String {
        let mut lines = vec![
            format!("# Schema: {}", schema.dataset_name),
            String::new(),
            format!("**Total Rows**: {}", group_thousands(schema.total_rows)),
        ];
        if !schema.keys.is_empty() {
            let keys: Vec<String> = schema.keys.iter().map(|k| format!("`{}`", k)).collect();
            lines.push(format!("**Key Fields**: {}", keys.join(", ")));
        }
        lines.push(String::new());

        if schema.columns.is_empty() {
            lines.push("No columns".to_string());
            return lines.join("\n");
        }

        lines.push(table_row(
            ["Column", "Type", "Editable", "Visible", "Sample Values"]
                .into_iter()
                .map(String::from),
        ));
        lines.push(separator_row(5));
        for column in &schema.columns {
            let samples: Vec<String> = column.sample_values.iter().map(format_cell).collect();
            lines.push(table_row(
                [
                    escape_pipes(&column.name),
                    escape_pipes(&column.column_type),
                    yes_no(column.editable).to_string(),
                    yes_no(column.visible).to_string(),
                    samples.join(", "),
                ]
                .into_iter(),
            ));
        }
        lines.join("\n")
    }
}

struct AggregationColumns<'a> {
    group: Option<&'a str>,
    count: bool,
    sum: bool,
    avg: bool,
    min: bool,
    max: bool,
}

impl AggregationColumns<'_> {
    fn headers(&self) -> impl Iterator<Item = String> {
        let mut headers = Vec::new();
        if let Some(group) = self.group {
            headers.push(escape_pipes(group));
        }
        for (present, label) in [
            (self.count, "Count"),
            (self.sum, "Sum"),
            (self.avg, "Average"),
            (self.min, "Min"),
            (self.max, "Max"),
        ] {
            if present {
                headers.push(label.to_string());
            }
        }
        headers.into_iter()
    }

    fn len(&self) -> usize {
        usize::from(self.group.is_some())
            + [self.count, self.sum, self.avg, self.min, self.max]
                .iter()
                .filter(|c| **c)
                .count()
    }

    fn cells(&self, row: &AggregationResultRow) -> impl Iterator<Item = String> {
        let mut cells = Vec::new();
        if self.group.is_some() {
            cells.push(optional_cell(row.group_value.as_ref()));
        }
        if self.count {
            cells.push(row.count.map(|c| c.to_string()).unwrap_or_default());
        }
        if self.sum {
            cells.push(row.sum.map(|s| s.to_string()).unwrap_or_default());
        }
        if self.avg {
            cells.push(row.avg.map(|a| format!("{:.2}", a)).unwrap_or_default());
        }
        if self.min {
            cells.push(optional_cell(row.min.as_ref()));
        }
        if self.max {
            cells.push(optional_cell(row.max.as_ref()));
        }
        cells.into_iter()
    }
}

fn table_row(cells: impl Iterator<Item = String>) -> String {
    format!("| {} |", cells.collect::<Vec<_>>().join(" | "))
}

fn separator_row(columns: usize) -> String {
    table_row(std::iter::repeat_n("---".to_string(), columns))
}

fn optional_cell(value: Option<&Value>) -> String {
    value.map(format_cell).unwrap_or_default()
}

/// Stringify one table cell: null is empty, composites are JSON text and
/// `|` inside strings is escaped
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => escape_pipes(s),
        Value::Array(_) | Value::Object(_) => value.to_string(),
        other => other.to_string(),
    }
}

fn escape_pipes(s: &str) -> String {
    s.replace('|', "\\|")
}

/// Filter values in summaries: strings bare, composites as JSON text
fn plain_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// `1234567` → `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagroom_domain::{ColumnInfo, FilterType};
    use serde_json::json;

    #[test]
    fn test_table_empty() {
        assert_eq!(MarkdownFormatter::table(&[]), "No data");
    }

    #[test]
    fn test_table_uses_first_row_columns() {
        let rows = vec![
            json!({"name": "a|b", "tags": ["x", "y"], "note": null}),
            json!({"name": "c", "extra": 1}),
        ];
        assert_eq!(
            MarkdownFormatter::table(&rows),
            "| name | tags | note |\n\
             | --- | --- | --- |\n\
             | a\\|b | [\"x\",\"y\"] |  |\n\
             | c |  |  |"
        );
    }

    #[test]
    fn test_table_is_deterministic() {
        let rows = vec![json!({"b": 2, "a": 1}), json!({"a": 3, "b": 4})];
        let first = MarkdownFormatter::table(&rows);
        assert_eq!(first, MarkdownFormatter::table(&rows));
        assert!(first.starts_with("| b | a |"));
    }

    #[test]
    fn test_query_summary() {
        let filters = vec![
            Filter::new("status", FilterType::Eq, "open").unwrap(),
            Filter::new("region", FilterType::In, json!(["EU", "US"])).unwrap(),
        ];
        let summary = MarkdownFormatter::query_summary("orders", 1234567, 100, &filters, 0, true);
        assert_eq!(
            summary,
            "# Query Results: orders\n\
             \n\
             **Total Matching Rows**: 1,234,567\n\
             **Rows Returned**: 100\n\
             **Offset**: 0\n\
             **Has More**: Yes\n\
             \n\
             **Applied Filters**:\n\
             - `status` eq `open`\n\
             - `region` in `[\"EU\",\"US\"]`"
        );
    }

    #[test]
    fn test_query_summary_without_filters() {
        let summary = MarkdownFormatter::query_summary("orders", 0, 0, &[], 25, false);
        assert!(summary.ends_with("**Has More**: No"));
        assert!(!summary.contains("Applied Filters"));
    }

    #[test]
    fn test_aggregation_summary_count() {
        let text = MarkdownFormatter::aggregation_summary(
            "orders",
            &[AggregationResultRow::count(42)],
            None,
        );
        assert_eq!(
            text,
            "# Aggregation Results: orders\n\n| Count |\n| --- |\n| 42 |"
        );
    }

    #[test]
    fn test_aggregation_summary_grouped_with_avg() {
        let rows = vec![AggregationResultRow {
            group_value: Some(json!("EU")),
            count: Some(3),
            avg: Some(10.0 / 3.0),
            ..Default::default()
        }];
        let text = MarkdownFormatter::aggregation_summary("orders", &rows, Some("region"));
        assert!(text.contains("**Grouped by**: `region`"));
        assert!(text.contains("| region | Count | Average |"));
        assert!(text.contains("| EU | 3 | 3.33 |"));
    }

    #[test]
    fn test_aggregation_summary_empty() {
        let text = MarkdownFormatter::aggregation_summary("orders", &[], None);
        assert!(text.ends_with(NO_RESULTS));
    }

    #[test]
    fn test_schema_markdown() {
        let schema = DatasetSchema {
            dataset_name: "orders".to_string(),
            columns: vec![ColumnInfo {
                name: "status".to_string(),
                column_type: "string".to_string(),
                editable: true,
                visible: true,
                sample_values: vec![json!("open"), json!("closed")],
            }],
            total_rows: 1500,
            sample_data: vec![],
            keys: vec!["id".to_string()],
        };
        let text = MarkdownFormatter::schema(&schema);
        assert!(text.starts_with("# Schema: orders\n\n**Total Rows**: 1,500"));
        assert!(text.contains("**Key Fields**: `id`"));
        assert!(text.contains("| status | string | Yes | Yes | open, closed |"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
