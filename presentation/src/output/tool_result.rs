//! Default rendering of tool outcomes

use super::formatter::OutputFormatter;
use super::markdown::MarkdownFormatter;
use datagroom_application::{
    AggregateDatasetOutput, ListDatasetsOutput, QueryDatasetOutput, SampleDatasetOutput,
    ToolOutput,
};
use datagroom_domain::{DatasetSchema, ResponseFormat, ToolResult};
use serde::Serialize;
use serde_json::{Value, json};

/// Text for a sample that came back empty
pub const EMPTY_SAMPLE: &str = "No data in dataset or access denied.";

/// Markdown summaries and tables for text, serialized results for
/// `structuredContent`
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolResultFormatter;

impl OutputFormatter for ToolResultFormatter {
    fn format(&self, output: ToolOutput) -> ToolResult {
        match output {
            ToolOutput::Schema(schema) => Self::schema(schema),
            ToolOutput::Query(query) => Self::query(query),
            ToolOutput::Aggregate(aggregate) => Self::aggregate(aggregate),
            ToolOutput::List(list) => Self::list(list),
            ToolOutput::Sample(sample) => Self::sample(sample),
        }
    }
}

impl ToolResultFormatter {
    fn schema(schema: DatasetSchema) -> ToolResult {
        ToolResult::text(MarkdownFormatter::schema(&schema)).with_structured(to_value(&schema))
    }

    fn query(output: QueryDatasetOutput) -> ToolResult {
        let QueryDatasetOutput {
            result,
            filters,
            response_format,
        } = output;

        let summary = MarkdownFormatter::query_summary(
            &result.dataset_name,
            result.total_matching,
            result.rows_returned,
            &filters,
            result.offset,
            result.has_more,
        );
        let result = result.with_summary(summary.clone());

        let text = match response_format {
            ResponseFormat::Markdown => {
                format!("{}\n\n{}", summary, MarkdownFormatter::table(&result.data))
            }
            ResponseFormat::Json => serde_json::to_string_pretty(&result).unwrap_or_default(),
        };

        ToolResult::text(text).with_structured(to_value(&result))
    }

    fn aggregate(output: AggregateDatasetOutput) -> ToolResult {
        let text = MarkdownFormatter::aggregation_summary(
            &output.dataset_name,
            &output.rows,
            output.group_by.as_deref(),
        );
        let structured = match output.rows.as_slice() {
            [single] => to_value(single),
            rows => json!({ "results": rows }),
        };
        ToolResult::text(text).with_structured(structured)
    }

    fn list(output: ListDatasetsOutput) -> ToolResult {
        let names: Vec<&str> = output.datasets.iter().map(|d| d.name.as_str()).collect();
        let listed = if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        };
        let text = format!("Datasets ({}): {}", names.len(), listed);

        ToolResult::text(text).with_structured(json!({
            "datasets": output.datasets,
            "dbList": output.db_list,
        }))
    }

    fn sample(output: SampleDatasetOutput) -> ToolResult {
        let SampleDatasetOutput {
            result,
            stratify_by,
        } = output;

        let mut text = if result.data.is_empty() {
            EMPTY_SAMPLE.to_string()
        } else {
            format!(
                "Sample ({} rows):\n{}",
                result.data.len(),
                serde_json::to_string_pretty(&result.data).unwrap_or_default()
            )
        };
        if let Some(field) = stratify_by {
            text.push_str(&format!(
                "\n\nNote: stratify_by '{}' was not applied; rows are the first page of the dataset.",
                field
            ));
        }

        ToolResult::text(text).with_structured(to_value(&result))
    }
}

fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_default()
}
