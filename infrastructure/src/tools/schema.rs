//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that produces MCP tool
//! descriptors (`{name, description, inputSchema}`) for `tools/list`.

use datagroom_application::ToolSchemaPort;
use datagroom_domain::tool::{ToolDefinition, ToolParameter, ToolSpec};
use serde_json::{Map, Value, json};

/// Default implementation producing JSON Schema input descriptors.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"string"`, `"number"`, `"integer"`, `"boolean"`, `"array"`, `"object"` → same
/// - `"any"` → no `type` constraint
/// - anything else → `"string"`
pub struct JsonSchemaToolConverter;

impl JsonSchemaToolConverter {
    fn object_schema(params: &[ToolParameter]) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in params {
            properties.insert(param.name.clone(), Self::param_schema(param));
            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    fn param_schema(param: &ToolParameter) -> Value {
        let mut schema = match param.param_type.as_str() {
            "object" => match Self::object_schema(&param.properties) {
                Value::Object(map) => map,
                _ => Map::new(),
            },
            "any" => Map::new(),
            other => {
                let schema_type = match other {
                    "number" | "integer" | "boolean" | "array" => other,
                    _ => "string",
                };
                let mut map = Map::new();
                map.insert("type".to_string(), json!(schema_type));
                map
            }
        };

        if !param.description.is_empty() {
            schema.insert("description".to_string(), json!(param.description));
        }
        if !param.enum_values.is_empty() {
            schema.insert("enum".to_string(), json!(param.enum_values));
        }
        if let Some(min) = param.minimum {
            schema.insert("minimum".to_string(), number(min));
        }
        if let Some(max) = param.maximum {
            schema.insert("maximum".to_string(), number(max));
        }
        if let Some(min_items) = param.min_items {
            schema.insert("minItems".to_string(), json!(min_items));
        }
        if let Some(items) = &param.items {
            schema.insert("items".to_string(), Self::param_schema(items));
        }

        Value::Object(schema)
    }
}

/// Whole bounds are emitted as integers (`10000`, not `10000.0`)
fn number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        json!(n as i64)
    } else {
        json!(n)
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        json!({
            "name": tool.name,
            "description": tool.description,
            "inputSchema": Self::object_schema(&tool.parameters),
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<Value> {
        spec.all().map(|t| self.tool_to_schema(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagroom_application::default_tool_spec;

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("datagroom_sample_dataset", "Sample rows")
            .with_parameter(ToolParameter::new("dataset_name", "Dataset", true))
            .with_parameter(
                ToolParameter::new("sample_size", "Rows", false)
                    .with_type("integer")
                    .with_range(Some(1.0), Some(1000.0)),
            );

        let schema = converter.tool_to_schema(&tool);
        assert_eq!(
            schema,
            json!({
                "name": "datagroom_sample_dataset",
                "description": "Sample rows",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "dataset_name": {"type": "string", "description": "Dataset"},
                        "sample_size": {
                            "type": "integer",
                            "description": "Rows",
                            "minimum": 1,
                            "maximum": 1000
                        }
                    },
                    "required": ["dataset_name"]
                }
            })
        );
    }

    #[test]
    fn test_nested_items_and_any() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("t", "d").with_parameter(
            ToolParameter::new("filters", "Filters", false).with_items(
                ToolParameter::new("", "", false)
                    .with_property(ToolParameter::new("field", "Column", true))
                    .with_property(
                        ToolParameter::new("type", "Op", true).with_enum(["eq", "ne"]),
                    )
                    .with_property(ToolParameter::new("value", "Operand", true).with_type("any")),
            ),
        );

        let schema = converter.tool_to_schema(&tool);
        let filters = &schema["inputSchema"]["properties"]["filters"];
        assert_eq!(filters["type"], "array");
        let item = &filters["items"];
        assert_eq!(item["type"], "object");
        assert!(item.get("description").is_none());
        assert_eq!(item["properties"]["type"]["enum"], json!(["eq", "ne"]));
        assert_eq!(item["properties"]["value"], json!({"description": "Operand"}));
        assert_eq!(item["required"], json!(["field", "type", "value"]));
        assert_eq!(schema["inputSchema"]["required"], json!([]));
    }

    #[test]
    fn test_all_tools_schema_keeps_registration_order() {
        let converter = JsonSchemaToolConverter;
        let schemas = converter.all_tools_schema(&default_tool_spec());
        let names: Vec<&str> = schemas.iter().filter_map(|s| s["name"].as_str()).collect();
        assert_eq!(
            names,
            vec![
                "datagroom_get_schema",
                "datagroom_query_dataset",
                "datagroom_aggregate_dataset",
                "datagroom_list_datasets",
                "datagroom_sample_dataset",
            ]
        );
        for schema in &schemas {
            assert_eq!(schema["inputSchema"]["type"], "object");
        }
    }

    #[test]
    fn test_fractional_bound_kept() {
        assert_eq!(number(0.5), json!(0.5));
        assert_eq!(number(10.0), json!(10));
    }
}
