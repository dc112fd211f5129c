//! MCP protocol handling
//!
//! Implements the Model Context Protocol methods:
//! - initialize / notifications/initialized
//! - ping
//! - tools/list
//! - tools/call
//!
//! Transports hand raw JSON text to [`McpServer::handle_message`] and write
//! back whatever response it produces.

use super::jsonrpc::{METHOD_NOT_FOUND, RpcRequest, RpcResponse};
use crate::output::{OutputFormatter, ToolResultFormatter};
use datagroom_application::{DatasetGateway, ToolDispatcher, ToolError, ToolSchemaPort};
use datagroom_domain::{ToolCall, ToolResult};
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

/// MCP protocol version we support
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name reported in `serverInfo` and by the health endpoint
pub const SERVER_NAME: &str = "datagroom-mcp-server";

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP server state. Shared read-only across concurrent requests.
pub struct McpServer<G: DatasetGateway + 'static> {
    dispatcher: ToolDispatcher<G>,
    schema: Box<dyn ToolSchemaPort>,
    formatter: Box<dyn OutputFormatter>,
}

impl<G: DatasetGateway + 'static> McpServer<G> {
    pub fn new(dispatcher: ToolDispatcher<G>, schema: Box<dyn ToolSchemaPort>) -> Self {
        Self {
            dispatcher,
            schema,
            formatter: Box::new(ToolResultFormatter),
        }
    }

    /// Handle one raw JSON-RPC message.
    ///
    /// Returns `None` for notifications, which must not be answered.
    pub async fn handle_message(&self, raw: &str) -> Option<RpcResponse> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Invalid JSON-RPC message: {}", e);
                return Some(RpcResponse::parse_error());
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<RpcRequest>(value) {
            Ok(req) if req.jsonrpc == "2.0" => self.handle(req).await,
            _ => Some(RpcResponse::invalid_request(id)),
        }
    }

    pub async fn handle(&self, req: RpcRequest) -> Option<RpcResponse> {
        if req.is_notification() {
            debug!("Notification received: {}", req.method);
            return None;
        }
        Some(self.dispatch(&req).await)
    }

    /// Dispatch a JSON-RPC request to the appropriate handler
    pub async fn dispatch(&self, req: &RpcRequest) -> RpcResponse {
        debug!("Dispatching method: {}", req.method);

        match req.method.as_str() {
            "initialize" => self.handle_initialize(req),
            "notifications/initialized" | "ping" => RpcResponse::success(req.id.clone(), json!({})),
            "tools/list" => self.handle_tools_list(req),
            "tools/call" => self.handle_tools_call(req).await,
            _ => {
                warn!("Unknown method: {}", req.method);
                RpcResponse::method_not_found(req.id.clone(), &req.method)
            }
        }
    }

    fn handle_initialize(&self, req: &RpcRequest) -> RpcResponse {
        if let Some(client) = req.params.get("clientInfo") {
            info!("MCP initialize from client: {}", client);
        } else {
            info!("MCP initialize");
        }

        RpcResponse::success(
            req.id.clone(),
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {"listChanged": false}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                }
            }),
        )
    }

    fn handle_tools_list(&self, req: &RpcRequest) -> RpcResponse {
        let tools = self.schema.all_tools_schema(self.dispatcher.spec());
        RpcResponse::success(req.id.clone(), json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, req: &RpcRequest) -> RpcResponse {
        let Some(name) = req.params.get("name").and_then(Value::as_str) else {
            return RpcResponse::invalid_params(req.id.clone(), "Missing 'name' parameter");
        };
        let arguments = req.params.get("arguments").cloned().unwrap_or(Value::Null);

        let call = match ToolCall::from_value(name, arguments) {
            Ok(call) => call,
            Err(e) => return RpcResponse::invalid_params(req.id.clone(), e.to_string()),
        };

        info!("Calling tool: {}", name);

        match self.dispatcher.dispatch(&call).await {
            Ok(output) => {
                RpcResponse::success(req.id.clone(), call_result(self.formatter.format(output), false))
            }
            Err(e @ ToolError::UnknownTool(_)) => {
                RpcResponse::error(req.id.clone(), METHOD_NOT_FOUND, e.to_string())
            }
            Err(e) if e.is_pre_flight() => {
                warn!("Tool {} rejected: {}", name, e);
                RpcResponse::success(req.id.clone(), call_result(ToolResult::text(e.to_string()), true))
            }
            Err(e) => {
                error!("Tool {} failed: {}", name, e);
                RpcResponse::success(req.id.clone(), call_result(ToolResult::text(e.to_string()), true))
            }
        }
    }
}

/// `tools/call` result: `{content: [{type: "text", text}], structuredContent, isError}`
fn call_result(result: ToolResult, is_error: bool) -> Value {
    let mut value = json!({
        "content": [{"type": "text", "text": result.text}],
        "isError": is_error,
    });
    if let (Some(structured), Some(map)) = (result.structured, value.as_object_mut()) {
        map.insert("structuredContent".to_string(), structured);
    }
    value
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use datagroom_application::GatewayError;
    use std::sync::Arc;

    fn call(name: &str, arguments: Value) -> String {
        json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments}
        })
        .to_string()
    }

    async fn result_of(server: &McpServer<StubGateway>, raw: &str) -> Value {
        let resp = server.handle_message(raw).await.unwrap();
        assert!(resp.error.is_none(), "unexpected error: {:?}", resp.error);
        resp.result.unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = server(Arc::new(StubGateway::new(Ok(json!({})))));
        let result = result_of(
            &server,
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"clientInfo":{"name":"cursor"}}}"#,
        )
        .await;
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_notification_has_no_response() {
        let server = server(Arc::new(StubGateway::new(Ok(json!({})))));
        let resp = server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(resp.is_none());
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let server = server(Arc::new(StubGateway::new(Ok(json!({})))));

        let resp = server.handle_message("{not json").await.unwrap();
        assert_eq!(resp.error.unwrap().code, -32700);

        let resp = server.handle_message(r#"{"jsonrpc":"2.0","id":1}"#).await.unwrap();
        assert_eq!(resp.error.unwrap().code, -32600);
        assert_eq!(resp.id, json!(1));

        let resp = server
            .handle_message(r#"{"jsonrpc":"1.0","id":2,"method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(resp.error.unwrap().code, -32600);

        let resp = server
            .handle_message(r#"{"jsonrpc":"2.0","id":3,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(resp.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_ping() {
        let server = server(Arc::new(StubGateway::new(Ok(json!({})))));
        let result = result_of(&server, r#"{"jsonrpc":"2.0","id":"p","method":"ping"}"#).await;
        assert_eq!(result, json!({}));
    }

    #[tokio::test]
    async fn test_tools_list() {
        let server = server(Arc::new(StubGateway::new(Ok(json!({})))));
        let result = result_of(&server, r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).await;
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 5);
        assert_eq!(tools[0]["name"], "datagroom_get_schema");
    }

    #[tokio::test]
    async fn test_tools_call_count() {
        let gateway = Arc::new(StubGateway::new(Ok(json!({"total": 42, "data": [{}]}))));
        let server = server(Arc::clone(&gateway));

        let result = result_of(
            &server,
            &call(
                "datagroom_aggregate_dataset",
                json!({"dataset_name": "orders", "aggregations": [{"operation": "count"}]}),
            ),
        )
        .await;

        assert_eq!(result["isError"], false);
        assert_eq!(result["structuredContent"], json!({"count": 42}));
        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_tools_call_unsupported_is_tool_error() {
        let gateway = Arc::new(StubGateway::new(Ok(json!({"total": 42}))));
        let server = server(Arc::clone(&gateway));

        let result = result_of(
            &server,
            &call(
                "datagroom_aggregate_dataset",
                json!({
                    "dataset_name": "orders",
                    "aggregations": [{"operation": "sum", "field": "amount"}]
                }),
            ),
        )
        .await;

        assert_eq!(result["isError"], true);
        assert!(
            result["content"][0]["text"]
                .as_str()
                .unwrap()
                .starts_with("Unsupported operation")
        );
        assert!(result.get("structuredContent").is_none());
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_tools_call_validation_and_upstream_errors() {
        let server = server(Arc::new(StubGateway::new(Ok(json!({})))));
        let result = result_of(
            &server,
            &call("datagroom_get_schema", json!({"dataset_name": "   "})),
        )
        .await;
        assert_eq!(result["isError"], true);
        assert!(
            result["content"][0]["text"]
                .as_str()
                .unwrap()
                .starts_with("Validation error")
        );

        let failing = server_with_error(GatewayError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        });
        let result = result_of(
            &failing,
            &call("datagroom_query_dataset", json!({"dataset_name": "orders"})),
        )
        .await;
        assert_eq!(result["isError"], true);
        assert_eq!(
            result["content"][0]["text"],
            "Error querying dataset 'orders': Gateway request failed (502): bad gateway"
        );
    }

    fn server_with_error(error: GatewayError) -> McpServer<StubGateway> {
        server(Arc::new(StubGateway::new(Err(error))))
    }

    #[tokio::test]
    async fn test_tools_call_protocol_errors() {
        let server = server(Arc::new(StubGateway::new(Ok(json!({})))));

        let resp = server
            .handle_message(r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{}}"#)
            .await
            .unwrap();
        assert_eq!(resp.error.unwrap().code, -32602);

        let resp = server
            .handle_message(&call("datagroom_get_schema", json!("orders")))
            .await
            .unwrap();
        assert_eq!(resp.error.unwrap().code, -32602);

        let resp = server
            .handle_message(&call("nope", json!({})))
            .await
            .unwrap();
        let error = resp.error.unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "Tool 'nope' not found");
    }

    #[tokio::test]
    async fn test_tools_call_alias() {
        let server = server(Arc::new(StubGateway::new(Ok(json!({"dbList": [{"name": "a"}]})))));
        let result = result_of(&server, &call("list_datasets", json!({}))).await;
        assert_eq!(result["content"][0]["text"], "Datasets (1): a");
    }
}
