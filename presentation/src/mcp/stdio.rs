//! Stdio transport: newline-delimited JSON-RPC
//!
//! One message per line on the reader, one response per line on the
//! writer. Logging must go to stderr while this transport runs.

use super::jsonrpc::RpcResponse;
use super::server::McpServer;
use datagroom_application::DatasetGateway;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Process messages until EOF or cancellation
pub async fn run<G, R, W>(
    server: &McpServer<G>,
    reader: R,
    mut writer: W,
    shutdown: CancellationToken,
) -> std::io::Result<()>
where
    G: DatasetGateway + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut segments = reader.split(b'\n');

    loop {
        let segment = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown requested, closing stdio transport");
                break;
            }
            segment = segments.next_segment() => segment?,
        };

        let Some(segment) = segment else {
            info!("EOF on stdin, shutting down");
            break;
        };

        let response = match String::from_utf8(segment) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => server.handle_message(line.trim_end_matches('\r')).await,
            Err(e) => {
                warn!("Discarding non UTF-8 input line: {}", e);
                Some(RpcResponse::parse_error())
            }
        };

        if let Some(response) = response {
            writer.write_all(response.to_json().as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    Ok(())
}

/// Run over the process's stdin and stdout
pub async fn run_stdio<G: DatasetGateway + 'static>(
    server: &McpServer<G>,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run(server, stdin, tokio::io::stdout(), shutdown).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::server::test_support::{StubGateway, server};
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_line_protocol() {
        let server = server(Arc::new(StubGateway::new(Ok(json!({})))));
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n",
        );
        let mut output = Vec::new();

        run(&server, input.as_bytes(), &mut output, CancellationToken::new())
            .await
            .unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1], json!({"jsonrpc": "2.0", "id": 2, "result": {}}));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_transport() {
        let server = server(Arc::new(StubGateway::new(Ok(json!({})))));
        let mut input = b"\xff\xfe{\"jsonrpc\"}\n".to_vec();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":7,"method":"ping"}"#);
        input.extend_from_slice(b"\r\n");
        let mut output = Vec::new();

        run(&server, input.as_slice(), &mut output, CancellationToken::new())
            .await
            .unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[1], json!({"jsonrpc": "2.0", "id": 7, "result": {}}));
    }

    #[tokio::test]
    async fn test_cancelled_before_input() {
        let server = server(Arc::new(StubGateway::new(Ok(json!({})))));
        let shutdown = CancellationToken::new();
        shutdown.cancel();
        let (reader, _keep_open) = tokio::io::duplex(64);
        let mut output = Vec::new();

        run(&server, tokio::io::BufReader::new(reader), &mut output, shutdown)
            .await
            .unwrap();
        assert!(output.is_empty());
    }
}
