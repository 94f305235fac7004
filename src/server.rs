//! Model Context Protocol server over newline-delimited JSON-RPC 2.0.
//!
//! Each request line is handled on its own task so a slow upstream call does
//! not hold up the rest; responses funnel through a single writer task and may
//! therefore arrive out of request order, matched by `id`.

use std::sync::Arc;

use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufReadExt as _, AsyncRead, AsyncWrite, AsyncWriteExt as _, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::Result;
use crate::error::Error;
use crate::registry;
use crate::tools;
use crate::venue::Venue;

pub const SERVER_NAME: &str = "polymarket-mcp";

/// Revision answered when the client asks for one this server does not know.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2024-11-05", "2025-03-26", "2025-06-18"];

const RESPONSE_BUFFER: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    pub data: Option<Value>,
}

impl RpcError {
    fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: message.into(),
            data: None,
        }
    }

    fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: -32600,
            message: message.into(),
            data: None,
        }
    }

    fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
            data: None,
        }
    }
}

/// Serves tool calls against one shared [`Venue`].
#[derive(Debug, Clone)]
pub struct Server {
    venue: Arc<Venue>,
}

impl Server {
    #[must_use]
    pub fn new(venue: Arc<Venue>) -> Self {
        Self { venue }
    }

    /// Serves stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Reads requests from `reader` until EOF and writes responses to
    /// `writer`. Returns once every in-flight request has been answered.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (responses, mut outbox) = mpsc::channel::<Value>(RESPONSE_BUFFER);

        let writer_task = tokio::spawn(async move {
            let mut writer = writer;
            while let Some(message) = outbox.recv().await {
                let mut line = serde_json::to_vec(&message)?;
                line.push(b'\n');
                writer.write_all(&line).await?;
                writer.flush().await?;
            }
            Ok::<_, Error>(())
        });

        info!(server = SERVER_NAME, "serving MCP over stdio");

        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let server = self.clone();
            let responses = responses.clone();
            tokio::spawn(async move {
                if let Some(response) = server.handle_line(&line).await
                    && responses.send(response).await.is_err()
                {
                    warn!("response dropped, output closed");
                }
            });
        }

        debug!("input closed, draining in-flight requests");
        drop(responses);

        writer_task
            .await
            .map_err(|e| Error::internal(format!("response writer failed: {e}")))?
    }

    /// Handles one raw input line. Returns `None` when nothing should be
    /// written back, i.e. for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        match serde_json::from_str::<Value>(line) {
            Ok(incoming) => self.handle_incoming(incoming).await,
            Err(e) => {
                warn!(error = %e, "unparsable message");
                Some(error_response(
                    Value::Null,
                    RpcError::parse_error(format!("Parse error: {e}")),
                ))
            }
        }
    }

    async fn handle_incoming(&self, incoming: Value) -> Option<Value> {
        let batch = match incoming {
            Value::Array(batch) => batch,
            other => return self.handle_message(other).await,
        };

        if batch.is_empty() {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Batch request must not be empty"),
            ));
        }

        let mut responses = Vec::with_capacity(batch.len());
        for item in batch {
            if let Some(response) = self.handle_message(item).await {
                responses.push(response);
            }
        }
        (!responses.is_empty()).then_some(Value::Array(responses))
    }

    /// Handles one JSON-RPC message.
    pub async fn handle_message(&self, incoming: Value) -> Option<Value> {
        let Some(obj) = incoming.as_object() else {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Request must be a JSON object"),
            ));
        };

        if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            let id = obj.get("id").cloned().unwrap_or(Value::Null);
            return Some(error_response(
                id,
                RpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        let Some(method) = obj.get("method").and_then(Value::as_str) else {
            // A response to a server request has nothing to match against,
            // since the server never sends any.
            if obj.contains_key("result") || obj.contains_key("error") {
                debug!("client response ignored");
                return None;
            }
            return obj.get("id").cloned().map(|id| {
                error_response(id, RpcError::invalid_request("method must be a string"))
            });
        };

        let params = obj.get("params").cloned().unwrap_or(Value::Null);
        let Some(id) = obj.get("id").cloned() else {
            debug!(method, "notification ignored");
            return None;
        };

        debug!(method, id = %id, "request");
        Some(match self.handle_request(method, params).await {
            Ok(result) => success_response(id, result),
            Err(error) => error_response(id, error),
        })
    }

    async fn handle_request(
        &self,
        method: &str,
        params: Value,
    ) -> std::result::Result<Value, RpcError> {
        match method {
            "initialize" => Ok(self.initialize_payload(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.tools_list_payload()),
            "tools/call" => self.handle_tools_call(params).await,
            _ => Err(RpcError::method_not_found(method)),
        }
    }

    fn initialize_payload(&self, params: &Value) -> Value {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .filter(|requested| SUPPORTED_PROTOCOL_VERSIONS.contains(requested))
            .unwrap_or(PROTOCOL_VERSION);

        let mode = if self.venue.is_readonly() {
            "Readonly mode is on: order placement and cancellation tools are not available."
        } else {
            "Trading is enabled: order tools submit real orders with real funds."
        };

        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "instructions": format!(
                "Tools for the Polymarket prediction market. Use polymarket_get_markets or \
                 polymarket_get_market to find markets and their outcome token ids, then \
                 polymarket_get_orderbook for prices. Prices are probabilities between 0 and 1. \
                 {mode}"
            ),
        })
    }

    fn tools_list_payload(&self) -> Value {
        json!({ "tools": registry::tools(self.venue.config()) })
    }

    async fn handle_tools_call(&self, params: Value) -> std::result::Result<Value, RpcError> {
        let params = params
            .as_object()
            .ok_or_else(|| RpcError::invalid_params("tools/call params must be an object"))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("tools/call requires string field 'name'"))?;

        let arguments = match params.get("arguments") {
            Some(Value::Object(map)) => map.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                return Err(RpcError::invalid_params(
                    "tools/call 'arguments' must be an object",
                ));
            }
        };

        Ok(tools::call(&self.venue, name, Value::Object(arguments))
            .await
            .into_content())
    }
}

fn success_response(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}

fn error_response(id: Value, error: RpcError) -> Value {
    let mut payload = json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": error.code,
            "message": error.message
        }
    });
    if let Some(data) = error.data {
        payload["error"]["data"] = data;
    }
    payload
}
