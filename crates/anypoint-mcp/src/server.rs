//! MCP Server
//!
//! Handles the MCP protocol, processing JSON-RPC 2.0 messages. The same
//! handler backs the stdio loop and the SSE transport.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::handler::Dispatcher;
use crate::protocol::{
    CallToolParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, ListToolsResult,
    ServerCapabilities, ServerInfo, ToolsCapability, INTERNAL_ERROR, INVALID_PARAMS,
    METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
};

/// Name announced in `initialize`
pub const SERVER_NAME: &str = "mulesoft-anypoint";

pub struct McpServer {
    dispatcher: Arc<Dispatcher>,
    initialized: AtomicBool,
}

impl McpServer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Relaxed)
    }

    /// Run the server, reading from stdin and writing to stdout
    pub async fn run(&self) -> anyhow::Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve newline-delimited JSON-RPC until `reader` reaches EOF
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let bytes_read = reader.read_until(b'\n', &mut buf).await?;

            if bytes_read == 0 {
                info!("Client disconnected");
                break;
            }

            let resp = match std::str::from_utf8(&buf) {
                Ok(text) => {
                    let line = text.trim();
                    if line.is_empty() {
                        continue;
                    }
                    debug!("Received: {}", line);
                    self.handle_message(line).await
                }
                Err(e) => {
                    error!("Received a line that is not UTF-8: {}", e);
                    Some(JsonRpcResponse::error(
                        None,
                        PARSE_ERROR,
                        format!("Parse error: {}", e),
                    ))
                }
            };

            if let Some(resp) = resp {
                write_response(&mut writer, &resp).await?;
            }
        }

        Ok(())
    }

    /// Handle a single JSON-RPC message; notifications get no response
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                return Some(JsonRpcResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        let Some(id) = request.id else {
            self.handle_notification(&request.method);
            return None;
        };

        match self.handle_request(&request.method, request.params).await {
            Ok(value) => Some(JsonRpcResponse::success(Some(id), value)),
            Err((code, message)) => Some(JsonRpcResponse::error(Some(id), code, message)),
        }
    }

    fn handle_notification(&self, method: &str) {
        match method {
            "notifications/initialized" => {
                info!("Client initialized");
                self.initialized.store(true, Ordering::Relaxed);
            }
            "notifications/cancelled" => {
                debug!("Request cancelled");
            }
            _ => {
                debug!("Unknown notification: {}", method);
            }
        }
    }

    async fn handle_request(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, (i32, String)> {
        match method {
            "initialize" => self.handle_initialize(),
            "tools/list" => self.handle_list_tools(),
            "tools/call" => self.handle_call_tool(params).await,
            "ping" => Ok(json!({})),
            _ => {
                warn!("Unknown method: {}", method);
                Err((METHOD_NOT_FOUND, format!("Method not found: {}", method)))
            }
        }
    }

    fn handle_initialize(&self) -> Result<Value, (i32, String)> {
        info!("Initializing MCP server ({})", self.dispatcher.mode().describe());

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {}),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        serde_json::to_value(result)
            .map_err(|e| (INTERNAL_ERROR, format!("Serialization error: {}", e)))
    }

    fn handle_list_tools(&self) -> Result<Value, (i32, String)> {
        let result = ListToolsResult {
            tools: self.dispatcher.definitions(),
        };

        serde_json::to_value(result)
            .map_err(|e| (INTERNAL_ERROR, format!("Serialization error: {}", e)))
    }

    async fn handle_call_tool(&self, params: Option<Value>) -> Result<Value, (i32, String)> {
        let params: CallToolParams = match params {
            Some(p) => serde_json::from_value(p)
                .map_err(|e| (INVALID_PARAMS, format!("Invalid params: {}", e)))?,
            None => return Err((INVALID_PARAMS, "Missing params".to_string())),
        };

        let result = self.dispatcher.call(&params.name, &params.arguments).await;

        serde_json::to_value(result)
            .map_err(|e| (INTERNAL_ERROR, format!("Serialization error: {}", e)))
    }
}

async fn write_response<W>(writer: &mut W, resp: &JsonRpcResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let resp_str = serde_json::to_string(resp)?;
    debug!("Sending: {}", resp_str);
    writer.write_all(resp_str.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
