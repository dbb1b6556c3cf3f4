//! Line-delimited JSON transport over stdin/stdout
//!
//! Each request line yields exactly one response line:
//! - `{"action":"getCommands"}` -> `{"success":true,"result":{...}}`
//! - `{"action":"invokeCommand","commandName":"echo","argument":"hi"}` -> invocation result
//! - `{"action":"reload"}` -> `{"success":true}`
//!
//! Request-level failures are answered with `{"success":false,"error":"..."}`
//! and the loop keeps running.

use anyhow::{Context, Result};
use nodeterm::{InvokeRequest, TerminalService};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
enum ServeRequest {
    GetCommands,
    InvokeCommand(InvokeRequest),
    Reload,
}

pub fn serve_command(service: Arc<TerminalService>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(serve(service))
}

async fn serve(service: Arc<TerminalService>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("Failed to read request")? {
        if line.trim().is_empty() {
            continue;
        }

        let response = respond(Arc::clone(&service), line).await;

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        stdout
            .write_all(&encoded)
            .await
            .context("Failed to write response")?;
        stdout.flush().await.context("Failed to flush stdout")?;
    }

    debug!("stdin closed, stopping");
    Ok(())
}

/// Answer one request line; a panicking command only fails its own line
async fn respond(service: Arc<TerminalService>, line: String) -> Value {
    // Commands may block; keep them off the reactor
    match tokio::task::spawn_blocking(move || handle_line(&service, &line)).await {
        Ok(response) => response,
        Err(error) => {
            warn!("Request handler panicked: {error}");
            error_response("Request handler panicked".to_string())
        }
    }
}

fn handle_line(service: &TerminalService, line: &str) -> Value {
    let request: ServeRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(error) => return error_response(format!("Invalid request: {error}")),
    };

    let outcome = match request {
        ServeRequest::GetCommands => service
            .list_commands()
            .map_err(anyhow::Error::from)
            .and_then(|response| Ok(serde_json::to_value(response)?)),
        ServeRequest::InvokeCommand(invoke) => service
            .invoke_command(&invoke)
            .map_err(anyhow::Error::from)
            .and_then(|result| Ok(serde_json::to_value(result)?)),
        ServeRequest::Reload => service
            .reload()
            .map(|()| json!({ "success": true }))
            .map_err(anyhow::Error::from),
    };

    outcome.unwrap_or_else(|error| error_response(format!("{error:#}")))
}

fn error_response(message: String) -> Value {
    json!({ "success": false, "error": message })
}
