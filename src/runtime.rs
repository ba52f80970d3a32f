//! Sidecar event loop.
//!
//! One reader task turns stdin lines into [`ShellMessage`]s; the loop in
//! [`run`] applies them to the app strictly one at a time and writes every
//! resulting line (notifications first, then the response) to the output.

use std::sync::Mutex;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::app::App;
use crate::rpc_handler::handle_method;
use crate::surface::CommandQueue;
use crate::ui::projection::UiQueue;

/// Capacity of the request channel between the reader task and the loop.
const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum ShellMessage {
    /// One raw request line.
    Request(String),
    /// Input closed.
    Shutdown,
}

/// The app plus the queues its surfaces and projection write into.
pub struct Shell {
    app: Mutex<App>,
    ui: UiQueue,
    outbox: CommandQueue,
}

impl Shell {
    pub fn new(app: App, ui: UiQueue, outbox: CommandQueue) -> Self {
        Self {
            app: Mutex::new(app),
            ui,
            outbox,
        }
    }

    /// Lines written before the first request: the ready signal and the
    /// notifications produced while the app started.
    pub fn startup_lines(&self) -> Vec<Value> {
        let mut lines = vec![json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})];
        lines.extend(self.drain_notifications());
        lines
    }

    /// Handles one request line and returns every line to write back.
    pub fn handle_line(&self, line: &str) -> Vec<Value> {
        let req: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => return vec![json!({"id": null, "error": format!("parse error: {}", e)})],
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));
        debug!(method, "rpc request");

        let response = match handle_method(&self.app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                debug!(method, error = %err, "rpc request failed");
                json!({"id": id, "error": err})
            }
        };

        let mut lines = self.drain_notifications();
        lines.push(response);
        lines
    }

    fn drain_notifications(&self) -> Vec<Value> {
        let mut lines: Vec<Value> = self
            .outbox
            .drain()
            .into_iter()
            .map(|(surface, command)| json!({"event": "surface", "surface": surface, "command": command}))
            .collect();
        lines.extend(
            self.ui
                .drain()
                .into_iter()
                .map(|update| json!({"event": "ui", "update": update})),
        );
        lines
    }
}

/// Runs the sidecar until `input` closes.
pub async fn run<R, W>(shell: Shell, input: R, output: &mut W) -> std::io::Result<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
    tokio::spawn(read_requests(input, tx));

    write_lines(output, shell.startup_lines()).await?;

    while let Some(message) = rx.recv().await {
        match message {
            ShellMessage::Request(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                write_lines(output, shell.handle_line(&line)).await?;
            }
            ShellMessage::Shutdown => break,
        }
    }
    debug!("input closed; shutting down");
    Ok(())
}

async fn read_requests<R>(input: R, tx: mpsc::Sender<ShellMessage>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(ShellMessage::Request(line)).await.is_err() {
                    return;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "failed to read request");
                break;
            }
        }
    }
    let _ = tx.send(ShellMessage::Shutdown).await;
}

async fn write_lines<W>(output: &mut W, lines: Vec<Value>) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    for line in lines {
        output.write_all(line.to_string().as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await
}
