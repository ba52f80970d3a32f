//! AIBrowser RPC Server: JSON-RPC over stdin/stdout for a front-end process.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"navigate", "params":{"input":"rust lang"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Notifications: {"event":"ui","update":{...}} and
//!                {"event":"surface","surface":3,"command":{...}}
//!
//! Logs go to stderr; stdout carries only protocol lines.

use aibrowser::app::App;
use aibrowser::config::ShellConfig;
use aibrowser::runtime::{self, Shell};
use aibrowser::surface::{CommandQueue, RemoteSurfaceFactory};
use aibrowser::ui::projection::UiQueue;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = ShellConfig::from_env()?;
    info!(data_dir = %config.data_dir.display(), "starting rpc sidecar");

    let ui = UiQueue::new();
    let outbox = CommandQueue::new();
    let app = App::from_config(
        &config,
        Box::new(RemoteSurfaceFactory::new(outbox.clone())),
        Box::new(ui.clone()),
    )?;

    let shell = Shell::new(app, ui, outbox);
    let mut stdout = tokio::io::stdout();
    runtime::run(shell, tokio::io::stdin(), &mut stdout).await?;
    Ok(())
}
