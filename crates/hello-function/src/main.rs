//! Hello Function - Main entry point
//!
//! Runs the function either behind a local HTTP listener (default) or as an
//! IPC worker reading request frames from stdin.

use anyhow::Result;
use hello_function::{handler, host, telemetry, FunctionConfig, RunMode};
use hello_function_sdk::ipc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    let config = FunctionConfig::from_env();
    tracing::info!("Configuration loaded: {:?}", config);

    match config.mode {
        RunMode::Http => {
            let listener = TcpListener::bind(config.bind_addr()).await?;
            host::serve(listener, handler::handle, &config).await?;
        }
        RunMode::Ipc => {
            let served = tokio::task::spawn_blocking(|| {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                ipc::serve(&handler::handle, stdin.lock(), stdout.lock())
            })
            .await??;
            tracing::info!(served, "IPC worker finished");
        }
    }

    Ok(())
}
