//! C10: the STDIO server loop. Single-threaded reader; reads a line,
//! dispatches it through [`crate::rpc`], writes exactly one JSON-RPC
//! response line per non-notification request, flushes, repeats until
//! end-of-stream.

use crate::registry::Registry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Runs the server loop against the given registry until standard input
/// reaches end-of-stream or `running` is flipped to `false`.
///
/// # Errors
/// Returns an error only on a catastrophic stdin read failure; EOF and
/// per-request failures are not errors at this layer.
pub async fn run(registry: &Registry, running: Arc<AtomicBool>) -> std::io::Result<()> {
    tracing::info!("server starting");
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    while running.load(Ordering::SeqCst) {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await.inspect_err(|e| {
            tracing::error!(error = %e, "stdin read failed");
        })?;

        if bytes_read == 0 {
            tracing::info!("end of stream, shutting down");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        tracing::trace!(method = %extract_method(trimmed), "handling request");

        if let Some(response) = crate::rpc::handle_line(registry, trimmed).await {
            stdout.write_all(response.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    tracing::info!("server terminated");
    Ok(())
}

fn extract_method(line: &str) -> String {
    crate::json::string_or_default(line, "method", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ProductClients;

    #[tokio::test]
    async fn running_flag_stops_the_loop_without_reading() {
        let registry = Registry::new(ProductClients::default(), "hint".to_string());
        let running = Arc::new(AtomicBool::new(false));
        let result = run(&registry, running).await;
        assert!(result.is_ok());
    }
}
