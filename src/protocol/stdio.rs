// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Line-delimited JSON-RPC transport.
//!
//! Each input line holds one request or batch; each response is written as
//! one line. Messages are handled in arrival order. Lines longer than the
//! configured limit are discarded without being buffered and answered with
//! an invalid request error.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use super::jsonrpc::{Error, JsonRpcHandler, Result};

/// Serves messages from `reader` until end of input.
///
/// # Errors
///
/// Returns [`Error::Io`] when reading or writing fails.
pub async fn serve<R, W>(
    handler: &JsonRpcHandler,
    mut reader: R,
    mut writer: W,
    max_line_bytes: usize,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut served = 0usize;

    loop {
        buf.clear();
        let limit = max_line_bytes as u64 + 1;
        let read = (&mut reader).take(limit).read_until(b'\n', &mut buf).await?;
        if read == 0 {
            break;
        }

        let terminated = buf.last() == Some(&b'\n');
        if !terminated && read > max_line_bytes {
            let skipped = discard_line(&mut reader).await?;
            let size = read + skipped;
            warn!(size, max = max_line_bytes, "Discarded oversized message");
            let response = handler.framing_error(&Error::MessageTooLarge {
                size,
                max: max_line_bytes,
            });
            write_line(&mut writer, &response).await?;
            continue;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handler.handle_request(line.trim()).await,
            Err(_) => Some(handler.framing_error(&Error::JsonRpc(
                "message is not valid UTF-8".to_string(),
            ))),
        };
        served += 1;

        if let Some(response) = response {
            write_line(&mut writer, &response).await?;
        }
    }

    info!(messages = served, "Input closed, stopping server");
    Ok(())
}

/// Serves stdin/stdout until end of input or Ctrl-C.
///
/// # Errors
///
/// See [`serve`].
pub async fn serve_stdio(handler: &JsonRpcHandler, max_line_bytes: usize) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    tokio::select! {
        result = serve(handler, reader, writer, max_line_bytes) => result,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Interrupted, stopping server");
            Ok(())
        }
    }
}

/// Skips the rest of the current line, returning the bytes skipped.
async fn discard_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<usize> {
    let mut skipped = 0;
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(skipped);
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(skipped + pos);
            }
            None => {
                let len = available.len();
                reader.consume(len);
                skipped += len;
            }
        }
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> Result<()> {
    debug!(bytes = line.len(), "Writing response");
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::jsonrpc::Response;
    use serde_json::Value;

    fn echo_handler() -> JsonRpcHandler {
        let handler = JsonRpcHandler::new();
        handler.register_method("echo", |params, _ctx| async move {
            Ok(params.unwrap_or(Value::Null))
        });
        handler
    }

    async fn run(input: &str, max: usize) -> Vec<Response> {
        let mut output = Vec::new();
        serve(&echo_handler(), input.as_bytes(), &mut output, max)
            .await
            .unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_one_response_per_request_line() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","method":"echo","params":{"n":1},"id":1}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"echo","params":{"n":2}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"echo","params":{"n":3},"id":3}"#,
        );

        let responses = run(input, 1024).await;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].result.as_ref().unwrap()["n"], 1);
        assert_eq!(responses[1].result.as_ref().unwrap()["n"], 3);
    }

    #[tokio::test]
    async fn test_oversized_line_is_rejected_and_skipped() {
        let big = format!(
            r#"{{"jsonrpc":"2.0","method":"echo","params":{{"pad":"{}"}},"id":1}}"#,
            "x".repeat(200)
        );
        let input = format!(
            "{big}\n{}\n",
            r#"{"jsonrpc":"2.0","method":"echo","params":{"n":2},"id":2}"#
        );

        let responses = run(&input, 100).await;
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].error.as_ref().unwrap().code, -32600);
        assert!(responses[1].is_success());
    }

    #[tokio::test]
    async fn test_garbage_gets_parse_error() {
        let responses = run("not json\n", 1024).await;
        assert_eq!(responses[0].error.as_ref().unwrap().code, -32700);
    }
}
