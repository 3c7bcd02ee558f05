use crate::command::{CommandHandler, CommandResponse, INVALID_REQUEST};
use anyhow::{Context as AnyhowContext, Result};
use serde::Serialize;
use serde_json::Value;
use tagdex_index::TagsChanged;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::TryRecvError;

const TAGS_UPDATED_EVENT: &str = "tags-updated";

#[derive(Debug, Serialize)]
struct EventLine<'a> {
    event: &'static str,
    change: &'a TagsChanged,
}

/// One request per stdin line, one response per stdout line. Every write to
/// the tags file is followed by a `tags-updated` event line so the host can
/// refresh its views. A line that is not UTF-8 is answered with
/// `invalid_request`. Returns on stdin EOF.
pub(crate) async fn run(handler: &CommandHandler) -> Result<()> {
    let mut events = handler.subscribe().await;
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut buf = Vec::new();
    log::info!("Serving tag requests on stdio");

    loop {
        buf.clear();
        let read = stdin
            .read_until(b'\n', &mut buf)
            .await
            .context("Failed to read stdin")?;
        if read == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handler.execute_raw(line.trim_end()).await,
            Err(err) => {
                log::warn!("Rejected non-UTF-8 request line: {err}");
                CommandResponse::error(
                    Value::Null,
                    INVALID_REQUEST,
                    format!("Request is not valid UTF-8: {err}"),
                )
            }
        };
        write_line(&mut stdout, &serde_json::to_string(&response)?).await?;

        loop {
            match events.try_recv() {
                Ok(change) => {
                    let event = EventLine {
                        event: TAGS_UPDATED_EVENT,
                        change: &change,
                    };
                    write_line(&mut stdout, &serde_json::to_string(&event)?).await?;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    log::warn!("Dropped {skipped} change events");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }

    log::info!("stdin closed, shutting down");
    Ok(())
}

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}
