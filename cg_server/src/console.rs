//! Console transport: one chat driven from stdin.
//!
//! Each input line is handled as a message from a fixed sender. Replies are
//! rendered as plain text; animations print every frame with the configured
//! delay in between.

use chat_games::commands::{Dispatcher, MessageContext, Reply};
use std::{sync::Arc, time::Duration};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Run the console loop on stdin/stdout until end of input.
pub async fn run(dispatcher: Arc<Dispatcher>, ctx: MessageContext) -> std::io::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    run_with(&dispatcher, &ctx, stdin, stdout).await
}

/// Run the console loop over arbitrary streams.
///
/// # Arguments
///
/// * `dispatcher` - Handles every line
/// * `ctx` - Chat and sender used for all lines
/// * `input` - Line source
/// * `output` - Where rendered replies go
///
/// # Errors
///
/// Returns the first I/O error from either stream
pub async fn run_with<R, W>(
    dispatcher: &Dispatcher,
    ctx: &MessageContext,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    tracing::info!(
        chat_id = ctx.chat_id,
        user = %ctx.handle(),
        "Console session started"
    );

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = dispatcher.handle(ctx, line).await;
        write_reply(&mut output, &reply).await?;
        output.flush().await?;
    }

    tracing::info!(chat_id = ctx.chat_id, "Console session ended");
    Ok(())
}

async fn write_reply<W: AsyncWrite + Unpin>(output: &mut W, reply: &Reply) -> std::io::Result<()> {
    match reply {
        Reply::Text { text } => {
            output.write_all(text.as_bytes()).await?;
            output.write_all(b"\n\n").await?;
        }
        Reply::Animation {
            frames,
            frame_delay_ms,
        } => {
            for (i, frame) in frames.iter().enumerate() {
                if i > 0 {
                    tokio::time::sleep(Duration::from_millis(*frame_delay_ms)).await;
                }
                output.write_all(frame.as_bytes()).await?;
                output.write_all(b"\n").await?;
                output.flush().await?;
            }
            output.write_all(b"\n").await?;
        }
        Reply::PurgeRecent { count } => {
            let notice = format!("[{count} recent messages would be deleted]\n\n");
            output.write_all(notice.as_bytes()).await?;
        }
        Reply::Silent => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_games::{
        commands::DispatcherConfig, records::MemoryUserStore, scoring::NoopScoreService,
    };

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(
            DispatcherConfig {
                admin_username: Some("boss".to_string()),
                wheel_frame_delay: Duration::from_millis(1),
                ..DispatcherConfig::default()
            },
            Arc::new(MemoryUserStore::new()),
            Arc::new(NoopScoreService),
        )
    }

    async fn session(ctx: MessageContext, input: &str) -> String {
        let mut output = Vec::new();
        run_with(&dispatcher(), &ctx, input.as_bytes(), &mut output)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_console_plays_tictactoe() {
        let ctx = MessageContext::new(1, 1, Some("alice"));
        let out = session(ctx, "/tictactoe\n\n/play 1 1\n").await;
        assert!(out.contains("A new game has started."));
        assert!(out.contains("Newman made a move:"));
    }

    #[tokio::test]
    async fn test_console_skips_silent_replies() {
        let ctx = MessageContext::new(1, 1, Some("alice"));
        assert_eq!(session(ctx, "hello\n").await, "");
    }

    #[tokio::test]
    async fn test_console_renders_animation_and_purge() {
        let ctx = MessageContext::new(1, 1, Some("boss"));
        let out = session(ctx, "/spin\n/delete\n").await;
        assert!(out.starts_with("The wheel of fortune is spinning"));
        assert!(out.contains("[50 recent messages would be deleted]"));
    }
}
