//! Chat message endpoint.
//!
//! # Examples
//!
//! ```bash
//! curl -X POST http://localhost:8080/api/v1/commands \
//!   -H "Content-Type: application/json" \
//!   -d '{"chat_id": -100, "user_id": 42, "username": "alice", "text": "/play 2 2"}'
//! ```

use axum::{Json, extract::State, http::StatusCode};
use chat_games::commands::{MessageContext, Reply};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{AppState, request_id::RequestId};
use crate::logging;

/// Longest message accepted, matching Telegram's text limit
pub const MAX_TEXT_LEN: usize = 4096;

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub chat_id: i64,
    pub user_id: i64,
    /// Platform username, with or without `@`
    pub username: Option<String>,
    pub text: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CommandResponse {
    pub reply: Reply,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handle one chat message.
///
/// # Response
///
/// Returns `200 OK` with the reply to perform:
/// ```json
/// { "reply": { "kind": "text", "text": "Newman made a move:\n\n..." } }
/// ```
///
/// # Errors
///
/// - `413 Payload Too Large`: `text` longer than [`MAX_TEXT_LEN`] bytes
pub async fn handle_command(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, (StatusCode, Json<ErrorResponse>)> {
    if request.text.len() > MAX_TEXT_LEN {
        tracing::warn!(
            request_id = %request_id.as_str(),
            len = request.text.len(),
            "Rejected oversized message"
        );
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponse {
                error: format!("Message text exceeds {MAX_TEXT_LEN} bytes"),
            }),
        ));
    }

    let ctx = MessageContext::new(request.chat_id, request.user_id, request.username.as_deref());

    let start = Instant::now();
    let reply = state.dispatcher.handle(&ctx, &request.text).await;
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    logging::log_command(ctx.chat_id, ctx.user_id, reply_kind(&reply), duration_ms);

    Ok(Json(CommandResponse { reply }))
}

fn reply_kind(reply: &Reply) -> &'static str {
    match reply {
        Reply::Text { .. } => "text",
        Reply::Animation { .. } => "animation",
        Reply::PurgeRecent { .. } => "purge_recent",
        Reply::Silent => "silent",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_username_optional() {
        let request: CommandRequest =
            serde_json::from_str(r#"{"chat_id": 1, "user_id": 2, "text": "/spin"}"#).unwrap();
        assert!(request.username.is_none());
        assert_eq!(request.text, "/spin");
    }

    #[test]
    fn test_reply_kind_matches_serde_tag() {
        for reply in [
            Reply::text("x"),
            Reply::Animation {
                frames: vec![],
                frame_delay_ms: 0,
            },
            Reply::PurgeRecent { count: 1 },
            Reply::Silent,
        ] {
            let json = serde_json::to_value(&reply).unwrap();
            assert_eq!(json["kind"], reply_kind(&reply));
        }
    }
}
