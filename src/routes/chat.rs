//! Chat relay route.
//!
//! `POST /api/chat` takes `{message}` and answers `{reply}`. Every failure
//! (bad body, missing configuration, upstream error) answers 500 with
//! `{error}` except the rate limit, which answers 429.

use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use super::error_response;
use crate::chat;
use crate::state::{AppState, ChatBackend};

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// `POST /api/chat`: forward one message to the generative model.
pub async fn chat(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, rejection.body_text()),
    };

    let model = match &state.chat {
        ChatBackend::Ready(model) => model.clone(),
        ChatBackend::Unavailable(reason) => {
            tracing::error!(%reason, "chat relay not configured");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, reason.to_string());
        }
    };

    if let Err(e) = state.rate_limiter.check_and_record(peer.ip()) {
        tracing::warn!(client = %peer.ip(), error = %e, "chat rate limited");
        return error_response(StatusCode::TOO_MANY_REQUESTS, e.to_string());
    }

    match chat::relay(model.as_ref(), &body.message).await {
        Ok(reply) => {
            tracing::debug!(model = model.model(), chars = reply.len(), "chat reply relayed");
            Json(ChatReply { reply }).into_response()
        }
        Err(e) => {
            tracing::error!(model = model.model(), error = %e, "chat relay failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
