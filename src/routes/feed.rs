//! Campus feed and connect-hub routes. Reads are public; posting needs a
//! session.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;

use super::auth::AuthUser;
use super::{campus_error_response, json_rejection_response, notice};
use crate::campus::feed::NewConnectPost;
use crate::state::AppState;

/// `GET /api/posts`: newest first.
pub async fn list_posts(State(state): State<AppState>) -> Response {
    Json(&state.campus.read().await.posts).into_response()
}

#[derive(Debug, Deserialize)]
pub struct NewPostBody {
    #[serde(default)]
    pub content: String,
}

/// `POST /api/posts`
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<NewPostBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection_response(&rejection),
    };
    let actor = auth.user.to_actor();
    let mut campus = state.campus.write().await;
    match campus.publish_post(&actor, &body.content) {
        Ok(post) => notice(StatusCode::CREATED, "Post shared with campus!", json!({ "post": post })),
        Err(e) => campus_error_response(&e),
    }
}

/// `GET /api/connect`: newest first.
pub async fn list_connect(State(state): State<AppState>) -> Response {
    Json(&state.campus.read().await.connect_posts).into_response()
}

/// `POST /api/connect`
pub async fn create_connect(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<NewConnectPost>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection_response(&rejection),
    };
    let actor = auth.user.to_actor();
    let mut campus = state.campus.write().await;
    match campus.publish_connect_post(&actor, body) {
        Ok(post) => notice(StatusCode::CREATED, "Opportunity posted to Connect Hub!", json!({ "post": post })),
        Err(e) => campus_error_response(&e),
    }
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
