//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds every JSON endpoint under `/api` plus `/healthz` on one Axum router.
//! Errors leave as `{"error": "..."}` bodies; successful mutations carry a
//! human-readable `notice` alongside the affected record.

pub mod auth;
pub mod chat;
pub mod events;
pub mod feed;
pub mod resources;
pub mod rewards;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::campus::CampusError;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat::chat))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/signin", post(auth::signin))
        .route("/api/auth/signout", post(auth::signout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/catalog", get(resources::catalog))
        .route(
            "/api/resources/requests",
            get(resources::list_requests).post(resources::submit_request),
        )
        .route("/api/resources/requests/{id}/approve", post(resources::approve_request))
        .route("/api/resources/requests/{id}/reject", post(resources::reject_request))
        .route("/api/events", get(events::list_events))
        .route("/api/events/requests", get(events::list_requests).post(events::submit_request))
        .route("/api/events/requests/{id}/approve", post(events::approve_request))
        .route("/api/events/requests/{id}/reject", post(events::reject_request))
        .route("/api/rewards", get(rewards::list_rewards))
        .route("/api/rewards/{id}/redeem", post(rewards::redeem))
        .route("/api/redemptions", get(rewards::list_redemptions))
        .route("/api/leaderboard", get(rewards::leaderboard))
        .route("/api/profiles/{id}/points", post(rewards::award_points))
        .route("/api/posts", get(feed::list_posts).post(feed::create_post))
        .route("/api/connect", get(feed::list_connect).post(feed::create_connect))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// RESPONSE HELPERS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

/// Successful mutation: the affected record plus a toast-style notice.
#[derive(Debug, Serialize)]
pub struct Notice<T> {
    pub notice: String,
    #[serde(flatten)]
    pub data: T,
}

pub(crate) fn notice<T: Serialize>(status: StatusCode, notice: impl Into<String>, data: T) -> Response {
    (status, Json(Notice { notice: notice.into(), data })).into_response()
}

/// Malformed or missing JSON body.
pub(crate) fn json_rejection_response(rejection: &JsonRejection) -> Response {
    error_response(rejection.status(), rejection.body_text())
}

pub(crate) fn campus_error_to_status(err: &CampusError) -> StatusCode {
    match err {
        CampusError::BookNotFound(_)
        | CampusError::EquipmentNotFound(_)
        | CampusError::RoomNotFound(_)
        | CampusError::RewardNotFound(_)
        | CampusError::RequestNotFound(_) => StatusCode::NOT_FOUND,
        CampusError::OutOfStock { .. }
        | CampusError::SlotTaken { .. }
        | CampusError::SeatTaken { .. }
        | CampusError::NotPending { .. } => StatusCode::CONFLICT,
        CampusError::UnknownSlot { .. }
        | CampusError::SeatOutOfRange { .. }
        | CampusError::NotEnoughPoints { .. }
        | CampusError::MissingField(_) => StatusCode::BAD_REQUEST,
    }
}

pub(crate) fn campus_error_response(err: &CampusError) -> Response {
    error_response(campus_error_to_status(err), err.to_string())
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use axum::body::to_bytes;
    use axum::response::Response;

    /// Read a response body as JSON.
    pub async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
