//! Catalog and resource-request routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::auth::AuthUser;
use super::{campus_error_response, error_response, json_rejection_response, notice};
use crate::campus::now_rfc3339;
use crate::campus::requests::{ResourceTarget, StatusFilter};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

impl StatusQuery {
    pub(crate) fn filter(&self) -> Result<StatusFilter, Response> {
        StatusFilter::parse(self.status.as_deref()).ok_or_else(|| {
            error_response(
                StatusCode::BAD_REQUEST,
                "status must be one of pending, approved, rejected, all",
            )
        })
    }
}

/// `GET /api/catalog`: books, equipment, study rooms and halls.
pub async fn catalog(State(state): State<AppState>) -> Response {
    let campus = state.campus.read().await;
    Json(&campus.catalog).into_response()
}

/// `GET /api/resources/requests?status=`: newest first.
pub async fn list_requests(State(state): State<AppState>, _auth: AuthUser, Query(query): Query<StatusQuery>) -> Response {
    let filter = match query.filter() {
        Ok(f) => f,
        Err(response) => return response,
    };
    Json(state.campus.read().await.list_resource_requests(filter)).into_response()
}

/// `POST /api/resources/requests`: queue a Book, Equipment or Seat request.
pub async fn submit_request(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<ResourceTarget>, JsonRejection>,
) -> Response {
    let Json(target) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection_response(&rejection),
    };
    let actor = auth.user.to_actor();
    let mut campus = state.campus.write().await;
    match campus.submit_resource_request(target, &actor, now_rfc3339()) {
        Ok(request) => {
            tracing::info!(request_id = %request.id, kind = request.target.kind(), requester = %actor.id, "resource request submitted");
            let message = format!("{} request sent to faculty!", request.target.kind());
            notice(StatusCode::CREATED, message, json!({ "request": request }))
        }
        Err(e) => campus_error_response(&e),
    }
}

/// `POST /api/resources/requests/{id}/approve`: book the item.
pub async fn approve_request(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Uuid>) -> Response {
    if let Err(denied) = auth.require_reviewer() {
        return denied;
    }
    let mut campus = state.campus.write().await;
    match campus.approve_resource_request(id, auth.user.id) {
        Ok(request) => {
            let message = format!("{} request approved successfully.", request.target.kind());
            notice(StatusCode::OK, message, json!({ "request": request }))
        }
        Err(e) => campus_error_response(&e),
    }
}

/// `POST /api/resources/requests/{id}/reject`
pub async fn reject_request(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Uuid>) -> Response {
    if let Err(denied) = auth.require_reviewer() {
        return denied;
    }
    let mut campus = state.campus.write().await;
    match campus.reject_resource_request(id, auth.user.id) {
        Ok(request) => {
            let message = format!("{} request rejected.", request.target.kind());
            notice(StatusCode::OK, message, json!({ "request": request }))
        }
        Err(e) => campus_error_response(&e),
    }
}

#[cfg(test)]
#[path = "resources_test.rs"]
mod tests;
