//! Event calendar and event-request routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use uuid::Uuid;

use super::auth::AuthUser;
use super::resources::StatusQuery;
use super::{campus_error_response, json_rejection_response, notice};
use crate::campus::now_rfc3339;
use crate::campus::requests::NewEventRequest;
use crate::state::AppState;

/// `GET /api/events`: published events in publication order.
pub async fn list_events(State(state): State<AppState>) -> Response {
    Json(&state.campus.read().await.events).into_response()
}

/// `GET /api/events/requests?status=`
pub async fn list_requests(State(state): State<AppState>, _auth: AuthUser, Query(query): Query<StatusQuery>) -> Response {
    match query.filter() {
        Ok(filter) => Json(state.campus.read().await.list_event_requests(filter)).into_response(),
        Err(response) => response,
    }
}

/// `POST /api/events/requests`: propose an event for review.
pub async fn submit_request(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<NewEventRequest>, JsonRejection>,
) -> Response {
    let Json(proposal) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection_response(&rejection),
    };
    let actor = auth.user.to_actor();
    let mut campus = state.campus.write().await;
    match campus.submit_event_request(proposal, &actor, now_rfc3339()) {
        Ok(request) => {
            tracing::info!(request_id = %request.request_id, requester = %actor.id, "event request submitted");
            let message = format!("Request \"{}\" submitted for approval.", request.title);
            notice(StatusCode::CREATED, message, json!({ "request": request }))
        }
        Err(e) => campus_error_response(&e),
    }
}

/// `POST /api/events/requests/{id}/approve`: publish the event.
pub async fn approve_request(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Uuid>) -> Response {
    if let Err(denied) = auth.require_reviewer() {
        return denied;
    }
    let mut campus = state.campus.write().await;
    match campus.approve_event_request(id, auth.user.id) {
        Ok((request, event)) => {
            let message = format!("Request \"{}\" approved & published!", request.title);
            notice(StatusCode::OK, message, json!({ "request": request, "event": event }))
        }
        Err(e) => campus_error_response(&e),
    }
}

/// `POST /api/events/requests/{id}/reject`
pub async fn reject_request(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Uuid>) -> Response {
    if let Err(denied) = auth.require_reviewer() {
        return denied;
    }
    let mut campus = state.campus.write().await;
    match campus.reject_event_request(id, auth.user.id) {
        Ok(request) => notice(
            StatusCode::OK,
            format!("Request \"{}\" rejected.", request.title),
            json!({ "request": request }),
        ),
        Err(e) => campus_error_response(&e),
    }
}

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;
