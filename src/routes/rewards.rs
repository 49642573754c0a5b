//! Gamification routes: rewards, redemptions, points and the leaderboard.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::auth::{AuthUser, profile_error_response};
use super::{campus_error_response, json_rejection_response, notice};
use crate::services::profile::{self, LEADERBOARD_LIMIT};
use crate::state::AppState;

const MAX_LEADERBOARD_LIMIT: i64 = 100;

/// `GET /api/rewards`
pub async fn list_rewards(State(state): State<AppState>) -> Response {
    Json(&state.campus.read().await.rewards).into_response()
}

/// `POST /api/rewards/{id}/redeem`: spend points on a reward.
pub async fn redeem(State(state): State<AppState>, auth: AuthUser, Path(reward_id): Path<String>) -> Response {
    let title = match state.campus.read().await.reward(&reward_id) {
        Ok(reward) => reward.title.clone(),
        Err(e) => return campus_error_response(&e),
    };

    let actor = auth.user.to_actor();
    match profile::redeem_reward(&state.pool, &state.campus, &actor, &reward_id).await {
        Ok((redemption, points)) => notice(
            StatusCode::OK,
            format!("Redeemed {title}! Pending approval."),
            json!({ "redemption": redemption, "points": points }),
        ),
        Err(e) => profile_error_response(&e),
    }
}

/// `GET /api/redemptions`: own history; reviewers see everyone's.
pub async fn list_redemptions(State(state): State<AppState>, auth: AuthUser) -> Response {
    let viewer = auth.user.to_actor();
    Json(state.campus.read().await.redemptions_for(&viewer)).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}

/// `GET /api/leaderboard?limit=`
pub async fn leaderboard(State(state): State<AppState>, Query(query): Query<LeaderboardQuery>) -> Response {
    let limit = query.limit.unwrap_or(LEADERBOARD_LIMIT).clamp(1, MAX_LEADERBOARD_LIMIT);
    match profile::leaderboard(&state.pool, limit).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => profile_error_response(&e),
    }
}

#[derive(Debug, Deserialize)]
pub struct AwardPointsBody {
    pub points: u32,
}

/// `POST /api/profiles/{id}/points`: admin grants points.
pub async fn award_points(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    body: Result<Json<AwardPointsBody>, JsonRejection>,
) -> Response {
    if let Err(denied) = auth.require_admin() {
        return denied;
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection_response(&rejection),
    };

    match profile::award_points(&state.pool, user_id, body.points).await {
        Ok(updated) => notice(
            StatusCode::OK,
            format!("Awarded {} points to {}.", body.points, updated.name),
            json!({ "profile": updated }),
        ),
        Err(e) => profile_error_response(&e),
    }
}

#[cfg(test)]
#[path = "rewards_test.rs"]
mod tests;
