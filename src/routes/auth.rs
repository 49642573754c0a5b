//! Auth routes: email/password sign-up and sign-in, session cookie, profile.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use super::{error_response, json_rejection_response, notice};
use crate::config::cookie_secure;
use crate::services::account::{self, AccountError, SignupForm};
use crate::services::profile::{self, ProfileError};
use crate::services::session;
use crate::state::AppState;

const COOKIE_NAME: &str = "session_token";
const SESSION_MAX_AGE_DAYS: i64 = 30;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(error_response(StatusCode::UNAUTHORIZED, "sign in required"));
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session lookup failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "session lookup failed")
            })?
            .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "session expired"))?;

        Ok(Self { user, token: token.to_owned() })
    }
}

impl AuthUser {
    /// Faculty and admins only.
    pub(crate) fn require_reviewer(&self) -> Result<(), Response> {
        if self.user.role.can_review() {
            Ok(())
        } else {
            Err(error_response(StatusCode::FORBIDDEN, "only faculty and admins can review requests"))
        }
    }

    pub(crate) fn require_admin(&self) -> Result<(), Response> {
        if self.user.role == crate::campus::Role::Admin {
            Ok(())
        } else {
            Err(error_response(StatusCode::FORBIDDEN, "only admins can award points"))
        }
    }
}

// =============================================================================
// COOKIES
// =============================================================================

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
        .build()
}

fn cleared_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

pub(crate) fn account_error_to_status(err: &AccountError) -> StatusCode {
    match err {
        AccountError::InvalidEmail
        | AccountError::PasswordMismatch
        | AccountError::PasswordTooShort
        | AccountError::MissingField(_)
        | AccountError::InvalidRole(_) => StatusCode::BAD_REQUEST,
        AccountError::EmailTaken => StatusCode::CONFLICT,
        AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AccountError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn account_error_response(err: &AccountError) -> Response {
    let status = account_error_to_status(err);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "account operation failed");
        return error_response(status, "account service unavailable");
    }
    error_response(status, err.to_string())
}

pub(crate) fn profile_error_response(err: &ProfileError) -> Response {
    match err {
        ProfileError::NotFound(_) => error_response(StatusCode::NOT_FOUND, err.to_string()),
        ProfileError::InvalidAmount => error_response(StatusCode::BAD_REQUEST, err.to_string()),
        ProfileError::Campus(e) => super::campus_error_response(e),
        ProfileError::Db(e) => {
            tracing::error!(error = %e, "profile query failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "profile service unavailable")
        }
    }
}

/// Open a session for `user_id` and answer with its profile and cookie.
async fn start_session(state: &AppState, user_id: uuid::Uuid, status: StatusCode, message: &str) -> Response {
    let token = match session::create_session(&state.pool, user_id).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session");
        }
    };
    let profile = match profile::load_profile(&state.pool, user_id).await {
        Ok(p) => p,
        Err(e) => return profile_error_response(&e),
    };

    let jar = CookieJar::new().add(session_cookie(token));
    (jar, notice(status, message, serde_json::json!({ "profile": profile }))).into_response()
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/signup`: create an account and sign in.
pub async fn signup(State(state): State<AppState>, body: Result<Json<SignupForm>, JsonRejection>) -> Response {
    let Json(form) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection_response(&rejection),
    };
    let new_account = match account::validate_signup(&form) {
        Ok(a) => a,
        Err(e) => return account_error_response(&e),
    };
    let user_id = match account::create_account(&state.pool, &new_account).await {
        Ok(id) => id,
        Err(e) => return account_error_response(&e),
    };

    start_session(&state, user_id, StatusCode::CREATED, &format!("Welcome, {}!", new_account.name)).await
}

#[derive(Debug, Deserialize)]
pub struct SigninBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /api/auth/signin`: verify credentials and open a session.
pub async fn signin(State(state): State<AppState>, body: Result<Json<SigninBody>, JsonRejection>) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection_response(&rejection),
    };
    let user_id = match account::authenticate(&state.pool, &body.email, &body.password).await {
        Ok(id) => id,
        Err(e) => return account_error_response(&e),
    };

    start_session(&state, user_id, StatusCode::OK, "Signed in successfully.").await
}

/// `POST /api/auth/signout`: delete session, clear cookie.
pub async fn signout(State(state): State<AppState>, auth: AuthUser) -> Response {
    if let Err(e) = session::delete_session(&state.pool, &auth.token).await {
        tracing::warn!(error = %e, user_id = %auth.user.id, "session delete failed");
    }

    let jar = CookieJar::new().add(cleared_cookie());
    (jar, StatusCode::NO_CONTENT).into_response()
}

/// `GET /api/auth/me`: the signed-in user's profile.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Response {
    match profile::load_profile(&state.pool, auth.user.id).await {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => profile_error_response(&e),
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::*;
    use crate::campus::Role;

    /// An `AuthUser` with a fresh id and the given role, no session row.
    #[must_use]
    pub fn auth_user(role: Role) -> AuthUser {
        let actor = crate::campus::test_helpers::actor(role);
        AuthUser {
            user: session::SessionUser {
                id: actor.id,
                name: actor.name,
                email: format!("{}@campus.test", role.as_str()),
                role,
                department: actor.department,
            },
            token: session::generate_token(),
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
