use super::*;
use crate::campus::Role;
use crate::routes::test_helpers::body_json;
use crate::state::test_helpers::test_app_state;
use axum::extract::FromRequestParts;

fn form(password: &str, confirm: &str) -> SignupForm {
    serde_json::from_value(serde_json::json!({
        "email": "new@campus.edu",
        "password": password,
        "confirmPassword": confirm,
        "name": "New Student",
        "role": "student",
        "department": "Biology",
    }))
    .unwrap()
}

// =============================================================================
// AuthUser extractor
// =============================================================================

#[tokio::test]
async fn extractor_rejects_missing_cookie() {
    let state = test_app_state();
    let (mut parts, ()) = axum::http::Request::builder().uri("/api/auth/me").body(()).unwrap().into_parts();
    let Err(rejection) = AuthUser::from_request_parts(&mut parts, &state).await else {
        panic!("expected rejection");
    };
    assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(rejection).await["error"], "sign in required");
}

#[test]
fn reviewer_guard_allows_faculty_and_admin() {
    assert!(test_helpers::auth_user(Role::Faculty).require_reviewer().is_ok());
    assert!(test_helpers::auth_user(Role::Admin).require_reviewer().is_ok());
    let denied = test_helpers::auth_user(Role::Student).require_reviewer().unwrap_err();
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
}

#[test]
fn admin_guard_denies_faculty() {
    assert!(test_helpers::auth_user(Role::Admin).require_admin().is_ok());
    assert_eq!(
        test_helpers::auth_user(Role::Faculty).require_admin().unwrap_err().status(),
        StatusCode::FORBIDDEN
    );
}

// =============================================================================
// Error mapping
// =============================================================================

#[test]
fn account_errors_map_to_statuses() {
    assert_eq!(account_error_to_status(&AccountError::PasswordMismatch), StatusCode::BAD_REQUEST);
    assert_eq!(account_error_to_status(&AccountError::EmailTaken), StatusCode::CONFLICT);
    assert_eq!(account_error_to_status(&AccountError::InvalidCredentials), StatusCode::UNAUTHORIZED);
    assert_eq!(
        account_error_to_status(&AccountError::Db(sqlx::Error::RowNotFound)),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn db_failures_hide_details() {
    let response = account_error_response(&AccountError::Db(sqlx::Error::PoolTimedOut));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "account service unavailable");
}

// =============================================================================
// Handlers (validation paths never reach the database)
// =============================================================================

#[tokio::test]
async fn signup_rejects_mismatched_passwords() {
    let response = signup(State(test_app_state()), Ok(Json(form("secret1", "secret2")))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Passwords do not match");
}

#[tokio::test]
async fn signup_rejects_short_password() {
    let response = signup(State(test_app_state()), Ok(Json(form("abc", "abc")))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Password must be at least 6 characters");
}

#[tokio::test]
async fn signin_rejects_malformed_email() {
    let body = SigninBody { email: "not-an-email".into(), password: "whatever".into() };
    let response = signin(State(test_app_state()), Ok(Json(body))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "invalid email or password");
}

#[test]
fn session_cookie_is_http_only_for_thirty_days() {
    let cookie = session_cookie("abc".into());
    assert_eq!(cookie.name(), "session_token");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.max_age(), Some(Duration::days(30)));
    assert_eq!(cleared_cookie().max_age(), Some(Duration::ZERO));
}
