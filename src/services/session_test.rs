use super::*;

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// SessionUser
// =============================================================================

fn sample_user(role: Role) -> SessionUser {
    SessionUser {
        id: Uuid::nil(),
        name: "Priya".into(),
        email: "priya@campus.edu".into(),
        role,
        department: "Physics".into(),
    }
}

#[test]
fn session_user_to_actor_copies_identity() {
    let actor = sample_user(Role::Faculty).to_actor();
    assert_eq!(actor.id, Uuid::nil());
    assert_eq!(actor.name, "Priya");
    assert_eq!(actor.role, Role::Faculty);
    assert_eq!(actor.department, "Physics");
}

#[test]
fn session_user_serializes_role_lowercase() {
    let json = serde_json::to_value(sample_user(Role::Admin)).unwrap();
    assert_eq!(json["role"], "admin");
    assert_eq!(json["email"], "priya@campus.edu");
}

// =============================================================================
// Live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;

    async fn pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live-db-tests");
        crate::db::init_pool(&url, 2).await.expect("pool")
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let pool = pool().await;
        let user = validate_session(&pool, &generate_token()).await.unwrap();
        assert!(user.is_none());
    }
}
