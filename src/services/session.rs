//! Session token management.
//!
//! Sessions are opaque random tokens stored server-side and carried in an
//! HttpOnly cookie. Expiry is enforced in SQL (`expires_at > now()`), so a
//! stale row is simply ignored until it is deleted on sign-out.

use std::fmt::Write;

use rand::Rng;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::campus::{Actor, Role};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Signed-in user resolved from a session token.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
}

impl SessionUser {
    /// Campus-side identity for domain operations.
    #[must_use]
    pub fn to_actor(&self) -> Actor {
        Actor { id: self.id, name: self.name.clone(), role: self.role, department: self.department.clone() }
    }
}

/// Create a session for the given user, returning the token.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Validate a session token and return the associated user.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT p.user_id, p.name, p.email, p.role, p.department
          FROM sessions s
          JOIN profiles p ON p.user_id = s.user_id
          WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let raw_role: String = row.get("role");
    let Some(role) = Role::parse(&raw_role) else {
        tracing::warn!(role = %raw_role, "session profile has unknown role");
        return Ok(None);
    };

    Ok(Some(SessionUser {
        id: row.get("user_id"),
        name: row.get("name"),
        email: row.get("email"),
        role,
        department: row.get("department"),
    }))
}

/// Delete a session by token.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
