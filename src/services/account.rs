//! Email/password accounts.
//!
//! DESIGN
//! ======
//! Sign-up validation mirrors the checks the campus web client performs
//! before submitting, so a hand-crafted request gets the same messages.
//! Passwords are stored as `sha256^N(salt || password)` hex digests with a
//! per-account random salt. The user row and its profile are inserted in one
//! transaction; a duplicate email surfaces as [`AccountError::EmailTaken`].

use rand::Rng;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::session::bytes_to_hex;
use crate::campus::Role;

pub const MIN_PASSWORD_LEN: usize = 6;
const HASH_ROUNDS: u32 = 10_000;
const SALT_LEN: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid role: {0}")]
    InvalidRole(String),
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department: String,
}

/// A sign-up form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub department: String,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

/// Validate a sign-up form. Password checks run first, matching the order
/// the client reports them in.
///
/// # Errors
///
/// The first failing check.
pub fn validate_signup(form: &SignupForm) -> Result<NewAccount, AccountError> {
    if form.password != form.confirm_password {
        return Err(AccountError::PasswordMismatch);
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::PasswordTooShort);
    }
    let email = normalize_email(&form.email).ok_or(AccountError::InvalidEmail)?;
    let name = required(&form.name, "name")?;
    let department = required(&form.department, "department")?;
    let role = Role::parse(&form.role).ok_or_else(|| AccountError::InvalidRole(form.role.clone()))?;

    Ok(NewAccount { email, password: form.password.clone(), name, role, department })
}

fn required(value: &str, field: &'static str) -> Result<String, AccountError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AccountError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

// =============================================================================
// PASSWORD HASHING
// =============================================================================

#[must_use]
pub fn generate_salt() -> String {
    let bytes: [u8; SALT_LEN] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[must_use]
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut digest = Sha256::new().chain_update(salt.as_bytes()).chain_update(password.as_bytes()).finalize();
    for _ in 1..HASH_ROUNDS {
        digest = Sha256::new().chain_update(digest).finalize();
    }
    bytes_to_hex(&digest)
}

/// Compare in constant time with respect to the digest contents.
#[must_use]
pub fn verify_password(salt: &str, password: &str, expected_hash: &str) -> bool {
    let actual = hash_password(salt, password);
    actual.len() == expected_hash.len()
        && actual
            .bytes()
            .zip(expected_hash.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Insert the user and its zero-point profile, returning the new user id.
///
/// # Errors
///
/// [`AccountError::EmailTaken`] on a duplicate email, otherwise database errors.
pub async fn create_account(pool: &PgPool, account: &NewAccount) -> Result<Uuid, AccountError> {
    let salt = generate_salt();
    let hash = hash_password(&salt, &account.password);

    let mut tx = pool.begin().await?;
    let row = sqlx::query("INSERT INTO users (email, password_salt, password_hash) VALUES ($1, $2, $3) RETURNING id")
        .bind(&account.email)
        .bind(&salt)
        .bind(&hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation)?;
    let user_id: Uuid = row.get("id");

    sqlx::query(
        r"INSERT INTO profiles (user_id, name, email, role, department)
          VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_id)
    .bind(&account.name)
    .bind(&account.email)
    .bind(account.role.as_str())
    .bind(&account.department)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    tracing::info!(%user_id, role = account.role.as_str(), "account created");
    Ok(user_id)
}

fn map_unique_violation(err: sqlx::Error) -> AccountError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => AccountError::EmailTaken,
        _ => AccountError::Db(err),
    }
}

/// Salt hashed against when the email is unknown, so a miss costs the same
/// as a wrong password.
const UNKNOWN_ACCOUNT_SALT: &str = "00000000000000000000000000000000";

/// Stored login material for one account.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub user_id: Uuid,
    pub salt: String,
    pub hash: String,
}

/// Check `password` against `stored`. Always runs the full hash.
///
/// # Errors
///
/// [`AccountError::InvalidCredentials`] when no account matched or the
/// password is wrong.
pub fn check_credentials(stored: Option<&StoredCredentials>, password: &str) -> Result<Uuid, AccountError> {
    match stored {
        Some(creds) if verify_password(&creds.salt, password, &creds.hash) => Ok(creds.user_id),
        Some(_) => Err(AccountError::InvalidCredentials),
        None => {
            let _ = hash_password(UNKNOWN_ACCOUNT_SALT, password);
            Err(AccountError::InvalidCredentials)
        }
    }
}

/// Check credentials and return the user id.
///
/// # Errors
///
/// [`AccountError::InvalidCredentials`] for an unknown email or wrong password.
pub async fn authenticate(pool: &PgPool, email: &str, password: &str) -> Result<Uuid, AccountError> {
    let Some(email) = normalize_email(email) else {
        return check_credentials(None, password);
    };
    let stored = sqlx::query("SELECT id, password_salt, password_hash FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?
        .map(|row| StoredCredentials {
            user_id: row.get("id"),
            salt: row.get("password_salt"),
            hash: row.get("password_hash"),
        });

    check_credentials(stored.as_ref(), password)
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
