//! Profiles and point balances.
//!
//! DESIGN
//! ======
//! Point balances live in `profiles.points`. A redemption locks the profile
//! row (`SELECT ... FOR UPDATE`) for the whole transaction, so concurrent
//! redemptions by the same user serialize and the balance never goes
//! negative. The campus write guard is held only while the ledger settles;
//! a failed commit withdraws the recorded redemption again.
//!
//! Rank is computed on read: one plus the number of profiles with strictly
//! more points.

use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::campus::ledger::Redemption;
use crate::campus::{Actor, Campus, CampusError, Role};

pub const LEADERBOARD_LIMIT: i64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile not found: {0}")]
    NotFound(Uuid),
    #[error("points must be a positive whole number")]
    InvalidAmount,
    #[error(transparent)]
    Campus(#[from] CampusError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub points: u32,
    pub rank: u32,
    pub badges: Vec<String>,
    pub created_at: String,
}

/// Columns shared by every profile query; callers append `rank`.
const PROFILE_COLUMNS: &str = r#"p.user_id, p.name, p.email, p.role, p.department, p.points, p.badges,
    to_char(p.created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at"#;

fn profile_from_row(row: &PgRow) -> UserProfile {
    let raw_role: String = row.get("role");
    let points: i32 = row.get("points");
    let rank: i64 = row.get("rank");
    UserProfile {
        id: row.get("user_id"),
        name: row.get("name"),
        email: row.get("email"),
        // The table CHECK constraint admits only known roles.
        role: Role::parse(&raw_role).unwrap_or(Role::Student),
        department: row.get("department"),
        points: u32::try_from(points).unwrap_or_default(),
        rank: u32::try_from(rank).unwrap_or_default(),
        badges: row.get("badges"),
        created_at: row.get("created_at"),
    }
}

/// Load a profile with its current rank.
///
/// # Errors
///
/// [`ProfileError::NotFound`] or database errors.
pub async fn load_profile(pool: &PgPool, user_id: Uuid) -> Result<UserProfile, ProfileError> {
    let sql = format!(
        "SELECT {PROFILE_COLUMNS},
                1 + (SELECT count(*) FROM profiles o WHERE o.points > p.points) AS rank
         FROM profiles p
         WHERE p.user_id = $1"
    );
    let row = sqlx::query(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ProfileError::NotFound(user_id))?;
    Ok(profile_from_row(&row))
}

/// Top profiles by points, descending; ties share a rank.
pub async fn leaderboard(pool: &PgPool, limit: i64) -> Result<Vec<UserProfile>, ProfileError> {
    let sql = format!(
        "SELECT {PROFILE_COLUMNS},
                RANK() OVER (ORDER BY p.points DESC) AS rank
         FROM profiles p
         ORDER BY p.points DESC, p.name ASC
         LIMIT $1"
    );
    let rows = sqlx::query(&sql).bind(limit).fetch_all(pool).await?;
    Ok(rows.iter().map(profile_from_row).collect())
}

/// Add `amount` points to a profile and return it. The balance saturates at
/// `i32::MAX`.
///
/// # Errors
///
/// [`ProfileError::InvalidAmount`] for zero or out-of-range amounts,
/// [`ProfileError::NotFound`] for an unknown profile.
pub async fn award_points(pool: &PgPool, user_id: Uuid, amount: u32) -> Result<UserProfile, ProfileError> {
    let delta = i32::try_from(amount)
        .ok()
        .filter(|d| *d > 0)
        .ok_or(ProfileError::InvalidAmount)?;

    // Balances saturate at the column maximum instead of overflowing.
    let updated = sqlx::query("UPDATE profiles SET points = LEAST(points::bigint + $2, $3)::integer WHERE user_id = $1")
        .bind(user_id)
        .bind(i64::from(delta))
        .bind(i64::from(i32::MAX))
        .execute(pool)
        .await?;
    if updated.rows_affected() == 0 {
        return Err(ProfileError::NotFound(user_id));
    }

    tracing::info!(%user_id, amount, "points awarded");
    load_profile(pool, user_id).await
}

/// Redeem a reward for `student`: settle the balance and record a pending
/// redemption. Returns the record and the remaining balance.
///
/// # Errors
///
/// Unknown reward, [`CampusError::NotEnoughPoints`], missing profile or
/// database errors. Nothing changes on failure.
pub async fn redeem_reward(
    pool: &PgPool,
    campus: &RwLock<Campus>,
    student: &Actor,
    reward_id: &str,
) -> Result<(Redemption, u32), ProfileError> {
    let mut tx = pool.begin().await?;
    let row = sqlx::query("SELECT points FROM profiles WHERE user_id = $1 FOR UPDATE")
        .bind(student.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ProfileError::NotFound(student.id))?;
    let stored: i32 = row.get("points");
    let mut points = u32::try_from(stored).unwrap_or_default();

    let redemption = campus.write().await.redeem(&mut points, reward_id, student)?;

    let persisted = async move {
        sqlx::query("UPDATE profiles SET points = $2 WHERE user_id = $1")
            .bind(student.id)
            .bind(i32::try_from(points).unwrap_or(i32::MAX))
            .execute(&mut *tx)
            .await?;
        tx.commit().await
    }
    .await;
    let redemption = keep_or_withdraw(campus, redemption, persisted).await?;

    tracing::info!(user_id = %student.id, reward = reward_id, balance = points, "reward redeemed");
    Ok((redemption, points))
}

/// Keep the recorded redemption if the balance was stored, otherwise take it
/// back out of the history.
async fn keep_or_withdraw(
    campus: &RwLock<Campus>,
    redemption: Redemption,
    persisted: Result<(), sqlx::Error>,
) -> Result<Redemption, ProfileError> {
    match persisted {
        Ok(()) => Ok(redemption),
        Err(e) => {
            campus.write().await.withdraw_redemption(redemption.id);
            tracing::error!(error = %e, redemption_id = %redemption.id, "redemption withdrawn after failed commit");
            Err(e.into())
        }
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
