//! Gamification ledger: rewards, balance settlement, redemption history.
//!
//! Balances are owned by the profile store; this module only decides what a
//! balance becomes and records what was redeemed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Actor, Campus, CampusError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reward {
    pub id: String,
    pub title: String,
    pub cost: u32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedemptionStatus {
    Pending,
    Approved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub item: String,
    pub cost: u32,
    pub status: RedemptionStatus,
    pub date: String,
    #[serde(default)]
    pub student_id: Option<Uuid>,
    pub student_name: String,
}

/// Balance after spending `cost` out of `points`.
///
/// # Errors
///
/// [`CampusError::NotEnoughPoints`] when `points < cost`.
pub fn settle(points: u32, cost: u32) -> Result<u32, CampusError> {
    points
        .checked_sub(cost)
        .ok_or(CampusError::NotEnoughPoints { cost, available: points })
}

impl Campus {
    pub fn reward(&self, id: &str) -> Result<&Reward, CampusError> {
        self.rewards
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CampusError::RewardNotFound(id.to_owned()))
    }

    /// Prepend a pending redemption to the history.
    pub fn record_redemption(&mut self, reward: &Reward, student: &Actor) -> Redemption {
        let redemption = Redemption {
            id: Uuid::new_v4(),
            item: reward.title.clone(),
            cost: reward.cost,
            status: RedemptionStatus::Pending,
            date: "Just now".to_owned(),
            student_id: Some(student.id),
            student_name: student.name.clone(),
        };
        self.redemptions.push_front(redemption.clone());
        redemption
    }

    /// Spend `points` on a reward and record it. `points` is left untouched
    /// when the balance is short.
    ///
    /// # Errors
    ///
    /// Unknown reward or [`CampusError::NotEnoughPoints`].
    pub fn redeem(&mut self, points: &mut u32, reward_id: &str, student: &Actor) -> Result<Redemption, CampusError> {
        let reward = self.reward(reward_id)?.clone();
        *points = settle(*points, reward.cost)?;
        Ok(self.record_redemption(&reward, student))
    }

    /// Remove a redemption from the history, returning it if present.
    pub fn withdraw_redemption(&mut self, id: Uuid) -> Option<Redemption> {
        let idx = self.redemptions.iter().position(|r| r.id == id)?;
        self.redemptions.remove(idx)
    }

    /// Redemption history visible to `viewer`: everything for reviewers, own
    /// records for students.
    pub fn redemptions_for(&self, viewer: &Actor) -> Vec<Redemption> {
        self.redemptions
            .iter()
            .filter(|r| viewer.role.can_review() || r.student_id == Some(viewer.id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
