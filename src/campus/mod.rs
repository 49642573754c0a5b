//! Campus domain: catalog, request queues, approvals, ledger and feed.
//!
//! DESIGN
//! ======
//! `Campus` is the in-memory state shared by every HTTP handler through
//! `AppState`. It is seeded from YAML at start-up and lives for the process
//! lifetime. Each submodule contributes an `impl Campus` block for its slice
//! of behavior, so callers hold a single write guard across a whole
//! validate-then-commit step.
//!
//! Account data (profiles, point balances) is not kept here; it lives in
//! Postgres and is reached through `services::profile`.

pub mod approval;
pub mod catalog;
pub mod feed;
pub mod ledger;
pub mod requests;
pub mod seed;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog::Catalog;
use feed::{ConnectPost, Post};
use ledger::{Redemption, Reward};
use requests::{Event, EventRequest, RequestStatus, ResourceRequest};

// =============================================================================
// ROLES
// =============================================================================

/// Campus role attached to every profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Admin => "admin",
        }
    }

    /// Parse a role name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "student" => Some(Self::Student),
            "faculty" => Some(Self::Faculty),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Faculty and admins review requests.
    #[must_use]
    pub fn can_review(self) -> bool {
        matches!(self, Self::Faculty | Self::Admin)
    }

    /// Display label used on feed posts ("Student", "Faculty", "Admin").
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Faculty => "Faculty",
            Self::Admin => "Admin",
        }
    }
}

/// The signed-in user performing a campus operation.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub department: String,
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CampusError {
    #[error("book not found: {0}")]
    BookNotFound(String),
    #[error("equipment not found: {0}")]
    EquipmentNotFound(String),
    #[error("study room not found: {0}")]
    RoomNotFound(String),
    #[error("reward not found: {0}")]
    RewardNotFound(String),
    #[error("request not found: {0}")]
    RequestNotFound(Uuid),
    #[error("{title} is out of stock")]
    OutOfStock { title: String },
    #[error("{equipment} has no {slot} slot")]
    UnknownSlot { equipment: String, slot: String },
    #[error("{equipment} is already booked at {slot}")]
    SlotTaken { equipment: String, slot: String },
    #[error("seat {seat} does not exist in {room} (capacity {capacity})")]
    SeatOutOfRange { room: String, seat: u32, capacity: u32 },
    #[error("seat {seat} in {room} is already booked")]
    SeatTaken { room: String, seat: u32 },
    #[error("request {id} is already {}", .status.as_str())]
    NotPending { id: Uuid, status: RequestStatus },
    #[error("Not enough points!")]
    NotEnoughPoints { cost: u32, available: u32 },
    #[error("{0} is required")]
    MissingField(&'static str),
}

// =============================================================================
// CAMPUS
// =============================================================================

/// Live campus state. Queues that the UI shows newest-first are `VecDeque`s
/// fed with `push_front`.
#[derive(Debug, Default)]
pub struct Campus {
    pub catalog: Catalog,
    pub resource_requests: VecDeque<ResourceRequest>,
    pub event_requests: Vec<EventRequest>,
    pub events: Vec<Event>,
    pub rewards: Vec<Reward>,
    pub redemptions: VecDeque<Redemption>,
    pub posts: VecDeque<Post>,
    pub connect_posts: VecDeque<ConnectPost>,
}

impl Campus {
    /// Build the live state from a parsed seed.
    #[must_use]
    pub fn from_seed(seed: seed::Seed) -> Self {
        Self {
            catalog: Catalog {
                books: seed.books,
                equipment: seed.equipment,
                study_rooms: seed.study_rooms,
                halls: seed.halls,
            },
            resource_requests: seed.resource_requests.into(),
            event_requests: seed.event_requests,
            events: seed.events,
            rewards: seed.rewards,
            redemptions: seed.redemptions.into(),
            posts: seed.posts.into(),
            connect_posts: seed.connect_posts.into(),
        }
    }
}

/// Current UTC time as RFC 3339, used for request timestamps.
#[must_use]
pub fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// Campus built from the compiled-in seed.
    #[must_use]
    pub fn seeded_campus() -> Campus {
        Campus::from_seed(seed::Seed::parse(seed::DEFAULT_SEED).expect("default seed should parse"))
    }

    #[must_use]
    pub fn actor(role: Role) -> Actor {
        Actor {
            id: Uuid::new_v4(),
            name: format!("Test {}", role.label()),
            role,
            department: "Computer Science".into(),
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
