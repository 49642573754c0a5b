//! Request queues: resource bookings and event proposals awaiting review.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Actor, Campus, CampusError};

// =============================================================================
// STATUS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Listing filter. Reviewers look at `pending` unless they ask otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Pending,
    Approved,
    Rejected,
    All,
}

impl StatusFilter {
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            None | Some("" | "pending") => Some(Self::Pending),
            Some("approved") => Some(Self::Approved),
            Some("rejected") => Some(Self::Rejected),
            Some("all") => Some(Self::All),
            Some(_) => None,
        }
    }

    #[must_use]
    pub fn matches(self, status: RequestStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == RequestStatus::Pending,
            Self::Approved => status == RequestStatus::Approved,
            Self::Rejected => status == RequestStatus::Rejected,
        }
    }
}

// =============================================================================
// RESOURCE REQUESTS
// =============================================================================

/// What a resource request asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResourceTarget {
    Book {
        #[serde(rename = "itemId")]
        item_id: String,
    },
    Equipment {
        #[serde(rename = "itemId")]
        item_id: String,
        slot: String,
    },
    Seat {
        #[serde(rename = "roomId")]
        room_id: String,
        #[serde(rename = "seatNum")]
        seat_num: u32,
    },
}

impl ResourceTarget {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Book { .. } => "Book",
            Self::Equipment { .. } => "Equipment",
            Self::Seat { .. } => "Seat",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequest {
    pub id: Uuid,
    #[serde(flatten)]
    pub target: ResourceTarget,
    pub item_name: String,
    #[serde(default)]
    pub requester_id: Option<Uuid>,
    pub requester_name: String,
    pub status: RequestStatus,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<Uuid>,
}

// =============================================================================
// EVENT REQUESTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
}

/// A published campus event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub time: String,
    pub date: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub created_by: Option<Uuid>,
    pub status: EventStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    #[serde(default = "Uuid::new_v4")]
    pub request_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_type: String,
    pub proposed_date: String,
    pub proposed_time: String,
    pub location: String,
    #[serde(default)]
    pub expected_attendees: Option<u32>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub requester_id: Option<Uuid>,
    pub requester_name: String,
    #[serde(default)]
    pub department: String,
    pub status: RequestStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<Uuid>,
}

impl EventRequest {
    /// The event published when this request is approved.
    #[must_use]
    pub fn to_event(&self) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: self.title.clone(),
            description: self.description.clone(),
            time: self.proposed_time.clone(),
            date: self.proposed_date.clone(),
            location: self.location.clone(),
            kind: self.event_type.clone(),
            created_by: self.requester_id,
            status: EventStatus::Upcoming,
        }
    }
}

/// Event proposal as submitted by a user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub proposed_date: String,
    #[serde(default)]
    pub proposed_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub expected_attendees: Option<u32>,
    #[serde(default)]
    pub budget: Option<String>,
}

fn required(value: &str, field: &'static str) -> Result<String, CampusError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CampusError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

// =============================================================================
// SUBMISSION
// =============================================================================

impl Campus {
    /// Queue a resource request after checking the item is bookable right now.
    ///
    /// # Errors
    ///
    /// Returns the catalog error that would have disabled the request in the
    /// UI: unknown item, no copies left, slot not offered or booked, seat out
    /// of range or booked.
    pub fn submit_resource_request(
        &mut self,
        target: ResourceTarget,
        requester: &Actor,
        timestamp: String,
    ) -> Result<&ResourceRequest, CampusError> {
        let item_name = match &target {
            ResourceTarget::Book { item_id } => self.catalog.check_book(item_id)?.title.clone(),
            ResourceTarget::Equipment { item_id, slot } => self.catalog.check_slot(item_id, slot)?.name.clone(),
            ResourceTarget::Seat { room_id, seat_num } => self.catalog.check_seat(room_id, *seat_num)?.name.clone(),
        };

        self.resource_requests.push_front(ResourceRequest {
            id: Uuid::new_v4(),
            target,
            item_name,
            requester_id: Some(requester.id),
            requester_name: requester.name.clone(),
            status: RequestStatus::Pending,
            timestamp,
            reviewed_by: None,
        });
        Ok(&self.resource_requests[0])
    }

    /// Queue an event proposal.
    ///
    /// # Errors
    ///
    /// Returns [`CampusError::MissingField`] for a blank title, type, date,
    /// time or location.
    pub fn submit_event_request(
        &mut self,
        proposal: NewEventRequest,
        requester: &Actor,
        created_at: String,
    ) -> Result<&EventRequest, CampusError> {
        let request = EventRequest {
            request_id: Uuid::new_v4(),
            title: required(&proposal.title, "title")?,
            description: proposal
                .description
                .map(|d| d.trim().to_owned())
                .unwrap_or_default(),
            event_type: required(&proposal.event_type, "eventType")?,
            proposed_date: required(&proposal.proposed_date, "proposedDate")?,
            proposed_time: required(&proposal.proposed_time, "proposedTime")?,
            location: required(&proposal.location, "location")?,
            expected_attendees: proposal.expected_attendees,
            budget: proposal.budget.filter(|b| !b.trim().is_empty()),
            requester_id: Some(requester.id),
            requester_name: requester.name.clone(),
            department: requester.department.clone(),
            status: RequestStatus::Pending,
            created_at,
            reviewed_by: None,
        };
        self.event_requests.push(request);
        let last = self.event_requests.len() - 1;
        Ok(&self.event_requests[last])
    }

    pub fn list_resource_requests(&self, filter: StatusFilter) -> Vec<ResourceRequest> {
        self.resource_requests
            .iter()
            .filter(|r| filter.matches(r.status))
            .cloned()
            .collect()
    }

    pub fn list_event_requests(&self, filter: StatusFilter) -> Vec<EventRequest> {
        self.event_requests
            .iter()
            .filter(|r| filter.matches(r.status))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "requests_test.rs"]
mod tests;
