//! Approval engine: pending requests become committed bookings or events.
//!
//! INVARIANTS
//! ==========
//! - Only `pending` requests can be approved or rejected.
//! - A resource approval changes exactly one catalog entry. If the catalog
//!   refuses (no copies, slot or seat already taken), neither the request nor
//!   the catalog changes and the request stays pending.
//! - Rejection never touches the catalog or the event list.
//! - Nothing is ever released: approved bookings are final.

use tracing::info;
use uuid::Uuid;

use super::requests::{Event, EventRequest, RequestStatus, ResourceRequest, ResourceTarget};
use super::{Campus, CampusError};

fn ensure_pending(id: Uuid, status: RequestStatus) -> Result<(), CampusError> {
    if status == RequestStatus::Pending {
        Ok(())
    } else {
        Err(CampusError::NotPending { id, status })
    }
}

impl Campus {
    fn pending_resource_request(&self, id: Uuid) -> Result<usize, CampusError> {
        let idx = self
            .resource_requests
            .iter()
            .position(|r| r.id == id)
            .ok_or(CampusError::RequestNotFound(id))?;
        ensure_pending(id, self.resource_requests[idx].status)?;
        Ok(idx)
    }

    fn pending_event_request(&self, id: Uuid) -> Result<usize, CampusError> {
        let idx = self
            .event_requests
            .iter()
            .position(|r| r.request_id == id)
            .ok_or(CampusError::RequestNotFound(id))?;
        ensure_pending(id, self.event_requests[idx].status)?;
        Ok(idx)
    }

    /// Approve a resource request and book the item it names.
    ///
    /// # Errors
    ///
    /// Unknown or non-pending request, or the catalog refusing the booking.
    pub fn approve_resource_request(&mut self, id: Uuid, reviewer: Uuid) -> Result<ResourceRequest, CampusError> {
        let idx = self.pending_resource_request(id)?;
        let target = self.resource_requests[idx].target.clone();

        match &target {
            ResourceTarget::Book { item_id } => {
                let remaining = self.catalog.commit_book(item_id)?;
                info!(%id, book = %item_id, remaining, "book lent");
            }
            ResourceTarget::Equipment { item_id, slot } => {
                self.catalog.commit_slot(item_id, slot)?;
                info!(%id, equipment = %item_id, %slot, "equipment slot booked");
            }
            ResourceTarget::Seat { room_id, seat_num } => {
                self.catalog.commit_seat(room_id, *seat_num)?;
                info!(%id, room = %room_id, seat = seat_num, "study seat booked");
            }
        }

        let request = &mut self.resource_requests[idx];
        request.status = RequestStatus::Approved;
        request.reviewed_by = Some(reviewer);
        Ok(request.clone())
    }

    /// Reject a resource request. The catalog is left alone.
    ///
    /// # Errors
    ///
    /// Unknown or non-pending request.
    pub fn reject_resource_request(&mut self, id: Uuid, reviewer: Uuid) -> Result<ResourceRequest, CampusError> {
        let idx = self.pending_resource_request(id)?;
        let request = &mut self.resource_requests[idx];
        request.status = RequestStatus::Rejected;
        request.reviewed_by = Some(reviewer);
        info!(%id, kind = request.target.kind(), "resource request rejected");
        Ok(request.clone())
    }

    /// Approve an event request and publish the derived event.
    ///
    /// # Errors
    ///
    /// Unknown or non-pending request.
    pub fn approve_event_request(&mut self, id: Uuid, reviewer: Uuid) -> Result<(EventRequest, Event), CampusError> {
        let idx = self.pending_event_request(id)?;
        let request = &mut self.event_requests[idx];
        request.status = RequestStatus::Approved;
        request.reviewed_by = Some(reviewer);
        let request = request.clone();

        let event = request.to_event();
        self.events.push(event.clone());
        info!(%id, event_id = %event.id, title = %event.title, "event published");
        Ok((request, event))
    }

    /// Reject an event request. No event is published.
    ///
    /// # Errors
    ///
    /// Unknown or non-pending request.
    pub fn reject_event_request(&mut self, id: Uuid, reviewer: Uuid) -> Result<EventRequest, CampusError> {
        let idx = self.pending_event_request(id)?;
        let request = &mut self.event_requests[idx];
        request.status = RequestStatus::Rejected;
        request.reviewed_by = Some(reviewer);
        info!(%id, "event request rejected");
        Ok(request.clone())
    }
}

#[cfg(test)]
#[path = "approval_test.rs"]
mod tests;
