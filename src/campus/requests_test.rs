use super::*;
use crate::campus::Role;
use crate::campus::test_helpers::{actor, seeded_campus};

#[test]
fn status_filter_defaults_to_pending() {
    assert_eq!(StatusFilter::parse(None), Some(StatusFilter::Pending));
    assert_eq!(StatusFilter::parse(Some("")), Some(StatusFilter::Pending));
    assert_eq!(StatusFilter::parse(Some("all")), Some(StatusFilter::All));
    assert_eq!(StatusFilter::parse(Some("bogus")), None);
}

#[test]
fn status_filter_all_matches_everything() {
    for status in [RequestStatus::Pending, RequestStatus::Approved, RequestStatus::Rejected] {
        assert!(StatusFilter::All.matches(status));
    }
    assert!(!StatusFilter::Approved.matches(RequestStatus::Pending));
}

#[test]
fn submit_book_request_is_pending_and_named() {
    let mut campus = seeded_campus();
    let student = actor(Role::Student);
    let req = campus
        .submit_resource_request(ResourceTarget::Book { item_id: "b2".into() }, &student, "t0".into())
        .unwrap();
    assert_eq!(req.status, RequestStatus::Pending);
    assert_eq!(req.item_name, "Clean Code");
    assert_eq!(req.requester_id, Some(student.id));
    assert_eq!(req.requester_name, student.name);
}

#[test]
fn newest_resource_request_comes_first() {
    let mut campus = seeded_campus();
    let student = actor(Role::Student);
    let first = campus
        .submit_resource_request(ResourceTarget::Book { item_id: "b1".into() }, &student, "t0".into())
        .unwrap()
        .id;
    let second = campus
        .submit_resource_request(
            ResourceTarget::Seat { room_id: "sr1".into(), seat_num: 3 },
            &student,
            "t1".into(),
        )
        .unwrap()
        .id;
    let listed = campus.list_resource_requests(StatusFilter::All);
    assert_eq!(listed[0].id, second);
    assert_eq!(listed[1].id, first);
}

#[test]
fn submit_refuses_booked_slot_and_taken_seat() {
    let mut campus = seeded_campus();
    let student = actor(Role::Student);
    let slot = ResourceTarget::Equipment { item_id: "l1".into(), slot: "10:00".into() };
    assert!(matches!(
        campus.submit_resource_request(slot, &student, "t".into()),
        Err(CampusError::SlotTaken { .. })
    ));
    let seat = ResourceTarget::Seat { room_id: "sr1".into(), seat_num: 1 };
    assert!(matches!(
        campus.submit_resource_request(seat, &student, "t".into()),
        Err(CampusError::SeatTaken { .. })
    ));
    assert!(campus.resource_requests.is_empty());
}

#[test]
fn resource_request_json_shape() {
    let mut campus = seeded_campus();
    let student = actor(Role::Student);
    let req = campus
        .submit_resource_request(
            ResourceTarget::Equipment { item_id: "l2".into(), slot: "09:00".into() },
            &student,
            "t0".into(),
        )
        .unwrap()
        .clone();
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["type"], "Equipment");
    assert_eq!(json["itemId"], "l2");
    assert_eq!(json["slot"], "09:00");
    assert_eq!(json["itemName"], "MacBook Pro M2 (Dev Unit)");
    assert_eq!(json["status"], "pending");
    assert!(json.get("reviewedBy").is_none());
}

#[test]
fn resource_target_parses_seat_body() {
    let target: ResourceTarget =
        serde_json::from_value(serde_json::json!({"type": "Seat", "roomId": "sr2", "seatNum": 7})).unwrap();
    assert_eq!(target, ResourceTarget::Seat { room_id: "sr2".into(), seat_num: 7 });
    assert_eq!(target.kind(), "Seat");
}

#[test]
fn submit_event_request_requires_fields() {
    let mut campus = seeded_campus();
    let student = actor(Role::Student);
    let proposal = NewEventRequest { title: "  ".into(), ..NewEventRequest::default() };
    assert_eq!(
        campus
            .submit_event_request(proposal, &student, "t".into())
            .unwrap_err(),
        CampusError::MissingField("title")
    );
}

#[test]
fn submit_event_request_takes_requester_details() {
    let mut campus = seeded_campus();
    let student = actor(Role::Student);
    let proposal = NewEventRequest {
        title: "Rust Meetup".into(),
        description: None,
        event_type: "Workshop".into(),
        proposed_date: "Friday".into(),
        proposed_time: "05:00 PM".into(),
        location: "Lab 1".into(),
        expected_attendees: Some(30),
        budget: Some(String::new()),
    };
    let req = campus
        .submit_event_request(proposal, &student, "t".into())
        .unwrap();
    assert_eq!(req.status, RequestStatus::Pending);
    assert_eq!(req.department, "Computer Science");
    assert_eq!(req.description, "");
    assert_eq!(req.budget, None);
    assert_eq!(campus.list_event_requests(StatusFilter::Pending).len(), 2);
}

#[test]
fn to_event_copies_proposal() {
    let campus = seeded_campus();
    let event = campus.event_requests[0].to_event();
    assert_eq!(event.title, "AI Workshop");
    assert_eq!(event.time, "02:00 PM - 04:00 PM");
    assert_eq!(event.date, "Tomorrow");
    assert_eq!(event.kind, "Workshop");
    assert_eq!(event.status, EventStatus::Upcoming);
}
