use super::*;

fn catalog() -> Catalog {
    crate::campus::test_helpers::seeded_campus().catalog
}

// =============================================================================
// books
// =============================================================================

#[test]
fn commit_book_decrements_quantity() {
    let mut cat = catalog();
    assert_eq!(cat.commit_book("b4").unwrap(), 1);
    assert_eq!(cat.book("b4").unwrap().qty, 1);
}

#[test]
fn last_copy_then_out_of_stock() {
    let mut cat = catalog();
    cat.commit_book("b4").unwrap();
    assert_eq!(cat.commit_book("b4").unwrap(), 0);
    assert!(matches!(cat.check_book("b4"), Err(CampusError::OutOfStock { .. })));
    assert!(matches!(cat.commit_book("b4"), Err(CampusError::OutOfStock { .. })));
    assert_eq!(cat.book("b4").unwrap().qty, 0);
}

#[test]
fn unknown_book_is_not_found() {
    let cat = catalog();
    assert_eq!(cat.book("nope"), Err(CampusError::BookNotFound("nope".into())));
}

// =============================================================================
// equipment
// =============================================================================

#[test]
fn commit_slot_books_exactly_that_slot() {
    let mut cat = catalog();
    let before = cat.equipment("l2").unwrap().booked_slots.clone();
    cat.commit_slot("l2", "11:00").unwrap();
    let after = &cat.equipment("l2").unwrap().booked_slots;
    assert_eq!(after.len(), before.len() + 1);
    assert!(after.contains("11:00"));
}

#[test]
fn booked_slot_is_refused() {
    let mut cat = catalog();
    let err = cat.commit_slot("l1", "10:00").unwrap_err();
    assert!(matches!(err, CampusError::SlotTaken { ref slot, .. } if slot == "10:00"));
}

#[test]
fn slot_not_offered_is_refused() {
    let cat = catalog();
    assert!(matches!(cat.check_slot("l3", "09:00"), Err(CampusError::UnknownSlot { .. })));
}

#[test]
fn open_slots_skip_booked() {
    let cat = catalog();
    let open: Vec<&str> = cat.equipment("l1").unwrap().open_slots().collect();
    assert_eq!(open, vec!["09:00", "11:00", "14:00", "15:00"]);
}

// =============================================================================
// study rooms
// =============================================================================

#[test]
fn commit_seat_adds_seat() {
    let mut cat = catalog();
    cat.commit_seat("sr2", 4).unwrap();
    let room = cat.room("sr2").unwrap();
    assert!(room.booked_seats.contains(&4));
    assert_eq!(room.occupied(), 4);
}

#[test]
fn seat_bounds_are_one_based() {
    let cat = catalog();
    assert!(matches!(cat.check_seat("sr2", 0), Err(CampusError::SeatOutOfRange { .. })));
    assert!(matches!(cat.check_seat("sr2", 13), Err(CampusError::SeatOutOfRange { capacity: 12, .. })));
    assert!(cat.check_seat("sr2", 12).is_ok());
}

#[test]
fn booked_seat_is_refused() {
    let cat = catalog();
    assert!(matches!(cat.check_seat("sr1", 5), Err(CampusError::SeatTaken { seat: 5, .. })));
}

#[test]
fn catalog_serializes_camel_case() {
    let json = serde_json::to_value(catalog()).unwrap();
    assert!(json.get("studyRooms").is_some());
    assert_eq!(json["equipment"][0]["bookedSlots"], serde_json::json!(["10:00"]));
    assert_eq!(json["studyRooms"][1]["bookedSeats"], serde_json::json!([1, 2, 3]));
}
