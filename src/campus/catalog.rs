//! Resource catalog: books, lab equipment, study rooms and halls.
//!
//! Every booking check is a lookup plus a membership test. `check_*` methods
//! are read-only and run at submission time; `commit_*` methods re-check and
//! then apply the mutation at approval time.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::CampusError;

// =============================================================================
// ITEMS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub qty: u32,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// Offered slot labels in display order (e.g. `"09:00"`).
    pub slots: Vec<String>,
    #[serde(default)]
    pub booked_slots: BTreeSet<String>,
}

impl Equipment {
    #[must_use]
    pub fn offers(&self, slot: &str) -> bool {
        self.slots.iter().any(|s| s == slot)
    }

    #[must_use]
    pub fn is_booked(&self, slot: &str) -> bool {
        self.booked_slots.contains(slot)
    }

    /// Offered slots that are not booked yet, in display order.
    pub fn open_slots(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .map(String::as_str)
            .filter(|s| !self.is_booked(s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudyRoom {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    /// Seat numbers in `1..=capacity`.
    #[serde(default)]
    pub booked_seats: BTreeSet<u32>,
}

impl StudyRoom {
    #[must_use]
    pub fn has_seat(&self, seat: u32) -> bool {
        (1..=self.capacity).contains(&seat)
    }

    #[must_use]
    pub fn occupied(&self) -> usize {
        self.booked_seats.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hall {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub features: Vec<String>,
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub books: Vec<Book>,
    pub equipment: Vec<Equipment>,
    pub study_rooms: Vec<StudyRoom>,
    pub halls: Vec<Hall>,
}

impl Catalog {
    pub fn book(&self, id: &str) -> Result<&Book, CampusError> {
        self.books
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| CampusError::BookNotFound(id.to_owned()))
    }

    pub fn equipment(&self, id: &str) -> Result<&Equipment, CampusError> {
        self.equipment
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| CampusError::EquipmentNotFound(id.to_owned()))
    }

    pub fn room(&self, id: &str) -> Result<&StudyRoom, CampusError> {
        self.study_rooms
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CampusError::RoomNotFound(id.to_owned()))
    }

    fn book_mut(&mut self, id: &str) -> Result<&mut Book, CampusError> {
        self.books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| CampusError::BookNotFound(id.to_owned()))
    }

    fn equipment_mut(&mut self, id: &str) -> Result<&mut Equipment, CampusError> {
        self.equipment
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CampusError::EquipmentNotFound(id.to_owned()))
    }

    fn room_mut(&mut self, id: &str) -> Result<&mut StudyRoom, CampusError> {
        self.study_rooms
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CampusError::RoomNotFound(id.to_owned()))
    }

    // -------------------------------------------------------------------------
    // availability checks
    // -------------------------------------------------------------------------

    /// Returns the book when at least one copy is on the shelf.
    pub fn check_book(&self, id: &str) -> Result<&Book, CampusError> {
        let book = self.book(id)?;
        if book.qty == 0 {
            return Err(CampusError::OutOfStock { title: book.title.clone() });
        }
        Ok(book)
    }

    /// Returns the equipment when `slot` is offered and still open.
    pub fn check_slot(&self, id: &str, slot: &str) -> Result<&Equipment, CampusError> {
        let equipment = self.equipment(id)?;
        if !equipment.offers(slot) {
            return Err(CampusError::UnknownSlot { equipment: equipment.name.clone(), slot: slot.to_owned() });
        }
        if equipment.is_booked(slot) {
            return Err(CampusError::SlotTaken { equipment: equipment.name.clone(), slot: slot.to_owned() });
        }
        Ok(equipment)
    }

    /// Returns the room when `seat` exists and is still free.
    pub fn check_seat(&self, id: &str, seat: u32) -> Result<&StudyRoom, CampusError> {
        let room = self.room(id)?;
        if !room.has_seat(seat) {
            return Err(CampusError::SeatOutOfRange { room: room.name.clone(), seat, capacity: room.capacity });
        }
        if room.booked_seats.contains(&seat) {
            return Err(CampusError::SeatTaken { room: room.name.clone(), seat });
        }
        Ok(room)
    }

    // -------------------------------------------------------------------------
    // commits
    // -------------------------------------------------------------------------

    /// Lend one copy. Returns the remaining quantity.
    pub fn commit_book(&mut self, id: &str) -> Result<u32, CampusError> {
        self.check_book(id)?;
        let book = self.book_mut(id)?;
        book.qty -= 1;
        Ok(book.qty)
    }

    /// Move `slot` into the equipment's booked set.
    pub fn commit_slot(&mut self, id: &str, slot: &str) -> Result<(), CampusError> {
        self.check_slot(id, slot)?;
        self.equipment_mut(id)?
            .booked_slots
            .insert(slot.to_owned());
        Ok(())
    }

    /// Add `seat` to the room's booked set.
    pub fn commit_seat(&mut self, id: &str, seat: u32) -> Result<(), CampusError> {
        self.check_seat(id, seat)?;
        self.room_mut(id)?.booked_seats.insert(seat);
        Ok(())
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
