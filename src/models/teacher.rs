//! Teacher model.

use serde::{Deserialize, Serialize};

use super::{TeacherId, TimeslotId};

/// A teacher with a fixed set of available timeslots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: TeacherId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Timeslots at which the teacher can teach.
    #[serde(default, alias = "availableSlotIds", alias = "available_slot_ids")]
    pub available_slots: Vec<TimeslotId>,
}

impl Teacher {
    /// Creates a teacher with no availability.
    pub fn new(id: TeacherId) -> Self {
        Self {
            id,
            name: String::new(),
            available_slots: Vec::new(),
        }
    }

    /// Sets the teacher name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the available timeslots.
    pub fn with_availability(mut self, slots: impl IntoIterator<Item = TimeslotId>) -> Self {
        self.available_slots = slots.into_iter().collect();
        self
    }

    /// Whether the teacher can teach at `slot`.
    pub fn is_available(&self, slot: TimeslotId) -> bool {
        self.available_slots.contains(&slot)
    }
}
