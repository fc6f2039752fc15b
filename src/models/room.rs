//! Room model.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RoomId;

/// A room that can host courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Seats available (must be positive).
    pub capacity: i32,
    /// Room classification.
    #[serde(rename = "type", alias = "room_type")]
    pub room_type: RoomType,
}

/// Room type classification.
///
/// Parsed leniently from upstream labels; unknown labels are kept as
/// [`RoomType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomType {
    /// Lecture hall / amphitheater.
    Lecture,
    /// Laboratory (practical work).
    Lab,
    /// Tutorial room (directed work).
    Tutorial,
    /// Any other label.
    Other(String),
}

impl From<String> for RoomType {
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "lecture" | "amphi" | "amphitheater" | "cours" => Self::Lecture,
            "lab" | "laboratory" | "tp" => Self::Lab,
            "tutorial" | "td" => Self::Tutorial,
            _ => Self::Other(label),
        }
    }
}

impl From<RoomType> for String {
    fn from(room_type: RoomType) -> Self {
        room_type.to_string()
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lecture => f.write_str("lecture"),
            Self::Lab => f.write_str("lab"),
            Self::Tutorial => f.write_str("tutorial"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

impl Room {
    /// Creates a new room.
    pub fn new(id: RoomId, capacity: i32, room_type: RoomType) -> Self {
        Self {
            id,
            name: String::new(),
            capacity,
            room_type,
        }
    }

    /// Creates a lecture hall.
    pub fn lecture(id: RoomId, capacity: i32) -> Self {
        Self::new(id, capacity, RoomType::Lecture)
    }

    /// Creates a laboratory.
    pub fn lab(id: RoomId, capacity: i32) -> Self {
        Self::new(id, capacity, RoomType::Lab)
    }

    /// Creates a tutorial room.
    pub fn tutorial(id: RoomId, capacity: i32) -> Self {
        Self::new(id, capacity, RoomType::Tutorial)
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether the room seats `students`.
    #[inline]
    pub fn fits(&self, students: i32) -> bool {
        self.capacity >= students
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_builders() {
        let r = Room::lecture(1, 50).with_name("Amphi A");
        assert_eq!(r.room_type, RoomType::Lecture);
        assert_eq!(r.name, "Amphi A");
        assert!(r.fits(50));
        assert!(!r.fits(51));

        assert_eq!(Room::lab(2, 25).room_type, RoomType::Lab);
        assert_eq!(Room::tutorial(3, 35).room_type, RoomType::Tutorial);
    }

    #[test]
    fn test_room_type_labels() {
        assert_eq!(RoomType::from("TP".to_string()), RoomType::Lab);
        assert_eq!(RoomType::from("Amphi".to_string()), RoomType::Lecture);
        assert_eq!(
            RoomType::from("studio".to_string()),
            RoomType::Other("studio".into())
        );
        assert_eq!(String::from(RoomType::Tutorial), "tutorial");
    }

    #[test]
    fn test_room_serde_type_field() {
        let json = r#"{"id": 2, "name": "Salle TP", "capacity": 25, "type": "lab"}"#;
        let r: Room = serde_json::from_str(json).unwrap();
        assert_eq!(r.room_type, RoomType::Lab);

        let back = serde_json::to_value(&r).unwrap();
        assert_eq!(back["type"], "lab");
    }
}
