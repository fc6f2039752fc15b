//! Course model.
//!
//! A course is one teaching unit that needs a room and a contiguous block
//! of timeslots on a single day.

use serde::{Deserialize, Serialize};

use super::{CourseId, RoomType, TeacherId};

/// A course to be placed in the timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: CourseId,
    /// Subject label (e.g., "Mathematics").
    #[serde(default)]
    pub subject: String,
    /// Teacher giving the course.
    #[serde(alias = "teacherId")]
    pub teacher_id: TeacherId,
    /// Number of contiguous timeslots required (must be positive).
    pub duration: i32,
    /// Number of enrolled students (must be positive).
    #[serde(alias = "students_count", alias = "studentCount")]
    pub student_count: i32,
    /// Required room type. `None` = any room.
    #[serde(default, alias = "roomType")]
    pub room_type: Option<RoomType>,
}

impl Course {
    /// Creates a single-slot course with one student.
    pub fn new(id: CourseId, teacher_id: TeacherId) -> Self {
        Self {
            id,
            subject: String::new(),
            teacher_id,
            duration: 1,
            student_count: 1,
            room_type: None,
        }
    }

    /// Sets the subject label.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the number of contiguous timeslots.
    pub fn with_duration(mut self, duration: i32) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the enrolment.
    pub fn with_students(mut self, count: i32) -> Self {
        self.student_count = count;
        self
    }

    /// Restricts the course to rooms of a given type.
    pub fn with_room_type(mut self, room_type: RoomType) -> Self {
        self.room_type = Some(room_type);
        self
    }

    /// Block length as a slot count. Only meaningful after validation.
    #[inline]
    pub fn block_len(&self) -> usize {
        self.duration.max(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_builder() {
        let c = Course::new(1, 7)
            .with_subject("Mathématiques")
            .with_duration(2)
            .with_students(30)
            .with_room_type(RoomType::Lecture);

        assert_eq!(c.id, 1);
        assert_eq!(c.teacher_id, 7);
        assert_eq!(c.subject, "Mathématiques");
        assert_eq!(c.block_len(), 2);
        assert_eq!(c.student_count, 30);
        assert_eq!(c.room_type, Some(RoomType::Lecture));
    }

    #[test]
    fn test_negative_duration_block_len() {
        let c = Course::new(1, 1).with_duration(-3);
        assert_eq!(c.block_len(), 0);
    }

    #[test]
    fn test_deserialize_upstream_shape() {
        let json = r#"{"id": 1, "subject": "Physique", "teacher_id": 2, "duration": 2, "students_count": 30}"#;
        let c: Course = serde_json::from_str(json).unwrap();
        assert_eq!(c.teacher_id, 2);
        assert_eq!(c.student_count, 30);
        assert!(c.room_type.is_none());
    }
}
