//! Raw problem input as delivered by the upstream system of record.

use serde::{Deserialize, Serialize};

use super::{Course, Room, Teacher, Timeslot};

/// Unvalidated collections describing one classroom's timetabling problem.
///
/// Deserializes from the upstream payload shape. Pass it to
/// [`DomainModel::new`](crate::domain::DomainModel::new) to validate and
/// index it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleData {
    /// Classroom the data belongs to, if known.
    #[serde(default, alias = "classroomId", skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<u64>,
    /// Courses to place.
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Rooms available.
    #[serde(default)]
    pub rooms: Vec<Room>,
    /// Timeslots available.
    #[serde(default)]
    pub timeslots: Vec<Timeslot>,
    /// Teachers and their availability.
    #[serde(default)]
    pub teachers: Vec<Teacher>,
}

impl ScheduleData {
    /// Creates an empty data set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the classroom id.
    pub fn with_classroom(mut self, classroom_id: u64) -> Self {
        self.classroom_id = Some(classroom_id);
        self
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a timeslot.
    pub fn with_timeslot(mut self, timeslot: Timeslot) -> Self {
        self.timeslots.push(timeslot);
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }
}
