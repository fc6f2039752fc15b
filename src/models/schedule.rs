//! Schedule (solution) model.
//!
//! A schedule assigns every course to one room and a starting timeslot.
//! Violations found by the evaluator are reported separately so that a
//! schedule stays a plain value that can be compared and hashed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CourseId, RoomId, TimeslotId};

/// A complete timetable: one assignment per course, in course-id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    /// Course assignments, ordered by course id.
    pub assignments: Vec<Assignment>,
}

/// A course-room-timeslot assignment.
///
/// The course occupies `duration` contiguous timeslots starting at
/// `timeslot_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned course.
    #[serde(alias = "courseId")]
    pub course_id: CourseId,
    /// Hosting room.
    #[serde(alias = "roomId")]
    pub room_id: RoomId,
    /// First timeslot of the block.
    #[serde(alias = "timeslotId", alias = "start_timeslot_id")]
    pub timeslot_id: TimeslotId,
}

/// Whether a violation makes the schedule unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Hard,
    Soft,
}

/// Classification of constraint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Two courses overlap in the same room.
    RoomConflict,
    /// Two courses of the same teacher overlap.
    TeacherConflict,
    /// Room has fewer seats than enrolled students.
    RoomCapacity,
    /// Block uses a slot outside the teacher's availability.
    TeacherUnavailable,
    /// Block runs past the last slot of its day.
    DayOverflow,
    /// Idle slot run between two occupied slots of a teacher or room.
    IdleGap,
    /// Course counts are spread unevenly across days.
    DayImbalance,
    /// Block uses a late Friday slot.
    FridayEvening,
}

impl ViolationKind {
    /// Severity class of this kind.
    pub fn severity(self) -> Severity {
        match self {
            Self::RoomConflict
            | Self::TeacherConflict
            | Self::RoomCapacity
            | Self::TeacherUnavailable
            | Self::DayOverflow => Severity::Hard,
            Self::IdleGap | Self::DayImbalance | Self::FridayEvening => Severity::Soft,
        }
    }

    /// Whether this kind is a hard constraint.
    #[inline]
    pub fn is_hard(self) -> bool {
        self.severity() == Severity::Hard
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RoomConflict => "room conflict",
            Self::TeacherConflict => "teacher conflict",
            Self::RoomCapacity => "room capacity",
            Self::TeacherUnavailable => "teacher unavailable",
            Self::DayOverflow => "day overflow",
            Self::IdleGap => "idle gap",
            Self::DayImbalance => "day imbalance",
            Self::FridayEvening => "friday evening",
        };
        f.write_str(label)
    }
}

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub kind: ViolationKind,
    /// Course the violation is recorded against (`None` for schedule-wide rules).
    pub course_id: Option<CourseId>,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    /// Creates a violation attached to a course.
    pub fn for_course(kind: ViolationKind, course_id: CourseId, message: impl Into<String>) -> Self {
        Self {
            kind,
            course_id: Some(course_id),
            message: message.into(),
        }
    }

    /// Creates a schedule-wide violation.
    pub fn global(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            course_id: None,
            message: message.into(),
        }
    }

    /// Severity of this violation.
    #[inline]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(course_id: CourseId, room_id: RoomId, timeslot_id: TimeslotId) -> Self {
        Self {
            course_id,
            room_id,
            timeslot_id,
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from assignments in any order, sorted by course id.
    pub fn from_assignments(assignments: impl IntoIterator<Item = Assignment>) -> Self {
        let mut assignments: Vec<Assignment> = assignments.into_iter().collect();
        assignments.sort_by_key(|a| a.course_id);
        Self { assignments }
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Finds the assignment of a course.
    pub fn assignment_for_course(&self, course_id: CourseId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.course_id == course_id)
    }

    /// Returns all assignments hosted by a room.
    pub fn assignments_for_room(&self, room_id: RoomId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.room_id == room_id)
            .collect()
    }

    /// Course ids in schedule order.
    pub fn course_ids(&self) -> impl Iterator<Item = CourseId> + '_ {
        self.assignments.iter().map(|a| a.course_id)
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the schedule has no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
