//! Input validation for timetabling problems.
//!
//! Checks structural integrity of courses, rooms, timeslots and teachers
//! before a [`DomainModel`](crate::domain::DomainModel) is built. Detects:
//! - Empty collections
//! - Duplicate IDs
//! - Courses referencing unknown teachers
//! - Non-positive durations, enrolments and capacities
//! - Timeslots whose end is not after their start
//! - Teacher availability referencing unknown timeslots
//!
//! Every detected problem is reported, not just the first one.

use crate::models::ScheduleData;
use std::collections::HashSet;
use std::hash::Hash;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required collection is empty.
    EmptyCollection,
    /// Two entities share the same ID.
    DuplicateId,
    /// A course references a teacher that doesn't exist.
    UnknownTeacher,
    /// A course has a duration of zero or less.
    NonPositiveDuration,
    /// A course has zero or fewer students.
    NonPositiveStudentCount,
    /// A room has zero or fewer seats.
    NonPositiveCapacity,
    /// A timeslot ends at or before its start.
    InvalidTimeRange,
    /// A teacher lists a timeslot that doesn't exist.
    UnknownAvailabilitySlot,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a timetabling problem.
///
/// Checks:
/// 1. Courses, rooms, timeslots and teachers are all non-empty
/// 2. No duplicate IDs within each collection
/// 3. Every course references an existing teacher
/// 4. Every course has a positive duration and student count
/// 5. Every room has a positive capacity
/// 6. Every timeslot ends after it starts
/// 7. Every teacher availability entry references an existing timeslot
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(data: &ScheduleData) -> ValidationResult {
    let mut errors = Vec::new();

    for (name, empty) in [
        ("courses", data.courses.is_empty()),
        ("rooms", data.rooms.is_empty()),
        ("timeslots", data.timeslots.is_empty()),
        ("teachers", data.teachers.is_empty()),
    ] {
        if empty {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCollection,
                format!("No {name} provided"),
            ));
        }
    }

    check_unique("course", data.courses.iter().map(|c| c.id), &mut errors);
    check_unique("room", data.rooms.iter().map(|r| r.id), &mut errors);
    check_unique("timeslot", data.timeslots.iter().map(|t| t.id), &mut errors);
    let teacher_ids = check_unique("teacher", data.teachers.iter().map(|t| t.id), &mut errors);
    let slot_ids: HashSet<_> = data.timeslots.iter().map(|t| t.id).collect();

    for course in &data.courses {
        if !teacher_ids.contains(&course.teacher_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTeacher,
                format!(
                    "Course {} references unknown teacher {}",
                    course.id, course.teacher_id
                ),
            ));
        }
        if course.duration <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!("Course {} has non-positive duration {}", course.id, course.duration),
            ));
        }
        if course.student_count <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveStudentCount,
                format!(
                    "Course {} has non-positive student count {}",
                    course.id, course.student_count
                ),
            ));
        }
    }

    for room in &data.rooms {
        if room.capacity <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveCapacity,
                format!("Room {} has non-positive capacity {}", room.id, room.capacity),
            ));
        }
    }

    for slot in &data.timeslots {
        if slot.end_time <= slot.start_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeRange,
                format!(
                    "Timeslot {} ends at {} before starting at {}",
                    slot.id, slot.end_time, slot.start_time
                ),
            ));
        }
    }

    for teacher in &data.teachers {
        for slot in &teacher.available_slots {
            if !slot_ids.contains(slot) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownAvailabilitySlot,
                    format!("Teacher {} lists unknown timeslot {}", teacher.id, slot),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Collects IDs, reporting each duplicate once per extra occurrence.
fn check_unique<T>(
    entity: &str,
    ids: impl Iterator<Item = T>,
    errors: &mut Vec<ValidationError>,
) -> HashSet<T>
where
    T: Eq + Hash + Copy + std::fmt::Display,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {entity} ID: {id}"),
            ));
        }
    }
    seen
}
