//! Timetabling domain models.
//!
//! Provides the data types for describing a timetabling problem (courses,
//! rooms, timeslots, teachers) and its solutions (assignments, schedules,
//! violations).
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Secondary school | Training center |
//! |-------------|------------|------------------|-----------------|
//! | Course | Lecture/Lab session | Class period | Workshop |
//! | Room | Amphitheater/Lab | Classroom | Meeting room |
//! | Timeslot | Lecture slot | Period | Session block |
//! | Teacher | Professor | Teacher | Trainer |

mod constraint;
mod course;
mod data;
mod room;
mod schedule;
mod teacher;
mod timeslot;

pub use constraint::{ConstraintConfig, FitnessWeights, SoftRule};
pub use course::Course;
pub use data::ScheduleData;
pub use room::{Room, RoomType};
pub use schedule::{Assignment, Schedule, Severity, Violation, ViolationKind};
pub use teacher::Teacher;
pub use timeslot::{ClockTime, Timeslot, Weekday};

/// Course identifier.
pub type CourseId = u32;
/// Room identifier.
pub type RoomId = u32;
/// Timeslot identifier.
pub type TimeslotId = u32;
/// Teacher identifier.
pub type TeacherId = u32;
