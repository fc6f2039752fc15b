//! Validated, indexed problem instance.
//!
//! [`DomainModel`] is built once per request from [`ScheduleData`] and is
//! read-only afterwards. Every other component works on it rather than on
//! the raw collections: it resolves ids to positions, orders timeslots by
//! (day, start time), groups them into days and precomputes each course's
//! eligible rooms and each teacher's availability mask.

use std::collections::HashMap;
use std::ops::Range;

use crate::error::{Result, TimetableError};
use crate::models::{
    Course, CourseId, Room, RoomId, Schedule, ScheduleData, Teacher, TeacherId, Timeslot,
    TimeslotId, Weekday,
};
use crate::validation::validate_input;

/// A run of consecutive timeslot positions sharing one weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRange {
    /// The weekday.
    pub day: Weekday,
    /// Positions (into [`DomainModel::timeslots`]) belonging to this day.
    pub positions: Range<usize>,
}

impl DayRange {
    /// Number of timeslots on this day.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the day has no timeslots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Slots a course occupies when started at a given position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Occupied positions, clipped to the start slot's day.
    pub positions: Range<usize>,
    /// Whether the requested duration runs past the end of the day.
    pub overflow: bool,
}

/// Validated, cross-referenced timetabling problem.
#[derive(Debug, Clone)]
pub struct DomainModel {
    courses: Vec<Course>,
    rooms: Vec<Room>,
    timeslots: Vec<Timeslot>,
    teachers: Vec<Teacher>,
    course_index: HashMap<CourseId, usize>,
    room_index: HashMap<RoomId, usize>,
    slot_index: HashMap<TimeslotId, usize>,
    days: Vec<DayRange>,
    slot_day: Vec<usize>,
    course_teacher: Vec<usize>,
    eligible_rooms: Vec<Vec<usize>>,
    availability: Vec<Vec<bool>>,
}

impl DomainModel {
    /// Validates and indexes raw input.
    ///
    /// # Errors
    /// [`TimetableError::MalformedInput`] listing every structural problem
    /// found by [`validate_input`].
    pub fn new(data: ScheduleData) -> Result<Self> {
        validate_input(&data).map_err(|errors| TimetableError::from_validation(&errors))?;

        let ScheduleData {
            mut courses,
            mut rooms,
            mut timeslots,
            mut teachers,
            ..
        } = data;

        courses.sort_by_key(|c| c.id);
        rooms.sort_by_key(|r| r.id);
        teachers.sort_by_key(|t| t.id);
        timeslots.sort_by_key(|t| t.sort_key());

        let course_index = courses.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        let room_index = rooms.iter().enumerate().map(|(i, r)| (r.id, i)).collect();
        let slot_index: HashMap<TimeslotId, usize> =
            timeslots.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        let teacher_index: HashMap<TeacherId, usize> =
            teachers.iter().enumerate().map(|(i, t)| (t.id, i)).collect();

        let mut days: Vec<DayRange> = Vec::new();
        let mut slot_day = Vec::with_capacity(timeslots.len());
        for (pos, slot) in timeslots.iter().enumerate() {
            match days.last_mut() {
                Some(range) if range.day == slot.day => range.positions.end = pos + 1,
                _ => days.push(DayRange {
                    day: slot.day,
                    positions: pos..pos + 1,
                }),
            }
            slot_day.push(days.len() - 1);
        }

        let mut course_teacher = Vec::with_capacity(courses.len());
        for course in &courses {
            let idx = teacher_index.get(&course.teacher_id).copied().ok_or_else(|| {
                TimetableError::MalformedInput(format!(
                    "Course {} references unknown teacher {}",
                    course.id, course.teacher_id
                ))
            })?;
            course_teacher.push(idx);
        }

        let eligible_rooms = courses
            .iter()
            .map(|course| {
                let matching: Vec<usize> = match &course.room_type {
                    Some(required) => rooms
                        .iter()
                        .enumerate()
                        .filter(|(_, r)| &r.room_type == required)
                        .map(|(i, _)| i)
                        .collect(),
                    None => Vec::new(),
                };
                if matching.is_empty() {
                    if let Some(required) = &course.room_type {
                        log::warn!(
                            "Course {} requires a {} room but none exists; any room is eligible",
                            course.id,
                            required
                        );
                    }
                    (0..rooms.len()).collect()
                } else {
                    matching
                }
            })
            .collect();

        let availability = teachers
            .iter()
            .map(|teacher| {
                let mut mask = vec![false; timeslots.len()];
                for slot in &teacher.available_slots {
                    if let Some(&pos) = slot_index.get(slot) {
                        mask[pos] = true;
                    }
                }
                mask
            })
            .collect();

        Ok(Self {
            courses,
            rooms,
            timeslots,
            teachers,
            course_index,
            room_index,
            slot_index,
            days,
            slot_day,
            course_teacher,
            eligible_rooms,
            availability,
        })
    }

    /// Courses ordered by id.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Rooms ordered by id.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Timeslots ordered by (day, start time).
    pub fn timeslots(&self) -> &[Timeslot] {
        &self.timeslots
    }

    /// Teachers ordered by id.
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// Days that have at least one timeslot, in week order.
    pub fn days(&self) -> &[DayRange] {
        &self.days
    }

    /// Index of a course in [`courses`](Self::courses).
    pub fn course_position(&self, id: CourseId) -> Option<usize> {
        self.course_index.get(&id).copied()
    }

    /// Index of a room in [`rooms`](Self::rooms).
    pub fn room_position(&self, id: RoomId) -> Option<usize> {
        self.room_index.get(&id).copied()
    }

    /// Position of a timeslot in the (day, start time) order.
    pub fn slot_position(&self, id: TimeslotId) -> Option<usize> {
        self.slot_index.get(&id).copied()
    }

    /// Day index (into [`days`](Self::days)) of a timeslot position.
    #[inline]
    pub fn day_of(&self, position: usize) -> usize {
        self.slot_day[position]
    }

    /// Teacher index of a course.
    #[inline]
    pub fn teacher_of(&self, course: usize) -> usize {
        self.course_teacher[course]
    }

    /// Rooms a course may be sampled into.
    #[inline]
    pub fn eligible_rooms(&self, course: usize) -> &[usize] {
        &self.eligible_rooms[course]
    }

    /// Whether a teacher is available at a timeslot position.
    #[inline]
    pub fn is_available(&self, teacher: usize, position: usize) -> bool {
        self.availability[teacher][position]
    }

    /// Block occupied by a course started at `start`.
    pub fn block(&self, course: usize, start: usize) -> Block {
        let day_end = self.days[self.slot_day[start]].positions.end;
        let wanted = start + self.courses[course].block_len();
        Block {
            positions: start..wanted.min(day_end),
            overflow: wanted > day_end,
        }
    }

    /// Checks that a schedule lists every course exactly once, in course-id
    /// order, with known rooms and timeslots.
    ///
    /// # Errors
    /// [`TimetableError::MalformedInput`] describing every mismatch.
    pub fn check_schedule(&self, schedule: &Schedule) -> Result<()> {
        let mut problems = Vec::new();

        if schedule.len() != self.courses.len() {
            problems.push(format!(
                "Schedule has {} assignments for {} courses",
                schedule.len(),
                self.courses.len()
            ));
        }
        let mut seen = vec![false; self.courses.len()];
        for a in &schedule.assignments {
            match self.course_position(a.course_id) {
                Some(idx) if seen[idx] => {
                    problems.push(format!("Course {} is assigned more than once", a.course_id))
                }
                Some(idx) => seen[idx] = true,
                None => problems.push(format!("Unknown course {}", a.course_id)),
            }
            if self.room_position(a.room_id).is_none() {
                problems.push(format!(
                    "Course {} uses unknown room {}",
                    a.course_id, a.room_id
                ));
            }
            if self.slot_position(a.timeslot_id).is_none() {
                problems.push(format!(
                    "Course {} uses unknown timeslot {}",
                    a.course_id, a.timeslot_id
                ));
            }
        }
        for (idx, _) in seen.iter().enumerate().filter(|(_, s)| !**s) {
            problems.push(format!("Course {} has no assignment", self.courses[idx].id));
        }
        if problems.is_empty()
            && !schedule
                .course_ids()
                .eq(self.courses.iter().map(|c| c.id))
        {
            problems.push("Assignments are not in course-id order".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(TimetableError::MalformedInput(problems.join("; ")))
        }
    }

    /// Upper bound on the soft-violation count of any schedule.
    ///
    /// Gaps: one per idle run, at most one per slot per teacher and room.
    /// Friday: one per course. Balance: bounded by the count variance,
    /// itself below `courses²`.
    pub fn max_soft_violations(&self) -> u64 {
        let slots = self.timeslots.len() as u64;
        let courses = self.courses.len() as u64;
        let resources = (self.teachers.len() + self.rooms.len()) as u64;
        resources
            .saturating_mul(slots)
            .saturating_add(courses)
            .saturating_add(courses.saturating_mul(courses))
    }
}

impl TryFrom<ScheduleData> for DomainModel {
    type Error = TimetableError;

    fn try_from(data: ScheduleData) -> Result<Self> {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, ClockTime, RoomType};

    fn slot(id: u32, day: Weekday, hour: u16) -> Timeslot {
        Timeslot::new(
            id,
            day,
            ClockTime::hm(hour, 0).unwrap(),
            ClockTime::hm(hour + 2, 0).unwrap(),
        )
    }

    fn sample_data() -> ScheduleData {
        ScheduleData::new()
            .with_course(Course::new(2, 2).with_duration(1).with_students(30))
            .with_course(Course::new(1, 1).with_duration(2).with_students(30))
            .with_course(Course::new(3, 1).with_room_type(RoomType::Lab))
            .with_room(Room::lecture(1, 50))
            .with_room(Room::lab(2, 25))
            .with_timeslot(slot(3, Weekday::Tuesday, 8))
            .with_timeslot(slot(2, Weekday::Monday, 10))
            .with_timeslot(slot(1, Weekday::Monday, 8))
            .with_teacher(Teacher::new(1).with_availability([1, 2, 3]))
            .with_teacher(Teacher::new(2).with_availability([2]))
    }

    #[test]
    fn test_sorted_and_indexed() {
        let dm = DomainModel::new(sample_data()).unwrap();
        let ids: Vec<_> = dm.courses().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let slots: Vec<_> = dm.timeslots().iter().map(|t| t.id).collect();
        assert_eq!(slots, vec![1, 2, 3]);
        assert_eq!(dm.slot_position(3), Some(2));
        assert_eq!(dm.course_position(2), Some(1));
        assert_eq!(dm.teacher_of(1), 1);
    }

    #[test]
    fn test_day_ranges() {
        let dm = DomainModel::new(sample_data()).unwrap();
        assert_eq!(dm.days().len(), 2);
        assert_eq!(dm.days()[0].day, Weekday::Monday);
        assert_eq!(dm.days()[0].positions, 0..2);
        assert_eq!(dm.days()[1].positions, 2..3);
        assert_eq!(dm.day_of(2), 1);
    }

    #[test]
    fn test_block_overflow() {
        let dm = DomainModel::new(sample_data()).unwrap();
        // Course 1 (index 0) lasts two slots.
        assert_eq!(
            dm.block(0, 0),
            Block {
                positions: 0..2,
                overflow: false
            }
        );
        assert_eq!(
            dm.block(0, 1),
            Block {
                positions: 1..2,
                overflow: true
            }
        );
        assert!(dm.block(0, 2).overflow);
    }

    #[test]
    fn test_eligible_rooms_and_availability() {
        let dm = DomainModel::new(sample_data()).unwrap();
        assert_eq!(dm.eligible_rooms(0), &[0, 1]);
        assert_eq!(dm.eligible_rooms(2), &[1]);
        assert!(dm.is_available(1, 1));
        assert!(!dm.is_available(1, 0));
    }

    #[test]
    fn test_missing_room_type_falls_back_to_all_rooms() {
        let data = sample_data().with_course(Course::new(4, 1).with_room_type(RoomType::Tutorial));
        let dm = DomainModel::new(data).unwrap();
        assert_eq!(dm.eligible_rooms(3), &[0, 1]);
    }

    #[test]
    fn test_malformed_input() {
        let data = sample_data().with_course(Course::new(9, 42));
        let err = DomainModel::new(data).unwrap_err();
        assert!(matches!(err, TimetableError::MalformedInput(ref m) if m.contains("teacher 42")));

        assert!(DomainModel::try_from(ScheduleData::new()).is_err());
    }

    #[test]
    fn test_check_schedule() {
        let dm = DomainModel::new(sample_data()).unwrap();
        let good = Schedule::from_assignments(vec![
            Assignment::new(1, 1, 1),
            Assignment::new(2, 1, 2),
            Assignment::new(3, 2, 3),
        ]);
        assert!(dm.check_schedule(&good).is_ok());

        let missing = Schedule::from_assignments(vec![Assignment::new(1, 1, 1)]);
        assert!(dm.check_schedule(&missing).is_err());

        let unknown_room = Schedule::from_assignments(vec![
            Assignment::new(1, 9, 1),
            Assignment::new(2, 1, 2),
            Assignment::new(3, 2, 3),
        ]);
        let err = dm.check_schedule(&unknown_room).unwrap_err();
        assert!(err.to_string().contains("unknown room 9"));

        let duplicated = Schedule::from_assignments(vec![
            Assignment::new(1, 1, 1),
            Assignment::new(1, 1, 2),
            Assignment::new(3, 2, 3),
        ]);
        assert!(dm.check_schedule(&duplicated).is_err());

        let mut unordered = good.clone();
        unordered.assignments.swap(0, 2);
        assert!(dm.check_schedule(&unordered).is_err());
    }
}
