//! Hard rules: conflicts, capacity, availability, day boundary.

use super::{Placement, ViolationReport};
use crate::domain::DomainModel;
use crate::models::{Violation, ViolationKind};

/// Appends every hard violation of `placements` to `report`.
///
/// Placements must be in course order. Per-course rules are checked first
/// for each course, then its conflicts with every later course, so records
/// come out grouped by the lower course id.
pub(super) fn check(placements: &[Placement], domain: &DomainModel, report: &mut ViolationReport) {
    let courses = domain.courses();
    let rooms = domain.rooms();

    for (i, p) in placements.iter().enumerate() {
        let course = &courses[p.course];
        let room = &rooms[p.room];

        if !room.fits(course.student_count) {
            report.push(Violation::for_course(
                ViolationKind::RoomCapacity,
                course.id,
                format!(
                    "Room {} seats {} but course {} has {} students",
                    room.id, room.capacity, course.id, course.student_count
                ),
            ));
        }

        if let Some(pos) = p
            .positions
            .clone()
            .find(|&pos| !domain.is_available(p.teacher, pos))
        {
            report.push(Violation::for_course(
                ViolationKind::TeacherUnavailable,
                course.id,
                format!(
                    "Teacher {} is not available at timeslot {}",
                    course.teacher_id,
                    domain.timeslots()[pos].id
                ),
            ));
        }

        if p.overflow {
            report.push(Violation::for_course(
                ViolationKind::DayOverflow,
                course.id,
                format!(
                    "Block of {} slots starting at timeslot {} runs past the end of {}",
                    course.duration,
                    domain.timeslots()[p.positions.start].id,
                    domain.days()[domain.day_of(p.positions.start)].day
                ),
            ));
        }

        for q in &placements[i + 1..] {
            if !p.overlaps(q) {
                continue;
            }
            let other = courses[q.course].id;
            if p.room == q.room {
                report.push(Violation::for_course(
                    ViolationKind::RoomConflict,
                    course.id,
                    format!("Courses {} and {} overlap in room {}", course.id, other, room.id),
                ));
            }
            if p.teacher == q.teacher {
                report.push(Violation::for_course(
                    ViolationKind::TeacherConflict,
                    course.id,
                    format!(
                        "Courses {} and {} overlap for teacher {}",
                        course.id, other, course.teacher_id
                    ),
                ));
            }
        }
    }
}
