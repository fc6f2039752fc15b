//! Shared fixtures for integration tests.

#![allow(dead_code)]

use u_timetable::{DomainModel, ScheduleData};

/// Demo data set of the upstream scheduling service: three courses, three
/// rooms, five timeslots over three days, three teachers.
pub const DEMO_JSON: &str = r#"{
    "courses": [
        {"id": 1, "subject": "Mathématiques", "teacher_id": 1, "duration": 2, "students_count": 30},
        {"id": 2, "subject": "Physique", "teacher_id": 2, "duration": 2, "students_count": 30},
        {"id": 3, "subject": "Informatique", "teacher_id": 3, "duration": 3, "students_count": 30}
    ],
    "rooms": [
        {"id": 1, "name": "Amphi A", "capacity": 50, "type": "amphi"},
        {"id": 2, "name": "Salle TP", "capacity": 25, "type": "tp"},
        {"id": 3, "name": "Salle TD", "capacity": 35, "type": "td"}
    ],
    "timeslots": [
        {"id": 1, "day": "Lundi", "start_time": "08:00", "end_time": "10:00"},
        {"id": 2, "day": "Lundi", "start_time": "10:00", "end_time": "12:00"},
        {"id": 3, "day": "Mardi", "start_time": "08:00", "end_time": "10:00"},
        {"id": 4, "day": "Mardi", "start_time": "10:00", "end_time": "12:00"},
        {"id": 5, "day": "Mercredi", "start_time": "08:00", "end_time": "10:00"}
    ],
    "teachers": [
        {"id": 1, "name": "Prof. Alami", "available_slots": [1, 2, 3, 4]},
        {"id": 2, "name": "Prof. Bennani", "available_slots": [1, 2, 5]},
        {"id": 3, "name": "Prof. Chraibi", "available_slots": [2, 3, 4, 5]}
    ]
}"#;

/// Demo data as given.
pub fn demo_data() -> ScheduleData {
    serde_json::from_str(DEMO_JSON).unwrap()
}

/// Demo data with Informatique shortened to two slots, so every block
/// fits within a day.
pub fn feasible_demo_data() -> ScheduleData {
    let mut data = demo_data();
    data.courses[2].duration = 2;
    data
}

pub fn demo_domain() -> DomainModel {
    DomainModel::new(demo_data()).unwrap()
}

pub fn feasible_demo_domain() -> DomainModel {
    DomainModel::new(feasible_demo_data()).unwrap()
}
