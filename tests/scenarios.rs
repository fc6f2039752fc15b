//! End-to-end scenarios on the demo data set.

mod common;

use common::{demo_data, demo_domain, feasible_demo_data, feasible_demo_domain};
use u_timetable::ga::TerminationReason;
use u_timetable::models::{Assignment, ClockTime, Severity, Timeslot, ViolationKind, Weekday};
use u_timetable::{
    optimize, validate, ConstraintConfig, DomainModel, OptimizerConfig, Schedule, TimetableError,
};

fn run_config(seed: u64) -> OptimizerConfig {
    OptimizerConfig::default()
        .with_population_size(50)
        .with_max_generations(200)
        .with_seed(seed)
}

mod scenario_a {
    use super::*;

    #[test]
    fn test_feasible_demo_converges() {
        let domain = feasible_demo_domain();
        let result = optimize(&domain, &run_config(42)).unwrap();

        assert_eq!(result.quality.hard_violations, 0);
        assert!(result.quality.is_valid);
        assert_eq!(result.statistics.termination, TerminationReason::Optimal);

        // Math sits in Amphi A or Salle TD, on two slots of one day teacher 1 covers.
        let math = result.schedule.assignment_for_course(1).unwrap();
        assert!(math.room_id == 1 || math.room_id == 3);
        assert!(math.timeslot_id == 1 || math.timeslot_id == 3);
    }

    #[test]
    fn test_demo_as_given_keeps_only_the_overflow() {
        // Informatique needs three slots; no day has more than two.
        let domain = demo_domain();
        let result = optimize(&domain, &run_config(7)).unwrap();

        assert_eq!(result.quality.hard_violations, 1);
        assert!(!result.quality.is_valid);
        let hard: Vec<_> = result
            .violations
            .details
            .iter()
            .filter(|v| v.severity() == Severity::Hard)
            .collect();
        assert_eq!(hard.len(), 1);
        assert_eq!(hard[0].kind, ViolationKind::DayOverflow);
        assert_eq!(hard[0].course_id, Some(3));
    }

    #[test]
    fn test_schedule_lists_every_course_once() {
        let domain = demo_domain();
        let config = OptimizerConfig::default()
            .with_population_size(10)
            .with_max_generations(3)
            .with_seed(1);
        let result = optimize(&domain, &config).unwrap();
        assert_eq!(result.schedule.course_ids().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}

mod scenario_b {
    use super::*;

    fn oversized_domain() -> DomainModel {
        let mut data = feasible_demo_data();
        data.courses[0].student_count = 60;
        DomainModel::new(data).unwrap()
    }

    #[test]
    fn test_capacity_infeasible_never_valid() {
        let domain = oversized_domain();
        for generations in [0, 25, 100] {
            let config = OptimizerConfig::default()
                .with_population_size(30)
                .with_max_generations(generations)
                .with_seed(3);
            let result = optimize(&domain, &config).unwrap();
            assert!(result.quality.hard_violations >= 1);
            assert!(!result.quality.is_valid);
            assert!(result.violations.count_of(ViolationKind::RoomCapacity) >= 1);
        }
    }
}

mod scenario_c {
    use super::*;

    #[test]
    fn test_validator_flags_unavailable_teacher() {
        let domain = feasible_demo_domain();
        // Physique (teacher 2: slots 1, 2, 5) placed on Tuesday morning.
        let schedule = Schedule::from_assignments(vec![
            Assignment::new(1, 1, 1),
            Assignment::new(2, 3, 3),
            Assignment::new(3, 1, 3),
        ]);
        let report = validate(&schedule, &domain, &ConstraintConfig::default()).unwrap();

        assert_eq!(report.hard, 1);
        assert_eq!(report.count_of(ViolationKind::TeacherUnavailable), 1);
        assert_eq!(report.details[0].course_id, Some(2));
    }

    #[test]
    fn test_validator_is_pure() {
        let domain = feasible_demo_domain();
        let schedule = Schedule {
            assignments: vec![
                Assignment::new(3, 1, 3),
                Assignment::new(1, 1, 1),
                Assignment::new(2, 1, 1),
            ],
        };
        let snapshot = schedule.clone();
        let constraints = ConstraintConfig::default().with_allow_gaps(false);

        let first = validate(&schedule, &domain, &constraints).unwrap();
        let second = validate(&schedule, &domain, &constraints).unwrap();
        assert_eq!(first, second);
        assert_eq!(schedule, snapshot);
        assert!(first.count_of(ViolationKind::RoomConflict) >= 1);
        assert!(first.count_of(ViolationKind::TeacherConflict) == 0);
    }

    #[test]
    fn test_validator_rejects_foreign_ids() {
        let domain = feasible_demo_domain();
        let schedule = Schedule::from_assignments(vec![
            Assignment::new(1, 1, 1),
            Assignment::new(2, 3, 1),
            Assignment::new(3, 1, 42),
        ]);
        let err = validate(&schedule, &domain, &ConstraintConfig::default()).unwrap_err();
        assert!(matches!(err, TimetableError::MalformedInput(_)));
        assert!(err.is_client_fault());
    }
}

mod scenario_d {
    use super::*;

    fn friday_domain() -> DomainModel {
        let mut data = feasible_demo_data();
        let t = |h| ClockTime::hm(h, 0).unwrap();
        data.timeslots
            .push(Timeslot::new(6, Weekday::Friday, t(14), t(16)));
        data.timeslots
            .push(Timeslot::new(7, Weekday::Friday, t(16), t(18)));
        data.teachers[0].available_slots.extend([6, 7]);
        DomainModel::new(data).unwrap()
    }

    #[test]
    fn test_friday_toggle_changes_soft_only() {
        let domain = friday_domain();
        // Math runs Friday 14:00-18:00.
        let schedule = Schedule::from_assignments(vec![
            Assignment::new(1, 1, 6),
            Assignment::new(2, 3, 1),
            Assignment::new(3, 1, 3),
        ]);

        let off: ConstraintConfig =
            serde_json::from_str(r#"{"avoidFridayEveningSlots": false}"#).unwrap();
        let on: ConstraintConfig = serde_json::from_str(r#"{"avoid_friday_evening": true}"#).unwrap();

        let without = validate(&schedule, &domain, &off).unwrap();
        let with = validate(&schedule, &domain, &on).unwrap();

        assert_eq!(without.hard, with.hard);
        assert_eq!(with.hard, 0);
        assert_eq!(without.soft, 0);
        assert_eq!(with.soft, 1);
        assert_eq!(with.count_of(ViolationKind::FridayEvening), 1);
    }

    #[test]
    fn test_optimizer_avoids_friday_evening_when_asked() {
        let domain = friday_domain();
        let config = run_config(5)
            .with_constraints(ConstraintConfig::default().with_avoid_friday_evening(true));
        let result = optimize(&domain, &config).unwrap();

        assert!(result.quality.is_valid);
        assert_eq!(result.quality.soft_violations, 0);
        assert_eq!(result.statistics.best_fitness, 0.0);
    }
}

mod malformed_input {
    use super::*;

    #[test]
    fn test_dangling_teacher_rejected() {
        let mut data = demo_data();
        data.courses[1].teacher_id = 99;
        let err = DomainModel::new(data).unwrap_err();
        assert!(matches!(err, TimetableError::MalformedInput(_)));
    }

    #[test]
    fn test_empty_collections_rejected() {
        let mut data = demo_data();
        data.rooms.clear();
        assert!(DomainModel::new(data).is_err());
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        let mut data = demo_data();
        data.courses[0].duration = 0;
        assert!(DomainModel::new(data).is_err());
    }
}
