//! Soft rules: idle gaps, day balance, late Friday slots.

use super::{Placement, ViolationReport};
use crate::domain::DomainModel;
use crate::models::{ConstraintConfig, Violation, ViolationKind, Weekday};

/// Appends the violations of every enabled soft rule to `report`.
pub(super) fn check(
    placements: &[Placement],
    domain: &DomainModel,
    config: &ConstraintConfig,
    report: &mut ViolationReport,
) {
    if !config.allow_gaps {
        idle_gaps(placements, domain, report);
    }
    if config.avoid_friday_evening_slots {
        friday_evening(placements, domain, config, report);
    }
    if config.balance_days {
        day_balance(placements, domain, config.balance_threshold, report);
    }
}

/// One violation per idle run between two occupied slots of the same
/// teacher, or of the same room, on the same day.
fn idle_gaps(placements: &[Placement], domain: &DomainModel, report: &mut ViolationReport) {
    let mut by_teacher: Vec<Vec<(usize, usize)>> = vec![Vec::new(); domain.teachers().len()];
    let mut by_room: Vec<Vec<(usize, usize)>> = vec![Vec::new(); domain.rooms().len()];
    for p in placements {
        for pos in p.positions.clone() {
            by_teacher[p.teacher].push((pos, p.course));
            by_room[p.room].push((pos, p.course));
        }
    }

    for (idx, occupied) in by_teacher.iter_mut().enumerate() {
        let label = format!("teacher {}", domain.teachers()[idx].id);
        report_gaps(occupied, &label, domain, report);
    }
    for (idx, occupied) in by_room.iter_mut().enumerate() {
        let label = format!("room {}", domain.rooms()[idx].id);
        report_gaps(occupied, &label, domain, report);
    }
}

fn report_gaps(
    occupied: &mut [(usize, usize)],
    label: &str,
    domain: &DomainModel,
    report: &mut ViolationReport,
) {
    occupied.sort_unstable();
    for pair in occupied.windows(2) {
        let (before, course) = pair[0];
        let (after, _) = pair[1];
        if after > before + 1 && domain.day_of(before) == domain.day_of(after) {
            let slots = domain.timeslots();
            report.push(Violation::for_course(
                ViolationKind::IdleGap,
                domain.courses()[course].id,
                format!(
                    "Idle gap for {label} between timeslots {} and {}",
                    slots[before].id, slots[after].id
                ),
            ));
        }
    }
}

/// One violation per course whose block touches a late Friday slot.
fn friday_evening(
    placements: &[Placement],
    domain: &DomainModel,
    config: &ConstraintConfig,
    report: &mut ViolationReport,
) {
    let slots = domain.timeslots();
    for p in placements {
        let late = p.positions.clone().find(|&pos| {
            slots[pos].day == Weekday::Friday && slots[pos].start_time >= config.friday_evening_from
        });
        if let Some(pos) = late {
            report.push(Violation::for_course(
                ViolationKind::FridayEvening,
                domain.courses()[p.course].id,
                format!(
                    "Uses late Friday timeslot {} ({})",
                    slots[pos].id, slots[pos].start_time
                ),
            ));
        }
    }
}

/// Population variance of per-day course counts; counts
/// `ceil(variance - threshold)` when above the threshold.
fn day_balance(
    placements: &[Placement],
    domain: &DomainModel,
    threshold: f64,
    report: &mut ViolationReport,
) {
    let days = domain.days().len();
    if days < 2 {
        return;
    }
    let mut counts = vec![0u32; days];
    for p in placements {
        counts[domain.day_of(p.positions.start)] += 1;
    }

    let mean = counts.iter().map(|&c| c as f64).sum::<f64>() / days as f64;
    let variance = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / days as f64;

    if variance > threshold {
        let excess = (variance - threshold).ceil().max(1.0) as u32;
        report.push_weighted(
            Violation::global(
                ViolationKind::DayImbalance,
                format!("Per-day course counts {counts:?} have variance {variance:.2} (threshold {threshold:.2})"),
            ),
            excess,
        );
    }
}
