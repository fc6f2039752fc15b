//! Constraint evaluation.
//!
//! Scores a [`Schedule`](crate::models::Schedule) against a
//! [`DomainModel`](crate::domain::DomainModel): counts hard and soft
//! violations, records each one, and folds the counts into a scalar
//! fitness to be maximized.
//!
//! # Hard rules
//!
//! | Rule | Counted |
//! |------|---------|
//! | Room double-booking | once per overlapping pair |
//! | Teacher double-booking | once per overlapping pair |
//! | Room capacity | once per course |
//! | Teacher availability | once per course |
//! | Day-boundary overflow | once per course |
//!
//! # Soft rules
//!
//! Enabled through [`ConstraintConfig`](crate::models::ConstraintConfig):
//! idle gaps, day balance, late Friday slots.
//!
//! Evaluation is pure: the same schedule and domain always produce the
//! same report, with records in course-id order.

mod evaluator;
mod hard;
mod report;
mod soft;

pub use evaluator::{evaluate, ConstraintEvaluator};
pub use report::ViolationReport;

use std::ops::Range;

/// An assignment resolved to domain positions.
#[derive(Debug, Clone)]
pub(crate) struct Placement {
    /// Course index.
    pub course: usize,
    /// Room index.
    pub room: usize,
    /// Teacher index.
    pub teacher: usize,
    /// Occupied timeslot positions (clipped to the start day).
    pub positions: Range<usize>,
    /// Whether the block runs past the end of its day.
    pub overflow: bool,
}

impl Placement {
    /// Whether two placements share at least one timeslot.
    #[inline]
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.positions.start < other.positions.end && other.positions.start < self.positions.end
    }
}
