//! Violation report.

use serde::{Deserialize, Serialize};

use crate::models::{Severity, Violation, ViolationKind};

/// Result of evaluating one schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationReport {
    /// Number of hard violations.
    pub hard: u32,
    /// Number of soft violations.
    pub soft: u32,
    /// Individual violation records, in course-id order.
    pub details: Vec<Violation>,
}

impl ViolationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation that counts once.
    pub fn push(&mut self, violation: Violation) {
        self.push_weighted(violation, 1);
    }

    /// Records a violation that counts `count` times.
    pub(crate) fn push_weighted(&mut self, violation: Violation, count: u32) {
        match violation.severity() {
            Severity::Hard => self.hard = self.hard.saturating_add(count),
            Severity::Soft => self.soft = self.soft.saturating_add(count),
        }
        self.details.push(violation);
    }

    /// Whether the schedule is usable (no hard violations).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.hard == 0
    }

    /// Hard plus soft count.
    #[inline]
    pub fn total(&self) -> u32 {
        self.hard.saturating_add(self.soft)
    }

    /// Number of records of a given kind.
    pub fn count_of(&self, kind: ViolationKind) -> usize {
        self.details.iter().filter(|v| v.kind == kind).count()
    }

    /// Orders records by course id, schedule-wide records last.
    pub(crate) fn sort_details(&mut self) {
        self.details
            .sort_by_key(|v| (v.course_id.is_none(), v.course_id));
    }
}
