//! Constraint evaluator and fitness aggregation.

use super::{hard, soft, Placement, ViolationReport};
use crate::domain::DomainModel;
use crate::error::{Result, TimetableError};
use crate::models::{ConstraintConfig, FitnessWeights, Schedule};

/// Scores schedules against one domain and constraint configuration.
///
/// Holds only shared references, so one evaluator can be used from many
/// threads at once.
#[derive(Debug, Clone)]
pub struct ConstraintEvaluator<'a> {
    domain: &'a DomainModel,
    config: &'a ConstraintConfig,
    weights: FitnessWeights,
}

impl<'a> ConstraintEvaluator<'a> {
    /// Creates an evaluator with the default 1000:1 weights.
    pub fn new(domain: &'a DomainModel, config: &'a ConstraintConfig) -> Self {
        Self::with_weights(domain, config, FitnessWeights::default())
    }

    /// Creates an evaluator with custom weights.
    ///
    /// The hard weight is raised when needed so that a single hard
    /// violation always outweighs the largest soft count this domain can
    /// produce.
    pub fn with_weights(
        domain: &'a DomainModel,
        config: &'a ConstraintConfig,
        weights: FitnessWeights,
    ) -> Self {
        let max_soft = if config.enabled_rules().is_empty() {
            0
        } else {
            domain.max_soft_violations()
        };
        Self {
            domain,
            config,
            weights: weights.dominating(max_soft),
        }
    }

    /// The domain being evaluated against.
    pub fn domain(&self) -> &'a DomainModel {
        self.domain
    }

    /// Effective weights.
    pub fn weights(&self) -> FitnessWeights {
        self.weights
    }

    /// Evaluates a schedule.
    ///
    /// # Errors
    /// [`TimetableError::MalformedInput`] when the schedule does not list
    /// every course exactly once in course-id order, or references unknown
    /// rooms or timeslots.
    pub fn evaluate(&self, schedule: &Schedule) -> Result<ViolationReport> {
        self.domain.check_schedule(schedule)?;
        let placements = self.resolve(schedule)?;

        let mut report = ViolationReport::new();
        hard::check(&placements, self.domain, &mut report);
        soft::check(&placements, self.domain, self.config, &mut report);
        report.sort_details();
        Ok(report)
    }

    /// Folds a report into a scalar fitness (higher is better, 0 is perfect).
    ///
    /// # Errors
    /// [`TimetableError::Engine`] if the weighted sum overflows.
    pub fn fitness(&self, report: &ViolationReport) -> Result<f64> {
        let overflow = || {
            TimetableError::Engine(format!(
                "fitness overflow: {} hard x {} + {} soft x {}",
                report.hard, self.weights.hard, report.soft, self.weights.soft
            ))
        };
        let hard = u64::from(report.hard)
            .checked_mul(self.weights.hard)
            .ok_or_else(overflow)?;
        let soft = u64::from(report.soft)
            .checked_mul(self.weights.soft)
            .ok_or_else(overflow)?;
        let penalty = hard.checked_add(soft).ok_or_else(overflow)?;
        let penalty = i64::try_from(penalty).map_err(|_| overflow())?;
        Ok(-(penalty as f64))
    }

    /// Evaluates a schedule and returns its report with its fitness.
    pub fn score(&self, schedule: &Schedule) -> Result<(ViolationReport, f64)> {
        let report = self.evaluate(schedule)?;
        let fitness = self.fitness(&report)?;
        Ok((report, fitness))
    }

    fn resolve(&self, schedule: &Schedule) -> Result<Vec<Placement>> {
        schedule
            .assignments
            .iter()
            .map(|a| {
                let unknown = || {
                    TimetableError::MalformedInput(format!(
                        "Assignment for course {} cannot be resolved",
                        a.course_id
                    ))
                };
                let course = self.domain.course_position(a.course_id).ok_or_else(unknown)?;
                let room = self.domain.room_position(a.room_id).ok_or_else(unknown)?;
                let start = self.domain.slot_position(a.timeslot_id).ok_or_else(unknown)?;
                let block = self.domain.block(course, start);
                Ok(Placement {
                    course,
                    room,
                    teacher: self.domain.teacher_of(course),
                    positions: block.positions,
                    overflow: block.overflow,
                })
            })
            .collect()
    }
}

/// Evaluates `schedule` with default weights.
///
/// Shorthand for [`ConstraintEvaluator::new`] followed by
/// [`ConstraintEvaluator::evaluate`].
pub fn evaluate(
    schedule: &Schedule,
    domain: &DomainModel,
    config: &ConstraintConfig,
) -> Result<ViolationReport> {
    ConstraintEvaluator::new(domain, config).evaluate(schedule)
}
