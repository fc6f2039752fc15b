//! Optimizer facade.
//!
//! [`optimize`] runs the genetic search over a validated [`DomainModel`]
//! and returns the best schedule found with its statistics. [`validate`]
//! scores an externally supplied schedule without running the search.
//!
//! # Example
//!
//! ```no_run
//! use u_timetable::domain::DomainModel;
//! use u_timetable::models::ScheduleData;
//! use u_timetable::optimizer::{optimize, OptimizerConfig};
//!
//! let data: ScheduleData = serde_json::from_str("{}").unwrap();
//! let domain = DomainModel::new(data).unwrap();
//! let config = OptimizerConfig::default().with_seed(42);
//! let result = optimize(&domain, &config).unwrap();
//! println!("valid: {}", result.quality.is_valid);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::domain::DomainModel;
use crate::error::Result;
use crate::evaluation::{ConstraintEvaluator, ViolationReport};
use crate::ga::{GaConfig, GeneticEngine, RunStatistics, TimetableProblem};
use crate::models::{ConstraintConfig, FitnessWeights, Schedule};

/// Label reported in [`RunMetadata::algorithm`].
pub const ALGORITHM: &str = "genetic_algorithm";

/// Run configuration passed in at call time.
///
/// Defaults: population 100, 200 generations, crossover 0.8, per-gene
/// mutation 0.05, tournament 3, 2 elites, 50 stall generations, parallel
/// evaluation, no seed, no time limit.
#[derive(Debug, Clone, Default)]
pub struct OptimizerConfig {
    /// GA settings.
    pub ga: GaConfig,
    /// Soft rule toggles.
    pub constraints: ConstraintConfig,
    /// Fitness weights.
    pub weights: FitnessWeights,
    /// RNG seed; drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl OptimizerConfig {
    /// Sets the population size (at least 2).
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.ga = self.ga.with_population_size(size);
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, generations: u32) -> Self {
        self.ga = self.ga.with_max_generations(generations);
        self
    }

    /// Sets the crossover probability (clamped to `[0, 1]`).
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.ga = self.ga.with_crossover_rate(rate);
        self
    }

    /// Sets the per-gene mutation probability (clamped to `[0, 1]`).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.ga = self.ga.with_mutation_rate(rate);
        self
    }

    /// Sets the tournament size (at least 1).
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.ga = self.ga.with_tournament_size(size);
        self
    }

    /// Sets the elite count (at least 1, below the population size).
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.ga = self.ga.with_elite_count(count);
        self
    }

    /// Sets the stall patience (0 disables it).
    pub fn with_stall_generations(mut self, generations: u32) -> Self {
        self.ga = self.ga.with_stall_generations(generations);
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.ga = self.ga.with_time_limit(limit);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.ga = self.ga.with_parallel(parallel);
        self
    }

    /// Sets the soft rule toggles.
    pub fn with_constraints(mut self, constraints: ConstraintConfig) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets the fitness weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Violation counts of the returned schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualitySummary {
    pub hard_violations: u32,
    pub soft_violations: u32,
    pub total_violations: u32,
    /// `hard_violations == 0`.
    pub is_valid: bool,
}

impl From<&ViolationReport> for QualitySummary {
    fn from(report: &ViolationReport) -> Self {
        Self {
            hard_violations: report.hard,
            soft_violations: report.soft,
            total_violations: report.total(),
            is_valid: report.is_valid(),
        }
    }
}

/// Description of how a result was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunMetadata {
    pub algorithm: String,
    pub population_size: usize,
    pub max_generations: u32,
    /// Seed the RNG was built from (absent for caller-supplied RNGs).
    pub seed: Option<u64>,
}

/// Outcome of [`optimize`].
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    /// Best-ever schedule, in course-id order.
    pub schedule: Schedule,
    pub statistics: RunStatistics,
    pub quality: QualitySummary,
    /// Full violation report of `schedule`.
    pub violations: ViolationReport,
    pub metadata: RunMetadata,
}

/// Reusable optimizer with a cancellation handle.
///
/// A cancel request stops the current run, or the next one if none is in
/// progress, and is cleared once that run returns. Clones get their own
/// handle.
///
/// ```no_run
/// use std::sync::atomic::Ordering;
/// use u_timetable::optimizer::{Optimizer, OptimizerConfig};
/// # let domain: u_timetable::domain::DomainModel = unimplemented!();
///
/// let optimizer = Optimizer::new(OptimizerConfig::default());
/// let cancel = optimizer.cancel_handle();
/// // From another thread:
/// cancel.store(true, Ordering::Relaxed);
/// let result = optimizer.run(&domain).unwrap();
/// ```
#[derive(Debug)]
pub struct Optimizer {
    config: OptimizerConfig,
    cancelled: Arc<AtomicBool>,
}

impl Clone for Optimizer {
    fn clone(&self) -> Self {
        Self::new(self.config.clone())
    }
}

impl Optimizer {
    /// Creates an optimizer.
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Handle that stops a running search at its next generation boundary.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Runs the search with an RNG seeded from `config.seed`, or from the
    /// OS when no seed is set. The seed used is reported in the metadata.
    ///
    /// # Errors
    /// [`TimetableError::Engine`](crate::error::TimetableError) on
    /// evaluation faults.
    pub fn run(&self, domain: &DomainModel) -> Result<OptimizationResult> {
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = SmallRng::seed_from_u64(seed);
        self.run_inner(domain, &mut rng, Some(seed))
    }

    /// Runs the search with a caller-supplied RNG.
    ///
    /// # Errors
    /// Same as [`Optimizer::run`].
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        domain: &DomainModel,
        rng: &mut R,
    ) -> Result<OptimizationResult> {
        self.run_inner(domain, rng, None)
    }

    fn run_inner<R: Rng + ?Sized>(
        &self,
        domain: &DomainModel,
        rng: &mut R,
        seed: Option<u64>,
    ) -> Result<OptimizationResult> {
        let config = &self.config;
        let problem = TimetableProblem::with_weights(domain, &config.constraints, config.weights);
        let engine = GeneticEngine::new(problem, config.ga.clone())
            .with_cancel_flag(Arc::clone(&self.cancelled));

        let outcome = engine.run(rng);
        self.cancelled.store(false, Ordering::Relaxed);
        let outcome = outcome?;
        let schedule = engine.problem().decode(&outcome.best);
        let violations = engine.problem().evaluator().evaluate(&schedule)?;

        Ok(OptimizationResult {
            quality: QualitySummary::from(&violations),
            schedule,
            statistics: outcome.statistics,
            violations,
            metadata: RunMetadata {
                algorithm: ALGORITHM.to_string(),
                population_size: config.ga.population_size.max(2),
                max_generations: config.ga.max_generations,
                seed,
            },
        })
    }
}

/// Runs the genetic search to termination and returns the best-ever
/// schedule with its statistics.
///
/// # Errors
/// [`TimetableError::Engine`](crate::error::TimetableError) on evaluation
/// faults. Malformed input is rejected earlier, by [`DomainModel::new`].
pub fn optimize(domain: &DomainModel, config: &OptimizerConfig) -> Result<OptimizationResult> {
    Optimizer::new(config.clone()).run(domain)
}

/// Scores an externally supplied schedule with default weights.
///
/// Assignments may come in any order; they are put in course-id order
/// first. The schedule and domain are left untouched.
///
/// # Errors
/// [`TimetableError::MalformedInput`](crate::error::TimetableError) when
/// the schedule references unknown courses, rooms or timeslots, repeats a
/// course, or omits one.
pub fn validate(
    schedule: &Schedule,
    domain: &DomainModel,
    constraints: &ConstraintConfig,
) -> Result<ViolationReport> {
    let normalized = Schedule::from_assignments(schedule.assignments.iter().copied());
    ConstraintEvaluator::new(domain, constraints).evaluate(&normalized)
}
