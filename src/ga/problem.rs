//! Timetabling GA problem definition.
//!
//! Bridges the domain model to the generic search: samples legal genes,
//! creates random individuals and scores them through the constraint
//! evaluator.

use rand::prelude::IndexedRandom;
use rand::Rng;

use super::chromosome::{Gene, TimetableChromosome};
use crate::domain::DomainModel;
use crate::error::Result;
use crate::evaluation::ConstraintEvaluator;
use crate::models::{ConstraintConfig, FitnessWeights, RoomId, Schedule, TimeslotId};

/// GA problem definition for timetable construction.
///
/// # Example
/// ```no_run
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_timetable::domain::DomainModel;
/// use u_timetable::ga::{GaConfig, GeneticEngine, TimetableProblem};
/// use u_timetable::models::{ConstraintConfig, ScheduleData};
///
/// let domain = DomainModel::new(ScheduleData::new()).unwrap();
/// let constraints = ConstraintConfig::default();
/// let problem = TimetableProblem::new(&domain, &constraints);
/// let engine = GeneticEngine::new(problem, GaConfig::default());
/// let result = engine.run(&mut SmallRng::seed_from_u64(42)).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct TimetableProblem<'a> {
    evaluator: ConstraintEvaluator<'a>,
}

impl<'a> TimetableProblem<'a> {
    /// Creates a problem with default fitness weights.
    pub fn new(domain: &'a DomainModel, constraints: &'a ConstraintConfig) -> Self {
        Self {
            evaluator: ConstraintEvaluator::new(domain, constraints),
        }
    }

    /// Creates a problem with custom fitness weights.
    pub fn with_weights(
        domain: &'a DomainModel,
        constraints: &'a ConstraintConfig,
        weights: FitnessWeights,
    ) -> Self {
        Self {
            evaluator: ConstraintEvaluator::with_weights(domain, constraints, weights),
        }
    }

    /// The underlying domain.
    pub fn domain(&self) -> &'a DomainModel {
        self.evaluator.domain()
    }

    /// The constraint evaluator.
    pub fn evaluator(&self) -> &ConstraintEvaluator<'a> {
        &self.evaluator
    }

    /// Number of genes per chromosome.
    pub fn gene_count(&self) -> usize {
        self.domain().courses().len()
    }

    /// Samples a fresh gene for a course: a room, then a start slot.
    pub fn random_gene<R: Rng + ?Sized>(&self, course: usize, rng: &mut R) -> Gene {
        let room_id = self.random_room(course, rng);
        let timeslot_id = self.random_start(course, rng);
        Gene::new(room_id, timeslot_id)
    }

    /// Draws a room uniformly from the course's eligible rooms.
    pub fn random_room<R: Rng + ?Sized>(&self, course: usize, rng: &mut R) -> RoomId {
        let domain = self.domain();
        let room = domain
            .eligible_rooms(course)
            .choose(rng)
            .copied()
            .unwrap_or(0);
        domain.rooms()[room].id
    }

    /// Draws a start slot for the course's block.
    ///
    /// Picks a random day, then a uniform start among the positions where
    /// the whole block fits. If the day is too short, any slot of that day
    /// is used and the overflow is left to the evaluator.
    pub fn random_start<R: Rng + ?Sized>(&self, course: usize, rng: &mut R) -> TimeslotId {
        let domain = self.domain();
        let day = &domain.days()[rng.random_range(0..domain.days().len())];
        let block = domain.courses()[course].block_len();
        let start = if block <= day.len() {
            day.positions.start + rng.random_range(0..=day.len() - block)
        } else {
            day.positions.start + rng.random_range(0..day.len())
        };
        domain.timeslots()[start].id
    }

    /// Creates a random, unevaluated individual.
    pub fn create_individual<R: Rng + ?Sized>(&self, rng: &mut R) -> TimetableChromosome {
        let genes = (0..self.gene_count())
            .map(|course| self.random_gene(course, rng))
            .collect();
        TimetableChromosome::new(genes)
    }

    /// Decodes a chromosome into a schedule.
    pub fn decode(&self, chromosome: &TimetableChromosome) -> Schedule {
        chromosome.decode(self.domain())
    }

    /// Evaluates a chromosome and caches the result on it.
    ///
    /// # Errors
    /// Propagates evaluator faults (e.g. fitness overflow).
    pub fn evaluate(&self, chromosome: &mut TimetableChromosome) -> Result<()> {
        let (report, fitness) = self.evaluator.score(&self.decode(chromosome))?;
        chromosome.fitness = fitness;
        chromosome.hard_violations = report.hard;
        chromosome.soft_violations = report.soft;
        Ok(())
    }
}
