//! Timetable chromosome.
//!
//! # Encoding
//!
//! One gene per course, in course-id order. Each gene is the
//! (room id, start timeslot id) pair of that course's assignment, so the
//! course id is implied by the gene's position.
//!
//! Decoding is total: any gene vector of the right length decodes to a
//! schedule listing every course exactly once, whether or not it violates
//! constraints.

use serde::{Deserialize, Serialize};

use crate::domain::DomainModel;
use crate::error::Result;
use crate::models::{Assignment, RoomId, Schedule, TimeslotId};

/// Assignment of one course: where and when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gene {
    /// Hosting room.
    pub room_id: RoomId,
    /// First timeslot of the block.
    pub timeslot_id: TimeslotId,
}

impl Gene {
    /// Creates a gene.
    pub fn new(room_id: RoomId, timeslot_id: TimeslotId) -> Self {
        Self {
            room_id,
            timeslot_id,
        }
    }
}

/// Gene vector with its cached evaluation.
///
/// Higher fitness = better schedule (maximization, 0 is perfect).
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableChromosome {
    /// One gene per course, in course-id order.
    pub genes: Vec<Gene>,
    /// Fitness value (`NEG_INFINITY` until evaluated).
    pub fitness: f64,
    /// Hard violation count from the last evaluation.
    pub hard_violations: u32,
    /// Soft violation count from the last evaluation.
    pub soft_violations: u32,
}

impl TimetableChromosome {
    /// Wraps a gene vector as an unevaluated chromosome.
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            fitness: f64::NEG_INFINITY,
            hard_violations: 0,
            soft_violations: 0,
        }
    }

    /// Encodes a schedule.
    ///
    /// # Errors
    /// [`TimetableError::MalformedInput`](crate::error::TimetableError) if
    /// the schedule does not list every course of `domain` once, in
    /// course-id order, with known rooms and timeslots.
    pub fn encode(schedule: &Schedule, domain: &DomainModel) -> Result<Self> {
        domain.check_schedule(schedule)?;
        let genes = schedule
            .assignments
            .iter()
            .map(|a| Gene::new(a.room_id, a.timeslot_id))
            .collect();
        Ok(Self::new(genes))
    }

    /// Decodes into a schedule, pairing gene `i` with the `i`-th course.
    pub fn decode(&self, domain: &DomainModel) -> Schedule {
        debug_assert_eq!(self.genes.len(), domain.courses().len());
        Schedule {
            assignments: domain
                .courses()
                .iter()
                .zip(&self.genes)
                .map(|(course, gene)| Assignment::new(course.id, gene.room_id, gene.timeslot_id))
                .collect(),
        }
    }

    /// Whether the chromosome has been evaluated since its genes last changed.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.fitness != f64::NEG_INFINITY
    }

    /// Clears the cached evaluation after the genes change.
    #[inline]
    pub fn invalidate(&mut self) {
        self.fitness = f64::NEG_INFINITY;
        self.hard_violations = 0;
        self.soft_violations = 0;
    }

    /// Sum of room and timeslot ids over all genes (elitism tie-break key).
    pub fn gene_key_sum(&self) -> u64 {
        self.genes
            .iter()
            .map(|g| u64::from(g.room_id) + u64::from(g.timeslot_id))
            .sum()
    }

    /// Number of genes.
    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether there are no genes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}
