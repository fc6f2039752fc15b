//! Genetic operators for timetable chromosomes.
//!
//! Each operator family sits behind a small trait
//! ([`SelectionOperator`], [`CrossoverOperator`], [`MutationOperator`]) so
//! the engine does not depend on a concrete strategy. [`GeneticOperators`] bundles runtime-selectable strategies with
//! their rates.
//!
//! # Usage
//!
//! ```
//! use u_timetable::ga::operators::{CrossoverType, GeneticOperators, MutationType};
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.crossover_type, CrossoverType::OnePoint);
//! assert_eq!(ops.mutation_type, MutationType::Resample);
//! ```

use std::cmp::Ordering;

use rand::Rng;

use super::chromosome::TimetableChromosome;
use super::problem::TimetableProblem;

/// Parent selection.
pub trait SelectionOperator {
    /// Picks one parent from an evaluated, non-empty population.
    fn select<'p, R: Rng + ?Sized>(
        &self,
        population: &'p [TimetableChromosome],
        rng: &mut R,
    ) -> &'p TimetableChromosome;
}

/// Recombination of two parents into two children.
pub trait CrossoverOperator {
    /// Produces two unevaluated children of the same length as the parents.
    fn crossover<R: Rng + ?Sized>(
        &self,
        p1: &TimetableChromosome,
        p2: &TimetableChromosome,
        rng: &mut R,
    ) -> (TimetableChromosome, TimetableChromosome);
}

/// In-place gene perturbation.
pub trait MutationOperator {
    /// Mutates `chromosome` and returns the number of genes changed.
    fn mutate<R: Rng + ?Sized>(
        &self,
        chromosome: &mut TimetableChromosome,
        problem: &TimetableProblem<'_>,
        rng: &mut R,
    ) -> usize;
}

/// Orders two evaluated chromosomes, better first: higher fitness, then
/// fewer hard violations.
pub(crate) fn compare_quality(a: &TimetableChromosome, b: &TimetableChromosome) -> Ordering {
    b.fitness
        .total_cmp(&a.fitness)
        .then_with(|| a.hard_violations.cmp(&b.hard_violations))
}

/// k-way tournament: draws `size` contestants with replacement and keeps
/// the best.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    /// Contestants per tournament (at least 1).
    pub size: usize,
}

impl TournamentSelection {
    /// Creates a tournament of `size` contestants.
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { size: 3 }
    }
}

impl SelectionOperator for TournamentSelection {
    fn select<'p, R: Rng + ?Sized>(
        &self,
        population: &'p [TimetableChromosome],
        rng: &mut R,
    ) -> &'p TimetableChromosome {
        let mut best = &population[rng.random_range(0..population.len())];
        for _ in 1..self.size {
            let contender = &population[rng.random_range(0..population.len())];
            if compare_quality(contender, best) == Ordering::Less {
                best = contender;
            }
        }
        best
    }
}

/// Crossover strategy.
///
/// Genes stay aligned with courses, so every strategy exchanges whole
/// (room, start) pairs at matching positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossoverType {
    /// Swap the tails after one uniformly chosen cut point.
    #[default]
    OnePoint,
    /// Swap the segment between two cut points.
    TwoPoint,
    /// Swap each gene independently with probability 1/2.
    Uniform,
}

impl CrossoverOperator for CrossoverType {
    fn crossover<R: Rng + ?Sized>(
        &self,
        p1: &TimetableChromosome,
        p2: &TimetableChromosome,
        rng: &mut R,
    ) -> (TimetableChromosome, TimetableChromosome) {
        let mut g1 = p1.genes.clone();
        let mut g2 = p2.genes.clone();
        let n = g1.len().min(g2.len());

        if n >= 2 {
            match self {
                CrossoverType::OnePoint => {
                    let cut = rng.random_range(1..n);
                    g1[cut..n].swap_with_slice(&mut g2[cut..n]);
                }
                CrossoverType::TwoPoint => {
                    let a = rng.random_range(0..n);
                    let b = rng.random_range(0..n);
                    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                    g1[lo..=hi].swap_with_slice(&mut g2[lo..=hi]);
                }
                CrossoverType::Uniform => {
                    for i in 0..n {
                        if rng.random_bool(0.5) {
                            std::mem::swap(&mut g1[i], &mut g2[i]);
                        }
                    }
                }
            }
        }

        (TimetableChromosome::new(g1), TimetableChromosome::new(g2))
    }
}

/// Mutation strategy. Every gene is considered independently with the
/// configured per-gene rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationType {
    /// Redraw both room and start slot.
    #[default]
    Resample,
    /// Redraw the room only.
    Room,
    /// Redraw the start slot only.
    Timeslot,
}

/// Per-gene mutation with a fixed rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneMutation {
    /// What a mutated gene redraws.
    pub kind: MutationType,
    /// Per-gene probability, in `[0, 1]`.
    pub rate: f64,
}

impl MutationOperator for GeneMutation {
    fn mutate<R: Rng + ?Sized>(
        &self,
        chromosome: &mut TimetableChromosome,
        problem: &TimetableProblem<'_>,
        rng: &mut R,
    ) -> usize {
        let mut changed = 0;
        for course in 0..chromosome.genes.len() {
            if rng.random::<f64>() >= self.rate {
                continue;
            }
            let gene = &mut chromosome.genes[course];
            match self.kind {
                MutationType::Resample => *gene = problem.random_gene(course, rng),
                MutationType::Room => gene.room_id = problem.random_room(course, rng),
                MutationType::Timeslot => gene.timeslot_id = problem.random_start(course, rng),
            }
            changed += 1;
        }
        if changed > 0 {
            chromosome.invalidate();
        }
        changed
    }
}

/// Runtime-selectable operator bundle with rates.
///
/// # Example
///
/// ```
/// use u_timetable::ga::operators::{CrossoverType, GeneticOperators, MutationType};
///
/// let ops = GeneticOperators::default()
///     .with_crossover(CrossoverType::Uniform, 0.9)
///     .with_mutation(MutationType::Timeslot, 0.1);
/// assert_eq!(ops.crossover_rate, 0.9);
/// ```
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    /// Parent selection.
    pub selection: TournamentSelection,
    /// Crossover strategy.
    pub crossover_type: CrossoverType,
    /// Probability that a parent pair is recombined.
    pub crossover_rate: f64,
    /// Mutation strategy.
    pub mutation_type: MutationType,
    /// Per-gene mutation probability.
    pub mutation_rate: f64,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            selection: TournamentSelection::default(),
            crossover_type: CrossoverType::OnePoint,
            crossover_rate: 0.8,
            mutation_type: MutationType::Resample,
            mutation_rate: 0.05,
        }
    }
}

impl GeneticOperators {
    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.selection = TournamentSelection::new(size);
        self
    }

    /// Sets the crossover strategy and rate (clamped to `[0, 1]`).
    pub fn with_crossover(mut self, kind: CrossoverType, rate: f64) -> Self {
        self.crossover_type = kind;
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation strategy and per-gene rate (clamped to `[0, 1]`).
    pub fn with_mutation(mut self, kind: MutationType, rate: f64) -> Self {
        self.mutation_type = kind;
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Selects one parent.
    pub fn select<'p, R: Rng + ?Sized>(
        &self,
        population: &'p [TimetableChromosome],
        rng: &mut R,
    ) -> &'p TimetableChromosome {
        self.selection.select(population, rng)
    }

    /// Recombines with probability `crossover_rate`; otherwise the
    /// children are copies of the parents.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        p1: &TimetableChromosome,
        p2: &TimetableChromosome,
        rng: &mut R,
    ) -> (TimetableChromosome, TimetableChromosome) {
        if rng.random::<f64>() < self.crossover_rate {
            self.crossover_type.crossover(p1, p2, rng)
        } else {
            (p1.clone(), p2.clone())
        }
    }

    /// Applies per-gene mutation; returns the number of genes changed.
    pub fn mutate<R: Rng + ?Sized>(
        &self,
        chromosome: &mut TimetableChromosome,
        problem: &TimetableProblem<'_>,
        rng: &mut R,
    ) -> usize {
        GeneMutation {
            kind: self.mutation_type,
            rate: self.mutation_rate,
        }
        .mutate(chromosome, problem, rng)
    }
}
