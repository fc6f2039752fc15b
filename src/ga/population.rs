//! Population management: initialization, batch evaluation, elitist
//! replacement.

use std::cmp::Ordering;

use rand::Rng;
use rayon::prelude::*;

use super::chromosome::TimetableChromosome;
use super::operators::compare_quality;
use super::problem::TimetableProblem;
use crate::error::Result;

/// A fixed-size generation of chromosomes.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<TimetableChromosome>,
}

impl Population {
    /// Creates `size` random, unevaluated individuals.
    pub fn initialize<R: Rng + ?Sized>(
        problem: &TimetableProblem<'_>,
        size: usize,
        rng: &mut R,
    ) -> Self {
        Self {
            individuals: (0..size).map(|_| problem.create_individual(rng)).collect(),
        }
    }

    /// Wraps existing individuals.
    pub fn from_individuals(individuals: Vec<TimetableChromosome>) -> Self {
        Self { individuals }
    }

    /// Evaluates every individual whose cached fitness is stale.
    ///
    /// # Errors
    /// Propagates the first evaluator fault.
    pub fn evaluate(&mut self, problem: &TimetableProblem<'_>, parallel: bool) -> Result<()> {
        evaluate_all(&mut self.individuals, problem, parallel)
    }

    /// Builds the next generation: the `elite_count` best individuals of
    /// `self` survive unchanged, the rest of the slots are filled from
    /// `offspring` in order.
    ///
    /// The population size never changes. If `offspring` runs short, the
    /// next-ranked survivors fill the gap. Ties between equally fit elites
    /// go to fewer hard violations, then the smaller gene-id sum, then the
    /// lower index.
    pub fn replace(&self, offspring: Vec<TimetableChromosome>, elite_count: usize) -> Self {
        let size = self.individuals.len();
        let elite_count = elite_count.min(size);
        let ranked = self.ranked_indices();

        let mut next: Vec<TimetableChromosome> = ranked[..elite_count]
            .iter()
            .map(|&i| self.individuals[i].clone())
            .collect();
        next.extend(offspring.into_iter().take(size - elite_count));
        next.extend(
            ranked[elite_count..]
                .iter()
                .take(size - next.len())
                .map(|&i| self.individuals[i].clone()),
        );

        Self { individuals: next }
    }

    /// Indices ordered best first, with deterministic tie-breaking.
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.individuals.len()).collect();
        order.sort_by(|&a, &b| self.rank(a, b));
        order
    }

    fn rank(&self, a: usize, b: usize) -> Ordering {
        let (x, y) = (&self.individuals[a], &self.individuals[b]);
        compare_quality(x, y)
            .then_with(|| x.gene_key_sum().cmp(&y.gene_key_sum()))
            .then_with(|| a.cmp(&b))
    }

    /// Best individual under the ranking order.
    pub fn best(&self) -> Option<&TimetableChromosome> {
        (0..self.individuals.len())
            .min_by(|&a, &b| self.rank(a, b))
            .map(|i| &self.individuals[i])
    }

    /// Mean fitness over all individuals (0 when empty).
    pub fn mean_fitness(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        self.individuals.iter().map(|c| c.fitness).sum::<f64>() / self.individuals.len() as f64
    }

    /// The individuals, in slot order.
    pub fn individuals(&self) -> &[TimetableChromosome] {
        &self.individuals
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}

/// Evaluates stale chromosomes, optionally across the rayon pool.
///
/// Results do not depend on `parallel`: each chromosome is scored
/// independently and written back to its own slot.
pub(crate) fn evaluate_all(
    chromosomes: &mut [TimetableChromosome],
    problem: &TimetableProblem<'_>,
    parallel: bool,
) -> Result<()> {
    if parallel {
        chromosomes
            .par_iter_mut()
            .filter(|c| !c.is_evaluated())
            .try_for_each(|c| problem.evaluate(c))
    } else {
        chromosomes
            .iter_mut()
            .filter(|c| !c.is_evaluated())
            .try_for_each(|c| problem.evaluate(c))
    }
}
