//! Generational GA loop.
//!
//! INIT → EVALUATE → (SELECT → RECOMBINE → MUTATE → EVALUATE →
//! CHECK_CONVERGENCE)* → TERMINATE.
//!
//! The best-ever individual is tracked as an owned copy, so later
//! generations can never alter it. Elitism keeps the population's best
//! fitness non-decreasing across generations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Serialize, Serializer};

use super::chromosome::TimetableChromosome;
use super::operators::{CrossoverType, GeneticOperators, MutationType};
use super::population::{Population, evaluate_all};
use super::problem::TimetableProblem;
use crate::error::{Result, TimetableError};

/// GA settings.
///
/// Setters clamp out-of-range values instead of failing: population at
/// least 2, tournament at least 1, at least one elite and fewer elites
/// than the population size, rates within `[0, 1]`.
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Generation cap.
    pub max_generations: u32,
    /// Genetic operators and their rates.
    pub operators: GeneticOperators,
    /// Individuals copied unchanged into the next generation.
    pub elite_count: usize,
    /// Generations without best-fitness improvement before stopping
    /// (0 disables the stall check).
    pub stall_generations: u32,
    /// Wall-clock budget, checked at generation boundaries.
    pub time_limit: Option<Duration>,
    /// Evaluate individuals on the rayon pool.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 200,
            operators: GeneticOperators::default(),
            elite_count: 2,
            stall_generations: 50,
            time_limit: None,
            parallel: true,
        }
    }
}

impl GaConfig {
    /// Sets the population size (at least 2).
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size.max(2);
        self.elite_count = self.elite_count.clamp(1, self.population_size - 1);
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, generations: u32) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        let kind = self.operators.crossover_type;
        self.operators = self.operators.with_crossover(kind, rate);
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        let kind = self.operators.mutation_type;
        self.operators = self.operators.with_mutation(kind, rate);
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover_type(mut self, kind: CrossoverType) -> Self {
        self.operators.crossover_type = kind;
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation_type(mut self, kind: MutationType) -> Self {
        self.operators.mutation_type = kind;
        self
    }

    /// Sets the tournament size (at least 1).
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.operators = self.operators.with_tournament_size(size);
        self
    }

    /// Sets the elite count (at least 1, below the population size).
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count.clamp(1, self.population_size.saturating_sub(1).max(1));
        self
    }

    /// Sets the stall patience.
    pub fn with_stall_generations(mut self, generations: u32) -> Self {
        self.stall_generations = generations;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Generation cap reached.
    MaxGenerations,
    /// No improvement for the configured patience.
    Stalled,
    /// A schedule with no violations was found.
    Optimal,
    /// Cancelled through the cancel handle.
    Cancelled,
    /// Wall-clock budget exhausted.
    TimeLimit,
}

/// Run statistics.
#[derive(Debug, Clone, Serialize)]
pub struct RunStatistics {
    /// Generations actually run after the initial population.
    pub generations: u32,
    /// Best fitness found.
    pub best_fitness: f64,
    /// Mean fitness of the final population.
    pub mean_fitness: f64,
    /// Generation at which the best fitness was last improved (0 if the
    /// initial population held it).
    pub convergence_generation: u32,
    /// Wall-clock time of the run.
    #[serde(rename = "execution_time_seconds", serialize_with = "as_seconds")]
    pub elapsed: Duration,
    /// Best-so-far fitness per generation, starting with generation 0.
    pub best_fitness_history: Vec<f64>,
    /// Why the loop stopped.
    pub termination: TerminationReason,
}

fn as_seconds<S: Serializer>(d: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(d.as_secs_f64())
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct EngineResult {
    /// Best-ever individual.
    pub best: TimetableChromosome,
    /// Run statistics.
    pub statistics: RunStatistics,
}

/// Generational genetic algorithm over timetable chromosomes.
#[derive(Debug)]
pub struct GeneticEngine<'a> {
    problem: TimetableProblem<'a>,
    config: GaConfig,
    cancelled: Arc<AtomicBool>,
}

impl<'a> GeneticEngine<'a> {
    /// Creates an engine.
    pub fn new(problem: TimetableProblem<'a>, config: GaConfig) -> Self {
        Self {
            problem,
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Uses an externally owned cancellation flag.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = flag;
        self
    }

    /// Handle that stops the run at the next generation boundary when set.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// The problem being solved.
    pub fn problem(&self) -> &TimetableProblem<'a> {
        &self.problem
    }

    /// The settings.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the GA to termination.
    ///
    /// The outcome is a pure function of the problem, the settings and the
    /// RNG state, regardless of `parallel`.
    ///
    /// # Errors
    /// [`TimetableError::Engine`] when evaluation faults or the population
    /// ends up empty.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<EngineResult> {
        let start = Instant::now();
        let size = self.config.population_size.max(2);
        let elite_count = self.config.elite_count.clamp(1, size - 1);
        let ops = &self.config.operators;

        log::info!(
            "GA start: {} courses, population {}, up to {} generations",
            self.problem.gene_count(),
            size,
            self.config.max_generations
        );

        // INIT + EVALUATE
        let mut population = Population::initialize(&self.problem, size, rng);
        population.evaluate(&self.problem, self.config.parallel)?;
        let mut best = population
            .best()
            .cloned()
            .ok_or_else(|| TimetableError::Engine("empty population".into()))?;

        let mut history = vec![best.fitness];
        let mut convergence_generation = 0;
        let mut stall = 0;
        let mut generation = 0;

        let termination = loop {
            if best.fitness >= 0.0 {
                break TerminationReason::Optimal;
            }
            if self.config.stall_generations > 0 && stall >= self.config.stall_generations {
                break TerminationReason::Stalled;
            }
            if generation >= self.config.max_generations {
                break TerminationReason::MaxGenerations;
            }
            if self.cancelled.load(Ordering::Relaxed) {
                break TerminationReason::Cancelled;
            }
            if self
                .config
                .time_limit
                .is_some_and(|limit| start.elapsed() >= limit)
            {
                break TerminationReason::TimeLimit;
            }

            generation += 1;

            // SELECT + RECOMBINE
            let needed = size - elite_count;
            let mut offspring = Vec::with_capacity(needed + 1);
            while offspring.len() < needed {
                let p1 = ops.select(population.individuals(), rng);
                let p2 = ops.select(population.individuals(), rng);
                let (c1, c2) = ops.crossover(p1, p2, rng);
                offspring.push(c1);
                offspring.push(c2);
            }
            offspring.truncate(needed);

            // MUTATE
            for child in &mut offspring {
                ops.mutate(child, &self.problem, rng);
            }

            // EVALUATE
            evaluate_all(&mut offspring, &self.problem, self.config.parallel)?;
            population = population.replace(offspring, elite_count);

            // CHECK_CONVERGENCE
            let gen_best = population
                .best()
                .ok_or_else(|| TimetableError::Engine("empty population".into()))?;
            if gen_best.fitness > best.fitness {
                best = gen_best.clone();
                convergence_generation = generation;
                stall = 0;
            } else {
                stall += 1;
            }
            history.push(best.fitness);

            log::debug!(
                "generation {generation}: best={:.1} (hard={}, soft={}) mean={:.1} stall={stall}",
                best.fitness,
                best.hard_violations,
                best.soft_violations,
                population.mean_fitness()
            );
        };

        if matches!(
            termination,
            TerminationReason::Cancelled | TerminationReason::TimeLimit
        ) {
            log::warn!("GA stopped early at generation {generation}: {termination:?}");
        }

        let statistics = RunStatistics {
            generations: generation,
            best_fitness: best.fitness,
            mean_fitness: population.mean_fitness(),
            convergence_generation,
            elapsed: start.elapsed(),
            best_fitness_history: history,
            termination,
        };
        log::info!(
            "GA finished after {} generations ({:?}): best fitness {:.1} in {:.2?}",
            statistics.generations,
            statistics.termination,
            statistics.best_fitness,
            statistics.elapsed
        );

        Ok(EngineResult { best, statistics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainModel;
    use crate::models::{ClockTime, ConstraintConfig, Course, Room, ScheduleData, Teacher, Timeslot, Weekday};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn slot(id: u32, day: Weekday, hour: u16) -> Timeslot {
        Timeslot::new(
            id,
            day,
            ClockTime::hm(hour, 0).unwrap(),
            ClockTime::hm(hour + 2, 0).unwrap(),
        )
    }

    /// Six single-slot courses, two teachers, two rooms, six slots.
    fn domain() -> DomainModel {
        build(30)
    }

    /// Same layout, but course 6 fits in no room.
    fn infeasible_domain() -> DomainModel {
        build(100)
    }

    fn build(last_course_students: i32) -> DomainModel {
        let mut data = ScheduleData::new()
            .with_room(Room::lecture(1, 40))
            .with_room(Room::lecture(2, 40))
            .with_teacher(Teacher::new(1).with_availability(1..=6))
            .with_teacher(Teacher::new(2).with_availability(1..=6));
        for (i, (day, hour)) in [
            (Weekday::Monday, 8),
            (Weekday::Monday, 10),
            (Weekday::Monday, 14),
            (Weekday::Tuesday, 8),
            (Weekday::Tuesday, 10),
            (Weekday::Tuesday, 14),
        ]
        .into_iter()
        .enumerate()
        {
            data = data.with_timeslot(slot(i as u32 + 1, day, hour));
        }
        for id in 1..=6 {
            let students = if id == 6 { last_course_students } else { 30 };
            data = data.with_course(Course::new(id, 1 + id % 2).with_students(students));
        }
        DomainModel::new(data).unwrap()
    }

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_max_generations(60)
            .with_stall_generations(0)
    }

    #[test]
    fn test_config_defaults_and_clamps() {
        let c = GaConfig::default();
        assert_eq!(c.population_size, 100);
        assert_eq!(c.max_generations, 200);
        assert_eq!(c.elite_count, 2);
        assert_eq!(c.stall_generations, 50);
        assert!(c.parallel);

        let c = GaConfig::default()
            .with_population_size(1)
            .with_elite_count(10)
            .with_crossover_rate(2.0)
            .with_mutation_rate(-1.0)
            .with_tournament_size(0);
        assert_eq!(c.population_size, 2);
        assert_eq!(c.elite_count, 1);
        assert_eq!(c.operators.crossover_rate, 1.0);
        assert_eq!(c.operators.mutation_rate, 0.0);
        assert_eq!(c.operators.selection.size, 1);

        let c = GaConfig::default()
            .with_crossover_type(CrossoverType::Uniform)
            .with_crossover_rate(0.6)
            .with_mutation_type(MutationType::Room)
            .with_mutation_rate(0.2);
        assert_eq!(c.operators.crossover_type, CrossoverType::Uniform);
        assert_eq!(c.operators.crossover_rate, 0.6);
        assert_eq!(c.operators.mutation_type, MutationType::Room);
        assert_eq!(c.operators.mutation_rate, 0.2);
    }

    #[test]
    fn test_elitism_cannot_be_disabled() {
        let c = GaConfig::default().with_elite_count(0);
        assert_eq!(c.elite_count, 1);

        // A zero set directly on the field is raised at run time.
        let dm = infeasible_domain();
        let constraints = ConstraintConfig::default();
        let mut config = GaConfig::default()
            .with_population_size(6)
            .with_max_generations(20)
            .with_stall_generations(0)
            .with_mutation_rate(1.0);
        config.elite_count = 0;
        let engine = GeneticEngine::new(TimetableProblem::new(&dm, &constraints), config);
        let result = engine.run(&mut SmallRng::seed_from_u64(9)).unwrap();
        assert_eq!(result.statistics.generations, 20);
        assert_eq!(result.statistics.best_fitness, result.best.fitness);
        assert!(result.statistics.mean_fitness.is_finite());
    }

    #[test]
    fn test_run_finds_feasible_schedule() {
        let dm = domain();
        let constraints = ConstraintConfig::default();
        let engine = GeneticEngine::new(TimetableProblem::new(&dm, &constraints), small_config());
        let result = engine.run(&mut SmallRng::seed_from_u64(42)).unwrap();

        assert_eq!(result.best.hard_violations, 0);
        assert_eq!(result.statistics.termination, TerminationReason::Optimal);
        assert_eq!(result.statistics.best_fitness, 0.0);
        assert_eq!(
            result.statistics.best_fitness_history.len() as u32,
            result.statistics.generations + 1
        );
    }

    #[test]
    fn test_history_is_monotone() {
        let dm = domain();
        let constraints = ConstraintConfig::default().with_allow_gaps(false);
        let config = small_config().with_max_generations(20);
        let engine = GeneticEngine::new(TimetableProblem::new(&dm, &constraints), config);
        let result = engine.run(&mut SmallRng::seed_from_u64(1)).unwrap();

        let history = &result.statistics.best_fitness_history;
        assert!(history.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(*history.last().unwrap(), result.best.fitness);
        assert!(result.statistics.convergence_generation <= result.statistics.generations);
    }

    #[test]
    fn test_same_seed_same_result() {
        let dm = domain();
        let constraints = ConstraintConfig::default().with_balance_days(true);
        let problem = TimetableProblem::new(&dm, &constraints);
        let a = GeneticEngine::new(problem.clone(), small_config().with_parallel(true))
            .run(&mut SmallRng::seed_from_u64(9))
            .unwrap();
        let b = GeneticEngine::new(problem, small_config().with_parallel(false))
            .run(&mut SmallRng::seed_from_u64(9))
            .unwrap();

        assert_eq!(a.best.genes, b.best.genes);
        assert_eq!(a.statistics.best_fitness_history, b.statistics.best_fitness_history);
    }

    #[test]
    fn test_zero_generations_returns_initial_best() {
        let dm = domain();
        let constraints = ConstraintConfig::default().with_allow_gaps(false);
        let config = small_config().with_max_generations(0);
        let engine = GeneticEngine::new(TimetableProblem::new(&dm, &constraints), config);
        let result = engine.run(&mut SmallRng::seed_from_u64(42)).unwrap();

        assert_eq!(result.statistics.generations, 0);
        assert_eq!(result.statistics.best_fitness_history.len(), 1);
        assert_eq!(result.best.len(), 6);
    }

    #[test]
    fn test_cancel_before_run() {
        // The over-capacity course keeps the run from finishing as optimal.
        let dm = infeasible_domain();
        let constraints = ConstraintConfig::default();
        let engine = GeneticEngine::new(TimetableProblem::new(&dm, &constraints), small_config());
        engine.cancel_handle().store(true, Ordering::Relaxed);

        let result = engine.run(&mut SmallRng::seed_from_u64(42)).unwrap();
        assert_eq!(result.statistics.termination, TerminationReason::Cancelled);
        assert_eq!(result.statistics.generations, 0);
    }

    #[test]
    fn test_stall_and_time_limit() {
        let dm = infeasible_domain();
        let constraints = ConstraintConfig::default();
        let problem = TimetableProblem::new(&dm, &constraints);

        let stalled = GeneticEngine::new(
            problem.clone(),
            small_config().with_max_generations(1000).with_stall_generations(5),
        )
        .run(&mut SmallRng::seed_from_u64(42))
        .unwrap();
        assert_eq!(stalled.statistics.termination, TerminationReason::Stalled);
        assert!(stalled.statistics.generations < 1000);
        assert!(stalled.best.hard_violations >= 1);

        let timed = GeneticEngine::new(
            problem,
            small_config().with_time_limit(Duration::ZERO),
        )
        .run(&mut SmallRng::seed_from_u64(42))
        .unwrap();
        assert_eq!(timed.statistics.termination, TerminationReason::TimeLimit);
    }

    #[test]
    fn test_statistics_serialize() {
        let stats = RunStatistics {
            generations: 3,
            best_fitness: -1.0,
            mean_fitness: -2.5,
            convergence_generation: 2,
            elapsed: Duration::from_millis(1500),
            best_fitness_history: vec![-4.0, -2.0, -1.0, -1.0],
            termination: TerminationReason::MaxGenerations,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["execution_time_seconds"], 1.5);
        assert_eq!(json["termination"], "max_generations");
        assert_eq!(json["convergence_generation"], 2);
    }
}
