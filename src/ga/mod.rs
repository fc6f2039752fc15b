//! Genetic-algorithm timetable search.
//!
//! # Encoding
//!
//! A chromosome holds one gene per course, in course-id order; each gene
//! is the `(room id, start timeslot id)` of that course. See
//! [`TimetableChromosome`].
//!
//! # Submodules
//!
//! - [`operators`]: selection, crossover and mutation strategies
//! - [`population`]: initialization, batch evaluation, elitist replacement
//! - [`engine`]: the generational loop and its termination rules
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod chromosome;
pub mod engine;
pub mod operators;
pub mod population;
mod problem;

pub use chromosome::{Gene, TimetableChromosome};
pub use engine::{EngineResult, GaConfig, GeneticEngine, RunStatistics, TerminationReason};
pub use operators::{
    CrossoverOperator, CrossoverType, GeneticOperators, MutationOperator, MutationType,
    SelectionOperator, TournamentSelection,
};
pub use population::Population;
pub use problem::TimetableProblem;
