//! University timetable construction by genetic algorithm.
//!
//! Assigns every course a room and a block of consecutive timeslots,
//! minimizing hard conflicts (double-booked rooms and teachers, capacity,
//! availability) first and configurable soft preferences (idle gaps, day
//! balance, late Friday slots) second.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Room`, `Timeslot`, `Teacher`,
//!   `Schedule`, `Assignment`, `Violation`, `ConstraintConfig`, `ScheduleData`
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling
//!   teacher refs, non-positive sizes, bad time ranges)
//! - **`domain`**: Validated, indexed view of one input data set
//! - **`evaluation`**: Hard and soft constraint checks, fitness aggregation
//! - **`ga`**: Chromosome codec, operators, population, generational engine
//! - **`optimizer`**: `optimize` / `validate` entry points
//!
//! # Example
//!
//! ```no_run
//! use u_timetable::{optimize, DomainModel, OptimizerConfig, ScheduleData};
//!
//! let json = std::fs::read_to_string("data.json").unwrap();
//! let data: ScheduleData = serde_json::from_str(&json).unwrap();
//! let domain = DomainModel::new(data).unwrap();
//! let result = optimize(&domain, &OptimizerConfig::default().with_seed(7)).unwrap();
//! for a in &result.schedule.assignments {
//!     println!("course {} -> room {} @ slot {}", a.course_id, a.room_id, a.timeslot_id);
//! }
//! ```
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"

pub mod domain;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod models;
pub mod optimizer;
pub mod validation;

pub use domain::DomainModel;
pub use error::{Result, TimetableError};
pub use evaluation::{evaluate, ConstraintEvaluator, ViolationReport};
pub use models::{ConstraintConfig, FitnessWeights, Schedule, ScheduleData};
pub use optimizer::{optimize, validate, OptimizationResult, Optimizer, OptimizerConfig};
