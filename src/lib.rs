//! **evolutionary** is a seeded, reproducible implementation of the [NSGA-II]
//! multi-objective genetic algorithm over real-valued chromosomes.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! # Workflow
//!
//! A run evolves a population of [`Chromosome`]s for a fixed number of
//! generations. Each generation:
//! 1. **Pair** the parents at random, without replacement
//! 2. **Recombine** each pair into two children with uniform crossover
//! 3. **Mutate** each child
//! 4. **Evaluate** each child against every objective with an [`Evaluator`]
//! 5. **Rank** parents and children together into Pareto fronts and keep the
//!    best of them, breaking the last tie by [crowding]
//!
//! Lower objective scores are better. A chromosome's genes are plain `f64`s,
//! but its first gene doubles as its own mutation rate, so the rate evolves
//! with the solution.
//!
//! # Reproducibility
//!
//! Every random decision is drawn from one [`Context`], a seeded random number
//! generator passed explicitly to whatever needs it. Two runs with the same
//! seed, the same initial population and the same evaluator produce identical
//! populations. There is no global random state.
//!
//! # Closures
//!
//! [`Evaluator`] and [`Observer`] are implemented by closures. An
//! `Fn(&[f64]) -> Vec<f64>` evaluates every objective at once, while an array
//! `[Fn(&[f64]) -> f64; N]` evaluates one objective per closure. Implement the
//! traits for your own types when a closure isn't enough.
//!
//! # Logging
//!
//! The optimizer emits [`tracing`] events and spans: run boundaries at `INFO`,
//! per-generation bookkeeping at `DEBUG` and parent pairing at `TRACE`.
//! Install any `tracing` subscriber to see them, or use the [`LogObserver`] to
//! report each generation.
//!
//! # Example
//!
//! Here's a run on the textbook *ZDT1* problem, with the decision variables
//! stored after the mutation rate gene.
//! ```
//! use evolutionary::{
//!   chromosome::Chromosome,
//!   context::Context,
//!   optimizer::{nsga::Nsga2, Optimizer},
//! };
//! let zdt1 = |g: &[f64]| {
//!   let x = &g[1..];
//!   let h = 1.0 + 9.0 * x[1..].iter().sum::<f64>() / (x.len() - 1) as f64;
//!   vec![x[0], h * (1.0 - (x[0] / h).sqrt())]
//! };
//! let mut ctx = Context::new(42);
//! let population = (0..20).map(|_| Chromosome::random(&mut ctx, 6)).collect();
//! let solutions = Nsga2::builder()
//!   .context(&mut ctx)
//!   .population(population)
//!   .evaluator(zdt1)
//!   .generations(25)
//!   .build()
//!   .optimize()
//!   .unwrap();
//! assert_eq!(solutions.len(), 20);
//! ```
//!
//! [NSGA-II]: https://sci2s.ugr.es/sites/default/files/files/Teaching/OtherPostGraduateCourses/Metaheuristicas/Deb_NSGAII.pdf
//! [`Chromosome`]: crate::chromosome::Chromosome
//! [`Context`]: crate::context::Context
//! [`Evaluator`]: crate::evaluation::Evaluator
//! [`Observer`]: crate::observer::Observer
//! [`LogObserver`]: crate::observer::LogObserver
//! [crowding]: crate::pareto::crowding_scores

#![warn(missing_docs)]

pub mod chromosome;
pub mod context;
pub mod error;
pub mod evaluation;
pub mod observer;
pub mod optimizer;
pub mod pareto;
pub mod population;
pub mod score;
pub mod surrogate;

pub use error::{Error, Result};
