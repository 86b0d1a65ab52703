//! Abstract optimizer.

pub mod nsga;

use crate::{chromosome::Chromosome, error::Result};

/// Represents an abstract optimizer.
pub trait Optimizer: Sized {
  /// Runs `Optimizer` for its configured number of generations, then returns
  /// the last population.
  fn optimize(self) -> Result<Vec<Chromosome>>;
}
