//! Seedable random number context shared by all genetic operators.

use rand::{
  distributions::{Distribution, WeightedIndex},
  rngs::StdRng,
  seq::index,
  Rng,
  SeedableRng,
};

use crate::error::{Error, Result};

/// Seed used by [`Context::default`].
pub const DEFAULT_SEED: u64 = 1;

/// A seeded random number generator that is passed by reference into every
/// operator that needs randomness.
///
/// One `Context` serves one run. The order in which operators draw from it is
/// observable: the same seed and the same sequence of calls always produce the
/// same results.
///
/// # Examples
/// ```
/// # use evolutionary::context::Context;
/// let mut a = Context::new(42);
/// let mut b = Context::new(42);
/// assert_eq!(a.uniform(), b.uniform());
/// ```
#[derive(Debug, Clone)]
pub struct Context {
  seed: u64,
  rng: StdRng,
}

impl Default for Context {
  fn default() -> Self {
    Self::new(DEFAULT_SEED)
  }
}

impl Context {
  /// Creates a context seeded with `seed`.
  pub fn new(seed: u64) -> Self {
    Self {
      seed,
      rng: StdRng::seed_from_u64(seed),
    }
  }

  /// Creates a context around an already constructed generator. `seed` is
  /// what [`reset()`](Self::reset) will rewind to.
  pub fn from_rng(seed: u64, rng: StdRng) -> Self {
    Self { seed, rng }
  }

  /// Returns the seed this context was last seeded with.
  pub fn seed(&self) -> u64 {
    self.seed
  }

  /// Replaces the seed and restarts the generator from it.
  pub fn reseed(&mut self, seed: u64) {
    self.seed = seed;
    self.reset();
  }

  /// Restarts the generator from the current seed.
  pub fn reset(&mut self) {
    self.rng = StdRng::seed_from_u64(self.seed);
  }

  /// Returns a mutable reference to the underlying generator.
  pub fn rng(&mut self) -> &mut StdRng {
    &mut self.rng
  }

  /// Draws a value uniformly from `[0, 1)`.
  pub fn uniform(&mut self) -> f64 {
    self.rng.gen::<f64>()
  }

  /// Draws `amount` distinct indices from `0..length`, in draw order.
  ///
  /// Fails with [`Error::InsufficientPopulation`] if `amount > length`.
  pub fn sample_distinct(
    &mut self,
    length: usize,
    amount: usize,
  ) -> Result<Vec<usize>> {
    if amount > length {
      return Err(Error::InsufficientPopulation {
        requested: amount,
        available: length,
      });
    }
    Ok(index::sample(&mut self.rng, length, amount).into_vec())
  }

  /// Picks one of `choices` with probability proportional to the respective
  /// entry of `weights`.
  pub fn choose_weighted<'a, T>(
    &mut self,
    choices: &'a [T],
    weights: &[f64],
  ) -> Result<&'a T> {
    if choices.is_empty() {
      return Err(Error::EmptyChoices);
    }
    if choices.len() != weights.len() {
      return Err(Error::WeightCountMismatch {
        choices: choices.len(),
        weights: weights.len(),
      });
    }
    let distribution = WeightedIndex::new(weights)?;
    Ok(&choices[distribution.sample(&mut self.rng)])
  }
}
