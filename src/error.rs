//! Error type shared by every fallible operation of the crate.

use rand::distributions::WeightedError;

/// An alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while evolving a population.
///
/// Every error is fatal to the run it occurs in. Evolution is a deterministic
/// batch computation, so there is nothing to retry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// Two objective vectors that must be compared have different lengths.
  #[error(
    "objective length mismatch: expected {expected} objectives, got {got}"
  )]
  ObjectiveLengthMismatch {
    /// Number of objectives established for the run.
    expected: usize,
    /// Number of objectives actually received.
    got: usize,
  },

  /// An objective vector contains a NaN value.
  #[error("NaN encountered in an objective vector")]
  NanObjective,

  /// Two gene vectors that must line up have different lengths.
  #[error("gene length mismatch: expected {expected} genes, got {got}")]
  GeneLengthMismatch {
    /// Gene count of the reference chromosome.
    expected: usize,
    /// Gene count of the offending chromosome.
    got: usize,
  },

  /// More distinct samples were requested than the pool contains.
  #[error(
    "insufficient population: requested {requested} distinct samples out of {available}"
  )]
  InsufficientPopulation {
    /// Number of distinct samples requested.
    requested: usize,
    /// Size of the pool sampled from.
    available: usize,
  },

  /// The optimizer was given no chromosomes.
  #[error("population is empty")]
  EmptyPopulation,

  /// A weighted choice was requested from an empty set.
  #[error("there is nothing to choose from")]
  EmptyChoices,

  /// A weighted choice received a different number of weights than choices.
  #[error("weight count mismatch: {choices} choices, {weights} weights")]
  WeightCountMismatch {
    /// Number of choices.
    choices: usize,
    /// Number of weights.
    weights: usize,
  },

  /// Weights of a weighted choice are invalid.
  #[error("invalid weights: {0}")]
  InvalidWeights(#[from] WeightedError),

  /// A surrogate model was asked to predict before being fitted.
  #[error("surrogate model has not been fitted")]
  SurrogateNotFitted,

  /// Number of feature rows and target rows passed to a surrogate differ.
  #[error("sample count mismatch: {features} feature rows, {targets} target rows")]
  SampleCountMismatch {
    /// Number of feature rows.
    features: usize,
    /// Number of target rows.
    targets: usize,
  },

  /// An I/O operation of an observer failed.
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}
