//! Surrogate models approximating expensive objective evaluation.
//!
//! A surrogate learns the mapping from genes to objective scores out of
//! chromosomes that were already evaluated, then predicts scores for new ones.
//! It can stand in for the real [`Evaluator`](crate::evaluation::Evaluator)
//! once fitted, or help decide which chromosomes are worth a real
//! evaluation.

use itertools::Itertools;

use crate::{
  error::{Error, Result},
  score::Scores,
};

/// Default number of neighbours averaged by [`KNeighborsRegressor`].
pub const DEFAULT_NEIGHBORS: usize = 5;

/// A regression model trained on pairs of features and targets.
pub trait Surrogate {
  /// Adds training pairs and refits the model on everything it has seen.
  fn fit(&mut self, features: &[Vec<f64>], targets: &[Scores]) -> Result<()>;

  /// Predicts targets for each row of `features`.
  fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<Scores>>;
}

/// Predicts the mean target of the `k` training samples nearest (by Euclidean
/// distance) to the queried features.
///
/// Every sample ever passed to [`fit()`](Surrogate::fit) is kept unless a
/// window is set with [`with_window()`](Self::with_window), in which case only
/// the most recent samples are retained.
///
/// # Examples
/// ```
/// # use evolutionary::surrogate::{KNeighborsRegressor, Surrogate};
/// let mut model = KNeighborsRegressor::new(1);
/// model
///   .fit(&[vec![0.0], vec![1.0]], &[vec![10.0], vec![20.0]])
///   .unwrap();
/// assert_eq!(model.predict(&[vec![0.9]]).unwrap(), vec![vec![20.0]]);
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct KNeighborsRegressor {
  neighbors: usize,
  window: Option<usize>,
  features: Vec<Vec<f64>>,
  targets: Vec<Scores>,
}

impl Default for KNeighborsRegressor {
  fn default() -> Self {
    Self::new(DEFAULT_NEIGHBORS)
  }
}

impl KNeighborsRegressor {
  /// Creates an unfitted model averaging `neighbors` nearest samples. At least
  /// one neighbour is always used.
  pub fn new(neighbors: usize) -> Self {
    Self {
      neighbors: neighbors.max(1),
      window: None,
      features: Vec::new(),
      targets: Vec::new(),
    }
  }

  /// Retains only the `window` most recent training samples.
  pub fn with_window(mut self, window: usize) -> Self {
    self.window = Some(window);
    self.evict();
    self
  }

  /// Returns the number of retained training samples.
  pub fn samples(&self) -> usize {
    self.features.len()
  }

  fn evict(&mut self) {
    if let Some(window) = self.window {
      let excess = self.features.len().saturating_sub(window);
      self.features.drain(..excess);
      self.targets.drain(..excess);
    }
  }

  fn predict_one(&self, query: &[f64]) -> Result<Scores> {
    let nearest: Vec<usize> = self
      .features
      .iter()
      .map(|f| squared_distance(f, query))
      .collect::<Result<Vec<_>>>()?
      .into_iter()
      .enumerate()
      .sorted_by(|a, b| a.1.total_cmp(&b.1))
      .take(self.neighbors)
      .map(|(idx, _)| idx)
      .collect();

    let width = self.targets[nearest[0]].len();
    let mut mean = vec![0.0; width];
    for &idx in &nearest {
      for (m, t) in mean.iter_mut().zip(&self.targets[idx]) {
        *m += t;
      }
    }
    let count = nearest.len() as f64;
    Ok(mean.into_iter().map(|m| m / count).collect())
  }
}

impl Surrogate for KNeighborsRegressor {
  fn fit(&mut self, features: &[Vec<f64>], targets: &[Scores]) -> Result<()> {
    if features.len() != targets.len() {
      return Err(Error::SampleCountMismatch {
        features: features.len(),
        targets: targets.len(),
      });
    }
    if let Some(expected) = self.targets.first().map(Vec::len) {
      if let Some(t) = targets.iter().find(|t| t.len() != expected) {
        return Err(Error::ObjectiveLengthMismatch {
          expected,
          got: t.len(),
        });
      }
    }
    self.features.extend_from_slice(features);
    self.targets.extend_from_slice(targets);
    self.evict();
    Ok(())
  }

  fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<Scores>> {
    if self.features.is_empty() {
      return Err(Error::SurrogateNotFitted);
    }
    features.iter().map(|f| self.predict_one(f)).collect()
  }
}

fn squared_distance(a: &[f64], b: &[f64]) -> Result<f64> {
  if a.len() != b.len() {
    return Err(Error::GeneLengthMismatch {
      expected: a.len(),
      got: b.len(),
    });
  }
  Ok(a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum())
}
