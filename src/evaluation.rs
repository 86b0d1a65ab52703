//! Objective evaluation of chromosomes.

use crate::score::{Score, Scores};

/// An operator that evaluates a chromosome's genes against every objective,
/// returning one score per objective. Lower scores are better.
///
/// The number of returned scores must be the same for every chromosome of a
/// run, and the scores must depend on the genes alone for runs to be
/// reproducible.
///
/// # Examples
/// ```
/// # use evolutionary::evaluation::Evaluator;
/// // two objectives from one closure
/// let e = |g: &[f64]| vec![g[1], 1.0 - g[1]];
/// assert_eq!(e.evaluate(&[0.1, 0.25]), vec![0.25, 0.75]);
/// // or an array of closures returning a single score each
/// let e = [|g: &[f64]| g[1], |g: &[f64]| g[1] * g[1]];
/// assert_eq!(e.evaluate(&[0.1, 0.5]), vec![0.5, 0.25]);
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Evaluator {
  /// Returns the scores of the chromosome with the given genes.
  fn evaluate(&self, genes: &[f64]) -> Scores;
}

impl<const N: usize, F> Evaluator for [F; N]
where
  F: Fn(&[f64]) -> Score,
{
  fn evaluate(&self, genes: &[f64]) -> Scores {
    self.iter().map(|f| f(genes)).collect()
  }
}

impl<F> Evaluator for F
where
  F: Fn(&[f64]) -> Scores,
{
  fn evaluate(&self, genes: &[f64]) -> Scores {
    self(genes)
  }
}
