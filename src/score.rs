//! Type aliases for objective scores and Pareto dominance between them.

use std::cmp::Ordering;

use crate::error::{Error, Result};

/// An alias for a single objective score. Lower is better.
pub type Score = f64;

/// An alias for a vector of objective scores, one per objective. Its length is
/// fixed for a run.
pub type Scores = Vec<Score>;

/// Describes Pareto dominance for slices of `Score`s.
pub trait ParetoDominance {
  /// Returns `Less` if `self` dominates `other`, `Greater` if `other`
  /// dominates `self`, otherwise `Equal`.
  ///
  /// `self` dominates `other` if none of its scores is greater than the
  /// respective score of `other` and the two vectors are not identical.
  /// Identical vectors dominate neither way.
  ///
  /// Fails if the slices differ in length or contain NaN.
  fn dominance(&self, other: &Self) -> Result<Ordering>;
}

impl ParetoDominance for [Score] {
  fn dominance(&self, other: &Self) -> Result<Ordering> {
    if self.len() != other.len() {
      return Err(Error::ObjectiveLengthMismatch {
        expected: self.len(),
        got: other.len(),
      });
    }
    // number of objectives where `self` is no worse / no better than `other`
    let mut no_worse = 0;
    let mut no_better = 0;
    for (a, b) in self.iter().zip(other) {
      match a.partial_cmp(b).ok_or(Error::NanObjective)? {
        Ordering::Less => no_worse += 1,
        Ordering::Greater => no_better += 1,
        Ordering::Equal => {
          no_worse += 1;
          no_better += 1;
        }
      }
    }
    let m = self.len();
    Ok(match (no_worse == m, no_better == m) {
      (true, false) => Ordering::Less,
      (false, true) => Ordering::Greater,
      // identical vectors or a trade-off
      _ => Ordering::Equal,
    })
  }
}

#[cfg(test)]
mod tests {
  use std::cmp::Ordering;

  use super::*;

  fn dom(a: &[Score], b: &[Score]) -> Ordering {
    a.dominance(b).unwrap()
  }

  #[test]
  fn test_pareto_dominance() {
    assert_eq!(dom(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), Ordering::Equal);
    assert_eq!(dom(&[-1.0, 2.0, -3.0], &[-1.0, 2.0, -3.0]), Ordering::Equal);
    assert_eq!(dom(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), Ordering::Equal);

    assert_eq!(dom(&[10.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), Ordering::Greater);
    assert_eq!(dom(&[1.0, 20.0, 3.0], &[1.0, 2.0, 3.0]), Ordering::Greater);
    assert_eq!(dom(&[1.0, 2.0, 30.0], &[1.0, 2.0, 3.0]), Ordering::Greater);

    assert_eq!(dom(&[1.0, 2.0, 3.0], &[10.0, 2.0, 3.0]), Ordering::Less);
    assert_eq!(dom(&[1.0, 2.0, 3.0], &[1.0, 20.0, 3.0]), Ordering::Less);
    // lower is better, negative scores included
    assert_eq!(dom(&[-2.0, 2.0, -3.0], &[-1.0, 2.0, 4.0]), Ordering::Less);

    assert_eq!(dom(&[], &[]), Ordering::Equal);
  }

  #[test]
  fn test_identical_vectors_dominate_neither_way() {
    let a = [0.5, 0.25];
    assert_eq!(dom(&a, &a), Ordering::Equal);
    assert_eq!(dom(&[0.0], &[-0.0]), Ordering::Equal);
  }

  #[test]
  fn test_length_mismatch() {
    let err = [1.0, 2.0].as_slice().dominance(&[1.0]).unwrap_err();
    assert!(matches!(
      err,
      Error::ObjectiveLengthMismatch {
        expected: 2,
        got: 1
      }
    ));
  }

  #[test]
  fn test_nan() {
    let err = [1.0, f64::NAN].as_slice().dominance(&[1.0, 2.0]).unwrap_err();
    assert!(matches!(err, Error::NanObjective));
  }
}
