//! Pairwise dominance analysis.

use std::cmp::Ordering;

use crate::{
  error::{Error, Result},
  score::{ParetoDominance, Score},
};

/// Dominance relations of one individual within a pool.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DominationRecord {
  /// Number of individuals dominating this one.
  pub dominated_by: usize,
  /// Indices of individuals this one dominates.
  pub dominates: Vec<usize>,
}

/// Computes the full pairwise dominance relation of a pool of objective
/// vectors. The record at index `i` describes the individual at index `i`.
///
/// Fails if the vectors differ in length or contain NaN.
pub fn analyze_domination<S: AsRef<[Score]>>(
  objectives: &[S],
) -> Result<Vec<DominationRecord>> {
  check_lengths(objectives)?;

  let mut records = vec![DominationRecord::default(); objectives.len()];
  // for each unique pair of individuals `p` and `q`...
  for p_idx in 0..objectives.len() {
    for q_idx in p_idx + 1..objectives.len() {
      match objectives[p_idx]
        .as_ref()
        .dominance(objectives[q_idx].as_ref())?
      {
        // `p` dominates `q`
        Ordering::Less => {
          records[p_idx].dominates.push(q_idx);
          records[q_idx].dominated_by += 1;
        }
        // `q` dominates `p`
        Ordering::Greater => {
          records[q_idx].dominates.push(p_idx);
          records[p_idx].dominated_by += 1;
        }
        Ordering::Equal => {}
      }
    }
  }
  Ok(records)
}

/// Fails unless every objective vector has the length of the first one.
pub(crate) fn check_lengths<S: AsRef<[Score]>>(objectives: &[S]) -> Result<()> {
  let Some(expected) = objectives.first().map(|o| o.as_ref().len()) else {
    return Ok(());
  };
  match objectives.iter().find(|o| o.as_ref().len() != expected) {
    Some(o) => Err(Error::ObjectiveLengthMismatch {
      expected,
      got: o.as_ref().len(),
    }),
    None => Ok(()),
  }
}
