//! Crowding distance estimation.

use itertools::Itertools;

use super::domination::check_lengths;
use crate::{
  error::Result,
  population::{Front, Key, ObjectiveMap},
  score::Score,
};

/// Crowding score of an individual. The more negative the score, the more
/// isolated the individual is in objective space and the earlier it is kept
/// when a front is truncated.
pub type CrowdingScore = f64;

/// Contribution of an interior individual on a dimension where every
/// individual has the same value.
const FLAT_DIMENSION_PENALTY: f64 = 1.0;

/// Computes the crowding score of each objective vector in a set.
///
/// Each dimension is handled independently. Individuals are sorted by their
/// value on it. If the dimension is flat (minimum equals maximum), every
/// interior individual accumulates `1`. Otherwise both boundary individuals
/// accumulate infinity, so they are never truncated away, and each interior
/// individual accumulates the normalized distance between its neighbours. The
/// score is the negated sum over all dimensions.
///
/// Infinite values are allowed. A dimension whose values are all the same
/// infinity is flat. When the spread of a dimension is infinite, an interior
/// individual with an infinite gap between its neighbours accumulates `1` and
/// any other interior individual accumulates `0`.
///
/// A set of fewer than two individuals has no spread to measure: each of its
/// members gets `-inf`, the score of maximal diversity.
///
/// Fails if the vectors differ in length.
pub fn crowding_scores<S: AsRef<[Score]>>(
  objectives: &[S],
) -> Result<Vec<CrowdingScore>> {
  check_lengths(objectives)?;
  let len = objectives.len();
  if len < 2 {
    return Ok(vec![f64::NEG_INFINITY; len]);
  }

  let value = |idx: usize, dim: usize| objectives[idx].as_ref()[dim];
  let dims = objectives[0].as_ref().len();
  let mut distances = vec![0.0; len];

  for dim in 0..dims {
    // sort individuals by their value on `dim`
    let order: Vec<usize> = (0..len)
      .sorted_by(|&a, &b| value(a, dim).total_cmp(&value(b, dim)))
      .collect();
    let first = order[0];
    let last = order[len - 1];
    let spread = span(value(first, dim), value(last, dim));

    if spread == 0.0 {
      for &idx in &order[1..len - 1] {
        distances[idx] += FLAT_DIMENSION_PENALTY;
      }
    } else {
      distances[first] += f64::INFINITY;
      distances[last] += f64::INFINITY;
      for (prev, idx, next) in order.iter().copied().tuple_windows() {
        let gap = span(value(prev, dim), value(next, dim));
        // an infinite gap over an infinite spread covers the whole range
        distances[idx] += if gap == spread { 1.0 } else { gap / spread };
      }
    }
  }

  Ok(distances.into_iter().map(|d| -d).collect())
}

/// Distance from `low` to `high`, zero for equal values even when infinite.
fn span(low: Score, high: Score) -> f64 {
  if low == high {
    0.0
  } else {
    high - low
  }
}

/// Picks `capacity` keys out of `front`, most isolated first.
///
/// Crowding scores are computed among the members of `front`. Members with
/// equal scores keep their order in `front`. Returns the whole front if it
/// fits.
///
/// # Panics
///
/// Panics if a key of `front` is missing from `objectives`.
pub fn truncate_by_crowding(
  front: &[Key],
  objectives: &ObjectiveMap,
  capacity: usize,
) -> Result<Front> {
  if front.len() <= capacity {
    return Ok(front.to_vec());
  }
  let scores: Vec<&[Score]> = front
    .iter()
    .map(|key| objectives[key].as_slice())
    .collect();
  let crowding = crowding_scores(&scores)?;
  Ok(
    front
      .iter()
      .zip(crowding)
      .sorted_by(|a, b| a.1.total_cmp(&b.1))
      .take(capacity)
      .map(|(key, _)| *key)
      .collect(),
  )
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeSet;

  use proptest::prelude::*;

  use super::*;
  use crate::error::Error;

  #[test]
  fn test_crowding_scores() {
    let objectives = [[0.0, 4.0], [1.0, 3.0], [3.0, 1.0], [4.0, 0.0]];
    let scores = crowding_scores(&objectives).unwrap();
    assert_eq!(scores[0], f64::NEG_INFINITY);
    assert_eq!(scores[3], f64::NEG_INFINITY);
    // (3 - 0) / 4 on both dimensions
    assert_eq!(scores[1], -1.5);
    assert_eq!(scores[2], -1.5);
  }

  #[test]
  fn test_crowded_interior_scores_higher() {
    let objectives = [[0.0, 10.0], [1.0, 9.0], [1.5, 8.5], [10.0, 0.0]];
    let scores = crowding_scores(&objectives).unwrap();
    // [1.0, 9.0] sits between [0, 10] and [1.5, 8.5], [1.5, 8.5] between
    // [1, 9] and [10, 0]: the latter is far more isolated
    assert!(scores[2] < scores[1]);
  }

  #[test]
  fn test_flat_dimension_penalizes_interior() {
    let objectives = [[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
    let scores = crowding_scores(&objectives).unwrap();
    // flat first dimension: interior gets 1
    // second dimension: boundaries get infinity, interior (2 - 0) / 2
    assert_eq!(scores, vec![f64::NEG_INFINITY, -2.0, f64::NEG_INFINITY]);
  }

  #[test]
  fn test_all_identical() {
    let objectives = [[0.5, 0.5]; 4];
    let scores = crowding_scores(&objectives).unwrap();
    // the first and the last in sort order are boundaries on each dimension
    assert_eq!(scores, vec![0.0, -2.0, -2.0, 0.0]);
  }

  #[test]
  fn test_degenerate_sizes() {
    assert!(crowding_scores::<[Score; 2]>(&[]).unwrap().is_empty());
    assert_eq!(
      crowding_scores(&[[1.0, 2.0]]).unwrap(),
      vec![f64::NEG_INFINITY]
    );
    assert_eq!(
      crowding_scores(&[[1.0, 2.0], [2.0, 1.0]]).unwrap(),
      vec![f64::NEG_INFINITY; 2]
    );
  }

  #[test]
  fn test_dimension_order_does_not_matter() {
    let objectives = [[0.0, 4.0], [1.0, 2.5], [2.0, 2.0], [4.0, 0.0]];
    let swapped = objectives.map(|[a, b]| [b, a]);
    assert_eq!(
      crowding_scores(&objectives).unwrap(),
      crowding_scores(&swapped).unwrap()
    );
  }

  #[test]
  fn test_inconsistent_lengths() {
    let objectives = vec![vec![1.0, 2.0], vec![1.0]];
    assert!(matches!(
      crowding_scores(&objectives),
      Err(Error::ObjectiveLengthMismatch { .. })
    ));
  }

  #[test]
  fn test_truncate_keeps_boundaries() {
    let objectives: ObjectiveMap = [
      [0.0, 1.0],
      [0.1, 0.9],
      [0.2, 0.8],
      [0.6, 0.4],
      [1.0, 0.0],
    ]
    .into_iter()
    .enumerate()
    .map(|(i, o)| (Key::new(i, 0), o.to_vec()))
    .collect();
    let front: Front = objectives.keys().copied().collect();

    let kept = truncate_by_crowding(&front, &objectives, 3).unwrap();
    assert_eq!(kept.len(), 3);
    assert!(kept.contains(&Key::new(0, 0)));
    assert!(kept.contains(&Key::new(4, 0)));
    // [0.6, 0.4] has the widest gap to its neighbours
    assert!(kept.contains(&Key::new(3, 0)));

    let kept = truncate_by_crowding(&front, &objectives, 2).unwrap();
    assert_eq!(kept, vec![Key::new(0, 0), Key::new(4, 0)]);
  }

  #[test]
  fn test_truncate_fitting_front() {
    let objectives =
      ObjectiveMap::from([(Key::new(0, 0), vec![1.0]), (Key::new(1, 0), vec![2.0])]);
    let front = vec![Key::new(1, 0), Key::new(0, 0)];
    assert_eq!(
      truncate_by_crowding(&front, &objectives, 5).unwrap(),
      front
    );
  }

  #[test]
  fn test_infinite_flat_dimension() {
    let inf = f64::INFINITY;
    let scores = crowding_scores(&[[0.0, inf], [1.0, inf], [2.0, inf]]).unwrap();
    // (2 - 0) / 2 on the first dimension, flat penalty on the second
    assert_eq!(scores, vec![f64::NEG_INFINITY, -2.0, f64::NEG_INFINITY]);
  }

  #[test]
  fn test_infinite_spread() {
    let inf = f64::INFINITY;
    let objectives = [[0.0], [1.0], [2.0], [inf], [inf]];
    let scores = crowding_scores(&objectives).unwrap();
    assert!(scores.iter().all(|s| !s.is_nan()));
    assert_eq!(scores[0], f64::NEG_INFINITY);
    assert_eq!(scores[4], f64::NEG_INFINITY);
    // finite gaps vanish against an infinite spread
    assert_eq!(scores[1], 0.0);
    // 2 sits between 1 and inf
    assert_eq!(scores[2], -1.0);
    // the first inf sits between 2 and inf
    assert_eq!(scores[3], -1.0);
  }

  /// Indices holding the minimum or the maximum of a dimension that is not
  /// flat, chosen the way `crowding_scores` orders ties.
  fn boundaries(objectives: &[Vec<Score>]) -> BTreeSet<usize> {
    let dims = objectives[0].len();
    let mut found = BTreeSet::new();
    for dim in 0..dims {
      let order: Vec<usize> = (0..objectives.len())
        .sorted_by(|&a, &b| objectives[a][dim].total_cmp(&objectives[b][dim]))
        .collect();
      let (first, last) = (order[0], order[order.len() - 1]);
      if objectives[first][dim] != objectives[last][dim] {
        found.insert(first);
        found.insert(last);
      }
    }
    found
  }

  fn front() -> impl Strategy<Value = (Vec<Vec<Score>>, usize)> {
    (1usize..4).prop_flat_map(|m| {
      (
        prop::collection::vec(
          prop::collection::vec((0u8..6).prop_map(f64::from), m),
          2..30,
        ),
        0usize..30,
      )
    })
  }

  proptest! {
    #[test]
    fn prop_truncation_keeps_boundaries((objectives, extra) in front()) {
      let keyed: ObjectiveMap = objectives
        .iter()
        .enumerate()
        .map(|(i, o)| (Key::new(i, 0), o.clone()))
        .collect();
      let front: Front = keyed.keys().copied().collect();
      let expected = boundaries(&objectives);
      let capacity = (expected.len() + extra).min(front.len());

      let kept = truncate_by_crowding(&front, &keyed, capacity).unwrap();
      prop_assert_eq!(kept.len(), capacity);
      for idx in expected {
        prop_assert!(kept.contains(&Key::new(idx, 0)), "lost boundary {}", idx);
      }
    }
  }
}
