//! Non-dominated sorting into Pareto fronts.

use std::collections::BTreeMap;

use super::domination::analyze_domination;
use crate::{
  error::Result,
  population::{Front, Key, ObjectiveMap},
  score::Score,
};

/// Result of a non-dominated sort over a keyed pool.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Sorting {
  /// 1-based Pareto rank of each key. Rank `1` is globally non-dominated.
  pub ranks: BTreeMap<Key, usize>,
  /// Keys grouped by rank: `fronts[0]` holds the keys of rank `1` and so on.
  pub fronts: Vec<Front>,
}

/// Peels a pool of objective vectors into Pareto fronts of indices, best
/// front first.
///
/// The first front holds every individual that nobody dominates. Each
/// following front holds the individuals that are dominated only by members
/// of earlier fronts. Every index lands in exactly one front and no front is
/// empty.
pub fn sort_fronts<S: AsRef<[Score]>>(
  objectives: &[S],
) -> Result<Vec<Vec<usize>>> {
  let mut records = analyze_domination(objectives)?;

  let mut fronts = Vec::new();
  let mut front: Vec<usize> = records
    .iter()
    .enumerate()
    .filter_map(|(idx, r)| (r.dominated_by == 0).then_some(idx))
    .collect();

  while !front.is_empty() {
    let mut next_front = Vec::new();
    // for each individual `p` in current front...
    for &p_idx in front.iter() {
      // for each individual `q` dominated by `p`...
      for q_idx in std::mem::take(&mut records[p_idx].dominates) {
        records[q_idx].dominated_by -= 1;
        // if only earlier fronts dominated `q`...
        if records[q_idx].dominated_by == 0 {
          next_front.push(q_idx);
        }
      }
    }
    fronts.push(front);
    front = next_front;
  }

  debug_assert_eq!(
    fronts.iter().map(Vec::len).sum::<usize>(),
    objectives.len(),
    "fronts must partition the pool"
  );
  Ok(fronts)
}

/// Ranks a keyed pool of objective vectors into Pareto fronts.
///
/// # Examples
/// ```
/// # use evolutionary::{pareto::non_dominated_sort, population::{Key, ObjectiveMap}};
/// let objectives = ObjectiveMap::from([
///   (Key::new(0, 0), vec![1.0, 5.0]),
///   (Key::new(1, 0), vec![3.0, 3.0]),
///   (Key::new(2, 0), vec![4.0, 4.0]),
/// ]);
/// let sorting = non_dominated_sort(&objectives).unwrap();
/// assert_eq!(sorting.fronts.len(), 2);
/// assert_eq!(sorting.ranks[&Key::new(2, 0)], 2);
/// ```
pub fn non_dominated_sort(objectives: &ObjectiveMap) -> Result<Sorting> {
  let (keys, scores): (Vec<Key>, Vec<&[Score]>) = objectives
    .iter()
    .map(|(key, scores)| (*key, scores.as_slice()))
    .unzip();

  let fronts: Vec<Front> = sort_fronts(&scores)?
    .into_iter()
    .map(|front| front.into_iter().map(|idx| keys[idx]).collect())
    .collect();

  let ranks = fronts
    .iter()
    .enumerate()
    .flat_map(|(i, front)| front.iter().map(move |key| (*key, i + 1)))
    .collect();

  Ok(Sorting { ranks, fronts })
}
