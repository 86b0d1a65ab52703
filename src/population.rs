//! Keyed populations, objective maps and Pareto fronts.

use std::{collections::BTreeMap, fmt};

use crate::{chromosome::Chromosome, score::Scores};

/// Identity of a chromosome within a run.
///
/// A chromosome keeps the lineage of the parent it was copied from and is
/// tagged with the generation that created it. `sibling` tells apart children
/// that would otherwise share both, which happens when two parents of the same
/// lineage reproduce in the same generation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Key {
  /// Lineage id, inherited from the parent.
  pub lineage: usize,
  /// Generation the chromosome was created in. Initial chromosomes have `0`.
  pub generation: usize,
  /// Disambiguator among same-lineage children of one generation.
  pub sibling: usize,
}

impl Key {
  /// Creates a key with `sibling` set to `0`.
  pub fn new(lineage: usize, generation: usize) -> Self {
    Self {
      lineage,
      generation,
      sibling: 0,
    }
  }
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.sibling == 0 {
      write!(f, "({}, {})", self.lineage, self.generation)
    } else {
      write!(f, "({}, {}.{})", self.lineage, self.generation, self.sibling)
    }
  }
}

/// Chromosomes keyed by their identity. Iteration follows key order, which
/// keeps every draw made over a population reproducible.
pub type Population = BTreeMap<Key, Chromosome>;

/// Objective scores keyed by chromosome identity.
pub type ObjectiveMap = BTreeMap<Key, Scores>;

/// Keys of chromosomes sharing one Pareto rank.
pub type Front = Vec<Key>;

/// Keys an initial population by position: the `i`-th chromosome starts
/// lineage `i` in generation `0`.
pub fn initial_population(chromosomes: Vec<Chromosome>) -> Population {
  chromosomes
    .into_iter()
    .enumerate()
    .map(|(i, c)| (Key::new(i, 0), c))
    .collect()
}

/// Returns the first free key of `lineage` in `generation`.
pub(crate) fn vacant_key(
  population: &Population,
  lineage: usize,
  generation: usize,
) -> Key {
  let mut key = Key::new(lineage, generation);
  while population.contains_key(&key) {
    key.sibling += 1;
  }
  key
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_initial_population() {
    let population = initial_population(vec![
      Chromosome::new(vec![0.0]),
      Chromosome::new(vec![1.0]),
      Chromosome::new(vec![2.0]),
    ]);
    let keys: Vec<_> = population.keys().copied().collect();
    assert_eq!(keys, vec![Key::new(0, 0), Key::new(1, 0), Key::new(2, 0)]);
    assert_eq!(population[&Key::new(2, 0)].genes(), &[2.0]);
  }

  #[test]
  fn test_vacant_key() {
    let mut population = Population::new();
    let first = vacant_key(&population, 3, 1);
    assert_eq!(first, Key::new(3, 1));
    population.insert(first, Chromosome::new(vec![]));
    let second = vacant_key(&population, 3, 1);
    assert_eq!(
      second,
      Key {
        lineage: 3,
        generation: 1,
        sibling: 1
      }
    );
  }

  #[test]
  fn test_key_order_and_display() {
    assert!(Key::new(0, 5) < Key::new(1, 0));
    assert!(Key::new(1, 0) < Key::new(1, 1));
    assert_eq!(Key::new(4, 2).to_string(), "(4, 2)");
    let sibling = Key {
      sibling: 1,
      ..Key::new(4, 2)
    };
    assert_eq!(sibling.to_string(), "(4, 2.1)");
  }
}
