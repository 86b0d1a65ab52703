//! Implementation of the NSGA-II genetic algorithm.

use std::collections::BTreeSet;

use typed_builder::TypedBuilder;

use crate::{
  chromosome::Chromosome,
  context::Context,
  error::{Error, Result},
  evaluation::Evaluator,
  observer::{NoopObserver, Observer},
  optimizer::Optimizer,
  pareto::{non_dominated_sort, truncate_by_crowding},
  population::{
    initial_population,
    vacant_key,
    Front,
    Key,
    ObjectiveMap,
    Population,
  },
  score::Score,
};

/// Number of generations run when none is configured.
pub const DEFAULT_GENERATIONS: usize = 100;

/// The NSGA-II optimizer.
///
/// Each generation, parents are paired at random, every pair produces two
/// children by crossover, and each child is mutated. Parents and children
/// are then ranked into Pareto fronts together. Whole fronts are carried into
/// the next generation, best first, until the next front no longer fits. That
/// front is cut down to the remaining capacity by crowding score.
///
/// All randomness is drawn from the borrowed [`Context`], in a fixed order:
/// pairing, crossover, mutation of the first child, mutation of the second.
/// Identical seeds therefore yield identical runs.
///
/// # Examples
/// ```
/// # use evolutionary::{chromosome::Chromosome, context::Context, optimizer::{nsga::Nsga2, Optimizer}};
/// let mut ctx = Context::new(42);
/// let population = (0..8).map(|_| Chromosome::random(&mut ctx, 4)).collect();
/// let solutions = Nsga2::builder()
///   .context(&mut ctx)
///   .population(population)
///   .evaluator(|g: &[f64]| vec![g[1], 1.0 - g[1] + g[2]])
///   .generations(10)
///   .build()
///   .optimize()
///   .unwrap();
/// assert_eq!(solutions.len(), 8);
/// ```
#[derive(TypedBuilder, Debug)]
pub struct Nsga2<'a, E: Evaluator> {
  context: &'a mut Context,
  #[builder(setter(
    transform = |chromosomes: Vec<Chromosome>| initial_population(chromosomes),
    doc = "
The initial population setter. The `i`-th chromosome is keyed as lineage `i`
of generation `0`."
  ))]
  population: Population,
  evaluator: E,
  #[builder(default = DEFAULT_GENERATIONS)]
  generations: usize,
  #[builder(setter(skip), default)]
  objectives: ObjectiveMap,
  #[builder(setter(skip), default)]
  fronts: Vec<Front>,
  #[builder(setter(skip), default)]
  generation: usize,
  #[builder(setter(skip), default)]
  objective_count: Option<usize>,
}

impl<E: Evaluator> Optimizer for Nsga2<'_, E> {
  fn optimize(mut self) -> Result<Vec<Chromosome>> {
    self.evolve(&mut NoopObserver)?;
    Ok(self.population.into_values().collect())
  }
}

impl<E: Evaluator> Nsga2<'_, E> {
  /// Returns the current population.
  pub fn population(&self) -> &Population {
    &self.population
  }

  /// Returns the cached objectives of the current population. Empty until
  /// the first call to [`evolve()`](Self::evolve).
  pub fn objectives(&self) -> &ObjectiveMap {
    &self.objectives
  }

  /// Returns the fronts the last combined pool of parents and children was
  /// ranked into.
  pub fn fronts(&self) -> &[Front] {
    &self.fronts
  }

  /// Returns the number of generations evolved so far.
  pub fn generation(&self) -> usize {
    self.generation
  }

  /// Moves the population out of the optimizer.
  pub fn into_population(self) -> Population {
    self.population
  }

  /// Evolves the population for the configured number of generations,
  /// passing each new generation to `observer`.
  ///
  /// May be called again to continue evolving from where the previous call
  /// stopped.
  pub fn evolve(&mut self, observer: &mut impl Observer) -> Result<()> {
    if self.population.is_empty() {
      return Err(Error::EmptyPopulation);
    }
    self.check_gene_lengths()?;

    let _span = tracing::info_span!(
      "evolve",
      generations = self.generations,
      population = self.population.len()
    )
    .entered();

    let parents_objectives = self.evaluate_missing()?;
    self.objectives = parents_objectives;

    for _ in 0..self.generations {
      self.step(observer)?;
    }
    Ok(())
  }

  /// Runs a single generation.
  fn step(&mut self, observer: &mut impl Observer) -> Result<()> {
    let generation = self.generation;
    let capacity = self.population.len();

    let children = self.make_children(generation)?;
    let children_objectives = self.evaluate(&children)?;
    tracing::debug!(generation, children = children.len(), "children created");

    // parents stay untouched until the survivors are known
    let mut pool_objectives = self.objectives.clone();
    pool_objectives.extend(children_objectives);
    let sorting = non_dominated_sort(&pool_objectives)?;
    let survivors: BTreeSet<Key> =
      select_survivors(&sorting.fronts, &pool_objectives, capacity)?
        .into_iter()
        .collect();
    debug_assert_eq!(survivors.len(), capacity);

    pool_objectives.retain(|key, _| survivors.contains(key));
    self.population.extend(children);
    self.population.retain(|key, _| survivors.contains(key));
    tracing::debug!(
      generation,
      pool = sorting.ranks.len(),
      fronts = sorting.fronts.len(),
      "next generation selected"
    );

    self.objectives = pool_objectives;
    self.fronts = sorting.fronts;
    self.generation += 1;

    observer.observe(
      generation,
      &self.population,
      &self.objectives,
      &self.fronts,
    );
    Ok(())
  }

  /// Pairs parents at random without replacement and creates two mutated
  /// children per pair. With an odd number of parents, the one left unpaired
  /// has no children.
  fn make_children(&mut self, generation: usize) -> Result<Population> {
    let mut keys: Vec<Key> = self.population.keys().copied().collect();
    let mut children = Population::new();

    while keys.len() > 1 {
      let picks = self.context.sample_distinct(keys.len(), 2)?;
      let (key0, key1) = (keys[picks[0]], keys[picks[1]]);
      keys.remove(picks[0].max(picks[1]));
      keys.remove(picks[0].min(picks[1]));
      tracing::trace!(%key0, %key1, "parents paired");

      let (mut child0, mut child1) = self.population[&key0]
        .crossover(&self.population[&key1], self.context)?;
      child0.mutate(self.context);
      child1.mutate(self.context);

      let child0_key = vacant_key(&children, key0.lineage, generation + 1);
      children.insert(child0_key, child0);
      let child1_key = vacant_key(&children, key1.lineage, generation + 1);
      children.insert(child1_key, child1);
    }

    Ok(children)
  }

  /// Evaluates the current population, reusing cached objectives.
  fn evaluate_missing(&mut self) -> Result<ObjectiveMap> {
    let mut objectives = ObjectiveMap::new();
    for (key, chromosome) in self.population.iter() {
      let scores = match self.objectives.get(key) {
        Some(scores) => scores.clone(),
        None => self.evaluator.evaluate(chromosome.genes()),
      };
      check_scores(&mut self.objective_count, &scores)?;
      objectives.insert(*key, scores);
    }
    Ok(objectives)
  }

  fn evaluate(&mut self, population: &Population) -> Result<ObjectiveMap> {
    population
      .iter()
      .map(|(key, chromosome)| {
        let scores = self.evaluator.evaluate(chromosome.genes());
        check_scores(&mut self.objective_count, &scores)?;
        Ok((*key, scores))
      })
      .collect()
  }

  fn check_gene_lengths(&self) -> Result<()> {
    let mut chromosomes = self.population.values();
    let Some(expected) = chromosomes.next().map(Chromosome::len) else {
      return Ok(());
    };
    match chromosomes.find(|c| c.len() != expected) {
      Some(c) => Err(Error::GeneLengthMismatch {
        expected,
        got: c.len(),
      }),
      None => Ok(()),
    }
  }
}

/// Fixes the number of objectives on first use and fails on any later
/// deviation from it, or on a NaN score.
fn check_scores(expected: &mut Option<usize>, scores: &[Score]) -> Result<()> {
  let got = scores.len();
  match *expected {
    Some(expected) if expected != got => {
      return Err(Error::ObjectiveLengthMismatch { expected, got });
    }
    Some(_) => {}
    None => *expected = Some(got),
  }
  if scores.iter().any(|s| s.is_nan()) {
    return Err(Error::NanObjective);
  }
  Ok(())
}

/// Fills `capacity` places with whole fronts, best first. The first front that
/// does not fit is cut down to the remaining places by crowding score.
fn select_survivors(
  fronts: &[Front],
  objectives: &ObjectiveMap,
  capacity: usize,
) -> Result<Vec<Key>> {
  let mut survivors = Vec::with_capacity(capacity);
  for (rank, front) in fronts.iter().enumerate() {
    let remaining = capacity - survivors.len();
    if remaining == 0 {
      break;
    }
    if front.len() <= remaining {
      survivors.extend_from_slice(front);
    } else {
      tracing::debug!(
        rank = rank + 1,
        front = front.len(),
        remaining,
        "front split by crowding"
      );
      survivors.extend(truncate_by_crowding(front, objectives, remaining)?);
    }
  }
  Ok(survivors)
}
