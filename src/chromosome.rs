//! Real-valued chromosomes and the genetic operators applied to them.

use crate::{
  context::Context,
  error::{Error, Result},
};

/// Probability of swapping the genes of two parents at any given position
/// during crossover.
const SWAP_PROBABILITY: f64 = 0.5;

/// A fixed-length vector of real-valued genes, representing one candidate
/// solution.
///
/// The first gene doubles as the chromosome's own mutation probability, so
/// the mutation rate evolves alongside the rest of the genes.
///
/// Chromosomes do not own randomness: every operator borrows the run's
/// [`Context`].
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
  genes: Vec<f64>,
}

impl From<Vec<f64>> for Chromosome {
  fn from(genes: Vec<f64>) -> Self {
    Self::new(genes)
  }
}

impl Chromosome {
  /// Creates a chromosome from explicit genes.
  pub fn new(genes: Vec<f64>) -> Self {
    Self { genes }
  }

  /// Creates a chromosome of `len` genes, each drawn uniformly from `[0, 1)`.
  pub fn random(ctx: &mut Context, len: usize) -> Self {
    Self {
      genes: (0..len).map(|_| ctx.uniform()).collect(),
    }
  }

  /// Returns the genes.
  pub fn genes(&self) -> &[f64] {
    &self.genes
  }

  /// Returns the genes for modification.
  pub fn genes_mut(&mut self) -> &mut [f64] {
    &mut self.genes
  }

  /// Returns the number of genes.
  pub fn len(&self) -> usize {
    self.genes.len()
  }

  /// Returns `true` if the chromosome has no genes.
  pub fn is_empty(&self) -> bool {
    self.genes.is_empty()
  }

  /// Returns the probability with which each gene is resampled by
  /// [`mutate()`](Self::mutate). It is the first gene, or `0` for an empty
  /// chromosome.
  pub fn mutation_rate(&self) -> f64 {
    self.genes.first().copied().unwrap_or(0.0)
  }

  /// Resamples each gene from `[0, 1)` with probability equal to the
  /// mutation rate. The rate is read once, before any gene changes.
  pub fn mutate(&mut self, ctx: &mut Context) {
    let rate = self.mutation_rate();
    for gene in self.genes.iter_mut() {
      if ctx.uniform() < rate {
        *gene = ctx.uniform();
      }
    }
  }

  /// Creates two children by uniform crossover. At each position the
  /// children either inherit the parents' genes as they are or swapped, with
  /// equal probability, so that `{c0[i], c1[i]} == {self[i], other[i]}`.
  ///
  /// Fails if the parents differ in length.
  pub fn crossover(
    &self,
    other: &Self,
    ctx: &mut Context,
  ) -> Result<(Self, Self)> {
    if self.len() != other.len() {
      return Err(Error::GeneLengthMismatch {
        expected: self.len(),
        got: other.len(),
      });
    }
    let mut child0 = self.clone();
    let mut child1 = other.clone();
    for (a, b) in child0.genes.iter_mut().zip(child1.genes.iter_mut()) {
      if ctx.uniform() < SWAP_PROBABILITY {
        std::mem::swap(a, b);
      }
    }
    Ok((child0, child1))
  }

  /// Lets the genes pick a sequence of `choices`.
  ///
  /// Genes after the first are split into consecutive chunks of
  /// `choices.len()` genes. Each complete chunk is turned into a probability
  /// distribution with [`softmax`] and one element of `choices` is drawn from
  /// it. Returns `(len() - 1) / choices.len()` picks.
  ///
  /// # Examples
  /// ```
  /// # use evolutionary::{chromosome::Chromosome, context::Context};
  /// let mut ctx = Context::new(42);
  /// let c = Chromosome::new(vec![0.2, 0.4, 0.5, 0.5, 0.9, 0.8, 0.3]);
  /// let picks = c.select(&['a', 'b', 'c'], &mut ctx).unwrap();
  /// assert_eq!(picks.len(), 2);
  /// ```
  pub fn select<'a, T>(
    &self,
    choices: &'a [T],
    ctx: &mut Context,
  ) -> Result<Vec<&'a T>> {
    if choices.is_empty() {
      return Err(Error::EmptyChoices);
    }
    self
      .genes
      .get(1..)
      .unwrap_or_default()
      .chunks_exact(choices.len())
      .map(|chunk| ctx.choose_weighted(choices, &softmax(chunk)))
      .collect()
  }
}

/// Converts logits into a probability distribution.
///
/// The maximum logit is subtracted before exponentiation, which leaves the
/// result unchanged but keeps large logits finite.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
  let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
  let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
  let sum: f64 = exps.iter().sum();
  exps.into_iter().map(|e| e / sum).collect()
}
