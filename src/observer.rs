//! Observers invoked by the optimizer once per generation.

use std::{
  fs::{File, OpenOptions},
  io::{BufWriter, Write},
  path::{Path, PathBuf},
};

use crate::{
  error::Result,
  population::{Front, ObjectiveMap, Population},
};

/// An operator that watches the population after each generation.
///
/// Observers cannot affect the run. They are the place for logging,
/// persistence and progress reporting.
///
/// # Examples
/// ```
/// # use evolutionary::population::{Front, ObjectiveMap, Population};
/// let mut sizes = Vec::new();
/// let mut o = |_: usize, p: &Population, _: &ObjectiveMap, _: &[Front]| {
///   sizes.push(p.len())
/// };
/// o(0, &Population::new(), &ObjectiveMap::new(), &[]);
/// assert_eq!(sizes, vec![0]);
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Observer {
  /// Receives the index of the generation that just finished, the new
  /// population, its objectives and the fronts the combined pool was ranked
  /// into.
  fn observe(
    &mut self,
    generation: usize,
    population: &Population,
    objectives: &ObjectiveMap,
    fronts: &[Front],
  );
}

impl<F> Observer for F
where
  F: FnMut(usize, &Population, &ObjectiveMap, &[Front]),
{
  fn observe(
    &mut self,
    generation: usize,
    population: &Population,
    objectives: &ObjectiveMap,
    fronts: &[Front],
  ) {
    self(generation, population, objectives, fronts)
  }
}

/// Observes nothing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
  fn observe(&mut self, _: usize, _: &Population, _: &ObjectiveMap, _: &[Front]) {}
}

/// Emits every generation through `tracing`: a summary at `INFO` and each
/// individual with its genes and objectives at `DEBUG`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
  fn observe(
    &mut self,
    generation: usize,
    population: &Population,
    objectives: &ObjectiveMap,
    fronts: &[Front],
  ) {
    tracing::info!(
      generation,
      population = population.len(),
      fronts = fronts.len(),
      first_front = fronts.first().map_or(0, Vec::len),
      "generation finished"
    );
    for (key, chromosome) in population {
      tracing::debug!(
        %key,
        genes = ?chromosome.genes(),
        objectives = ?objectives.get(key),
        "individual"
      );
    }
  }
}

/// Logs like [`LogObserver`] and appends each generation's genes to a file.
///
/// The file is truncated on creation. Each generation appends a
/// `Generation <n>` line followed by one line of genes per individual, in key
/// order. Failed writes are logged and otherwise ignored.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FileObserver {
  path: PathBuf,
}

impl FileObserver {
  /// Creates an observer writing to `path`, truncating the file.
  pub fn new(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    File::create(&path)?;
    Ok(Self { path })
  }

  /// Returns the path of the file being written.
  pub fn path(&self) -> &Path {
    &self.path
  }

  fn append(
    &self,
    generation: usize,
    population: &Population,
  ) -> std::io::Result<()> {
    let file = OpenOptions::new().append(true).open(&self.path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "Generation {generation}")?;
    for chromosome in population.values() {
      writeln!(writer, "{:?}", chromosome.genes())?;
    }
    writer.flush()
  }
}

impl Observer for FileObserver {
  fn observe(
    &mut self,
    generation: usize,
    population: &Population,
    objectives: &ObjectiveMap,
    fronts: &[Front],
  ) {
    LogObserver.observe(generation, population, objectives, fronts);
    if let Err(e) = self.append(generation, population) {
      tracing::warn!(
        path = %self.path.display(),
        error = %e,
        "failed to write generation to file"
      );
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{chromosome::Chromosome, population::Key};

  fn sample() -> (Population, ObjectiveMap, Vec<Front>) {
    let population = Population::from([
      (Key::new(0, 0), Chromosome::new(vec![0.5, 0.25])),
      (Key::new(1, 1), Chromosome::new(vec![0.125, 1.0])),
    ]);
    let objectives = ObjectiveMap::from([
      (Key::new(0, 0), vec![1.0, 2.0]),
      (Key::new(1, 1), vec![2.0, 1.0]),
    ]);
    let fronts = vec![vec![Key::new(0, 0), Key::new(1, 1)]];
    (population, objectives, fronts)
  }

  fn takes_observer<O: Observer>(mut o: O) {
    let (population, objectives, fronts) = sample();
    o.observe(0, &population, &objectives, &fronts);
  }

  #[test]
  fn test_observer_from_closure() {
    let mut seen = Vec::new();
    takes_observer(
      |g: usize, p: &Population, _: &ObjectiveMap, f: &[Front]| {
        seen.push((g, p.len(), f.len()))
      },
    );
    assert_eq!(seen, vec![(0, 2, 1)]);
  }

  #[test]
  fn test_noop_and_log_observers() {
    takes_observer(NoopObserver);
    takes_observer(LogObserver);
  }

  #[test]
  fn test_file_observer() {
    let path = std::env::temp_dir().join(format!(
      "evolutionary-file-observer-{}.log",
      std::process::id()
    ));
    std::fs::write(&path, "stale contents\n").unwrap();

    let mut observer = FileObserver::new(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

    let (population, objectives, fronts) = sample();
    observer.observe(0, &population, &objectives, &fronts);
    observer.observe(1, &population, &objectives, &fronts);

    let contents = std::fs::read_to_string(observer.path()).unwrap();
    assert_eq!(
      contents,
      "Generation 0\n[0.5, 0.25]\n[0.125, 1.0]\n\
       Generation 1\n[0.5, 0.25]\n[0.125, 1.0]\n"
    );
    std::fs::remove_file(&path).unwrap();
  }

  #[test]
  fn test_file_observer_ignores_write_failures() {
    let path = std::env::temp_dir().join(format!(
      "evolutionary-vanishing-{}.log",
      std::process::id()
    ));
    let mut observer = FileObserver::new(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    // appending to a removed file fails and is only logged
    takes_observer(observer.clone());
    let (population, objectives, fronts) = sample();
    observer.observe(0, &population, &objectives, &fronts);
    assert!(!path.exists());
  }
}
