use evolutionary::{
  chromosome::Chromosome,
  context::Context,
  evaluation::Evaluator,
  observer::LogObserver,
  optimizer::nsga::Nsga2,
  score::Scores,
};

// ZDT1 with 30 decision variables, stored after the mutation rate gene
struct Zdt1;

impl Evaluator for Zdt1 {
  fn evaluate(&self, genes: &[f64]) -> Scores {
    let x = &genes[1..];
    let g = 1.0 + 9.0 * x[1..].iter().sum::<f64>() / (x.len() - 1) as f64;
    vec![x[0], g * (1.0 - (x[0] / g).sqrt())]
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::INFO)
    .init();

  let seed = std::env::args()
    .nth(1)
    .and_then(|s| s.parse().ok())
    .unwrap_or(42);
  let mut ctx = Context::new(seed);

  // rate gene plus 30 variables
  let population = (0..100).map(|_| Chromosome::random(&mut ctx, 31)).collect();

  let mut nsga = Nsga2::builder()
    .context(&mut ctx)
    .population(population)
    .evaluator(Zdt1)
    .generations(250)
    .build();
  nsga.evolve(&mut LogObserver).unwrap();

  // the first front of the final pool that survived
  let first_front = nsga.fronts()[0]
    .iter()
    .filter_map(|key| nsga.objectives().get(key));
  print!("f=[");
  for (i, scores) in first_front.enumerate() {
    if i > 0 {
      print!(",");
    }
    print!("({:.4},{:.4})", scores[0], scores[1]);
  }
  println!("]");
}
