use clap::Parser;
use dragonbot::{Dice, DiceExpression};

#[derive(Parser)]
#[command(name = "roll-stats")]
#[command(about = "Monte Carlo sim: distribution of a dice expression")]
struct Args {
    /// Dice expression, e.g. 2d6+3 or A1d20
    #[arg(allow_hyphen_values = true)]
    expr: String,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,
}

#[derive(Debug, Default)]
struct Summary {
    min: i64,
    max: i64,
    sum: i64,
    samples: u32,
}

impl Summary {
    fn record(&mut self, total: i64) {
        if self.samples == 0 {
            self.min = total;
            self.max = total;
        } else {
            self.min = self.min.min(total);
            self.max = self.max.max(total);
        }
        self.sum += total;
        self.samples += 1;
    }

    fn mean(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.sum as f64 / self.samples as f64
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let expr: DiceExpression = args.expr.parse()?;

    let mut summary = Summary::default();
    for i in 0..args.trials {
        let mut dice = Dice::from_seed(args.seed.wrapping_add(u64::from(i)));
        summary.record(expr.evaluate(&mut dice));
    }

    let (lo, hi) = expr.bounds();
    println!("expr={} trials={}", expr, summary.samples);
    println!("range=[{}, {}] average={}", lo, hi, expr.average());
    println!(
        "observed min={} max={} mean={:.2}",
        summary.min,
        summary.max,
        summary.mean()
    );
    Ok(())
}
