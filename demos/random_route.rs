//! Route through a random layered diagram.
//!
//! Run: cargo run --bin random-route -- --seed 7

use clap::Parser;
use flowroute_demos::{Metric, layered, report};
use flowroute_paths::SearchError;

#[derive(Parser)]
#[command(about = "Plan a route through a random layered diagram")]
struct Args {
    /// Seed for the diagram generator.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Number of columns, start and goal included.
    #[arg(long, default_value_t = 8)]
    layers: usize,
    /// Maximum nodes per inner column.
    #[arg(long, default_value_t = 5)]
    width: usize,
    #[arg(long, value_enum, default_value_t = Metric::Manhattan)]
    metric: Metric,
}

fn main() {
    let args = Args::parse();

    let result = layered(args.seed, args.layers, args.width)
        .map_err(SearchError::from)
        .and_then(|model| {
            println!(
                "seed {}: {} nodes, {} edges",
                args.seed,
                model.len(),
                model.edges().len()
            );
            report(&model, args.metric.into())
        });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
