//! Route through the sample approval flowchart.
//!
//! Run: cargo run --bin route -- --metric euclidean --json

use clap::Parser;
use flowroute_demos::{Metric, approval_flow, report};

#[derive(Parser)]
#[command(about = "Plan a route through the sample approval flowchart")]
struct Args {
    /// How edge paths are measured.
    #[arg(long, value_enum, default_value_t = Metric::Manhattan)]
    metric: Metric,
    /// Print the model snapshot as JSON first.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let model = match approval_flow() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&model) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = report(&model, args.metric.into()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
