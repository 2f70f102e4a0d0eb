//! Dump one chart's JSON for a given selection, for poking at payloads

use std::env;
use trackboard::charts;
use trackboard::Dataset;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: figure_dump <csv> <chart> [query]");
        eprintln!("Charts:");
        for chart in &charts::CHARTS {
            eprintln!("  {:<15} {}", chart.slug, chart.title);
        }
        eprintln!("Example: figure_dump tracks.csv key-mode 'keys=C,D&modes=Major'");
        std::process::exit(1);
    }

    let dataset = match Dataset::load(&args[1]) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args[1], e);
            std::process::exit(1);
        }
    };

    let Some(chart) = charts::find(&args[2]) else {
        eprintln!("Unknown chart: {}", args[2]);
        eprintln!("Available:");
        for chart in &charts::CHARTS {
            eprintln!("  {}", chart.slug);
        }
        std::process::exit(1);
    };

    let query = args.get(3).map(String::as_str).unwrap_or("");
    let figure = (chart.handler)(&dataset, query);

    match serde_json::to_string_pretty(&figure) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize figure: {}", e);
            std::process::exit(1);
        }
    }
}
