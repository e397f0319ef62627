use anyhow::{Context, Result};

use swinggraph_core::cli::print_improvement_report;
use swinggraph_core::improvement::analyze_improvement;
use swinggraph_core::storage::{load_trajectory, save_report};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: analyze_improvement <before_data.json> <after_data.json> <output_path.json>");
        std::process::exit(1);
    }

    if let Err(e) = run(&args[1], &args[2], &args[3]) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(before_path: &str, after_path: &str, output_path: &str) -> Result<()> {
    let before = load_trajectory(before_path)
        .with_context(|| format!("lasting av før-opptak {before_path}"))?;
    let after = load_trajectory(after_path)
        .with_context(|| format!("lasting av etter-opptak {after_path}"))?;

    let report = analyze_improvement(&before, &after);

    save_report(&report, output_path)
        .map_err(|e| anyhow::anyhow!("lagring av rapport til {output_path}: {e}"))?;

    print_improvement_report(&report);
    Ok(())
}
