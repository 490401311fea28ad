// Sortscope: step-by-step sorting traces

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sortscope::registry::Registry;
use sortscope::snapshot::Recorder;
use sortscope::step::Step;
use sortscope::TraceError;

/// Sample dataset used when no values are given
const SAMPLE_VALUES: [f64; 10] = [64.0, 25.0, 12.0, 22.0, 11.0, 90.0, 88.0, 45.0, 50.0, 32.0];

/// Trace a sorting algorithm step by step.
#[derive(Parser)]
#[command(name = "sortscope", version, about = "Trace a sorting algorithm step by step")]
struct Cli {
    /// Algorithm name as registered (see --list).
    #[arg(short, long, default_value = "Bubble Sort")]
    algorithm: String,

    /// Values to sort (default: a 10-element sample).
    #[arg(allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Print one JSON object per step.
    #[arg(long)]
    json: bool,

    /// Print only the final counters.
    #[arg(long, conflicts_with = "json")]
    summary: bool,

    /// List registered algorithms and exit.
    #[arg(long)]
    list: bool,

    /// Trace memory budget in megabytes.
    #[arg(long, default_value_t = 1024)]
    memory_limit: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = Registry::builtin();

    if cli.list {
        for category in registry.categories() {
            println!("{}:", category.name);
            for algorithm in &category.algorithms {
                println!("  {}", algorithm);
            }
        }
        return Ok(());
    }

    let values = if cli.values.is_empty() {
        SAMPLE_VALUES.to_vec()
    } else {
        cli.values
    };

    let steps = match registry.run(&cli.algorithm, &values) {
        Ok(steps) => steps,
        Err(e) => {
            eprint!("{}", error_report(&e, &registry));
            process::exit(1);
        }
    };

    let recorder = Recorder::new(cli.memory_limit.saturating_mul(1024 * 1024));
    let trace = match recorder.record(steps) {
        Ok(trace) => trace,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if cli.json {
        for step in &trace {
            println!("{}", serde_json::to_string(step)?);
        }
        return Ok(());
    }

    if !cli.summary {
        println!("Starting array: [{}]", join(&values));
        for (number, step) in trace.iter().enumerate() {
            print_step(number + 1, step);
        }
    }

    if let Some(last) = trace.last() {
        println!(
            "{}: {} steps, {} comparisons, {} swaps",
            cli.algorithm,
            trace.len(),
            last.comparisons(),
            last.swaps()
        );
    }

    Ok(())
}

/// Text printed to stderr when a run cannot start
///
/// Only a lookup failure lists the registered names; bad input is unrelated to
/// the algorithm choice.
fn error_report(error: &TraceError, registry: &Registry) -> String {
    let mut report = format!("Error: {}\n", error);
    if !error.is_engine_failure() {
        report.push_str("\nAvailable algorithms:\n");
        for name in registry.names() {
            report.push_str(&format!("  {}\n", name));
        }
    }
    report
}

fn print_step(number: usize, step: &Step) {
    println!();
    println!("Step {}: {}", number, step.kind);
    println!("  {}", step.message);
    let indices: Vec<String> = step.indices.iter().map(|i| i.to_string()).collect();
    println!("  Indices: {}", indices.join(", "));
    println!("  Values: {}", join(&step.values));
    println!("  Array: [{}]", join(&step.state));
    let metadata: Vec<String> = step
        .metadata
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    println!("  Metadata: {}", metadata.join(" "));
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_report_omits_algorithm_list() {
        let registry = Registry::builtin();
        let error = registry.run("Bubble Sort", &[f64::NAN, 1.0]).unwrap_err();
        let report = error_report(&error, &registry);

        assert_eq!(report, "Error: invalid input: element 0 (NaN) is not comparable\n");
    }

    #[test]
    fn test_unknown_algorithm_report_lists_names() {
        let registry = Registry::builtin();
        let error = registry.lookup("Bogo Sort").unwrap_err();
        let report = error_report(&error, &registry);

        assert!(report.starts_with("Error: algorithm not found: Bogo Sort\n"));
        assert!(report.contains("Available algorithms:"));
        assert!(report.contains("  Merge Sort\n"));
    }
}
