//! Sift — rank document pages against a persona and job, write a short digest.

use std::time::Instant;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sift_core::{DigestConfig, Query};
use sift_runtime::DigestPipeline;

fn print_usage() {
    println!("Sift — persona-driven document digest");
    println!();
    println!("Usage: sift <persona> <job-to-be-done>");
    println!();
    println!("Environment:");
    println!("  SIFT_INPUT_DIR        Documents to read (default: input)");
    println!("  SIFT_OUTPUT_PATH      Report location (default: output/results.json)");
    println!("  SIFT_MAX_PAGES        Pages read per document (default: 10)");
    println!("  SIFT_MAX_PASSAGES     Passages kept before ranking (default: 1000)");
    println!("  SIFT_TOP_K            Sections in the digest (default: 10)");
    println!("  SIFT_SUMMARY_LINES    Lines per summary (default: 3)");
    println!("  SIFT_SUMMARY_CHARS    Characters per summary (default: 500)");
    println!("  RUST_LOG              Log filter (default: info)");
}

/// Parse `<persona> <job>`; `None` means usage was printed and we should exit.
fn parse_args(args: &[String]) -> Option<Query> {
    match args {
        [_, cmd] if matches!(cmd.as_str(), "--help" | "-h" | "help") => {
            print_usage();
            std::process::exit(0);
        }
        [_, persona, job] => {
            if persona.trim().is_empty() {
                eprintln!("Error: persona cannot be empty");
                return None;
            }
            if job.trim().is_empty() {
                eprintln!("Error: job-to-be-done cannot be empty");
                return None;
            }
            Some(Query::new(persona.as_str(), job.as_str()))
        }
        _ => {
            eprintln!("Usage: sift <persona> <job-to-be-done>. Use 'sift help' for details.");
            None
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(query) = parse_args(&args) else {
        std::process::exit(1);
    };

    let start = Instant::now();
    let config = DigestConfig::from_env();
    let output_path = config.output_path.clone();
    let pipeline = DigestPipeline::new(config).context("invalid configuration")?;

    let output = match pipeline.run_from_dir(&query) {
        Ok(output) => output,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    for warning in &output.stats.warnings {
        tracing::warn!("Degraded score: {}", warning);
    }

    sift_digest::write_report(&output_path, &output.report)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    info!(
        "Extraction complete: {} sections written to {} in {:.2}s",
        output.stats.sections_reported,
        output_path.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
