use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "halo-variant workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dispatch benchmarks and write a comparison report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,

        /// Implementation the other columns are compared against
        #[arg(long, default_value = "enum")]
        baseline: String,
    },
}

const BENCH: &str = "dispatch_benchmark";

/// `mean.point_estimate` from Criterion's `estimates.json`, in nanoseconds.
#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

/// The parts of Criterion's `benchmark.json` the report needs.
#[derive(Deserialize)]
struct BenchmarkInfo {
    group_id: String,
    function_id: Option<String>,
    throughput: Option<serde_json::Value>,
}

/// Operations per second, keyed by group then implementation.
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            quick,
            report_only,
            baseline,
        } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report(&baseline)?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running dispatch benchmarks...");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.env("CARGO_INCREMENTAL", "0")
        .args(["bench", "--bench", BENCH, "--"]);

    if quick {
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd
        .status()
        .with_context(|| format!("Failed to run bench {BENCH}"))?;
    if !status.success() {
        anyhow::bail!("Benchmark {BENCH} failed");
    }

    println!("Finished {} in {:.2?}", BENCH, start.elapsed());
    Ok(())
}

fn generate_report(baseline: &str) -> Result<()> {
    println!("\n>>> Generating Report...");

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, &mut results)?;

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(report_path, render_report(&results, baseline))
        .with_context(|| format!("Failed to write {}", report_path.display()))?;

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn render_report(results: &Results, baseline: &str) -> String {
    use std::fmt::Write;

    let implementations: BTreeSet<&str> = results
        .values()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "# Dispatch Benchmark Report\n");
    let _ = writeln!(out, "Relative figures are against `{baseline}`.\n");

    let _ = write!(out, "| Workload |");
    for name in &implementations {
        let _ = write!(out, " {name} (Ops/s) | vs {baseline} |");
    }
    let _ = writeln!(out);

    let _ = write!(out, "|---|");
    for _ in &implementations {
        let _ = write!(out, "---|---|");
    }
    let _ = writeln!(out);

    for (workload, row) in results {
        let _ = write!(out, "| {workload} |");
        let base = row.get(baseline).copied();

        for name in &implementations {
            match row.get(*name) {
                Some(ops) => {
                    let rel = match base {
                        Some(b) if b > 0.0 => format!("**{:.2}x**", ops / b),
                        _ => String::from("-"),
                    };
                    let _ = write!(out, " {} | {} |", format_ops(*ops), rel);
                }
                None => {
                    let _ = write!(out, " N/A | - |");
                }
            }
        }
        let _ = writeln!(out);
    }

    out
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

/// Walks Criterion's output tree and records every `new/` measurement.
fn collect_results(dir: &Path, results: &mut Results) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Ok(()),
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if path.file_name().and_then(|s| s.to_str()) == Some("report") {
                continue;
            }
            collect_results(&path, results)?;
            continue;
        }

        // Structure: .../<group>/<function>/new/{benchmark,estimates}.json
        let in_new = path
            .parent()
            .and_then(Path::file_name)
            .and_then(|s| s.to_str())
            == Some("new");
        if !in_new || path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        let info_path = path.with_file_name("benchmark.json");
        let info: BenchmarkInfo = read_json(&info_path)?;
        let estimates: Estimates = read_json(&path)?;

        let time_ns = estimates.mean.point_estimate;
        if time_ns <= 0.0 {
            continue;
        }
        let elements = info
            .throughput
            .as_ref()
            .and_then(|t| t.get("Elements"))
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(1.0);
        let function = info.function_id.unwrap_or_else(|| info.group_id.clone());

        results
            .entry(info.group_id)
            .or_default()
            .insert(function, (elements * 1e9) / time_ns);
    }

    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_report_relative_to_baseline() {
        let mut results = Results::new();
        let row = results.entry(String::from("single_dispatch")).or_default();
        row.insert(String::from("enum"), 2_000_000.0);
        row.insert(String::from("variant"), 1_000_000.0);

        let report = render_report(&results, "enum");
        assert!(report.contains("| single_dispatch |"));
        assert!(report.contains("2.00M | **1.00x**"));
        assert!(report.contains("1000.00K | **0.50x**"));
    }

    #[test]
    fn test_benchmark_info_parses_criterion_json() {
        let info: BenchmarkInfo = serde_json::from_str(
            r#"{"group_id":"pair_dispatch","function_id":"variant","value_str":null,
                "throughput":{"Elements":1024},"full_id":"pair_dispatch/variant",
                "directory_name":"pair_dispatch/variant","title":"pair_dispatch/variant"}"#,
        )
        .unwrap();
        assert_eq!(info.group_id, "pair_dispatch");
        assert_eq!(info.function_id.as_deref(), Some("variant"));
        let elements = info.throughput.as_ref().and_then(|t| t.get("Elements"));
        assert_eq!(elements.and_then(serde_json::Value::as_u64), Some(1024));
    }
}
