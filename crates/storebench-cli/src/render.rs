// Dweve storebench - Storage Benchmark Harness
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Console rendering of runs and comparisons.

use colored::{ColoredString, Colorize};
use storebench::harness::{ComparisonEntry, ComparisonReport, ComparisonVerdict, RunOutput, Trend};
use storebench::report::{BenchResult, MethodFailure};

/// Formats a nanosecond quantity with a readable unit.
pub fn format_nanos(nanos: f64) -> String {
    if nanos >= 1e9 {
        format!("{:.2} s", nanos / 1e9)
    } else if nanos >= 1e6 {
        format!("{:.2} ms", nanos / 1e6)
    } else if nanos >= 1e3 {
        format!("{:.2} µs", nanos / 1e3)
    } else {
        format!("{:.0} ns", nanos)
    }
}

/// Prints the results and failures of a run.
pub fn print_run(output: &RunOutput, show_operations: bool) {
    let report = &output.report;

    println!("\n{}", "=".repeat(80));
    println!("BENCHMARK RESULTS");
    println!("{}", "=".repeat(80));
    println!("Timestamp: {}", report.timestamp.to_rfc3339());
    println!("Tool: {}", report.tool_version);

    for result in &report.results {
        print_result(result);
        if show_operations {
            print_operations(output, result);
        }
    }

    println!("{}", "=".repeat(80));
    print_failures(&report.failures);
}

fn print_result(result: &BenchResult) {
    let timing = match result.summary() {
        Some(summary) => match summary.std_dev() {
            Some(sd) => format!(
                "{} ± {} (n={})",
                format_nanos(summary.mean),
                format_nanos(sd),
                summary.count
            ),
            None => format!("{} (n={})", format_nanos(summary.mean), summary.count),
        },
        None => "no samples".to_string(),
    };

    println!(
        "{} {}.{}: {}, {:.1} operation(s)/run",
        "✓".green().bold(),
        result.case_name,
        result.method_name,
        timing,
        result.operations_per_repetition()
    );
}

fn print_operations(output: &RunOutput, result: &BenchResult) {
    for (signature, count) in result.operation_counts.iter() {
        println!("    {:>6}x  {}", count, signature);
    }

    if let Some(trace) = output.trace(&result.key()) {
        if !trace.operations.is_empty() {
            println!("    last run:");
            for (index, op) in trace.operations.iter().enumerate() {
                println!(
                    "    {:>4}. {} ({})",
                    index + 1,
                    op.signature,
                    format_nanos(op.duration_nanos as f64)
                );
            }
        }
    }
}

fn print_failure(failure: &MethodFailure) {
    eprintln!(
        "{} {}.{} [{}]: {}",
        "✗".red().bold(),
        failure.case_name,
        failure.method_name,
        failure.kind,
        failure.message
    );
}

fn trend_marker(trend: Trend) -> ColoredString {
    match trend {
        Trend::Improvement => "▼ improvement".green().bold(),
        Trend::Regression => "▲ regression".red().bold(),
        Trend::Mixed => "◆ mixed".yellow().bold(),
        Trend::Unchanged => "= unchanged".normal(),
        Trend::NoPreviousData => "? no previous data".dimmed(),
    }
}

fn print_verdict(verdict: &ComparisonVerdict) {
    let p_value = verdict
        .p_value
        .map_or_else(|| "n/a".to_string(), |p| format!("{:.4}", p));
    let baseline_mean = mean(&verdict.baseline_samples);
    let current_mean = mean(&verdict.current_samples);

    println!(
        "{} {}.{}",
        trend_marker(verdict.trend()),
        verdict.case_name,
        verdict.method_name
    );
    println!(
        "    time: {} -> {} ({}, p={})",
        format_nanos(baseline_mean),
        format_nanos(current_mean),
        verdict.classification,
        p_value
    );
    println!(
        "    operations/run: {:.1} -> {:.1} ({:+.1})",
        verdict.operations.baseline,
        verdict.operations.current,
        verdict.operations.delta()
    );
}

fn mean(samples: &[u64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|&s| s as f64).sum::<f64>() / samples.len() as f64
}

/// Prints a comparison against a baseline.
pub fn print_comparison(comparison: &ComparisonReport) {
    println!("\n{}", "=".repeat(80));
    println!("COMPARISON WITH BASELINE");
    println!("{}", "=".repeat(80));

    if comparison.is_empty() {
        println!("Nothing to compare.");
    }

    for entry in comparison.entries() {
        match entry {
            ComparisonEntry::Matched(verdict) => print_verdict(verdict),
            ComparisonEntry::Added(key) => {
                println!("{} {}", trend_marker(Trend::NoPreviousData), key)
            }
            ComparisonEntry::Removed(key) => {
                println!("{} {}", "- removed".dimmed(), key)
            }
        }
    }

    if comparison.has_regressions() {
        println!("\n{}", "Significant regressions detected.".red().bold());
    }
    println!("{}", "=".repeat(80));
}

/// Prints a failures block to stderr, banner included. Prints nothing when
/// `failures` is empty.
pub fn print_failures(failures: &[MethodFailure]) {
    if failures.is_empty() {
        return;
    }
    eprintln!("\n{}", "-".repeat(80));
    eprintln!("{}", "FAILURES:".red().bold());
    eprintln!("{}", "-".repeat(80));
    for failure in failures {
        print_failure(failure);
    }
}
