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

//! storebench command line interface

use clap::Parser;
use std::process::ExitCode;
use storebench_cli::cli::Commands;
use tracing_subscriber::EnvFilter;

/// storebench - benchmark harness for storage-layer code paths
///
/// Runs benchmark cases against a traced store, records timings and storage
/// operations, and compares runs with Welch's t test.
///
/// # Examples
///
/// ```bash
/// # Run the bundled demos and keep the report
/// storebench run demos -o baseline.json
///
/// # Run again and compare with the baseline
/// storebench run demos -c baseline.json --show-operations
///
/// # Compare two reports
/// storebench compare baseline.json current.json
/// ```
#[derive(Parser)]
#[command(name = "storebench")]
#[command(author, version, about = "storebench - benchmark harness for storage-layer code paths", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays clean for results.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("storebench=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
