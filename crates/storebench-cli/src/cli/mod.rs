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

//! CLI command definitions and argument parsing.
//!
//! ```text
//! Commands
//! ├── run      execute cases, persist and compare the report
//! ├── compare  compare two persisted reports
//! └── list     show registered cases
//! ```

use crate::commands::{self, Outcome, RunOptions};
use crate::error::CliError;
use clap::Subcommand;
use std::path::PathBuf;
use storebench::DEFAULT_ALPHA;

/// Top-level CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run benchmark cases
    ///
    /// Runs every case registered under the given module paths, prints the
    /// results, and optionally persists the report and compares it with a
    /// baseline. Exits non-zero if any method failed or regressed.
    Run {
        /// Module paths to run (e.g. demos or demos::accounts)
        #[arg(value_name = "MODULE_PATHS")]
        module_paths: Vec<String>,

        /// Write the report to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Compare against the baseline report in this file
        #[arg(short, long, value_name = "FILE")]
        compare: Option<PathBuf>,

        /// Print the storage operations of every method
        #[arg(short = 'q', long)]
        show_operations: bool,

        /// Repetitions per method
        #[arg(short = 'n', long)]
        repetitions: Option<u32>,

        /// Significance level of the comparison
        #[arg(long)]
        alpha: Option<f64>,

        /// Seconds of warm-up before the first case
        #[arg(long, value_name = "SECS")]
        warmup: Option<f64>,
    },

    /// Compare two persisted reports
    ///
    /// Exits non-zero if any method in CURRENT is significantly slower than
    /// in BASELINE, or failed.
    Compare {
        /// Baseline report
        #[arg(value_name = "BASELINE")]
        baseline: PathBuf,

        /// Report to judge
        #[arg(value_name = "CURRENT")]
        current: PathBuf,

        /// Significance level
        #[arg(long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,
    },

    /// List registered cases and their benchmark methods
    List,
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the command could not do its work at all: invalid
    /// arguments, unknown module paths, unreadable or malformed reports.
    pub fn execute(self) -> Result<Outcome, CliError> {
        match self {
            Commands::Run {
                module_paths,
                output,
                compare,
                show_operations,
                repetitions,
                alpha,
                warmup,
            } => commands::run(&RunOptions {
                module_paths,
                output,
                compare,
                show_operations,
                repetitions,
                alpha,
                warmup_secs: warmup,
            }),
            Commands::Compare {
                baseline,
                current,
                alpha,
            } => commands::compare(&baseline, &current, alpha),
            Commands::List => commands::list(),
        }
    }
}
