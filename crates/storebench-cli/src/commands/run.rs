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

//! Run command - execute benchmark cases and optionally compare them

use super::Outcome;
use crate::demos;
use crate::error::CliError;
use crate::render;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use storebench::harness::compare_reports;
use storebench::report;
use storebench::storage::MemoryStore;
use storebench::RunConfig;
use tracing::debug;

/// Options of the `run` command.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Module paths selecting the cases to run.
    pub module_paths: Vec<String>,
    /// Where to persist the report.
    pub output: Option<PathBuf>,
    /// Baseline report to compare against.
    pub compare: Option<PathBuf>,
    /// Print per-signature counts and the last trace of every method.
    pub show_operations: bool,
    /// Overrides the configured repetition count.
    pub repetitions: Option<u32>,
    /// Overrides the configured significance level.
    pub alpha: Option<f64>,
    /// Overrides the configured warm-up, in seconds.
    pub warmup_secs: Option<f64>,
}

impl RunOptions {
    /// Builds the run configuration: environment first, then flags.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidInput`] for a negative or non-finite
    /// warm-up, or [`CliError::Bench`] if the result does not validate.
    pub fn config(&self) -> Result<RunConfig, CliError> {
        let mut config = RunConfig::from_env();
        if let Some(repetitions) = self.repetitions {
            config = config.with_repetitions(repetitions);
        }
        if let Some(alpha) = self.alpha {
            config = config.with_alpha(alpha);
        }
        if let Some(secs) = self.warmup_secs {
            let warmup = Duration::try_from_secs_f64(secs).map_err(|_| {
                CliError::invalid_input(format!(
                    "--warmup must be a non-negative number of seconds, got {}",
                    secs
                ))
            })?;
            config = config.with_warmup(warmup);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Runs the selected demo cases.
///
/// The report is persisted before the comparison, so a baseline that cannot
/// be loaded never costs the new results.
///
/// # Errors
///
/// Returns `Err` if the configuration is invalid, a module path is unknown,
/// or the report cannot be written.
pub fn run(options: &RunOptions) -> Result<Outcome, CliError> {
    if options.module_paths.is_empty() {
        println!("Nothing to do.");
        return Ok(Outcome::Success);
    }

    let config = options.config()?;
    let alpha = config.alpha;
    debug!(?config, "resolved run configuration");

    let registry = demos::registry();
    let output = storebench::run(
        &registry,
        options.module_paths.as_slice(),
        MemoryStore::new(),
        config,
    )?;

    render::print_run(&output, options.show_operations);
    let mut outcome = if output.report.has_failures() {
        Outcome::Failure
    } else {
        Outcome::Success
    };

    if let Some(path) = &options.output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CliError::io_error(parent, e))?;
        }
        report::save(&output.report, path)?;
        println!("Report written to {}", path.display());
    }

    if let Some(path) = &options.compare {
        match report::load(path) {
            Ok(baseline) => {
                let comparison = compare_reports(&baseline, &output.report, alpha);
                render::print_comparison(&comparison);
                if comparison.has_regressions() {
                    outcome = Outcome::Failure;
                }
            }
            Err(e) => {
                eprintln!(
                    "{} cannot compare with '{}': {}",
                    "Error:".red().bold(),
                    path.display(),
                    e
                );
                outcome = Outcome::Failure;
            }
        }
    }

    println!("Ran {} case(s).", output.cases_run);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_configuration() {
        let options = RunOptions {
            repetitions: Some(4),
            alpha: Some(0.01),
            warmup_secs: Some(0.5),
            ..RunOptions::default()
        };
        let config = options.config().unwrap();
        assert_eq!(config.repetitions, 4);
        assert_eq!(config.alpha, 0.01);
        assert_eq!(config.warmup, Duration::from_millis(500));
    }

    #[test]
    fn test_negative_warmup_is_invalid() {
        let options = RunOptions {
            warmup_secs: Some(-1.0),
            ..RunOptions::default()
        };
        assert!(matches!(options.config(), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_repetitions_is_invalid() {
        let options = RunOptions {
            repetitions: Some(0),
            ..RunOptions::default()
        };
        assert!(matches!(options.config(), Err(CliError::Bench(_))));
    }

    #[test]
    fn test_nothing_to_do() {
        assert_eq!(run(&RunOptions::default()).unwrap(), Outcome::Success);
    }
}
