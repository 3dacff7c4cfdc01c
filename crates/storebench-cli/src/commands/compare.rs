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

//! Compare command - compare two persisted reports

use super::Outcome;
use crate::error::CliError;
use crate::render;
use std::path::Path;
use storebench::harness::compare_reports;
use storebench::report;

/// Compares the `current` report against the `baseline` report.
///
/// # Arguments
///
/// * `baseline` - Path of the baseline report
/// * `current` - Path of the report to judge
/// * `alpha` - Significance level
///
/// # Returns
///
/// [`Outcome::Failure`] if any method regressed or failed in the current
/// report.
///
/// # Errors
///
/// Returns `Err` if either report cannot be read or is malformed.
pub fn compare(baseline: &Path, current: &Path, alpha: f64) -> Result<Outcome, CliError> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(CliError::invalid_input(format!(
            "--alpha must be between 0 and 1 (exclusive), got {}",
            alpha
        )));
    }

    let baseline = report::load(baseline)?;
    let current = report::load(current)?;

    let comparison = compare_reports(&baseline, &current, alpha);
    render::print_comparison(&comparison);
    render::print_failures(&current.failures);

    if comparison.has_regressions() || current.has_failures() {
        Ok(Outcome::Failure)
    } else {
        Ok(Outcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storebench::report::{BenchResult, OperationCounts, Report};

    fn write_report(dir: &Path, name: &str, samples: Vec<u64>) -> std::path::PathBuf {
        let report = Report::new(
            vec![BenchResult {
                case_name: "Accounts".to_string(),
                method_name: "bench_lookup_each".to_string(),
                sample_nanos: samples,
                operation_counts: OperationCounts::new(),
            }],
            Vec::new(),
        );
        let path = dir.join(name);
        report::save(&report, &path).unwrap();
        path
    }

    #[test]
    fn test_compare_regression_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let baseline = write_report(dir.path(), "base.json", vec![10, 11, 10, 11, 10]);
        let current = write_report(dir.path(), "cur.json", vec![90, 91, 90, 91, 90]);

        assert_eq!(compare(&baseline, &current, 0.05).unwrap(), Outcome::Failure);
        assert_eq!(compare(&current, &baseline, 0.05).unwrap(), Outcome::Success);
    }

    #[test]
    fn test_compare_rejects_bad_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(dir.path(), "base.json", vec![1]);
        assert!(matches!(
            compare(&path, &path, 0.0),
            Err(CliError::InvalidInput(_))
        ));
    }
}
