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

//! Report comparison and regression detection.
//!
//! Pairs the results of two reports by case and method name and runs the
//! statistics engine on every matched pair.

use crate::report::{BenchResult, MethodKey, Report};
use crate::stats::{compare_samples, Classification, Direction};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// Overall movement of a method between two runs.
///
/// Variants are listed from highest to lowest precedence when merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// One metric improved while another regressed.
    Mixed,
    /// Got worse.
    Regression,
    /// Got better.
    Improvement,
    /// No meaningful change.
    Unchanged,
    /// Nothing to compare against.
    NoPreviousData,
}

impl Trend {
    fn precedence(self) -> u8 {
        match self {
            Trend::Mixed => 4,
            Trend::Regression => 3,
            Trend::Improvement => 2,
            Trend::Unchanged => 1,
            Trend::NoPreviousData => 0,
        }
    }

    /// Combines the trends of two metrics of the same method.
    ///
    /// A regression together with an improvement is `Mixed`; otherwise the
    /// higher-precedence trend wins.
    pub fn merge(self, other: Trend) -> Trend {
        match (self, other) {
            (Trend::Regression, Trend::Improvement) | (Trend::Improvement, Trend::Regression) => {
                Trend::Mixed
            }
            _ if other.precedence() > self.precedence() => other,
            _ => self,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Mixed => "mixed",
            Trend::Regression => "regression",
            Trend::Improvement => "improvement",
            Trend::Unchanged => "unchanged",
            Trend::NoPreviousData => "no previous data",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Classification> for Trend {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Better => Trend::Improvement,
            Classification::Worse => Trend::Regression,
            Classification::None => Trend::Unchanged,
        }
    }
}

/// Mean storage operations per repetition in both runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDelta {
    /// Baseline operations per repetition.
    pub baseline: f64,
    /// Current operations per repetition.
    pub current: f64,
}

impl OperationDelta {
    /// Change in operations per repetition (positive means more calls).
    pub fn delta(&self) -> f64 {
        self.current - self.baseline
    }

    /// Trend of the operation count alone.
    pub fn trend(&self) -> Trend {
        let delta = self.delta();
        if delta > 0.0 {
            Trend::Regression
        } else if delta < 0.0 {
            Trend::Improvement
        } else {
            Trend::Unchanged
        }
    }
}

/// Outcome of comparing one method across two runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonVerdict {
    /// Case name.
    pub case_name: String,
    /// Method name.
    pub method_name: String,
    /// Baseline timing samples.
    pub baseline_samples: Vec<u64>,
    /// Current timing samples.
    pub current_samples: Vec<u64>,
    /// Two-sided p-value; `None` when it cannot be computed.
    pub p_value: Option<f64>,
    /// Timing verdict.
    pub classification: Classification,
    /// Direction of the timing mean delta.
    pub direction: Direction,
    /// Storage-operation delta.
    pub operations: OperationDelta,
}

impl ComparisonVerdict {
    /// Identity key.
    pub fn key(&self) -> MethodKey {
        MethodKey::new(&self.case_name, &self.method_name)
    }

    /// Timing and operation-count trends merged.
    pub fn trend(&self) -> Trend {
        Trend::from(self.classification).merge(self.operations.trend())
    }
}

/// One line of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonEntry {
    /// Present in both runs.
    Matched(ComparisonVerdict),
    /// Only in the current run.
    Added(MethodKey),
    /// Only in the baseline run.
    Removed(MethodKey),
}

/// Ordered outcome of comparing two reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonReport {
    entries: Vec<ComparisonEntry>,
}

impl ComparisonReport {
    /// All entries: current order for matched and added, then removed in
    /// baseline order.
    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    /// Verdicts of matched methods.
    pub fn verdicts(&self) -> impl Iterator<Item = &ComparisonVerdict> {
        self.entries.iter().filter_map(|e| match e {
            ComparisonEntry::Matched(v) => Some(v),
            _ => None,
        })
    }

    /// Keys only present in the current run.
    pub fn added(&self) -> impl Iterator<Item = &MethodKey> {
        self.entries.iter().filter_map(|e| match e {
            ComparisonEntry::Added(k) => Some(k),
            _ => None,
        })
    }

    /// Keys only present in the baseline run.
    pub fn removed(&self) -> impl Iterator<Item = &MethodKey> {
        self.entries.iter().filter_map(|e| match e {
            ComparisonEntry::Removed(k) => Some(k),
            _ => None,
        })
    }

    /// Returns whether any matched method got significantly slower.
    pub fn has_regressions(&self) -> bool {
        self.verdicts()
            .any(|v| v.classification == Classification::Worse)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compares `current` against `baseline` at significance level `alpha`.
///
/// Methods that failed in the current run are not reported as removed.
pub fn compare_reports(baseline: &Report, current: &Report, alpha: f64) -> ComparisonReport {
    let mut baseline_index: HashMap<MethodKey, &BenchResult> = HashMap::new();
    for result in &baseline.results {
        baseline_index.entry(result.key()).or_insert(result);
    }

    let mut seen: HashSet<MethodKey> = HashSet::new();
    let mut entries = Vec::with_capacity(current.results.len());

    for result in &current.results {
        let key = result.key();
        if !seen.insert(key.clone()) {
            continue;
        }
        match baseline_index.get(&key) {
            Some(base) => entries.push(ComparisonEntry::Matched(verdict(base, result, alpha))),
            None => entries.push(ComparisonEntry::Added(key)),
        }
    }

    let failed: HashSet<MethodKey> = current.failures.iter().map(|f| f.key()).collect();
    for result in &baseline.results {
        let key = result.key();
        if seen.contains(&key) || failed.contains(&key) {
            continue;
        }
        seen.insert(key.clone());
        entries.push(ComparisonEntry::Removed(key));
    }

    ComparisonReport { entries }
}

fn verdict(baseline: &BenchResult, current: &BenchResult, alpha: f64) -> ComparisonVerdict {
    let significance = compare_samples(&baseline.sample_nanos, &current.sample_nanos, alpha);
    debug!(
        method = %current.key(),
        p_value = ?significance.p_value,
        classification = %significance.classification,
        "compared samples"
    );

    ComparisonVerdict {
        case_name: current.case_name.clone(),
        method_name: current.method_name.clone(),
        baseline_samples: baseline.sample_nanos.clone(),
        current_samples: current.sample_nanos.clone(),
        p_value: significance.p_value,
        classification: significance.classification,
        direction: significance.direction,
        operations: OperationDelta {
            baseline: baseline.operations_per_repetition(),
            current: current.operations_per_repetition(),
        },
    }
}
