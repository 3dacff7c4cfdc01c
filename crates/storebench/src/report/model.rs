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

//! Report data model.

use crate::stats::SampleSummary;
use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Tool/version tag written into every report.
pub const TOOL_VERSION: &str = concat!("storebench/", env!("CARGO_PKG_VERSION"));

/// Identity of one benchmark method across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodKey {
    /// Name of the owning case.
    pub case_name: String,
    /// Name of the method within the case.
    pub method_name: String,
}

impl MethodKey {
    /// Creates a key.
    pub fn new(case_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            case_name: case_name.into(),
            method_name: method_name.into(),
        }
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.case_name, self.method_name)
    }
}

/// Signature to occurrence count, in first-seen order.
///
/// Serializes as a JSON object whose key order is the insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationCounts {
    entries: Vec<(String, u64)>,
}

impl OperationCounts {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `signature`.
    pub fn add(&mut self, signature: &str, count: u64) {
        match self.entries.iter_mut().find(|(sig, _)| sig == signature) {
            Some((_, existing)) => *existing = existing.saturating_add(count),
            None => self.entries.push((signature.to_string(), count)),
        }
    }

    /// Occurrence count of `signature`, zero if never seen.
    pub fn get(&self, signature: &str) -> u64 {
        self.entries
            .iter()
            .find(|(sig, _)| sig == signature)
            .map_or(0, |(_, count)| *count)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(sig, count)| (sig.as_str(), *count))
    }

    /// Number of distinct signatures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no operation was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, (_, count)| acc.saturating_add(*count))
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for OperationCounts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (sig, count) in iter {
            let sig: String = sig.into();
            counts.add(&sig, count);
        }
        counts
    }
}

impl Serialize for OperationCounts {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (sig, count) in &self.entries {
            map.serialize_entry(sig, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OperationCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = OperationCounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of operation signatures to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut counts = OperationCounts::new();
                while let Some((sig, count)) = access.next_entry::<String, u64>()? {
                    counts.add(&sig, count);
                }
                Ok(counts)
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

/// Aggregated measurements of one method across all repetitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchResult {
    /// Name of the owning case.
    pub case_name: String,
    /// Name of the method.
    pub method_name: String,
    /// Elapsed time of each repetition, in execution order. Never empty.
    pub sample_nanos: Vec<u64>,
    /// Operation signatures summed across repetitions.
    pub operation_counts: OperationCounts,
}

impl BenchResult {
    /// Identity key of this result.
    pub fn key(&self) -> MethodKey {
        MethodKey::new(&self.case_name, &self.method_name)
    }

    /// Summary statistics of the timing samples.
    pub fn summary(&self) -> Option<SampleSummary> {
        SampleSummary::from_samples(&self.sample_nanos)
    }

    /// Mean number of storage operations per repetition.
    pub fn operations_per_repetition(&self) -> f64 {
        if self.sample_nanos.is_empty() {
            return 0.0;
        }
        self.operation_counts.total() as f64 / self.sample_nanos.len() as f64
    }
}

/// Stage at which a method failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// The case's setup hook failed.
    Setup,
    /// The method body (or its capture) failed.
    Execution,
    /// Resetting the store after an impure repetition failed.
    Flush,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::Setup => "setup error",
            FailureKind::Execution => "benchmark execution error",
            FailureKind::Flush => "flush error",
        };
        f.write_str(label)
    }
}

/// A method that produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodFailure {
    /// Name of the owning case.
    pub case_name: String,
    /// Name of the method.
    pub method_name: String,
    /// Stage at which it failed.
    pub kind: FailureKind,
    /// Error message of the underlying failure.
    pub message: String,
}

impl MethodFailure {
    /// Identity key of the failed method.
    pub fn key(&self) -> MethodKey {
        MethodKey::new(&self.case_name, &self.method_name)
    }
}

/// The persisted outcome of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// When the run was recorded.
    pub timestamp: DateTime<Utc>,
    /// Tool/version tag of the writer.
    pub tool_version: String,
    /// Results in execution order.
    pub results: Vec<BenchResult>,
    /// Methods that failed, in execution order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<MethodFailure>,
}

impl Report {
    /// Creates a report stamped with the current time and this tool's version.
    pub fn new(results: Vec<BenchResult>, failures: Vec<MethodFailure>) -> Self {
        Self {
            timestamp: Utc::now(),
            tool_version: TOOL_VERSION.to_string(),
            results,
            failures,
        }
    }

    /// Returns whether any method failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
