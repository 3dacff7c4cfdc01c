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

//! Report codec validation and comparator ordering tests.
//!
//! All malformed inputs must come back as errors, never panics.

use storebench::harness::{compare_reports, ComparisonEntry};
use storebench::report::{self, BenchResult, MethodKey, OperationCounts, Report};
use storebench::{Classification, ReportError};

fn result(case: &str, method: &str, samples: Vec<u64>) -> BenchResult {
    BenchResult {
        case_name: case.to_string(),
        method_name: method.to_string(),
        sample_nanos: samples,
        operation_counts: OperationCounts::new(),
    }
}

fn assert_malformed(text: &str, needle: &str) {
    match report::decode(text) {
        Err(ReportError::Malformed { reason }) => {
            assert!(reason.contains(needle), "reason '{}' lacks '{}'", reason, needle)
        }
        other => panic!("expected malformed report, got {:?}", other),
    }
}

// ============================================================================
// CATEGORY 1: Malformed Reports
// ============================================================================

#[test]
fn test_result_without_samples_is_rejected() {
    assert_malformed(
        r#"{"timestamp":"2025-03-01T12:00:00Z","toolVersion":"storebench/1.0.0",
            "results":[{"caseName":"A","methodName":"bench_a","operationCounts":{}}]}"#,
        "sampleNanos",
    );
}

#[test]
fn test_missing_tool_version_is_rejected() {
    assert_malformed(
        r#"{"timestamp":"2025-03-01T12:00:00Z","results":[]}"#,
        "toolVersion",
    );
}

#[test]
fn test_negative_duration_is_rejected() {
    assert_malformed(
        r#"{"timestamp":"2025-03-01T12:00:00Z","toolVersion":"storebench/1.0.0",
            "results":[{"caseName":"A","methodName":"bench_a","sampleNanos":[-1],"operationCounts":{}}]}"#,
        "sampleNanos[0]",
    );
}

#[test]
fn test_missing_required_field_is_rejected() {
    assert_malformed(
        r#"{"timestamp":"2025-03-01T12:00:00Z","toolVersion":"storebench/1.0.0",
            "results":[{"caseName":"A","sampleNanos":[1],"operationCounts":{}}]}"#,
        "methodName",
    );
}

#[test]
fn test_bad_timestamp_is_rejected() {
    let text = r#"{"timestamp":"yesterday","toolVersion":"storebench/1.0.0","results":[]}"#;
    assert!(report::decode(text).unwrap_err().is_malformed());
}

#[test]
fn test_garbage_is_rejected() {
    for text in ["", "{", "42", "null", "\"report\""] {
        assert!(report::decode(text).is_err(), "accepted {:?}", text);
    }
}

// ============================================================================
// CATEGORY 2: Comparator Ordering
// ============================================================================

#[test]
fn test_added_and_removed_methods() {
    let baseline = Report::new(
        vec![
            result("Case", "bench_a", vec![10, 11, 12]),
            result("Case", "bench_b", vec![20, 21, 22]),
        ],
        Vec::new(),
    );
    let current = Report::new(
        vec![
            result("Case", "bench_b", vec![20, 21, 22]),
            result("Case", "bench_c", vec![30, 31, 32]),
        ],
        Vec::new(),
    );

    let comparison = compare_reports(&baseline, &current, 0.05);

    let verdicts: Vec<_> = comparison.verdicts().map(|v| v.key()).collect();
    assert_eq!(verdicts, vec![MethodKey::new("Case", "bench_b")]);
    let added: Vec<_> = comparison.added().cloned().collect();
    assert_eq!(added, vec![MethodKey::new("Case", "bench_c")]);
    let removed: Vec<_> = comparison.removed().cloned().collect();
    assert_eq!(removed, vec![MethodKey::new("Case", "bench_a")]);

    // Current order first, removed entries last.
    assert!(matches!(comparison.entries()[0], ComparisonEntry::Matched(_)));
    assert!(matches!(comparison.entries()[1], ComparisonEntry::Added(_)));
    assert!(matches!(comparison.entries()[2], ComparisonEntry::Removed(_)));
}

#[test]
fn test_single_sample_reports_compare_without_p_value() {
    let baseline = Report::new(vec![result("Case", "bench_a", vec![100])], Vec::new());
    let current = Report::new(vec![result("Case", "bench_a", vec![50])], Vec::new());

    let comparison = compare_reports(&baseline, &current, 0.05);
    let verdict = comparison.verdicts().next().unwrap();
    assert!(verdict.p_value.is_none());
    assert_eq!(verdict.classification, Classification::None);
}

#[test]
fn test_loaded_baseline_compares_against_fresh_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("baseline.json");

    let baseline = Report::new(vec![result("Case", "bench_a", vec![500, 510, 505, 495])], Vec::new());
    report::save(&baseline, &path).unwrap();

    let loaded = report::load(&path).unwrap();
    let current = Report::new(vec![result("Case", "bench_a", vec![50, 51, 49, 50])], Vec::new());
    let comparison = compare_reports(&loaded, &current, 0.05);

    assert_eq!(
        comparison.verdicts().next().unwrap().classification,
        Classification::Better
    );
}
