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

//! Runner isolation and failure handling tests.
//!
//! Uses a store that counts resets to check:
//! 1. Impure methods are flushed once per repetition, pure ones never
//! 2. A failing repetition is still flushed and never leaves capture active
//! 3. One failing or panicking method does not affect the next one

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use storebench::harness::{BenchmarkCase, MethodSpec};
use storebench::report::FailureKind;
use storebench::{run, BenchError, BoxError, CaseRegistry, RunConfig, Storage, StorageError};

#[derive(Clone, Default)]
struct CountingStore {
    resets: Rc<Cell<usize>>,
    executed: Rc<RefCell<Vec<String>>>,
    fail_reset: bool,
}

impl Storage for CountingStore {
    type Reply = ();

    fn execute(&mut self, statement: &str) -> Result<(), StorageError> {
        if statement.starts_with("FAIL") {
            return Err(StorageError::Backend(format!("refused '{}'", statement)));
        }
        self.executed.borrow_mut().push(statement.to_string());
        Ok(())
    }

    fn reset(&mut self) -> Result<(), StorageError> {
        self.resets.set(self.resets.get() + 1);
        if self.fail_reset {
            return Err(StorageError::Backend("reset refused".to_string()));
        }
        Ok(())
    }
}

struct Scripted {
    methods: Vec<MethodSpec>,
    setup_failures: usize,
}

impl Scripted {
    fn new(methods: Vec<MethodSpec>) -> Self {
        Self {
            methods,
            setup_failures: 0,
        }
    }
}

impl<S: Storage> BenchmarkCase<S> for Scripted {
    fn name(&self) -> &str {
        "Scripted"
    }

    fn setup(&mut self, _store: &mut S) -> Result<(), BoxError> {
        if self.setup_failures > 0 {
            self.setup_failures -= 1;
            return Err("fixture could not be loaded".into());
        }
        Ok(())
    }

    fn list_benchmark_methods(&self) -> Vec<MethodSpec> {
        self.methods.clone()
    }

    fn invoke(&mut self, method: &str, store: &mut S) -> Result<(), BoxError> {
        match method {
            "bench_fail" => Err("benchmark body failed".into()),
            "bench_panics" => {
                let rows: Vec<u64> = Vec::new();
                store.execute(&format!("GET x:{}", rows[3]))?;
                Ok(())
            }
            "bench_store_error" => {
                store.execute("FAIL 1")?;
                Ok(())
            }
            _ => {
                store.execute("GET x:1")?;
                store.execute("GET x:2")?;
                Ok(())
            }
        }
    }
}

fn run_scripted(case: Scripted, store: CountingStore, repetitions: u32) -> storebench::RunOutput {
    let shared = RefCell::new(Some(case));
    let mut registry: CaseRegistry<CountingStore> = CaseRegistry::new();
    registry.register("tests::scripted", move || {
        Box::new(shared.borrow_mut().take().unwrap_or_else(|| Scripted::new(Vec::new())))
    });
    let config = RunConfig::new().with_repetitions(repetitions);
    run(&registry, &["tests::scripted"], store, config).unwrap()
}

// ============================================================================
// Flush Policy
// ============================================================================

#[test]
fn test_impure_method_resets_once_per_repetition() {
    let store = CountingStore::default();
    let resets = store.resets.clone();
    let output = run_scripted(Scripted::new(vec![MethodSpec::bench("bench_write")]), store, 5);

    assert_eq!(resets.get(), 5);
    assert_eq!(output.report.results[0].sample_nanos.len(), 5);
}

#[test]
fn test_pure_method_never_resets() {
    let store = CountingStore::default();
    let resets = store.resets.clone();
    let output = run_scripted(
        Scripted::new(vec![MethodSpec::bench("bench_read").pure()]),
        store,
        5,
    );

    assert_eq!(resets.get(), 0);
    assert_eq!(output.report.results.len(), 1);
}

#[test]
fn test_failed_impure_repetition_is_still_flushed() {
    let store = CountingStore::default();
    let resets = store.resets.clone();
    let output = run_scripted(Scripted::new(vec![MethodSpec::bench("bench_fail")]), store, 5);

    // The first repetition fails; its flush still happens and nothing else runs.
    assert_eq!(resets.get(), 1);
    assert!(output.report.results.is_empty());
    assert_eq!(output.report.failures.len(), 1);
    assert_eq!(output.report.failures[0].kind, FailureKind::Execution);
}

#[test]
fn test_failing_flush_fails_the_method() {
    let store = CountingStore {
        fail_reset: true,
        ..CountingStore::default()
    };
    let output = run_scripted(Scripted::new(vec![MethodSpec::bench("bench_write")]), store, 3);

    assert!(output.report.results.is_empty());
    assert_eq!(output.report.failures[0].kind, FailureKind::Flush);
    assert!(output.report.failures[0].message.contains("reset refused"));
}

// ============================================================================
// Failure Isolation
// ============================================================================

#[test]
fn test_setup_failure_does_not_affect_next_method() {
    let mut case = Scripted::new(vec![
        MethodSpec::bench("bench_first").pure(),
        MethodSpec::bench("bench_second").pure(),
    ]);
    case.setup_failures = 1;
    let output = run_scripted(case, CountingStore::default(), 4);

    assert_eq!(output.report.failures.len(), 1);
    let failure = &output.report.failures[0];
    assert_eq!(failure.method_name, "bench_first");
    assert_eq!(failure.kind, FailureKind::Setup);
    assert!(failure.message.contains("fixture"));

    assert_eq!(output.report.results.len(), 1);
    let second = &output.report.results[0];
    assert_eq!(second.method_name, "bench_second");
    assert_eq!(second.sample_nanos.len(), 4);
    assert_eq!(second.operation_counts.get("GET x:?"), 8);
}

#[test]
fn test_capture_is_released_after_failure() {
    let output = run_scripted(
        Scripted::new(vec![
            MethodSpec::bench("bench_fail").pure(),
            MethodSpec::bench("bench_ok").pure(),
        ]),
        CountingStore::default(),
        2,
    );

    assert_eq!(output.report.failures.len(), 1);
    assert_eq!(output.report.results.len(), 1);
    assert_eq!(output.report.results[0].method_name, "bench_ok");
    assert_eq!(output.traces.len(), 1);
    assert_eq!(output.traces[0].operations.len(), 2);
}

#[test]
fn test_panicking_method_is_isolated_and_flushed() {
    let store = CountingStore::default();
    let resets = store.resets.clone();
    let output = run_scripted(
        Scripted::new(vec![
            MethodSpec::bench("bench_panics"),
            MethodSpec::bench("bench_ok"),
        ]),
        store,
        3,
    );

    assert_eq!(output.report.failures.len(), 1);
    let failure = &output.report.failures[0];
    assert_eq!(failure.method_name, "bench_panics");
    assert_eq!(failure.kind, FailureKind::Execution);
    assert!(failure.message.contains("panicked"));

    assert_eq!(output.report.results.len(), 1);
    assert_eq!(output.report.results[0].method_name, "bench_ok");
    assert_eq!(output.report.results[0].sample_nanos.len(), 3);
    // One flush for the failed repetition, then one per healthy repetition.
    assert_eq!(resets.get(), 4);
}

#[test]
fn test_storage_error_is_execution_failure() {
    let output = run_scripted(
        Scripted::new(vec![MethodSpec::bench("bench_store_error").pure()]),
        CountingStore::default(),
        2,
    );

    let failure = &output.report.failures[0];
    assert_eq!(failure.kind, FailureKind::Execution);
    assert!(failure.message.contains("FAIL 1"));
}

#[test]
fn test_operation_counts_sum_across_repetitions() {
    let store = CountingStore::default();
    let executed = store.executed.clone();
    let output = run_scripted(
        Scripted::new(vec![MethodSpec::bench("bench_read").pure()]),
        store,
        3,
    );

    let result = &output.report.results[0];
    assert_eq!(result.operation_counts.get("GET x:?"), 6);
    assert_eq!(result.operation_counts.len(), 1);
    assert_eq!(executed.borrow().len(), 6);
}

// ============================================================================
// Entry Point
// ============================================================================

#[test]
fn test_unknown_module_path() {
    let registry: CaseRegistry<CountingStore> = CaseRegistry::new();
    let err = run(&registry, &["nowhere"], CountingStore::default(), RunConfig::new())
        .err()
        .unwrap();
    assert_eq!(err, BenchError::UnknownModule("nowhere".to_string()));
}

#[test]
fn test_empty_selection_runs_nothing() {
    let registry: CaseRegistry<CountingStore> = CaseRegistry::new();
    let none: [&str; 0] = [];
    let output = run(&registry, &none, CountingStore::default(), RunConfig::new()).unwrap();
    assert_eq!(output.cases_run, 0);
    assert!(output.report.results.is_empty());
}

#[test]
fn test_invalid_config_is_rejected() {
    let registry: CaseRegistry<CountingStore> = CaseRegistry::new();
    let none: [&str; 0] = [];
    let config = RunConfig::new().with_alpha(1.5);
    let err = run(&registry, &none, CountingStore::default(), config)
        .err()
        .unwrap();
    assert!(matches!(err, BenchError::InvalidConfig { .. }));
}
