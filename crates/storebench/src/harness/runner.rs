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

//! Benchmark runner for executing cases and collecting results.
//!
//! Each method is repeated a fixed number of times. One repetition is:
//! setup, start capture, invoke, finish capture, and (for impure methods)
//! an unconditional store reset. A failure in any repetition discards the
//! method's samples and is recorded as a [`MethodFailure`]; the run then
//! moves on to the next method.

use super::case::{BenchmarkCase, MethodSpec};
use crate::core::{warmup, RunConfig};
use crate::error::Result;
use crate::report::{BenchResult, FailureKind, MethodFailure, MethodKey, OperationCounts, Report};
use crate::storage::Storage;
use crate::tracer::{CaptureSession, OperationRecord, TracedStorage};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, info, warn};

/// One execution of one benchmark method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repetition {
    /// Operations captured during the invocation, in call order.
    pub operations: Vec<OperationRecord>,
    /// Wall-clock time of setup, invocation and capture.
    pub elapsed_nanos: u64,
    /// Whether the method was registered pure.
    pub is_pure: bool,
}

/// Ordered trace of the last repetition of one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodTrace {
    /// The method the trace belongs to.
    pub key: MethodKey,
    /// Captured operations, in call order.
    pub operations: Vec<OperationRecord>,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// The persistable report.
    pub report: Report,
    /// Last-repetition traces of successful methods, for presentation only.
    pub traces: Vec<MethodTrace>,
    /// Number of cases executed.
    pub cases_run: usize,
}

impl RunOutput {
    /// Looks up the trace of `key`.
    pub fn trace(&self, key: &MethodKey) -> Option<&MethodTrace> {
        self.traces.iter().find(|t| &t.key == key)
    }
}

#[derive(Debug)]
struct RepetitionFailure {
    kind: FailureKind,
    message: String,
}

impl RepetitionFailure {
    fn new(kind: FailureKind, err: impl ToString) -> Self {
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Runner executing benchmark cases against one traced store.
pub struct BenchmarkRunner<S: Storage> {
    config: RunConfig,
    session: CaptureSession,
    store: TracedStorage<S>,
    results: Vec<BenchResult>,
    failures: Vec<MethodFailure>,
    traces: Vec<MethodTrace>,
    cases_run: usize,
}

impl<S: Storage> BenchmarkRunner<S> {
    /// Creates a runner around `store`.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidConfig`](crate::BenchError::InvalidConfig)
    /// if `config` does not validate.
    pub fn new(store: S, config: RunConfig) -> Result<Self> {
        config.validate()?;
        let session = CaptureSession::new();
        Ok(Self {
            config,
            store: TracedStorage::new(store, session.clone()),
            session,
            results: Vec::new(),
            failures: Vec::new(),
            traces: Vec::new(),
            cases_run: 0,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Spins the configured warm-up workload, if any.
    pub fn warm_up(&self) {
        if !self.config.warmup.is_zero() {
            info!(seconds = self.config.warmup.as_secs_f64(), "warming up");
            warmup(self.config.warmup);
        }
    }

    /// Runs the given methods of `case`, in order.
    pub fn run_case(
        &mut self,
        case: &mut dyn BenchmarkCase<TracedStorage<S>>,
        methods: &[MethodSpec],
    ) {
        let case_name = case.name().to_string();
        info!(case = %case_name, methods = methods.len(), "running case");
        self.cases_run += 1;

        for spec in methods {
            let key = MethodKey::new(&case_name, &spec.name);
            match self.run_method(case, spec) {
                Ok((result, last_trace)) => {
                    self.results.push(result);
                    self.traces.push(MethodTrace {
                        key,
                        operations: last_trace,
                    });
                }
                Err(failure) => {
                    warn!(
                        method = %key,
                        kind = %failure.kind,
                        error = %failure.message,
                        "benchmark method failed"
                    );
                    self.failures.push(MethodFailure {
                        case_name: key.case_name,
                        method_name: key.method_name,
                        kind: failure.kind,
                        message: failure.message,
                    });
                }
            }
        }
    }

    /// Finishes the run and returns its output.
    pub fn finish(self) -> RunOutput {
        self.finish_with_store().0
    }

    /// Finishes the run and hands back the store as well.
    pub fn finish_with_store(self) -> (RunOutput, S) {
        info!(
            cases = self.cases_run,
            results = self.results.len(),
            failures = self.failures.len(),
            "run finished"
        );
        let output = RunOutput {
            report: Report::new(self.results, self.failures),
            traces: self.traces,
            cases_run: self.cases_run,
        };
        (output, self.store.into_inner())
    }

    fn run_method(
        &mut self,
        case: &mut dyn BenchmarkCase<TracedStorage<S>>,
        spec: &MethodSpec,
    ) -> std::result::Result<(BenchResult, Vec<OperationRecord>), RepetitionFailure> {
        debug!(
            method = %spec.name,
            pure = spec.pure,
            repetitions = self.config.repetitions,
            "running method"
        );

        let mut repetitions = Vec::with_capacity(self.config.repetitions as usize);
        for index in 0..self.config.repetitions {
            let repetition = self.run_repetition(case, spec)?;
            debug!(
                method = %spec.name,
                repetition = index,
                nanos = repetition.elapsed_nanos,
                operations = repetition.operations.len(),
                "repetition complete"
            );
            repetitions.push(repetition);
        }

        let last_trace = repetitions
            .last()
            .map(|r| r.operations.clone())
            .unwrap_or_default();
        Ok((fold(case.name(), &spec.name, &repetitions), last_trace))
    }

    fn run_repetition(
        &mut self,
        case: &mut dyn BenchmarkCase<TracedStorage<S>>,
        spec: &MethodSpec,
    ) -> std::result::Result<Repetition, RepetitionFailure> {
        let start = Instant::now();
        // A panicking benchmark fails its method, not the run.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.measure(case, spec)))
            .unwrap_or_else(|payload| {
                Err(RepetitionFailure::new(
                    FailureKind::Execution,
                    panic_message(payload.as_ref()),
                ))
            });
        let elapsed = start.elapsed();

        // The flush runs whatever happened above.
        let flushed = if spec.pure {
            Ok(())
        } else {
            self.store.reset()
        };

        let operations = match outcome {
            Ok(operations) => operations,
            Err(failure) => {
                if let Err(e) = flushed {
                    warn!(method = %spec.name, error = %e, "flush after failed repetition also failed");
                }
                return Err(failure);
            }
        };
        flushed.map_err(|e| RepetitionFailure::new(FailureKind::Flush, e))?;

        Ok(Repetition {
            operations,
            elapsed_nanos: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
            is_pure: spec.pure,
        })
    }

    fn measure(
        &mut self,
        case: &mut dyn BenchmarkCase<TracedStorage<S>>,
        spec: &MethodSpec,
    ) -> std::result::Result<Vec<OperationRecord>, RepetitionFailure> {
        case.setup(&mut self.store)
            .map_err(|e| RepetitionFailure::new(FailureKind::Setup, e))?;

        let guard = self
            .session
            .start()
            .map_err(|e| RepetitionFailure::new(FailureKind::Execution, e))?;
        // An early return drops the guard, which releases the capture.
        case.invoke(&spec.name, &mut self.store)
            .map_err(|e| RepetitionFailure::new(FailureKind::Execution, e))?;
        guard
            .finish()
            .map_err(|e| RepetitionFailure::new(FailureKind::Execution, e))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string payload".to_string());
    format!("benchmark panicked: {}", detail)
}

/// Folds the repetitions of one method into its result.
///
/// Samples keep repetition order; operation counts are summed across all
/// traces in first-seen order.
pub fn fold(case_name: &str, method_name: &str, repetitions: &[Repetition]) -> BenchResult {
    let mut operation_counts = OperationCounts::new();
    for repetition in repetitions {
        for op in &repetition.operations {
            operation_counts.add(&op.signature, 1);
        }
    }

    BenchResult {
        case_name: case_name.to_string(),
        method_name: method_name.to_string(),
        sample_nanos: repetitions.iter().map(|r| r.elapsed_nanos).collect(),
        operation_counts,
    }
}
