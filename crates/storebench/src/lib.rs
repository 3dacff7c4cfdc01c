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

//! storebench: benchmark harness for storage-layer code paths.
//!
//! Runs benchmark cases against a traced store, records how long every
//! repetition took and which storage operations it issued, persists the
//! results as a JSON report, and tells whether a new run is significantly
//! better, worse or indistinguishable from a baseline.
//!
//! ## Features
//!
//! - **Operation tracing**: Every statement is timed and normalized into a
//!   signature, so N+1 access patterns show up as repeated signatures
//! - **Isolated repetitions**: Impure methods get their store reset after
//!   every repetition
//! - **Significance testing**: Welch's t test on timing samples
//! - **Stable reports**: Validated JSON reports that round-trip exactly
//!
//! ## Usage
//!
//! ```
//! use storebench::harness::{BenchmarkCase, MethodSpec};
//! use storebench::storage::{MemoryStore, Storage};
//! use storebench::{compare_reports, run, BoxError, CaseRegistry, RunConfig};
//!
//! struct Lookups;
//!
//! impl<S: Storage> BenchmarkCase<S> for Lookups {
//!     fn name(&self) -> &str {
//!         "Lookups"
//!     }
//!
//!     fn list_benchmark_methods(&self) -> Vec<MethodSpec> {
//!         vec![MethodSpec::bench("bench_get").pure()]
//!     }
//!
//!     fn invoke(&mut self, _method: &str, store: &mut S) -> Result<(), BoxError> {
//!         store.execute("GET users:1")?;
//!         Ok(())
//!     }
//! }
//!
//! let mut registry: CaseRegistry<MemoryStore> = CaseRegistry::new();
//! registry.register("app::lookups", || Box::new(Lookups));
//!
//! let config = RunConfig::new().with_repetitions(3);
//! let output = run(&registry, &["app"], MemoryStore::new(), config).unwrap();
//! assert_eq!(output.report.results[0].sample_nanos.len(), 3);
//!
//! let comparison = compare_reports(&output.report, &output.report, 0.05);
//! assert!(!comparison.has_regressions());
//! ```

pub mod core;
pub mod discovery;
pub mod error;
pub mod harness;
pub mod report;
pub mod stats;
pub mod storage;
pub mod tracer;

pub use crate::core::{RunConfig, DEFAULT_ALPHA, DEFAULT_REPETITIONS, DEFAULT_WARMUP};
pub use discovery::{discover_methods, CaseRegistry, BENCH_PREFIX};
pub use error::{BenchError, BoxError, ReportError, Result, StorageError, TraceError};
pub use harness::{compare_reports, BenchmarkRunner, ComparisonReport, RunOutput};
pub use report::{BenchResult, MethodFailure, MethodKey, Report};
pub use stats::{compare_samples, Classification, Direction};
pub use storage::Storage;

use crate::tracer::TracedStorage;

use tracing::info;

/// Runs every case selected by `module_paths` against `store`.
///
/// Cases run sequentially in selection order. Failed methods are recorded
/// in the report instead of aborting the run.
///
/// # Arguments
///
/// * `registry` - Registered cases
/// * `module_paths` - Module paths to select; empty selects nothing
/// * `store` - The backend to benchmark
/// * `config` - Repetitions, significance level and warm-up
///
/// # Errors
///
/// Returns [`BenchError::InvalidConfig`] if `config` does not validate, or
/// [`BenchError::UnknownModule`] if a path matches no registered case.
pub fn run<S, P>(
    registry: &CaseRegistry<S>,
    module_paths: &[P],
    store: S,
    config: RunConfig,
) -> Result<RunOutput>
where
    S: Storage,
    P: AsRef<str>,
{
    let mut runner = BenchmarkRunner::new(store, config)?;
    let selected = registry.select(module_paths)?;
    info!(cases = selected.len(), "selected benchmark cases");

    if !selected.is_empty() {
        runner.warm_up();
    }

    for mut selected_case in selected {
        let methods = discover_methods::<TracedStorage<S>, _>(selected_case.case.as_ref());
        runner.run_case(selected_case.case.as_mut(), &methods);
    }

    Ok(runner.finish())
}
