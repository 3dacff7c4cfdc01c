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

//! Benchmark harness.
//!
//! Executes benchmark cases and compares the reports they produce.
//!
//! # Modules
//!
//! - `case`: The benchmark case contract
//! - `runner`: Repetition, isolation and result collection
//! - `comparator`: Baseline comparison and regression detection

pub mod case;
pub mod comparator;
pub mod runner;

pub use case::{BenchmarkCase, MethodSpec};
pub use comparator::{
    compare_reports, ComparisonEntry, ComparisonReport, ComparisonVerdict, OperationDelta, Trend,
};
pub use runner::{fold, BenchmarkRunner, MethodTrace, Repetition, RunOutput};
