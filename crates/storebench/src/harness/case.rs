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

//! Benchmark case contract.

use crate::error::BoxError;

/// Registration record of one benchmark method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    /// Method name, passed back to [`BenchmarkCase::invoke`].
    pub name: String,
    /// A pure method leaves the store unchanged and is never flushed.
    pub pure: bool,
}

impl MethodSpec {
    /// Registers an impure method.
    pub fn bench(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pure: false,
        }
    }

    /// Marks the method pure.
    pub fn pure(mut self) -> Self {
        self.pure = true;
        self
    }
}

/// A named group of benchmark methods sharing one setup.
///
/// `S` is the storage type the methods run against; the runner hands them
/// a traced store so every statement they issue is captured.
///
/// # Example
///
/// ```
/// use storebench::harness::{BenchmarkCase, MethodSpec};
/// use storebench::storage::Storage;
/// use storebench::BoxError;
///
/// struct Counting;
///
/// impl<S: Storage> BenchmarkCase<S> for Counting {
///     fn name(&self) -> &str {
///         "Counting"
///     }
///
///     fn list_benchmark_methods(&self) -> Vec<MethodSpec> {
///         vec![MethodSpec::bench("bench_count").pure()]
///     }
///
///     fn invoke(&mut self, _method: &str, store: &mut S) -> Result<(), BoxError> {
///         store.execute("COUNT items:")?;
///         Ok(())
///     }
/// }
/// ```
pub trait BenchmarkCase<S> {
    /// Case name used in reports.
    fn name(&self) -> &str;

    /// Prepares the store before every repetition.
    fn setup(&mut self, _store: &mut S) -> Result<(), BoxError> {
        Ok(())
    }

    /// Every method the case defines, in declaration order.
    fn list_benchmark_methods(&self) -> Vec<MethodSpec>;

    /// Runs one method.
    fn invoke(&mut self, method: &str, store: &mut S) -> Result<(), BoxError>;
}
