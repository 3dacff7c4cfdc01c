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

//! Case registration and discovery.
//!
//! Cases are registered under `::`-separated module paths. Selecting a path
//! yields every case registered at that path or below it, so `demos`
//! selects both `demos::accounts` and `demos::faulty`.

use crate::error::{BenchError, Result};
use crate::harness::{BenchmarkCase, MethodSpec};
use crate::tracer::TracedStorage;

/// Method-name prefix that marks a benchmark method.
pub const BENCH_PREFIX: &str = "bench_";

/// A case as the runner sees it.
pub type DynCase<S> = Box<dyn BenchmarkCase<TracedStorage<S>>>;

/// Builds a fresh case instance.
pub type CaseFactory<S> = Box<dyn Fn() -> DynCase<S>>;

/// A case picked by [`CaseRegistry::select`].
pub struct SelectedCase<S> {
    /// Path the case is registered under.
    pub module_path: String,
    /// The instantiated case.
    pub case: DynCase<S>,
}

/// Module path to case factory, in registration order.
pub struct CaseRegistry<S> {
    entries: Vec<(String, CaseFactory<S>)>,
}

impl<S> Default for CaseRegistry<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S> CaseRegistry<S> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a case factory under `module_path`.
    pub fn register<F>(&mut self, module_path: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> DynCase<S> + 'static,
    {
        self.entries.push((module_path.into(), Box::new(factory)));
        self
    }

    /// Registered module paths, in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    /// Number of registered cases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instantiates every case matching one of `module_paths`.
    ///
    /// Cases come out in request order, then registration order within one
    /// request; a case matched twice runs once.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::UnknownModule`] for a path matching nothing.
    pub fn select<P: AsRef<str>>(&self, module_paths: &[P]) -> Result<Vec<SelectedCase<S>>> {
        let mut picked: Vec<usize> = Vec::new();

        for requested in module_paths {
            let requested = requested.as_ref();
            let matches: Vec<usize> = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, (path, _))| path_matches(path, requested))
                .map(|(index, _)| index)
                .collect();

            if matches.is_empty() {
                return Err(BenchError::UnknownModule(requested.to_string()));
            }
            for index in matches {
                if !picked.contains(&index) {
                    picked.push(index);
                }
            }
        }

        Ok(picked
            .into_iter()
            .map(|index| {
                let (path, factory) = &self.entries[index];
                SelectedCase {
                    module_path: path.clone(),
                    case: factory(),
                }
            })
            .collect())
    }

    /// Instantiates every registered case.
    pub fn all(&self) -> Vec<SelectedCase<S>> {
        self.entries
            .iter()
            .map(|(path, factory)| SelectedCase {
                module_path: path.clone(),
                case: factory(),
            })
            .collect()
    }
}

fn path_matches(registered: &str, requested: &str) -> bool {
    let requested = requested.trim_end_matches("::");
    registered == requested
        || registered
            .strip_prefix(requested)
            .is_some_and(|rest| rest.starts_with("::"))
}

/// The benchmark methods of `case`: those named with [`BENCH_PREFIX`].
pub fn discover_methods<T, C>(case: &C) -> Vec<MethodSpec>
where
    C: BenchmarkCase<T> + ?Sized,
{
    case.list_benchmark_methods()
        .into_iter()
        .filter(|spec| spec.name.starts_with(BENCH_PREFIX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::storage::MemoryStore;

    struct Named(&'static str);

    impl<T> BenchmarkCase<T> for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn list_benchmark_methods(&self) -> Vec<MethodSpec> {
            vec![
                MethodSpec::bench("bench_one"),
                MethodSpec::bench("helper"),
                MethodSpec::bench("bench_two").pure(),
            ]
        }

        fn invoke(&mut self, _method: &str, _store: &mut T) -> std::result::Result<(), BoxError> {
            Ok(())
        }
    }

    fn registry() -> CaseRegistry<MemoryStore> {
        let mut registry: CaseRegistry<MemoryStore> = CaseRegistry::new();
        registry
            .register("app::orders", || Box::new(Named("Orders")))
            .register("app::users", || Box::new(Named("Users")))
            .register("application", || Box::new(Named("Other")));
        registry
    }

    fn names(selected: &[SelectedCase<MemoryStore>]) -> Vec<String> {
        selected.iter().map(|s| s.case.name().to_string()).collect()
    }

    #[test]
    fn test_select_exact_and_prefix() {
        let registry = registry();
        assert_eq!(names(&registry.select(&["app::users"]).unwrap()), vec!["Users"]);
        assert_eq!(
            names(&registry.select(&["app"]).unwrap()),
            vec!["Orders", "Users"]
        );
    }

    #[test]
    fn test_select_deduplicates_in_request_order() {
        let registry = registry();
        let selected = registry.select(&["app::users", "app"]).unwrap();
        assert_eq!(names(&selected), vec!["Users", "Orders"]);
    }

    #[test]
    fn test_unknown_module() {
        let registry = registry();
        let err = registry.select(&["app::missing"]).err().unwrap();
        assert_eq!(err, BenchError::UnknownModule("app::missing".to_string()));
        assert!(registry.select(&["ap"]).is_err());
    }

    #[test]
    fn test_empty_selection() {
        let registry = registry();
        let none: [&str; 0] = [];
        assert!(registry.select(&none).unwrap().is_empty());
        assert_eq!(registry.all().len(), 3);
    }

    #[test]
    fn test_discover_methods_filters_prefix() {
        let case = Named("X");
        let methods = discover_methods::<MemoryStore, _>(&case);
        let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["bench_one", "bench_two"]);
        assert!(methods[1].pure);
    }
}
