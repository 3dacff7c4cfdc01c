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

//! List command - show registered cases and their benchmark methods

use super::Outcome;
use crate::demos;
use crate::error::CliError;
use colored::Colorize;
use storebench::discover_methods;
use storebench::storage::MemoryStore;
use storebench::tracer::TracedStorage;

/// Lists every registered module path with its case and methods.
pub fn list() -> Result<Outcome, CliError> {
    let registry = demos::registry();

    for selected in registry.all() {
        println!(
            "{} ({})",
            selected.module_path.bold(),
            selected.case.name()
        );
        for method in discover_methods::<TracedStorage<MemoryStore>, _>(selected.case.as_ref()) {
            if method.pure {
                println!("  {} {}", method.name, "[pure]".dimmed());
            } else {
                println!("  {}", method.name);
            }
        }
    }

    Ok(Outcome::Success)
}
