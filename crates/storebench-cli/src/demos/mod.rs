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

//! Bundled demonstration cases.
//!
//! Registered under `demos::` and run against the in-memory store, so the
//! binary is usable without any project-specific cases.
//!
//! - `demos::accounts`: per-key lookups versus one range scan
//! - `demos::faulty`: methods that fail in each stage, next to one that works

mod accounts;
mod faulty;

pub use accounts::Accounts;
pub use faulty::Faulty;

use storebench::storage::MemoryStore;
use storebench::CaseRegistry;

/// The registry the `run` and `list` commands use.
pub fn registry() -> CaseRegistry<MemoryStore> {
    let mut registry: CaseRegistry<MemoryStore> = CaseRegistry::new();
    registry
        .register("demos::accounts", || Box::new(Accounts::default()))
        .register("demos::faulty", || Box::new(Faulty::default()));
    registry
}
