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

//! Storage capability interface.
//!
//! The harness never reimplements the storage engine it measures. It only
//! needs a backend that accepts textual statements and can wipe its mutable
//! state. Interception happens by wrapping a backend in
//! [`TracedStorage`](crate::tracer::TracedStorage), which implements the same
//! trait, so benchmark code cannot tell whether it is being observed.

pub mod memory;

pub use memory::{MemoryStore, Reply};

use crate::error::StorageError;

/// A storage backend that benchmark cases talk to.
pub trait Storage {
    /// Value produced by a successful statement.
    type Reply;

    /// Executes one statement against the backend.
    fn execute(&mut self, statement: &str) -> Result<Self::Reply, StorageError>;

    /// Destructively resets all mutable state (the flush between impure
    /// repetitions).
    fn reset(&mut self) -> Result<(), StorageError>;
}
