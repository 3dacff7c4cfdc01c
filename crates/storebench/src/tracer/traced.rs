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

//! Tracing storage wrapper.

use super::capture::{CaptureSession, OperationRecord};
use super::signature::normalize;
use crate::error::StorageError;
use crate::storage::Storage;
use std::time::Instant;
use tracing::trace;

/// Storage decorator that times and records every statement.
///
/// Replies and errors from the wrapped backend are passed through untouched
/// and in call order. Statements are recorded into the session only while a
/// capture is active; `reset` is forwarded without being recorded.
#[derive(Debug)]
pub struct TracedStorage<S> {
    inner: S,
    session: CaptureSession,
}

impl<S: Storage> TracedStorage<S> {
    /// Wraps `inner`, recording into `session`.
    pub fn new(inner: S, session: CaptureSession) -> Self {
        Self { inner, session }
    }

    /// The session this wrapper records into.
    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    /// Borrows the wrapped backend.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwraps the backend.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Storage> Storage for TracedStorage<S> {
    type Reply = S::Reply;

    fn execute(&mut self, statement: &str) -> Result<Self::Reply, StorageError> {
        let start = Instant::now();
        let outcome = self.inner.execute(statement);
        let elapsed = start.elapsed();

        if self.session.is_capturing() {
            let record = OperationRecord::new(normalize(statement), elapsed);
            trace!(
                signature = %record.signature,
                nanos = record.duration_nanos,
                ok = outcome.is_ok(),
                "storage call"
            );
            self.session.record(record);
        }

        outcome
    }

    fn reset(&mut self) -> Result<(), StorageError> {
        self.inner.reset()
    }
}
