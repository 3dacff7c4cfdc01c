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

//! Capture sessions.
//!
//! A [`CaptureSession`] is an explicit handle shared by the runner and the
//! traced storage wrapper. At most one capture is active per session, and a
//! capture is bound to exactly one repetition through [`CaptureGuard`].

use crate::error::TraceError;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// One observed storage call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    /// Normalized statement text.
    pub signature: String,
    /// Time spent inside the backend call.
    pub duration_nanos: u64,
}

impl OperationRecord {
    /// Creates a record from a signature and a measured duration.
    pub fn new(signature: impl Into<String>, duration: Duration) -> Self {
        Self {
            signature: signature.into(),
            duration_nanos: u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX),
        }
    }
}

#[derive(Debug, Default)]
struct CaptureState {
    active: bool,
    buffer: Vec<OperationRecord>,
}

/// Shared handle to a capture buffer.
///
/// Cloning is cheap; all clones observe the same capture.
#[derive(Debug, Clone, Default)]
pub struct CaptureSession {
    state: Arc<Mutex<CaptureState>>,
}

impl CaptureSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CaptureState> {
        // A panic inside a benchmark must not wedge later repetitions.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Begins capturing and returns a guard scoped to the capture.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::AlreadyCapturing`] if a capture is active.
    pub fn start(&self) -> Result<CaptureGuard, TraceError> {
        let mut state = self.lock();
        if state.active {
            return Err(TraceError::AlreadyCapturing);
        }
        state.active = true;
        state.buffer.clear();
        Ok(CaptureGuard {
            session: self.clone(),
            finished: false,
        })
    }

    /// Ends the active capture and returns its ordered trace.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::NotCapturing`] if no capture is active.
    pub fn stop(&self) -> Result<Vec<OperationRecord>, TraceError> {
        let mut state = self.lock();
        if !state.active {
            return Err(TraceError::NotCapturing);
        }
        state.active = false;
        Ok(std::mem::take(&mut state.buffer))
    }

    /// Returns whether a capture is active.
    pub fn is_capturing(&self) -> bool {
        self.lock().active
    }

    /// Appends a record to the active capture. Does nothing when idle.
    pub fn record(&self, record: OperationRecord) {
        let mut state = self.lock();
        if state.active {
            state.buffer.push(record);
        }
    }
}

/// Scope of one active capture.
///
/// Call [`finish`](CaptureGuard::finish) to collect the trace. Dropping an
/// unfinished guard ends the capture and discards what it recorded.
#[derive(Debug)]
#[must_use = "dropping the guard immediately ends the capture"]
pub struct CaptureGuard {
    session: CaptureSession,
    finished: bool,
}

impl CaptureGuard {
    /// Ends the capture and returns the ordered trace.
    pub fn finish(mut self) -> Result<Vec<OperationRecord>, TraceError> {
        self.finished = true;
        self.session.stop()
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.session.stop();
        }
    }
}
