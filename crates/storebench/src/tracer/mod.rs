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

//! Operation tracer.
//!
//! Observes storage calls during one repetition without changing what the
//! storage layer returns.
//!
//! # Modules
//!
//! - `capture`: Capture sessions and operation records
//! - `signature`: Statement normalization
//! - `traced`: The storage decorator that feeds a session

pub mod capture;
pub mod signature;
pub mod traced;

pub use capture::{CaptureGuard, CaptureSession, OperationRecord};
pub use signature::normalize;
pub use traced::TracedStorage;
