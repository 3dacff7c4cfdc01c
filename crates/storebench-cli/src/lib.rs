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

//! storebench CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **run**: Run benchmark cases, persist the report, compare with a baseline
//! - **compare**: Compare two persisted reports
//! - **list**: List registered cases and their benchmark methods
//!
//! # Exit Status
//!
//! Zero when every method ran and no comparison found a significant
//! regression; non-zero on any method failure, any regression, or any
//! command error.
//!
//! # Examples
//!
//! ```no_run
//! use storebench_cli::commands::{run, Outcome, RunOptions};
//!
//! # fn main() -> Result<(), storebench_cli::error::CliError> {
//! let options = RunOptions {
//!     module_paths: vec!["demos::accounts".to_string()],
//!     output: Some("report.json".into()),
//!     ..RunOptions::default()
//! };
//! assert_eq!(run(&options)?, Outcome::Success);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod demos;
pub mod error;
pub mod render;
